// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Language frequency derived from a user's repository listing.
//!
//! The tally keeps languages in the order they are first seen during the
//! scan, so two derivations over the same listing always compare equal.
//! Repositories without a language tag never contribute an entry.

use std::collections::HashMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::models::Repository;

/// Ordered mapping from language name to the number of repositories using
/// it.
///
/// # Examples
///
/// ```
/// use ghcard::LanguageTally;
///
/// let tally = LanguageTally::from_languages([Some("Rust"), None, Some("Go"), Some("Rust")]);
/// assert_eq!(tally.get("Rust"), Some(2));
/// assert_eq!(tally.get("Go"), Some(1));
/// assert_eq!(tally.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTally {
    entries: Vec<(String, u32)>,
    index:   HashMap<String, usize>
}

impl LanguageTally {
    /// Derives the tally from a repository listing.
    pub fn from_repositories(repositories: &[Repository]) -> Self {
        Self::from_languages(
            repositories
                .iter()
                .map(|repository| repository.language.as_deref())
        )
    }

    /// Derives the tally from a sequence of optional language tags.
    pub fn from_languages<'a, I>(languages: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>
    {
        let mut tally = Self::default();
        for language in languages.into_iter().flatten() {
            tally.record(language);
        }
        tally
    }

    fn record(&mut self, language: &str) {
        match self.index.get(language) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(language.to_owned(), self.entries.len());
                self.entries.push((language.to_owned(), 1));
            }
        }
    }

    /// Number of repositories tagged with `language`.
    pub fn get(&self, language: &str) -> Option<u32> {
        self.index
            .get(language)
            .map(|&position| self.entries[position].1)
    }

    /// Iterates `(language, count)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries
            .iter()
            .map(|(language, count)| (language.as_str(), *count))
    }

    /// Number of distinct languages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no repository carried a language tag.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of repositories that carried a language tag.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Languages sorted by descending count. Ties keep first-appearance
    /// order.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self.iter().collect();
        ranked.sort_by(|left, right| right.1.cmp(&left.1));
        ranked
    }
}

impl Serialize for LanguageTally {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (language, count) in &self.entries {
            map.serialize_entry(language, count)?;
        }
        map.end()
    }
}
