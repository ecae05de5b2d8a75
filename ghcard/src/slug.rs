// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! File names for exported cards.
//!
//! Export names combine the username and the layout into a slug made of
//! lowercase ASCII alphanumerics joined by single hyphens, so the same card
//! always lands at the same path on every platform.

use crate::config::Layout;

/// Builder for the file stem of an exported card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportName<'input> {
    username: &'input str,
    layout:   Layout
}

impl<'input> ExportName<'input> {
    /// Creates a name builder for `username` rendered with `layout`.
    pub fn builder(username: &'input str, layout: Layout) -> Self {
        Self {
            username,
            layout
        }
    }

    /// Returns the `<username>-<layout>` slug, or `None` when the username
    /// contains no slug-worthy characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghcard::{ExportName, Layout};
    ///
    /// let stem = ExportName::builder(" Octo_Cat ", Layout::Terminal).build();
    /// assert_eq!(stem.as_deref(), Some("octo-cat-terminal"));
    /// ```
    pub fn build(self) -> Option<String> {
        let user = slugify(self.username)?;
        Some(format!("{user}-{}", self.layout.as_str()))
    }
}

/// Lowercases ASCII letters and collapses every run of other characters
/// into a single hyphen. Returns `None` when nothing remains.
pub fn slugify(source: &str) -> Option<String> {
    let slug = source
        .split(|character: char| !character.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() { None } else { Some(slug) }
}
