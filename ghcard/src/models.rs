// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Records returned by the public GitHub REST API.
//!
//! Only the fields a card displays are modelled. Records are flat and carry
//! no local referential integrity; GitHub stays the source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a GitHub account (`GET /users/{username}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Profile
{
    /// Account login, unique on GitHub.
    pub login:            String,
    /// Profile name as entered by the user.
    #[serde(default)]
    pub name:             Option<String,>,
    /// Avatar image URL.
    pub avatar_url:       String,
    /// Free-form bio, possibly blank.
    #[serde(default)]
    pub bio:              Option<String,>,
    /// Account creation time.
    pub created_at:       DateTime<Utc,>,
    /// Follower count.
    pub followers:        u64,
    /// Count of accounts the user follows.
    pub following:        u64,
    /// Public repository count.
    pub public_repos:     u64,
    /// Profile page URL.
    pub html_url:         String,
    /// Website as entered, with or without a scheme.
    #[serde(default)]
    pub blog:             Option<String,>,
    /// X handle, with or without a leading `@`.
    #[serde(default)]
    pub twitter_username: Option<String,>,
    /// Free-form location.
    #[serde(default)]
    pub location:         Option<String,>,
    /// Free-form company name.
    #[serde(default)]
    pub company:          Option<String,>,
}

impl Profile
{
    /// Display name, falling back to the login when the profile has none.
    pub fn display_name(&self,) -> &str
    {
        self.name.as_deref().map(str::trim,).filter(|name| !name.is_empty(),).unwrap_or(&self.login,)
    }

    /// Bio with surrounding whitespace removed, `None` when blank.
    pub fn bio(&self,) -> Option<&str,>
    {
        self.bio.as_deref().map(str::trim,).filter(|bio| !bio.is_empty(),)
    }
}

/// Lifecycle state of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState
{
    /// Still open for review.
    Open,
    /// Merged or closed without merging.
    Closed,
}

impl PullRequestState
{
    /// Lowercase name used by the API.
    pub fn as_str(self,) -> &'static str
    {
        match self {
            PullRequestState::Open => "open",
            PullRequestState::Closed => "closed",
        }
    }
}

/// Pull request authored by the user, as found by issue search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct PullRequest
{
    /// Issue identifier.
    pub id:         u64,
    /// Pull request title.
    pub title:      String,
    /// Pull request page URL.
    pub html_url:   String,
    /// Open or closed.
    pub state:      PullRequestState,
    /// Creation time.
    pub created_at: DateTime<Utc,>,
}

/// Owner sub-record embedded in repository payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct RepositoryOwner
{
    /// Owner login.
    pub login: String,
}

/// Repository owned by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Repository
{
    /// Repository identifier.
    pub id:               u64,
    /// Repository name without the owner prefix.
    pub name:             String,
    /// Repository page URL.
    pub html_url:         String,
    /// Short description, possibly blank.
    #[serde(default)]
    pub description:      Option<String,>,
    /// Primary language detected by GitHub.
    #[serde(default)]
    pub language:         Option<String,>,
    /// Star count.
    pub stargazers_count: u64,
    /// Fork count.
    pub forks_count:      u64,
    /// Creation time.
    pub created_at:       DateTime<Utc,>,
    /// Time of the last update.
    pub updated_at:       DateTime<Utc,>,
    /// Owning account.
    pub owner:            RepositoryOwner,
}

impl Repository
{
    /// Description with surrounding whitespace removed, `None` when blank.
    pub fn description(&self,) -> Option<&str,>
    {
        self.description.as_deref().map(str::trim,).filter(|description| !description.is_empty(),)
    }
}

/// Envelope of the search endpoints.
#[derive(Debug, Clone, Deserialize,)]
pub(crate) struct SearchResults<T,>
{
    #[serde(default = "Vec::new")]
    pub items: Vec<T,>,
}
