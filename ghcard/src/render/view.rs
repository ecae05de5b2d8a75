// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Section visibility shared by every layout.
//!
//! [`CardView::build`] decides once which sections a card shows and which
//! items each section lists. Layouts only decide how to draw the view, so a
//! toggle hides the same data in every layout.

use crate::{
    models::{PullRequest, Repository},
    render::{CardInput, document::format_date}
};

/// Maximum number of ranked languages a card lists.
pub const MAX_LANGUAGES: usize = 5;

/// Always-visible identity block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    /// Account login.
    pub login:        &'a str,
    /// Profile name, or the login when the profile has none.
    pub display_name: &'a str,
    /// Avatar image URL.
    pub avatar_url:   &'a str,
    /// Account creation date formatted as `Month DD, YYYY`.
    pub created:      String
}

/// Follow and repository counters shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Follower count.
    pub followers:    u64,
    /// Count of accounts the user follows.
    pub following:    u64,
    /// Public repository count.
    pub public_repos: u64
}

/// Pull requests to list plus the number left out by the cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestList<'a> {
    /// Pull requests within the count cap, in API order.
    pub items:     &'a [PullRequest],
    /// Number of fetched pull requests beyond the cap.
    pub remaining: usize
}

impl PullRequestList<'_> {
    /// Text of the overflow indicator, `None` when nothing was left out.
    pub fn more_label(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("...and {} more", self.remaining))
    }
}

/// Outbound link listed in the links section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    /// Link kind: `GitHub`, `Website` or `X`.
    pub label: &'static str,
    /// Absolute URL.
    pub url:   String
}

/// Everything a layout draws for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub header:        Header<'a>,
    /// Trimmed bio, `None` when hidden or blank.
    pub bio:           Option<&'a str>,
    pub stats:         Option<Stats>,
    /// Highest ranked languages with their repository counts.
    pub languages:     Vec<(&'a str, u32)>,
    /// Top repositories within the count cap; empty when hidden.
    pub repositories:  &'a [Repository],
    /// `None` when hidden or when no pull request was fetched.
    pub pull_requests: Option<PullRequestList<'a>>,
    pub social_links:  Vec<SocialLink>
}

impl<'a> CardView<'a> {
    /// Builds the view for `input`. Returns `None` when no profile has been
    /// fetched yet.
    pub fn build(input: &CardInput<'a>) -> Option<Self> {
        let profile = input.profile?;
        let config = input.config;

        let header = Header {
            login:        &profile.login,
            display_name: profile.display_name(),
            avatar_url:   &profile.avatar_url,
            created:      format_date(&profile.created_at)
        };

        let bio = if config.show_bio {
            profile.bio()
        } else {
            None
        };

        let stats = config.show_follow_stats.then_some(Stats {
            followers:    profile.followers,
            following:    profile.following,
            public_repos: profile.public_repos
        });

        let languages = if config.show_languages {
            let mut ranked = input.languages.ranked();
            ranked.truncate(MAX_LANGUAGES);
            ranked
        } else {
            Vec::new()
        };

        let repositories: &'a [Repository] = if config.show_top_repositories {
            let shown = input.repositories.len().min(config.repository_count.get());
            &input.repositories[..shown]
        } else {
            &[]
        };

        let pull_requests = if config.show_pull_requests && !input.pull_requests.is_empty() {
            let shown = input.pull_requests.len().min(config.pull_request_count.get());
            Some(PullRequestList {
                items:     &input.pull_requests[..shown],
                remaining: input.pull_requests.len() - shown
            })
        } else {
            None
        };

        let social_links = if config.show_social_links {
            social_links(
                &profile.html_url,
                profile.blog.as_deref(),
                profile.twitter_username.as_deref()
            )
        } else {
            Vec::new()
        };

        Some(Self {
            header,
            bio,
            stats,
            languages,
            repositories,
            pull_requests,
            social_links
        })
    }
}

fn social_links(profile_url: &str, blog: Option<&str>, twitter: Option<&str>) -> Vec<SocialLink> {
    let mut links = vec![SocialLink {
        label: "GitHub",
        url:   profile_url.to_owned()
    }];

    if let Some(blog) = blog.map(str::trim).filter(|blog| !blog.is_empty()) {
        let url = if blog.starts_with("http://") || blog.starts_with("https://") {
            blog.to_owned()
        } else {
            format!("https://{blog}")
        };
        links.push(SocialLink {
            label: "Website",
            url
        });
    }

    if let Some(handle) = twitter
        .map(|handle| handle.trim().trim_start_matches('@'))
        .filter(|handle| !handle.is_empty())
    {
        links.push(SocialLink {
            label: "X",
            url:   format!("https://x.com/{handle}")
        });
    }

    links
}
