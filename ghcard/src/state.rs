// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Owned state container holding the configuration snapshot and one fetch
//! slot per data feed.
//!
//! Every slot hands out a monotonically increasing [`Ticket`] when a request
//! is issued and only accepts the response carrying the latest ticket, so a
//! slow response for an earlier username can never overwrite newer state.
//! Successful responses replace the slot value wholesale; failures are
//! logged and leave the previous value in place.

use std::fmt;

use tracing::{debug, warn};

use crate::{
    config::CardConfig,
    error::Error,
    languages::LanguageTally,
    models::{Profile, PullRequest, Repository},
    render::CardInput
};

/// Identifies one of the independently fetched data feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FetchKind {
    /// Public profile record.
    Profile,
    /// Authored pull requests.
    PullRequests,
    /// Most starred repositories.
    Repositories,
    /// Language tally derived from the full repository listing.
    Languages
}

impl FetchKind {
    /// Every fetch kind, in slot order.
    pub const ALL: [FetchKind; 4] = [
        FetchKind::Profile,
        FetchKind::PullRequests,
        FetchKind::Repositories,
        FetchKind::Languages
    ];

    /// Stable lowercase identifier used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            FetchKind::Profile => "profile",
            FetchKind::PullRequests => "pull_requests",
            FetchKind::Repositories => "repositories",
            FetchKind::Languages => "languages"
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sequence number handed out when a slot issues a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket {
    kind:     FetchKind,
    sequence: u64
}

impl Ticket {
    /// Slot the ticket was issued by.
    pub fn kind(self) -> FetchKind {
        self.kind
    }

    /// Position of the request in the slot's issue order, starting at 1.
    pub fn sequence(self) -> u64 {
        self.sequence
    }
}

/// Outcome of resolving a ticket against its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response replaced the slot value.
    Applied,
    /// The request failed; the previous value was kept.
    Failed,
    /// A newer request was issued meanwhile; the response was discarded.
    Stale
}

/// State slot written by exactly one fetch kind.
#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    kind:    FetchKind,
    value:   T,
    issued:  u64,
    settled: u64
}

impl<T> FetchSlot<T>
where
    T: Default
{
    /// Creates an empty slot for `kind`.
    pub fn new(kind: FetchKind) -> Self {
        Self {
            kind,
            value: T::default(),
            issued: 0,
            settled: 0
        }
    }
}

impl<T> FetchSlot<T> {
    /// Current value of the slot.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Returns `true` while a request issued by this slot has not resolved.
    pub fn is_pending(&self) -> bool {
        self.settled < self.issued
    }

    /// Issues a ticket for a new request, superseding any in flight.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket {
            kind:     self.kind,
            sequence: self.issued
        }
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Responses for superseded tickets are discarded. A failure leaves the
    /// previous value untouched and is only logged.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<T, Error>) -> Resolution {
        debug_assert_eq!(ticket.kind, self.kind, "ticket resolved against foreign slot");

        if ticket.sequence != self.issued {
            debug!(
                "Discarding stale {} response #{} (latest is #{})",
                self.kind, ticket.sequence, self.issued
            );
            return Resolution::Stale;
        }

        self.settled = ticket.sequence;
        match outcome {
            Ok(value) => {
                self.value = value;
                Resolution::Applied
            }
            Err(error) => {
                warn!("Fetching {} failed: {}", self.kind, error);
                Resolution::Failed
            }
        }
    }
}

/// Explicit owner of the configuration snapshot and every fetched entity.
#[derive(Debug, Clone)]
pub struct CardState {
    config:            CardConfig,
    pub profile:       FetchSlot<Option<Profile>>,
    pub pull_requests: FetchSlot<Vec<PullRequest>>,
    pub repositories:  FetchSlot<Vec<Repository>>,
    pub languages:     FetchSlot<LanguageTally>
}

impl CardState {
    /// Creates a state container with every slot empty.
    pub fn new(config: CardConfig) -> Self {
        Self {
            config,
            profile: FetchSlot::new(FetchKind::Profile),
            pull_requests: FetchSlot::new(FetchKind::PullRequests),
            repositories: FetchSlot::new(FetchKind::Repositories),
            languages: FetchSlot::new(FetchKind::Languages)
        }
    }

    /// Active configuration snapshot.
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Replaces the configuration snapshot wholesale.
    pub fn set_config(&mut self, config: CardConfig) {
        self.config = config;
    }

    /// Returns `true` while any slot awaits a response.
    pub fn is_pending(&self) -> bool {
        self.profile.is_pending()
            || self.pull_requests.is_pending()
            || self.repositories.is_pending()
            || self.languages.is_pending()
    }

    /// Borrows the renderer inputs from the current state.
    pub fn card_input(&self) -> CardInput<'_> {
        CardInput {
            profile:       self.profile.get().as_ref(),
            pull_requests: self.pull_requests.get(),
            repositories:  self.repositories.get(),
            languages:     self.languages.get(),
            config:        &self.config
        }
    }
}
