// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fetch triggers: decides which feeds are due after a configuration change
//! and runs them concurrently.
//!
//! Each feed is gated by its own toggle and a non-blank username. A feed is
//! re-evaluated only when one of its gating inputs changes, so cosmetic
//! changes (layout, theme, bio or stats toggles) never cause a request.

use tracing::{debug, info};

use crate::{
    config::{CardConfig, ItemCount},
    error::Error,
    github::GithubSource,
    languages::LanguageTally,
    models::{Profile, PullRequest, Repository},
    render::{CardDocument, render_card},
    state::{CardState, FetchKind, Resolution, Ticket},
};

/// Inputs a feed's trigger depends on. A change in any of them re-arms the
/// trigger.
#[derive(Debug, Clone, PartialEq, Eq, Default,)]
struct TriggerInputs
{
    enabled:  bool,
    username: String,
    count:    usize,
}

impl TriggerInputs
{
    fn for_kind(kind: FetchKind, config: &CardConfig,) -> Self
    {
        let (enabled, count,) = match kind {
            FetchKind::Profile => (true, 0,),
            FetchKind::PullRequests => (config.show_pull_requests, 0,),
            FetchKind::Repositories => {
                (config.show_top_repositories, config.repository_count.get(),)
            }
            FetchKind::Languages => (config.show_languages, 0,),
        };

        Self {
            enabled,
            username: config.username().to_owned(),
            count,
        }
    }

    fn is_open(&self,) -> bool
    {
        self.enabled && !self.username.is_empty()
    }
}

/// Set of feeds due for fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default,)]
pub struct FetchPlan
{
    pub profile:       bool,
    pub pull_requests: bool,
    pub repositories:  bool,
    pub languages:     bool,
}

impl FetchPlan
{
    /// Returns `true` when no feed is due.
    pub fn is_empty(&self,) -> bool
    {
        !(self.profile || self.pull_requests || self.repositories || self.languages)
    }

    /// Returns whether `kind` is due.
    pub fn contains(&self, kind: FetchKind,) -> bool
    {
        match kind {
            FetchKind::Profile => self.profile,
            FetchKind::PullRequests => self.pull_requests,
            FetchKind::Repositories => self.repositories,
            FetchKind::Languages => self.languages,
        }
    }

    fn set(&mut self, kind: FetchKind, due: bool,)
    {
        match kind {
            FetchKind::Profile => self.profile = due,
            FetchKind::PullRequests => self.pull_requests = due,
            FetchKind::Repositories => self.repositories = due,
            FetchKind::Languages => self.languages = due,
        }
    }

    /// Due kinds in slot order.
    pub fn kinds(&self,) -> Vec<FetchKind,>
    {
        FetchKind::ALL.into_iter().filter(|kind| self.contains(*kind,),).collect()
    }
}

/// What happened to each feed during a [`Session::sync`].
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct SyncReport
{
    /// Feeds whose slot was replaced.
    pub applied: Vec<FetchKind,>,
    /// Feeds whose request failed; their slot kept its previous value.
    pub failed:  Vec<FetchKind,>,
    /// Feeds whose response was superseded by a newer request.
    pub stale:   Vec<FetchKind,>,
}

impl SyncReport
{
    fn record(&mut self, kind: FetchKind, resolution: Resolution,)
    {
        match resolution {
            Resolution::Applied => self.applied.push(kind,),
            Resolution::Failed => self.failed.push(kind,),
            Resolution::Stale => self.stale.push(kind,),
        }
    }
}

/// Drives a [`CardState`] from configuration changes to rendered cards.
///
/// # Example
///
/// ```no_run
/// use ghcard::{CardConfig, GithubClient, Session};
///
/// # async fn example() -> Result<(), ghcard::Error> {
/// let client = GithubClient::new()?;
/// let mut session = Session::new(CardConfig {
///     username: "octocat".to_owned(),
///     ..CardConfig::default()
/// },);
/// session.sync(&client,).await;
/// let card = session.render();
/// println!("{}", card.svg());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone,)]
pub struct Session
{
    state:     CardState,
    evaluated: [TriggerInputs; 4],
    due:       FetchPlan,
}

impl Session
{
    /// Creates a session and evaluates the triggers for `config`.
    pub fn new(config: CardConfig,) -> Self
    {
        let mut session = Self {
            state:     CardState::new(CardConfig::default(),),
            evaluated: Default::default(),
            due:       FetchPlan::default(),
        };
        session.apply(config,);
        session
    }

    /// Read access to the owned state container.
    pub fn state(&self,) -> &CardState
    {
        &self.state
    }

    /// Feeds currently due.
    pub fn due(&self,) -> FetchPlan
    {
        self.due
    }

    /// Replaces the configuration snapshot and re-evaluates every trigger.
    ///
    /// A feed becomes due when any of its gating inputs differs from the last
    /// evaluation and its gate is open; closing a gate cancels a pending
    /// fetch that has not started. Returns the resulting plan.
    pub fn apply(&mut self, config: CardConfig,) -> FetchPlan
    {
        for (position, kind,) in FetchKind::ALL.into_iter().enumerate() {
            let inputs = TriggerInputs::for_kind(kind, &config,);
            if inputs != self.evaluated[position] {
                let due = inputs.is_open();
                debug!("Trigger for {} re-evaluated (due: {})", kind, due);
                self.due.set(kind, due,);
                self.evaluated[position] = inputs;
            }
        }

        self.state.set_config(config,);
        self.due
    }

    /// Marks every open feed as due, as if the lookup was submitted again.
    pub fn refresh(&mut self,) -> FetchPlan
    {
        for (position, kind,) in FetchKind::ALL.into_iter().enumerate() {
            self.due.set(kind, self.evaluated[position].is_open(),);
        }
        self.due
    }

    /// Runs every due feed concurrently and applies the results.
    ///
    /// Feeds never wait on each other: a failing or slow request only
    /// affects its own slot. Failures are logged and keep the previous
    /// value; nothing is retried.
    pub async fn sync<S,>(&mut self, source: &S,) -> SyncReport
    where
        S: GithubSource,
    {
        let pending = self.begin();
        if pending.is_empty() {
            return SyncReport::default();
        }
        let fetched = pending.fetch(source,).await;
        self.resolve(fetched,)
    }

    /// Issues a ticket for every due feed and consumes the plan.
    ///
    /// The returned requests borrow nothing from the session, so further
    /// snapshots may be applied while they are in flight. Responses handed
    /// back through [`Session::resolve`] after a newer request for the same
    /// feed was issued are discarded as stale.
    pub fn begin(&mut self,) -> PendingSync
    {
        let plan = std::mem::take(&mut self.due,);
        let config = self.state.config();
        let pending = PendingSync {
            username:         config.username().to_owned(),
            repository_count: config.repository_count,
            profile:          plan.profile.then(|| self.state.profile.issue(),),
            pull_requests:    plan.pull_requests.then(|| self.state.pull_requests.issue(),),
            repositories:     plan.repositories.then(|| self.state.repositories.issue(),),
            languages:        plan.languages.then(|| self.state.languages.issue(),),
        };
        if !plan.is_empty() {
            info!("Fetching {:?} for {}", plan.kinds(), pending.username);
        }
        pending
    }

    /// Applies fetched responses whose tickets are still the latest.
    pub fn resolve(&mut self, fetched: FetchedFeeds,) -> SyncReport
    {
        let mut report = SyncReport::default();
        if let Some((ticket, outcome,),) = fetched.profile {
            let resolution = self.state.profile.resolve(ticket, outcome.map(Some,),);
            report.record(FetchKind::Profile, resolution,);
        }
        if let Some((ticket, outcome,),) = fetched.pull_requests {
            let resolution = self.state.pull_requests.resolve(ticket, outcome,);
            report.record(FetchKind::PullRequests, resolution,);
        }
        if let Some((ticket, outcome,),) = fetched.repositories {
            let resolution = self.state.repositories.resolve(ticket, outcome,);
            report.record(FetchKind::Repositories, resolution,);
        }
        if let Some((ticket, outcome,),) = fetched.languages {
            let resolution = self.state.languages.resolve(ticket, outcome,);
            report.record(FetchKind::Languages, resolution,);
        }
        report
    }

    /// Renders the active layout from the current state.
    pub fn render(&self,) -> CardDocument
    {
        render_card(&self.state.card_input(),)
    }
}

/// Requests issued by [`Session::begin`], one ticket per due feed.
#[derive(Debug, Clone,)]
pub struct PendingSync
{
    username:         String,
    repository_count: ItemCount,
    profile:          Option<Ticket,>,
    pull_requests:    Option<Ticket,>,
    repositories:     Option<Ticket,>,
    languages:        Option<Ticket,>,
}

impl PendingSync
{
    /// Returns `true` when no feed was due.
    pub fn is_empty(&self,) -> bool
    {
        self.profile.is_none()
            && self.pull_requests.is_none()
            && self.repositories.is_none()
            && self.languages.is_none()
    }

    /// Username the requests were issued for.
    pub fn username(&self,) -> &str
    {
        &self.username
    }

    /// Runs the issued requests concurrently.
    pub async fn fetch<S,>(self, source: &S,) -> FetchedFeeds
    where
        S: GithubSource,
    {
        let username = self.username.as_str();
        let count = self.repository_count;
        let (profile, pull_requests, repositories, languages,) = tokio::join!(
            run(self.profile, || source.profile(username)),
            run(self.pull_requests, || source.pull_requests(username)),
            run(self.repositories, || source.top_repositories(username, count)),
            run(self.languages, || async {
                let listing = source.all_repositories(username,).await?;
                Ok::<_, Error,>(LanguageTally::from_repositories(&listing,),)
            }),
        );

        FetchedFeeds {
            profile,
            pull_requests,
            repositories,
            languages,
        }
    }
}

/// Responses produced by [`PendingSync::fetch`], waiting for
/// [`Session::resolve`].
#[derive(Debug,)]
pub struct FetchedFeeds
{
    profile:       Option<(Ticket, Result<Profile, Error,>,),>,
    pull_requests: Option<(Ticket, Result<Vec<PullRequest,>, Error,>,),>,
    repositories:  Option<(Ticket, Result<Vec<Repository,>, Error,>,),>,
    languages:     Option<(Ticket, Result<LanguageTally, Error,>,),>,
}

async fn run<T, F, Fut,>(ticket: Option<Ticket,>, fetch: F,) -> Option<(Ticket, Result<T, Error,>,),>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, Error,>,>,
{
    match ticket {
        Some(ticket,) => Some((ticket, fetch().await,),),
        None => None,
    }
}
