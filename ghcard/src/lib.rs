//! Renders GitHub profile cards.
//!
//! A [`CardConfig`] snapshot decides which data feeds a [`Session`] fetches
//! from the public GitHub REST API and which sections the card shows. Each
//! feed is fetched independently and concurrently; a failing feed only leaves
//! its own section empty. The fetched state is drawn by one of three layout
//! strategies (classic, receipt, terminal) into a self-contained SVG
//! [`CardDocument`], which [`export_card`] writes to disk together with a JSON
//! manifest.
//!
//! ```no_run
//! use ghcard::{CardConfig, GithubClient, Layout, Session};
//!
//! # async fn example() -> Result<(), ghcard::Error> {
//! let config = CardConfig {
//!     username: "octocat".to_owned(),
//!     layout: Layout::Terminal,
//!     show_pull_requests: true,
//!     ..CardConfig::default()
//! };
//! let mut session = Session::new(config.validated()?,);
//! session.sync(&GithubClient::new()?,).await;
//! println!("{}", session.render().svg());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod export;
mod github;
mod languages;
pub mod models;
pub mod render;
mod session;
mod slug;
mod state;

pub use config::{CardConfig, ColorTheme, ItemCount, Layout};
pub use error::{Error, export_io_error, io_error};
pub use export::{ExportedCard, export_card};
pub use github::{DEFAULT_API_URL, GithubClient, GithubSource};
pub use languages::LanguageTally;
pub use render::{CardDocument, CardInput, CardRenderer, DataPoint, Field, render_card, renderer_for};
pub use session::{FetchPlan, FetchedFeeds, PendingSync, Session, SyncReport};
pub use slug::{ExportName, slugify};
pub use state::{CardState, FetchKind, FetchSlot, Resolution, Ticket};
