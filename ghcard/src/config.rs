//! Card configuration: the flat set of display toggles and enum choices that
//! drive fetching and rendering.
//!
//! Configuration is assembled from three layers, last one wins: the built-in
//! defaults, an optional YAML document, and CLI overrides applied by the
//! binary. Field names accept both snake_case and the camelCase keys used by
//! web form presets, so exported presets load unchanged.

use std::{fmt, fs, path::Path, str::FromStr};

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{self, Error};

/// GitHub login rule: alphanumerics and single inner hyphens, 1..=39 chars.
const USERNAME_PATTERN: &str = r"^[A-Za-z0-9](?:-?[A-Za-z0-9]){0,38}$";

/// Snapshot of every user-adjustable card option.
///
/// The renderer receives this by shared reference and never mutates it; a
/// new lookup builds a new value and replaces the old one wholesale.
///
/// # Examples
///
/// ```
/// use ghcard::{CardConfig, ItemCount, Layout};
///
/// let yaml = r#"
/// username: octocat
/// layout: terminal
/// showPRs: true
/// pull_request_count: 5
/// "#;
/// let config = CardConfig::parse(yaml,).expect("valid configuration",);
/// assert_eq!(config.layout, Layout::Terminal);
/// assert!(config.show_pull_requests);
/// assert_eq!(config.pull_request_count, ItemCount::Five);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig
{
    /// GitHub login whose card is rendered. Empty means "nothing to fetch".
    pub username: String,

    /// Show the followers / following / public repositories grid.
    #[serde(alias = "showFollowStats", alias = "isShowFollowers")]
    pub show_follow_stats: bool,

    /// Show the profile bio under the header.
    #[serde(alias = "showBio", alias = "isBio")]
    pub show_bio: bool,

    /// Fetch and show authored pull requests.
    #[serde(alias = "showPullRequests", alias = "showPRs")]
    pub show_pull_requests: bool,

    /// Number of pull requests listed before the "more" indicator.
    #[serde(alias = "pullRequestCount", alias = "prCount")]
    pub pull_request_count: ItemCount,

    /// Active layout strategy.
    #[serde(alias = "style")]
    pub layout: Layout,

    /// Palette applied by the layout.
    #[serde(alias = "colorTheme", alias = "theme")]
    pub color_theme: ColorTheme,

    /// Fetch and show the most starred repositories.
    #[serde(alias = "showTopRepositories", alias = "showTopRepos")]
    pub show_top_repositories: bool,

    /// Number of repositories listed in the top repositories section.
    #[serde(alias = "repositoryCount", alias = "repoCount")]
    pub repository_count: ItemCount,

    /// Fetch the full repository list and show the language tally.
    #[serde(alias = "showLanguages")]
    pub show_languages: bool,

    /// Show profile and social links.
    #[serde(alias = "showSocialLinks")]
    pub show_social_links: bool,
}

impl Default for CardConfig
{
    fn default() -> Self
    {
        Self {
            username:              String::new(),
            show_follow_stats:     true,
            show_bio:              true,
            show_pull_requests:    false,
            pull_request_count:    ItemCount::Three,
            layout:                Layout::Classic,
            color_theme:           ColorTheme::Default,
            show_top_repositories: false,
            repository_count:      ItemCount::Three,
            show_languages:        false,
            show_social_links:     false,
        }
    }
}

impl CardConfig
{
    /// Reads and validates a YAML configuration document from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, [`Error::Parse`]
    /// when the YAML is malformed or carries unknown keys, and
    /// [`Error::Validation`] when the username is not a valid GitHub login.
    pub fn load(path: &Path,) -> Result<Self, Error,>
    {
        let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
        Self::parse(&contents,)
    }

    /// Parses and validates a YAML configuration document.
    ///
    /// # Errors
    ///
    /// See [`CardConfig::load`].
    pub fn parse(yaml: &str,) -> Result<Self, Error,>
    {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml,)?
        };
        config.validated()
    }

    /// Returns the trimmed username that gates every fetch.
    pub fn username(&self,) -> &str
    {
        self.username.trim()
    }

    /// Returns `true` when a non-blank username is configured.
    pub fn has_username(&self,) -> bool
    {
        !self.username().is_empty()
    }

    /// Trims the username and checks it against GitHub's login rule.
    ///
    /// A blank username is valid: it simply keeps every fetch gated off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a non-blank username is not a
    /// valid GitHub login.
    pub fn validated(mut self,) -> Result<Self, Error,>
    {
        let trimmed = self.username().to_owned();
        if !trimmed.is_empty() {
            let pattern = Regex::new(USERNAME_PATTERN,)
                .map_err(|e| Error::validation(format!("invalid username pattern: {e}"),),)?;
            if !pattern.is_match(&trimmed,) {
                return Err(Error::validation(format!(
                    "'{trimmed}' is not a valid GitHub username"
                ),),);
            }
        }
        self.username = trimmed;
        Ok(self,)
    }
}

/// Layout strategies a card can be rendered with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Layout
{
    /// Rounded card with avatar, stat tiles and lists.
    #[default]
    Classic,
    /// Monospaced shop receipt.
    Receipt,
    /// Shell session transcript inside a terminal window.
    Terminal,
}

impl Layout
{
    /// Every layout, in the order they are offered to users.
    pub const ALL: [Layout; 3] = [Layout::Classic, Layout::Receipt, Layout::Terminal];

    /// Stable lowercase identifier used in file names and manifests.
    pub fn as_str(self,) -> &'static str
    {
        match self {
            Layout::Classic => "classic",
            Layout::Receipt => "receipt",
            Layout::Terminal => "terminal",
        }
    }
}

impl fmt::Display for Layout
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.as_str(),)
    }
}

/// Palette choice applied by the layouts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorTheme
{
    /// Light palette.
    #[default]
    Default,
    /// Dark palette.
    Dark,
}

impl ColorTheme
{
    /// Stable lowercase identifier used in manifests.
    pub fn as_str(self,) -> &'static str
    {
        match self {
            ColorTheme::Default => "default",
            ColorTheme::Dark => "dark",
        }
    }
}

/// Number of list items a section displays. Only 1, 3 and 5 are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,)]
#[serde(try_from = "u8", into = "u8")]
pub enum ItemCount
{
    /// A single item.
    One,
    /// Three items.
    #[default]
    Three,
    /// Five items.
    Five,
}

impl ItemCount
{
    /// Returns the count as a `usize` suitable for slicing.
    pub fn get(self,) -> usize
    {
        match self {
            ItemCount::One => 1,
            ItemCount::Three => 3,
            ItemCount::Five => 5,
        }
    }
}

impl TryFrom<u8,> for ItemCount
{
    type Error = String;

    fn try_from(value: u8,) -> Result<Self, Self::Error,>
    {
        match value {
            1 => Ok(ItemCount::One,),
            3 => Ok(ItemCount::Three,),
            5 => Ok(ItemCount::Five,),
            other => Err(format!("item count must be one of 1, 3 or 5, got {other}"),),
        }
    }
}

impl From<ItemCount,> for u8
{
    fn from(value: ItemCount,) -> Self
    {
        value.get() as u8
    }
}

impl FromStr for ItemCount
{
    type Err = String;

    fn from_str(value: &str,) -> Result<Self, Self::Err,>
    {
        let parsed = value
            .trim()
            .parse::<u8,>()
            .map_err(|_| format!("item count must be one of 1, 3 or 5, got '{value}'"),)?;
        Self::try_from(parsed,)
    }
}

impl fmt::Display for ItemCount
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "{}", self.get())
    }
}
