// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Card rendering.
//!
//! Every [`Layout`] maps to one [`CardRenderer`] strategy. Renderers receive
//! the same [`CardInput`], derive the shared [`CardView`] from it and draw
//! that view as a self-contained SVG [`CardDocument`]. Until a profile is
//! available every layout draws the placeholder view instead.
//!
//! # Examples
//!
//! ```
//! use ghcard::{CardConfig, LanguageTally, render::{CardInput, render_card}};
//!
//! let config = CardConfig::default();
//! let tally = LanguageTally::default();
//! let card = render_card(&CardInput {
//!     profile:       None,
//!     pull_requests: &[],
//!     repositories:  &[],
//!     languages:     &tally,
//!     config:        &config,
//! },);
//! assert!(card.is_placeholder());
//! ```

mod classic;
mod document;
mod placeholder;
mod receipt;
mod terminal;
mod theme;
mod view;

pub use classic::Classic;
pub use document::{CardDocument, DataPoint, Field, escape_xml};
pub use receipt::Receipt;
pub use terminal::Terminal;
pub use theme::Palette;
pub use view::{CardView, Header, MAX_LANGUAGES, PullRequestList, SocialLink, Stats};

use crate::{
    config::{CardConfig, ColorTheme, Layout},
    languages::LanguageTally,
    models::{Profile, PullRequest, Repository},
};

/// Borrowed snapshot of everything a renderer may display.
#[derive(Debug, Clone, Copy,)]
pub struct CardInput<'a,>
{
    pub profile:       Option<&'a Profile,>,
    pub pull_requests: &'a [PullRequest],
    pub repositories:  &'a [Repository],
    pub languages:     &'a LanguageTally,
    pub config:        &'a CardConfig,
}

/// Layout strategy turning a [`CardView`] into an SVG document.
pub trait CardRenderer: Sync
{
    /// Layout this renderer implements.
    fn layout(&self,) -> Layout;

    /// Draws a card for a fetched profile.
    fn draw(&self, view: &CardView<'_,>, theme: ColorTheme,) -> CardDocument;

    /// Renders `input`, falling back to the placeholder view while no
    /// profile is available.
    fn render(&self, input: &CardInput<'_,>,) -> CardDocument
    {
        match CardView::build(input,) {
            Some(view,) => self.draw(&view, input.config.color_theme,),
            None => placeholder::draw(self.layout(), input.config.color_theme,),
        }
    }
}

/// Returns the renderer for `layout`.
pub fn renderer_for(layout: Layout,) -> &'static dyn CardRenderer
{
    match layout {
        Layout::Classic => &Classic,
        Layout::Receipt => &Receipt,
        Layout::Terminal => &Terminal,
    }
}

/// Renders `input` with the layout selected by its configuration.
pub fn render_card(input: &CardInput<'_,>,) -> CardDocument
{
    renderer_for(input.config.layout,).render(input,)
}

#[cfg(test)]
pub(crate) mod testing
{
    use serde_json::json;

    use super::CardInput;
    use crate::{
        config::CardConfig,
        github::fixtures,
        languages::LanguageTally,
        models::{Profile, PullRequest, Repository},
    };

    /// Owned renderer inputs for a fully populated octocat card.
    pub(crate) struct Fixture
    {
        pub config:        CardConfig,
        pub profile:       Option<Profile,>,
        pub pull_requests: Vec<PullRequest,>,
        pub repositories:  Vec<Repository,>,
        pub languages:     LanguageTally,
    }

    impl Fixture
    {
        pub(crate) fn new(config: CardConfig,) -> Self
        {
            let mut profile = fixtures::profile("octocat",);
            profile["name"] = json!("The Octocat");
            profile["bio"] = json!("Code & share <everything>");
            profile["created_at"] = json!("2011-01-25T18:44:36Z");
            profile["blog"] = json!("github.blog");
            profile["twitter_username"] = json!("@github");

            let repositories: Vec<Repository,> = [
                fixtures::repository(1, "Hello-World", Some("Ruby",), 2600),
                fixtures::repository(2, "Spoon-Knife", Some("HTML",), 1300),
                fixtures::repository(3, "octocat.github.io", Some("Ruby",), 900),
                fixtures::repository(4, "linguist", Some("Ruby",), 300),
                fixtures::repository(5, "git-consortium", None, 100),
            ]
            .into_iter()
            .map(|value| serde_json::from_value(value,).expect("valid repository fixture",),)
            .collect();

            let pull_requests: Vec<PullRequest,> = (1..=5)
                .map(|id| {
                    let state = if id % 2 == 0 { "closed" } else { "open" };
                    serde_json::from_value(fixtures::pull_request(id, state,),)
                        .expect("valid pull request fixture",)
                },)
                .collect();

            Self {
                config,
                profile: Some(serde_json::from_value(profile,).expect("valid profile fixture",),),
                languages: LanguageTally::from_repositories(&repositories,),
                pull_requests,
                repositories,
            }
        }

        pub(crate) fn input(&self,) -> CardInput<'_,>
        {
            CardInput {
                profile:       self.profile.as_ref(),
                pull_requests: &self.pull_requests,
                repositories:  &self.repositories,
                languages:     &self.languages,
                config:        &self.config,
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::{CardDocument, DataPoint, Field, render_card, renderer_for, testing::Fixture};
    use crate::config::{CardConfig, ColorTheme, ItemCount, Layout};

    fn item_count() -> impl Strategy<Value = ItemCount,>
    {
        prop::sample::select(vec![ItemCount::One, ItemCount::Three, ItemCount::Five],)
    }

    prop_compose! {
        fn card_config()(
            show_follow_stats in any::<bool>(),
            show_bio in any::<bool>(),
            show_pull_requests in any::<bool>(),
            pull_request_count in item_count(),
            show_top_repositories in any::<bool>(),
            repository_count in item_count(),
            show_languages in any::<bool>(),
            show_social_links in any::<bool>(),
            dark in any::<bool>(),
        ) -> CardConfig {
            CardConfig {
                username: "octocat".to_owned(),
                show_follow_stats,
                show_bio,
                show_pull_requests,
                pull_request_count,
                show_top_repositories,
                repository_count,
                show_languages,
                show_social_links,
                color_theme: if dark { ColorTheme::Dark } else { ColorTheme::Default },
                ..CardConfig::default()
            }
        }
    }

    fn render_all(config: &CardConfig,) -> Vec<CardDocument,>
    {
        Layout::ALL
            .into_iter()
            .map(|layout| {
                let fixture = Fixture::new(CardConfig {
                    layout,
                    ..config.clone()
                },);
                render_card(&fixture.input(),)
            },)
            .collect()
    }

    fn data_point_set(document: &CardDocument,) -> BTreeSet<DataPoint,>
    {
        document.data_points().iter().cloned().collect()
    }

    proptest! {
        #[test]
        fn layouts_show_identical_data_points(config in card_config()) {
            let documents = render_all(&config,);
            let reference = data_point_set(&documents[0],);
            for document in &documents[1..] {
                prop_assert_eq!(&data_point_set(document,), &reference, "{}", document.layout());
            }
        }

        #[test]
        fn disabled_toggles_hide_sections_in_every_layout(config in card_config()) {
            for document in render_all(&config,) {
                let layout = document.layout();
                prop_assert_eq!(document.has_field(Field::Bio,), config.show_bio, "{}", layout);
                prop_assert_eq!(
                    document.has_field(Field::Followers,),
                    config.show_follow_stats,
                    "{}",
                    layout
                );
                prop_assert_eq!(
                    document.has_field(Field::Language,),
                    config.show_languages,
                    "{}",
                    layout
                );
                prop_assert_eq!(
                    document.has_field(Field::Repository,),
                    config.show_top_repositories,
                    "{}",
                    layout
                );
                prop_assert_eq!(
                    document.has_field(Field::RepositoryDescription,),
                    config.show_top_repositories,
                    "{}",
                    layout
                );
                prop_assert_eq!(
                    document.has_field(Field::LanguageCount,),
                    config.show_languages,
                    "{}",
                    layout
                );
                prop_assert_eq!(
                    document.has_field(Field::PullRequest,),
                    config.show_pull_requests,
                    "{}",
                    layout
                );
                prop_assert_eq!(
                    document.has_field(Field::PullRequestCreated,),
                    config.show_pull_requests,
                    "{}",
                    layout
                );
                prop_assert_eq!(
                    document.has_field(Field::SocialLink,),
                    config.show_social_links,
                    "{}",
                    layout
                );
                prop_assert!(document.has_field(Field::Login,));
                prop_assert!(document.has_field(Field::Avatar,));
                prop_assert!(document.has_field(Field::Created,));
            }
        }

        #[test]
        fn missing_profile_renders_placeholder(config in card_config()) {
            for layout in Layout::ALL {
                let mut fixture = Fixture::new(CardConfig {
                    layout,
                    ..config.clone()
                },);
                fixture.profile = None;
                let document = render_card(&fixture.input(),);
                prop_assert!(document.is_placeholder());
                prop_assert!(!document.has_field(Field::Login,));
                prop_assert!(!document.has_field(Field::PullRequest,));
                prop_assert_eq!(document.layout(), layout);
            }
        }
    }

    #[test]
    fn renderer_for_selects_matching_strategy()
    {
        for layout in Layout::ALL {
            assert_eq!(renderer_for(layout,).layout(), layout);
        }
    }

    #[test]
    fn three_repositories_render_without_more_notice()
    {
        let config = CardConfig {
            username: "octocat".to_owned(),
            show_top_repositories: true,
            repository_count: ItemCount::Three,
            ..CardConfig::default()
        };

        for document in render_all(&config,) {
            assert_eq!(
                document.values(Field::Repository,),
                ["Hello-World", "Spoon-Knife", "octocat.github.io"],
                "{}",
                document.layout()
            );
            assert!(!document.svg().contains("more",), "{}", document.layout());
        }
    }

    #[test]
    fn repository_and_pull_request_details_reach_every_layout()
    {
        let config = CardConfig {
            username: "octocat".to_owned(),
            show_pull_requests: true,
            show_top_repositories: true,
            show_languages: true,
            ..CardConfig::default()
        };
        let documents = render_all(&config,);

        for document in &documents {
            let layout = document.layout();
            assert_eq!(
                document.values(Field::RepositoryDescription,),
                ["Hello-World description", "Spoon-Knife description", "octocat.github.io description"],
                "{}",
                layout
            );
            assert_eq!(document.values(Field::RepositoryStars,), ["2600", "1300", "900"], "{}", layout);
            assert_eq!(document.values(Field::PullRequestState,), ["open", "closed", "open"], "{}", layout);
            assert_eq!(document.values(Field::PullRequestCreated,), ["2024-03-02"; 3], "{}", layout);
            assert_eq!(document.values(Field::LanguageCount,), ["3", "1"], "{}", layout);
            assert!(document.svg().contains("Hello-World description",), "{}", layout);
        }
        assert_eq!(data_point_set(&documents[0],), data_point_set(&documents[1],));
        assert_eq!(data_point_set(&documents[1],), data_point_set(&documents[2],));
    }

    #[test]
    fn terminal_lists_repositories_under_repo_prompt()
    {
        let fixture = Fixture::new(CardConfig {
            username: "octocat".to_owned(),
            show_top_repositories: true,
            layout: Layout::Terminal,
            ..CardConfig::default()
        },);
        let svg = render_card(&fixture.input(),).svg().to_owned();
        let prompt = svg.find("$ git repo --list",).expect("repository prompt",);
        let last = svg.find("octocat.github.io",).expect("third repository",);
        assert!(prompt < last);
        assert!(!svg.contains("linguist",));
    }

    #[test]
    fn single_pull_request_reports_the_rest()
    {
        let config = CardConfig {
            username: "octocat".to_owned(),
            show_pull_requests: true,
            pull_request_count: ItemCount::One,
            ..CardConfig::default()
        };

        for document in render_all(&config,) {
            assert_eq!(document.values(Field::PullRequest,).len(), 1, "{}", document.layout());
            assert_eq!(document.values(Field::PullRequestsRemaining,), ["4"]);
            assert!(document.svg().contains("...and 4 more",), "{}", document.layout());
        }
    }

    #[test]
    fn user_text_is_escaped_in_every_layout()
    {
        let config = CardConfig {
            username: "octocat".to_owned(),
            ..CardConfig::default()
        };

        for document in render_all(&config,) {
            assert!(document.svg().contains("Code &amp; share &lt;everything&gt;",));
            assert!(!document.svg().contains("<everything>",));
        }
    }

    #[test]
    fn layouts_produce_distinct_markup()
    {
        let config = CardConfig {
            username: "octocat".to_owned(),
            ..CardConfig::default()
        };
        let documents = render_all(&config,);
        assert_ne!(documents[0].svg(), documents[1].svg());
        assert_ne!(documents[1].svg(), documents[2].svg());
        assert!(documents[1].svg().contains("THANK YOU FOR CODING",));
        assert!(documents[2].svg().contains("$ whoami",));
    }

    #[test]
    fn rendering_is_deterministic()
    {
        let fixture = Fixture::new(CardConfig {
            username: "octocat".to_owned(),
            show_pull_requests: true,
            show_languages: true,
            show_top_repositories: true,
            show_social_links: true,
            ..CardConfig::default()
        },);
        assert_eq!(render_card(&fixture.input(),), render_card(&fixture.input(),));
    }
}
