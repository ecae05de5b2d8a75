// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Terminal layout: the card as a shell session inside a terminal window.
//!
//! Each section is introduced by the command that would print it, so the
//! order of prompts mirrors the order of sections in the other layouts.

use super::{
    CardRenderer,
    document::{
        Anchor, Canvas, CardDocument, Field, Font, TextStyle, format_count, format_iso_date, truncate,
        wrap
    },
    theme::Palette,
    view::CardView
};
use crate::{
    config::{ColorTheme, Layout},
    models::PullRequestState
};

const WIDTH: u32 = 560;
const PADDING: u32 = 20;
const TITLE_BAR: u32 = 32;
const LINE: u32 = 20;
const COLUMNS: usize = 64;
const BAR_WIDTH: u32 = 200;
const TRAFFIC_LIGHTS: [&str; 3] = ["#ff5f56", "#ffbd2e", "#27c93f"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Terminal;

impl CardRenderer for Terminal {
    fn layout(&self) -> Layout {
        Layout::Terminal
    }

    fn draw(&self, view: &CardView<'_>, theme: ColorTheme) -> CardDocument {
        let palette = Palette::terminal(theme);
        let mut canvas = Canvas::new(Layout::Terminal, theme, WIDTH);
        canvas.frame(palette.surface, Some(palette.border), 10);
        chrome(&mut canvas, &palette);

        let output = TextStyle::new(Font::Mono, 13, palette.text);
        let muted = output.fill(palette.muted);
        let mut shell = Shell {
            canvas:       &mut canvas,
            prompt_style: output.fill(palette.accent).bold(),
            y:            TITLE_BAR + 28
        };

        let header = &view.header;
        shell.prompt("whoami");
        shell.canvas.avatar(
            header.avatar_url,
            (WIDTH - PADDING - 32, TITLE_BAR + 52),
            32,
            palette.accent
        );
        shell
            .canvas
            .field(Field::Login, header.login, (PADDING, shell.y), &output.bold(), header.login);
        shell.y += LINE;
        shell.canvas.field(
            Field::DisplayName,
            header.display_name,
            (PADDING, shell.y),
            &muted,
            &format!("name:    {}", truncate(header.display_name, 40))
        );
        shell.y += LINE;
        shell.canvas.field(
            Field::Created,
            &header.created,
            (PADDING, shell.y),
            &muted,
            &format!("joined:  {}", header.created)
        );
        shell.y += LINE;

        if let Some(bio) = view.bio {
            shell.prompt("cat bio.txt");
            let lines = wrap(bio, COLUMNS, 4);
            shell
                .canvas
                .field_lines(Field::Bio, bio, (PADDING, shell.y), LINE, &output, &lines);
            shell.y += LINE * lines.len() as u32;
        }

        if let Some(stats) = view.stats {
            shell.prompt("git stats");
            let columns = [
                (Field::Followers, "followers", stats.followers, 0),
                (Field::Following, "following", stats.following, 180),
                (Field::PublicRepos, "repos", stats.public_repos, 340)
            ];
            for (field, label, value, offset) in columns {
                shell.canvas.field(
                    field,
                    &value.to_string(),
                    (PADDING + offset, shell.y),
                    &output,
                    &format!("{label}: {}", format_count(value))
                );
            }
            shell.y += LINE;
        }

        if let Some(&(_, top)) = view.languages.first() {
            shell.prompt("lang --top");
            for (language, count) in &view.languages {
                let y = shell.y;
                shell.canvas.field(
                    Field::Language,
                    language,
                    (PADDING, y),
                    &output,
                    &truncate(language, 16)
                );
                let length = (BAR_WIDTH * count / top.max(1)).max(4);
                shell
                    .canvas
                    .rect((PADDING + 150, y - 10), (length, 10), 2, palette.accent, None);
                let count = count.to_string();
                shell.canvas.field(
                    Field::LanguageCount,
                    &count,
                    (PADDING + 160 + length, y),
                    &muted,
                    &count
                );
                shell.y += LINE;
            }
        }

        if !view.repositories.is_empty() {
            shell.prompt("git repo --list");
            for repository in view.repositories {
                let y = shell.y;
                shell.canvas.field(
                    Field::RepositoryStars,
                    &repository.stargazers_count.to_string(),
                    (PADDING, y),
                    &muted,
                    &format!("★ {}", format_count(repository.stargazers_count))
                );
                shell.canvas.field(
                    Field::Repository,
                    &repository.name,
                    (PADDING + 90, y),
                    &output,
                    &truncate(&repository.name, COLUMNS - 12)
                );
                shell.y += LINE;
                if let Some(description) = repository.description() {
                    shell.canvas.field(
                        Field::RepositoryDescription,
                        description,
                        (PADDING + 90, shell.y),
                        &muted,
                        &format!("# {}", truncate(description, COLUMNS - 14))
                    );
                    shell.y += LINE;
                }
            }
        }

        if let Some(list) = &view.pull_requests {
            shell.prompt("git pr --list");
            for pull_request in list.items {
                let y = shell.y;
                let colour = match pull_request.state {
                    PullRequestState::Open => palette.positive,
                    PullRequestState::Closed => palette.negative
                };
                shell.canvas.field(
                    Field::PullRequestState,
                    pull_request.state.as_str(),
                    (PADDING, y),
                    &output.fill(colour),
                    &format!("[{}]", pull_request.state.as_str())
                );
                shell.canvas.field(
                    Field::PullRequest,
                    &pull_request.title,
                    (PADDING + 90, y),
                    &output,
                    &truncate(&pull_request.title, COLUMNS - 24)
                );
                let created = format_iso_date(&pull_request.created_at);
                shell.canvas.field(
                    Field::PullRequestCreated,
                    &created,
                    (WIDTH - PADDING, y),
                    &muted.anchor(Anchor::End),
                    &created
                );
                shell.y += LINE;
            }
            if let Some(more) = list.more_label() {
                shell.canvas.field(
                    Field::PullRequestsRemaining,
                    &list.remaining.to_string(),
                    (PADDING, shell.y),
                    &muted,
                    &more
                );
                shell.y += LINE;
            }
        }

        if !view.social_links.is_empty() {
            shell.prompt("open --links");
            for link in &view.social_links {
                shell.canvas.field(
                    Field::SocialLink,
                    &link.url,
                    (PADDING, shell.y),
                    &output.fill(palette.accent),
                    &truncate(&link.url, COLUMNS)
                );
                shell.y += LINE;
            }
        }

        shell.y += 8;
        let y = shell.y;
        shell.canvas.text((PADDING, y), &shell.prompt_style, "$");
        shell
            .canvas
            .rect((PADDING + 14, y - 12), (8, 15), 0, palette.text, None);

        let label = format!("GitHub terminal card for {}", header.login);
        canvas.finish(y + PADDING, &label)
    }
}

/// Writes prompts and advances the cursor line.
struct Shell<'c> {
    canvas:       &'c mut Canvas,
    prompt_style: TextStyle,
    y:            u32
}

impl Shell<'_> {
    fn prompt(&mut self, command: &str) {
        if self.y > TITLE_BAR + 28 {
            self.y += 8;
        }
        let prompt = self.prompt_style;
        self.canvas
            .text((PADDING, self.y), &prompt, &format!("$ {command}"));
        self.y += LINE;
    }
}

fn chrome(canvas: &mut Canvas, palette: &Palette) {
    let width = canvas.width() - 2;
    canvas.rect((1, 1), (width, TITLE_BAR), 10, palette.background, None);
    canvas.rect((1, TITLE_BAR / 2), (width, TITLE_BAR / 2), 0, palette.background, None);
    canvas.line((1, TITLE_BAR), (width + 1, TITLE_BAR), palette.border, false);

    for (index, colour) in TRAFFIC_LIGHTS.into_iter().enumerate() {
        canvas.circle((20 + index as u32 * 20, TITLE_BAR / 2), 6, colour);
    }

    let title = TextStyle::new(Font::Sans, 12, palette.muted).anchor(Anchor::Middle);
    canvas.text((WIDTH / 2, TITLE_BAR / 2 + 4), &title, "bash");
}

#[cfg(test)]
mod tests {
    use super::Terminal;
    use crate::{
        config::{CardConfig, ColorTheme},
        render::{CardRenderer, Field, testing::Fixture}
    };

    fn full() -> Fixture {
        Fixture::new(CardConfig {
            show_pull_requests: true,
            show_top_repositories: true,
            show_languages: true,
            show_social_links: true,
            ..CardConfig::default()
        })
    }

    #[test]
    fn window_chrome_has_three_traffic_lights() {
        let svg = Terminal.render(&full().input()).svg().to_owned();
        for colour in ["#ff5f56", "#ffbd2e", "#27c93f"] {
            assert!(svg.contains(&format!("fill=\"{colour}\"")), "{colour}");
        }
    }

    #[test]
    fn prompts_follow_section_order() {
        let svg = Terminal.render(&full().input()).svg().to_owned();
        let prompts = [
            "$ whoami",
            "$ cat bio.txt",
            "$ git stats",
            "$ lang --top",
            "$ git repo --list",
            "$ git pr --list",
            "$ open --links"
        ];
        let positions: Vec<usize> = prompts
            .iter()
            .map(|prompt| svg.find(prompt).unwrap_or_else(|| panic!("missing {prompt}")))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn hidden_sections_have_no_prompt() {
        let fixture = Fixture::new(CardConfig {
            show_bio: false,
            show_follow_stats: false,
            ..CardConfig::default()
        });
        let svg = Terminal.render(&fixture.input()).svg().to_owned();
        assert!(svg.contains("$ whoami"));
        assert!(!svg.contains("$ cat bio.txt"));
        assert!(!svg.contains("$ git stats"));
        assert!(!svg.contains("$ git pr --list"));
    }

    #[test]
    fn pull_request_states_are_bracketed() {
        let svg = Terminal.render(&full().input()).svg().to_owned();
        assert!(svg.contains(">[open]</text>"));
        assert!(svg.contains(">[closed]</text>"));
        assert!(svg.contains("text-anchor=\"end\">2024-03-02</text>"));
    }

    #[test]
    fn repositories_list_stars_and_commented_descriptions() {
        let document = Terminal.render(&full().input());
        let svg = document.svg();
        assert!(svg.contains(">★ 2,600</text>"));
        assert!(svg.contains("># Hello-World description</text>"));
        assert_eq!(document.values(Field::LanguageCount), ["3", "1"]);
    }

    #[test]
    fn screen_stays_dark_in_light_theme() {
        let fixture = Fixture::new(CardConfig {
            color_theme: ColorTheme::Default,
            ..CardConfig::default()
        });
        let svg = Terminal.render(&fixture.input()).svg().to_owned();
        assert!(svg.contains("fill=\"#1e1e1e\""));
    }
}
