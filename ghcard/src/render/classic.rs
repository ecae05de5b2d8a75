// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Classic layout: rounded card with avatar, stat tiles and section lists.

use super::{
    CardRenderer,
    document::{
        Anchor, Canvas, CardDocument, Field, Font, TextStyle, format_count, format_iso_date,
        format_short_date, truncate, wrap
    },
    theme::Palette,
    view::CardView
};
use crate::{
    config::{ColorTheme, Layout},
    models::PullRequestState
};

const WIDTH: u32 = 480;
const PADDING: u32 = 24;
const AVATAR_RADIUS: u32 = 36;
const TILE_GAP: u32 = 12;
const TILE_HEIGHT: u32 = 56;
const ROW: u32 = 24;

/// Rounded card in the GitHub profile style.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

impl CardRenderer for Classic {
    fn layout(&self) -> Layout {
        Layout::Classic
    }

    fn draw(&self, view: &CardView<'_>, theme: ColorTheme) -> CardDocument {
        let palette = Palette::for_theme(theme);
        let mut canvas = Canvas::new(Layout::Classic, theme, WIDTH);
        canvas.frame(palette.background, Some(palette.border), 16);

        let mut y = header(&mut canvas, &palette, view);

        if let Some(bio) = view.bio {
            let lines = wrap(bio, 60, 3);
            let style = TextStyle::new(Font::Sans, 13, palette.text);
            canvas.field_lines(Field::Bio, bio, (PADDING, y + 14), 18, &style, &lines);
            y += 18 * lines.len() as u32 + 14;
        }

        if let Some(stats) = view.stats {
            let tile_width = (WIDTH - 2 * PADDING - 2 * TILE_GAP) / 3;
            let tiles = [
                (Field::Followers, "Followers", stats.followers),
                (Field::Following, "Following", stats.following),
                (Field::PublicRepos, "Repositories", stats.public_repos)
            ];
            for (index, (field, label, value)) in tiles.into_iter().enumerate() {
                let x = PADDING + index as u32 * (tile_width + TILE_GAP);
                let center = x + tile_width / 2;
                canvas.rect(
                    (x, y),
                    (tile_width, TILE_HEIGHT),
                    8,
                    palette.surface,
                    Some(palette.border)
                );
                let value_style = TextStyle::new(Font::Sans, 18, palette.text)
                    .bold()
                    .anchor(Anchor::Middle);
                canvas.field(
                    field,
                    &value.to_string(),
                    (center, y + 26),
                    &value_style,
                    &format_count(value)
                );
                let label_style = TextStyle::new(Font::Sans, 11, palette.muted).anchor(Anchor::Middle);
                canvas.text((center, y + 44), &label_style, label);
            }
            y += TILE_HEIGHT + 16;
        }

        if !view.languages.is_empty() {
            y = heading(&mut canvas, &palette, y, "Top Languages");
            let name_style = TextStyle::new(Font::Sans, 13, palette.text);
            let count_style = TextStyle::new(Font::Sans, 12, palette.muted).anchor(Anchor::End);
            for (language, count) in &view.languages {
                canvas.circle((PADDING + 5, y + 10), 5, palette.accent);
                canvas.field(Field::Language, language, (PADDING + 18, y + 14), &name_style, language);
                let noun = if *count == 1 { "repository" } else { "repositories" };
                canvas.field(
                    Field::LanguageCount,
                    &count.to_string(),
                    (WIDTH - PADDING, y + 14),
                    &count_style,
                    &format!("{count} {noun}")
                );
                y += ROW - 2;
            }
            y += 8;
        }

        if !view.repositories.is_empty() {
            y = heading(&mut canvas, &palette, y, "Top Repositories");
            let name_style = TextStyle::new(Font::Sans, 14, palette.accent).bold();
            let star_style = TextStyle::new(Font::Sans, 12, palette.muted).anchor(Anchor::End);
            let description_style = TextStyle::new(Font::Sans, 12, palette.muted);
            for repository in view.repositories {
                canvas.field(
                    Field::Repository,
                    &repository.name,
                    (PADDING, y + 14),
                    &name_style,
                    &truncate(&repository.name, 40)
                );
                canvas.field(
                    Field::RepositoryStars,
                    &repository.stargazers_count.to_string(),
                    (WIDTH - PADDING, y + 14),
                    &star_style,
                    &format!("★ {}", format_count(repository.stargazers_count))
                );
                y += ROW;
                if let Some(description) = repository.description() {
                    canvas.field(
                        Field::RepositoryDescription,
                        description,
                        (PADDING, y + 10),
                        &description_style,
                        &truncate(description, 64)
                    );
                    y += 18;
                }
            }
            y += 8;
        }

        if let Some(list) = &view.pull_requests {
            y = heading(&mut canvas, &palette, y, "Pull Requests");
            let title_style = TextStyle::new(Font::Sans, 13, palette.text);
            let date_style = TextStyle::new(Font::Sans, 11, palette.muted).anchor(Anchor::End);
            for pull_request in list.items {
                let (badge, label) = match pull_request.state {
                    PullRequestState::Open => (palette.positive, "Open"),
                    PullRequestState::Closed => (palette.negative, "Closed")
                };
                canvas.rect((PADDING, y + 2), (56, 18), 9, badge, None);
                let badge_style = TextStyle::new(Font::Sans, 11, "#ffffff")
                    .bold()
                    .anchor(Anchor::Middle);
                canvas.field(
                    Field::PullRequestState,
                    pull_request.state.as_str(),
                    (PADDING + 28, y + 15),
                    &badge_style,
                    label
                );
                canvas.field(
                    Field::PullRequest,
                    &pull_request.title,
                    (PADDING + 66, y + 15),
                    &title_style,
                    &truncate(&pull_request.title, 40)
                );
                canvas.field(
                    Field::PullRequestCreated,
                    &format_iso_date(&pull_request.created_at),
                    (WIDTH - PADDING, y + 15),
                    &date_style,
                    &format_short_date(&pull_request.created_at)
                );
                y += ROW + 2;
            }
            if let Some(more) = list.more_label() {
                let style = TextStyle::new(Font::Sans, 12, palette.muted);
                canvas.field(
                    Field::PullRequestsRemaining,
                    &list.remaining.to_string(),
                    (PADDING, y + 14),
                    &style,
                    &more
                );
                y += ROW;
            }
            y += 8;
        }

        if !view.social_links.is_empty() {
            y = heading(&mut canvas, &palette, y, "Links");
            let label_style = TextStyle::new(Font::Sans, 12, palette.muted).bold();
            let url_style = TextStyle::new(Font::Sans, 13, palette.accent);
            for link in &view.social_links {
                canvas.text((PADDING, y + 14), &label_style, link.label);
                canvas.field(
                    Field::SocialLink,
                    &link.url,
                    (PADDING + 72, y + 14),
                    &url_style,
                    &truncate(strip_scheme(&link.url), 48)
                );
                y += ROW - 2;
            }
            y += 8;
        }

        let label = format!("GitHub card for {}", view.header.login);
        canvas.finish(y + PADDING / 2, &label)
    }
}

fn header(canvas: &mut Canvas, palette: &Palette, view: &CardView<'_>) -> u32 {
    let header = &view.header;
    canvas.avatar(
        header.avatar_url,
        (PADDING + AVATAR_RADIUS, PADDING + AVATAR_RADIUS),
        AVATAR_RADIUS,
        palette.border
    );

    let x = PADDING + 2 * AVATAR_RADIUS + 20;
    let name_style = TextStyle::new(Font::Sans, 20, palette.text).bold();
    canvas.field(
        Field::DisplayName,
        header.display_name,
        (x, PADDING + 24),
        &name_style,
        &truncate(header.display_name, 28)
    );
    let login_style = TextStyle::new(Font::Sans, 14, palette.muted);
    canvas.field(
        Field::Login,
        header.login,
        (x, PADDING + 46),
        &login_style,
        &format!("@{}", header.login)
    );
    let created_style = TextStyle::new(Font::Sans, 12, palette.muted);
    canvas.field(
        Field::Created,
        &header.created,
        (x, PADDING + 66),
        &created_style,
        &format!("Joined {}", header.created)
    );

    PADDING + 2 * AVATAR_RADIUS + 20
}

fn heading(canvas: &mut Canvas, palette: &Palette, y: u32, title: &str) -> u32 {
    let style = TextStyle::new(Font::Sans, 14, palette.text).bold();
    canvas.text((PADDING, y + 14), &style, title);
    canvas.line((PADDING, y + 22), (WIDTH - PADDING, y + 22), palette.border, false);
    y + 30
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}
