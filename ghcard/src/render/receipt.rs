// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Receipt layout: monospaced shop receipt with dotted leader lines.

use super::{
    CardRenderer,
    document::{
        Anchor, Canvas, CardDocument, Field, Font, Span, TextStyle, format_count, format_iso_date,
        format_short_date, truncate, wrap,
    },
    theme::Palette,
    view::CardView,
};
use crate::config::{ColorTheme, Layout};

const WIDTH: u32 = 360;
const MARGIN: u32 = 20;
const LINE: u32 = 18;
/// Characters that fit on one receipt line at the receipt font size.
const COLUMNS: usize = 44;

#[derive(Debug, Clone, Copy, Default,)]
pub struct Receipt;

impl CardRenderer for Receipt
{
    fn layout(&self,) -> Layout
    {
        Layout::Receipt
    }

    fn draw(&self, view: &CardView<'_,>, theme: ColorTheme,) -> CardDocument
    {
        let palette = Palette::for_theme(theme,);
        let mut canvas = Canvas::new(Layout::Receipt, theme, WIDTH,);
        canvas.frame(palette.background, Some(palette.border,), 2,);

        let center = WIDTH / 2;
        let plain = TextStyle::new(Font::Mono, 12, palette.text,);
        let centered = plain.anchor(Anchor::Middle,);
        let mut y = MARGIN + 16;

        canvas.text((center, y,), &centered.bold().fill(palette.text,), "GITHUB RECEIPT",);
        y += LINE;
        canvas.text((center, y,), &centered.fill(palette.muted,), "github.com",);
        y += LINE / 2;

        canvas.avatar(view.header.avatar_url, (center, y + 30,), 26, palette.border,);
        y += 60 + LINE;

        let header = &view.header;
        canvas.field(
            Field::DisplayName,
            header.display_name,
            (center, y,),
            &centered.bold(),
            &truncate(header.display_name, COLUMNS,).to_uppercase(),
        );
        y += LINE;
        canvas.field(
            Field::Login,
            header.login,
            (center, y,),
            &centered.fill(palette.muted,),
            &format!("@{}", header.login),
        );
        y += LINE;
        canvas.field(
            Field::Created,
            &header.created,
            (MARGIN, y,),
            &plain,
            &leader("MEMBER SINCE", &header.created.to_uppercase(),),
        );
        y = separator(&mut canvas, &palette, y,);

        if let Some(bio) = view.bio {
            let lines = wrap(bio, COLUMNS, 4,);
            canvas.field_lines(Field::Bio, bio, (MARGIN, y,), LINE - 2, &plain.fill(palette.muted,), &lines,);
            y += (LINE - 2) * lines.len().saturating_sub(1,) as u32;
            y = separator(&mut canvas, &palette, y,);
        }

        if let Some(stats) = view.stats {
            for (field, label, value,) in [
                (Field::Followers, "FOLLOWERS", stats.followers,),
                (Field::Following, "FOLLOWING", stats.following,),
                (Field::PublicRepos, "PUBLIC REPOS", stats.public_repos,),
            ] {
                canvas.field(field, &value.to_string(), (MARGIN, y,), &plain, &leader(label, &format_count(value,),),);
                y += LINE;
            }
            y = separator(&mut canvas, &palette, y - LINE,);
        }

        if !view.languages.is_empty() {
            y = section(&mut canvas, &plain, y, "LANGUAGES",);
            for (language, count,) in &view.languages {
                let name = truncate(language, 28,).to_uppercase();
                let times = format!("x{count}");
                let dots = dots(&name, &times,);
                canvas.spans((MARGIN, y,), &plain, &[
                    Span::Field {
                        field:   Field::Language,
                        value:   language,
                        content: &name,
                    },
                    Span::Plain(&dots,),
                    Span::Field {
                        field:   Field::LanguageCount,
                        value:   &count.to_string(),
                        content: &times,
                    },
                ],);
                y += LINE;
            }
            y = separator(&mut canvas, &palette, y - LINE,);
        }

        if !view.repositories.is_empty() {
            y = section(&mut canvas, &plain, y, "TOP REPOSITORIES",);
            for repository in view.repositories {
                let stars = format!("*{}", format_count(repository.stargazers_count,));
                let name = truncate(&repository.name, COLUMNS - stars.len() - 4,);
                let dots = dots(&name, &stars,);
                canvas.spans((MARGIN, y,), &plain, &[
                    Span::Field {
                        field:   Field::Repository,
                        value:   &repository.name,
                        content: &name,
                    },
                    Span::Plain(&dots,),
                    Span::Field {
                        field:   Field::RepositoryStars,
                        value:   &repository.stargazers_count.to_string(),
                        content: &stars,
                    },
                ],);
                y += LINE;
                if let Some(description) = repository.description() {
                    canvas.field(
                        Field::RepositoryDescription,
                        description,
                        (MARGIN, y,),
                        &plain.fill(palette.muted,),
                        &format!("  {}", truncate(description, COLUMNS - 2,)),
                    );
                    y += LINE;
                }
            }
            y = separator(&mut canvas, &palette, y - LINE,);
        }

        if let Some(list,) = &view.pull_requests {
            y = section(&mut canvas, &plain, y, "PULL REQUESTS",);
            for pull_request in list.items {
                let state = pull_request.state.as_str().to_uppercase();
                let title = truncate(&pull_request.title, COLUMNS - state.len() - 4,);
                let dots = dots(&title, &state,);
                canvas.spans((MARGIN, y,), &plain, &[
                    Span::Field {
                        field:   Field::PullRequest,
                        value:   &pull_request.title,
                        content: &title,
                    },
                    Span::Plain(&dots,),
                    Span::Field {
                        field:   Field::PullRequestState,
                        value:   pull_request.state.as_str(),
                        content: &state,
                    },
                ],);
                y += LINE;
                canvas.field(
                    Field::PullRequestCreated,
                    &format_iso_date(&pull_request.created_at,),
                    (MARGIN, y,),
                    &plain.fill(palette.muted,),
                    &format!("  CREATED {}", format_short_date(&pull_request.created_at,).to_uppercase()),
                );
                y += LINE;
            }
            if let Some(more,) = list.more_label() {
                canvas.field(
                    Field::PullRequestsRemaining,
                    &list.remaining.to_string(),
                    (MARGIN, y,),
                    &plain.fill(palette.muted,),
                    &more,
                );
                y += LINE;
            }
            y = separator(&mut canvas, &palette, y - LINE,);
        }

        if !view.social_links.is_empty() {
            y = section(&mut canvas, &plain, y, "LINKS",);
            for link in &view.social_links {
                canvas.field(
                    Field::SocialLink,
                    &link.url,
                    (MARGIN, y,),
                    &plain.fill(palette.accent,),
                    &truncate(&link.url, COLUMNS,),
                );
                y += LINE;
            }
            y = separator(&mut canvas, &palette, y - LINE,);
        }

        canvas.text((center, y,), &centered.bold(), "THANK YOU FOR CODING",);
        y += LINE / 2;
        y = barcode(&mut canvas, palette.text, header.login, y,);

        let label = format!("GitHub receipt for {}", header.login);
        canvas.finish(y + MARGIN, &label,)
    }
}

/// Pads `label` and `value` apart with dots to the full receipt width.
fn leader(label: &str, value: &str,) -> String
{
    format!("{label}{}{value}", dots(label, value,))
}

/// Dotted filler placed between `label` and `value`, spaces included.
fn dots(label: &str, value: &str,) -> String
{
    let used = label.chars().count() + value.chars().count() + 2;
    let count = COLUMNS.saturating_sub(used,).max(3,);
    format!(" {} ", ".".repeat(count))
}

fn separator(canvas: &mut Canvas, palette: &Palette, y: u32,) -> u32
{
    canvas.line((MARGIN, y + 10,), (WIDTH - MARGIN, y + 10,), palette.muted, true,);
    y + 10 + LINE + 4
}

fn section(canvas: &mut Canvas, style: &TextStyle, y: u32, title: &str,) -> u32
{
    canvas.text((MARGIN, y,), &style.bold(), title,);
    y + LINE + 2
}

/// Decorative barcode whose bar widths follow the bytes of `seed`.
fn barcode(canvas: &mut Canvas, fill: &str, seed: &str, y: u32,) -> u32
{
    let bars: Vec<u32,> = seed.bytes().cycle().take(32,).map(|byte| u32::from(byte % 3,) + 1,).collect();
    let total: u32 = bars.iter().map(|width| width * 2,).sum();
    let mut x = (WIDTH.saturating_sub(total,)) / 2;
    for width in bars {
        canvas.rect((x, y,), (width, 36,), 0, fill, None,);
        x += width * 2;
    }
    y + 36
}

#[cfg(test)]
mod tests
{
    use super::{COLUMNS, Receipt, leader};
    use crate::{
        config::CardConfig,
        render::{CardRenderer, Field, testing::Fixture},
    };

    #[test]
    fn leader_fills_the_line()
    {
        let line = leader("FOLLOWERS", "21,000",);
        assert_eq!(line.chars().count(), COLUMNS);
        assert!(line.starts_with("FOLLOWERS ...",));
        assert!(line.ends_with("... 21,000",));
    }

    #[test]
    fn leader_keeps_dots_for_long_labels()
    {
        let line = leader(&"X".repeat(COLUMNS,), "1",);
        assert!(line.contains(" ... ",));
    }

    #[test]
    fn receipt_has_header_separators_and_footer()
    {
        let fixture = Fixture::new(CardConfig {
            show_pull_requests: true,
            ..CardConfig::default()
        },);
        let svg = Receipt.render(&fixture.input(),).svg().to_owned();

        assert!(svg.contains(">GITHUB RECEIPT</text>",));
        assert!(svg.contains("stroke-dasharray",));
        assert!(svg.contains("MEMBER SINCE",));
        assert!(svg.contains("JANUARY 25, 2011",));
        assert!(svg.contains(">THANK YOU FOR CODING</text>",));
        assert!(svg.contains("<tspan data-field=\"pull_request_state\">OPEN</tspan></text>",));
        assert!(svg.contains("CREATED MAR 02, 2024",));
        assert!(svg.contains("font-family=\"'SFMono-Regular'",));
    }

    #[test]
    fn repository_lines_carry_stars_and_descriptions()
    {
        let fixture = Fixture::new(CardConfig {
            show_top_repositories: true,
            ..CardConfig::default()
        },);
        let document = Receipt.render(&fixture.input(),);
        let svg = document.svg();

        assert!(svg.contains("<tspan data-field=\"repository\">Hello-World</tspan> ...",));
        assert!(svg.contains("<tspan data-field=\"repository_stars\">*2,600</tspan>",));
        assert!(svg.contains(">  Hello-World description</text>",));
        assert_eq!(document.values(Field::RepositoryStars,), ["2600", "1300", "900"]);
    }

    #[test]
    fn barcode_is_stable_for_a_login()
    {
        let fixture = Fixture::new(CardConfig::default(),);
        let first = Receipt.render(&fixture.input(),);
        let second = Receipt.render(&fixture.input(),);
        assert_eq!(first.svg(), second.svg());
    }
}
