// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! SVG document builder shared by every layout.
//!
//! Layouts draw through a [`Canvas`]. Text that carries profile data is
//! emitted with [`Canvas::field`], which tags the element with a
//! `data-field` attribute and records a [`DataPoint`], so callers can inspect
//! what a rendered card shows without parsing its geometry.

use std::{
    borrow::Cow,
    fmt::{self, Write as _}
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{ColorTheme, Layout};

/// Kind of profile data a text element displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Account login.
    Login,
    /// Profile name, or the login when the profile has none.
    DisplayName,
    /// Avatar image URL.
    Avatar,
    /// Account creation date.
    Created,
    /// Trimmed profile bio.
    Bio,
    /// Follower count.
    Followers,
    /// Count of accounts the user follows.
    Following,
    /// Public repository count from the profile.
    PublicRepos,
    /// Language name from the tally.
    Language,
    /// Number of repositories written mainly in a tallied language.
    LanguageCount,
    /// Repository name.
    Repository,
    /// Repository star count.
    RepositoryStars,
    /// Non-blank repository description.
    RepositoryDescription,
    /// Pull request title.
    PullRequest,
    /// Pull request state, `open` or `closed`.
    PullRequestState,
    /// Pull request creation date as `YYYY-MM-DD`.
    PullRequestCreated,
    /// Number of pull requests left out by the count cap.
    PullRequestsRemaining,
    /// Absolute URL of a profile, website or X link.
    SocialLink,
    /// Empty-state text.
    Placeholder
}

impl Field {
    /// Identifier written to the `data-field` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Login => "login",
            Field::DisplayName => "display_name",
            Field::Avatar => "avatar",
            Field::Created => "created",
            Field::Bio => "bio",
            Field::Followers => "followers",
            Field::Following => "following",
            Field::PublicRepos => "public_repos",
            Field::Language => "language",
            Field::LanguageCount => "language_count",
            Field::Repository => "repository",
            Field::RepositoryStars => "repository_stars",
            Field::RepositoryDescription => "repository_description",
            Field::PullRequest => "pull_request",
            Field::PullRequestState => "pull_request_state",
            Field::PullRequestCreated => "pull_request_created",
            Field::PullRequestsRemaining => "pull_requests_remaining",
            Field::SocialLink => "social_link",
            Field::Placeholder => "placeholder"
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of data visible on a rendered card, independent of how the
/// layout arranges or decorates it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DataPoint {
    pub field: Field,
    /// Canonical value, independent of truncation or formatting.
    pub value: String
}

/// A rendered card: a self-contained SVG plus the data points it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDocument {
    layout:      Layout,
    theme:       ColorTheme,
    width:       u32,
    height:      u32,
    svg:         String,
    data_points: Vec<DataPoint>
}

impl CardDocument {
    /// Layout that produced the document.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Palette the document was drawn with.
    pub fn theme(&self) -> ColorTheme {
        self.theme
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Complete SVG markup.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Data points in drawing order.
    pub fn data_points(&self) -> &[DataPoint] {
        &self.data_points
    }

    /// Returns `true` when at least one data point of `field` is visible.
    pub fn has_field(&self, field: Field) -> bool {
        self.data_points.iter().any(|point| point.field == field)
    }

    /// Values of every data point of `field`, in drawing order.
    pub fn values(&self, field: Field) -> Vec<&str> {
        self.data_points
            .iter()
            .filter(|point| point.field == field)
            .map(|point| point.value.as_str())
            .collect()
    }

    /// Returns `true` for the empty-state document rendered before any
    /// profile is available.
    pub fn is_placeholder(&self) -> bool {
        self.has_field(Field::Placeholder)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Sans,
    Mono
}

impl Font {
    fn family(self) -> &'static str {
        match self {
            Font::Sans => "'Segoe UI', 'SF Pro Display', Helvetica, Arial, sans-serif",
            Font::Mono => "'SFMono-Regular', Menlo, Consolas, 'Liberation Mono', monospace"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end"
        }
    }
}

/// Text appearance used by [`Canvas::text`] and [`Canvas::field`].
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub font:   Font,
    pub size:   u32,
    pub fill:   &'static str,
    pub bold:   bool,
    pub anchor: Anchor
}

impl TextStyle {
    pub fn new(font: Font, size: u32, fill: &'static str) -> Self {
        Self {
            font,
            size,
            fill,
            bold: false,
            anchor: Anchor::Start
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn fill(mut self, fill: &'static str) -> Self {
        self.fill = fill;
        self
    }
}

/// Piece of a single text line drawn by [`Canvas::spans`].
#[derive(Debug, Clone, Copy)]
pub enum Span<'s> {
    /// Decoration such as leader dots.
    Plain(&'s str),
    /// Text showing `content` for the data point `value`.
    Field {
        field:   Field,
        value:   &'s str,
        content: &'s str
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    fill:   &'static str,
    stroke: Option<&'static str>,
    radius: u32
}

/// Drawing surface that accumulates SVG elements and data points.
#[derive(Debug)]
pub struct Canvas {
    layout:      Layout,
    theme:       ColorTheme,
    width:       u32,
    frame:       Option<Frame>,
    defs:        String,
    body:        String,
    data_points: Vec<DataPoint>,
    clip_ids:    usize
}

impl Canvas {
    pub fn new(layout: Layout, theme: ColorTheme, width: u32) -> Self {
        Self {
            layout,
            theme,
            width,
            frame: None,
            defs: String::new(),
            body: String::with_capacity(4096),
            data_points: Vec::new(),
            clip_ids: 0
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Sets the card background, drawn behind every element and sized to
    /// the height passed to [`Canvas::finish`].
    pub fn frame(&mut self, fill: &'static str, stroke: Option<&'static str>, radius: u32) {
        self.frame = Some(Frame {
            fill,
            stroke,
            radius
        });
    }

    pub fn rect(
        &mut self,
        (x, y): (u32, u32),
        (width, height): (u32, u32),
        radius: u32,
        fill: &str,
        stroke: Option<&str>
    ) {
        let _ = write!(
            self.body,
            "  <rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" rx=\"{radius}\" fill=\"{fill}\""
        );
        if let Some(stroke) = stroke {
            let _ = write!(self.body, " stroke=\"{stroke}\" stroke-width=\"1\"");
        }
        self.body.push_str("/>\n");
    }

    pub fn circle(&mut self, (cx, cy): (u32, u32), radius: u32, fill: &str) {
        let _ = writeln!(
            self.body,
            "  <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{radius}\" fill=\"{fill}\"/>"
        );
    }

    pub fn line(&mut self, (x1, y1): (u32, u32), (x2, y2): (u32, u32), stroke: &str, dashed: bool) {
        let dash = if dashed {
            " stroke-dasharray=\"6 4\""
        } else {
            ""
        };
        let _ = writeln!(
            self.body,
            "  <line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{stroke}\" stroke-width=\"1\"{dash}/>"
        );
    }

    /// Draws decorative text that carries no profile data.
    pub fn text(&mut self, (x, y): (u32, u32), style: &TextStyle, content: &str) {
        self.write_text(None, (x, y), style, content);
    }

    /// Draws text displaying `value` and records it as a data point.
    ///
    /// `content` is what the layout shows; `value` is the canonical data it
    /// stands for.
    pub fn field(
        &mut self,
        field: Field,
        value: &str,
        (x, y): (u32, u32),
        style: &TextStyle,
        content: &str
    ) {
        self.record(field, value);
        self.write_text(Some(field), (x, y), style, content);
    }

    /// Draws several lines for one data point, such as a wrapped bio.
    pub fn field_lines(
        &mut self,
        field: Field,
        value: &str,
        (x, y): (u32, u32),
        line_height: u32,
        style: &TextStyle,
        lines: &[String]
    ) {
        self.record(field, value);
        let _ = write!(
            self.body,
            "  <text data-field=\"{field}\" x=\"{x}\" y=\"{y}\"{}>",
            text_attributes(style)
        );
        for (index, line) in lines.iter().enumerate() {
            let dy = if index == 0 { 0 } else { line_height };
            let _ = write!(
                self.body,
                "<tspan x=\"{x}\" dy=\"{dy}\">{}</tspan>",
                escape_xml(line)
            );
        }
        self.body.push_str("</text>\n");
    }

    /// Draws one line mixing decoration and data, recording every
    /// [`Span::Field`] as its own data point.
    pub fn spans(&mut self, (x, y): (u32, u32), style: &TextStyle, spans: &[Span<'_>]) {
        let _ = write!(self.body, "  <text x=\"{x}\" y=\"{y}\"{}>", text_attributes(style));
        for span in spans {
            match *span {
                Span::Plain(content) => self.body.push_str(&escape_xml(content)),
                Span::Field {
                    field,
                    value,
                    content
                } => {
                    self.record(field, value);
                    let _ = write!(
                        self.body,
                        "<tspan data-field=\"{field}\">{}</tspan>",
                        escape_xml(content)
                    );
                }
            }
        }
        self.body.push_str("</text>\n");
    }

    /// Draws the avatar clipped to a circle and records it.
    pub fn avatar(&mut self, url: &str, (cx, cy): (u32, u32), radius: u32, ring: &str) {
        self.clip_ids += 1;
        let id = format!("avatar-clip-{}", self.clip_ids);
        let _ = writeln!(
            self.defs,
            "    <clipPath id=\"{id}\"><circle cx=\"{cx}\" cy=\"{cy}\" r=\"{radius}\"/></clipPath>"
        );

        self.record(Field::Avatar, url);
        let size = radius * 2;
        let _ = writeln!(
            self.body,
            "  <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{}\" fill=\"{ring}\"/>",
            radius + 2
        );
        let _ = writeln!(
            self.body,
            "  <image data-field=\"avatar\" href=\"{}\" x=\"{}\" y=\"{}\" width=\"{size}\" height=\"{size}\" clip-path=\"url(#{id})\" preserveAspectRatio=\"xMidYMid slice\"/>",
            escape_xml(url),
            cx.saturating_sub(radius),
            cy.saturating_sub(radius)
        );
    }

    fn record(&mut self, field: Field, value: &str) {
        self.data_points.push(DataPoint {
            field,
            value: value.to_owned()
        });
    }

    fn write_text(&mut self, field: Option<Field>, (x, y): (u32, u32), style: &TextStyle, content: &str) {
        self.body.push_str("  <text");
        if let Some(field) = field {
            let _ = write!(self.body, " data-field=\"{field}\"");
        }
        let _ = writeln!(
            self.body,
            " x=\"{x}\" y=\"{y}\"{}>{}</text>",
            text_attributes(style),
            escape_xml(content)
        );
    }

    /// Wraps the accumulated elements into a complete SVG document.
    pub fn finish(self, height: u32, label: &str) -> CardDocument {
        let mut svg = String::with_capacity(self.body.len() + self.defs.len() + 256);
        let _ = writeln!(
            svg,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" aria-label=\"{}\" data-layout=\"{}\" width=\"{}\" height=\"{height}\" viewBox=\"0 0 {} {height}\">",
            escape_xml(label),
            self.layout,
            self.width,
            self.width
        );
        if !self.defs.is_empty() {
            svg.push_str("  <defs>\n");
            svg.push_str(&self.defs);
            svg.push_str("  </defs>\n");
        }
        if let Some(frame) = self.frame {
            let _ = write!(
                svg,
                "  <rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{}\"",
                self.width.saturating_sub(1),
                height.saturating_sub(1),
                frame.radius,
                frame.fill
            );
            if let Some(stroke) = frame.stroke {
                let _ = write!(svg, " stroke=\"{stroke}\" stroke-width=\"1\"");
            }
            svg.push_str("/>\n");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");

        CardDocument {
            layout: self.layout,
            theme: self.theme,
            width: self.width,
            height,
            svg,
            data_points: self.data_points
        }
    }
}

fn text_attributes(style: &TextStyle) -> String {
    let weight = if style.bold { " font-weight=\"700\"" } else { "" };
    format!(
        " font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{}\"{weight}",
        style.font.family(),
        style.size,
        style.fill,
        style.anchor.as_str()
    )
}

/// Escapes the five XML special characters, borrowing when none occur.
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len());
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

/// Shortens `value` to at most `max_chars` characters, ending with an
/// ellipsis when cut.
pub fn truncate(value: &str, max_chars: usize) -> Cow<'_, str> {
    if value.chars().count() <= max_chars {
        return Cow::Borrowed(value);
    }
    let mut shortened: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    shortened.push('…');
    Cow::Owned(shortened)
}

/// Greedy word wrap into at most `max_lines` lines of `width` characters.
/// Overflowing text is truncated on the last line.
pub fn wrap(value: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in value.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        let rest = lines.split_off(max_lines - 1).join(" ");
        lines.push(truncate(&rest, width).into_owned());
    }
    for line in &mut lines {
        if line.chars().count() > width {
            *line = truncate(line, width).into_owned();
        }
    }
    lines
}

/// Formats a timestamp as `Month DD, YYYY`.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %d, %Y").to_string()
}

/// Formats a timestamp as `Mon DD, YYYY`.
pub fn format_short_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %d, %Y").to_string()
}

/// Formats a timestamp as `YYYY-MM-DD`, the canonical value of date data
/// points.
pub fn format_iso_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Formats a count with thousands separators.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}
