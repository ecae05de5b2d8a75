// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Empty-state card shown until a profile has been fetched.
//!
//! Identical for every layout and toggle combination; only the palette
//! follows the configured theme.

use super::{
    document::{Anchor, Canvas, CardDocument, Field, Font, TextStyle},
    theme::Palette,
};
use crate::config::{ColorTheme, Layout};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 220;

pub const TITLE: &str = "Github Cards";
pub const LINES: [&str; 2] = ["View your contributions in Github", "Easily share to your social media"];

pub(super) fn draw(layout: Layout, theme: ColorTheme,) -> CardDocument
{
    let palette = Palette::for_theme(theme,);
    let mut canvas = Canvas::new(layout, theme, WIDTH,);
    canvas.frame(palette.background, Some(palette.border,), 16,);

    let center = WIDTH / 2;
    canvas.circle((center, 58,), 26, palette.surface,);
    canvas.circle((center, 52,), 9, palette.border,);
    canvas.rect((center - 15, 64,), (30, 12,), 6, palette.border, None,);

    let title = TextStyle::new(Font::Sans, 24, palette.text,).bold().anchor(Anchor::Middle,);
    canvas.field(Field::Placeholder, TITLE, (center, 122,), &title, TITLE,);

    let body = TextStyle::new(Font::Sans, 14, palette.muted,).anchor(Anchor::Middle,);
    for (index, line,) in LINES.into_iter().enumerate() {
        canvas.field(Field::Placeholder, line, (center, 156 + index as u32 * 24,), &body, line,);
    }

    canvas.finish(HEIGHT, TITLE,)
}

#[cfg(test)]
mod tests
{
    use super::{LINES, TITLE, draw};
    use crate::{
        config::{ColorTheme, Layout},
        render::Field,
    };

    #[test]
    fn placeholder_shows_invitation_text()
    {
        let document = draw(Layout::Classic, ColorTheme::Default,);
        assert_eq!(document.values(Field::Placeholder,), [TITLE, LINES[0], LINES[1]]);
        assert!(document.svg().contains(">Easily share to your social media</text>",));
    }

    #[test]
    fn placeholder_markup_is_shared_across_layouts()
    {
        let classic = draw(Layout::Classic, ColorTheme::Dark,);
        let terminal = draw(Layout::Terminal, ColorTheme::Dark,);
        assert_eq!(classic.data_points(), terminal.data_points());
        assert_eq!(
            classic.svg().replace("data-layout=\"classic\"", ""),
            terminal.svg().replace("data-layout=\"terminal\"", "")
        );
    }
}
