// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Colour palettes resolved from the configured [`ColorTheme`].

use crate::config::ColorTheme;

/// Colours a layout draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct Palette
{
    pub background: &'static str,
    pub surface:    &'static str,
    pub border:     &'static str,
    pub text:       &'static str,
    pub muted:      &'static str,
    pub accent:     &'static str,
    pub positive:   &'static str,
    pub negative:   &'static str,
}

impl Palette
{
    /// Palette used by the classic and receipt layouts.
    pub fn for_theme(theme: ColorTheme,) -> Self
    {
        match theme {
            ColorTheme::Default => Self {
                background: "#ffffff",
                surface:    "#f6f8fa",
                border:     "#d0d7de",
                text:       "#1f2328",
                muted:      "#656d76",
                accent:     "#0969da",
                positive:   "#1a7f37",
                negative:   "#8250df",
            },
            ColorTheme::Dark => Self {
                background: "#0d1117",
                surface:    "#161b22",
                border:     "#30363d",
                text:       "#e6edf3",
                muted:      "#8b949e",
                accent:     "#58a6ff",
                positive:   "#3fb950",
                negative:   "#a371f7",
            },
        }
    }

    /// Terminal window palette. The light theme keeps a dark screen with a
    /// light window frame.
    pub fn terminal(theme: ColorTheme,) -> Self
    {
        match theme {
            ColorTheme::Default => Self {
                background: "#e5e7eb",
                surface:    "#1e1e1e",
                border:     "#9ca3af",
                text:       "#d4d4d4",
                muted:      "#7f848e",
                accent:     "#4ec9b0",
                positive:   "#6a9955",
                negative:   "#c586c0",
            },
            ColorTheme::Dark => Self {
                background: "#010409",
                surface:    "#000000",
                border:     "#30363d",
                text:       "#c9d1d9",
                muted:      "#6e7681",
                accent:     "#39d353",
                positive:   "#39d353",
                negative:   "#d2a8ff",
            },
        }
    }
}
