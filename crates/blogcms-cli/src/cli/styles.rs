//! Styles for the blogcms CLI.
//!
//! Templates never name colors. They name what a piece of text *is* (a title, a
//! timestamp, a draft) through the `style` filter, and a [`Theme`] maps those
//! semantic names to `console::Style`s. The blog's `theme` setting picks the light
//! or dark palette; both register the same names.
//!
//! A name that is missing from the theme renders with a `(!?)` prefix so template
//! typos show up in tests instead of silently losing their style.
//!
//! Category colors are user data (hex strings), so they go through the separate
//! `hex` filter rather than a named style.

use blogcms::model::Theme as ThemeSetting;
use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const HIGHLIGHT: &str = "highlight";
    pub const TITLE: &str = "title";
    pub const TIME: &str = "time";
    pub const TAG: &str = "tag";
    pub const DRAFT: &str = "draft";
    pub const PUBLISHED: &str = "published";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
}

/// Named styles used by the `style` template filter.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style, replacing any previous one with that name.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Styled text, or the missing indicator plus plain text for unknown names.
    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            Some(style) => style.apply_to(text).force_styling(true).to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }

    /// Same name check as [`Theme::apply`], without ANSI codes.
    pub fn apply_plain(&self, name: &str, text: &str) -> String {
        if self.has(name) {
            text.to_string()
        } else {
            format!("{} {}", MISSING_STYLE_INDICATOR, text)
        }
    }
}

pub static LIGHT_THEME: Lazy<Theme> = Lazy::new(build_light_theme);
pub static DARK_THEME: Lazy<Theme> = Lazy::new(build_dark_theme);

pub fn theme_for(setting: ThemeSetting) -> &'static Theme {
    match setting {
        ThemeSetting::Light => &LIGHT_THEME,
        ThemeSetting::Dark => &DARK_THEME,
    }
}

fn build_light_theme() -> Theme {
    let regular = Style::new().black();
    let muted = Style::new().color256(rgb_to_ansi256((115, 115, 115)));
    let faint = Style::new().color256(rgb_to_ansi256((173, 173, 173)));

    Theme::new()
        .add(names::REGULAR, regular.clone())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, faint)
        .add(
            names::HIGHLIGHT,
            Style::new()
                .black()
                .on_color256(rgb_to_ansi256((255, 235, 59))),
        )
        .add(names::TITLE, regular.bold())
        .add(names::TIME, muted.clone().italic())
        .add(names::TAG, Style::new().color256(rgb_to_ansi256((37, 99, 235))))
        .add(names::DRAFT, Style::new().color256(rgb_to_ansi256((196, 140, 0))))
        .add(names::PUBLISHED, Style::new().color256(rgb_to_ansi256((0, 128, 0))))
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted)
}

fn build_dark_theme() -> Theme {
    let regular = Style::new().white();
    let muted = Style::new().color256(rgb_to_ansi256((180, 180, 180)));
    let faint = Style::new().color256(rgb_to_ansi256((110, 110, 110)));

    Theme::new()
        .add(names::REGULAR, regular.clone())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, faint)
        .add(
            names::HIGHLIGHT,
            Style::new()
                .black()
                .on_color256(rgb_to_ansi256((229, 185, 0))),
        )
        .add(names::TITLE, regular.bold())
        .add(names::TIME, muted.clone().italic())
        .add(names::TAG, Style::new().color256(rgb_to_ansi256((96, 165, 250))))
        .add(names::DRAFT, Style::new().color256(rgb_to_ansi256((255, 214, 10))))
        .add(names::PUBLISHED, Style::new().color256(rgb_to_ansi256((74, 222, 128))))
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted)
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

/// Parses `#rrggbb`.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Text in a category's own color; unparseable colors leave the text plain.
pub fn apply_hex(color: &str, text: &str) -> String {
    match parse_hex(color) {
        Some(rgb) => Style::new()
            .color256(rgb_to_ansi256(rgb))
            .force_styling(true)
            .apply_to(text)
            .to_string(),
        None => text.to_string(),
    }
}
