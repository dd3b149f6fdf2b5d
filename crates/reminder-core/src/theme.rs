//! Theme system for Today's Reminders
//!
//! Three palettes: the sage-green look of the reminder card screen and the
//! Everforest dark/light pair. Variants cycle at runtime with `t`.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Theme variants
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ThemeVariant {
    /// Sage background with white reminder cards (default)
    #[default]
    Sage,
    EverforestDark,
    EverforestLight,
}

impl ThemeVariant {
    /// The variant after this one, wrapping around.
    pub fn next(self) -> Self {
        let variants: Vec<Self> = Self::iter().collect();
        let index = variants.iter().position(|v| *v == self).unwrap_or(0);
        variants[(index + 1) % variants.len()]
    }
}

/// Color palette for a theme variant
#[derive(Debug, Clone)]
pub struct ColorPalette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
    /// Reminder card fill
    pub card: Color,
    /// Text drawn on cards
    pub card_text: Color,
    pub warning: Color,
}

/// UI element types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Text,
    Title,
    Border,
    Highlight,
    Accent,
    Background,
    Inactive,
    /// A reminder card and its label
    Card,
    /// Time line under a reminder label
    CardTime,
    /// Notification banner
    Toast,
    Warning,
}

/// Main theme structure managing all UI styling
#[derive(Debug, Clone)]
pub struct Theme {
    variant: ThemeVariant,
    colors: ColorPalette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        let colors = match variant {
            ThemeVariant::Sage => ColorPalette {
                background: Color::Rgb(163, 177, 138), // #a3b18a
                foreground: Color::Rgb(255, 255, 255), // #ffffff
                accent: Color::Rgb(88, 129, 87),       // #588157
                border: Color::Rgb(88, 129, 87),       // #588157
                selection: Color::Rgb(218, 215, 205),  // #dad7cd
                card: Color::Rgb(255, 255, 255),       // #ffffff
                card_text: Color::Rgb(88, 129, 87),    // #588157
                warning: Color::Rgb(52, 78, 65),       // #344e41
            },
            ThemeVariant::EverforestDark => ColorPalette {
                background: Color::Rgb(45, 53, 59),    // #2d353b
                foreground: Color::Rgb(211, 198, 170), // #d3c6aa
                accent: Color::Rgb(167, 192, 128),     // #a7c080
                border: Color::Rgb(116, 125, 135),     // #747d87
                selection: Color::Rgb(64, 72, 78),     // #40484e
                card: Color::Rgb(52, 63, 68),          // #343f44
                card_text: Color::Rgb(167, 192, 128),  // #a7c080
                warning: Color::Rgb(219, 188, 127),    // #dbbc7f
            },
            ThemeVariant::EverforestLight => ColorPalette {
                background: Color::Rgb(253, 246, 227), // #fdf6e3
                foreground: Color::Rgb(92, 106, 114),  // #5c6a72
                accent: Color::Rgb(141, 161, 1),       // #8da101
                border: Color::Rgb(150, 160, 170),     // #96a0aa
                selection: Color::Rgb(243, 236, 217),  // #f3ecd9
                card: Color::Rgb(255, 251, 239),       // #fffbef
                card_text: Color::Rgb(141, 161, 1),    // #8da101
                warning: Color::Rgb(207, 131, 44),     // #cf832c
            },
        };

        Self { variant, colors }
    }

    pub fn variant(&self) -> ThemeVariant {
        self.variant
    }

    pub fn colors(&self) -> &ColorPalette {
        &self.colors
    }

    /// Switch to the next variant
    pub fn toggle(&mut self) {
        *self = Self::new(self.variant.next());
    }

    /// Get a ratatui Style for the specified UI element
    pub fn ratatui_style(&self, element: Element) -> Style {
        let c = &self.colors;
        match element {
            Element::Text | Element::Background => {
                Style::default().fg(c.foreground).bg(c.background)
            }
            Element::Title => Style::default()
                .fg(c.foreground)
                .bg(c.background)
                .add_modifier(Modifier::BOLD),
            Element::Border => Style::default().fg(c.border).bg(c.background),
            Element::Highlight => Style::default()
                .fg(c.accent)
                .bg(c.selection)
                .add_modifier(Modifier::BOLD),
            Element::Accent => Style::default()
                .fg(c.accent)
                .bg(c.background)
                .add_modifier(Modifier::BOLD),
            Element::Inactive => Style::default()
                .fg(c.border)
                .bg(c.background)
                .add_modifier(Modifier::DIM),
            Element::Card | Element::CardTime => Style::default().fg(c.card_text).bg(c.card),
            Element::Toast => Style::default()
                .fg(c.card)
                .bg(c.accent)
                .add_modifier(Modifier::BOLD),
            Element::Warning => Style::default().fg(c.warning).bg(c.background),
        }
    }

    /// Style for an element at partial opacity, blending both its colors
    /// toward the screen background. `opacity` is clamped to `0.0..=1.0`.
    pub fn faded(&self, element: Element, opacity: f32) -> Style {
        let base = self.ratatui_style(element);
        let target = self.colors.background;
        let opacity = opacity.clamp(0.0, 1.0);
        Style {
            fg: base.fg.map(|fg| blend(fg, target, opacity)),
            bg: base.bg.map(|bg| blend(bg, target, opacity)),
            ..base
        }
    }

    pub fn text_style(&self) -> Style {
        self.ratatui_style(Element::Text)
    }

    pub fn title_style(&self) -> Style {
        self.ratatui_style(Element::Title)
    }

    pub fn border_style(&self) -> Style {
        self.ratatui_style(Element::Border)
    }

    pub fn highlight_style(&self) -> Style {
        self.ratatui_style(Element::Highlight)
    }

    pub fn accent_style(&self) -> Style {
        self.ratatui_style(Element::Accent)
    }
}

/// Mix `from` toward `to`; `weight` 1.0 keeps `from`, 0.0 yields `to`.
/// Non-RGB colors have no channels to mix and switch at the halfway mark.
fn blend(from: Color, to: Color, weight: f32) -> Color {
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (f32::from(a) * weight + f32::from(b) * (1.0 - weight)).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if weight >= 0.5 => from,
        _ => to,
    }
}
