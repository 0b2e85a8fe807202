//! Color palettes for the application.
//!
//! Palettes are built from the catppuccin flavors. Widgets never reach into
//! the raw palette fields for semantics; they go through the accessor
//! methods (`primary`, `error`, `border_focused`, ...) so that swapping the
//! flavor re-skins the whole UI consistently.

use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Convert a catppuccin color to a ratatui color.
const fn catppuccin_to_color(color: catppuccin::Color) -> Color {
    Color::Rgb(color.rgb.r, color.rgb.g, color.rgb.b)
}

/// A color palette derived from a catppuccin flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Color,
    pub mantle: Color,
    pub surface0: Color,
    pub surface1: Color,
    pub surface2: Color,
    pub overlay0: Color,
    pub overlay1: Color,
    pub text: Color,
    pub subtext0: Color,
    pub subtext1: Color,
    pub lavender: Color,
    pub mauve: Color,
    pub peach: Color,
    pub yellow: Color,
    pub green: Color,
    pub red: Color,
    pub blue: Color,
    pub border_type: BorderType,
}

impl Palette {
    fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let colors = &flavor.colors;
        Self {
            base: catppuccin_to_color(colors.base),
            mantle: catppuccin_to_color(colors.mantle),
            surface0: catppuccin_to_color(colors.surface0),
            surface1: catppuccin_to_color(colors.surface1),
            surface2: catppuccin_to_color(colors.surface2),
            overlay0: catppuccin_to_color(colors.overlay0),
            overlay1: catppuccin_to_color(colors.overlay1),
            text: catppuccin_to_color(colors.text),
            subtext0: catppuccin_to_color(colors.subtext0),
            subtext1: catppuccin_to_color(colors.subtext1),
            lavender: catppuccin_to_color(colors.lavender),
            mauve: catppuccin_to_color(colors.mauve),
            peach: catppuccin_to_color(colors.peach),
            yellow: catppuccin_to_color(colors.yellow),
            green: catppuccin_to_color(colors.green),
            red: catppuccin_to_color(colors.red),
            blue: catppuccin_to_color(colors.blue),
            border_type: BorderType::Rounded,
        }
    }

    /// The dark mocha palette.
    #[must_use]
    pub fn mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    /// The medium-dark macchiato palette.
    #[must_use]
    pub fn macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    /// The muted frappe palette.
    #[must_use]
    pub fn frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    /// The light latte palette.
    #[must_use]
    pub fn latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    /// Primary accent color used for focus and branding.
    #[must_use]
    pub const fn primary(&self) -> Color {
        self.lavender
    }

    /// Color for success messages.
    #[must_use]
    pub const fn success(&self) -> Color {
        self.green
    }

    /// Color for error messages.
    #[must_use]
    pub const fn error(&self) -> Color {
        self.red
    }

    /// Default border color.
    #[must_use]
    pub const fn border(&self) -> Color {
        self.surface2
    }

    /// Border color for the focused element.
    #[must_use]
    pub const fn border_focused(&self) -> Color {
        self.lavender
    }

    /// Background color of the selected row or card.
    #[must_use]
    pub const fn selection_bg(&self) -> Color {
        self.surface1
    }

    /// Foreground color of the selected row or card.
    #[must_use]
    pub const fn selection_fg(&self) -> Color {
        self.text
    }

    /// Color for table headers and section titles.
    #[must_use]
    pub const fn header(&self) -> Color {
        self.mauve
    }

    /// Color for highlighted values such as prices.
    #[must_use]
    pub const fn highlight(&self) -> Color {
        self.peach
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::mocha()
    }
}

/// A named palette the config file can refer to.
#[derive(Debug, Clone)]
pub struct PaletteInfo {
    pub name: &'static str,
    pub palette: Palette,
}

/// All palettes the config file can name.
#[must_use]
pub fn available_palettes() -> Vec<PaletteInfo> {
    vec![
        PaletteInfo {
            name: "mocha",
            palette: Palette::mocha(),
        },
        PaletteInfo {
            name: "macchiato",
            palette: Palette::macchiato(),
        },
        PaletteInfo {
            name: "frappe",
            palette: Palette::frappe(),
        },
        PaletteInfo {
            name: "latte",
            palette: Palette::latte(),
        },
    ]
}

/// Look up a palette by name, falling back to mocha for unknown names.
#[must_use]
pub fn palette_from_name(name: &str) -> Palette {
    let name = name.to_lowercase();
    available_palettes()
        .into_iter()
        .find(|info| info.name == name)
        .map(|info| info.palette)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_palette_name_falls_back_to_mocha() {
        assert_eq!(palette_from_name("nonexistent"), Palette::mocha());
    }

    #[test]
    fn palette_names_are_case_insensitive() {
        assert_eq!(palette_from_name("LATTE"), Palette::latte());
    }

    #[test]
    fn every_listed_palette_resolves_to_itself() {
        for info in available_palettes() {
            assert_eq!(palette_from_name(info.name), info.palette);
        }
    }
}
