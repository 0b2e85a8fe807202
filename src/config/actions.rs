//! Actions that keybindings resolve to.

/// Actions that apply on every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Help,
    Back,
}

/// Movement within lists, tables and grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    First,
    Last,
    Select,
}

/// Search field control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    Toggle,
    Exit,
}

/// Actions on the goods screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoodsAction {
    PrevTheme,
    NextTheme,
    Reload,
    Copy,
}

/// Actions on the theme list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemesAction {
    Reload,
}
