//! Screen abstraction.
//!
//! A [`Screen`] is a full-page view. The app routes terminal events to the
//! active screen, then drains its messages through [`Screen::update`],
//! which returns an [`Update`] telling the app what to do next: nothing,
//! run background commands, or navigate to another screen.

use color_eyre::Result;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Palette;
use crate::api::model::ThemeData;
use crate::commands::Command;
use crate::tui::Event;
use crate::ui::help::Keybinding;

/// What a screen wants the app to do after an update.
pub enum Update {
    /// Nothing to do.
    Idle,
    /// Run these commands in the background.
    Run(Vec<Box<dyn Command>>),
    /// Switch to another screen.
    Navigate(Nav),
}

/// Navigation requests emitted by screens.
pub enum Nav {
    /// Open the goods grid for the theme at `index` within `themes`.
    OpenTheme {
        themes: Vec<ThemeData>,
        index: usize,
    },
    /// Return to the theme list, preselecting `preselect` if given.
    BackToThemes { preselect: Option<String> },
}

impl<T: Command + 'static> From<T> for Update {
    fn from(command: T) -> Self {
        Self::Run(vec![Box::new(command)])
    }
}

pub trait Screen {
    /// Called once when the screen becomes active.
    fn init(&mut self) {}

    /// Advance animations.
    fn handle_tick(&mut self) {}

    /// Handle a terminal event. Returns true if the event was consumed.
    fn handle_event(&mut self, event: &Event) -> bool;

    /// Drain queued messages and produce the next update.
    ///
    /// This is the single funnel for screen state changes. Everything that
    /// mutates the screen (key presses, completed fetches, navigation)
    /// arrives here as a message.
    fn update(&mut self) -> Result<Update>;

    fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette);

    /// Breadcrumb trail shown in the status bar.
    fn breadcrumbs(&self) -> Vec<String>;

    /// Screen-specific keybindings for the status bar and help overlay.
    fn keybindings(&self) -> Vec<Keybinding> {
        Vec::new()
    }
}
