use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState, WhichUse};

use crate::Palette;

/// A centered loading spinner with a label.
pub struct Spinner {
    state: ThrobberState,
    label: String,
}

impl Spinner {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: ThrobberState::default(),
            label: label.into(),
        }
    }

    /// Advance the animation by one frame.
    pub fn tick(&mut self) {
        self.state.calc_next();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let throbber = Throbber::default()
            .label(self.label.clone())
            .style(Style::default().fg(palette.text))
            .throbber_style(Style::default().fg(palette.primary()))
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);

        let width = self.label.chars().count() as u16 + 2;
        let centered = area.centered(Constraint::Length(width), Constraint::Length(1));
        frame.render_stateful_widget(throbber, centered, &mut self.state);
    }
}
