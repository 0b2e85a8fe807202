//! A scrollable card grid with responsive column counts.
//!
//! The grid mirrors the storefront's product list: two columns on narrow
//! terminals, four on wide ones, cells filled row by row. [`GridState`]
//! tracks selection and vertical scroll and records the viewport geometry
//! on every render so scroll position questions ("is the bottom row on
//! screen?") can be answered between frames.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::Palette;

/// Terminal width at which the grid switches to its wide column count.
pub const WIDE_MIN_WIDTH: u16 = 96;

/// Height of one card row.
pub const CARD_HEIGHT: u16 = 7;
/// Horizontal gap between cards.
pub const COLUMN_GAP: u16 = 2;
/// Vertical gap between card rows.
pub const ROW_GAP: u16 = 1;

/// Column counts for the two responsive breakpoints.
#[derive(Debug, Clone, Copy)]
pub struct GridColumns {
    /// Columns on narrow terminals.
    pub initial: u16,
    /// Columns at or above [`WIDE_MIN_WIDTH`].
    pub wide: u16,
}

impl GridColumns {
    #[must_use]
    pub const fn for_width(&self, width: u16) -> u16 {
        if width >= WIDE_MIN_WIDTH {
            self.wide
        } else {
            self.initial
        }
    }
}

/// Rendered as one cell of a [`Grid`].
pub trait GridCell {
    fn render_cell(&self, frame: &mut Frame, area: Rect, selected: bool, palette: &Palette);
}

/// Selection and scroll state for a [`Grid`].
#[derive(Debug, Default)]
pub struct GridState {
    selected: usize,
    row_offset: usize,
    columns: u16,
    visible_rows: usize,
}

impl GridState {
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// Forget selection and scroll, keeping the recorded viewport.
    pub const fn reset(&mut self) {
        self.selected = 0;
        self.row_offset = 0;
    }

    /// Record the viewport geometry. Called on every render.
    pub fn record_viewport(&mut self, area: Rect, spec: &GridColumns) {
        self.columns = spec.for_width(area.width);
        self.visible_rows = (((area.height + ROW_GAP) / (CARD_HEIGHT + ROW_GAP)) as usize).max(1);
    }

    /// Whether the last grid row is inside the viewport.
    ///
    /// Returns false until the first render has recorded a viewport. An
    /// empty grid reports true since there is nothing to scroll past.
    #[must_use]
    pub fn bottom_visible(&self, len: usize) -> bool {
        if self.columns == 0 {
            return false;
        }
        let total_rows = len.div_ceil(self.columns());
        self.row_offset + self.visible_rows >= total_rows
    }

    pub fn select_down(&mut self, len: usize) {
        self.move_by(self.columns() as isize, len);
    }

    pub fn select_up(&mut self, len: usize) {
        self.move_by(-(self.columns() as isize), len);
    }

    pub fn select_right(&mut self, len: usize) {
        self.move_by(1, len);
    }

    pub fn select_left(&mut self, len: usize) {
        self.move_by(-1, len);
    }

    pub fn select_first(&mut self, len: usize) {
        if len > 0 {
            self.selected = 0;
        }
        self.follow();
    }

    pub fn select_last(&mut self, len: usize) {
        if len > 0 {
            self.selected = len - 1;
        }
        self.follow();
    }

    pub fn page_down(&mut self, len: usize) {
        self.move_by((self.columns() * self.visible_rows.max(1)) as isize, len);
    }

    pub fn page_up(&mut self, len: usize) {
        let step = (self.columns() * self.visible_rows.max(1)) as isize;
        self.move_by(-step, len);
    }

    /// Keep selection in bounds after the item list changed.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.row_offset = 0;
            return;
        }
        if self.selected >= len {
            self.selected = len - 1;
        }
        self.follow();
    }

    fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, len as isize - 1) as usize;
        self.follow();
    }

    /// Scroll so the selected row stays visible.
    fn follow(&mut self) {
        let row = self.selected / self.columns();
        if row < self.row_offset {
            self.row_offset = row;
        } else if self.visible_rows > 0 && row >= self.row_offset + self.visible_rows {
            self.row_offset = row + 1 - self.visible_rows;
        }
    }

    fn columns(&self) -> usize {
        self.columns.max(1) as usize
    }
}

/// Card grid widget over a slice of [`GridCell`]s.
pub struct Grid<'a, T> {
    items: &'a [T],
    spec: GridColumns,
}

impl<'a, T: GridCell> Grid<'a, T> {
    #[must_use]
    pub const fn new(items: &'a [T], spec: GridColumns) -> Self {
        Self { items, spec }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut GridState, palette: &Palette) {
        state.record_viewport(area, &self.spec);
        state.clamp(self.items.len());

        let columns = state.columns();
        let constraints = vec![Constraint::Fill(1); columns];

        for visible_row in 0..state.visible_rows {
            let row = state.row_offset + visible_row;
            let first = row * columns;
            if first >= self.items.len() {
                break;
            }

            let y = area.y + (visible_row as u16) * (CARD_HEIGHT + ROW_GAP);
            if y + CARD_HEIGHT > area.y + area.height {
                break;
            }

            let row_area = Rect::new(area.x, y, area.width, CARD_HEIGHT);
            let cells = Layout::horizontal(constraints.clone())
                .spacing(COLUMN_GAP)
                .split(row_area);

            let row_items = self.items.iter().enumerate().skip(first).take(columns);
            for (cell, (index, item)) in cells.iter().zip(row_items) {
                item.render_cell(frame, *cell, index == state.selected, palette);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: GridColumns = GridColumns {
        initial: 2,
        wide: 4,
    };

    fn state_with_viewport(width: u16, height: u16) -> GridState {
        let mut state = GridState::default();
        state.record_viewport(Rect::new(0, 0, width, height), &SPEC);
        state
    }

    #[test]
    fn column_count_follows_terminal_width() {
        assert_eq!(SPEC.for_width(80), 2);
        assert_eq!(SPEC.for_width(WIDE_MIN_WIDTH), 4);
        assert_eq!(SPEC.for_width(150), 4);
    }

    #[test]
    fn bottom_is_not_visible_before_first_render() {
        let state = GridState::default();
        assert!(!state.bottom_visible(20));
    }

    #[test]
    fn bottom_visibility_tracks_scroll() {
        // 100 wide -> 4 columns, 23 tall -> 3 rows fit.
        let mut state = state_with_viewport(100, 23);
        // 20 items in 4 columns is 5 rows. The top shows rows 0..3.
        assert!(!state.bottom_visible(20));
        state.select_last(20);
        assert_eq!(state.row_offset(), 2);
        assert!(state.bottom_visible(20));
    }

    #[test]
    fn bottom_is_visible_when_everything_fits() {
        let state = state_with_viewport(100, 50);
        assert!(state.bottom_visible(8));
        assert!(state.bottom_visible(0));
    }

    #[test]
    fn vertical_moves_step_one_row() {
        let mut state = state_with_viewport(100, 23);
        state.select_down(20);
        assert_eq!(state.selected(), 4);
        state.select_right(20);
        assert_eq!(state.selected(), 5);
        state.select_up(20);
        assert_eq!(state.selected(), 1);
    }

    #[test]
    fn moves_clamp_at_both_ends() {
        let mut state = state_with_viewport(100, 23);
        state.select_up(20);
        assert_eq!(state.selected(), 0);
        state.select_last(20);
        state.select_down(20);
        assert_eq!(state.selected(), 19);
    }

    #[test]
    fn selection_scrolls_the_viewport() {
        let mut state = state_with_viewport(100, 23);
        // Moving to row 3 pushes the offset to keep it on screen.
        for _ in 0..3 {
            state.select_down(20);
        }
        assert_eq!(state.selected(), 12);
        assert_eq!(state.row_offset(), 1);
        state.select_first(20);
        assert_eq!(state.row_offset(), 0);
    }

    #[test]
    fn clamp_handles_shrinking_lists() {
        let mut state = state_with_viewport(100, 23);
        state.select_last(20);
        state.clamp(3);
        assert_eq!(state.selected(), 2);
        state.clamp(0);
        assert_eq!(state.selected(), 0);
        assert_eq!(state.row_offset(), 0);
    }
}
