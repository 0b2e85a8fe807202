//! A selectable table with keyboard navigation and fuzzy filtering.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::Palette;
use crate::config::{KeyResolver, NavAction, SearchAction};
use crate::search::Matcher;
use crate::tui::Event;

const PAGE_STEP: usize = 10;

/// Event emitted by [`TableView`].
pub enum TableEvent<T> {
    /// Selection or filter changed.
    Changed,
    /// Item was activated.
    Activated(T),
}

/// Column definition for a table.
pub struct ColumnDef {
    pub header: &'static str,
    pub constraint: Constraint,
}

impl ColumnDef {
    pub const fn new(header: &'static str, constraint: Constraint) -> Self {
        Self { header, constraint }
    }
}

/// Trait for items that can be displayed in a table.
pub trait TableRow {
    /// Column definitions for this row type.
    fn columns() -> &'static [ColumnDef];

    /// Render this row's cells with full styling control.
    fn render_cells(&self, palette: &Palette) -> Vec<Cell<'static>>;

    /// Fields the fuzzy search matches against.
    fn search_text(&self) -> Vec<&str>;
}

/// A selectable, searchable table view.
///
/// `/` opens the search field. While searching, typed characters narrow
/// the visible rows, Enter keeps the filter and returns to navigation,
/// and Esc clears it.
pub struct TableView<T: TableRow + Clone> {
    items: Vec<T>,
    /// Indices into `items` that survive the current filter.
    filtered: Vec<usize>,
    state: TableState,
    title: Option<String>,
    resolver: Arc<KeyResolver>,
    matcher: Matcher,
    query: String,
    search_active: bool,
}

impl<T: TableRow + Clone> TableView<T> {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            items: Vec::new(),
            filtered: Vec::new(),
            state: TableState::default(),
            title: None,
            resolver,
            matcher: Matcher::new(),
            query: String::new(),
            search_active: false,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refilter();
    }

    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.state
            .selected()
            .and_then(|i| self.filtered.get(i))
            .and_then(|&i| self.items.get(i))
    }

    /// Move the selection to the first visible row matching `pred`.
    pub fn select_where(&mut self, pred: impl Fn(&T) -> bool) {
        if let Some(pos) = self.filtered.iter().position(|&i| pred(&self.items[i])) {
            self.state.select(Some(pos));
        }
    }

    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn handle_event(&mut self, event: &Event) -> Option<TableEvent<T>> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Paste(text) if self.search_active => {
                self.query.push_str(text);
                self.refilter();
                Some(TableEvent::Changed)
            }
            Event::Mouse(mouse) => {
                let before = self.state.selected();
                match mouse.kind {
                    MouseEventKind::ScrollDown => self.select_next(),
                    MouseEventKind::ScrollUp => self.select_previous(),
                    _ => return None,
                }
                self.get_change_event(before)
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<TableEvent<T>> {
        if self.search_active {
            return self.handle_search_key(key);
        }

        if self.resolver.matches_search(&key) == Some(SearchAction::Toggle) {
            self.search_active = true;
            return Some(TableEvent::Changed);
        }

        let before = self.state.selected();
        match self.resolver.matches_nav(&key)? {
            NavAction::Down => self.select_next(),
            NavAction::Up => self.select_previous(),
            NavAction::First => self.select_first(),
            NavAction::Last => self.select_last(),
            NavAction::PageDown => self.page(PAGE_STEP as isize),
            NavAction::PageUp => self.page(-(PAGE_STEP as isize)),
            NavAction::Select => {
                return self.selected().cloned().map(TableEvent::Activated);
            }
            NavAction::Left | NavAction::Right => return None,
        }
        self.get_change_event(before)
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<TableEvent<T>> {
        match key.code {
            KeyCode::Esc => {
                self.search_active = false;
                self.query.clear();
                self.refilter();
                Some(TableEvent::Changed)
            }
            KeyCode::Enter => {
                self.search_active = false;
                Some(TableEvent::Changed)
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
                Some(TableEvent::Changed)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.refilter();
                Some(TableEvent::Changed)
            }
            _ => None,
        }
    }

    fn refilter(&mut self) {
        let filtered: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matcher.matches_any(item.search_text(), &self.query))
            .map(|(i, _)| i)
            .collect();
        self.filtered = filtered;

        if self.filtered.is_empty() {
            self.state.select(None);
        } else {
            let idx = self
                .state
                .selected()
                .unwrap_or(0)
                .min(self.filtered.len() - 1);
            self.state.select(Some(idx));
        }
    }

    fn select_next(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= self.filtered.len() - 1 => i,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(i));
    }

    fn select_first(&mut self) {
        if !self.filtered.is_empty() {
            self.state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.filtered.is_empty() {
            self.state.select(Some(self.filtered.len() - 1));
        }
    }

    fn page(&mut self, step: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let current = self.state.selected().unwrap_or(0) as isize;
        let next = (current + step).clamp(0, self.filtered.len() as isize - 1);
        self.state.select(Some(next as usize));
    }

    fn get_change_event(&self, before: Option<usize>) -> Option<TableEvent<T>> {
        let now = self.state.selected();
        (now.is_some() && now != before).then_some(TableEvent::Changed)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let columns = T::columns();

        let header_cells: Vec<Cell> = columns
            .iter()
            .map(|c| {
                Cell::from(c.header).style(
                    Style::default()
                        .fg(palette.header())
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        let header = Row::new(header_cells)
            .height(1)
            .style(Style::default().bg(palette.surface0));

        let rows: Vec<Row> = self
            .filtered
            .iter()
            .map(|&i| {
                Row::new(self.items[i].render_cells(palette))
                    .style(Style::default().fg(palette.text))
            })
            .collect();

        let widths: Vec<Constraint> = columns.iter().map(|c| c.constraint).collect();

        let mut table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(
                Style::default()
                    .bg(palette.selection_bg())
                    .fg(palette.primary())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        if let Some(title) = &self.title {
            let mut block = Block::default()
                .borders(Borders::ALL)
                .border_type(palette.border_type)
                .border_style(Style::default().fg(palette.border()))
                .title(title.as_str())
                .title_style(
                    Style::default()
                        .fg(palette.header())
                        .add_modifier(Modifier::BOLD),
                );
            if self.search_active || !self.query.is_empty() {
                block = block.title_bottom(format!(" /{} ", self.query));
            }
            table = table.block(block);
        }

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::config::KeybindingsConfig;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
    }

    impl Item {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
            }
        }
    }

    impl TableRow for Item {
        fn columns() -> &'static [ColumnDef] {
            const COLUMNS: &[ColumnDef] = &[ColumnDef::new("Name", Constraint::Fill(1))];
            COLUMNS
        }

        fn render_cells(&self, _palette: &Palette) -> Vec<Cell<'static>> {
            vec![Cell::from(self.name.clone())]
        }

        fn search_text(&self) -> Vec<&str> {
            vec![&self.name]
        }
    }

    fn table() -> TableView<Item> {
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        let mut table = TableView::new(resolver);
        table.set_items(vec![
            Item::new("birthday"),
            Item::new("wedding"),
            Item::new("housewarming"),
        ]);
        table
    }

    fn press(table: &mut TableView<Item>, code: KeyCode) -> Option<TableEvent<Item>> {
        table.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn first_row_is_selected_after_set_items() {
        let table = table();
        assert_eq!(table.selected(), Some(&Item::new("birthday")));
    }

    #[test]
    fn navigation_moves_selection() {
        let mut table = table();
        press(&mut table, KeyCode::Char('j'));
        assert_eq!(table.selected(), Some(&Item::new("wedding")));
        press(&mut table, KeyCode::Char('G'));
        assert_eq!(table.selected(), Some(&Item::new("housewarming")));
    }

    #[test]
    fn search_narrows_visible_rows() {
        let mut table = table();
        press(&mut table, KeyCode::Char('/'));
        press(&mut table, KeyCode::Char('w'));
        assert_eq!(table.visible_len(), 2);

        // Esc clears the filter entirely.
        press(&mut table, KeyCode::Esc);
        assert_eq!(table.visible_len(), 3);
    }

    #[test]
    fn enter_keeps_filter_and_activates() {
        let mut table = table();
        press(&mut table, KeyCode::Char('/'));
        press(&mut table, KeyCode::Char('w'));
        press(&mut table, KeyCode::Enter);
        assert_eq!(table.visible_len(), 2);

        let activated = press(&mut table, KeyCode::Enter);
        assert!(matches!(
            activated,
            Some(TableEvent::Activated(item)) if item.name == "wedding"
        ));
    }

    #[test]
    fn select_where_targets_visible_rows() {
        let mut table = table();
        table.select_where(|item| item.name == "housewarming");
        assert_eq!(table.selected(), Some(&Item::new("housewarming")));
    }
}
