//! The theme list screen.
//!
//! Lists every gift theme the storefront offers. Selecting one opens
//! its goods grid; the last opened theme is preselected on return.

use std::sync::Arc;

use async_trait::async_trait;
use color_eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{error, warn};

use crate::Palette;
use crate::api::StorefrontClient;
use crate::api::model::ThemeData;
use crate::commands::{Command, CommandEnv};
use crate::config::{KeyResolver, SearchAction, ThemesAction};
use crate::tui::Event;
use crate::ui::help::Keybinding;
use crate::ui::layout::content_area;
use crate::ui::screen::{Nav, Screen, Update};
use crate::ui::spinner::Spinner;
use crate::ui::table::{ColumnDef, TableEvent, TableRow, TableView};

/// Messages driving the theme list screen.
#[derive(Debug)]
pub enum ThemesMsg {
    /// Fetch the theme list from the storefront.
    Reload,
    /// The theme list arrived.
    Loaded(Vec<ThemeData>),
    /// The theme list fetch failed.
    FetchFailed,
    /// Open the goods grid for a theme.
    Open(ThemeData),
}

impl TableRow for ThemeData {
    fn columns() -> &'static [ColumnDef] {
        const COLUMNS: &[ColumnDef] = &[
            ColumnDef::new("Theme", Constraint::Length(16)),
            ColumnDef::new("Title", Constraint::Fill(2)),
            ColumnDef::new("Description", Constraint::Fill(3)),
        ];
        COLUMNS
    }

    fn render_cells(&self, palette: &Palette) -> Vec<Cell<'static>> {
        let swatch = parse_hex_color(&self.background_color).unwrap_or(palette.overlay0);
        vec![
            Cell::from(Line::from(vec![
                Span::styled("■ ", Style::default().fg(swatch)),
                Span::raw(self.label.clone()),
            ])),
            Cell::from(self.title.clone()),
            Cell::from(self.description.clone().unwrap_or_default())
                .style(Style::default().fg(palette.subtext0)),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.key.as_str(), self.label.as_str(), self.title.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

/// Parse a `#rrggbb` background color. Malformed values yield `None`
/// and the caller falls back to a palette color.
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

pub struct ThemeSelectScreen {
    client: StorefrontClient,
    resolver: Arc<KeyResolver>,
    table: TableView<ThemeData>,
    themes: Vec<ThemeData>,
    loading: bool,
    spinner: Spinner,
    /// Theme to select once the list arrives.
    preselect: Option<String>,
    /// Theme to open immediately once the list arrives.
    auto_open: Option<String>,
    msg_tx: UnboundedSender<ThemesMsg>,
    msg_rx: UnboundedReceiver<ThemesMsg>,
}

impl ThemeSelectScreen {
    #[must_use]
    pub fn new(
        client: StorefrontClient,
        resolver: Arc<KeyResolver>,
        preselect: Option<String>,
        auto_open: Option<String>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let table = TableView::new(resolver.clone()).with_title(" Gift Themes ");
        Self {
            client,
            resolver,
            table,
            themes: Vec::new(),
            loading: false,
            spinner: Spinner::new("Loading themes"),
            preselect,
            auto_open,
            msg_tx,
            msg_rx,
        }
    }

    fn queue(&self, msg: ThemesMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn process_message(&mut self, msg: ThemesMsg) -> Update {
        match msg {
            ThemesMsg::Reload => self.start_fetch(),
            ThemesMsg::Loaded(themes) => self.themes_loaded(themes),
            ThemesMsg::FetchFailed => {
                self.loading = false;
                Update::Idle
            }
            ThemesMsg::Open(theme) => self.open_theme(&theme.key),
        }
    }

    fn start_fetch(&mut self) -> Update {
        self.loading = true;
        FetchThemesCmd {
            client: self.client.clone(),
            tx: self.msg_tx.clone(),
        }
        .into()
    }

    fn themes_loaded(&mut self, themes: Vec<ThemeData>) -> Update {
        self.loading = false;
        self.themes = themes;
        self.table.set_items(self.themes.clone());

        if let Some(key) = self.auto_open.take() {
            if self.themes.iter().any(|theme| theme.key == key) {
                return self.open_theme(&key);
            }
            warn!("Unknown theme key from command line: {key}");
        }

        if let Some(key) = self.preselect.take() {
            self.table.select_where(|theme| theme.key == key);
        }
        Update::Idle
    }

    fn open_theme(&self, key: &str) -> Update {
        match self.themes.iter().position(|theme| theme.key == key) {
            Some(index) => Update::Navigate(Nav::OpenTheme {
                themes: self.themes.clone(),
                index,
            }),
            None => Update::Idle,
        }
    }
}

impl Screen for ThemeSelectScreen {
    fn init(&mut self) {
        self.queue(ThemesMsg::Reload);
    }

    fn handle_tick(&mut self) {
        if self.loading {
            self.spinner.tick();
        }
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        if self.loading {
            return false;
        }

        if let Some(table_event) = self.table.handle_event(event) {
            if let TableEvent::Activated(theme) = table_event {
                self.queue(ThemesMsg::Open(theme));
            }
            return true;
        }

        if let Event::Key(key) = event
            && self.resolver.matches_themes(key) == Some(ThemesAction::Reload)
        {
            self.queue(ThemesMsg::Reload);
            return true;
        }

        false
    }

    fn update(&mut self) -> Result<Update> {
        let mut commands = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            match self.process_message(msg) {
                Update::Idle => {}
                Update::Run(mut cmds) => commands.append(&mut cmds),
                nav @ Update::Navigate(_) => return Ok(nav),
            }
        }
        if commands.is_empty() {
            Ok(Update::Idle)
        } else {
            Ok(Update::Run(commands))
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let area = content_area(area);

        if self.loading {
            self.spinner.render(frame, area, palette);
            return;
        }

        if self.themes.is_empty() {
            render_empty_state(frame, area, palette);
            return;
        }

        self.table.render(frame, area, palette);
    }

    fn breadcrumbs(&self) -> Vec<String> {
        vec!["Themes".to_string()]
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(self.resolver.display_search(SearchAction::Toggle), "Search"),
            Keybinding::hint(self.resolver.display_themes(ThemesAction::Reload), "Reload"),
        ]
    }
}

fn render_empty_state(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(Span::styled(
            "테마가 없어요.",
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "다시 불러오려면 r 키를 누르세요.",
            Style::default().fg(palette.subtext0),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    let centered = area.centered(Constraint::Percentage(100), Constraint::Length(3));
    frame.render_widget(paragraph, centered);
}

/// Fetches the theme list.
pub struct FetchThemesCmd {
    pub client: StorefrontClient,
    pub tx: UnboundedSender<ThemesMsg>,
}

#[async_trait]
impl Command for FetchThemesCmd {
    fn name(&self) -> String {
        "Loading themes".to_string()
    }

    async fn execute(self: Box<Self>, _env: CommandEnv) -> Result<()> {
        match self.client.list_themes().await {
            Ok(themes) => {
                let _ = self.tx.send(ThemesMsg::Loaded(themes));
            }
            Err(e) => {
                error!("Error fetching themes: {e}");
                let _ = self.tx.send(ThemesMsg::FetchFailed);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::config::KeybindingsConfig;

    fn theme(key: &str, label: &str) -> ThemeData {
        ThemeData {
            key: key.to_string(),
            label: label.to_string(),
            title: format!("{label} 선물 추천"),
            description: Some(format!("{label} 선물 모음")),
            background_color: "#fee500".to_string(),
        }
    }

    fn sample_themes() -> Vec<ThemeData> {
        vec![
            theme("birthday", "생일"),
            theme("wedding", "웨딩"),
            theme("pet", "반려동물"),
        ]
    }

    fn screen(preselect: Option<&str>, auto_open: Option<&str>) -> ThemeSelectScreen {
        let client = StorefrontClient::new("http://localhost:3000", 5).unwrap();
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        ThemeSelectScreen::new(
            client,
            resolver,
            preselect.map(str::to_string),
            auto_open.map(str::to_string),
        )
    }

    #[test]
    fn parses_background_colors() {
        assert_eq!(
            parse_hex_color("#fee500"),
            Some(Color::Rgb(0xfe, 0xe5, 0x00))
        );
        assert_eq!(parse_hex_color("112233"), Some(Color::Rgb(0x11, 0x22, 0x33)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#ggg500"), None);
        // Six bytes but not six ascii characters.
        assert_eq!(parse_hex_color("ab≤c"), None);
    }

    #[test]
    fn loaded_themes_fill_the_table() -> Result<()> {
        let mut screen = screen(None, None);
        screen.init();
        let update = screen.update()?;
        assert!(matches!(update, Update::Run(ref cmds) if cmds.len() == 1));
        assert!(screen.loading);

        screen.queue(ThemesMsg::Loaded(sample_themes()));
        let update = screen.update()?;
        assert!(matches!(update, Update::Idle));
        assert!(!screen.loading);
        assert_eq!(screen.table.visible_len(), 3);
        Ok(())
    }

    #[test]
    fn auto_open_navigates_to_the_requested_theme() -> Result<()> {
        let mut screen = screen(None, Some("wedding"));
        screen.queue(ThemesMsg::Loaded(sample_themes()));
        let update = screen.update()?;
        assert!(matches!(
            update,
            Update::Navigate(Nav::OpenTheme { index: 1, .. })
        ));
        Ok(())
    }

    #[test]
    fn unknown_auto_open_falls_back_to_the_list() -> Result<()> {
        let mut screen = screen(None, Some("missing"));
        screen.queue(ThemesMsg::Loaded(sample_themes()));
        let update = screen.update()?;
        assert!(matches!(update, Update::Idle));
        assert_eq!(screen.table.visible_len(), 3);
        Ok(())
    }

    #[test]
    fn preselect_restores_the_previous_selection() -> Result<()> {
        let mut screen = screen(Some("pet"), None);
        screen.queue(ThemesMsg::Loaded(sample_themes()));
        screen.update()?;
        assert_eq!(
            screen.table.selected().map(|theme| theme.key.as_str()),
            Some("pet")
        );
        Ok(())
    }

    #[test]
    fn enter_opens_the_selected_theme() -> Result<()> {
        let mut screen = screen(None, None);
        screen.queue(ThemesMsg::Loaded(sample_themes()));
        screen.update()?;

        let enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(screen.handle_event(&enter));
        let update = screen.update()?;
        assert!(matches!(
            update,
            Update::Navigate(Nav::OpenTheme { index: 0, .. })
        ));
        Ok(())
    }

    #[test]
    fn an_empty_backend_shows_the_empty_state() -> Result<()> {
        let mut screen = screen(None, None);
        screen.queue(ThemesMsg::Loaded(Vec::new()));
        let update = screen.update()?;
        assert!(matches!(update, Update::Idle));
        assert!(screen.themes.is_empty());
        Ok(())
    }
}
