//! The theme goods screen.
//!
//! Shows an endlessly scrolling grid of products for one theme. Moving
//! the selection toward the bottom pulls the next page once the last row
//! enters the viewport; switching themes restarts the grid from the
//! first page.

use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::trace;

use crate::Palette;
use crate::api::StorefrontClient;
use crate::api::model::{GoodsPage, ThemeData};
use crate::commands::CopyToClipboardCmd;
use crate::config::{GlobalAction, GoodsAction, KeyResolver, NavAction};
use crate::goods::command::FetchGoodsPageCmd;
use crate::goods::pager::{FetchTag, GoodsPager};
use crate::goods::sentinel::{SentinelObserver, ViewportSentinel};
use crate::goods::view::GOODS_GRID;
use crate::tui::Event;
use crate::ui::grid::{Grid, GridState};
use crate::ui::help::Keybinding;
use crate::ui::layout::content_area;
use crate::ui::screen::{Nav, Screen, Update};
use crate::ui::spinner::Spinner;

/// Messages driving the goods screen.
#[derive(Debug)]
pub enum GoodsMsg {
    /// Reload the current theme from the first page.
    Reload,
    /// Switch to the previous theme in the list.
    PrevTheme,
    /// Switch to the next theme in the list.
    NextTheme,
    /// Selection or viewport moved; check whether more goods are needed.
    Scrolled,
    /// A page fetch completed.
    PageLoaded { tag: FetchTag, page: GoodsPage },
    /// A page fetch failed.
    FetchFailed { tag: FetchTag },
    /// Copy the selected product name to the clipboard.
    CopySelected,
    /// Leave the screen.
    Back,
}

pub struct ThemeGoodsSection {
    themes: Vec<ThemeData>,
    index: usize,
    client: StorefrontClient,
    resolver: Arc<KeyResolver>,
    pager: GoodsPager,
    sentinel: Box<dyn SentinelObserver>,
    grid: GridState,
    spinner: Spinner,
    msg_tx: UnboundedSender<GoodsMsg>,
    msg_rx: UnboundedReceiver<GoodsMsg>,
}

impl ThemeGoodsSection {
    /// Create a goods screen for `themes[index]`. `themes` must not be
    /// empty.
    #[must_use]
    pub fn new(
        client: StorefrontClient,
        resolver: Arc<KeyResolver>,
        themes: Vec<ThemeData>,
        index: usize,
    ) -> Self {
        Self::with_parts(
            client,
            resolver,
            themes,
            index,
            GoodsPager::new(),
            Box::new(ViewportSentinel::new()),
        )
    }

    fn with_parts(
        client: StorefrontClient,
        resolver: Arc<KeyResolver>,
        themes: Vec<ThemeData>,
        index: usize,
        pager: GoodsPager,
        sentinel: Box<dyn SentinelObserver>,
    ) -> Self {
        debug_assert!(!themes.is_empty());
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let index = index.min(themes.len().saturating_sub(1));
        Self {
            themes,
            index,
            client,
            resolver,
            pager,
            sentinel,
            grid: GridState::default(),
            spinner: Spinner::new("Loading goods"),
            msg_tx,
            msg_rx,
        }
    }

    fn theme(&self) -> &ThemeData {
        &self.themes[self.index]
    }

    /// Key of the theme currently shown.
    #[must_use]
    pub fn theme_key(&self) -> &str {
        &self.theme().key
    }

    fn queue(&self, msg: GoodsMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if let Some(action) = self.resolver.matches_nav(key) {
            let len = self.pager.items().len();
            match action {
                NavAction::Up => self.grid.select_up(len),
                NavAction::Down => self.grid.select_down(len),
                NavAction::Left => self.grid.select_left(len),
                NavAction::Right => self.grid.select_right(len),
                NavAction::PageUp => self.grid.page_up(len),
                NavAction::PageDown => self.grid.page_down(len),
                NavAction::First => self.grid.select_first(len),
                NavAction::Last => self.grid.select_last(len),
                NavAction::Select => return false,
            }
            self.queue(GoodsMsg::Scrolled);
            return true;
        }

        if let Some(action) = self.resolver.matches_goods(key) {
            match action {
                GoodsAction::PrevTheme => self.queue(GoodsMsg::PrevTheme),
                GoodsAction::NextTheme => self.queue(GoodsMsg::NextTheme),
                GoodsAction::Reload => self.queue(GoodsMsg::Reload),
                GoodsAction::Copy => self.queue(GoodsMsg::CopySelected),
            }
            return true;
        }

        if self.resolver.matches_global(key) == Some(GlobalAction::Back) {
            self.queue(GoodsMsg::Back);
            return true;
        }

        false
    }

    fn process_message(&mut self, msg: GoodsMsg) -> Update {
        match msg {
            GoodsMsg::Reload => self.restart_theme(),
            GoodsMsg::PrevTheme => self.switch_theme(-1),
            GoodsMsg::NextTheme => self.switch_theme(1),
            GoodsMsg::Scrolled => self.maybe_fetch(),
            GoodsMsg::PageLoaded { tag, page } => self.page_loaded(&tag, page),
            GoodsMsg::FetchFailed { tag } => {
                self.pager.settle_failure(&tag);
                Update::Idle
            }
            GoodsMsg::CopySelected => self.copy_selected(),
            GoodsMsg::Back => Update::Navigate(Nav::BackToThemes {
                preselect: Some(self.theme().key.clone()),
            }),
        }
    }

    /// Start the current theme over from its first page.
    fn restart_theme(&mut self) -> Update {
        let key = self.theme().key.clone();
        let request = self.pager.reset(&key);
        self.sentinel.resubscribe();
        self.grid.reset();
        FetchGoodsPageCmd {
            client: self.client.clone(),
            request,
            tx: self.msg_tx.clone(),
        }
        .into()
    }

    /// Move to an adjacent theme, wrapping at the ends.
    ///
    /// Only the fetch is issued here; the app persists the theme choice
    /// when the screen is left.
    fn switch_theme(&mut self, delta: isize) -> Update {
        if self.themes.len() < 2 {
            return Update::Idle;
        }
        let len = self.themes.len() as isize;
        self.index = (self.index as isize + delta).rem_euclid(len) as usize;
        self.restart_theme()
    }

    fn page_loaded(&mut self, tag: &FetchTag, page: GoodsPage) -> Update {
        if !self.pager.apply(tag, page) {
            trace!("Discarding stale goods page for {}", tag.theme_key);
            return Update::Idle;
        }
        self.sentinel.resubscribe();
        self.grid.clamp(self.pager.items().len());
        // A tall viewport may already show the new bottom row, in which
        // case the next page is pulled right away.
        self.maybe_fetch()
    }

    /// Ask the sentinel whether the bottom row entering the viewport
    /// should pull another page.
    fn maybe_fetch(&mut self) -> Update {
        let visible = self.grid.bottom_visible(self.pager.items().len());
        if !self.sentinel.observe(visible) {
            return Update::Idle;
        }
        match self.pager.request_next_page() {
            Some(request) => FetchGoodsPageCmd {
                client: self.client.clone(),
                request,
                tx: self.msg_tx.clone(),
            }
            .into(),
            None => Update::Idle,
        }
    }

    fn copy_selected(&self) -> Update {
        match self.pager.items().get(self.grid.selected()) {
            Some(item) => {
                CopyToClipboardCmd::new(item.name.clone(), format!("Copied {}", item.name)).into()
            }
            None => Update::Idle,
        }
    }
}

impl Screen for ThemeGoodsSection {
    fn init(&mut self) {
        self.queue(GoodsMsg::Reload);
    }

    fn handle_tick(&mut self) {
        if self.pager.is_loading() {
            self.spinner.tick();
        }
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => {
                    self.grid.select_down(self.pager.items().len());
                    self.queue(GoodsMsg::Scrolled);
                    true
                }
                MouseEventKind::ScrollUp => {
                    self.grid.select_up(self.pager.items().len());
                    self.queue(GoodsMsg::Scrolled);
                    true
                }
                _ => false,
            },
            Event::Resize(_, _) => {
                // New geometry may reveal the bottom row.
                self.queue(GoodsMsg::Scrolled);
                false
            }
            _ => false,
        }
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

        if self.pager.items().is_empty() {
            // Track viewport geometry even without cards so auto-fill
            // decisions stay correct once goods arrive.
            self.grid.record_viewport(area, &GOODS_GRID);
            if self.pager.is_loading() {
                self.spinner.render(frame, area, palette);
            } else {
                render_empty_state(frame, area, palette);
            }
            return;
        }

        Grid::new(self.pager.items(), GOODS_GRID).render(frame, area, &mut self.grid, palette);
    }

    fn breadcrumbs(&self) -> Vec<String> {
        vec!["Themes".to_string(), self.theme().label.clone()]
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(
                format!(
                    "{}/{}",
                    self.resolver.display_goods(GoodsAction::PrevTheme),
                    self.resolver.display_goods(GoodsAction::NextTheme)
                ),
                "Switch theme",
            ),
            Keybinding::hint(self.resolver.display_goods(GoodsAction::Reload), "Reload"),
            Keybinding::hint(self.resolver.display_goods(GoodsAction::Copy), "Copy name"),
        ]
    }
}

fn render_empty_state(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(Span::styled(
            "상품이 없어요.",
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "다른 테마를 둘러보세요.",
            Style::default().fg(palette.subtext0),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    let centered = area.centered(Constraint::Percentage(100), Constraint::Length(3));
    frame.render_widget(paragraph, centered);
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::api::model::{BrandInfo, GoodsData, GoodsPrice};
    use crate::config::KeybindingsConfig;

    /// Observer driven by a fixed script of fire decisions.
    struct ScriptedSentinel {
        fires: VecDeque<bool>,
    }

    impl ScriptedSentinel {
        fn new(fires: &[bool]) -> Self {
            Self {
                fires: fires.iter().copied().collect(),
            }
        }
    }

    impl SentinelObserver for ScriptedSentinel {
        fn resubscribe(&mut self) {}

        fn observe(&mut self, _visible: bool) -> bool {
            self.fires.pop_front().unwrap_or(false)
        }
    }

    fn theme(key: &str, label: &str) -> ThemeData {
        ThemeData {
            key: key.to_string(),
            label: label.to_string(),
            title: format!("{label} 선물 추천"),
            description: None,
            background_color: "#fee500".to_string(),
        }
    }

    fn page_of(count: usize, token: Option<&str>) -> GoodsPage {
        GoodsPage {
            products: (0..count)
                .map(|i| GoodsData {
                    name: format!("상품 {i}"),
                    image_url: format!("https://img.example.com/{i}.jpg"),
                    price: GoodsPrice {
                        selling_price: 1000,
                    },
                    brand_info: BrandInfo {
                        name: "브랜드".to_string(),
                    },
                })
                .collect(),
            next_page_token: token.map(str::to_string),
        }
    }

    fn section_with(script: &[bool]) -> ThemeGoodsSection {
        let client = StorefrontClient::new("http://localhost:3000", 5).unwrap();
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        let themes = vec![theme("birthday", "생일"), theme("wedding", "웨딩")];
        ThemeGoodsSection::with_parts(
            client,
            resolver,
            themes,
            0,
            GoodsPager::new(),
            Box::new(ScriptedSentinel::new(script)),
        )
    }

    #[test]
    fn loads_twenty_then_appends_five() -> Result<()> {
        let mut section = section_with(&[true, false]);
        section.init();

        let update = section.update()?;
        assert!(matches!(update, Update::Run(ref cmds) if cmds.len() == 1));
        let tag = section.pager.pending().cloned().unwrap();

        section.queue(GoodsMsg::PageLoaded {
            tag,
            page: page_of(20, Some("cursor-1")),
        });
        // The sentinel fires right after the page lands, pulling page two.
        let update = section.update()?;
        assert!(matches!(update, Update::Run(ref cmds) if cmds.len() == 1));
        assert_eq!(section.pager.items().len(), 20);

        let tag = section.pager.pending().cloned().unwrap();
        section.queue(GoodsMsg::PageLoaded {
            tag,
            page: page_of(5, None),
        });
        let update = section.update()?;
        assert!(matches!(update, Update::Idle));
        assert_eq!(section.pager.items().len(), 25);
        assert!(!section.pager.has_more());
        Ok(())
    }

    #[test]
    fn switching_themes_discards_late_pages() -> Result<()> {
        let mut section = section_with(&[]);
        section.init();
        section.update()?;
        let stale = section.pager.pending().cloned().unwrap();

        // Switch before the first page arrives.
        section.queue(GoodsMsg::NextTheme);
        let update = section.update()?;
        assert_eq!(section.pager.theme_key(), "wedding");
        assert!(matches!(update, Update::Run(ref cmds) if cmds.len() == 1));

        section.queue(GoodsMsg::PageLoaded {
            tag: stale,
            page: page_of(20, Some("cursor-1")),
        });
        section.update()?;
        assert!(section.pager.items().is_empty());
        assert!(section.pager.is_loading());
        Ok(())
    }

    #[test]
    fn rapid_theme_switches_issue_only_fetches() -> Result<()> {
        let mut section = section_with(&[]);
        section.init();
        section.update()?;

        // Remembering the theme is the app's job at screen exit, so the
        // batch may contain nothing but fetches.
        section.queue(GoodsMsg::NextTheme);
        section.queue(GoodsMsg::NextTheme);
        let update = section.update()?;
        match update {
            Update::Run(cmds) => {
                assert_eq!(cmds.len(), 2);
                for cmd in &cmds {
                    assert!(cmd.name().starts_with("Loading goods"));
                }
            }
            _ => panic!("expected fetch commands"),
        }
        assert_eq!(section.theme_key(), "birthday");
        Ok(())
    }

    #[test]
    fn empty_first_page_settles_into_the_empty_state() -> Result<()> {
        let mut section = section_with(&[false]);
        section.init();
        section.update()?;

        let tag = section.pager.pending().cloned().unwrap();
        section.queue(GoodsMsg::PageLoaded {
            tag,
            page: page_of(0, None),
        });
        section.update()?;
        assert!(section.pager.items().is_empty());
        assert!(!section.pager.is_loading());
        assert!(!section.pager.has_more());
        Ok(())
    }

    #[test]
    fn failure_settles_and_reload_starts_over() -> Result<()> {
        let mut section = section_with(&[]);
        section.init();
        section.update()?;

        let tag = section.pager.pending().cloned().unwrap();
        section.queue(GoodsMsg::FetchFailed { tag });
        section.update()?;
        assert!(!section.pager.is_loading());

        section.queue(GoodsMsg::Reload);
        let update = section.update()?;
        assert!(matches!(update, Update::Run(_)));
        assert!(section.pager.is_loading());
        Ok(())
    }

    #[test]
    fn copy_with_no_goods_is_a_no_op() -> Result<()> {
        let mut section = section_with(&[]);
        section.queue(GoodsMsg::CopySelected);
        let update = section.update()?;
        assert!(matches!(update, Update::Idle));
        Ok(())
    }

    #[test]
    fn esc_returns_to_the_theme_list() -> Result<()> {
        let mut section = section_with(&[]);
        let esc = Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(section.handle_event(&esc));

        let update = section.update()?;
        assert!(matches!(
            update,
            Update::Navigate(Nav::BackToThemes { ref preselect }) if preselect.as_deref() == Some("birthday")
        ));
        Ok(())
    }
}
