//! Application orchestration.
//!
//! The app owns the active screen, routes terminal events to it, drains
//! its updates, spawns the commands it requests, and performs screen
//! navigation. Overlays (toasts, help) live here so they draw above
//! whichever screen is active.

use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, warn};

use crate::Palette;
use crate::api::StorefrontClient;
use crate::cli::Args;
use crate::commands::{Command, CommandEnv};
use crate::config::{AppConfig, GlobalAction, KeyResolver, NavAction, save_last_theme};
use crate::goods::section::ThemeGoodsSection;
use crate::themes::ThemeSelectScreen;
use crate::tui::{Event, Tui};
use crate::ui::help::{HelpOverlay, Keybinding, KeybindingSection};
use crate::ui::screen::{Nav, Screen, Update};
use crate::ui::status_bar::StatusBar;
use crate::ui::toast::{Toast, ToastManager, ToastType};

/// Height of the status bar: logo plus borders.
const STATUS_BAR_HEIGHT: u16 = 9;

/// Application-level messages.
///
/// Screens keep their own message channels; this enum only carries the
/// feedback that spawned commands report back to the app.
#[derive(Debug)]
pub enum AppMessage {
    /// Display a toast notification.
    ShowToast {
        message: String,
        toast_type: ToastType,
    },
    /// A spawned command finished.
    CommandCompleted { name: String, success: bool },
}

enum Route {
    Themes(ThemeSelectScreen),
    Goods(ThemeGoodsSection),
}

impl Route {
    fn screen(&mut self) -> &mut dyn Screen {
        match self {
            Self::Themes(screen) => screen,
            Self::Goods(screen) => screen,
        }
    }
}

pub struct App {
    client: StorefrontClient,
    resolver: Arc<KeyResolver>,
    palette: Palette,
    route: Route,
    status_bar: StatusBar,
    toasts: ToastManager,
    help: HelpOverlay,
    env: CommandEnv,
    msg_tx: UnboundedSender<AppMessage>,
    msg_rx: UnboundedReceiver<AppMessage>,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(config: &AppConfig, resolver: Arc<KeyResolver>, palette: Palette) -> Result<Self> {
        let client = StorefrontClient::new(&config.api.base_url, config.api.timeout_secs)?;
        let status_bar = StatusBar::new(resolver.clone(), client.host());
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let env = CommandEnv::new(msg_tx.clone());
        let route = Route::Themes(ThemeSelectScreen::new(
            client.clone(),
            resolver.clone(),
            config.last_theme.clone(),
            None,
        ));
        Ok(Self {
            client,
            resolver,
            palette,
            route,
            status_bar,
            toasts: ToastManager::new(),
            help: HelpOverlay::new(),
            env,
            msg_tx,
            msg_rx,
            should_quit: false,
            should_suspend: false,
        })
    }

    /// Apply command line overrides that affect the initial screen.
    pub fn apply_cli_args(&mut self, args: &Args) {
        if let Some(theme) = &args.theme {
            self.route = Route::Themes(ThemeSelectScreen::new(
                self.client.clone(),
                self.resolver.clone(),
                None,
                Some(theme.clone()),
            ));
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(60.0, 4.0)?;
        tui.enter()?;

        self.route.screen().init();

        loop {
            if let Some(event) = tui.next_event().await {
                self.handle_event(&mut tui, event)?;
            }
            self.drain_messages();
            self.advance_route()?;

            if self.should_suspend {
                self.should_suspend = false;
                tui.suspend()?;
                tui.resume()?;
            } else if self.should_quit {
                break;
            }
        }

        if let Route::Goods(section) = &self.route {
            persist_last_theme(section.theme_key());
        }
        tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Tick => {
                self.toasts.handle_tick();
                self.route.screen().handle_tick();
            }
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                // Render first so screens see the new geometry before
                // reacting to it.
                self.render(tui)?;
                self.route.screen().handle_event(&event);
            }
            Event::Error(message) => error!("Terminal error: {message}"),
            Event::Key(key) => self.handle_key(&key),
            Event::Mouse(_) | Event::Paste(_) => {
                self.route.screen().handle_event(&event);
            }
            Event::Init => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if self.help.is_visible() {
            if matches!(
                self.resolver.matches_global(key),
                Some(GlobalAction::Help | GlobalAction::Back | GlobalAction::Quit)
            ) {
                self.help.hide();
            }
            return;
        }

        if key.code == KeyCode::Char('z') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_suspend = true;
            return;
        }

        // The screen gets first refusal so search input can shadow
        // global bindings.
        if self.route.screen().handle_event(&Event::Key(*key)) {
            return;
        }

        match self.resolver.matches_global(key) {
            Some(GlobalAction::Quit) => self.should_quit = true,
            Some(GlobalAction::Help) => self.help.toggle(),
            Some(GlobalAction::Back) | None => {}
        }
    }

    fn drain_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            match msg {
                AppMessage::ShowToast {
                    message,
                    toast_type,
                } => {
                    self.toasts.show(Toast::new(message, toast_type));
                }
                AppMessage::CommandCompleted { name, success } => {
                    if success {
                        debug!("Command {name:?} completed");
                    } else {
                        self.toasts.show(Toast::error(format!("{name} failed")));
                    }
                }
            }
        }
    }

    /// Drain the active screen's updates, spawning requested commands and
    /// following navigation until the screen settles.
    fn advance_route(&mut self) -> Result<()> {
        loop {
            match self.route.screen().update() {
                Ok(Update::Idle) => return Ok(()),
                Ok(Update::Run(commands)) => {
                    self.spawn_commands(commands);
                    return Ok(());
                }
                Ok(Update::Navigate(nav)) => self.navigate(nav),
                Err(e) => {
                    error!("Screen update failed: {e:#}");
                    self.toasts.show(Toast::error("Something went wrong"));
                    return Ok(());
                }
            }
        }
    }

    fn navigate(&mut self, nav: Nav) {
        match nav {
            Nav::OpenTheme { themes, index } => {
                persist_last_theme(&themes[index].key);
                let mut section = ThemeGoodsSection::new(
                    self.client.clone(),
                    self.resolver.clone(),
                    themes,
                    index,
                );
                section.init();
                self.route = Route::Goods(section);
            }
            Nav::BackToThemes { preselect } => {
                if let Some(key) = &preselect {
                    persist_last_theme(key);
                }
                let mut screen = ThemeSelectScreen::new(
                    self.client.clone(),
                    self.resolver.clone(),
                    preselect,
                    None,
                );
                screen.init();
                self.route = Route::Themes(screen);
            }
        }
    }

    fn spawn_commands(&self, commands: Vec<Box<dyn Command>>) {
        for command in commands {
            let name = command.name();
            debug!("Spawning command: {name}");
            let env = self.env.clone();
            let msg_tx = self.msg_tx.clone();
            tokio::spawn(async move {
                let result = command.execute(env).await;
                let success = result.is_ok();
                if let Err(e) = &result {
                    error!("Command {name:?} failed: {e:#}");
                }
                let _ = msg_tx.send(AppMessage::CommandCompleted { name, success });
            });
        }
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let breadcrumbs = self.route.screen().breadcrumbs();
        let local_keybindings = self.route.screen().keybindings();
        let help_sections = if self.help.is_visible() {
            self.help_sections()
        } else {
            Vec::new()
        };

        let palette = self.palette;
        let route = &mut self.route;
        let status_bar = &self.status_bar;
        let toasts = &self.toasts;
        let help = &self.help;

        tui.draw(|frame| {
            let chunks = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(frame.area());

            route.screen().render(frame, chunks[0], &palette);
            status_bar.render_with_keybindings(
                frame,
                chunks[1],
                &palette,
                &breadcrumbs,
                &local_keybindings,
            );
            toasts.render(frame, frame.area(), &palette);
            help.render(frame, frame.area(), &palette, &help_sections);
        })?;
        Ok(())
    }

    fn help_sections(&mut self) -> Vec<KeybindingSection> {
        let screen_bindings = self.route.screen().keybindings();
        let mut sections = Vec::new();
        if !screen_bindings.is_empty() {
            sections.push(KeybindingSection::new("Screen", screen_bindings));
        }
        sections.push(KeybindingSection::new(
            "Navigation",
            self.navigation_keybindings(),
        ));
        sections.push(KeybindingSection::new(
            "Global",
            self.status_bar.global_keybindings(),
        ));
        sections
    }

    fn navigation_keybindings(&self) -> Vec<Keybinding> {
        let r = &self.resolver;
        vec![
            Keybinding::new(
                format!(
                    "{}/{}",
                    r.display_nav(NavAction::Up),
                    r.display_nav(NavAction::Down)
                ),
                "Move up/down",
            ),
            Keybinding::new(
                format!(
                    "{}/{}",
                    r.display_nav(NavAction::Left),
                    r.display_nav(NavAction::Right)
                ),
                "Move left/right",
            ),
            Keybinding::new(
                format!(
                    "{}/{}",
                    r.display_nav(NavAction::PageUp),
                    r.display_nav(NavAction::PageDown)
                ),
                "Page up/down",
            ),
            Keybinding::new(
                format!(
                    "{}/{}",
                    r.display_nav(NavAction::First),
                    r.display_nav(NavAction::Last)
                ),
                "First/last",
            ),
            Keybinding::new(r.display_nav(NavAction::Select), "Select"),
        ]
    }
}

/// Remember the open theme for the next launch.
///
/// Always called from the app task, never a spawned one, so the
/// read-modify-write of the config file cannot interleave.
fn persist_last_theme(theme_key: &str) {
    if let Err(e) = save_last_theme(theme_key) {
        warn!("Failed to remember theme {theme_key:?}: {e:#}");
    }
}
