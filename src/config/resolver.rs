use std::sync::Arc;

use crossterm::event::KeyEvent;

use super::{
    GlobalAction, GoodsAction, KeybindingsConfig, NavAction, SearchAction, ThemesAction,
};

/// Resolves key events to actions and actions back to display strings.
///
/// Screens share one resolver so a rebound key changes both its behavior
/// and its hint in the status bar.
pub struct KeyResolver {
    keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    #[must_use]
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    #[must_use]
    pub fn matches_global(&self, event: &KeyEvent) -> Option<GlobalAction> {
        let kb = &self.keybindings.global;
        if kb.quit.matches(event) {
            Some(GlobalAction::Quit)
        } else if kb.help.matches(event) {
            Some(GlobalAction::Help)
        } else if kb.back.matches(event) {
            Some(GlobalAction::Back)
        } else {
            None
        }
    }

    #[must_use]
    pub fn matches_nav(&self, event: &KeyEvent) -> Option<NavAction> {
        let kb = &self.keybindings.navigation;
        if kb.up.matches(event) {
            Some(NavAction::Up)
        } else if kb.down.matches(event) {
            Some(NavAction::Down)
        } else if kb.left.matches(event) {
            Some(NavAction::Left)
        } else if kb.right.matches(event) {
            Some(NavAction::Right)
        } else if kb.page_up.matches(event) {
            Some(NavAction::PageUp)
        } else if kb.page_down.matches(event) {
            Some(NavAction::PageDown)
        } else if kb.first.matches(event) {
            Some(NavAction::First)
        } else if kb.last.matches(event) {
            Some(NavAction::Last)
        } else if kb.select.matches(event) {
            Some(NavAction::Select)
        } else {
            None
        }
    }

    #[must_use]
    pub fn matches_search(&self, event: &KeyEvent) -> Option<SearchAction> {
        let kb = &self.keybindings.search;
        if kb.toggle.matches(event) {
            Some(SearchAction::Toggle)
        } else if kb.exit.matches(event) {
            Some(SearchAction::Exit)
        } else {
            None
        }
    }

    #[must_use]
    pub fn matches_goods(&self, event: &KeyEvent) -> Option<GoodsAction> {
        let kb = &self.keybindings.goods;
        if kb.prev_theme.matches(event) {
            Some(GoodsAction::PrevTheme)
        } else if kb.next_theme.matches(event) {
            Some(GoodsAction::NextTheme)
        } else if kb.reload.matches(event) {
            Some(GoodsAction::Reload)
        } else if kb.copy.matches(event) {
            Some(GoodsAction::Copy)
        } else {
            None
        }
    }

    #[must_use]
    pub fn matches_themes(&self, event: &KeyEvent) -> Option<ThemesAction> {
        let kb = &self.keybindings.themes;
        if kb.reload.matches(event) {
            Some(ThemesAction::Reload)
        } else {
            None
        }
    }

    #[must_use]
    pub fn display_global(&self, action: GlobalAction) -> String {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.display(),
            GlobalAction::Help => kb.help.display(),
            GlobalAction::Back => kb.back.display(),
        }
    }

    #[must_use]
    pub fn display_nav(&self, action: NavAction) -> String {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.display(),
            NavAction::Down => kb.down.display(),
            NavAction::Left => kb.left.display(),
            NavAction::Right => kb.right.display(),
            NavAction::PageUp => kb.page_up.display(),
            NavAction::PageDown => kb.page_down.display(),
            NavAction::First => kb.first.display(),
            NavAction::Last => kb.last.display(),
            NavAction::Select => kb.select.display(),
        }
    }

    #[must_use]
    pub fn display_search(&self, action: SearchAction) -> String {
        let kb = &self.keybindings.search;
        match action {
            SearchAction::Toggle => kb.toggle.display(),
            SearchAction::Exit => kb.exit.display(),
        }
    }

    #[must_use]
    pub fn display_goods(&self, action: GoodsAction) -> String {
        let kb = &self.keybindings.goods;
        match action {
            GoodsAction::PrevTheme => kb.prev_theme.display(),
            GoodsAction::NextTheme => kb.next_theme.display(),
            GoodsAction::Reload => kb.reload.display(),
            GoodsAction::Copy => kb.copy.display(),
        }
    }

    #[must_use]
    pub fn display_themes(&self, action: ThemesAction) -> String {
        let kb = &self.keybindings.themes;
        match action {
            ThemesAction::Reload => kb.reload.display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn resolver() -> KeyResolver {
        KeyResolver::new(Arc::new(KeybindingsConfig::default()))
    }

    #[test]
    fn resolves_default_global_actions() {
        let resolver = resolver();
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(resolver.matches_global(&q), Some(GlobalAction::Quit));
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(resolver.matches_global(&esc), Some(GlobalAction::Back));
    }

    #[test]
    fn unbound_keys_resolve_to_none() {
        let resolver = resolver();
        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(resolver.matches_global(&x), None);
        assert_eq!(resolver.matches_goods(&x), None);
    }
}
