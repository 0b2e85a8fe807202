use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

use super::{Key, KeyBinding};

fn ch(c: char) -> KeyBinding {
    KeyBinding::Single(Key::from_char(c))
}

fn named(code: KeyCode) -> KeyBinding {
    KeyBinding::Single(Key::new(code, KeyModifiers::NONE))
}

fn either(a: char, b: KeyCode) -> KeyBinding {
    KeyBinding::Multiple(vec![Key::from_char(a), Key::new(b, KeyModifiers::NONE)])
}

/// All configurable keybindings, grouped by scope.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub navigation: NavigationKeybindings,
    pub search: SearchKeybindings,
    pub goods: GoodsKeybindings,
    pub themes: ThemesKeybindings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub back: KeyBinding,
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: ch('q'),
            help: ch('?'),
            back: named(KeyCode::Esc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub left: KeyBinding,
    pub right: KeyBinding,
    pub page_up: KeyBinding,
    pub page_down: KeyBinding,
    pub first: KeyBinding,
    pub last: KeyBinding,
    pub select: KeyBinding,
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: either('k', KeyCode::Up),
            down: either('j', KeyCode::Down),
            left: either('h', KeyCode::Left),
            right: either('l', KeyCode::Right),
            page_up: named(KeyCode::PageUp),
            page_down: named(KeyCode::PageDown),
            first: either('g', KeyCode::Home),
            last: either('G', KeyCode::End),
            select: named(KeyCode::Enter),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchKeybindings {
    pub toggle: KeyBinding,
    pub exit: KeyBinding,
}

impl Default for SearchKeybindings {
    fn default() -> Self {
        Self {
            toggle: ch('/'),
            exit: named(KeyCode::Esc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoodsKeybindings {
    pub prev_theme: KeyBinding,
    pub next_theme: KeyBinding,
    pub reload: KeyBinding,
    pub copy: KeyBinding,
}

impl Default for GoodsKeybindings {
    fn default() -> Self {
        Self {
            prev_theme: ch('['),
            next_theme: ch(']'),
            reload: ch('r'),
            copy: ch('y'),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemesKeybindings {
    pub reload: KeyBinding,
}

impl Default for ThemesKeybindings {
    fn default() -> Self {
        Self { reload: ch('r') }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_vim_and_arrow_navigation() {
        use crossterm::event::KeyEvent;

        let nav = NavigationKeybindings::default();
        let j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert!(nav.down.matches(&j));
        assert!(nav.down.matches(&down));
    }

    #[test]
    fn config_overrides_merge_with_defaults() {
        let config: KeybindingsConfig = toml::from_str(
            r#"
            [goods]
            reload = "f5"
            "#,
        )
        .unwrap();
        assert_eq!(config.goods.reload.display(), "f5");
        assert_eq!(config.goods.copy.display(), "y");
        assert_eq!(config.global.quit.display(), "q");
    }
}
