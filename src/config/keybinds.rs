//! Keyboard shortcut definitions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::actions::UserAction;
use crate::app::events::{is_quit, scroll_delta, sort_column};

/// Keyboard shortcut configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    // Global
    pub help: KeyBind,
    pub refresh: KeyBind,

    // Filter
    pub filter: KeyBind,
    pub clear_filter: KeyBind,

    // Table actions
    pub add_row: KeyBind,
    pub swap_style: KeyBind,
    pub clear: KeyBind,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            help: KeyBind::new(KeyCode::Char('?'), KeyModifiers::NONE),
            refresh: KeyBind::new(KeyCode::Char('r'), KeyModifiers::NONE),

            filter: KeyBind::new(KeyCode::Char('/'), KeyModifiers::NONE),
            clear_filter: KeyBind::new(KeyCode::Esc, KeyModifiers::NONE),

            add_row: KeyBind::new(KeyCode::Char('a'), KeyModifiers::NONE),
            swap_style: KeyBind::new(KeyCode::Char('s'), KeyModifiers::NONE),
            clear: KeyBind::new(KeyCode::Char('c'), KeyModifiers::NONE),
        }
    }
}

impl KeyBindings {
    /// Map a key press in normal (non-editing) mode to an action
    pub fn action_for(&self, key: &KeyEvent) -> Option<UserAction> {
        let (code, modifiers) = (key.code, key.modifiers);

        if is_quit(key) {
            Some(UserAction::Quit)
        } else if self.help.matches(code, modifiers) {
            Some(UserAction::Help)
        } else if self.refresh.matches(code, modifiers) {
            Some(UserAction::Refresh)
        } else if self.filter.matches(code, modifiers) {
            Some(UserAction::OpenFilter)
        } else if self.clear_filter.matches(code, modifiers) {
            Some(UserAction::ClearFilter)
        } else if self.add_row.matches(code, modifiers) {
            Some(UserAction::AddRow)
        } else if self.swap_style.matches(code, modifiers) {
            Some(UserAction::SwapStyle)
        } else if self.clear.matches(code, modifiers) {
            Some(UserAction::Clear)
        } else if let Some(column) = sort_column(key) {
            Some(UserAction::SortColumn(column))
        } else {
            scroll_delta(key).map(UserAction::Scroll)
        }
    }
}

/// A single key binding
#[derive(Debug, Clone)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.code == code && self.modifiers == modifiers
    }
}
