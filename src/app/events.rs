//! Input event handling

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::time::Duration;

/// Application input events
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize(u16, u16),
}

/// Event handler for terminal input
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event
    pub fn next(&self) -> Option<AppEvent> {
        if event::poll(self.tick_rate).ok()? {
            match event::read().ok()? {
                Event::Key(key) => Some(AppEvent::Key(key)),
                Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
                Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                _ => None,
            }
        } else {
            Some(AppEvent::Tick)
        }
    }
}

/// Check if this is a quit key combination
pub fn is_quit(event: &KeyEvent) -> bool {
    matches!(
        (event.code, event.modifiers),
        (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
    )
}

/// Check for scroll keys (returns wheel notches, positive = down)
pub fn scroll_delta(event: &KeyEvent) -> Option<i32> {
    match (event.code, event.modifiers) {
        // Arrow keys (primary)
        (KeyCode::Up, KeyModifiers::NONE) => Some(-1),
        (KeyCode::Down, KeyModifiers::NONE) => Some(1),
        (KeyCode::PageUp, KeyModifiers::NONE) => Some(-5),
        (KeyCode::PageDown, KeyModifiers::NONE) => Some(5),
        (KeyCode::Home, KeyModifiers::NONE) => Some(i32::MIN),
        (KeyCode::End, KeyModifiers::NONE) => Some(i32::MAX),

        // Vi-style (alternative)
        (KeyCode::Char('k'), KeyModifiers::NONE) => Some(-1),
        (KeyCode::Char('j'), KeyModifiers::NONE) => Some(1),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(-5),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Some(5),

        _ => None,
    }
}

/// Digit keys 1-9 pick a sort column
pub fn sort_column(event: &KeyEvent) -> Option<usize> {
    match (event.code, event.modifiers) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_sort_column_digits() {
        assert_eq!(sort_column(&key(KeyCode::Char('1'), KeyModifiers::NONE)), Some(0));
        assert_eq!(sort_column(&key(KeyCode::Char('9'), KeyModifiers::NONE)), Some(8));
        assert_eq!(sort_column(&key(KeyCode::Char('0'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_scroll_delta() {
        assert_eq!(scroll_delta(&key(KeyCode::Down, KeyModifiers::NONE)), Some(1));
        assert_eq!(scroll_delta(&key(KeyCode::Char('u'), KeyModifiers::CONTROL)), Some(-5));
        assert_eq!(scroll_delta(&key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }
}
