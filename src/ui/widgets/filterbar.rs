//! Filter input bar

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Filter text being edited; submitted to the table as a whole
pub struct FilterBar {
    pub query: String,
    pub active: bool,
    /// Cursor position in chars, not bytes
    cursor: usize,
}

impl FilterBar {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            active: false,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.cursor = self.query.chars().count();
    }

    /// Stop editing and hand back the text to submit
    pub fn submit(&mut self) -> String {
        self.active = false;
        self.query.clone()
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
        self.active = false;
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_pos)
            .map_or(self.query.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.query.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.query.chars().count() {
            let at = self.byte_index(self.cursor);
            self.query.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.query.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.query.chars().count();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, style: Style, focused_style: Style) {
        let border_style = if self.active { focused_style } else { style };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Filter (/ to edit, Enter to apply, Esc to clear) ");

        let display_text = if self.query.is_empty() && !self.active {
            "Type / to filter..."
        } else {
            self.query.as_str()
        };

        frame.render_widget(Paragraph::new(display_text).block(block).style(style), area);

        if self.active {
            frame.set_cursor_position((area.x + 1 + self.cursor as u16, area.y + 1));
        }
    }
}

impl Default for FilterBar {
    fn default() -> Self {
        Self::new()
    }
}
