//! Retained-mode terminal backend drawn with ratatui
//!
//! Elements live in a scene keyed by handle. `draw` lays the scene out as
//! a sticky header line above a scrolling grid of one-line rows with
//! uniform column widths, and records where each element landed so mouse
//! positions can be mapped back to handles.

use std::collections::BTreeMap;
use std::str::FromStr;

use ratatui::{
    layout::{Alignment as TextAlignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use serde_json::Value;

use super::{Binding, ElementHandle, ElementSpec, ElementTag, RenderBackend};
use crate::app::router::TableEvent;
use crate::error::BackendRenderError;
use crate::models::{style_keys, Alignment, StyleConfig};
use crate::ui::viewport::ViewportState;

/// One element as the terminal backend keeps it
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    pub tag: ElementTag,
    pub generation: u64,
    pub text: String,
    pub align: Alignment,
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub bold: bool,
    /// Horizontal padding in terminal columns
    pub padding: u16,
}

#[derive(Debug, Default)]
pub struct TerminalBackend {
    next_handle: u64,
    elements: BTreeMap<ElementHandle, SceneElement>,
    viewport: ViewportState,
    hit_map: Vec<(Rect, ElementHandle)>,
    /// Cell under the pointer and its generation
    pointer_target: Option<(ElementHandle, u64)>,
}

impl TerminalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an opaque style value into a terminal color.
    ///
    /// Accepts color names and `#rrggbb`; anything else is ignored.
    pub fn parse_color(value: Option<&Value>) -> Option<Color> {
        value.and_then(Value::as_str).and_then(|s| Color::from_str(s).ok())
    }

    pub fn element(&self, handle: ElementHandle) -> Option<&SceneElement> {
        self.elements.get(&handle)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Area left for rows once the header line is taken
    pub fn body_area(area: Rect) -> Rect {
        Rect {
            y: area.y.saturating_add(1),
            height: area.height.saturating_sub(1),
            ..area
        }
    }

    pub fn element_at(&self, x: u16, y: u16) -> Option<ElementHandle> {
        let pos = Position::new(x, y);
        self.hit_map
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, handle)| *handle)
    }

    fn pointer(&self, target: ElementHandle, binding: Binding) -> Option<TableEvent> {
        self.elements.get(&target).map(|e| TableEvent::Pointer {
            target,
            generation: e.generation,
            binding,
        })
    }

    pub fn click_at(&self, x: u16, y: u16) -> Option<TableEvent> {
        self.element_at(x, y)
            .and_then(|target| self.pointer(target, Binding::Click))
    }

    /// Synthesize leave/enter events as the pointer crosses cells
    pub fn pointer_moved(&mut self, x: u16, y: u16) -> Vec<TableEvent> {
        let target = self.element_at(x, y).and_then(|h| match self.elements.get(&h) {
            Some(e) if e.tag.row().is_some() => Some((h, e.generation)),
            _ => None,
        });
        if target == self.pointer_target {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some((previous, generation)) = self.pointer_target.take() {
            events.push(TableEvent::Pointer {
                target: previous,
                generation,
                binding: Binding::Leave,
            });
        }
        if let Some((target, generation)) = target {
            events.push(TableEvent::Pointer {
                target,
                generation,
                binding: Binding::Enter,
            });
        }
        self.pointer_target = target;
        events
    }

    fn column_count(&self) -> usize {
        self.elements
            .values()
            .map(|e| e.tag.column() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        self.hit_map.clear();
        let columns = self.column_count();
        if columns == 0 || area.height == 0 {
            return;
        }

        // Keep the header aligned with the body when the scrollbar takes a column
        let scrollbar_width = u16::from(self.viewport.scrollbar_visible);
        let grid_width = area.width.saturating_sub(scrollbar_width);
        let grid = Rect { width: grid_width, height: 1, ..area };
        let column_rects = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(grid);

        let body = Self::body_area(area);
        let first = self.viewport.first_visible_unit() as usize;
        let visible = body.height as usize;

        for (&handle, element) in &self.elements {
            let y = match element.tag {
                ElementTag::Header { .. } => area.y,
                ElementTag::Cell { row, .. } => {
                    if row < first || row >= first + visible {
                        continue;
                    }
                    body.y + (row - first) as u16
                }
            };
            let rect = Rect {
                y,
                ..column_rects[element.tag.column()]
            };
            render_element(frame, rect, element);
            self.hit_map.push((rect, handle));
        }

        if self.viewport.scrollbar_visible {
            let mut state = ScrollbarState::new(self.viewport.overflow() as usize)
                .position(first)
                .viewport_content_length(visible);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                body,
                &mut state,
            );
        }
    }
}

fn render_element(frame: &mut Frame, rect: Rect, element: &SceneElement) {
    let mut style = Style::default();
    if let Some(bg) = element.background {
        style = style.bg(bg);
    }
    if let Some(fg) = element.foreground {
        style = style.fg(fg);
    }
    if element.bold {
        style = style.add_modifier(Modifier::BOLD);
    }

    frame.render_widget(Block::default().style(style), rect);

    let inner = if rect.width > element.padding * 2 {
        Rect {
            x: rect.x + element.padding,
            width: rect.width - element.padding * 2,
            ..rect
        }
    } else {
        rect
    };
    let alignment = match element.align {
        Alignment::Leading => TextAlignment::Left,
        Alignment::Center => TextAlignment::Center,
        Alignment::Trailing => TextAlignment::Right,
    };
    frame.render_widget(
        Paragraph::new(element.text.as_str())
            .style(style)
            .alignment(alignment),
        inner,
    );
}

impl RenderBackend for TerminalBackend {
    fn create_element(
        &mut self,
        spec: &ElementSpec<'_>,
        style: &StyleConfig,
    ) -> Result<ElementHandle, BackendRenderError> {
        // Pixel padding from desktop styles maps to at most a couple of columns
        let padding = style
            .get_u64(style_keys::CELL_PADDING)
            .map_or(1, |px| px.div_ceil(5).min(2) as u16);

        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        self.elements.insert(
            handle,
            SceneElement {
                tag: spec.tag,
                generation: spec.generation,
                text: spec.text.clone(),
                align: spec.align,
                background: Self::parse_color(spec.background),
                foreground: Self::parse_color(spec.foreground),
                bold: spec.bold,
                padding,
            },
        );
        Ok(handle)
    }

    fn destroy_element(&mut self, handle: ElementHandle) -> Result<(), BackendRenderError> {
        if matches!(self.pointer_target, Some((h, _)) if h == handle) {
            self.pointer_target = None;
        }
        self.hit_map.retain(|(_, h)| *h != handle);
        self.elements
            .remove(&handle)
            .map(|_| ())
            .ok_or_else(|| BackendRenderError::new("destroy element", format!("unknown handle {}", handle.0)))
    }

    fn set_background(
        &mut self,
        handle: ElementHandle,
        color: Option<&Value>,
    ) -> Result<(), BackendRenderError> {
        let element = self.elements.get_mut(&handle).ok_or_else(|| {
            BackendRenderError::new("set background", format!("unknown handle {}", handle.0))
        })?;
        element.background = Self::parse_color(color);
        Ok(())
    }

    fn content_height(&self) -> u32 {
        self.elements
            .values()
            .filter_map(|e| e.tag.row())
            .map(|row| row as u32 + 1)
            .max()
            .unwrap_or(0)
    }

    fn row_extent(&self) -> u32 {
        1
    }

    fn update_viewport(&mut self, viewport: &ViewportState) -> Result<(), BackendRenderError> {
        self.viewport = *viewport;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cell(row: usize, column: usize, text: &str) -> ElementSpec<'static> {
        ElementSpec {
            tag: ElementTag::Cell { row, column },
            generation: 1,
            text: text.to_string(),
            align: Alignment::Leading,
            background: None,
            foreground: None,
            bold: false,
        }
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(
            TerminalBackend::parse_color(Some(&json!("#2c3e50"))),
            Some(Color::Rgb(0x2c, 0x3e, 0x50))
        );
        assert_eq!(TerminalBackend::parse_color(Some(&json!("white"))), Some(Color::White));
        assert_eq!(TerminalBackend::parse_color(Some(&json!(12.5))), None);
        assert_eq!(TerminalBackend::parse_color(None), None);
    }

    #[test]
    fn test_content_height_counts_rows() {
        let mut backend = TerminalBackend::new();
        let style = StyleConfig::default();
        assert_eq!(backend.content_height(), 0);
        for row in 0..3 {
            for column in 0..2 {
                backend.create_element(&cell(row, column, "x"), &style).unwrap();
            }
        }
        assert_eq!(backend.content_height(), 3);
    }

    #[test]
    fn test_destroy_unknown_handle_fails() {
        let mut backend = TerminalBackend::new();
        let err = backend.destroy_element(ElementHandle(42)).unwrap_err();
        assert_eq!(err.op, "destroy element");
    }

    #[test]
    fn test_cell_padding_maps_to_columns() {
        let mut backend = TerminalBackend::new();
        let wide = StyleConfig::default().with(style_keys::CELL_PADDING, 7);
        let none = StyleConfig::default().with(style_keys::CELL_PADDING, 0);
        let a = backend.create_element(&cell(0, 0, "a"), &wide).unwrap();
        let b = backend.create_element(&cell(0, 1, "b"), &none).unwrap();
        assert_eq!(backend.element(a).unwrap().padding, 2);
        assert_eq!(backend.element(b).unwrap().padding, 0);
    }
}
