//! Header and cell element construction
//!
//! The renderer owns every element it asks the backend to create. Each
//! rebuild discards the previous generation wholesale before creating the
//! next one. Generations are numbered across header and rows together and
//! backends echo the number back in pointer events, so an event aimed at a
//! discarded element is dropped even when the backend has reissued its
//! handle to a newer element.

use std::collections::HashMap;

use serde_json::Value;

use crate::app::router::TableEvent;
use crate::app::view_state::SortSpec;
use crate::error::BackendRenderError;
use crate::models::{style_keys, Alignment, Row, StyleConfig};
use crate::ui::backend::{Binding, ElementHandle, ElementSpec, ElementTag, RenderBackend};

/// One live element of the current generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedElement {
    pub handle: ElementHandle,
    pub tag: ElementTag,
    pub generation: u64,
}

impl RenderedElement {
    /// Headers only react to clicks; cells react to clicks and hover
    pub fn accepts(&self, binding: Binding) -> bool {
        match self.tag {
            ElementTag::Header { .. } => binding == Binding::Click,
            ElementTag::Cell { .. } => true,
        }
    }

    /// Pointer event aimed at this element
    pub fn pointer(&self, binding: Binding) -> TableEvent {
        TableEvent::Pointer {
            target: self.handle,
            generation: self.generation,
            binding,
        }
    }
}

#[derive(Debug, Default)]
struct Arena {
    generation: u64,
    elements: Vec<RenderedElement>,
    index: HashMap<ElementHandle, usize>,
    /// Handles the backend failed to destroy, retried on the next discard
    orphans: Vec<ElementHandle>,
}

impl Arena {
    /// Destroy every element of the current generation
    fn discard<B: RenderBackend>(&mut self, backend: &mut B) -> Result<(), BackendRenderError> {
        let mut doomed = std::mem::take(&mut self.orphans);
        doomed.extend(self.elements.drain(..).map(|e| e.handle));
        self.index.clear();

        let mut first_err = None;
        for handle in doomed {
            if let Err(e) = backend.destroy_element(handle) {
                tracing::warn!(handle = handle.0, "failed to destroy element: {}", e);
                self.orphans.push(handle);
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Replace the current generation with elements built from `specs`.
    ///
    /// On failure the partially built generation is torn down and the
    /// arena is left empty.
    fn rebuild<'a, B, I>(
        &mut self,
        generation: u64,
        specs: I,
        style: &StyleConfig,
        backend: &mut B,
    ) -> Result<(), BackendRenderError>
    where
        B: RenderBackend,
        I: IntoIterator<Item = ElementSpec<'a>>,
    {
        self.discard(backend)?;
        self.generation = generation;

        for spec in specs {
            match backend.create_element(&spec, style) {
                Ok(handle) => {
                    self.index.insert(handle, self.elements.len());
                    self.elements.push(RenderedElement {
                        handle,
                        tag: spec.tag,
                        generation,
                    });
                }
                Err(e) => {
                    tracing::warn!(generation, "element creation failed: {}", e);
                    if let Err(cleanup) = self.discard(backend) {
                        tracing::warn!("cleanup after failed rebuild also failed: {}", cleanup);
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn get(&self, handle: ElementHandle) -> Option<&RenderedElement> {
        self.index.get(&handle).map(|&i| &self.elements[i])
    }
}

#[derive(Debug, Default)]
pub struct Renderer {
    /// Last generation number handed out, shared by both arenas
    generation: u64,
    header: Arena,
    rows: Arena,
    hovered_row: Option<usize>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn render_header<B: RenderBackend>(
        &mut self,
        columns: &[String],
        sort: SortSpec,
        style: &StyleConfig,
        backend: &mut B,
    ) -> Result<(), BackendRenderError> {
        let generation = self.next_generation();
        let background = style.get(style_keys::HEADER_BACKGROUND);
        let foreground = style.get(style_keys::HEADER_FOREGROUND);

        let specs = columns.iter().enumerate().map(|(column, label)| {
            let text = if sort.column == Some(column) {
                format!("{} {}", label, style.sort_glyph(sort.ascending))
            } else {
                label.clone()
            };
            ElementSpec {
                tag: ElementTag::Header { column },
                generation,
                text,
                align: Alignment::Center,
                background,
                foreground,
                bold: true,
            }
        });

        self.header.rebuild(generation, specs, style, backend)?;
        tracing::debug!(
            generation = self.header.generation,
            elements = self.header.elements.len(),
            "header rebuilt"
        );
        Ok(())
    }

    pub fn render_rows<'r, B, I>(
        &mut self,
        view: I,
        style: &StyleConfig,
        backend: &mut B,
    ) -> Result<(), BackendRenderError>
    where
        B: RenderBackend,
        I: IntoIterator<Item = &'r Row>,
    {
        self.hovered_row = None;
        let generation = self.next_generation();

        let specs = view.into_iter().enumerate().flat_map(|(row, data)| {
            let background = style.row_background(row);
            data.cells()
                .iter()
                .enumerate()
                .map(move |(column, cell)| ElementSpec {
                    tag: ElementTag::Cell { row, column },
                    generation,
                    text: cell.display_text(),
                    align: cell.alignment(),
                    background,
                    foreground: None,
                    bold: false,
                })
        });

        self.rows.rebuild(generation, specs, style, backend)?;
        tracing::debug!(
            generation = self.rows.generation,
            elements = self.rows.elements.len(),
            "rows rebuilt"
        );
        Ok(())
    }

    /// Resolve a handle to a live element
    pub fn lookup(&self, handle: ElementHandle) -> Option<&RenderedElement> {
        self.header.get(handle).or_else(|| self.rows.get(handle))
    }

    /// Resolve a handle only if it still belongs to `generation`
    pub fn lookup_current(&self, handle: ElementHandle, generation: u64) -> Option<&RenderedElement> {
        self.lookup(handle).filter(|e| e.generation == generation)
    }

    /// Handles the backend has so far refused to destroy
    pub fn orphan_count(&self) -> usize {
        self.header.orphans.len() + self.rows.orphans.len()
    }

    pub fn header_elements(&self) -> &[RenderedElement] {
        &self.header.elements
    }

    pub fn cell_elements(&self) -> &[RenderedElement] {
        &self.rows.elements
    }

    pub fn rows_generation(&self) -> u64 {
        self.rows.generation
    }

    pub fn hovered_row(&self) -> Option<usize> {
        self.hovered_row
    }

    /// Highlight or restore one row.
    ///
    /// Colors are set absolutely, so repeated or out-of-order enter/leave
    /// pairs never leave a stale highlight behind. Entering a row while
    /// another one is highlighted restores the other one first.
    pub fn set_row_hover<B: RenderBackend>(
        &mut self,
        row: usize,
        entering: bool,
        style: &StyleConfig,
        backend: &mut B,
    ) -> Result<(), BackendRenderError> {
        if entering {
            if let Some(previous) = self.hovered_row.filter(|&r| r != row) {
                self.paint_row(previous, style.row_background(previous), backend)?;
            }
            self.paint_row(row, style.hover_background(), backend)?;
            self.hovered_row = Some(row);
        } else {
            self.paint_row(row, style.row_background(row), backend)?;
            if self.hovered_row == Some(row) {
                self.hovered_row = None;
            }
        }
        Ok(())
    }

    fn paint_row<B: RenderBackend>(
        &self,
        row: usize,
        color: Option<&Value>,
        backend: &mut B,
    ) -> Result<(), BackendRenderError> {
        for element in self.rows.elements.iter().filter(|e| e.tag.row() == Some(row)) {
            backend.set_background(element.handle, color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;
    use crate::ui::backend::TerminalBackend;
    use crate::ui::viewport::ViewportState;

    /// Backend that fails after a fixed number of creations, or refuses
    /// to destroy one handle once
    struct FlakyBackend {
        inner: TerminalBackend,
        creations_left: usize,
        refuse_destroy: Option<ElementHandle>,
    }

    impl RenderBackend for FlakyBackend {
        fn create_element(
            &mut self,
            spec: &ElementSpec<'_>,
            style: &StyleConfig,
        ) -> Result<ElementHandle, BackendRenderError> {
            if self.creations_left == 0 {
                return Err(BackendRenderError::new("create element", "out of widgets"));
            }
            self.creations_left -= 1;
            self.inner.create_element(spec, style)
        }

        fn destroy_element(&mut self, handle: ElementHandle) -> Result<(), BackendRenderError> {
            if self.refuse_destroy == Some(handle) {
                self.refuse_destroy = None;
                return Err(BackendRenderError::new("destroy element", "busy"));
            }
            self.inner.destroy_element(handle)
        }

        fn set_background(
            &mut self,
            handle: ElementHandle,
            color: Option<&Value>,
        ) -> Result<(), BackendRenderError> {
            self.inner.set_background(handle, color)
        }

        fn content_height(&self) -> u32 {
            self.inner.content_height()
        }

        fn row_extent(&self) -> u32 {
            1
        }

        fn update_viewport(&mut self, viewport: &ViewportState) -> Result<(), BackendRenderError> {
            self.inner.update_viewport(viewport)
        }
    }

    fn columns() -> Vec<String> {
        vec!["ID".into(), "Name".into()]
    }

    #[test]
    fn test_header_marks_sorted_column() {
        let mut backend = TerminalBackend::new();
        let mut renderer = Renderer::new();
        let style = StyleConfig::default();
        let sort = SortSpec { column: Some(1), ascending: false };

        renderer.render_header(&columns(), sort, &style, &mut backend).unwrap();

        let texts: Vec<_> = renderer
            .header_elements()
            .iter()
            .map(|e| backend.element(e.handle).unwrap().text.clone())
            .collect();
        assert_eq!(texts, vec!["ID", "Name ▼"]);
    }

    #[test]
    fn test_rebuild_discards_previous_generation() {
        let mut backend = TerminalBackend::new();
        let mut renderer = Renderer::new();
        let style = StyleConfig::default();
        let rows = vec![row![1, "Bob"], row![2, "ann"]];

        renderer.render_rows(&rows, &style, &mut backend).unwrap();
        let stale = renderer.cell_elements()[0].handle;
        assert_eq!(backend.element_count(), 4);

        renderer.render_rows(&rows[..1], &style, &mut backend).unwrap();
        assert_eq!(backend.element_count(), 2);
        assert!(renderer.lookup(stale).is_none());
        assert!(backend.element(stale).is_none());
        assert!(renderer
            .cell_elements()
            .iter()
            .all(|e| e.generation == renderer.rows_generation()));
    }

    #[test]
    fn test_failed_rebuild_leaves_nothing_behind() {
        let mut backend = FlakyBackend {
            inner: TerminalBackend::new(),
            creations_left: 3,
            refuse_destroy: None,
        };
        let mut renderer = Renderer::new();
        let style = StyleConfig::default();
        let rows = vec![row![1, "Bob"], row![2, "ann"]];

        let err = renderer.render_rows(&rows, &style, &mut backend).unwrap_err();
        assert_eq!(err.op, "create element");
        assert!(renderer.cell_elements().is_empty());
        assert_eq!(backend.inner.element_count(), 0);
    }

    #[test]
    fn test_undestroyed_elements_are_retried() {
        let mut backend = FlakyBackend {
            inner: TerminalBackend::new(),
            creations_left: usize::MAX,
            refuse_destroy: None,
        };
        let mut renderer = Renderer::new();
        let style = StyleConfig::default();
        let rows = vec![row![1, "Bob"], row![2, "ann"]];
        renderer.render_rows(&rows, &style, &mut backend).unwrap();

        let stuck = renderer.cell_elements()[1].handle;
        backend.refuse_destroy = Some(stuck);
        let err = renderer.render_rows(&rows, &style, &mut backend).unwrap_err();
        assert_eq!(err.op, "destroy element");
        assert_eq!(renderer.orphan_count(), 1);
        assert!(backend.inner.element(stuck).is_some());

        renderer.render_rows(&rows, &style, &mut backend).unwrap();
        assert_eq!(renderer.orphan_count(), 0);
        assert!(backend.inner.element(stuck).is_none());
        assert_eq!(backend.inner.element_count(), 4);
    }

    #[test]
    fn test_hover_enter_leave_restores_parity() {
        let mut backend = TerminalBackend::new();
        let mut renderer = Renderer::new();
        let style = StyleConfig::default();
        let rows = vec![row![1, "Bob"], row![2, "ann"]];
        renderer.render_rows(&rows, &style, &mut backend).unwrap();

        let before: Vec<_> = renderer
            .cell_elements()
            .iter()
            .map(|e| backend.element(e.handle).unwrap().background)
            .collect();

        renderer.set_row_hover(1, true, &style, &mut backend).unwrap();
        renderer.set_row_hover(1, false, &style, &mut backend).unwrap();
        renderer.set_row_hover(1, false, &style, &mut backend).unwrap();

        let after: Vec<_> = renderer
            .cell_elements()
            .iter()
            .map(|e| backend.element(e.handle).unwrap().background)
            .collect();
        assert_eq!(before, after);
        assert_eq!(renderer.hovered_row(), None);
    }

    #[test]
    fn test_entering_new_row_restores_previous() {
        let mut backend = TerminalBackend::new();
        let mut renderer = Renderer::new();
        let style = StyleConfig::default();
        let rows = vec![row![1, "Bob"], row![2, "ann"]];
        renderer.render_rows(&rows, &style, &mut backend).unwrap();

        renderer.set_row_hover(0, true, &style, &mut backend).unwrap();
        renderer.set_row_hover(1, true, &style, &mut backend).unwrap();

        let even = TerminalBackend::parse_color(style.row_background(0));
        let hover = TerminalBackend::parse_color(style.hover_background());
        for element in renderer.cell_elements() {
            let bg = backend.element(element.handle).unwrap().background;
            match element.tag.row() {
                Some(0) => assert_eq!(bg, even),
                Some(1) => assert_eq!(bg, hover),
                _ => unreachable!(),
            }
        }
        assert_eq!(renderer.hovered_row(), Some(1));
    }
}
