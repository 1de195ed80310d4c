//! Sortable and filterable table widget
//!
//! `DataTable` is what the host embeds. Every mutation re-derives the view,
//! rebuilds all header and cell elements, then re-checks the viewport.

use std::fmt;
use std::time::Instant;

use crate::app::router::{Command, InteractionRouter, TableEvent};
use crate::app::view_state::{FilterSpec, SortSpec, ViewState};
use crate::error::Result;
use crate::models::{Row, StyleConfig};
use crate::ui::backend::RenderBackend;
use crate::ui::renderer::Renderer;
use crate::ui::viewport::{ViewportConfig, ViewportController, ViewportState};

/// Host callback receiving the selected row and its position in the view
pub type RowSelectedCallback = Box<dyn FnMut(&Row, usize)>;

pub struct DataTableBuilder {
    columns: Vec<String>,
    data: Vec<Row>,
    style: StyleConfig,
    on_row_selected: Option<RowSelectedCallback>,
    viewport: ViewportConfig,
    container: (u32, u32),
}

impl DataTableBuilder {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            data: Vec::new(),
            style: StyleConfig::default(),
            on_row_selected: None,
            viewport: ViewportConfig::default(),
            container: (0, 0),
        }
    }

    pub fn data(mut self, rows: Vec<Row>) -> Self {
        self.data = rows;
        self
    }

    /// Overrides merged over the default style
    pub fn style(mut self, overrides: StyleConfig) -> Self {
        self.style.merge(&overrides);
        self
    }

    pub fn on_row_selected(mut self, callback: impl FnMut(&Row, usize) + 'static) -> Self {
        self.on_row_selected = Some(Box::new(callback));
        self
    }

    pub fn viewport(mut self, config: ViewportConfig) -> Self {
        self.viewport = config;
        self
    }

    /// Initial container size, before the first resize event arrives
    pub fn container_size(mut self, width: u32, height: u32) -> Self {
        self.container = (width, height);
        self
    }

    pub fn build<B: RenderBackend>(self, backend: B) -> Result<DataTable<B>> {
        let state = ViewState::new(self.columns, self.data)?;
        let mut viewport = ViewportController::new(self.viewport);
        viewport.set_container(self.container.0, self.container.1);

        let mut table = DataTable {
            state,
            renderer: Renderer::new(),
            viewport,
            backend,
            style: self.style,
            on_row_selected: self.on_row_selected,
        };
        table.refresh()?;
        Ok(table)
    }
}

pub struct DataTable<B: RenderBackend> {
    state: ViewState,
    renderer: Renderer,
    viewport: ViewportController,
    backend: B,
    style: StyleConfig,
    on_row_selected: Option<RowSelectedCallback>,
}

impl<B: RenderBackend> DataTable<B> {
    pub fn columns(&self) -> &[String] {
        self.state.columns()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn viewport(&self) -> &ViewportState {
        self.viewport.state()
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.state.sort_spec()
    }

    pub fn filter_spec(&self) -> &FilterSpec {
        self.state.filter_spec()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn append_row(&mut self, row: Row) -> Result<()> {
        self.state.append_row(row)?;
        self.refresh()
    }

    pub fn set_source(&mut self, rows: Vec<Row>) -> Result<()> {
        self.state.set_source(rows)?;
        self.refresh()
    }

    pub fn set_filter(&mut self, text: &str) -> Result<()> {
        self.state.set_filter(text);
        self.refresh()
    }

    pub fn clear_filter(&mut self) -> Result<()> {
        self.state.clear_filter();
        self.refresh()
    }

    /// Sort by `column`, flipping direction if it is already the sort column
    pub fn set_sort(&mut self, column: usize) -> Result<()> {
        self.state.set_sort(column)?;
        self.refresh()
    }

    /// Merge `partial` into the current style and redraw; data is untouched
    pub fn set_style(&mut self, partial: &StyleConfig) -> Result<()> {
        self.style.merge(partial);
        self.refresh()
    }

    /// Rebuild every element from the current view
    pub fn refresh(&mut self) -> Result<()> {
        self.renderer.render_header(
            self.state.columns(),
            self.state.sort_spec(),
            &self.style,
            &mut self.backend,
        )?;
        self.renderer
            .render_rows(self.state.view_rows(), &self.style, &mut self.backend)?;

        let container = self.viewport.state().container_height;
        self.viewport
            .on_content_resize(self.backend.content_height(), container);
        self.backend.update_viewport(self.viewport.state())?;
        Ok(())
    }

    /// Route one input event; returns whether it had any effect
    pub fn handle_event(&mut self, event: TableEvent, now: Instant) -> Result<bool> {
        match InteractionRouter::route(event, &self.renderer) {
            Some(command) => self.apply(command, now),
            None => Ok(false),
        }
    }

    /// Run deferred work that has come due; call from the host's tick
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        if !self.viewport.poll(now) {
            return Ok(false);
        }
        self.backend.update_viewport(self.viewport.state())?;
        Ok(true)
    }

    fn apply(&mut self, command: Command, now: Instant) -> Result<bool> {
        match command {
            Command::Sort(column) => self.set_sort(column)?,
            Command::Filter(text) => self.set_filter(&text)?,
            Command::Select { row, .. } => {
                let Some(selected) = self.state.view_row(row) else {
                    return Ok(false);
                };
                tracing::debug!(row, "row selected");
                if let Some(callback) = self.on_row_selected.as_mut() {
                    callback(selected, row);
                }
            }
            Command::Hover { row, entering } => {
                self.renderer
                    .set_row_hover(row, entering, &self.style, &mut self.backend)?;
            }
            Command::Scroll(notches) => {
                if !self.viewport.on_wheel(notches, self.backend.row_extent()) {
                    return Ok(false);
                }
                self.backend.update_viewport(self.viewport.state())?;
            }
            Command::Resize { width, height } => {
                self.viewport.on_container_resize(width, height, now);
                self.backend.update_viewport(self.viewport.state())?;
            }
        }
        Ok(true)
    }
}

impl<B: RenderBackend + fmt::Debug> fmt::Debug for DataTable<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("state", &self.state)
            .field("renderer", &self.renderer)
            .field("viewport", &self.viewport)
            .field("backend", &self.backend)
            .field("style", &self.style)
            .field("on_row_selected", &self.on_row_selected.is_some())
            .finish()
    }
}
