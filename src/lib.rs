//! Sortable, filterable, scrollable data table widget.
//!
//! [`DataTable`] keeps the full dataset and a filtered/sorted view of it,
//! rebuilds its visual elements through a [`RenderBackend`] after every
//! change, and tracks scroll extent against its container. A ratatui
//! backend ([`TerminalBackend`]) is included.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod ui;

pub use app::{InteractionRouter, TableEvent};
pub use error::{BackendRenderError, ShapeError, TableError};
pub use models::{CellValue, Row, StyleConfig};
pub use ui::backend::{RenderBackend, TerminalBackend};
pub use ui::viewport::ViewportConfig;
pub use ui::widgets::{DataTable, DataTableBuilder};
