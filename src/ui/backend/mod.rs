//! Render backend interface
//!
//! The table core never draws anything itself. It asks a backend to
//! create, recolor and destroy visual elements and to reflect the
//! viewport; the backend owns the toolkit-specific mechanics.

pub mod terminal;

use serde_json::Value;

use crate::error::BackendRenderError;
use crate::models::{Alignment, StyleConfig};
use crate::ui::viewport::ViewportState;

pub use terminal::TerminalBackend;

/// Opaque backend-issued identifier of a visual element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u64);

/// Origin of an element, read back at event time for hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTag {
    Header { column: usize },
    Cell { row: usize, column: usize },
}

impl ElementTag {
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Header { .. } => None,
            Self::Cell { row, .. } => Some(*row),
        }
    }

    pub fn column(&self) -> usize {
        match self {
            Self::Header { column } | Self::Cell { column, .. } => *column,
        }
    }
}

/// Pointer interactions an element can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Click,
    Enter,
    Leave,
}

/// Everything a backend needs to create one element
#[derive(Debug, Clone)]
pub struct ElementSpec<'a> {
    pub tag: ElementTag,
    /// Rebuild this element belongs to; echoed back in pointer events
    pub generation: u64,
    pub text: String,
    pub align: Alignment,
    pub background: Option<&'a Value>,
    pub foreground: Option<&'a Value>,
    pub bold: bool,
}

pub trait RenderBackend {
    /// Create an element; `style` carries the opaque options the backend may honor.
    ///
    /// Handles may be reused once destroyed. Pointer events must then carry
    /// `spec.generation` of the element they hit, which is how events
    /// queued against a destroyed element are told apart from its successor.
    fn create_element(
        &mut self,
        spec: &ElementSpec<'_>,
        style: &StyleConfig,
    ) -> Result<ElementHandle, BackendRenderError>;

    fn destroy_element(&mut self, handle: ElementHandle) -> Result<(), BackendRenderError>;

    fn set_background(
        &mut self,
        handle: ElementHandle,
        color: Option<&Value>,
    ) -> Result<(), BackendRenderError>;

    /// Height of the laid-out rows, in backend units
    fn content_height(&self) -> u32;

    /// Height of a single row, in backend units
    fn row_extent(&self) -> u32;

    /// Reflect scrollbar visibility, scroll offset and content width
    fn update_viewport(&mut self, viewport: &ViewportState) -> Result<(), BackendRenderError>;
}
