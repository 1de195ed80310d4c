//! Error types for the table widget

use thiserror::Error;

/// A row's cell count does not match the column count
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {index} has {actual} cells, expected {expected}")]
pub struct ShapeError {
    /// Where the row would have landed: its position in a `set_source`
    /// batch, or the source length for `append_row`
    pub index: usize,
    pub expected: usize,
    pub actual: usize,
}

/// The render backend failed to create, update or destroy an element
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("render backend failed to {op}: {message}")]
pub struct BackendRenderError {
    pub op: &'static str,
    pub message: String,
}

impl BackendRenderError {
    pub fn new(op: &'static str, message: impl Into<String>) -> Self {
        Self {
            op,
            message: message.into(),
        }
    }
}

/// Errors surfaced by [`crate::DataTable`] operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    BackendRender(#[from] BackendRenderError),

    #[error("column {column} out of range ({columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;
