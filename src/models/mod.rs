pub mod cell;
pub mod style;

pub use cell::{Alignment, CellKind, CellValue, Row};
pub use style::{keys as style_keys, StyleConfig};
