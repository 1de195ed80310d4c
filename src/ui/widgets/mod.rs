pub mod filterbar;
pub mod statusbar;
pub mod table;

pub use filterbar::FilterBar;
pub use table::{DataTable, DataTableBuilder, RowSelectedCallback};
