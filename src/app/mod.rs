pub mod actions;
pub mod events;
pub mod router;
pub mod view_state;

pub use router::{Command, InteractionRouter, TableEvent};
pub use view_state::{FilterSpec, SortSpec, ViewState};
