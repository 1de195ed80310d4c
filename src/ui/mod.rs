pub mod app;
pub mod backend;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewport;
pub mod widgets;
