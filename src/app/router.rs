//! Translation of raw input into table commands
//!
//! The router holds no state. Pointer events name the backend element
//! they hit and the generation it was created in; the element's tag is
//! read from the renderer at routing time, so an event aimed at an element
//! from a discarded generation is dropped even if its handle was reissued.

use crate::ui::backend::{Binding, ElementHandle, ElementTag};
use crate::ui::renderer::Renderer;

/// Raw input delivered by the host or backend
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// `generation` is the one the backend was given when creating `target`
    Pointer {
        target: ElementHandle,
        generation: u64,
        binding: Binding,
    },
    /// Wheel notches, positive toward the end of the content
    Wheel(i32),
    /// A discrete filter submission (not a keystroke)
    FilterSubmitted(String),
    ContainerResized { width: u32, height: u32 },
}

/// What the table should do in response to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Sort(usize),
    Select { row: usize, column: usize },
    Hover { row: usize, entering: bool },
    Scroll(i32),
    Filter(String),
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionRouter;

impl InteractionRouter {
    pub fn route(event: TableEvent, renderer: &Renderer) -> Option<Command> {
        match event {
            TableEvent::Pointer {
                target,
                generation,
                binding,
            } => Self::route_pointer(target, generation, binding, renderer),
            TableEvent::Wheel(notches) => Some(Command::Scroll(notches)),
            TableEvent::FilterSubmitted(text) => Some(Command::Filter(text)),
            TableEvent::ContainerResized { width, height } => Some(Command::Resize { width, height }),
        }
    }

    fn route_pointer(
        target: ElementHandle,
        generation: u64,
        binding: Binding,
        renderer: &Renderer,
    ) -> Option<Command> {
        let Some(element) = renderer.lookup_current(target, generation) else {
            tracing::trace!(handle = target.0, generation, ?binding, "dropping event for stale element");
            return None;
        };
        if !element.accepts(binding) {
            return None;
        }

        match (element.tag, binding) {
            (ElementTag::Header { column }, Binding::Click) => Some(Command::Sort(column)),
            (ElementTag::Cell { row, column }, Binding::Click) => Some(Command::Select { row, column }),
            (ElementTag::Cell { row, .. }, Binding::Enter) => Some(Command::Hover { row, entering: true }),
            (ElementTag::Cell { row, .. }, Binding::Leave) => Some(Command::Hover { row, entering: false }),
            (ElementTag::Header { .. }, _) => None,
        }
    }
}
