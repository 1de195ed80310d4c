#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};

use datatable_tui::models::{Alignment, StyleConfig};
use datatable_tui::ui::backend::{ElementHandle, ElementSpec, ElementTag, RenderBackend};
use datatable_tui::ui::viewport::ViewportState;
use datatable_tui::BackendRenderError;
use serde_json::Value;

pub const ROW_EXTENT: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub tag: ElementTag,
    pub text: String,
    pub align: Alignment,
    pub background: Option<Value>,
}

/// Backend that keeps elements in memory and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next: u64,
    pub elements: BTreeMap<ElementHandle, Recorded>,
    pub viewport: ViewportState,
    pub viewport_updates: usize,
    pub fail_create_after: Option<usize>,
    /// Hand destroyed handles out again, oldest freed first
    pub recycle_handles: bool,
    free: VecDeque<ElementHandle>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> Vec<String> {
        self.elements
            .values()
            .filter(|e| matches!(e.tag, ElementTag::Header { .. }))
            .map(|e| e.text.clone())
            .collect()
    }

    /// Cell texts grouped by row, in row order
    pub fn grid(&self) -> Vec<Vec<String>> {
        let mut rows: BTreeMap<usize, BTreeMap<usize, String>> = BTreeMap::new();
        for element in self.elements.values() {
            if let ElementTag::Cell { row, column } = element.tag {
                rows.entry(row).or_default().insert(column, element.text.clone());
            }
        }
        rows.into_values().map(|cols| cols.into_values().collect()).collect()
    }

    pub fn row_backgrounds(&self, row: usize) -> Vec<Option<Value>> {
        self.elements
            .values()
            .filter(|e| e.tag.row() == Some(row))
            .map(|e| e.background.clone())
            .collect()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Recorded> {
        self.elements
            .values()
            .find(|e| e.tag == ElementTag::Cell { row, column })
    }
}

impl RenderBackend for RecordingBackend {
    fn create_element(
        &mut self,
        spec: &ElementSpec<'_>,
        _style: &StyleConfig,
    ) -> Result<ElementHandle, BackendRenderError> {
        if let Some(left) = self.fail_create_after.as_mut() {
            if *left == 0 {
                return Err(BackendRenderError::new("create element", "backend exhausted"));
            }
            *left -= 1;
        }
        let handle = match self.free.pop_front() {
            Some(handle) if self.recycle_handles => handle,
            _ => {
                self.next += 1;
                ElementHandle(self.next - 1)
            }
        };
        self.elements.insert(
            handle,
            Recorded {
                tag: spec.tag,
                text: spec.text.clone(),
                align: spec.align,
                background: spec.background.cloned(),
            },
        );
        Ok(handle)
    }

    fn destroy_element(&mut self, handle: ElementHandle) -> Result<(), BackendRenderError> {
        self.elements
            .remove(&handle)
            .ok_or_else(|| BackendRenderError::new("destroy element", "unknown handle"))?;
        if self.recycle_handles {
            self.free.push_back(handle);
        }
        Ok(())
    }

    fn set_background(
        &mut self,
        handle: ElementHandle,
        color: Option<&Value>,
    ) -> Result<(), BackendRenderError> {
        let element = self
            .elements
            .get_mut(&handle)
            .ok_or_else(|| BackendRenderError::new("set background", "unknown handle"))?;
        element.background = color.cloned();
        Ok(())
    }

    fn content_height(&self) -> u32 {
        self.grid().len() as u32 * ROW_EXTENT
    }

    fn row_extent(&self) -> u32 {
        ROW_EXTENT
    }

    fn update_viewport(&mut self, viewport: &ViewportState) -> Result<(), BackendRenderError> {
        self.viewport = *viewport;
        self.viewport_updates += 1;
        Ok(())
    }
}
