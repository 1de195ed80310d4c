//! Dataset, sort and filter state
//!
//! Holds the full `source` dataset as given by the host and the derived
//! `view`: the indices of the rows that pass the filter, in sort order.
//! Filtering and sorting never touch `source`.

use std::cmp::Ordering;

use crate::error::{Result, ShapeError, TableError};
use crate::models::Row;

/// Current sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Option<usize>,
    pub ascending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: None,
            ascending: true,
        }
    }
}

impl SortSpec {
    /// Same column flips direction, another column sorts ascending
    pub fn toggle(&mut self, column: usize) {
        if self.column == Some(column) {
            self.ascending = !self.ascending;
        } else {
            self.column = Some(column);
            self.ascending = true;
        }
    }
}

/// Current filter text, stored lowercased
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    text: String,
}

impl FilterSpec {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_lowercase(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    columns: Vec<String>,
    source: Vec<Row>,
    view: Vec<usize>,
    sort: SortSpec,
    filter: FilterSpec,
}

impl ViewState {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut state = Self {
            columns,
            source: Vec::new(),
            view: Vec::new(),
            sort: SortSpec::default(),
            filter: FilterSpec::default(),
        };
        state.set_source(rows)?;
        Ok(state)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn source(&self) -> &[Row] {
        &self.source
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    pub fn filter_spec(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// Row at `index` in the current view
    pub fn view_row(&self, index: usize) -> Option<&Row> {
        self.view.get(index).map(|&i| &self.source[i])
    }

    pub fn view_rows(&self) -> impl ExactSizeIterator<Item = &Row> + '_ {
        self.view.iter().map(move |&i| &self.source[i])
    }

    /// Replace the whole dataset; filter and sort settings are kept
    pub fn set_source(&mut self, rows: Vec<Row>) -> Result<()> {
        for (index, row) in rows.iter().enumerate() {
            self.check_shape(index, row)?;
        }
        self.source = rows;
        self.derive_view();
        Ok(())
    }

    pub fn append_row(&mut self, row: Row) -> Result<()> {
        self.check_shape(self.source.len(), &row)?;
        self.source.push(row);
        self.derive_view();
        Ok(())
    }

    pub fn set_filter(&mut self, text: &str) {
        self.filter = FilterSpec::new(text);
        self.derive_view();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter("");
    }

    pub fn set_sort(&mut self, column: usize) -> Result<()> {
        if column >= self.columns.len() {
            return Err(TableError::ColumnOutOfRange {
                column,
                columns: self.columns.len(),
            });
        }
        self.sort.toggle(column);
        self.derive_view();
        Ok(())
    }

    fn check_shape(&self, index: usize, row: &Row) -> Result<(), ShapeError> {
        if row.len() == self.columns.len() {
            Ok(())
        } else {
            Err(ShapeError {
                index,
                expected: self.columns.len(),
                actual: row.len(),
            })
        }
    }

    fn derive_view(&mut self) {
        let source = &self.source;
        let mut view: Vec<usize> = if self.filter.is_empty() {
            (0..source.len()).collect()
        } else {
            (0..source.len())
                .filter(|&i| source[i].matches(self.filter.text()))
                .collect()
        };

        if let Some(column) = self.sort.column {
            let ascending = self.sort.ascending;
            // Vec::sort_by is stable: equal keys keep source order
            view.sort_by(|&a, &b| {
                let a = &source[a].cells()[column];
                let b = &source[b].cells()[column];
                match (a.is_null(), b.is_null()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) if ascending => a.sort_cmp(b),
                    (false, false) => b.sort_cmp(a),
                }
            });
        }

        tracing::trace!(
            source = source.len(),
            view = view.len(),
            filter = self.filter.text(),
            sort = ?self.sort,
            "view derived"
        );
        self.view = view;
    }
}
