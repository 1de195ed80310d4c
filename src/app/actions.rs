//! User action handling

/// User-initiated actions in the demo host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    // Filtering
    OpenFilter,
    ClearFilter,

    // Table
    SortColumn(usize),
    Scroll(i32),
    AddRow,
    SwapStyle,
    Clear,
    Refresh,

    // General
    Help,
    Quit,
}
