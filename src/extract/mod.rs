// src/extract/mod.rs
//! # Extractors
//!
//! Pure functions from fetched page markup to the records in `crate::model`,
//! driven by the shape descriptors in `crate::specs`. No extractor touches the
//! cache or the network, and none panics on malformed markup: a missing table
//! or unparsable row degrades to an empty/partial result with a warning in the
//! log, so one broken panel never takes down the rest of a refresh.

use crate::core::html;
use crate::core::sanitize;

pub mod attendance;
pub mod courses;
pub mod marks;
pub mod profile;
pub mod timetable;

/// Outer HTML of each top-level `<tr>` in a table's inner HTML. Rows of
/// nested breakdown tables are not included.
pub(crate) fn rows_of(table_inner: &str) -> Vec<&str> {
    html::top_level_blocks(table_inner, "tr")
        .into_iter()
        .map(|(s, e)| &table_inner[s..e])
        .collect()
}

/// Outer HTML of each top-level `<td>` in a row.
pub(crate) fn cells_of(row: &str) -> Vec<&str> {
    html::top_level_blocks(row, "td")
        .into_iter()
        .map(|(s, e)| &row[s..e])
        .collect()
}

/// Visible text of a cell: entities resolved, tags stripped, whitespace
/// collapsed.
pub(crate) fn cell_text(cell: &str) -> String {
    html::strip_tags(sanitize::normalize_entities(&html::inner_after_open_tag(
        cell,
    )))
}

/// A code cell holds the course code followed by a nested `<font>` element
/// whose text is the course type ("Regular", "Elective"). Recover the code by
/// string difference and hand back both halves.
pub(crate) fn split_code_cell(cell: &str) -> (String, String) {
    let full = cell_text(cell);
    let inner = html::inner_after_open_tag(cell);
    let trailer = html::next_tag_block_ci(&inner, "<font", "</font>", 0)
        .map(|(s, e)| cell_text(&inner[s..e]))
        .unwrap_or_default();
    let code = sanitize::strip_trailer(&full, &trailer);
    (code, trailer)
}

/// Text at a fixed (row, cell) position of a table, if present.
pub(crate) fn cell_at(table_inner: &str, pos: (usize, usize)) -> Option<String> {
    let rows = rows_of(table_inner);
    let row = rows.get(pos.0)?;
    let cells = cells_of(row);
    let cell = cells.get(pos.1)?;
    Some(cell_text(cell))
}
