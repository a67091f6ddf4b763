// src/specs/attendance.rs
// Shape of the attendance page's table. Full rows carry hour counts; rows
// with exactly `locked_cells` cells are term-end locked rows.

use super::Selector;

pub struct AttendanceShape {
    /// Position among top-level tables (the portal renders it as
    /// `table:nth-child(4)` inside the content div).
    pub table_index: usize,
    pub code_col: usize,
    pub title_col: usize,
    pub conducted_col: usize,
    pub absent_col: usize,
    pub percent_col: usize,
    /// Percentage column of a locked row (shorter row, different position).
    pub locked_percent_col: usize,
    /// A row with more cells than this is a full row.
    pub full_row_over: usize,
    /// A row with exactly this many cells is a locked row.
    pub locked_cells: usize,
}

pub const ATTENDANCE: AttendanceShape = AttendanceShape {
    table_index: 3,
    code_col: 0,
    title_col: 1,
    conducted_col: 6,
    absent_col: 7,
    percent_col: 8,
    locked_percent_col: 6,
    full_row_over: 7,
    locked_cells: 7,
};

pub const WAIT_ATTENDANCE_TABLE: Selector = Selector {
    css: "div.cntdDiv table:nth-child(4)",
    marker: "cntdDiv",
};
