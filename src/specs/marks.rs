// src/specs/marks.rs
// Shapes of the marks table variants. The source grew three near-identical
// readers for slightly different pages; here they are one extractor over
// three descriptors.

pub struct MarksShape {
    /// Position of the marks table among top-level tables.
    pub marks_table_index: usize,
    /// Position of the course-code→title cross-reference table.
    pub course_table_index: usize,
    /// Rows to skip at the top of the course table (headers).
    pub course_rows_skip: usize,
    /// Header row to scan for a "Course Code" column; when absent the code
    /// column defaults to 0.
    pub course_header_row: usize,
    /// Whether to locate the code column by header text instead of trusting 0.
    pub find_code_column: bool,
    /// Rows to skip at the top of the marks table.
    pub marks_rows_skip: usize,
}

/// The attendance page's marks table (`table:nth-child(7)` next to the
/// attendance table at nth-child(4)).
pub const ATTENDANCE_PAGE: MarksShape = MarksShape {
    marks_table_index: 6,
    course_table_index: 3,
    course_rows_skip: 1,
    course_header_row: 0,
    find_code_column: false,
    marks_rows_skip: 1,
};

/// Same page, fallback path: header layout drifts, so find the code column.
pub const INLINE_FALLBACK: MarksShape = MarksShape {
    marks_table_index: 6,
    course_table_index: 3,
    course_rows_skip: 1,
    course_header_row: 0,
    find_code_column: true,
    marks_rows_skip: 1,
};

/// The academic-status report page: everything shifts up two tables and the
/// course table grows an extra banner row.
pub const ACADEMIC_STATUS: MarksShape = MarksShape {
    marks_table_index: 4,
    course_table_index: 2,
    course_rows_skip: 2,
    course_header_row: 1,
    find_code_column: true,
    marks_rows_skip: 2,
};
