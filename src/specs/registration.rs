// src/specs/registration.rs
// Shape of the course-registration page: the student info table plus the
// course table, and the fixed cell positions of the profile fields.

use super::Selector;

/// Where the registration page keeps course rows and student info.
pub struct RegistrationShape {
    /// Marker identifying the course table.
    pub course_table_open: &'static str,
    /// Position of the info table among top-level tables.
    pub info_table_index: usize,
    /// Info table: (row, cell) of the cell holding the registration number.
    pub registration_cell: (usize, usize),
    /// Info table: (row, cell) of the batch label.
    pub batch_cell: (usize, usize),
    /// Course table: 0-based column of the composite slot string.
    pub slot_col: usize,
    /// Course table: column of the course title.
    pub title_col: usize,
    /// Course table: column of the classroom.
    pub classroom_col: usize,
    /// Rows with fewer cells than this are ignored (header junk, spacers).
    pub min_cells: usize,
}

/// Fixed (row, cell) positions of the five profile fields in the info table.
pub struct ProfileShape {
    pub table_index: usize,
    pub name: (usize, usize),
    pub registration_no: (usize, usize),
    pub programme_branch: (usize, usize),
    pub semester: (usize, usize),
    /// The combined "department (section)" cell.
    pub school_section: (usize, usize),
}

pub const REGISTRATION: RegistrationShape = RegistrationShape {
    course_table_open: "<table class=course_tbl",
    info_table_index: 0,
    registration_cell: (0, 1),
    batch_cell: (1, 1),
    slot_col: 8,
    title_col: 2,
    classroom_col: 9,
    min_cells: 10,
};

pub const PROFILE: ProfileShape = ProfileShape {
    table_index: 0,
    name: (0, 3),
    registration_no: (0, 1),
    programme_branch: (2, 1),
    semester: (3, 1),
    school_section: (2, 3),
};

/// Elements the hidden frame must produce before extraction may start.
pub const WAIT_INFO_TABLE: Selector = Selector {
    css: "div.cntdDiv table:not(.course_tbl)",
    marker: "cntdDiv",
};
pub const WAIT_COURSE_TABLE: Selector = Selector {
    css: "table.course_tbl",
    marker: "class=course_tbl",
};
