// src/specs/timetable.rs
// Shape of the unified timetable page and of the timetable grid itself.

use super::Selector;

/// Position of the timetable table on the unified timetable page
/// (`div > table:nth-child(5)`).
pub const UNIFIED_TABLE_INDEX: usize = 4;

/// Caption text stamped onto the extracted snapshot.
pub const SNAPSHOT_CAPTION: &str = "Your Personalized Timetable";

pub const WAIT_TIMETABLE_TABLE: Selector = Selector {
    css: r#"table[align="center"][border="5"]"#,
    marker: r#"align="center" border="5""#,
};

/// Marker identifying the grid table inside either page's markup.
pub const GRID_TABLE_OPEN: &str = r#"<table align="center" border="5""#;
