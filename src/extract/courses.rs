// src/extract/courses.rs
// Registration page: the slot→course map plus the two info-table fields the
// background refresh needs (registration number, batch).

use crate::config::consts::TITLE_MAX;
use crate::core::html;
use crate::core::sanitize;
use crate::model::{CourseInfo, CourseSlotMap};
use crate::specs::registration::RegistrationShape;

use super::{cell_at, cell_text, cells_of, rows_of};

/// Walk the course table and map every slot code to its course. A composite
/// slot string like "A1-B2" fans out: each part keys the same course.
pub fn extract_slot_map(page: &str, shape: &RegistrationShape) -> CourseSlotMap {
    let mut map = CourseSlotMap::new();

    let Some(table) = html::slice_between_ci(page, shape.course_table_open, "</table>") else {
        logw!("courses: course table not found");
        return map;
    };

    for row in rows_of(table) {
        let cells = cells_of(row);
        if cells.len() < shape.min_cells {
            continue; // header or spacer row
        }
        let slot_raw = cell_text(cells[shape.slot_col]);
        let title = sanitize::truncate_ellipsis(&cell_text(cells[shape.title_col]), TITLE_MAX);
        let classroom = cell_text(cells[shape.classroom_col]);
        if slot_raw.is_empty() || title.is_empty() {
            continue;
        }
        for part in slot_raw.split('-') {
            let slot = part.trim();
            if slot.is_empty() {
                continue;
            }
            map.insert(
                s!(slot),
                CourseInfo {
                    title: title.clone(),
                    classroom: classroom.clone(),
                },
            );
        }
    }

    logd!("courses: {} slot(s) mapped", map.len());
    map
}

/// Registration number from the info table: the first long digit run in the
/// expected cell.
pub fn extract_registration_no(page: &str, shape: &RegistrationShape) -> Option<String> {
    let table = html::nth_table_inner(page, shape.info_table_index)?;
    let text = cell_at(table, shape.registration_cell)?;
    match sanitize::first_digit_run(&text, 9) {
        Some(run) => Some(run.to_string()),
        None => {
            logw!("courses: no registration number in {:?}", text);
            None
        }
    }
}

/// Batch number ("1" or "2") from the info table cell. The portal sometimes
/// wraps it in label text, so only the digits are kept.
pub fn extract_batch(page: &str, shape: &RegistrationShape) -> Option<String> {
    let table = html::nth_table_inner(page, shape.info_table_index)?;
    let text = cell_at(table, shape.batch_cell)?;
    let batch = sanitize::first_digit_run(&text, 1)?.to_string();
    Some(batch)
}
