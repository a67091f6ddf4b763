// src/extract/marks.rs
// Internal-marks rows and the course-code→title cross-reference table. One
// extractor, three page shapes (see specs::marks).

use std::collections::BTreeMap;

use crate::config::consts::XREF_TITLE_MAX;
use crate::core::html;
use crate::core::sanitize;
use crate::model::{MarksComponent, MarksRecord};
use crate::specs::marks::MarksShape;

use super::{cell_text, cells_of, rows_of, split_code_cell};

/// Walk the marks table. Each row is one course: a code cell (with the course
/// type in a nested element) and a cell holding the per-component breakdown
/// as a nested table. Rows without a breakdown are skipped with a warning.
pub fn extract(page: &str, shape: &MarksShape) -> Vec<MarksRecord> {
    let Some(table) = html::nth_table_inner(page, shape.marks_table_index) else {
        logw!("marks: table #{} not found", shape.marks_table_index);
        return Vec::new();
    };

    let mut out = Vec::new();
    for row in rows_of(table).into_iter().skip(shape.marks_rows_skip) {
        let cells = cells_of(row);
        if cells.len() < 2 {
            continue;
        }
        let (code, course_type) = split_code_cell(cells[0]);
        if code.is_empty() {
            continue;
        }
        let Some(components) = component_cells(cells[1]) else {
            logw!("marks: no breakdown table for {code}");
            continue;
        };

        let mut parsed = Vec::new();
        for cell in components {
            match parse_component(&cell) {
                Some(c) => parsed.push(c),
                None => logw!("marks: unreadable component in {code}"),
            }
        }

        let total_max = round2(parsed.iter().map(|c| c.max_marks).sum());
        let total_obtained = round2(parsed.iter().map(|c| c.obtained_marks).sum());
        out.push(MarksRecord {
            course_code: code,
            course_type,
            components: parsed,
            total_max_marks: total_max,
            total_obtained_marks: total_obtained,
        });
    }
    logd!("marks: {} course(s)", out.len());
    out
}

/// Outer HTML of every component cell in the breakdown table nested inside a
/// marks cell.
fn component_cells(cell: &str) -> Option<Vec<String>> {
    let inner = html::inner_after_open_tag(cell);
    let table = html::nth_table_inner(&inner, 0)?;
    let mut cells = Vec::new();
    for row in rows_of(table) {
        for c in cells_of(row) {
            cells.push(c.to_string());
        }
    }
    Some(cells)
}

/// One component cell: a `<strong>Name/Max</strong>` label with the obtained
/// marks as trailing text.
fn parse_component(cell: &str) -> Option<MarksComponent> {
    let inner = html::inner_after_open_tag(cell);
    let (s, e) = html::next_tag_block_ci(&inner, "<strong", "</strong>", 0)?;
    let label = cell_text(&inner[s..e]);
    let (component_name, max_marks) = sanitize::split_component_label(&label)?;

    let rest = join!(&inner[..s], &inner[e..]);
    let obtained_text = html::strip_tags(sanitize::normalize_entities(&rest));
    let obtained_marks = sanitize::first_number(&obtained_text)?;

    Some(MarksComponent {
        component_name,
        max_marks,
        obtained_marks,
    })
}

/// The code→title cross-reference table next to the marks table. Titles are
/// truncated for card layout. Some page variants move the code column, so the
/// shape may ask for a header scan instead of trusting column zero.
pub fn extract_course_xref(page: &str, shape: &MarksShape) -> BTreeMap<String, String> {
    let mut xref = BTreeMap::new();
    let Some(table) = html::nth_table_inner(page, shape.course_table_index) else {
        logw!("marks: course table #{} not found", shape.course_table_index);
        return xref;
    };

    let rows = rows_of(table);
    let code_col = if shape.find_code_column {
        find_code_column(&rows, shape.course_header_row).unwrap_or(0)
    } else {
        0
    };

    for row in rows.iter().skip(shape.course_rows_skip) {
        let cells = cells_of(row);
        if cells.len() <= code_col + 1 {
            continue;
        }
        // the code cell can carry a nested type trailer on some variants
        let (code, _) = split_code_cell(cells[code_col]);
        let title =
            sanitize::truncate_ellipsis(&cell_text(cells[code_col + 1]), XREF_TITLE_MAX);
        if !code.is_empty() && !title.is_empty() {
            xref.insert(code, title);
        }
    }
    xref
}

fn find_code_column(rows: &[&str], header_row: usize) -> Option<usize> {
    let header = rows.get(header_row)?;
    cells_of(header)
        .iter()
        .position(|c| html::to_lower(&cell_text(c)).contains("course code"))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::marks::{ACADEMIC_STATUS, ATTENDANCE_PAGE};

    fn marks_row(code: &str, comps: &str) -> String {
        format!(
            "<tr><td>{code}<font color=blue>Regular</font></td>\
             <td><table><tr>{comps}</tr></table></td></tr>"
        )
    }

    fn comp(label: &str, obtained: &str) -> String {
        format!("<td><strong>{label}</strong><br>{obtained}</td>")
    }

    fn attendance_page(marks_rows: &str, course_rows: &str) -> String {
        // tables 0-2 filler, 3 = course xref, 4-5 filler, 6 = marks
        format!(
            "<div><table></table><table></table><table></table>\
             <table><tr><td>Course Code</td><td>Course Title</td></tr>{course_rows}</table>\
             <table></table><table></table>\
             <table><tr><td>Course</td><td>Marks</td></tr>{marks_rows}</table></div>"
        )
    }

    #[test]
    fn components_sum_into_rounded_totals() {
        let comps = join!(
            &comp("CLA-1/25.00", "17.50"),
            &comp("CLA-2/25.00", "21.25"),
            &comp("Lab/15.00", "14.00")
        );
        let page = attendance_page(&marks_row("21CSC204J", &comps), "");
        let recs = extract(&page, &ATTENDANCE_PAGE);
        assert_eq!(recs.len(), 1);
        let r = &recs[0];
        assert_eq!(r.course_code, "21CSC204J");
        assert_eq!(r.course_type, "Regular");
        assert_eq!(r.components.len(), 3);
        assert_eq!(r.total_max_marks, 65.0);
        assert_eq!(r.total_obtained_marks, 52.75);
    }

    #[test]
    fn two_component_course_lands_in_pass_territory() {
        let comps = join!(&comp("CLA-1/25.00", "20.00"), &comp("CLA-2/25.00", "10.00"));
        let page = attendance_page(&marks_row("21CSE251T", &comps), "");
        let recs = extract(&page, &ATTENDANCE_PAGE);
        assert_eq!(recs[0].total_max_marks, 50.0);
        assert_eq!(recs[0].total_obtained_marks, 30.0);
        let html = crate::render::marks::render(&recs, &std::collections::BTreeMap::new());
        assert!(html.contains("acad-pass"));
    }

    #[test]
    fn unreadable_component_is_dropped_not_fatal() {
        let comps = join!(&comp("CLA-1/25.00", "17.50"), "<td>garbage</td>");
        let page = attendance_page(&marks_row("21CSC204J", &comps), "");
        let recs = extract(&page, &ATTENDANCE_PAGE);
        assert_eq!(recs[0].components.len(), 1);
    }

    #[test]
    fn xref_reads_code_and_truncated_title() {
        let long = "Introduction to the Comparative History of Computational Thinking Systems";
        let course_rows = format!("<tr><td>21CSC204J</td><td>{long}</td></tr>");
        let page = attendance_page("", &course_rows);
        let xref = extract_course_xref(&page, &ATTENDANCE_PAGE);
        let title = &xref["21CSC204J"];
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), 50);
    }

    #[test]
    fn shifted_page_finds_code_column_by_header() {
        // academic-status layout: xref at table 2 with a banner row, marks at 4
        let page = format!(
            "<div><table></table><table></table>\
             <table><tr><td>Banner</td></tr>\
             <tr><td>#</td><td>Course Code</td><td>Title</td></tr>\
             <tr><td>1</td><td>21MAB204T</td><td>Probability and Queueing Theory</td></tr></table>\
             <table></table>\
             <table><tr><td>h</td><td>h</td></tr><tr><td>h</td><td>h</td></tr>{}</table></div>",
            marks_row("21MAB204T", &comp("CLA-1/25.00", "20.00"))
        );
        let xref = extract_course_xref(&page, &ACADEMIC_STATUS);
        assert_eq!(
            xref.get("21MAB204T").map(String::as_str),
            Some("Probability and Queueing Theory")
        );
        let recs = extract(&page, &ACADEMIC_STATUS);
        assert_eq!(recs.len(), 1);
    }
}
