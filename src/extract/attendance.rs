// src/extract/attendance.rs
// Attendance rows plus the margin arithmetic: how many classes can still be
// skipped, or must be attended, to stay at the target percentage.

use crate::config::consts::TARGET_PERCENTAGE;
use crate::core::html;
use crate::core::sanitize;
use crate::model::AttendanceRecord;
use crate::specs::attendance::AttendanceShape;

use super::{cell_text, cells_of, rows_of, split_code_cell};

/// Walk the attendance table. Full rows yield the complete record; rows the
/// portal locks at term end (shorter, no hour counts) degrade to code, title
/// and percentage with zero margins.
pub fn extract(page: &str, shape: &AttendanceShape) -> Vec<AttendanceRecord> {
    let Some(table) = html::nth_table_inner(page, shape.table_index) else {
        logw!("attendance: table #{} not found", shape.table_index);
        return Vec::new();
    };

    let mut out = Vec::new();
    for row in rows_of(table) {
        let cells = cells_of(row);
        if cells.len() > shape.full_row_over {
            if let Some(rec) = full_row(&cells, shape) {
                out.push(rec);
            }
        } else if cells.len() == shape.locked_cells {
            out.push(locked_row(&cells, shape));
        }
        // anything else is a header or spacer
    }
    logd!("attendance: {} row(s)", out.len());
    out
}

fn full_row(cells: &[&str], shape: &AttendanceShape) -> Option<AttendanceRecord> {
    let (code, _) = split_code_cell(cells.get(shape.code_col)?);
    let conducted = cell_text(cells.get(shape.conducted_col)?).parse::<i64>().ok()?;
    let absent = cell_text(cells.get(shape.absent_col)?).parse::<i64>().ok()?;
    let attended = conducted - absent;
    let percentage =
        sanitize::first_number(&cell_text(cells.get(shape.percent_col)?)).unwrap_or(0.0);
    let (classes_to_skip, classes_to_attend) = margins(attended, conducted, percentage);

    Some(AttendanceRecord {
        course_code: code,
        course_title: cell_text(cells.get(shape.title_col)?),
        hours_conducted: Some(conducted),
        absent_hours: Some(absent),
        attended_classes: Some(attended),
        percentage,
        classes_to_skip,
        classes_to_attend,
    })
}

fn locked_row(cells: &[&str], shape: &AttendanceShape) -> AttendanceRecord {
    let (code, _) = split_code_cell(cells[shape.code_col]);
    AttendanceRecord {
        course_code: code,
        course_title: cell_text(cells[shape.title_col]),
        hours_conducted: None,
        absent_hours: None,
        attended_classes: None,
        percentage: sanitize::first_number(&cell_text(cells[shape.locked_percent_col]))
            .unwrap_or(0.0),
        classes_to_skip: 0,
        classes_to_attend: 0,
    }
}

/// Margin arithmetic against the target percentage. At or above target: how
/// many future classes can be missed while staying at target. Below target:
/// how many consecutive classes must be attended to reach it. Both clamp at
/// zero, never negative.
pub fn margins(attended: i64, conducted: i64, percentage: f64) -> (i64, i64) {
    let target = TARGET_PERCENTAGE / 100.0;
    if percentage >= TARGET_PERCENTAGE {
        let skip = (attended as f64 / target - conducted as f64).floor() as i64;
        (skip.max(0), 0)
    } else {
        let attend =
            ((target * conducted as f64 - attended as f64) / (1.0 - target)).ceil() as i64;
        (0, attend.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::attendance::ATTENDANCE;

    fn full_row_html(code: &str, title: &str, conducted: u32, absent: u32, pct: &str) -> String {
        format!(
            "<tr><td>{code}<font color=green>Regular</font></td><td>{title}</td>\
             <td>x</td><td>x</td><td>x</td><td>x</td>\
             <td>{conducted}</td><td>{absent}</td><td>{pct}</td></tr>"
        )
    }

    fn page_with(rows: &str) -> String {
        format!(
            "<div class=cntdDiv><table><tr><td>banner</td></tr></table>\
             <table></table><table></table>\
             <table>{rows}</table></div>"
        )
    }

    #[test]
    fn comfortable_course_reports_skippable_classes() {
        // attended 18 of 20 at 90%: four classes of slack
        let page = page_with(&full_row_html("21CSC203P", "Algorithms", 20, 2, "90.00"));
        let recs = extract(&page, &ATTENDANCE);
        assert_eq!(recs.len(), 1);
        let r = &recs[0];
        assert_eq!(r.course_code, "21CSC203P");
        assert_eq!(r.attended_classes, Some(18));
        assert_eq!(r.classes_to_skip, 4);
        assert_eq!(r.classes_to_attend, 0);
    }

    #[test]
    fn shortfall_course_reports_required_classes() {
        // attended 12 of 20 at 60%: twelve straight classes to recover
        let page = page_with(&full_row_html("21MAB204T", "Probability", 20, 8, "60.00"));
        let recs = extract(&page, &ATTENDANCE);
        assert_eq!(recs[0].classes_to_skip, 0);
        assert_eq!(recs[0].classes_to_attend, 12);
    }

    #[test]
    fn locked_row_degrades_to_percentage_only() {
        let locked = "<tr><td>21PDH201T<font>Regular</font></td><td>Soft Skills</td>\
                      <td>x</td><td>x</td><td>x</td><td>x</td><td>85.00</td></tr>";
        let page = page_with(locked);
        let recs = extract(&page, &ATTENDANCE);
        let r = &recs[0];
        assert!(r.is_locked());
        assert_eq!(r.percentage, 85.0);
        assert_eq!(r.classes_to_skip, 0);
        assert_eq!(r.classes_to_attend, 0);
    }

    #[test]
    fn exact_target_skips_zero() {
        let (skip, attend) = margins(15, 20, 75.0);
        assert_eq!((skip, attend), (0, 0));
    }

    #[test]
    fn margins_never_negative() {
        let (skip, _) = margins(0, 0, 100.0);
        assert!(skip >= 0);
        let (_, attend) = margins(0, 0, 0.0);
        assert_eq!(attend, 0);
    }
}
