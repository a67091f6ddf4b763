// src/render/attendance.rs
// Attendance cards for the dashboard, plus the live-page margin annotation.

use crate::core::html;
use crate::model::AttendanceRecord;

/// Cards for every attendance row. When a previous snapshot is given, each
/// card shows the percentage trend since that snapshot.
pub fn render(records: &[AttendanceRecord], previous: Option<&[AttendanceRecord]>) -> String {
    if records.is_empty() {
        return s!(r#"<p class="acad-empty">Attendance not cached yet.</p>"#);
    }
    let mut out = s!(r#"<div class="acad-attendance">"#);
    for rec in records {
        out.push_str(&card(rec, previous));
    }
    out.push_str("</div>");
    out
}

fn card(rec: &AttendanceRecord, previous: Option<&[AttendanceRecord]>) -> String {
    let level = if rec.percentage >= crate::config::consts::TARGET_PERCENTAGE {
        "acad-good"
    } else {
        "acad-risk"
    };
    let mut body = format!(
        r#"<div class="acad-card {level}"><h4>{} {}</h4><p>{:.2}%{}</p>"#,
        rec.course_code,
        rec.course_title,
        rec.percentage,
        trend(rec, previous)
    );
    if let (Some(att), Some(total)) = (rec.attended_classes, rec.hours_conducted) {
        body.push_str(&format!("<p>{att} / {total} attended</p>"));
    }
    body.push_str(&margin_line(rec));
    body.push_str("</div>");
    body
}

fn trend(rec: &AttendanceRecord, previous: Option<&[AttendanceRecord]>) -> String {
    let Some(prev) = previous
        .and_then(|p| p.iter().find(|r| r.course_code == rec.course_code))
    else {
        return s!();
    };
    let delta = rec.percentage - prev.percentage;
    if delta.abs() < 0.005 {
        return s!();
    }
    let (arrow, class) = if delta > 0.0 {
        ("▲", "acad-up")
    } else {
        ("▼", "acad-down")
    };
    format!(r#" <span class="{class}">{arrow} {:.2}</span>"#, delta.abs())
}

/// The one-line margin verdict. Both margins at zero on an unlocked course
/// means no slack in either direction, flagged as its own borderline state.
fn margin_line(rec: &AttendanceRecord) -> String {
    if rec.is_locked() {
        return s!(r#"<p class="acad-locked">Locked</p>"#);
    }
    if rec.classes_to_skip > 0 {
        format!(
            r#"<p class="acad-ok">Can skip {} class(es)</p>"#,
            rec.classes_to_skip
        )
    } else if rec.classes_to_attend > 0 {
        format!(
            r#"<p class="acad-low">Must attend next {} class(es)</p>"#,
            rec.classes_to_attend
        )
    } else {
        s!(r#"<p class="acad-edge">On the edge: no classes to spare</p>"#)
    }
}

/// Live-path annotation: append a margin cell to each course row of the
/// attendance table currently on screen. Rows are matched by course code in
/// the first cell; unmatched rows pass through.
pub fn annotate_table(table: &str, records: &[AttendanceRecord]) -> String {
    let mut out = String::with_capacity(table.len());
    let mut pos = 0usize;

    for (r_s, r_e) in html::top_level_blocks(table, "tr") {
        out.push_str(&table[pos..r_s]);
        let row = &table[r_s..r_e];
        out.push_str(&annotate_row(row, records));
        pos = r_e;
    }
    out.push_str(&table[pos..]);
    out
}

fn annotate_row(row: &str, records: &[AttendanceRecord]) -> String {
    let cells = html::top_level_blocks(row, "td");
    let Some(&(f_s, f_e)) = cells.first() else {
        return s!(row);
    };
    let text = html::strip_tags(html::inner_after_open_tag(&row[f_s..f_e]));
    let Some(rec) = records.iter().find(|r| text.contains(&r.course_code)) else {
        return s!(row);
    };
    let Some(close) = html::to_lower(row).rfind("</tr>") else {
        return s!(row);
    };
    let cell = join!("<td>", &margin_line(rec), "</td>");
    join!(&row[..close], &cell, &row[close..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(code: &str, pct: f64, skip: i64, attend: i64) -> AttendanceRecord {
        AttendanceRecord {
            course_code: s!(code),
            course_title: s!("Course"),
            hours_conducted: Some(20),
            absent_hours: Some(2),
            attended_classes: Some(18),
            percentage: pct,
            classes_to_skip: skip,
            classes_to_attend: attend,
        }
    }

    #[test]
    fn trend_arrows_follow_previous_snapshot() {
        let now = [rec("21CSC203P", 90.0, 4, 0)];
        let before = [rec("21CSC203P", 85.0, 2, 0)];
        let html = render(&now, Some(&before));
        assert!(html.contains("▲ 5.00"));

        let dropped = [rec("21CSC203P", 80.0, 1, 0)];
        let html = render(&dropped, Some(&now));
        assert!(html.contains("▼ 10.00"));
    }

    #[test]
    fn zero_margin_unlocked_course_is_borderline() {
        let html = render(&[rec("21MAB204T", 75.0, 0, 0)], None);
        assert!(html.contains("acad-edge"));
    }

    #[test]
    fn annotation_appends_margin_cell_per_matched_row() {
        let table = "<table><tr><td>Course Code</td><td>Title</td></tr>\
                     <tr><td>21CSC203P</td><td>Algorithms</td></tr></table>";
        let out = annotate_table(table, &[rec("21CSC203P", 90.0, 4, 0)]);
        assert!(out.contains("Can skip 4"));
        // header row untouched
        assert!(out.contains("<tr><td>Course Code</td><td>Title</td></tr>"));
    }
}
