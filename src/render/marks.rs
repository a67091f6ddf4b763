// src/render/marks.rs
// Marks cards for the dashboard, plus the live-page total annotation. The
// halfway ratio decides the color on both paths.

use std::collections::BTreeMap;

use crate::config::consts::XREF_TITLE_MAX;
use crate::core::html;
use crate::core::sanitize;
use crate::model::{AttendanceRecord, MarksRecord};

const PASS_RATIO: f64 = 0.5;

/// Code→title map derived from attendance rows, truncated to card width.
/// The dashboard uses this as the baseline xref when the scraped
/// cross-reference table is not at hand.
pub fn title_xref(records: &[AttendanceRecord]) -> BTreeMap<String, String> {
    records
        .iter()
        .map(|r| {
            (
                r.course_code.clone(),
                sanitize::truncate_ellipsis(&r.course_title, XREF_TITLE_MAX),
            )
        })
        .collect()
}

/// Cards for every marks row. `xref` maps course codes to display titles;
/// codes without an entry fall back to the bare code.
pub fn render(records: &[MarksRecord], xref: &BTreeMap<String, String>) -> String {
    if records.is_empty() {
        return s!(r#"<p class="acad-empty">Marks not cached yet.</p>"#);
    }
    let mut out = s!(r#"<div class="acad-marks">"#);
    for rec in records {
        out.push_str(&card(rec, xref));
    }
    out.push_str("</div>");
    out
}

fn card(rec: &MarksRecord, xref: &BTreeMap<String, String>) -> String {
    let title = xref
        .get(&rec.course_code)
        .map(String::as_str)
        .unwrap_or(&rec.course_code);
    let mut body = format!(
        r#"<div class="acad-card"><h4>{title} <small>{}</small></h4><ul>"#,
        rec.course_type
    );
    for c in &rec.components {
        body.push_str(&format!(
            "<li>{}: {:.2} / {:.2}</li>",
            c.component_name, c.obtained_marks, c.max_marks
        ));
    }
    body.push_str("</ul>");
    body.push_str(&total_line(rec));
    body.push_str("</div>");
    body
}

fn total_line(rec: &MarksRecord) -> String {
    format!(
        r#"<p class="{}">Total: {:.2} / {:.2}</p>"#,
        total_class(rec),
        rec.total_obtained_marks,
        rec.total_max_marks
    )
}

fn total_class(rec: &MarksRecord) -> &'static str {
    if rec.total_max_marks > 0.0
        && rec.total_obtained_marks / rec.total_max_marks >= PASS_RATIO
    {
        "acad-pass"
    } else {
        "acad-fail"
    }
}

/// Live-path annotation: append a colored total cell to each course row of
/// the marks table on screen.
pub fn annotate_table(table: &str, records: &[MarksRecord]) -> String {
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

fn annotate_row(row: &str, records: &[MarksRecord]) -> String {
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
    let cell = join!("<td>", &total_line(rec), "</td>");
    join!(&row[..close], &cell, &row[close..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MarksComponent;

    fn rec(code: &str, obtained: f64, max: f64) -> MarksRecord {
        MarksRecord {
            course_code: s!(code),
            course_type: s!("Regular"),
            components: vec![MarksComponent {
                component_name: s!("CLA-1"),
                max_marks: max,
                obtained_marks: obtained,
            }],
            total_max_marks: max,
            total_obtained_marks: obtained,
        }
    }

    #[test]
    fn halfway_ratio_decides_the_color() {
        assert!(render(&[rec("A", 12.5, 25.0)], &BTreeMap::new()).contains("acad-pass"));
        assert!(render(&[rec("A", 12.49, 25.0)], &BTreeMap::new()).contains("acad-fail"));
    }

    #[test]
    fn xref_titles_replace_bare_codes() {
        let mut xref = BTreeMap::new();
        xref.insert(s!("21CSC204J"), s!("Design and Analysis of Algorithms"));
        let html = render(&[rec("21CSC204J", 20.0, 25.0)], &xref);
        assert!(html.contains("Design and Analysis of Algorithms"));
    }

    #[test]
    fn attendance_titles_are_truncated_to_card_width() {
        let long = "Introduction to the Comparative History of Computational Thinking Systems";
        let xref = title_xref(&[AttendanceRecord {
            course_code: s!("21CSC204J"),
            course_title: s!(long),
            hours_conducted: Some(20),
            absent_hours: Some(2),
            attended_classes: Some(18),
            percentage: 90.0,
            classes_to_skip: 4,
            classes_to_attend: 0,
        }]);
        let title = &xref["21CSC204J"];
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), 50);
    }

    #[test]
    fn annotation_appends_total_cell() {
        let table = "<table><tr><td>21CSC204J<font>Regular</font></td>\
                     <td><table><tr><td>x</td></tr></table></td></tr></table>";
        let out = annotate_table(table, &[rec("21CSC204J", 20.0, 25.0)]);
        assert!(out.contains("Total: 20.00 / 25.00"));
        assert!(out.contains("acad-pass"));
    }
}
