// src/render/profile.rs
// Identity panel. Missing fields render as "N/A" rather than collapsing the
// panel layout.

use crate::model::ProfileRecord;

pub fn render(profile: Option<&ProfileRecord>, day_order: Option<&str>) -> String {
    let empty = ProfileRecord::default();
    let p = profile.unwrap_or(&empty);

    let mut out = s!(r#"<div class="acad-profile"><table>"#);
    row(&mut out, "Name", p.name.as_deref());
    row(&mut out, "Registration No.", p.registration_no.as_deref());
    row(&mut out, "Programme / Branch", p.programme_branch.as_deref());
    row(&mut out, "Semester", p.semester.as_deref());
    row(&mut out, "Section", p.section.as_deref());
    row(&mut out, "Department", p.school_department.as_deref());
    if let Some(d) = day_order {
        row(&mut out, "Day Order", Some(&join!("Day ", d)));
    }
    out.push_str("</table></div>");
    out
}

fn row(out: &mut String, label: &str, value: Option<&str>) {
    let shown = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "N/A",
    };
    out.push_str(&format!(
        "<tr><td class=\"acad-label\">{label}</td><td>{shown}</td></tr>"
    ));
}
