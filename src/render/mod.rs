// src/render/mod.rs
//! # Renderers
//!
//! From cached records to panel markup. Two kinds live here:
//!
//! - Snapshot renderers build panel HTML from the cache alone. These run on
//!   every dashboard paint and must work offline.
//! - Live annotators rewrite markup fetched this session (margin cells on the
//!   attendance table, total cells on the marks table). They only run when
//!   the user is actually on that portal page.
//!
//! Renderers never mutate the cache and never trigger a refresh.

use std::collections::BTreeMap;

use crate::model::{AttendanceRecord, CachedBundle};

pub mod attendance;
pub mod marks;
pub mod profile;
pub mod timetable;

/// Session context the cache alone cannot provide. Everything is optional;
/// a cold paint straight from the cache uses the default.
#[derive(Default)]
pub struct DashboardContext<'a> {
    /// Current day order from the live page banner.
    pub day_order: Option<&'a str>,
    /// Attendance rows displaced by the latest refresh, for trend arrows.
    pub previous_attendance: Option<&'a [AttendanceRecord]>,
    /// Title cross-reference scraped alongside the marks table; overrides
    /// the titles derived from attendance rows.
    pub course_titles: Option<&'a BTreeMap<String, String>>,
}

/// Assemble the full dashboard from a cached bundle. Panels degrade to
/// placeholders for whatever the bundle is missing.
pub fn render_dashboard(bundle: &CachedBundle, ctx: &DashboardContext) -> String {
    let mut out = s!(r#"<div class="acad-dashboard">"#);
    out.push_str(&profile::render(bundle.profile_data.as_ref(), ctx.day_order));

    if let Some(grid) = &bundle.replaced_timetable_html {
        let grid = match ctx.day_order {
            Some(d) => timetable::highlight_day_order(grid, d),
            None => grid.clone(),
        };
        out.push_str(&grid);
    } else {
        out.push_str(r#"<p class="acad-empty">Timetable not cached yet.</p>"#);
    }

    out.push_str(&attendance::render(
        &bundle.attendance_data,
        ctx.previous_attendance,
    ));

    let mut titles = marks::title_xref(&bundle.attendance_data);
    if let Some(extra) = ctx.course_titles {
        for (code, title) in extra {
            titles.insert(code.clone(), title.clone());
        }
    }
    out.push_str(&marks::render(&bundle.marks_data, &titles));
    out.push_str("</div>");
    out
}
