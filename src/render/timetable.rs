// src/render/timetable.rs
// The two grid rewrites: slot codes → course cells, and day-order
// highlighting. Both are string-to-string over the grid markup.

use crate::core::html;
use crate::model::{CourseSlotMap, EditedSlots};

/// Rewrite every slot cell of the grid into its course: title, classroom and
/// a `title="Slot: X"` tooltip carrying the slot id. User edits override the
/// scraped course for their slot.
///
/// Idempotent: a cell that already carries the tooltip is re-derived from it,
/// so running the replacement over an already-replaced grid (cached snapshot,
/// second refresh in one session) changes nothing but stale titles.
pub fn replace_slots(grid: &str, courses: &CourseSlotMap, edits: &EditedSlots) -> String {
    let mut out = String::with_capacity(grid.len());
    let mut pos = 0usize;

    for (c_s, c_e) in html::top_level_blocks(grid, "td") {
        out.push_str(&grid[pos..c_s]);
        let cell = &grid[c_s..c_e];
        match slot_id_of(cell, courses, edits) {
            Some(slot) => out.push_str(&replacement_cell(&slot, courses, edits)),
            None => out.push_str(cell),
        }
        pos = c_e;
    }
    out.push_str(&grid[pos..]);
    out
}

/// Which slot this cell stands for, if any. Tooltip first (already-replaced
/// cell), then the cell's own text probed uppercase against both maps.
fn slot_id_of(cell: &str, courses: &CourseSlotMap, edits: &EditedSlots) -> Option<String> {
    if let Some(tip) = html::attr_of_open_tag(cell, "title") {
        if let Some(slot) = tip.strip_prefix("Slot: ") {
            return Some(slot.to_string());
        }
    }
    let text = html::strip_tags(html::inner_after_open_tag(cell));
    let probe = text.trim().to_ascii_uppercase();
    if !probe.is_empty() && (courses.contains_key(&probe) || edits.contains_key(&probe)) {
        return Some(probe);
    }
    None
}

fn replacement_cell(slot: &str, courses: &CourseSlotMap, edits: &EditedSlots) -> String {
    let (title, classroom) = match edits.get(slot) {
        Some(e) => (e.edited_title.clone(), e.edited_classroom.clone()),
        None => match courses.get(slot) {
            Some(c) => (c.title.clone(), c.classroom.clone()),
            // tooltip names a slot no longer registered; keep the bare code
            None => (s!(slot), s!()),
        },
    };
    format!(
        r#"<td title="Slot: {slot}" class="acad-slot">{title}<br>{classroom}</td>"#
    )
}

/// Structural cleanup of a freshly fetched grid before slot replacement:
/// the first header cell becomes "Time", the portal's second header row goes
/// (and the "Hour/Day Order" row above the days when present), leading "TO"
/// label cells go, and the two trailing junk columns are dropped from every
/// row.
///
/// Only ever applied to raw portal markup; a cached snapshot was normalized
/// before it was stored.
pub fn normalize_grid(grid: &str) -> String {
    let blocks = html::top_level_blocks(grid, "tr");
    let mut rows: Vec<&str> = blocks.iter().map(|&(s, e)| &grid[s..e]).collect();

    if rows.len() > 2 {
        if first_cell_text(rows[2]).contains("Hour/Day Order") {
            rows.remove(2);
        }
        rows.remove(1);
    }

    let mut out = String::with_capacity(grid.len());
    if let Some(&(first_s, _)) = blocks.first() {
        out.push_str(&grid[..first_s]);
    } else {
        return s!(grid);
    }
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&normalize_row(row, i == 0));
    }
    if let Some(&(_, last_e)) = blocks.last() {
        out.push_str(&grid[last_e..]);
    }
    out
}

fn normalize_row(row: &str, is_header: bool) -> String {
    let blocks = html::top_level_blocks(row, "td");
    let mut cells: Vec<String> = blocks.iter().map(|&(s, e)| s!(&row[s..e])).collect();

    if let Some(first) = cells.first() {
        if html::strip_tags(html::inner_after_open_tag(first)).trim() == "TO" {
            cells.remove(0);
        }
    }
    if cells.len() >= 2 {
        cells.truncate(cells.len() - 2);
    }
    if is_header {
        if let Some(first) = cells.first_mut() {
            if let Some(open_end) = first.find('>') {
                *first = join!(&first[..open_end + 1], "Time</td>");
            }
        }
    }

    let Some(&(first_s, _)) = blocks.first() else {
        return s!(row);
    };
    let Some(&(_, last_e)) = blocks.last() else {
        return s!(row);
    };
    let mut out = s!(&row[..first_s]);
    for c in &cells {
        out.push_str(c);
    }
    out.push_str(&row[last_e..]);
    out
}

fn first_cell_text(row: &str) -> String {
    match html::top_level_blocks(row, "td").first() {
        Some(&(s, e)) => html::strip_tags(html::inner_after_open_tag(&row[s..e])),
        None => s!(),
    }
}

/// Dim every day row except the current one. Rows are recognized by a first
/// cell starting with "Day"; the matching row keeps full opacity and gets a
/// highlight class.
pub fn highlight_day_order(grid: &str, day_order: &str) -> String {
    let current = join!("Day ", day_order.trim());
    let mut out = String::with_capacity(grid.len());
    let mut pos = 0usize;

    for (r_s, r_e) in html::top_level_blocks(grid, "tr") {
        out.push_str(&grid[pos..r_s]);
        let row = &grid[r_s..r_e];
        out.push_str(&style_row(row, &current));
        pos = r_e;
    }
    out.push_str(&grid[pos..]);
    out
}

fn style_row(row: &str, current: &str) -> String {
    let cells = html::top_level_blocks(row, "td");
    let Some(&(f_s, f_e)) = cells.first() else {
        return s!(row); // header row of th cells
    };
    let label = html::strip_tags(html::inner_after_open_tag(&row[f_s..f_e]));
    if !label.trim_start().starts_with("Day") {
        return s!(row);
    }

    let open_end = match row.find('>') {
        Some(i) => i,
        None => return s!(row),
    };
    let style = if label.trim() == current {
        r#" class="acad-day-current""#
    } else {
        r#" style="opacity:0.45""#
    };
    join!(&row[..open_end], style, &row[open_end..])
}
