// src/extract/timetable.rs
// Locating the timetable grid on either page that carries one. The grid is
// kept as markup: render::timetable rewrites its cells, the cache stores the
// rewritten snapshot verbatim.

use crate::core::html;
use crate::specs::timetable::{GRID_TABLE_OPEN, SNAPSHOT_CAPTION, UNIFIED_TABLE_INDEX};

/// The grid on the batch-specific unified timetable page. Position first,
/// marker scan as fallback when the portal shuffles its wrapper markup.
pub fn unified_grid(page: &str) -> Option<String> {
    if let Some(outer) = html::nth_table_outer(page, UNIFIED_TABLE_INDEX) {
        if looks_like_grid(outer) {
            return Some(with_caption(outer));
        }
    }
    grid_at_marker(page).map(|g| with_caption(&g))
}

/// The grid embedded on the registration page, found by its marker alone.
pub fn registration_grid(page: &str) -> Option<String> {
    grid_at_marker(page).map(|g| with_caption(&g))
}

/// Stamp the snapshot caption onto the grid, replacing the portal's own
/// caption when one exists.
fn with_caption(grid: &str) -> String {
    let caption = join!("<caption>", SNAPSHOT_CAPTION, "</caption>");
    if let Some((c_s, c_e)) = html::next_tag_block_ci(grid, "<caption", "</caption>", 0) {
        return join!(&grid[..c_s], &caption, &grid[c_e..]);
    }
    match grid.find('>') {
        Some(open_end) => join!(&grid[..open_end + 1], &caption, &grid[open_end + 1..]),
        None => s!(grid),
    }
}

fn grid_at_marker(page: &str) -> Option<String> {
    let lc = html::to_lower(page);
    let at = lc.find(&html::to_lower(GRID_TABLE_OPEN))?;
    let (s, e) = html::next_tag_block_nested(page, "table", at)?;
    Some(page[s..e].to_string())
}

fn looks_like_grid(outer: &str) -> bool {
    html::to_lower(outer).contains(r#"border="5""#)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: &str = r#"<table align="center" border="5"><tr><td>Day 1</td><td>A1</td></tr></table>"#;

    #[test]
    fn unified_grid_by_position() {
        let page = format!(
            "<div><table></table><table></table><table></table><table></table>{GRID}</div>"
        );
        let grid = unified_grid(&page).unwrap();
        assert!(grid.starts_with("<table"));
        assert!(grid.contains(SNAPSHOT_CAPTION));
        assert!(grid.contains("Day 1"));
    }

    #[test]
    fn unified_grid_falls_back_to_marker() {
        // grid not at the expected position
        let page = format!("<div><table></table>{GRID}</div>");
        assert!(unified_grid(&page).unwrap().contains("Day 1"));
    }

    #[test]
    fn registration_grid_by_marker() {
        let page = format!("<div><table class=course_tbl></table>{GRID}</div>");
        assert!(registration_grid(&page).unwrap().contains("Day 1"));
        assert_eq!(registration_grid("<div>no grid</div>"), None);
    }

    #[test]
    fn portal_caption_is_replaced_not_duplicated() {
        let page = r#"<div><table align="center" border="5"><caption class=t1>Unified Time Table</caption><tr><td>Day 1</td></tr></table></div>"#;
        let grid = registration_grid(page).unwrap();
        assert_eq!(grid.matches("<caption").count(), 1);
        assert!(grid.contains(SNAPSHOT_CAPTION));
        assert!(!grid.contains("Unified Time Table"));
    }
}
