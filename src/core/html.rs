// src/core/html.rs
// Low-level HTML string manipulation helpers.
// These are deliberately naive but tailored to the portal's generated markup.
// They operate case-insensitively on ASCII tag/attribute names.
//
// The portal nests whole tables inside <td> cells (marks breakdowns), so block
// scanning for table/tr/td must be depth-aware; the naive first-close-tag scan
// is only safe for leaf tags.

/// Find the section between an opening tag (with attributes) and its matching
/// closing tag, case-insensitive. Returns the HTML *inside* the tags.
///
/// Example:
/// ```ignore
/// let inner = slice_between_ci(html, "<table class=course_tbl", "</table>");
/// ```
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let open_lc = to_lower(open_pat);
    let close_lc = to_lower(close_pat);

    let open_idx = lc.find(&open_lc)?;
    // Jump past the '>' of the opening tag
    let after_open = s[open_idx..].find('>')? + open_idx + 1;
    let close_idx_rel = lc[after_open..].find(&close_lc)?;
    Some(&s[after_open..after_open + close_idx_rel])
}

/// Find the next complete `<tag ...>...</tag>` block from `from` onwards,
/// case-insensitive, naive about nesting. Safe for tags that never nest
/// (strong, font, caption, th).
pub fn next_tag_block_ci(s: &str, open_tag: &str, close_tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open_lc = to_lower(open_tag);
    let close_lc = to_lower(close_tag);

    let start = lc.get(from..)?.find(&open_lc)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close_lc)?;
    let end = open_end + end_rel + close_tag.len();
    Some((start, end))
}

/// Find the next complete block for `tag`, counting nested same-tag openings so
/// the returned range covers the whole outer block. `tag` is the bare name
/// ("table", "tr", "td"). Returns (start, end_past_close).
pub fn next_tag_block_nested(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open_lc = join!("<", &to_lower(tag));
    let close_lc = join!("</", &to_lower(tag));

    let start = find_tag_open(&lc, &open_lc, from)?;
    let mut depth = 0usize;
    let mut pos = start;

    loop {
        let next_open = find_tag_open(&lc, &open_lc, pos);
        let next_close = lc[pos..].find(&close_lc).map(|i| i + pos);

        match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => {
                depth += 1;
                pos = o + open_lc.len();
            }
            (_, Some(c)) => {
                depth -= 1;
                let end = s[c..].find('>').map(|i| c + i + 1)?;
                if depth == 0 {
                    return Some((start, end));
                }
                pos = end;
            }
            // Unbalanced markup; bail rather than loop forever.
            _ => return None,
        }
    }
}

/// Locate `pat` (like "<tr") at a real tag boundary: the next character must be
/// whitespace or '>', so "<tr" does not match "<track" and "<table" does not
/// match nothing shorter.
fn find_tag_open(lc: &str, pat: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(pat) {
        let idx = pos + rel;
        match lc.as_bytes().get(idx + pat.len()) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' => return Some(idx),
            None => return None,
            _ => pos = idx + pat.len(),
        }
    }
    None
}

/// Byte ranges of every `tag` block that sits at the top level of `s`
/// (i.e. not inside a nested block of the same tag family). Used to walk the
/// rows of an outer table without descending into per-cell breakdown tables.
pub fn top_level_blocks(s: &str, tag: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = next_tag_block_nested(s, tag, pos) {
        out.push((b_s, b_e));
        pos = b_e;
    }
    out
}

/// The inner HTML of the `n`-th (0-based) top-level `<table>` block in `s`.
/// This is the string-scan stand-in for positional `table:nth-child` selectors.
pub fn nth_table_inner(s: &str, n: usize) -> Option<&str> {
    let (t_s, t_e) = top_level_blocks(s, "table").into_iter().nth(n)?;
    let block = &s[t_s..t_e];
    let open_end = block.find('>')? + 1;
    let close_start = block.rfind("</")?;
    if close_start <= open_end { return None; }
    Some(&block[open_end..close_start])
}

/// The full outer HTML of the `n`-th (0-based) top-level `<table>` block.
pub fn nth_table_outer(s: &str, n: usize) -> Option<&str> {
    let (t_s, t_e) = top_level_blocks(s, "table").into_iter().nth(n)?;
    Some(&s[t_s..t_e])
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return the INNER text without the wrapping tags (still may contain nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(open_end) = block.find('>') {
        if let Some(close_start) = block.rfind('<') {
            if close_start > open_end {
                return block[open_end + 1..close_start].to_string();
            }
        }
    }
    String::new()
}

/// Read an attribute value from the opening tag of `block`, matching both
/// `attr="value"` and `attr=value` forms. Case-insensitive attribute name.
pub fn attr_of_open_tag(block: &str, attr: &str) -> Option<String> {
    let open_end = block.find('>')?;
    let open = &block[..open_end];
    let lc = to_lower(open);
    let pat = join!(&to_lower(attr), "=");
    let mut pos = 0usize;
    loop {
        let idx = lc[pos..].find(&pat)? + pos;
        // attribute name boundary: preceded by whitespace
        if idx == 0 || !lc.as_bytes()[idx - 1].is_ascii_whitespace() {
            pos = idx + pat.len();
            continue;
        }
        let val_start = idx + pat.len();
        let rest = &open[val_start..];
        return Some(match rest.as_bytes().first() {
            Some(b'"') => {
                let end = rest[1..].find('"').map(|i| i + 1).unwrap_or(rest.len());
                rest[1..end].to_string()
            }
            _ => {
                let end = rest.find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                rest[..end].to_string()
            }
        });
    }
}

/// Remove all HTML tags `<...>` from the string, then collapse whitespace.
pub fn strip_tags(s: String) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    crate::core::sanitize::normalize_ws(&out)
}

/// Fast ASCII-only lowercasing for tag/attribute matching.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_table_block_spans_inner_table() {
        let html = r#"<table id=outer><tr><td><table><tr><td>x</td></tr></table></td></tr></table>"#;
        let (s, e) = next_tag_block_nested(html, "table", 0).unwrap();
        assert_eq!(s, 0);
        assert_eq!(e, html.len());
    }

    #[test]
    fn top_level_rows_skip_breakdown_rows() {
        let table = r#"<tr><td>a</td></tr><tr><td><table><tr><td>inner</td></tr></table></td></tr>"#;
        let rows = top_level_blocks(table, "tr");
        assert_eq!(rows.len(), 2);
        assert!(table[rows[1].0..rows[1].1].contains("inner"));
    }

    #[test]
    fn nth_table_is_positional() {
        let doc = "<div><table><tr><td>one</td></tr></table><p>x</p><table><tr><td>two</td></tr></table></div>";
        assert!(nth_table_inner(doc, 0).unwrap().contains("one"));
        assert!(nth_table_inner(doc, 1).unwrap().contains("two"));
        assert!(nth_table_inner(doc, 2).is_none());
    }

    #[test]
    fn attr_reads_quoted_and_bare() {
        let td = r#"<td title="Slot: A1" align=center>x</td>"#;
        assert_eq!(attr_of_open_tag(td, "title").as_deref(), Some("Slot: A1"));
        assert_eq!(attr_of_open_tag(td, "align").as_deref(), Some("center"));
        assert_eq!(attr_of_open_tag(td, "border"), None);
    }

    #[test]
    fn tag_open_requires_boundary() {
        let html = "<track></track><tr><td>x</td></tr>";
        let rows = top_level_blocks(html, "tr");
        assert_eq!(rows.len(), 1);
        assert!(html[rows[0].0..rows[0].1].starts_with("<tr>"));
    }
}
