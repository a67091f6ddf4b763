// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Ellipsis-truncate past `max` characters. Titles at or under the limit pass
/// through untouched; longer ones become exactly `max` chars plus "...".
pub fn truncate_ellipsis(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max).collect();
        join!(cut, "...")
    } else {
        s.to_string()
    }
}

/// First run of at least `min_len` consecutive ASCII digits, if any.
/// Stand-in for the registration-number pattern `\d{9,}`.
pub fn first_digit_run(s: &str, min_len: usize) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() { i += 1; }
            if i - start >= min_len {
                return Some(&s[start..i]);
            }
        } else {
            i += 1;
        }
    }
    None
}

/// First decimal number in the text (`\d+(\.\d+)?`), e.g. from "87.50 %".
pub fn first_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() { i += 1; }
            if i < bytes.len() && bytes[i] == b'.' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit()) {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() { i += 1; }
            }
            return s[start..i].parse().ok();
        }
        i += 1;
    }
    None
}

/// Split a component label of the form "Name/MaxMarks" at the *last* slash,
/// parsing the right side as a number. Mirrors the pattern `(.+)\/([\d.]+)`.
pub fn split_component_label(s: &str) -> Option<(String, f64)> {
    let idx = s.rfind('/')?;
    let name = s[..idx].trim();
    if name.is_empty() { return None; }
    let max: f64 = s[idx + 1..].trim().parse().ok()?;
    Some((name.to_string(), max))
}

/// Course-code recovery by string difference: remove the first occurrence of
/// the trailer text (the nested element's own text) from the raw cell text.
/// Fragile to whitespace drift in the source, kept deliberately.
pub fn strip_trailer(raw: &str, trailer: &str) -> String {
    if trailer.is_empty() {
        return raw.trim().to_string();
    }
    raw.replacen(trailer, "", 1).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_exact() {
        let long = "a".repeat(50);
        let cut = truncate_ellipsis(&long, 38);
        assert_eq!(cut.len(), 41);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_ellipsis("short", 38), "short");
        // boundary: exactly 38 chars is untouched
        let exact = "b".repeat(38);
        assert_eq!(truncate_ellipsis(&exact, 38), exact);
    }

    #[test]
    fn digit_runs_respect_min_len() {
        assert_eq!(first_digit_run("RA2211003011234 (2023)", 9), Some("2211003011234"));
        assert_eq!(first_digit_run("Batch 2", 9), None);
    }

    #[test]
    fn first_number_variants() {
        assert_eq!(first_number("87.50 %"), Some(87.5));
        assert_eq!(first_number("100"), Some(100.0));
        assert_eq!(first_number("n/a"), None);
    }

    #[test]
    fn component_label_splits_at_last_slash() {
        assert_eq!(
            split_component_label("CLA-1/25.00"),
            Some(("CLA-1".to_string(), 25.0))
        );
        assert_eq!(split_component_label("/25"), None);
        assert_eq!(split_component_label("no-slash"), None);
    }

    #[test]
    fn trailer_stripping_is_first_occurrence_only() {
        assert_eq!(strip_trailer("21CSC203P Regular", "Regular"), "21CSC203P");
        assert_eq!(strip_trailer("ABC", ""), "ABC");
    }
}
