// src/extract/profile.rs
// Student identity fields from the registration page's info table.

use crate::core::html;
use crate::model::ProfileRecord;
use crate::specs::registration::ProfileShape;

use super::cell_at;

/// Read the five profile fields off the info table. Every field is optional:
/// a moved cell leaves its field unset rather than failing the whole record.
pub fn extract(page: &str, shape: &ProfileShape) -> ProfileRecord {
    let Some(table) = html::nth_table_inner(page, shape.table_index) else {
        logw!("profile: info table #{} not found", shape.table_index);
        return ProfileRecord::default();
    };

    let mut rec = ProfileRecord {
        name: cell_at(table, shape.name),
        registration_no: cell_at(table, shape.registration_no),
        programme_branch: cell_at(table, shape.programme_branch),
        semester: cell_at(table, shape.semester),
        section: None,
        school_department: None,
    };

    if let Some(combined) = cell_at(table, shape.school_section) {
        let (dept, section) = split_school_section(&combined);
        rec.school_department = Some(dept);
        rec.section = section;
    }

    rec
}

/// Split "School of Computing - (T1 Section)" into department and section.
/// The department loses a trailing dash, the bracketed part loses its parens
/// and the literal "Section" word. Without a parenthesis the whole string is
/// the department and the section stays unset.
fn split_school_section(combined: &str) -> (String, Option<String>) {
    let trimmed = combined.trim();
    let Some(open) = trimmed.rfind('(') else {
        return (trimmed.to_string(), None);
    };

    let mut dept = trimmed[..open].trim_end();
    if let Some(stripped) = dept.strip_suffix('-') {
        dept = stripped.trim_end();
    }

    let mut section: String = trimmed[open..]
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .collect();
    if let Some(stripped) = html::to_lower(section.trim_end())
        .strip_suffix("section")
        .map(str::len)
    {
        section.truncate(stripped);
    }
    let section = section.trim();

    if dept.is_empty() || section.is_empty() {
        return (trimmed.to_string(), None);
    }
    (dept.to_string(), Some(section.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::registration::PROFILE;

    const INFO_TABLE: &str = r#"
    <div class=cntdDiv><table border=1>
      <tr><td>Registration No.</td><td>RA2211003011234</td><td>Name</td><td><strong>JANE DOE</strong></td></tr>
      <tr><td>Batch</td><td>2</td><td>Mobile</td><td>9999999999</td></tr>
      <tr><td>Program</td><td>B.Tech - CSE</td><td>Department</td><td>School of Computing (T1)</td></tr>
      <tr><td>Semester</td><td>4</td><td>Year</td><td>2</td></tr>
    </table></div>"#;

    #[test]
    fn reads_all_fields() {
        let rec = extract(INFO_TABLE, &PROFILE);
        assert_eq!(rec.name.as_deref(), Some("JANE DOE"));
        assert_eq!(rec.registration_no.as_deref(), Some("RA2211003011234"));
        assert_eq!(rec.programme_branch.as_deref(), Some("B.Tech - CSE"));
        assert_eq!(rec.semester.as_deref(), Some("4"));
        assert_eq!(rec.school_department.as_deref(), Some("School of Computing"));
        assert_eq!(rec.section.as_deref(), Some("T1"));
    }

    #[test]
    fn dash_and_section_suffix_are_stripped() {
        let (dept, section) = split_school_section("School of Computing - (T1 Section)");
        assert_eq!(dept, "School of Computing");
        assert_eq!(section.as_deref(), Some("T1"));
    }

    #[test]
    fn department_without_section_stays_whole() {
        let (dept, section) = split_school_section("School of Computing");
        assert_eq!(dept, "School of Computing");
        assert_eq!(section, None);
    }

    #[test]
    fn missing_table_yields_empty_record() {
        let rec = extract("<div>nothing here</div>", &PROFILE);
        assert_eq!(rec, ProfileRecord::default());
    }
}
