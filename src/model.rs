// src/model.rs
//
// The normalized records the extractors produce and the cache persists.
// Field names follow the stored JSON shape; the cache is the wire format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identity panel data. Every field is optional: whichever extractor ran last
/// fills what it found, and the renderer shows "N/A" for the rest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: Option<String>,
    #[serde(rename = "registrationNo")]
    pub registration_no: Option<String>,
    #[serde(rename = "programmeBranch")]
    pub programme_branch: Option<String>,
    pub semester: Option<String>,
    pub section: Option<String>,
    #[serde(rename = "schoolDepartment")]
    pub school_department: Option<String>,
}

/// One course as seen from a timetable slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseInfo {
    pub title: String,
    pub classroom: String,
}

/// Slot code ("A1") → course. Stores whatever case the source produced;
/// lookups uppercase the probe (see render::timetable).
pub type CourseSlotMap = BTreeMap<String, CourseInfo>;

/// One attendance row. Full rows carry the hour counts; rows locked at term
/// end are the degenerate variant with only code/title/percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(rename = "courseCode")]
    pub course_code: String,
    #[serde(rename = "courseTitle")]
    pub course_title: String,
    #[serde(rename = "hoursConducted")]
    pub hours_conducted: Option<i64>,
    #[serde(rename = "absentHours")]
    pub absent_hours: Option<i64>,
    #[serde(rename = "attendedClasses")]
    pub attended_classes: Option<i64>,
    pub percentage: f64,
    #[serde(rename = "classesToSkip")]
    pub classes_to_skip: i64,
    #[serde(rename = "classesToAttend")]
    pub classes_to_attend: i64,
}

impl AttendanceRecord {
    pub fn is_locked(&self) -> bool {
        self.hours_conducted.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarksComponent {
    #[serde(rename = "ComponentName")]
    pub component_name: String,
    #[serde(rename = "MaxMarks")]
    pub max_marks: f64,
    #[serde(rename = "ObtainedMarks")]
    pub obtained_marks: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarksRecord {
    #[serde(rename = "CourseCode")]
    pub course_code: String,
    #[serde(rename = "CourseType")]
    pub course_type: String,
    #[serde(rename = "Components")]
    pub components: Vec<MarksComponent>,
    #[serde(rename = "TotalMaxMarks")]
    pub total_max_marks: f64,
    #[serde(rename = "TotalObtainedMarks")]
    pub total_obtained_marks: f64,
}

/// A user-authored per-slot override. An overlay over the scraped slot map,
/// never a replacement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditedSlot {
    #[serde(rename = "editedTitle")]
    pub edited_title: String,
    #[serde(rename = "editedClassroom")]
    pub edited_classroom: String,
}

/// Slot id (tooltip text minus the "Slot: " prefix) → override.
pub type EditedSlots = BTreeMap<String, EditedSlot>;

/// The full persisted snapshot, keyed per user. Everything except
/// `edited_slots` is re-derived on every background refresh.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedBundle {
    #[serde(rename = "profileData")]
    pub profile_data: Option<ProfileRecord>,
    #[serde(rename = "replacedTimetableHTML")]
    pub replaced_timetable_html: Option<String>,
    #[serde(rename = "editedSlots", default)]
    pub edited_slots: EditedSlots,
    #[serde(rename = "attendanceData", default)]
    pub attendance_data: Vec<AttendanceRecord>,
    #[serde(rename = "marksData", default)]
    pub marks_data: Vec<MarksRecord>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<String>,
}

impl CachedBundle {
    /// A bundle is paintable from cache only when every panel has data.
    pub fn is_complete(&self) -> bool {
        self.profile_data.is_some()
            && self.replaced_timetable_html.is_some()
            && !self.attendance_data.is_empty()
            && !self.marks_data.is_empty()
    }
}

/// The sibling record written by the live timetable-page path, stored under
/// its own namespace key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseBundle {
    #[serde(rename = "registrationNo")]
    pub registration_no: Option<String>,
    pub batch: Option<String>,
    pub courses: CourseSlotMap,
}
