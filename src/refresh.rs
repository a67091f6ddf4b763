// src/refresh.rs
//! # Background refresh
//!
//! The full scrape pipeline: registration page, timetable page, attendance
//! page, then one merged write to the cache. At most one refresh runs at a
//! time; a second request while one is in flight is a logged no-op, never a
//! queued duplicate.
//!
//! The merge is read-before-write: the stored bundle is re-read just before
//! persisting and only the scraped fields are replaced, so user slot edits
//! made at any point survive.

use std::collections::BTreeMap;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;

use crate::config::consts::{ATTENDANCE_PAGE, REGISTRATION_PAGE, UNIFIED_TIMETABLE_PAGES};
use crate::config::RefreshConfig;
use crate::extract;
use crate::loader::{Frame, PageSource};
use crate::model::{AttendanceRecord, CachedBundle, CourseBundle, MarksRecord};
use crate::notice::{Notices, Severity};
use crate::render;
use crate::specs;
use crate::store::{bundle_key, course_key, Store};

/// What a completed refresh hands back: the freshly persisted bundle, the
/// attendance rows it replaced (for trend rendering) and the code→title
/// cross-reference scraped next to the marks table (for marks cards).
pub struct RefreshOutcome {
    pub bundle: CachedBundle,
    pub previous_attendance: Vec<AttendanceRecord>,
    pub course_titles: BTreeMap<String, String>,
}

pub struct RefreshSession {
    in_flight: AtomicBool,
}

impl RefreshSession {
    pub fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one full refresh. `Ok(None)` means another refresh was already in
    /// flight and this request was dropped.
    pub fn run<S: PageSource>(
        &self,
        source: &mut S,
        store: &Store,
        cfg: RefreshConfig,
        notices: &mut dyn Notices,
    ) -> Result<Option<RefreshOutcome>, Box<dyn Error>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            logf!("refresh: already in flight, request dropped");
            return Ok(None);
        }
        let _guard = InFlightGuard(&self.in_flight);

        notices.notify(Severity::Info, "Refreshing portal data...");
        match self.run_inner(source, store, cfg) {
            Ok(outcome) => {
                notices.notify(Severity::Success, "Portal data refreshed.");
                Ok(Some(outcome))
            }
            Err(e) => {
                loge!("refresh: failed: {e}");
                notices.notify(Severity::Error, &format!("Refresh failed: {e}"));
                Err(e)
            }
        }
    }

    fn run_inner<S: PageSource>(
        &self,
        source: &mut S,
        store: &Store,
        cfg: RefreshConfig,
    ) -> Result<RefreshOutcome, Box<dyn Error>> {
        logf!("refresh: starting");

        // 1. Registration page: profile, slot map, identity.
        let reg_page = Frame::new(source, cfg).load(
            REGISTRATION_PAGE,
            &[
                specs::registration::WAIT_INFO_TABLE,
                specs::registration::WAIT_COURSE_TABLE,
            ],
        )?;
        let profile = extract::profile::extract(&reg_page, &specs::registration::PROFILE);
        let courses = extract::courses::extract_slot_map(&reg_page, &specs::registration::REGISTRATION);
        let registration_no =
            extract::courses::extract_registration_no(&reg_page, &specs::registration::REGISTRATION)
                .ok_or("registration number not found on registration page")?;
        let batch = extract::courses::extract_batch(&reg_page, &specs::registration::REGISTRATION);

        // 2. Timetable grid: batch page when known, registration page fallback.
        let grid = self.fetch_grid(source, cfg, batch.as_deref(), &reg_page)?;

        // Edits from the current cache shape the snapshot we are about to build.
        let prior: CachedBundle = store.get(&bundle_key(&registration_no)).unwrap_or_default();
        let normalized = render::timetable::normalize_grid(&grid);
        let replaced =
            render::timetable::replace_slots(&normalized, &courses, &prior.edited_slots);

        // 3. Attendance page: attendance rows plus marks.
        let att_page = Frame::new(source, cfg).load(
            ATTENDANCE_PAGE,
            &[specs::attendance::WAIT_ATTENDANCE_TABLE],
        )?;
        let attendance = extract::attendance::extract(&att_page, &specs::attendance::ATTENDANCE);
        let (marks, course_titles) = extract_marks_any_shape(&att_page);

        // 4. Merge and persist. Re-read so edits saved during the scrape win.
        let key = bundle_key(&registration_no);
        let current: CachedBundle = store.get(&key).unwrap_or_default();
        let previous_attendance = current.attendance_data.clone();

        let bundle = CachedBundle {
            profile_data: Some(profile),
            replaced_timetable_html: Some(replaced),
            edited_slots: current.edited_slots,
            attendance_data: attendance,
            marks_data: marks,
            last_updated: Some(Utc::now().to_rfc3339()),
        };
        store.set(&key, &bundle);

        store.set(
            &course_key(&registration_no),
            &CourseBundle {
                registration_no: Some(registration_no.clone()),
                batch,
                courses,
            },
        );

        logf!("refresh: done for {registration_no}");
        Ok(RefreshOutcome {
            bundle,
            previous_attendance,
            course_titles,
        })
    }

    /// The batch-specific unified timetable page carries the cleanest grid.
    /// An unknown batch, a failed page load or a missing grid all fall back
    /// to the grid embedded in the registration page.
    fn fetch_grid<S: PageSource>(
        &self,
        source: &mut S,
        cfg: RefreshConfig,
        batch: Option<&str>,
        reg_page: &str,
    ) -> Result<String, Box<dyn Error>> {
        if let Some(page) = batch.and_then(unified_page_for) {
            match Frame::new(source, cfg)
                .load(page, &[specs::timetable::WAIT_TIMETABLE_TABLE])
            {
                Ok(markup) => {
                    if let Some(grid) = extract::timetable::unified_grid(&markup) {
                        return Ok(grid);
                    }
                    logw!("refresh: no grid on {page}, falling back");
                }
                Err(e) => logw!("refresh: {page} failed ({e}), falling back"),
            }
        } else {
            logw!("refresh: batch unknown, using registration page grid");
        }

        extract::timetable::registration_grid(reg_page)
            .ok_or_else(|| "timetable grid not found on any page".into())
    }
}

impl Default for RefreshSession {
    fn default() -> Self {
        Self::new()
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn unified_page_for(batch: &str) -> Option<&'static str> {
    UNIFIED_TIMETABLE_PAGES
        .iter()
        .find(|(b, _)| *b == batch)
        .map(|(_, page)| *page)
}

/// The marks table moves between page variants; try each shape until one
/// yields rows.
fn extract_marks_any_shape(page: &str) -> (Vec<MarksRecord>, BTreeMap<String, String>) {
    for shape in [
        &specs::marks::ATTENDANCE_PAGE,
        &specs::marks::INLINE_FALLBACK,
        &specs::marks::ACADEMIC_STATUS,
    ] {
        let marks = extract::marks::extract(page, shape);
        if !marks.is_empty() {
            return (marks, extract::marks::extract_course_xref(page, shape));
        }
    }
    logw!("refresh: no marks table matched any known shape");
    (Vec::new(), Default::default())
}
