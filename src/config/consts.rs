// src/config/consts.rs

// Net config
pub const HOST: &str = "academia.university.edu";
pub const PORTAL_PREFIX: &str = "/portal/";

// Portal pages (hash fragments in the live portal; plain paths here)
pub const REGISTRATION_PAGE: &str = "My_Time_Table";
pub const ATTENDANCE_PAGE: &str = "My_Attendance";
pub const UNIFIED_TIMETABLE_PAGES: &[(&str, &str)] = &[
    ("1", "Unified_Time_Table_Batch_1"),
    ("2", "Unified_Time_Table_Batch_2"),
];

// Backend sync + version check
pub const SYNC_HOST: &str = "acad-backend.onrender.com";
pub const SYNC_PATH: &str = "/save-data";
pub const VERSION_HOST: &str = "raw.githubusercontent.com";
pub const VERSION_PATH: &str = "/acad-scrape/acad-scrape/main/version.txt";

// Local cache
pub const STORE_DIR: &str = ".store";
pub const NAMESPACE: &str = "acadData";
pub const COURSE_NAMESPACE: &str = "acadCourseData";

// Extraction
pub const TITLE_MAX: usize = 38; // course titles, ellipsis-truncated past this
pub const XREF_TITLE_MAX: usize = 47; // marks cross-reference titles
pub const TARGET_PERCENTAGE: f64 = 75.0;

// Retry / wait budgets (defaults; see config::settings for the overridable form)
pub const ELEMENT_WAIT_MS: u64 = 10_000;
pub const POLL_INTERVAL_MS: u64 = 200;
pub const MAX_CONTAINER_RETRIES: u32 = 20;
pub const CONTAINER_RETRY_DELAY_MS: u64 = 500;
