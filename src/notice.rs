// src/notice.rs
// User-facing notices. The refresh pipeline reports through this seam so it
// never knows whether anything is watching; headless runs use NullNotices,
// tests use the buffered form.

/// How loudly to present a notice. `Critical` notices stay on screen until
/// dismissed; everything else may auto-expire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
    Critical,
}

pub trait Notices {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Discards everything. Notices still reach the log through the callers.
pub struct NullNotices;

impl Notices for NullNotices {
    fn notify(&mut self, _severity: Severity, _message: &str) {}
}

/// Collects notices in order. Test double.
#[derive(Default)]
pub struct BufferedNotices {
    pub entries: Vec<(Severity, String)>,
}

impl Notices for BufferedNotices {
    fn notify(&mut self, severity: Severity, message: &str) {
        self.entries.push((severity, s!(message)));
    }
}
