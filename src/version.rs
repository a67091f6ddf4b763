// src/version.rs
// Version check against the published version file. A newer published
// version raises a critical notice and asks the host to run its update check.

use std::cmp::Ordering;
use std::error::Error;

use crate::config::consts::{VERSION_HOST, VERSION_PATH};
use crate::net;
use crate::notice::{Notices, Severity};

/// What the host should do after a version check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateAction {
    UpToDate,
    RequestUpdateCheck,
}

/// Fetch the published version and compare against `current`.
pub fn check(current: &str, notices: &mut dyn Notices) -> Result<UpdateAction, Box<dyn Error>> {
    let published = net::http_get(VERSION_HOST, VERSION_PATH)?;
    Ok(evaluate(published.trim(), current, notices))
}

pub fn evaluate(published: &str, current: &str, notices: &mut dyn Notices) -> UpdateAction {
    if compare(published, current) == Ordering::Greater {
        logf!("version: {published} available, running {current}");
        notices.notify(
            Severity::Critical,
            &format!("Update available: v{published} (you have v{current}). Please update."),
        );
        UpdateAction::RequestUpdateCheck
    } else {
        UpdateAction::UpToDate
    }
}

/// Compare dotted version strings component-wise. Missing components count
/// as zero, so "1.2" == "1.2.0". Non-numeric components count as zero.
pub fn compare(a: &str, b: &str) -> Ordering {
    let pa: Vec<u64> = a.split('.').map(|c| c.trim().parse().unwrap_or(0)).collect();
    let pb: Vec<u64> = b.split('.').map(|c| c.trim().parse().unwrap_or(0)).collect();
    for i in 0..pa.len().max(pb.len()) {
        let ca = pa.get(i).copied().unwrap_or(0);
        let cb = pb.get(i).copied().unwrap_or(0);
        match ca.cmp(&cb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}
