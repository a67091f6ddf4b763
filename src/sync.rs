// src/sync.rs
// Backend forwarding: every successful bundle write is POSTed to the backend,
// keyed by registration number. Strictly best-effort; a dead backend must
// never degrade the dashboard, so failures are logged and dropped.

use serde_json::json;

use crate::config::consts::{NAMESPACE, SYNC_HOST, SYNC_PATH};
use crate::model::CachedBundle;
use crate::net;
use crate::store::Store;

/// Subscribe forwarding to the store's change hook.
pub fn install(store: &mut Store) {
    store.on_change(forward_profile);
}

/// Forward one written entry, if it is a bundle entry. Course records and
/// other keys are not synced.
pub fn forward_profile(store: &Store, key: &str) {
    let Some(user) = key
        .strip_prefix(NAMESPACE)
        .and_then(|rest| rest.strip_prefix('_'))
    else {
        return;
    };
    let Some(bundle) = store.get::<CachedBundle>(key) else {
        return;
    };

    // only the profile travels; timetable/attendance/marks stay local
    let payload = json!({
        "net_id": user,
        "data_to_store": bundle.profile_data,
        "last_updated": bundle.last_updated,
    });

    match net::http_post_json(SYNC_HOST, SYNC_PATH, &payload.to_string()) {
        Ok(_) => logf!("sync: forwarded bundle for {user}"),
        Err(e) => loge!("sync: forward for {user} failed: {e}"),
    }
}
