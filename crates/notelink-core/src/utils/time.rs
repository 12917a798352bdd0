use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in epoch milliseconds, the `lastModified` unit.
///
/// Core operations take explicit `now` arguments so they stay deterministic
/// under test; this is the clock the session's `*_now` conveniences feed
/// them.
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis() as u64
}
