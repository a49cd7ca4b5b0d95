use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Current epoch milliseconds, bumped past the last value handed out so ids
/// stay unique when two records are created within the same millisecond.
pub fn next_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ISSUED.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ISSUED.compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}

pub fn user_id() -> String {
    next_millis().to_string()
}

pub fn login_id() -> String {
    format!("login_{}", next_millis())
}

pub fn failed_login_id() -> String {
    format!("failed_{}", next_millis())
}
