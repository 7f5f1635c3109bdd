//! Identifier and timestamp generation.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST_TICK: AtomicI64 = AtomicI64::new(0);

/// Current time in nanoseconds since the epoch, strictly increasing across
/// calls within this process.
pub fn monotonic_nanos() -> i64 {
    let now = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros().saturating_mul(1000));
    let prev = LAST_TICK
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        .unwrap_or_else(|last| last);
    now.max(prev + 1)
}

/// Generate an identifier of the form `<prefix>-<nanos>`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, monotonic_nanos())
}

/// Current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_monotonic_nanos_strictly_increasing() {
        let mut last = monotonic_nanos();
        for _ in 0..1000 {
            let next = monotonic_nanos();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn test_generated_ids_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id("process")).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.starts_with("process-")));
    }
}
