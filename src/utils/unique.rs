//! Uniqueness helpers for names created during a test run.

use chrono::Utc;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::constants::RANDOM_SUFFIX_MAX;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Random integer in `0..RANDOM_SUFFIX_MAX`.
#[must_use]
pub fn random_suffix() -> u32 {
    rand::rng().random_range(0..RANDOM_SUFFIX_MAX)
}

/// `base` with a random numeric suffix, e.g. `town-4821`.
#[must_use]
pub fn unique_name(base: &str) -> String {
    format!("{base}-{}", random_suffix())
}

/// Current time in milliseconds followed by a process-wide sequence number.
///
/// Two calls in the same millisecond still differ.
#[must_use]
pub fn unique_token() -> String {
    let millis = Utc::now().timestamp_millis();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{millis}{seq}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn unique_name_appends_bounded_suffix() {
        for _ in 0..200 {
            let name = unique_name("town");
            let suffix = name.strip_prefix("town-").unwrap();
            let n: u32 = suffix.parse().unwrap();
            assert!(n < RANDOM_SUFFIX_MAX);
        }
    }

    #[test]
    fn unique_name_varies_across_calls() {
        let names: HashSet<String> = (0..50).map(|_| unique_name("team")).collect();
        assert!(names.len() > 1);
    }

    #[test]
    fn unique_token_never_repeats_in_tight_loop() {
        let tokens: HashSet<String> = (0..1000).map(|_| unique_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }
}
