//! Timestamp conversion helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Converts a filesystem timestamp to signed unix milliseconds.
///
/// Times before the epoch come back negative; values beyond `i64` saturate.
pub fn system_time_to_unix_ms(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
        Err(err) => i64::try_from(err.duration().as_millis())
            .map(|before| -before)
            .unwrap_or(i64::MIN),
    }
}
