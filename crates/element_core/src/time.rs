//! Timestamping for diagnostics entries.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_TIMESTAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns a unix millisecond timestamp, bumped past the previous return value
/// so entries stay strictly ordered even when the clock does not advance
/// between calls.
pub fn next_monotonic_timestamp_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    let now = js_sys::Date::now().max(0.0) as u64;

    #[cfg(not(target_arch = "wasm32"))]
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    LAST_TIMESTAMP_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    })
}
