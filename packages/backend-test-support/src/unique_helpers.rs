//! Helpers for generating unique test data.
//!
//! Player identity is external to the engine, so tests just need ids that
//! never collide across concurrently running tests.

use std::sync::atomic::{AtomicI64, Ordering};

static NEXT_PLAYER_ID: AtomicI64 = AtomicI64::new(1_000);

/// Allocate a player id unique within the test process.
pub fn unique_player_id() -> i64 {
    NEXT_PLAYER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Allocate a host/guest pair of distinct player ids.
pub fn unique_player_pair() -> (i64, i64) {
    (unique_player_id(), unique_player_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct() {
        let (a, b) = unique_player_pair();
        let c = unique_player_id();
        assert_ne!(a, b);
        assert_ne!(b, c);
    }
}
