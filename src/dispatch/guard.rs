//! One-shot initialization flag

use std::sync::atomic::{AtomicBool, Ordering};

/// Flag that can be claimed exactly once
///
/// Concurrent claimers race on a compare-and-set; exactly one of them wins.
#[derive(Debug, Default)]
pub struct InitGuard {
    claimed: AtomicBool,
}

impl InitGuard {
    /// An unclaimed guard
    pub const fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
        }
    }

    /// Claim the guard. Returns `true` only for the first caller.
    pub fn claim(&self) -> bool {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether some caller already claimed the guard
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }
}
