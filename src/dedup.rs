//! Cross-task deduplication and harvest capacity.
//!
//! Every per-day task consults the same [`SharedHarvestState`] before doing
//! any extraction work for a link. The set of seen URLs and the remaining
//! capacity live behind one lock and change together in [`SharedHarvestState::try_claim`],
//! so two tasks can never both observe a URL as unseen, and the number of
//! claimed URLs never exceeds the capacity the state was created with.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome of a claim attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// The URL was new and capacity remained; the caller owns it now.
    Accepted,
    /// Another task (or an earlier link on the same page) already claimed it.
    Duplicate,
    /// No capacity left for this harvest.
    Exhausted,
}

#[derive(Debug)]
struct ClaimState {
    seen: HashSet<String>,
    remaining: usize,
}

/// Seen-URL set plus remaining capacity, shared by all in-flight day tasks.
#[derive(Debug)]
pub struct SharedHarvestState {
    inner: Mutex<ClaimState>,
}

impl SharedHarvestState {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(ClaimState {
                seen: HashSet::new(),
                remaining: capacity,
            }),
        }
    }

    /// Insert `url` if it is unseen and capacity remains, in one step.
    pub fn try_claim(&self, url: &str) -> Claim {
        let mut state = self.lock();
        if state.seen.contains(url) {
            return Claim::Duplicate;
        }
        if state.remaining == 0 {
            return Claim::Exhausted;
        }
        state.seen.insert(url.to_string());
        state.remaining -= 1;
        Claim::Accepted
    }

    pub fn remaining(&self) -> usize {
        self.lock().remaining
    }

    pub fn claimed(&self) -> usize {
        self.lock().seen.len()
    }

    // Poison is ignored: nothing panics between the set insert and the decrement.
    fn lock(&self) -> MutexGuard<'_, ClaimState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
