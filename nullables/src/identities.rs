//! Deterministic caller identities.

use std::sync::atomic::{AtomicU8, Ordering};
use tally_types::Identity;

/// Hands out distinct, reproducible identities.
///
/// Identity `n` is 32 bytes of `n`, so seed 0 would be the null identity and
/// sequences start at 1.
#[derive(Debug)]
pub struct NullIdentities {
    next: AtomicU8,
}

impl NullIdentities {
    pub fn new() -> Self {
        Self {
            next: AtomicU8::new(1),
        }
    }

    /// The identity for a fixed seed.
    pub fn seeded(seed: u8) -> Identity {
        Identity::new([seed; 32])
    }

    /// The next unused identity. Wraps after 255 and skips the null identity.
    pub fn next_identity(&self) -> Identity {
        let mut seed = self.next.fetch_add(1, Ordering::SeqCst);
        if seed == 0 {
            seed = self.next.fetch_add(1, Ordering::SeqCst);
        }
        Self::seeded(seed)
    }
}

impl Default for NullIdentities {
    fn default() -> Self {
        Self::new()
    }
}
