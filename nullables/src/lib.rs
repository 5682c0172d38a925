//! Nullable infrastructure for deterministic testing.
//!
//! The engines take the current time as an argument and compare identities
//! only for equality, so the only external inputs worth faking are the clock
//! and the caller's identity. The types here:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never read the system clock or key material
//!
//! Usage: hand a [`NullClock`] to anything that wants a `Clock`.

pub mod clock;
pub mod identities;

pub use clock::NullClock;
pub use identities::NullIdentities;
