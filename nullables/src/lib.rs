//! Nullable infrastructure for deterministic testing.
//!
//! The only external dependency of the WorkID core is wall-clock time.
//! [`NullClock`] stands in for [`workid_types::SystemClock`]: it returns a
//! fixed instant and only moves when a test tells it to.

pub mod clock;

pub use clock::NullClock;
