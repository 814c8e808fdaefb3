//! Synthetic attendance, leave and quick-stat data, served while real
//! history collection is pending. Every generator takes the reference day
//! and the random source as parameters, so handlers pass `thread_rng()` and
//! tests pass a seeded generator.

pub mod attendance;
pub mod leave;
pub mod stats;
