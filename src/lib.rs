#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod slots;

/// An open-addressed set of `i64` values with linear probing and an in-band
/// empty-slot sentinel.
pub mod probe_set;

/// Occupancy and probe-length diagnostics, behind the `stats` feature.
#[cfg(feature = "stats")]
pub mod stats;

pub use probe_set::IntegerProbeSet;
#[cfg(feature = "stats")]
pub use stats::ProbeStats;
