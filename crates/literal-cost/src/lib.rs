//! Per-byte bit-cost estimates for the literals of an LZ77-style compressor.
//!
//! Given a window of the compressor's ring buffer, the estimator assigns every
//! byte the number of bits an entropy coder would roughly spend on it, based on
//! how often the byte occurs nearby. Block splitters use the signal to find
//! places where the literal statistics change.
//!
//! Windows that are mostly UTF-8 are modelled with separate statistics for
//! sequence starts, second bytes and third bytes; everything else uses a single
//! wide histogram. Nothing here encodes data.
//!
//! ```rust
//! let costs = literal_cost::literal_costs(b"abababababababab, then something new");
//! assert_eq!(costs.len(), 36);
//! assert!(costs.iter().all(|c| c.is_finite() && *c >= 0.5));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cost;
mod error;
mod histogram;
mod options;
mod ring;
mod utf8;

#[cfg(test)]
mod tests;

pub use cost::{LiteralCostEstimator, estimate_literal_costs, estimate_literal_costs_for, literal_costs};
pub use error::WindowError;
pub use histogram::{ALPHABET_SIZE, Histogram};
pub use options::{EstimatorOptions, ModelChoice};
pub use ring::RingWindow;
pub use utf8::{
    CONTEXT_CLASSES, ContextCensus, ContextLevel, DecodedUnit, INVALID_UNIT, context_class_at,
    decide_context_level, decode_unit, is_mostly_utf8, next_context_class, units, valid_utf8_len,
};
