//! # flatrow
//!
//! A row mapper for delimited flat-text formats (CSV, tab-delimited).
//!
//! The crate turns successive raw lines of a flat-text stream into ordered
//! key-value records, tracking header-row and skip-row state per stream.
//! See the [flat module](flat) for the processing pipeline.

pub mod flat;
