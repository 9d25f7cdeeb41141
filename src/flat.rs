//! Flat-text row mapping
//!
//! This module converts lines of a delimited flat-text format (CSV or
//! tab-delimited) into ordered key-value records.
//!
//! The pipeline consists of:
//! 1. Line tokenization ([lexing]) - one raw line becomes an ordered
//!    sequence of field values, per dialect (CSV quoting vs. plain split)
//! 2. Row mapping ([mapping]) - the stateful core that tracks skip rows,
//!    header consumption, and column names across one stream, and pairs
//!    column names with values to build records
//! 3. Stream driving ([pipeline]) - resets a mapper at stream start and
//!    feeds it lines one at a time, collecting records
//!
//! Column naming and validation live in [naming], record value types in
//! [values], dialect selection in [formats], and the layered configuration
//! loader in [settings].
//!
//! Header Handling
//!
//!     A stream may start with rows that are not data: up to
//!     `max_skip_header_rows` rows are discarded outright, and when
//!     `has_header_row` is set the next row names the columns instead of
//!     producing a record. Both behaviors only work on a session that has
//!     been reset at stream start; the mapper refuses them otherwise, since
//!     skip and header counters from a previous stream would silently
//!     corrupt the new one.

pub mod formats;
pub mod lexing;
pub mod mapping;
pub mod naming;
pub mod pipeline;
pub mod settings;
pub mod testing;
pub mod values;

pub use formats::FlatTextFormat;
pub use lexing::{CsvTokenizer, DelimitedTokenizer, LineTokenizer, TokenizeError};
pub use mapping::{MapError, MapperConfig, RowMapper, RowOutcome, DEFAULT_LIST_DELIMITER};
pub use naming::NamingError;
pub use pipeline::{ErrorPolicy, RowFailure, StreamOutput, StreamRunner};
pub use values::{Record, Value};
