//! Row mapping
//!
//! This module is the stateful core of the crate: it pairs tokenized field
//! values with column names to build records, while tracking skip-row and
//! header-row state across the lifetime of one input stream.
//!
//! Session lifecycle
//!
//!     A stream session moves through a small closed state machine:
//!
//!     Skipping -> AwaitingHeader -> Streaming
//!
//!     `reset()` places the session at the start state implied by the
//!     configuration (Skipping when leading rows must be discarded,
//!     AwaitingHeader when the first real row names the columns, Streaming
//!     otherwise) and is the only way to enable skip/header handling: a
//!     session that was never reset refuses configurations that need them,
//!     because counters carried over from a previous stream would corrupt
//!     the new one.
//!
//!     Column names are cleared by `reset()` only when a header row is
//!     expected; names assigned explicitly (a caller-supplied schema)
//!     persist across resets.
//!
//! Record building pairs names with values positionally up to the shorter
//! of the two sequences; trailing extras on either side are dropped without
//! error. Each paired value then passes through the multi-value split
//! policy and empty-to-null normalization.

use std::collections::HashMap;
use std::fmt;

use crate::flat::lexing::{CsvTokenizer, DelimitedTokenizer, LineTokenizer};
use crate::flat::naming::{self, NamingError};
use crate::flat::values::{normalize_empty, Record, Value};

/// Default separator for multi-value fields: the SOH control character, so
/// ordinary text is never split by accident.
pub const DEFAULT_LIST_DELIMITER: &str = "\u{1}";

/// Configuration for a [`RowMapper`], immutable for its lifetime.
///
/// When `multi_value_delimiters` is `None`, every field splits on
/// `list_delimiter`. When it is present, only the listed fields split (on
/// their own delimiter); all other fields stay scalar. The default list
/// delimiter is not a fallback for fields missing from a present map.
#[derive(Debug, Clone)]
pub struct MapperConfig {
    pub list_delimiter: String,
    pub multi_value_delimiters: Option<HashMap<String, String>>,
    pub has_header_row: bool,
    pub max_skip_header_rows: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig {
            list_delimiter: DEFAULT_LIST_DELIMITER.to_string(),
            multi_value_delimiters: None,
            has_header_row: false,
            max_skip_header_rows: 0,
        }
    }
}

/// Errors that can occur while mapping rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Header or skip options are configured but the session does not
    /// support them (it was never reset at stream start)
    UnsupportedConfiguration,
    /// A header line could not be turned into column names
    Header { line: String, reason: String },
    /// A data row could not be tokenized or mapped
    Row { line: String, reason: String },
}

impl MapError {
    fn header(line: &str, reason: impl fmt::Display) -> Self {
        MapError::Header {
            line: line.to_string(),
            reason: reason.to_string(),
        }
    }

    fn row(line: &str, reason: impl fmt::Display) -> Self {
        MapError::Row {
            line: line.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The offending input line, for errors that carry one.
    pub fn line(&self) -> Option<&str> {
        match self {
            MapError::UnsupportedConfiguration => None,
            MapError::Header { line, .. } | MapError::Row { line, .. } => Some(line),
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::UnsupportedConfiguration => write!(
                f,
                "has_header_row or max_skip_header_rows is configured but this \
                 session does not support it; reset() must be called at stream start"
            ),
            MapError::Header { line, reason } => {
                write!(f, "unable to parse header [{line}]: {reason}")
            }
            MapError::Row { line, reason } => write!(f, "unable to parse row [{line}]: {reason}"),
        }
    }
}

impl std::error::Error for MapError {}

/// The outcome of processing one input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row was a leading skip row; its content is discarded
    Skipped,
    /// The row was the header; column names are now assigned
    HeaderConsumed,
    /// The row mapped to a record
    Record(Record),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamPhase {
    Skipping,
    AwaitingHeader,
    Streaming,
}

/// Per-stream mutable state. Fully rebuilt on every reset.
#[derive(Debug, Clone)]
struct SessionState {
    column_names: Option<Vec<String>>,
    phase: StreamPhase,
    skipped_header_rows: usize,
    supports_header_skipping: bool,
}

impl SessionState {
    fn start(config: &MapperConfig) -> Self {
        let phase = if config.max_skip_header_rows > 0 {
            StreamPhase::Skipping
        } else if config.has_header_row {
            StreamPhase::AwaitingHeader
        } else {
            StreamPhase::Streaming
        };
        SessionState {
            column_names: None,
            phase,
            skipped_header_rows: 0,
            supports_header_skipping: false,
        }
    }
}

/// Stateful converter from raw lines to records.
///
/// One mapper serves one stream at a time; `reset()` starts the next
/// stream. Mappers are not safe for concurrent use without external
/// synchronization, but independent mappers share nothing mutable.
pub struct RowMapper {
    tokenizer: Box<dyn LineTokenizer>,
    config: MapperConfig,
    state: SessionState,
}

impl RowMapper {
    pub fn new(tokenizer: Box<dyn LineTokenizer>, config: MapperConfig) -> Self {
        let state = SessionState::start(&config);
        RowMapper {
            tokenizer,
            config,
            state,
        }
    }

    /// A mapper over the CSV dialect with its default delimiter.
    pub fn csv(config: MapperConfig) -> Self {
        RowMapper::new(Box::new(CsvTokenizer::default()), config)
    }

    /// A mapper over the plain-split dialect.
    pub fn delimited(delimiter: &str, config: MapperConfig) -> Self {
        RowMapper::new(Box::new(DelimitedTokenizer::new(delimiter)), config)
    }

    /// Start a new stream.
    ///
    /// Rebuilds the session state from the configuration, zeroes the skip
    /// counter, and enables skip/header handling. Column names are cleared
    /// only when a header row is expected; an explicitly assigned schema
    /// persists. Idempotent.
    pub fn reset(&mut self) {
        let column_names = if self.config.has_header_row {
            None
        } else {
            self.state.column_names.take()
        };
        self.state = SessionState::start(&self.config);
        self.state.column_names = column_names;
        self.state.supports_header_skipping = true;
    }

    /// The current column names, if any have been assigned.
    pub fn column_names(&self) -> Option<&[String]> {
        self.state.column_names.as_deref()
    }

    pub fn list_delimiter(&self) -> &str {
        &self.config.list_delimiter
    }

    /// Assign column names explicitly.
    ///
    /// Empty candidates are replaced positionally by generated default
    /// names, the full sequence is validated, and the previous names are
    /// overwritten in full. A validation failure leaves the previous names
    /// untouched.
    pub fn set_column_names<I>(&mut self, names: I) -> Result<(), NamingError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let resolved: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .enumerate()
            .map(|(position, name)| {
                if name.is_empty() {
                    naming::default_column_name(position)
                } else {
                    name
                }
            })
            .collect();
        naming::validate_column_names(&resolved)?;
        self.state.column_names = Some(resolved);
        Ok(())
    }

    /// Assign column names from a raw header line.
    ///
    /// The line is tokenized with this mapper's dialect; failures carry the
    /// offending line.
    pub fn set_column_names_from_header(&mut self, header: &str) -> Result<(), MapError> {
        let values = self
            .tokenizer
            .tokenize(header)
            .map_err(|error| MapError::header(header, error))?;
        self.set_column_names(values)
            .map_err(|error| MapError::header(header, error))
    }

    /// Process one raw line of the current stream.
    ///
    /// Rows are tokenized before the skip check, so a malformed skip row
    /// still surfaces as a row error. A schema-less stream (no header, no
    /// explicit names) takes its column count from its first data row.
    pub fn process_row(&mut self, line: &str) -> Result<RowOutcome, MapError> {
        if !self.state.supports_header_skipping
            && (self.config.has_header_row || self.config.max_skip_header_rows > 0)
        {
            return Err(MapError::UnsupportedConfiguration);
        }

        let values = self
            .tokenizer
            .tokenize(line)
            .map_err(|error| MapError::row(line, error))?;

        match self.state.phase {
            StreamPhase::Skipping => {
                self.state.skipped_header_rows += 1;
                if self.state.skipped_header_rows >= self.config.max_skip_header_rows {
                    self.state.phase = if self.config.has_header_row {
                        StreamPhase::AwaitingHeader
                    } else {
                        StreamPhase::Streaming
                    };
                }
                Ok(RowOutcome::Skipped)
            }
            StreamPhase::AwaitingHeader => {
                if self.state.column_names.is_none() {
                    self.set_column_names(values)
                        .map_err(|error| MapError::row(line, error))?;
                }
                self.state.phase = StreamPhase::Streaming;
                Ok(RowOutcome::HeaderConsumed)
            }
            StreamPhase::Streaming => {
                let names = self
                    .state
                    .column_names
                    .get_or_insert_with(|| naming::generate_column_names(values.len()));
                Ok(RowOutcome::Record(build_record(
                    &self.config,
                    names,
                    &values,
                )))
            }
        }
    }
}

/// Pair names with values up to the shorter sequence, splitting each value
/// per the multi-value policy.
fn build_record(config: &MapperConfig, names: &[String], values: &[String]) -> Record {
    names
        .iter()
        .zip(values.iter())
        .map(|(name, raw)| (name.clone(), split_value(config, name, raw)))
        .collect()
}

/// Resolve the effective delimiter for a field and split its value.
///
/// An absent override map means every field uses the default list
/// delimiter; a present map confines splitting to exactly its entries.
fn split_value(config: &MapperConfig, column: &str, raw: &str) -> Value {
    let delimiter = match &config.multi_value_delimiters {
        None => Some(config.list_delimiter.as_str()),
        Some(overrides) => overrides.get(column).map(String::as_str),
    };

    match delimiter {
        Some(delimiter) if !delimiter.is_empty() && raw.contains(delimiter) => {
            Value::Multi(raw.split(delimiter).map(normalize_empty).collect())
        }
        _ => match normalize_empty(raw) {
            Some(scalar) => Value::Scalar(scalar),
            None => Value::Null,
        },
    }
}
