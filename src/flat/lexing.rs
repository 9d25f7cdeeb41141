//! Line tokenizers
//!
//! A line tokenizer splits one raw line of text into an ordered sequence of
//! field values, per dialect. The mapper core never inspects raw text
//! itself; everything dialect-specific (quoting, escaping, the field
//! delimiter) lives behind the [`LineTokenizer`] trait.
//!
//! Two dialects are provided:
//! - [`CsvTokenizer`]: RFC-4180-style CSV with double-quoted fields
//! - [`DelimitedTokenizer`]: plain split on a delimiter string, no quoting

pub mod csv;
pub mod delimited;

pub use csv::CsvTokenizer;
pub use delimited::DelimitedTokenizer;

use std::fmt;

/// Errors that can occur during line tokenization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// The line does not conform to the dialect's grammar
    Syntax(String),
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::Syntax(msg) => write!(f, "tokenize error: {msg}"),
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Trait for line tokenizer implementations
///
/// Tokenizers are synchronous and side-effect-free; an empty line tokenizes
/// to a single empty field in every dialect.
pub trait LineTokenizer: Send + Sync {
    /// Split one raw line into its field values
    fn tokenize(&self, line: &str) -> Result<Vec<String>, TokenizeError>;
}
