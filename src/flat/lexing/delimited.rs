//! Plain delimited line tokenizer
//!
//! Splits on a delimiter string with no quoting or escaping, the way
//! tab-delimited data is conventionally handled. This tokenizer never
//! fails: every line splits into at least one field.

use crate::flat::lexing::{LineTokenizer, TokenizeError};

/// Default delimiter for the plain-split dialect.
pub const DEFAULT_DELIMITER: &str = "\t";

/// Tokenizer that splits a line on a fixed delimiter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedTokenizer {
    delimiter: String,
}

impl DelimitedTokenizer {
    /// An empty delimiter degenerates under `str::split`; it falls back to
    /// the default.
    pub fn new(delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        let delimiter = if delimiter.is_empty() {
            DEFAULT_DELIMITER.to_string()
        } else {
            delimiter
        };
        DelimitedTokenizer { delimiter }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl Default for DelimitedTokenizer {
    fn default() -> Self {
        DelimitedTokenizer::new(DEFAULT_DELIMITER)
    }
}

impl LineTokenizer for DelimitedTokenizer {
    fn tokenize(&self, line: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(line
            .split(self.delimiter.as_str())
            .map(str::to_string)
            .collect())
    }
}
