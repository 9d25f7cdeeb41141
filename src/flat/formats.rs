//! Flat-text dialects
//!
//! The two supported input dialects and their default field delimiters.

use serde::Deserialize;

use crate::flat::lexing::{CsvTokenizer, DelimitedTokenizer, LineTokenizer};

/// A flat-text input dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlatTextFormat {
    Csv,
    Delimited,
}

impl FlatTextFormat {
    /// The field delimiter used when none is configured.
    pub fn default_delimiter(&self) -> &'static str {
        match self {
            FlatTextFormat::Csv => ",",
            FlatTextFormat::Delimited => "\t",
        }
    }

    /// Build the line tokenizer for this dialect.
    ///
    /// The CSV dialect delimits on a single character; a longer override is
    /// truncated to its first character.
    pub fn tokenizer(&self, delimiter: Option<&str>) -> Box<dyn LineTokenizer> {
        match self {
            FlatTextFormat::Csv => {
                let delimiter = delimiter.and_then(|d| d.chars().next()).unwrap_or(',');
                Box::new(CsvTokenizer::new(delimiter))
            }
            FlatTextFormat::Delimited => {
                Box::new(DelimitedTokenizer::new(delimiter.unwrap_or("\t")))
            }
        }
    }
}
