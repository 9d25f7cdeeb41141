//! CSV line tokenizer
//!
//! RFC-4180-style tokenization of a single line: fields are separated by a
//! delimiter character (`,` unless configured otherwise), a field may be
//! wrapped in double quotes, and a doubled quote inside a quoted field is an
//! escaped literal quote. The grammar is strict: a stray quote in a bare
//! field or trailing text after a closing quote is a tokenize error rather
//! than being passed through loosely.
//!
//! The grammar is built with chumsky combinators. The field parser is
//! reconstructed per call; splitting logic may be cached or recomputed
//! freely as long as results are identical, and lines are short enough that
//! construction cost is noise.

use chumsky::prelude::*;

use crate::flat::lexing::{LineTokenizer, TokenizeError};

/// Tokenizer for quoted CSV lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvTokenizer {
    delimiter: char,
}

impl CsvTokenizer {
    pub fn new(delimiter: char) -> Self {
        CsvTokenizer { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl Default for CsvTokenizer {
    fn default() -> Self {
        CsvTokenizer::new(',')
    }
}

impl LineTokenizer for CsvTokenizer {
    fn tokenize(&self, line: &str) -> Result<Vec<String>, TokenizeError> {
        line_parser(self.delimiter).parse(line).map_err(|errors| {
            let message = errors
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| "invalid line".to_string());
            TokenizeError::Syntax(message)
        })
    }
}

/// Parser for one full line: fields separated by the delimiter, anchored at
/// end of input.
fn line_parser(delimiter: char) -> impl Parser<char, Vec<String>, Error = Simple<char>> {
    let escaped_quote = just('"').then(just('"')).to('"');
    let quoted = just('"')
        .ignore_then(
            filter(|c: &char| *c != '"')
                .or(escaped_quote)
                .repeated()
                .map(|chars| chars.into_iter().collect::<String>()),
        )
        .then_ignore(just('"'));

    let bare = filter(move |c: &char| *c != delimiter && *c != '"')
        .repeated()
        .map(|chars: Vec<char>| chars.into_iter().collect::<String>());

    let field = quoted.or(bare);

    field.separated_by(just(delimiter)).then_ignore(end())
}
