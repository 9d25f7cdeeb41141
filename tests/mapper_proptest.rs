//! Property-based tests for the row mapper and tokenizers
//!
//! These ensure the core never panics on arbitrary input and that the
//! stream-level invariants hold for all configurations.

use proptest::prelude::*;

use flatrow::flat::lexing::{CsvTokenizer, DelimitedTokenizer, LineTokenizer};
use flatrow::flat::mapping::{MapperConfig, RowMapper, RowOutcome};

/// Generate plausible flat-text lines: printable text with delimiters and
/// quotes sprinkled in.
fn line_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 ]{0,8}",
            Just(",".to_string()),
            Just("\t".to_string()),
            Just("\"".to_string()),
            Just("|".to_string()),
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn test_csv_tokenizer_never_panics(line in line_strategy()) {
        // Malformed lines are errors, not panics
        let _ = CsvTokenizer::default().tokenize(&line);
    }

    #[test]
    fn test_delimited_tokenizer_never_fails(line in line_strategy()) {
        let tokens = DelimitedTokenizer::default().tokenize(&line).unwrap();
        prop_assert!(!tokens.is_empty());
    }

    #[test]
    fn test_mapper_never_panics(lines in prop::collection::vec(line_strategy(), 0..8)) {
        let mut mapper = RowMapper::delimited("\t", MapperConfig::default());
        mapper.reset();
        for line in &lines {
            let _ = mapper.process_row(line);
        }
    }

    #[test]
    fn test_first_n_rows_after_reset_are_skipped(
        skip in 0usize..6,
        lines in prop::collection::vec("[a-z,]{0,10}", 1..10),
    ) {
        let mut mapper = RowMapper::csv(MapperConfig {
            max_skip_header_rows: skip,
            ..MapperConfig::default()
        });
        mapper.reset();

        for (index, line) in lines.iter().enumerate() {
            let outcome = mapper.process_row(line).unwrap();
            if index < skip {
                prop_assert_eq!(&outcome, &RowOutcome::Skipped);
                // Skip rows never establish column names
                prop_assert!(mapper.column_names().is_none());
            } else {
                prop_assert_ne!(&outcome, &RowOutcome::Skipped);
            }
        }
    }

    #[test]
    fn test_record_width_never_exceeds_schema(
        values in prop::collection::vec("[a-z0-9]{0,6}", 1..10),
    ) {
        let mut mapper = RowMapper::delimited("\t", MapperConfig::default());
        mapper.reset();
        mapper.set_column_names(vec!["a", "b", "c"]).unwrap();

        let line = values.join("\t");
        match mapper.process_row(&line).unwrap() {
            RowOutcome::Record(record) => {
                prop_assert!(record.len() <= 3);
                prop_assert!(record.len() <= values.len());
            }
            outcome => prop_assert!(false, "expected a record, got {:?}", outcome),
        }
    }

    #[test]
    fn test_header_streams_yield_exactly_one_header(
        lines in prop::collection::vec("[a-z]{1,6}(,[a-z]{1,6}){0,4}", 2..8),
    ) {
        let mut mapper = RowMapper::csv(MapperConfig {
            has_header_row: true,
            ..MapperConfig::default()
        });
        mapper.reset();

        let mut headers = 0;
        let mut records = 0;
        for line in &lines {
            match mapper.process_row(line) {
                Ok(RowOutcome::HeaderConsumed) => {
                    headers += 1;
                    // Records never precede the header
                    prop_assert_eq!(records, 0);
                }
                Ok(RowOutcome::Record(_)) => records += 1,
                Ok(RowOutcome::Skipped) => prop_assert!(false, "no skip rows configured"),
                // A header with duplicate names is rejected and retried
                Err(_) => {}
            }
        }
        prop_assert!(headers <= 1);
        if records > 0 {
            prop_assert_eq!(headers, 1);
        }
    }
}
