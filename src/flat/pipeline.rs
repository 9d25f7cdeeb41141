//! Stream driving
//!
//! [`StreamRunner`] owns the caller loop: reset the mapper at stream start,
//! feed it lines one at a time, and collect the records. Row failures
//! either abort the stream or are recorded and skipped, per policy; the
//! mapper itself never forces stream termination on a bad row.

use crate::flat::mapping::{MapError, RowMapper, RowOutcome};
use crate::flat::values::Record;

/// What to do when a row fails to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the stream on the first failure
    #[default]
    Fail,
    /// Record the failure and continue with the next line
    SkipRow,
}

/// A row that failed to map, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub line_number: usize,
    pub error: MapError,
}

/// The result of driving one full stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamOutput {
    pub records: Vec<Record>,
    pub skipped_rows: usize,
    pub failures: Vec<RowFailure>,
}

/// Drives a [`RowMapper`] over the lines of one stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamRunner {
    policy: ErrorPolicy,
}

impl StreamRunner {
    pub fn new(policy: ErrorPolicy) -> Self {
        StreamRunner { policy }
    }

    /// Reset the mapper and process every line.
    ///
    /// Under [`ErrorPolicy::Fail`] the first row error aborts the run;
    /// under [`ErrorPolicy::SkipRow`] failures are collected in the output
    /// and processing continues.
    pub fn run<I>(&self, mapper: &mut RowMapper, lines: I) -> Result<StreamOutput, MapError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        mapper.reset();
        let mut output = StreamOutput::default();

        for (index, line) in lines.into_iter().enumerate() {
            match mapper.process_row(line.as_ref()) {
                Ok(RowOutcome::Record(record)) => output.records.push(record),
                Ok(RowOutcome::Skipped) => output.skipped_rows += 1,
                Ok(RowOutcome::HeaderConsumed) => {}
                Err(error) => match self.policy {
                    ErrorPolicy::Fail => return Err(error),
                    ErrorPolicy::SkipRow => output.failures.push(RowFailure {
                        line_number: index + 1,
                        error,
                    }),
                },
            }
        }

        Ok(output)
    }
}
