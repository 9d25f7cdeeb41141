//! Column naming
//!
//! Default names for unnamed columns, and structural validation of a full
//! name sequence. Names are positional: `column_1`, `column_2`, and so on,
//! so a schema-less stream still yields stable record keys.

use std::collections::HashSet;
use std::fmt;

/// Errors that can occur while validating column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// A name at the given position is empty
    Empty(usize),
    /// The same name appears more than once
    Duplicate(String),
}

impl fmt::Display for NamingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingError::Empty(position) => {
                write!(f, "column name at position {position} is empty")
            }
            NamingError::Duplicate(name) => write!(f, "duplicate column name '{name}'"),
        }
    }
}

impl std::error::Error for NamingError {}

/// The generated name for an unnamed column. Positions are 0-based, the
/// generated names 1-based.
pub fn default_column_name(position: usize) -> String {
    format!("column_{}", position + 1)
}

/// Generated names for every position of a row of the given width.
pub fn generate_column_names(len: usize) -> Vec<String> {
    (0..len).map(default_column_name).collect()
}

/// Check a full name sequence for structural validity: no empty names, no
/// duplicates.
pub fn validate_column_names(names: &[String]) -> Result<(), NamingError> {
    let mut seen = HashSet::new();
    for (position, name) in names.iter().enumerate() {
        if name.is_empty() {
            return Err(NamingError::Empty(position));
        }
        if !seen.insert(name.as_str()) {
            return Err(NamingError::Duplicate(name.clone()));
        }
    }
    Ok(())
}
