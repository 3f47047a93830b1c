//! # Error Types Module
//!
//! This module defines the error type used throughout the groceries library.
//! All fallible operations return these structured errors instead of panicking.

/// Errors raised by grocery list and ingredient operations
#[derive(Debug, Clone, PartialEq)]
pub enum GroceryError {
    /// Contract violations on input data (e.g. building an ingredient from
    /// an empty component list)
    InvalidInput(String),
    /// Two ingredients with different identities (name + dimension) were
    /// combined
    IdentityMismatch { expected: String, found: String },
    /// The unit configuration could not be compiled into a registry
    InvalidUnitDefinition(String),
}

impl std::fmt::Display for GroceryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroceryError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            GroceryError::IdentityMismatch { expected, found } => {
                write!(f, "Identity mismatch: expected '{expected}', found '{found}'")
            }
            GroceryError::InvalidUnitDefinition(msg) => {
                write!(f, "Invalid unit definition: {msg}")
            }
        }
    }
}

impl std::error::Error for GroceryError {}

impl From<regex::Error> for GroceryError {
    fn from(err: regex::Error) -> Self {
        GroceryError::InvalidUnitDefinition(err.to_string())
    }
}
