//! Unified error types for the domain layer
//!
//! The budget rules never fail; these errors come from parsing value objects
//! and from rejecting selections that do not exist in the reference data.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., a value outside the die ladder)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Reference entry not found
    #[error("{entity_type} not found: {name}")]
    NotFound {
        entity_type: &'static str,
        name: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for values outside the allowed ranges.
    ///
    /// # Example
    /// ```ignore
    /// if !(4..=12).contains(&value) {
    ///     return Err(DomainError::validation(format!("d{value} is not a die size")));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            name: name.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant:
    ///
    /// ```ignore
    /// impl FromStr for Attribute {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "Vigor" => Ok(Self::Vigor),
    ///             _ => Err(DomainError::parse(format!("Unknown attribute: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
