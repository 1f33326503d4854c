//! Brancalonia sheet engine library.
//!
//! ## Structure
//!
//! - `use_cases/` - The character sheet session (validate, mutate, recompute, export)
//! - `infrastructure/` - Reference JSON files, build files and the PDF template
//! - `config` - Environment configuration

pub mod config;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end tests over the shipped data directory.
#[cfg(test)]
mod e2e_tests;

pub use config::AppConfig;
pub use use_cases::{CharacterSheetError, CharacterSheetSession};
