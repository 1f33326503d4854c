//! Use cases - User story orchestration.

pub mod character_sheet;

pub use character_sheet::{CharacterSheetError, CharacterSheetSession};
