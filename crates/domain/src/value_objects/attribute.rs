//! The five character attributes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A character attribute.
///
/// Declaration order is sheet order (Agilidade first, Vigor last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Agilidade,
    #[serde(rename = "Astúcia")]
    Astucia,
    #[serde(rename = "Espírito")]
    Espirito,
    #[serde(rename = "Força")]
    Forca,
    Vigor,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Agilidade,
        Attribute::Astucia,
        Attribute::Espirito,
        Attribute::Forca,
        Attribute::Vigor,
    ];

    /// Canonical name as it appears in reference data and on the sheet.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Agilidade => "Agilidade",
            Attribute::Astucia => "Astúcia",
            Attribute::Espirito => "Espírito",
            Attribute::Forca => "Força",
            Attribute::Vigor => "Vigor",
        }
    }

    /// Three-letter tag used next to skill names.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Attribute::Agilidade => "Agi",
            Attribute::Astucia => "Ast",
            Attribute::Espirito => "Esp",
            Attribute::Forca => "For",
            Attribute::Vigor => "Vig",
        }
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "agilidade" => Ok(Attribute::Agilidade),
            "astúcia" | "astucia" => Ok(Attribute::Astucia),
            "espírito" | "espirito" => Ok(Attribute::Espirito),
            "força" | "forca" => Ok(Attribute::Forca),
            "vigor" => Ok(Attribute::Vigor),
            _ => Err(DomainError::parse(format!("Unknown attribute: {}", s))),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
