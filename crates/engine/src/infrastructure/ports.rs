//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Reference data (could swap JSON files -> embedded tables)
//! - Sheet export (could swap the PDF template -> another document writer)

use brancalonia_domain::{ReferenceData, SheetField};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Sheet template not available at {0}")]
    TemplateUnavailable(String),
    #[error("Sheet template has no form")]
    MissingForm,
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for ExportError {
    fn from(err: lopdf::Error) -> Self {
        Self::Pdf(err.to_string())
    }
}

// =============================================================================
// Ports
// =============================================================================

/// Source of the read-only reference tables.
///
/// Implementations never fail: unreadable sources degrade to empty tables.
#[cfg_attr(test, mockall::automock)]
pub trait ReferenceDataSource: Send + Sync {
    fn load(&self) -> ReferenceData;
}

/// Writes sheet fields into a document and returns its bytes.
#[cfg_attr(test, mockall::automock)]
pub trait SheetExporter: Send + Sync {
    fn export(&self, fields: &[SheetField]) -> Result<Vec<u8>, ExportError>;
}
