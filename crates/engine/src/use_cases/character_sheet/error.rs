//! Character sheet operation errors.

use brancalonia_domain::DomainError;

use crate::infrastructure::ports::ExportError;

/// Errors that can occur during character sheet operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterSheetError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Export unavailable: {0}")]
    ExportUnavailable(String),

    #[error("Export error: {0}")]
    Export(ExportError),
}

impl From<ExportError> for CharacterSheetError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::TemplateUnavailable(path) => {
                Self::ExportUnavailable(format!("sheet template not found at {}", path))
            }
            other => Self::Export(other),
        }
    }
}

impl CharacterSheetError {
    /// True when the template is missing rather than broken.
    pub fn is_export_unavailable(&self) -> bool {
        matches!(self, Self::ExportUnavailable(_))
    }
}
