//! Reference data loader.
//!
//! Reads the four JSON documents from the data directory and converts them to
//! domain tables. A missing or malformed file is not fatal: it is logged and
//! replaced by an empty table, and the lenient lookups in the domain take it
//! from there.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use brancalonia_domain::{
    EquipmentCatalog, RaceTable, ReferenceData, SkillsDocument, TraitsDocument,
};

use super::ports::ReferenceDataSource;

pub const RACES_FILE: &str = "racas.json";
pub const SKILLS_FILE: &str = "pericias.json";
pub const TRAITS_FILE: &str = "vantagens.json";
pub const EQUIPMENT_FILE: &str = "equipamento.json";

/// Why a single document could not be read.
#[derive(Debug, Error)]
enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads reference data from a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonReferenceLoader {
    data_dir: PathBuf,
}

impl JsonReferenceLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load every table, degrading failures to empty tables.
    pub fn load_all(&self) -> ReferenceData {
        let races: RaceTable = self.load_or_default(RACES_FILE);
        let skills: SkillsDocument = self.load_or_default(SKILLS_FILE);
        let traits: TraitsDocument = self.load_or_default(TRAITS_FILE);
        let equipment: EquipmentCatalog = self.load_or_default(EQUIPMENT_FILE);

        tracing::info!(
            data_dir = %self.data_dir.display(),
            races = races.len(),
            skills = skills.skills.len(),
            advantages = traits.advantages.len(),
            complications = traits.complications.len(),
            equipment_categories = equipment.len(),
            "Loaded reference data"
        );

        ReferenceData::new(races, skills, traits, equipment)
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, file_name: &str) -> T {
        let path = self.data_dir.join(file_name);
        match read_document(&path) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Reference document unavailable, using an empty table"
                );
                T::default()
            }
        }
    }
}

impl ReferenceDataSource for JsonReferenceLoader {
    fn load(&self) -> ReferenceData {
        self.load_all()
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
