//! Character build files.
//!
//! A build file is the player's input: a JSON object listing the selections
//! to apply on top of a fresh character. Every key is optional.
//!
//! ```json
//! {
//!   "name": "Rinaldo",
//!   "race": "Morgante",
//!   "attributes": { "Força": 8, "Vigor": 6 },
//!   "skills": { "Luta": 8, "Furtividade": 6 },
//!   "advantages": ["Briguento"],
//!   "complications": ["Procurado"],
//!   "equipment": { "Espada": 1, "Tocha": 3 }
//! }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use brancalonia_domain::{Attribute, CharacterState, DieSize, ReferenceData, SkillLevel};

#[derive(Debug, Error)]
pub enum BuildFileError {
    #[error("Failed to read build file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid build file {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Selections read from a build file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterBuild {
    pub name: Option<String>,
    pub race: Option<String>,
    pub attributes: IndexMap<Attribute, DieSize>,
    pub skills: IndexMap<String, SkillLevel>,
    pub advantages: Vec<String>,
    pub complications: Vec<String>,
    pub equipment: IndexMap<String, u32>,
}

impl CharacterBuild {
    pub fn from_path(path: &Path) -> Result<Self, BuildFileError> {
        let raw = std::fs::read_to_string(path).map_err(|source| BuildFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| BuildFileError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// A fresh character with these selections applied.
    ///
    /// The race goes first so explicit attribute values are not wiped by the
    /// race reset. Values under the race minimum are kept as written; the
    /// budget engine corrects them.
    pub fn to_state(&self, data: &ReferenceData) -> CharacterState {
        let mut state = CharacterState::new(data);
        if let Some(race) = &self.race {
            state.select_race(race.clone(), data);
        }
        for (attribute, die) in &self.attributes {
            state.set_attribute(*attribute, *die);
        }
        for (skill, level) in &self.skills {
            state.set_skill(skill.clone(), *level);
        }
        for advantage in &self.advantages {
            state.select_advantage(advantage.clone());
        }
        for complication in &self.complications {
            state.select_complication(complication.clone());
        }
        for (item, quantity) in &self.equipment {
            state.set_equipment_quantity(item.clone(), *quantity);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brancalonia_domain::{Race, RaceTable, SkillsDocument, TraitsDocument};

    fn data() -> ReferenceData {
        let mut races = RaceTable::new();
        races.insert("Humano".to_string(), Race::default());
        let mut morgante = Race::default();
        morgante.modifiers.insert("Força".to_string(), 1);
        races.insert("Morgante".to_string(), morgante);
        ReferenceData::new(
            races,
            SkillsDocument::default(),
            TraitsDocument::default(),
            Default::default(),
        )
    }

    #[test]
    fn race_is_applied_before_attributes() {
        let build: CharacterBuild = serde_json::from_str(
            r#"{ "race": "Morgante", "attributes": { "Força": 10, "Vigor": 6 } }"#,
        )
        .expect("parse");
        let state = build.to_state(&data());

        assert_eq!(state.race(), "Morgante");
        assert_eq!(state.attribute(Attribute::Forca), DieSize::D10);
        assert_eq!(state.attribute(Attribute::Vigor), DieSize::D6);
    }

    #[test]
    fn zero_quantities_and_untrained_skills_are_accepted() {
        let build: CharacterBuild = serde_json::from_str(
            r#"{ "skills": { "Luta": 0, "Navegar": 6 }, "equipment": { "Tocha": 0, "Faca": 2 } }"#,
        )
        .expect("parse");
        let state = build.to_state(&data());

        assert_eq!(state.skill("Luta"), SkillLevel::Untrained);
        assert_eq!(state.skill("Navegar"), SkillLevel::Trained(DieSize::D6));
        assert_eq!(state.equipment_lines(), vec!["2x Faca"]);
    }

    #[test]
    fn rejects_illegal_die_sizes() {
        let result: Result<CharacterBuild, _> =
            serde_json::from_str(r#"{ "attributes": { "Vigor": 7 } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = CharacterBuild::from_path(&dir.path().join("missing.json"))
            .expect_err("should fail");
        assert!(matches!(err, BuildFileError::Io { .. }));
    }

    #[test]
    fn empty_object_is_a_default_build() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("build.json");
        std::fs::write(&path, "{}").expect("write");
        let build = CharacterBuild::from_path(&path).expect("parse");
        assert_eq!(build, CharacterBuild::default());
    }
}
