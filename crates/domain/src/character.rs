//! Character State aggregate.
//!
//! Holds the selections a player makes while building a character. Every
//! mutation is a plain method; none of them consult budgets, because an
//! over-budget build is shown to the player, never refused.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::reference::ReferenceData;
use crate::value_objects::{Attribute, DieSize, SkillLevel};

/// An attribute raised back to its race minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeCorrection {
    pub attribute: Attribute,
    pub from: DieSize,
    pub to: DieSize,
}

/// The mutable selections of one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterState {
    race: String,
    attributes: BTreeMap<Attribute, DieSize>,
    skills: IndexMap<String, SkillLevel>,
    advantages: IndexSet<String>,
    complications: IndexSet<String>,
    equipment: IndexMap<String, u32>,
}

impl CharacterState {
    /// A fresh character: default race, attributes at that race's minimums,
    /// core skills at d4 and everything else untrained.
    pub fn new(data: &ReferenceData) -> Self {
        let race = data.default_race().to_string();
        let attributes = minimum_attributes(data, &race);
        let skills = data
            .skills()
            .iter()
            .map(|skill| {
                let level = if skill.core {
                    SkillLevel::Trained(DieSize::D4)
                } else {
                    SkillLevel::Untrained
                };
                (skill.name.clone(), level)
            })
            .collect();

        Self {
            race,
            attributes,
            skills,
            advantages: IndexSet::new(),
            complications: IndexSet::new(),
            equipment: IndexMap::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn race(&self) -> &str {
        &self.race
    }

    /// Current die for an attribute.
    pub fn attribute(&self, attribute: Attribute) -> DieSize {
        self.attributes
            .get(&attribute)
            .copied()
            .unwrap_or(DieSize::D4)
    }

    /// All five attributes in sheet order.
    pub fn attributes(&self) -> impl Iterator<Item = (Attribute, DieSize)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.attribute(a)))
    }

    pub fn skill(&self, name: &str) -> SkillLevel {
        self.skills.get(name).copied().unwrap_or_default()
    }

    pub fn skills(&self) -> impl Iterator<Item = (&str, SkillLevel)> {
        self.skills.iter().map(|(name, level)| (name.as_str(), *level))
    }

    /// Skills above 0, in order.
    pub fn active_skills(&self) -> impl Iterator<Item = (&str, DieSize)> {
        self.skills
            .iter()
            .filter_map(|(name, level)| level.die().map(|die| (name.as_str(), die)))
    }

    pub fn advantages(&self) -> impl Iterator<Item = &str> {
        self.advantages.iter().map(String::as_str)
    }

    pub fn complications(&self) -> impl Iterator<Item = &str> {
        self.complications.iter().map(String::as_str)
    }

    pub fn advantage_count(&self) -> usize {
        self.advantages.len()
    }

    pub fn has_advantage(&self, name: &str) -> bool {
        self.advantages.contains(name)
    }

    pub fn has_complication(&self, name: &str) -> bool {
        self.complications.contains(name)
    }

    pub fn equipment(&self) -> impl Iterator<Item = (&str, u32)> {
        self.equipment.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    /// Quantity held; 0 when absent.
    pub fn quantity(&self, item: &str) -> u32 {
        self.equipment.get(item).copied().unwrap_or(0)
    }

    /// Sheet lines: "3x Tocha" for stacks, the bare name for single items.
    pub fn equipment_lines(&self) -> Vec<String> {
        self.equipment
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(name, qty)| {
                if *qty > 1 {
                    format!("{}x {}", qty, name)
                } else {
                    name.clone()
                }
            })
            .collect()
    }

    // =========================================================================
    // Race and attributes
    // =========================================================================

    /// Change race. Attributes reset to the new race's minimums so no stale
    /// value from the previous race survives. Returns false when unchanged.
    pub fn select_race(&mut self, race: impl Into<String>, data: &ReferenceData) -> bool {
        let race = race.into();
        if race == self.race {
            return false;
        }
        self.attributes = minimum_attributes(data, &race);
        self.race = race;
        true
    }

    /// Set an attribute directly. Values under the race minimum are accepted
    /// here and corrected by [`Self::enforce_attribute_minimums`].
    pub fn set_attribute(&mut self, attribute: Attribute, die: DieSize) {
        self.attributes.insert(attribute, die);
    }

    /// One step up, stopping at d12.
    pub fn raise_attribute(&mut self, attribute: Attribute) -> bool {
        match self.attribute(attribute).step_up() {
            Some(next) => {
                self.attributes.insert(attribute, next);
                true
            }
            None => false,
        }
    }

    /// One step down, never under d4 or the race minimum.
    pub fn lower_attribute(&mut self, attribute: Attribute, data: &ReferenceData) -> bool {
        let minimum = data.attribute_minimum(&self.race, attribute);
        match self.attribute(attribute).step_down() {
            Some(next) if next >= minimum => {
                self.attributes.insert(attribute, next);
                true
            }
            _ => false,
        }
    }

    /// Raise every attribute that sits under its race minimum.
    pub fn enforce_attribute_minimums(&mut self, data: &ReferenceData) -> Vec<AttributeCorrection> {
        let mut corrections = Vec::new();
        for attribute in Attribute::ALL {
            let minimum = data.attribute_minimum(&self.race, attribute);
            let current = self.attribute(attribute);
            if current < minimum {
                self.attributes.insert(attribute, minimum);
                corrections.push(AttributeCorrection {
                    attribute,
                    from: current,
                    to: minimum,
                });
            }
        }
        corrections
    }

    // =========================================================================
    // Skills
    // =========================================================================

    pub fn set_skill(&mut self, name: impl Into<String>, level: SkillLevel) {
        self.skills.insert(name.into(), level);
    }

    /// One rung up, stopping at d12.
    pub fn raise_skill(&mut self, name: &str) -> bool {
        let current = self.skill(name);
        let next = current.raise();
        if next == current {
            return false;
        }
        self.skills.insert(name.to_string(), next);
        true
    }

    /// One rung down. Core skills stop at d4.
    pub fn lower_skill(&mut self, name: &str, data: &ReferenceData) -> bool {
        let current = self.skill(name);
        let next = current.lower();
        if next == current || (data.skill_is_core(name) && !next.is_trained()) {
            return false;
        }
        self.skills.insert(name.to_string(), next);
        true
    }

    // =========================================================================
    // Advantages and complications
    // =========================================================================

    /// Returns false if it was already selected.
    pub fn select_advantage(&mut self, name: impl Into<String>) -> bool {
        self.advantages.insert(name.into())
    }

    pub fn deselect_advantage(&mut self, name: &str) -> bool {
        self.advantages.shift_remove(name)
    }

    /// Returns false if it was already selected.
    pub fn select_complication(&mut self, name: impl Into<String>) -> bool {
        self.complications.insert(name.into())
    }

    pub fn deselect_complication(&mut self, name: &str) -> bool {
        self.complications.shift_remove(name)
    }

    // =========================================================================
    // Equipment
    // =========================================================================

    /// Check an item: quantity 1 if it was not owned.
    pub fn add_equipment(&mut self, name: impl Into<String>) {
        self.equipment.entry(name.into()).or_insert(1);
    }

    /// Quantity 0 removes the item.
    pub fn set_equipment_quantity(&mut self, name: impl Into<String>, quantity: u32) {
        let name = name.into();
        if quantity == 0 {
            self.equipment.shift_remove(&name);
        } else {
            self.equipment.insert(name, quantity);
        }
    }

    pub fn remove_equipment(&mut self, name: &str) -> bool {
        self.equipment.shift_remove(name).is_some()
    }
}

fn minimum_attributes(data: &ReferenceData, race: &str) -> BTreeMap<Attribute, DieSize> {
    Attribute::ALL
        .into_iter()
        .map(|a| (a, data.attribute_minimum(race, a)))
        .collect()
}

/// A single user action on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CharacterAction {
    SelectRace { race: String },
    RaiseAttribute { attribute: Attribute },
    LowerAttribute { attribute: Attribute },
    RaiseSkill { skill: String },
    LowerSkill { skill: String },
    SelectAdvantage { advantage: String },
    DeselectAdvantage { advantage: String },
    SelectComplication { complication: String },
    DeselectComplication { complication: String },
    SetEquipmentQuantity { item: String, quantity: u32 },
}

impl CharacterState {
    /// Apply an action. Returns whether the state changed.
    pub fn apply(&mut self, action: &CharacterAction, data: &ReferenceData) -> bool {
        match action {
            CharacterAction::SelectRace { race } => self.select_race(race.clone(), data),
            CharacterAction::RaiseAttribute { attribute } => self.raise_attribute(*attribute),
            CharacterAction::LowerAttribute { attribute } => self.lower_attribute(*attribute, data),
            CharacterAction::RaiseSkill { skill } => self.raise_skill(skill),
            CharacterAction::LowerSkill { skill } => self.lower_skill(skill, data),
            CharacterAction::SelectAdvantage { advantage } => self.select_advantage(advantage.clone()),
            CharacterAction::DeselectAdvantage { advantage } => self.deselect_advantage(advantage),
            CharacterAction::SelectComplication { complication } => {
                self.select_complication(complication.clone())
            }
            CharacterAction::DeselectComplication { complication } => {
                self.deselect_complication(complication)
            }
            CharacterAction::SetEquipmentQuantity { item, quantity } => {
                let before = self.quantity(item);
                self.set_equipment_quantity(item.clone(), *quantity);
                before != *quantity
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{
        EquipmentCatalog, Race, RaceTable, SkillDefinition, SkillsDocument, TraitsDocument,
    };

    fn data() -> ReferenceData {
        let mut races = RaceTable::new();
        races.insert("Humano".to_string(), Race::default());
        let mut morgante = Race::default();
        morgante.modifiers.insert("Força".to_string(), 1);
        races.insert("Morgante".to_string(), morgante);

        let skills = SkillsDocument {
            starting_points: 12,
            skills: vec![
                SkillDefinition::new("Atletismo", Attribute::Agilidade, true),
                SkillDefinition::new("Luta", Attribute::Agilidade, false),
                SkillDefinition::new("Percepção", Attribute::Astucia, true),
            ],
        };
        ReferenceData::new(
            races,
            skills,
            TraitsDocument::default(),
            EquipmentCatalog::default(),
        )
    }

    #[test]
    fn new_character_uses_defaults() {
        let data = data();
        let state = CharacterState::new(&data);

        assert_eq!(state.race(), "Humano");
        assert!(state.attributes().all(|(_, die)| die == DieSize::D4));
        assert_eq!(state.skill("Atletismo"), SkillLevel::Trained(DieSize::D4));
        assert_eq!(state.skill("Luta"), SkillLevel::Untrained);
        let active: Vec<&str> = state.active_skills().map(|(name, _)| name).collect();
        assert_eq!(active, vec!["Atletismo", "Percepção"]);
        assert_eq!(state.advantage_count(), 0);
        assert!(state.equipment_lines().is_empty());
    }

    #[test]
    fn race_change_resets_attributes_to_new_minimums() {
        let data = data();
        let mut state = CharacterState::new(&data);
        state.raise_attribute(Attribute::Vigor);
        state.raise_attribute(Attribute::Vigor);

        assert!(state.select_race("Morgante", &data));
        assert_eq!(state.attribute(Attribute::Forca), DieSize::D6);
        assert_eq!(state.attribute(Attribute::Vigor), DieSize::D4);

        state.raise_attribute(Attribute::Vigor);
        assert!(!state.select_race("Morgante", &data));
        assert_eq!(state.attribute(Attribute::Vigor), DieSize::D6);
    }

    #[test]
    fn attributes_stay_within_ladder_and_race_minimum() {
        let data = data();
        let mut state = CharacterState::new(&data);
        state.select_race("Morgante", &data);

        assert!(!state.lower_attribute(Attribute::Forca, &data));
        assert_eq!(state.attribute(Attribute::Forca), DieSize::D6);
        assert!(!state.lower_attribute(Attribute::Agilidade, &data));

        for _ in 0..10 {
            state.raise_attribute(Attribute::Agilidade);
        }
        assert_eq!(state.attribute(Attribute::Agilidade), DieSize::D12);
        assert!(!state.raise_attribute(Attribute::Agilidade));
    }

    #[test]
    fn enforce_minimums_reports_corrections() {
        let data = data();
        let mut state = CharacterState::new(&data);
        state.select_race("Morgante", &data);
        state.set_attribute(Attribute::Forca, DieSize::D4);

        let corrections = state.enforce_attribute_minimums(&data);
        assert_eq!(
            corrections,
            vec![AttributeCorrection {
                attribute: Attribute::Forca,
                from: DieSize::D4,
                to: DieSize::D6,
            }]
        );
        assert_eq!(state.attribute(Attribute::Forca), DieSize::D6);
        assert!(state.enforce_attribute_minimums(&data).is_empty());
    }

    #[test]
    fn core_skills_never_drop_below_d4() {
        let data = data();
        let mut state = CharacterState::new(&data);

        assert!(!state.lower_skill("Atletismo", &data));
        assert_eq!(state.skill("Atletismo"), SkillLevel::Trained(DieSize::D4));

        assert!(state.raise_skill("Luta"));
        assert!(state.lower_skill("Luta", &data));
        assert_eq!(state.skill("Luta"), SkillLevel::Untrained);
        assert!(!state.lower_skill("Luta", &data));
    }

    #[test]
    fn selections_behave_as_sets() {
        let data = data();
        let mut state = CharacterState::new(&data);
        assert!(state.select_advantage("Briguento"));
        assert!(!state.select_advantage("Briguento"));
        assert_eq!(state.advantage_count(), 1);
        assert!(state.deselect_advantage("Briguento"));
        assert!(!state.deselect_advantage("Briguento"));

        assert!(state.select_complication("Procurado"));
        assert!(state.has_complication("Procurado"));
    }

    #[test]
    fn zero_quantity_removes_equipment() {
        let data = data();
        let mut state = CharacterState::new(&data);
        state.add_equipment("Tocha");
        state.set_equipment_quantity("Tocha", 3);
        state.add_equipment("Faca");
        state.add_equipment("Tocha");
        assert_eq!(state.equipment_lines(), vec!["3x Tocha", "Faca"]);

        state.set_equipment_quantity("Tocha", 0);
        assert_eq!(state.quantity("Tocha"), 0);
        assert_eq!(state.equipment().count(), 1);
    }

    #[test]
    fn apply_dispatches_actions() {
        let data = data();
        let mut state = CharacterState::new(&data);

        assert!(state.apply(
            &CharacterAction::RaiseSkill {
                skill: "Luta".to_string()
            },
            &data
        ));
        assert!(state.apply(
            &CharacterAction::SetEquipmentQuantity {
                item: "Corda".to_string(),
                quantity: 2
            },
            &data
        ));
        assert!(!state.apply(
            &CharacterAction::SetEquipmentQuantity {
                item: "Corda".to_string(),
                quantity: 2
            },
            &data
        ));
        assert_eq!(state.skill("Luta"), SkillLevel::Trained(DieSize::D4));
    }

    #[test]
    fn action_serde_is_tagged() {
        let action: CharacterAction = serde_json::from_str(
            r#"{ "action": "raise_attribute", "attribute": "Força" }"#,
        )
        .expect("deserialize");
        assert_eq!(
            action,
            CharacterAction::RaiseAttribute {
                attribute: Attribute::Forca
            }
        );
    }
}
