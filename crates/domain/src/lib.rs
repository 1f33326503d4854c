//! Brancalonia sheets domain.
//!
//! Reference data, the character being built, the point-budget rules and the
//! mapping onto the printable sheet. No I/O lives here.

pub mod budget;
pub mod character;
pub mod error;
pub mod reference;
pub mod sheet;
pub mod value_objects;

pub use budget::{
    assess_budget, compute_budget, skill_cost, BudgetReport, ADVANTAGE_COST, EXTRA_STEP_COST,
    FREE_ATTRIBUTE_STEPS, MAX_COMPLICATION_POINTS, STARTING_MONEY,
};
pub use character::{AttributeCorrection, CharacterAction, CharacterState};
pub use error::DomainError;
pub use reference::{
    AdvantageDefinition, ComplicationDefinition, EquipmentCatalog, EquipmentItem, ItemCost, Race,
    RaceBonus, RaceTable, ReferenceData, Severity, SkillDefinition, SkillsDocument,
    TraitsDocument, DEFAULT_RACE, DEFAULT_SKILL_POINTS,
};
pub use sheet::{
    advantage_field_name, sheet_fields, FieldValue, SheetField, CHECKED_SENTINEL,
    DEFAULT_CHARACTER_NAME, MAX_SHEET_ADVANTAGES, MAX_SHEET_COMPLICATIONS, MAX_SHEET_EQUIPMENT,
    MAX_SHEET_SKILLS,
};
pub use value_objects::{Attribute, DieSize, SkillLevel};
