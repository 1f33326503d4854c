//! Sheet field mapping
//!
//! Maps a character onto the named form fields of the printable sheet. The
//! mapping is pure: it produces `(field name, value)` pairs and knows nothing
//! about how the document is written.

use serde::{Deserialize, Serialize};

use crate::budget::BudgetReport;
use crate::character::CharacterState;

/// Name written to the sheet when the player gives none.
pub const DEFAULT_CHARACTER_NAME: &str = "Canalha Mobile";

/// PDF name written into checked boxes.
pub const CHECKED_SENTINEL: &str = "/Yes";

pub const MAX_SHEET_SKILLS: usize = 20;
pub const MAX_SHEET_ADVANTAGES: usize = 10;
pub const MAX_SHEET_COMPLICATIONS: usize = 4;
pub const MAX_SHEET_EQUIPMENT: usize = 18;

/// Advantages up to this index get their own numbered box; later ones go to
/// the overflow series.
const NAMED_ADVANTAGE_SLOTS: usize = 5;

/// Value of one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Checked,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Value as it would be written by a generic form filler.
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Checked => CHECKED_SENTINEL,
        }
    }
}

/// A named form field and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetField {
    pub name: String,
    pub value: FieldValue,
}

impl SheetField {
    fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::text(value),
        }
    }

    fn checked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Checked,
        }
    }
}

/// Name of the box holding the advantage at `index` (0-based).
pub fn advantage_field_name(index: usize) -> String {
    if index < NAMED_ADVANTAGE_SLOTS {
        format!("Vantagem_{}", index + 1)
    } else {
        format!("Vantagem_N_{}", index - NAMED_ADVANTAGE_SLOTS + 1)
    }
}

/// Build every sheet field for a character, in sheet order.
pub fn sheet_fields(
    state: &CharacterState,
    report: &BudgetReport,
    character_name: &str,
) -> Vec<SheetField> {
    let mut fields = vec![
        SheetField::text("Nome", character_name),
        SheetField::text("Raça", state.race()),
    ];

    for (attribute, die) in state.attributes() {
        fields.push(SheetField::checked(format!("{}_{}", attribute.name(), die.label())));
    }

    for (i, (skill, die)) in state.active_skills().take(MAX_SHEET_SKILLS).enumerate() {
        fields.push(SheetField::text(format!("Perícia_{}", i + 1), skill));
        fields.push(SheetField::checked(format!("Perícia_{}_{}", i + 1, die.label())));
    }

    for (i, advantage) in state.advantages().take(MAX_SHEET_ADVANTAGES).enumerate() {
        fields.push(SheetField::text(advantage_field_name(i), advantage));
    }

    for (i, complication) in state
        .complications()
        .take(MAX_SHEET_COMPLICATIONS)
        .enumerate()
    {
        fields.push(SheetField::text(format!("Complicação_{}", i + 1), complication));
    }

    let lines = state.equipment_lines();
    for (i, line) in lines.iter().take(MAX_SHEET_EQUIPMENT).enumerate() {
        fields.push(SheetField::text(format!("Equipamento_{}", i + 1), line.as_str()));
    }
    if lines.len() < MAX_SHEET_EQUIPMENT {
        fields.push(SheetField::text(
            format!("Equipamento_{}", lines.len() + 1),
            format!("--- Dinheiro: ${} ---", report.money_remaining()),
        ));
    }

    fields
}
