//! Reference data: races, skills, advantages, complications and equipment.
//!
//! These types mirror the JSON documents shipped in the data directory
//! (Portuguese keys, e.g. `modificadores`, `Pericias`, `custo`). Everything
//! is read-only after loading, and every lookup is lenient: a missing entry
//! yields a neutral default instead of an error, so a partially loaded data
//! set still produces a usable sheet.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Attribute, DieSize};

/// Race used for a fresh character when the data has it.
pub const DEFAULT_RACE: &str = "Humano";

/// Skill-point pool when the skills document does not set one.
pub const DEFAULT_SKILL_POINTS: i32 = 12;

// =============================================================================
// Races
// =============================================================================

/// A playable race.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Race {
    /// Attribute -> modifier. Each point raises that attribute's minimum die by one step.
    #[serde(rename = "modificadores", default)]
    pub modifiers: IndexMap<String, i32>,
    /// Display-only bonuses.
    #[serde(rename = "bonus", default)]
    pub bonuses: IndexMap<String, RaceBonus>,
    #[serde(rename = "descricao", default)]
    pub description: String,
}

impl Race {
    /// Modifier for `attribute`, matching keys by attribute name (accents optional).
    pub fn modifier(&self, attribute: Attribute) -> i32 {
        self.modifiers
            .iter()
            .find(|(key, _)| key.parse::<Attribute>().ok() == Some(attribute))
            .map(|(_, value)| *value)
            .unwrap_or(0)
    }
}

/// A racial bonus as written in the data; only displayed, never computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RaceBonus {
    Integer(i64),
    Decimal(f64),
    Flag(bool),
    Text(String),
}

impl std::fmt::Display for RaceBonus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RaceBonus::Integer(n) => write!(f, "{}", n),
            RaceBonus::Decimal(n) => write!(f, "{}", n),
            RaceBonus::Flag(b) => write!(f, "{}", b),
            RaceBonus::Text(text) => f.write_str(text),
        }
    }
}

/// Race name -> race, in file order.
pub type RaceTable = IndexMap<String, Race>;

// =============================================================================
// Skills
// =============================================================================

/// A skill definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    #[serde(rename = "nome")]
    pub name: String,
    /// Name of the linked attribute.
    #[serde(rename = "atributo", default)]
    pub attribute: String,
    /// Core skills start at d4 for free.
    #[serde(rename = "basica", default)]
    pub core: bool,
}

impl SkillDefinition {
    pub fn new(name: impl Into<String>, attribute: Attribute, core: bool) -> Self {
        Self {
            name: name.into(),
            attribute: attribute.name().to_string(),
            core,
        }
    }

    /// Linked attribute; Agilidade when the data names something unknown.
    pub fn linked_attribute(&self) -> Attribute {
        self.attribute.parse().unwrap_or(Attribute::Agilidade)
    }
}

/// The skills document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsDocument {
    #[serde(rename = "pontos_iniciais", default = "default_skill_points")]
    pub starting_points: i32,
    #[serde(rename = "Pericias", default)]
    pub skills: Vec<SkillDefinition>,
}

fn default_skill_points() -> i32 {
    DEFAULT_SKILL_POINTS
}

impl Default for SkillsDocument {
    fn default() -> Self {
        Self {
            starting_points: DEFAULT_SKILL_POINTS,
            skills: Vec::new(),
        }
    }
}

// =============================================================================
// Advantages and complications
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvantageDefinition {
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplicationDefinition {
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-text severity, e.g. "Menor" or "Maior".
    #[serde(rename = "tipo", default)]
    pub kind: String,
}

impl ComplicationDefinition {
    pub fn severity(&self) -> Severity {
        Severity::from_label(&self.kind)
    }
}

/// The advantages/complications document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitsDocument {
    #[serde(rename = "Vantagens", default)]
    pub advantages: Vec<AdvantageDefinition>,
    #[serde(rename = "Desvantagens", default)]
    pub complications: Vec<ComplicationDefinition>,
}

/// Complication severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Minor,
    Major,
}

impl Severity {
    /// "Maior" (or "Major") anywhere in the label makes it major.
    pub fn from_label(label: &str) -> Self {
        if label.contains("Maior") || label.contains("Major") {
            Severity::Major
        } else {
            Severity::Minor
        }
    }

    /// Creation points granted.
    pub fn points(self) -> i32 {
        match self {
            Severity::Minor => 1,
            Severity::Major => 2,
        }
    }
}

// =============================================================================
// Equipment
// =============================================================================

/// Price of an item as written in the data.
///
/// Only numbers count; labels such as "variável" are free. Fractional prices
/// are kept exact until multiplied by a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemCost {
    Coins(i64),
    Fractional(f64),
    Label(String),
}

impl Default for ItemCost {
    fn default() -> Self {
        ItemCost::Coins(0)
    }
}

impl ItemCost {
    /// Cost in whole money units. Fractions round to the nearest unit.
    pub fn amount(&self) -> i64 {
        match self {
            ItemCost::Coins(coins) => *coins,
            ItemCost::Fractional(value) if value.is_finite() => value.round() as i64,
            ItemCost::Fractional(_) | ItemCost::Label(_) => 0,
        }
    }

    /// Cost of `quantity` units, rounded once after multiplying.
    pub fn total(&self, quantity: u32) -> i64 {
        match self {
            ItemCost::Coins(coins) => coins.saturating_mul(i64::from(quantity)),
            ItemCost::Fractional(value) if value.is_finite() => {
                (value * f64::from(quantity)).round() as i64
            }
            ItemCost::Fractional(_) | ItemCost::Label(_) => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "custo", default)]
    pub cost: ItemCost,
}

/// Category name -> items, in file order.
pub type EquipmentCatalog = IndexMap<String, Vec<EquipmentItem>>;

// =============================================================================
// Aggregate
// =============================================================================

/// All reference tables, loaded once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    races: RaceTable,
    skills: SkillsDocument,
    traits: TraitsDocument,
    equipment: EquipmentCatalog,
}

impl ReferenceData {
    pub fn new(
        races: RaceTable,
        skills: SkillsDocument,
        traits: TraitsDocument,
        equipment: EquipmentCatalog,
    ) -> Self {
        Self {
            races,
            skills,
            traits,
            equipment,
        }
    }

    // -------------------------------------------------------------------------
    // Races
    // -------------------------------------------------------------------------

    pub fn races(&self) -> &RaceTable {
        &self.races
    }

    pub fn race(&self, name: &str) -> Option<&Race> {
        self.races.get(name)
    }

    pub fn race_names(&self) -> impl Iterator<Item = &str> {
        self.races.keys().map(String::as_str)
    }

    /// "Humano" when present, otherwise the first race listed.
    pub fn default_race(&self) -> &str {
        if self.races.contains_key(DEFAULT_RACE) {
            return DEFAULT_RACE;
        }
        self.races
            .keys()
            .next()
            .map(String::as_str)
            .unwrap_or(DEFAULT_RACE)
    }

    /// Race modifier for an attribute; 0 for unknown races.
    pub fn race_modifier(&self, race: &str, attribute: Attribute) -> i32 {
        self.race(race).map(|r| r.modifier(attribute)).unwrap_or(0)
    }

    /// Race base as a raw die value: `4 + 2 * modifier`. Negative modifiers
    /// put it under d4.
    pub fn attribute_base(&self, race: &str, attribute: Attribute) -> i32 {
        4 + 2 * self.race_modifier(race, attribute)
    }

    /// Race base clamped into the die ladder.
    pub fn attribute_minimum(&self, race: &str, attribute: Attribute) -> DieSize {
        DieSize::from_steps(self.race_modifier(race, attribute))
    }

    // -------------------------------------------------------------------------
    // Skills
    // -------------------------------------------------------------------------

    pub fn skills(&self) -> &[SkillDefinition] {
        &self.skills.skills
    }

    pub fn skill(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.skills.iter().find(|s| s.name == name)
    }

    pub fn skill_is_core(&self, name: &str) -> bool {
        self.skill(name).is_some_and(|s| s.core)
    }

    /// Linked attribute; Agilidade for unknown skills.
    pub fn skill_link(&self, name: &str) -> Attribute {
        self.skill(name)
            .map(SkillDefinition::linked_attribute)
            .unwrap_or(Attribute::Agilidade)
    }

    /// Size of the skill-point pool.
    pub fn skill_points(&self) -> i32 {
        self.skills.starting_points
    }

    // -------------------------------------------------------------------------
    // Advantages / complications
    // -------------------------------------------------------------------------

    pub fn advantages(&self) -> &[AdvantageDefinition] {
        &self.traits.advantages
    }

    pub fn complications(&self) -> &[ComplicationDefinition] {
        &self.traits.complications
    }

    pub fn has_advantage(&self, name: &str) -> bool {
        self.traits.advantages.iter().any(|a| a.name == name)
    }

    pub fn has_complication(&self, name: &str) -> bool {
        self.traits.complications.iter().any(|c| c.name == name)
    }

    /// Severity of a complication; minor when it is not listed.
    pub fn complication_severity(&self, name: &str) -> Severity {
        self.traits
            .complications
            .iter()
            .find(|c| c.name == name)
            .map(ComplicationDefinition::severity)
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Equipment
    // -------------------------------------------------------------------------

    pub fn equipment(&self) -> &EquipmentCatalog {
        &self.equipment
    }

    pub fn item(&self, name: &str) -> Option<&EquipmentItem> {
        self.equipment
            .values()
            .flat_map(|items| items.iter())
            .find(|item| item.name == name)
    }

    /// Unit cost; 0 when the item is unknown or unpriced.
    pub fn item_cost(&self, name: &str) -> i64 {
        self.item(name).map(|item| item.cost.amount()).unwrap_or(0)
    }

    /// Cost of `quantity` units of an item; 0 when unknown or unpriced.
    pub fn item_total(&self, name: &str, quantity: u32) -> i64 {
        self.item(name).map(|item| item.cost.total(quantity)).unwrap_or(0)
    }

    /// True when no table has any entries.
    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
            && self.skills.skills.is_empty()
            && self.traits.advantages.is_empty()
            && self.traits.complications.is_empty()
            && self.equipment.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ReferenceData {
        let races: RaceTable = serde_json::from_str(
            r#"{
                "Humano": { "descricao": "Gente comum." },
                "Morgante": {
                    "modificadores": { "Força": 1, "Vigor": 1 },
                    "bonus": { "Força": 1, "Especial": "Pele grossa" },
                    "descricao": "Grandalhão."
                },
                "Malebranche": { "modificadores": { "Força": -1 } }
            }"#,
        )
        .expect("races");
        let skills: SkillsDocument = serde_json::from_value(json!({
            "Pericias": [
                { "nome": "Atletismo", "atributo": "Agilidade", "basica": true },
                { "nome": "Luta", "atributo": "Agilidade" },
                { "nome": "Ocultismo", "atributo": "Inexistente" }
            ]
        }))
        .expect("skills");
        let traits: TraitsDocument = serde_json::from_value(json!({
            "Vantagens": [ { "nome": "Briguento" } ],
            "Desvantagens": [
                { "nome": "Ganancioso", "tipo": "Menor" },
                { "nome": "Procurado", "tipo": "Maior" }
            ]
        }))
        .expect("traits");
        let equipment: EquipmentCatalog = serde_json::from_str(
            r#"{
                "Armas": [
                    { "nome": "Faca", "custo": 25 },
                    { "nome": "Pistola", "custo": 12.6 }
                ],
                "Acessórios": [
                    { "nome": "Corda", "custo": "variável" },
                    { "nome": "Faca", "custo": 99 },
                    { "nome": "Odre de Vinho", "custo": 2.5 }
                ]
            }"#,
        )
        .expect("equipment");
        ReferenceData::new(races, skills, traits, equipment)
    }

    #[test]
    fn race_modifiers_raise_minimums() {
        let data = sample();
        assert_eq!(data.attribute_minimum("Morgante", Attribute::Forca), DieSize::D6);
        assert_eq!(data.attribute_minimum("Morgante", Attribute::Astucia), DieSize::D4);
        assert_eq!(data.attribute_minimum("Elfo", Attribute::Forca), DieSize::D4);
    }

    #[test]
    fn negative_modifier_base_sits_under_d4() {
        let data = sample();
        assert_eq!(data.attribute_base("Malebranche", Attribute::Forca), 2);
        assert_eq!(data.attribute_minimum("Malebranche", Attribute::Forca), DieSize::D4);
        assert_eq!(data.attribute_base("Morgante", Attribute::Forca), 6);
        assert_eq!(data.attribute_base("Elfo", Attribute::Forca), 4);
    }

    #[test]
    fn default_race_prefers_humano() {
        assert_eq!(sample().default_race(), "Humano");

        let only_morgante: RaceTable =
            serde_json::from_value(json!({ "Morgante": {} })).expect("races");
        let data = ReferenceData::new(
            only_morgante,
            SkillsDocument::default(),
            TraitsDocument::default(),
            EquipmentCatalog::default(),
        );
        assert_eq!(data.default_race(), "Morgante");
        assert_eq!(ReferenceData::default().default_race(), DEFAULT_RACE);
    }

    #[test]
    fn skill_lookups_fall_back() {
        let data = sample();
        assert!(data.skill_is_core("Atletismo"));
        assert!(!data.skill_is_core("Luta"));
        assert!(!data.skill_is_core("Navegar"));
        assert_eq!(data.skill_link("Ocultismo"), Attribute::Agilidade);
        assert_eq!(data.skill_link("Navegar"), Attribute::Agilidade);
        assert_eq!(data.skill_points(), DEFAULT_SKILL_POINTS);
    }

    #[test]
    fn complication_severity_defaults_to_minor() {
        let data = sample();
        assert_eq!(data.complication_severity("Procurado"), Severity::Major);
        assert_eq!(data.complication_severity("Ganancioso"), Severity::Minor);
        assert_eq!(data.complication_severity("Desconhecida"), Severity::Minor);
        assert_eq!(Severity::from_label("Maior ou Menor").points(), 2);
    }

    #[test]
    fn item_cost_uses_first_match_and_ignores_labels() {
        let data = sample();
        assert_eq!(data.item_cost("Faca"), 25);
        assert_eq!(data.item_cost("Pistola"), 13);
        assert_eq!(data.item_cost("Corda"), 0);
        assert_eq!(data.item_cost("Canhão"), 0);
    }

    #[test]
    fn equipment_categories_keep_file_order() {
        let data = sample();
        let categories: Vec<&String> = data.equipment().keys().collect();
        assert_eq!(categories, vec!["Armas", "Acessórios"]);
    }

    #[test]
    fn fractional_cost_is_rounded_after_quantity() {
        let data = sample();
        assert_eq!(data.item_cost("Odre de Vinho"), 3);
        assert_eq!(data.item_total("Odre de Vinho", 4), 10);
        assert_eq!(data.item_total("Odre de Vinho", 1), 3);
        assert_eq!(data.item_total("Pistola", 5), 63);
        assert_eq!(data.item_total("Faca", 3), 75);
        assert_eq!(data.item_total("Corda", 7), 0);
        assert_eq!(data.item_total("Canhão", 2), 0);
    }

    #[test]
    fn whole_cost_total_saturates() {
        assert_eq!(ItemCost::Coins(i64::MAX).total(2), i64::MAX);
        assert_eq!(ItemCost::Fractional(f64::NAN).total(2), 0);
    }

    #[test]
    fn race_bonuses_keep_their_written_form() {
        let data = sample();
        let morgante = data.race("Morgante").expect("race");
        let rendered: Vec<String> = morgante
            .bonuses
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        assert_eq!(rendered, vec!["Força: 1", "Especial: Pele grossa"]);
    }
}
