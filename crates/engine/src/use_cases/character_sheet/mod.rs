//! Character sheet use cases.
//!
//! A session owns one character being built. Every action goes through the
//! same pipeline: validate against the reference data, mutate the state, then
//! recompute the budget report so it always matches the state.

mod error;

pub use error::CharacterSheetError;

use std::sync::Arc;

use brancalonia_domain::{
    compute_budget, sheet_fields, BudgetReport, CharacterAction, CharacterState, DomainError,
    ReferenceData, SheetField,
};

use crate::infrastructure::build_file::CharacterBuild;
use crate::infrastructure::ports::{ReferenceDataSource, SheetExporter};

/// One character sheet being built.
pub struct CharacterSheetSession {
    data: Arc<ReferenceData>,
    exporter: Option<Arc<dyn SheetExporter>>,
    state: CharacterState,
    report: BudgetReport,
}

impl CharacterSheetSession {
    /// Start from a fresh character (default race, core skills at d4).
    pub fn new(data: Arc<ReferenceData>, exporter: Option<Arc<dyn SheetExporter>>) -> Self {
        let state = CharacterState::new(&data);
        Self::from_state(data, exporter, state)
    }

    pub fn load(
        source: &dyn ReferenceDataSource,
        exporter: Option<Arc<dyn SheetExporter>>,
    ) -> Self {
        Self::new(Arc::new(source.load()), exporter)
    }

    /// Resume from an existing state. Attributes under the race minimum are
    /// corrected immediately.
    pub fn from_state(
        data: Arc<ReferenceData>,
        exporter: Option<Arc<dyn SheetExporter>>,
        mut state: CharacterState,
    ) -> Self {
        let report = recompute(&mut state, &data);
        Self {
            data,
            exporter,
            state,
            report,
        }
    }

    pub fn from_build(
        data: Arc<ReferenceData>,
        exporter: Option<Arc<dyn SheetExporter>>,
        build: &CharacterBuild,
    ) -> Self {
        let state = build.to_state(&data);
        Self::from_state(data, exporter, state)
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn report(&self) -> &BudgetReport {
        &self.report
    }

    /// Apply one action and return the recomputed report.
    ///
    /// Unknown names are rejected with `NotFound` and leave the state as it
    /// was. Actions the rules refuse (raising past d12, lowering under the
    /// race minimum) are accepted as no-ops.
    pub fn apply(&mut self, action: CharacterAction) -> Result<&BudgetReport, CharacterSheetError> {
        self.validate(&action)?;

        let changed = self.state.apply(&action, &self.data);
        tracing::debug!(?action, changed, "Applied character action");

        self.report = recompute(&mut self.state, &self.data);
        if self.report.is_over_budget() {
            tracing::debug!(
                balance = self.report.balance,
                skill_points = self.report.skill_points_remaining(),
                money = self.report.money_remaining(),
                "Character is over budget"
            );
        }
        Ok(&self.report)
    }

    /// Apply actions in order, stopping at the first rejected one.
    pub fn apply_all(
        &mut self,
        actions: impl IntoIterator<Item = CharacterAction>,
    ) -> Result<&BudgetReport, CharacterSheetError> {
        for action in actions {
            self.apply(action)?;
        }
        Ok(&self.report)
    }

    pub fn sheet_fields(&self, character_name: &str) -> Vec<SheetField> {
        sheet_fields(&self.state, &self.report, character_name)
    }

    /// Fill the sheet template and return the document bytes.
    pub fn export(&self, character_name: &str) -> Result<Vec<u8>, CharacterSheetError> {
        let exporter = self.exporter.as_ref().ok_or_else(|| {
            CharacterSheetError::ExportUnavailable("no sheet template configured".to_string())
        })?;

        let fields = self.sheet_fields(character_name);
        let bytes = exporter.export(&fields)?;
        tracing::info!(
            character = character_name,
            fields = fields.len(),
            bytes = bytes.len(),
            "Exported character sheet"
        );
        Ok(bytes)
    }

    fn validate(&self, action: &CharacterAction) -> Result<(), DomainError> {
        match action {
            CharacterAction::SelectRace { race } if self.data.race(race).is_none() => {
                Err(DomainError::not_found("Race", race))
            }
            CharacterAction::RaiseSkill { skill } | CharacterAction::LowerSkill { skill }
                if self.data.skill(skill).is_none() =>
            {
                Err(DomainError::not_found("Skill", skill))
            }
            CharacterAction::SelectAdvantage { advantage }
                if !self.data.has_advantage(advantage) =>
            {
                Err(DomainError::not_found("Advantage", advantage))
            }
            CharacterAction::SelectComplication { complication }
                if !self.data.has_complication(complication) =>
            {
                Err(DomainError::not_found("Complication", complication))
            }
            // Setting a quantity to zero only removes, so stale names are fine.
            CharacterAction::SetEquipmentQuantity { item, quantity }
                if *quantity > 0 && self.data.item(item).is_none() =>
            {
                Err(DomainError::not_found("Item", item))
            }
            _ => Ok(()),
        }
    }
}

fn recompute(state: &mut CharacterState, data: &ReferenceData) -> BudgetReport {
    for correction in state.enforce_attribute_minimums(data) {
        tracing::trace!(
            attribute = %correction.attribute,
            from = %correction.from,
            to = %correction.to,
            "Raised attribute to race minimum"
        );
    }
    compute_budget(state, data)
}
