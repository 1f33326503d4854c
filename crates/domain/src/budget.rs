//! Budget Engine
//!
//! Derives every point and money total the summary panel shows from the
//! reference data and the current character state. Over-budget builds are
//! reported as negative balances, never rejected.
//!
//! # Rules
//!
//! - Complications grant 1 point (minor) or 2 (major); at most 4 are usable.
//! - Each advantage costs 2 points.
//! - Attribute steps above the race base `4 + 2 * modifier`: the first 5 are
//!   free, every further step costs 2 points. A negative modifier puts the
//!   base under d4, so a d4 attribute already counts as raised.
//! - Skills are priced per rung against a separate pool: 1 point while the
//!   rung is at or under the linked attribute's die, 2 above it. The first
//!   rung of a core skill is free.
//! - Equipment is paid from a fixed purse of 500. Unit price times quantity
//!   is rounded once per item.

use serde::{Deserialize, Serialize};

use crate::character::CharacterState;
use crate::reference::ReferenceData;
use crate::value_objects::{Attribute, DieSize};

/// Cap on usable complication points.
pub const MAX_COMPLICATION_POINTS: i32 = 4;

/// Points per selected advantage.
pub const ADVANTAGE_COST: i32 = 2;

/// Attribute steps covered by the base allowance.
pub const FREE_ATTRIBUTE_STEPS: i32 = 5;

/// Points per attribute step beyond the free allowance.
pub const EXTRA_STEP_COST: i32 = 2;

/// Starting money.
pub const STARTING_MONEY: i64 = 500;

/// Derived totals for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetReport {
    /// Complication points before the cap.
    pub complication_points: i32,
    /// Usable complication points (capped at 4).
    pub points_available: i32,
    pub advantage_cost: i32,
    /// Attribute steps above race minimums, summed.
    pub raw_attribute_steps: i32,
    /// Free steps used, out of 5.
    pub attr_base: i32,
    pub attribute_extra_cost: i32,
    /// Creation points left; negative means over budget.
    pub balance: i32,
    /// Size of the skill-point pool.
    pub skill_points: i32,
    pub skills_spent: i32,
    pub money_budget: i64,
    pub money_spent: i64,
}

impl BudgetReport {
    pub fn skill_points_remaining(&self) -> i32 {
        self.skill_points - self.skills_spent
    }

    pub fn money_remaining(&self) -> i64 {
        self.money_budget.saturating_sub(self.money_spent)
    }

    /// Any pool in the red.
    pub fn is_over_budget(&self) -> bool {
        self.balance < 0 || self.skill_points_remaining() < 0 || self.money_remaining() < 0
    }
}

/// Correct under-minimum attributes in place, then compute the report.
///
/// The write-back is the one mutation this engine performs; see
/// [`CharacterState::enforce_attribute_minimums`] for the standalone step.
pub fn compute_budget(state: &mut CharacterState, data: &ReferenceData) -> BudgetReport {
    state.enforce_attribute_minimums(data);
    assess_budget(state, data)
}

/// Compute the report without touching the state. Attributes under their race
/// minimum are priced as if they sat at the minimum.
pub fn assess_budget(state: &CharacterState, data: &ReferenceData) -> BudgetReport {
    let complication_points = complication_points(state, data);
    let points_available = complication_points.min(MAX_COMPLICATION_POINTS);

    let advantage_cost = ADVANTAGE_COST * state.advantage_count() as i32;

    let raw_attribute_steps: i32 = Attribute::ALL
        .into_iter()
        .map(|attribute| {
            let base = data.attribute_base(state.race(), attribute);
            effective_attribute(state, data, attribute).steps_above(base)
        })
        .sum();
    let attr_base = raw_attribute_steps.min(FREE_ATTRIBUTE_STEPS);
    let attribute_extra_cost = (raw_attribute_steps - FREE_ATTRIBUTE_STEPS).max(0) * EXTRA_STEP_COST;

    let balance = points_available - advantage_cost - attribute_extra_cost;

    BudgetReport {
        complication_points,
        points_available,
        advantage_cost,
        raw_attribute_steps,
        attr_base,
        attribute_extra_cost,
        balance,
        skill_points: data.skill_points(),
        skills_spent: skills_spent(state, data),
        money_budget: STARTING_MONEY,
        money_spent: money_spent(state, data),
    }
}

fn complication_points(state: &CharacterState, data: &ReferenceData) -> i32 {
    state
        .complications()
        .map(|name| data.complication_severity(name).points())
        .sum()
}

fn effective_attribute(state: &CharacterState, data: &ReferenceData, attribute: Attribute) -> DieSize {
    state
        .attribute(attribute)
        .max(data.attribute_minimum(state.race(), attribute))
}

fn skills_spent(state: &CharacterState, data: &ReferenceData) -> i32 {
    state
        .active_skills()
        .map(|(name, die)| {
            let linked = effective_attribute(state, data, data.skill_link(name));
            skill_cost(die, linked, data.skill_is_core(name))
        })
        .sum()
}

/// Points to train a skill up to `level` with the linked attribute at `linked`.
pub fn skill_cost(level: DieSize, linked: DieSize, core: bool) -> i32 {
    DieSize::ALL
        .into_iter()
        .take_while(|rung| *rung <= level)
        .map(|rung| {
            if rung == DieSize::D4 && core {
                0
            } else if rung <= linked {
                1
            } else {
                2
            }
        })
        .sum()
}

fn money_spent(state: &CharacterState, data: &ReferenceData) -> i64 {
    state
        .equipment()
        .map(|(item, qty)| data.item_total(item, qty))
        .fold(0i64, i64::saturating_add)
}
