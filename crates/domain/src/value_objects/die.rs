//! Die-size value objects
//!
//! Traits are rated by a single die: d4 through d12, stepping by 2.
//! Skills add an untrained rung (stored as 0) below d4.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A trait die, one of d4, d6, d8, d10, d12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DieSize {
    D4,
    D6,
    D8,
    D10,
    D12,
}

impl DieSize {
    /// All die sizes, smallest first.
    pub const ALL: [DieSize; 5] = [
        DieSize::D4,
        DieSize::D6,
        DieSize::D8,
        DieSize::D10,
        DieSize::D12,
    ];

    /// Number of faces.
    pub fn value(self) -> u8 {
        match self {
            DieSize::D4 => 4,
            DieSize::D6 => 6,
            DieSize::D8 => 8,
            DieSize::D10 => 10,
            DieSize::D12 => 12,
        }
    }

    /// Display label ("d4" .. "d12").
    pub fn label(self) -> &'static str {
        match self {
            DieSize::D4 => "d4",
            DieSize::D6 => "d6",
            DieSize::D8 => "d8",
            DieSize::D10 => "d10",
            DieSize::D12 => "d12",
        }
    }

    /// The next die up, or `None` at d12.
    pub fn step_up(self) -> Option<DieSize> {
        match self {
            DieSize::D4 => Some(DieSize::D6),
            DieSize::D6 => Some(DieSize::D8),
            DieSize::D8 => Some(DieSize::D10),
            DieSize::D10 => Some(DieSize::D12),
            DieSize::D12 => None,
        }
    }

    /// The next die down, or `None` at d4.
    pub fn step_down(self) -> Option<DieSize> {
        match self {
            DieSize::D4 => None,
            DieSize::D6 => Some(DieSize::D4),
            DieSize::D8 => Some(DieSize::D6),
            DieSize::D10 => Some(DieSize::D8),
            DieSize::D12 => Some(DieSize::D10),
        }
    }

    /// Number of +2 steps above a raw `base` value (0 when at or below it).
    /// The base may lie outside the ladder.
    pub fn steps_above(self, base: i32) -> i32 {
        (i32::from(self.value()) - base).max(0) / 2
    }

    /// Die for `4 + 2 * steps`, clamped into the ladder.
    pub fn from_steps(steps: i32) -> DieSize {
        match steps {
            i32::MIN..=0 => DieSize::D4,
            1 => DieSize::D6,
            2 => DieSize::D8,
            3 => DieSize::D10,
            _ => DieSize::D12,
        }
    }
}

impl TryFrom<u8> for DieSize {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(DieSize::D4),
            6 => Ok(DieSize::D6),
            8 => Ok(DieSize::D8),
            10 => Ok(DieSize::D10),
            12 => Ok(DieSize::D12),
            other => Err(DomainError::validation(format!(
                "{} is not a die size (expected 4, 6, 8, 10 or 12)",
                other
            ))),
        }
    }
}

impl From<DieSize> for u8 {
    fn from(die: DieSize) -> Self {
        die.value()
    }
}

impl fmt::Display for DieSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A skill's rung on the ladder 0, d4, d6, d8, d10, d12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SkillLevel {
    #[default]
    Untrained,
    Trained(DieSize),
}

impl SkillLevel {
    /// Integer value; 0 when untrained.
    pub fn value(self) -> u8 {
        match self {
            SkillLevel::Untrained => 0,
            SkillLevel::Trained(die) => die.value(),
        }
    }

    pub fn die(self) -> Option<DieSize> {
        match self {
            SkillLevel::Untrained => None,
            SkillLevel::Trained(die) => Some(die),
        }
    }

    pub fn is_trained(self) -> bool {
        matches!(self, SkillLevel::Trained(_))
    }

    /// One rung up; saturates at d12.
    pub fn raise(self) -> SkillLevel {
        match self {
            SkillLevel::Untrained => SkillLevel::Trained(DieSize::D4),
            SkillLevel::Trained(die) => SkillLevel::Trained(die.step_up().unwrap_or(die)),
        }
    }

    /// One rung down; saturates at untrained.
    pub fn lower(self) -> SkillLevel {
        match self {
            SkillLevel::Untrained | SkillLevel::Trained(DieSize::D4) => SkillLevel::Untrained,
            SkillLevel::Trained(die) => SkillLevel::Trained(die.step_down().unwrap_or(die)),
        }
    }

    /// Display label; "--" when untrained.
    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Untrained => "--",
            SkillLevel::Trained(die) => die.label(),
        }
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == 0 {
            return Ok(SkillLevel::Untrained);
        }
        DieSize::try_from(value).map(SkillLevel::Trained)
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> Self {
        level.value()
    }
}

impl From<DieSize> for SkillLevel {
    fn from(die: DieSize) -> Self {
        SkillLevel::Trained(die)
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_ladder_saturates_at_both_ends() {
        assert_eq!(DieSize::D4.step_down(), None);
        assert_eq!(DieSize::D12.step_up(), None);
        assert_eq!(DieSize::D8.step_up(), Some(DieSize::D10));
        assert_eq!(DieSize::D8.step_down(), Some(DieSize::D6));
    }

    #[test]
    fn die_try_from_rejects_odd_sizes() {
        assert_eq!(DieSize::try_from(10u8), Ok(DieSize::D10));
        assert!(DieSize::try_from(7u8).is_err());
        assert!(DieSize::try_from(0u8).is_err());
        assert!(DieSize::try_from(20u8).is_err());
    }

    #[test]
    fn steps_between_dice() {
        assert_eq!(DieSize::D10.steps_above(6), 2);
        assert_eq!(DieSize::D6.steps_above(6), 0);
        assert_eq!(DieSize::D4.steps_above(8), 0);
        assert_eq!(DieSize::D4.steps_above(2), 1);
        assert_eq!(DieSize::D6.steps_above(0), 3);
        assert_eq!(DieSize::from_steps(-1), DieSize::D4);
        assert_eq!(DieSize::from_steps(1), DieSize::D6);
        assert_eq!(DieSize::from_steps(9), DieSize::D12);
    }

    #[test]
    fn skill_ladder_walks_through_untrained() {
        let mut level = SkillLevel::Untrained;
        let mut seen = vec![level.value()];
        for _ in 0..6 {
            level = level.raise();
            seen.push(level.value());
        }
        assert_eq!(seen, vec![0, 4, 6, 8, 10, 12, 12]);

        assert_eq!(SkillLevel::Trained(DieSize::D4).lower(), SkillLevel::Untrained);
        assert_eq!(SkillLevel::Untrained.lower(), SkillLevel::Untrained);
    }

    #[test]
    fn serde_uses_plain_integers() {
        let json = serde_json::to_string(&SkillLevel::Trained(DieSize::D8)).expect("serialize");
        assert_eq!(json, "8");

        let untrained: SkillLevel = serde_json::from_str("0").expect("deserialize");
        assert_eq!(untrained, SkillLevel::Untrained);

        let die: DieSize = serde_json::from_str("12").expect("deserialize");
        assert_eq!(die, DieSize::D12);

        assert!(serde_json::from_str::<DieSize>("5").is_err());
    }
}
