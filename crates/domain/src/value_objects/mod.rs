//! Value objects: die sizes, skill levels and attributes.

mod attribute;
mod die;

pub use attribute::Attribute;
pub use die::{DieSize, SkillLevel};
