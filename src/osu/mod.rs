//! osu!standard difficulty and performance calculation.
//!
//! Stars are computed from aim and speed strains, each object's strain
//! decaying over time and growing with the spacing to its predecessor.
//! The performance combines both star values with accuracy, combo, and mods.

mod pp;
mod skill;
mod skill_kind;
mod stars;

pub use pp::{OsuPP, PerformanceResult, ScoreVersion};
pub use skill_kind::SkillKind;
pub use stars::{stars, DifficultyAttributes, OsuStars, DEFAULT_SINGLETAP_THRESHOLD};

use skill::Skill;
