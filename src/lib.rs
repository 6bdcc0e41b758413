//! Weekly exercise plan search.
//!
//! A genetic algorithm evolves seven-day plans whose exercises best match a
//! target skill profile, while every day stays within per-skill caps.
//!
//! - [`data`]: exercise catalog loading and plan/population JSON files
//! - [`engines::generation`]: plan builder, crossover/mutation, replacement
//!   strategies and the generational [`EvolutionEngine`]
//! - [`engines::evaluation`]: the fitness objective
//! - [`config`]: TOML configuration with environment overrides

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use engines::generation::EvolutionEngine;
pub use error::{PlannerError, Result};
pub use types::{Day, Exercise, Plan, Skill, SkillVector};
