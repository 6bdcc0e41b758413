pub mod fitness;

pub use fitness::{evaluate, evaluate_population, Objective, SkillMatchObjective};
