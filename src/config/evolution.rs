use super::traits::{check_rate, ConfigSection};
use crate::error::PlannerError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Size of a freshly generated initial population
    pub population_size: usize,
    pub gen_count: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    /// Generations without improvement tolerated before stopping
    pub early_stop: Option<usize>,
    /// Report progress every 10^verbosity generations; `None` is silent
    pub verbosity: Option<u32>,
    pub seed: Option<u64>,
    pub replacement: ReplacementKind,
}

/// How offspring enter the population each generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementKind {
    /// Offspring plus the best-ranked survivors of the previous generation
    ElitistTruncation,
    /// Mutate slots in place, then overwrite crossed pairs in place
    InPlace,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            gen_count: 1000,
            mutation_rate: 0.3,
            crossover_rate: 0.95,
            early_stop: None,
            verbosity: None,
            seed: None,
            replacement: ReplacementKind::ElitistTruncation,
        }
    }
}

impl EvolutionConfig {
    /// RNG driving the engine's operators
    pub fn engine_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// RNG for building an initial population. Seeded apart from
    /// `engine_rng` so the engine does not replay the builder's draws.
    pub fn population_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        }
    }

    /// Population checks shared by config loading and engine construction
    pub fn validate_population_size(size: usize) -> Result<(), PlannerError> {
        if size == 0 {
            return Err(PlannerError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if size % 2 != 0 {
            return Err(PlannerError::Configuration(format!(
                "Population size must be even for pairwise crossover, got {}",
                size
            )));
        }
        Ok(())
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), PlannerError> {
        Self::validate_population_size(self.population_size)?;
        if self.gen_count < 1 {
            return Err(PlannerError::Configuration(
                "Generation count must be at least 1".to_string(),
            ));
        }
        check_rate("Mutation rate", self.mutation_rate)?;
        check_rate("Crossover rate", self.crossover_rate)?;
        if self.early_stop == Some(0) {
            return Err(PlannerError::Configuration(
                "Early stop must be a positive number of generations".to_string(),
            ));
        }
        Ok(())
    }
}
