use crate::config::{ConfigSection, EvolutionConfig, ScheduleConfig};
use crate::data::Catalog;
use crate::engines::evaluation::{evaluate_population, Objective, SkillMatchObjective};
use crate::engines::generation::strategy::{
    strategy_for, Candidate, GenerationContext, ReplacementStrategy,
};
use crate::error::PlannerError;
use crate::types::{Plan, SkillVector};
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::sync::Arc;

/// Lifecycle of one optimization run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Ready,
    Running,
    /// Stopped early: no improvement for more than `early_stop` generations
    Converged,
    /// Ran the full `gen_count` generations
    Exhausted,
}

/// Outcome of a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub best_plan: Plan,
    pub best_score: f64,
    pub generations: usize,
    pub state: RunState,
}

pub trait ProgressCallback {
    fn on_run_start(&mut self, _population_size: usize, _gen_count: usize) {}
    fn on_generation_complete(&mut self, generation: usize, best_score: f64, improved: bool);
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

impl ProgressCallback for () {
    fn on_generation_complete(&mut self, _generation: usize, _best_score: f64, _improved: bool) {}
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_run_start(&mut self, population_size: usize, gen_count: usize) {
        (**self).on_run_start(population_size, gen_count);
    }

    fn on_generation_complete(&mut self, generation: usize, best_score: f64, improved: bool) {
        (**self).on_generation_complete(generation, best_score, improved);
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        (**self).on_run_end(summary);
    }
}

/// Generational optimizer over weekly plans.
///
/// Scores are kept exact throughout a run: the initial population is scored
/// once, and each generation scores only the candidates a strategy produced
/// or changed. Survivors carry their score because plans are values and the
/// objective is pure.
pub struct EvolutionEngine<O: Objective> {
    config: EvolutionConfig,
    max_values: SkillVector,
    catalog: Arc<Catalog>,
    objective: O,
    strategy: Box<dyn ReplacementStrategy>,
    population: Vec<Plan>,
    scores: Vec<f64>,
    best: Option<(Plan, f64)>,
    history: Vec<f64>,
    no_improvement: usize,
    state: RunState,
    rng: StdRng,
}

impl EvolutionEngine<SkillMatchObjective> {
    /// Engine scoring plans against `schedule.expected_values`
    pub fn for_schedule(
        config: EvolutionConfig,
        schedule: &ScheduleConfig,
        catalog: Arc<Catalog>,
        initial_population: Vec<Plan>,
    ) -> Result<Self, PlannerError> {
        schedule.validate()?;
        let objective = SkillMatchObjective::new(Arc::clone(&catalog), schedule.expected_values);
        Self::new(config, schedule.max_values, catalog, objective, initial_population)
    }
}

impl<O: Objective> EvolutionEngine<O> {
    pub fn new(
        config: EvolutionConfig,
        max_values: SkillVector,
        catalog: Arc<Catalog>,
        objective: O,
        initial_population: Vec<Plan>,
    ) -> Result<Self, PlannerError> {
        config.validate()?;
        EvolutionConfig::validate_population_size(initial_population.len())?;
        if catalog.is_empty() {
            return Err(PlannerError::Configuration("catalog is empty".to_string()));
        }
        if let Some(i) = initial_population.iter().position(|p| !p.is_feasible(&max_values)) {
            return Err(PlannerError::Population(format!(
                "initial plan {} exceeds the max values",
                i
            )));
        }

        let rng = config.engine_rng();
        let strategy = strategy_for(config.replacement);

        Ok(Self {
            config,
            max_values,
            catalog,
            objective,
            strategy,
            population: initial_population,
            scores: Vec::new(),
            best: None,
            history: Vec::new(),
            no_improvement: 0,
            state: RunState::Ready,
            rng,
        })
    }

    /// Swap the replacement strategy before running
    pub fn with_strategy(mut self, strategy: Box<dyn ReplacementStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Run the evolution loop to completion
    pub fn run<C: ProgressCallback>(
        &mut self,
        mut callback: C,
    ) -> Result<RunSummary, PlannerError> {
        if self.state != RunState::Ready {
            return Err(PlannerError::Run(format!(
                "engine already ran (state {:?})",
                self.state
            )));
        }
        self.state = RunState::Running;

        let size = self.population.len();
        log::info!(
            "Starting run: population {}, up to {} generations, strategy {}, early stop {:?}",
            size,
            self.config.gen_count,
            self.strategy.name(),
            self.config.early_stop
        );
        callback.on_run_start(size, self.config.gen_count);

        self.scores = evaluate_population(&self.objective, &self.population);
        let (best_idx, best_score) = best_of(&self.scores);
        self.best = Some((self.population[best_idx].clone(), best_score));

        for generation in 0..self.config.gen_count {
            let mut ctx = GenerationContext {
                rng: &mut self.rng,
                mutation_rate: self.config.mutation_rate,
                crossover_rate: self.config.crossover_rate,
                max_values: &self.max_values,
                catalog: &self.catalog,
            };
            let next = self
                .strategy
                .next_generation(&self.population, &self.scores, &mut ctx);
            if next.len() != size {
                return Err(PlannerError::Run(format!(
                    "strategy {} returned {} plans for a population of {}",
                    self.strategy.name(),
                    next.len(),
                    size
                )));
            }
            self.install(next);

            let improved = self.update_best();
            let best_score = self.best_score().unwrap_or(f64::INFINITY);
            self.history.push(best_score);
            callback.on_generation_complete(generation, best_score, improved);

            if let Some(limit) = self.config.early_stop {
                if self.no_improvement > limit {
                    log::info!(
                        "No improvement for {} generations, stopping at generation {}",
                        self.no_improvement,
                        generation + 1
                    );
                    self.state = RunState::Converged;
                    break;
                }
            }
        }
        if self.state == RunState::Running {
            self.state = RunState::Exhausted;
        }

        let summary = self.summary()?;
        log::info!(
            "Run finished after {} generations with best score {}",
            summary.generations,
            summary.best_score
        );
        callback.on_run_end(&summary);
        Ok(summary)
    }

    /// Replace the population, scoring only candidates without a valid score
    fn install(&mut self, next: Vec<Candidate>) {
        let objective = &self.objective;
        self.scores = next
            .par_iter()
            .map(|c| c.score.unwrap_or_else(|| objective.score(&c.plan)))
            .collect();
        self.population = next.into_iter().map(|c| c.plan).collect();
    }

    fn update_best(&mut self) -> bool {
        let (idx, score) = best_of(&self.scores);
        let improved = self.best.as_ref().map_or(true, |(_, best)| score < *best);
        if improved {
            self.best = Some((self.population[idx].clone(), score));
            self.no_improvement = 0;
        } else {
            self.no_improvement += 1;
        }
        improved
    }

    fn summary(&self) -> Result<RunSummary, PlannerError> {
        let (plan, score) = self
            .best
            .as_ref()
            .ok_or_else(|| PlannerError::Run("no best plan recorded".to_string()))?;
        Ok(RunSummary {
            best_plan: plan.clone(),
            best_score: *score,
            generations: self.history.len(),
            state: self.state,
        })
    }

    /// Best plan and score seen so far
    pub fn best(&self) -> Option<(&Plan, f64)> {
        self.best.as_ref().map(|(plan, score)| (plan, *score))
    }

    pub fn best_score(&self) -> Option<f64> {
        self.best.as_ref().map(|(_, score)| *score)
    }

    /// Best-so-far score after each generation
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn population(&self) -> &[Plan] {
        &self.population
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn generations_run(&self) -> usize {
        self.history.len()
    }
}

/// Index and value of the lowest score; the first one wins ties
fn best_of(scores: &[f64]) -> (usize, f64) {
    scores
        .iter()
        .copied()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((0, f64::INFINITY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReplacementKind;
    use crate::engines::generation::builder::build_population;
    use crate::types::Exercise;
    use rand::SeedableRng;

    struct CountingCallback {
        generations: usize,
        started: bool,
        finished: Option<RunState>,
    }

    impl ProgressCallback for CountingCallback {
        fn on_run_start(&mut self, _population_size: usize, _gen_count: usize) {
            self.started = true;
        }

        fn on_generation_complete(
            &mut self,
            _generation: usize,
            _best_score: f64,
            _improved: bool,
        ) {
            self.generations += 1;
        }

        fn on_run_end(&mut self, summary: &RunSummary) {
            self.finished = Some(summary.state);
        }
    }

    fn setup(population_size: usize) -> (EvolutionConfig, ScheduleConfig, Arc<Catalog>, Vec<Plan>) {
        let catalog = Arc::new(
            Catalog::from_exercises(vec![
                Exercise::new("jog", [3.0, 2.0, 0.0, 0.0, 1.0]),
                Exercise::new("press", [0.0, 1.0, 4.0, 0.0, 0.0]),
                Exercise::new("stretch", [0.0, 0.0, 0.0, 3.0, 1.0]),
            ])
            .unwrap(),
        );
        let schedule = ScheduleConfig {
            times_available: [3; 7],
            max_values: SkillVector::splat(9.0),
            expected_values: SkillVector([3.0, 1.0, 0.0, 0.0, 1.0]),
        };
        let config = EvolutionConfig {
            gen_count: 30,
            seed: Some(17),
            ..EvolutionConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(99);
        let population = build_population(population_size, &schedule, &catalog, &mut rng);
        (config, schedule, catalog, population)
    }

    #[test]
    fn test_rejects_odd_population() {
        let (config, schedule, catalog, population) = setup(5);
        let result = EvolutionEngine::for_schedule(config, &schedule, catalog, population);
        assert!(matches!(result, Err(PlannerError::Configuration(_))));
    }

    #[test]
    fn test_rejects_infeasible_initial_plan() {
        let (config, mut schedule, catalog, population) = setup(4);
        schedule.max_values = SkillVector::splat(1.0);
        let result = EvolutionEngine::for_schedule(config, &schedule, catalog, population);
        assert!(matches!(result, Err(PlannerError::Population(_))));
    }

    #[test]
    fn test_full_run_reports_every_generation() {
        let (config, schedule, catalog, population) = setup(8);
        let mut engine =
            EvolutionEngine::for_schedule(config, &schedule, catalog, population).unwrap();
        assert_eq!(engine.state(), RunState::Ready);
        assert!(engine.best().is_none());

        let mut callback = CountingCallback {
            generations: 0,
            started: false,
            finished: None,
        };
        let summary = engine.run(&mut callback).unwrap();

        assert!(callback.started);
        assert_eq!(callback.generations, 30);
        assert_eq!(callback.finished, Some(RunState::Exhausted));
        assert_eq!(summary.generations, 30);
        assert_eq!(engine.generations_run(), 30);
        assert_eq!(engine.history().len(), 30);
        assert_eq!(engine.best_score(), Some(summary.best_score));
        assert!(summary.best_plan.is_feasible(&schedule.max_values));
    }

    #[test]
    fn test_run_only_once() {
        let (config, schedule, catalog, population) = setup(4);
        let mut engine =
            EvolutionEngine::for_schedule(config, &schedule, catalog, population).unwrap();
        engine.run(()).unwrap();
        assert!(matches!(engine.run(()), Err(PlannerError::Run(_))));
    }

    #[test]
    fn test_population_scores_stay_exact() {
        let (mut config, schedule, catalog, population) = setup(10);
        config.replacement = ReplacementKind::InPlace;
        let mut engine =
            EvolutionEngine::for_schedule(config, &schedule, Arc::clone(&catalog), population)
                .unwrap();
        engine.run(()).unwrap();

        let objective = SkillMatchObjective::new(catalog, schedule.expected_values);
        let rescored = evaluate_population(&objective, engine.population());
        assert_eq!(rescored, engine.scores);
    }

    #[test]
    fn test_best_of_prefers_first_minimum() {
        assert_eq!(best_of(&[4.0, 2.0, 2.0, 9.0]), (1, 2.0));
    }
}
