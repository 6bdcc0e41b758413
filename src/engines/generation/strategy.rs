use crate::config::ReplacementKind;
use crate::data::Catalog;
use crate::engines::generation::operators::{crossover, mutate, tournament_selection};
use crate::types::{Plan, SkillVector};
use rand::rngs::StdRng;
use rand::Rng;

/// A plan headed for the next generation, with its score when still valid
#[derive(Debug, Clone)]
pub struct Candidate {
    pub plan: Plan,
    pub score: Option<f64>,
}

impl Candidate {
    pub fn scored(plan: Plan, score: f64) -> Self {
        Self {
            plan,
            score: Some(score),
        }
    }

    pub fn unscored(plan: Plan) -> Self {
        Self { plan, score: None }
    }
}

/// Everything an operator pass needs besides the population itself
pub struct GenerationContext<'a> {
    pub rng: &'a mut StdRng,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub max_values: &'a SkillVector,
    pub catalog: &'a Catalog,
}

/// Produces the next population from the current one and its scores.
///
/// Implementations must return exactly `population.len()` candidates. A
/// candidate keeps its score only if its plan is unchanged.
pub trait ReplacementStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn next_generation(
        &self,
        population: &[Plan],
        scores: &[f64],
        ctx: &mut GenerationContext<'_>,
    ) -> Vec<Candidate>;
}

pub fn strategy_for(kind: ReplacementKind) -> Box<dyn ReplacementStrategy> {
    match kind {
        ReplacementKind::ElitistTruncation => Box::new(ElitistTruncation),
        ReplacementKind::InPlace => Box::new(InPlaceReplacement),
    }
}

/// Tournament, pairwise crossover, mutation, then refill with the best of the
/// previous generation.
///
/// Parent pairs that do not cross over are dropped; only the elite refill
/// carries unchanged plans forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElitistTruncation;

impl ReplacementStrategy for ElitistTruncation {
    fn name(&self) -> &'static str {
        "elitist-truncation"
    }

    fn next_generation(
        &self,
        population: &[Plan],
        scores: &[f64],
        ctx: &mut GenerationContext<'_>,
    ) -> Vec<Candidate> {
        let size = population.len();
        let parents: Vec<usize> = (0..size)
            .map(|_| tournament_selection(scores, ctx.rng))
            .collect();

        let mut offspring = Vec::with_capacity(size);
        for pair in parents.chunks_exact(2) {
            if ctx.rng.gen_bool(ctx.crossover_rate) {
                let (child1, child2) =
                    crossover(&population[pair[0]], &population[pair[1]], ctx.rng);
                offspring.push(child1);
                offspring.push(child2);
            }
        }

        let mut next = Vec::with_capacity(size);
        for child in offspring {
            let child = if ctx.rng.gen_bool(ctx.mutation_rate) {
                mutate(&child, ctx.max_values, ctx.catalog, ctx.rng)
            } else {
                child
            };
            next.push(Candidate::unscored(child));
        }

        // Stable sort: equal scores keep population order
        let mut ranking: Vec<usize> = (0..size).collect();
        ranking.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

        let survivors = size - next.len();
        next.extend(
            ranking
                .into_iter()
                .take(survivors)
                .map(|i| Candidate::scored(population[i].clone(), scores[i])),
        );
        next
    }
}

/// Mutate slots in place, run tournaments on the start-of-generation scores,
/// then overwrite each crossed pair of slots with its children.
#[derive(Debug, Clone, Copy, Default)]
pub struct InPlaceReplacement;

impl ReplacementStrategy for InPlaceReplacement {
    fn name(&self) -> &'static str {
        "in-place"
    }

    fn next_generation(
        &self,
        population: &[Plan],
        scores: &[f64],
        ctx: &mut GenerationContext<'_>,
    ) -> Vec<Candidate> {
        let mut slots: Vec<Candidate> = population
            .iter()
            .zip(scores)
            .map(|(plan, &score)| Candidate::scored(plan.clone(), score))
            .collect();

        for slot in slots.iter_mut() {
            if ctx.rng.gen_bool(ctx.mutation_rate) {
                let mutated = mutate(&slot.plan, ctx.max_values, ctx.catalog, ctx.rng);
                *slot = Candidate::unscored(mutated);
            }
        }

        let parents: Vec<Plan> = (0..slots.len())
            .map(|_| slots[tournament_selection(scores, ctx.rng)].plan.clone())
            .collect();

        for (i, pair) in parents.chunks_exact(2).enumerate() {
            if ctx.rng.gen_bool(ctx.crossover_rate) {
                let (child1, child2) = crossover(&pair[0], &pair[1], ctx.rng);
                slots[2 * i] = Candidate::unscored(child1);
                slots[2 * i + 1] = Candidate::unscored(child2);
            }
        }

        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::builder::build_plan;
    use crate::types::{Exercise, DAYS_PER_WEEK};
    use rand::SeedableRng;

    fn setup(size: usize) -> (Catalog, Vec<Plan>, Vec<f64>) {
        let catalog = Catalog::from_exercises(vec![
            Exercise::new("row", [3.0, 3.0, 1.0, 0.0, 0.0]),
            Exercise::new("lunge", [0.0, 1.0, 3.0, 1.0, 1.0]),
            Exercise::new("skip", [2.0, 1.0, 0.0, 0.0, 3.0]),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let population: Vec<Plan> = (0..size)
            .map(|_| build_plan(&[3; DAYS_PER_WEEK], &SkillVector::splat(8.0), &catalog, &mut rng))
            .collect();
        let scores = (0..size).map(|i| i as f64).collect();
        (catalog, population, scores)
    }

    fn context<'a>(
        rng: &'a mut StdRng,
        catalog: &'a Catalog,
        max_values: &'a SkillVector,
        mutation: f64,
        crossover: f64,
    ) -> GenerationContext<'a> {
        GenerationContext {
            rng,
            mutation_rate: mutation,
            crossover_rate: crossover,
            max_values,
            catalog,
        }
    }

    #[test]
    fn test_elitist_without_crossover_keeps_population() {
        let (catalog, population, scores) = setup(6);
        let max_values = SkillVector::splat(8.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = context(&mut rng, &catalog, &max_values, 1.0, 0.0);

        let next = ElitistTruncation.next_generation(&population, &scores, &mut ctx);

        assert_eq!(next.len(), 6);
        for (i, candidate) in next.iter().enumerate() {
            assert_eq!(candidate.plan, population[i]);
            assert_eq!(candidate.score, Some(i as f64));
        }
    }

    #[test]
    fn test_elitist_with_full_crossover_replaces_everything() {
        let (catalog, population, scores) = setup(8);
        let max_values = SkillVector::splat(8.0);
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = context(&mut rng, &catalog, &max_values, 0.5, 1.0);

        let next = ElitistTruncation.next_generation(&population, &scores, &mut ctx);

        assert_eq!(next.len(), 8);
        assert!(next.iter().all(|c| c.score.is_none()));
        assert!(next.iter().all(|c| c.plan.is_feasible(&max_values)));
    }

    #[test]
    fn test_elitist_refill_takes_best_ranked() {
        let (catalog, population, scores) = setup(10);
        let max_values = SkillVector::splat(8.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut ctx = context(&mut rng, &catalog, &max_values, 0.2, 0.5);

        let next = ElitistTruncation.next_generation(&population, &scores, &mut ctx);
        let survivors: Vec<f64> = next.iter().filter_map(|c| c.score).collect();

        assert_eq!(next.len(), 10);
        // Scores are 0..10, so survivors must be the lowest k in order
        let expected: Vec<f64> = (0..survivors.len()).map(|i| i as f64).collect();
        assert_eq!(survivors, expected);
    }

    #[test]
    fn test_in_place_keeps_size_and_feasibility() {
        let (catalog, population, scores) = setup(8);
        let max_values = SkillVector::splat(8.0);
        let mut rng = StdRng::seed_from_u64(4);
        let mut ctx = context(&mut rng, &catalog, &max_values, 0.5, 0.5);

        let next = InPlaceReplacement.next_generation(&population, &scores, &mut ctx);

        assert_eq!(next.len(), 8);
        assert!(next.iter().all(|c| c.plan.is_feasible(&max_values)));
        for (i, candidate) in next.iter().enumerate() {
            if let Some(score) = candidate.score {
                assert_eq!(score, scores[i]);
                assert_eq!(candidate.plan, population[i]);
            }
        }
    }

    #[test]
    fn test_strategy_for_kind() {
        assert_eq!(strategy_for(ReplacementKind::ElitistTruncation).name(), "elitist-truncation");
        assert_eq!(strategy_for(ReplacementKind::InPlace).name(), "in-place");
    }
}
