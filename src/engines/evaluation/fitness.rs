use crate::data::Catalog;
use crate::types::{Plan, Skill, SkillVector};
use rayon::prelude::*;
use std::sync::Arc;

/// A pure scoring function over plans. Lower is better.
///
/// Implementations must not depend on mutable state: the engine scores
/// populations in parallel and expects the same plan to always get the
/// same score.
pub trait Objective: Sync {
    fn score(&self, plan: &Plan) -> f64;
}

/// Scores how closely a plan's exercises match a target skill profile.
///
/// For every (skill, catalog exercise, day) triple the evaluator adds
/// `|present * contribution - expected|`, where `present` is 1 when the
/// exercise occurs anywhere in that day. Absent exercises therefore cost
/// the full target magnitude, and the baseline grows with catalog size.
#[derive(Debug, Clone)]
pub struct SkillMatchObjective {
    catalog: Arc<Catalog>,
    expected_values: SkillVector,
}

impl SkillMatchObjective {
    pub fn new(catalog: Arc<Catalog>, expected_values: SkillVector) -> Self {
        Self {
            catalog,
            expected_values,
        }
    }
}

impl Objective for SkillMatchObjective {
    fn score(&self, plan: &Plan) -> f64 {
        evaluate(plan, &self.catalog, &self.expected_values)
    }
}

pub fn evaluate(plan: &Plan, catalog: &Catalog, expected_values: &SkillVector) -> f64 {
    // presence[e][d]: computed once instead of per skill
    let presence: Vec<Vec<bool>> = catalog
        .iter()
        .map(|e| plan.days.iter().map(|day| day.contains(e)).collect())
        .collect();

    let mut value = 0.0;
    for skill in Skill::ALL {
        let expected = expected_values[skill];
        for (exercise, days) in catalog.iter().zip(&presence) {
            let contribution = exercise.skills[skill];
            for &present in days {
                let actual = if present { contribution } else { 0.0 };
                value += (actual - expected).abs();
            }
        }
    }
    value
}

/// Score every plan, in parallel, preserving order
pub fn evaluate_population<O: Objective + ?Sized>(objective: &O, population: &[Plan]) -> Vec<f64> {
    population.par_iter().map(|plan| objective.score(plan)).collect()
}
