use crate::config::ScheduleConfig;
use crate::data::Catalog;
use crate::types::{Day, Plan, SkillVector, DAYS_PER_WEEK};
use rand::Rng;

/// Build one feasible plan by random draws within the per-day budgets.
///
/// Each accepted exercise costs one time unit. A draw that would push any
/// skill past `max_values` is rejected; after `catalog.len()` consecutive
/// rejections the day is closed early, which may leave it shorter than its
/// budget.
pub fn build_plan<R: Rng>(
    times_available: &[u32; DAYS_PER_WEEK],
    max_values: &SkillVector,
    catalog: &Catalog,
    rng: &mut R,
) -> Plan {
    let days = std::array::from_fn(|i| build_day(i, times_available[i], max_values, catalog, rng));
    Plan::new(days)
}

fn build_day<R: Rng>(
    index: usize,
    time_available: u32,
    max_values: &SkillVector,
    catalog: &Catalog,
    rng: &mut R,
) -> Day {
    let mut day = Day::default();
    let mut accumulated = SkillVector::zeros();
    let mut time_taken = 0;
    let mut trials = 0;

    while time_taken < time_available && trials < catalog.len() {
        let exercise = catalog.choose(rng);
        let candidate = accumulated.add(&exercise.skills);
        if !candidate.fits_within(max_values) {
            trials += 1;
            continue;
        }

        trials = 0;
        time_taken += 1;
        accumulated = candidate;
        day.exercises.push(exercise.clone());
    }

    if time_taken < time_available {
        log::debug!(
            "{:?}: filled {}/{} slots before running out of fitting exercises",
            Plan::weekday(index),
            time_taken,
            time_available
        );
    }
    day
}

/// Build `size` independent plans for an initial population
pub fn build_population<R: Rng>(
    size: usize,
    schedule: &ScheduleConfig,
    catalog: &Catalog,
    rng: &mut R,
) -> Vec<Plan> {
    (0..size)
        .map(|_| build_plan(&schedule.times_available, &schedule.max_values, catalog, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Exercise;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_plans_are_feasible_and_within_budget() {
        let catalog = Catalog::from_exercises(vec![
            Exercise::new("sprint", [5.0, 2.0, 1.0, 0.0, 3.0]),
            Exercise::new("deadlift", [0.0, 2.0, 6.0, 0.0, 0.0]),
            Exercise::new("stretch", [0.0, 0.0, 0.0, 5.0, 1.0]),
            Exercise::new("swim", [4.0, 5.0, 2.0, 1.0, 1.0]),
        ])
        .unwrap();
        let times = [3, 4, 5, 3, 4, 5, 0];
        let max_values = SkillVector::splat(10.0);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let plan = build_plan(&times, &max_values, &catalog, &mut rng);
            assert!(plan.is_feasible(&max_values));
            for (day, &budget) in plan.days.iter().zip(&times) {
                assert!(day.len() <= budget as usize);
            }
            assert!(plan.days[6].is_empty());
        }
    }

    #[test]
    fn test_day_stops_when_nothing_fits() {
        let catalog =
            Catalog::from_exercises(vec![Exercise::new("heavy", [0.0, 0.0, 4.0, 0.0, 0.0])])
                .unwrap();
        let max_values = SkillVector([1.0, 1.0, 9.0, 1.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(5);

        let plan = build_plan(&[5; DAYS_PER_WEEK], &max_values, &catalog, &mut rng);
        // Only two fit under the strength cap of 9
        assert!(plan.days.iter().all(|d| d.len() == 2));
    }

    #[test]
    fn test_population_size() {
        let catalog =
            Catalog::from_exercises(vec![Exercise::new("walk", [1.0, 1.0, 0.0, 0.0, 0.0])])
                .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let population = build_population(6, &ScheduleConfig::default(), &catalog, &mut rng);
        assert_eq!(population.len(), 6);
    }
}
