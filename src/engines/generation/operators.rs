use crate::data::Catalog;
use crate::types::{Plan, SkillVector, DAYS_PER_WEEK};
use rand::seq::SliceRandom;
use rand::Rng;

/// Binary tournament: draw two slots (with replacement) and keep the one with
/// the strictly lower score. Ties go to the second draw.
pub fn tournament_selection<R: Rng>(scores: &[f64], rng: &mut R) -> usize {
    let first = rng.gen_range(0..scores.len());
    let second = rng.gen_range(0..scores.len());
    if scores[first] < scores[second] {
        first
    } else {
        second
    }
}

/// Day-wise uniform crossover.
///
/// The selector always holds at least one `true` and one `false`, so each
/// child takes at least one day from each parent. Days move whole and keep
/// their weekday slot, so feasibility carries over from the parents.
pub fn crossover<R: Rng>(parent1: &Plan, parent2: &Plan, rng: &mut R) -> (Plan, Plan) {
    let mut selector = [false; DAYS_PER_WEEK];
    selector[0] = true;
    for bit in selector.iter_mut().skip(2) {
        *bit = rng.gen_bool(0.5);
    }
    selector.shuffle(rng);

    let child1 = std::array::from_fn(|i| {
        if selector[i] {
            parent1.days[i].clone()
        } else {
            parent2.days[i].clone()
        }
    });
    let child2 = std::array::from_fn(|i| {
        if selector[i] {
            parent2.days[i].clone()
        } else {
            parent1.days[i].clone()
        }
    });

    (Plan::new(child1), Plan::new(child2))
}

/// Return a copy of `plan` with at most one exercise swapped per selected day.
///
/// Monday is always selected and every other day with probability one half.
/// Within a selected day the slots are visited in random order; for each a
/// fresh exercise is drawn and the first one that keeps the day within
/// `max_values` replaces the slot. Days where no draw fits stay unchanged.
pub fn mutate<R: Rng>(
    plan: &Plan,
    max_values: &SkillVector,
    catalog: &Catalog,
    rng: &mut R,
) -> Plan {
    let mut mutated = plan.clone();

    for (i, day) in mutated.days.iter_mut().enumerate() {
        if i > 0 && !rng.gen_bool(0.5) {
            continue;
        }

        let accumulated = day.accumulated();
        let mut order: Vec<usize> = (0..day.len()).collect();
        order.shuffle(rng);

        let mut replaced = false;
        for slot in order {
            let candidate = catalog.choose(rng);
            let updated = accumulated
                .sub(&day.exercises[slot].skills)
                .add(&candidate.skills);
            if updated.fits_within(max_values) {
                day.exercises[slot] = candidate.clone();
                replaced = true;
                break;
            }
        }

        if !replaced && !day.is_empty() {
            log::trace!("{:?}: no feasible substitution drawn", Plan::weekday(i));
        }
    }

    mutated
}
