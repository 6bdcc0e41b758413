use super::traits::ConfigSection;
use crate::error::PlannerError;
use crate::types::{Skill, SkillVector, DAYS_PER_WEEK, SKILL_COUNT};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Budgets and target profile for one optimization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Exercise slots available per weekday, Monday first
    pub times_available: [u32; DAYS_PER_WEEK],
    /// Per-skill cap applied to every day independently
    pub max_values: SkillVector,
    /// Target skill profile used by the fitness evaluator
    pub expected_values: SkillVector,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let mut expected_values = SkillVector::zeros();
        expected_values[Skill::Cardio] = 100.0;
        Self {
            times_available: [4; DAYS_PER_WEEK],
            max_values: SkillVector::splat(25.0),
            expected_values,
        }
    }
}

impl ScheduleConfig {
    /// Random budgets: 3..=5 slots per day and caps of 10..=25 per skill
    pub fn randomized<R: Rng>(expected_values: SkillVector, rng: &mut R) -> Self {
        let times_available = std::array::from_fn(|_| rng.gen_range(3..=5));
        let caps: [f64; SKILL_COUNT] = std::array::from_fn(|_| rng.gen_range(10..=25) as f64);
        Self {
            times_available,
            max_values: SkillVector(caps),
            expected_values,
        }
    }
}

impl ConfigSection for ScheduleConfig {
    fn section_name() -> &'static str {
        "schedule"
    }

    fn validate(&self) -> Result<(), PlannerError> {
        for skill in Skill::ALL {
            let cap = self.max_values[skill];
            if !cap.is_finite() || cap < 0.0 {
                return Err(PlannerError::Configuration(format!(
                    "Max value for {} must be a non-negative number, got {}",
                    skill.name(),
                    cap
                )));
            }
        }
        if !self.expected_values.is_finite() {
            return Err(PlannerError::Configuration(
                "Expected values must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_randomized_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = ScheduleConfig::randomized(SkillVector::zeros(), &mut rng);

        assert!(config.times_available.iter().all(|t| (3..=5).contains(t)));
        assert!(config.max_values.0.iter().all(|v| (10.0..=25.0).contains(v)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_cap() {
        let mut config = ScheduleConfig::default();
        config.max_values[Skill::Strength] = -1.0;
        assert!(config.validate().is_err());
    }
}
