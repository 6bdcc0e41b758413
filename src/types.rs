use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::sync::Arc;

/// Number of days in a weekly plan (Monday..Sunday)
pub const DAYS_PER_WEEK: usize = 7;

/// Number of skill categories tracked per exercise
pub const SKILL_COUNT: usize = 5;

/// Skill categories in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Cardio,
    Endurance,
    Strength,
    Flexibility,
    Agility,
}

impl Skill {
    pub const ALL: [Skill; SKILL_COUNT] = [
        Skill::Cardio,
        Skill::Endurance,
        Skill::Strength,
        Skill::Flexibility,
        Skill::Agility,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Field name used in exercise records
    pub fn name(self) -> &'static str {
        match self {
            Skill::Cardio => "cardio",
            Skill::Endurance => "endurance",
            Skill::Strength => "strength",
            Skill::Flexibility => "flexibility",
            Skill::Agility => "agility",
        }
    }
}

/// Per-skill values, index-aligned with `Skill::ALL`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillVector(pub [f64; SKILL_COUNT]);

impl SkillVector {
    pub fn zeros() -> Self {
        Self([0.0; SKILL_COUNT])
    }

    pub fn splat(value: f64) -> Self {
        Self([value; SKILL_COUNT])
    }

    pub fn add(&self, other: &SkillVector) -> SkillVector {
        let mut out = *self;
        for skill in Skill::ALL {
            out[skill] += other[skill];
        }
        out
    }

    pub fn sub(&self, other: &SkillVector) -> SkillVector {
        let mut out = *self;
        for skill in Skill::ALL {
            out[skill] -= other[skill];
        }
        out
    }

    /// True when every component is `<=` the matching cap
    pub fn fits_within(&self, max_values: &SkillVector) -> bool {
        Skill::ALL.iter().all(|&s| self[s] <= max_values[s])
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Index<Skill> for SkillVector {
    type Output = f64;

    fn index(&self, skill: Skill) -> &f64 {
        &self.0[skill.index()]
    }
}

impl IndexMut<Skill> for SkillVector {
    fn index_mut(&mut self, skill: Skill) -> &mut f64 {
        &mut self.0[skill.index()]
    }
}

/// A catalog entry: a named exercise and what it trains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExerciseRecord", into = "ExerciseRecord")]
pub struct Exercise {
    pub name: String,
    pub skills: SkillVector,
}

impl Exercise {
    pub fn new(name: impl Into<String>, skills: [f64; SKILL_COUNT]) -> Self {
        Self {
            name: name.into(),
            skills: SkillVector(skills),
        }
    }
}

// Flat on-disk form: {"name": .., "cardio": .., ...}
#[derive(Serialize, Deserialize)]
struct ExerciseRecord {
    name: String,
    cardio: f64,
    endurance: f64,
    strength: f64,
    flexibility: f64,
    agility: f64,
}

impl From<ExerciseRecord> for Exercise {
    fn from(r: ExerciseRecord) -> Self {
        Exercise::new(
            r.name,
            [r.cardio, r.endurance, r.strength, r.flexibility, r.agility],
        )
    }
}

impl From<Exercise> for ExerciseRecord {
    fn from(e: Exercise) -> Self {
        let [cardio, endurance, strength, flexibility, agility] = e.skills.0;
        ExerciseRecord {
            name: e.name,
            cardio,
            endurance,
            strength,
            flexibility,
            agility,
        }
    }
}

/// Exercises scheduled for one weekday. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day {
    pub exercises: Vec<Arc<Exercise>>,
}

impl Day {
    pub fn new(exercises: Vec<Arc<Exercise>>) -> Self {
        Self { exercises }
    }

    /// Sum of the contributions of every exercise in the day
    pub fn accumulated(&self) -> SkillVector {
        self.exercises
            .iter()
            .fold(SkillVector::zeros(), |acc, e| acc.add(&e.skills))
    }

    pub fn contains(&self, exercise: &Exercise) -> bool {
        self.exercises.iter().any(|e| e.as_ref() == exercise)
    }

    pub fn is_feasible(&self, max_values: &SkillVector) -> bool {
        self.accumulated().fits_within(max_values)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

/// A weekly plan: exactly seven days, Monday first.
///
/// Plans are values. Operators return new plans instead of editing one that
/// may be shared between population slots.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    pub days: [Day; DAYS_PER_WEEK],
}

impl Plan {
    pub fn new(days: [Day; DAYS_PER_WEEK]) -> Self {
        Self { days }
    }

    pub fn is_feasible(&self, max_values: &SkillVector) -> bool {
        self.days.iter().all(|d| d.is_feasible(max_values))
    }

    /// Weekday occupying position `index` (0 = Monday)
    pub fn weekday(index: usize) -> Weekday {
        let mut day = Weekday::Mon;
        for _ in 0..index % DAYS_PER_WEEK {
            day = day.succ();
        }
        day
    }
}
