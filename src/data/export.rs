use crate::config::ScheduleConfig;
use crate::error::{PlannerError, Result};
use crate::types::{Exercise, Plan, SkillVector, DAYS_PER_WEEK};
use chrono::Weekday;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One weekday of an exported plan, with full exercise records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub weekday: Weekday,
    pub exercises: Vec<Exercise>,
}

/// A finished plan plus the budgets it was built under, ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanExport {
    pub times_available: [u32; DAYS_PER_WEEK],
    pub max_values: SkillVector,
    pub expected_values: SkillVector,
    pub score: Option<f64>,
    pub days: Vec<DayRecord>,
}

impl PlanExport {
    pub fn new(plan: &Plan, schedule: &ScheduleConfig, score: Option<f64>) -> Self {
        let days = plan
            .days
            .iter()
            .enumerate()
            .map(|(i, day)| DayRecord {
                weekday: Plan::weekday(i),
                exercises: day.exercises.iter().map(|e| e.as_ref().clone()).collect(),
            })
            .collect();

        Self {
            times_available: schedule.times_available,
            max_values: schedule.max_values,
            expected_values: schedule.expected_values,
            score,
            days,
        }
    }
}

/// A generated population with the budgets every plan respects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationFile {
    pub times_available: [u32; DAYS_PER_WEEK],
    pub max_values: SkillVector,
    pub plans: Vec<Plan>,
}

impl PopulationFile {
    pub fn new(schedule: &ScheduleConfig, plans: Vec<Plan>) -> Self {
        Self {
            times_available: schedule.times_available,
            max_values: schedule.max_values,
            plans,
        }
    }

    /// Read a population back, rejecting plans that break the stored caps
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file: PopulationFile = read_json(path)?;
        if let Some(i) = file.plans.iter().position(|p| !p.is_feasible(&file.max_values)) {
            return Err(PlannerError::Population(format!(
                "plan {} exceeds the stored max values",
                i
            )));
        }
        Ok(file)
    }
}

pub fn write_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
