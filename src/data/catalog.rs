use crate::error::{PlannerError, Result};
use crate::types::Exercise;
use rand::Rng;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Read-only set of exercises shared by every component of a run
#[derive(Debug, Clone)]
pub struct Catalog {
    exercises: Vec<Arc<Exercise>>,
}

impl Catalog {
    pub fn from_exercises(exercises: Vec<Exercise>) -> Result<Self> {
        if exercises.is_empty() {
            return Err(PlannerError::Catalog("catalog contains no exercises".to_string()));
        }

        let mut seen = HashSet::new();
        for exercise in &exercises {
            if !exercise.skills.is_finite() {
                return Err(PlannerError::Catalog(format!(
                    "exercise '{}' has a non-finite skill contribution",
                    exercise.name
                )));
            }
            if !seen.insert(exercise.name.as_str()) {
                log::warn!("Duplicate exercise name in catalog: {}", exercise.name);
            }
        }

        Ok(Self {
            exercises: exercises.into_iter().map(Arc::new).collect(),
        })
    }

    /// Load a JSON array of flat exercise records
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            PlannerError::Catalog(format!(
                "failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let exercises: Vec<Exercise> = serde_json::from_str(&contents)?;
        let catalog = Self::from_exercises(exercises)?;
        log::info!(
            "Loaded {} exercises from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Uniform random draw
    pub fn choose<R: Rng>(&self, rng: &mut R) -> &Arc<Exercise> {
        // Non-empty by construction
        &self.exercises[rng.gen_range(0..self.exercises.len())]
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Exercise>> {
        self.exercises.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Exercise>> {
        self.exercises.iter()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_catalog_rejected() {
        let result = Catalog::from_exercises(vec![]);
        assert!(matches!(result, Err(PlannerError::Catalog(_))));
    }

    #[test]
    fn test_non_finite_contribution_rejected() {
        let result =
            Catalog::from_exercises(vec![Exercise::new("bad", [f64::NAN, 0.0, 0.0, 0.0, 0.0])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicates_tolerated() {
        let catalog = Catalog::from_exercises(vec![
            Exercise::new("squat", [0.0, 1.0, 3.0, 0.0, 0.0]),
            Exercise::new("squat", [0.0, 1.0, 3.0, 0.0, 0.0]),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_choose_draws_from_catalog() {
        let catalog = Catalog::from_exercises(vec![
            Exercise::new("a", [1.0, 0.0, 0.0, 0.0, 0.0]),
            Exercise::new("b", [0.0, 1.0, 0.0, 0.0, 0.0]),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let e = catalog.choose(&mut rng);
            assert!(catalog.iter().any(|c| Arc::ptr_eq(c, e)));
        }
    }

    #[test]
    fn test_load_json() {
        let path = std::env::temp_dir()
            .join(format!("weekplan-catalog-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"name":"Rowing","cardio":4,"endurance":4,"strength":2,
                "flexibility":0,"agility":1}]"#,
        )
        .unwrap();

        let catalog = Catalog::load_json(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().name, "Rowing");

        let _ = std::fs::remove_file(path);
    }
}
