use crate::error::PlannerError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), PlannerError>;
}

/// Rejects a probability outside `[0, 1]`
pub(crate) fn check_rate(name: &str, value: f64) -> Result<(), PlannerError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(PlannerError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}
