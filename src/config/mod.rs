pub mod traits;
pub mod evolution;
pub mod schedule;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{EvolutionConfig, ReplacementKind};
pub use schedule::ScheduleConfig;
pub use traits::ConfigSection;
