pub mod catalog;
pub mod export;

pub use catalog::Catalog;
pub use export::{read_json, write_json, DayRecord, PlanExport, PopulationFile};
