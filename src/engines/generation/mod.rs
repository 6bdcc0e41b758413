pub mod builder;
pub mod evolution_engine;
pub mod operators;
pub mod progress;
pub mod strategy;

pub use builder::{build_plan, build_population};
pub use evolution_engine::{EvolutionEngine, ProgressCallback, RunState, RunSummary};
pub use operators::{crossover, mutate, tournament_selection};
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, ProgressMessage};
pub use strategy::{
    Candidate, ElitistTruncation, GenerationContext, InPlaceReplacement, ReplacementStrategy,
};
