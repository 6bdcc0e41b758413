use super::evolution_engine::{ProgressCallback, RunState, RunSummary};
use std::sync::mpsc::Sender;

/// Logs progress every `10^verbosity` generations; silent when `verbosity` is `None`
pub struct ConsoleProgressCallback {
    interval: Option<usize>,
}

impl ConsoleProgressCallback {
    pub fn new(verbosity: Option<u32>) -> Self {
        Self {
            interval: verbosity.map(|v| 10usize.checked_pow(v).unwrap_or(usize::MAX)),
        }
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_complete(&mut self, generation: usize, best_score: f64, improved: bool) {
        if let Some(interval) = self.interval {
            if generation % interval == 0 {
                log::info!(
                    "Generation {}: best score {}{}",
                    generation,
                    best_score,
                    if improved { " (improved)" } else { "" }
                );
            }
        }
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        if self.interval.is_some() {
            log::info!(
                "Finished ({:?}) after {} generations, best score {}",
                summary.state,
                summary.generations,
                summary.best_score
            );
        }
    }
}

/// Streams progress to an observer on another thread
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    RunStarted {
        population_size: usize,
        gen_count: usize,
    },
    GenerationComplete {
        generation: usize,
        best_score: f64,
        improved: bool,
    },
    Finished {
        generations: usize,
        best_score: f64,
        state: RunState,
    },
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_run_start(&mut self, population_size: usize, gen_count: usize) {
        let _ = self.sender.send(ProgressMessage::RunStarted {
            population_size,
            gen_count,
        });
    }

    fn on_generation_complete(&mut self, generation: usize, best_score: f64, improved: bool) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_score,
            improved,
        });
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        let _ = self.sender.send(ProgressMessage::Finished {
            generations: summary.generations,
            best_score: summary.best_score,
            state: summary.state,
        });
    }
}
