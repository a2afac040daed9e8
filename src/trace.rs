use crossterm::style::Stylize;

use crate::search::{StepKind, TraceSink, TraceStep};

/// Prints every search step to stdout: heuristic, how the step was taken,
/// and the grid itself.
pub struct ConsoleTrace;

impl TraceSink for ConsoleTrace {
    fn on_step(&mut self, step: &TraceStep<'_>) {
        let label = match step.kind {
            StepKind::Initial => "start".dark_grey(),
            StepKind::Improved => "improve".green(),
            StepKind::SideStep => "side-step".yellow(),
        };
        println!(
            "[{:3}] {} heuristic = {}",
            step.iteration,
            label,
            step.puzzle.heuristic()
        );
        println!("{}", step.puzzle);
    }
}
