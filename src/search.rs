use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::puzzle::Puzzle;

/// Consecutive non-improving moves tolerated before giving up.
pub const MAX_SIDE_STEPS: u32 = 5;

/// Tuning knobs for a single search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Side-step budget: resets whenever an improving move is taken.
    pub max_side_steps: u32,
    /// Safety cap on iterations (None = unbounded).
    pub max_iterations: Option<u64>,
    /// Seed for the side-step RNG; None draws entropy from the OS.
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_side_steps: MAX_SIDE_STEPS,
            max_iterations: None,
            random_seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the random seed for reproducible runs.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_max_iterations(mut self, limit: u64) -> Self {
        self.max_iterations = Some(limit);
        self
    }
}

/// How the driver arrived at the state carried by a trace step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// The starting configuration, before any move.
    Initial,
    /// A successor with a strictly lower heuristic was taken.
    Improved,
    /// A random equal-or-worse successor was taken to escape a plateau.
    SideStep,
}

/// One observable step of the search.
pub struct TraceStep<'a> {
    pub iteration: u64,
    pub kind: StepKind,
    /// Visited-set size after this step's state was recorded.
    pub visited: usize,
    pub puzzle: &'a Puzzle,
}

/// Observer for per-iteration reporting. The search does not depend on what
/// a sink does with the steps; swapping or silencing it cannot change the
/// outcome.
pub trait TraceSink {
    fn on_step(&mut self, step: &TraceStep<'_>);
}

/// Discards every step.
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn on_step(&mut self, _step: &TraceStep<'_>) {}
}

/// Result of a search run. Getting stuck in a local optimum is a normal
/// outcome of this algorithm, not an error.
#[derive(Debug)]
pub struct Outcome {
    pub state: Puzzle,
    pub solved: bool,
    pub iterations: u64,
}

/// Hill climbing with random side-stepping.
///
/// Each iteration moves to the best unvisited successor when it strictly
/// improves the heuristic; otherwise, while the side-step budget lasts, it
/// moves to a uniformly random unvisited successor. The run ends when the
/// goal is reached, no unvisited successor remains, or the budget is spent.
/// Ties between equally good successors go to the earliest in the fixed
/// up/down/left/right generation order (stable sort).
pub fn hill_climb(initial: Puzzle, config: &SearchConfig, sink: &mut dyn TraceSink) -> Outcome {
    let mut rng = match config.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut current = initial;
    let mut visited = HashSet::new();
    visited.insert(current.key());
    let mut side_steps = 0;
    let mut iterations = 0;

    sink.on_step(&TraceStep {
        iteration: 0,
        kind: StepKind::Initial,
        visited: visited.len(),
        puzzle: &current,
    });

    loop {
        if current.is_goal() {
            break;
        }
        if let Some(limit) = config.max_iterations {
            if iterations >= limit {
                break;
            }
        }
        iterations += 1;

        let mut moves: Vec<Puzzle> = current
            .successors()
            .into_iter()
            .filter(|successor| !visited.contains(&successor.key()))
            .collect();

        if moves.is_empty() {
            break;
        }

        // Stable, so ties keep the generation order.
        moves.sort_by_key(|successor| successor.heuristic());

        let kind = if moves[0].heuristic() < current.heuristic() {
            current = moves.swap_remove(0);
            side_steps = 0;
            StepKind::Improved
        } else if side_steps < config.max_side_steps {
            // Side-step: any unvisited successor, not just the best one.
            let index = rng.gen_range(0..moves.len());
            current = moves.swap_remove(index);
            side_steps += 1;
            StepKind::SideStep
        } else {
            break;
        };

        visited.insert(current.key());
        sink.on_step(&TraceStep {
            iteration: iterations,
            kind,
            visited: visited.len(),
            puzzle: &current,
        });
    }

    let solved = current.is_goal();
    Outcome {
        state: current,
        solved,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::N;

    const DEMO: [[u32; N]; N] = [[1, 2, 3], [4, 0, 6], [7, 5, 8]];
    const SCRAMBLED: [[u32; N]; N] = [[8, 6, 7], [2, 5, 4], [3, 0, 1]];

    /// Records every step for assertions.
    #[derive(Default)]
    struct Recorder {
        keys: Vec<String>,
        kinds: Vec<StepKind>,
        visited: Vec<usize>,
    }

    impl TraceSink for Recorder {
        fn on_step(&mut self, step: &TraceStep<'_>) {
            self.keys.push(step.puzzle.key());
            self.kinds.push(step.kind);
            self.visited.push(step.visited);
        }
    }

    fn demo_start() -> Puzzle {
        Puzzle::new(DEMO, 1, 1).unwrap()
    }

    #[test]
    fn demo_board_solves_in_two_improving_moves() {
        // Both moves are unique strict improvements, so the outcome does not
        // depend on the seed.
        let outcome = hill_climb(demo_start(), &SearchConfig::default(), &mut NullTrace);
        assert!(outcome.solved);
        assert!(outcome.state.is_goal());
        assert_eq!(outcome.iterations, 2);
    }

    #[test]
    fn improving_tie_goes_to_earliest_generated_move() {
        // Moving the empty cell up (8 toward home) or down (5 home) both
        // reach heuristic 5 from 6; the stable sort keeps the up successor,
        // generated first, at the front.
        let start = Puzzle::new([[1, 8, 3], [4, 0, 6], [7, 5, 2]], 1, 1).unwrap();
        let heuristics: Vec<u32> = start.successors().iter().map(|s| s.heuristic()).collect();
        assert_eq!(heuristics, vec![5, 5, 7, 7]);

        let config = SearchConfig::default().with_max_iterations(1);
        let outcome = hill_climb(start, &config, &mut NullTrace);
        let expected = Puzzle::new([[1, 0, 3], [4, 8, 6], [7, 5, 2]], 0, 1).unwrap();
        assert_eq!(outcome.state, expected);
    }

    #[test]
    fn demo_trace_is_improvements_only() {
        let mut recorder = Recorder::default();
        let _ = hill_climb(demo_start(), &SearchConfig::default(), &mut recorder);
        assert_eq!(
            recorder.kinds,
            vec![StepKind::Initial, StepKind::Improved, StepKind::Improved]
        );
    }

    #[test]
    fn fixed_seed_gives_identical_state_sequences() {
        let config = SearchConfig::default()
            .with_random_seed(7)
            .with_max_iterations(10_000);

        let mut first = Recorder::default();
        let mut second = Recorder::default();
        let start = Puzzle::new(SCRAMBLED, 2, 1).unwrap();
        let _ = hill_climb(start.clone(), &config, &mut first);
        let _ = hill_climb(start, &config, &mut second);

        assert_eq!(first.keys, second.keys);
        assert_eq!(first.kinds, second.kinds);
    }

    #[test]
    fn visited_set_grows_by_one_per_accepted_move() {
        let config = SearchConfig::default()
            .with_random_seed(42)
            .with_max_iterations(10_000);
        let mut recorder = Recorder::default();
        let start = Puzzle::new(SCRAMBLED, 2, 1).unwrap();
        let _ = hill_climb(start, &config, &mut recorder);

        assert_eq!(recorder.visited[0], 1);
        for pair in recorder.visited.windows(2) {
            assert_eq!(pair[1], pair[0] + 1);
        }
    }

    #[test]
    fn side_step_runs_never_exceed_the_budget() {
        let config = SearchConfig::default()
            .with_random_seed(42)
            .with_max_iterations(10_000);
        let mut recorder = Recorder::default();
        let start = Puzzle::new(SCRAMBLED, 2, 1).unwrap();
        let _ = hill_climb(start, &config, &mut recorder);

        let mut run = 0;
        for kind in &recorder.kinds {
            match kind {
                StepKind::SideStep => {
                    run += 1;
                    assert!(run <= MAX_SIDE_STEPS);
                }
                _ => run = 0,
            }
        }
    }

    #[test]
    fn iteration_cap_reports_unsolved_without_moving() {
        let config = SearchConfig::default().with_max_iterations(0);
        let outcome = hill_climb(demo_start(), &config, &mut NullTrace);
        assert!(!outcome.solved);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.state, demo_start());
    }

    #[test]
    fn solved_start_ends_immediately() {
        let goal = Puzzle::new([[1, 2, 3], [4, 5, 6], [7, 8, 0]], 2, 2).unwrap();
        let mut recorder = Recorder::default();
        let outcome = hill_climb(goal, &SearchConfig::default(), &mut recorder);
        assert!(outcome.solved);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(recorder.kinds, vec![StepKind::Initial]);
    }
}
