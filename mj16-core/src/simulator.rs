//! Batch game simulation with rayon parallelism.
//!
//! Runs N complete games in parallel on a dedicated rayon ThreadPool and
//! reports how each one ended.

use mj16_engine::types::{Seat, NUM_SEATS};
use mj16_engine::{EndType, GameRule, WinKind};
use rayon::prelude::*;
use serde::Serialize;

use crate::game_loop::{FirstChoiceInput, GameRunner};
use crate::seeding::{derive_game_seed, session_seed_from_u64};

/// Configuration for a batch simulation run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of games to simulate.
    pub num_games: usize,
    /// Base seed for deterministic simulation. Game `i` gets the `i`-th
    /// seed derived from it.
    pub base_seed: Option<u64>,
    /// Number of threads in the rayon pool. None = use rayon default (num CPUs).
    pub num_threads: Option<usize>,
    /// Interactive seats in this rule are answered by `FirstChoiceInput`.
    pub rule: GameRule,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            base_seed: None,
            num_threads: None,
            rule: GameRule::all_autonomous(),
        }
    }
}

impl BatchConfig {
    fn seed_for(&self, game_index: usize) -> Option<u64> {
        self.base_seed
            .map(|s| derive_game_seed(&session_seed_from_u64(s), 0, game_index as u64))
    }
}

/// Result from a single completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Option<Seat>,
    pub end_type: Option<EndType>,
    pub win_kind: Option<WinKind>,
    /// Discards made.
    pub turns: u32,
    pub wall_remaining: usize,
    /// The seed used for this game.
    pub seed: u64,
}

/// Aggregate over a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub games: usize,
    pub wins_by_seat: [usize; NUM_SEATS],
    pub self_draw_wins: usize,
    pub kong_draw_wins: usize,
    pub discard_wins: usize,
    pub draws: usize,
    pub mean_turns: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[GameResult]) -> Self {
        let mut summary = BatchSummary {
            games: results.len(),
            ..Default::default()
        };
        let mut turns = 0u64;
        for r in results {
            turns += u64::from(r.turns);
            match (r.end_type, r.winner) {
                (Some(EndType::Win), Some(seat)) => {
                    summary.wins_by_seat[seat as usize % NUM_SEATS] += 1;
                }
                (Some(EndType::Draw), _) => summary.draws += 1,
                _ => {}
            }
            match r.win_kind {
                Some(WinKind::SelfDraw) => summary.self_draw_wins += 1,
                Some(WinKind::KongDraw) => summary.kong_draw_wins += 1,
                Some(WinKind::Discard) => summary.discard_wins += 1,
                None => {}
            }
        }
        if !results.is_empty() {
            summary.mean_turns = turns as f64 / results.len() as f64;
        }
        summary
    }
}

/// Simulate a single complete game.
pub fn simulate_single_game(seed: Option<u64>, rule: GameRule) -> GameResult {
    let mut runner = GameRunner::new(seed, rule);
    runner.run_to_completion(&mut FirstChoiceInput);
    runner.result()
}

/// Parallel batch simulator using a dedicated rayon ThreadPool.
pub struct BatchSimulator {
    pool: rayon::ThreadPool,
}

impl BatchSimulator {
    /// Create a new batch simulator with the given thread count.
    pub fn new(num_threads: Option<usize>) -> anyhow::Result<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = num_threads {
            builder = builder.num_threads(n);
        }
        let pool = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build thread pool: {}", e))?;
        Ok(Self { pool })
    }

    /// Simulator sized by `config.num_threads`.
    pub fn for_config(config: &BatchConfig) -> anyhow::Result<Self> {
        Self::new(config.num_threads)
    }

    /// Run a batch of games in parallel. Results are in game-index order.
    pub fn run_batch(&self, config: &BatchConfig) -> Vec<GameResult> {
        self.pool.install(|| run_batch_simple(config))
    }
}

/// Convenience: run a batch without constructing a BatchSimulator.
/// Uses rayon's global thread pool.
pub fn run_batch_simple(config: &BatchConfig) -> Vec<GameResult> {
    (0..config.num_games)
        .into_par_iter()
        .map(|i| simulate_single_game(config.seed_for(i), config.rule))
        .collect()
}
