//! External driver for the turn engine.
//!
//! Provides `GameRunner`, which starts a `Game`, answers whatever prompt the
//! engine is parked on from an `InputSource`, and repeats until the game
//! ends. Rejected input is logged and re-prompted on the next step.

use std::collections::VecDeque;

use log::warn;
use mj16_engine::state::legal_actions::ClaimOptions;
use mj16_engine::types::Seat;
use mj16_engine::{Game, GameEvent, GameRule, Hand, Prompt};

use crate::seeding::SessionRng;
use crate::simulator::GameResult;

/// Supplies input for interactive seats.
/// Implemented by terminal front ends, scripted replays, test agents, etc.
pub trait InputSource {
    /// Concealed index to discard.
    fn discard_index(&mut self, seat: Seat, hand: &Hand) -> usize;

    /// Response token for an open claim window (`W`, `K`, `P`, `C<n>`, or
    /// anything else to skip).
    fn response_token(&mut self, hand: &Hand, options: &ClaimOptions) -> String;

    /// Token for a concealed-kong offer (`K<n>`, or anything else to skip).
    fn concealed_kong_token(&mut self, seat: Seat, hand: &Hand, groups: &[[usize; 4]]) -> String;
}

/// Discards the first tile, takes the best claim, declares the first
/// concealed kong.
pub struct FirstChoiceInput;

impl InputSource for FirstChoiceInput {
    fn discard_index(&mut self, _seat: Seat, _hand: &Hand) -> usize {
        0
    }

    fn response_token(&mut self, _hand: &Hand, options: &ClaimOptions) -> String {
        if options.win {
            "W".into()
        } else if options.kong.is_some() {
            "K".into()
        } else if options.pong.is_some() {
            "P".into()
        } else if !options.chi.is_empty() {
            "C0".into()
        } else {
            String::new()
        }
    }

    fn concealed_kong_token(&mut self, _seat: Seat, _hand: &Hand, _groups: &[[usize; 4]]) -> String {
        "K0".into()
    }
}

/// Replays a fixed list of lines, one per prompt. Discard prompts parse the
/// line as an index. Once the list runs out it discards index 0 and skips.
#[derive(Debug, Clone, Default)]
pub struct TokenInput {
    lines: VecDeque<String>,
}

impl TokenInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for TokenInput {
    fn discard_index(&mut self, _seat: Seat, _hand: &Hand) -> usize {
        match self.lines.pop_front() {
            // Unparseable lines become an out-of-range index so the engine
            // rejects them and re-prompts.
            Some(line) => line.trim().parse().unwrap_or(usize::MAX),
            None => 0,
        }
    }

    fn response_token(&mut self, _hand: &Hand, _options: &ClaimOptions) -> String {
        self.lines.pop_front().unwrap_or_default()
    }

    fn concealed_kong_token(&mut self, _seat: Seat, _hand: &Hand, _groups: &[[usize; 4]]) -> String {
        self.lines.pop_front().unwrap_or_default()
    }
}

const MAX_STEPS: u32 = 10_000;

/// Runs one game, feeding interactive prompts from an `InputSource`.
pub struct GameRunner {
    game: Game,
    total_steps: u32,
    rejected: u32,
}

impl GameRunner {
    pub fn new(seed: Option<u64>, rule: GameRule) -> Self {
        Self::from_game(Game::new(seed, rule))
    }

    /// Game seeded from the next seed of a session.
    pub fn new_with_session(session: &mut SessionRng, rule: GameRule) -> Self {
        Self::new(Some(session.next_game_seed()), rule)
    }

    pub fn from_game(game: Game) -> Self {
        Self {
            game,
            total_steps: 0,
            rejected: 0,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn is_done(&self) -> bool {
        self.game.is_finished()
    }

    /// Prompts answered so far, counting the start call.
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Inputs the engine refused.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    pub fn result(&self) -> GameResult {
        GameResult {
            winner: self.game.winner(),
            end_type: self.game.end_type(),
            win_kind: self.game.win_kind(),
            turns: self.game.turn_count(),
            wall_remaining: self.game.remaining_wall_count(),
            seed: self.game.seed(),
        }
    }

    /// Advance the game by one engine call, returning the events it produced.
    /// Does nothing once the game is over.
    pub fn step_once(&mut self, input: &mut dyn InputSource) -> Vec<GameEvent> {
        if self.is_done() || self.total_steps >= MAX_STEPS {
            return Vec::new();
        }
        self.total_steps += 1;

        let outcome = match self.game.pending().cloned() {
            None => self.game.start(),
            Some(Prompt::Discard { seat }) => {
                let index = input.discard_index(seat, self.game.hand(seat));
                self.game.submit_discard(index)
            }
            Some(Prompt::Response { options }) => {
                let token = input.response_token(self.game.hand(options.seat), &options);
                self.game.submit_response(&token)
            }
            Some(Prompt::ConcealedKong { seat, groups }) => {
                let token = input.concealed_kong_token(seat, self.game.hand(seat), &groups);
                self.game.submit_response(&token)
            }
        };

        match outcome {
            Ok(events) => events,
            Err(e) => {
                warn!("input rejected at step {}: {}", self.total_steps, e);
                self.rejected += 1;
                Vec::new()
            }
        }
    }

    /// Run the game to completion.
    pub fn run_to_completion(&mut self, input: &mut dyn InputSource) {
        while !self.is_done() && self.total_steps < MAX_STEPS {
            self.step_once(input);
        }
    }
}
