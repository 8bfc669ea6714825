//! Per-seat decision policies.
//!
//! The turn engine asks every seat the same questions through
//! [`DecisionPolicy`]. An answer is either an immediate choice or
//! [`Decision::Await`], which parks the engine until the external driver
//! supplies the choice through `submit_discard` / `submit_response`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::action::Response;
use crate::rule::GameRule;
use crate::state::hand::Hand;
use crate::state::legal_actions::ClaimOptions;
use crate::types::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<T> {
    Act(T),
    Await,
}

pub trait DecisionPolicy: Send {
    /// Concealed index to discard.
    fn choose_discard(&mut self, seat: Seat, hand: &Hand) -> Decision<usize>;

    /// Answer to an open claim window on another seat's discard.
    fn choose_response(&mut self, hand: &Hand, options: &ClaimOptions) -> Decision<Response>;

    /// Which concealed-kong group to declare before drawing, if any.
    fn choose_concealed_kong(
        &mut self,
        seat: Seat,
        hand: &Hand,
        groups: &[[usize; 4]],
    ) -> Decision<Option<usize>>;
}

/// Seat driven by external input. Every question suspends the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interactive;

impl DecisionPolicy for Interactive {
    fn choose_discard(&mut self, _seat: Seat, _hand: &Hand) -> Decision<usize> {
        Decision::Await
    }

    fn choose_response(&mut self, _hand: &Hand, _options: &ClaimOptions) -> Decision<Response> {
        Decision::Await
    }

    fn choose_concealed_kong(
        &mut self,
        _seat: Seat,
        _hand: &Hand,
        _groups: &[[usize; 4]],
    ) -> Decision<Option<usize>> {
        Decision::Await
    }
}

/// Randomized heuristic: always wins, kongs per rule, pongs and chis by
/// coin flip, discards a uniformly random tile, never declares a concealed
/// kong on its own.
#[derive(Debug, Clone)]
pub struct Autonomous {
    rng: ChaCha8Rng,
    always_kong: bool,
    pong_probability: f64,
    chi_probability: f64,
}

impl Autonomous {
    pub fn new(seed: u64, rule: &GameRule) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            always_kong: rule.autonomous_always_kong,
            pong_probability: rule.autonomous_pong_probability,
            chi_probability: rule.autonomous_chi_probability,
        }
    }

    fn chance(&mut self, p: f64) -> bool {
        // NaN and non-positive never fire; 1.0 and above always do.
        p > 0.0 && (p >= 1.0 || self.rng.random_bool(p))
    }
}

impl DecisionPolicy for Autonomous {
    fn choose_discard(&mut self, _seat: Seat, hand: &Hand) -> Decision<usize> {
        let len = hand.concealed().len();
        if len == 0 {
            return Decision::Act(0);
        }
        Decision::Act(self.rng.random_range(0..len))
    }

    fn choose_response(&mut self, _hand: &Hand, options: &ClaimOptions) -> Decision<Response> {
        if options.win {
            return Decision::Act(Response::Win);
        }
        if options.kong.is_some() && self.always_kong {
            return Decision::Act(Response::Kong);
        }
        if options.pong.is_some() && self.chance(self.pong_probability) {
            return Decision::Act(Response::Pong);
        }
        if !options.chi.is_empty() && self.chance(self.chi_probability) {
            return Decision::Act(Response::Chi(0));
        }
        Decision::Act(Response::Skip)
    }

    fn choose_concealed_kong(
        &mut self,
        _seat: Seat,
        _hand: &Hand,
        _groups: &[[usize; 4]],
    ) -> Decision<Option<usize>> {
        Decision::Act(None)
    }
}

/// Builds the seat policies a rule asks for.
pub fn policies_for(rule: &GameRule, seed: u64) -> [Box<dyn DecisionPolicy>; 4] {
    std::array::from_fn(|seat| -> Box<dyn DecisionPolicy> {
        if rule.interactive_seats[seat] {
            Box::new(Interactive)
        } else {
            Box::new(Autonomous::new(
                crate::state::splitmix64(seed.wrapping_add(1 + seat as u64)),
                rule,
            ))
        }
    })
}
