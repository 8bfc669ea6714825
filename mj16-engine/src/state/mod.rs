//! Turn engine.
//!
//! `Game` owns the wall, the four hands and the last-discard record, and
//! drives them through `Waiting -> Drawing -> Discarding -> Responding ->
//! Finished`. Seats answer through their [`DecisionPolicy`]; when a policy
//! answers `Await` the engine parks and returns to the caller, which resumes
//! it with [`Game::submit_discard`] or [`Game::submit_response`].

use std::collections::VecDeque;
use std::fmt;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::action::{EndType, Phase, Response, WinKind};
use crate::errors::{MahjongError, MahjongResult};
use crate::game_event::GameEvent;
use crate::policy::{policies_for, Decision, DecisionPolicy};
use crate::rule::GameRule;
use crate::tile::{kind_limit, Tile, NUM_KINDS, NUM_TILES};
use crate::types::{Seat, NUM_SEATS};

pub mod hand;
pub mod legal_actions;
pub mod wall;

use hand::{Hand, SETTLED_HAND_SIZE};
use legal_actions::{claim_order, ClaimAction, ClaimOptions};
use wall::Wall;

pub(crate) fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Input the engine is parked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    Discard { seat: Seat },
    Response { options: ClaimOptions },
    /// Offered before the draw; groups are concealed indices.
    ConcealedKong { seat: Seat, groups: Vec<[usize; 4]> },
}

impl Prompt {
    pub fn seat(&self) -> Seat {
        match self {
            Prompt::Discard { seat } | Prompt::ConcealedKong { seat, .. } => *seat,
            Prompt::Response { options } => options.seat,
        }
    }
}

pub struct Game {
    pub rule: GameRule,
    seed: u64,
    wall: Wall,
    hands: [Hand; NUM_SEATS],
    phase: Phase,
    current: Seat,
    last_discard: Option<(Tile, Seat)>,
    claim_queue: VecDeque<ClaimOptions>,
    pending: Option<Prompt>,
    concealed_kong_settled: bool,
    winner: Option<Seat>,
    end_type: Option<EndType>,
    win_kind: Option<WinKind>,
    turn_count: u32,
    policies: [Box<dyn DecisionPolicy>; NUM_SEATS],
    events: Vec<GameEvent>,
    delivered: usize,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("seed", &self.seed)
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("wall", &self.wall.len())
            .field("last_discard", &self.last_discard)
            .field("pending", &self.pending)
            .field("winner", &self.winner)
            .field("end_type", &self.end_type)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Fresh game in `Waiting`. Without a seed one is drawn from the OS RNG.
    pub fn new(seed: Option<u64>, rule: GameRule) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(splitmix64(seed));
        let wall = Wall::shuffled(&mut rng);
        let policies = policies_for(&rule, seed);
        Self::with_parts(rule, seed, wall, policies)
    }

    /// Game over a prepared wall and explicit seat policies.
    pub fn with_parts(
        rule: GameRule,
        seed: u64,
        wall: Wall,
        policies: [Box<dyn DecisionPolicy>; NUM_SEATS],
    ) -> Self {
        Self {
            rule,
            seed,
            wall,
            hands: Default::default(),
            phase: Phase::Waiting,
            current: 0,
            last_discard: None,
            claim_queue: VecDeque::new(),
            pending: None,
            concealed_kong_settled: false,
            winner: None,
            end_type: None,
            win_kind: None,
            turn_count: 0,
            policies,
            events: Vec::with_capacity(512),
            delivered: 0,
        }
    }

    /// Deals and runs until the first input is needed or the game ends.
    pub fn start(&mut self) -> MahjongResult<Vec<GameEvent>> {
        if self.phase != Phase::Waiting {
            warn!("start called in {:?}", self.phase);
            return Err(MahjongError::illegal("game already started"));
        }
        self.events.push(GameEvent::GameStarted {
            seed: self.seed,
            wall_size: self.wall.len(),
        });
        if self._deal() {
            self.current = 0;
            self.phase = Phase::Drawing;
            self._run();
        }
        Ok(self.take_events())
    }

    /// Discards concealed tile `index` for the seat the engine is waiting on.
    pub fn submit_discard(&mut self, index: usize) -> MahjongResult<Vec<GameEvent>> {
        let seat = match self.pending {
            Some(Prompt::Discard { seat }) if self.phase == Phase::Discarding => seat,
            _ => {
                warn!("discard {} submitted in {:?} with no discard awaited", index, self.phase);
                return Err(MahjongError::illegal("no discard is awaited"));
            }
        };
        if let Err(e) = self._discard(seat, index) {
            warn!("seat {} discard rejected: {}", seat, e);
            return Err(e);
        }
        self.pending = None;
        self._run();
        Ok(self.take_events())
    }

    /// Answers the pending claim window or concealed-kong prompt.
    /// Unrecognized tokens and unavailable actions read as skip.
    pub fn submit_response(&mut self, token: &str) -> MahjongResult<Vec<GameEvent>> {
        let response = Response::parse(token);
        match self.pending.take() {
            Some(Prompt::Response { options }) if self.phase == Phase::Responding => {
                self._apply_response(&options, response);
            }
            Some(Prompt::ConcealedKong { seat, groups }) if self.phase == Phase::Drawing => {
                let choice = match response {
                    Response::ConcealedKong(n) => Some(n),
                    Response::Kong => Some(0),
                    _ => None,
                };
                match choice.and_then(|n| groups.get(n).copied()) {
                    Some(group) => {
                        self._declare_concealed_kong(seat, group);
                    }
                    None => {
                        if !response.is_skip() {
                            warn!("seat {} concealed kong {:?} unavailable, skipping", seat, response);
                        }
                        self.concealed_kong_settled = true;
                    }
                }
            }
            other => {
                self.pending = other;
                warn!("response {:?} submitted in {:?} with no response awaited", token, self.phase);
                return Err(MahjongError::illegal("no response is awaited"));
            }
        }
        self._run();
        Ok(self.take_events())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_seat(&self) -> Seat {
        self.current
    }

    pub fn hands(&self) -> &[Hand; NUM_SEATS] {
        &self.hands
    }

    /// # Panics
    ///
    /// If `seat` is not below `NUM_SEATS`.
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat as usize]
    }

    pub fn remaining_wall_count(&self) -> usize {
        self.wall.len()
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn end_type(&self) -> Option<EndType> {
        self.end_type
    }

    pub fn win_kind(&self) -> Option<WinKind> {
        self.win_kind
    }

    /// Most recent discard still lying in its owner's pile, with its owner.
    pub fn last_discard(&self) -> Option<(Tile, Seat)> {
        self.last_discard
    }

    pub fn pending(&self) -> Option<&Prompt> {
        self.pending.as_ref()
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn export_log(&self) -> MahjongResult<String> {
        Ok(serde_json::to_string(&self.events)?)
    }

    /// Every tile accounted for exactly once across wall and hands.
    pub fn check_conservation(&self) -> MahjongResult<()> {
        let mut counts = [0usize; NUM_KINDS];
        let tiles = self
            .wall
            .tiles()
            .iter()
            .copied()
            .chain(self.hands.iter().flat_map(|h| h.all_tiles()));
        for t in tiles {
            counts[t.index()] += 1;
        }
        let total: usize = counts.iter().sum();
        if total != NUM_TILES {
            return Err(MahjongError::InvariantViolation {
                message: format!("{} tiles in play, expected {}", total, NUM_TILES),
            });
        }
        for (i, &c) in counts.iter().enumerate() {
            if c != kind_limit(i) as usize {
                let kind = Tile::from_index(i).map_or_else(|| i.to_string(), |t| t.to_string());
                return Err(MahjongError::InvariantViolation {
                    message: format!("{} copies of {}", c, kind),
                });
            }
        }
        Ok(())
    }

    fn take_events(&mut self) -> Vec<GameEvent> {
        let new = self.events[self.delivered..].to_vec();
        self.delivered = self.events.len();
        new
    }

    /// Round-robin deal with flower replacement. False if the wall ran dry.
    fn _deal(&mut self) -> bool {
        for _ in 0..SETTLED_HAND_SIZE {
            for seat in 0..NUM_SEATS as Seat {
                if self._draw_concealed(seat).is_none() {
                    self._exhaust();
                    return false;
                }
            }
        }
        for (seat, hand) in self.hands.iter().enumerate() {
            self.events.push(GameEvent::Dealt {
                seat: seat as Seat,
                concealed: hand.concealed().len(),
                flowers: hand.flowers().len(),
            });
        }
        debug!("dealt, {} tiles left in wall", self.wall.len());
        true
    }

    /// Draws until a non-flower arrives, setting flowers aside as they come.
    fn _draw_concealed(&mut self, seat: Seat) -> Option<Tile> {
        loop {
            let tile = self.wall.draw().ok()?;
            let hand = &mut self.hands[seat as usize];
            hand.receive(tile);
            if !hand.has_pending_flower() {
                return Some(tile);
            }
            debug!("seat {} replaces flower {}", seat, tile);
            self.events.push(GameEvent::FlowerReplaced { seat, flower: tile });
        }
    }

    fn _run(&mut self) {
        loop {
            let progressed = match self.phase {
                Phase::Drawing => self._step_draw(),
                Phase::Discarding => self._step_discard(),
                Phase::Responding => self._step_respond(),
                Phase::Waiting | Phase::Finished => false,
            };
            if !progressed {
                break;
            }
        }
    }

    fn _step_draw(&mut self) -> bool {
        if self.wall.is_empty() {
            self._exhaust();
            return true;
        }
        let seat = self.current;
        let s = seat as usize;
        if !self.concealed_kong_settled {
            let groups = self.hands[s].concealed_kong_groups();
            if !groups.is_empty() {
                match self.policies[s].choose_concealed_kong(seat, &self.hands[s], &groups) {
                    Decision::Await => {
                        let concealed = self.hands[s].concealed();
                        let tiles = groups.iter().map(|g| concealed[g[0]]).collect();
                        self.events.push(GameEvent::AwaitingConcealedKong { seat, tiles });
                        self.pending = Some(Prompt::ConcealedKong { seat, groups });
                        return false;
                    }
                    Decision::Act(Some(i)) => match groups.get(i) {
                        Some(&group) => {
                            // Ask again afterwards: the replacement may complete another set.
                            self._declare_concealed_kong(seat, group);
                            return true;
                        }
                        None => warn!("seat {} chose concealed kong {} of {}", seat, i, groups.len()),
                    },
                    Decision::Act(None) => {}
                }
            }
        }
        self.concealed_kong_settled = false;

        match self._draw_concealed(seat) {
            None => self._exhaust(),
            Some(tile) => {
                self.events.push(GameEvent::Drew { seat, tile });
                if self.hands[s].is_complete() {
                    self._declare_win(seat, WinKind::SelfDraw, Some(tile), None);
                } else {
                    self.phase = Phase::Discarding;
                }
            }
        }
        true
    }

    fn _declare_concealed_kong(&mut self, seat: Seat, group: [usize; 4]) {
        let s = seat as usize;
        let Some(&tile) = self.hands[s].concealed().get(group[0]) else {
            warn!("seat {} concealed kong group {:?} is stale", seat, group);
            return;
        };
        if let Err(e) = self.hands[s].concealed_kong(group) {
            warn!("seat {} concealed kong rejected: {}", seat, e);
            return;
        }
        debug!("seat {} declares concealed kong of {}", seat, tile);
        self.events.push(GameEvent::ConcealedKongDeclared { seat, tile });
        match self._draw_concealed(seat) {
            Some(drawn) => self.events.push(GameEvent::Drew { seat, tile: drawn }),
            None => self._exhaust(),
        }
    }

    fn _step_discard(&mut self) -> bool {
        let seat = self.current;
        let s = seat as usize;
        match self.policies[s].choose_discard(seat, &self.hands[s]) {
            Decision::Act(index) => match self._discard(seat, index) {
                Ok(()) => true,
                Err(e) => {
                    warn!("seat {} policy discard rejected: {}", seat, e);
                    self._await_discard(seat);
                    false
                }
            },
            Decision::Await => {
                self._await_discard(seat);
                false
            }
        }
    }

    fn _await_discard(&mut self, seat: Seat) {
        self.events.push(GameEvent::AwaitingDiscard { seat });
        self.pending = Some(Prompt::Discard { seat });
    }

    fn _discard(&mut self, seat: Seat, index: usize) -> MahjongResult<()> {
        let tile = self.hands[seat as usize].discard(index)?;
        self.turn_count += 1;
        self.last_discard = Some((tile, seat));
        self.events.push(GameEvent::Discarded { seat, tile });
        self.claim_queue = claim_order(&self.hands, tile, seat).into();
        debug!(
            "seat {} discards {}, {} seat(s) may claim",
            seat,
            tile,
            self.claim_queue.len()
        );
        self.phase = Phase::Responding;
        Ok(())
    }

    /// Offers the discard to eligible seats nearest first. The first seat to
    /// act takes it; passing moves on to the next.
    fn _step_respond(&mut self) -> bool {
        while let Some(options) = self.claim_queue.pop_front() {
            let s = options.seat as usize;
            match self.policies[s].choose_response(&self.hands[s], &options) {
                Decision::Act(response) => {
                    if self._apply_response(&options, response) {
                        return true;
                    }
                }
                Decision::Await => {
                    self.events.push(GameEvent::AwaitingResponse {
                        options: options.clone(),
                    });
                    self.pending = Some(Prompt::Response { options });
                    return false;
                }
            }
        }
        self.current = (self.current + 1) % NUM_SEATS as Seat;
        self.phase = Phase::Drawing;
        true
    }

    /// True if the response claimed the discard and closed the window.
    fn _apply_response(&mut self, options: &ClaimOptions, response: Response) -> bool {
        let seat = options.seat;
        let action = match response {
            Response::Win if options.win => Some(ClaimAction::Win),
            Response::Kong => options.kong.map(ClaimAction::Kong),
            Response::Pong => options.pong.map(ClaimAction::Pong),
            Response::Chi(n) => options.chi.get(n).copied().map(ClaimAction::Chi),
            _ => None,
        };
        let Some(action) = action else {
            if !response.is_skip() {
                warn!("seat {} cannot {:?} on {}, passing", seat, response, options.tile);
            }
            self.events.push(GameEvent::Passed { seat });
            return false;
        };
        match self._execute_claim(seat, options.tile, action) {
            Ok(()) => true,
            Err(e) => {
                warn!("seat {} claim rejected: {}", seat, e);
                self.events.push(GameEvent::Passed { seat });
                false
            }
        }
    }

    fn _execute_claim(&mut self, seat: Seat, tile: Tile, action: ClaimAction) -> MahjongResult<()> {
        let source = self.current;
        let s = seat as usize;
        match action {
            ClaimAction::Win => self.hands[s].receive(tile),
            ClaimAction::Kong(idx) => self.hands[s].kong(tile, idx)?,
            ClaimAction::Pong(idx) => self.hands[s].pong(tile, idx)?,
            ClaimAction::Chi(opt) => self.hands[s].chi(tile, opt.indices)?,
        }
        self.hands[source as usize].take_last_discard();
        self.last_discard = None;
        self.claim_queue.clear();
        self.current = seat;

        if action == ClaimAction::Win {
            self._declare_win(seat, WinKind::Discard, Some(tile), Some(source));
            return Ok(());
        }

        if let Some(meld) = self.hands[s].melds().last() {
            debug!("seat {} claims {} from seat {} as {:?}", seat, tile, source, meld.kind());
            self.events.push(GameEvent::Claimed {
                seat,
                from: source,
                kind: meld.kind(),
                tiles: meld.tiles().to_vec(),
            });
        }

        if let ClaimAction::Kong(_) = action {
            match self._draw_concealed(seat) {
                None => self._exhaust(),
                Some(drawn) => {
                    self.events.push(GameEvent::Drew { seat, tile: drawn });
                    if self.hands[s].is_complete() {
                        self._declare_win(seat, WinKind::KongDraw, Some(drawn), None);
                    } else {
                        self.phase = Phase::Discarding;
                    }
                }
            }
        } else {
            self.phase = Phase::Discarding;
        }
        Ok(())
    }

    fn _declare_win(&mut self, seat: Seat, kind: WinKind, tile: Option<Tile>, from: Option<Seat>) {
        info!("seat {} wins by {:?} after {} turns", seat, kind, self.turn_count);
        self.winner = Some(seat);
        self.end_type = Some(EndType::Win);
        self.win_kind = Some(kind);
        self._finish();
        self.events.push(GameEvent::Won {
            seat,
            kind,
            tile,
            from,
        });
    }

    fn _exhaust(&mut self) {
        info!("wall exhausted after {} turns", self.turn_count);
        self.end_type = Some(EndType::Draw);
        self._finish();
        self.events.push(GameEvent::WallExhausted);
    }

    fn _finish(&mut self) {
        self.phase = Phase::Finished;
        self.pending = None;
        self.claim_queue.clear();
    }
}
