//! Claim legality and priority.
//!
//! Candidate functions are pure over a slice of concealed tiles and return
//! positions into it. [`claim_order`] and [`resolve_claim`] encode the
//! response rule table: seats are visited by clockwise distance from the
//! discarder, and the first seat with any legal action is the one that may
//! act (win > kong > pong > chi within that seat; chi only at distance 1).

use serde::{Deserialize, Serialize};

use crate::agari;
use crate::state::hand::Hand;
use crate::tile::Tile;
use crate::types::{Seat, NUM_SEATS};

/// Positions of the first `N` concealed tiles equal to `tile`, if present.
fn first_matching<const N: usize>(concealed: &[Tile], tile: Tile) -> Option<[usize; N]> {
    let mut out = [0usize; N];
    let mut found = 0;
    for (i, &t) in concealed.iter().enumerate() {
        if t == tile {
            out[found] = i;
            found += 1;
            if found == N {
                return Some(out);
            }
        }
    }
    None
}

pub fn pong_candidates(concealed: &[Tile], tile: Tile) -> Option<[usize; 2]> {
    first_matching::<2>(concealed, tile)
}

pub fn kong_candidates(concealed: &[Tile], tile: Tile) -> Option<[usize; 3]> {
    first_matching::<3>(concealed, tile)
}

/// Groups of four identical concealed tiles, in kind order.
pub fn concealed_kong_groups(concealed: &[Tile]) -> Vec<[usize; 4]> {
    let mut kinds: Vec<Tile> = concealed.to_vec();
    kinds.sort();
    kinds.dedup();
    kinds
        .into_iter()
        .filter_map(|t| first_matching::<4>(concealed, t))
        .collect()
}

/// Which of the three run shapes a chi completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChiShape {
    /// Claimed tile is the high end: (n-2, n-1, n).
    Low,
    /// Claimed tile is in the middle: (n-1, n, n+1).
    Middle,
    /// Claimed tile is the low end: (n, n+1, n+2).
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChiOption {
    pub shape: ChiShape,
    /// Concealed positions of the two supporting tiles, ascending.
    pub indices: [usize; 2],
    /// The completed run, ascending.
    pub run: [Tile; 3],
}

/// Every legal chi for `tile`, in low, middle, high order.
pub fn chi_candidates(concealed: &[Tile], tile: Tile) -> Vec<ChiOption> {
    if !tile.suit().is_numbered() {
        return Vec::new();
    }
    let shapes = [
        (ChiShape::Low, -2i8, -1i8),
        (ChiShape::Middle, -1, 1),
        (ChiShape::High, 1, 2),
    ];
    let first_index = |t: Tile| concealed.iter().position(|&c| c == t);

    let mut options = Vec::new();
    for (shape, a, b) in shapes {
        let (Some(ta), Some(tb)) = (tile.offset(a), tile.offset(b)) else {
            continue;
        };
        let (Some(ia), Some(ib)) = (first_index(ta), first_index(tb)) else {
            continue;
        };
        let mut run = [ta, tb, tile];
        run.sort();
        options.push(ChiOption {
            shape,
            indices: [ia, ib],
            run,
        });
    }
    options
}

/// What one seat may do with a discard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimOptions {
    pub seat: Seat,
    pub tile: Tile,
    pub win: bool,
    pub kong: Option<[usize; 3]>,
    pub pong: Option<[usize; 2]>,
    pub chi: Vec<ChiOption>,
}

impl ClaimOptions {
    pub fn is_empty(&self) -> bool {
        !self.win && self.kong.is_none() && self.pong.is_none() && self.chi.is_empty()
    }

    /// Highest-priority action available.
    pub fn best(&self) -> Option<ClaimAction> {
        if self.win {
            Some(ClaimAction::Win)
        } else if let Some(idx) = self.kong {
            Some(ClaimAction::Kong(idx))
        } else if let Some(idx) = self.pong {
            Some(ClaimAction::Pong(idx))
        } else {
            self.chi.first().map(|c| ClaimAction::Chi(*c))
        }
    }
}

/// A concrete claim on a discard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimAction {
    Win,
    Kong([usize; 3]),
    Pong([usize; 2]),
    Chi(ChiOption),
}

/// Options for `hand` on `tile`, discarded `distance` seats counter-clockwise.
pub fn claim_options(hand: &Hand, seat: Seat, tile: Tile, distance: u8) -> ClaimOptions {
    let concealed = hand.concealed();
    let mut speculative = concealed.to_vec();
    speculative.push(tile);
    let win = agari::is_complete(&speculative, hand.melds().len());

    ClaimOptions {
        seat,
        tile,
        win,
        kong: kong_candidates(concealed, tile),
        pong: pong_candidates(concealed, tile),
        chi: if distance == 1 {
            chi_candidates(concealed, tile)
        } else {
            Vec::new()
        },
    }
}

/// Seats with at least one legal claim on `tile` from `source`, nearest first.
pub fn claim_order(hands: &[Hand; NUM_SEATS], tile: Tile, source: Seat) -> Vec<ClaimOptions> {
    (1..NUM_SEATS as u8)
        .filter_map(|distance| {
            let seat = (source + distance) % NUM_SEATS as u8;
            let opts = claim_options(&hands[seat as usize], seat, tile, distance);
            (!opts.is_empty()).then_some(opts)
        })
        .collect()
}

/// The single claim the rule table grants: nearest eligible seat, its best action.
pub fn resolve_claim(
    hands: &[Hand; NUM_SEATS],
    tile: Tile,
    source: Seat,
) -> Option<(Seat, ClaimAction)> {
    claim_order(hands, tile, source)
        .into_iter()
        .next()
        .and_then(|opts| opts.best().map(|a| (opts.seat, a)))
}
