//! Hand-completion evaluation.
//!
//! A hand is complete when its concealed tiles split into exactly one pair
//! plus groups (triplets, or runs in the numbered suits) with nothing left
//! over, and concealed tiles plus three per held meld total 17. Held melds
//! are trusted as valid groups.
//!
//! The search runs over a kind histogram: every pair candidate is tried, and
//! at each step both the triplet and the run starting at the lowest remaining
//! kind are explored, so backtracking is a decrement/increment.

use serde::{Deserialize, Serialize};

use crate::tile::{Tile, NUM_KINDS, WIND_START};
use crate::types::TileCounts;

/// Tiles in a complete hand, counting three per meld.
pub const WINNING_TILE_COUNT: usize = 17;

/// Groups (melds included) in a complete hand.
pub const WINNING_GROUP_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Group {
    Triplet(Tile),
    /// Run identified by its lowest tile.
    Run(Tile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub pair: Tile,
    pub groups: Vec<Group>,
}

/// Whether `concealed` plus `meld_count` held melds forms a complete hand.
pub fn is_complete(concealed: &[Tile], meld_count: usize) -> bool {
    let Some(groups) = required_groups(concealed, meld_count) else {
        return false;
    };
    let mut hand = TileCounts::new(concealed);
    is_standard_complete(&mut hand, groups)
}

/// Every distinct way to split `concealed` into a pair and groups.
pub fn find_decompositions(concealed: &[Tile], meld_count: usize) -> Vec<Decomposition> {
    let mut results = Vec::new();
    let Some(groups) = required_groups(concealed, meld_count) else {
        return results;
    };
    let mut hand = TileCounts::new(concealed);
    for i in 0..NUM_KINDS {
        if hand.counts[i] < 2 {
            continue;
        }
        hand.counts[i] -= 2;
        let mut bodies = Vec::new();
        let mut current = Vec::with_capacity(groups);
        decompose_all(&mut hand, 0, groups, &mut current, &mut bodies);
        hand.counts[i] += 2;
        let pair = kind_tile(i);
        results.extend(bodies.into_iter().map(|groups| Decomposition { pair, groups }));
    }
    results
}

/// Pair-then-groups search over a histogram. `hand` is restored on return.
pub fn is_standard_complete(hand: &mut TileCounts, groups: usize) -> bool {
    for i in 0..NUM_KINDS {
        if hand.counts[i] >= 2 {
            hand.counts[i] -= 2;
            let found = decompose(hand, 0, groups);
            hand.counts[i] += 2;
            if found {
                return true;
            }
        }
    }
    false
}

fn required_groups(concealed: &[Tile], meld_count: usize) -> Option<usize> {
    if 3 * meld_count + concealed.len() != WINNING_TILE_COUNT {
        return None;
    }
    // Flowers are segregated on draw and never complete a hand.
    if concealed.iter().any(|t| t.is_flower()) {
        return None;
    }
    Some(WINNING_GROUP_COUNT - meld_count)
}

#[inline]
fn is_run_start(i: usize) -> bool {
    i < WIND_START && i % 9 <= 6
}

#[inline]
fn kind_tile(i: usize) -> Tile {
    // Indices come from iterating 0..NUM_KINDS.
    Tile::from_index(i).unwrap_or(Tile::wan(1))
}

fn decompose(hand: &mut TileCounts, start: usize, remaining: usize) -> bool {
    let mut i = start;
    while i < NUM_KINDS && hand.counts[i] == 0 {
        i += 1;
    }
    if i == NUM_KINDS {
        return remaining == 0;
    }
    if remaining == 0 {
        return false;
    }

    if hand.counts[i] >= 3 {
        hand.counts[i] -= 3;
        let found = decompose(hand, i, remaining - 1);
        hand.counts[i] += 3;
        if found {
            return true;
        }
    }

    if is_run_start(i) && hand.counts[i + 1] > 0 && hand.counts[i + 2] > 0 {
        hand.counts[i] -= 1;
        hand.counts[i + 1] -= 1;
        hand.counts[i + 2] -= 1;
        let found = decompose(hand, i, remaining - 1);
        hand.counts[i] += 1;
        hand.counts[i + 1] += 1;
        hand.counts[i + 2] += 1;
        if found {
            return true;
        }
    }

    false
}

fn decompose_all(
    hand: &mut TileCounts,
    start: usize,
    remaining: usize,
    current: &mut Vec<Group>,
    results: &mut Vec<Vec<Group>>,
) {
    let mut i = start;
    while i < NUM_KINDS && hand.counts[i] == 0 {
        i += 1;
    }
    if i == NUM_KINDS {
        if remaining == 0 {
            results.push(current.clone());
        }
        return;
    }
    if remaining == 0 {
        return;
    }

    if hand.counts[i] >= 3 {
        hand.counts[i] -= 3;
        current.push(Group::Triplet(kind_tile(i)));
        decompose_all(hand, i, remaining - 1, current, results);
        current.pop();
        hand.counts[i] += 3;
    }

    if is_run_start(i) && hand.counts[i + 1] > 0 && hand.counts[i + 2] > 0 {
        hand.counts[i] -= 1;
        hand.counts[i + 1] -= 1;
        hand.counts[i + 2] -= 1;
        current.push(Group::Run(kind_tile(i)));
        decompose_all(hand, i, remaining - 1, current, results);
        current.pop();
        hand.counts[i] += 1;
        hand.counts[i + 1] += 1;
        hand.counts[i + 2] += 1;
    }
}
