use serde::{Deserialize, Serialize};

use crate::tile::{Tile, NUM_KINDS};

/// A tile multiset as a histogram over kind indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCounts {
    pub counts: [u8; NUM_KINDS],
}

impl TileCounts {
    pub fn new(tiles: &[Tile]) -> Self {
        let mut c = TileCounts::default();
        for &t in tiles {
            c.add(t);
        }
        c
    }

    pub fn add(&mut self, t: Tile) {
        self.counts[t.index()] += 1;
    }

    pub fn remove(&mut self, t: Tile) {
        let idx = t.index();
        if self.counts[idx] > 0 {
            self.counts[idx] -= 1;
        }
    }

    pub fn get(&self, t: Tile) -> u8 {
        self.counts[t.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }
}

impl Default for TileCounts {
    fn default() -> Self {
        TileCounts {
            counts: [0; NUM_KINDS],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    Chi,
    Pong,
    Kong,
    ConcealedKong,
}

impl MeldKind {
    pub fn is_kong(self) -> bool {
        matches!(self, MeldKind::Kong | MeldKind::ConcealedKong)
    }
}

/// A claimed or declared group. For chi/pong/kong the last tile is the one
/// taken from another seat's discard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    kind: MeldKind,
    tiles: Vec<Tile>,
}

impl Meld {
    pub fn new(kind: MeldKind, tiles: Vec<Tile>) -> Self {
        Self { kind, tiles }
    }

    pub fn kind(&self) -> MeldKind {
        self.kind
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The discard this meld was completed with.
    pub fn claimed_tile(&self) -> Option<Tile> {
        match self.kind {
            MeldKind::ConcealedKong => None,
            _ => self.tiles.last().copied(),
        }
    }
}

/// Seat index, 0-3. Seat 0 is the interactive seat by default.
pub type Seat = u8;

pub const NUM_SEATS: usize = 4;

/// Clockwise distance from `from` to `to` (1 = next, 2 = across, 3 = previous).
#[inline]
pub fn seat_distance(from: Seat, to: Seat) -> u8 {
    (to + NUM_SEATS as u8 - from) % NUM_SEATS as u8
}
