//! Structured record of everything the turn engine does.
//!
//! Every engine call returns the events it produced; the full log stays on
//! the game and can be exported as JSON for replay or rendering.

use serde::{Deserialize, Serialize};

use crate::action::WinKind;
use crate::state::legal_actions::ClaimOptions;
use crate::tile::Tile;
use crate::types::{MeldKind, Seat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Wall built, before dealing.
    GameStarted { seed: u64, wall_size: usize },
    /// Initial deal finished for one seat.
    Dealt {
        seat: Seat,
        concealed: usize,
        flowers: usize,
    },
    /// A flower was drawn and set aside; a replacement follows.
    FlowerReplaced { seat: Seat, flower: Tile },
    /// Turn draw or kong replacement draw.
    Drew { seat: Seat, tile: Tile },
    ConcealedKongDeclared { seat: Seat, tile: Tile },
    Discarded { seat: Seat, tile: Tile },
    AwaitingDiscard { seat: Seat },
    AwaitingResponse { options: ClaimOptions },
    AwaitingConcealedKong { seat: Seat, tiles: Vec<Tile> },
    /// A discard was claimed into a chi, pong or kong.
    Claimed {
        seat: Seat,
        from: Seat,
        kind: MeldKind,
        tiles: Vec<Tile>,
    },
    /// A seat with a legal claim declined it.
    Passed { seat: Seat },
    Won {
        seat: Seat,
        kind: WinKind,
        tile: Option<Tile>,
        from: Option<Seat>,
    },
    /// The wall ran out; the game ends without a winner.
    WallExhausted,
}

impl GameEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::Won { .. } | GameEvent::WallExhausted)
    }
}
