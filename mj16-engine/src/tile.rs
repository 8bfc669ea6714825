//! Tile catalog for Taiwanese 16-tile mahjong.
//!
//! Provides the six suits, the `Tile` value type with its (suit, rank)
//! ordering, the dense kind index used by count-based algorithms, and the
//! 144-tile full set a wall is built from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::MahjongError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Physical tiles in a full set: 108 suited + 16 wind + 12 dragon + 8 flower.
pub const NUM_TILES: usize = 144;

/// Copies of every suited, wind and dragon tile. Flowers are unique.
pub const COPIES_PER_KIND: u8 = 4;

/// Distinct (suit, rank) kinds, flowers included.
pub const NUM_KINDS: usize = 42;

// Kind index starts per suit.
pub const WAN_START: usize = 0;
pub const TONG_START: usize = 9;
pub const TIAO_START: usize = 18;
pub const WIND_START: usize = 27;
pub const DRAGON_START: usize = 31;
pub const FLOWER_START: usize = 34;

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

/// Declaration order doubles as the sort order of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Wan = 0,
    Tong = 1,
    Tiao = 2,
    Wind = 3,
    Dragon = 4,
    Flower = 5,
}

impl Suit {
    pub const ALL: [Suit; 6] = [
        Suit::Wan,
        Suit::Tong,
        Suit::Tiao,
        Suit::Wind,
        Suit::Dragon,
        Suit::Flower,
    ];

    /// Highest legal rank in this suit.
    #[inline]
    pub const fn max_rank(self) -> u8 {
        match self {
            Suit::Wan | Suit::Tong | Suit::Tiao => 9,
            Suit::Wind => 4,
            Suit::Dragon => 3,
            Suit::Flower => 8,
        }
    }

    /// Copies of each rank present in a full set.
    #[inline]
    pub const fn copies(self) -> u8 {
        match self {
            Suit::Flower => 1,
            _ => COPIES_PER_KIND,
        }
    }

    /// True for the three numbered suits, the only ones that form runs.
    #[inline]
    pub const fn is_numbered(self) -> bool {
        matches!(self, Suit::Wan | Suit::Tong | Suit::Tiao)
    }

    #[inline]
    const fn start(self) -> usize {
        match self {
            Suit::Wan => WAN_START,
            Suit::Tong => TONG_START,
            Suit::Tiao => TIAO_START,
            Suit::Wind => WIND_START,
            Suit::Dragon => DRAGON_START,
            Suit::Flower => FLOWER_START,
        }
    }

    /// Single-letter notation used by the tile parser.
    pub const fn letter(self) -> char {
        match self {
            Suit::Wan => 'w',
            Suit::Tong => 't',
            Suit::Tiao => 's',
            Suit::Wind => 'e',
            Suit::Dragon => 'd',
            Suit::Flower => 'f',
        }
    }

    pub fn from_letter(c: char) -> Option<Suit> {
        Suit::ALL.into_iter().find(|s| s.letter() == c)
    }
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// An immutable (suit, rank) value. Copies of the same kind are
/// interchangeable; there is no per-copy identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTile")]
pub struct Tile {
    suit: Suit,
    rank: u8,
}

/// Unvalidated wire form of a [`Tile`].
#[derive(Deserialize)]
struct RawTile {
    suit: Suit,
    rank: u8,
}

impl TryFrom<RawTile> for Tile {
    type Error = MahjongError;

    fn try_from(raw: RawTile) -> Result<Self, Self::Error> {
        Tile::new(raw.suit, raw.rank).ok_or_else(|| MahjongError::Parse {
            input: format!("{}{}", raw.rank, raw.suit.letter()),
            message: format!("Rank out of range for {:?}", raw.suit),
        })
    }
}

impl Tile {
    /// Creates a tile if `rank` is within the suit's bounds.
    #[inline]
    pub const fn new(suit: Suit, rank: u8) -> Option<Self> {
        if rank >= 1 && rank <= suit.max_rank() {
            Some(Tile { suit, rank })
        } else {
            None
        }
    }

    #[inline]
    const fn checked(suit: Suit, rank: u8) -> Self {
        assert!(rank >= 1 && rank <= suit.max_rank(), "tile rank out of range");
        Tile { suit, rank }
    }

    // Shorthand constructors for literal tiles.
    //
    // # Panics
    //
    // If `rank` is outside the suit's bounds; use [`Tile::new`] for
    // untrusted ranks.

    pub const fn wan(rank: u8) -> Self {
        Self::checked(Suit::Wan, rank)
    }

    pub const fn tong(rank: u8) -> Self {
        Self::checked(Suit::Tong, rank)
    }

    pub const fn tiao(rank: u8) -> Self {
        Self::checked(Suit::Tiao, rank)
    }

    pub const fn wind(rank: u8) -> Self {
        Self::checked(Suit::Wind, rank)
    }

    pub const fn dragon(rank: u8) -> Self {
        Self::checked(Suit::Dragon, rank)
    }

    pub const fn flower(rank: u8) -> Self {
        Self::checked(Suit::Flower, rank)
    }

    #[inline]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub const fn is_flower(self) -> bool {
        matches!(self.suit, Suit::Flower)
    }

    /// Dense index in `0..NUM_KINDS`.
    #[inline]
    pub const fn index(self) -> usize {
        self.suit.start() + self.rank as usize - 1
    }

    /// Inverse of [`Tile::index`].
    pub const fn from_index(index: usize) -> Option<Self> {
        let suit = match index {
            0..9 => Suit::Wan,
            9..18 => Suit::Tong,
            18..27 => Suit::Tiao,
            27..31 => Suit::Wind,
            31..34 => Suit::Dragon,
            34..42 => Suit::Flower,
            _ => return None,
        };
        Some(Tile {
            suit,
            rank: (index - suit.start()) as u8 + 1,
        })
    }

    /// The tile `offset` ranks away in the same numbered suit, if any.
    pub fn offset(self, offset: i8) -> Option<Self> {
        if !self.suit.is_numbered() {
            return None;
        }
        let rank = self.rank as i8 + offset;
        if rank < 1 {
            return None;
        }
        Tile::new(self.suit, rank as u8)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({})", self)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.letter())
    }
}

// ---------------------------------------------------------------------------
// Full set
// ---------------------------------------------------------------------------

/// All 144 tiles in catalog order: suited, winds, dragons, then flowers.
pub fn full_set() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(NUM_TILES);
    for suit in Suit::ALL {
        for rank in 1..=suit.max_rank() {
            for _ in 0..suit.copies() {
                tiles.push(Tile::checked(suit, rank));
            }
        }
    }
    tiles
}

/// Per-kind copy limit, indexed by [`Tile::index`].
#[inline]
pub const fn kind_limit(index: usize) -> u8 {
    if index >= FLOWER_START {
        1
    } else {
        COPIES_PER_KIND
    }
}
