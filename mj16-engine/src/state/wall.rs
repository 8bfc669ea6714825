use rand::Rng;

use crate::errors::{MahjongError, MahjongResult};
use crate::tile::{full_set, Tile};

/// Vendored Fisher-Yates shuffle, independent of `SliceRandom`'s internals
/// so a given RNG state always yields the same wall.
pub fn fisher_yates_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// Undrawn tiles. The top of the wall is the end of `tiles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wall {
    tiles: Vec<Tile>,
}

impl Wall {
    /// Full 144-tile set, uniformly shuffled.
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut tiles = full_set();
        fisher_yates_shuffle(&mut tiles, rng);
        Self { tiles }
    }

    /// Wall whose draws yield `tiles` front to back.
    pub fn from_draw_order(tiles: Vec<Tile>) -> Self {
        let mut t = tiles;
        t.reverse();
        Self { tiles: t }
    }

    pub fn draw(&mut self) -> MahjongResult<Tile> {
        self.tiles.pop().ok_or(MahjongError::EmptyWall)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Remaining tiles, top of the wall last.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{NUM_KINDS, NUM_TILES};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn shuffled_wall_is_a_permutation_of_the_full_set() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let wall = Wall::shuffled(&mut rng);
        assert_eq!(wall.len(), NUM_TILES);
        let mut counts = [0u8; NUM_KINDS];
        for t in wall.tiles() {
            counts[t.index()] += 1;
        }
        let mut expected = [0u8; NUM_KINDS];
        for t in full_set() {
            expected[t.index()] += 1;
        }
        assert_eq!(counts, expected);
        assert_ne!(wall.tiles(), full_set().as_slice());
    }

    #[test]
    fn same_seed_same_wall() {
        let a = Wall::shuffled(&mut ChaCha8Rng::seed_from_u64(42));
        let b = Wall::shuffled(&mut ChaCha8Rng::seed_from_u64(42));
        let c = Wall::shuffled(&mut ChaCha8Rng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn draws_follow_draw_order_then_fail() {
        let mut wall = Wall::from_draw_order(vec![Tile::wan(1), Tile::dragon(2)]);
        assert_eq!(wall.draw(), Ok(Tile::wan(1)));
        assert_eq!(wall.draw(), Ok(Tile::dragon(2)));
        assert!(wall.is_empty());
        assert_eq!(wall.draw(), Err(MahjongError::EmptyWall));
    }

    #[test]
    fn fisher_yates_empty_and_single() {
        let mut rng = ChaCha8Rng::from_seed([0u8; 32]);
        let mut empty: Vec<u8> = vec![];
        fisher_yates_shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());
        let mut single = vec![42u8];
        fisher_yates_shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![42]);
    }
}
