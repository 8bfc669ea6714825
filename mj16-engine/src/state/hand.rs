use crate::agari;
use crate::errors::{MahjongError, MahjongResult};
use crate::state::legal_actions::{self, ChiOption};
use crate::tile::Tile;
use crate::types::{Meld, MeldKind};

/// Concealed tiles plus three per meld between turns.
pub const SETTLED_HAND_SIZE: usize = 16;

/// Insert `tile` into a sorted hand, maintaining sort order.
#[inline]
fn sorted_insert(hand: &mut Vec<Tile>, tile: Tile) {
    let pos = hand.partition_point(|&t| t < tile);
    hand.insert(pos, tile);
}

/// One seat's tiles: concealed (kept sorted), flowers, discards and melds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    concealed: Vec<Tile>,
    flowers: Vec<Tile>,
    discards: Vec<Tile>,
    melds: Vec<Meld>,
    pending_flower: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a drawn tile. Flowers go straight to the flower collection and
    /// leave a replacement owed.
    pub fn receive(&mut self, tile: Tile) {
        if tile.is_flower() {
            self.flowers.push(tile);
            self.pending_flower = true;
        } else {
            sorted_insert(&mut self.concealed, tile);
            self.pending_flower = false;
        }
    }

    /// True while the last tile received was a flower and no replacement has
    /// arrived yet.
    pub fn has_pending_flower(&self) -> bool {
        self.pending_flower
    }

    pub fn discard(&mut self, index: usize) -> MahjongResult<Tile> {
        if index >= self.concealed.len() {
            return Err(MahjongError::InvalidIndex {
                index,
                len: self.concealed.len(),
            });
        }
        let tile = self.concealed.remove(index);
        self.discards.push(tile);
        Ok(tile)
    }

    /// Removes the newest discard after another seat claims it.
    pub fn take_last_discard(&mut self) -> Option<Tile> {
        self.discards.pop()
    }

    pub fn pong_candidates(&self, tile: Tile) -> Option<[usize; 2]> {
        legal_actions::pong_candidates(&self.concealed, tile)
    }

    pub fn kong_candidates(&self, tile: Tile) -> Option<[usize; 3]> {
        legal_actions::kong_candidates(&self.concealed, tile)
    }

    pub fn concealed_kong_groups(&self) -> Vec<[usize; 4]> {
        legal_actions::concealed_kong_groups(&self.concealed)
    }

    pub fn chi_candidates(&self, tile: Tile) -> Vec<ChiOption> {
        legal_actions::chi_candidates(&self.concealed, tile)
    }

    pub fn chi(&mut self, tile: Tile, indices: [usize; 2]) -> MahjongResult<()> {
        let mut run = self.tiles_at(&indices)?;
        run.push(tile);
        run.sort();
        let is_run = run[0].offset(1) == Some(run[1]) && run[0].offset(2) == Some(run[2]);
        if !is_run {
            return Err(MahjongError::illegal(format!(
                "chi on {} with {:?} does not form a run",
                tile, indices
            )));
        }
        self.claim(MeldKind::Chi, Some(tile), &indices);
        Ok(())
    }

    pub fn pong(&mut self, tile: Tile, indices: [usize; 2]) -> MahjongResult<()> {
        self.ensure_identical(tile, &indices)?;
        self.claim(MeldKind::Pong, Some(tile), &indices);
        Ok(())
    }

    pub fn kong(&mut self, tile: Tile, indices: [usize; 3]) -> MahjongResult<()> {
        self.ensure_identical(tile, &indices)?;
        self.claim(MeldKind::Kong, Some(tile), &indices);
        Ok(())
    }

    pub fn concealed_kong(&mut self, indices: [usize; 4]) -> MahjongResult<()> {
        let first = self.tiles_at(&indices[..1])?[0];
        self.ensure_identical(first, &indices)?;
        self.claim(MeldKind::ConcealedKong, None, &indices);
        Ok(())
    }

    /// Whether the current concealed tiles and melds form a complete hand.
    pub fn is_complete(&self) -> bool {
        agari::is_complete(&self.concealed, self.melds.len())
    }

    /// Concealed tiles plus three per meld.
    pub fn settled_size(&self) -> usize {
        3 * self.melds.len() + self.concealed.len()
    }

    pub fn concealed(&self) -> &[Tile] {
        &self.concealed
    }

    pub fn flowers(&self) -> &[Tile] {
        &self.flowers
    }

    pub fn discards(&self) -> &[Tile] {
        &self.discards
    }

    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    /// Every tile this hand owns across all zones.
    pub fn tile_count(&self) -> usize {
        self.concealed.len()
            + self.flowers.len()
            + self.discards.len()
            + self.melds.iter().map(|m| m.tiles().len()).sum::<usize>()
    }

    pub fn all_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.concealed
            .iter()
            .chain(&self.flowers)
            .chain(&self.discards)
            .chain(self.melds.iter().flat_map(|m| m.tiles()))
            .copied()
    }

    fn tiles_at(&self, indices: &[usize]) -> MahjongResult<Vec<Tile>> {
        let mut seen = Vec::with_capacity(indices.len());
        for &i in indices {
            if i >= self.concealed.len() {
                return Err(MahjongError::InvalidIndex {
                    index: i,
                    len: self.concealed.len(),
                });
            }
            if seen.contains(&i) {
                return Err(MahjongError::illegal(format!("index {} used twice", i)));
            }
            seen.push(i);
        }
        Ok(indices.iter().map(|&i| self.concealed[i]).collect())
    }

    fn ensure_identical(&self, tile: Tile, indices: &[usize]) -> MahjongResult<()> {
        let tiles = self.tiles_at(indices)?;
        if tiles.iter().any(|&t| t != tile) {
            return Err(MahjongError::illegal(format!(
                "tiles at {:?} do not all match {}",
                indices, tile
            )));
        }
        Ok(())
    }

    /// Moves the concealed tiles at `indices` plus `claimed` into a new meld.
    /// Indices are removed highest first so earlier positions stay valid.
    fn claim(&mut self, kind: MeldKind, claimed: Option<Tile>, indices: &[usize]) {
        let mut order = indices.to_vec();
        order.sort_unstable_by(|a, b| b.cmp(a));
        let mut taken: Vec<Tile> = order.iter().map(|&i| self.concealed.remove(i)).collect();
        taken.reverse();
        taken.extend(claimed);
        self.melds.push(Meld::new(kind, taken));
    }
}
