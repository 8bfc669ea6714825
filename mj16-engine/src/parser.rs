//! Compact tile notation: runs of ranks followed by a suit letter, e.g.
//! `"123w 456t 789s 1234e 123d 1f"`. Whitespace is ignored.

use crate::errors::{MahjongError, MahjongResult};
use crate::tile::{kind_limit, Suit, Tile, NUM_KINDS};

struct CopyTracker {
    used: [u8; NUM_KINDS],
}

impl CopyTracker {
    fn new() -> Self {
        Self {
            used: [0; NUM_KINDS],
        }
    }

    fn take(&mut self, tile: Tile) -> Result<Tile, String> {
        let idx = tile.index();
        if self.used[idx] >= kind_limit(idx) {
            return Err(format!("No more copies of tile {}", tile));
        }
        self.used[idx] += 1;
        Ok(tile)
    }
}

pub fn parse_tiles(text: &str) -> MahjongResult<Vec<Tile>> {
    let mut tracker = CopyTracker::new();
    let mut tiles = Vec::new();
    let mut pending_digits: Vec<u8> = Vec::new();

    let err = |message: String| MahjongError::Parse {
        input: text.to_string(),
        message,
    };

    for c in text.chars() {
        if let Some(d) = c.to_digit(10) {
            pending_digits.push(d as u8);
        } else if let Some(suit) = Suit::from_letter(c) {
            if pending_digits.is_empty() {
                return Err(err(format!("Suit '{}' without ranks", c)));
            }
            for &rank in &pending_digits {
                let tile = Tile::new(suit, rank)
                    .ok_or_else(|| err(format!("Rank {} out of range for '{}'", rank, c)))?;
                tiles.push(tracker.take(tile).map_err(&err)?);
            }
            pending_digits.clear();
        } else if !c.is_whitespace() {
            return Err(err(format!("Unexpected character '{}'", c)));
        }
    }

    if !pending_digits.is_empty() {
        return Err(err("Pending digits without suit".to_string()));
    }

    Ok(tiles)
}

pub fn parse_tile(text: &str) -> MahjongResult<Tile> {
    let tiles = parse_tiles(text)?;
    match tiles.as_slice() {
        [tile] => Ok(*tile),
        [] => Err(MahjongError::Parse {
            input: text.to_string(),
            message: "No tile found in string".to_string(),
        }),
        _ => Err(MahjongError::Parse {
            input: text.to_string(),
            message: format!(
                "Expected exactly one tile, but found {} tiles in string",
                tiles.len()
            ),
        }),
    }
}

/// Renders tiles back into grouped notation, e.g. `"123w45t"`.
pub fn format_tiles(tiles: &[Tile]) -> String {
    let mut out = String::new();
    let mut iter = tiles.iter().peekable();
    while let Some(tile) = iter.next() {
        out.push_str(&tile.rank().to_string());
        let suit_changes = iter.peek().map_or(true, |next| next.suit() != tile.suit());
        if suit_changes {
            out.push(tile.suit().letter());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_suits_in_order() {
        let tiles = parse_tiles("12w 3t 4e 1f").unwrap();
        assert_eq!(
            tiles,
            vec![
                Tile::wan(1),
                Tile::wan(2),
                Tile::tong(3),
                Tile::wind(4),
                Tile::flower(1)
            ]
        );
    }

    #[test]
    fn rejects_fifth_copy_and_second_flower() {
        assert!(parse_tiles("11111w").is_err());
        assert!(parse_tiles("1111w").is_ok());
        assert!(parse_tiles("11f").is_err());
    }

    #[test]
    fn rejects_out_of_range_rank() {
        assert!(parse_tiles("5e").is_err());
        assert!(parse_tiles("4d").is_err());
        assert!(parse_tiles("0w").is_err());
    }

    #[test]
    fn rejects_dangling_digits_and_junk() {
        assert!(matches!(
            parse_tiles("123"),
            Err(MahjongError::Parse { .. })
        ));
        assert!(parse_tiles("12x").is_err());
        assert!(parse_tiles("w").is_err());
    }

    #[test]
    fn parse_tile_requires_exactly_one() {
        assert_eq!(parse_tile("7s").unwrap(), Tile::tiao(7));
        assert!(parse_tile("").is_err());
        assert!(parse_tile("77s").is_err());
    }

    #[test]
    fn format_groups_by_suit() {
        let tiles = parse_tiles("123w 45t 1d").unwrap();
        assert_eq!(format_tiles(&tiles), "123w45t1d");
    }
}
