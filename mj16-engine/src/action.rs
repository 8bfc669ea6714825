use serde::{Deserialize, Serialize};

/// Turn-engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Waiting,
    Drawing,
    Discarding,
    Responding,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndType {
    Win,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    /// Completed on the seat's own draw.
    SelfDraw,
    /// Completed on the replacement draw after a kong.
    KongDraw,
    /// Completed by claiming another seat's discard.
    Discard,
}

/// A seat's answer to an open claim window or a concealed-kong prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Response {
    Win,
    Kong,
    /// Concealed kong, by option index.
    ConcealedKong(usize),
    Pong,
    /// Chi, by option index.
    Chi(usize),
    Skip,
}

impl Response {
    /// Parses a response command: `W`, `K`, `K<n>`, `P`, `C<n>`. Anything
    /// else, including a malformed number, reads as `Skip`.
    pub fn parse(token: &str) -> Self {
        let token = token.trim().to_ascii_uppercase();
        let (head, rest) = match token.char_indices().nth(1) {
            Some((i, _)) => token.split_at(i),
            None => (token.as_str(), ""),
        };
        match (head, rest) {
            ("W", "") => Response::Win,
            ("K", "") => Response::Kong,
            ("P", "") => Response::Pong,
            ("K", n) => n.parse().map_or(Response::Skip, Response::ConcealedKong),
            ("C", n) => n.parse().map_or(Response::Skip, Response::Chi),
            _ => Response::Skip,
        }
    }

    pub fn is_skip(self) -> bool {
        matches!(self, Response::Skip)
    }
}
