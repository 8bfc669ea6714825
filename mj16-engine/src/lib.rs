pub mod action;
pub mod agari;
pub mod errors;
pub mod game_event;
pub mod parser;
pub mod policy;
pub mod rule;
pub mod state;
pub mod tile;
pub mod types;

pub use action::{EndType, Phase, Response, WinKind};
pub use errors::{MahjongError, MahjongResult};
pub use game_event::GameEvent;
pub use policy::{Autonomous, Decision, DecisionPolicy, Interactive};
pub use rule::GameRule;
pub use state::hand::Hand;
pub use state::wall::Wall;
pub use state::{Game, Prompt};
pub use tile::{Suit, Tile};
