pub mod block;
pub mod board;
pub mod effects;
pub mod state;
pub mod timer;

pub use block::{Block, BlockId, BlockSource};
pub use board::{Board, Cell};
pub use state::{random_target, Coord, Game, Mode, Phase, RoundSnapshot, SelectOutcome, Signal};
