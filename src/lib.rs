pub mod app;
pub mod cli;
pub mod config;
pub mod game;
pub mod io;
pub mod ui;

pub use config::{
    ADVANCE_DELAY_MS, BEST_FILE_ENV, BEST_FILE_NAME, CELL_W, COLS, FLASH_FRAMES, FRAME_MS,
    INITIAL_ROWS, MIN_PANE_WIDTH, PLAY_H, PLAY_W, POINTS_PER_BLOCK, ROWS, TARGET_MAX, TARGET_MIN,
    TICK_MS, TIMED_SECONDS, VALUE_MAX, VALUE_MIN,
};
pub use game::{Board, Cell, Game, Mode, Phase, RoundSnapshot, SelectOutcome, Signal};
