// Shared game rules/constants.
pub const ROWS: usize = 10;
pub const COLS: usize = 6;
pub const INITIAL_ROWS: usize = 4;
pub const VALUE_MIN: u8 = 1;
pub const VALUE_MAX: u8 = 9;
pub const TARGET_MIN: u32 = 10;
pub const TARGET_MAX: u32 = 30;
pub const POINTS_PER_BLOCK: u64 = 10;
pub const TIMED_SECONDS: u32 = 10;
pub const TICK_MS: u64 = 1000;
pub const ADVANCE_DELAY_MS: u64 = 300; // classic mode: rise after the clear flash

// Terminal layout.
pub const CELL_W: usize = 4; // " 7 " plus a gap column
pub const PLAY_W: usize = COLS * CELL_W + 2; // inner width plus side walls
pub const PLAY_H: usize = ROWS + 2; // inner height plus ceiling/floor
// Minimal pane width to fit the info/controls panels + cabinet border.
pub const MIN_PANE_WIDTH: u16 = (PLAY_W as u16) + 10;
pub const FLASH_FRAMES: u8 = 4;
pub const FRAME_MS: u64 = 50;

pub const BEST_FILE_ENV: &str = "SUM_RISE_BEST_FILE";
pub const BEST_FILE_NAME: &str = ".sum-rise-best.json";
