use crate::game::{Coord, Signal};
use crate::FLASH_FRAMES;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flash {
    None,
    Success,
    Error,
}

/// Frame-counted visual reactions to engine signals. Lives entirely on the
/// presentation side; the engine never reads it back.
#[derive(Debug, Default)]
pub struct Feedback {
    pub success_frames: u8,
    pub error_frames: u8,
    pub cleared_cells: Vec<Coord>,
    pub last_points: u64,
    pub picks: u64,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, signals: Vec<Signal>) {
        for signal in signals {
            match signal {
                Signal::Select => self.picks += 1,
                Signal::MatchSuccess { points, cells } => {
                    self.success_frames = FLASH_FRAMES;
                    self.error_frames = 0;
                    self.cleared_cells = cells;
                    self.last_points = points;
                }
                Signal::Overshoot => {
                    self.error_frames = FLASH_FRAMES;
                    self.success_frames = 0;
                }
            }
        }
    }

    /// Called once per drawn frame.
    pub fn step(&mut self) {
        if self.error_frames > 0 {
            self.error_frames -= 1;
        }
        if self.success_frames > 0 {
            self.success_frames -= 1;
            if self.success_frames == 0 {
                self.cleared_cells.clear();
            }
        }
    }

    pub fn flash(&self) -> Flash {
        if self.success_frames > 0 {
            Flash::Success
        } else if self.error_frames > 0 {
            Flash::Error
        } else {
            Flash::None
        }
    }

    pub fn is_cleared(&self, row: usize, col: usize) -> bool {
        self.success_frames > 0 && self.cleared_cells.contains(&(row, col))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
