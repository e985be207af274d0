use crate::game::state::random_target;
use crate::game::timer::PendingAdvance;
use crate::game::{Mode, Phase, Signal};
use crate::{POINTS_PER_BLOCK, TIMED_SECONDS};

use super::Game;

impl Game {
    pub(super) fn apply_match(&mut self) {
        let cleared = std::mem::take(&mut self.selection);
        let points = POINTS_PER_BLOCK * cleared.len() as u64;
        self.score += points;
        self.record_best();
        self.board = self.board.without_cells(&cleared);
        self.target = random_target(self.source.rng_mut());
        tracing::debug!(
            target: "sumrise.match",
            round = self.round,
            blocks = cleared.len(),
            points,
            score = self.score,
            next_target = self.target,
            "selection matched"
        );
        self.signals.push(Signal::MatchSuccess {
            points,
            cells: cleared,
        });

        match self.mode {
            Mode::Classic if self.advance_delay.is_zero() => self.row_advance(),
            Mode::Classic => self
                .pending
                .push(PendingAdvance::new(self.round, self.advance_delay)),
            Mode::Timed => self.time_remaining = TIMED_SECONDS,
        }
    }

    pub(super) fn apply_overshoot(&mut self, sum: u32) {
        tracing::debug!(
            target: "sumrise.match",
            round = self.round,
            sum,
            target_sum = self.target,
            "selection overshot"
        );
        // The whole pick is discarded, not just the last block.
        self.selection.clear();
        self.signals.push(Signal::Overshoot);
    }

    /// The rise. Loss is decided on the board as it is now; an occupied top
    /// row ends the round and freezes the board instead of shifting it away.
    pub fn row_advance(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        if self.board.is_top_row_occupied() {
            self.phase = Phase::GameOver;
            self.selection.clear();
            self.pending.clear();
            self.record_best();
            self.sync_timer();
            tracing::info!(
                target: "sumrise.round",
                round = self.round,
                score = self.score,
                best = self.best_score,
                "game over"
            );
            return;
        }
        self.board = self.board.shifted_up(&mut self.source);
        // Follow the selected blocks up; row 0 was empty so none is lost.
        for (row, _) in &mut self.selection {
            *row -= 1;
        }
        tracing::trace!(target: "sumrise.rise", round = self.round, "board advanced");
    }
}
