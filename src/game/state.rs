use std::time::Duration;

use rand::Rng;

use crate::game::timer::{PendingAdvance, TickTimer};
use crate::game::{Block, BlockSource, Board};
use crate::{ADVANCE_DELAY_MS, TARGET_MAX, TARGET_MIN, TICK_MS, TIMED_SECONDS};

pub type Coord = (usize, usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Classic,
    Timed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

/// Fire-and-forget notifications for the feedback layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    Select,
    MatchSuccess { points: u64, cells: Vec<Coord> },
    Overshoot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored,
    Pending,
    Match,
    Overshoot,
}

/// Everything a renderer needs after an intent has been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub board: Board,
    pub target: u32,
    pub selection: Vec<Coord>,
    pub current_sum: u32,
    pub score: u64,
    pub best_score: u64,
    /// `Some` only while a timed round is being played.
    pub time_remaining: Option<u32>,
    pub phase: Phase,
    pub mode: Mode,
    pub round: u64,
}

impl RoundSnapshot {
    pub fn is_selected(&self, row: usize, col: usize) -> bool {
        self.selection.contains(&(row, col))
    }
}

pub fn random_target<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(TARGET_MIN..=TARGET_MAX)
}

pub struct Game {
    pub(super) board: Board,
    pub(super) target: u32,
    pub(super) selection: Vec<Coord>,
    pub(super) score: u64,
    pub(super) best_score: u64,
    pub(super) mode: Mode,
    pub(super) phase: Phase,
    pub(super) time_remaining: u32,
    pub(super) round: u64,
    pub(super) source: BlockSource,
    pub(super) signals: Vec<Signal>,
    pub(super) pending: Vec<PendingAdvance>,
    pub(super) advance_delay: Duration,
    tick_timer: TickTimer,
}

impl Game {
    pub fn new(best_score: u64) -> Self {
        Self::with_source(BlockSource::from_entropy(), best_score)
    }

    pub fn seeded(seed: u64, best_score: u64) -> Self {
        Self::with_source(BlockSource::seeded(seed), best_score)
    }

    fn with_source(source: BlockSource, best_score: u64) -> Self {
        Self {
            board: Board::new(),
            target: TARGET_MIN,
            selection: Vec::new(),
            score: 0,
            best_score,
            mode: Mode::Classic,
            phase: Phase::Menu,
            time_remaining: TIMED_SECONDS,
            round: 0,
            source,
            signals: Vec::new(),
            pending: Vec::new(),
            advance_delay: Duration::from_millis(ADVANCE_DELAY_MS),
            tick_timer: TickTimer::new(Duration::from_millis(TICK_MS)),
        }
    }

    /// Delay between a classic-mode match and the row advance it triggers.
    /// Zero applies the advance inside the match transition.
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn selection(&self) -> &[Coord] {
        &self.selection
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_remaining(&self) -> Option<u32> {
        (self.phase == Phase::Playing && self.mode == Mode::Timed).then_some(self.time_remaining)
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending.iter().any(|p| p.round == self.round)
    }

    pub fn timer_armed(&self) -> bool {
        self.tick_timer.is_armed()
    }

    pub fn current_sum(&self) -> u32 {
        self.selection
            .iter()
            .filter_map(|&(row, col)| self.board.block_at(row, col))
            .map(|block: Block| u32::from(block.value))
            .sum()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            board: self.board.clone(),
            target: self.target,
            selection: self.selection.clone(),
            current_sum: self.current_sum(),
            score: self.score,
            best_score: self.best_score,
            time_remaining: self.time_remaining(),
            phase: self.phase,
            mode: self.mode,
            round: self.round,
        }
    }

    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    pub fn start_round(&mut self, mode: Mode) {
        self.round = self.round.wrapping_add(1);
        self.board = Board::initial(&mut self.source);
        self.target = random_target(self.source.rng_mut());
        self.selection.clear();
        self.score = 0;
        self.mode = mode;
        self.phase = Phase::Playing;
        self.time_remaining = TIMED_SECONDS;
        self.pending.clear();
        self.sync_timer();
        tracing::info!(
            target: "sumrise.round",
            round = self.round,
            mode = ?mode,
            target_sum = self.target,
            "round started"
        );
    }

    pub fn restart(&mut self) {
        if self.phase != Phase::GameOver {
            return;
        }
        self.start_round(self.mode);
    }

    pub fn return_to_menu(&mut self) {
        self.record_best();
        tracing::info!(
            target: "sumrise.round",
            round = self.round,
            score = self.score,
            best = self.best_score,
            "returned to menu"
        );
        self.round = self.round.wrapping_add(1);
        self.phase = Phase::Menu;
        self.board = Board::new();
        self.selection.clear();
        self.score = 0;
        self.pending.clear();
        self.sync_timer();
    }

    /// Toggles `(row, col)` in the selection and resolves the new sum against
    /// the target.
    pub fn select_cell(&mut self, row: usize, col: usize) -> SelectOutcome {
        if self.phase != Phase::Playing || self.board.block_at(row, col).is_none() {
            return SelectOutcome::Ignored;
        }
        if let Some(pos) = self.selection.iter().position(|&c| c == (row, col)) {
            self.selection.remove(pos);
        } else {
            self.selection.push((row, col));
        }
        self.signals.push(Signal::Select);

        let sum = self.current_sum();
        if sum == self.target {
            self.apply_match();
            SelectOutcome::Match
        } else if sum > self.target {
            self.apply_overshoot(sum);
            SelectOutcome::Overshoot
        } else {
            SelectOutcome::Pending
        }
    }

    pub fn clear_selection(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.selection.clear();
    }

    /// One second of the timed-mode countdown. Reaching zero raises the board
    /// and refills the clock in the same step.
    pub fn tick(&mut self) {
        if self.phase != Phase::Playing || self.mode != Mode::Timed {
            return;
        }
        if self.time_remaining <= 1 {
            self.time_remaining = TIMED_SECONDS;
            self.row_advance();
        } else {
            self.time_remaining -= 1;
        }
    }

    /// Drives the timed countdown and any deferred classic advances.
    pub fn advance_time(&mut self, dt: Duration) {
        let round = self.round;
        self.pending.retain(|p| p.round == round);
        let mut due = 0;
        for p in &mut self.pending {
            p.elapse(dt);
            if p.is_due() {
                due += 1;
            }
        }
        self.pending.retain(|p| !p.is_due());
        for _ in 0..due {
            self.row_advance();
        }

        let fired = self.tick_timer.advance(dt);
        for _ in 0..fired {
            if !self.tick_timer.is_armed() {
                break;
            }
            self.tick();
        }
    }

    /// Replaces the board and target of the current round, e.g. to set up a
    /// puzzle position. The target is taken as given.
    pub fn stage(&mut self, board: Board, target: u32) {
        self.board = board;
        self.target = target;
        self.selection.clear();
    }

    pub(super) fn record_best(&mut self) {
        self.best_score = self.best_score.max(self.score);
    }

    pub(super) fn sync_timer(&mut self) {
        let armed = self.phase == Phase::Playing && self.mode == Mode::Timed;
        self.tick_timer.set_armed(armed);
    }
}
