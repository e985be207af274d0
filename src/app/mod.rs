use std::fs::File;
use std::io::{stdout, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::game::{Coord, Game, Mode, Phase};
use crate::io::BestScoreStore;
use crate::ui::{cell_at, draw_game, Feedback};
use crate::{COLS, FRAME_MS, ROWS};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Installs a file-backed subscriber. Without a path tracing events are
/// dropped, since the terminal belongs to the UI.
pub fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sumrise=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}

pub fn run(cli: Cli) -> Result<()> {
    let store = BestScoreStore::resolve(cli.best_file);
    let best = store.load_or_default();
    let game = match cli.seed {
        Some(seed) => Game::seeded(seed, best),
        None => Game::new(best),
    };
    let mut session = Session::new(game, store);
    if let Some(mode) = cli.mode {
        session.game.start_round(mode.into());
    }

    let mut tui = TuiGuard::new()?;
    let result = run_loop(tui.terminal_mut(), &mut session);
    session.persist_best();
    result
}

fn run_loop(terminal: &mut Term, session: &mut Session) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let snap = session.game.snapshot();
        terminal.draw(|frame| draw_game(frame, &snap, session.cursor, &session.feedback))?;

        session.feedback.step();

        if event::poll(Duration::from_millis(FRAME_MS))? {
            let control = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => session.handle_key(key.code),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    session.handle_mouse(mouse, size)
                }
                _ => Control::Continue,
            };
            if control == Control::Quit {
                break;
            }
        }

        let now = Instant::now();
        session.game.advance_time(now - last_tick);
        last_tick = now;
        session.after_intent();
    }
    Ok(())
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Everything the event loop owns besides the terminal: the engine, the
/// keyboard cursor, visual feedback and the best-score store.
pub struct Session {
    pub game: Game,
    pub cursor: Coord,
    pub feedback: Feedback,
    store: BestScoreStore,
    saved_best: u64,
}

impl Session {
    pub fn new(game: Game, store: BestScoreStore) -> Self {
        let saved_best = game.best_score();
        Self {
            game,
            cursor: (ROWS - 1, 0),
            feedback: Feedback::new(),
            store,
            saved_best,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Control {
        if matches!(code, KeyCode::Char('q')) {
            return Control::Quit;
        }
        match self.game.phase() {
            Phase::Menu => match code {
                KeyCode::Char('1') => self.start(Mode::Classic),
                KeyCode::Char('2') => self.start(Mode::Timed),
                KeyCode::Esc => return Control::Quit,
                _ => {}
            },
            Phase::Playing => match code {
                KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
                KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
                KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
                KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
                KeyCode::Char(' ') | KeyCode::Enter => {
                    let (row, col) = self.cursor;
                    let _ = self.game.select_cell(row, col);
                }
                KeyCode::Char('c') | KeyCode::Backspace => self.game.clear_selection(),
                KeyCode::Char('m') | KeyCode::Esc => self.game.return_to_menu(),
                _ => {}
            },
            Phase::GameOver => match code {
                KeyCode::Char('r') | KeyCode::Enter => {
                    self.game.restart();
                    self.feedback.reset();
                }
                KeyCode::Char('m') | KeyCode::Esc => self.game.return_to_menu(),
                _ => {}
            },
        }
        self.after_intent();
        Control::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> Control {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Control::Continue;
        }
        if let Some((row, col)) = cell_at(area, mouse.column, mouse.row) {
            self.cursor = (row, col);
            let _ = self.game.select_cell(row, col);
            self.after_intent();
        }
        Control::Continue
    }

    /// Routes queued engine signals to feedback and saves a new best once the
    /// round is no longer in play.
    pub fn after_intent(&mut self) {
        self.feedback.absorb(self.game.drain_signals());
        if self.game.phase() != Phase::Playing {
            self.persist_best();
        }
    }

    pub fn persist_best(&mut self) {
        let best = self.game.best_score();
        if best <= self.saved_best {
            return;
        }
        match self.store.save(best) {
            Ok(()) => {
                tracing::info!(target: "sumrise.store", best, "best score saved");
                self.saved_best = best;
            }
            Err(err) => {
                tracing::warn!(target: "sumrise.store", best, error = %err, "failed to save best score");
                // retried only once the best moves again
                self.saved_best = best;
            }
        }
    }

    fn start(&mut self, mode: Mode) {
        self.game.start_round(mode);
        self.cursor = (ROWS - 1, 0);
        self.feedback.reset();
    }

    fn move_cursor(&mut self, dr: isize, dc: isize) {
        let (row, col) = self.cursor;
        let row = row.saturating_add_signed(dr).min(ROWS - 1);
        let col = col.saturating_add_signed(dc).min(COLS - 1);
        self.cursor = (row, col);
    }
}
