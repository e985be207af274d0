//! Event-loop tests that drive a `Session` without a terminal.

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use sum_rise::app::{Control, Session};
use sum_rise::game::Block;
use sum_rise::io::BestScoreStore;
use sum_rise::ui::{layout, Flash};
use sum_rise::{Board, Cell, Game, Mode, Phase, CELL_W, ROWS};

fn session_in(dir: &tempfile::TempDir, best: u64) -> Session {
    let store = BestScoreStore::new(dir.path().join("best.json"));
    Session::new(Game::seeded(21, best), store)
}

fn pair_board() -> Board {
    let mut board = Board::new();
    board.set(9, 0, Cell::Filled(Block { id: 500, value: 4 }));
    board.set(9, 1, Cell::Filled(Block { id: 501, value: 6 }));
    board
}

#[test]
fn menu_keys_start_rounds_and_quit() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir, 0);
    assert_eq!(session.game.phase(), Phase::Menu);

    assert_eq!(session.handle_key(KeyCode::Char('2')), Control::Continue);
    assert_eq!(session.game.phase(), Phase::Playing);
    assert_eq!(session.game.mode(), Mode::Timed);

    session.handle_key(KeyCode::Char('m'));
    assert_eq!(session.game.phase(), Phase::Menu);

    session.handle_key(KeyCode::Char('1'));
    assert_eq!(session.game.mode(), Mode::Classic);

    assert_eq!(session.handle_key(KeyCode::Char('q')), Control::Quit);
}

#[test]
fn cursor_moves_within_the_board_and_picks() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir, 0);
    session.handle_key(KeyCode::Char('1'));
    session.game.stage(pair_board(), 10);
    assert_eq!(session.cursor, (ROWS - 1, 0));

    session.handle_key(KeyCode::Down);
    session.handle_key(KeyCode::Left);
    assert_eq!(session.cursor, (ROWS - 1, 0));

    session.handle_key(KeyCode::Char(' '));
    assert_eq!(session.game.selection(), &[(9, 0)]);
    session.handle_key(KeyCode::Char('c'));
    assert!(session.game.selection().is_empty());

    session.handle_key(KeyCode::Enter);
    session.handle_key(KeyCode::Right);
    session.handle_key(KeyCode::Char(' '));
    assert_eq!(session.game.score(), 20);
    assert_eq!(session.feedback.flash(), Flash::Success);
    assert!(session.feedback.is_cleared(9, 1));
    assert_eq!(session.feedback.picks, 3);
}

#[test]
fn overshoot_flashes_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir, 0);
    session.handle_key(KeyCode::Char('1'));
    session.game.stage(pair_board(), 5);

    session.handle_key(KeyCode::Char(' '));
    session.handle_key(KeyCode::Char('l'));
    session.handle_key(KeyCode::Char(' '));
    assert_eq!(session.feedback.flash(), Flash::Error);
    assert!(session.game.selection().is_empty());
}

#[test]
fn mouse_click_selects_cell_under_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir, 0);
    session.handle_key(KeyCode::Char('1'));
    session.game.stage(pair_board(), 30);

    let area = Rect::new(0, 0, 80, 40);
    let well = layout(area).unwrap().well;
    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: well.x + 1 + CELL_W as u16,
        row: well.y + 1 + 9,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(session.handle_mouse(click, area), Control::Continue);
    assert_eq!(session.cursor, (9, 1));
    assert_eq!(session.game.selection(), &[(9, 1)]);

    let release = MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        ..click
    };
    session.handle_mouse(release, area);
    assert_eq!(session.game.selection(), &[(9, 1)]);
}

#[test]
fn new_best_is_saved_when_leaving_the_round() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir, 10);
    session.handle_key(KeyCode::Char('1'));
    session.game.stage(pair_board(), 10);
    session.handle_key(KeyCode::Char(' '));
    session.handle_key(KeyCode::Right);
    session.handle_key(KeyCode::Char(' '));

    let store = BestScoreStore::new(dir.path().join("best.json"));
    assert_eq!(store.load().unwrap(), 0, "not saved mid-round");

    session.handle_key(KeyCode::Esc);
    assert_eq!(session.game.phase(), Phase::Menu);
    assert_eq!(store.load().unwrap(), 20);
}

#[test]
fn lower_score_does_not_overwrite_best() {
    let dir = tempfile::tempdir().unwrap();
    let store = BestScoreStore::new(dir.path().join("best.json"));
    store.save(500).unwrap();

    let game = Game::seeded(3, store.load_or_default());
    let mut session = Session::new(game, BestScoreStore::new(store.path()));
    session.handle_key(KeyCode::Char('1'));
    session.game.stage(pair_board(), 10);
    session.handle_key(KeyCode::Char(' '));
    session.handle_key(KeyCode::Right);
    session.handle_key(KeyCode::Char(' '));
    session.handle_key(KeyCode::Char('m'));
    session.persist_best();

    assert_eq!(store.load().unwrap(), 500);
    assert_eq!(session.game.best_score(), 500);
}

#[test]
fn game_over_keys_restart_or_leave() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir, 0);
    session.handle_key(KeyCode::Char('2'));
    let mut board = pair_board();
    board.set(0, 2, Cell::Filled(Block { id: 900, value: 3 }));
    session.game.stage(board, 30);
    session.game.row_advance();
    session.after_intent();
    assert_eq!(session.game.phase(), Phase::GameOver);

    session.handle_key(KeyCode::Char(' '));
    assert_eq!(session.game.phase(), Phase::GameOver);

    session.handle_key(KeyCode::Char('r'));
    assert_eq!(session.game.phase(), Phase::Playing);
    assert_eq!(session.game.mode(), Mode::Timed);
}
