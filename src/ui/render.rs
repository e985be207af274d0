use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::game::{Cell, Coord, Mode, Phase, RoundSnapshot};
use crate::ui::feedback::{Feedback, Flash};
use crate::{CELL_W, COLS, MIN_PANE_WIDTH, PLAY_H, PLAY_W, ROWS};

const INFO_H: u16 = 5;
const CONTROLS_H: u16 = 5;

/// Screen regions of the playing view, shared by drawing and mouse hit-testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Areas {
    pub cabinet: Rect,
    pub info: Rect,
    pub well: Rect,
    pub controls: Rect,
}

fn cabinet_block() -> Block<'static> {
    Block::default()
        .title("SUM RISE")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left)
}

pub fn layout(area: Rect) -> Option<Areas> {
    if area.width < MIN_PANE_WIDTH {
        return None;
    }
    let cabinet_inner = cabinet_block().inner(area);

    let col_rect = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAY_W as u16),
            Constraint::Min(0),
        ])
        .split(cabinet_inner)[1];

    let stack = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(INFO_H),
            Constraint::Length(PLAY_H as u16),
            Constraint::Length(CONTROLS_H),
            Constraint::Min(0),
        ])
        .split(col_rect);

    let mut info = stack[1];
    let well = stack[2];
    let mut controls = stack[3];
    // Widen info/controls boxes slightly while keeping them centered in the cabinet.
    let expand = 4u16;
    let max_right = cabinet_inner.x + cabinet_inner.width;
    let new_x = info.x.saturating_sub(expand).max(cabinet_inner.x);
    let mut new_w = info.width.saturating_add(expand * 2);
    if new_x + new_w > max_right {
        new_w = max_right.saturating_sub(new_x);
    }
    info.x = new_x;
    info.width = new_w;
    controls.x = new_x;
    controls.width = new_w;

    Some(Areas {
        cabinet: area,
        info,
        well,
        controls,
    })
}

/// Maps a terminal position to the board cell drawn there.
pub fn cell_at(area: Rect, x: u16, y: u16) -> Option<Coord> {
    let well = layout(area)?.well;
    let inner_x = x.checked_sub(well.x + 1)? as usize;
    let row = y.checked_sub(well.y + 1)? as usize;
    let col = inner_x / CELL_W;
    // the trailing gap column of each cell is not part of it
    if row >= ROWS || col >= COLS || inner_x % CELL_W == CELL_W - 1 {
        return None;
    }
    Some((row, col))
}

pub fn draw_game(frame: &mut Frame, snap: &RoundSnapshot, cursor: Coord, feedback: &Feedback) {
    let area = frame.size();

    let Some(areas) = layout(area) else {
        let msg = Paragraph::new(format!("RESIZE PANE (min width: {})", MIN_PANE_WIDTH))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("SUM RISE"));
        frame.render_widget(msg, area);
        return;
    };

    frame.render_widget(cabinet_block(), areas.cabinet);

    if snap.phase == Phase::Menu {
        draw_menu(frame, snap, areas);
        return;
    }

    draw_info(frame, snap, feedback, areas.info);
    draw_playfield(frame, snap, cursor, feedback, areas.well);
    draw_controls(frame, areas.controls);

    if snap.phase == Phase::GameOver {
        draw_game_over(frame, snap, areas.well);
    }
}

fn value_color(value: u8) -> Color {
    match value {
        1..=3 => Color::Cyan,
        4..=6 => Color::Magenta,
        _ => Color::Blue,
    }
}

fn draw_playfield(
    frame: &mut Frame,
    snap: &RoundSnapshot,
    cursor: Coord,
    feedback: &Feedback,
    play_rect: Rect,
) {
    let danger = (0..COLS).any(|col| snap.board.block_at(1, col).is_some());
    let ceiling_style = if danger || snap.board.is_top_row_occupied() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let mut lines: Vec<Line> = Vec::with_capacity(PLAY_H);
    lines.push(Line::styled(
        format!("┌{}┐", "─".repeat(PLAY_W - 2)),
        ceiling_style,
    ));

    for row in 0..ROWS {
        let mut spans = Vec::with_capacity(COLS * 2 + 2);
        spans.push(Span::raw("│"));
        for col in 0..COLS {
            let (text, mut style) = match snap.board.get(row, col) {
                Cell::Filled(block) => (
                    format!(" {} ", block.value),
                    Style::default()
                        .fg(value_color(block.value))
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::Empty => (" · ".to_string(), Style::default().fg(Color::DarkGray)),
            };
            if snap.is_selected(row, col) {
                style = style.bg(Color::Yellow).fg(Color::Black);
            }
            if feedback.is_cleared(row, col) {
                style = style.bg(Color::Green).fg(Color::Black);
            }
            if snap.phase == Phase::Playing && cursor == (row, col) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" ".repeat(CELL_W - 3)));
        }
        spans.push(Span::raw("│"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::raw(format!("└{}┘", "═".repeat(PLAY_W - 2))));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
    frame.render_widget(paragraph, play_rect);
}

fn draw_info(frame: &mut Frame, snap: &RoundSnapshot, feedback: &Feedback, area: Rect) {
    let border = match feedback.flash() {
        Flash::Success => Style::default().fg(Color::Green),
        Flash::Error => Style::default().fg(Color::Red),
        Flash::None => Style::default(),
    };
    let block = Block::default()
        .title("INFO")
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let sum_style = if snap.current_sum > 0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let left = Paragraph::new(vec![
        Line::from(vec![
            Span::raw(format!("{:<7} ", "TARGET:")),
            Span::styled(snap.target.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::raw(format!("{:<7} ", "SUM:")),
            Span::styled(snap.current_sum.to_string(), sum_style),
        ]),
        Line::raw(format!("{:<7} {}", "SCORE:", snap.score)),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(left, cols[0]);

    let mode = match snap.mode {
        Mode::Classic => "CLASSIC",
        Mode::Timed => "TIMED",
    };
    let time = snap
        .time_remaining
        .map(|t| format!("{t:>2}s"))
        .unwrap_or_else(|| "--".to_string());
    let time_style = match snap.time_remaining {
        Some(t) if t <= 3 => Style::default().fg(Color::Red),
        _ => Style::default(),
    };
    let right = Paragraph::new(vec![
        Line::raw(format!("{:<5} {}", "BEST:", snap.best_score)),
        Line::raw(format!("{:<5} {}", "MODE:", mode)),
        Line::from(vec![
            Span::raw(format!("{:<5} ", "TIME:")),
            Span::styled(time, time_style),
        ]),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(right, cols[1]);
}

fn draw_controls(frame: &mut Frame, area: Rect) {
    let block = Block::default().title("CONTROLS").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let left = Paragraph::new(vec![
        Line::raw("arrows move"),
        Line::raw("space pick"),
        Line::raw("c clear"),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(left, cols[0]);

    let right = Paragraph::new(vec![
        Line::raw("r retry"),
        Line::raw("m menu"),
        Line::raw("q quit"),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(right, cols[1]);
}

fn draw_menu(frame: &mut Frame, snap: &RoundSnapshot, areas: Areas) {
    let menu_rect = Rect {
        x: areas.info.x,
        y: areas.info.y,
        width: areas.info.width,
        height: areas
            .controls
            .y
            .saturating_add(areas.controls.height)
            .saturating_sub(areas.info.y),
    };
    let lines = vec![
        Line::styled("SUM RISE", Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::raw("Pick blocks that add up"),
        Line::raw("to the target."),
        Line::raw("Don't let the stack"),
        Line::raw("reach the top."),
        Line::raw(""),
        Line::raw("1  classic"),
        Line::raw("2  timed"),
        Line::raw(""),
        Line::raw(format!("BEST  {}", snap.best_score)),
        Line::raw(""),
        Line::raw("q quit"),
    ];
    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("MENU").borders(Borders::ALL));
    frame.render_widget(menu, menu_rect);
}

fn draw_game_over(frame: &mut Frame, snap: &RoundSnapshot, play_rect: Rect) {
    let overlay_w = (PLAY_W as u16).saturating_sub(4).max(8);
    let overlay_h = 6u16;
    let popup = Rect {
        x: play_rect.x + (play_rect.width.saturating_sub(overlay_w)) / 2,
        y: play_rect.y + (play_rect.height.saturating_sub(overlay_h)) / 2,
        width: overlay_w,
        height: overlay_h,
    };
    let overlay = Paragraph::new(format!(
        "GAME OVER\nscore {}  best {}\nr retry  m menu",
        snap.score, snap.best_score
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(Clear, popup);
    frame.render_widget(overlay, popup);
}
