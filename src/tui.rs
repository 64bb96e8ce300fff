use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use crate::config::Difficulty;
use crate::game::{CellView, Game, Status};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Retry,
    Switch(Difficulty),
    Hint,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Retry => "Retry",
            Action::Switch(d) => d.label(),
            Action::Hint => "Hint",
        }
    }
}

/// Clickable button row, laid out left to right starting one column in.
struct ButtonBar {
    actions: Vec<Action>,
}

impl ButtonBar {
    fn for_game(game: &Game) -> Self {
        let mut actions = vec![Action::Retry];
        // the classic board has no difficulty selection
        if game.difficulty().is_some() {
            actions.extend(Difficulty::ALL.into_iter().map(Action::Switch));
        }
        actions.push(Action::Hint);
        Self { actions }
    }

    /// `[Label]` followed by one space; returns each action with its column span.
    fn spans(&self, origin: u16) -> Vec<(Action, u16, u16)> {
        let mut x = origin + 1;
        self.actions.iter().map(|&a| {
            let w = a.label().len() as u16 + 2;
            let span = (a, x, x + w);
            x += w + 1;
            span
        }).collect()
    }

    fn hit(&self, area: Rect, mx: u16, my: u16) -> Option<Action> {
        if my != area.y { return None; }
        self.spans(area.x).into_iter().find(|&(_, start, end)| mx >= start && mx < end).map(|(a, _, _)| a)
    }
}

pub fn run_tui(mut game: Game) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut cursor = (0usize, 0usize);
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(33);
    let autodemo = std::env::var("MINEFIELD_TUI_AUTODEMO").ok().is_some();
    let mut demo_step = 0usize;

    let mut hit_areas = HitAreas::default();
    let res = loop {
        terminal.draw(|f| { hit_areas = ui(f, &game, cursor); })?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                        KeyCode::Char('h') | KeyCode::Left => {
                            if cursor.0 > 0 { cursor.0 -= 1; }
                        }
                        KeyCode::Char('l') | KeyCode::Right => {
                            if cursor.0 + 1 < game.size() { cursor.0 += 1; }
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            if cursor.1 > 0 { cursor.1 -= 1; }
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            if cursor.1 + 1 < game.size() { cursor.1 += 1; }
                        }
                        KeyCode::Char('f') => { game.toggle_flag(cursor.0, cursor.1); }
                        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => {
                            game.reveal(cursor.0, cursor.1);
                        }
                        KeyCode::Char('?') => perform(&mut game, &mut cursor, Action::Hint),
                        KeyCode::Char('n') => perform(&mut game, &mut cursor, Action::Retry),
                        KeyCode::Char(c @ '1'..='3') if game.difficulty().is_some() => {
                            let d = Difficulty::ALL[(c as u8 - b'1') as usize];
                            perform(&mut game, &mut cursor, Action::Switch(d));
                        }
                        _ => {}
                    }
                }
                Event::Mouse(m) => {
                    if let MouseEventKind::Down(btn) = m.kind {
                        if let Some(action) = ButtonBar::for_game(&game).hit(hit_areas.buttons, m.column, m.row) {
                            perform(&mut game, &mut cursor, action);
                        } else if let Some((cx, cy)) = pos_to_cell(m.column, m.row, hit_areas.board, game.size() as u16) {
                            let (cx, cy) = (cx as usize, cy as usize);
                            cursor = (cx, cy);
                            match btn {
                                MouseButton::Left => { game.reveal(cx, cy); }
                                MouseButton::Right => { game.toggle_flag(cx, cy); }
                                MouseButton::Middle => {}
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            game.tick();
            if autodemo {
                let mid = game.size() / 2;
                match demo_step {
                    0 => { cursor = (mid, mid); game.reveal(mid, mid); }
                    10 => { game.use_hint(); }
                    20 => { game.toggle_flag(0, game.size() - 1); }
                    40 => break Ok(()),
                    _ => {}
                }
                demo_step += 1;
            }
        }
    };

    terminal.show_cursor()?;
    res
}

fn perform(game: &mut Game, cursor: &mut (usize, usize), action: Action) {
    match action {
        Action::Retry => game.retry(),
        Action::Switch(d) => game.reset(d),
        Action::Hint => { game.use_hint(); }
    }
    let max = game.size().saturating_sub(1);
    *cursor = (cursor.0.min(max), cursor.1.min(max));
}

#[derive(Default)]
struct HitAreas {
    buttons: Rect,
    board: Rect,
}

fn ui(f: &mut ratatui::Frame, game: &Game, cursor: (usize, usize)) -> HitAreas {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    f.render_widget(info_bar(game), root[0]);

    let bar = ButtonBar::for_game(game);
    let buttons: Vec<Span> = bar.actions.iter().flat_map(|&a| {
        let style = if a == Action::Hint && game.hint_used() {
            Style::default().fg(Color::DarkGray)
        } else if a == Action::Retry {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Black).bg(Color::Gray)
        };
        [Span::styled(format!("[{}]", a.label()), style), Span::raw(" ")]
    }).collect();
    let mut line = vec![Span::raw(" ")];
    line.extend(buttons);
    f.render_widget(Paragraph::new(Line::from(line)), root[1]);

    let area = centered_grid_area(root[2], game.size() as u16);
    let inner = inner_area(area);
    draw_board(f, game, area, cursor);

    let status = match game.status() {
        Status::GameOver => "Boom! You hit a mine. n retry, 1-3 difficulty, q quit",
        Status::Victory => "Cleared! n retry, 1-3 difficulty, q quit",
        _ => "Mouse: left=reveal, right=flag • Arrows/HJKL move • Enter/Space reveal • f flag • ? hint • n retry • q quit",
    };
    let footer = Paragraph::new(status)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[3]);

    HitAreas { buttons: root[1], board: inner }
}

fn info_bar(game: &Game) -> Paragraph<'static> {
    let secs = game.elapsed_seconds();
    let mode = game.difficulty().map_or("Classic", Difficulty::label);
    let text = format!(
        "Score {:05}   Time {:02}:{:02}   Best {:05}   Mode: {}   Flags {}/{}",
        game.score(), secs / 60, secs % 60, game.high_score(), mode, game.flagged_count(), game.mine_count(),
    );
    Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Minefield"))
}

fn centered_grid_area(parent: Rect, cells: u16) -> Rect {
    // one glyph + one space per cell, plus the border
    let grid_w = cells * 2 + 2;
    let grid_h = cells + 2;
    let x = parent.x.saturating_add((parent.width.saturating_sub(grid_w)) / 2);
    let y = parent.y.saturating_add((parent.height.saturating_sub(grid_h)) / 2);
    Rect { x, y, width: grid_w.min(parent.width), height: grid_h.min(parent.height) }
}

fn draw_board(f: &mut ratatui::Frame, game: &Game, area: Rect, cursor: (usize, usize)) {
    let size = game.size();
    let mut lines: Vec<Line> = Vec::with_capacity(size);
    for y in 0..size {
        let mut spans: Vec<Span> = Vec::with_capacity(size);
        for x in 0..size {
            let view = game.cell_view(x, y).unwrap_or(CellView::Hidden);
            let mut ch = view.glyph();
            let mut style = match view {
                CellView::Mine => Style::default().fg(Color::Red),
                CellView::Open(n) => number_style(n),
                CellView::Flagged => Style::default().fg(Color::Yellow),
                CellView::Hidden => Style::default().fg(Color::DarkGray),
            };

            if cursor == (x, y) {
                style = style.add_modifier(Modifier::REVERSED);
                if ch == ' ' { ch = '·'; }
            }

            spans.push(Span::styled(format!("{} ", ch), style));
        }
        lines.push(Line::from(spans));
    }

    let border = if game.flash_active() { Style::default().fg(Color::Red).bg(Color::Red) } else { Style::default() };
    let title = match game.status() {
        Status::GameOver => "Lost",
        Status::Victory => "Won",
        _ => "Board",
    };
    let board_block = Block::default().borders(Borders::ALL).border_style(border).title(title);
    f.render_widget(Paragraph::new(lines).block(board_block), area);
}

fn number_style(n: u8) -> Style {
    match n {
        0 => Style::default().fg(Color::Gray),
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::Red),
        4 => Style::default().fg(Color::Magenta),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

fn inner_area(area: Rect) -> Rect {
    // Block::inner() for Borders::ALL
    Rect { x: area.x.saturating_add(1), y: area.y.saturating_add(1), width: area.width.saturating_sub(2), height: area.height.saturating_sub(2) }
}

fn pos_to_cell(mx: u16, my: u16, inner: Rect, cells: u16) -> Option<(u16, u16)> {
    if mx < inner.x || my < inner.y { return None; }
    let cx = (mx - inner.x) / 2; // matches the two-column cell width in draw_board
    let cy = my - inner.y;
    if cx < cells && cy < cells { Some((cx, cy)) } else { None }
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_to_cell_maps_two_column_cells() {
        let inner = Rect { x: 10, y: 5, width: 28, height: 14 };
        assert_eq!(pos_to_cell(10, 5, inner, 14), Some((0, 0)));
        assert_eq!(pos_to_cell(11, 5, inner, 14), Some((0, 0)));
        assert_eq!(pos_to_cell(12, 6, inner, 14), Some((1, 1)));
        assert_eq!(pos_to_cell(9, 5, inner, 14), None);
        assert_eq!(pos_to_cell(38, 5, inner, 14), None);
    }

    #[test]
    fn button_bar_hit_testing() {
        let game = Game::new(Difficulty::Easy, 1);
        let bar = ButtonBar::for_game(&game);
        let area = Rect { x: 0, y: 3, width: 80, height: 1 };
        // " [Retry] [Easy] ..."
        assert_eq!(bar.hit(area, 1, 3), Some(Action::Retry));
        assert_eq!(bar.hit(area, 7, 3), Some(Action::Retry));
        assert_eq!(bar.hit(area, 8, 3), None);
        assert_eq!(bar.hit(area, 9, 3), Some(Action::Switch(Difficulty::Easy)));
        assert_eq!(bar.hit(area, 1, 4), None);
    }

    #[test]
    fn classic_board_has_no_difficulty_buttons() {
        let game = Game::with_config(crate::config::GameConfig::CLASSIC, 1);
        assert_eq!(ButtonBar::for_game(&game).actions, vec![Action::Retry, Action::Hint]);
    }
}
