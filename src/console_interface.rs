use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

use crate::core::{Coord, GRID_SIZE, Grid, magnitude_bucket};
use crate::models::GameRenderState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What the keyboard layer hands to the main loop. Cursor movement is a
/// presentation concern; the core only ever sees pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    MoveCursor(Direction),
    Press,
    Release,
    TogglePause,
    ToggleFlipMode,
    ToggleAudio,
    Reset,
    Quit,
}

/// Parses a grid fixture: six whitespace-separated tokens per line,
/// a signed integer or '.' for an empty cell. Blank lines are skipped,
/// missing cells stay empty.
pub fn parse_grid(s: &str) -> Grid {
    let mut cells = [[None; GRID_SIZE]; GRID_SIZE];
    let mut row = 0;
    for line in s.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if row >= GRID_SIZE {
            break;
        }
        for (col, token) in line.split_whitespace().take(GRID_SIZE).enumerate() {
            cells[row][col] = match token {
                "." => None,
                _ => token.parse::<i8>().ok(),
            };
        }
        row += 1;
    }
    Grid::from_cells(cells)
}

/// The inverse of `parse_grid`, used for snapshot assertions.
pub fn render_grid_to_string(grid: &Grid) -> String {
    let mut result = String::new();
    for row in 0..GRID_SIZE {
        let mut tokens = Vec::with_capacity(GRID_SIZE);
        for col in 0..GRID_SIZE {
            tokens.push(match grid.get(Coord { row, col }) {
                Some(value) => format!("{value:>3}"),
                None => format!("{:>3}", "."),
            });
        }
        result.push_str(&tokens.join(" "));
        result.push('\n');
    }
    result
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Eye-friendly palette for magnitude buckets 1-10. Negative values take
/// the white-complement color of their positive counterpart.
const MAGNITUDE_COLORS: [u32; 10] = [
    0x10B981, // 1: green
    0x22C55E, // 2
    0xFDE047, // 3: yellow
    0xFCD34D, // 4
    0xF59E0B, // 5: amber
    0xF97316, // 6: orange
    0xEF4444, // 7: red
    0xEC4899, // 8: pink
    0xA855F7, // 9: purple
    0x3B82F6, // 10: blue
];

fn value_rgb(value: i8) -> u32 {
    let positive = MAGNITUDE_COLORS[usize::from(magnitude_bucket(value)) - 1];
    if value > 0 { positive } else { 0xFFFFFF - positive }
}

/// Luminance threshold picks dark text on light tiles and vice versa.
fn contrast_rgb(background: u32) -> u32 {
    let r = (background >> 16) & 0xFF;
    let g = (background >> 8) & 0xFF;
    let b = background & 0xFF;
    let luminance = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
    if luminance > 0.5 { 0x374151 } else { 0xFFFFFF }
}

fn darken_rgb(rgb: u32, factor: f64) -> u32 {
    let scale = |c: u32| ((c as f64 * factor) as u32).min(0xFF);
    (scale((rgb >> 16) & 0xFF) << 16) | (scale((rgb >> 8) & 0xFF) << 8) | scale(rgb & 0xFF)
}

fn to_color(rgb: u32) -> Color {
    Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    )
}

fn tile_span(state: &GameRenderState, at: Coord) -> Span<'static> {
    let game = &state.game;
    let value = game.grid.get(at);
    let under_cursor = state.cursor == at;

    let body = match value {
        _ if game.paused => String::from(" ? "),
        Some(value) => format!("{value:>3}"),
        None => String::from(" . "),
    };
    let text = if under_cursor {
        format!("[{body}]")
    } else {
        format!(" {body} ")
    };

    let style = match value {
        _ if game.paused => Style::default().bg(Color::DarkGray).fg(Color::Gray),
        Some(value) => {
            let mut rgb = value_rgb(value);
            if game.is_selected(at) {
                // Selected tiles dim toward their own hue.
                rgb = darken_rgb(rgb, 0.7);
            }
            let style = Style::default().bg(to_color(rgb)).fg(to_color(contrast_rgb(rgb)));
            if game.is_selected(at) {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            }
        }
        None => Style::default().fg(Color::DarkGray),
    };

    Span::styled(text, style)
}

fn grid_lines(state: &GameRenderState) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(GRID_SIZE);
    for row in 0..GRID_SIZE {
        let mut spans = Vec::with_capacity(GRID_SIZE);
        for col in 0..GRID_SIZE {
            spans.push(tile_span(state, Coord { row, col }));
        }
        lines.push(Line::from(spans));
    }
    lines
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(f.area());

        let game = &state.game;

        // Score header
        let header = format!(
            "Score: {}   High: {}   Level: {}   Time: {}   Audio: {}",
            game.score,
            game.high_score,
            game.level(),
            game.formatted_time(),
            if state.audio_enabled { "on" } else { "off" },
        );
        let header_paragraph = Paragraph::new(header)
            .block(Block::default().borders(Borders::ALL).title("Numbers Game"))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(header_paragraph, chunks[0]);

        // Board
        let mistake = game.mistake_effect.is_some();
        let board_block = if mistake {
            Block::default()
                .borders(Borders::ALL)
                .title("MISTAKE")
                .style(Style::default().fg(Color::Red))
        } else if game.paused {
            Block::default().borders(Borders::ALL).title("Paused")
        } else if game.flip_mode {
            Block::default().borders(Borders::ALL).title("Flip mode")
        } else {
            Block::default().borders(Borders::ALL).title("Board")
        };
        let board_paragraph = Paragraph::new(grid_lines(state))
            .block(board_block)
            .alignment(Alignment::Center);
        f.render_widget(board_paragraph, chunks[1]);

        // Path info
        let path_text = if game.dragging || !game.path.is_empty() {
            format!("Sum: {}   Length: {}", game.path.sum(), game.path.len())
        } else {
            state.last_event.clone().unwrap_or_default()
        };
        let path_paragraph = Paragraph::new(path_text)
            .block(Block::default().borders(Borders::ALL).title("Path"))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(path_paragraph, chunks[2]);

        // Instructions
        let instructions = if game.flip_mode {
            "Arrows: cursor | Space: flip tile | F: path mode | P: pause | R: reset | Q: quit"
        } else {
            "Arrows: cursor | Space: start path | Enter: finish | F: flip mode | P: pause | R: reset | M: audio | Q: quit"
        };
        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Controls"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[3]);
    })?;
    Ok(())
}

pub fn handle_input() -> Result<Option<ConsoleInput>, Box<dyn std::error::Error>> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            let input = match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    ConsoleInput::MoveCursor(Direction::Up)
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                    ConsoleInput::MoveCursor(Direction::Down)
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    ConsoleInput::MoveCursor(Direction::Left)
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    ConsoleInput::MoveCursor(Direction::Right)
                }
                KeyCode::Char(' ') => ConsoleInput::Press,
                KeyCode::Enter => ConsoleInput::Release,
                KeyCode::Char('p') | KeyCode::Char('P') => ConsoleInput::TogglePause,
                KeyCode::Char('f') | KeyCode::Char('F') => ConsoleInput::ToggleFlipMode,
                KeyCode::Char('m') | KeyCode::Char('M') => ConsoleInput::ToggleAudio,
                KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Reset,
                _ => return Ok(None),
            };
            return Ok(Some(input));
        }
    }
    Ok(None)
}

/// Clamped cursor movement within the board.
pub fn move_cursor(cursor: Coord, direction: Direction) -> Coord {
    match direction {
        Direction::Up => Coord {
            row: cursor.row.saturating_sub(1),
            col: cursor.col,
        },
        Direction::Down => Coord {
            row: (cursor.row + 1).min(GRID_SIZE - 1),
            col: cursor.col,
        },
        Direction::Left => Coord {
            row: cursor.row,
            col: cursor.col.saturating_sub(1),
        },
        Direction::Right => Coord {
            row: cursor.row,
            col: (cursor.col + 1).min(GRID_SIZE - 1),
        },
    }
}
