use crate::board::{BoardState, Position};
use crate::moves;
use crate::playback::PlaybackState;
use crate::tour::TourStatus;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use std::io;
use std::time::Duration;
use tracing::warn;
use tui::backend::CrosstermBackend;
use tui::layout::{Constraint, Direction, Layout};
use tui::style::{Color, Modifier, Style};
use tui::symbols::Marker;
use tui::text::{Span, Spans};
use tui::widgets::canvas::{Canvas, Line, Points};
use tui::widgets::{Block, Borders, Paragraph};
use tui::Terminal;

/// Everything a renderer gets to see for one update. Borrowed, so drawing
/// can never reach back into the tour.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub board: &'a BoardState,
    pub path: &'a [Position],
    pub knight: Position,
    pub step: usize,
    pub status: TourStatus,
    pub playback: &'a PlaybackState,
}

/// Renderer is used by playback to show the tour. It should abstract the
/// implementation details, so a variety of kinds of screen would work.
pub trait Renderer {
    /// show the scene; playback logs a failure and carries on
    fn draw(&mut self, scene: &Scene) -> Result<(), io::Error>;
}

// text cells are this many columns wide
const CELL_WIDTH: u16 = 4;
const KNIGHT_GLYPH: &str = "♞";

// fg, bg for light and dark squares, following the printed board
const LIGHT_SQUARE: (Color, Color) = (Color::Black, Color::White);
const DARK_SQUARE: (Color, Color) = (Color::White, Color::Black);
const KNIGHT_COLOR: Color = Color::Blue;
const PATH_COLOR: Color = Color::Green;

/// text for one board square: the knight, a 1-based visit number, or the
/// square's current degree
fn cell_text(board: &BoardState, knight: Position, pos: Position) -> String {
    if pos == knight {
        format!("{:^4}", KNIGHT_GLYPH)
    } else if let Some(order) = board.order(pos) {
        format!("{:>3} ", order + 1)
    } else {
        format!(" ·{} ", moves::degree(pos, board))
    }
}

fn cell_style(board: &BoardState, knight: Position, pos: Position) -> Style {
    let (fg, bg) = if pos.is_light() { LIGHT_SQUARE } else { DARK_SQUARE };
    if pos == knight {
        Style::default()
            .fg(Color::Yellow)
            .bg(KNIGHT_COLOR)
            .add_modifier(Modifier::BOLD)
    } else if board.is_unvisited(pos) {
        // degree overlay, red on light squares and yellow on dark ones
        let score = if pos.is_light() { Color::Red } else { Color::Yellow };
        Style::default().fg(score).bg(bg).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(fg).bg(bg)
    }
}

/// rank labels down the left, file labels along the bottom
fn board_lines(scene: &Scene) -> Vec<Spans<'static>> {
    let n = scene.board.size() as i32;
    let mut lines: Vec<Spans> = (0..n)
        .map(|row| {
            let mut spans = vec![Span::raw(format!("{} ", n - row))];
            spans.extend((0..n).map(|col| {
                let pos = Position::new(row, col);
                Span::styled(
                    cell_text(scene.board, scene.knight, pos),
                    cell_style(scene.board, scene.knight, pos),
                )
            }));
            Spans::from(spans)
        })
        .collect();

    let files: String = (0..n)
        .map(|col| format!("{:^4}", (b'A' + col as u8) as char))
        .collect();
    lines.push(Spans::from(format!("  {}", files)));
    lines
}

fn status_span(scene: &Scene) -> Span<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match scene.status {
        TourStatus::Running if scene.playback.paused => {
            Span::styled("PAUSED", bold.fg(Color::Yellow))
        }
        TourStatus::Running => Span::styled("PLAYING", bold.fg(PATH_COLOR)),
        TourStatus::Complete => Span::styled("TOUR COMPLETE", bold.fg(PATH_COLOR)),
        TourStatus::Stuck => Span::styled("NO SOLUTION FOUND", bold.fg(Color::Red)),
        TourStatus::Cancelled => Span::styled("CANCELLED", bold.fg(Color::Red)),
    }
}

fn panel_lines(scene: &Scene) -> Vec<Spans<'static>> {
    let squares = scene.board.size() * scene.board.size();
    let mut lines = vec![
        Spans::from("SPACE: Pause/Resume"),
        Spans::from("UP/DOWN: Speed +/-"),
        Spans::from("Q/ESC: Quit"),
        Spans::from(""),
        Spans::from(format!(
            "Current Speed: {}ms",
            scene.playback.speed.as_millis()
        )),
        Spans::from(format!(
            "Move {}/{}: {}",
            scene.step + 1,
            squares,
            scene.knight.algebraic()
        )),
        Spans::from(status_span(scene)),
    ];
    if scene.status != TourStatus::Running {
        lines.push(Spans::from("SPACE: restart, Q: quit"));
    }
    lines
}

/// Where a square sits in the graph view. Light squares make up the top
/// row and dark squares the bottom one, each in row-major order; every
/// knight move crosses between the rows.
fn graph_point(pos: Position, size: usize) -> (f64, f64) {
    // n is even, so squares of one colour alternate in row-major order
    let slot = (pos.row as usize * size + pos.col as usize) / 2;
    let y = if pos.is_light() { 1.0 } else { 0.0 };
    (slot as f64, y)
}

/// the tour so far as graph edges, oldest first
fn graph_edges(path: &[Position], size: usize) -> Vec<Line> {
    path.windows(2)
        .map(|pair| {
            let (x1, y1) = graph_point(pair[0], size);
            let (x2, y2) = graph_point(pair[1], size);
            Line {
                x1,
                y1,
                x2,
                y2,
                color: PATH_COLOR,
            }
        })
        .collect()
}

/// full-screen terminal renderer, drawn using TUI and crossterm
pub struct TermRenderer {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TermRenderer {
    pub fn new() -> Result<TermRenderer, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(TermRenderer { terminal })
    }
}

impl Drop for TermRenderer {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, LeaveAlternateScreen, Show) {
            warn!(error = %e, "could not restore the terminal");
        }
    }
}

impl Renderer for TermRenderer {
    fn draw(&mut self, scene: &Scene) -> Result<(), io::Error> {
        let size = scene.board.size();
        // one row per rank plus the file labels, inside a border
        let board_height = size as u16 + 3;
        let board_width = 2 + CELL_WIDTH * size as u16 + 2;

        let mut light = Vec::new();
        let mut dark = Vec::new();
        let mut visited = Vec::new();
        for pos in scene.board.squares() {
            let point = graph_point(pos, size);
            if !scene.board.is_unvisited(pos) {
                visited.push(point);
            } else if pos.is_light() {
                light.push(point);
            } else {
                dark.push(point);
            }
        }
        let edges = graph_edges(scene.path, size);
        let knight = [graph_point(scene.knight, size)];
        let slots = (size * size / 2) as f64;

        self.terminal.draw(|f| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(board_height), Constraint::Min(5)].as_ref())
                .split(f.size());
            let top = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(board_width), Constraint::Min(24)].as_ref())
                .split(rows[0]);

            let board = Paragraph::new(board_lines(scene)).block(
                Block::default()
                    .title("Knight's Tour - Warnsdorff's Rule")
                    .borders(Borders::ALL),
            );
            f.render_widget(board, top[0]);

            let panel = Paragraph::new(panel_lines(scene))
                .block(Block::default().title("Controls").borders(Borders::ALL));
            f.render_widget(panel, top[1]);

            let graph = Canvas::default()
                .block(
                    Block::default()
                        .title("Knight graph: light squares above, dark below")
                        .borders(Borders::ALL),
                )
                .x_bounds([-1.0, slots])
                .y_bounds([-0.5, 1.5])
                .marker(Marker::Braille)
                .paint(|ctx| {
                    for edge in &edges {
                        ctx.draw(edge);
                    }
                    ctx.draw(&Points {
                        coords: &light,
                        color: Color::White,
                    });
                    ctx.draw(&Points {
                        coords: &dark,
                        color: Color::DarkGray,
                    });
                    ctx.draw(&Points {
                        coords: &visited,
                        color: PATH_COLOR,
                    });
                    ctx.draw(&Points {
                        coords: &knight,
                        color: Color::Yellow,
                    });
                });
            f.render_widget(graph, rows[1]);
        })?;
        Ok(())
    }
}

/// what a DummyRenderer saw on one draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnScene {
    pub step: usize,
    pub knight: Position,
    pub path: Vec<Position>,
    pub status: TourStatus,
    pub speed: Duration,
    pub paused: bool,
}

/// useful for testing non-display routines: remembers every scene
#[derive(Default)]
pub struct DummyRenderer {
    pub scenes: Vec<DrawnScene>,
    failing: bool,
}

impl DummyRenderer {
    pub fn new() -> DummyRenderer {
        DummyRenderer::default()
    }

    /// records like `new`, but reports every draw as failed
    pub fn failing() -> DummyRenderer {
        DummyRenderer {
            scenes: Vec::new(),
            failing: true,
        }
    }
}

impl Renderer for DummyRenderer {
    fn draw(&mut self, scene: &Scene) -> Result<(), io::Error> {
        self.scenes.push(DrawnScene {
            step: scene.step,
            knight: scene.knight,
            path: scene.path.to_vec(),
            status: scene.status,
            speed: scene.playback.speed,
            paused: scene.playback.paused,
        });
        if self.failing {
            return Err(io::Error::new(io::ErrorKind::Other, "dummy draw failure"));
        }
        Ok(())
    }
}
