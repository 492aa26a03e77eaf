//! Dino Run scene rendering.
//!
//! Uses a cell buffer for per-character color control. The session's draw
//! list (world units, 900 x 250) is rasterized into a grid scaled to the
//! play field, HUD text is stamped on top, and the grid is written out
//! row-by-row as Paragraph widgets.

use std::ops::Range;

use super::game_common::{create_game_layout, render_info_panel_frame, render_status_bar};
use dino::constants::{GROUND_STRIP_Y, WORLD_HEIGHT, WORLD_WIDTH};
use dino::runner::{DrawCommand, Rect as WorldRect, Session, SessionState, Sprite};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

// ── Palette ─────────────────────────────────────────────────────────
const C_DINO: Color = Color::LightYellow;
const C_DINO_HIT: Color = Color::Red;
const C_CACTUS: Color = Color::Rgb(60, 140, 60);
const C_PTERO: Color = Color::Rgb(160, 80, 160);
const C_CLOUD: Color = Color::Rgb(110, 110, 120);
const C_GROUND_FG: Color = Color::Rgb(90, 70, 50);
const C_GROUND_BG: Color = Color::Rgb(50, 40, 30);
const C_GROUND_SUB: Color = Color::Rgb(70, 55, 40);
const C_SCORE: Color = Color::Rgb(200, 200, 200);
const C_HIGH: Color = Color::Rgb(115, 115, 115);
const C_GAME_OVER: Color = Color::White;

const GROUND_CHAR: char = '▓';
const GROUND_SUB: char = '░';
const RESTART_GLYPH: &str = "↻";

/// World y of the "GAME OVER" text and the restart glyph.
const GAME_OVER_Y: f64 = 80.0;
const RESTART_Y: f64 = 125.0;

/// State of the optional gesture feed, for the status bar and info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStatus {
    Off,
    Released,
    OpenPalm,
    Disconnected,
}

/// Render the whole game screen.
pub fn render_runner_scene(frame: &mut Frame, area: Rect, session: &Session, gesture: GestureStatus) {
    let layout = create_game_layout(frame, area, " Dino Run ", Color::Gray, 10, 22);

    render_play_field(frame, layout.content, session);
    render_status_bar_content(frame, layout.status_bar, session, gesture);
    render_info_panel(frame, layout.info_panel, session, gesture);
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Cell grid with the world-to-cell scale.
struct Canvas {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    x_scale: f64,
    y_scale: f64,
}

impl Canvas {
    fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![vec![Cell::default(); width as usize]; height as usize],
            width: width as usize,
            height: height as usize,
            x_scale: width as f64 / WORLD_WIDTH,
            y_scale: height as f64 / WORLD_HEIGHT,
        }
    }

    fn row_of(&self, world_y: f64) -> usize {
        ((world_y * self.y_scale).floor().max(0.0) as usize).min(self.height.saturating_sub(1))
    }

    /// Rows and columns covered by a world rectangle, clipped to the grid.
    fn cell_span(&self, rect: &WorldRect) -> Option<(Range<usize>, Range<usize>)> {
        let col_start = (rect.x * self.x_scale).floor().max(0.0) as usize;
        let col_end = ((rect.right() * self.x_scale).ceil().max(0.0) as usize).min(self.width);
        let row_start = (rect.y * self.y_scale).floor().max(0.0) as usize;
        let row_end = ((rect.bottom() * self.y_scale).ceil().max(0.0) as usize).min(self.height);
        if col_start >= col_end || row_start >= row_end {
            return None;
        }
        Some((row_start..row_end, col_start..col_end))
    }

    fn put(&mut self, row: usize, col: usize, ch: char, fg: Color) {
        if row < self.height && col < self.width {
            let bg = self.cells[row][col].bg;
            self.cells[row][col] = Cell { ch, fg, bg };
        }
    }

    fn text(&mut self, row: usize, col: usize, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(row, col + i, ch, fg);
        }
    }

    fn text_centered(&mut self, row: usize, text: &str, fg: Color) {
        let col = self.width.saturating_sub(text.chars().count()) / 2;
        self.text(row, col, text, fg);
    }
}

/// Render the play field: ground, entities, HUD, game-over banner.
fn render_play_field(frame: &mut Frame, area: Rect, session: &Session) {
    if area.height < 4 || area.width < 20 {
        return;
    }

    let mut canvas = Canvas::new(area.width, area.height);

    draw_ground(&mut canvas);
    for command in session.draw_list() {
        draw_sprite(&mut canvas, &command);
    }
    draw_hud(&mut canvas, session);
    if session.state == SessionState::GameOver {
        let row = canvas.row_of(GAME_OVER_Y);
        canvas.text_centered(row, "GAME OVER", C_GAME_OVER);
        let row = canvas.row_of(RESTART_Y);
        canvas.text_centered(row, RESTART_GLYPH, C_GAME_OVER);
    }

    flush_canvas(frame, area, &canvas);
}

fn draw_ground(canvas: &mut Canvas) {
    let ground_row = canvas.row_of(GROUND_STRIP_Y);
    for row in ground_row..canvas.height {
        for col in 0..canvas.width {
            canvas.cells[row][col] = if row == ground_row {
                Cell {
                    ch: GROUND_CHAR,
                    fg: C_GROUND_FG,
                    bg: C_GROUND_BG,
                }
            } else if col % 5 == 0 {
                Cell {
                    ch: GROUND_SUB,
                    fg: C_GROUND_SUB,
                    bg: Color::Reset,
                }
            } else {
                Cell::default()
            };
        }
    }
}

fn draw_sprite(canvas: &mut Canvas, command: &DrawCommand) {
    let Some((rows, cols)) = canvas.cell_span(&command.rect) else {
        return;
    };
    let (top, bottom) = (rows.start, rows.end - 1);
    for row in rows {
        for col in cols.clone() {
            let (ch, fg) = glyph(command.sprite, row == top, row == bottom, col - cols.start);
            if ch != ' ' {
                canvas.put(row, col, ch, fg);
            }
        }
    }
}

/// Character and color for one cell of a sprite.
fn glyph(sprite: Sprite, top: bool, bottom: bool, dx: usize) -> (char, Color) {
    match sprite {
        Sprite::Cloud => ('~', C_CLOUD),
        Sprite::Cactus(_) => (if top && dx % 2 == 1 { '╷' } else { '|' }, C_CACTUS),
        Sprite::Pterodactyl(frame) => {
            // Wings up on frame 0, down on frame 1
            let ch = match (top, frame) {
                (true, 0) => '^',
                (true, _) => ' ',
                (false, 0) => '▀',
                (false, _) => 'v',
            };
            (ch, C_PTERO)
        }
        Sprite::DinoWalk(frame) => {
            if bottom {
                // Legs alternate with the walk frame
                let ch = match (frame + dx) % 2 {
                    0 => '/',
                    _ => '\\',
                };
                (ch, C_DINO)
            } else {
                ('█', C_DINO)
            }
        }
        Sprite::DinoJump => (if bottom { '"' } else { '█' }, C_DINO),
        Sprite::DinoCollide => (if top { 'X' } else { '█' }, C_DINO_HIT),
    }
}

/// Score top-right, zero-padded; high score to its left once one exists.
fn draw_hud(canvas: &mut Canvas, session: &Session) {
    let score = format!("{:05}", session.score());
    let score_col = canvas.width.saturating_sub(score.len() + 1);
    canvas.text(0, score_col, &score, C_SCORE);

    if session.high_score() > 0 {
        let high = format!("HI  {:05}  ", session.high_score());
        let high_col = score_col.saturating_sub(high.len());
        canvas.text(0, high_col, &high, C_HIGH);
    }
}

fn flush_canvas(frame: &mut Frame, area: Rect, canvas: &Canvas) {
    for (row_idx, row_data) in canvas.cells.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn render_status_bar_content(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    gesture: GestureStatus,
) {
    if session.state == SessionState::GameOver {
        render_status_bar(
            frame,
            area,
            "Game over",
            Color::Red,
            &[("[Space/Up]", "Restart"), ("[Q]", "Quit")],
        );
        return;
    }

    let (status, color) = if gesture == GestureStatus::OpenPalm {
        ("Open Palm Detected", Color::Cyan)
    } else {
        ("Run!", Color::LightYellow)
    };
    render_status_bar(
        frame,
        area,
        status,
        color,
        &[("[Space/Up]", "Jump"), ("[Q]", "Quit")],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &Session, gesture: GestureStatus) {
    let inner = render_info_panel_frame(frame, area);

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let (gesture_text, gesture_color) = match gesture {
        GestureStatus::Off => ("off", Color::DarkGray),
        GestureStatus::Released => ("ready", Color::White),
        GestureStatus::OpenPalm => ("open palm", Color::Cyan),
        GestureStatus::Disconnected => ("lost", Color::Red),
    };

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                format!("{:05}", session.score()),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("High:  ", label),
            Span::styled(format!("{:05}", session.high_score()), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Obstacles: ", label),
            Span::styled(session.obstacles.len().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Gesture: ", label),
            Span::styled(gesture_text, Style::default().fg(gesture_color)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(C_DINO)),
            Span::styled("Dino", label),
        ]),
        Line::from(vec![
            Span::styled(" | ", Style::default().fg(C_CACTUS)),
            Span::styled("Cactus", label),
        ]),
        Line::from(vec![
            Span::styled(" ^ ", Style::default().fg(C_PTERO)),
            Span::styled("Pterodactyl", label),
        ]),
        Line::from(vec![
            Span::styled(" ~ ", Style::default().fg(C_CLOUD)),
            Span::styled("Cloud", label),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
