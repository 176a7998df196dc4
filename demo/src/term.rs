//! Crossterm terminal back-end: raw-mode setup, input decoding and drawing.
//!
//! Each grid cell is two terminal columns wide so the map looks roughly
//! square. The grid starts on the second terminal row; the first row is a
//! title bar and three status rows follow the grid.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::Point;

use crate::app::{Msg, Tile, Visualizer};

const CELL_WIDTH: u16 = 2;
const GRID_TOP: u16 = 1;

const HELP: &str = concat!(
    "click: start/end  right-click: wall  Enter: run  Tab: algorithm  ",
    "s: speed  +/-: faster/slower  r: reset  t: new terrain  q: quit",
);

/// Maps a [`Tile`] to its background colour.
fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Open => Color::White,
        Tile::Wall => Color::Black,
        Tile::Start => Color::Green,
        Tile::Goal => Color::Red,
        Tile::Visited => Color::Yellow,
        Tile::Frontier => Color::Cyan,
        Tile::Path => Color::Blue,
    }
}

/// Maps a crossterm [`KeyEvent`] to a [`Msg`].
fn to_msg(key: KeyEvent) -> Option<Msg> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Msg::Escape),
        KeyCode::Char(c) => Some(Msg::Char(c)),
        KeyCode::Enter => Some(Msg::Enter),
        KeyCode::Esc => Some(Msg::Escape),
        KeyCode::Backspace => Some(Msg::Backspace),
        KeyCode::Tab => Some(Msg::Tab),
        _ => None,
    }
}

/// Grid cell under a terminal position. May lie outside the grid.
fn cell_at(column: u16, row: u16) -> Option<Point> {
    if row < GRID_TOP {
        return None;
    }
    Some(Point::new(
        (column / CELL_WIDTH) as i32,
        (row - GRID_TOP) as i32,
    ))
}

/// A terminal in raw mode with the alternate screen and mouse capture on.
pub struct Terminal {
    out: Stdout,
    open: bool,
}

impl Terminal {
    /// Switch the terminal into drawing mode.
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out, open: true })
    }

    /// Wait up to `timeout` for one input event.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Option<Msg>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let msg = match event::read()? {
            Event::Key(key) => to_msg(key),
            Event::Mouse(me) => match me.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    cell_at(me.column, me.row).map(Msg::Click)
                }
                MouseEventKind::Down(MouseButton::Right) => {
                    cell_at(me.column, me.row).map(Msg::AltClick)
                }
                _ => None,
            },
            Event::Resize(..) => {
                queue!(self.out, terminal::Clear(ClearType::All))?;
                None
            }
            _ => None,
        };
        Ok(msg)
    }

    /// Redraw the whole screen.
    pub fn draw(&mut self, vis: &Visualizer) -> io::Result<()> {
        let grid = vis.terrain();
        let columns = grid.columns().max(0) as usize;

        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(
                "pathviz  algorithm: {}  speed: {}",
                vis.algorithm(),
                vis.interval()
            ))
        )?;

        for (i, tile) in vis.scene().into_iter().enumerate() {
            let x = (i % columns) as u16;
            let y = (i / columns) as u16;
            queue!(
                self.out,
                cursor::MoveTo(x * CELL_WIDTH, GRID_TOP + y),
                SetBackgroundColor(tile_color(tile)),
                Print("  ")
            )?;
        }

        let status_top = GRID_TOP + grid.rows().max(0) as u16;
        let message = match vis.speed_entry() {
            Some(entry) => format!("Speed (ms): {entry}_"),
            None => vis.message().to_string(),
        };
        queue!(
            self.out,
            ResetColor,
            cursor::MoveTo(0, status_top),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(message),
            ResetColor,
            cursor::MoveTo(0, status_top + 1),
            terminal::Clear(ClearType::CurrentLine),
            Print(HELP)
        )?;
        self.out.flush()
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        let _ = execute!(
            self.out,
            ResetColor,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.close();
    }
}
