use crate::console::Console;
use crate::palette::Palette;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

const UPPER_HALF: char = '▀';

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
        }
    }
}

impl Terminal {
    /// Initialize the terminal for drawing
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        let buffer = vec![vec![Cell::default(); width as usize]; height as usize];

        Ok(Self {
            width,
            height,
            buffer,
            alternate_screen,
        })
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Console pixel size that fills the terminal with half blocks
    pub fn pixel_size(&self) -> (u16, u16) {
        (self.width, self.height.saturating_mul(2))
    }

    /// Adopt new dimensions after the terminal was resized
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character at position with optional colors
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bg: Option<Color>) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bg };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, Some(Color::Black));
        }
    }

    /// Fill the buffer from the console, two pixel rows per terminal row
    pub fn draw_console(&mut self, console: &Console, palette: &Palette) {
        let (w, h) = console.size();
        for cy in 0..self.height {
            let top = cy * 2;
            if top >= h {
                break;
            }
            let bottom = top + 1;
            for x in 0..self.width.min(w) {
                let (bank, index) = console.composite(x, top);
                let fg = palette.color(bank, index);
                let bg = if bottom < h {
                    let (bank, index) = console.composite(x, bottom);
                    palette.color(bank, index)
                } else {
                    Color::Black
                };
                self.set(x as i32, cy as i32, UPPER_HALF, Some(fg), Some(bg));
            }
        }
    }

    /// Render the entire buffer to screen
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout().lock();
        let mut fg = None;
        let mut bg = None;

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.fg != fg {
                    match cell.fg {
                        Some(color) => queue!(out, SetForegroundColor(color))?,
                        None => queue!(out, SetForegroundColor(Color::Reset))?,
                    }
                    fg = cell.fg;
                }
                if cell.bg != bg {
                    match cell.bg {
                        Some(color) => queue!(out, SetBackgroundColor(color))?,
                        None => queue!(out, SetBackgroundColor(Color::Reset))?,
                    }
                    bg = cell.bg;
                }
                queue!(out, Print(cell.ch))?;
            }
        }

        queue!(out, ResetColor)?;
        out.flush()?;
        Ok(())
    }

    /// Check for keypress (non-blocking), returns (code, modifiers, kind).
    /// Releases are dropped; auto-repeat comes back as `KeyEventKind::Repeat`
    /// on terminals that report it.
    pub fn check_key(&self) -> io::Result<Option<(KeyCode, KeyModifiers, KeyEventKind)>> {
        if poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Release {
                    return Ok(Some((key_event.code, key_event.modifiers, key_event.kind)));
                }
            }
        }
        Ok(None)
    }

    /// Sleep for specified duration
    pub fn sleep(&self, seconds: f32) {
        std::thread::sleep(Duration::from_secs_f32(seconds.max(0.0)));
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

/// Print the console with 24-bit ANSI half blocks (for print mode)
pub fn print_console<W: Write>(out: &mut W, console: &Console, palette: &Palette) -> io::Result<()> {
    let (w, h) = console.size();
    for top in (0..h).step_by(2) {
        let bottom = top + 1;
        for x in 0..w {
            let (bank, index) = console.composite(x, top);
            let (r, g, b) = palette.rgb(bank, index);
            write!(out, "\x1b[38;2;{};{};{}m", r, g, b)?;
            if bottom < h {
                let (bank, index) = console.composite(x, bottom);
                let (r, g, b) = palette.rgb(bank, index);
                write!(out, "\x1b[48;2;{};{};{}m", r, g, b)?;
            } else {
                write!(out, "\x1b[49m")?;
            }
            write!(out, "{}", UPPER_HALF)?;
        }
        writeln!(out, "\x1b[0m")?;
    }
    Ok(())
}
