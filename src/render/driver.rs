//! Crossterm terminal backend.
//!
//! The `Driver` owns a buffered stdout writer. [`Driver::enter`] switches the
//! terminal into the interactive mode the layout needs (alternate screen, raw
//! input, mouse reporting, hidden cursor); [`Driver::present`] writes the
//! cells that changed since the previous frame.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use super::compositor::{CellUpdate, Compositor};
use super::strip::CellStyle;

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// Creating a driver does not touch the terminal; call [`Driver::enter`]
/// explicitly and [`Driver::leave`] before exiting.
pub struct Driver {
    writer: BufWriter<Stdout>,
    active: bool,
}

impl Driver {
    pub fn new() -> Self {
        Self {
            writer: BufWriter::new(io::stdout()),
            active: false,
        }
    }

    /// Alternate screen, raw mode, mouse capture, hidden cursor.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.active = true;
        Ok(())
    }

    /// Undo everything [`Driver::enter`] did. Safe to call twice.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.writer,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.writer, terminal::SetTitle(title))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Write the difference between `previous` and `current` and flush.
    pub fn present(&mut self, current: &Compositor, previous: &Compositor) -> io::Result<()> {
        let updates = current.diff(previous);
        if updates.is_empty() {
            return Ok(());
        }
        self.apply_updates(&updates)?;
        self.writer.flush()
    }

    /// Queue a batch of cell updates; call `flush` afterwards.
    pub fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            self.queue_style(&update.cell.style)?;
            queue!(
                self.writer,
                Print(update.cell.ch),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Terminal size as (columns, rows).
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn queue_style(&mut self, style: &CellStyle) -> io::Result<()> {
        if let Some(color) = style.fg.as_deref().and_then(parse_color) {
            queue!(self.writer, SetForegroundColor(color))?;
        }
        if let Some(color) = style.bg.as_deref().and_then(parse_color) {
            queue!(self.writer, SetBackgroundColor(color))?;
        }
        let attributes = [
            (style.bold, Attribute::Bold),
            (style.dim, Attribute::Dim),
            (style.italic, Attribute::Italic),
            (style.underline, Attribute::Underlined),
            (style.strikethrough, Attribute::CrossedOut),
            (style.reverse, Attribute::Reverse),
        ];
        for (on, attribute) in attributes {
            if on {
                queue!(self.writer, SetAttribute(attribute))?;
            }
        }
        Ok(())
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

// ---------------------------------------------------------------------------
// Color parsing
// ---------------------------------------------------------------------------

/// Parse a color string into a crossterm `Color`.
///
/// Accepts `#rrggbb`, `#rgb`, and the sixteen terminal color names (with
/// `dark_` variants, either spelling of grey). Matching is case-insensitive.
/// Returns `None` for anything else, which leaves the terminal default.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    let name = s.to_ascii_lowercase().replace('_', "");
    let color = match name.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "darkred" => Color::DarkRed,
        "darkgreen" => Color::DarkGreen,
        "darkyellow" => Color::DarkYellow,
        "darkblue" => Color::DarkBlue,
        "darkmagenta" => Color::DarkMagenta,
        "darkcyan" => Color::DarkCyan,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        _ => return None,
    };
    Some(color)
}

/// `rrggbb` or `rgb` (each digit doubled).
fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    let (r, g, b) = match hex.len() {
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        3 => {
            let r = channel(&hex[0..1])?;
            let g = channel(&hex[1..2])?;
            let b = channel(&hex[2..3])?;
            (r * 17, g * 17, b * 17)
        }
        _ => return None,
    };
    Some(Color::Rgb { r, g, b })
}

// ===========================================================================
// Tests
// ===========================================================================
