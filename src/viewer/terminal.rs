//! Terminal I/O layer: raw mode guard and frame drawing.

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    style::{self, Stylize},
    terminal,
};
use std::io::{self, Write, stdout};

use crate::settings::ClockTextPosition;

// ---------------------------------------------------------------------------
// RawGuard — Drop restores raw mode / alternate screen / cursor
// ---------------------------------------------------------------------------

pub(super) struct RawGuard {
    cleaned: bool,
}

impl RawGuard {
    pub(super) fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        stdout().execute(terminal::EnterAlternateScreen)?;
        stdout().execute(cursor::Hide)?;
        Ok(Self { cleaned: false })
    }

    pub(super) fn cleanup(&mut self) {
        if self.cleaned {
            return;
        }
        self.cleaned = true;
        let mut out = stdout();
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

pub(super) fn check_tty() -> anyhow::Result<()> {
    use std::io::IsTerminal;
    // Only stdout matters. crossterm's `use-dev-tty` reads keyboard from
    // /dev/tty (Unix) or Console API (Windows), so stdin being a pipe is fine.
    if !io::stdout().is_terminal() {
        anyhow::bail!(
            "the pizza-clock viewer requires an interactive terminal.\n\
             \n\
             To generate a manifest or share link instead, use:\n\
             pizza-clock manifest <dir> / pizza-clock link"
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Frame drawing
// ---------------------------------------------------------------------------

/// One fully laid-out frame. All strings are pre-rendered; this layer
/// only positions and paints them.
pub(super) struct Frame<'a> {
    pub readout: &'a [String],
    pub position: ClockTextPosition,
    /// Current background summary, drawn in the top-left corner.
    pub background_line: &'a str,
    /// Horizontally mirrored background: paint the summary right-aligned.
    pub flip: bool,
    /// Seconds indicator rows under the readout (empty slice disables).
    pub seconds_rows: &'a [String],
    pub status: &'a str,
}

pub(super) fn draw(frame: &Frame) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut out = stdout();
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    // Background summary: mirrored backgrounds hug the opposite corner
    let bg_width = frame.background_line.chars().count() as u16;
    let bg_col = if frame.flip {
        cols.saturating_sub(bg_width)
    } else {
        0
    };
    out.queue(cursor::MoveTo(bg_col, 0))?;
    write!(out, "{}", frame.background_line.dark_grey())?;

    // Readout block (+ seconds indicator directly underneath)
    let block_width = frame
        .readout
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0) as u16;
    let block_height = (frame.readout.len() + frame.seconds_rows.len()) as u16;

    let (start_col, start_row) = match frame.position {
        ClockTextPosition::Center => (
            cols.saturating_sub(block_width) / 2,
            rows.saturating_sub(block_height) / 2,
        ),
        ClockTextPosition::CircularBottomRight => (
            cols.saturating_sub(block_width + 2),
            // Leave the status bar row and one row of margin
            rows.saturating_sub(block_height + 2),
        ),
    };

    for (i, line) in frame.readout.iter().enumerate() {
        out.queue(cursor::MoveTo(start_col, start_row + i as u16))?;
        write!(out, "{}", line.as_str().white().bold())?;
    }
    for (i, line) in frame.seconds_rows.iter().enumerate() {
        let row = start_row + (frame.readout.len() + i) as u16;
        out.queue(cursor::MoveTo(start_col, row))?;
        write!(out, "{}", line.as_str().dark_yellow())?;
    }

    // Status bar on the last row
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    let padded = format!("{:<width$}", frame.status, width = cols as usize);
    write!(out, "{}", padded.on_dark_grey().white())?;
    out.queue(style::ResetColor)?;
    out.flush()
}
