// Copyright (c) 2026 rezky_nightky

use std::io::{Result, Write};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::cell::Cell;
use crate::frame::Frame;
use crate::palette::CellStyle;

/// Writes whole frames to an output stream without scrolling or clearing
/// the screen first.
pub struct Screen<W: Write> {
    out: W,
    cursor_hidden: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cursor_hidden: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        self.out.queue(cursor::Hide)?;
        self.out.flush()?;
        self.cursor_hidden = true;
        Ok(())
    }

    /// Shows the cursor and resets attributes. Always writes, even if the
    /// cursor was never hidden through this screen.
    pub fn show_cursor(&mut self) -> Result<()> {
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(ResetColor)?;
        self.out.queue(cursor::Show)?;
        self.out.flush()?;
        self.cursor_hidden = false;
        Ok(())
    }

    pub fn cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let mut cur = CellStyle::default();

        self.out.queue(cursor::MoveTo(0, 0))?;

        let rows = frame.height as usize;
        for (y, row) in frame.rows().enumerate() {
            if y > 0 {
                self.out.queue(cursor::MoveToNextLine(1))?;
            }
            if y + 1 < rows {
                for cell in row {
                    self.put(cell, &mut cur)?;
                }
                continue;
            }

            // Clear before the final glyph: clearing after it would erase the
            // bottom-right cell when the frame fills the screen.
            let (body, last) = row.split_at(row.len().saturating_sub(1));
            for cell in body {
                self.put(cell, &mut cur)?;
            }
            self.out
                .queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
            for cell in last {
                self.put(cell, &mut cur)?;
            }
        }

        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(ResetColor)?;
        self.out.flush()
    }

    fn put(&mut self, cell: &Cell, cur: &mut CellStyle) -> Result<()> {
        let want = cell.style.as_ref().map(|s| s.style()).unwrap_or_default();

        if want.fg != cur.fg {
            self.out
                .queue(SetForegroundColor(want.fg.unwrap_or(Color::Reset)))?;
        }
        if want.bg != cur.bg {
            self.out
                .queue(SetBackgroundColor(want.bg.unwrap_or(Color::Reset)))?;
        }
        if want.bold != cur.bold {
            self.out.queue(SetAttribute(if want.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }))?;
        }
        if want.reverse != cur.reverse {
            self.out.queue(SetAttribute(if want.reverse {
                Attribute::Reverse
            } else {
                Attribute::NoReverse
            }))?;
        }
        *cur = want;

        self.out.queue(Print(cell.ch))?;
        Ok(())
    }
}
