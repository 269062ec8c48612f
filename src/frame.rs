// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;
use crate::particle::Particle;
use crate::pulse::PulseColorizer;

/// Fixed-size glyph and style grid, rebuilt from scratch every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::blank(); len],
        }
    }

    /// Flattens `particles` into a new frame.
    ///
    /// Writes happen in slice order, so when two particles share a cell the
    /// later one wins. Particles outside the frame are skipped.
    pub fn compose(
        width: u16,
        height: u16,
        particles: &[Particle],
        pulse: &PulseColorizer,
        frame_count: u64,
    ) -> Self {
        let mut frame = Self::new(width, height);
        for p in particles {
            let row = p.y.floor();
            if row < 0.0 || row >= height as f64 || p.x < 0 || p.x >= width as i32 {
                continue;
            }
            frame.set(
                p.x as u16,
                row as u16,
                Cell {
                    ch: p.ch,
                    style: pulse.resolve(frame_count, p),
                },
            );
        }
        frame
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Plain glyphs, one `\n` between rows and none after the last.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.ch));
        }
        out
    }
}
