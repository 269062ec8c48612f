// Copyright (c) 2026 rezky_nightky

//! Screen areas that stay put while everything else falls.

/// Layout constants of the rendered 3x3 board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardGeometry {
    pub cell_width: usize,
    pub cell_height: usize,
    pub row_label_width: usize,
    pub header_height: usize,
    pub border: usize,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            cell_width: 17,
            cell_height: 7,
            row_label_width: 3,
            header_height: 2,
            border: 1,
        }
    }
}

/// Half-open screen rectangle `[x1, x2) x [y1, y2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl Rect {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x1..self.x2).contains(&x) && (self.y1..self.y2).contains(&y)
    }
}

impl BoardGeometry {
    /// Screen rectangle of the interior of board cell `index` (0..=8,
    /// row-major).
    pub fn cell_bounds(&self, index: usize) -> Rect {
        let row = index / 3;
        let col = index % 3;
        let x1 = self.row_label_width + self.border + col * (self.cell_width + self.border);
        let y1 = self.header_height + row * (self.cell_height + self.border);
        Rect {
            x1,
            y1,
            x2: x1 + self.cell_width,
            y2: y1 + self.cell_height,
        }
    }
}

/// Frozen-area membership precomputed over a `width x height` region.
/// Coordinates outside the region are never frozen.
#[derive(Clone, Debug)]
pub struct FrozenMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl FrozenMask {
    pub fn new<I>(geom: &BoardGeometry, cells: I, width: usize, height: usize) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut bits = vec![false; width * height];
        for idx in cells {
            let r = geom.cell_bounds(idx);
            for y in r.y1..r.y2.min(height) {
                for x in r.x1..r.x2.min(width) {
                    bits[y * width + x] = true;
                }
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// A mask with nothing frozen.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            bits: Vec::new(),
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[y * self.width + x]
    }
}
