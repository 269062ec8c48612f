// Copyright (c) 2026 rezky_nightky

use crate::palette::StyleTag;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Option<StyleTag>,
}

impl Cell {
    pub const fn blank() -> Self {
        Self {
            ch: ' ',
            style: None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}
