// Copyright (c) 2026 rezky_nightky

//! Per-frame gravity step with landing and lateral slides.

use crate::particle::Particle;

/// Per-column accumulation height: the lowest row still free to fall into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Floor {
    rows: Vec<u16>,
    height: u16,
}

impl Floor {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            rows: vec![height; width as usize],
            height,
        }
    }

    pub fn rows(&self) -> &[u16] {
        &self.rows
    }

    fn slot(&self, col: i32) -> Option<usize> {
        usize::try_from(col).ok().filter(|&c| c < self.rows.len())
    }

    pub fn contains(&self, col: i32) -> bool {
        self.slot(col).is_some()
    }

    /// Floor row of `col`. Columns outside the display read as the full
    /// display height.
    pub fn at(&self, col: i32) -> i32 {
        self.slot(col)
            .map(|c| self.rows[c])
            .unwrap_or(self.height) as i32
    }

    fn raise(&mut self, col: i32) {
        if let Some(c) = self.slot(col) {
            self.rows[c] = self.rows[c].saturating_sub(1);
        }
    }
}

/// Advances every falling particle by one frame.
///
/// Returns true if any particle is still in motion afterwards. Frozen and
/// landed particles are skipped and never count as moving.
pub fn advance_frame(particles: &mut [Particle], floor: &mut Floor) -> bool {
    let mut still_moving = false;

    for p in particles.iter_mut() {
        if !p.is_moving() {
            continue;
        }

        let floor_y = floor.at(p.x);
        let new_y = p.y + p.velocity;

        if new_y < (floor_y - 1) as f64 {
            p.y = new_y;
            still_moving = true;
            continue;
        }

        let side_x = p.x + p.spin.offset();
        if floor.contains(side_x) && floor.at(side_x) > p.y.floor() as i32 + 1 {
            p.x = side_x;
            p.y = new_y;
            still_moving = true;
            continue;
        }

        p.y = (floor_y - 1) as f64;
        floor.raise(p.x);
        p.velocity = 0.0;
    }

    still_moving
}
