// Copyright (c) 2026 rezky_nightky

use std::ops::Range;

use rand::Rng;

use crate::frozen::FrozenMask;
use crate::palette::StyleTag;
use crate::scene::Scene;

/// Lateral bias applied when a falling glyph hits the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spin {
    Left,
    None,
    Right,
}

impl Spin {
    pub fn offset(self) -> i32 {
        match self {
            Spin::Left => -1,
            Spin::None => 0,
            Spin::Right => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub ch: char,
    pub x: i32,
    /// Fractional row.
    pub y: f64,
    /// Rows per frame; zero once landed.
    pub velocity: f64,
    pub style: Option<StyleTag>,
    frozen: bool,
    pub spin: Spin,
}

impl Particle {
    pub fn falling(ch: char, x: i32, y: f64, velocity: f64, spin: Spin) -> Self {
        Self {
            ch,
            x,
            y,
            velocity,
            style: None,
            frozen: false,
            spin,
        }
    }

    pub fn frozen(ch: char, x: i32, y: f64) -> Self {
        Self {
            ch,
            x,
            y,
            velocity: 0.0,
            style: None,
            frozen: true,
            spin: Spin::None,
        }
    }

    pub fn with_style(mut self, style: Option<StyleTag>) -> Self {
        self.style = style;
        self
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_moving(&self) -> bool {
        !self.frozen && self.velocity != 0.0
    }
}

/// Turns every visible scene glyph into a particle, in scene scan order.
///
/// Glyphs inside `mask` are frozen. The rest get a velocity drawn uniformly
/// from `velocity` and a random left/right spin.
pub fn spawn_particles<R>(
    scene: &Scene,
    mask: &FrozenMask,
    velocity: Range<f64>,
    rng: &mut R,
) -> Vec<Particle>
where
    R: Rng,
{
    scene
        .glyphs()
        .map(|g| {
            let (x, y) = (g.x as i32, g.y as f64);
            let p = if mask.contains(g.x, g.y) {
                Particle::frozen(g.ch, x, y)
            } else {
                let v = rng.random_range(velocity.clone());
                let spin = if rng.random_bool(0.5) {
                    Spin::Left
                } else {
                    Spin::Right
                };
                Particle::falling(g.ch, x, y, v, spin)
            };
            p.with_style(g.style.cloned())
        })
        .collect()
}
