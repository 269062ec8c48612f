// Copyright (c) 2026 rezky_nightky

//! Falling-glyph cascade for a finished terminal game board.
//!
//! Every visible glyph of a rendered scene becomes a [`Particle`]. Glyphs in
//! the winning cells stay frozen and pulse; the rest fall, pile up on a
//! per-column floor and slide sideways when they hit it.

pub mod animation;
pub mod cascade;
pub mod cell;
pub mod config;
pub mod error;
pub mod frame;
pub mod frozen;
pub mod input;
pub mod palette;
pub mod particle;
pub mod physics;
pub mod pulse;
pub mod scene;
pub mod terminal;

pub use animation::{Animation, Outcome};
pub use cascade::Cascade;
pub use config::CascadeConfig;
pub use error::CascadeError;
pub use frozen::{BoardGeometry, FrozenMask};
pub use particle::{Particle, Spin};
pub use scene::Scene;
