// Copyright (c) 2026 rezky_nightky

use rand::Rng;

use crate::config::CascadeConfig;
use crate::frame::Frame;
use crate::frozen::{BoardGeometry, FrozenMask};
use crate::particle::{spawn_particles, Particle};
use crate::physics::{advance_frame, Floor};
use crate::pulse::PulseColorizer;
use crate::scene::Scene;

/// Particle collection, floor and frame counter for one display size.
#[derive(Clone, Debug)]
pub struct Cascade {
    pub width: u16,
    pub height: u16,
    particles: Vec<Particle>,
    floor: Floor,
    frame_count: u64,
    pulse: PulseColorizer,
}

impl Cascade {
    /// Builds the initial particles from `scene`. `frozen_cells` are board
    /// cell indices laid out by `geom`.
    pub fn new<R: Rng>(
        scene: &Scene,
        geom: &BoardGeometry,
        frozen_cells: &[usize],
        width: u16,
        height: u16,
        config: &CascadeConfig,
        rng: &mut R,
    ) -> Self {
        let mask = FrozenMask::new(
            geom,
            frozen_cells.iter().copied(),
            scene.width(),
            scene.height(),
        );
        let particles = spawn_particles(scene, &mask, config.velocity.clone(), rng);
        log::debug!(
            "cascade: {} particles ({} frozen) on {}x{}",
            particles.len(),
            particles.iter().filter(|p| p.is_frozen()).count(),
            width,
            height
        );
        Self::from_particles(particles, width, height, config.pulse_speed)
    }

    pub fn from_particles(
        particles: Vec<Particle>,
        width: u16,
        height: u16,
        pulse_speed: f64,
    ) -> Self {
        Self {
            width,
            height,
            particles,
            floor: Floor::new(width, height),
            frame_count: 0,
            pulse: PulseColorizer::new(pulse_speed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// One physics step. True while anything is still falling.
    pub fn advance_frame(&mut self) -> bool {
        advance_frame(&mut self.particles, &mut self.floor)
    }

    pub fn tick(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
    }

    pub fn compose(&self) -> Frame {
        Frame::compose(
            self.width,
            self.height,
            &self.particles,
            &self.pulse,
            self.frame_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::scene::{board_scene, Mark};

    #[test]
    fn finished_board_settles_with_winning_cells_in_place() {
        let geom = BoardGeometry::default();
        let mut marks = [Mark::Empty; 9];
        for i in [0, 4, 8] {
            marks[i] = Mark::Cross;
        }
        marks[1] = Mark::Naught;
        marks[2] = Mark::Naught;
        let scene = board_scene(&geom, &marks, &[0, 4, 8]);
        let config = CascadeConfig::default();
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let mut cascade = Cascade::new(&scene, &geom, &[0, 4, 8], 80, 40, &config, &mut rng);

        let frozen: Vec<Particle> = cascade
            .particles()
            .iter()
            .filter(|p| p.is_frozen())
            .cloned()
            .collect();
        assert!(!frozen.is_empty());

        let mut frames = 0;
        while cascade.advance_frame() {
            cascade.tick();
            frames += 1;
            assert!(frames < 10_000, "never settled");
        }

        let after: Vec<Particle> = cascade
            .particles()
            .iter()
            .filter(|p| p.is_frozen())
            .cloned()
            .collect();
        assert_eq!(frozen, after);
        assert!(cascade
            .particles()
            .iter()
            .all(|p| p.is_frozen() || p.velocity == 0.0));

        let text = cascade.compose().to_text();
        assert_eq!(text.lines().count(), 40);
        assert!(text.lines().all(|l| l.chars().count() == 80));
    }

    #[test]
    fn frame_counter_only_moves_on_tick() {
        let mut c = Cascade::from_particles(Vec::new(), 4, 4, 0.15);
        assert!(!c.advance_frame());
        assert_eq!(c.frame_count(), 0);
        c.tick();
        c.tick();
        assert_eq!(c.frame_count(), 2);
    }
}
