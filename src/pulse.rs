// Copyright (c) 2026 rezky_nightky

use crate::palette::StyleTag;
use crate::particle::Particle;

pub const RAMP_LEN: usize = 7;

const RED_RAMP: [&str; RAMP_LEN] = [
    "grey30",
    "grey42",
    "grey54",
    "grey66",
    "red",
    "bright_red",
    "bold bright_red",
];

const BLUE_RAMP: [&str; RAMP_LEN] = [
    "grey30",
    "grey42",
    "grey54",
    "grey66",
    "blue",
    "bright_blue",
    "bold bright_blue",
];

/// Time-varying color for frozen glyphs, driven by the frame counter.
#[derive(Clone, Debug)]
pub struct PulseColorizer {
    speed: f64,
    red: [StyleTag; RAMP_LEN],
    blue: [StyleTag; RAMP_LEN],
}

impl PulseColorizer {
    /// `speed` is radians of phase per frame.
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            red: RED_RAMP.map(StyleTag::new),
            blue: BLUE_RAMP.map(StyleTag::new),
        }
    }

    pub fn red_ramp(&self) -> &[StyleTag] {
        &self.red
    }

    pub fn blue_ramp(&self) -> &[StyleTag] {
        &self.blue
    }

    /// Ramp position for `frame`, in `0..RAMP_LEN`.
    pub fn index(&self, frame: u64) -> usize {
        let phase = ((frame as f64 * self.speed).sin() + 1.0) / 2.0;
        ((phase * (RAMP_LEN - 1) as f64) as usize).min(RAMP_LEN - 1)
    }

    /// Pulsed style for a tag: red or blue ramp if the tag mentions either,
    /// the tag itself otherwise.
    pub fn pulse(&self, frame: u64, style: Option<&StyleTag>) -> Option<StyleTag> {
        let tag = style?;
        if tag.mentions("red") {
            Some(self.red[self.index(frame)].clone())
        } else if tag.mentions("blue") {
            Some(self.blue[self.index(frame)].clone())
        } else {
            Some(tag.clone())
        }
    }

    /// Style a particle renders with: pulsed if frozen, static otherwise.
    pub fn resolve(&self, frame: u64, p: &Particle) -> Option<StyleTag> {
        if p.is_frozen() {
            self.pulse(frame, p.style.as_ref())
        } else {
            p.style.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::*;

    #[test]
    fn phase_zero_sits_mid_ramp() {
        let pulse = PulseColorizer::new(0.15);
        assert_eq!(pulse.index(0), 3);
        let red = StyleTag::new("bold red reverse");
        assert_eq!(pulse.pulse(0, Some(&red)).unwrap().as_str(), "grey66");
    }

    #[test]
    fn output_always_comes_from_the_ramp() {
        let pulse = PulseColorizer::new(0.15);
        let red = StyleTag::new("bold red");
        let blue = StyleTag::new("BLUE");
        for frame in 0..500 {
            let r = pulse.pulse(frame, Some(&red)).unwrap();
            assert!(pulse.red_ramp().contains(&r));
            let b = pulse.pulse(frame, Some(&blue)).unwrap();
            assert!(pulse.blue_ramp().contains(&b));
        }
    }

    #[test]
    fn sweeps_ramp_below_the_peak() {
        // The brightest entry needs sin == 1 exactly, which integer frames miss.
        let pulse = PulseColorizer::new(0.15);
        let seen: std::collections::BTreeSet<usize> = (0..100).map(|f| pulse.index(f)).collect();
        assert_eq!(seen, (0..RAMP_LEN - 1).collect());
    }

    #[test]
    fn periodic_in_frame_counter() {
        // An odd period keeps every sample off the sine's exact extrema and zeros.
        let period = 25u64;
        let pulse = PulseColorizer::new(TAU / period as f64);
        for frame in 1..period {
            assert_eq!(pulse.index(frame), pulse.index(frame + period), "frame {frame}");
            assert_eq!(pulse.index(frame), pulse.index(frame + 3 * period), "frame {frame}");
        }
    }

    #[test]
    fn other_tags_pass_through() {
        let pulse = PulseColorizer::new(0.15);
        let yellow = StyleTag::new("bold yellow");
        assert_eq!(pulse.pulse(17, Some(&yellow)), Some(yellow));
        assert_eq!(pulse.pulse(17, None), None);
    }

    #[test]
    fn only_frozen_particles_pulse() {
        let pulse = PulseColorizer::new(0.15);
        let red = Some(StyleTag::new("bold red"));
        let frozen = Particle::frozen('#', 0, 0.0).with_style(red.clone());
        let falling =
            Particle::falling('#', 0, 0.0, 0.1, crate::particle::Spin::Left).with_style(red.clone());
        assert_eq!(pulse.resolve(0, &frozen).unwrap().as_str(), "grey66");
        assert_eq!(pulse.resolve(0, &falling), red);
    }
}
