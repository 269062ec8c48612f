// Copyright (c) 2026 rezky_nightky

//! Fixed-rate frame loop: setup, running, teardown.

use std::io::Write;
use std::thread;
use std::time::Instant;

use crate::cascade::Cascade;
use crate::config::CascadeConfig;
use crate::error::{CascadeError, Result};
use crate::input::{InputPoller, KeySource, CTRL_C};
use crate::terminal::Screen;

const CANCEL_KEYS: [char; 2] = [' ', CTRL_C];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Display below the minimum size; nothing was written.
    Skipped,
    /// A cancel key was pressed after `frames` frames.
    Cancelled { frames: u64 },
    /// Everything landed after `frames` frames.
    Settled { frames: u64 },
}

pub struct Animation {
    cascade: Cascade,
    config: CascadeConfig,
}

impl Animation {
    pub fn new(cascade: Cascade, config: CascadeConfig) -> Self {
        Self { cascade, config }
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    pub fn fits(&self) -> bool {
        self.cascade.width >= self.config.min_width && self.cascade.height >= self.config.min_height
    }

    /// Runs on the real terminal, reading keys from stdin in raw mode.
    ///
    /// Returns [`CascadeError::RawMode`] without touching the screen if raw
    /// mode is unavailable or stdout is not a terminal.
    pub fn run<W: Write>(&mut self, out: W) -> Result<Outcome> {
        if !self.fits() {
            return Ok(self.skip());
        }
        let mut keys = InputPoller::acquire().map_err(|e| {
            log::warn!("cascade disabled: {}", e);
            CascadeError::RawMode(e)
        })?;
        let result = self.run_with(out, &mut keys);
        let released = keys.release();
        let outcome = result?;
        released?;
        Ok(outcome)
    }

    /// Runs with an arbitrary key source. The cursor is hidden for the
    /// duration and shown again however the loop ends.
    pub fn run_with<W, K>(&mut self, out: W, keys: &mut K) -> Result<Outcome>
    where
        W: Write,
        K: KeySource + ?Sized,
    {
        if !self.fits() {
            return Ok(self.skip());
        }

        let mut screen = Screen::new(out);
        let result = screen
            .hide_cursor()
            .map_err(CascadeError::from)
            .and_then(|()| self.frames(&mut screen, keys));
        let shown = screen.show_cursor();

        let outcome = result?;
        shown?;
        log::info!("cascade finished: {:?}", outcome);
        Ok(outcome)
    }

    fn skip(&self) -> Outcome {
        log::warn!(
            "display {}x{} below minimum {}x{}, skipping cascade",
            self.cascade.width,
            self.cascade.height,
            self.config.min_width,
            self.config.min_height
        );
        Outcome::Skipped
    }

    fn frames<W, K>(&mut self, screen: &mut Screen<W>, keys: &mut K) -> Result<Outcome>
    where
        W: Write,
        K: KeySource + ?Sized,
    {
        let period = self.config.frame_period();
        let mut frames = 0u64;

        loop {
            let started = Instant::now();

            if keys.poll_key()?.is_some_and(|k| CANCEL_KEYS.contains(&k)) {
                return Ok(Outcome::Cancelled { frames });
            }

            let still_moving = self.cascade.advance_frame();
            self.cascade.tick();
            frames += 1;

            screen.draw(&self.cascade.compose())?;

            if !still_moving {
                thread::sleep(self.config.settle);
                return Ok(Outcome::Settled { frames });
            }

            thread::sleep(period.saturating_sub(started.elapsed()));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    use super::*;
    use crate::particle::{Particle, Spin};

    struct Script(VecDeque<Option<char>>);

    impl KeySource for Script {
        fn poll_key(&mut self) -> io::Result<Option<char>> {
            Ok(self.0.pop_front().flatten())
        }
    }

    struct Broken;

    impl KeySource for Broken {
        fn poll_key(&mut self) -> io::Result<Option<char>> {
            Err(io::Error::other("stdin closed"))
        }
    }

    fn fast_config() -> CascadeConfig {
        CascadeConfig {
            fps: 240.0,
            min_width: 2,
            min_height: 4,
            settle: Duration::ZERO,
            ..CascadeConfig::default()
        }
    }

    fn animation(particles: Vec<Particle>) -> Animation {
        Animation::new(Cascade::from_particles(particles, 2, 5, 0.15), fast_config())
    }

    #[test]
    fn too_small_display_writes_nothing() {
        let mut anim = Animation::new(
            Cascade::from_particles(Vec::new(), 1, 5, 0.15),
            fast_config(),
        );
        let mut out = Vec::new();
        let outcome = anim.run_with(&mut out, &mut Script(VecDeque::new())).unwrap();
        assert_eq!(outcome, Outcome::Skipped);
        assert!(out.is_empty());
    }

    #[test]
    fn settles_after_last_landing() {
        let mut anim = animation(vec![Particle::falling('x', 0, 0.0, 1.0, Spin::Left)]);
        let mut out = Vec::new();
        let outcome = anim.run_with(&mut out, &mut Script(VecDeque::new())).unwrap();

        // rows 1, 2, 3 then landing on row 4
        assert_eq!(outcome, Outcome::Settled { frames: 4 });
        assert_eq!(anim.cascade().frame_count(), 4);
        assert_eq!(anim.cascade().compose().to_text(), "  \n  \n  \n  \nx ");

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("\x1b[1;1H").count(), 4);
        assert!(out.starts_with("\x1b[?25l"));
        assert!(out.ends_with("\x1b[?25h"));
    }

    #[test]
    fn space_cancels_before_advancing() {
        let mut anim = animation(vec![Particle::falling('x', 0, 0.0, 0.1, Spin::Left)]);
        let keys = VecDeque::from([None, Some('q'), Some(' ')]);
        let mut out = Vec::new();
        let outcome = anim.run_with(&mut out, &mut Script(keys)).unwrap();

        assert_eq!(outcome, Outcome::Cancelled { frames: 2 });
        let p = &anim.cascade().particles()[0];
        assert!((p.y - 0.2).abs() < 1e-6);
        assert!(String::from_utf8(out).unwrap().ends_with("\x1b[?25h"));
    }

    #[test]
    fn ctrl_c_cancels_too() {
        let mut anim = animation(vec![Particle::falling('x', 0, 0.0, 0.1, Spin::Left)]);
        let keys = VecDeque::from([Some(CTRL_C)]);
        let outcome = anim.run_with(Vec::new(), &mut Script(keys)).unwrap();
        assert_eq!(outcome, Outcome::Cancelled { frames: 0 });
    }

    #[test]
    fn input_failure_still_restores_cursor() {
        let mut anim = animation(vec![Particle::falling('x', 0, 0.0, 0.1, Spin::Left)]);
        let mut out = Vec::new();
        let err = anim.run_with(&mut out, &mut Broken).unwrap_err();
        assert!(matches!(err, CascadeError::Io(_)));
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("\x1b[?25l"));
        assert!(out.ends_with("\x1b[?25h"));
    }

    #[test]
    fn frozen_only_scene_settles_on_first_frame() {
        let mut anim = animation(vec![Particle::frozen('#', 1, 1.0)]);
        let outcome = anim
            .run_with(Vec::new(), &mut Script(VecDeque::new()))
            .unwrap();
        assert_eq!(outcome, Outcome::Settled { frames: 1 });
        assert_eq!(anim.cascade().compose().to_text(), "  \n #\n  \n  \n  ");
    }
}
