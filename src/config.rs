// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;
use std::ops::Range;
use std::time::Duration;

use clap::Parser;

use crate::error::{CascadeError, Result};

/// Runtime knobs of one cascade run.
#[derive(Clone, Debug, PartialEq)]
pub struct CascadeConfig {
    pub fps: f64,
    pub min_width: u16,
    pub min_height: u16,
    /// Radians of pulse phase per frame.
    pub pulse_speed: f64,
    /// How long the final frame stays up once everything has landed.
    pub settle: Duration,
    /// Initial fall speed range, rows per frame.
    pub velocity: Range<f64>,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            fps: 25.0,
            min_width: 60,
            min_height: 30,
            pulse_speed: 0.15,
            settle: Duration::from_secs(1),
            velocity: 0.08..0.4,
        }
    }
}

fn require_range<T>(name: &str, v: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if v < min || v > max {
        return Err(CascadeError::InvalidConfig(format!(
            "{} {} (min {} max {})",
            name, v, min, max
        )));
    }
    Ok(())
}

impl CascadeConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.fps.is_finite() || !self.pulse_speed.is_finite() {
            return Err(CascadeError::InvalidConfig(
                "fps and pulse speed must be finite numbers".to_string(),
            ));
        }
        require_range("fps", self.fps, 1.0, 240.0)?;
        require_range("pulse speed", self.pulse_speed, 0.001, 10.0)?;
        let (start, end) = (self.velocity.start, self.velocity.end);
        if !start.is_finite() || !end.is_finite() || start <= 0.0 || start >= end {
            return Err(CascadeError::InvalidConfig(format!(
                "velocity range {}..{} (need 0 < low < high)",
                start, end
            )));
        }
        Ok(())
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }
}

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    #[value(name = "x")]
    Cross,
    #[value(name = "o")]
    Naught,
    #[value(name = "none")]
    Tie,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "cascade", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 25.0,
        help_heading = "ANIMATION",
        help = "Target frame rate (min 1 max 240)"
    )]
    pub fps: f64,

    #[arg(
        short = 's',
        long = "seed",
        help_heading = "ANIMATION",
        help = "Seed for fall speeds and slide directions (random if omitted)"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "settle-ms",
        default_value_t = 1000,
        help_heading = "ANIMATION",
        help = "How long to hold the final frame, in milliseconds"
    )]
    pub settle_ms: u64,

    #[arg(
        short = 'p',
        long = "pulse-speed",
        default_value_t = 0.15,
        help_heading = "ANIMATION",
        help = "Pulse phase advance per frame, in radians (min 0.001 max 10)"
    )]
    pub pulse_speed: f64,

    #[arg(
        short = 'w',
        long = "winner",
        default_value_t = Winner::Cross,
        value_enum,
        help_heading = "BOARD",
        help = "Which demo board to cascade (x, o, none)"
    )]
    pub winner: Winner,

    #[arg(
        long = "min-width",
        default_value_t = 60,
        help_heading = "DISPLAY",
        help = "Skip the animation on terminals narrower than this"
    )]
    pub min_width: u16,

    #[arg(
        long = "min-height",
        default_value_t = 30,
        help_heading = "DISPLAY",
        help = "Skip the animation on terminals shorter than this"
    )]
    pub min_height: u16,

    #[arg(long = "info", help_heading = "HELP", help = "Print build information")]
    pub info: bool,

    #[arg(short = 'V', long = "version", help_heading = "HELP", help = "Print version")]
    pub version: bool,
}

impl Args {
    pub fn to_config(&self) -> Result<CascadeConfig> {
        let config = CascadeConfig {
            fps: self.fps,
            min_width: self.min_width,
            min_height: self.min_height,
            pulse_speed: self.pulse_speed,
            settle: Duration::from_millis(self.settle_ms),
            ..CascadeConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}
