// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Write};

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use rand::{rngs::StdRng, SeedableRng};

use cascade::config::{color_enabled_stdout, Args, Winner};
use cascade::scene::{board_scene, Mark};
use cascade::{Animation, BoardGeometry, Cascade, CascadeError, Outcome, Scene};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

/// Marks and winning line of the demo game.
fn demo_board(winner: Winner) -> ([Mark; 9], Vec<usize>) {
    use Mark::{Cross as X, Empty as E, Naught as O};
    match winner {
        Winner::Cross => ([X, O, O, E, X, E, E, E, X], vec![0, 4, 8]),
        Winner::Naught => ([X, X, O, E, O, X, O, E, E], vec![2, 4, 6]),
        Winner::Tie => ([X, O, X, X, O, O, O, X, X], Vec::new()),
    }
}

fn print_static(scene: &Scene) -> std::io::Result<()> {
    let mut out = stdout().lock();
    for row in scene.rows() {
        writeln!(out, "{}", row)?;
    }
    out.flush()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    let cmd = Args::command()
        .styles(clap_styles())
        .help_template(help_template);
    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", env!("CASCADE_BUILD"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        return;
    }

    let config = match args.to_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let (w, h) = match crossterm::terminal::size() {
        Ok(size) => size,
        Err(e) => {
            log::warn!("cannot read terminal size: {}", e);
            (0, 0)
        }
    };

    let geom = BoardGeometry::default();
    let (marks, winning) = demo_board(args.winner);
    let scene = board_scene(&geom, &marks, &winning);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let cascade = Cascade::new(&scene, &geom, &winning, w, h, &config, &mut rng);
    let mut anim = Animation::new(cascade, config);

    match anim.run(stdout()) {
        Ok(Outcome::Skipped) | Err(CascadeError::RawMode(_)) => {
            if let Err(e) = print_static(&scene) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
        Ok(outcome) => log::debug!("{:?}", outcome),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
