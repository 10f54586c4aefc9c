use std::{path::PathBuf, time::Duration};

use clap::{value_parser, Arg, ArgAction, ArgMatches};
use log::LevelFilter;

pub mod check;
pub mod core;
pub mod emitter;
pub mod scene;

pub use crate::core::Color;
pub use crate::core::Command;
pub use emitter::{EmitError, EmitSummary, Emitter, StopReason};
pub use scene::{MovingCarScene, RectangleScene, Scene, SceneKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write the scene's command stream to stdout.
    Emit,
    /// Validate a command stream read from stdin.
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mode: Mode,
    pub scene: SceneKind,
    pub frames: Option<u64>,
    pub interval: Duration,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Emit,
            scene: SceneKind::default(),
            frames: None,
            interval: Duration::ZERO,
            log_level: LevelFilter::Warn,
            log_file: None,
        }
    }
}

pub fn create_clap_command() -> clap::Command {
    clap::Command::new("draw_stream")
        .about("Writes drawing commands to stdout for a renderer to consume, e.g. `draw_stream | renderer`")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("scene")
                .short('s')
                .long("scene")
                .value_name("SCENE")
                .help("Scene to stream")
                .default_value("rectangle")
                .value_parser(SceneKind::NAMES),
        )
        .arg(
            Arg::new("frames")
                .short('n')
                .long("frames")
                .value_name("N")
                .help("Stop after N frames instead of streaming until the reader goes away")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval-ms")
                .value_name("MS")
                .help("Minimum milliseconds between frames, 0 lets the reader set the pace")
                .default_value("0")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more to stderr (repeat for more detail)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Append logs to FILE instead of stderr")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Read a command stream from stdin and validate it instead of emitting")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["scene", "frames", "interval"]),
        )
}

pub fn handle_clap_matches(matches: &ArgMatches) -> Settings {
    let defaults = Settings::default();

    let mode = if matches.get_flag("check") {
        Mode::Check
    } else {
        Mode::Emit
    };
    let scene = matches
        .get_one::<String>("scene")
        .and_then(|name| name.parse().ok())
        .unwrap_or(defaults.scene);
    let interval = matches
        .get_one::<u64>("interval")
        .map(|ms| Duration::from_millis(*ms))
        .unwrap_or(defaults.interval);
    let log_level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Settings {
        mode,
        scene,
        frames: matches.get_one::<u64>("frames").copied(),
        interval,
        log_level,
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
    }
}
