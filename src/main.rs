use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::process;

use draw_stream::{
    check::check_stream, create_clap_command, handle_clap_matches, Emitter, Mode, Settings,
};
use log::{error, info};
use simplelog::{Config, WriteLogger};

fn main() -> io::Result<()> {
    let matches = create_clap_command().get_matches();
    let settings = handle_clap_matches(&matches);
    init_logging(&settings)?;

    match settings.mode {
        Mode::Emit => run_emit(&settings),
        Mode::Check => run_check(&settings),
    }
}

// Logs never go to stdout, that belongs to the command stream
fn init_logging(settings: &Settings) -> io::Result<()> {
    let result = match &settings.log_file {
        Some(path) => {
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;
            WriteLogger::init(settings.log_level, Config::default(), log_file)
        }
        None => WriteLogger::init(settings.log_level, Config::default(), io::stderr()),
    };
    result.map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

fn run_emit(settings: &Settings) -> io::Result<()> {
    let scene = settings.scene.build();
    info!(
        "Streaming scene '{}' (frames: {:?}, interval: {:?})",
        settings.scene, settings.frames, settings.interval
    );

    let mut emitter =
        Emitter::new(BufWriter::new(io::stdout().lock())).with_interval(settings.interval);
    let result = emitter.run(scene.as_ref(), settings.frames);
    drop(emitter);

    match result {
        Ok(summary) => {
            info!(
                "Stopped ({:?}) after {} frames, {} lines",
                summary.stop, summary.frames, summary.lines
            );
            Ok(())
        }
        Err(e) => fail(settings, &e),
    }
}

fn run_check(settings: &Settings) -> io::Result<()> {
    let report = match check_stream(io::stdin().lock()) {
        Ok(report) => report,
        Err(e) => fail(settings, &e),
    };

    let written = {
        let mut stdout = io::stdout().lock();
        writeln!(
            stdout,
            "ok: {} commands, {} frames",
            report.commands, report.frames
        )
        .and_then(|()| stdout.flush())
    };
    match written {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            info!("Reader closed stdout before the check report was written");
            Ok(())
        }
        Err(e) => fail(settings, &e),
    }
}

// The default log sink is already stderr, only echo there when logging to a file
fn fail(settings: &Settings, e: &dyn Display) -> ! {
    error!("{}", e);
    if settings.log_file.is_some() {
        eprintln!("draw_stream: {}", e);
    }
    process::exit(1);
}
