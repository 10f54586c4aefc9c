use std::io::{self, ErrorKind, Write};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use thiserror::Error;

use crate::core::Command;
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The requested number of frames was written.
    FrameLimit,
    /// The reader went away (broken pipe).
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitSummary {
    pub frames: u64,
    pub lines: u64,
    pub stop: StopReason,
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write command stream after {lines} lines: {source}")]
    Io {
        lines: u64,
        #[source]
        source: io::Error,
    },
}

/// Writes a scene to a line-oriented sink.
///
/// Every command is one line terminated by `\n`. The sink is flushed after
/// the header and after every frame, so a reader consuming the stream
/// incrementally sees each frame as soon as it is complete.
pub struct Emitter<W: Write> {
    out: W,
    lines: u64,
    frames: u64,
    frame_interval: Duration,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            lines: 0,
            frames: 0,
            frame_interval: Duration::ZERO,
        }
    }

    /// Minimum time between the start of two frames. Zero means no pacing,
    /// the consumer's read rate is the only limit.
    pub fn with_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_command(&mut self, command: &Command) -> io::Result<()> {
        trace!("{}", command);
        writeln!(self.out, "{}", command)?;
        self.lines += 1;
        Ok(())
    }

    pub fn emit_header(&mut self, scene: &dyn Scene) -> io::Result<()> {
        for command in scene.header() {
            self.write_command(&command)?;
        }
        self.out.flush()
    }

    pub fn emit_frame(&mut self, scene: &dyn Scene, index: u64) -> io::Result<()> {
        for command in scene.frame(index) {
            self.write_command(&command)?;
        }
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }

    /// Writes the header once, then frames until `limit` frames have been
    /// written or forever when `limit` is `None`.
    ///
    /// The run stops at the first failed write. A broken pipe means the
    /// consumer exited and is reported as [`StopReason::Disconnected`]; any
    /// other failure is an error.
    pub fn run(
        &mut self,
        scene: &dyn Scene,
        limit: Option<u64>,
    ) -> Result<EmitSummary, EmitError> {
        match self.stream(scene, limit) {
            Ok(()) => Ok(self.summary(StopReason::FrameLimit)),
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                info!(
                    "Consumer closed the stream after {} frames ({} lines)",
                    self.frames, self.lines
                );
                Ok(self.summary(StopReason::Disconnected))
            }
            Err(source) => Err(EmitError::Io {
                lines: self.lines,
                source,
            }),
        }
    }

    fn stream(&mut self, scene: &dyn Scene, limit: Option<u64>) -> io::Result<()> {
        self.emit_header(scene)?;
        debug!("Header written, streaming frames (limit: {:?})", limit);

        let mut index = 0;
        let mut last_frame: Option<Instant> = None;
        while limit.map_or(true, |limit| index < limit) {
            if let Some(last) = last_frame {
                let elapsed = last.elapsed();
                if elapsed < self.frame_interval {
                    thread::sleep(self.frame_interval - elapsed);
                }
            }
            if !self.frame_interval.is_zero() {
                last_frame = Some(Instant::now());
            }

            self.emit_frame(scene, index)?;
            index += 1;
        }
        Ok(())
    }

    fn summary(&self, stop: StopReason) -> EmitSummary {
        EmitSummary {
            frames: self.frames,
            lines: self.lines,
            stop,
        }
    }
}
