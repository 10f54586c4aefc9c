use std::io::{self, BufRead};

use log::debug;
use thiserror::Error;

use crate::core::{Command, ParseCommandError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckReport {
    pub commands: u64,
    pub frames: u64,
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read command stream: {0}")]
    Io(#[from] io::Error),

    #[error("line {number}: {source} (`{line}`)")]
    Invalid {
        number: u64,
        line: String,
        #[source]
        source: ParseCommandError,
    },
}

/// Validates a command stream line by line, stopping at the first line that
/// is not a well-formed command. Blank lines are skipped.
pub fn check_stream<R: BufRead>(input: R) -> Result<CheckReport, CheckError> {
    let mut report = CheckReport::default();

    for (number, line) in (1u64..).zip(input.lines()) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command: Command = line.parse().map_err(|source| CheckError::Invalid {
            number,
            line: line.clone(),
            source,
        })?;
        debug!("{:>6}: {}", number, command);

        report.commands += 1;
        if command == Command::Present {
            report.frames += 1;
        }
    }

    Ok(report)
}
