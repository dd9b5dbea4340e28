use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure the program can report, each carrying its user-facing
/// diagnostic and mapping to a process exit status.
#[derive(Debug, Error)]
pub enum TeeError {
    #[error("ERROR! Couldn't recognize argument {0}, please use option \"--help\" for instructions")]
    UnrecognizedArgument(String),

    #[error("ERROR! Multiple output files set: {} and {}", first.display(), second.display())]
    MultipleTargets { first: PathBuf, second: PathBuf },

    #[error("ERROR! Couldn't open output file {}: {source}", path.display())]
    OpenTarget { path: PathBuf, source: io::Error },

    #[error("error while reading standard input: {0}")]
    ReadInput(io::Error),

    #[error("error while writing to the output file: {0}")]
    WriteTarget(io::Error),

    #[error("error while writing to standard output: {0}")]
    WriteStdout(io::Error),
}

impl TeeError {
    /// Exit status reported to the OS: 1 for argument errors, 2 for
    /// anything that failed while handling the stream.
    pub fn exit_code(&self) -> i32 {
        match self {
            TeeError::UnrecognizedArgument(_) | TeeError::MultipleTargets { .. } => 1,
            TeeError::OpenTarget { .. }
            | TeeError::ReadInput(_)
            | TeeError::WriteTarget(_)
            | TeeError::WriteStdout(_) => 2,
        }
    }
}
