use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};

use crate::cli::Config;
use crate::error::TeeError;

/// Capacity of the transfer buffer and of the write buffer attached to the
/// output file.
const BUFFER_SIZE: usize = 1024;

/// Copy standard input to both the configured output file and standard
/// output until the input is exhausted.
///
/// All handles are released when this returns, on the error paths through
/// the buffered file writer's drop.
pub fn run(config: &Config) -> Result<(), TeeError> {
    let file = open_target(config)?;
    let mut target = BufWriter::with_capacity(BUFFER_SIZE, file);
    replicate(io::stdin().lock(), &mut target, &mut io::stdout().lock())
}

/// Open the output file for writing, truncating it unless append mode was
/// requested. The file is created in either mode if it does not exist.
fn open_target(config: &Config) -> Result<File, TeeError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true);
    if config.append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    options
        .open(&config.target_path)
        .map_err(|source| TeeError::OpenTarget {
            path: config.target_path.clone(),
            source,
        })
}

/// The copy loop. Each chunk read from `input` is written to `target`
/// first, then to `echo`, and the two writes fail independently so the
/// diagnostic names the destination that broke. End-of-stream flushes both
/// destinations before returning; the first error anywhere ends the run.
fn replicate(
    mut input: impl Read,
    target: &mut impl Write,
    echo: &mut impl Write,
) -> Result<(), TeeError> {
    let mut buffer = [0u8; BUFFER_SIZE];
    loop {
        let read = match input.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(TeeError::ReadInput(err)),
        };
        target
            .write_all(&buffer[..read])
            .map_err(TeeError::WriteTarget)?;
        echo.write_all(&buffer[..read])
            .map_err(TeeError::WriteStdout)?;
    }
    target.flush().map_err(TeeError::WriteTarget)?;
    echo.flush().map_err(TeeError::WriteStdout)
}
