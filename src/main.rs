use std::io::{self, Write};
use std::process;

mod cli;
mod error;
mod replicate;

use cli::Invocation;
use error::TeeError;

fn main() {
    let exit = match real_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    };
    process::exit(exit);
}

fn real_main() -> Result<i32, TeeError> {
    match cli::parse(std::env::args_os())? {
        Invocation::Help(text) => {
            print!("{text}");
            io::stdout().flush().map_err(TeeError::WriteStdout)?;
        }
        Invocation::Run(config) => replicate::run(&config)?,
    }
    Ok(0)
}
