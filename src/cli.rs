use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};

use crate::error::TeeError;

#[derive(Debug, Parser)]
#[command(
    name = "rtee",
    about = "Copy standard input to both standard output and the given file",
    override_usage = "<command> | rtee [-a] <outputfile>"
)]
struct Cli {
    /// Append to the output file instead of truncating it
    #[arg(short = 'a', overrides_with = "append")]
    append: bool,

    /// File that receives a copy of standard input
    #[arg(value_name = "outputfile")]
    files: Vec<PathBuf>,
}

/// Validated run configuration. Built once by the parser, immutable after.
#[derive(Debug, Clone)]
pub struct Config {
    pub append: bool,
    pub target_path: PathBuf,
}

/// What an invocation asked for: a replication run, or help text destined
/// for standard output. Giving no output file deliberately shows the usage
/// instead of erroring.
#[derive(Debug)]
pub enum Invocation {
    Run(Config),
    Help(String),
}

/// Parse the full process argument list, program name included.
pub fn parse<I, T>(args: I) -> Result<Invocation, TeeError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => return translate_clap_error(err),
    };

    let mut files = cli.files.into_iter();
    let target_path = match files.next() {
        Some(path) => path,
        None => return Ok(Invocation::Help(help_text())),
    };
    if let Some(second) = files.next() {
        return Err(TeeError::MultipleTargets {
            first: target_path,
            second,
        });
    }
    // A lone "-" slips through clap as a positional value; any token
    // starting with "-" is an option here, not a path.
    if target_path.to_string_lossy().starts_with('-') {
        return Err(TeeError::UnrecognizedArgument(
            target_path.to_string_lossy().into_owned(),
        ));
    }

    Ok(Invocation::Run(Config {
        append: cli.append,
        target_path,
    }))
}

fn help_text() -> String {
    Cli::command().render_help().to_string()
}

/// Map clap's outcomes onto this program's surface: help stays help, and
/// any parse failure is reported as an unrecognized argument with exit
/// status 1.
fn translate_clap_error(err: clap::Error) -> Result<Invocation, TeeError> {
    if err.kind() == ErrorKind::DisplayHelp {
        return Ok(Invocation::Help(err.to_string()));
    }
    let token = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(token)) => token.clone(),
        _ => err.to_string().trim().to_owned(),
    };
    Err(TeeError::UnrecognizedArgument(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_tokens(tokens: &[&str]) -> Result<Invocation, TeeError> {
        parse(std::iter::once("rtee").chain(tokens.iter().copied()))
    }

    fn parsed_config(tokens: &[&str]) -> Config {
        match parse_tokens(tokens) {
            Ok(Invocation::Run(config)) => config,
            other => panic!("expected a run configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_single_target_path() {
        let config = parsed_config(&["out.log"]);
        assert!(!config.append);
        assert_eq!(config.target_path, PathBuf::from("out.log"));
    }

    #[test]
    fn test_append_flag_in_any_position() {
        assert!(parsed_config(&["-a", "out.log"]).append);
        assert!(parsed_config(&["out.log", "-a"]).append);
    }

    #[test]
    fn test_repeated_append_flag_is_harmless() {
        assert!(parsed_config(&["-a", "-a", "out.log"]).append);
        assert!(parsed_config(&["-aa", "out.log"]).append);
    }

    #[test]
    fn test_no_target_shows_usage() {
        match parse_tokens(&[]) {
            Ok(Invocation::Help(text)) => assert!(text.contains("outputfile")),
            other => panic!("expected help, got {other:?}"),
        }
    }

    #[test]
    fn test_help_flag_shows_usage() {
        match parse_tokens(&["--help"]) {
            Ok(Invocation::Help(text)) => {
                assert!(text.contains("<command> | rtee [-a] <outputfile>"));
            }
            other => panic!("expected help, got {other:?}"),
        }
    }

    #[test]
    fn test_help_flag_wins_when_seen_first() {
        let outcome = parse_tokens(&["--help", "--bogus", "a.txt", "b.txt"]);
        assert!(matches!(outcome, Ok(Invocation::Help(_))));
    }

    #[test]
    fn test_unknown_flag_wins_when_seen_first() {
        let err = parse_tokens(&["--bogus", "--help"]).unwrap_err();
        assert!(matches!(err, TeeError::UnrecognizedArgument(_)));
    }

    #[test]
    fn test_unknown_flag_is_reported_verbatim() {
        let err = parse_tokens(&["--bogus", "out.log"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERROR! Couldn't recognize argument --bogus, please use option \"--help\" for instructions"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_unknown_short_flag_is_rejected() {
        let err = parse_tokens(&["-x", "out.log"]).unwrap_err();
        assert!(err.to_string().contains("-x"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_multiple_targets_are_rejected() {
        let err = parse_tokens(&["a.txt", "b.txt"]).unwrap_err();
        match &err {
            TeeError::MultipleTargets { first, second } => {
                assert_eq!(first, &PathBuf::from("a.txt"));
                assert_eq!(second, &PathBuf::from("b.txt"));
            }
            other => panic!("expected a multiple-targets error, got {other:?}"),
        }
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_lone_dash_is_not_a_path() {
        let err = parse_tokens(&["-"]).unwrap_err();
        match err {
            TeeError::UnrecognizedArgument(token) => assert_eq!(token, "-"),
            other => panic!("expected an unrecognized-argument error, got {other:?}"),
        }
    }
}
