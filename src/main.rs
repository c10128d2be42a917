//! Command-line front end: reads a scroll file named on the command line,
//! runs it to completion against the process's standard streams, and maps
//! the outcome to an exit code.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use log::error;

use um_interpreter::io::StdIo;
use um_interpreter::{run, Fault};

/// Exit code used for a missing argument or a scroll that could not be opened.
const EXIT_USAGE: u8 = 1;
/// Exit code used when the hosted program faults during execution.
const EXIT_FAULT: u8 = 2;

#[derive(Parser)]
#[command(name = "um", about = "Run a Universal Machine scroll")]
struct Args {
    /// Path to the scroll file to execute.
    scroll: PathBuf,
}

/// How a run concluded, independent of which branch produced it.
///
/// Kept separate from `ExitCode` (which has no public equality) so the
/// mapping to a process exit code can be exercised by a plain unit test.
enum Outcome {
    Halted,
    UsageError,
    Faulted,
}

impl Outcome {
    fn code(&self) -> u8 {
        match self {
            Outcome::Halted => 0,
            Outcome::UsageError => EXIT_USAGE,
            Outcome::Faulted => EXIT_FAULT,
        }
    }
}

/// Chooses the diagnostic message for a `clap` parse failure.
///
/// Only a missing positional gets the spec's exact wording; every other
/// parse failure (an unexpected extra argument, `--help`, a bad flag, ...)
/// is reported with clap's own message instead of being misreported as "no
/// argument given."
fn describe_parse_error(err: &clap::Error) -> String {
    if err.kind() == ErrorKind::MissingRequiredArgument {
        "no argument given on command line".to_string()
    } else {
        err.to_string()
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", describe_parse_error(&e));
            return ExitCode::from(Outcome::UsageError.code());
        }
    };

    let scroll = match fs::read(&args.scroll) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{}: {e}", args.scroll.display());
            return ExitCode::from(Outcome::UsageError.code());
        }
    };

    let mut io = StdIo::new();
    match run(&scroll, &mut io) {
        Ok(()) => ExitCode::from(Outcome::Halted.code()),
        Err(fault) => {
            error!("{fault}");
            eprintln!("{fault}");
            ExitCode::from(Outcome::Faulted.code())
        }
    }
}
