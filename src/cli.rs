//! clap [Parser](clap::Parser) for the command line.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};
use tracing::{level_filters::LevelFilter, Level};

#[derive(Debug, Parser)]
#[command(name = "ls8", version, about = "Runs a program on a minimal 8-bit virtual machine")]
pub struct Arguments {
  /// Program file: one binary literal per line, `#` starts a comment.
  #[arg(value_name = "PROGRAM")]
  pub program: PathBuf,

  /// Stop after this many instructions instead of running until the machine faults.
  #[arg(long, value_name = "N")]
  pub max_steps: Option<u64>,

  /// Print the decoded program and exit without running it.
  #[arg(long)]
  pub disassemble: bool,

  /// Print the machine state when the run stops.
  #[arg(long)]
  pub dump_state: bool,

  #[command(flatten)]
  pub verbosity: Verbosity,
}

/// The verbosity settings for the cli.
#[derive(Debug, Copy, Clone, Args)]
pub struct Verbosity {
  /// Set the minimum log level.
  ///
  /// -v     Info
  /// -vv    Debug
  /// -vvv   Traces, one line per executed instruction
  #[arg(short, long, action = ArgAction::Count, verbatim_doc_comment)]
  verbosity: u8,

  /// Silence all log output.
  #[arg(long, short = 'q')]
  quiet: bool,
}

impl Verbosity {
  /// The most verbose level that will be logged. Warnings and errors are shown by default.
  pub fn level_filter(&self) -> LevelFilter {
    if self.quiet {
      return LevelFilter::OFF;
    }
    let level = match self.verbosity {
      0 => Level::WARN,
      1 => Level::INFO,
      2 => Level::DEBUG,
      _ => Level::TRACE,
    };
    level.into()
  }

  /// Installs a stderr subscriber at the configured level.
  pub fn init_tracing(&self) {
    tracing_subscriber::fmt()
      .with_max_level(self.level_filter())
      .with_writer(std::io::stderr)
      .with_target(false)
      .init();
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use clap::error::ErrorKind;

  #[test]
  fn program_argument(){
    let arguments = Arguments::try_parse_from(["ls8", "programs/compare.ls8"]).unwrap();
    assert_eq!(arguments.program, PathBuf::from("programs/compare.ls8"));
    assert_eq!(arguments.max_steps, None);
    assert!(!arguments.disassemble);
    assert_eq!(arguments.verbosity.level_filter(), LevelFilter::WARN);
  }

  #[test]
  fn options(){
    let arguments = Arguments::try_parse_from(
      ["ls8", "--max-steps", "50", "--dump-state", "-vvv", "prog.ls8"]
    ).unwrap();
    assert_eq!(arguments.max_steps, Some(50));
    assert!(arguments.dump_state);
    assert_eq!(arguments.verbosity.level_filter(), LevelFilter::TRACE);

    let quiet = Arguments::try_parse_from(["ls8", "-q", "-vv", "prog.ls8"]).unwrap();
    assert_eq!(quiet.verbosity.level_filter(), LevelFilter::OFF);
  }

  #[test]
  fn wrong_argument_count(){
    let missing = Arguments::try_parse_from(["ls8"]).unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::MissingRequiredArgument);

    let extra = Arguments::try_parse_from(["ls8", "a.ls8", "b.ls8"]).unwrap_err();
    assert_eq!(extra.kind(), ErrorKind::UnknownArgument);
  }
}
