use core::fmt;
use std::{
  io::{self, Read},
  path::PathBuf,
};

use clap::Parser;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use rpn::prelude::*;

fn main() {
  let cli = Cli::parse();

  match cli.subcommand.unwrap_or_default() {
    Subcommand::Repl => {
      let mut repl = Reedline::create();
      let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Empty,
        DefaultPromptSegment::Empty,
      );

      loop {
        let signal = ok_or_exit(repl.read_line(&prompt));

        match signal {
          Signal::CtrlC | Signal::CtrlD => {
            println!("aborted");
            break;
          }
          Signal::Success(line) => {
            if line.trim().is_empty() {
              continue;
            }

            if let Some(command) = line.strip_prefix(':') {
              match command {
                "exit" => break,
                "clear" => {
                  ok_or_exit(repl.clear_screen());
                }
                command => eprintln!("error: unknown command '{command}'"),
              }
            } else {
              // Each line is an independent program; no state survives it.
              match evaluate(Source::new("repl", line)) {
                Ok(value) => println!("= {value}"),
                Err(e) => eprintln!("error: {e}"),
              }
            }
          }
        }
      }
    }
    Subcommand::Stdin => {
      let mut source = String::new();
      ok_or_exit(io::stdin().read_to_string(&mut source));

      run_lines("stdin", &source);
    }
    Subcommand::Run { input } => {
      let source = ok_or_exit(std::fs::read_to_string(&input));

      run_lines(&input.to_string_lossy(), &source);
    }
  }
}

/// Evaluates each non-empty line as one program, printing one result per
/// line; exits on the first error.
fn run_lines(name: &str, source: &str) {
  for line in source.lines() {
    if line.trim().is_empty() {
      continue;
    }

    let value = ok_or_exit(evaluate(Source::new(name, line)));
    println!("{value}");
  }
}

fn ok_or_exit<T, E>(result: Result<T, E>) -> T
where
  E: fmt::Display,
{
  match result {
    Ok(x) => x,
    Err(e) => {
      eprintln!("error: {e}");
      std::process::exit(1);
    }
  }
}

/// A postfix (reverse Polish notation) expression calculator.
#[derive(Debug, Clone, PartialEq, Eq, clap::Parser)]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  subcommand: Option<Subcommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, clap::Subcommand)]
enum Subcommand {
  /// Runs a REPL [alias >].
  #[default]
  #[command(alias = ">")]
  Repl,
  /// Evaluates the lines supplied via STDIN [alias -].
  #[command(alias = "-")]
  Stdin,
  /// Evaluates the lines from an input file path.
  Run {
    /// The input file path.
    input: PathBuf,
  },
}
