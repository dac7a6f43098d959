pub mod engine;
pub mod instr;
pub mod lexer;
pub mod parser;
pub mod source;

pub mod prelude {
  //! Re-exports commonly used items.

  use super::*;

  pub use engine::{Engine, RunError, RunErrorReason};
  pub use instr::{Instr, InstrKind, Op};
  pub use lexer::{Lexer, Span, Token, TokenKind};
  pub use parser::{parse, ParseError, ParseErrorKind};
  pub use source::{Location, Source};

  pub use crate::{evaluate, Error};
}

use crate::{engine::Engine, lexer::Lexer, source::Source};

/// Lexes, parses, and runs `source` as one postfix program.
///
/// This is a pure function of the input text; evaluating the same text twice
/// yields the same result.
pub fn evaluate(source: Source) -> Result<f64, Error> {
  let mut lexer = Lexer::new(source.clone());
  let instrs = parser::parse(&mut lexer)?;

  Ok(Engine::new().run(source, &instrs)?)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
  #[error(transparent)]
  Parse(#[from] parser::ParseError),
  #[error(transparent)]
  Run(#[from] engine::RunError),
}
