use core::fmt;

use crate::{
  instr::{Instr, InstrKind, Op},
  lexer::{Lexer, Token, TokenKind},
  source::Source,
};

/// Parses the token stream into a flat postfix program.
///
/// Instruction order is token order; there is nothing to reassociate.
pub fn parse(lexer: &mut Lexer) -> Result<Vec<Instr>, ParseError> {
  let mut instrs = Vec::new();

  loop {
    let token = lexer.peek();

    match token.kind {
      TokenKind::Eof => break Ok(instrs),
      _ => instrs.push(parse_instr(lexer)?),
    }
  }
}

fn parse_instr(lexer: &mut Lexer) -> Result<Instr, ParseError> {
  let source = lexer.source();
  let token = lexer.next();

  match token.kind {
    TokenKind::Invalid | TokenKind::Eof => Err(ParseError {
      source,
      kind: ParseErrorKind::UnrecognizedInput(token),
    }),

    TokenKind::Integer => {
      let slice = &source.source()[token.span.to_range()];
      let literal = slice.parse().map_err(|_| ParseError {
        source: source.clone(),
        kind: ParseErrorKind::InvalidLiteral(token),
      })?;

      Ok(Instr {
        kind: InstrKind::Push(literal),
        span: token.span,
      })
    }

    TokenKind::Plus => Ok(Instr {
      kind: InstrKind::Op(Op::Add),
      span: token.span,
    }),
    TokenKind::Minus => Ok(Instr {
      kind: InstrKind::Op(Op::Sub),
      span: token.span,
    }),
    TokenKind::Star => Ok(Instr {
      kind: InstrKind::Op(Op::Mul),
      span: token.span,
    }),
    TokenKind::Slash => Ok(Instr {
      kind: InstrKind::Op(Op::Div),
      span: token.span,
    }),
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
  pub source: Source,
  pub kind: ParseErrorKind,
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let token = self.kind.token();
    let fragment = &self.source.source()[token.span.to_range()];

    write!(f, "{}: '{}'", self.kind, fragment)?;

    if let Some(location) = self.source.location(token.span.start) {
      write!(f, " at {}:{}", self.source.name(), location)?;
    }

    Ok(())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
  #[error("unrecognized input")]
  UnrecognizedInput(Token),
  #[error("invalid integer literal")]
  InvalidLiteral(Token),
}

impl ParseErrorKind {
  /// Returns the offending [`Token`].
  pub fn token(&self) -> Token {
    match *self {
      Self::UnrecognizedInput(token) | Self::InvalidLiteral(token) => token,
    }
  }
}
