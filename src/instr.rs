use core::{fmt, str::FromStr};

use crate::lexer::Span;

/// A single step of a flat postfix program.
///
/// The [`Span`] points back into the [`Source`] the instruction was parsed
/// from, for error reporting.
///
/// [`Source`]: crate::source::Source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instr {
  pub kind: InstrKind,
  pub span: Span,
}

impl fmt::Display for Instr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.kind)
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InstrKind {
  /// Pushes a value onto the operand stack.
  Push(f64),
  /// Pops the top two operands and pushes the result back.
  Op(Op),
}

impl fmt::Display for InstrKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Push(value) => write!(f, "{value}"),
      Self::Op(op) => write!(f, "{op}"),
    }
  }
}

macro_rules! ops {
  ($($ident:ident => $s:literal),* $(,)?) => {
    /// A binary operator.
    ///
    /// The first-pushed operand is the left-hand side.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Op {
      $($ident,)*
    }

    impl Op {
      /// Returns this [`Op`] as a <code>&[str]</code>.
      pub const fn as_str(self) -> &'static str {
        match self {
          $(Self::$ident => $s,)*
        }
      }

      /// Returns all of the operator symbols as a
      /// <code>&\[&[str]\]</code>.
      pub const fn all_as_slice() -> &'static [&'static str] {
        &[$($s),*]
      }
    }

    impl FromStr for Op {
      type Err = ParseOpError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
          $($s => Ok(Self::$ident),)*
          _ => Err(ParseOpError),
        }
      }
    }

    impl fmt::Display for Op {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
      }
    }
  };
}

ops! {
  Add => "+",
  Sub => "-",
  Mul => "*",
  Div => "/",
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator")]
pub struct ParseOpError;
