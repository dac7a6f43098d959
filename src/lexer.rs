use core::{fmt, ops::Range};

use crate::source::Source;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub span: Span,
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.kind)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
  /// The lower byte bound (inclusive).
  pub start: usize,
  /// The upper byte bound (exclusive).
  pub end: usize,
}

impl Span {
  /// Returns the <code>[Range]\<[usize]\></code> of this [`Span`].
  #[inline]
  pub const fn to_range(self) -> Range<usize> {
    Range {
      start: self.start,
      end: self.end,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Invalid,
  Eof,

  Integer,

  Plus,
  Minus,
  Star,
  Slash,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Invalid => write!(f, "invalid characters"),
      Self::Eof => write!(f, "end of input"),

      Self::Integer => write!(f, "an integer literal"),

      Self::Plus => write!(f, "+"),
      Self::Minus => write!(f, "-"),
      Self::Star => write!(f, "*"),
      Self::Slash => write!(f, "/"),
    }
  }
}

/// Converts a [`Source`] into a stream of [`Token`]s.
///
/// Whitespace separates tokens and is never emitted. A contiguous run of
/// characters matching no token class is emitted as a single
/// [`TokenKind::Invalid`] token.
#[derive(Debug)]
pub struct Lexer {
  source: Source,
  cursor: usize,
  peeked: Option<Token>,
}

impl Lexer {
  /// Creates a [`Lexer`] from a [`Source`].
  pub fn new(source: Source) -> Self {
    Self {
      source,
      cursor: 0,
      peeked: None,
    }
  }

  /// Returns a clone of the [`Source`].
  #[inline]
  pub fn source(&self) -> Source {
    self.source.clone()
  }

  /// Returns the next [`Token`] in the stream without consuming it.
  #[inline]
  pub fn peek(&mut self) -> Token {
    match self.peeked {
      Some(token) => token,
      None => {
        let token = self.next();
        self.peeked = Some(token);
        token
      }
    }
  }

  /// Returns the next [`Token`] in the stream.
  ///
  /// Once the first [`TokenKind::Eof`] has been returned, it will continue to
  /// return them thereafter, akin to a [`FusedIterator`].
  ///
  /// [`FusedIterator`]: core::iter::FusedIterator
  #[allow(clippy::should_implement_trait)]
  pub fn next(&mut self) -> Token {
    if let Some(token) = self.peeked.take() {
      return token;
    }

    let source = self.source.source();

    let mut state = State::Start;
    let mut start = self.cursor;
    let mut chars = source[self.cursor..].chars();

    loop {
      let c = chars.next().unwrap_or('\0');
      let c_len = c.len_utf8();

      match state {
        State::Start => match c {
          '\0' if self.cursor == source.len() => {
            break Token {
              kind: TokenKind::Eof,
              span: Span {
                start: self.cursor,
                end: self.cursor,
              },
            };
          }
          '+' => {
            self.cursor += c_len;

            break Token {
              kind: TokenKind::Plus,
              span: Span {
                start,
                end: self.cursor,
              },
            };
          }
          // The grammar has no signed literals, hence `-` is always an
          // operator, even directly before digits.
          '-' => {
            self.cursor += c_len;

            break Token {
              kind: TokenKind::Minus,
              span: Span {
                start,
                end: self.cursor,
              },
            };
          }
          '*' => {
            self.cursor += c_len;

            break Token {
              kind: TokenKind::Star,
              span: Span {
                start,
                end: self.cursor,
              },
            };
          }
          '/' => {
            self.cursor += c_len;

            break Token {
              kind: TokenKind::Slash,
              span: Span {
                start,
                end: self.cursor,
              },
            };
          }
          '0'..='9' => {
            state = State::Integer;
          }
          c if c.is_whitespace() => {
            start = self.cursor + c_len;
          }
          _ => {
            state = State::Invalid;
          }
        },
        State::Integer => match c {
          '0'..='9' => {}
          _ => {
            break Token {
              kind: TokenKind::Integer,
              span: Span {
                start,
                end: self.cursor,
              },
            };
          }
        },
        State::Invalid => match c {
          '\0' if self.cursor == source.len() => {
            break Token {
              kind: TokenKind::Invalid,
              span: Span {
                start,
                end: self.cursor,
              },
            };
          }
          c if c.is_whitespace() => {
            break Token {
              kind: TokenKind::Invalid,
              span: Span {
                start,
                end: self.cursor,
              },
            };
          }
          _ => {}
        },
      }

      self.cursor += c_len;
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum State {
  Start,
  Invalid,

  Integer,
}

#[cfg(test)]
mod tests {
  use super::*;

  use test_case::test_case;

  fn kinds(source: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(Source::new("", source));
    let mut kinds = Vec::new();

    loop {
      let token = lexer.next();
      kinds.push(token.kind);

      if token.kind == TokenKind::Eof {
        break;
      }
    }

    kinds
  }

  #[test_case("" => vec![TokenKind::Eof] ; "empty")]
  #[test_case("  \t " => vec![TokenKind::Eof] ; "whitespace only")]
  #[test_case(
    "42"
    => vec![TokenKind::Integer, TokenKind::Eof]
    ; "integer"
  )]
  #[test_case(
    "+ - * /"
    => vec![
      TokenKind::Plus,
      TokenKind::Minus,
      TokenKind::Star,
      TokenKind::Slash,
      TokenKind::Eof,
    ]
    ; "operators"
  )]
  #[test_case(
    "40 2 1 * +"
    => vec![
      TokenKind::Integer,
      TokenKind::Integer,
      TokenKind::Integer,
      TokenKind::Star,
      TokenKind::Plus,
      TokenKind::Eof,
    ]
    ; "program"
  )]
  #[test_case(
    "12+"
    => vec![TokenKind::Integer, TokenKind::Plus, TokenKind::Eof]
    ; "operator ends an integer"
  )]
  #[test_case(
    "-5"
    => vec![TokenKind::Minus, TokenKind::Integer, TokenKind::Eof]
    ; "hyphen is an operator"
  )]
  #[test_case("$" => vec![TokenKind::Invalid, TokenKind::Eof] ; "invalid run")]
  #[test_case(
    "1 $foo 2"
    => vec![
      TokenKind::Integer,
      TokenKind::Invalid,
      TokenKind::Integer,
      TokenKind::Eof,
    ]
    ; "invalid run ends at whitespace"
  )]
  #[test_case(
    "1.5"
    => vec![TokenKind::Integer, TokenKind::Invalid, TokenKind::Eof]
    ; "float is not in the grammar"
  )]
  fn lex(source: &str) -> Vec<TokenKind> {
    kinds(source)
  }

  #[test]
  fn spans_are_byte_ranges() {
    let mut lexer = Lexer::new(Source::new("", "40 2 +"));

    assert_eq!(lexer.next().span, Span { start: 0, end: 2 });
    assert_eq!(lexer.next().span, Span { start: 3, end: 4 });
    assert_eq!(lexer.next().span, Span { start: 5, end: 6 });
    assert_eq!(lexer.next().kind, TokenKind::Eof);
  }

  #[test]
  fn eof_is_sticky() {
    let mut lexer = Lexer::new(Source::new("", "1"));
    lexer.next();

    assert_eq!(lexer.next().kind, TokenKind::Eof);
    assert_eq!(lexer.next().kind, TokenKind::Eof);
  }

  #[test]
  fn peek_does_not_consume() {
    let mut lexer = Lexer::new(Source::new("", "1 2"));

    let peeked = lexer.peek();
    assert_eq!(peeked, lexer.next());
    assert_ne!(peeked, lexer.next());
  }
}
