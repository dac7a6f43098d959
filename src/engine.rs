use core::fmt;

use crate::{
  instr::{Instr, InstrKind, Op},
  lexer::Span,
  source::Source,
};

/// Evaluates flat postfix programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Engine;

impl Engine {
  #[inline]
  pub fn new() -> Self {
    Self
  }

  /// Folds `instrs` left-to-right over a fresh operand stack and returns the
  /// sole remaining value.
  ///
  /// Each call owns its own stack; nothing persists between calls, so
  /// separate callers may run in parallel.
  pub fn run(
    &self,
    source: Source,
    instrs: &[Instr],
  ) -> Result<f64, RunError> {
    let mut stack: Vec<f64> = Vec::with_capacity(instrs.len());

    for instr in instrs {
      match instr.kind {
        InstrKind::Push(value) => stack.push(value),
        InstrKind::Op(op) => {
          let (rhs, lhs) = match (stack.pop(), stack.pop()) {
            (Some(rhs), Some(lhs)) => (rhs, lhs),
            _ => {
              return Err(RunError {
                reason: RunErrorReason::StackUnderflow,
                source,
                span: instr.span,
              });
            }
          };

          let result = match op {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => {
              // A typed failure, not a silent `inf`/`NaN`.
              if rhs == 0.0 {
                return Err(RunError {
                  reason: RunErrorReason::DivisionByZero,
                  source,
                  span: instr.span,
                });
              }

              lhs / rhs
            }
          };

          stack.push(result);
        }
      }
    }

    match stack[..] {
      [result] => Ok(result),
      _ => Err(RunError {
        reason: RunErrorReason::UnbalancedStack { depth: stack.len() },
        span: Span {
          start: instrs.first().map(|instr| instr.span.start).unwrap_or(0),
          end: instrs.last().map(|instr| instr.span.end).unwrap_or(0),
        },
        source,
      }),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunError {
  pub reason: RunErrorReason,
  pub source: Source,
  pub span: Span,
}

impl std::error::Error for RunError {}

impl fmt::Display for RunError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.reason)?;

    if let Some(location) = self.source.location(self.span.start) {
      write!(f, " at {}:{}", self.source.name(), location)?;
    }

    Ok(())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RunErrorReason {
  #[error("stack underflow")]
  StackUnderflow,
  #[error("division by zero")]
  DivisionByZero,
  #[error("expected a single result, the stack holds {depth} values")]
  UnbalancedStack { depth: usize },
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{lexer::Lexer, parser::parse};

  use test_case::test_case;

  fn run(source: &str) -> Result<f64, RunErrorReason> {
    let source = Source::new("", source);
    let mut lexer = Lexer::new(source.clone());
    let instrs = parse(&mut lexer).unwrap();

    Engine::new().run(source, &instrs).map_err(|e| e.reason)
  }

  #[test_case("1 2 +" => Ok(3.0) ; "add")]
  #[test_case("10 3 -" => Ok(7.0) ; "sub keeps operand order")]
  #[test_case("6 7 *" => Ok(42.0) ; "mul")]
  #[test_case("84 2 /" => Ok(42.0) ; "div keeps operand order")]
  #[test_case("7 2 /" => Ok(3.5) ; "div is not integral")]
  #[test_case("0 1 /" => Ok(0.0) ; "zero numerator divides fine")]
  #[test_case("40 2 1 * +" => Ok(42.0) ; "chained")]
  #[test_case("5" => Ok(5.0) ; "single operand is a valid program")]
  #[test_case(
    "+"
    => Err(RunErrorReason::StackUnderflow)
    ; "operator without operands"
  )]
  #[test_case(
    "1 +"
    => Err(RunErrorReason::StackUnderflow)
    ; "operator with one operand"
  )]
  #[test_case(
    "1 0 /"
    => Err(RunErrorReason::DivisionByZero)
    ; "division by zero"
  )]
  #[test_case(
    "1 2"
    => Err(RunErrorReason::UnbalancedStack { depth: 2 })
    ; "missing operator"
  )]
  #[test_case(
    ""
    => Err(RunErrorReason::UnbalancedStack { depth: 0 })
    ; "empty program"
  )]
  fn runs(source: &str) -> Result<f64, RunErrorReason> {
    run(source)
  }

  #[test]
  fn underflow_points_at_the_operator() {
    let source = Source::new("input", "1 +");
    let mut lexer = Lexer::new(source.clone());
    let instrs = parse(&mut lexer).unwrap();

    let err = Engine::new().run(source, &instrs).unwrap_err();

    assert_eq!(err.span, Span { start: 2, end: 3 });
    assert_eq!(err.to_string(), "stack underflow at input:1:3");
  }

  #[test]
  fn unbalanced_stack_spans_the_program() {
    let source = Source::new("input", "1 2");
    let mut lexer = Lexer::new(source.clone());
    let instrs = parse(&mut lexer).unwrap();

    let err = Engine::new().run(source, &instrs).unwrap_err();

    assert_eq!(err.span, Span { start: 0, end: 3 });
    assert_eq!(
      err.to_string(),
      "expected a single result, the stack holds 2 values at input:1:1"
    );
  }
}
