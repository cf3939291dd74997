use crate::loc::Loc;
use crate::loc::Position;
use crate::token::TT;
use std::error::Error;
use std::fmt;

/// What went wrong. Each kind has a stable `PJ` diagnostic code, see [`SyntaxErrorType::code`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  ExpectedSyntax(&'static str),
  InvalidAssignmentTarget,
  InvalidCharacterEscape,
  InvalidToken,
  JsxClosingTagMismatch,
  LineTerminatorAfterArrowFunctionParameters,
  LineTerminatorAfterThrow,
  MalformedLiteralNumber,
  RequiredTokenNotFound(TT),
  TryStatementHasNoCatchOrFinally,
  UnexpectedEnd,
}

impl SyntaxErrorType {
  fn describe(self) -> (&'static str, &'static str) {
    use SyntaxErrorType::*;
    match self {
      ExpectedSyntax(_) => ("PJ0001", "expected"),
      InvalidAssignmentTarget => ("PJ0002", "invalid assignment target"),
      InvalidCharacterEscape => ("PJ0003", "invalid character escape"),
      InvalidToken => ("PJ0004", "invalid or unterminated token"),
      JsxClosingTagMismatch => ("PJ0005", "JSX closing tag does not match opening tag"),
      LineTerminatorAfterArrowFunctionParameters => (
        "PJ0006",
        "line terminator not allowed after arrow function parameters",
      ),
      LineTerminatorAfterThrow => ("PJ0007", "line terminator not allowed after `throw`"),
      MalformedLiteralNumber => ("PJ0008", "malformed number literal"),
      RequiredTokenNotFound(_) => ("PJ0009", "expected token"),
      TryStatementHasNoCatchOrFinally => ("PJ0010", "try statement requires a catch or finally block"),
      UnexpectedEnd => ("PJ0011", "unexpected end of input"),
    }
  }

  pub fn code(self) -> &'static str {
    self.describe().0
  }

  pub fn message(self, actual_token: Option<TT>) -> String {
    let (_, text) = self.describe();
    match (self, actual_token) {
      (SyntaxErrorType::ExpectedSyntax(what), Some(found)) => format!("{text} {what} but found {found:?}"),
      (SyntaxErrorType::ExpectedSyntax(what), None) => format!("{text} {what}"),
      (SyntaxErrorType::RequiredTokenNotFound(token), _) => format!("{text} {token:?}"),
      _ => text.to_string(),
    }
  }
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
  /// Line and column of `loc.0`, filled in once the parser knows the source text.
  pub position: Option<Position>,
}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
      position: None,
    }
  }

  pub fn with_position(self, position: Position) -> SyntaxError {
    SyntaxError {
      position: Some(position),
      ..self
    }
  }

  pub fn code(&self) -> &'static str {
    self.typ.code()
  }

  pub fn message(&self) -> String {
    self.typ.message(self.actual_token)
  }
}

impl fmt::Display for SyntaxError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(Position { line, column }) = self.position {
      write!(f, "[{line}:{column}] ")?;
    };
    write!(f, "{}: {}", self.code(), self.message())
  }
}

impl fmt::Debug for SyntaxError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{self} at bytes {}..{}", self.loc.0, self.loc.1)
  }
}

impl Error for SyntaxError {}

/// Errors compare by kind only, so tests need not spell out locations.
impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display() {
    let err = SyntaxError::new(SyntaxErrorType::ExpectedSyntax("expression"), Loc(3, 4), Some(TT::Comma));
    assert_eq!(err.to_string(), "PJ0001: expected expression but found Comma");
    let err = err.with_position(Position { line: 2, column: 1 });
    assert_eq!(err.to_string(), "[2:1] PJ0001: expected expression but found Comma");
    assert_eq!(SyntaxErrorType::UnexpectedEnd.message(None), "unexpected end of input");
  }
}
