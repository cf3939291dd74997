use crate::ops;
use crate::scope::Scope;
use crate::value::Value;
use parse_jsx::error::SyntaxError;
use parse_jsx::loc::Position;
use parse_jsx::loc::SourceLocation;
use std::fmt;
use std::fmt::Display;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EvaluationErrorKind {
  /// Syntax the evaluator deliberately rejects, e.g. `async` functions or `with`.
  Unsupported,
  /// A call or construction denied by the sandbox.
  NotAllowed,
  NotCallable,
  NotConstructor,
  /// An unresolved identifier while `raise_reference_error` is set.
  Reference,
  Type,
  Export,
  /// An object, function, or component used as a JSX child.
  InvalidChild,
  /// `evaluate_jsx` input that is not a single root fragment.
  RootNotFragment,
}

/// An interpreter fault. Scripts cannot catch these.
#[derive(Clone, Debug)]
pub struct EvaluationError {
  pub kind: EvaluationErrorKind,
  pub message: String,
  /// Start of the offending node, when the AST carries locations.
  pub loc: Option<Position>,
  /// The frame chain active when the error was raised.
  pub scope: Option<Scope>,
}

impl Display for EvaluationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.loc {
      Some(p) => write!(f, "[{}:{}] {}", p.line, p.column, self.message),
      None => write!(f, "{}", self.message),
    }
  }
}

impl std::error::Error for EvaluationError {}

/// Errors produced while parsing or evaluating.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
  #[error("syntax error: {0}")]
  Syntax(#[from] SyntaxError),

  #[error("{0}")]
  Evaluation(Box<EvaluationError>),

  /// A script `throw` that no `catch` handled. This is the only variant scripts can catch.
  #[error("uncaught exception: {}", ops::describe_thrown(.0))]
  Thrown(Value),

  /// A control signal that escaped to the driver, or a malformed binding pattern.
  #[error("logic error: {0}")]
  Logic(String),
}

impl Error {
  pub fn evaluation(kind: EvaluationErrorKind, message: impl Into<String>) -> Error {
    Error::Evaluation(Box::new(EvaluationError {
      kind,
      message: message.into(),
      loc: None,
      scope: None,
    }))
  }

  pub fn kind(&self) -> Option<EvaluationErrorKind> {
    match self {
      Error::Evaluation(err) => Some(err.kind),
      _ => None,
    }
  }

  /// Attaches a position to an evaluation error that does not have one yet.
  pub fn at(self, loc: Option<SourceLocation>) -> Error {
    match (self, loc) {
      (Error::Evaluation(mut err), Some(loc)) if err.loc.is_none() => {
        err.loc = Some(loc.start);
        Error::Evaluation(err)
      }
      (err, _) => err,
    }
  }
}

impl From<EvaluationError> for Error {
  fn from(err: EvaluationError) -> Self {
    Error::Evaluation(Box::new(err))
  }
}

pub type EvalResult<T> = Result<T, Error>;
