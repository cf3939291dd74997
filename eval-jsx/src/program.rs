//! Entry points: run a whole program, or evaluate JSX text into nodes.

use crate::context::Context;
use crate::error::EvalResult;
use crate::error::Error;
use crate::error::EvaluationErrorKind;
use crate::jsx;
use crate::node::JsxNode;
use crate::options::EvaluateOptions;
use crate::stmt;
use crate::stmt::Completion;
use parse_jsx::ast::Expression;
use parse_jsx::ast::Program;
use parse_jsx::ast::Statement;
use parse_jsx::ParseOptions;
use std::borrow::Cow;
use std::time::Instant;
use tracing::debug_span;
use tracing::field::Empty;
use tracing::info;

/// Source text, or an AST parsed elsewhere (e.g. deserialized from ESTree JSON).
#[derive(Clone, Copy, Debug)]
pub enum Input<'a> {
  Source(&'a str),
  Program(&'a Program),
}

impl<'a> From<&'a str> for Input<'a> {
  fn from(source: &'a str) -> Self {
    Input::Source(source)
  }
}

impl<'a> From<&'a Program> for Input<'a> {
  fn from(program: &'a Program) -> Self {
    Input::Program(program)
  }
}

fn parse<'a>(input: Input<'a>, opts: ParseOptions, debug: bool) -> EvalResult<Cow<'a, Program>> {
  match input {
    Input::Program(program) => Ok(Cow::Borrowed(program)),
    Input::Source(source) => {
      let span = debug_span!("parse", bytes = source.len(), duration_ms = Empty);
      let _guard = span.enter();
      let start = Instant::now();
      let program = parse_jsx::parse_with_options(source, opts)?;
      let ms = start.elapsed().as_secs_f64() * 1000.0;
      span.record("duration_ms", ms);
      if debug {
        info!(duration_ms = ms, "parsed");
      }
      Ok(Cow::Owned(program))
    }
  }
}

/// A signal that reached the top level with nothing to consume it.
fn unconsumed(completion: Completion) -> EvalResult<()> {
  match completion {
    Completion::Normal => Ok(()),
    Completion::Return(_) => Err(Error::Logic("Illegal return statement".into())),
    Completion::Break(None) => Err(Error::Logic("Illegal break statement".into())),
    Completion::Continue(None) => Err(Error::Logic("Illegal continue statement".into())),
    Completion::Break(Some(label)) | Completion::Continue(Some(label)) => {
      Err(Error::Logic(format!("Undefined label '{}'", label)))
    }
  }
}

/// Runs every top-level statement and returns the context, whose exports and binding frame hold
/// the program's results.
pub fn evaluate<'a>(input: impl Into<Input<'a>>, options: EvaluateOptions) -> EvalResult<Context> {
  let debug = options.debug;
  let program = parse(input.into(), ParseOptions::default(), debug)?;

  let span = debug_span!("evaluate", statements = program.body.len(), duration_ms = Empty);
  let _guard = span.enter();
  let start = Instant::now();
  let mut ctx = Context::new(options);
  let completion = stmt::eval_stmts(&mut ctx, &program.body)?;
  unconsumed(completion)?;
  let ms = start.elapsed().as_secs_f64() * 1000.0;
  span.record("duration_ms", ms);
  if debug {
    info!(duration_ms = ms, exports = ctx.exports().len(), "evaluated program");
  }
  Ok(ctx)
}

/// Evaluates JSX text such as `<a>{x}</a><b/>` into its top-level nodes.
///
/// Source text is parsed as the children of an implicit fragment. A pre-parsed program must
/// consist of exactly one fragment expression statement.
pub fn evaluate_jsx<'a>(
  input: impl Into<Input<'a>>,
  options: EvaluateOptions,
) -> EvalResult<Vec<JsxNode>> {
  let debug = options.debug;
  let program = parse(
    input.into(),
    ParseOptions {
      wrap_in_fragment: true,
      ..ParseOptions::default()
    },
    debug,
  )?;

  let span = debug_span!("evaluate_jsx", duration_ms = Empty);
  let _guard = span.enter();
  let start = Instant::now();
  let mut ctx = Context::new(options);
  let fragment = match program.body.as_slice() {
    [Statement::ExpressionStatement(s)] => match &s.expression {
      Expression::JsxFragment(f) => f,
      other => {
        return Err(ctx.error_at(
          EvaluationErrorKind::RootNotFragment,
          format!("root node must be a JSX fragment, found {}", other.type_name()),
          other.loc(),
        ))
      }
    },
    _ => {
      return Err(ctx.error(
        EvaluationErrorKind::RootNotFragment,
        "root node must be a single JSX fragment",
      ))
    }
  };
  let nodes = jsx::eval_children(&mut ctx, &fragment.children)?;
  let ms = start.elapsed().as_secs_f64() * 1000.0;
  span.record("duration_ms", ms);
  if debug {
    info!(duration_ms = ms, nodes = nodes.len(), "evaluated jsx");
  }
  Ok(nodes)
}

#[cfg(test)]
mod tests {
  use super::evaluate;
  use super::evaluate_jsx;
  use crate::error::Error;
  use crate::error::EvaluationErrorKind;
  use crate::options::EvaluateOptions;
  use parse_jsx::ast::Program;

  #[test]
  fn top_level_return_is_a_logic_error() {
    let err = evaluate("return 1;", EvaluateOptions::default()).err().unwrap();
    assert!(matches!(err, Error::Logic(_)));
  }

  #[test]
  fn jsx_programs_must_be_a_single_fragment() {
    let program: Program = parse_jsx::parse("1 + 1;").unwrap();
    let err = evaluate_jsx(&program, EvaluateOptions::default()).unwrap_err();
    assert_eq!(err.kind(), Some(EvaluationErrorKind::RootNotFragment));
  }

  #[test]
  fn syntax_errors_surface_unchanged() {
    let err = evaluate_jsx("<a>", EvaluateOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
  }
}
