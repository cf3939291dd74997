//! Closures and calls: creation, invocation, construction, and the sandbox gate every call passes.

use crate::bind;
use crate::bind::Binding;
use crate::class;
use crate::class::ClassDescriptor;
use crate::context::Context;
use crate::error::EvalResult;
use crate::error::EvaluationErrorKind;
use crate::expr;
use crate::ops;
use crate::scope::Frame;
use crate::scope::FrameKind;
use crate::stmt;
use crate::stmt::Completion;
use crate::value::Array;
use crate::value::Closure;
use crate::value::ClosureCode;
use crate::value::Function;
use crate::value::FunctionKind;
use crate::value::Object;
use crate::value::Value;
use parse_jsx::ast::ArrowBody;
use parse_jsx::ast::Pattern;
use parse_jsx::ast::VariableKind;
use std::rc::Weak;
use tracing::warn;

/// Builds a closure over the current scope. Arrows also capture the current `this`.
pub fn create_closure(
  ctx: &mut Context,
  code: ClosureCode,
  home: Option<Weak<ClassDescriptor>>,
) -> EvalResult<Function> {
  let (name, is_async, generator, loc) = match &code {
    ClosureCode::Function(f) => (
      f.id.as_ref().map(|id| id.name.clone()).unwrap_or_default(),
      f.is_async,
      f.generator,
      f.loc,
    ),
    ClosureCode::Arrow(a) => (String::new(), a.is_async, false, a.loc),
  };
  if is_async {
    return Err(ctx.error_at(
      EvaluationErrorKind::Unsupported,
      "async function not supported",
      loc,
    ));
  }
  if generator {
    return Err(ctx.error_at(
      EvaluationErrorKind::Unsupported,
      "generator function not supported",
      loc,
    ));
  }
  Ok(closure_unchecked(ctx, code, &name, home))
}

/// Closure construction without the async/generator check, for callers that already did it.
pub(crate) fn closure_unchecked(
  ctx: &Context,
  code: ClosureCode,
  name: &str,
  home: Option<Weak<ClassDescriptor>>,
) -> Function {
  let this = match code {
    ClosureCode::Arrow(_) => Some(ctx.resolve_this()),
    ClosureCode::Function(_) => None,
  };
  Function::new(
    FunctionKind::Closure(Closure {
      code,
      scope: ctx.scope().clone(),
      this,
      home,
    }),
    name,
  )
}

/// Calls any value, failing for non-functions.
pub fn call(ctx: &mut Context, callee: &Value, this: Value, args: Vec<Value>) -> EvalResult<Value> {
  match callee {
    Value::Function(f) => call_function(ctx, f, this, args),
    other => Err(ctx.error(
      EvaluationErrorKind::NotCallable,
      format!("{} is not a function", ops::to_js_string(other)),
    )),
  }
}

fn check_allowed(ctx: &Context, function: &Function) -> EvalResult<()> {
  if ctx.is_allowed_function(function) {
    return Ok(());
  }
  let name = function.name();
  warn!(function = %name, "sandbox denied function");
  Err(ctx.error(
    EvaluationErrorKind::NotAllowed,
    format!("function {} is not allowed", if name.is_empty() { "(anonymous)" } else { &*name }),
  ))
}

pub fn call_function(
  ctx: &mut Context,
  function: &Function,
  this: Value,
  args: Vec<Value>,
) -> EvalResult<Value> {
  check_allowed(ctx, function)?;
  match function.kind() {
    FunctionKind::Closure(closure) => call_closure(ctx, closure, this, args),
    FunctionKind::Class(_) => Err(ctx.error(
      EvaluationErrorKind::NotCallable,
      format!(
        "Class constructor {} cannot be invoked without 'new'",
        function.name()
      ),
    )),
    FunctionKind::Bound(bound) => {
      let mut all = bound.args.clone();
      all.extend(args);
      call_function(ctx, &bound.target, bound.this.clone(), all)
    }
    FunctionKind::Native(native) => {
      let call = native.call.clone();
      call(ctx, this, args)
    }
  }
}

/// `new callee(...args)`.
pub fn construct(ctx: &mut Context, callee: &Value, args: Vec<Value>) -> EvalResult<Value> {
  let Value::Function(function) = callee else {
    return Err(ctx.error(
      EvaluationErrorKind::NotConstructor,
      format!("{} is not a constructor", ops::to_js_string(callee)),
    ));
  };
  check_allowed(ctx, function)?;
  match function.kind() {
    FunctionKind::Class(desc) => class::construct(ctx, desc, args),
    FunctionKind::Native(native) => match &native.construct {
      Some(construct) => {
        let construct = construct.clone();
        construct(ctx, Value::Undefined, args)
      }
      None => Err(ctx.error(
        EvaluationErrorKind::NotConstructor,
        format!("{} is not a constructor", function.name()),
      )),
    },
    FunctionKind::Closure(closure) => match closure.code {
      ClosureCode::Arrow(_) => Err(ctx.error(
        EvaluationErrorKind::NotConstructor,
        format!("{} is not a constructor", function.name()),
      )),
      ClosureCode::Function(_) => {
        let instance = Value::Object(Object::new());
        let result = call_closure(ctx, closure, instance.clone(), args)?;
        // A constructor returning an object replaces the instance.
        Ok(if ops::is_primitive(&result) {
          instance
        } else {
          result
        })
      }
    },
    FunctionKind::Bound(bound) => {
      let mut all = bound.args.clone();
      all.extend(args);
      construct(ctx, &Value::Function(bound.target.clone()), all)
    }
  }
}

/// Runs a closure body in a fresh frame whose parent is the captured scope.
pub fn call_closure(
  ctx: &mut Context,
  closure: &Closure,
  this: Value,
  args: Vec<Value>,
) -> EvalResult<Value> {
  match &closure.code {
    ClosureCode::Function(node) => {
      let node = node.clone();
      let frame = Frame::call(&closure.scope, FrameKind::Function, this, closure.home.clone());
      let mut ctx = ctx.enter(frame);
      ctx.declare(
        VariableKind::Let,
        "arguments",
        Value::Array(Array::new(args.clone())),
      );
      bind_parameters(&mut ctx, &node.params, args)?;
      match stmt::eval_stmts(&mut ctx, &node.body.body)? {
        Completion::Return(value) => Ok(value),
        _ => Ok(Value::Undefined),
      }
    }
    ClosureCode::Arrow(node) => {
      let node = node.clone();
      let this = closure.this.clone().unwrap_or(Value::Undefined);
      let frame = Frame::call(&closure.scope, FrameKind::Arrow, this, None);
      let mut ctx = ctx.enter(frame);
      bind_parameters(&mut ctx, &node.params, args)?;
      match &node.body {
        ArrowBody::Expression(body) => expr::eval_expr(&mut ctx, body),
        ArrowBody::BlockStatement(block) => match stmt::eval_stmts(&mut ctx, &block.body)? {
          Completion::Return(value) => Ok(value),
          _ => Ok(Value::Undefined),
        },
      }
    }
  }
}

/// Binds arguments to parameters with `let`. A rest parameter collects everything left.
pub fn bind_parameters(ctx: &mut Context, params: &[Pattern], args: Vec<Value>) -> EvalResult<()> {
  for (i, param) in params.iter().enumerate() {
    let binding = bind::resolve_pattern(ctx, param)?;
    let value = match binding {
      Binding::Rest { .. } => Value::Array(Array::new(args.get(i..).unwrap_or_default().to_vec())),
      _ => args.get(i).cloned().unwrap_or(Value::Undefined),
    };
    bind::apply_binding(ctx, &binding, value, Some(VariableKind::Let))?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::call;
  use super::call_function;
  use super::construct;
  use crate::context::Context;
  use crate::error::EvaluationErrorKind;
  use crate::options::EvaluateOptions;
  use crate::value::Function;
  use crate::value::Value;

  #[test]
  fn calling_a_non_function_is_not_callable() {
    let mut ctx = Context::new(EvaluateOptions::default());
    let err = call(&mut ctx, &Value::Number(1.0), Value::Undefined, vec![]).unwrap_err();
    assert_eq!(err.kind(), Some(EvaluationErrorKind::NotCallable));
  }

  #[test]
  fn natives_without_construct_are_not_constructors() {
    let mut ctx = Context::new(EvaluateOptions::default());
    let f = Function::native("f", |_, _, _| Ok(Value::Null));
    let err = construct(&mut ctx, &Value::Function(f), vec![]).unwrap_err();
    assert_eq!(err.kind(), Some(EvaluationErrorKind::NotConstructor));
  }

  #[test]
  fn denied_functions_fail_before_running() {
    let f = Function::native("secret", |_, _, _| panic!("must not run"));
    let mut ctx = Context::new(EvaluateOptions {
      denied_functions: vec![f.clone()],
      ..EvaluateOptions::default()
    });
    let err = call_function(&mut ctx, &f, Value::Undefined, vec![]).unwrap_err();
    assert_eq!(err.kind(), Some(EvaluationErrorKind::NotAllowed));
    assert!(err.to_string().contains("function secret is not allowed"));
  }
}
