use eval_jsx::builtins;
use eval_jsx::evaluate;
use eval_jsx::Context;
use eval_jsx::EvalResult;
use eval_jsx::EvaluateOptions;
use eval_jsx::EvaluationErrorKind;
use eval_jsx::Function;
use eval_jsx::Value;
use std::cell::Cell;
use std::rc::Rc;

fn builtin(path: &str) -> Function {
  builtins::resolve_path(path).unwrap()
}

fn value_of(src: &str, options: EvaluateOptions) -> EvalResult<Value> {
  let ctx: Context = evaluate(src, options)?;
  Ok(
    ctx
      .resolve_identifier("result")
      .map(|v| v.value)
      .unwrap_or(Value::Undefined),
  )
}

#[test]
fn allow_list_admits_only_listed_functions() {
  let options = EvaluateOptions {
    allowed_functions: vec![builtin("String.prototype.toUpperCase")],
    ..EvaluateOptions::default()
  };
  assert_eq!(
    value_of("const result = 'a'.toUpperCase();", options.clone()).unwrap(),
    Value::string("A")
  );
  let err = value_of("const result = 'A'.toLowerCase();", options).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::NotAllowed));
  assert!(err.to_string().contains("toLowerCase"), "{}", err);

  let options = EvaluateOptions {
    allowed_functions: vec![
      builtin("String.prototype.toUpperCase"),
      builtin("String.prototype.toLowerCase"),
    ],
    ..EvaluateOptions::default()
  };
  assert_eq!(
    value_of("const result = 'A'.toLowerCase();", options).unwrap(),
    Value::string("a")
  );
  assert_eq!(
    value_of("const result = 'A'.toLowerCase();", EvaluateOptions::default()).unwrap(),
    Value::string("a")
  );
}

#[test]
fn user_defined_functions_can_be_allowed_wholesale() {
  let src = "const up = s => s.toUpperCase(); const result = up('x');";
  let strict = EvaluateOptions {
    allowed_functions: vec![builtin("String.prototype.toUpperCase")],
    ..EvaluateOptions::default()
  };
  let err = value_of(src, strict.clone()).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::NotAllowed));

  let relaxed = EvaluateOptions {
    allow_user_defined_function: true,
    ..strict
  };
  assert_eq!(value_of(src, relaxed.clone()).unwrap(), Value::string("X"));

  // Natives still need to be listed, even when they only invoke a user callback.
  let err = value_of("const result = [1].map(x => x);", relaxed).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::NotAllowed));
}

#[test]
fn deny_list_blocks_host_functions() {
  let runs = Rc::new(Cell::new(0));
  let counter = runs.clone();
  let secret = Function::native("secret", move |_, _, _| {
    counter.set(counter.get() + 1);
    Ok(Value::Null)
  });
  let options = EvaluateOptions {
    denied_functions: vec![secret.clone(), builtin("Math.max")],
    allow_user_defined_function: true,
    ..EvaluateOptions::default()
  }
  .with_builtins()
  .bind("secret", secret);

  let err = value_of("const result = secret();", options.clone()).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::NotAllowed));
  let err = value_of("const f = secret.bind(null); const result = f();", options.clone()).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::NotAllowed));
  let err = value_of("const result = Math.max(1, 2);", options.clone()).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::NotAllowed));
  assert_eq!(
    value_of("const result = Math.min(1, 2);", options).unwrap(),
    Value::Number(1.0)
  );
  assert_eq!(runs.get(), 0);
}

#[test]
fn disabled_calls_evaluate_to_undefined() {
  let options = EvaluateOptions {
    disable_call: true,
    ..EvaluateOptions::default()
  };
  for src in [
    "const result = (() => 1)();",
    "const result = 'x'.toString();",
    "const result = new Date();",
    "const result = tag`x`;",
  ] {
    assert_eq!(value_of(src, options.clone()).unwrap(), Value::Undefined, "{}", src);
  }
}

#[test]
fn disabled_new_still_allows_calls() {
  let options = EvaluateOptions {
    disable_new: true,
    ..EvaluateOptions::default()
  };
  assert_eq!(
    value_of("class A {} const result = new A();", options.clone()).unwrap(),
    Value::Undefined
  );
  assert_eq!(
    value_of("const result = (() => 1)();", options).unwrap(),
    Value::Number(1.0)
  );
}

#[test]
fn unresolved_identifiers_are_undefined_unless_strict() {
  assert_eq!(
    value_of("const result = nothing;", EvaluateOptions::default()).unwrap(),
    Value::Undefined
  );
  let options = EvaluateOptions {
    raise_reference_error: true,
    ..EvaluateOptions::default()
  };
  let err = value_of("const result = nothing;", options).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::Reference));
  assert!(err.to_string().contains("nothing is not defined"));
}

#[test]
fn scripts_only_see_their_bindings() {
  assert_eq!(
    value_of("const result = typeof Math;", EvaluateOptions::default()).unwrap(),
    Value::string("undefined")
  );
  assert_eq!(
    value_of(
      "const result = typeof Math;",
      EvaluateOptions::default().with_builtins()
    )
    .unwrap(),
    Value::string("object")
  );
}

#[test]
fn function_constructor_is_rejected() {
  let err = value_of(
    "const result = Function('return 1')();",
    EvaluateOptions::default().with_builtins(),
  )
  .unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::Unsupported));
}
