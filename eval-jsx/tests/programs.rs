use eval_jsx::evaluate;
use eval_jsx::Context;
use eval_jsx::Error;
use eval_jsx::EvaluateOptions;
use eval_jsx::EvaluationErrorKind;
use eval_jsx::Value;
use pretty_assertions::assert_eq;
use serde_json::json;

fn run(src: &str) -> Context {
  evaluate(src, EvaluateOptions::default().with_builtins()).unwrap()
}

fn var(ctx: &Context, name: &str) -> Value {
  ctx
    .resolve_identifier(name)
    .map(|v| v.value)
    .unwrap_or(Value::Undefined)
}

fn json_var(ctx: &Context, name: &str) -> serde_json::Value {
  var(ctx, name).to_json()
}

#[test]
fn block_bindings_shadow_and_restore() {
  let ctx = run(
    "let i = 0;
     { let i = 10; i++; }
     let seen = [];
     while (i < 3) { let i2 = i * 10; seen.push(i2); i++; }",
  );
  assert_eq!(var(&ctx, "i"), Value::Number(3.0));
  assert_eq!(json_var(&ctx, "seen"), json!([0, 10, 20]));
  assert!(ctx.resolve_identifier("i2").is_none());
}

#[test]
fn frames_are_popped_after_a_program() {
  let ctx = run(
    "function f() { { try { throw 1 } catch (e) { return e } } }
     for (let i = 0; i < 2; i++) { f(); }",
  );
  // System frame plus the binding frame.
  assert_eq!(ctx.depth(), 2);
}

#[test]
fn const_reassignment_is_ignored() {
  let ctx = run("const a = 1; a = 2; a += 5;");
  assert_eq!(var(&ctx, "a"), Value::Number(1.0));
}

#[test]
fn nested_destructuring_collects_rests() {
  let ctx = run("const {b, c: {d, ...e}, ...f} = {b: 2, c: {d: 3, e: 4}, f: 5};");
  assert_eq!(var(&ctx, "b"), Value::Number(2.0));
  assert_eq!(var(&ctx, "d"), Value::Number(3.0));
  assert_eq!(json_var(&ctx, "e"), json!({"e": 4}));
  assert_eq!(json_var(&ctx, "f"), json!({"f": 5}));
}

#[test]
fn array_destructuring_applies_defaults_and_rest() {
  let ctx = run(
    "const [a, , b = 7, ...rest] = [1, 2, undefined, 4, 5];
     let x, y;
     [x, y] = [y, x];
     function g({ n = 1 } = {}, ...more) { return n + more.length; }
     const r = g(undefined, 'a', 'b');",
  );
  assert_eq!(var(&ctx, "a"), Value::Number(1.0));
  assert_eq!(var(&ctx, "b"), Value::Number(7.0));
  assert_eq!(json_var(&ctx, "rest"), json!([4, 5]));
  assert_eq!(var(&ctx, "r"), Value::Number(3.0));
}

#[test]
fn switch_falls_through_until_break() {
  let ctx = run(
    "const log = [];
     function a() { log.push('a'); }
     function b() { log.push('b'); }
     function c() { log.push('c'); }
     switch (1) { case 1: a(); case 2: b(); break; case 3: c(); }
     switch ('z') { case 'x': log.push('x'); default: log.push('d'); case 'y': log.push('y'); }",
  );
  assert_eq!(json_var(&ctx, "log"), json!(["a", "b", "d", "y"]));
}

#[test]
fn labeled_continue_skips_only_the_inner_body() {
  let ctx = run(
    "const log = [];
     outer: for (let i = 0; i < 3; i++) {
       for (let j = 0; j < 3; j++) {
         if (j === 1) continue outer;
         log.push(i + ':' + j);
       }
       log.push('unreachable');
     }
     inner: while (true) { do { break inner; } while (true); }",
  );
  assert_eq!(json_var(&ctx, "log"), json!(["0:0", "1:0", "2:0"]));
}

#[test]
fn loops_call_their_bodies_the_expected_number_of_times() {
  let ctx = run(
    "let calls = { forLoop: 0, whileLoop: 0, doWhile: 0 };
     for (let i = 0; i < 20; i++) { if (i === 7) continue; calls.forLoop++; }
     let n = 0;
     while (n < 10) { n++; if (n > 6) break; calls.whileLoop++; }
     let m = 0;
     do { calls.doWhile++; m++; } while (m < 5);",
  );
  assert_eq!(
    json_var(&ctx, "calls"),
    json!({"forLoop": 19, "whileLoop": 6, "doWhile": 5})
  );
}

#[test]
fn for_in_and_for_of_visit_in_order() {
  let ctx = run(
    "const keys = [];
     for (const k in { b: 1, a: 2, c: 3 }) keys.push(k);
     const items = [];
     for (const [k, v] of Object.entries({ x: 1, y: 2 })) items.push(k + v);
     for (const ch of 'hi') items.push(ch);",
  );
  assert_eq!(json_var(&ctx, "keys"), json!(["b", "a", "c"]));
  assert_eq!(json_var(&ctx, "items"), json!(["x1", "y2", "h", "i"]));
}

#[test]
fn try_catch_finally_runs_in_order() {
  let ctx = run(
    "const log = [];
     function f() {
       try { log.push('try'); throw new Error('boom'); }
       catch ({ message }) { log.push('catch:' + message); return 1; }
       finally { log.push('finally'); }
     }
     function g() { try { return 1; } finally { return 2; } }
     const r = f();
     const s = g();",
  );
  assert_eq!(
    json_var(&ctx, "log"),
    json!(["try", "catch:boom", "finally"])
  );
  assert_eq!(var(&ctx, "r"), Value::Number(1.0));
  assert_eq!(var(&ctx, "s"), Value::Number(2.0));
}

#[test]
fn thrown_values_escape_unwrapped() {
  let err = evaluate("throw { code: 7 };", EvaluateOptions::default()).unwrap_err();
  match err {
    Error::Thrown(value) => assert_eq!(value.to_json(), json!({"code": 7})),
    other => panic!("expected a thrown value, got {:?}", other),
  }
}

#[test]
fn closures_capture_their_defining_scope() {
  let ctx = run(
    "function counter() { let n = 0; return { inc: () => ++n, get: () => n }; }
     const c = counter();
     c.inc(); c.inc();
     const total = c.get();
     const obj = { v: 5, f() { return [1].map(() => this.v)[0]; } };
     const arrowThis = obj.f();",
  );
  assert_eq!(var(&ctx, "total"), Value::Number(2.0));
  assert_eq!(var(&ctx, "arrowThis"), Value::Number(5.0));
}

#[test]
fn plain_calls_pass_on_the_callers_this() {
  let ctx = run(
    "const o = {
       m() { function f() { return this; } return f() === this; },
       n() { const g = function() { return this; }; return g() === o; },
     };
     const declared = o.m();
     const expression = o.n();",
  );
  assert_eq!(var(&ctx, "declared"), Value::Bool(true));
  assert_eq!(var(&ctx, "expression"), Value::Bool(true));
}

#[test]
fn exports_record_declarations_and_specifiers() {
  let ctx = run(
    "export default function () { return 1; }
     export const a = 1, { b } = { b: 2 };
     function c() {}
     let i = 0;
     export { c, i as renamed };
     i++;",
  );
  let keys: Vec<&str> = ctx.exports().keys().map(|k| k.as_ref()).collect();
  assert_eq!(keys, vec!["default", "a", "b", "c", "renamed"]);
  assert_eq!(ctx.exports().get("renamed"), Some(&Value::Number(0.0)));
  assert_eq!(var(&ctx, "i"), Value::Number(1.0));
  let Some(Value::Function(f)) = ctx.exports().get("default") else {
    panic!("default export is not a function");
  };
  assert_eq!(&*f.name(), "default");
}

#[test]
fn exporting_an_undeclared_name_fails() {
  let err = evaluate("export { a };", EvaluateOptions::default()).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::Export));
  assert!(err.to_string().contains("Export 'a' is not defined"));
}

#[test]
fn optional_chaining_does_not_evaluate_the_rest() {
  let options = EvaluateOptions {
    raise_reference_error: true,
    ..EvaluateOptions::default()
  };
  let ctx = evaluate(
    "let a; const r = a?.b.c; const s = a?.b(missing); const t = a?.[missing];",
    options,
  )
  .unwrap();
  assert_eq!(var(&ctx, "r"), Value::Undefined);
  assert_eq!(var(&ctx, "s"), Value::Undefined);
  assert_eq!(var(&ctx, "t"), Value::Undefined);
}

#[test]
fn undeclared_assignment_creates_a_global_unless_strict() {
  let ctx = run("function f() { leaked = 3; } f();");
  assert_eq!(var(&ctx, "leaked"), Value::Number(3.0));

  let options = EvaluateOptions {
    raise_reference_error: true,
    ..EvaluateOptions::default()
  };
  let err = evaluate("leaked = 3;", options).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::Reference));
}

#[test]
fn stray_control_signals_are_logic_errors() {
  for src in ["return;", "break;", "continue;"] {
    let err = evaluate(src, EvaluateOptions::default());
    assert!(matches!(err, Err(Error::Logic(_)) | Err(Error::Syntax(_))), "{}", src);
  }
}

#[test]
fn unsupported_syntax_is_reported_with_a_location() {
  let err = evaluate("\nasync function f() {}", EvaluateOptions::default()).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::Unsupported));
  assert!(err.to_string().starts_with("[2:"), "{}", err);
}
