use eval_jsx::evaluate;
use eval_jsx::Context;
use eval_jsx::EvaluateOptions;
use eval_jsx::EvaluationErrorKind;
use eval_jsx::Value;
use pretty_assertions::assert_eq;
use serde_json::json;

fn run(src: &str) -> Context {
  evaluate(src, EvaluateOptions::default().with_builtins()).unwrap()
}

fn json_var(ctx: &Context, name: &str) -> serde_json::Value {
  ctx
    .resolve_identifier(name)
    .map(|v| v.value)
    .unwrap_or(Value::Undefined)
    .to_json()
}

#[test]
fn derived_classes_call_super_and_override_methods() {
  let ctx = run(
    "class Animal {
       legs = 4;
       constructor(name) { this.name = name; }
       speak() { return this.name + ' makes a sound'; }
       describe() { return this.name + ' has ' + this.legs + ' legs'; }
     }
     class Bird extends Animal {
       legs = 2;
       constructor(name) { super(name); this.flies = true; }
       speak() { return super.speak() + ' (tweet)'; }
     }
     const b = new Bird('Tweety');
     const result = [b.speak(), b.describe(), b.flies, b instanceof Animal, b instanceof Bird];",
  );
  assert_eq!(
    json_var(&ctx, "result"),
    json!([
      "Tweety makes a sound (tweet)",
      "Tweety has 2 legs",
      true,
      true,
      true
    ])
  );
}

#[test]
fn accessors_and_statics() {
  let ctx = run(
    "class Temp {
       static unit = 'C';
       static #count = 0;
       #celsius = 0;
       static create(c) { Temp.#count++; const t = new Temp(); t.celsius = c; return t; }
       static get count() { return Temp.#count; }
       get celsius() { return this.#celsius; }
       set celsius(v) { this.#celsius = v; }
       get fahrenheit() { return this.celsius * 9 / 5 + 32; }
     }
     class Sub extends Temp {}
     const t = Temp.create(100);
     Temp.create(0);
     const result = [t.fahrenheit, Temp.count, Temp.unit, Sub.unit, Object.keys(t)];",
  );
  assert_eq!(json_var(&ctx, "result"), json!([212, 2, "C", "C", []]));
}

#[test]
fn instances_expose_fields_but_not_methods() {
  let ctx = run(
    "class P { x = 1; y = this.x + 1; m() {} }
     const p = new P();
     const result = [Object.keys(p), JSON.stringify(p), typeof p.m, 'm' in p];",
  );
  assert_eq!(
    json_var(&ctx, "result"),
    json!([["x", "y"], "{\"x\":1,\"y\":2}", "function", true])
  );
}

#[test]
fn implicit_constructors_forward_arguments() {
  let ctx = run(
    "class A { constructor(v) { this.v = v; } }
     class B extends A { w = this.v * 2; }
     const b = new B(21);
     const result = [b.v, b.w];",
  );
  assert_eq!(json_var(&ctx, "result"), json!([21, 42]));
}

#[test]
fn classes_need_new() {
  let err = evaluate("class A {} A();", EvaluateOptions::default()).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::NotCallable));
}

#[test]
fn only_classes_can_be_extended() {
  let err = evaluate("function F() {} class A extends F {}", EvaluateOptions::default()).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::Type));
}

#[test]
fn plain_functions_construct_objects() {
  let ctx = run(
    "function Point(x) { this.x = x; }
     const p = new Point(3);
     const result = p.x;",
  );
  assert_eq!(json_var(&ctx, "result"), json!(3));
}
