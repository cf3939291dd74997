use eval_jsx::evaluate;
use eval_jsx::Error;
use eval_jsx::EvaluateOptions;
use eval_jsx::Value;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Evaluates `src` with the intrinsic library and returns `result` as JSON.
fn result(src: &str) -> serde_json::Value {
  let ctx = evaluate(src, EvaluateOptions::default().with_builtins()).unwrap();
  ctx
    .resolve_identifier("result")
    .map(|v| v.value)
    .unwrap_or(Value::Undefined)
    .to_json()
}

#[test]
fn array_methods() {
  assert_eq!(
    result(
      "const xs = [3, 1, 2];
       const result = [
         xs.map(x => x * 2),
         xs.filter(x => x > 1),
         xs.reduce((a, b) => a + b, 0),
         [...xs].sort(),
         [10, 9, 1].sort((a, b) => a - b),
         xs.indexOf(2),
         xs.includes(4),
         [[1], [2, [3]]].flat(),
         xs.join('-'),
         xs.slice(-2),
         Array.from({ length: 3 }, (_, i) => i),
         Array.isArray(xs),
       ];"
    ),
    json!([
      [6, 2, 4],
      [3, 2],
      6,
      [1, 2, 3],
      [1, 9, 10],
      2,
      false,
      [1, 2, [3]],
      "3-1-2",
      [1, 2],
      [0, 1, 2],
      true
    ])
  );
}

#[test]
fn splice_and_mutation() {
  assert_eq!(
    result(
      "const xs = [1, 2, 3, 4];
       const removed = xs.splice(1, 2, 'a');
       xs.push(5);
       xs.unshift(0);
       const result = [removed, xs, xs.length];"
    ),
    json!([[2, 3], [0, 1, "a", 4, 5], 5])
  );
}

#[test]
fn string_methods() {
  assert_eq!(
    result(
      "const s = '  Hello, World  ';
       const t = s.trim();
       const result = [
         t.toLowerCase(),
         t.split(', '),
         t.slice(0, 5),
         t.replace('World', 'There'),
         'a-b-c'.replaceAll('-', '+'),
         t.startsWith('Hell'),
         '7'.padStart(3, '0'),
         'ab'.repeat(2),
         t.charAt(1),
         t.length,
       ];"
    ),
    json!([
      "hello, world",
      ["Hello", "World"],
      "Hello",
      "Hello, There",
      "a+b+c",
      true,
      "007",
      "abab",
      "e",
      12
    ])
  );
}

#[test]
fn objects_and_json() {
  assert_eq!(
    result(
      "const o = Object.assign({ a: 1 }, { b: 2 });
       const result = [
         Object.keys(o),
         Object.values(o),
         Object.entries(o),
         Object.fromEntries([['x', 1]]),
         JSON.stringify({ a: [1, 'two', null], f: () => 1 }),
         JSON.parse('{\"n\": [1, 2]}').n[1],
         o.hasOwnProperty('b'),
         Object.keys({ b: 1, 1: 2, a: 3, 0: 4 }),
       ];"
    ),
    json!([
      ["a", "b"],
      [1, 2],
      [["a", 1], ["b", 2]],
      { "x": 1 },
      "{\"a\":[1,\"two\",null]}",
      2,
      true,
      ["0", "1", "b", "a"]
    ])
  );
}

#[test]
fn numbers_and_math() {
  assert_eq!(
    result(
      "const result = [
         parseInt('42px'),
         parseInt('ff', 16),
         parseFloat('3.5e1'),
         (255).toString(16),
         (3.14159).toFixed(2),
         Number('12'),
         Number.isInteger(5),
         isNaN('abc'),
         Math.max(1, 5, 3),
         Math.round(2.5),
         Math.floor(-1.5),
         String(1e21),
         0.1 + 0.2,
       ];"
    ),
    json!([42, 255, 35, "ff", "3.14", 12, true, true, 5, 3, -2, "1e+21", 0.30000000000000004])
  );
}

#[test]
fn function_methods_bind_this() {
  assert_eq!(
    result(
      "function greet(greeting, mark) { return greeting + ' ' + this.name + mark; }
       const who = { name: 'Ada' };
       const bound = greet.bind(who, 'Hi');
       const result = [greet.call(who, 'Hey', '!'), greet.apply(who, ['Yo', '?']), bound('.'), bound.name];"
    ),
    json!(["Hey Ada!", "Yo Ada?", "Hi Ada.", "bound greet"])
  );
}

#[test]
fn native_errors_are_catchable() {
  assert_eq!(
    result(
      "let result;
       try { JSON.parse('{'); } catch (e) { result = [e instanceof SyntaxError, e.name]; }"
    ),
    json!([true, "SyntaxError"])
  );
  let err = evaluate("null.x;", EvaluateOptions::default()).unwrap_err();
  // Interpreter faults are not script exceptions.
  assert!(matches!(err, Error::Evaluation(_)));
}

#[test]
fn user_errors_carry_name_and_message() {
  assert_eq!(
    result(
      "let result;
       try { throw new TypeError('bad'); }
       catch (e) { result = [e.name, e.message, e instanceof Error, String(e)]; }"
    ),
    json!(["TypeError", "bad", true, "TypeError: bad"])
  );
}
