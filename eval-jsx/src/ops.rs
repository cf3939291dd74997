//! Type conversions and operators that need no evaluation context.

use crate::num::number_to_string;
use crate::num::string_to_number;
use crate::num::to_int32;
use crate::num::to_uint32;
use crate::value::Function;
use crate::value::FunctionKind;
use crate::value::ObjectKind;
use crate::value::Value;
use parse_jsx::ast::BinaryOperator;
use std::cmp::Ordering;
use std::rc::Rc;

pub fn type_of(value: &Value) -> &'static str {
  match value {
    Value::Undefined => "undefined",
    Value::Null => "object",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Function(_) => "function",
    Value::Array(_)
    | Value::Object(_)
    | Value::Component(_)
    | Value::Element(_)
    | Value::Fragment(_) => "object",
  }
}

pub fn truthy(value: &Value) -> bool {
  match value {
    Value::Undefined | Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => *n != 0.0 && !n.is_nan(),
    Value::String(s) => !s.is_empty(),
    _ => true,
  }
}

pub fn is_primitive(value: &Value) -> bool {
  matches!(
    value,
    Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
  )
}

/// `ToString`. Objects use their default conversions; user `toString` methods are not consulted.
pub fn to_js_string(value: &Value) -> Rc<str> {
  match value {
    Value::String(s) => s.clone(),
    other => Rc::from(to_display_string(other)),
  }
}

fn to_display_string(value: &Value) -> String {
  match value {
    Value::Undefined => "undefined".into(),
    Value::Null => "null".into(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => number_to_string(*n),
    Value::String(s) => s.to_string(),
    Value::Array(a) => a
      .borrow()
      .iter()
      .map(|v| match v {
        Value::Undefined | Value::Null => String::new(),
        // Arrays can contain themselves.
        Value::Array(inner) if inner.ptr_eq(a) => String::new(),
        v => to_display_string(v),
      })
      .collect::<Vec<_>>()
      .join(","),
    Value::Object(o) if o.kind() == ObjectKind::Error => {
      let name = o.get_data("name").map(|v| to_js_string(&v));
      let message = o.get_data("message").map(|v| to_js_string(&v));
      match (name.as_deref(), message.as_deref()) {
        (Some(n), Some(m)) if !m.is_empty() => format!("{}: {}", n, m),
        (Some(n), _) => n.to_string(),
        (None, Some(m)) => m.to_string(),
        (None, None) => "Error".into(),
      }
    }
    Value::Object(_) | Value::Element(_) | Value::Fragment(_) => "[object Object]".into(),
    Value::Function(f) => function_source(f),
    Value::Component(c) => c.name().to_string(),
  }
}

fn function_source(f: &Function) -> String {
  match f.kind() {
    FunctionKind::Class(_) => format!("class {} {{ }}", f.name()),
    _ => format!("function {}() {{ [code] }}", f.name()),
  }
}

/// Text for an uncaught `throw`.
pub fn describe_thrown(value: &Value) -> String {
  match value {
    Value::String(s) => format!("{:?}", s),
    other => to_display_string(other),
  }
}

/// `ToNumber`. Compound values go through their string form, so `[5]` is 5 and `{}` is NaN.
pub fn to_number(value: &Value) -> f64 {
  match value {
    Value::Undefined => f64::NAN,
    Value::Null => 0.0,
    Value::Bool(b) => {
      if *b {
        1.0
      } else {
        0.0
      }
    }
    Value::Number(n) => *n,
    Value::String(s) => string_to_number(s),
    Value::Function(_) | Value::Component(_) => f64::NAN,
    other => string_to_number(&to_js_string(other)),
  }
}

pub fn to_property_key(value: &Value) -> Rc<str> {
  to_js_string(value)
}

/// Converts compound values to their string form; primitives pass through.
pub fn to_primitive(value: &Value) -> Value {
  if is_primitive(value) {
    value.clone()
  } else {
    Value::String(to_js_string(value))
  }
}

pub fn strict_equals(a: &Value, b: &Value) -> bool {
  a == b
}

pub fn loose_equals(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
    (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
    (Value::Number(x), Value::String(_)) => *x == to_number(b),
    (Value::String(_), Value::Number(y)) => to_number(a) == *y,
    (Value::Bool(_), _) => loose_equals(&Value::Number(to_number(a)), b),
    (_, Value::Bool(_)) => loose_equals(a, &Value::Number(to_number(b))),
    (x, y) if is_primitive(x) != is_primitive(y) => loose_equals(&to_primitive(x), &to_primitive(y)),
    _ => strict_equals(a, b),
  }
}

/// Equality used by `includes`: like `===` except that NaN equals NaN.
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Number(x), Value::Number(y)) if x.is_nan() && y.is_nan() => true,
    _ => strict_equals(a, b),
  }
}

/// Abstract relational comparison; `None` when either side is NaN.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
  let a = to_primitive(a);
  let b = to_primitive(b);
  match (&a, &b) {
    (Value::String(x), Value::String(y)) => Some(x.as_ref().cmp(y.as_ref())),
    _ => to_number(&a).partial_cmp(&to_number(&b)),
  }
}

/// Binary operators other than `in` and `instanceof`, which need the evaluation context.
pub fn binary(op: BinaryOperator, a: &Value, b: &Value) -> Value {
  use BinaryOperator as Op;
  match op {
    Op::Add => {
      let a = to_primitive(a);
      let b = to_primitive(b);
      match (&a, &b) {
        (Value::String(_), _) | (_, Value::String(_)) => {
          let mut s = to_js_string(&a).to_string();
          s.push_str(&to_js_string(&b));
          Value::from(s)
        }
        _ => Value::Number(to_number(&a) + to_number(&b)),
      }
    }
    Op::Subtract => Value::Number(to_number(a) - to_number(b)),
    Op::Multiply => Value::Number(to_number(a) * to_number(b)),
    Op::Divide => Value::Number(to_number(a) / to_number(b)),
    Op::Remainder => Value::Number(to_number(a) % to_number(b)),
    Op::Exponent => Value::Number(exponent(to_number(a), to_number(b))),
    Op::LeftShift => Value::Number(to_int32(to_number(a)).wrapping_shl(shift_count(b)) as f64),
    Op::RightShift => Value::Number(to_int32(to_number(a)).wrapping_shr(shift_count(b)) as f64),
    Op::UnsignedRightShift => {
      Value::Number(to_uint32(to_number(a)).wrapping_shr(shift_count(b)) as f64)
    }
    Op::BitAnd => Value::Number((to_int32(to_number(a)) & to_int32(to_number(b))) as f64),
    Op::BitOr => Value::Number((to_int32(to_number(a)) | to_int32(to_number(b))) as f64),
    Op::BitXor => Value::Number((to_int32(to_number(a)) ^ to_int32(to_number(b))) as f64),
    Op::Equal => Value::Bool(loose_equals(a, b)),
    Op::NotEqual => Value::Bool(!loose_equals(a, b)),
    Op::StrictEqual => Value::Bool(strict_equals(a, b)),
    Op::StrictNotEqual => Value::Bool(!strict_equals(a, b)),
    Op::LessThan => Value::Bool(compare(a, b) == Some(Ordering::Less)),
    Op::LessThanOrEqual => Value::Bool(matches!(
      compare(a, b),
      Some(Ordering::Less | Ordering::Equal)
    )),
    Op::GreaterThan => Value::Bool(compare(a, b) == Some(Ordering::Greater)),
    Op::GreaterThanOrEqual => Value::Bool(matches!(
      compare(a, b),
      Some(Ordering::Greater | Ordering::Equal)
    )),
    // Handled by the expression evaluator.
    Op::In | Op::Instanceof => Value::Undefined,
  }
}

fn shift_count(b: &Value) -> u32 {
  to_uint32(to_number(b)) & 0x1f
}

fn exponent(base: f64, exp: f64) -> f64 {
  // JS differs from IEEE pow for these.
  if exp.is_nan() || ((base == 1.0 || base == -1.0) && exp.is_infinite()) {
    return f64::NAN;
  }
  base.powf(exp)
}

/// Index of a canonical array index key such as `"0"` or `"12"`, but not `"01"`.
pub fn array_index(key: &str) -> Option<usize> {
  if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
    return None;
  }
  if !key.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  key.parse().ok()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::value::Array;

  #[test]
  fn addition_concatenates_when_either_side_is_a_string() {
    assert_eq!(
      binary(BinaryOperator::Add, &Value::Number(1.0), &Value::string("2")),
      Value::string("12")
    );
    assert_eq!(
      binary(
        BinaryOperator::Add,
        &Value::Array(Array::new(vec![Value::Number(1.0), Value::Number(2.0)])),
        &Value::Number(3.0)
      ),
      Value::string("1,23")
    );
    assert_eq!(
      binary(BinaryOperator::Add, &Value::Bool(true), &Value::Null),
      Value::Number(1.0)
    );
  }

  #[test]
  fn loose_equality_coerces() {
    assert!(loose_equals(&Value::Null, &Value::Undefined));
    assert!(loose_equals(&Value::string("1"), &Value::Number(1.0)));
    assert!(loose_equals(&Value::Bool(true), &Value::string("1")));
    assert!(!loose_equals(&Value::Null, &Value::Number(0.0)));
    assert!(!strict_equals(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
    assert!(same_value_zero(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
  }

  #[test]
  fn bitwise_ops_use_int32() {
    assert_eq!(
      binary(BinaryOperator::BitOr, &Value::Number(7.8), &Value::Number(0.0)),
      Value::Number(7.0)
    );
    assert_eq!(
      binary(BinaryOperator::UnsignedRightShift, &Value::Number(-1.0), &Value::Number(28.0)),
      Value::Number(15.0)
    );
    assert_eq!(
      binary(BinaryOperator::LeftShift, &Value::Number(1.0), &Value::Number(33.0)),
      Value::Number(2.0)
    );
  }

  #[test]
  fn strings_compare_lexicographically() {
    assert_eq!(
      compare(&Value::string("10"), &Value::string("9")),
      Some(Ordering::Less)
    );
    assert_eq!(
      compare(&Value::string("10"), &Value::Number(9.0)),
      Some(Ordering::Greater)
    );
    assert_eq!(compare(&Value::Undefined, &Value::Number(1.0)), None);
  }

  #[test]
  fn array_index_keys() {
    assert_eq!(array_index("0"), Some(0));
    assert_eq!(array_index("42"), Some(42));
    assert_eq!(array_index("042"), None);
    assert_eq!(array_index("-1"), None);
    assert_eq!(array_index("length"), None);
  }
}
