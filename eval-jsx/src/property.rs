//! Property access on every kind of value: own properties, class descriptor chains, and the
//! intrinsic prototype methods shared by primitives, arrays, and functions.

use crate::builtins;
use crate::builtins::Proto;
use crate::class::ClassMember;
use crate::context::Context;
use crate::error::EvalResult;
use crate::error::EvaluationErrorKind;
use crate::func;
use crate::ops;
use crate::value::Array;
use crate::value::Function;
use crate::value::Object;
use crate::value::Property;
use crate::value::Value;
use std::rc::Rc;

pub fn get(ctx: &mut Context, target: &Value, key: &str) -> EvalResult<Value> {
  match target {
    Value::Undefined | Value::Null => Err(ctx.error(
      EvaluationErrorKind::Type,
      format!(
        "Cannot read properties of {} (reading '{}')",
        ops::to_js_string(target),
        key
      ),
    )),
    Value::String(s) => {
      if key == "length" {
        return Ok(Value::Number(s.chars().count() as f64));
      }
      if let Some(i) = ops::array_index(key) {
        return Ok(
          s.chars()
            .nth(i)
            .map(|c| Value::from(c.to_string()))
            .unwrap_or(Value::Undefined),
        );
      }
      Ok(builtins::proto_get(Proto::String, key).unwrap_or(Value::Undefined))
    }
    Value::Number(_) => Ok(builtins::proto_get(Proto::Number, key).unwrap_or(Value::Undefined)),
    Value::Bool(_) => Ok(builtins::proto_get(Proto::Boolean, key).unwrap_or(Value::Undefined)),
    Value::Array(a) => {
      if key == "length" {
        return Ok(Value::Number(a.len() as f64));
      }
      if let Some(i) = ops::array_index(key) {
        return Ok(a.get(i));
      }
      Ok(builtins::proto_get(Proto::Array, key).unwrap_or(Value::Undefined))
    }
    Value::Object(o) => get_object(ctx, o, target, key),
    Value::Function(f) => get_function(ctx, f, target, key),
    Value::Component(c) => Ok(match key {
      "name" => Value::string(c.name()),
      _ => Value::Undefined,
    }),
    Value::Element(_) | Value::Fragment(_) => Ok(Value::Undefined),
  }
}

fn get_object(ctx: &mut Context, o: &Object, receiver: &Value, key: &str) -> EvalResult<Value> {
  match o.get_own(key) {
    Some(Property::Data { value, .. }) => return Ok(value),
    Some(Property::Accessor { get, .. }) => return call_getter(ctx, get, receiver),
    None => {}
  }
  if let Some(class) = o.class() {
    match class.find_instance(key) {
      Some(ClassMember::Method(m)) => return Ok(Value::Function(m)),
      Some(ClassMember::Accessor(acc)) => return call_getter(ctx, acc.get, receiver),
      None => {}
    }
  }
  Ok(builtins::proto_get(Proto::Object, key).unwrap_or(Value::Undefined))
}

fn get_function(
  ctx: &mut Context,
  f: &Function,
  receiver: &Value,
  key: &str,
) -> EvalResult<Value> {
  // Statics are inherited along the `extends` chain.
  let mut current = Some(f.clone());
  while let Some(func) = current {
    match func.get_own(key) {
      Some(Property::Data { value, .. }) => return Ok(value),
      Some(Property::Accessor { get, .. }) => return call_getter(ctx, get, receiver),
      None => {}
    }
    let Some(class) = func.class().cloned() else {
      break;
    };
    match class.own_static(key) {
      Some(ClassMember::Method(m)) => return Ok(Value::Function(m)),
      Some(ClassMember::Accessor(acc)) => return call_getter(ctx, acc.get, receiver),
      None => {}
    }
    current = class.super_class.clone();
  }
  Ok(builtins::proto_get(Proto::Function, key).unwrap_or(Value::Undefined))
}

fn call_getter(ctx: &mut Context, get: Option<Function>, receiver: &Value) -> EvalResult<Value> {
  match get {
    Some(getter) => func::call_function(ctx, &getter, receiver.clone(), Vec::new()),
    None => Ok(Value::Undefined),
  }
}

pub fn set(ctx: &mut Context, target: &Value, key: &str, value: Value) -> EvalResult<()> {
  match target {
    Value::Undefined | Value::Null => Err(ctx.error(
      EvaluationErrorKind::Type,
      format!(
        "Cannot set properties of {} (setting '{}')",
        ops::to_js_string(target),
        key
      ),
    )),
    Value::Array(a) => {
      if let Some(i) = ops::array_index(key) {
        a.set(i, value);
      } else if key == "length" {
        set_array_length(a, &value);
      };
      Ok(())
    }
    Value::Object(o) => set_object(ctx, o, target, key, value),
    Value::Function(f) => {
      if let Some(Property::Accessor { set, .. }) = f.get_own(key) {
        return call_setter(ctx, set, target, value);
      }
      if !f.has_own(key) {
        let mut current = f.class().cloned();
        while let Some(class) = current {
          if let Some(ClassMember::Accessor(acc)) = class.own_static(key) {
            return call_setter(ctx, acc.set, target, value);
          }
          current = class.parent();
        }
      }
      f.set_data(key, value);
      Ok(())
    }
    // Writes to primitives are dropped, as in sloppy-mode JS.
    _ => Ok(()),
  }
}

fn set_object(
  ctx: &mut Context,
  o: &Object,
  receiver: &Value,
  key: &str,
  value: Value,
) -> EvalResult<()> {
  match o.get_own(key) {
    Some(Property::Accessor { set, .. }) => return call_setter(ctx, set, receiver, value),
    Some(Property::Data { .. }) => {
      o.set_data(key, value);
      return Ok(());
    }
    None => {}
  }
  if let Some(class) = o.class() {
    if let Some(ClassMember::Accessor(acc)) = class.find_instance(key) {
      return call_setter(ctx, acc.set, receiver, value);
    }
  }
  o.set_data(key, value);
  Ok(())
}

fn call_setter(
  ctx: &mut Context,
  set: Option<Function>,
  receiver: &Value,
  value: Value,
) -> EvalResult<()> {
  if let Some(setter) = set {
    func::call_function(ctx, &setter, receiver.clone(), vec![value])?;
  };
  Ok(())
}

fn set_array_length(a: &Array, value: &Value) {
  let len = ops::to_number(value);
  if len >= 0.0 && len.fract() == 0.0 {
    a.borrow_mut().resize(len as usize, Value::Undefined);
  }
}

/// The `in` operator.
pub fn has(target: &Value, key: &str) -> bool {
  match target {
    Value::Array(a) => {
      key == "length"
        || ops::array_index(key).is_some_and(|i| i < a.len())
        || builtins::proto_get(Proto::Array, key).is_some()
    }
    Value::Object(o) => {
      o.has_own(key)
        || o.class().is_some_and(|c| c.find_instance(key).is_some())
        || builtins::proto_get(Proto::Object, key).is_some()
    }
    Value::Function(f) => {
      let mut current = Some(f.clone());
      while let Some(func) = current {
        if func.has_own(key) {
          return true;
        }
        let Some(class) = func.class().cloned() else {
          break;
        };
        if class.own_static(key).is_some() {
          return true;
        }
        current = class.super_class.clone();
      }
      builtins::proto_get(Proto::Function, key).is_some()
    }
    _ => false,
  }
}

/// `key` as an array index, if it is one in canonical form (`"1"` but not `"01"`).
fn array_index(key: &str) -> Option<u32> {
  key
    .parse::<u32>()
    .ok()
    .filter(|&i| i != u32::MAX && i.to_string() == key)
}

/// Integer keys first in ascending order, then the rest in insertion order.
fn ordered(mut keys: Vec<Rc<str>>) -> Vec<Rc<str>> {
  keys.sort_by_key(|k| array_index(k).map_or((1, 0), |i| (0, i)));
  keys
}

/// Keys visited by `for-in`, `Object.keys`, and object spread.
pub fn own_enumerable_keys(target: &Value) -> Vec<Rc<str>> {
  match target {
    Value::Object(o) => ordered(o.own_enumerable_keys()),
    Value::Function(f) => ordered(f.own_enumerable_keys()),
    Value::Array(a) => (0..a.len()).map(|i| Rc::from(i.to_string())).collect(),
    Value::String(s) => (0..s.chars().count())
      .map(|i| Rc::from(i.to_string()))
      .collect(),
    _ => Vec::new(),
  }
}

/// Own enumerable key/value pairs, reading through getters.
pub fn own_enumerable_entries(ctx: &mut Context, target: &Value) -> EvalResult<Vec<(Rc<str>, Value)>> {
  let keys = own_enumerable_keys(target);
  let mut entries = Vec::with_capacity(keys.len());
  for key in keys {
    let value = get(ctx, target, &key)?;
    entries.push((key, value));
  }
  Ok(entries)
}

/// Elements produced by iterating `value`, as `for-of` and spread do.
pub fn iterate(ctx: &mut Context, value: &Value) -> EvalResult<Vec<Value>> {
  match value {
    Value::Array(a) => Ok(a.to_vec()),
    Value::String(s) => Ok(s.chars().map(|c| Value::from(c.to_string())).collect()),
    other => Err(ctx.error(
      EvaluationErrorKind::Type,
      format!("{} is not iterable", ops::to_js_string(other)),
    )),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn integer_keys_come_first_in_ascending_order() {
    let keys = ["b", "10", "a", "2", "02", "-1"].map(Rc::<str>::from).to_vec();
    let keys: Vec<String> = ordered(keys).iter().map(|k| k.to_string()).collect();
    assert_eq!(keys, ["2", "10", "b", "a", "02", "-1"]);
  }
}
