//! `Object`, `Function`, `Number`, `Boolean`, and the global conversion functions.

use super::arg;
use super::method;
use super::throw_error;
use crate::context::Context;
use crate::error::EvalResult;
use crate::error::EvaluationErrorKind;
use crate::func;
use crate::map::PropertyMap;
use crate::num::number_to_radix_string;
use crate::num::number_to_string;
use crate::num::parse_float;
use crate::num::parse_int;
use crate::ops;
use crate::property;
use crate::value::Array;
use crate::value::BoundFunction;
use crate::value::Function;
use crate::value::FunctionKind;
use crate::value::Object;
use crate::value::Value;

fn has_own(target: &Value, key: &str) -> bool {
  match target {
    Value::Object(o) => o.has_own(key),
    Value::Function(f) => f.has_own(key),
    Value::Array(a) => key == "length" || ops::array_index(key).is_some_and(|i| i < a.len()),
    Value::String(s) => {
      key == "length" || ops::array_index(key).is_some_and(|i| i < s.chars().count())
    }
    _ => false,
  }
}

pub(super) fn object_prototype() -> PropertyMap<Value> {
  let mut p = PropertyMap::new();
  method(&mut p, "hasOwnProperty", |_, this, args| {
    let key = ops::to_property_key(&arg(&args, 0));
    Ok(Value::Bool(has_own(&this, &key)))
  });
  method(&mut p, "toString", |_, this, _| Ok(Value::String(ops::to_js_string(&this))));
  method(&mut p, "valueOf", |_, this, _| Ok(this));
  p
}

pub(super) fn object_constructor() -> Function {
  let build = |_: &mut Context, _: Value, args: Vec<Value>| -> EvalResult<Value> {
    Ok(match arg(&args, 0) {
      v if v.is_nullish() => Value::Object(Object::new()),
      v => v,
    })
  };
  Function::native_constructor("Object", build, build)
}

pub(super) fn object_statics() -> PropertyMap<Value> {
  let mut s = PropertyMap::new();
  method(&mut s, "keys", |_, _, args| {
    let keys = property::own_enumerable_keys(&arg(&args, 0));
    Ok(Value::Array(Array::new(keys.into_iter().map(Value::String).collect())))
  });
  method(&mut s, "values", |ctx, _, args| {
    let entries = property::own_enumerable_entries(ctx, &arg(&args, 0))?;
    Ok(Value::Array(Array::new(entries.into_iter().map(|(_, v)| v).collect())))
  });
  method(&mut s, "entries", |ctx, _, args| {
    let entries = property::own_enumerable_entries(ctx, &arg(&args, 0))?;
    Ok(Value::Array(Array::new(
      entries
        .into_iter()
        .map(|(k, v)| Value::Array(Array::new(vec![Value::String(k), v])))
        .collect(),
    )))
  });
  method(&mut s, "assign", |ctx, _, args| {
    let target = arg(&args, 0);
    if target.is_nullish() {
      return Err(throw_error(
        "TypeError",
        "Cannot convert undefined or null to object",
      ));
    }
    for source in args.iter().skip(1) {
      for (key, value) in property::own_enumerable_entries(ctx, source)? {
        property::set(ctx, &target, &key, value)?;
      }
    }
    Ok(target)
  });
  method(&mut s, "fromEntries", |ctx, _, args| {
    let object = Object::new();
    for entry in property::iterate(ctx, &arg(&args, 0))? {
      let key = property::get(ctx, &entry, "0")?;
      let value = property::get(ctx, &entry, "1")?;
      object.set_data(&ops::to_property_key(&key), value);
    }
    Ok(Value::Object(object))
  });
  method(&mut s, "hasOwn", |_, _, args| {
    let key = ops::to_property_key(&arg(&args, 1));
    Ok(Value::Bool(has_own(&arg(&args, 0), &key)))
  });
  // There is no immutability flag on objects; freezing is accepted and ignored.
  method(&mut s, "freeze", |_, _, args| Ok(arg(&args, 0)));
  s
}

pub(super) fn function_prototype() -> PropertyMap<Value> {
  let mut p = PropertyMap::new();
  method(&mut p, "call", |ctx, this, mut args| {
    let receiver = if args.is_empty() {
      Value::Undefined
    } else {
      args.remove(0)
    };
    func::call(ctx, &this, receiver, args)
  });
  method(&mut p, "apply", |ctx, this, args| {
    let list = match arg(&args, 1) {
      Value::Undefined | Value::Null => Vec::new(),
      Value::Array(a) => a.to_vec(),
      _ => {
        return Err(throw_error(
          "TypeError",
          "CreateListFromArrayLike called on non-object",
        ))
      }
    };
    func::call(ctx, &this, arg(&args, 0), list)
  });
  method(&mut p, "bind", |_, this, mut args| {
    let Value::Function(target) = this else {
      return Err(throw_error("TypeError", "Bind must be called on a function"));
    };
    let bound_this = if args.is_empty() {
      Value::Undefined
    } else {
      args.remove(0)
    };
    let name = format!("bound {}", target.name());
    Ok(Value::Function(Function::new(
      FunctionKind::Bound(BoundFunction {
        target,
        this: bound_this,
        args,
      }),
      &name,
    )))
  });
  method(&mut p, "toString", |_, this, _| Ok(Value::String(ops::to_js_string(&this))));
  p
}

/// `Function(...)` compiles code at run time, which the evaluator never does.
pub(super) fn function_constructor() -> Function {
  let reject = |ctx: &mut Context, _: Value, _: Vec<Value>| -> EvalResult<Value> {
    Err(ctx.error(
      EvaluationErrorKind::Unsupported,
      "Function constructor is not supported",
    ))
  };
  Function::native_constructor("Function", reject, reject)
}

fn this_number(this: &Value, name: &str) -> EvalResult<f64> {
  match this {
    Value::Number(n) => Ok(*n),
    other => Err(throw_error(
      "TypeError",
      format!("Number.prototype.{} requires a number, got {}", name, ops::type_of(other)),
    )),
  }
}

pub(super) fn number_prototype() -> PropertyMap<Value> {
  let mut p = PropertyMap::new();
  method(&mut p, "toString", |_, this, args| {
    let n = this_number(&this, "toString")?;
    let radix = match arg(&args, 0) {
      Value::Undefined => 10,
      v => ops::to_number(&v) as u32,
    };
    if !(2..=36).contains(&radix) {
      return Err(throw_error("RangeError", "toString() radix must be between 2 and 36"));
    }
    Ok(Value::string(if radix == 10 {
      number_to_string(n)
    } else {
      number_to_radix_string(n, radix)
    }))
  });
  method(&mut p, "toFixed", |_, this, args| {
    let n = this_number(&this, "toFixed")?;
    let digits = ops::to_number(&arg(&args, 0));
    let digits = if digits.is_nan() { 0.0 } else { digits.trunc() };
    if !(0.0..=100.0).contains(&digits) {
      return Err(throw_error("RangeError", "toFixed() digits argument must be between 0 and 100"));
    }
    if !n.is_finite() || n.abs() >= 1e21 {
      return Ok(Value::string(number_to_string(n)));
    }
    Ok(Value::string(format!("{:.*}", digits as usize, n)))
  });
  method(&mut p, "valueOf", |_, this, _| Ok(Value::Number(this_number(&this, "valueOf")?)));
  p
}

pub(super) fn number_constructor() -> Function {
  let convert = |_: &mut Context, _: Value, args: Vec<Value>| -> EvalResult<Value> {
    Ok(Value::Number(args.first().map_or(0.0, ops::to_number)))
  };
  Function::native_constructor("Number", convert, convert)
}

/// `Number.parseInt` and `Number.parseFloat` are the global functions themselves.
pub(super) fn number_statics(globals: &PropertyMap<Value>) -> PropertyMap<Value> {
  let mut s = PropertyMap::new();
  method(&mut s, "isInteger", |_, _, args| {
    Ok(Value::Bool(matches!(arg(&args, 0), Value::Number(n) if n.is_finite() && n.trunc() == n)))
  });
  method(&mut s, "isSafeInteger", |_, _, args| {
    Ok(Value::Bool(matches!(
      arg(&args, 0),
      Value::Number(n) if n.trunc() == n && n.abs() <= 9007199254740991.0
    )))
  });
  method(&mut s, "isFinite", |_, _, args| {
    Ok(Value::Bool(matches!(arg(&args, 0), Value::Number(n) if n.is_finite())))
  });
  method(&mut s, "isNaN", |_, _, args| {
    Ok(Value::Bool(matches!(arg(&args, 0), Value::Number(n) if n.is_nan())))
  });
  for name in ["parseInt", "parseFloat"] {
    if let Some(f) = globals.get(name) {
      s.insert(name, f.clone());
    }
  }
  s.insert("MAX_SAFE_INTEGER", Value::Number(9007199254740991.0));
  s.insert("MIN_SAFE_INTEGER", Value::Number(-9007199254740991.0));
  s.insert("EPSILON", Value::Number(f64::EPSILON));
  s.insert("MAX_VALUE", Value::Number(f64::MAX));
  s.insert("MIN_VALUE", Value::Number(5e-324));
  s.insert("POSITIVE_INFINITY", Value::Number(f64::INFINITY));
  s.insert("NEGATIVE_INFINITY", Value::Number(f64::NEG_INFINITY));
  s.insert("NaN", Value::Number(f64::NAN));
  s
}

pub(super) fn boolean_prototype() -> PropertyMap<Value> {
  let mut p = PropertyMap::new();
  method(&mut p, "toString", |_, this, _| Ok(Value::String(ops::to_js_string(&this))));
  method(&mut p, "valueOf", |_, this, _| Ok(this));
  p
}

pub(super) fn boolean_constructor() -> Function {
  let convert = |_: &mut Context, _: Value, args: Vec<Value>| -> EvalResult<Value> {
    Ok(Value::Bool(args.first().is_some_and(ops::truthy)))
  };
  Function::native_constructor("Boolean", convert, convert)
}

pub(super) fn global_functions() -> PropertyMap<Value> {
  let mut g = PropertyMap::new();
  method(&mut g, "parseInt", |_, _, args| {
    let s = ops::to_js_string(&arg(&args, 0));
    let radix = match arg(&args, 1) {
      Value::Undefined => None,
      v => match ops::to_number(&v) {
        r if r.is_nan() || r == 0.0 => None,
        r => Some(r.trunc() as u32),
      },
    };
    Ok(Value::Number(parse_int(&s, radix)))
  });
  method(&mut g, "parseFloat", |_, _, args| {
    Ok(Value::Number(parse_float(&ops::to_js_string(&arg(&args, 0)))))
  });
  method(&mut g, "isNaN", |_, _, args| {
    Ok(Value::Bool(ops::to_number(&arg(&args, 0)).is_nan()))
  });
  method(&mut g, "isFinite", |_, _, args| {
    Ok(Value::Bool(ops::to_number(&arg(&args, 0)).is_finite()))
  });
  g
}
