//! `Array` and its prototype. Callback methods iterate over a snapshot, so callbacks may mutate
//! the array without holding a borrow across the call.

use super::arg;
use super::method;
use super::string::relative_index;
use super::throw_error;
use crate::context::Context;
use crate::error::EvalResult;
use crate::func;
use crate::map::PropertyMap;
use crate::ops;
use crate::property;
use crate::value::Array;
use crate::value::Function;
use crate::value::Value;
use std::cmp::Ordering;

fn this_array(this: &Value, name: &str) -> EvalResult<Array> {
  match this {
    Value::Array(a) => Ok(a.clone()),
    other => Err(throw_error(
      "TypeError",
      format!(
        "Array.prototype.{} called on {}",
        name,
        ops::type_of(other)
      ),
    )),
  }
}

fn callback(args: &[Value], name: &str) -> EvalResult<Value> {
  match arg(args, 0) {
    f @ Value::Function(_) => Ok(f),
    other => Err(throw_error(
      "TypeError",
      format!("{} is not a function ({})", ops::to_js_string(&other), name),
    )),
  }
}

/// Calls `f(item, index, array)` for each element until `visit` returns `Some`.
fn each<T>(
  ctx: &mut Context,
  this: &Value,
  args: &[Value],
  name: &str,
  mut visit: impl FnMut(usize, &Value, Value) -> Option<T>,
) -> EvalResult<Option<T>> {
  let array = this_array(this, name)?;
  let f = callback(args, name)?;
  let this_arg = arg(args, 1);
  for (i, item) in array.to_vec().into_iter().enumerate() {
    let result = func::call(
      ctx,
      &f,
      this_arg.clone(),
      vec![item.clone(), Value::Number(i as f64), this.clone()],
    )?;
    if let Some(out) = visit(i, &item, result) {
      return Ok(Some(out));
    }
  }
  Ok(None)
}

fn reduce(ctx: &mut Context, this: Value, args: Vec<Value>, from_right: bool) -> EvalResult<Value> {
  let name = if from_right { "reduceRight" } else { "reduce" };
  let array = this_array(&this, name)?;
  let f = callback(&args, name)?;
  let mut indexed: Vec<(usize, Value)> = array.to_vec().into_iter().enumerate().collect();
  if from_right {
    indexed.reverse();
  }
  let mut items = indexed.into_iter();
  let mut acc = match args.get(1) {
    Some(initial) => initial.clone(),
    None => match items.next() {
      Some((_, first)) => first,
      None => {
        return Err(throw_error(
          "TypeError",
          "Reduce of empty array with no initial value",
        ))
      }
    },
  };
  for (i, item) in items {
    acc = func::call(
      ctx,
      &f,
      Value::Undefined,
      vec![acc, item, Value::Number(i as f64), this.clone()],
    )?;
  }
  Ok(acc)
}

/// Default `sort` order: `undefined` last, everything else by string form.
fn default_compare(a: &Value, b: &Value) -> Ordering {
  match (a, b) {
    (Value::Undefined, Value::Undefined) => Ordering::Equal,
    (Value::Undefined, _) => Ordering::Greater,
    (_, Value::Undefined) => Ordering::Less,
    _ => ops::to_js_string(a).cmp(&ops::to_js_string(b)),
  }
}

/// Stable merge sort whose comparator may fail.
fn merge_sort(
  items: Vec<Value>,
  cmp: &mut impl FnMut(&Value, &Value) -> EvalResult<Ordering>,
) -> EvalResult<Vec<Value>> {
  if items.len() <= 1 {
    return Ok(items);
  }
  let mut left = items;
  let right = left.split_off(left.len() / 2);
  let left = merge_sort(left, cmp)?;
  let right = merge_sort(right, cmp)?;
  let mut out = Vec::with_capacity(left.len() + right.len());
  let mut left = left.into_iter().peekable();
  let mut right = right.into_iter().peekable();
  loop {
    let take_left = match (left.peek(), right.peek()) {
      (Some(l), Some(r)) => cmp(l, r)? != Ordering::Greater,
      (Some(_), None) => true,
      (None, Some(_)) => false,
      (None, None) => break,
    };
    let next = if take_left { left.next() } else { right.next() };
    out.extend(next);
  }
  Ok(out)
}

fn flatten(items: Vec<Value>, depth: f64, out: &mut Vec<Value>) {
  for item in items {
    match item {
      Value::Array(inner) if depth >= 1.0 => flatten(inner.to_vec(), depth - 1.0, out),
      other => out.push(other),
    }
  }
}

pub(super) fn prototype() -> PropertyMap<Value> {
  let mut p = PropertyMap::new();
  method(&mut p, "push", |_, this, args| {
    let a = this_array(&this, "push")?;
    for v in args {
      a.push(v);
    }
    Ok(Value::Number(a.len() as f64))
  });
  method(&mut p, "pop", |_, this, _| {
    let a = this_array(&this, "pop")?;
    let popped = a.borrow_mut().pop();
    Ok(popped.unwrap_or(Value::Undefined))
  });
  method(&mut p, "shift", |_, this, _| {
    let a = this_array(&this, "shift")?;
    let mut items = a.borrow_mut();
    Ok(if items.is_empty() {
      Value::Undefined
    } else {
      items.remove(0)
    })
  });
  method(&mut p, "unshift", |_, this, args| {
    let a = this_array(&this, "unshift")?;
    let mut items = a.borrow_mut();
    items.splice(0..0, args);
    Ok(Value::Number(items.len() as f64))
  });
  method(&mut p, "slice", |_, this, args| {
    let items = this_array(&this, "slice")?.to_vec();
    let start = relative_index(&arg(&args, 0), items.len(), 0);
    let end = relative_index(&arg(&args, 1), items.len(), items.len());
    let slice = if start < end { items[start..end].to_vec() } else { Vec::new() };
    Ok(Value::Array(Array::new(slice)))
  });
  method(&mut p, "splice", |_, this, args| {
    let a = this_array(&this, "splice")?;
    let mut items = a.borrow_mut();
    let len = items.len();
    let start = relative_index(&arg(&args, 0), len, 0);
    let count = match args.get(1) {
      None => len - start,
      Some(v) => {
        let n = ops::to_number(v);
        if n.is_nan() {
          0
        } else {
          n.trunc().clamp(0.0, (len - start) as f64) as usize
        }
      }
    };
    let inserted = args.into_iter().skip(2);
    let removed: Vec<Value> = items.splice(start..start + count, inserted).collect();
    Ok(Value::Array(Array::new(removed)))
  });
  method(&mut p, "concat", |_, this, args| {
    let mut items = this_array(&this, "concat")?.to_vec();
    for v in args {
      match v {
        Value::Array(other) => items.extend(other.to_vec()),
        other => items.push(other),
      }
    }
    Ok(Value::Array(Array::new(items)))
  });
  method(&mut p, "join", |_, this, args| {
    let items = this_array(&this, "join")?.to_vec();
    let sep = match arg(&args, 0) {
      Value::Undefined => ",".into(),
      v => ops::to_js_string(&v),
    };
    let parts: Vec<String> = items
      .iter()
      .map(|v| match v {
        Value::Undefined | Value::Null => String::new(),
        v => ops::to_js_string(v).to_string(),
      })
      .collect();
    Ok(Value::string(parts.join(&*sep)))
  });
  method(&mut p, "toString", |_, this, _| Ok(Value::String(ops::to_js_string(&this))));
  method(&mut p, "reverse", |_, this, _| {
    this_array(&this, "reverse")?.borrow_mut().reverse();
    Ok(this)
  });
  method(&mut p, "indexOf", |_, this, args| {
    let items = this_array(&this, "indexOf")?.to_vec();
    let needle = arg(&args, 0);
    let from = relative_index(&arg(&args, 1), items.len(), 0);
    let found = items
      .iter()
      .enumerate()
      .skip(from)
      .find(|(_, v)| ops::strict_equals(v, &needle));
    Ok(Value::Number(found.map_or(-1.0, |(i, _)| i as f64)))
  });
  method(&mut p, "lastIndexOf", |_, this, args| {
    let items = this_array(&this, "lastIndexOf")?.to_vec();
    let needle = arg(&args, 0);
    let found = items
      .iter()
      .enumerate()
      .rev()
      .find(|(_, v)| ops::strict_equals(v, &needle));
    Ok(Value::Number(found.map_or(-1.0, |(i, _)| i as f64)))
  });
  method(&mut p, "includes", |_, this, args| {
    let items = this_array(&this, "includes")?.to_vec();
    let needle = arg(&args, 0);
    Ok(Value::Bool(items.iter().any(|v| ops::same_value_zero(v, &needle))))
  });
  method(&mut p, "at", |_, this, args| {
    let a = this_array(&this, "at")?;
    let i = ops::to_number(&arg(&args, 0));
    let i = if i.is_nan() { 0.0 } else { i.trunc() };
    let i = if i < 0.0 { a.len() as f64 + i } else { i };
    Ok(if i < 0.0 { Value::Undefined } else { a.get(i as usize) })
  });
  method(&mut p, "fill", |_, this, args| {
    let a = this_array(&this, "fill")?;
    let value = arg(&args, 0);
    let len = a.len();
    let start = relative_index(&arg(&args, 1), len, 0);
    let end = relative_index(&arg(&args, 2), len, len);
    for i in start..end {
      a.set(i, value.clone());
    }
    Ok(this)
  });
  method(&mut p, "forEach", |ctx, this, args| {
    each(ctx, &this, &args, "forEach", |_, _, _| None::<()>)?;
    Ok(Value::Undefined)
  });
  method(&mut p, "map", |ctx, this, args| {
    let mut out = Vec::new();
    each(ctx, &this, &args, "map", |_, _, result| {
      out.push(result);
      None::<()>
    })?;
    Ok(Value::Array(Array::new(out)))
  });
  method(&mut p, "filter", |ctx, this, args| {
    let mut out = Vec::new();
    each(ctx, &this, &args, "filter", |_, item, result| {
      if ops::truthy(&result) {
        out.push(item.clone());
      }
      None::<()>
    })?;
    Ok(Value::Array(Array::new(out)))
  });
  method(&mut p, "find", |ctx, this, args| {
    let found = each(ctx, &this, &args, "find", |_, item, result| {
      ops::truthy(&result).then(|| item.clone())
    })?;
    Ok(found.unwrap_or(Value::Undefined))
  });
  method(&mut p, "findIndex", |ctx, this, args| {
    let found = each(ctx, &this, &args, "findIndex", |i, _, result| {
      ops::truthy(&result).then_some(i)
    })?;
    Ok(Value::Number(found.map_or(-1.0, |i| i as f64)))
  });
  method(&mut p, "some", |ctx, this, args| {
    let found = each(ctx, &this, &args, "some", |_, _, result| {
      ops::truthy(&result).then_some(())
    })?;
    Ok(Value::Bool(found.is_some()))
  });
  method(&mut p, "every", |ctx, this, args| {
    let failed = each(ctx, &this, &args, "every", |_, _, result| {
      (!ops::truthy(&result)).then_some(())
    })?;
    Ok(Value::Bool(failed.is_none()))
  });
  method(&mut p, "reduce", |ctx, this, args| reduce(ctx, this, args, false));
  method(&mut p, "reduceRight", |ctx, this, args| reduce(ctx, this, args, true));
  method(&mut p, "sort", |ctx, this, args| {
    let a = this_array(&this, "sort")?;
    let sorted = match arg(&args, 0) {
      Value::Undefined => merge_sort(a.to_vec(), &mut |x: &Value, y: &Value| Ok(default_compare(x, y)))?,
      f @ Value::Function(_) => merge_sort(a.to_vec(), &mut |x: &Value, y: &Value| {
        if x.is_nullish() || y.is_nullish() {
          return Ok(default_compare(x, y));
        }
        let r = ops::to_number(&func::call(ctx, &f, Value::Undefined, vec![x.clone(), y.clone()])?);
        Ok(r.partial_cmp(&0.0).unwrap_or(Ordering::Equal))
      })?,
      _ => {
        return Err(throw_error(
          "TypeError",
          "The comparison function must be either a function or undefined",
        ))
      }
    };
    *a.borrow_mut() = sorted;
    Ok(this)
  });
  method(&mut p, "flat", |_, this, args| {
    let items = this_array(&this, "flat")?.to_vec();
    let depth = match arg(&args, 0) {
      Value::Undefined => 1.0,
      v => ops::to_number(&v),
    };
    let mut out = Vec::new();
    flatten(items, depth, &mut out);
    Ok(Value::Array(Array::new(out)))
  });
  method(&mut p, "flatMap", |ctx, this, args| {
    let mut mapped = Vec::new();
    each(ctx, &this, &args, "flatMap", |_, _, result| {
      mapped.push(result);
      None::<()>
    })?;
    let mut out = Vec::new();
    flatten(mapped, 1.0, &mut out);
    Ok(Value::Array(Array::new(out)))
  });
  method(&mut p, "keys", |_, this, _| {
    let len = this_array(&this, "keys")?.len();
    Ok(Value::Array(Array::new(
      (0..len).map(|i| Value::Number(i as f64)).collect(),
    )))
  });
  method(&mut p, "entries", |_, this, _| {
    let items = this_array(&this, "entries")?.to_vec();
    Ok(Value::Array(Array::new(
      items
        .into_iter()
        .enumerate()
        .map(|(i, v)| Value::Array(Array::new(vec![Value::Number(i as f64), v])))
        .collect(),
    )))
  });
  p
}

pub(super) fn constructor() -> Function {
  let build = |_: &mut Context, _: Value, args: Vec<Value>| -> EvalResult<Value> {
    match args.as_slice() {
      [Value::Number(n)] => {
        if n.fract() != 0.0 || *n < 0.0 || *n > u32::MAX as f64 {
          return Err(throw_error("RangeError", "Invalid array length"));
        }
        Ok(Value::Array(Array::new(vec![Value::Undefined; *n as usize])))
      }
      _ => Ok(Value::Array(Array::new(args))),
    }
  };
  Function::native_constructor("Array", build, build)
}

pub(super) fn statics() -> PropertyMap<Value> {
  let mut s = PropertyMap::new();
  method(&mut s, "isArray", |_, _, args| {
    Ok(Value::Bool(matches!(arg(&args, 0), Value::Array(_))))
  });
  method(&mut s, "of", |_, _, args| Ok(Value::Array(Array::new(args))));
  method(&mut s, "from", |ctx, _, args| {
    let source = arg(&args, 0);
    let items = match &source {
      // Array-likes such as `{ length: 3 }`.
      Value::Object(_) => {
        let len = ops::to_number(&property::get(ctx, &source, "length")?);
        let len = if len.is_nan() { 0 } else { len.max(0.0) as usize };
        let mut items = Vec::with_capacity(len);
        for i in 0..len {
          items.push(property::get(ctx, &source, &i.to_string())?);
        }
        items
      }
      other => property::iterate(ctx, other)?,
    };
    let items = match arg(&args, 1) {
      Value::Undefined => items,
      f => {
        let mut mapped = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
          mapped.push(func::call(ctx, &f, Value::Undefined, vec![item, Value::Number(i as f64)])?);
        }
        mapped
      }
    };
    Ok(Value::Array(Array::new(items)))
  });
  s
}

#[cfg(test)]
mod tests {
  use super::default_compare;
  use super::merge_sort;
  use crate::value::Value;

  #[test]
  fn merge_sort_is_stable_and_puts_undefined_last() {
    let items = vec![
      Value::Number(10.0),
      Value::Undefined,
      Value::Number(9.0),
      Value::string("10"),
    ];
    let sorted = merge_sort(items, &mut |a: &Value, b: &Value| Ok(default_compare(a, b))).unwrap();
    assert_eq!(sorted, vec![
      Value::Number(10.0),
      Value::string("10"),
      Value::Number(9.0),
      Value::Undefined,
    ]);
  }
}
