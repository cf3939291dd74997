//! `String` and its prototype. Positions count characters, not UTF-16 units.

use super::arg;
use super::method;
use super::throw_error;
use crate::context::Context;
use crate::error::EvalResult;
use crate::func;
use crate::map::PropertyMap;
use crate::num::is_ecma_whitespace;
use crate::ops;
use crate::value::Array;
use crate::value::Function;
use crate::value::Value;

fn this_string(this: &Value) -> Vec<char> {
  ops::to_js_string(this).chars().collect()
}

/// Clamps a possibly negative relative index into `0..=len`, as `slice` does.
pub(super) fn relative_index(value: &Value, len: usize, default: usize) -> usize {
  if matches!(value, Value::Undefined) {
    return default;
  }
  let n = ops::to_number(value);
  if n.is_nan() {
    return 0;
  }
  let n = n.trunc();
  if n < 0.0 {
    (len as f64 + n).max(0.0) as usize
  } else {
    n.min(len as f64) as usize
  }
}

/// Clamps into `0..=len` without counting from the end, as `substring` does.
fn clamped_index(value: &Value, len: usize, default: usize) -> usize {
  if matches!(value, Value::Undefined) {
    return default;
  }
  let n = ops::to_number(value);
  if n.is_nan() {
    return 0;
  }
  n.trunc().clamp(0.0, len as f64) as usize
}

fn find(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
  if needle.is_empty() {
    return Some(from.min(haystack.len()));
  }
  (from..haystack.len().saturating_sub(needle.len() - 1))
    .find(|&i| haystack[i..].starts_with(needle))
}

fn rfind(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
  let last = haystack.len().checked_sub(needle.len())?;
  (0..=from.min(last)).rev().find(|&i| haystack[i..].starts_with(needle))
}

fn text(chars: &[char]) -> Value {
  Value::string(chars.iter().collect::<String>())
}

fn pad(this: Value, args: Vec<Value>, at_start: bool) -> EvalResult<Value> {
  let s = this_string(&this);
  let target = ops::to_number(&arg(&args, 0));
  let filler: Vec<char> = match arg(&args, 1) {
    Value::Undefined => vec![' '],
    v => ops::to_js_string(&v).chars().collect(),
  };
  if target.is_nan() || target <= s.len() as f64 || filler.is_empty() {
    return Ok(text(&s));
  }
  let missing = target as usize - s.len();
  let padding: Vec<char> = filler.iter().copied().cycle().take(missing).collect();
  let out = if at_start {
    [padding, s].concat()
  } else {
    [s, padding].concat()
  };
  Ok(text(&out))
}

/// Expands `$&` in a replacement template. Other `$` forms are kept literally.
fn expand_replacement(template: &str, matched: &str) -> String {
  template.replace("$&", matched)
}

fn replace(ctx: &mut Context, this: Value, args: Vec<Value>, all: bool) -> EvalResult<Value> {
  let s: String = ops::to_js_string(&this).to_string();
  let pattern = ops::to_js_string(&arg(&args, 0)).to_string();
  let replacement = arg(&args, 1);
  let mut out = String::new();
  let mut rest = s.as_str();
  let mut offset = 0usize;
  loop {
    let Some(pos) = rest.find(&pattern) else {
      break;
    };
    out.push_str(&rest[..pos]);
    let char_pos = s[..offset + pos].chars().count();
    let with = match &replacement {
      Value::Function(f) => {
        let result = func::call_function(
          ctx,
          f,
          Value::Undefined,
          vec![
            Value::string(&pattern),
            Value::Number(char_pos as f64),
            Value::string(&s),
          ],
        )?;
        ops::to_js_string(&result).to_string()
      }
      v => expand_replacement(&ops::to_js_string(v), &pattern),
    };
    out.push_str(&with);
    let step = if pattern.is_empty() {
      // An empty pattern matches before every character.
      match rest[pos..].chars().next() {
        Some(c) => {
          out.push(c);
          pos + c.len_utf8()
        }
        None => {
          rest = "";
          break;
        }
      }
    } else {
      pos + pattern.len()
    };
    offset += step;
    rest = &rest[step..];
    if !all {
      break;
    }
  }
  out.push_str(rest);
  Ok(Value::string(out))
}

pub(super) fn prototype() -> PropertyMap<Value> {
  let mut p = PropertyMap::new();
  method(&mut p, "toString", |_, this, _| Ok(Value::String(ops::to_js_string(&this))));
  method(&mut p, "valueOf", |_, this, _| Ok(Value::String(ops::to_js_string(&this))));
  method(&mut p, "charAt", |_, this, args| {
    let s = this_string(&this);
    let i = ops::to_number(&arg(&args, 0));
    let i = if i.is_nan() { 0.0 } else { i.trunc() };
    Ok(if i < 0.0 {
      Value::string("")
    } else {
      s.get(i as usize).map(|c| Value::string(c.to_string())).unwrap_or(Value::string(""))
    })
  });
  method(&mut p, "charCodeAt", |_, this, args| {
    let s = this_string(&this);
    let i = ops::to_number(&arg(&args, 0));
    let i = if i.is_nan() { 0.0 } else { i.trunc() };
    Ok(Value::Number(if i < 0.0 {
      f64::NAN
    } else {
      s.get(i as usize).map(|&c| c as u32 as f64).unwrap_or(f64::NAN)
    }))
  });
  method(&mut p, "at", |_, this, args| {
    let s = this_string(&this);
    let i = ops::to_number(&arg(&args, 0));
    let i = if i.is_nan() { 0.0 } else { i.trunc() };
    let i = if i < 0.0 { s.len() as f64 + i } else { i };
    Ok(if i < 0.0 {
      Value::Undefined
    } else {
      s.get(i as usize).map(|c| Value::string(c.to_string())).unwrap_or(Value::Undefined)
    })
  });
  method(&mut p, "indexOf", |_, this, args| {
    let s = this_string(&this);
    let needle: Vec<char> = ops::to_js_string(&arg(&args, 0)).chars().collect();
    let from = clamped_index(&arg(&args, 1), s.len(), 0);
    Ok(Value::Number(find(&s, &needle, from).map_or(-1.0, |i| i as f64)))
  });
  method(&mut p, "lastIndexOf", |_, this, args| {
    let s = this_string(&this);
    let needle: Vec<char> = ops::to_js_string(&arg(&args, 0)).chars().collect();
    let from = clamped_index(&arg(&args, 1), s.len(), s.len());
    Ok(Value::Number(rfind(&s, &needle, from).map_or(-1.0, |i| i as f64)))
  });
  method(&mut p, "includes", |_, this, args| {
    let s = this_string(&this);
    let needle: Vec<char> = ops::to_js_string(&arg(&args, 0)).chars().collect();
    let from = clamped_index(&arg(&args, 1), s.len(), 0);
    Ok(Value::Bool(find(&s, &needle, from).is_some()))
  });
  method(&mut p, "startsWith", |_, this, args| {
    let s = this_string(&this);
    let needle: Vec<char> = ops::to_js_string(&arg(&args, 0)).chars().collect();
    let from = clamped_index(&arg(&args, 1), s.len(), 0);
    Ok(Value::Bool(s[from..].starts_with(&needle)))
  });
  method(&mut p, "endsWith", |_, this, args| {
    let s = this_string(&this);
    let needle: Vec<char> = ops::to_js_string(&arg(&args, 0)).chars().collect();
    let end = clamped_index(&arg(&args, 1), s.len(), s.len());
    Ok(Value::Bool(s[..end].ends_with(&needle)))
  });
  method(&mut p, "slice", |_, this, args| {
    let s = this_string(&this);
    let start = relative_index(&arg(&args, 0), s.len(), 0);
    let end = relative_index(&arg(&args, 1), s.len(), s.len());
    Ok(text(if start < end { &s[start..end] } else { &[] }))
  });
  method(&mut p, "substring", |_, this, args| {
    let s = this_string(&this);
    let a = clamped_index(&arg(&args, 0), s.len(), 0);
    let b = clamped_index(&arg(&args, 1), s.len(), s.len());
    Ok(text(&s[a.min(b)..a.max(b)]))
  });
  method(&mut p, "toUpperCase", |_, this, _| {
    Ok(Value::string(ops::to_js_string(&this).to_uppercase()))
  });
  method(&mut p, "toLowerCase", |_, this, _| {
    Ok(Value::string(ops::to_js_string(&this).to_lowercase()))
  });
  method(&mut p, "trim", |_, this, _| {
    Ok(Value::string(ops::to_js_string(&this).trim_matches(is_ecma_whitespace)))
  });
  method(&mut p, "trimStart", |_, this, _| {
    Ok(Value::string(ops::to_js_string(&this).trim_start_matches(is_ecma_whitespace)))
  });
  method(&mut p, "trimEnd", |_, this, _| {
    Ok(Value::string(ops::to_js_string(&this).trim_end_matches(is_ecma_whitespace)))
  });
  method(&mut p, "padStart", |_, this, args| pad(this, args, true));
  method(&mut p, "padEnd", |_, this, args| pad(this, args, false));
  method(&mut p, "repeat", |_, this, args| {
    let n = ops::to_number(&arg(&args, 0));
    let n = if n.is_nan() { 0.0 } else { n.trunc() };
    if n < 0.0 || n.is_infinite() {
      return Err(throw_error("RangeError", format!("Invalid count value: {}", n)));
    }
    Ok(Value::string(ops::to_js_string(&this).repeat(n as usize)))
  });
  method(&mut p, "concat", |_, this, args| {
    let mut s = ops::to_js_string(&this).to_string();
    for a in args.iter() {
      s.push_str(&ops::to_js_string(a));
    }
    Ok(Value::string(s))
  });
  method(&mut p, "split", |_, this, args| {
    let s = ops::to_js_string(&this);
    let limit = match arg(&args, 1) {
      Value::Undefined => usize::MAX,
      v => ops::to_number(&v).max(0.0) as usize,
    };
    let parts: Vec<Value> = match arg(&args, 0) {
      Value::Undefined => vec![Value::String(s.clone())],
      sep => {
        let sep = ops::to_js_string(&sep);
        if sep.is_empty() {
          s.chars().map(|c| Value::string(c.to_string())).collect()
        } else {
          s.split(&*sep).map(Value::string).collect()
        }
      }
    };
    Ok(Value::Array(Array::new(parts.into_iter().take(limit).collect())))
  });
  method(&mut p, "replace", |ctx, this, args| replace(ctx, this, args, false));
  method(&mut p, "replaceAll", |ctx, this, args| replace(ctx, this, args, true));
  method(&mut p, "localeCompare", |_, this, args| {
    let a = ops::to_js_string(&this);
    let b = ops::to_js_string(&arg(&args, 0));
    Ok(Value::Number(match a.cmp(&b) {
      std::cmp::Ordering::Less => -1.0,
      std::cmp::Ordering::Equal => 0.0,
      std::cmp::Ordering::Greater => 1.0,
    }))
  });
  p
}

pub(super) fn constructor() -> Function {
  let convert = |_: &mut Context, _: Value, args: Vec<Value>| -> EvalResult<Value> {
    Ok(match args.first() {
      Some(v) => Value::String(ops::to_js_string(v)),
      None => Value::string(""),
    })
  };
  Function::native_constructor("String", convert, convert)
}

pub(super) fn statics() -> PropertyMap<Value> {
  let mut s = PropertyMap::new();
  method(&mut s, "fromCharCode", |_, _, args| {
    Ok(Value::string(
      args
        .iter()
        .filter_map(|v| char::from_u32(ops::to_number(v) as u32 & 0xffff))
        .collect::<String>(),
    ))
  });
  s
}

#[cfg(test)]
mod tests {
  use super::find;
  use super::relative_index;
  use super::rfind;
  use crate::value::Value;

  #[test]
  fn relative_indices_count_from_the_end() {
    assert_eq!(relative_index(&Value::Number(-2.0), 5, 0), 3);
    assert_eq!(relative_index(&Value::Number(9.0), 5, 0), 5);
    assert_eq!(relative_index(&Value::Undefined, 5, 5), 5);
  }

  #[test]
  fn searches_by_character() {
    let s: Vec<char> = "héllo héllo".chars().collect();
    let needle: Vec<char> = "llo".chars().collect();
    assert_eq!(find(&s, &needle, 0), Some(2));
    assert_eq!(find(&s, &needle, 3), Some(8));
    assert_eq!(rfind(&s, &needle, s.len()), Some(8));
    assert_eq!(find(&s, &['z'], 0), None);
  }
}
