use super::arg;
use super::method;
use super::throw_error;
use crate::map::PropertyMap;
use crate::ops;
use crate::value::Value;
use serde::Serialize;

/// The `space` argument of `JSON.stringify`, capped at ten characters.
fn indent(space: &Value) -> String {
  match space {
    Value::Number(n) if *n >= 1.0 => " ".repeat(n.min(10.0) as usize),
    Value::String(s) => s.chars().take(10).collect(),
    _ => String::new(),
  }
}

pub(super) fn stringify(value: &Value, space: &Value) -> Result<Option<String>, serde_json::Error> {
  if matches!(value, Value::Undefined | Value::Function(_)) {
    return Ok(None);
  }
  let json = value.to_json();
  let indent = indent(space);
  if indent.is_empty() {
    return serde_json::to_string(&json).map(Some);
  }
  let mut buf = Vec::new();
  let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
  let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
  json.serialize(&mut ser)?;
  Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

pub(super) fn members() -> PropertyMap<Value> {
  let mut m = PropertyMap::new();
  method(&mut m, "stringify", |_, _, args| {
    match stringify(&arg(&args, 0), &arg(&args, 2)) {
      Ok(Some(text)) => Ok(Value::string(text)),
      Ok(None) => Ok(Value::Undefined),
      Err(err) => Err(throw_error("TypeError", err.to_string())),
    }
  });
  method(&mut m, "parse", |_, _, args| {
    let text = ops::to_js_string(&arg(&args, 0));
    let json: serde_json::Value = serde_json::from_str(&text)
      .map_err(|err| throw_error("SyntaxError", format!("Unexpected token in JSON: {}", err)))?;
    Ok(Value::from_json(json))
  });
  m
}

#[cfg(test)]
mod tests {
  use super::stringify;
  use crate::value::Value;
  use pretty_assertions::assert_eq;

  #[test]
  fn stringify_skips_undefined_members_and_indents() {
    let value = Value::from_json(serde_json::json!({ "a": 1, "b": [true, null] }));
    assert_eq!(
      stringify(&value, &Value::Undefined).unwrap().as_deref(),
      Some(r#"{"a":1,"b":[true,null]}"#)
    );
    assert_eq!(
      stringify(&value, &Value::Number(2.0)).unwrap().as_deref(),
      Some("{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}")
    );
    assert_eq!(stringify(&Value::Undefined, &Value::Undefined).unwrap(), None);
  }
}
