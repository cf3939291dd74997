//! `console`, routed to `tracing` under the `eval_jsx::console` target.

use super::method;
use crate::map::PropertyMap;
use crate::ops;
use crate::value::Value;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

/// Joins arguments the way a console prints them: strings raw, containers as JSON.
pub(super) fn console_line(args: &[Value]) -> String {
  args
    .iter()
    .map(|v| match v {
      Value::String(s) => s.to_string(),
      Value::Array(_) | Value::Object(_) => v.to_json().to_string(),
      Value::Function(f) => format!("[Function: {}]", f.name()),
      other => ops::to_js_string(other).to_string(),
    })
    .collect::<Vec<_>>()
    .join(" ")
}

pub(super) fn members() -> PropertyMap<Value> {
  let mut m = PropertyMap::new();
  method(&mut m, "log", |_, _, args| {
    info!(target: "eval_jsx::console", "{}", console_line(&args));
    Ok(Value::Undefined)
  });
  method(&mut m, "info", |_, _, args| {
    info!(target: "eval_jsx::console", "{}", console_line(&args));
    Ok(Value::Undefined)
  });
  method(&mut m, "debug", |_, _, args| {
    debug!(target: "eval_jsx::console", "{}", console_line(&args));
    Ok(Value::Undefined)
  });
  method(&mut m, "warn", |_, _, args| {
    warn!(target: "eval_jsx::console", "{}", console_line(&args));
    Ok(Value::Undefined)
  });
  method(&mut m, "error", |_, _, args| {
    error!(target: "eval_jsx::console", "{}", console_line(&args));
    Ok(Value::Undefined)
  });
  m
}

#[cfg(test)]
mod tests {
  use super::console_line;
  use crate::value::Value;

  #[test]
  fn formats_like_a_console() {
    let args = vec![
      Value::string("n ="),
      Value::Number(1.5),
      Value::from_json(serde_json::json!({ "a": [1] })),
      Value::Undefined,
    ];
    assert_eq!(console_line(&args), r#"n = 1.5 {"a":[1]} undefined"#);
  }
}
