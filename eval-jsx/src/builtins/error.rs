use super::arg;
use crate::error::Error;
use crate::ops;
use crate::value::Function;
use crate::value::Object;
use crate::value::ObjectKind;
use crate::value::Property;
use crate::value::Value;

const ERROR_NAMES: [&str; 5] = ["Error", "TypeError", "RangeError", "SyntaxError", "ReferenceError"];

/// An error instance with non-enumerable `name` and `message`.
pub fn new_error(name: &str, message: &str) -> Value {
  let err = Object::with_kind(ObjectKind::Error);
  err.define("name", Property::hidden(Value::string(name)));
  err.define("message", Property::hidden(Value::string(message)));
  Value::Object(err)
}

/// A script-catchable failure raised by a native, e.g. `throw_error("TypeError", "...")`.
pub fn throw_error(name: &str, message: impl AsRef<str>) -> Error {
  Error::Thrown(new_error(name, message.as_ref()))
}

fn make_error(name: &str, args: &[Value]) -> Value {
  let message = match arg(args, 0) {
    Value::Undefined => String::new(),
    v => ops::to_js_string(&v).to_string(),
  };
  new_error(name, &message)
}

pub(super) fn constructors() -> Vec<(&'static str, Function)> {
  ERROR_NAMES
    .iter()
    .map(|&name| {
      let ctor = Function::native_constructor(
        name,
        move |_, _, args| Ok(make_error(name, &args)),
        move |_, _, args| Ok(make_error(name, &args)),
      );
      (name, ctor)
    })
    .collect()
}
