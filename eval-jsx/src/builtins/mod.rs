//! The intrinsic library: global constructors and namespaces, and the prototype methods that
//! property lookups on primitives, arrays, objects and functions fall back to.
//!
//! Intrinsics are built once per thread. Every native therefore has a stable identity within a
//! thread, which is what allow and deny lists compare.

mod array;
mod console;
mod error;
mod json;
mod math;
mod object;
mod string;

use crate::context::Context;
use crate::error::EvalResult;
use crate::map::PropertyMap;
use crate::ops;
use crate::value::Function;
use crate::value::Object;
use crate::value::ObjectKind;
use crate::value::Property;
use crate::value::Value;
use std::rc::Rc;

pub use error::new_error;
pub use error::throw_error;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Proto {
  String,
  Number,
  Boolean,
  Array,
  Object,
  Function,
}

pub(crate) struct Intrinsics {
  string_proto: PropertyMap<Value>,
  number_proto: PropertyMap<Value>,
  boolean_proto: PropertyMap<Value>,
  array_proto: PropertyMap<Value>,
  object_proto: PropertyMap<Value>,
  function_proto: PropertyMap<Value>,
  globals: PropertyMap<Value>,
  array_ctor: Function,
  object_ctor: Function,
  function_ctor: Function,
  /// Error constructors by the `name` their instances carry.
  error_ctors: Vec<(&'static str, Function)>,
}

thread_local! {
  static INTRINSICS: Rc<Intrinsics> = Rc::new(Intrinsics::new());
}

fn intrinsics() -> Rc<Intrinsics> {
  INTRINSICS.with(|i| i.clone())
}

/// Adds a native method to a method table.
pub(crate) fn method(
  table: &mut PropertyMap<Value>,
  name: &str,
  call: impl Fn(&mut Context, Value, Vec<Value>) -> EvalResult<Value> + 'static,
) {
  table.insert(name, Value::Function(Function::native(name, call)));
}

/// Argument `i`, or `undefined` when the caller passed fewer.
pub(crate) fn arg(args: &[Value], i: usize) -> Value {
  args.get(i).cloned().unwrap_or(Value::Undefined)
}

/// A plain namespace object such as `Math`, with non-enumerable members.
fn namespace(table: PropertyMap<Value>) -> Object {
  let object = Object::new();
  for (name, value) in table {
    object.define(&name, Property::hidden(value));
  }
  object
}

/// A constructor function exposing `statics` and a `prototype` object over `proto`.
fn constructor(ctor: Function, statics: PropertyMap<Value>, proto: &PropertyMap<Value>) -> Function {
  for (name, value) in statics {
    ctor.define(&name, Property::hidden(value));
  }
  let prototype = Object::new();
  for (name, value) in proto.iter() {
    prototype.define(name, Property::hidden(value.clone()));
  }
  ctor.define("prototype", Property::hidden(Value::Object(prototype)));
  ctor
}

impl Intrinsics {
  fn new() -> Intrinsics {
    let string_proto = string::prototype();
    let array_proto = array::prototype();
    let object_proto = object::object_prototype();
    let function_proto = object::function_prototype();
    let number_proto = object::number_prototype();
    let boolean_proto = object::boolean_prototype();

    let global_fns = object::global_functions();
    let string_ctor = constructor(string::constructor(), string::statics(), &string_proto);
    let number_ctor = constructor(
      object::number_constructor(),
      object::number_statics(&global_fns),
      &number_proto,
    );
    let boolean_ctor = constructor(object::boolean_constructor(), PropertyMap::new(), &boolean_proto);
    let array_ctor = constructor(array::constructor(), array::statics(), &array_proto);
    let object_ctor = constructor(object::object_constructor(), object::object_statics(), &object_proto);
    let function_ctor = constructor(object::function_constructor(), PropertyMap::new(), &function_proto);
    let error_ctors = error::constructors();

    let mut globals = PropertyMap::new();
    globals.insert("String", Value::Function(string_ctor));
    globals.insert("Number", Value::Function(number_ctor));
    globals.insert("Boolean", Value::Function(boolean_ctor));
    globals.insert("Array", Value::Function(array_ctor.clone()));
    globals.insert("Object", Value::Function(object_ctor.clone()));
    globals.insert("Function", Value::Function(function_ctor.clone()));
    for (name, ctor) in error_ctors.iter() {
      globals.insert(*name, Value::Function(ctor.clone()));
    }
    globals.insert("JSON", Value::Object(namespace(json::members())));
    globals.insert("Math", Value::Object(namespace(math::members())));
    globals.insert("console", Value::Object(namespace(console::members())));
    for (name, value) in global_fns {
      globals.insert(name, value);
    }

    Intrinsics {
      string_proto,
      number_proto,
      boolean_proto,
      array_proto,
      object_proto,
      function_proto,
      globals,
      array_ctor,
      object_ctor,
      function_ctor,
      error_ctors,
    }
  }

  fn proto(&self, proto: Proto) -> &PropertyMap<Value> {
    match proto {
      Proto::String => &self.string_proto,
      Proto::Number => &self.number_proto,
      Proto::Boolean => &self.boolean_proto,
      Proto::Array => &self.array_proto,
      Proto::Object => &self.object_proto,
      Proto::Function => &self.function_proto,
    }
  }
}

/// Looks up an intrinsic prototype method.
pub fn proto_get(proto: Proto, key: &str) -> Option<Value> {
  INTRINSICS.with(|i| i.proto(proto).get(key).cloned())
}

/// The intrinsic globals, for merging into `EvaluateOptions::binding`.
pub fn globals() -> PropertyMap<Value> {
  intrinsics()
    .globals
    .iter()
    .map(|(k, v)| (k.clone(), v.clone()))
    .collect()
}

/// Resolves a dotted path such as `Math.max` or `String.prototype.toUpperCase` to the intrinsic
/// function it names.
pub fn resolve_path(path: &str) -> Option<Function> {
  let intrinsics = intrinsics();
  let mut segments = path.split('.');
  let mut current = intrinsics.globals.get(segments.next()?)?.clone();
  for segment in segments {
    current = match &current {
      Value::Function(f) => match f.get_own(segment)? {
        Property::Data { value, .. } => value,
        Property::Accessor { .. } => return None,
      },
      Value::Object(o) => o.get_data(segment)?,
      _ => return None,
    };
  }
  match current {
    Value::Function(f) => Some(f),
    _ => None,
  }
}

/// `instanceof` against an intrinsic constructor.
pub fn native_instance_of(value: &Value, f: &Function) -> bool {
  let intrinsics = intrinsics();
  if f.ptr_eq(&intrinsics.array_ctor) {
    return matches!(value, Value::Array(_));
  }
  if f.ptr_eq(&intrinsics.object_ctor) {
    return !ops::is_primitive(value);
  }
  if f.ptr_eq(&intrinsics.function_ctor) {
    return matches!(value, Value::Function(_));
  }
  let Some((name, _)) = intrinsics.error_ctors.iter().find(|(_, c)| c.ptr_eq(f)) else {
    return false;
  };
  match value {
    Value::Object(o) if o.kind() == ObjectKind::Error => {
      *name == "Error" || o.get_data("name").as_ref().and_then(Value::as_str) == Some(*name)
    }
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::native_instance_of;
  use super::proto_get;
  use super::resolve_path;
  use super::Proto;
  use crate::value::Value;

  #[test]
  fn prototype_methods_have_stable_identity() {
    let a = proto_get(Proto::String, "toUpperCase").unwrap();
    let b = proto_get(Proto::String, "toUpperCase").unwrap();
    assert_eq!(a, b);
    let resolved = resolve_path("String.prototype.toUpperCase").unwrap();
    assert_eq!(Value::Function(resolved), a);
  }

  #[test]
  fn resolves_namespace_members() {
    assert!(resolve_path("Math.max").is_some());
    assert!(resolve_path("JSON.parse").is_some());
    assert!(resolve_path("Math.PI").is_none());
    assert!(resolve_path("Nope.nothing").is_none());
  }

  #[test]
  fn error_instances_match_their_constructors() {
    let err = super::new_error("TypeError", "bad");
    let type_error = resolve_path("TypeError").unwrap();
    let error = resolve_path("Error").unwrap();
    let range_error = resolve_path("RangeError").unwrap();
    assert!(native_instance_of(&err, &type_error));
    assert!(native_instance_of(&err, &error));
    assert!(!native_instance_of(&err, &range_error));
  }
}
