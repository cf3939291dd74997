use crate::class::ClassDescriptor;
use crate::context::Context;
use crate::error::EvalResult;
use crate::map::PropertyMap;
use crate::node::JsxElement;
use crate::node::JsxFragment;
use crate::node::JsxNode;
use crate::num::number_to_string;
use crate::scope::Scope;
use parse_jsx::ast::ArrowFunction;
use parse_jsx::ast::Function as FunctionNode;
use serde::Serialize;
use serde::Serializer;
use std::cell::Ref;
use std::cell::RefCell;
use std::cell::RefMut;
use std::fmt;
use std::rc::Rc;
use std::rc::Weak;

/// A value produced by evaluation. Compound variants are shared references, so cloning a
/// `Value` aliases rather than copies.
#[derive(Clone)]
pub enum Value {
  Undefined,
  Null,
  Bool(bool),
  Number(f64),
  String(Rc<str>),
  Array(Array),
  Object(Object),
  Function(Function),
  Component(Component),
  Element(Rc<JsxElement>),
  Fragment(Rc<JsxFragment>),
}

impl Value {
  pub fn string(s: impl AsRef<str>) -> Value {
    Value::String(Rc::from(s.as_ref()))
  }

  pub fn is_nullish(&self) -> bool {
    matches!(self, Value::Undefined | Value::Null)
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_function(&self) -> Option<&Function> {
    match self {
      Value::Function(f) => Some(f),
      _ => None,
    }
  }

  /// Converts to JSON the way `JSON.stringify` would: functions and `undefined` vanish from
  /// objects and become `null` inside arrays.
  pub fn to_json(&self) -> serde_json::Value {
    self.to_json_inner(0).unwrap_or(serde_json::Value::Null)
  }

  fn to_json_inner(&self, depth: usize) -> Option<serde_json::Value> {
    use serde_json::Value as Json;
    // Shared references can form cycles.
    if depth > 64 {
      return Some(Json::Null);
    }
    Some(match self {
      Value::Undefined | Value::Function(_) => return None,
      Value::Null => Json::Null,
      Value::Bool(b) => Json::Bool(*b),
      // Integral values serialize as JSON integers, as `JSON.stringify` prints them.
      Value::Number(n) if n.fract() == 0.0 && n.abs() < 9e15 => Json::from(*n as i64),
      Value::Number(n) => serde_json::Number::from_f64(*n)
        .map(Json::Number)
        .unwrap_or(Json::Null),
      Value::String(s) => Json::String(s.to_string()),
      Value::Array(a) => Json::Array(
        a.borrow()
          .iter()
          .map(|v| v.to_json_inner(depth + 1).unwrap_or(Json::Null))
          .collect(),
      ),
      Value::Object(o) => {
        let mut map = serde_json::Map::new();
        for (key, prop) in o.borrow().properties.iter() {
          if let Property::Data {
            value,
            enumerable: true,
          } = prop
          {
            if let Some(v) = value.to_json_inner(depth + 1) {
              map.insert(key.to_string(), v);
            }
          }
        }
        Json::Object(map)
      }
      Value::Component(c) => Json::String(c.name().to_string()),
      Value::Element(e) => serde_json::to_value(e.as_ref()).unwrap_or(Json::Null),
      Value::Fragment(f) => serde_json::to_value(f.as_ref()).unwrap_or(Json::Null),
    })
  }

  pub fn from_json(json: serde_json::Value) -> Value {
    use serde_json::Value as Json;
    match json {
      Json::Null => Value::Null,
      Json::Bool(b) => Value::Bool(b),
      Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
      Json::String(s) => Value::string(s),
      Json::Array(items) => Value::Array(Array::new(items.into_iter().map(Value::from_json).collect())),
      Json::Object(map) => Value::Object(Object::from_values(
        map
          .into_iter()
          .map(|(k, v)| (k, Value::from_json(v)))
          .collect(),
      )),
    }
  }
}

/// Primitives compare by value and references by identity, like `===` without the NaN rule.
impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
      (Value::Bool(a), Value::Bool(b)) => a == b,
      (Value::Number(a), Value::Number(b)) => a == b,
      (Value::String(a), Value::String(b)) => a == b,
      (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
      (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
      (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
      (Value::Component(a), Value::Component(b)) => a.ptr_eq(b),
      (Value::Element(a), Value::Element(b)) => Rc::ptr_eq(a, b),
      (Value::Fragment(a), Value::Fragment(b)) => Rc::ptr_eq(a, b),
      _ => false,
    }
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Undefined => write!(f, "undefined"),
      Value::Null => write!(f, "null"),
      Value::Bool(b) => write!(f, "{}", b),
      Value::Number(n) => write!(f, "{}", number_to_string(*n)),
      Value::String(s) => write!(f, "{:?}", s),
      Value::Array(a) => write!(f, "Array(len = {})", a.len()),
      Value::Object(o) => f
        .debug_set()
        .entries(o.borrow().properties.keys())
        .finish(),
      Value::Function(func) => write!(f, "{:?}", func),
      Value::Component(c) => write!(f, "Component({})", c.name()),
      Value::Element(e) => write!(f, "Element({:?})", e.component),
      Value::Fragment(_) => write!(f, "Fragment"),
    }
  }
}

impl Serialize for Value {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.to_json().serialize(serializer)
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

impl From<f64> for Value {
  fn from(n: f64) -> Self {
    Value::Number(n)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::string(s)
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::String(Rc::from(s))
  }
}

impl From<Rc<str>> for Value {
  fn from(s: Rc<str>) -> Self {
    Value::String(s)
  }
}

impl From<Array> for Value {
  fn from(a: Array) -> Self {
    Value::Array(a)
  }
}

impl From<Object> for Value {
  fn from(o: Object) -> Self {
    Value::Object(o)
  }
}

impl From<Function> for Value {
  fn from(f: Function) -> Self {
    Value::Function(f)
  }
}

impl From<Component> for Value {
  fn from(c: Component) -> Self {
    Value::Component(c)
  }
}

#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
  pub fn new(items: Vec<Value>) -> Array {
    Array(Rc::new(RefCell::new(items)))
  }

  pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
    self.0.borrow()
  }

  pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
    self.0.borrow_mut()
  }

  pub fn len(&self) -> usize {
    self.0.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn get(&self, index: usize) -> Value {
    self.0.borrow().get(index).cloned().unwrap_or(Value::Undefined)
  }

  pub fn set(&self, index: usize, value: Value) {
    let mut items = self.0.borrow_mut();
    if index >= items.len() {
      items.resize(index + 1, Value::Undefined);
    };
    items[index] = value;
  }

  pub fn push(&self, value: Value) {
    self.0.borrow_mut().push(value);
  }

  pub fn to_vec(&self) -> Vec<Value> {
    self.0.borrow().clone()
  }

  pub fn ptr_eq(&self, other: &Array) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl From<Vec<Value>> for Array {
  fn from(items: Vec<Value>) -> Self {
    Array::new(items)
  }
}

#[derive(Clone)]
pub enum Property {
  Data {
    value: Value,
    enumerable: bool,
  },
  Accessor {
    get: Option<Function>,
    set: Option<Function>,
    enumerable: bool,
  },
}

impl Property {
  pub fn data(value: Value) -> Property {
    Property::Data {
      value,
      enumerable: true,
    }
  }

  pub fn hidden(value: Value) -> Property {
    Property::Data {
      value,
      enumerable: false,
    }
  }

  pub fn is_enumerable(&self) -> bool {
    match self {
      Property::Data { enumerable, .. } | Property::Accessor { enumerable, .. } => *enumerable,
    }
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ObjectKind {
  #[default]
  Ordinary,
  /// Created by an `Error` constructor; carries `name` and `message`.
  Error,
}

#[derive(Default)]
pub struct ObjectData {
  pub properties: PropertyMap<Property>,
  /// Set on class instances; methods and accessors are found through it.
  pub class: Option<Rc<ClassDescriptor>>,
  pub kind: ObjectKind,
}

#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
  pub fn new() -> Object {
    Object::default()
  }

  pub fn from_values(values: PropertyMap<Value>) -> Object {
    let properties = values
      .into_iter()
      .map(|(k, v)| (k, Property::data(v)))
      .collect();
    Object(Rc::new(RefCell::new(ObjectData {
      properties,
      ..ObjectData::default()
    })))
  }

  pub fn with_class(class: Rc<ClassDescriptor>) -> Object {
    Object(Rc::new(RefCell::new(ObjectData {
      class: Some(class),
      ..ObjectData::default()
    })))
  }

  pub fn with_kind(kind: ObjectKind) -> Object {
    Object(Rc::new(RefCell::new(ObjectData {
      kind,
      ..ObjectData::default()
    })))
  }

  pub fn borrow(&self) -> Ref<'_, ObjectData> {
    self.0.borrow()
  }

  pub fn borrow_mut(&self) -> RefMut<'_, ObjectData> {
    self.0.borrow_mut()
  }

  pub fn get_own(&self, key: &str) -> Option<Property> {
    self.0.borrow().properties.get(key).cloned()
  }

  /// Value of an own data property, skipping accessors.
  pub fn get_data(&self, key: &str) -> Option<Value> {
    match self.0.borrow().properties.get(key) {
      Some(Property::Data { value, .. }) => Some(value.clone()),
      _ => None,
    }
  }

  /// Writes a data property, keeping the enumerability of an existing one.
  pub fn set_data(&self, key: &str, value: Value) {
    let mut data = self.0.borrow_mut();
    match data.properties.get_mut(key) {
      Some(Property::Data { value: slot, .. }) => *slot = value,
      _ => {
        data.properties.insert(key, Property::data(value));
      }
    }
  }

  pub fn define(&self, key: &str, prop: Property) {
    self.0.borrow_mut().properties.insert(key, prop);
  }

  pub fn remove(&self, key: &str) -> Option<Property> {
    self.0.borrow_mut().properties.remove(key)
  }

  pub fn has_own(&self, key: &str) -> bool {
    self.0.borrow().properties.contains_key(key)
  }

  pub fn own_enumerable_keys(&self) -> Vec<Rc<str>> {
    self
      .0
      .borrow()
      .properties
      .iter()
      .filter(|(_, p)| p.is_enumerable())
      .map(|(k, _)| k.clone())
      .collect()
  }

  pub fn class(&self) -> Option<Rc<ClassDescriptor>> {
    self.0.borrow().class.clone()
  }

  pub fn kind(&self) -> ObjectKind {
    self.0.borrow().kind
  }

  pub fn ptr_eq(&self, other: &Object) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

pub type NativeFn = Rc<dyn Fn(&mut Context, Value, Vec<Value>) -> EvalResult<Value>>;

pub struct NativeFunction {
  pub call: NativeFn,
  /// Present for natives that support `new`.
  pub construct: Option<NativeFn>,
}

#[derive(Clone)]
pub enum ClosureCode {
  Function(Rc<FunctionNode>),
  Arrow(Rc<ArrowFunction>),
}

pub struct Closure {
  pub code: ClosureCode,
  /// The defining scope, captured lexically.
  pub scope: Scope,
  /// `this` captured at creation; only arrows have one.
  pub this: Option<Value>,
  /// The class a method belongs to, for `super` lookups.
  pub home: Option<Weak<ClassDescriptor>>,
}

pub struct BoundFunction {
  pub target: Function,
  pub this: Value,
  pub args: Vec<Value>,
}

pub enum FunctionKind {
  Closure(Closure),
  Class(Rc<ClassDescriptor>),
  Bound(BoundFunction),
  Native(NativeFunction),
}

pub struct FunctionData {
  pub kind: FunctionKind,
  /// Own properties, e.g. `name` and static class fields.
  pub properties: RefCell<PropertyMap<Property>>,
}

/// A callable value. Equality is identity, which is what the sandbox's allow and deny lists
/// compare against.
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
  pub fn new(kind: FunctionKind, name: &str) -> Function {
    let mut properties = PropertyMap::new();
    properties.insert("name", Property::hidden(Value::string(name)));
    Function(Rc::new(FunctionData {
      kind,
      properties: RefCell::new(properties),
    }))
  }

  pub fn native(
    name: &str,
    call: impl Fn(&mut Context, Value, Vec<Value>) -> EvalResult<Value> + 'static,
  ) -> Function {
    Function::new(
      FunctionKind::Native(NativeFunction {
        call: Rc::new(call),
        construct: None,
      }),
      name,
    )
  }

  pub fn native_constructor(
    name: &str,
    call: impl Fn(&mut Context, Value, Vec<Value>) -> EvalResult<Value> + 'static,
    construct: impl Fn(&mut Context, Value, Vec<Value>) -> EvalResult<Value> + 'static,
  ) -> Function {
    Function::new(
      FunctionKind::Native(NativeFunction {
        call: Rc::new(call),
        construct: Some(Rc::new(construct)),
      }),
      name,
    )
  }

  pub fn kind(&self) -> &FunctionKind {
    &self.0.kind
  }

  pub fn name(&self) -> Rc<str> {
    match self.get_own("name") {
      Some(Property::Data {
        value: Value::String(s),
        ..
      }) => s,
      _ => Rc::from(""),
    }
  }

  /// Closures and classes built by the evaluator, and functions bound to them.
  pub fn is_user_defined(&self) -> bool {
    match &self.0.kind {
      FunctionKind::Closure(_) | FunctionKind::Class(_) => true,
      FunctionKind::Bound(b) => b.target.is_user_defined(),
      FunctionKind::Native(_) => false,
    }
  }

  pub fn class(&self) -> Option<&Rc<ClassDescriptor>> {
    match &self.0.kind {
      FunctionKind::Class(desc) => Some(desc),
      _ => None,
    }
  }

  pub fn get_own(&self, key: &str) -> Option<Property> {
    self.0.properties.borrow().get(key).cloned()
  }

  pub fn set_data(&self, key: &str, value: Value) {
    let mut props = self.0.properties.borrow_mut();
    match props.get_mut(key) {
      Some(Property::Data { value: slot, .. }) => *slot = value,
      _ => {
        props.insert(key, Property::data(value));
      }
    }
  }

  pub fn define(&self, key: &str, prop: Property) {
    self.0.properties.borrow_mut().insert(key, prop);
  }

  pub fn has_own(&self, key: &str) -> bool {
    self.0.properties.borrow().contains_key(key)
  }

  pub fn own_enumerable_keys(&self) -> Vec<Rc<str>> {
    self
      .0
      .properties
      .borrow()
      .iter()
      .filter(|(_, p)| p.is_enumerable())
      .map(|(k, _)| k.clone())
      .collect()
  }

  pub fn ptr_eq(&self, other: &Function) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl fmt::Debug for Function {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let kind = match &self.0.kind {
      FunctionKind::Closure(_) => "Function",
      FunctionKind::Class(_) => "Class",
      FunctionKind::Bound(_) => "BoundFunction",
      FunctionKind::Native(_) => "NativeFunction",
    };
    write!(f, "[{} {}]", kind, self.name())
  }
}

/// Renders a host component given its props and already-evaluated children.
pub type RenderFn = Rc<dyn Fn(&PropertyMap<Value>, &[JsxNode]) -> Vec<JsxNode>>;

pub struct ComponentData {
  pub name: Rc<str>,
  pub render: Option<RenderFn>,
}

/// An opaque component supplied by the host through `components` or `binding`.
#[derive(Clone)]
pub struct Component(Rc<ComponentData>);

impl Component {
  pub fn new(name: &str) -> Component {
    Component(Rc::new(ComponentData {
      name: Rc::from(name),
      render: None,
    }))
  }

  pub fn with_render(
    name: &str,
    render: impl Fn(&PropertyMap<Value>, &[JsxNode]) -> Vec<JsxNode> + 'static,
  ) -> Component {
    Component(Rc::new(ComponentData {
      name: Rc::from(name),
      render: Some(Rc::new(render)),
    }))
  }

  pub fn name(&self) -> &str {
    &self.0.name
  }

  pub fn render(&self) -> Option<&RenderFn> {
    self.0.render.as_ref()
  }

  pub fn ptr_eq(&self, other: &Component) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}
