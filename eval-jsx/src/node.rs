use crate::map::PropertyMap;
use crate::value::Value;
use parse_jsx::loc::Position;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;
use std::rc::Rc;

/// What an element renders: a plain tag name or a resolved component value.
#[derive(Clone, Debug, PartialEq)]
pub enum TagRef {
  Name(Rc<str>),
  Component(Value),
}

impl TagRef {
  pub fn name(&self) -> Option<&str> {
    match self {
      TagRef::Name(name) => Some(name),
      TagRef::Component(_) => None,
    }
  }
}

impl Serialize for TagRef {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      TagRef::Name(name) => serializer.serialize_str(name),
      TagRef::Component(Value::Component(c)) => serializer.serialize_str(c.name()),
      TagRef::Component(Value::Function(f)) => serializer.serialize_str(&f.name()),
      TagRef::Component(other) => other.serialize(serializer),
    }
  }
}

#[derive(Clone, Debug)]
pub enum JsxText {
  String(Rc<str>),
  Number(f64),
}

/// One node of the evaluated tree handed to a renderer.
#[derive(Clone, Debug)]
pub enum JsxNode {
  Text(JsxText),
  Boolean(bool),
  Null,
  Undefined,
  Element(Rc<JsxElement>),
  Fragment(Rc<JsxFragment>),
}

impl JsxNode {
  pub fn text(s: &str) -> JsxNode {
    JsxNode::Text(JsxText::String(Rc::from(s)))
  }

  pub fn to_value(&self) -> Value {
    match self {
      JsxNode::Text(JsxText::String(s)) => Value::String(s.clone()),
      JsxNode::Text(JsxText::Number(n)) => Value::Number(*n),
      JsxNode::Boolean(b) => Value::Bool(*b),
      JsxNode::Null => Value::Null,
      JsxNode::Undefined => Value::Undefined,
      JsxNode::Element(e) => Value::Element(e.clone()),
      JsxNode::Fragment(f) => Value::Fragment(f.clone()),
    }
  }
}

#[derive(Clone, Debug)]
pub struct JsxElement {
  pub component: TagRef,
  pub props: PropertyMap<Value>,
  pub children: Vec<JsxNode>,
  pub loc: Option<Position>,
}

impl JsxElement {
  pub fn key(&self) -> Option<&str> {
    self.props.get("key").and_then(|k| k.as_str())
  }
}

#[derive(Clone, Debug)]
pub struct JsxFragment {
  pub props: PropertyMap<Value>,
  pub children: Vec<JsxNode>,
  pub loc: Option<Position>,
}

impl JsxFragment {
  pub fn key(&self) -> Option<&str> {
    self.props.get("key").and_then(|k| k.as_str())
  }
}

impl Serialize for JsxNode {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      JsxNode::Text(JsxText::String(s)) => serializer.serialize_str(s),
      JsxNode::Text(JsxText::Number(n)) => Value::Number(*n).serialize(serializer),
      JsxNode::Boolean(b) => serializer.serialize_bool(*b),
      JsxNode::Null | JsxNode::Undefined => serializer.serialize_unit(),
      JsxNode::Element(e) => e.serialize(serializer),
      JsxNode::Fragment(f) => f.serialize(serializer),
    }
  }
}

struct Props<'a>(&'a PropertyMap<Value>);

impl Serialize for Props<'_> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let visible = self
      .0
      .iter()
      .filter(|(_, v)| !matches!(v, Value::Undefined | Value::Function(_)));
    let mut map = serializer.serialize_map(None)?;
    for (key, value) in visible {
      map.serialize_entry(key.as_ref(), value)?;
    }
    map.end()
  }
}

impl Serialize for JsxElement {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(None)?;
    map.serialize_entry("type", "element")?;
    map.serialize_entry("component", &self.component)?;
    map.serialize_entry("props", &Props(&self.props))?;
    map.serialize_entry("children", &self.children)?;
    if let Some(loc) = &self.loc {
      map.serialize_entry("loc", loc)?;
    }
    map.end()
  }
}

impl Serialize for JsxFragment {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(None)?;
    map.serialize_entry("type", "fragment")?;
    map.serialize_entry("props", &Props(&self.props))?;
    map.serialize_entry("children", &self.children)?;
    if let Some(loc) = &self.loc {
      map.serialize_entry("loc", loc)?;
    }
    map.end()
  }
}
