use crate::filter::apply;
use crate::html::css_property_name;
use crate::html::escape_attribute;
use crate::html::escape_text;
use crate::html::is_valid_name;
use crate::html::is_void;
use crate::RenderOptions;
use eval_jsx::num::number_to_string;
use eval_jsx::ops;
use eval_jsx::JsxElement;
use eval_jsx::JsxFragment;
use eval_jsx::JsxNode;
use eval_jsx::JsxText;
use eval_jsx::PropertyMap;
use eval_jsx::TagRef;
use eval_jsx::Value;
use tracing::debug;

pub(crate) struct Renderer<'a> {
  pub options: &'a RenderOptions,
  pub out: String,
}

impl<'a> Renderer<'a> {
  pub fn nodes(&mut self, nodes: &[JsxNode]) {
    for node in nodes {
      self.node(node);
    }
  }

  fn node(&mut self, node: &JsxNode) {
    match node {
      JsxNode::Text(text) => self.text(text.clone()),
      // Like React, booleans and nullish children render nothing.
      JsxNode::Boolean(_) | JsxNode::Null | JsxNode::Undefined => {}
      JsxNode::Element(e) => self.element(JsxElement::clone(e)),
      JsxNode::Fragment(f) => self.fragment(JsxFragment::clone(f)),
    }
  }

  fn text(&mut self, text: JsxText) {
    let Some(text) = apply(&self.options.text_filters, text, |f, t| f.filter(t)) else {
      return;
    };
    match text {
      JsxText::String(s) => escape_text(&mut self.out, &s),
      JsxText::Number(n) => self.out.push_str(&number_to_string(n)),
    }
  }

  fn fragment(&mut self, fragment: JsxFragment) {
    let Some(fragment) = apply(&self.options.fragment_filters, fragment, |f, x| f.filter(x)) else {
      return;
    };
    self.nodes(&fragment.children);
  }

  fn element(&mut self, element: JsxElement) {
    let Some(element) = apply(&self.options.element_filters, element, |f, e| f.filter(e)) else {
      return;
    };
    match &element.component {
      TagRef::Name(tag) => self.tag(tag, &element.props, &element.children),
      TagRef::Component(Value::Component(component)) => match component.render() {
        Some(render) => {
          let rendered = render(&element.props, &element.children);
          self.nodes(&rendered);
        }
        None => self.nodes(&element.children),
      },
      // Script values used as tags have no markup of their own.
      TagRef::Component(_) => self.nodes(&element.children),
    }
  }

  fn tag(&mut self, tag: &str, props: &PropertyMap<Value>, children: &[JsxNode]) {
    if self.options.disable_unknown_html_element
      && self
        .options
        .unknown_element
        .is_unknown(&tag.to_ascii_lowercase())
    {
      debug!(tag, "dropping unknown element");
      return;
    }
    if !is_valid_name(tag) {
      debug!(tag, "rendering children of an invalid tag name");
      self.nodes(children);
      return;
    }
    self.out.push('<');
    self.out.push_str(tag);
    for (name, value) in props.iter() {
      self.attribute(name, value);
    }
    self.out.push('>');
    if is_void(tag) {
      return;
    }
    self.nodes(children);
    self.out.push_str("</");
    self.out.push_str(tag);
    self.out.push('>');
  }

  fn attribute(&mut self, name: &str, value: &Value) {
    let name = match name {
      "key" | "children" => return,
      "className" => "class",
      "htmlFor" => "for",
      name => name,
    };
    if !is_valid_name(name) {
      return;
    }
    let text = match value {
      Value::Undefined | Value::Null | Value::Bool(false) | Value::Function(_) => return,
      Value::Bool(true) => {
        self.out.push(' ');
        self.out.push_str(name);
        return;
      }
      Value::Object(_) if name == "style" => style_text(value),
      Value::String(_) | Value::Number(_) | Value::Array(_) => ops::to_js_string(value).to_string(),
      Value::Object(_) | Value::Component(_) | Value::Element(_) | Value::Fragment(_) => return,
    };
    self.out.push(' ');
    self.out.push_str(name);
    self.out.push_str("=\"");
    escape_attribute(&mut self.out, &text);
    self.out.push('"');
  }
}

/// `{ fontSize: 12, color: "red" }` becomes `font-size:12;color:red`.
fn style_text(style: &Value) -> String {
  let Value::Object(o) = style else {
    return String::new();
  };
  o.own_enumerable_keys()
    .into_iter()
    .filter_map(|key| {
      let value = o.get_data(&key)?;
      match value {
        Value::String(_) | Value::Number(_) => Some(format!(
          "{}:{}",
          css_property_name(&key),
          ops::to_js_string(&value)
        )),
        _ => None,
      }
    })
    .collect::<Vec<_>>()
    .join(";")
}
