//! JSX elements, fragments, attributes, and children.

use crate::context::Context;
use crate::error::EvalResult;
use crate::error::EvaluationErrorKind;
use crate::expr;
use crate::map::PropertyMap;
use crate::node::JsxElement;
use crate::node::JsxFragment;
use crate::node::JsxNode;
use crate::node::JsxText;
use crate::ops;
use crate::property;
use crate::value::Value;
use parse_jsx::ast;
use parse_jsx::ast::JsxAttributeItem;
use parse_jsx::ast::JsxAttributeValue;
use parse_jsx::ast::JsxChild;
use std::rc::Rc;

/// Adds a generated `key` unless one was given or generation is disabled.
fn assign_key(ctx: &mut Context, props: &mut PropertyMap<Value>) {
  if ctx.options().disable_key_generation {
    return;
  }
  if matches!(props.get("key"), None | Some(Value::Undefined)) {
    let key = ctx.keys().generate();
    props.insert("key", Value::from(key));
  }
}

pub fn eval_element(ctx: &mut Context, el: &ast::JsxElement) -> EvalResult<Rc<JsxElement>> {
  let opening = &el.opening_element;
  let component = ctx.resolve_component(&opening.name.to_source())?;

  let mut props = PropertyMap::new();
  for item in opening.attributes.iter() {
    match item {
      JsxAttributeItem::Attribute(attr) => {
        let value = match &attr.value {
          None => Value::Bool(true),
          Some(value) => eval_attribute_value(ctx, value)?,
        };
        props.insert(attr.name.to_source(), value);
      }
      JsxAttributeItem::SpreadAttribute(spread) => {
        let source = expr::eval_expr(ctx, &spread.argument)?;
        for (key, value) in property::own_enumerable_entries(ctx, &source)? {
          props.insert(key, value);
        }
      }
    }
  }

  assign_key(ctx, &mut props);
  ctx.keys().open();
  if opening.self_closing {
    ctx.keys().close();
  }
  let children = eval_children(ctx, &el.children)?;
  if el.closing_element.is_some() {
    ctx.keys().close();
  }

  Ok(Rc::new(JsxElement {
    component,
    props,
    children,
    loc: el.loc.map(|l| l.start),
  }))
}

pub fn eval_fragment(ctx: &mut Context, frag: &ast::JsxFragment) -> EvalResult<Rc<JsxFragment>> {
  let mut props = PropertyMap::new();
  assign_key(ctx, &mut props);
  ctx.keys().open();
  let children = eval_children(ctx, &frag.children)?;
  ctx.keys().close();
  Ok(Rc::new(JsxFragment {
    props,
    children,
    loc: frag.loc.map(|l| l.start),
  }))
}

fn eval_attribute_value(ctx: &mut Context, value: &JsxAttributeValue) -> EvalResult<Value> {
  match value {
    JsxAttributeValue::Literal(lit) => expr::eval_literal(ctx, lit),
    JsxAttributeValue::ExpressionContainer(c) => expr::eval_expr(ctx, &c.expression),
    JsxAttributeValue::Element(e) => eval_element(ctx, e).map(Value::Element),
    JsxAttributeValue::Fragment(f) => eval_fragment(ctx, f).map(Value::Fragment),
  }
}

pub fn eval_children(ctx: &mut Context, children: &[JsxChild]) -> EvalResult<Vec<JsxNode>> {
  let mut nodes = Vec::with_capacity(children.len());
  for child in children.iter() {
    nodes.push(eval_child(ctx, child)?);
  }
  Ok(nodes)
}

pub fn eval_child(ctx: &mut Context, child: &JsxChild) -> EvalResult<JsxNode> {
  match child {
    JsxChild::Text(text) => Ok(JsxNode::Text(JsxText::String(Rc::from(text.value.as_str())))),
    JsxChild::Element(e) => eval_element(ctx, e).map(JsxNode::Element),
    JsxChild::Fragment(f) => eval_fragment(ctx, f).map(JsxNode::Fragment),
    JsxChild::ExpressionContainer(c) => {
      let value = expr::eval_expr(ctx, &c.expression)?;
      to_node(ctx, value).map_err(|err| err.at(c.loc))
    }
    JsxChild::SpreadChild(s) => {
      let value = expr::eval_expr(ctx, &s.expression)?;
      let items = property::iterate(ctx, &value)?;
      keyed_fragment(ctx, items).map_err(|err| err.at(s.loc))
    }
  }
}

/// Converts an evaluated child expression to a node. Arrays become a keyed fragment.
pub fn to_node(ctx: &mut Context, value: Value) -> EvalResult<JsxNode> {
  Ok(match value {
    Value::Undefined => JsxNode::Undefined,
    Value::Null => JsxNode::Null,
    Value::Bool(b) => JsxNode::Boolean(b),
    Value::Number(n) => JsxNode::Text(JsxText::Number(n)),
    Value::String(s) => JsxNode::Text(JsxText::String(s)),
    Value::Element(e) => JsxNode::Element(e),
    Value::Fragment(f) => JsxNode::Fragment(f),
    Value::Array(a) => return keyed_fragment(ctx, a.to_vec()),
    other => {
      return Err(ctx.error(
        EvaluationErrorKind::InvalidChild,
        format!(
          "{} is not a valid JSX child",
          match &other {
            Value::Object(_) => "object".to_string(),
            v => ops::to_js_string(v).to_string(),
          }
        ),
      ))
    }
  })
}

fn keyed_fragment(ctx: &mut Context, items: Vec<Value>) -> EvalResult<JsxNode> {
  let mut props = PropertyMap::new();
  assign_key(ctx, &mut props);
  let mut children = Vec::with_capacity(items.len());
  for item in items {
    children.push(to_node(ctx, item)?);
  }
  Ok(JsxNode::Fragment(Rc::new(JsxFragment {
    props,
    children,
    loc: None,
  })))
}

#[cfg(test)]
mod tests {
  use super::to_node;
  use crate::context::Context;
  use crate::error::EvaluationErrorKind;
  use crate::node::JsxNode;
  use crate::options::EvaluateOptions;
  use crate::value::Array;
  use crate::value::Object;
  use crate::value::Value;

  #[test]
  fn arrays_become_keyed_fragments() {
    let mut ctx = Context::new(EvaluateOptions::default());
    let items = Array::new(vec![Value::string("a"), Value::Number(1.0)]);
    match to_node(&mut ctx, Value::Array(items)).unwrap() {
      JsxNode::Fragment(f) => {
        assert_eq!(f.key(), Some("1"));
        assert_eq!(f.children.len(), 2);
      }
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn objects_are_not_valid_children() {
    let mut ctx = Context::new(EvaluateOptions::default());
    let err = to_node(&mut ctx, Value::Object(Object::new())).unwrap_err();
    assert_eq!(err.kind(), Some(EvaluationErrorKind::InvalidChild));
  }
}
