use eval_jsx::evaluate_jsx;
use eval_jsx::parse_jsx;
use eval_jsx::Component;
use eval_jsx::Error;
use eval_jsx::EvaluateOptions;
use eval_jsx::EvaluationErrorKind;
use eval_jsx::JsxElement;
use eval_jsx::JsxNode;
use eval_jsx::JsxText;
use eval_jsx::TagRef;
use eval_jsx::Value;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::rc::Rc;

fn jsx(src: &str) -> Vec<JsxNode> {
  evaluate_jsx(src, EvaluateOptions::default().with_builtins()).unwrap()
}

fn element(node: &JsxNode) -> &Rc<JsxElement> {
  match node {
    JsxNode::Element(e) => e,
    other => panic!("expected an element, got {:?}", other),
  }
}

/// Every generated key in document order.
fn keys(nodes: &[JsxNode], out: &mut Vec<String>) {
  for node in nodes {
    match node {
      JsxNode::Element(e) => {
        out.extend(e.key().map(str::to_string));
        keys(&e.children, out);
      }
      JsxNode::Fragment(f) => {
        out.extend(f.key().map(str::to_string));
        keys(&f.children, out);
      }
      _ => {}
    }
  }
}

fn all_keys(nodes: &[JsxNode]) -> Vec<String> {
  let mut out = Vec::new();
  keys(nodes, &mut out);
  out
}

#[test]
fn evaluates_multiple_roots() {
  let nodes = evaluate_jsx(
    "<h1>Hi {name}</h1><p/>",
    EvaluateOptions::default().bind("name", "Ada"),
  )
  .unwrap();
  assert_eq!(nodes.len(), 2);
  let h1 = element(&nodes[0]);
  assert_eq!(h1.component, TagRef::Name(Rc::from("h1")));
  assert_eq!(
    serde_json::to_value(&h1.children).unwrap(),
    json!(["Hi ", "Ada"])
  );
  assert_eq!(element(&nodes[1]).component.name(), Some("p"));
}

#[test]
fn keys_follow_tree_position() {
  let nodes = jsx("<ul><li/><li><b/></li></ul><>{[1, 2]}</>");
  assert_eq!(all_keys(&nodes), vec!["1", "1-1", "1-2", "1-2-1", "2", "2-1"]);
  // Re-evaluating gives the same keys.
  assert_eq!(
    all_keys(&jsx("<ul><li/><li><b/></li></ul><>{[1, 2]}</>")),
    all_keys(&nodes)
  );
}

#[test]
fn keys_can_be_prefixed_supplied_or_disabled() {
  let options = EvaluateOptions {
    key_prefix: Some("app".into()),
    ..EvaluateOptions::default()
  };
  let nodes = evaluate_jsx("<a><b/></a>", options).unwrap();
  assert_eq!(all_keys(&nodes), vec!["app-1", "app-1-1"]);

  let nodes = jsx("<a key=\"mine\"/>");
  assert_eq!(element(&nodes[0]).key(), Some("mine"));

  let options = EvaluateOptions {
    disable_key_generation: true,
    ..EvaluateOptions::default()
  };
  let nodes = evaluate_jsx("<a><b/></a>", options).unwrap();
  assert!(all_keys(&nodes).is_empty());
  assert!(!element(&nodes[0]).props.contains_key("key"));
}

#[test]
fn attributes_and_spreads() {
  let nodes = evaluate_jsx(
    "<input disabled value={1 + 1} {...extra} label=\"x\" />",
    EvaluateOptions::default().bind("extra", Value::from_json(json!({ "id": "a", "label": "y" }))),
  )
  .unwrap();
  let input = element(&nodes[0]);
  let props: Vec<(&str, serde_json::Value)> = input
    .props
    .iter()
    .map(|(k, v)| (k.as_ref(), v.to_json()))
    .collect();
  assert_eq!(
    props,
    vec![
      ("disabled", json!(true)),
      ("value", json!(2)),
      ("id", json!("a")),
      ("label", json!("x")),
      ("key", json!("1")),
    ]
  );
}

#[test]
fn components_resolve_before_bindings() {
  let card = Component::new("Card");
  let ui = Value::from_json(json!({ "Button": "button" }));
  let options = EvaluateOptions::default()
    .component("Card", card.clone())
    .bind("Card", "not-this")
    .bind("ui", ui);
  let nodes = evaluate_jsx("<Card><ui.Button/><ui.Missing/></Card>", options).unwrap();
  let root = element(&nodes[0]);
  match &root.component {
    TagRef::Component(Value::Component(c)) => assert!(c.ptr_eq(&card)),
    other => panic!("unexpected tag {:?}", other),
  }
  assert_eq!(element(&root.children[0]).component.name(), Some("button"));
  assert_eq!(element(&root.children[1]).component.name(), Some("Missing"));
}

#[test]
fn bindings_are_ignored_when_component_search_is_disabled() {
  let options = EvaluateOptions {
    disable_search_components_by_binding: true,
    ..EvaluateOptions::default()
  }
  .bind("Card", Component::new("Card"));
  let nodes = evaluate_jsx("<Card/>", options).unwrap();
  assert_eq!(element(&nodes[0]).component.name(), Some("Card"));
}

#[test]
fn expression_children_map_to_nodes() {
  let nodes = jsx("<div>{null}{undefined}{true}{3}{'s'}{}{[<i/>, 'x']}</div>");
  let div = element(&nodes[0]);
  assert!(matches!(div.children[0], JsxNode::Null));
  assert!(matches!(div.children[1], JsxNode::Undefined));
  assert!(matches!(div.children[2], JsxNode::Boolean(true)));
  assert!(matches!(div.children[3], JsxNode::Text(JsxText::Number(n)) if n == 3.0));
  assert!(matches!(&div.children[4], JsxNode::Text(JsxText::String(s)) if &**s == "s"));
  assert!(matches!(div.children[5], JsxNode::Undefined));
  match &div.children[6] {
    JsxNode::Fragment(f) => assert_eq!(f.children.len(), 2),
    other => panic!("unexpected {:?}", other),
  }
}

#[test]
fn mapped_lists_render_elements() {
  let nodes = jsx("<ul>{['a', 'b'].map((s, i) => <li id={i}>{s.toUpperCase()}</li>)}</ul>");
  let list = match &element(&nodes[0]).children[0] {
    JsxNode::Fragment(f) => f.clone(),
    other => panic!("unexpected {:?}", other),
  };
  let texts: Vec<serde_json::Value> = list
    .children
    .iter()
    .map(|li| serde_json::to_value(&element(li).children).unwrap())
    .collect();
  assert_eq!(texts, vec![json!(["A"]), json!(["B"])]);
}

#[test]
fn objects_are_invalid_children() {
  let err = evaluate_jsx("<div>{{ a: 1 }}</div>", EvaluateOptions::default()).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::InvalidChild));
  assert!(err.to_string().starts_with("[1:"), "{}", err);
}

#[test]
fn nodes_serialize_to_the_render_contract() {
  let program = parse_jsx::parse_with_options(
    "<a href=\"/\" onClick={() => 1}>go</a>",
    parse_jsx::ParseOptions {
      wrap_in_fragment: true,
      locations: false,
    },
  )
  .unwrap();
  let nodes = evaluate_jsx(&program, EvaluateOptions::default()).unwrap();
  assert_eq!(
    serde_json::to_value(&nodes).unwrap(),
    json!([{
      "type": "element",
      "component": "a",
      "props": { "href": "/", "key": "1" },
      "children": ["go"],
    }])
  );
}

#[test]
fn a_non_fragment_program_is_rejected() {
  let program = parse_jsx::parse("<a/>; <b/>;").unwrap();
  let err = evaluate_jsx(&program, EvaluateOptions::default()).unwrap_err();
  assert_eq!(err.kind(), Some(EvaluationErrorKind::RootNotFragment));
}

#[test]
fn mismatched_tags_are_syntax_errors() {
  match evaluate_jsx("<a>\n</b>", EvaluateOptions::default()) {
    Err(Error::Syntax(_)) => {}
    other => panic!("expected a syntax error, got {:?}", other.map(|n| n.len())),
  }
}
