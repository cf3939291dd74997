use parse_jsx::ast::Expression;
use parse_jsx::ast::JsxChild;
use parse_jsx::ast::Program;
use parse_jsx::ast::Statement;
use parse_jsx::parse_with_options;
use parse_jsx::ParseOptions;
use serde_json::json;

fn parse_without_locations(src: &str) -> Program {
  parse_with_options(
    src,
    ParseOptions {
      wrap_in_fragment: false,
      locations: false,
    },
  )
  .unwrap()
}

#[test]
fn serialized_ast_deserializes_to_the_same_tree() {
  let src = r#"
    const { a, b: [c = 1, ...d] } = obj;
    class A extends B { static x = 1; get y() { return this.#z; } #z = 2; }
    for (const k in o) { if (k?.length > 1) continue; }
    label: while (true) { break label; }
    const view = <Card.Body title={`t${a}`} {...rest} disabled><>text &amp; more</>{/* none */}</Card.Body>;
    export default view;
  "#;
  let program = parse_without_locations(src);
  let json = serde_json::to_string(&program).unwrap();
  let back: Program = serde_json::from_str(&json).unwrap();
  assert_eq!(back, program);
}

#[test]
fn locations_serialize_as_line_and_column() {
  let program = parse_with_options("a;\n  b;", ParseOptions::default()).unwrap();
  let value = serde_json::to_value(&program.body[1]).unwrap();
  assert_eq!(
    value["loc"],
    json!({ "start": { "line": 2, "column": 2 }, "end": { "line": 2, "column": 4 } })
  );
}

#[test]
fn accepts_estree_json_from_another_parser() {
  // Extra fields such as `start`, `end`, and `range` are ignored.
  let program: Program = serde_json::from_value(json!({
    "type": "Program",
    "start": 0,
    "end": 22,
    "sourceType": "module",
    "body": [{
      "type": "ExpressionStatement",
      "start": 0,
      "end": 22,
      "expression": {
        "type": "JSXElement",
        "openingElement": {
          "type": "JSXOpeningElement",
          "name": { "type": "JSXIdentifier", "name": "p" },
          "attributes": [{
            "type": "JSXAttribute",
            "name": { "type": "JSXIdentifier", "name": "hidden" },
            "value": null
          }],
          "selfClosing": false
        },
        "closingElement": {
          "type": "JSXClosingElement",
          "name": { "type": "JSXIdentifier", "name": "p" }
        },
        "children": [
          { "type": "JSXText", "value": "n = ", "raw": "n = " },
          {
            "type": "JSXExpressionContainer",
            "expression": {
              "type": "BinaryExpression",
              "operator": "+",
              "left": { "type": "Literal", "value": 1, "raw": "1" },
              "right": { "type": "Identifier", "name": "x" }
            }
          }
        ]
      }
    }]
  }))
  .unwrap();

  assert_eq!(program, parse_without_locations("<p hidden>n = {1 + x}</p>"));
  let Statement::ExpressionStatement(stmt) = &program.body[0] else {
    panic!("expected expression statement");
  };
  let Expression::JsxElement(elem) = &stmt.expression else {
    panic!("expected element");
  };
  assert!(matches!(&elem.children[0], JsxChild::Text(t) if t.value == "n = "));
}
