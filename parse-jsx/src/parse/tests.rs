use super::Parser;
use crate::ast::ArrowBody;
use crate::ast::ClassMember;
use crate::ast::Expression;
use crate::ast::ForHead;
use crate::ast::JsxAttributeItem;
use crate::ast::JsxAttributeName;
use crate::ast::JsxAttributeValue;
use crate::ast::JsxChild;
use crate::ast::JsxElementName;
use crate::ast::LiteralValue;
use crate::ast::MethodKind;
use crate::ast::Pattern;
use crate::ast::PatternMember;
use crate::ast::Program;
use crate::ast::Statement;
use crate::error::SyntaxErrorType;
use crate::lex::Lexer;
use crate::lex::LexMode;
use crate::loc::LineIndex;
use crate::loc::Position;
use crate::parse_with_options;
use crate::token::TT;
use crate::ParseOptions;
use serde_json::json;
use serde_json::to_string_pretty;
use serde_json::Value;
use similar::ChangeTag;
use similar::TextDiff;

fn parse_program(src: &str) -> Program {
  let mut parser = Parser::new(Lexer::new(src), LineIndex::new(src), false);
  parser.parse_top_level().unwrap()
}

fn first_expr(src: &str) -> Expression {
  match parse_program(src).body.into_iter().next() {
    Some(Statement::ExpressionStatement(stmt)) => stmt.expression,
    other => panic!("expected expression statement, got {:?}", other),
  }
}

fn assert_json_eq(actual: &Value, expected: &Value) {
  if actual == expected {
    return;
  };
  let actual = to_string_pretty(actual).unwrap();
  let expected = to_string_pretty(expected).unwrap();
  let mut msg = String::new();
  for change in TextDiff::from_lines(&expected, &actual).iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(&format!("{}{}", sign, change));
  }
  panic!("AST mismatch (-expected +actual):\n{}", msg);
}

#[test]
fn test_parser_buffer() {
  let src = "let x = /a/ / 1;";
  let mut p = Parser::new(Lexer::new(src), LineIndex::new(src), false);
  let cp = p.checkpoint();
  assert_eq!(p.peek().typ, TT::KeywordLet);
  assert_eq!(p.consume().typ, TT::KeywordLet);
  assert_eq!(p.consume().typ, TT::Identifier);
  p.restore_checkpoint(cp);
  assert_eq!(p.cursor, 0);
  // Peeking in another mode re-lexes the buffered token.
  assert_eq!(p.peek_with_mode(LexMode::SlashIsRegex).typ, TT::KeywordLet);
  assert_eq!(p.tokens.len(), 1);
}

#[test]
fn test_binary_precedence() {
  let expr = serde_json::to_value(first_expr("a + b * c;")).unwrap();
  assert_json_eq(
    &expr,
    &json!({
      "type": "BinaryExpression",
      "operator": "+",
      "left": { "type": "Identifier", "name": "a" },
      "right": {
        "type": "BinaryExpression",
        "operator": "*",
        "left": { "type": "Identifier", "name": "b" },
        "right": { "type": "Identifier", "name": "c" }
      }
    }),
  );
}

#[test]
fn test_exponent_is_right_associative() {
  let expr = serde_json::to_value(first_expr("2 ** 3 ** 2")).unwrap();
  assert_json_eq(
    &expr,
    &json!({
      "type": "BinaryExpression",
      "operator": "**",
      "left": { "type": "Literal", "value": 2.0, "raw": "2" },
      "right": {
        "type": "BinaryExpression",
        "operator": "**",
        "left": { "type": "Literal", "value": 3.0, "raw": "3" },
        "right": { "type": "Literal", "value": 2.0, "raw": "2" }
      }
    }),
  );
}

#[test]
fn test_arrow_function_and_grouping() {
  match first_expr("(a, b = 1, ...c) => a") {
    Expression::ArrowFunctionExpression(arrow) => {
      assert_eq!(arrow.params.len(), 3);
      assert!(matches!(arrow.params[1], Pattern::AssignmentPattern(_)));
      assert!(matches!(arrow.params[2], Pattern::RestElement(_)));
      assert!(matches!(arrow.body, ArrowBody::Expression(_)));
    }
    other => panic!("expected arrow function, got {:?}", other),
  };
  match first_expr("(a, b)") {
    Expression::SequenceExpression(seq) => assert_eq!(seq.expressions.len(), 2),
    other => panic!("expected sequence, got {:?}", other),
  };
  match first_expr("x => ({ y: x })") {
    Expression::ArrowFunctionExpression(arrow) => match &arrow.body {
      ArrowBody::Expression(body) => assert!(matches!(**body, Expression::ObjectExpression(_))),
      other => panic!("expected expression body, got {:?}", other),
    },
    other => panic!("expected arrow function, got {:?}", other),
  };
}

#[test]
fn test_asi() {
  let program = parse_program("let a = 1\nlet b = 2\na\n++b");
  assert_eq!(program.body.len(), 4);
  let program = parse_program("function f() { return\n1 }");
  let Statement::FunctionDeclaration(func) = &program.body[0] else {
    panic!("expected function declaration");
  };
  assert_eq!(func.body.body.len(), 2);
  assert!(matches!(&func.body.body[0], Statement::ReturnStatement(ret) if ret.argument.is_none()));
}

#[test]
fn test_regex_and_division() {
  let program = parse_program("x = /a+/g; y = a / b / c;");
  let Statement::ExpressionStatement(first) = &program.body[0] else {
    panic!("expected expression statement");
  };
  let Expression::AssignmentExpression(assign) = &first.expression else {
    panic!("expected assignment");
  };
  match assign.right.as_ref() {
    Expression::Literal(lit) => {
      let regex = lit.regex.as_ref().unwrap();
      assert_eq!(regex.pattern, "a+");
      assert_eq!(regex.flags, "g");
    }
    other => panic!("expected regex literal, got {:?}", other),
  };
  let Statement::ExpressionStatement(second) = &program.body[1] else {
    panic!("expected expression statement");
  };
  let Expression::AssignmentExpression(assign) = &second.expression else {
    panic!("expected assignment");
  };
  assert!(matches!(assign.right.as_ref(), Expression::BinaryExpression(_)));
}

#[test]
fn test_optional_chain() {
  match first_expr("a?.b.c()") {
    Expression::ChainExpression(chain) => match chain.expression.as_ref() {
      Expression::CallExpression(call) => {
        assert!(!call.optional);
        let Expression::MemberExpression(member) = call.callee.as_ref() else {
          panic!("expected member callee");
        };
        let Expression::MemberExpression(inner) = member.object.as_ref() else {
          panic!("expected member object");
        };
        assert!(inner.optional);
      }
      other => panic!("expected call, got {:?}", other),
    },
    other => panic!("expected chain, got {:?}", other),
  };
}

#[test]
fn test_template_literal() {
  match first_expr("`a${b}\\n${c}`") {
    Expression::TemplateLiteral(tpl) => {
      assert_eq!(tpl.quasis.len(), 3);
      assert_eq!(tpl.expressions.len(), 2);
      assert_eq!(tpl.quasis[0].value.cooked.as_deref(), Some("a"));
      assert_eq!(tpl.quasis[1].value.raw, "\\n");
      assert_eq!(tpl.quasis[1].value.cooked.as_deref(), Some("\n"));
      assert!(tpl.quasis[2].tail);
    }
    other => panic!("expected template, got {:?}", other),
  };
  assert!(matches!(
    first_expr("tag`x${1}`"),
    Expression::TaggedTemplateExpression(_)
  ));
}

#[test]
fn test_destructuring_declaration() {
  let program = parse_program("const { a, b: [c, , ...d], e = 1, ...f } = g;");
  let Statement::VariableDeclaration(decl) = &program.body[0] else {
    panic!("expected declaration");
  };
  let Pattern::ObjectPattern(obj) = &decl.declarations[0].id else {
    panic!("expected object pattern");
  };
  assert_eq!(obj.properties.len(), 4);
  let PatternMember::Property(b) = &obj.properties[1] else {
    panic!("expected property");
  };
  let Pattern::ArrayPattern(arr) = &b.value else {
    panic!("expected array pattern");
  };
  assert_eq!(arr.elements.len(), 3);
  assert!(arr.elements[1].is_none());
  let PatternMember::Property(e) = &obj.properties[2] else {
    panic!("expected property");
  };
  assert!(e.shorthand);
  assert!(matches!(e.value, Pattern::AssignmentPattern(_)));
  assert!(matches!(obj.properties[3], PatternMember::RestElement(_)));
}

#[test]
fn test_assignment_pattern_from_expression() {
  match first_expr("[a, b] = [b, a]") {
    Expression::AssignmentExpression(assign) => {
      assert!(matches!(assign.left.as_ref(), Pattern::ArrayPattern(_)))
    }
    other => panic!("expected assignment, got {:?}", other),
  };
  let src = "a + b = 1";
  let mut parser = Parser::new(Lexer::new(src), LineIndex::new(src), false);
  let err = parser.parse_top_level().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
}

#[test]
fn test_class() {
  let program = parse_program(
    "class A extends B { static count = 0; #secret = 1; constructor(x) { super(x); } get value() { return 1; } static make() {} }",
  );
  let Statement::ClassDeclaration(class) = &program.body[0] else {
    panic!("expected class");
  };
  assert_eq!(class.id.as_ref().unwrap().name, "A");
  assert!(class.super_class.is_some());
  let members = &class.body.body;
  assert_eq!(members.len(), 5);
  assert!(matches!(&members[0], ClassMember::PropertyDefinition(p) if p.is_static));
  assert!(matches!(&members[1], ClassMember::PropertyDefinition(p) if matches!(p.key, Expression::PrivateIdentifier(_))));
  assert!(matches!(&members[2], ClassMember::MethodDefinition(m) if m.kind == MethodKind::Constructor));
  assert!(matches!(&members[3], ClassMember::MethodDefinition(m) if m.kind == MethodKind::Get));
  assert!(matches!(&members[4], ClassMember::MethodDefinition(m) if m.is_static));
}

#[test]
fn test_for_heads() {
  let program = parse_program("for (const k in o) {} for (x of xs) {} for (let i = 0; i < 3; i++) {}");
  assert!(matches!(&program.body[0], Statement::ForInStatement(f) if matches!(f.left, ForHead::VariableDeclaration(_))));
  assert!(matches!(&program.body[1], Statement::ForOfStatement(f) if matches!(f.left, ForHead::Pattern(_))));
  assert!(matches!(&program.body[2], Statement::ForStatement(f) if f.init.is_some() && f.update.is_some()));
}

#[test]
fn test_directive_and_labels() {
  let program = parse_program("'use strict'; outer: for (;;) { break outer; }");
  assert!(
    matches!(&program.body[0], Statement::ExpressionStatement(s) if s.directive.as_deref() == Some("use strict"))
  );
  assert!(matches!(&program.body[1], Statement::LabeledStatement(l) if l.label.name == "outer"));
}

#[test]
fn test_jsx_element() {
  let expr = serde_json::to_value(first_expr(r#"<div className="x">hi {name}</div>"#)).unwrap();
  assert_json_eq(
    &expr,
    &json!({
      "type": "JSXElement",
      "openingElement": {
        "type": "JSXOpeningElement",
        "name": { "type": "JSXIdentifier", "name": "div" },
        "attributes": [{
          "type": "JSXAttribute",
          "name": { "type": "JSXIdentifier", "name": "className" },
          "value": { "type": "Literal", "value": "x", "raw": "\"x\"" }
        }],
        "selfClosing": false
      },
      "closingElement": {
        "type": "JSXClosingElement",
        "name": { "type": "JSXIdentifier", "name": "div" }
      },
      "children": [
        { "type": "JSXText", "value": "hi ", "raw": "hi " },
        {
          "type": "JSXExpressionContainer",
          "expression": { "type": "Identifier", "name": "name" }
        }
      ]
    }),
  );
}

#[test]
fn test_jsx_names_and_attributes() {
  let Expression::JsxElement(elem) =
    first_expr(r##"<ui.Card.Body data-id="1" xlink:href="#a" disabled {...rest} class="&amp;" />"##)
  else {
    panic!("expected element");
  };
  let opening = &elem.opening_element;
  assert!(opening.self_closing);
  assert!(elem.closing_element.is_none());
  match &opening.name {
    JsxElementName::MemberExpression(m) => assert_eq!(m.segments(), vec!["ui", "Card", "Body"]),
    other => panic!("expected member name, got {:?}", other),
  };
  let attrs = &opening.attributes;
  assert_eq!(attrs.len(), 5);
  let JsxAttributeItem::Attribute(data_id) = &attrs[0] else {
    panic!("expected attribute");
  };
  assert_eq!(data_id.name.to_source(), "data-id");
  let JsxAttributeItem::Attribute(href) = &attrs[1] else {
    panic!("expected attribute");
  };
  assert!(matches!(href.name, JsxAttributeName::NamespacedName(_)));
  let JsxAttributeItem::Attribute(disabled) = &attrs[2] else {
    panic!("expected attribute");
  };
  assert!(disabled.value.is_none());
  assert!(matches!(attrs[3], JsxAttributeItem::SpreadAttribute(_)));
  let JsxAttributeItem::Attribute(class) = &attrs[4] else {
    panic!("expected attribute");
  };
  assert_eq!(class.name.to_source(), "class");
  assert!(matches!(
    &class.value,
    Some(JsxAttributeValue::Literal(lit)) if lit.value == LiteralValue::String("&".to_string())
  ));
}

#[test]
fn test_jsx_children() {
  let Expression::JsxFragment(frag) = first_expr("<>a &lt; b{/* note */}{...items}<br/><>x</></>") else {
    panic!("expected fragment");
  };
  assert_eq!(frag.children.len(), 5);
  assert!(matches!(&frag.children[0], JsxChild::Text(t) if t.value == "a < b" && t.raw == "a &lt; b"));
  assert!(matches!(
    &frag.children[1],
    JsxChild::ExpressionContainer(c) if matches!(c.expression, Expression::JsxEmptyExpression(_))
  ));
  assert!(matches!(&frag.children[2], JsxChild::SpreadChild(_)));
  assert!(matches!(&frag.children[3], JsxChild::Element(_)));
  assert!(matches!(&frag.children[4], JsxChild::Fragment(_)));
}

#[test]
fn test_jsx_attribute_keyword_names_and_nested_elements() {
  let Expression::JsxElement(elem) = first_expr("<label for=\"a\" icon=<Icon /> onClick={() => go(1)}>x</label>") else {
    panic!("expected element");
  };
  let attrs = &elem.opening_element.attributes;
  assert_eq!(attrs.len(), 3);
  assert!(matches!(&attrs[1], JsxAttributeItem::Attribute(a) if matches!(a.value, Some(JsxAttributeValue::Element(_)))));
  assert!(matches!(
    &attrs[2],
    JsxAttributeItem::Attribute(a) if matches!(a.value, Some(JsxAttributeValue::ExpressionContainer(_)))
  ));
}

#[test]
fn test_jsx_closing_tag_mismatch() {
  let src = "<a></b>";
  let mut parser = Parser::new(Lexer::new(src), LineIndex::new(src), false);
  let err = parser.parse_top_level().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::JsxClosingTagMismatch);
}

#[test]
fn test_wrap_in_fragment_positions() {
  let opts = ParseOptions {
    wrap_in_fragment: true,
    locations: true,
  };
  let program = parse_with_options("<a/>text", opts).unwrap();
  assert_eq!(program.body.len(), 1);
  let Statement::ExpressionStatement(stmt) = &program.body[0] else {
    panic!("expected expression statement");
  };
  let Expression::JsxFragment(frag) = &stmt.expression else {
    panic!("expected fragment");
  };
  assert_eq!(frag.children.len(), 2);
  let JsxChild::Text(text) = &frag.children[1] else {
    panic!("expected text");
  };
  assert_eq!(text.loc.unwrap().start, Position { line: 1, column: 4 });

  let err = parse_with_options("\n<a></b>", opts).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::JsxClosingTagMismatch);
  assert_eq!(err.position, Some(Position { line: 2, column: 3 }));
}

#[test]
fn test_modules() {
  let program = parse_program(
    "import a, { b as c } from 'm'; export const x = 1; export default function () {} export { x as y }; export * from 'n';",
  );
  assert!(matches!(&program.body[0], Statement::ImportDeclaration(i) if i.specifiers.len() == 2));
  assert!(matches!(&program.body[1], Statement::ExportNamedDeclaration(e) if e.declaration.is_some()));
  assert!(matches!(&program.body[2], Statement::ExportDefaultDeclaration(_)));
  assert!(matches!(&program.body[3], Statement::ExportNamedDeclaration(e) if e.specifiers[0].exported.name == "y"));
  assert!(matches!(&program.body[4], Statement::ExportAllDeclaration(_)));
}
