use super::Expression;
use super::Literal;
use crate::loc::SourceLocation;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct JsxIdentifier {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct JsxNamespacedName {
  pub namespace: JsxIdentifier,
  pub name: JsxIdentifier,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsxMemberObject {
  #[serde(rename = "JSXIdentifier")]
  Identifier(JsxIdentifier),
  #[serde(rename = "JSXMemberExpression")]
  MemberExpression(JsxMemberExpression),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct JsxMemberExpression {
  pub object: Box<JsxMemberObject>,
  pub property: JsxIdentifier,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

impl JsxMemberExpression {
  /// Dotted segments from the outermost object to the final property, e.g. `["a", "b", "C"]`.
  pub fn segments(&self) -> Vec<&str> {
    let mut segments = match self.object.as_ref() {
      JsxMemberObject::Identifier(id) => vec![id.name.as_str()],
      JsxMemberObject::MemberExpression(m) => m.segments(),
    };
    segments.push(&self.property.name);
    segments
  }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsxElementName {
  #[serde(rename = "JSXIdentifier")]
  Identifier(JsxIdentifier),
  #[serde(rename = "JSXMemberExpression")]
  MemberExpression(JsxMemberExpression),
  #[serde(rename = "JSXNamespacedName")]
  NamespacedName(JsxNamespacedName),
}

impl JsxElementName {
  /// Source spelling of the tag name, e.g. `div`, `a.B`, or `xs:test`.
  pub fn to_source(&self) -> String {
    match self {
      JsxElementName::Identifier(id) => id.name.clone(),
      JsxElementName::MemberExpression(m) => m.segments().join("."),
      JsxElementName::NamespacedName(n) => format!("{}:{}", n.namespace.name, n.name.name),
    }
  }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename = "JSXOpeningElement", rename_all = "camelCase")]
pub struct JsxOpeningElement {
  pub name: JsxElementName,
  pub attributes: Vec<JsxAttributeItem>,
  pub self_closing: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename = "JSXClosingElement")]
pub struct JsxClosingElement {
  pub name: JsxElementName,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxElement {
  pub opening_element: JsxOpeningElement,
  pub closing_element: Option<JsxClosingElement>,
  pub children: Vec<JsxChild>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "JSXOpeningFragment")]
pub struct JsxOpeningFragment {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "JSXClosingFragment")]
pub struct JsxClosingFragment {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxFragment {
  pub opening_fragment: JsxOpeningFragment,
  pub closing_fragment: JsxClosingFragment,
  pub children: Vec<JsxChild>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct JsxEmptyExpression {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsxAttributeItem {
  #[serde(rename = "JSXAttribute")]
  Attribute(JsxAttribute),
  #[serde(rename = "JSXSpreadAttribute")]
  SpreadAttribute(JsxSpreadAttribute),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsxAttributeName {
  #[serde(rename = "JSXIdentifier")]
  Identifier(JsxIdentifier),
  #[serde(rename = "JSXNamespacedName")]
  NamespacedName(JsxNamespacedName),
}

impl JsxAttributeName {
  pub fn to_source(&self) -> String {
    match self {
      JsxAttributeName::Identifier(id) => id.name.clone(),
      JsxAttributeName::NamespacedName(n) => format!("{}:{}", n.namespace.name, n.name.name),
    }
  }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsxAttributeValue {
  Literal(Literal),
  #[serde(rename = "JSXExpressionContainer")]
  ExpressionContainer(JsxExpressionContainer),
  #[serde(rename = "JSXElement")]
  Element(JsxElement),
  #[serde(rename = "JSXFragment")]
  Fragment(JsxFragment),
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct JsxAttribute {
  pub name: JsxAttributeName,
  /// `None` for a bare attribute such as `<input disabled />`.
  pub value: Option<JsxAttributeValue>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct JsxSpreadAttribute {
  pub argument: Expression,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct JsxExpressionContainer {
  /// `JSXEmptyExpression` for `{}` or `{/* comment */}`.
  pub expression: Expression,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct JsxSpreadChild {
  pub expression: Expression,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct JsxText {
  /// Text with HTML entities decoded.
  pub value: String,
  pub raw: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsxChild {
  #[serde(rename = "JSXText")]
  Text(JsxText),
  #[serde(rename = "JSXExpressionContainer")]
  ExpressionContainer(JsxExpressionContainer),
  #[serde(rename = "JSXSpreadChild")]
  SpreadChild(JsxSpreadChild),
  #[serde(rename = "JSXElement")]
  Element(JsxElement),
  #[serde(rename = "JSXFragment")]
  Fragment(JsxFragment),
}
