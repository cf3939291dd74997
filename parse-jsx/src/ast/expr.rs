use super::ArrowFunction;
use super::Class;
use super::Function;
use super::Identifier;
use super::JsxElement;
use super::JsxEmptyExpression;
use super::JsxFragment;
use super::Pattern;
use super::PrivateIdentifier;
use crate::loc::SourceLocation;
use derive_more::From;
use serde::Deserialize;
use serde::Serialize;
use std::rc::Rc;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, From)]
#[serde(tag = "type")]
pub enum Expression {
  Identifier(Identifier),
  Literal(Literal),
  ThisExpression(ThisExpression),
  Super(Super),
  ArrayExpression(ArrayExpression),
  ObjectExpression(ObjectExpression),
  FunctionExpression(Rc<Function>),
  ArrowFunctionExpression(Rc<ArrowFunction>),
  ClassExpression(Rc<Class>),
  UnaryExpression(UnaryExpression),
  UpdateExpression(UpdateExpression),
  BinaryExpression(BinaryExpression),
  LogicalExpression(LogicalExpression),
  AssignmentExpression(AssignmentExpression),
  MemberExpression(MemberExpression),
  ConditionalExpression(ConditionalExpression),
  CallExpression(CallExpression),
  NewExpression(NewExpression),
  SequenceExpression(SequenceExpression),
  TemplateLiteral(TemplateLiteral),
  TaggedTemplateExpression(TaggedTemplateExpression),
  ChainExpression(ChainExpression),
  AwaitExpression(AwaitExpression),
  YieldExpression(YieldExpression),
  ImportExpression(ImportExpression),
  MetaProperty(MetaProperty),
  SpreadElement(SpreadElement),
  PrivateIdentifier(PrivateIdentifier),
  #[serde(rename = "JSXElement")]
  JsxElement(JsxElement),
  #[serde(rename = "JSXFragment")]
  JsxFragment(JsxFragment),
  #[serde(rename = "JSXEmptyExpression")]
  JsxEmptyExpression(JsxEmptyExpression),
}

impl Expression {
  pub fn loc(&self) -> Option<SourceLocation> {
    match self {
      Expression::Identifier(n) => n.loc,
      Expression::Literal(n) => n.loc,
      Expression::ThisExpression(n) => n.loc,
      Expression::Super(n) => n.loc,
      Expression::ArrayExpression(n) => n.loc,
      Expression::ObjectExpression(n) => n.loc,
      Expression::FunctionExpression(n) => n.loc,
      Expression::ArrowFunctionExpression(n) => n.loc,
      Expression::ClassExpression(n) => n.loc,
      Expression::UnaryExpression(n) => n.loc,
      Expression::UpdateExpression(n) => n.loc,
      Expression::BinaryExpression(n) => n.loc,
      Expression::LogicalExpression(n) => n.loc,
      Expression::AssignmentExpression(n) => n.loc,
      Expression::MemberExpression(n) => n.loc,
      Expression::ConditionalExpression(n) => n.loc,
      Expression::CallExpression(n) => n.loc,
      Expression::NewExpression(n) => n.loc,
      Expression::SequenceExpression(n) => n.loc,
      Expression::TemplateLiteral(n) => n.loc,
      Expression::TaggedTemplateExpression(n) => n.loc,
      Expression::ChainExpression(n) => n.loc,
      Expression::AwaitExpression(n) => n.loc,
      Expression::YieldExpression(n) => n.loc,
      Expression::ImportExpression(n) => n.loc,
      Expression::MetaProperty(n) => n.loc,
      Expression::SpreadElement(n) => n.loc,
      Expression::PrivateIdentifier(n) => n.loc,
      Expression::JsxElement(n) => n.loc,
      Expression::JsxFragment(n) => n.loc,
      Expression::JsxEmptyExpression(n) => n.loc,
    }
  }

  /// The ESTree `type` of this node.
  pub fn type_name(&self) -> &'static str {
    match self {
      Expression::Identifier(_) => "Identifier",
      Expression::Literal(_) => "Literal",
      Expression::ThisExpression(_) => "ThisExpression",
      Expression::Super(_) => "Super",
      Expression::ArrayExpression(_) => "ArrayExpression",
      Expression::ObjectExpression(_) => "ObjectExpression",
      Expression::FunctionExpression(_) => "FunctionExpression",
      Expression::ArrowFunctionExpression(_) => "ArrowFunctionExpression",
      Expression::ClassExpression(_) => "ClassExpression",
      Expression::UnaryExpression(_) => "UnaryExpression",
      Expression::UpdateExpression(_) => "UpdateExpression",
      Expression::BinaryExpression(_) => "BinaryExpression",
      Expression::LogicalExpression(_) => "LogicalExpression",
      Expression::AssignmentExpression(_) => "AssignmentExpression",
      Expression::MemberExpression(_) => "MemberExpression",
      Expression::ConditionalExpression(_) => "ConditionalExpression",
      Expression::CallExpression(_) => "CallExpression",
      Expression::NewExpression(_) => "NewExpression",
      Expression::SequenceExpression(_) => "SequenceExpression",
      Expression::TemplateLiteral(_) => "TemplateLiteral",
      Expression::TaggedTemplateExpression(_) => "TaggedTemplateExpression",
      Expression::ChainExpression(_) => "ChainExpression",
      Expression::AwaitExpression(_) => "AwaitExpression",
      Expression::YieldExpression(_) => "YieldExpression",
      Expression::ImportExpression(_) => "ImportExpression",
      Expression::MetaProperty(_) => "MetaProperty",
      Expression::SpreadElement(_) => "SpreadElement",
      Expression::PrivateIdentifier(_) => "PrivateIdentifier",
      Expression::JsxElement(_) => "JSXElement",
      Expression::JsxFragment(_) => "JSXFragment",
      Expression::JsxEmptyExpression(_) => "JSXEmptyExpression",
    }
  }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
  Null,
  Boolean(bool),
  Number(f64),
  String(String),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RegexLiteral {
  pub pattern: String,
  pub flags: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Literal {
  pub value: LiteralValue,
  #[serde(default)]
  pub raw: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub regex: Option<RegexLiteral>,
  /// Decimal digits of a BigInt literal, without the `n` suffix.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bigint: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

impl Literal {
  pub fn string(value: impl Into<String>) -> Literal {
    let value = value.into();
    Literal {
      raw: format!("{:?}", value),
      value: LiteralValue::String(value),
      regex: None,
      bigint: None,
      loc: None,
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ThisExpression {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Super {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ArrayExpression {
  /// `None` marks a hole, e.g. `[1,,2]`.
  pub elements: Vec<Option<Expression>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ObjectExpression {
  pub properties: Vec<ObjectMember>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, From)]
#[serde(tag = "type")]
pub enum ObjectMember {
  Property(Property),
  SpreadElement(SpreadElement),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
  Init,
  Get,
  Set,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Property {
  pub key: Expression,
  pub value: Expression,
  pub kind: PropertyKind,
  #[serde(default)]
  pub method: bool,
  #[serde(default)]
  pub shorthand: bool,
  #[serde(default)]
  pub computed: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SpreadElement {
  pub argument: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum UnaryOperator {
  #[serde(rename = "-")]
  Minus,
  #[serde(rename = "+")]
  Plus,
  #[serde(rename = "!")]
  Not,
  #[serde(rename = "~")]
  BitNot,
  #[serde(rename = "typeof")]
  Typeof,
  #[serde(rename = "void")]
  Void,
  #[serde(rename = "delete")]
  Delete,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct UnaryExpression {
  pub operator: UnaryOperator,
  #[serde(default = "yes")]
  pub prefix: bool,
  pub argument: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

fn yes() -> bool {
  true
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum UpdateOperator {
  #[serde(rename = "++")]
  Increment,
  #[serde(rename = "--")]
  Decrement,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct UpdateExpression {
  pub operator: UpdateOperator,
  pub prefix: bool,
  pub argument: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BinaryOperator {
  #[serde(rename = "==")]
  Equal,
  #[serde(rename = "!=")]
  NotEqual,
  #[serde(rename = "===")]
  StrictEqual,
  #[serde(rename = "!==")]
  StrictNotEqual,
  #[serde(rename = "<")]
  LessThan,
  #[serde(rename = "<=")]
  LessThanOrEqual,
  #[serde(rename = ">")]
  GreaterThan,
  #[serde(rename = ">=")]
  GreaterThanOrEqual,
  #[serde(rename = "<<")]
  LeftShift,
  #[serde(rename = ">>")]
  RightShift,
  #[serde(rename = ">>>")]
  UnsignedRightShift,
  #[serde(rename = "+")]
  Add,
  #[serde(rename = "-")]
  Subtract,
  #[serde(rename = "*")]
  Multiply,
  #[serde(rename = "/")]
  Divide,
  #[serde(rename = "%")]
  Remainder,
  #[serde(rename = "**")]
  Exponent,
  #[serde(rename = "|")]
  BitOr,
  #[serde(rename = "^")]
  BitXor,
  #[serde(rename = "&")]
  BitAnd,
  #[serde(rename = "in")]
  In,
  #[serde(rename = "instanceof")]
  Instanceof,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BinaryExpression {
  pub operator: BinaryOperator,
  pub left: Box<Expression>,
  pub right: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LogicalOperator {
  #[serde(rename = "||")]
  Or,
  #[serde(rename = "&&")]
  And,
  #[serde(rename = "??")]
  Nullish,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LogicalExpression {
  pub operator: LogicalOperator,
  pub left: Box<Expression>,
  pub right: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AssignmentOperator {
  #[serde(rename = "=")]
  Assign,
  #[serde(rename = "+=")]
  Add,
  #[serde(rename = "-=")]
  Subtract,
  #[serde(rename = "*=")]
  Multiply,
  #[serde(rename = "/=")]
  Divide,
  #[serde(rename = "%=")]
  Remainder,
  #[serde(rename = "**=")]
  Exponent,
  #[serde(rename = "<<=")]
  LeftShift,
  #[serde(rename = ">>=")]
  RightShift,
  #[serde(rename = ">>>=")]
  UnsignedRightShift,
  #[serde(rename = "|=")]
  BitOr,
  #[serde(rename = "^=")]
  BitXor,
  #[serde(rename = "&=")]
  BitAnd,
  #[serde(rename = "||=")]
  LogicalOr,
  #[serde(rename = "&&=")]
  LogicalAnd,
  #[serde(rename = "??=")]
  Nullish,
}

impl AssignmentOperator {
  /// The binary operator applied by a compound assignment such as `+=`.
  pub fn binary(self) -> Option<BinaryOperator> {
    Some(match self {
      AssignmentOperator::Add => BinaryOperator::Add,
      AssignmentOperator::Subtract => BinaryOperator::Subtract,
      AssignmentOperator::Multiply => BinaryOperator::Multiply,
      AssignmentOperator::Divide => BinaryOperator::Divide,
      AssignmentOperator::Remainder => BinaryOperator::Remainder,
      AssignmentOperator::Exponent => BinaryOperator::Exponent,
      AssignmentOperator::LeftShift => BinaryOperator::LeftShift,
      AssignmentOperator::RightShift => BinaryOperator::RightShift,
      AssignmentOperator::UnsignedRightShift => BinaryOperator::UnsignedRightShift,
      AssignmentOperator::BitOr => BinaryOperator::BitOr,
      AssignmentOperator::BitXor => BinaryOperator::BitXor,
      AssignmentOperator::BitAnd => BinaryOperator::BitAnd,
      _ => return None,
    })
  }

  /// The short-circuit operator guarding a logical assignment such as `??=`.
  pub fn logical(self) -> Option<LogicalOperator> {
    Some(match self {
      AssignmentOperator::LogicalOr => LogicalOperator::Or,
      AssignmentOperator::LogicalAnd => LogicalOperator::And,
      AssignmentOperator::Nullish => LogicalOperator::Nullish,
      _ => return None,
    })
  }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AssignmentExpression {
  pub operator: AssignmentOperator,
  pub left: Box<Pattern>,
  pub right: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MemberExpression {
  pub object: Box<Expression>,
  /// An `Identifier` or `PrivateIdentifier` unless `computed`.
  pub property: Box<Expression>,
  #[serde(default)]
  pub computed: bool,
  #[serde(default)]
  pub optional: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ConditionalExpression {
  pub test: Box<Expression>,
  pub consequent: Box<Expression>,
  pub alternate: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CallExpression {
  pub callee: Box<Expression>,
  pub arguments: Vec<Expression>,
  #[serde(default)]
  pub optional: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct NewExpression {
  pub callee: Box<Expression>,
  pub arguments: Vec<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SequenceExpression {
  pub expressions: Vec<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TemplateElementValue {
  pub raw: String,
  /// `None` when the raw text holds an escape that is only legal in tagged templates.
  pub cooked: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct TemplateElement {
  pub value: TemplateElementValue,
  pub tail: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TemplateLiteral {
  pub quasis: Vec<TemplateElement>,
  pub expressions: Vec<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TaggedTemplateExpression {
  pub tag: Box<Expression>,
  pub quasi: TemplateLiteral,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ChainExpression {
  pub expression: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AwaitExpression {
  pub argument: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct YieldExpression {
  pub argument: Option<Box<Expression>>,
  #[serde(default)]
  pub delegate: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ImportExpression {
  pub source: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MetaProperty {
  pub meta: Identifier,
  pub property: Identifier,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}
