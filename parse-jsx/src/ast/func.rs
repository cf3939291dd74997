use super::BlockStatement;
use super::Expression;
use super::Identifier;
use super::Pattern;
use super::Statement;
use crate::loc::SourceLocation;
use derive_more::From;
use serde::Deserialize;
use serde::Serialize;
use std::rc::Rc;

/// Shared by function declarations, function expressions, and method values.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
  pub id: Option<Identifier>,
  pub params: Vec<Pattern>,
  pub body: BlockStatement,
  #[serde(default)]
  pub generator: bool,
  #[serde(default, rename = "async")]
  pub is_async: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArrowBody {
  BlockStatement(BlockStatement),
  #[serde(untagged)]
  Expression(Box<Expression>),
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ArrowFunction {
  pub params: Vec<Pattern>,
  pub body: ArrowBody,
  /// Whether the body is a bare expression rather than a block.
  #[serde(default)]
  pub expression: bool,
  #[serde(default, rename = "async")]
  pub is_async: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
  pub id: Option<Identifier>,
  pub super_class: Option<Box<Expression>>,
  pub body: ClassBody,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct ClassBody {
  pub body: Vec<ClassMember>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, From)]
#[serde(tag = "type")]
pub enum ClassMember {
  MethodDefinition(MethodDefinition),
  PropertyDefinition(PropertyDefinition),
  StaticBlock(StaticBlock),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
  Constructor,
  Method,
  Get,
  Set,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MethodDefinition {
  pub key: Expression,
  pub value: Rc<Function>,
  pub kind: MethodKind,
  #[serde(default)]
  pub computed: bool,
  #[serde(default, rename = "static")]
  pub is_static: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PropertyDefinition {
  pub key: Expression,
  pub value: Option<Expression>,
  #[serde(default)]
  pub computed: bool,
  #[serde(default, rename = "static")]
  pub is_static: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StaticBlock {
  pub body: Vec<Statement>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}
