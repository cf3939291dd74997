use super::Class;
use super::Expression;
use super::Function;
use super::Identifier;
use super::Literal;
use super::Pattern;
use crate::loc::SourceLocation;
use derive_more::From;
use serde::Deserialize;
use serde::Serialize;
use std::rc::Rc;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, From)]
#[serde(tag = "type")]
pub enum Statement {
  ExpressionStatement(ExpressionStatement),
  BlockStatement(BlockStatement),
  EmptyStatement(EmptyStatement),
  DebuggerStatement(DebuggerStatement),
  ReturnStatement(ReturnStatement),
  LabeledStatement(LabeledStatement),
  BreakStatement(BreakStatement),
  ContinueStatement(ContinueStatement),
  IfStatement(IfStatement),
  SwitchStatement(SwitchStatement),
  ThrowStatement(ThrowStatement),
  TryStatement(TryStatement),
  WhileStatement(WhileStatement),
  DoWhileStatement(DoWhileStatement),
  ForStatement(ForStatement),
  ForInStatement(ForInStatement),
  ForOfStatement(ForOfStatement),
  FunctionDeclaration(Rc<Function>),
  ClassDeclaration(Rc<Class>),
  VariableDeclaration(VariableDeclaration),
  ImportDeclaration(ImportDeclaration),
  ExportNamedDeclaration(ExportNamedDeclaration),
  ExportDefaultDeclaration(ExportDefaultDeclaration),
  ExportAllDeclaration(ExportAllDeclaration),
  WithStatement(WithStatement),
}

impl Statement {
  pub fn loc(&self) -> Option<SourceLocation> {
    match self {
      Statement::ExpressionStatement(n) => n.loc,
      Statement::BlockStatement(n) => n.loc,
      Statement::EmptyStatement(n) => n.loc,
      Statement::DebuggerStatement(n) => n.loc,
      Statement::ReturnStatement(n) => n.loc,
      Statement::LabeledStatement(n) => n.loc,
      Statement::BreakStatement(n) => n.loc,
      Statement::ContinueStatement(n) => n.loc,
      Statement::IfStatement(n) => n.loc,
      Statement::SwitchStatement(n) => n.loc,
      Statement::ThrowStatement(n) => n.loc,
      Statement::TryStatement(n) => n.loc,
      Statement::WhileStatement(n) => n.loc,
      Statement::DoWhileStatement(n) => n.loc,
      Statement::ForStatement(n) => n.loc,
      Statement::ForInStatement(n) => n.loc,
      Statement::ForOfStatement(n) => n.loc,
      Statement::FunctionDeclaration(n) => n.loc,
      Statement::ClassDeclaration(n) => n.loc,
      Statement::VariableDeclaration(n) => n.loc,
      Statement::ImportDeclaration(n) => n.loc,
      Statement::ExportNamedDeclaration(n) => n.loc,
      Statement::ExportDefaultDeclaration(n) => n.loc,
      Statement::ExportAllDeclaration(n) => n.loc,
      Statement::WithStatement(n) => n.loc,
    }
  }

  pub fn type_name(&self) -> &'static str {
    match self {
      Statement::ExpressionStatement(_) => "ExpressionStatement",
      Statement::BlockStatement(_) => "BlockStatement",
      Statement::EmptyStatement(_) => "EmptyStatement",
      Statement::DebuggerStatement(_) => "DebuggerStatement",
      Statement::ReturnStatement(_) => "ReturnStatement",
      Statement::LabeledStatement(_) => "LabeledStatement",
      Statement::BreakStatement(_) => "BreakStatement",
      Statement::ContinueStatement(_) => "ContinueStatement",
      Statement::IfStatement(_) => "IfStatement",
      Statement::SwitchStatement(_) => "SwitchStatement",
      Statement::ThrowStatement(_) => "ThrowStatement",
      Statement::TryStatement(_) => "TryStatement",
      Statement::WhileStatement(_) => "WhileStatement",
      Statement::DoWhileStatement(_) => "DoWhileStatement",
      Statement::ForStatement(_) => "ForStatement",
      Statement::ForInStatement(_) => "ForInStatement",
      Statement::ForOfStatement(_) => "ForOfStatement",
      Statement::FunctionDeclaration(_) => "FunctionDeclaration",
      Statement::ClassDeclaration(_) => "ClassDeclaration",
      Statement::VariableDeclaration(_) => "VariableDeclaration",
      Statement::ImportDeclaration(_) => "ImportDeclaration",
      Statement::ExportNamedDeclaration(_) => "ExportNamedDeclaration",
      Statement::ExportDefaultDeclaration(_) => "ExportDefaultDeclaration",
      Statement::ExportAllDeclaration(_) => "ExportAllDeclaration",
      Statement::WithStatement(_) => "WithStatement",
    }
  }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ExpressionStatement {
  pub expression: Expression,
  /// Raw text of a directive prologue entry such as `"use strict"`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub directive: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct BlockStatement {
  pub body: Vec<Statement>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct EmptyStatement {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct DebuggerStatement {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ReturnStatement {
  pub argument: Option<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LabeledStatement {
  pub label: Identifier,
  pub body: Box<Statement>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BreakStatement {
  pub label: Option<Identifier>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ContinueStatement {
  pub label: Option<Identifier>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct IfStatement {
  pub test: Expression,
  pub consequent: Box<Statement>,
  pub alternate: Option<Box<Statement>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SwitchStatement {
  pub discriminant: Expression,
  pub cases: Vec<SwitchCase>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct SwitchCase {
  /// `None` for the `default:` case.
  pub test: Option<Expression>,
  pub consequent: Vec<Statement>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ThrowStatement {
  pub argument: Expression,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TryStatement {
  pub block: BlockStatement,
  pub handler: Option<CatchClause>,
  pub finalizer: Option<BlockStatement>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct CatchClause {
  pub param: Option<Pattern>,
  pub body: BlockStatement,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WhileStatement {
  pub test: Expression,
  pub body: Box<Statement>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DoWhileStatement {
  pub body: Box<Statement>,
  pub test: Expression,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ForInit {
  VariableDeclaration(VariableDeclaration),
  #[serde(untagged)]
  Expression(Expression),
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ForStatement {
  pub init: Option<ForInit>,
  pub test: Option<Expression>,
  pub update: Option<Expression>,
  pub body: Box<Statement>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

/// Left side of `for-in` and `for-of`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ForHead {
  VariableDeclaration(VariableDeclaration),
  #[serde(untagged)]
  Pattern(Pattern),
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ForInStatement {
  pub left: ForHead,
  pub right: Expression,
  pub body: Box<Statement>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ForOfStatement {
  pub left: ForHead,
  pub right: Expression,
  pub body: Box<Statement>,
  #[serde(default, rename = "await")]
  pub is_await: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
  Var,
  Let,
  Const,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct VariableDeclaration {
  pub kind: VariableKind,
  pub declarations: Vec<VariableDeclarator>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct VariableDeclarator {
  pub id: Pattern,
  pub init: Option<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ImportDeclaration {
  pub specifiers: Vec<ImportSpecifierKind>,
  pub source: Literal,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ImportSpecifierKind {
  ImportSpecifier(ImportSpecifier),
  ImportDefaultSpecifier(ImportDefaultSpecifier),
  ImportNamespaceSpecifier(ImportNamespaceSpecifier),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ImportSpecifier {
  pub imported: Identifier,
  pub local: Identifier,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ImportDefaultSpecifier {
  pub local: Identifier,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ImportNamespaceSpecifier {
  pub local: Identifier,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ExportNamedDeclaration {
  pub declaration: Option<Box<Statement>>,
  pub specifiers: Vec<ExportSpecifier>,
  pub source: Option<Literal>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct ExportSpecifier {
  pub local: Identifier,
  pub exported: Identifier,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExportDefault {
  FunctionDeclaration(Rc<Function>),
  ClassDeclaration(Rc<Class>),
  #[serde(untagged)]
  Expression(Expression),
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ExportDefaultDeclaration {
  pub declaration: ExportDefault,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ExportAllDeclaration {
  pub exported: Option<Identifier>,
  pub source: Literal,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WithStatement {
  pub object: Expression,
  pub body: Box<Statement>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}
