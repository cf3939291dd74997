use super::Expression;
use super::Identifier;
use super::MemberExpression;
use crate::loc::SourceLocation;
use derive_more::From;
use serde::Deserialize;
use serde::Serialize;

/// Binding and assignment targets.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, From)]
#[serde(tag = "type")]
pub enum Pattern {
  Identifier(Identifier),
  ObjectPattern(ObjectPattern),
  ArrayPattern(ArrayPattern),
  RestElement(RestElement),
  AssignmentPattern(AssignmentPattern),
  /// Only valid as an assignment target, never in a declaration.
  MemberExpression(MemberExpression),
}

impl Pattern {
  pub fn loc(&self) -> Option<SourceLocation> {
    match self {
      Pattern::Identifier(n) => n.loc,
      Pattern::ObjectPattern(n) => n.loc,
      Pattern::ArrayPattern(n) => n.loc,
      Pattern::RestElement(n) => n.loc,
      Pattern::AssignmentPattern(n) => n.loc,
      Pattern::MemberExpression(n) => n.loc,
    }
  }

  /// Names bound by this pattern, in source order.
  pub fn bound_names(&self) -> Vec<&str> {
    let mut names = Vec::new();
    self.collect_bound_names(&mut names);
    names
  }

  fn collect_bound_names<'a>(&'a self, out: &mut Vec<&'a str>) {
    match self {
      Pattern::Identifier(id) => out.push(&id.name),
      Pattern::ObjectPattern(obj) => {
        for prop in obj.properties.iter() {
          match prop {
            PatternMember::Property(p) => p.value.collect_bound_names(out),
            PatternMember::RestElement(r) => r.argument.collect_bound_names(out),
          }
        }
      }
      Pattern::ArrayPattern(arr) => {
        for elem in arr.elements.iter().flatten() {
          elem.collect_bound_names(out);
        }
      }
      Pattern::RestElement(r) => r.argument.collect_bound_names(out),
      Pattern::AssignmentPattern(a) => a.left.collect_bound_names(out),
      Pattern::MemberExpression(_) => {}
    }
  }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ObjectPattern {
  pub properties: Vec<PatternMember>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, From)]
#[serde(tag = "type")]
pub enum PatternMember {
  Property(AssignmentProperty),
  RestElement(RestElement),
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AssignmentProperty {
  pub key: Expression,
  pub value: Pattern,
  #[serde(default)]
  pub computed: bool,
  #[serde(default)]
  pub shorthand: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ArrayPattern {
  pub elements: Vec<Option<Pattern>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RestElement {
  pub argument: Box<Pattern>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AssignmentPattern {
  pub left: Box<Pattern>,
  pub right: Box<Expression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}
