//! ESTree-shaped syntax tree with the JSX extension.
//!
//! Nodes serialise to the JSON shape used by ESTree tooling: a `type` discriminator on every node
//! that appears inside a union position, camelCase field names, and an optional `loc`.

use crate::loc::SourceLocation;
use serde::Deserialize;
use serde::Serialize;

mod expr;
mod func;
mod jsx;
mod pat;
mod stmt;

pub use expr::*;
pub use func::*;
pub use jsx::*;
pub use pat::*;
pub use stmt::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
  Script,
  #[default]
  Module,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Program {
  pub body: Vec<Statement>,
  #[serde(default)]
  pub source_type: SourceType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Identifier {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

impl Identifier {
  pub fn new(name: impl Into<String>) -> Identifier {
    Identifier {
      name: name.into(),
      loc: None,
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PrivateIdentifier {
  /// Name without the leading `#`.
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}
