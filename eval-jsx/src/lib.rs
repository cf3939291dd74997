//! A sandboxed tree-walking evaluator for JSX and a subset of ECMAScript.
//!
//! [`evaluate_jsx`] turns JSX text into a list of [`JsxNode`]s, resolving tags against the
//! supplied components and bindings and giving every element a positional `key`. [`evaluate`]
//! runs a whole program and returns its [`Context`], from which exports and top-level bindings
//! can be read.
//!
//! Evaluation is confined by [`EvaluateOptions`]: scripts only see the bindings they are given,
//! and every call passes through the allow and deny lists before it runs.
//!
//! ```
//! use eval_jsx::{evaluate_jsx, EvaluateOptions, JsxNode};
//!
//! let nodes = evaluate_jsx("<p>{name}</p>", EvaluateOptions::default().bind("name", "world")).unwrap();
//! let JsxNode::Element(p) = &nodes[0] else { panic!() };
//! assert_eq!(p.key(), Some("1"));
//! ```

mod bind;
pub mod builtins;
mod class;
mod context;
mod error;
mod expr;
mod func;
mod jsx;
mod key;
mod map;
mod node;
pub mod num;
pub mod ops;
mod options;
mod program;
mod property;
mod sandbox;
mod scope;
mod stmt;
mod value;

pub use crate::context::Context;
pub use crate::error::Error;
pub use crate::error::EvalResult;
pub use crate::error::EvaluationError;
pub use crate::error::EvaluationErrorKind;
pub use crate::key::KeyGenerator;
pub use crate::map::PropertyMap;
pub use crate::node::JsxElement;
pub use crate::node::JsxFragment;
pub use crate::node::JsxNode;
pub use crate::node::JsxText;
pub use crate::node::TagRef;
pub use crate::options::EvaluateOptions;
pub use crate::program::evaluate;
pub use crate::program::evaluate_jsx;
pub use crate::program::Input;
pub use crate::scope::Frame;
pub use crate::scope::FrameKind;
pub use crate::scope::Scope;
pub use crate::scope::Variable;
pub use parse_jsx::ast::VariableKind;
pub use crate::stmt::Completion;
pub use crate::value::Array;
pub use crate::value::Component;
pub use crate::value::Function;
pub use crate::value::Object;
pub use crate::value::ObjectKind;
pub use crate::value::Property;
pub use crate::value::RenderFn;
pub use crate::value::Value;
pub use parse_jsx;
