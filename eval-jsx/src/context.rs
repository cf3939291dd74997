use crate::class::ClassDescriptor;
use crate::error::EvalResult;
use crate::error::Error;
use crate::error::EvaluationError;
use crate::error::EvaluationErrorKind;
use crate::key::KeyGenerator;
use crate::map::PropertyMap;
use crate::node::TagRef;
use crate::ops;
use crate::options::EvaluateOptions;
use crate::property;
use crate::sandbox;
use crate::scope::Frame;
use crate::scope::FrameKind;
use crate::scope::Scope;
use crate::scope::Variable;
use crate::value::Function;
use crate::value::Value;
use parse_jsx::ast::VariableKind;
use parse_jsx::loc::SourceLocation;
use std::fmt;
use std::ops::Deref;
use std::ops::DerefMut;
use std::rc::Rc;

/// State of one evaluation: options, the live scope chain, exports, and the key generator.
pub struct Context {
  options: EvaluateOptions,
  scope: Scope,
  binding: Scope,
  exports: PropertyMap<Value>,
  keys: KeyGenerator,
}

impl Context {
  pub fn new(options: EvaluateOptions) -> Context {
    let system = Frame::system();
    let binding = Frame::child(&system, FrameKind::Binding, Value::Undefined);
    for (name, value) in options.binding.iter() {
      binding.declare(VariableKind::Var, name, value.clone());
    }
    let keys = KeyGenerator::new(options.key_prefix.clone());
    Context {
      options,
      scope: binding.clone(),
      binding,
      exports: PropertyMap::new(),
      keys,
    }
  }

  pub fn options(&self) -> &EvaluateOptions {
    &self.options
  }

  pub fn scope(&self) -> &Scope {
    &self.scope
  }

  /// Number of frames in the current chain, counting the system frame.
  pub fn depth(&self) -> usize {
    self.scope.depth()
  }

  /// Enters a block frame with the given `this`. The frame is popped when the guard drops.
  pub fn push_stack(&mut self, this: Value) -> StackGuard<'_> {
    let frame = Frame::child(&self.scope, FrameKind::Block, this);
    self.enter(frame)
  }

  /// `push_stack` keeping the current `this`.
  pub fn block(&mut self) -> StackGuard<'_> {
    let this = self.resolve_this();
    self.push_stack(this)
  }

  /// Makes `frame` current until the guard drops, then restores the previous frame.
  pub fn enter(&mut self, frame: Scope) -> StackGuard<'_> {
    let saved = std::mem::replace(&mut self.scope, frame);
    StackGuard { ctx: self, saved }
  }

  pub fn define_variable(&mut self, kind: VariableKind, name: &str) {
    self.target_frame(kind).define(kind, name);
  }

  /// Declares and initializes in one step.
  pub fn declare(&mut self, kind: VariableKind, name: &str, value: Value) {
    self.target_frame(kind).declare(kind, name, value);
  }

  /// Hoisted function declarations live in the frame of their statement list.
  pub fn declare_function(&mut self, name: &str, value: Value) {
    self.scope.declare(VariableKind::Var, name, value);
  }

  fn target_frame(&self, kind: VariableKind) -> Scope {
    match kind {
      VariableKind::Var => self.scope.var_scope(),
      VariableKind::Let | VariableKind::Const => self.scope.clone(),
    }
  }

  /// Assigns to the nearest declaration of `name`.
  ///
  /// An undeclared name is a Reference error when `raise_reference_error` is set; otherwise the
  /// write creates an implicit `var` in the binding frame.
  pub fn set_variable(&mut self, name: &str, value: Value) -> EvalResult<()> {
    if let Some(frame) = self.scope.lookup(name) {
      frame.assign(name, value);
      return Ok(());
    }
    if self.options.raise_reference_error {
      return Err(self.error(
        EvaluationErrorKind::Reference,
        format!("{} is not defined", name),
      ));
    }
    self.binding.declare(VariableKind::Var, name, value);
    Ok(())
  }

  pub fn resolve_identifier(&self, name: &str) -> Option<Variable> {
    self.scope.lookup(name).and_then(|frame| frame.get(name))
  }

  pub fn resolve_this(&self) -> Value {
    self.scope.this().clone()
  }

  pub fn resolve_home(&self) -> Option<Rc<ClassDescriptor>> {
    self.scope.home()
  }

  /// Resolves a JSX tag name such as `div`, `Card`, or `ui.Card.Body`.
  ///
  /// The first segment is looked up in `components`, then in scope. Each later segment is a
  /// property read. A missing or falsy step falls back to the segment's own text.
  pub fn resolve_component(&mut self, name: &str) -> EvalResult<TagRef> {
    let mut segments = name.split('.');
    let first = segments.next().unwrap_or(name);
    let found = match self.options.components.get(first) {
      Some(v) => Some(v.clone()),
      None if !self.options.disable_search_components_by_binding => {
        self.resolve_identifier(first).map(|var| var.value)
      }
      None => None,
    };
    let mut current = match found {
      Some(v) if ops::truthy(&v) => v,
      _ => Value::string(first),
    };
    for segment in segments {
      let next = property::get(self, &current, segment)?;
      current = if ops::truthy(&next) {
        next
      } else {
        Value::string(segment)
      };
    }
    Ok(match current {
      Value::String(s) => TagRef::Name(s),
      other => TagRef::Component(other),
    })
  }

  pub fn is_allowed_function(&self, function: &Function) -> bool {
    sandbox::is_allowed(&self.options, function)
  }

  pub fn export(&mut self, name: &str, value: Value) {
    self.exports.insert(name, value);
  }

  pub fn exports(&self) -> &PropertyMap<Value> {
    &self.exports
  }

  pub fn into_exports(self) -> PropertyMap<Value> {
    self.exports
  }

  pub fn keys(&mut self) -> &mut KeyGenerator {
    &mut self.keys
  }

  /// Builds an evaluation error carrying a snapshot of the current scope chain.
  pub fn error(&self, kind: EvaluationErrorKind, message: impl Into<String>) -> Error {
    Error::from(EvaluationError {
      kind,
      message: message.into(),
      loc: None,
      scope: Some(self.scope.clone()),
    })
  }

  pub fn error_at(
    &self,
    kind: EvaluationErrorKind,
    message: impl Into<String>,
    loc: Option<SourceLocation>,
  ) -> Error {
    self.error(kind, message).at(loc)
  }
}

impl fmt::Debug for Context {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Context")
      .field("depth", &self.depth())
      .field("scope", &self.scope)
      .field("exports", &self.exports.keys().collect::<Vec<_>>())
      .finish_non_exhaustive()
  }
}

/// Restores the previous frame on drop, so every exit path pops, `?` included.
pub struct StackGuard<'a> {
  ctx: &'a mut Context,
  saved: Scope,
}

impl Deref for StackGuard<'_> {
  type Target = Context;

  fn deref(&self) -> &Context {
    &*self.ctx
  }
}

impl DerefMut for StackGuard<'_> {
  fn deref_mut(&mut self) -> &mut Context {
    &mut *self.ctx
  }
}

impl Drop for StackGuard<'_> {
  fn drop(&mut self) {
    self.ctx.scope = self.saved.clone();
  }
}

#[cfg(test)]
mod tests {
  use super::Context;
  use crate::error::EvaluationErrorKind;
  use crate::node::TagRef;
  use crate::options::EvaluateOptions;
  use crate::value::Component;
  use crate::value::Object;
  use crate::value::Value;
  use parse_jsx::ast::VariableKind;

  #[test]
  fn guards_pop_frames() {
    let mut ctx = Context::new(EvaluateOptions::default());
    assert_eq!(ctx.depth(), 2);
    {
      let mut outer = ctx.push_stack(Value::Undefined);
      outer.declare(VariableKind::Let, "a", Value::Number(1.0));
      let inner = outer.block();
      assert_eq!(inner.depth(), 4);
      assert!(inner.resolve_identifier("a").is_some());
    }
    assert_eq!(ctx.depth(), 2);
    assert!(ctx.resolve_identifier("a").is_none());
  }

  #[test]
  fn undeclared_writes_become_binding_vars() {
    let mut ctx = Context::new(EvaluateOptions::default());
    {
      let mut block = ctx.block();
      block.set_variable("x", Value::Bool(true)).unwrap();
    }
    assert_eq!(ctx.resolve_identifier("x").map(|v| v.value), Some(Value::Bool(true)));
  }

  #[test]
  fn undeclared_writes_fail_with_reference_errors_when_asked() {
    let mut ctx = Context::new(EvaluateOptions {
      raise_reference_error: true,
      ..EvaluateOptions::default()
    });
    let err = ctx.set_variable("x", Value::Null).unwrap_err();
    assert_eq!(err.kind(), Some(EvaluationErrorKind::Reference));
  }

  #[test]
  fn components_resolve_by_dotted_path() {
    let card = Component::new("Card");
    let ui = Object::new();
    ui.set_data("Card", Value::Component(card.clone()));
    let mut ctx = Context::new(EvaluateOptions::default().bind("ui", ui));
    match ctx.resolve_component("ui.Card").unwrap() {
      TagRef::Component(Value::Component(c)) => assert!(c.ptr_eq(&card)),
      other => panic!("unexpected {:?}", other),
    }
    assert_eq!(
      ctx.resolve_component("ui.Missing").unwrap(),
      TagRef::Name("Missing".into())
    );
    assert_eq!(
      ctx.resolve_component("xs:test").unwrap(),
      TagRef::Name("xs:test".into())
    );
  }
}
