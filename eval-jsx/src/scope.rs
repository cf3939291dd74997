use crate::class::ClassDescriptor;
use crate::map::PropertyMap;
use crate::value::Value;
use parse_jsx::ast::VariableKind;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::rc::Weak;

#[derive(Clone, Debug)]
pub struct Variable {
  pub kind: VariableKind,
  /// False between declaration and the first write; a `const` accepts exactly one write.
  pub initialized: bool,
  pub value: Value,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FrameKind {
  /// Root frame holding `undefined`, `NaN` and friends.
  System,
  /// Holds the host's `binding` and top-level declarations.
  Binding,
  Function,
  Arrow,
  Block,
}

pub struct Frame {
  parent: Option<Scope>,
  kind: FrameKind,
  this: Value,
  home: Option<Weak<ClassDescriptor>>,
  variables: RefCell<PropertyMap<Variable>>,
}

/// A frame and, through its parents, the whole chain visible from it.
pub type Scope = Rc<Frame>;

impl Frame {
  pub fn system() -> Scope {
    let frame = Frame {
      parent: None,
      kind: FrameKind::System,
      this: Value::Undefined,
      home: None,
      variables: RefCell::new(PropertyMap::new()),
    };
    frame.declare(VariableKind::Const, "undefined", Value::Undefined);
    frame.declare(VariableKind::Const, "null", Value::Null);
    frame.declare(VariableKind::Const, "true", Value::Bool(true));
    frame.declare(VariableKind::Const, "false", Value::Bool(false));
    frame.declare(VariableKind::Const, "NaN", Value::Number(f64::NAN));
    frame.declare(VariableKind::Const, "Infinity", Value::Number(f64::INFINITY));
    Rc::new(frame)
  }

  /// A child frame without a home class of its own; `home` lookups pass through it.
  pub fn child(parent: &Scope, kind: FrameKind, this: Value) -> Scope {
    Rc::new(Frame {
      parent: Some(parent.clone()),
      kind,
      this,
      home: None,
      variables: RefCell::new(PropertyMap::new()),
    })
  }

  /// The frame of a function or method call.
  pub fn call(
    parent: &Scope,
    kind: FrameKind,
    this: Value,
    home: Option<Weak<ClassDescriptor>>,
  ) -> Scope {
    Rc::new(Frame {
      parent: Some(parent.clone()),
      kind,
      this,
      home,
      variables: RefCell::new(PropertyMap::new()),
    })
  }

  pub fn parent(&self) -> Option<&Scope> {
    self.parent.as_ref()
  }

  pub fn kind(&self) -> FrameKind {
    self.kind
  }

  pub fn this(&self) -> &Value {
    &self.this
  }

  pub fn depth(&self) -> usize {
    1 + self.parent.as_ref().map_or(0, |p| p.depth())
  }

  /// Declares without initializing. Redeclaring a `var` keeps its current value.
  pub fn define(&self, kind: VariableKind, name: &str) {
    let mut vars = self.variables.borrow_mut();
    if kind == VariableKind::Var {
      if let Some(existing) = vars.get(name) {
        if existing.kind == VariableKind::Var {
          return;
        }
      }
    }
    vars.insert(name, Variable {
      kind,
      initialized: false,
      value: Value::Undefined,
    });
  }

  pub fn declare(&self, kind: VariableKind, name: &str, value: Value) {
    self.variables.borrow_mut().insert(name, Variable {
      kind,
      initialized: true,
      value,
    });
  }

  pub fn get(&self, name: &str) -> Option<Variable> {
    self.variables.borrow().get(name).cloned()
  }

  pub fn has(&self, name: &str) -> bool {
    self.variables.borrow().contains_key(name)
  }

  /// Writes an own variable. A second write to a `const` is ignored.
  pub fn assign(&self, name: &str, value: Value) -> bool {
    let mut vars = self.variables.borrow_mut();
    let Some(var) = vars.get_mut(name) else {
      return false;
    };
    if var.kind == VariableKind::Const && var.initialized {
      return true;
    };
    var.value = value;
    var.initialized = true;
    true
  }

  pub fn variable_names(&self) -> Vec<Rc<str>> {
    self.variables.borrow().keys().cloned().collect()
  }

  /// The nearest frame, starting at this one, that declares `name`.
  pub fn lookup(self: &Rc<Self>, name: &str) -> Option<Scope> {
    let mut frame = Some(self);
    while let Some(f) = frame {
      if f.has(name) {
        return Some(f.clone());
      }
      frame = f.parent.as_ref();
    }
    None
  }

  /// Where `var` declarations land: the nearest function, arrow, or binding frame.
  pub fn var_scope(self: &Rc<Self>) -> Scope {
    let mut frame = self;
    loop {
      match frame.kind {
        FrameKind::Function | FrameKind::Arrow | FrameKind::Binding | FrameKind::System => {
          return frame.clone()
        }
        FrameKind::Block => match &frame.parent {
          Some(parent) => frame = parent,
          None => return frame.clone(),
        },
      }
    }
  }

  /// The class of the innermost enclosing method. Arrow and block frames are transparent.
  pub fn home(self: &Rc<Self>) -> Option<Rc<ClassDescriptor>> {
    let mut frame = Some(self);
    while let Some(f) = frame {
      if let Some(home) = &f.home {
        return home.upgrade();
      }
      if f.kind == FrameKind::Function {
        return None;
      }
      frame = f.parent.as_ref();
    }
    None
  }
}

impl fmt::Debug for Frame {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Frame")
      .field("kind", &self.kind)
      .field("variables", &self.variable_names())
      .field("parent", &self.parent)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn const_accepts_a_single_write() {
    let frame = Frame::system();
    frame.define(VariableKind::Const, "a");
    assert!(frame.assign("a", Value::Number(1.0)));
    assert!(frame.assign("a", Value::Number(2.0)));
    assert_eq!(frame.get("a").map(|v| v.value), Some(Value::Number(1.0)));
  }

  #[test]
  fn var_scope_skips_blocks() {
    let root = Frame::system();
    let binding = Frame::child(&root, FrameKind::Binding, Value::Undefined);
    let block = Frame::child(&binding, FrameKind::Block, Value::Undefined);
    let inner = Frame::child(&block, FrameKind::Block, Value::Undefined);
    assert!(Rc::ptr_eq(&inner.var_scope(), &binding));
    assert_eq!(inner.depth(), 4);
    binding.declare(VariableKind::Var, "x", Value::Bool(true));
    assert!(inner.lookup("x").is_some_and(|f| Rc::ptr_eq(&f, &binding)));
    assert!(inner.lookup("y").is_none());
  }
}
