//! Classes as explicit descriptors.
//!
//! A class evaluates to a function whose kind holds an immutable [`ClassDescriptor`]. Instances
//! are plain objects linked to the descriptor, and method, accessor, and `super` lookups walk the
//! descriptor chain instead of a prototype chain.

use crate::builtins;
use crate::builtins::Proto;
use crate::context::Context;
use crate::error::EvalResult;
use crate::error::EvaluationErrorKind;
use crate::expr;
use crate::func;
use crate::map::PropertyMap;
use crate::ops;
use crate::property;
use crate::scope::Frame;
use crate::scope::FrameKind;
use crate::scope::Scope;
use crate::stmt;
use crate::value::ClosureCode;
use crate::value::Function;
use crate::value::FunctionKind;
use crate::value::Object;
use crate::value::Property;
use crate::value::Value;
use parse_jsx::ast::Class;
use parse_jsx::ast::ClassMember as MemberNode;
use parse_jsx::ast::Expression;
use parse_jsx::ast::MethodKind;
use parse_jsx::ast::VariableKind;
use std::fmt;
use std::rc::Rc;
use std::rc::Weak;

#[derive(Clone, Default)]
pub struct Accessor {
  pub get: Option<Function>,
  pub set: Option<Function>,
}

/// Result of a member lookup on a descriptor.
pub enum ClassMember {
  Method(Function),
  Accessor(Accessor),
}

/// An instance field; its initializer is read from the class node on every construction.
pub struct FieldInit {
  pub key: Rc<str>,
  node: Rc<Class>,
  member: usize,
}

impl FieldInit {
  fn initializer(&self) -> Option<&Expression> {
    match self.node.body.body.get(self.member) {
      Some(MemberNode::PropertyDefinition(def)) => def.value.as_ref(),
      _ => None,
    }
  }
}

pub struct ClassDescriptor {
  pub name: Rc<str>,
  pub constructor: Option<Function>,
  pub fields: Vec<FieldInit>,
  pub methods: PropertyMap<Function>,
  pub accessors: PropertyMap<Accessor>,
  pub static_methods: PropertyMap<Function>,
  pub static_accessors: PropertyMap<Accessor>,
  pub super_class: Option<Function>,
  /// The frame holding the class's own name, where field initializers run.
  pub scope: Scope,
}

impl ClassDescriptor {
  pub fn parent(&self) -> Option<Rc<ClassDescriptor>> {
    self.super_class.as_ref().and_then(|f| f.class().cloned())
  }

  /// Instance method or accessor, searched up the `extends` chain.
  pub fn find_instance(&self, key: &str) -> Option<ClassMember> {
    if let Some(m) = self.methods.get(key) {
      return Some(ClassMember::Method(m.clone()));
    }
    if let Some(a) = self.accessors.get(key) {
      return Some(ClassMember::Accessor(a.clone()));
    }
    self.parent().and_then(|p| p.find_instance(key))
  }

  /// Static method or accessor declared on this class only.
  pub fn own_static(&self, key: &str) -> Option<ClassMember> {
    if let Some(m) = self.static_methods.get(key) {
      return Some(ClassMember::Method(m.clone()));
    }
    self
      .static_accessors
      .get(key)
      .map(|a| ClassMember::Accessor(a.clone()))
  }
}

impl fmt::Debug for ClassDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ClassDescriptor")
      .field("name", &self.name)
      .field("methods", &self.methods.keys().collect::<Vec<_>>())
      .field("fields", &self.fields.iter().map(|f| &f.key).collect::<Vec<_>>())
      .finish()
  }
}

fn set_accessor(map: &mut PropertyMap<Accessor>, key: &Rc<str>, kind: MethodKind, f: Function) {
  let mut acc = map.get(key).cloned().unwrap_or_default();
  match kind {
    MethodKind::Get => acc.get = Some(f),
    _ => acc.set = Some(f),
  }
  map.insert(key.clone(), acc);
}

/// Private names (`#x`) are stored as hidden properties.
fn define_field(target: &Value, key: &str, value: Value) {
  let prop = if key.starts_with('#') {
    Property::hidden(value)
  } else {
    Property::data(value)
  };
  match target {
    Value::Object(o) => o.define(key, prop),
    Value::Function(f) => f.define(key, prop),
    _ => {}
  }
}

/// Evaluates a class declaration or expression to its class function.
pub fn eval_class(ctx: &mut Context, node: &Rc<Class>) -> EvalResult<Function> {
  let name: Rc<str> = Rc::from(node.id.as_ref().map_or("", |id| id.name.as_str()));
  let super_class = match &node.super_class {
    None => None,
    Some(expr) => match expr::eval_expr(ctx, expr)? {
      Value::Function(f) if f.class().is_some() => Some(f),
      other => {
        return Err(ctx.error_at(
          EvaluationErrorKind::Type,
          format!(
            "Class extends value {} is not a class",
            ops::to_js_string(&other)
          ),
          expr.loc(),
        ))
      }
    },
  };

  let this = ctx.resolve_this();
  let class_scope = Frame::child(ctx.scope(), FrameKind::Block, this);
  let mut ctx = ctx.enter(class_scope.clone());

  // Everything fallible happens before the descriptor is built.
  let mut keys = Vec::with_capacity(node.body.body.len());
  for member in node.body.body.iter() {
    let key = match member {
      MemberNode::MethodDefinition(def) => {
        if def.value.is_async || def.value.generator {
          return Err(ctx.error_at(
            EvaluationErrorKind::Unsupported,
            "async and generator methods are not supported",
            def.loc,
          ));
        }
        Some(expr::property_key(&mut ctx, &def.key, def.computed)?)
      }
      MemberNode::PropertyDefinition(def) => Some(expr::property_key(&mut ctx, &def.key, def.computed)?),
      MemberNode::StaticBlock(_) => None,
    };
    keys.push(key);
  }

  let desc = Rc::new_cyclic(|home: &Weak<ClassDescriptor>| {
    let mut desc = ClassDescriptor {
      name: name.clone(),
      constructor: None,
      fields: Vec::new(),
      methods: PropertyMap::new(),
      accessors: PropertyMap::new(),
      static_methods: PropertyMap::new(),
      static_accessors: PropertyMap::new(),
      super_class: super_class.clone(),
      scope: class_scope.clone(),
    };
    for (index, (member, key)) in node.body.body.iter().zip(keys.iter()).enumerate() {
      match (member, key) {
        (MemberNode::MethodDefinition(def), Some(key)) => {
          let fn_name = if def.kind == MethodKind::Constructor { &name } else { key };
          let f = func::closure_unchecked(
            &ctx,
            ClosureCode::Function(def.value.clone()),
            fn_name,
            Some(home.clone()),
          );
          match (def.kind, def.is_static) {
            (MethodKind::Constructor, _) => desc.constructor = Some(f),
            (MethodKind::Method, false) => {
              desc.methods.insert(key.clone(), f);
            }
            (MethodKind::Method, true) => {
              desc.static_methods.insert(key.clone(), f);
            }
            (kind, false) => set_accessor(&mut desc.accessors, key, kind, f),
            (kind, true) => set_accessor(&mut desc.static_accessors, key, kind, f),
          }
        }
        (MemberNode::PropertyDefinition(def), Some(key)) if !def.is_static => {
          desc.fields.push(FieldInit {
            key: key.clone(),
            node: node.clone(),
            member: index,
          });
        }
        _ => {}
      }
    }
    desc
  });

  let class_fn = Function::new(FunctionKind::Class(desc.clone()), &name);
  let class_value = Value::Function(class_fn.clone());
  if let Some(id) = &node.id {
    class_scope.declare(VariableKind::Const, &id.name, class_value.clone());
  }

  // Static fields and blocks run in order with `this` bound to the class.
  for (member, key) in node.body.body.iter().zip(keys.iter()) {
    let frame = || {
      Frame::call(
        &class_scope,
        FrameKind::Function,
        class_value.clone(),
        Some(Rc::downgrade(&desc)),
      )
    };
    match (member, key) {
      (MemberNode::PropertyDefinition(def), Some(key)) if def.is_static => {
        let value = match &def.value {
          Some(init) => expr::eval_expr(&mut ctx.enter(frame()), init)?,
          None => Value::Undefined,
        };
        define_field(&class_value, key, value);
      }
      (MemberNode::StaticBlock(block), _) => {
        stmt::eval_stmts(&mut ctx.enter(frame()), &block.body)?;
      }
      _ => {}
    }
  }
  Ok(class_fn)
}

/// `new C(...args)` for a class built by [`eval_class`].
pub fn construct(ctx: &mut Context, desc: &Rc<ClassDescriptor>, args: Vec<Value>) -> EvalResult<Value> {
  let instance = Value::Object(Object::with_class(desc.clone()));
  initialize(ctx, desc, &instance, args)?;
  Ok(instance)
}

/// Runs field initializers and the constructor of `desc` against `this`.
///
/// A base class initializes its fields before the constructor body. A derived class does it when
/// `super()` returns, or right after the implicit parent construction when it has no constructor.
fn initialize(
  ctx: &mut Context,
  desc: &Rc<ClassDescriptor>,
  this: &Value,
  args: Vec<Value>,
) -> EvalResult<()> {
  let parent = desc.parent();
  match &desc.constructor {
    Some(ctor) => {
      if parent.is_none() {
        init_fields(ctx, desc, this)?;
      }
      // The sandbox already admitted the `new`; the constructor body is part of it.
      if let FunctionKind::Closure(closure) = ctor.kind() {
        func::call_closure(ctx, closure, this.clone(), args)?;
      }
    }
    None => {
      if let Some(parent) = parent {
        initialize(ctx, &parent, this, args)?;
      }
      init_fields(ctx, desc, this)?;
    }
  }
  Ok(())
}

fn init_fields(ctx: &mut Context, desc: &Rc<ClassDescriptor>, this: &Value) -> EvalResult<()> {
  for field in desc.fields.iter() {
    let value = match field.initializer() {
      Some(init) => {
        let frame = Frame::call(
          &desc.scope,
          FrameKind::Function,
          this.clone(),
          Some(Rc::downgrade(desc)),
        );
        expr::eval_expr(&mut ctx.enter(frame), init)?
      }
      None => Value::Undefined,
    };
    define_field(this, &field.key, value);
  }
  Ok(())
}

fn home_class(ctx: &Context) -> EvalResult<Rc<ClassDescriptor>> {
  ctx.resolve_home().ok_or_else(|| {
    ctx.error(
      EvaluationErrorKind::Unsupported,
      "'super' keyword unexpected here",
    )
  })
}

/// `super(...args)` inside a derived constructor.
pub fn super_call(ctx: &mut Context, args: Vec<Value>) -> EvalResult<Value> {
  let home = home_class(ctx)?;
  let Some(parent) = home.parent() else {
    return Err(ctx.error(
      EvaluationErrorKind::Type,
      format!("class {} has no parent to call with super()", home.name),
    ));
  };
  let this = ctx.resolve_this();
  initialize(ctx, &parent, &this, args)?;
  init_fields(ctx, &home, &this)?;
  Ok(Value::Undefined)
}

/// `super.key`, read with `this` as the receiver.
pub fn super_get(ctx: &mut Context, key: &str) -> EvalResult<Value> {
  let home = home_class(ctx)?;
  let this = ctx.resolve_this();
  let Some(parent_fn) = home.super_class.clone() else {
    return Ok(builtins::proto_get(Proto::Object, key).unwrap_or(Value::Undefined));
  };
  // Inside static methods `this` is the class itself.
  if let Value::Function(_) = this {
    return property::get(ctx, &Value::Function(parent_fn), key);
  }
  let found = parent_fn.class().and_then(|p| p.find_instance(key));
  match found {
    Some(ClassMember::Method(m)) => Ok(Value::Function(m)),
    Some(ClassMember::Accessor(Accessor { get: Some(getter), .. })) => {
      func::call_function(ctx, &getter, this, Vec::new())
    }
    Some(ClassMember::Accessor(_)) => Ok(Value::Undefined),
    None => Ok(builtins::proto_get(Proto::Object, key).unwrap_or(Value::Undefined)),
  }
}

/// Whether `value` was constructed by `desc` or a class extending it.
pub fn is_instance(value: &Value, desc: &Rc<ClassDescriptor>) -> bool {
  let Value::Object(o) = value else {
    return false;
  };
  let mut current = o.class();
  while let Some(class) = current {
    if Rc::ptr_eq(&class, desc) {
      return true;
    }
    current = class.parent();
  }
  false
}
