//! Binding patterns: the targets of declarations, parameters, assignments and loop heads.
//!
//! A pattern is first resolved into a [`Binding`], which evaluates the parts that do not depend on
//! the incoming value (computed keys and member owners), then applied to a value. Defaults stay as
//! expressions and only run when the incoming value is `undefined`.

use crate::context::Context;
use crate::error::EvalResult;
use crate::error::Error;
use crate::error::EvaluationErrorKind;
use crate::expr;
use crate::map::PropertyMap;
use crate::ops;
use crate::property;
use crate::value::Array;
use crate::value::Object;
use crate::value::Value;
use parse_jsx::ast::Expression;
use parse_jsx::ast::Pattern;
use parse_jsx::ast::PatternMember;
use parse_jsx::ast::VariableKind;
use std::rc::Rc;

#[derive(Debug)]
pub enum Binding<'a> {
  Identifier {
    name: &'a str,
    default: Option<&'a Expression>,
  },
  Object {
    binds: Vec<(Rc<str>, Binding<'a>)>,
    rest: Option<Box<Binding<'a>>>,
    default: Option<&'a Expression>,
  },
  Array {
    /// `None` marks a hole.
    binds: Vec<Option<Binding<'a>>>,
    rest: Option<Box<Binding<'a>>>,
    default: Option<&'a Expression>,
  },
  /// A rest parameter; the caller supplies the collected remainder.
  Rest { inner: Box<Binding<'a>> },
  /// An assignment into an object or array slot, e.g. `[a.x, b[0]] = pair`.
  Member {
    owner: Value,
    key: Rc<str>,
    default: Option<&'a Expression>,
  },
}

impl<'a> Binding<'a> {
  fn set_default(&mut self, expr: &'a Expression) {
    match self {
      Binding::Identifier { default, .. }
      | Binding::Object { default, .. }
      | Binding::Array { default, .. }
      | Binding::Member { default, .. } => *default = Some(expr),
      Binding::Rest { inner } => inner.set_default(expr),
    }
  }

  fn default(&self) -> Option<&'a Expression> {
    match self {
      Binding::Identifier { default, .. }
      | Binding::Object { default, .. }
      | Binding::Array { default, .. }
      | Binding::Member { default, .. } => *default,
      Binding::Rest { .. } => None,
    }
  }
}

fn misplaced_rest() -> Error {
  Error::Logic("rest element must be last element".into())
}

pub fn resolve_pattern<'a>(ctx: &mut Context, pattern: &'a Pattern) -> EvalResult<Binding<'a>> {
  match pattern {
    Pattern::Identifier(id) => Ok(Binding::Identifier {
      name: &id.name,
      default: None,
    }),
    Pattern::ObjectPattern(obj) => {
      let mut binds = Vec::new();
      let mut rest = None;
      for (i, member) in obj.properties.iter().enumerate() {
        match member {
          PatternMember::Property(prop) => {
            let key = expr::property_key(ctx, &prop.key, prop.computed)?;
            binds.push((key, resolve_pattern(ctx, &prop.value)?));
          }
          PatternMember::RestElement(r) => {
            if i + 1 != obj.properties.len() {
              return Err(misplaced_rest());
            }
            rest = Some(Box::new(resolve_pattern(ctx, &r.argument)?));
          }
        }
      }
      Ok(Binding::Object {
        binds,
        rest,
        default: None,
      })
    }
    Pattern::ArrayPattern(arr) => {
      let mut binds = Vec::new();
      let mut rest = None;
      for (i, elem) in arr.elements.iter().enumerate() {
        match elem {
          None => binds.push(None),
          Some(Pattern::RestElement(r)) => {
            if i + 1 != arr.elements.len() {
              return Err(misplaced_rest());
            }
            rest = Some(Box::new(resolve_pattern(ctx, &r.argument)?));
          }
          Some(p) => binds.push(Some(resolve_pattern(ctx, p)?)),
        }
      }
      Ok(Binding::Array {
        binds,
        rest,
        default: None,
      })
    }
    Pattern::RestElement(r) => Ok(Binding::Rest {
      inner: Box::new(resolve_pattern(ctx, &r.argument)?),
    }),
    Pattern::AssignmentPattern(a) => {
      let mut binding = resolve_pattern(ctx, &a.left)?;
      binding.set_default(&a.right);
      Ok(binding)
    }
    Pattern::MemberExpression(m) => {
      let owner = expr::eval_expr(ctx, &m.object)?;
      let key = expr::member_key(ctx, m)?;
      Ok(Binding::Member {
        owner,
        key,
        default: None,
      })
    }
  }
}

/// Binds `value` to `binding`. With a `kind` every name is declared in the current scope;
/// without one, names are assigned up the scope chain.
pub fn apply_binding(
  ctx: &mut Context,
  binding: &Binding<'_>,
  value: Value,
  kind: Option<VariableKind>,
) -> EvalResult<()> {
  let value = match (&value, binding.default()) {
    (Value::Undefined, Some(default)) => expr::eval_expr(ctx, default)?,
    _ => value,
  };
  match binding {
    Binding::Identifier { name, .. } => match kind {
      Some(kind) => {
        ctx.declare(kind, name, value);
        Ok(())
      }
      None => ctx.set_variable(name, value),
    },
    Binding::Object { binds, rest, .. } => {
      if value.is_nullish() {
        return Err(ctx.error(
          EvaluationErrorKind::Type,
          format!("Cannot destructure '{0}' as it is {0}.", ops::to_js_string(&value)),
        ));
      }
      let mut remaining: PropertyMap<Value> = property::own_enumerable_entries(ctx, &value)?
        .into_iter()
        .collect();
      for (key, bind) in binds.iter() {
        let v = property::get(ctx, &value, key)?;
        apply_binding(ctx, bind, v, kind)?;
        remaining.remove(key);
      }
      if let Some(rest) = rest {
        apply_binding(ctx, rest, Value::Object(Object::from_values(remaining)), kind)?;
      }
      Ok(())
    }
    Binding::Array { binds, rest, .. } => {
      let items = property::iterate(ctx, &value)?;
      for (i, bind) in binds.iter().enumerate() {
        if let Some(bind) = bind {
          let v = items.get(i).cloned().unwrap_or(Value::Undefined);
          apply_binding(ctx, bind, v, kind)?;
        }
      }
      if let Some(rest) = rest {
        let tail = items.get(binds.len()..).unwrap_or_default().to_vec();
        apply_binding(ctx, rest, Value::Array(Array::new(tail)), kind)?;
      }
      Ok(())
    }
    Binding::Rest { inner } => apply_binding(ctx, inner, value, kind),
    Binding::Member { owner, key, .. } => property::set(ctx, owner, key, value),
  }
}

#[cfg(test)]
mod tests {
  use super::apply_binding;
  use super::resolve_pattern;
  use crate::context::Context;
  use crate::error::Error;
  use crate::options::EvaluateOptions;
  use crate::value::Value;
  use parse_jsx::ast::Pattern;
  use parse_jsx::ast::Statement;
  use parse_jsx::ast::VariableKind;

  fn pattern(src: &str) -> Pattern {
    let program = parse_jsx::parse(&format!("let {} = 0;", src)).unwrap();
    match program.body.into_iter().next() {
      Some(Statement::VariableDeclaration(mut decl)) => decl.declarations.remove(0).id,
      other => panic!("unexpected {:?}", other),
    }
  }

  fn lookup(ctx: &Context, name: &str) -> Value {
    ctx.resolve_identifier(name).unwrap().value
  }

  #[test]
  fn array_rest_takes_elements_after_positional_slots() {
    let mut ctx = Context::new(EvaluateOptions::default());
    let pat = pattern("[a, , ...rest]");
    let binding = resolve_pattern(&mut ctx, &pat).unwrap();
    let value = Value::from_json(serde_json::json!([1, 2, 3, 4]));
    apply_binding(&mut ctx, &binding, value, Some(VariableKind::Let)).unwrap();
    assert_eq!(lookup(&ctx, "a"), Value::Number(1.0));
    assert_eq!(lookup(&ctx, "rest").to_json(), serde_json::json!([3, 4]));
  }

  #[test]
  fn object_rest_excludes_matched_keys() {
    let mut ctx = Context::new(EvaluateOptions::default());
    let pat = pattern("{ a, b: { c = 5 }, ...others }");
    let binding = resolve_pattern(&mut ctx, &pat).unwrap();
    let value = Value::from_json(serde_json::json!({"a": 1, "b": {}, "d": 4}));
    apply_binding(&mut ctx, &binding, value, Some(VariableKind::Const)).unwrap();
    assert_eq!(lookup(&ctx, "a"), Value::Number(1.0));
    assert_eq!(lookup(&ctx, "c"), Value::Number(5.0));
    assert_eq!(lookup(&ctx, "others").to_json(), serde_json::json!({"d": 4}));
  }

  #[test]
  fn rest_must_be_last() {
    use parse_jsx::ast::ArrayPattern;
    use parse_jsx::ast::Identifier;
    use parse_jsx::ast::RestElement;

    let mut ctx = Context::new(EvaluateOptions::default());
    let pat = Pattern::ArrayPattern(ArrayPattern {
      elements: vec![
        Some(Pattern::RestElement(RestElement {
          argument: Box::new(Pattern::Identifier(Identifier::new("a"))),
          loc: None,
        })),
        Some(Pattern::Identifier(Identifier::new("b"))),
      ],
      loc: None,
    });
    let err = resolve_pattern(&mut ctx, &pat).unwrap_err();
    assert!(matches!(err, Error::Logic(_)));
  }
}
