use crate::bind;
use crate::builtins;
use crate::class;
use crate::context::Context;
use crate::error::EvalResult;
use crate::error::Error;
use crate::error::EvaluationErrorKind;
use crate::func;
use crate::jsx;
use crate::num::number_to_string;
use crate::num::to_int32;
use crate::ops;
use crate::property;
use crate::scope::Frame;
use crate::scope::FrameKind;
use crate::value::Array;
use crate::value::ClosureCode;
use crate::value::Function;
use crate::value::FunctionKind;
use crate::value::Object;
use crate::value::Property;
use crate::value::Value;
use parse_jsx::ast::AssignmentExpression;
use parse_jsx::ast::AssignmentOperator;
use parse_jsx::ast::BinaryExpression;
use parse_jsx::ast::BinaryOperator;
use parse_jsx::ast::CallExpression;
use parse_jsx::ast::Expression;
use parse_jsx::ast::Function as FunctionNode;
use parse_jsx::ast::Literal;
use parse_jsx::ast::LiteralValue;
use parse_jsx::ast::LogicalOperator;
use parse_jsx::ast::MemberExpression;
use parse_jsx::ast::ObjectExpression;
use parse_jsx::ast::ObjectMember;
use parse_jsx::ast::Pattern;
use parse_jsx::ast::PropertyKind;
use parse_jsx::ast::TaggedTemplateExpression;
use parse_jsx::ast::TemplateLiteral;
use parse_jsx::ast::UnaryExpression;
use parse_jsx::ast::UnaryOperator;
use parse_jsx::ast::UpdateExpression;
use parse_jsx::ast::UpdateOperator;
use parse_jsx::ast::VariableKind;
use std::rc::Rc;

/// Evaluates an expression. Errors raised inside are tagged with the innermost node position.
pub fn eval_expr(ctx: &mut Context, expr: &Expression) -> EvalResult<Value> {
  eval_inner(ctx, expr).map_err(|err| err.at(expr.loc()))
}

fn unsupported(ctx: &Context, what: &str) -> Error {
  ctx.error(
    EvaluationErrorKind::Unsupported,
    format!("{} is not supported", what),
  )
}

fn eval_inner(ctx: &mut Context, expr: &Expression) -> EvalResult<Value> {
  match expr {
    Expression::Identifier(id) => lookup_identifier(ctx, &id.name),
    Expression::Literal(lit) => eval_literal(ctx, lit),
    Expression::ThisExpression(_) => Ok(ctx.resolve_this()),
    Expression::Super(_) => Err(unsupported(ctx, "bare 'super'")),
    Expression::ArrayExpression(arr) => {
      let mut items = Vec::with_capacity(arr.elements.len());
      for elem in arr.elements.iter() {
        match elem {
          // Holes read back as null.
          None => items.push(Value::Null),
          Some(Expression::SpreadElement(spread)) => {
            let value = eval_expr(ctx, &spread.argument)?;
            items.extend(property::iterate(ctx, &value)?);
          }
          Some(e) => items.push(eval_expr(ctx, e)?),
        }
      }
      Ok(Value::Array(Array::new(items)))
    }
    Expression::ObjectExpression(obj) => eval_object(ctx, obj),
    Expression::FunctionExpression(f) => eval_function_expression(ctx, f),
    Expression::ArrowFunctionExpression(a) => {
      func::create_closure(ctx, ClosureCode::Arrow(a.clone()), None).map(Value::Function)
    }
    Expression::ClassExpression(c) => class::eval_class(ctx, c).map(Value::Function),
    Expression::UnaryExpression(u) => eval_unary(ctx, u),
    Expression::UpdateExpression(u) => eval_update(ctx, u),
    Expression::BinaryExpression(b) => eval_binary(ctx, b),
    Expression::LogicalExpression(l) => {
      let left = eval_expr(ctx, &l.left)?;
      let short = match l.operator {
        LogicalOperator::And => !ops::truthy(&left),
        LogicalOperator::Or => ops::truthy(&left),
        LogicalOperator::Nullish => !left.is_nullish(),
      };
      if short {
        Ok(left)
      } else {
        eval_expr(ctx, &l.right)
      }
    }
    Expression::AssignmentExpression(a) => eval_assignment(ctx, a),
    Expression::MemberExpression(m) => Ok(eval_member(ctx, m)?.unwrap_or(Value::Undefined)),
    Expression::ConditionalExpression(c) => {
      let test = eval_expr(ctx, &c.test)?;
      if ops::truthy(&test) {
        eval_expr(ctx, &c.consequent)
      } else {
        eval_expr(ctx, &c.alternate)
      }
    }
    Expression::CallExpression(c) => Ok(eval_call(ctx, c)?.unwrap_or(Value::Undefined)),
    Expression::NewExpression(n) => {
      if ctx.options().disable_call || ctx.options().disable_new {
        return Ok(Value::Undefined);
      }
      let callee = eval_expr(ctx, &n.callee)?;
      let args = eval_args(ctx, &n.arguments)?;
      if !matches!(callee, Value::Function(_)) {
        return Err(ctx.error(
          EvaluationErrorKind::NotConstructor,
          format!("{} is not a constructor", callee_name(&n.callee)),
        ));
      }
      func::construct(ctx, &callee, args)
    }
    Expression::SequenceExpression(seq) => {
      let mut last = Value::Undefined;
      for e in seq.expressions.iter() {
        last = eval_expr(ctx, e)?;
      }
      Ok(last)
    }
    Expression::TemplateLiteral(t) => eval_template(ctx, t),
    Expression::TaggedTemplateExpression(t) => eval_tagged_template(ctx, t),
    Expression::ChainExpression(c) => Ok(eval_optional(ctx, &c.expression)?.unwrap_or(Value::Undefined)),
    Expression::AwaitExpression(_) => Err(unsupported(ctx, "await")),
    Expression::YieldExpression(_) => Err(unsupported(ctx, "yield")),
    Expression::ImportExpression(_) => Err(unsupported(ctx, "import")),
    Expression::MetaProperty(m) => Err(unsupported(
      ctx,
      &format!("{}.{}", m.meta.name, m.property.name),
    )),
    Expression::SpreadElement(_) => Err(unsupported(ctx, "spread in this position")),
    Expression::PrivateIdentifier(p) => Err(unsupported(ctx, &format!("bare #{}", p.name))),
    Expression::JsxElement(e) => jsx::eval_element(ctx, e).map(Value::Element),
    Expression::JsxFragment(f) => jsx::eval_fragment(ctx, f).map(Value::Fragment),
    Expression::JsxEmptyExpression(_) => Ok(Value::Undefined),
  }
}

/// Reads a variable. Unresolved names are `undefined` unless reference errors were requested.
fn lookup_identifier(ctx: &Context, name: &str) -> EvalResult<Value> {
  match ctx.resolve_identifier(name) {
    Some(var) => Ok(var.value),
    None if ctx.options().raise_reference_error => Err(ctx.error(
      EvaluationErrorKind::Reference,
      format!("{} is not defined", name),
    )),
    None => Ok(Value::Undefined),
  }
}

pub(crate) fn eval_literal(ctx: &Context, lit: &Literal) -> EvalResult<Value> {
  if lit.regex.is_some() {
    return Err(unsupported(ctx, "regular expression literal"));
  }
  if lit.bigint.is_some() {
    return Err(unsupported(ctx, "BigInt literal"));
  }
  Ok(match &lit.value {
    LiteralValue::Null => Value::Null,
    LiteralValue::Boolean(b) => Value::Bool(*b),
    LiteralValue::Number(n) => Value::Number(*n),
    LiteralValue::String(s) => Value::string(s),
  })
}

fn literal_key(lit: &Literal) -> Rc<str> {
  match &lit.value {
    LiteralValue::String(s) => Rc::from(s.as_str()),
    LiteralValue::Number(n) => Rc::from(number_to_string(*n)),
    LiteralValue::Boolean(b) => Rc::from(b.to_string()),
    LiteralValue::Null => Rc::from("null"),
  }
}

/// Key of an object literal, pattern, or class member.
pub(crate) fn property_key(ctx: &mut Context, key: &Expression, computed: bool) -> EvalResult<Rc<str>> {
  if computed {
    let value = eval_expr(ctx, key)?;
    return Ok(ops::to_property_key(&value));
  }
  match key {
    Expression::Identifier(id) => Ok(Rc::from(id.name.as_str())),
    Expression::PrivateIdentifier(p) => Ok(Rc::from(format!("#{}", p.name))),
    Expression::Literal(lit) => Ok(literal_key(lit)),
    other => {
      let value = eval_expr(ctx, other)?;
      Ok(ops::to_property_key(&value))
    }
  }
}

/// Key of `obj.key`, `obj[key]`, or `this.#key`.
pub(crate) fn member_key(ctx: &mut Context, member: &MemberExpression) -> EvalResult<Rc<str>> {
  property_key(ctx, &member.property, member.computed)
}

/// Gives an anonymous function or class the name it is being bound to, as in `const f = () => {}`.
pub(crate) fn named_value(ctx: &mut Context, expr: &Expression, name: &str) -> EvalResult<Value> {
  let anonymous = match expr {
    Expression::FunctionExpression(f) => f.id.is_none(),
    Expression::ArrowFunctionExpression(_) => true,
    Expression::ClassExpression(c) => c.id.is_none(),
    _ => false,
  };
  let value = eval_expr(ctx, expr)?;
  if anonymous {
    if let Value::Function(f) = &value {
      f.define("name", Property::hidden(Value::string(name)));
    }
  }
  Ok(value)
}

fn eval_function_expression(ctx: &mut Context, node: &Rc<FunctionNode>) -> EvalResult<Value> {
  let code = ClosureCode::Function(node.clone());
  let Some(id) = &node.id else {
    return func::create_closure(ctx, code, None).map(Value::Function);
  };
  // A named function expression sees its own name, and nothing outside does.
  let frame = Frame::child(ctx.scope(), FrameKind::Block, ctx.resolve_this());
  let f = func::create_closure(&mut ctx.enter(frame.clone()), code, None)?;
  frame.declare(VariableKind::Const, &id.name, Value::Function(f.clone()));
  Ok(Value::Function(f))
}

fn eval_object(ctx: &mut Context, obj: &ObjectExpression) -> EvalResult<Value> {
  let object = Object::new();
  for member in obj.properties.iter() {
    let prop = match member {
      ObjectMember::SpreadElement(spread) => {
        let source = eval_expr(ctx, &spread.argument)?;
        for (key, value) in property::own_enumerable_entries(ctx, &source)? {
          object.set_data(&key, value);
        }
        continue;
      }
      ObjectMember::Property(prop) => prop,
    };
    let key = property_key(ctx, &prop.key, prop.computed)?;
    match prop.kind {
      PropertyKind::Init => {
        let value = named_value(ctx, &prop.value, &key)?;
        object.define(&key, Property::data(value));
      }
      PropertyKind::Get | PropertyKind::Set => {
        let Expression::FunctionExpression(node) = &prop.value else {
          return Err(Error::Logic(format!("accessor {} has no function body", key)));
        };
        let f = func::create_closure(ctx, ClosureCode::Function(node.clone()), None)?;
        let (mut get, mut set) = match object.get_own(&key) {
          Some(Property::Accessor { get, set, .. }) => (get, set),
          _ => (None, None),
        };
        if prop.kind == PropertyKind::Get {
          get = Some(f);
        } else {
          set = Some(f);
        }
        object.define(&key, Property::Accessor {
          get,
          set,
          enumerable: true,
        });
      }
    }
  }
  Ok(Value::Object(object))
}

fn eval_unary(ctx: &mut Context, u: &UnaryExpression) -> EvalResult<Value> {
  match u.operator {
    UnaryOperator::Typeof => {
      // `typeof undeclared` never raises.
      if let Expression::Identifier(id) = u.argument.as_ref() {
        return Ok(Value::string(match ctx.resolve_identifier(&id.name) {
          Some(var) => ops::type_of(&var.value),
          None => "undefined",
        }));
      }
      let value = eval_expr(ctx, &u.argument)?;
      Ok(Value::string(ops::type_of(&value)))
    }
    UnaryOperator::Delete => Err(unsupported(ctx, "delete")),
    op => {
      let value = eval_expr(ctx, &u.argument)?;
      Ok(match op {
        UnaryOperator::Minus => Value::Number(-ops::to_number(&value)),
        UnaryOperator::Plus => Value::Number(ops::to_number(&value)),
        UnaryOperator::Not => Value::Bool(!ops::truthy(&value)),
        UnaryOperator::BitNot => Value::Number(!to_int32(ops::to_number(&value)) as f64),
        _ => Value::Undefined,
      })
    }
  }
}

fn eval_binary(ctx: &mut Context, b: &BinaryExpression) -> EvalResult<Value> {
  match b.operator {
    BinaryOperator::In => {
      let key = match b.left.as_ref() {
        Expression::PrivateIdentifier(p) => Rc::from(format!("#{}", p.name)),
        left => {
          let value = eval_expr(ctx, left)?;
          ops::to_property_key(&value)
        }
      };
      let target = eval_expr(ctx, &b.right)?;
      if ops::is_primitive(&target) {
        return Err(ctx.error(
          EvaluationErrorKind::Type,
          format!(
            "Cannot use 'in' operator to search for '{}' in {}",
            key,
            ops::to_js_string(&target)
          ),
        ));
      }
      Ok(Value::Bool(property::has(&target, &key)))
    }
    BinaryOperator::Instanceof => {
      let value = eval_expr(ctx, &b.left)?;
      let target = eval_expr(ctx, &b.right)?;
      let Value::Function(f) = &target else {
        return Err(ctx.error(
          EvaluationErrorKind::Type,
          "Right-hand side of 'instanceof' is not callable",
        ));
      };
      Ok(Value::Bool(instance_of(&value, f)))
    }
    op => {
      let left = eval_expr(ctx, &b.left)?;
      let right = eval_expr(ctx, &b.right)?;
      Ok(ops::binary(op, &left, &right))
    }
  }
}

fn instance_of(value: &Value, f: &Function) -> bool {
  match f.kind() {
    FunctionKind::Class(desc) => class::is_instance(value, desc),
    FunctionKind::Bound(bound) => instance_of(value, &bound.target),
    _ => builtins::native_instance_of(value, f),
  }
}

/// A place that can be read and written by assignment and update operators.
enum Target {
  Variable(Rc<str>),
  Property(Value, Rc<str>),
}

impl Target {
  fn of_member(ctx: &mut Context, m: &MemberExpression) -> EvalResult<Target> {
    let owner = eval_expr(ctx, &m.object)?;
    let key = member_key(ctx, m)?;
    Ok(Target::Property(owner, key))
  }

  fn read(&self, ctx: &mut Context) -> EvalResult<Value> {
    match self {
      Target::Variable(name) => lookup_identifier(ctx, name),
      Target::Property(owner, key) => property::get(ctx, owner, key),
    }
  }

  fn write(&self, ctx: &mut Context, value: Value) -> EvalResult<()> {
    match self {
      Target::Variable(name) => ctx.set_variable(name, value),
      Target::Property(owner, key) => property::set(ctx, owner, key, value),
    }
  }
}

fn eval_update(ctx: &mut Context, u: &UpdateExpression) -> EvalResult<Value> {
  let target = match u.argument.as_ref() {
    Expression::Identifier(id) => Target::Variable(Rc::from(id.name.as_str())),
    Expression::MemberExpression(m) => Target::of_member(ctx, m)?,
    other => {
      return Err(ctx.error(
        EvaluationErrorKind::Type,
        format!("invalid update target {}", other.type_name()),
      ))
    }
  };
  let old = ops::to_number(&target.read(ctx)?);
  let new = match u.operator {
    UpdateOperator::Increment => old + 1.0,
    UpdateOperator::Decrement => old - 1.0,
  };
  target.write(ctx, Value::Number(new))?;
  Ok(Value::Number(if u.prefix { new } else { old }))
}

fn eval_assignment(ctx: &mut Context, a: &AssignmentExpression) -> EvalResult<Value> {
  if a.operator == AssignmentOperator::Assign {
    return match a.left.as_ref() {
      Pattern::Identifier(id) => {
        let value = named_value(ctx, &a.right, &id.name)?;
        ctx.set_variable(&id.name, value.clone())?;
        Ok(value)
      }
      Pattern::MemberExpression(m) => {
        let target = Target::of_member(ctx, m)?;
        let value = eval_expr(ctx, &a.right)?;
        target.write(ctx, value.clone())?;
        Ok(value)
      }
      pattern => {
        let binding = bind::resolve_pattern(ctx, pattern)?;
        let value = eval_expr(ctx, &a.right)?;
        bind::apply_binding(ctx, &binding, value.clone(), None)?;
        Ok(value)
      }
    };
  }

  let target = match a.left.as_ref() {
    Pattern::Identifier(id) => Target::Variable(Rc::from(id.name.as_str())),
    Pattern::MemberExpression(m) => Target::of_member(ctx, m)?,
    _ => {
      return Err(Error::Logic(
        "compound assignment to a destructuring pattern".into(),
      ))
    }
  };
  let current = target.read(ctx)?;
  if let Some(logical) = a.operator.logical() {
    let assign = match logical {
      LogicalOperator::Or => !ops::truthy(&current),
      LogicalOperator::And => ops::truthy(&current),
      LogicalOperator::Nullish => current.is_nullish(),
    };
    if !assign {
      return Ok(current);
    }
    let value = eval_expr(ctx, &a.right)?;
    target.write(ctx, value.clone())?;
    return Ok(value);
  }
  let Some(op) = a.operator.binary() else {
    return Err(Error::Logic(format!("unknown assignment operator {:?}", a.operator)));
  };
  let right = eval_expr(ctx, &a.right)?;
  let value = ops::binary(op, &current, &right);
  target.write(ctx, value.clone())?;
  Ok(value)
}

/// Evaluates one link of an optional chain. `None` means a `?.` short-circuited the chain.
fn eval_optional(ctx: &mut Context, expr: &Expression) -> EvalResult<Option<Value>> {
  match expr {
    Expression::MemberExpression(m) => eval_member(ctx, m),
    Expression::CallExpression(c) => eval_call(ctx, c),
    other => eval_expr(ctx, other).map(Some),
  }
}

fn eval_member(ctx: &mut Context, m: &MemberExpression) -> EvalResult<Option<Value>> {
  if let Expression::Super(_) = m.object.as_ref() {
    let key = member_key(ctx, m)?;
    return class::super_get(ctx, &key).map(Some);
  }
  let Some(object) = eval_optional(ctx, &m.object)? else {
    return Ok(None);
  };
  if m.optional && object.is_nullish() {
    return Ok(None);
  }
  let key = member_key(ctx, m)?;
  property::get(ctx, &object, &key)
    .map(Some)
    .map_err(|err| err.at(m.loc))
}

/// Callee and receiver of a call. Method calls bind `this` to the object they were read from; any
/// other call passes on the caller's `this`.
fn eval_callee(ctx: &mut Context, callee: &Expression) -> EvalResult<Option<(Value, Value)>> {
  let Expression::MemberExpression(m) = callee else {
    let this = ctx.resolve_this();
    return Ok(eval_optional(ctx, callee)?.map(|f| (this, f)));
  };
  if let Expression::Super(_) = m.object.as_ref() {
    let key = member_key(ctx, m)?;
    let f = class::super_get(ctx, &key)?;
    return Ok(Some((ctx.resolve_this(), f)));
  }
  let Some(object) = eval_optional(ctx, &m.object)? else {
    return Ok(None);
  };
  if m.optional && object.is_nullish() {
    return Ok(None);
  }
  let key = member_key(ctx, m)?;
  let f = property::get(ctx, &object, &key)?;
  Ok(Some((object, f)))
}

/// Source-ish name of a callee for error messages.
fn callee_name(callee: &Expression) -> String {
  match callee {
    Expression::Identifier(id) => id.name.clone(),
    Expression::MemberExpression(m) => {
      let object = callee_name(&m.object);
      match m.property.as_ref() {
        Expression::Identifier(id) if !m.computed => format!("{}.{}", object, id.name),
        Expression::PrivateIdentifier(p) => format!("{}.#{}", object, p.name),
        _ => format!("{}[...]", object),
      }
    }
    Expression::ThisExpression(_) => "this".into(),
    Expression::Super(_) => "super".into(),
    other => format!("({})", other.type_name()),
  }
}

fn eval_call(ctx: &mut Context, c: &CallExpression) -> EvalResult<Option<Value>> {
  if ctx.options().disable_call {
    return Ok(Some(Value::Undefined));
  }
  if let Expression::Super(_) = c.callee.as_ref() {
    let args = eval_args(ctx, &c.arguments)?;
    return class::super_call(ctx, args).map(Some);
  }
  let Some((this, callee)) = eval_callee(ctx, &c.callee)? else {
    return Ok(None);
  };
  if c.optional && callee.is_nullish() {
    return Ok(None);
  }
  let args = eval_args(ctx, &c.arguments)?;
  if !matches!(callee, Value::Function(_)) {
    return Err(ctx.error(
      EvaluationErrorKind::NotCallable,
      format!("{} is not a function", callee_name(&c.callee)),
    ));
  }
  func::call(ctx, &callee, this, args).map(Some)
}

pub(crate) fn eval_args(ctx: &mut Context, args: &[Expression]) -> EvalResult<Vec<Value>> {
  let mut values = Vec::with_capacity(args.len());
  for arg in args.iter() {
    match arg {
      Expression::SpreadElement(spread) => {
        let value = eval_expr(ctx, &spread.argument)?;
        values.extend(property::iterate(ctx, &value)?);
      }
      arg => values.push(eval_expr(ctx, arg)?),
    }
  }
  Ok(values)
}

enum TemplatePart<'a> {
  Text(&'a str),
  Expr(&'a Expression),
}

fn eval_template(ctx: &mut Context, t: &TemplateLiteral) -> EvalResult<Value> {
  let mut parts = Vec::with_capacity(t.quasis.len() + t.expressions.len());
  let mut exprs = t.expressions.iter();
  for quasi in t.quasis.iter() {
    let text = quasi.value.cooked.as_deref().unwrap_or(&quasi.value.raw);
    parts.push((quasi.loc, TemplatePart::Text(text)));
    if let Some(e) = exprs.next() {
      parts.push((e.loc(), TemplatePart::Expr(e)));
    }
  }
  for e in exprs {
    parts.push((e.loc(), TemplatePart::Expr(e)));
  }
  // Source order wins when every part has a position; otherwise parts alternate.
  if parts.iter().all(|(loc, _)| loc.is_some()) {
    parts.sort_by_key(|(loc, _)| loc.map(|l| l.start));
  }
  let mut out = String::new();
  for (_, part) in parts {
    match part {
      TemplatePart::Text(text) => out.push_str(text),
      TemplatePart::Expr(e) => {
        let value = eval_expr(ctx, e)?;
        out.push_str(&ops::to_js_string(&value));
      }
    }
  }
  Ok(Value::from(out))
}

fn eval_tagged_template(ctx: &mut Context, t: &TaggedTemplateExpression) -> EvalResult<Value> {
  if ctx.options().disable_call {
    return Ok(Value::Undefined);
  }
  let Some((this, tag)) = eval_callee(ctx, &t.tag)? else {
    return Ok(Value::Undefined);
  };
  let strings = t
    .quasi
    .quasis
    .iter()
    .map(|q| match &q.value.cooked {
      Some(s) => Value::string(s),
      None => Value::Undefined,
    })
    .collect::<Vec<_>>();
  let mut args = vec![Value::Array(Array::new(strings))];
  for e in t.quasi.expressions.iter() {
    args.push(eval_expr(ctx, e)?);
  }
  if !matches!(tag, Value::Function(_)) {
    return Err(ctx.error(
      EvaluationErrorKind::NotCallable,
      format!("{} is not a function", callee_name(&t.tag)),
    ));
  }
  func::call(ctx, &tag, this, args)
}

#[cfg(test)]
mod tests {
  use super::eval_expr;
  use crate::context::Context;
  use crate::error::EvalResult;
  use crate::error::EvaluationErrorKind;
  use crate::options::EvaluateOptions;
  use crate::value::Function;
  use crate::value::Value;
  use parse_jsx::ast::Statement;
  use serde_json::json;

  fn eval_with(src: &str, options: EvaluateOptions) -> EvalResult<Value> {
    let program = parse_jsx::parse(src).unwrap();
    let mut ctx = Context::new(options);
    match program.body.first() {
      Some(Statement::ExpressionStatement(stmt)) => eval_expr(&mut ctx, &stmt.expression),
      other => panic!("not an expression: {:?}", other),
    }
  }

  fn eval(src: &str) -> Value {
    eval_with(src, EvaluateOptions::default()).unwrap()
  }

  #[test]
  fn arithmetic_and_coercion() {
    assert_eq!(eval("1 + 2 * 3"), Value::Number(7.0));
    assert_eq!(eval("'a' + 1"), Value::string("a1"));
    assert_eq!(eval("~7.8"), Value::Number(-8.0));
    assert_eq!(eval("2 ** 10"), Value::Number(1024.0));
    assert_eq!(eval("!''"), Value::Bool(true));
  }

  #[test]
  fn holes_become_null() {
    assert_eq!(eval("[1, , 3]").to_json(), json!([1, null, 3]));
  }

  #[test]
  fn typeof_does_not_raise_on_undeclared_names() {
    let options = EvaluateOptions {
      raise_reference_error: true,
      ..EvaluateOptions::default()
    };
    assert_eq!(
      eval_with("typeof nothing", options.clone()).unwrap(),
      Value::string("undefined")
    );
    let err = eval_with("nothing", options).unwrap_err();
    assert_eq!(err.kind(), Some(EvaluationErrorKind::Reference));
  }

  #[test]
  fn logical_operators_short_circuit() {
    assert_eq!(eval("null ?? 'x'"), Value::string("x"));
    assert_eq!(eval("0 ?? 'x'"), Value::Number(0.0));
    assert_eq!(eval("0 || 'x'"), Value::string("x"));
    assert_eq!(eval("0 && missing()"), Value::Number(0.0));
  }

  #[test]
  fn optional_chains_short_circuit_the_whole_chain() {
    assert_eq!(eval("(void 0)?.a.b.c()"), Value::Undefined);
    let err = eval_with("(void 0).a", EvaluateOptions::default()).unwrap_err();
    assert_eq!(err.kind(), Some(EvaluationErrorKind::Type));
  }

  #[test]
  fn object_literals_support_spread_and_accessors() {
    let value = eval("({ a: 1, ...{ b: 2 }, get c() { return this.a + 1 }, ['d' + 1]: 4 })");
    assert_eq!(value.to_json(), json!({"a": 1, "b": 2, "d1": 4}));
    let c = eval("({ a: 1, get c() { return this.a + 1 } }).c");
    assert_eq!(c, Value::Number(2.0));
  }

  #[test]
  fn templates_interleave_parts() {
    assert_eq!(eval("`a${1}b${'c'}`"), Value::string("a1bc"));
  }

  #[test]
  fn tagged_templates_pass_strings_then_values() {
    let tag = Function::native("tag", |_, _, args| {
      Ok(Value::from(serde_json::to_string(&Value::Array(args.into())).unwrap()))
    });
    let options = EvaluateOptions::default().bind("tag", tag);
    assert_eq!(
      eval_with("tag`x${1}y`", options).unwrap(),
      Value::string(r#"[["x","y"],1]"#)
    );
  }

  #[test]
  fn disabled_calls_do_not_evaluate_arguments() {
    let options = EvaluateOptions {
      disable_call: true,
      raise_reference_error: true,
      ..EvaluateOptions::default()
    };
    assert_eq!(eval_with("missing(alsoMissing)", options).unwrap(), Value::Undefined);
  }

  #[test]
  fn in_operator_checks_keys() {
    assert_eq!(eval("'a' in { a: 1 }"), Value::Bool(true));
    assert_eq!(eval("0 in [1]"), Value::Bool(true));
    assert_eq!(eval("'length' in []"), Value::Bool(true));
    assert_eq!(eval("'b' in { a: 1 }"), Value::Bool(false));
  }
}
