//! Statements and the completion signals that carry `break`, `continue`, and `return`.

use crate::bind;
use crate::class;
use crate::context::Context;
use crate::error::EvalResult;
use crate::error::Error;
use crate::error::EvaluationErrorKind;
use crate::expr;
use crate::func;
use crate::ops;
use crate::property;
use crate::scope::Frame;
use crate::scope::FrameKind;
use crate::value::ClosureCode;
use crate::value::Property;
use crate::value::Value;
use parse_jsx::ast::ExportDefault;
use parse_jsx::ast::ExportNamedDeclaration;
use parse_jsx::ast::ForHead;
use parse_jsx::ast::ForInStatement;
use parse_jsx::ast::ForInit;
use parse_jsx::ast::ForOfStatement;
use parse_jsx::ast::ForStatement;
use parse_jsx::ast::Pattern;
use parse_jsx::ast::PatternMember;
use parse_jsx::ast::Statement;
use parse_jsx::ast::SwitchStatement;
use parse_jsx::ast::TryStatement;
use parse_jsx::ast::VariableDeclaration;
use parse_jsx::ast::VariableKind;
use std::rc::Rc;

/// How a statement finished. Abrupt completions travel up as values until something consumes
/// them: a loop, a labeled statement, or a function call.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
  Normal,
  Break(Option<Rc<str>>),
  Continue(Option<Rc<str>>),
  Return(Value),
}

/// Runs a statement list after hoisting its function declarations.
pub fn eval_stmts(ctx: &mut Context, stmts: &[Statement]) -> EvalResult<Completion> {
  hoist(ctx, stmts.iter())?;
  for stmt in stmts.iter() {
    match eval_stmt(ctx, stmt)? {
      Completion::Normal => {}
      abrupt => return Ok(abrupt),
    }
  }
  Ok(Completion::Normal)
}

fn hoist<'a>(ctx: &mut Context, stmts: impl Iterator<Item = &'a Statement>) -> EvalResult<()> {
  for stmt in stmts {
    let node = match stmt {
      Statement::FunctionDeclaration(f) => f,
      Statement::ExportNamedDeclaration(ExportNamedDeclaration {
        declaration: Some(decl),
        ..
      }) => match &**decl {
        Statement::FunctionDeclaration(f) => f,
        _ => continue,
      },
      Statement::ExportDefaultDeclaration(d) => match &d.declaration {
        ExportDefault::FunctionDeclaration(f) if f.id.is_some() => f,
        _ => continue,
      },
      Statement::LabeledStatement(l) => {
        hoist(ctx, std::iter::once(&*l.body))?;
        continue;
      }
      _ => continue,
    };
    let Some(id) = &node.id else {
      continue;
    };
    let f = func::create_closure(ctx, ClosureCode::Function(node.clone()), None)
      .map_err(|err| err.at(node.loc))?;
    ctx.declare_function(&id.name, Value::Function(f));
  }
  Ok(())
}

pub fn eval_stmt(ctx: &mut Context, stmt: &Statement) -> EvalResult<Completion> {
  eval_labeled(ctx, stmt, &[]).map_err(|err| err.at(stmt.loc()))
}

/// `labels` are the labels directly attached to `stmt`; loops consume matching signals.
fn eval_labeled(ctx: &mut Context, stmt: &Statement, labels: &[Rc<str>]) -> EvalResult<Completion> {
  match stmt {
    Statement::ExpressionStatement(s) => {
      expr::eval_expr(ctx, &s.expression)?;
      Ok(Completion::Normal)
    }
    Statement::BlockStatement(b) => eval_stmts(&mut ctx.block(), &b.body),
    Statement::EmptyStatement(_) | Statement::DebuggerStatement(_) => Ok(Completion::Normal),
    Statement::ReturnStatement(r) => {
      let value = match &r.argument {
        Some(arg) => expr::eval_expr(ctx, arg)?,
        None => Value::Undefined,
      };
      Ok(Completion::Return(value))
    }
    Statement::LabeledStatement(l) => {
      let label: Rc<str> = Rc::from(l.label.name.as_str());
      let mut inner = labels.to_vec();
      inner.push(label.clone());
      match eval_labeled(ctx, &l.body, &inner).map_err(|err| err.at(l.body.loc()))? {
        Completion::Break(Some(target)) if target == label => Ok(Completion::Normal),
        other => Ok(other),
      }
    }
    Statement::BreakStatement(b) => Ok(Completion::Break(
      b.label.as_ref().map(|l| Rc::from(l.name.as_str())),
    )),
    Statement::ContinueStatement(c) => Ok(Completion::Continue(
      c.label.as_ref().map(|l| Rc::from(l.name.as_str())),
    )),
    Statement::IfStatement(s) => {
      let test = expr::eval_expr(ctx, &s.test)?;
      if ops::truthy(&test) {
        eval_stmt(ctx, &s.consequent)
      } else if let Some(alt) = &s.alternate {
        eval_stmt(ctx, alt)
      } else {
        Ok(Completion::Normal)
      }
    }
    Statement::SwitchStatement(s) => eval_switch(ctx, s),
    Statement::ThrowStatement(t) => {
      let value = expr::eval_expr(ctx, &t.argument)?;
      Err(Error::Thrown(value))
    }
    Statement::TryStatement(t) => eval_try(ctx, t),
    Statement::WhileStatement(w) => {
      loop {
        let test = expr::eval_expr(ctx, &w.test)?;
        if !ops::truthy(&test) {
          break;
        }
        let completion = eval_stmt(&mut ctx.block(), &w.body)?;
        if let Some(exit) = after_iteration(completion, labels) {
          return Ok(exit);
        }
      }
      Ok(Completion::Normal)
    }
    Statement::DoWhileStatement(w) => {
      loop {
        let completion = eval_stmt(&mut ctx.block(), &w.body)?;
        if let Some(exit) = after_iteration(completion, labels) {
          return Ok(exit);
        }
        let test = expr::eval_expr(ctx, &w.test)?;
        if !ops::truthy(&test) {
          break;
        }
      }
      Ok(Completion::Normal)
    }
    Statement::ForStatement(f) => eval_for(ctx, f, labels),
    Statement::ForInStatement(f) => eval_for_in(ctx, f, labels),
    Statement::ForOfStatement(f) => eval_for_of(ctx, f, labels),
    // Declared when the enclosing statement list was hoisted.
    Statement::FunctionDeclaration(_) => Ok(Completion::Normal),
    Statement::ClassDeclaration(c) => {
      let f = class::eval_class(ctx, c)?;
      if let Some(id) = &c.id {
        ctx.declare(VariableKind::Const, &id.name, Value::Function(f));
      }
      Ok(Completion::Normal)
    }
    Statement::VariableDeclaration(decl) => {
      eval_var_decl(ctx, decl)?;
      Ok(Completion::Normal)
    }
    // There is no module loader, so imports bind nothing.
    Statement::ImportDeclaration(_) => Ok(Completion::Normal),
    Statement::ExportNamedDeclaration(e) => {
      eval_export_named(ctx, e)?;
      Ok(Completion::Normal)
    }
    Statement::ExportDefaultDeclaration(e) => {
      let value = match &e.declaration {
        ExportDefault::FunctionDeclaration(f) => match &f.id {
          Some(id) => ctx
            .resolve_identifier(&id.name)
            .map(|var| var.value)
            .unwrap_or(Value::Undefined),
          None => {
            let f = func::create_closure(ctx, ClosureCode::Function(f.clone()), None)?;
            f.define("name", Property::hidden(Value::string("default")));
            Value::Function(f)
          }
        },
        ExportDefault::ClassDeclaration(c) => {
          let f = class::eval_class(ctx, c)?;
          match &c.id {
            Some(id) => ctx.declare(VariableKind::Const, &id.name, Value::Function(f.clone())),
            None => f.define("name", Property::hidden(Value::string("default"))),
          }
          Value::Function(f)
        }
        ExportDefault::Expression(e) => expr::named_value(ctx, e, "default")?,
      };
      ctx.export("default", value);
      Ok(Completion::Normal)
    }
    Statement::ExportAllDeclaration(_) => Err(ctx.error(
      EvaluationErrorKind::Unsupported,
      "export * is not supported",
    )),
    Statement::WithStatement(_) => Err(ctx.error(
      EvaluationErrorKind::Unsupported,
      "with statement is not supported",
    )),
  }
}

/// What a loop does with its body's completion: `None` keeps looping, `Some` leaves the loop.
fn after_iteration(completion: Completion, labels: &[Rc<str>]) -> Option<Completion> {
  match completion {
    Completion::Normal | Completion::Continue(None) => None,
    Completion::Continue(Some(l)) if labels.contains(&l) => None,
    Completion::Break(None) => Some(Completion::Normal),
    Completion::Break(Some(l)) if labels.contains(&l) => Some(Completion::Normal),
    other => Some(other),
  }
}

pub fn eval_var_decl(ctx: &mut Context, decl: &VariableDeclaration) -> EvalResult<()> {
  for declarator in decl.declarations.iter() {
    match (&declarator.id, &declarator.init) {
      // `var x;` must not clobber an earlier `var x = 1`.
      (Pattern::Identifier(id), None) if decl.kind == VariableKind::Var => {
        ctx.define_variable(VariableKind::Var, &id.name);
      }
      (Pattern::Identifier(id), Some(init)) => {
        let value = expr::named_value(ctx, init, &id.name)?;
        ctx.declare(decl.kind, &id.name, value);
      }
      (pattern, init) => {
        let value = match init {
          Some(init) => expr::eval_expr(ctx, init)?,
          None => Value::Undefined,
        };
        let binding = bind::resolve_pattern(ctx, pattern)?;
        bind::apply_binding(ctx, &binding, value, Some(decl.kind))?;
      }
    }
  }
  Ok(())
}

/// Binds a `for-in`/`for-of` head for one iteration.
fn bind_head(ctx: &mut Context, head: &ForHead, value: Value) -> EvalResult<()> {
  let (pattern, kind) = match head {
    ForHead::VariableDeclaration(decl) => match decl.declarations.first() {
      Some(d) => (&d.id, Some(decl.kind)),
      None => return Err(Error::Logic("for head declares nothing".into())),
    },
    ForHead::Pattern(p) => (p, None),
  };
  let binding = bind::resolve_pattern(ctx, pattern)?;
  bind::apply_binding(ctx, &binding, value, kind)
}

fn eval_for(ctx: &mut Context, f: &ForStatement, labels: &[Rc<str>]) -> EvalResult<Completion> {
  let mut head = ctx.block();
  let mut per_iteration = Vec::new();
  match &f.init {
    Some(ForInit::VariableDeclaration(decl)) => {
      eval_var_decl(&mut head, decl)?;
      if decl.kind == VariableKind::Let {
        per_iteration = head.scope().variable_names();
      }
    }
    Some(ForInit::Expression(e)) => {
      expr::eval_expr(&mut head, e)?;
    }
    None => {}
  }
  let head_frame = head.scope().clone();
  loop {
    if let Some(test) = &f.test {
      let test = expr::eval_expr(&mut head, test)?;
      if !ops::truthy(&test) {
        break;
      }
    }
    // Each iteration sees its own copy of the `let` bindings, so closures capture per-iteration
    // values. Changes are copied back before the update runs.
    let frame = Frame::child(&head_frame, FrameKind::Block, head.resolve_this());
    for name in per_iteration.iter() {
      if let Some(var) = head_frame.get(name) {
        frame.declare(VariableKind::Let, name, var.value);
      }
    }
    let completion = eval_stmt(&mut head.enter(frame.clone()), &f.body)?;
    for name in per_iteration.iter() {
      if let Some(var) = frame.get(name) {
        head_frame.assign(name, var.value);
      }
    }
    if let Some(exit) = after_iteration(completion, labels) {
      return Ok(exit);
    }
    if let Some(update) = &f.update {
      expr::eval_expr(&mut head, update)?;
    }
  }
  Ok(Completion::Normal)
}

fn eval_for_in(ctx: &mut Context, f: &ForInStatement, labels: &[Rc<str>]) -> EvalResult<Completion> {
  let target = expr::eval_expr(ctx, &f.right)?;
  for key in property::own_enumerable_keys(&target) {
    let mut iteration = ctx.block();
    bind_head(&mut iteration, &f.left, Value::String(key))?;
    let completion = eval_stmt(&mut iteration, &f.body)?;
    if let Some(exit) = after_iteration(completion, labels) {
      return Ok(exit);
    }
  }
  Ok(Completion::Normal)
}

fn eval_for_of(ctx: &mut Context, f: &ForOfStatement, labels: &[Rc<str>]) -> EvalResult<Completion> {
  if f.is_await {
    return Err(ctx.error(EvaluationErrorKind::Unsupported, "for await is not supported"));
  }
  let iterable = expr::eval_expr(ctx, &f.right)?;
  for item in property::iterate(ctx, &iterable)? {
    let mut iteration = ctx.block();
    bind_head(&mut iteration, &f.left, item)?;
    let completion = eval_stmt(&mut iteration, &f.body)?;
    if let Some(exit) = after_iteration(completion, labels) {
      return Ok(exit);
    }
  }
  Ok(Completion::Normal)
}

fn eval_switch(ctx: &mut Context, s: &SwitchStatement) -> EvalResult<Completion> {
  let discriminant = expr::eval_expr(ctx, &s.discriminant)?;
  let mut ctx = ctx.block();
  hoist(&mut ctx, s.cases.iter().flat_map(|c| c.consequent.iter()))?;

  let mut start = None;
  for (i, case) in s.cases.iter().enumerate() {
    let Some(test) = &case.test else {
      continue;
    };
    let candidate = expr::eval_expr(&mut ctx, test)?;
    if ops::strict_equals(&discriminant, &candidate) {
      start = Some(i);
      break;
    }
  }
  let start = start.or_else(|| s.cases.iter().position(|c| c.test.is_none()));
  let Some(start) = start else {
    return Ok(Completion::Normal);
  };

  for case in s.cases[start..].iter() {
    for stmt in case.consequent.iter() {
      match eval_stmt(&mut ctx, stmt)? {
        Completion::Normal => {}
        Completion::Break(None) => return Ok(Completion::Normal),
        abrupt => return Ok(abrupt),
      }
    }
  }
  Ok(Completion::Normal)
}

fn eval_try(ctx: &mut Context, t: &TryStatement) -> EvalResult<Completion> {
  let result = eval_stmts(&mut ctx.block(), &t.block.body);
  let result = match (result, &t.handler) {
    (Err(Error::Thrown(thrown)), Some(handler)) => {
      let mut catch = ctx.block();
      match &handler.param {
        Some(param) => {
          let binding = bind::resolve_pattern(&mut catch, param)?;
          bind::apply_binding(&mut catch, &binding, thrown, Some(VariableKind::Let))
            .and_then(|()| eval_stmts(&mut catch, &handler.body.body))
        }
        None => eval_stmts(&mut catch, &handler.body.body),
      }
    }
    (result, _) => result,
  };
  if let Some(finalizer) = &t.finalizer {
    match eval_stmts(&mut ctx.block(), &finalizer.body)? {
      Completion::Normal => {}
      abrupt => return Ok(abrupt),
    }
  }
  result
}

fn eval_export_named(ctx: &mut Context, e: &ExportNamedDeclaration) -> EvalResult<()> {
  if e.source.is_some() {
    return Err(ctx.error(
      EvaluationErrorKind::Unsupported,
      "re-exporting from another module is not supported",
    ));
  }
  if let Some(decl) = &e.declaration {
    eval_stmt(ctx, decl)?;
    let mut names = Vec::new();
    match &**decl {
      Statement::FunctionDeclaration(f) => names.extend(f.id.iter().map(|id| id.name.as_str())),
      Statement::ClassDeclaration(c) => names.extend(c.id.iter().map(|id| id.name.as_str())),
      Statement::VariableDeclaration(v) => {
        for d in v.declarations.iter() {
          bound_names(&d.id, &mut names);
        }
      }
      _ => {}
    }
    for name in names {
      let value = ctx
        .resolve_identifier(name)
        .map(|var| var.value)
        .unwrap_or(Value::Undefined);
      ctx.export(name, value);
    }
  }
  for spec in e.specifiers.iter() {
    let Some(var) = ctx.resolve_identifier(&spec.local.name) else {
      return Err(ctx.error_at(
        EvaluationErrorKind::Export,
        format!("Export '{}' is not defined", spec.local.name),
        spec.loc,
      ));
    };
    ctx.export(&spec.exported.name, var.value);
  }
  Ok(())
}

/// Every identifier a pattern declares, in source order.
fn bound_names<'a>(pattern: &'a Pattern, out: &mut Vec<&'a str>) {
  match pattern {
    Pattern::Identifier(id) => out.push(&id.name),
    Pattern::ObjectPattern(o) => {
      for member in o.properties.iter() {
        match member {
          PatternMember::Property(p) => bound_names(&p.value, out),
          PatternMember::RestElement(r) => bound_names(&r.argument, out),
        }
      }
    }
    Pattern::ArrayPattern(a) => {
      for elem in a.elements.iter().flatten() {
        bound_names(elem, out);
      }
    }
    Pattern::RestElement(r) => bound_names(&r.argument, out),
    Pattern::AssignmentPattern(a) => bound_names(&a.left, out),
    Pattern::MemberExpression(_) => {}
  }
}

#[cfg(test)]
mod tests {
  use super::eval_stmts;
  use super::Completion;
  use crate::context::Context;
  use crate::error::Error;
  use crate::options::EvaluateOptions;
  use crate::value::Value;

  fn run(src: &str) -> (Context, Completion) {
    let program = parse_jsx::parse(src).unwrap();
    let mut ctx = Context::new(EvaluateOptions::default());
    let completion = eval_stmts(&mut ctx, &program.body).unwrap();
    (ctx, completion)
  }

  fn var(ctx: &Context, name: &str) -> Value {
    ctx.resolve_identifier(name).map(|v| v.value).unwrap_or(Value::Undefined)
  }

  #[test]
  fn function_declarations_are_hoisted() {
    let (ctx, _) = run("const x = f(); function f() { return 3; }");
    assert_eq!(var(&ctx, "x"), Value::Number(3.0));
  }

  #[test]
  fn labeled_continue_targets_the_outer_loop() {
    let (ctx, _) = run(
      "let n = 0;
       outer: for (let i = 0; i < 3; i++) {
         for (let j = 0; j < 3; j++) {
           if (j === 1) continue outer;
           n++;
         }
       }",
    );
    assert_eq!(var(&ctx, "n"), Value::Number(3.0));
  }

  #[test]
  fn labeled_blocks_consume_their_break() {
    let (ctx, completion) = run("let a = 1; block: { a = 2; break block; a = 3; }");
    assert_eq!(completion, Completion::Normal);
    assert_eq!(var(&ctx, "a"), Value::Number(2.0));
  }

  #[test]
  fn let_loop_bindings_are_per_iteration() {
    let (ctx, _) = run(
      "const fs = [];
       for (let i = 0; i < 3; i++) { fs.push(() => i); }
       const out = fs[0]() + fs[1]() + fs[2]();",
    );
    assert_eq!(var(&ctx, "out"), Value::Number(3.0));
  }

  #[test]
  fn var_redeclaration_keeps_the_value() {
    let (ctx, _) = run("var x = 1; var x;");
    assert_eq!(var(&ctx, "x"), Value::Number(1.0));
  }

  #[test]
  fn finally_overrides_the_try_completion() {
    let (ctx, _) = run(
      "function f() { try { return 1; } finally { return 2; } }
       const r = f();",
    );
    assert_eq!(var(&ctx, "r"), Value::Number(2.0));
  }

  #[test]
  fn uncaught_throws_escape_as_thrown_values() {
    let program = parse_jsx::parse("throw 'boom';").unwrap();
    let mut ctx = Context::new(EvaluateOptions::default());
    match eval_stmts(&mut ctx, &program.body) {
      Err(Error::Thrown(v)) => assert_eq!(v, Value::string("boom")),
      other => panic!("unexpected {:?}", other),
    }
  }
}
