use super::ParseCtx;
use super::Parser;
use crate::ast::BlockStatement;
use crate::ast::Class;
use crate::ast::ClassBody;
use crate::ast::ClassMember;
use crate::ast::Expression;
use crate::ast::Function;
use crate::ast::Identifier;
use crate::ast::LiteralValue;
use crate::ast::MethodDefinition;
use crate::ast::MethodKind;
use crate::ast::Pattern;
use crate::ast::PrivateIdentifier;
use crate::ast::PropertyDefinition;
use crate::ast::RestElement;
use crate::ast::StaticBlock;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::expr::Asi;
use crate::token::TT;
use std::rc::Rc;

fn is_constructor_key(key: &Expression) -> bool {
  match key {
    Expression::Identifier(id) => id.name == "constructor",
    Expression::Literal(lit) => lit.value == LiteralValue::String("constructor".to_string()),
    _ => false,
  }
}

impl<'a> Parser<'a> {
  /// Parses `(a, b = 1, ...rest)`.
  pub fn func_params(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Pattern>> {
    self.require(TT::ParenthesisOpen)?;
    let mut params = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      let start = self.start();
      if self.eat(TT::DotDotDot) {
        let argument = self.pat(ctx)?;
        params.push(
          RestElement {
            argument: Box::new(argument),
            loc: self.loc_since(start),
          }
          .into(),
        );
        // A rest parameter must be last.
        break;
      };
      params.push(self.pat_with_default(ctx, [TT::Comma, TT::ParenthesisClose])?);
      if !self.eat(TT::Comma) {
        break;
      };
    }
    self.require(TT::ParenthesisClose)?;
    Ok(params)
  }

  /// Parses a function body block, including its directive prologue.
  pub fn func_body(&mut self, ctx: ParseCtx) -> SyntaxResult<BlockStatement> {
    let start = self.start();
    self.require(TT::BraceOpen)?;
    let body = self.stmts_with_directives(ctx, TT::BraceClose)?;
    self.require(TT::BraceClose)?;
    Ok(BlockStatement {
      body,
      loc: self.loc_since(start),
    })
  }

  /// Parses everything after the name: parameters and body.
  pub fn func_params_and_body(
    &mut self,
    ctx: ParseCtx,
    id: Option<Identifier>,
    is_async: bool,
    generator: bool,
    start: usize,
  ) -> SyntaxResult<Function> {
    let fn_ctx = ctx.in_function(is_async, generator);
    let params = self.func_params(fn_ctx)?;
    let body = self.func_body(fn_ctx)?;
    Ok(Function {
      id,
      params,
      body,
      generator,
      is_async,
      loc: self.loc_since(start),
    })
  }

  /// Parses `async function* name(...) {...}`. The name is required for declarations.
  fn func(&mut self, ctx: ParseCtx, name_required: bool) -> SyntaxResult<Function> {
    let start = self.start();
    let is_async = self.eat(TT::KeywordAsync);
    self.require(TT::KeywordFunction)?;
    let generator = self.eat(TT::Asterisk);
    // The name of a function expression follows the rules of its own body.
    let name_ctx = if name_required { ctx } else { ctx.in_function(is_async, generator) };
    let id = self.maybe_id_pat(name_ctx);
    if name_required && id.is_none() {
      return Err(self.peek().error(SyntaxErrorType::ExpectedSyntax("function name")));
    };
    self.func_params_and_body(ctx, id, is_async, generator, start)
  }

  pub fn func_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Rc<Function>> {
    Ok(Rc::new(self.func(ctx, false)?))
  }

  pub fn func_decl(&mut self, ctx: ParseCtx, name_required: bool) -> SyntaxResult<Rc<Function>> {
    Ok(Rc::new(self.func(ctx, name_required)?))
  }

  fn class(&mut self, ctx: ParseCtx, name_required: bool) -> SyntaxResult<Class> {
    let start = self.start();
    self.require(TT::KeywordClass)?;
    let id = match self.peek().typ {
      TT::KeywordExtends | TT::BraceOpen => None,
      _ => Some(self.id_pat(ctx)?),
    };
    if name_required && id.is_none() {
      return Err(self.peek().error(SyntaxErrorType::ExpectedSyntax("class name")));
    };
    let super_class = if self.eat(TT::KeywordExtends) {
      Some(Box::new(self.expr(ctx, [TT::BraceOpen])?))
    } else {
      None
    };
    let body = self.class_body(ctx)?;
    Ok(Class {
      id,
      super_class,
      body,
      loc: self.loc_since(start),
    })
  }

  pub fn class_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Rc<Class>> {
    Ok(Rc::new(self.class(ctx, false)?))
  }

  pub fn class_decl(&mut self, ctx: ParseCtx, name_required: bool) -> SyntaxResult<Rc<Class>> {
    Ok(Rc::new(self.class(ctx, name_required)?))
  }

  fn class_body(&mut self, ctx: ParseCtx) -> SyntaxResult<ClassBody> {
    let start = self.start();
    self.require(TT::BraceOpen)?;
    let mut body = Vec::new();
    loop {
      if self.eat(TT::Semicolon) {
        continue;
      };
      if self.eat(TT::BraceClose) {
        break;
      };
      body.push(self.class_member(ctx)?);
    }
    Ok(ClassBody {
      body,
      loc: self.loc_since(start),
    })
  }

  fn class_member(&mut self, ctx: ParseCtx) -> SyntaxResult<ClassMember> {
    let start = self.start();
    let (t0, t1) = self.peek_2();
    if t0.typ == TT::KeywordStatic && t1.typ == TT::BraceOpen {
      self.consume();
      self.consume();
      let body_ctx = ctx.in_function(false, false);
      let body = self.stmts(body_ctx, TT::BraceClose)?;
      self.require(TT::BraceClose)?;
      return Ok(
        StaticBlock {
          body,
          loc: self.loc_since(start),
        }
        .into(),
      );
    };
    let is_static = t0.typ == TT::KeywordStatic
      && self.is_modifier_followed_by_key()
      && self.eat(TT::KeywordStatic);

    let mut kind = MethodKind::Method;
    let mut is_async = false;
    let mut generator = false;
    let t = self.peek();
    match t.typ {
      TT::KeywordGet | TT::KeywordSet if self.is_modifier_followed_by_key() => {
        self.consume();
        kind = if t.typ == TT::KeywordGet {
          MethodKind::Get
        } else {
          MethodKind::Set
        };
      }
      TT::KeywordAsync if self.is_modifier_followed_by_key() => {
        self.consume();
        is_async = true;
        generator = self.eat(TT::Asterisk);
      }
      TT::Asterisk => {
        self.consume();
        generator = true;
      }
      _ => {}
    };

    let key_tok = self.peek();
    let (key, computed) = if key_tok.typ == TT::PrivateMember {
      self.consume();
      let key: Expression = PrivateIdentifier {
        name: self.str(key_tok.loc)[1..].to_string(),
        loc: self.loc_of(key_tok.loc),
      }
      .into();
      (key, false)
    } else {
      self.property_key(ctx)?
    };

    if self.peek().typ == TT::ParenthesisOpen {
      if kind == MethodKind::Method && !is_static && !computed && is_constructor_key(&key) {
        kind = MethodKind::Constructor;
      };
      let func_start = self.start();
      let value = self.func_params_and_body(ctx, None, is_async, generator, func_start)?;
      return Ok(
        MethodDefinition {
          key,
          value: Rc::new(value),
          kind,
          computed,
          is_static,
          loc: self.loc_since(start),
        }
        .into(),
      );
    };
    if kind != MethodKind::Method || is_async || generator {
      return Err(self.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::ParenthesisOpen)));
    };

    let value = if self.eat(TT::Equals) {
      let field_ctx = ctx.in_function(false, false);
      Some(self.expr_with_asi(field_ctx, [TT::Semicolon, TT::BraceClose], &mut Asi::can())?)
    } else {
      None
    };
    self.consume_semicolon_or_asi()?;
    Ok(
      PropertyDefinition {
        key,
        value,
        computed,
        is_static,
        loc: self.loc_since(start),
      }
      .into(),
    )
  }
}
