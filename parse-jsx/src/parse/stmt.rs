use super::expr::assignment_precedence;
use super::expr::Asi;
use super::pat::is_valid_pattern_identifier;
use super::ParseCtx;
use super::Parser;
use crate::ast::BlockStatement;
use crate::ast::BreakStatement;
use crate::ast::CatchClause;
use crate::ast::ContinueStatement;
use crate::ast::DebuggerStatement;
use crate::ast::DoWhileStatement;
use crate::ast::EmptyStatement;
use crate::ast::ExportAllDeclaration;
use crate::ast::ExportDefault;
use crate::ast::ExportDefaultDeclaration;
use crate::ast::ExportNamedDeclaration;
use crate::ast::ExportSpecifier;
use crate::ast::Expression;
use crate::ast::ExpressionStatement;
use crate::ast::ForHead;
use crate::ast::ForInStatement;
use crate::ast::ForInit;
use crate::ast::ForOfStatement;
use crate::ast::ForStatement;
use crate::ast::Identifier;
use crate::ast::IfStatement;
use crate::ast::ImportDeclaration;
use crate::ast::ImportDefaultSpecifier;
use crate::ast::ImportNamespaceSpecifier;
use crate::ast::ImportSpecifier;
use crate::ast::ImportSpecifierKind;
use crate::ast::LabeledStatement;
use crate::ast::Literal;
use crate::ast::LiteralValue;
use crate::ast::Program;
use crate::ast::ReturnStatement;
use crate::ast::SourceType;
use crate::ast::Statement;
use crate::ast::SwitchCase;
use crate::ast::SwitchStatement;
use crate::ast::ThrowStatement;
use crate::ast::TryStatement;
use crate::ast::VariableDeclaration;
use crate::ast::VariableDeclarator;
use crate::ast::VariableKind;
use crate::ast::WhileStatement;
use crate::ast::WithStatement;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

/// Whether a declaration is parsed as a statement or as the head of a `for` loop, where `in` and `of` end it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum VarDeclParseMode {
  Asi,
  ForHead,
}

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Program> {
    let start = self.start();
    let body = self.stmts_with_directives(ParseCtx::top_level(), TT::EOF)?;
    self.require(TT::EOF)?;
    Ok(Program {
      body,
      source_type: SourceType::Module,
      loc: self.loc_since(start),
    })
  }

  /// Parses statements until `end`, which is not consumed.
  pub fn stmts(&mut self, ctx: ParseCtx, end: TT) -> SyntaxResult<Vec<Statement>> {
    let mut body = Vec::new();
    while self.peek().typ != end {
      body.push(self.stmt(ctx)?);
    }
    Ok(body)
  }

  /// Like `stmts`, but leading string literal statements are marked as directives such as `"use strict"`.
  pub fn stmts_with_directives(&mut self, ctx: ParseCtx, end: TT) -> SyntaxResult<Vec<Statement>> {
    let mut body = Vec::new();
    let mut in_prologue = true;
    while self.peek().typ != end {
      let mut stmt = self.stmt(ctx)?;
      if in_prologue {
        match &mut stmt {
          Statement::ExpressionStatement(ExpressionStatement {
            expression: Expression::Literal(Literal {
              value: LiteralValue::String(_),
              raw,
              ..
            }),
            directive,
            ..
          }) if raw.len() >= 2 => {
            *directive = Some(raw[1..raw.len() - 1].to_string());
          }
          _ => in_prologue = false,
        };
      };
      body.push(stmt);
    }
    Ok(body)
  }

  pub fn stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Statement> {
    let (t0, t1, _) = self.peek_3();
    #[rustfmt::skip]
    let stmt: Statement = match t0.typ {
      TT::BraceOpen => self.block_stmt(ctx)?.into(),
      TT::KeywordBreak => self.break_stmt(ctx)?.into(),
      TT::KeywordClass => Statement::ClassDeclaration(self.class_decl(ctx, true)?),
      TT::KeywordConst | TT::KeywordVar => self.var_decl_stmt(ctx)?.into(),
      // `let` is only a declaration when followed by something that can start a pattern.
      TT::KeywordLet if t1.typ == TT::BraceOpen || t1.typ == TT::BracketOpen || is_valid_pattern_identifier(t1.typ, ctx.rules) => {
        self.var_decl_stmt(ctx)?.into()
      }
      TT::KeywordContinue => self.continue_stmt(ctx)?.into(),
      TT::KeywordDebugger => self.debugger_stmt()?.into(),
      TT::KeywordDo => self.do_while_stmt(ctx)?.into(),
      TT::KeywordExport => self.export_stmt(ctx)?,
      TT::KeywordFor => self.for_stmt(ctx)?,
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator => {
        Statement::FunctionDeclaration(self.func_decl(ctx, true)?)
      }
      TT::KeywordFunction => Statement::FunctionDeclaration(self.func_decl(ctx, true)?),
      TT::KeywordIf => self.if_stmt(ctx)?.into(),
      TT::KeywordImport if t1.typ != TT::ParenthesisOpen && t1.typ != TT::Dot => self.import_stmt(ctx)?.into(),
      TT::KeywordReturn => self.return_stmt(ctx)?.into(),
      TT::KeywordSwitch => self.switch_stmt(ctx)?.into(),
      TT::KeywordThrow => self.throw_stmt(ctx)?.into(),
      TT::KeywordTry => self.try_stmt(ctx)?.into(),
      TT::KeywordWhile => self.while_stmt(ctx)?.into(),
      TT::KeywordWith => self.with_stmt(ctx)?.into(),
      TT::Semicolon => self.empty_stmt()?.into(),
      t if is_valid_pattern_identifier(t, ctx.rules) && t1.typ == TT::Colon => self.label_stmt(ctx)?.into(),
      _ => self.expr_stmt(ctx)?.into(),
    };
    Ok(stmt)
  }

  /// Consumes a `;` or accepts its automatic insertion before a line break, `}`, or the end of input.
  pub fn consume_semicolon_or_asi(&mut self) -> SyntaxResult<()> {
    if self.eat(TT::Semicolon) {
      return Ok(());
    };
    let t = self.peek();
    if t.preceded_by_line_terminator || t.typ == TT::BraceClose || t.typ == TT::EOF {
      return Ok(());
    };
    Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon)))
  }

  pub fn label_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<LabeledStatement> {
    let start = self.start();
    let label = self.id_expr()?;
    self.require(TT::Colon)?;
    let body = self.stmt(ctx)?;
    Ok(LabeledStatement {
      label,
      body: Box::new(body),
      loc: self.loc_since(start),
    })
  }

  pub fn empty_stmt(&mut self) -> SyntaxResult<EmptyStatement> {
    let t = self.require(TT::Semicolon)?;
    Ok(EmptyStatement {
      loc: self.loc_of(t.loc),
    })
  }

  pub fn block_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<BlockStatement> {
    let start = self.start();
    self.require(TT::BraceOpen)?;
    let body = self.stmts(ctx, TT::BraceClose)?;
    self.require(TT::BraceClose)?;
    Ok(BlockStatement {
      body,
      loc: self.loc_since(start),
    })
  }

  fn break_or_continue_label(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<Identifier>> {
    let t = self.peek();
    let label = if is_valid_pattern_identifier(t.typ, ctx.rules) && !t.preceded_by_line_terminator {
      self.consume();
      Some(self.identifier_at(t.loc))
    } else {
      None
    };
    self.consume_semicolon_or_asi()?;
    Ok(label)
  }

  pub fn break_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<BreakStatement> {
    let start = self.start();
    self.require(TT::KeywordBreak)?;
    let label = self.break_or_continue_label(ctx)?;
    Ok(BreakStatement {
      label,
      loc: self.loc_since(start),
    })
  }

  pub fn continue_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<ContinueStatement> {
    let start = self.start();
    self.require(TT::KeywordContinue)?;
    let label = self.break_or_continue_label(ctx)?;
    Ok(ContinueStatement {
      label,
      loc: self.loc_since(start),
    })
  }

  pub fn debugger_stmt(&mut self) -> SyntaxResult<DebuggerStatement> {
    let start = self.start();
    self.require(TT::KeywordDebugger)?;
    self.consume_semicolon_or_asi()?;
    Ok(DebuggerStatement {
      loc: self.loc_since(start),
    })
  }

  pub fn expr_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<ExpressionStatement> {
    let start = self.start();
    let mut asi = Asi::can();
    let expression = self.expr_with_asi(ctx, [TT::Semicolon], &mut asi)?;
    if !asi.did_end_with_asi {
      self.consume_semicolon_or_asi()?;
    };
    Ok(ExpressionStatement {
      expression,
      directive: None,
      loc: self.loc_since(start),
    })
  }

  /// Parses `var`/`let`/`const` and its declarators, without the trailing semicolon.
  pub fn var_decl(&mut self, ctx: ParseCtx, mode: VarDeclParseMode) -> SyntaxResult<VariableDeclaration> {
    let start = self.start();
    let t = self.consume();
    let kind = match t.typ {
      TT::KeywordVar => VariableKind::Var,
      TT::KeywordLet => VariableKind::Let,
      TT::KeywordConst => VariableKind::Const,
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
    };
    let mut declarations = Vec::new();
    loop {
      let decl_start = self.start();
      let id = self.pat(ctx)?;
      let init = if self.eat(TT::Equals) {
        let mut asi = Asi::can();
        Some(match mode {
          VarDeclParseMode::Asi => {
            self.expr_with_min_prec(ctx, assignment_precedence(), [TT::Semicolon, TT::Comma], &mut asi)?
          }
          VarDeclParseMode::ForHead => self.expr_with_min_prec(
            ctx,
            assignment_precedence(),
            [TT::Semicolon, TT::Comma, TT::KeywordIn, TT::KeywordOf],
            &mut asi,
          )?,
        })
      } else {
        None
      };
      declarations.push(VariableDeclarator {
        id,
        init,
        loc: self.loc_since(decl_start),
      });
      if !self.eat(TT::Comma) {
        break;
      };
    }
    Ok(VariableDeclaration {
      kind,
      declarations,
      loc: self.loc_since(start),
    })
  }

  fn var_decl_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<VariableDeclaration> {
    let start = self.start();
    let mut decl = self.var_decl(ctx, VarDeclParseMode::Asi)?;
    self.consume_semicolon_or_asi()?;
    decl.loc = self.loc_since(start);
    Ok(decl)
  }

  pub fn for_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Statement> {
    let start = self.start();
    self.require(TT::KeywordFor)?;
    let is_await = self.eat(TT::KeywordAwait);
    self.require(TT::ParenthesisOpen)?;

    let (t0, t1) = self.peek_2();
    let is_decl = match t0.typ {
      TT::KeywordVar | TT::KeywordConst => true,
      TT::KeywordLet => {
        t1.typ == TT::BraceOpen || t1.typ == TT::BracketOpen || is_valid_pattern_identifier(t1.typ, ctx.rules)
      }
      _ => false,
    };
    let init: Option<ForInit> = if t0.typ == TT::Semicolon {
      None
    } else if is_decl {
      Some(ForInit::VariableDeclaration(self.var_decl(ctx, VarDeclParseMode::ForHead)?))
    } else {
      let expr_start = self.start();
      let expr = self.expr(ctx, [TT::Semicolon, TT::KeywordIn, TT::KeywordOf])?;
      // Keep the raw range so a later `in`/`of` can report where the target was.
      let range = self.range_since(expr_start);
      let next = self.peek().typ;
      if next == TT::KeywordIn || next == TT::KeywordOf {
        let target = self.expr_to_pat(expr, range)?;
        return self.for_in_of_rest(ctx, start, ForHead::Pattern(target), is_await);
      };
      Some(ForInit::Expression(expr))
    };

    let next = self.peek();
    if next.typ == TT::KeywordIn || next.typ == TT::KeywordOf {
      return match init {
        Some(ForInit::VariableDeclaration(decl)) if decl.declarations.len() == 1 => {
          self.for_in_of_rest(ctx, start, ForHead::VariableDeclaration(decl), is_await)
        }
        _ => Err(next.error(SyntaxErrorType::ExpectedSyntax("single declarator"))),
      };
    };

    self.require(TT::Semicolon)?;
    let test = if self.peek().typ == TT::Semicolon {
      None
    } else {
      Some(self.expr(ctx, [TT::Semicolon])?)
    };
    self.require(TT::Semicolon)?;
    let update = if self.peek().typ == TT::ParenthesisClose {
      None
    } else {
      Some(self.expr(ctx, [TT::ParenthesisClose])?)
    };
    self.require(TT::ParenthesisClose)?;
    let body = self.stmt(ctx)?;
    Ok(
      ForStatement {
        init,
        test,
        update,
        body: Box::new(body),
        loc: self.loc_since(start),
      }
      .into(),
    )
  }

  fn for_in_of_rest(
    &mut self,
    ctx: ParseCtx,
    start: usize,
    left: ForHead,
    is_await: bool,
  ) -> SyntaxResult<Statement> {
    let t = self.consume();
    if t.typ == TT::KeywordIn {
      let right = self.expr(ctx, [TT::ParenthesisClose])?;
      self.require(TT::ParenthesisClose)?;
      let body = self.stmt(ctx)?;
      return Ok(
        ForInStatement {
          left,
          right,
          body: Box::new(body),
          loc: self.loc_since(start),
        }
        .into(),
      );
    };
    let right = self.expr_with_min_prec(ctx, assignment_precedence(), [TT::ParenthesisClose], &mut Asi::no())?;
    self.require(TT::ParenthesisClose)?;
    let body = self.stmt(ctx)?;
    Ok(
      ForOfStatement {
        left,
        right,
        body: Box::new(body),
        is_await,
        loc: self.loc_since(start),
      }
      .into(),
    )
  }

  pub fn if_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<IfStatement> {
    let start = self.start();
    self.require(TT::KeywordIf)?;
    self.require(TT::ParenthesisOpen)?;
    let test = self.expr(ctx, [TT::ParenthesisClose])?;
    self.require(TT::ParenthesisClose)?;
    let consequent = self.stmt(ctx)?;
    let alternate = match self.eat(TT::KeywordElse) {
      true => Some(self.stmt(ctx)?),
      false => None,
    };
    Ok(IfStatement {
      test,
      consequent: Box::new(consequent),
      alternate: alternate.map(Box::new),
      loc: self.loc_since(start),
    })
  }

  pub fn return_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<ReturnStatement> {
    let start = self.start();
    self.require(TT::KeywordReturn)?;
    let next = self.peek();
    let argument = if next.preceded_by_line_terminator || next.typ == TT::BraceClose || next.typ == TT::EOF {
      // Automatic Semicolon Insertion.
      None
    } else if self.eat(TT::Semicolon) {
      None
    } else {
      let value = self.expr_with_asi(ctx, [TT::Semicolon], &mut Asi::can())?;
      self.consume_semicolon_or_asi()?;
      Some(value)
    };
    Ok(ReturnStatement {
      argument,
      loc: self.loc_since(start),
    })
  }

  pub fn throw_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<ThrowStatement> {
    let start = self.start();
    let throw = self.require(TT::KeywordThrow)?;
    if self.peek().preceded_by_line_terminator {
      // Illegal under Automatic Semicolon Insertion rules.
      return Err(throw.error(SyntaxErrorType::LineTerminatorAfterThrow));
    };
    let argument = self.expr_with_asi(ctx, [TT::Semicolon], &mut Asi::can())?;
    self.consume_semicolon_or_asi()?;
    Ok(ThrowStatement {
      argument,
      loc: self.loc_since(start),
    })
  }

  pub fn try_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<TryStatement> {
    let start = self.start();
    let try_tok = self.require(TT::KeywordTry)?;
    let block = self.block_stmt(ctx)?;
    let catch_start = self.start();
    let handler = match self.eat(TT::KeywordCatch) {
      true => {
        // The binding is optional: `catch { ... }`.
        let param = match self.eat(TT::ParenthesisOpen) {
          true => {
            let pattern = self.pat(ctx)?;
            self.require(TT::ParenthesisClose)?;
            Some(pattern)
          }
          false => None,
        };
        let body = self.block_stmt(ctx)?;
        Some(CatchClause {
          param,
          body,
          loc: self.loc_since(catch_start),
        })
      }
      false => None,
    };
    let finalizer = match self.eat(TT::KeywordFinally) {
      true => Some(self.block_stmt(ctx)?),
      false => None,
    };
    if handler.is_none() && finalizer.is_none() {
      return Err(try_tok.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
    };
    Ok(TryStatement {
      block,
      handler,
      finalizer,
      loc: self.loc_since(start),
    })
  }

  pub fn while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<WhileStatement> {
    let start = self.start();
    self.require(TT::KeywordWhile)?;
    self.require(TT::ParenthesisOpen)?;
    let test = self.expr(ctx, [TT::ParenthesisClose])?;
    self.require(TT::ParenthesisClose)?;
    let body = self.stmt(ctx)?;
    Ok(WhileStatement {
      test,
      body: Box::new(body),
      loc: self.loc_since(start),
    })
  }

  pub fn with_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<WithStatement> {
    let start = self.start();
    self.require(TT::KeywordWith)?;
    self.require(TT::ParenthesisOpen)?;
    let object = self.expr(ctx, [TT::ParenthesisClose])?;
    self.require(TT::ParenthesisClose)?;
    let body = self.stmt(ctx)?;
    Ok(WithStatement {
      object,
      body: Box::new(body),
      loc: self.loc_since(start),
    })
  }

  pub fn do_while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<DoWhileStatement> {
    let start = self.start();
    self.require(TT::KeywordDo)?;
    let body = self.stmt(ctx)?;
    self.require(TT::KeywordWhile)?;
    self.require(TT::ParenthesisOpen)?;
    let test = self.expr(ctx, [TT::ParenthesisClose])?;
    self.require(TT::ParenthesisClose)?;
    // A semicolon is always optional here.
    self.eat(TT::Semicolon);
    Ok(DoWhileStatement {
      body: Box::new(body),
      test,
      loc: self.loc_since(start),
    })
  }

  pub fn switch_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<SwitchStatement> {
    let start = self.start();
    self.require(TT::KeywordSwitch)?;
    self.require(TT::ParenthesisOpen)?;
    let discriminant = self.expr(ctx, [TT::ParenthesisClose])?;
    self.require(TT::ParenthesisClose)?;
    self.require(TT::BraceOpen)?;
    let mut cases = Vec::new();
    while !self.eat(TT::BraceClose) {
      let case_start = self.start();
      let test = if self.eat(TT::KeywordDefault) {
        None
      } else {
        self.require(TT::KeywordCase)?;
        Some(self.expr(ctx, [TT::Colon])?)
      };
      self.require(TT::Colon)?;
      let mut consequent = Vec::new();
      while !matches!(
        self.peek().typ,
        TT::KeywordCase | TT::KeywordDefault | TT::BraceClose | TT::EOF
      ) {
        consequent.push(self.stmt(ctx)?);
      }
      cases.push(SwitchCase {
        test,
        consequent,
        loc: self.loc_since(case_start),
      });
    }
    Ok(SwitchStatement {
      discriminant,
      cases,
      loc: self.loc_since(start),
    })
  }

  /// A module export or import name: any identifier name or a string literal.
  fn module_export_name(&mut self) -> SyntaxResult<Identifier> {
    let t = self.consume();
    match t.typ {
      TT::LiteralString => Ok(Identifier {
        name: self.lit_str_val_of(t.loc)?,
        loc: self.loc_of(t.loc),
      }),
      TT::Identifier => Ok(self.identifier_at(t.loc)),
      typ if typ.is_keyword() => Ok(self.identifier_at(t.loc)),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("module export name"))),
    }
  }

  fn module_source(&mut self) -> SyntaxResult<Literal> {
    self.require(TT::KeywordFrom)?;
    self.lit_str()
  }

  pub fn import_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<ImportDeclaration> {
    let start = self.start();
    self.require(TT::KeywordImport)?;
    let mut specifiers = Vec::new();
    if self.peek().typ == TT::LiteralString {
      let source = self.lit_str()?;
      self.consume_semicolon_or_asi()?;
      return Ok(ImportDeclaration {
        specifiers,
        source,
        loc: self.loc_since(start),
      });
    };

    if is_valid_pattern_identifier(self.peek().typ, ctx.rules) {
      let local = self.id_pat(ctx)?;
      let loc = local.loc;
      specifiers.push(ImportSpecifierKind::ImportDefaultSpecifier(ImportDefaultSpecifier {
        local,
        loc,
      }));
      if !self.eat(TT::Comma) {
        let source = self.module_source()?;
        self.consume_semicolon_or_asi()?;
        return Ok(ImportDeclaration {
          specifiers,
          source,
          loc: self.loc_since(start),
        });
      };
    };

    let spec_start = self.start();
    if self.eat(TT::Asterisk) {
      self.require(TT::KeywordAs)?;
      let local = self.id_pat(ctx)?;
      specifiers.push(ImportSpecifierKind::ImportNamespaceSpecifier(ImportNamespaceSpecifier {
        local,
        loc: self.loc_since(spec_start),
      }));
    } else {
      self.require(TT::BraceOpen)?;
      let named = self.list_with_loc(TT::BraceClose, |p| {
        let spec_start = p.start();
        let imported = p.module_export_name()?;
        let local = if p.eat(TT::KeywordAs) {
          p.id_pat(ctx)?
        } else {
          imported.clone()
        };
        Ok(ImportSpecifierKind::ImportSpecifier(ImportSpecifier {
          imported,
          local,
          loc: p.loc_since(spec_start),
        }))
      })?;
      specifiers.extend(named);
    };
    let source = self.module_source()?;
    self.consume_semicolon_or_asi()?;
    Ok(ImportDeclaration {
      specifiers,
      source,
      loc: self.loc_since(start),
    })
  }

  pub fn export_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Statement> {
    let start = self.start();
    self.require(TT::KeywordExport)?;
    let (t0, t1) = self.peek_2();
    match t0.typ {
      TT::KeywordDefault => {
        self.consume();
        let (t0, t1) = self.peek_2();
        let declaration = match t0.typ {
          TT::KeywordFunction => ExportDefault::FunctionDeclaration(self.func_decl(ctx, false)?),
          TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator => {
            ExportDefault::FunctionDeclaration(self.func_decl(ctx, false)?)
          }
          TT::KeywordClass => ExportDefault::ClassDeclaration(self.class_decl(ctx, false)?),
          _ => {
            let expr = self.expr_with_min_prec(ctx, assignment_precedence(), [TT::Semicolon], &mut Asi::can())?;
            self.consume_semicolon_or_asi()?;
            ExportDefault::Expression(expr)
          }
        };
        Ok(
          ExportDefaultDeclaration {
            declaration,
            loc: self.loc_since(start),
          }
          .into(),
        )
      }
      TT::Asterisk => {
        self.consume();
        let exported = if self.eat(TT::KeywordAs) {
          Some(self.module_export_name()?)
        } else {
          None
        };
        let source = self.module_source()?;
        self.consume_semicolon_or_asi()?;
        Ok(
          ExportAllDeclaration {
            exported,
            source,
            loc: self.loc_since(start),
          }
          .into(),
        )
      }
      TT::BraceOpen => {
        self.consume();
        let specifiers = self.list_with_loc(TT::BraceClose, |p| {
          let spec_start = p.start();
          let local = p.module_export_name()?;
          let exported = if p.eat(TT::KeywordAs) {
            p.module_export_name()?
          } else {
            local.clone()
          };
          Ok(ExportSpecifier {
            local,
            exported,
            loc: p.loc_since(spec_start),
          })
        })?;
        let source = if self.peek().typ == TT::KeywordFrom {
          Some(self.module_source()?)
        } else {
          None
        };
        self.consume_semicolon_or_asi()?;
        Ok(
          ExportNamedDeclaration {
            declaration: None,
            specifiers,
            source,
            loc: self.loc_since(start),
          }
          .into(),
        )
      }
      TT::KeywordVar | TT::KeywordLet | TT::KeywordConst | TT::KeywordFunction | TT::KeywordClass => {
        let declaration = self.stmt(ctx)?;
        Ok(self.export_declaration(declaration, start))
      }
      TT::KeywordAsync if t1.typ == TT::KeywordFunction => {
        let declaration = self.stmt(ctx)?;
        Ok(self.export_declaration(declaration, start))
      }
      _ => Err(t0.error(SyntaxErrorType::ExpectedSyntax("exportable"))),
    }
  }

  fn export_declaration(&self, declaration: Statement, start: usize) -> Statement {
    ExportNamedDeclaration {
      declaration: Some(Box::new(declaration)),
      specifiers: Vec::new(),
      source: None,
      loc: self.loc_since(start),
    }
    .into()
  }
}
