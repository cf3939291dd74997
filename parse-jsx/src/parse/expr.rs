use super::pat::is_valid_pattern_identifier;
use super::pat::ParsePatternRules;
use super::ParseCtx;
use super::Parser;
use crate::ast::ArrowBody;
use crate::ast::ArrowFunction;
use crate::ast::AssignmentExpression;
use crate::ast::AssignmentOperator;
use crate::ast::AwaitExpression;
use crate::ast::BinaryExpression;
use crate::ast::CallExpression;
use crate::ast::ChainExpression;
use crate::ast::ConditionalExpression;
use crate::ast::Expression;
use crate::ast::Identifier;
use crate::ast::ImportExpression;
use crate::ast::LogicalExpression;
use crate::ast::MemberExpression;
use crate::ast::MetaProperty;
use crate::ast::NewExpression;
use crate::ast::Pattern;
use crate::ast::PrivateIdentifier;
use crate::ast::SequenceExpression;
use crate::ast::SpreadElement;
use crate::ast::Super;
use crate::ast::TaggedTemplateExpression;
use crate::ast::ThisExpression;
use crate::ast::UnaryExpression;
use crate::ast::UpdateExpression;
use crate::ast::UpdateOperator;
use crate::ast::YieldExpression;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::operator::OperatorName;
use crate::parse::operator::infix_operator;
use crate::parse::operator::prefix_operator;
use crate::token::TT;
use std::rc::Rc;

pub struct Asi {
  pub can_end_with_asi: bool,
  pub did_end_with_asi: bool,
}

impl Asi {
  pub fn can() -> Asi {
    Asi {
      can_end_with_asi: true,
      did_end_with_asi: false,
    }
  }

  pub fn no() -> Asi {
    Asi {
      can_end_with_asi: false,
      did_end_with_asi: false,
    }
  }
}

pub fn assignment_precedence() -> u8 {
  OperatorName::Assignment.precedence()
}

impl<'a> Parser<'a> {
  /// Parses call or `new` arguments after the opening parenthesis, consuming the closing one.
  pub fn call_args(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Expression>> {
    self.list_with_loc(TT::ParenthesisClose, |p| {
      p.spread_or_expr(ctx, [TT::Comma, TT::ParenthesisClose])
    })
  }

  /// An assignment-level expression, or `...expr` as a `SpreadElement`.
  pub fn spread_or_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Expression> {
    let start = self.start();
    if self.eat(TT::DotDotDot) {
      let argument = self.expr_with_min_prec(ctx, assignment_precedence(), terminators, &mut Asi::no())?;
      return Ok(
        SpreadElement {
          argument: Box::new(argument),
          loc: self.loc_since(start),
        }
        .into(),
      );
    };
    self.expr_with_min_prec(ctx, assignment_precedence(), terminators, &mut Asi::no())
  }

  pub fn expr<const N: usize>(&mut self, ctx: ParseCtx, terminators: [TT; N]) -> SyntaxResult<Expression> {
    self.expr_with_min_prec(ctx, 1, terminators, &mut Asi::no())
  }

  pub fn expr_with_asi<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Expression> {
    self.expr_with_min_prec(ctx, 1, terminators, asi)
  }

  /// Parses a parenthesised expression like `(a + b)`.
  pub fn grouping(&mut self, ctx: ParseCtx) -> SyntaxResult<Expression> {
    self.require(TT::ParenthesisOpen)?;
    let expr = self.expr(ctx, [TT::ParenthesisClose])?;
    self.require(TT::ParenthesisClose)?;
    Ok(expr)
  }

  pub fn arrow_func_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<ArrowFunction> {
    let start = self.start();
    let (t0, t1) = self.peek_2();
    // `async => 1` uses `async` as the parameter name.
    let is_async = t0.typ == TT::KeywordAsync
      && t1.typ != TT::EqualsChevronRight
      && self.eat(TT::KeywordAsync);

    let param_rules = ParsePatternRules {
      await_allowed: !is_async && ctx.rules.await_allowed,
      ..ctx.rules
    };
    let (t0, t1) = self.peek_2();
    let params = if is_valid_pattern_identifier(t0.typ, param_rules) && t1.typ == TT::EqualsChevronRight {
      let param = self.id_pat(ctx.with_rules(param_rules))?;
      vec![Pattern::Identifier(param)]
    } else {
      self.func_params(ctx.with_rules(param_rules))?
    };

    let arrow = self.require(TT::EqualsChevronRight)?;
    if arrow.preceded_by_line_terminator {
      return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
    };
    let body_ctx = ParseCtx {
      rules: param_rules,
      in_function: true,
    };
    let (body, expression) = match self.peek().typ {
      TT::BraceOpen => (ArrowBody::BlockStatement(self.func_body(body_ctx)?), false),
      _ => {
        let body = self.expr_with_min_prec(body_ctx, assignment_precedence(), terminators, asi)?;
        (ArrowBody::Expression(Box::new(body)), true)
      }
    };
    Ok(ArrowFunction {
      params,
      body,
      expression,
      is_async,
      loc: self.loc_since(start),
    })
  }

  /// `(` starts either arrow function parameters or a parenthesised expression. Try the arrow function first and
  /// rewind if it turns out not to be one.
  pub fn arrow_function_or_grouping_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Expression> {
    let cp = self.checkpoint();
    match self.arrow_func_expr(ctx, terminators, asi) {
      Ok(arrow) => return Ok(Expression::ArrowFunctionExpression(Rc::new(arrow))),
      Err(err) if err.typ == SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => return Err(err),
      Err(_) => self.restore_checkpoint(cp),
    };
    self.grouping(ctx)
  }

  pub fn id_expr(&mut self) -> SyntaxResult<Identifier> {
    let t = self.consume();
    Ok(self.identifier_at(t.loc))
  }

  /// Property name after `.` or `?.`: any identifier name, including reserved words, or a `#private` name.
  fn member_property(&mut self) -> SyntaxResult<Expression> {
    let t = self.consume();
    match t.typ {
      TT::Identifier => Ok(self.identifier_at(t.loc).into()),
      TT::PrivateMember => Ok(
        PrivateIdentifier {
          name: self.str(t.loc)[1..].to_string(),
          loc: self.loc_of(t.loc),
        }
        .into(),
      ),
      typ if typ.is_keyword() => Ok(self.identifier_at(t.loc).into()),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("member access property"))),
    }
  }

  /// Parses `new.target` or `new Callee(args)`. The callee may be a member chain but not a call.
  pub fn new_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expression> {
    let start = self.start();
    let new_tok = self.require(TT::KeywordNew)?;
    if self.eat(TT::Dot) {
      let prop = self.consume();
      if self.str(prop.loc) != "target" {
        return Err(prop.error(SyntaxErrorType::ExpectedSyntax("`target`")));
      };
      return Ok(
        MetaProperty {
          meta: self.identifier_at(new_tok.loc),
          property: self.identifier_at(prop.loc),
          loc: self.loc_since(start),
        }
        .into(),
      );
    };

    let callee_start = self.start();
    let mut callee = match self.peek().typ {
      TT::KeywordNew => self.new_expr(ctx)?,
      _ => self.expr_operand(ctx, [], &mut Asi::no())?,
    };
    loop {
      if self.eat(TT::Dot) {
        let property = self.member_property()?;
        callee = MemberExpression {
          object: Box::new(callee),
          property: Box::new(property),
          computed: false,
          optional: false,
          loc: self.loc_since(callee_start),
        }
        .into();
      } else if self.eat(TT::BracketOpen) {
        let property = self.expr(ctx, [TT::BracketClose])?;
        self.require(TT::BracketClose)?;
        callee = MemberExpression {
          object: Box::new(callee),
          property: Box::new(property),
          computed: true,
          optional: false,
          loc: self.loc_since(callee_start),
        }
        .into();
      } else {
        break;
      };
    }
    let arguments = if self.eat(TT::ParenthesisOpen) {
      self.call_args(ctx)?
    } else {
      Vec::new()
    };
    Ok(
      NewExpression {
        callee: Box::new(callee),
        arguments,
        loc: self.loc_since(start),
      }
      .into(),
    )
  }

  fn unary_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    operator_name: OperatorName,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Expression> {
    let start = self.start();
    let op_tok = self.consume_with_mode(LexMode::SlashIsRegex);
    let delegate = operator_name == OperatorName::Yield && self.eat(TT::Asterisk);
    let next_min_prec = if delegate {
      OperatorName::YieldDelegated
    } else {
      operator_name
    }
    .right_min_precedence();

    if operator_name == OperatorName::Yield {
      // `yield` may appear without an operand.
      let next = self.peek_with_mode(LexMode::SlashIsRegex);
      let has_operand = delegate
        || !(next.preceded_by_line_terminator
          || terminators.contains(&next.typ)
          || matches!(
            next.typ,
            TT::EOF | TT::Semicolon | TT::Comma | TT::ParenthesisClose | TT::BracketClose | TT::BraceClose | TT::Colon
          ));
      let argument = if has_operand {
        Some(Box::new(self.expr_with_min_prec(ctx, next_min_prec, terminators, asi)?))
      } else {
        None
      };
      return Ok(
        YieldExpression {
          argument,
          delegate,
          loc: self.loc_since(start),
        }
        .into(),
      );
    };

    let argument = self.expr_with_min_prec(ctx, next_min_prec, terminators, asi)?;
    if operator_name == OperatorName::Await {
      return Ok(
        AwaitExpression {
          argument: Box::new(argument),
          loc: self.loc_since(start),
        }
        .into(),
      );
    };
    if let Some(operator) = operator_name.update() {
      if !matches!(argument, Expression::Identifier(_) | Expression::MemberExpression(_)) {
        return Err(
          self
            .range_since(op_tok.loc.1)
            .error(SyntaxErrorType::InvalidAssignmentTarget, None),
        );
      };
      return Ok(
        UpdateExpression {
          operator,
          prefix: true,
          argument: Box::new(argument),
          loc: self.loc_since(start),
        }
        .into(),
      );
    };
    let operator = operator_name
      .unary()
      .ok_or_else(|| op_tok.error(SyntaxErrorType::ExpectedSyntax("unary operator")))?;
    Ok(
      UnaryExpression {
        operator,
        prefix: true,
        argument: Box::new(argument),
        loc: self.loc_since(start),
      }
      .into(),
    )
  }

  fn expr_operand<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Expression> {
    let t0 = self.peek_with_mode(LexMode::SlashIsRegex);
    // `await` and `yield` are identifiers outside async functions and generators respectively.
    if let Some(operator) = prefix_operator(t0.typ).filter(|operator| match operator {
      OperatorName::Await => !ctx.rules.await_allowed,
      OperatorName::Yield => !ctx.rules.yield_allowed,
      _ => true,
    }) {
      return self.unary_expr(ctx, operator, terminators, asi);
    };
    if t0.typ == TT::LiteralRegex {
      return Ok(self.lit_regex()?.into());
    };

    let (t0, t1, t2) = self.peek_3();
    if t0.typ == TT::KeywordAsync && t1.typ != TT::EqualsChevronRight && !t1.preceded_by_line_terminator {
      match t1.typ {
        TT::ParenthesisOpen => {
          // `async(...)` is a call to something named `async` unless an arrow follows.
          let cp = self.checkpoint();
          match self.arrow_func_expr(ctx, terminators, asi) {
            Ok(arrow) => return Ok(Expression::ArrowFunctionExpression(Rc::new(arrow))),
            Err(err) if err.typ == SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => return Err(err),
            Err(_) => self.restore_checkpoint(cp),
          };
        }
        TT::KeywordFunction => return Ok(Expression::FunctionExpression(self.func_expr(ctx)?)),
        typ if is_valid_pattern_identifier(typ, ctx.rules) && t2.typ == TT::EqualsChevronRight => {
          let arrow = self.arrow_func_expr(ctx, terminators, asi)?;
          return Ok(Expression::ArrowFunctionExpression(Rc::new(arrow)));
        }
        _ => {}
      };
    };

    if is_valid_pattern_identifier(t0.typ, ctx.rules) {
      return Ok(if t1.typ == TT::EqualsChevronRight {
        Expression::ArrowFunctionExpression(Rc::new(self.arrow_func_expr(ctx, terminators, asi)?))
      } else {
        self.id_expr()?.into()
      });
    };

    let start = t0.loc.0;
    #[rustfmt::skip]
    let expr: Expression = match t0.typ {
      TT::BracketOpen => self.lit_arr(ctx)?.into(),
      TT::BraceOpen => self.lit_obj(ctx)?.into(),
      TT::ChevronLeft => self.jsx_expr(ctx)?,
      TT::KeywordClass => Expression::ClassExpression(self.class_expr(ctx)?),
      TT::KeywordFunction => Expression::FunctionExpression(self.func_expr(ctx)?),
      TT::KeywordImport => match t1.typ {
        TT::Dot => {
          let meta = self.consume();
          self.consume();
          let prop = self.consume();
          if self.str(prop.loc) != "meta" {
            return Err(prop.error(SyntaxErrorType::ExpectedSyntax("`meta`")));
          };
          MetaProperty {
            meta: self.identifier_at(meta.loc),
            property: self.identifier_at(prop.loc),
            loc: self.loc_since(start),
          }.into()
        }
        TT::ParenthesisOpen => {
          self.consume();
          self.consume();
          let source = self.expr(ctx, [TT::ParenthesisClose])?;
          self.require(TT::ParenthesisClose)?;
          ImportExpression {
            source: Box::new(source),
            loc: self.loc_since(start),
          }.into()
        }
        _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("import expression"))),
      },
      TT::KeywordNew => self.new_expr(ctx)?,
      TT::KeywordSuper => {
        self.consume();
        Super { loc: self.loc_of(t0.loc) }.into()
      }
      TT::KeywordThis => {
        self.consume();
        ThisExpression { loc: self.loc_of(t0.loc) }.into()
      }
      TT::LiteralBigInt => self.lit_bigint()?.into(),
      TT::LiteralTrue | TT::LiteralFalse => self.lit_bool()?.into(),
      TT::LiteralNull => self.lit_null()?.into(),
      TT::LiteralNumber => self.lit_num()?.into(),
      TT::LiteralString => self.lit_str()?.into(),
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => self.lit_template(ctx)?.into(),
      TT::ParenthesisOpen => self.arrow_function_or_grouping_expr(ctx, terminators, asi)?,
      TT::PrivateMember => {
        // Only valid as the left operand of `in`.
        self.consume();
        PrivateIdentifier {
          name: self.str(t0.loc)[1..].to_string(),
          loc: self.loc_of(t0.loc),
        }.into()
      }
      _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("expression operand"))),
    };
    Ok(expr)
  }

  /// Wraps an optional chain such as `a?.b.c` once something outside the chain applies to it.
  fn end_chain(left: Expression, in_chain: &mut bool) -> Expression {
    if !std::mem::replace(in_chain, false) {
      return left;
    };
    let loc = left.loc();
    ChainExpression {
      expression: Box::new(left),
      loc,
    }
    .into()
  }

  pub fn expr_with_min_prec<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    min_prec: u8,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Expression> {
    let start = self.start();
    let mut left = self.expr_operand(ctx, terminators, asi)?;
    let mut in_chain = false;
    let mut left_is_sequence = false;

    loop {
      let cp = self.checkpoint();
      let t = self.consume();

      if terminators.contains(&t.typ) {
        self.restore_checkpoint(cp);
        break;
      };

      match t.typ {
        TT::PlusPlus | TT::HyphenHyphen if !t.preceded_by_line_terminator => {
          let (operator_name, update_op) = match t.typ {
            TT::PlusPlus => (OperatorName::PostfixIncrement, UpdateOperator::Increment),
            _ => (OperatorName::PostfixDecrement, UpdateOperator::Decrement),
          };
          if operator_name.precedence() < min_prec {
            self.restore_checkpoint(cp);
            break;
          };
          if in_chain || !matches!(left, Expression::Identifier(_) | Expression::MemberExpression(_)) {
            return Err(t.error(SyntaxErrorType::InvalidAssignmentTarget));
          };
          left = UpdateExpression {
            operator: update_op,
            prefix: false,
            argument: Box::new(left),
            loc: self.loc_since(start),
          }
          .into();
          left_is_sequence = false;
          continue;
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd if !t.preceded_by_line_terminator => {
          self.restore_checkpoint(cp);
          let quasi = self.lit_template(ctx)?;
          left = TaggedTemplateExpression {
            tag: Box::new(left),
            quasi,
            loc: self.loc_since(start),
          }
          .into();
          left_is_sequence = false;
          continue;
        }
        _ => {}
      };

      let Some(operator) = infix_operator(t.typ) else {
        if asi.can_end_with_asi
          && (t.preceded_by_line_terminator || t.typ == TT::BraceClose || t.typ == TT::EOF)
        {
          self.restore_checkpoint(cp);
          asi.did_end_with_asi = true;
          break;
        };
        if t.typ == TT::Semicolon {
          self.restore_checkpoint(cp);
          break;
        };
        return Err(t.error(SyntaxErrorType::ExpectedSyntax("expression operator")));
      };
      if operator.precedence() < min_prec {
        self.restore_checkpoint(cp);
        break;
      };

      let next_min_prec = operator.right_min_precedence();

      left = match operator {
        OperatorName::Call | OperatorName::OptionalChainingCall => {
          let optional = operator == OperatorName::OptionalChainingCall;
          in_chain |= optional;
          let arguments = self.call_args(ctx)?;
          CallExpression {
            callee: Box::new(left),
            arguments,
            optional,
            loc: self.loc_since(start),
          }
          .into()
        }
        OperatorName::ComputedMemberAccess | OperatorName::OptionalChainingComputedMemberAccess => {
          let optional = operator == OperatorName::OptionalChainingComputedMemberAccess;
          in_chain |= optional;
          let property = self.expr(ctx, [TT::BracketClose])?;
          self.require(TT::BracketClose)?;
          MemberExpression {
            object: Box::new(left),
            property: Box::new(property),
            computed: true,
            optional,
            loc: self.loc_since(start),
          }
          .into()
        }
        OperatorName::MemberAccess | OperatorName::OptionalChainingMemberAccess => {
          let optional = operator == OperatorName::OptionalChainingMemberAccess;
          in_chain |= optional;
          let property = self.member_property()?;
          MemberExpression {
            object: Box::new(left),
            property: Box::new(property),
            computed: false,
            optional,
            loc: self.loc_since(start),
          }
          .into()
        }
        OperatorName::Conditional => {
          let test = Self::end_chain(left, &mut in_chain);
          let consequent = self.expr(ctx, [TT::Colon])?;
          self.require(TT::Colon)?;
          let alternate = self.expr_with_min_prec(
            ctx,
            OperatorName::ConditionalAlternate.precedence(),
            terminators,
            asi,
          )?;
          ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            loc: self.loc_since(start),
          }
          .into()
        }
        OperatorName::Comma => {
          let first = Self::end_chain(left, &mut in_chain);
          let next = self.expr_with_min_prec(ctx, next_min_prec, terminators, asi)?;
          let seq = match first {
            Expression::SequenceExpression(mut seq) if left_is_sequence => {
              seq.expressions.push(next);
              seq.loc = self.loc_since(start);
              seq
            }
            first => SequenceExpression {
              expressions: vec![first, next],
              loc: self.loc_since(start),
            },
          };
          left = seq.into();
          left_is_sequence = true;
          continue;
        }
        name => {
          if let Some(assign_op) = name.assignment() {
            if in_chain {
              return Err(t.error(SyntaxErrorType::InvalidAssignmentTarget));
            };
            let target_loc = self.range_since(start);
            let target = match assign_op {
              AssignmentOperator::Assign => self.expr_to_pat(left, target_loc)?,
              _ => match left {
                Expression::Identifier(id) => id.into(),
                Expression::MemberExpression(m) => m.into(),
                _ => return Err(target_loc.error(SyntaxErrorType::InvalidAssignmentTarget, None)),
              },
            };
            let right = self.expr_with_min_prec(ctx, next_min_prec, terminators, asi)?;
            AssignmentExpression {
              operator: assign_op,
              left: Box::new(target),
              right: Box::new(right),
              loc: self.loc_since(start),
            }
            .into()
          } else {
            let left_operand = Self::end_chain(left, &mut in_chain);
            let right = self.expr_with_min_prec(ctx, next_min_prec, terminators, asi)?;
            if let Some(operator) = name.logical() {
              LogicalExpression {
                operator,
                left: Box::new(left_operand),
                right: Box::new(right),
                loc: self.loc_since(start),
              }
              .into()
            } else {
              let operator = name
                .binary()
                .ok_or_else(|| t.error(SyntaxErrorType::ExpectedSyntax("binary operator")))?;
              BinaryExpression {
                operator,
                left: Box::new(left_operand),
                right: Box::new(right),
                loc: self.loc_since(start),
              }
              .into()
            }
          }
        }
      };
      left_is_sequence = false;
    }

    Ok(Self::end_chain(left, &mut in_chain))
  }
}
