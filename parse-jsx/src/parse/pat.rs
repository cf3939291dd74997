use super::ParseCtx;
use super::Parser;
use crate::ast::ArrayPattern;
use crate::ast::AssignmentOperator;
use crate::ast::AssignmentPattern;
use crate::ast::AssignmentProperty;
use crate::ast::Expression;
use crate::ast::Identifier;
use crate::ast::ObjectMember;
use crate::ast::ObjectPattern;
use crate::ast::Pattern;
use crate::ast::PatternMember;
use crate::ast::PropertyKind;
use crate::ast::RestElement;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

#[derive(Clone, Copy)]
pub struct ParsePatternRules {
  // `await` is not allowed as a parameter or variable name inside an async function.
  pub await_allowed: bool,
  // `yield` is not allowed as a parameter or variable name inside a generator function.
  pub yield_allowed: bool,
}

pub fn is_valid_pattern_identifier(typ: TT, rules: ParsePatternRules) -> bool {
  match typ {
    TT::Identifier => true,
    TT::KeywordAwait => rules.await_allowed,
    TT::KeywordYield => rules.yield_allowed,
    t => t.is_contextual_keyword(),
  }
}

impl<'a> Parser<'a> {
  pub fn is_binding_name(&self, typ: TT, ctx: ParseCtx) -> bool {
    is_valid_pattern_identifier(typ, ctx.rules)
  }

  /// Consumes a binding identifier.
  pub fn id_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Identifier> {
    let t = self.consume();
    if !is_valid_pattern_identifier(t.typ, ctx.rules) {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")));
    };
    Ok(self.identifier_at(t.loc))
  }

  /// Consumes a binding identifier if one is next, as for an optional function or class name.
  pub fn maybe_id_pat(&mut self, ctx: ParseCtx) -> Option<Identifier> {
    self
      .eat_if(|t| is_valid_pattern_identifier(t.typ, ctx.rules))
      .map(|t| self.identifier_at(t.loc))
  }

  /// Parses an object pattern like `{ x, y: z, [k]: v = 1, ...rest }`. The rest element must come last.
  pub fn obj_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<ObjectPattern> {
    let start = self.start();
    self.require(TT::BraceOpen)?;
    let mut properties = Vec::new();
    while self.peek().typ != TT::BraceClose {
      let prop_start = self.start();
      if self.eat(TT::DotDotDot) {
        let argument = self.id_pat(ctx)?;
        properties.push(PatternMember::RestElement(RestElement {
          argument: Box::new(argument.into()),
          loc: self.loc_since(prop_start),
        }));
        break;
      };

      let key_tok = self.peek();
      let (key, computed) = self.property_key(ctx)?;
      let (shorthand, value) = if self.eat(TT::Colon) {
        (false, self.pat_with_default(ctx, [TT::Comma, TT::BraceClose])?)
      } else {
        // Shorthand: the key itself is the binding, so it must be a plain identifier.
        let Expression::Identifier(id) = &key else {
          return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("object pattern property subpattern")));
        };
        if computed || !is_valid_pattern_identifier(key_tok.typ, ctx.rules) {
          return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("identifier")));
        };
        let target: Pattern = id.clone().into();
        (true, self.maybe_default(ctx, target, [TT::Comma, TT::BraceClose], prop_start)?)
      };
      properties.push(PatternMember::Property(AssignmentProperty {
        key,
        value,
        computed,
        shorthand,
        loc: self.loc_since(prop_start),
      }));
      if !self.eat(TT::Comma) {
        break;
      };
    }
    self.require(TT::BraceClose)?;
    Ok(ObjectPattern {
      properties,
      loc: self.loc_since(start),
    })
  }

  /// Parses an array pattern like `[a, , b = c, ...rest]`.
  pub fn arr_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<ArrayPattern> {
    let start = self.start();
    self.require(TT::BracketOpen)?;
    let mut elements = Vec::<Option<Pattern>>::new();
    while self.peek().typ != TT::BracketClose {
      let elem_start = self.start();
      if self.eat(TT::DotDotDot) {
        let argument = self.pat(ctx)?;
        elements.push(Some(
          RestElement {
            argument: Box::new(argument),
            loc: self.loc_since(elem_start),
          }
          .into(),
        ));
        break;
      };
      // An unnamed element skips that position.
      if self.eat(TT::Comma) {
        elements.push(None);
        continue;
      };
      elements.push(Some(
        self.pat_with_default(ctx, [TT::Comma, TT::BracketClose])?,
      ));
      if !self.eat(TT::Comma) {
        break;
      };
    }
    self.require(TT::BracketClose)?;
    Ok(ArrayPattern {
      elements,
      loc: self.loc_since(start),
    })
  }

  /// Parses an identifier, object, or array pattern.
  pub fn pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Pattern> {
    let t = self.peek();
    Ok(match t.typ {
      typ if is_valid_pattern_identifier(typ, ctx.rules) => self.id_pat(ctx)?.into(),
      TT::BraceOpen => self.obj_pat(ctx)?.into(),
      TT::BracketOpen => self.arr_pat(ctx)?.into(),
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("pattern"))),
    })
  }

  /// Parses a pattern optionally followed by `= default`.
  pub fn pat_with_default<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Pattern> {
    let start = self.start();
    let target = self.pat(ctx)?;
    self.maybe_default(ctx, target, terminators, start)
  }

  fn maybe_default<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    target: Pattern,
    terminators: [TT; N],
    start: usize,
  ) -> SyntaxResult<Pattern> {
    if !self.eat(TT::Equals) {
      return Ok(target);
    };
    let right = self.expr(ctx, terminators)?;
    Ok(
      AssignmentPattern {
        left: Box::new(target),
        right: Box::new(right),
        loc: self.loc_since(start),
      }
      .into(),
    )
  }

  /// Reinterprets an expression already parsed as the target of an assignment, e.g. `[a, b] = [b, a]`.
  pub fn expr_to_pat(&self, expr: Expression, loc: Loc) -> SyntaxResult<Pattern> {
    let invalid = || -> SyntaxError { loc.error(SyntaxErrorType::InvalidAssignmentTarget, None) };
    Ok(match expr {
      Expression::Identifier(id) => id.into(),
      Expression::MemberExpression(m) if !m.optional => m.into(),
      Expression::ArrayExpression(arr) => {
        let mut elements = Vec::with_capacity(arr.elements.len());
        for elem in arr.elements {
          elements.push(match elem {
            None => None,
            Some(Expression::SpreadElement(spread)) => Some(
              RestElement {
                argument: Box::new(self.expr_to_pat(*spread.argument, loc)?),
                loc: spread.loc,
              }
              .into(),
            ),
            Some(e) => Some(self.expr_to_pat(e, loc)?),
          });
        }
        ArrayPattern {
          elements,
          loc: arr.loc,
        }
        .into()
      }
      Expression::ObjectExpression(obj) => {
        let mut properties = Vec::with_capacity(obj.properties.len());
        for member in obj.properties {
          properties.push(match member {
            ObjectMember::Property(p) => {
              if p.kind != PropertyKind::Init || p.method {
                return Err(invalid());
              };
              PatternMember::Property(AssignmentProperty {
                key: p.key,
                value: self.expr_to_pat(p.value, loc)?,
                computed: p.computed,
                shorthand: p.shorthand,
                loc: p.loc,
              })
            }
            ObjectMember::SpreadElement(spread) => PatternMember::RestElement(RestElement {
              argument: Box::new(self.expr_to_pat(*spread.argument, loc)?),
              loc: spread.loc,
            }),
          });
        }
        ObjectPattern {
          properties,
          loc: obj.loc,
        }
        .into()
      }
      // Only a plain `=` nested inside a destructuring target means a default value.
      Expression::AssignmentExpression(assign) if assign.operator == AssignmentOperator::Assign => {
        AssignmentPattern {
          left: assign.left,
          right: assign.right,
          loc: assign.loc,
        }
        .into()
      }
      _ => return Err(invalid()),
    })
  }
}
