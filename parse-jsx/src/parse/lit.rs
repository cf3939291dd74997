use super::ParseCtx;
use super::Parser;
use crate::ast::ArrayExpression;
use crate::ast::Expression;
use crate::ast::Function;
use crate::ast::Identifier;
use crate::ast::Literal;
use crate::ast::LiteralValue;
use crate::ast::ObjectExpression;
use crate::ast::ObjectMember;
use crate::ast::Property;
use crate::ast::PropertyKind;
use crate::ast::RegexLiteral;
use crate::ast::SpreadElement;
use crate::ast::TemplateElement;
use crate::ast::TemplateElementValue;
use crate::ast::TemplateLiteral;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::num::normalise_bigint_literal;
use crate::num::parse_number_literal;
use crate::token::TT;
use std::rc::Rc;

/// Decodes one escape sequence. `raw` starts right after the backslash. Returns the number of bytes consumed and
/// the decoded text, which is empty for a line continuation.
fn decode_escape(raw: &str) -> Option<(usize, String)> {
  let first = raw.chars().next()?;
  let simple = |c: char| Some((1, c.to_string()));
  match first {
    '\r' => Some((if raw[1..].starts_with('\n') { 2 } else { 1 }, String::new())),
    '\n' | '\u{2028}' | '\u{2029}' => Some((first.len_utf8(), String::new())),
    'b' => simple('\x08'),
    'f' => simple('\x0c'),
    'n' => simple('\n'),
    'r' => simple('\r'),
    't' => simple('\t'),
    'v' => simple('\x0b'),
    '0'..='7' => {
      // Legacy octal; `\0` not followed by a digit is NUL.
      let mut consumed = 1;
      let mut value = first.to_digit(8)?;
      let max = if first <= '3' { 3 } else { 2 };
      for ch in raw[1..].chars().take(max - 1) {
        match ch.to_digit(8) {
          Some(d) => {
            value = value * 8 + d;
            consumed += 1;
          }
          None => break,
        }
      }
      Some((consumed, char::from_u32(value)?.to_string()))
    }
    'x' => {
      let hex = raw.get(1..3)?;
      let value = u32::from_str_radix(hex, 16).ok()?;
      Some((3, char::from_u32(value)?.to_string()))
    }
    'u' => {
      let (consumed, value) = if raw[1..].starts_with('{') {
        let end = raw.find('}')?;
        let hex = &raw[2..end];
        if hex.is_empty() {
          return None;
        };
        (end + 1, u32::from_str_radix(hex, 16).ok()?)
      } else {
        let hex = raw.get(1..5)?;
        (5, u32::from_str_radix(hex, 16).ok()?)
      };
      if value > 0x10FFFF {
        return None;
      };
      if (0xD800..=0xDBFF).contains(&value) {
        // Combine a surrogate pair written as two escapes.
        if let Some(low) = raw
          .get(consumed..consumed + 6)
          .and_then(|s| s.strip_prefix("\\u"))
          .and_then(|h| u32::from_str_radix(h, 16).ok())
          .filter(|low| (0xDC00..=0xDFFF).contains(low))
        {
          let combined = 0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00);
          return Some((consumed + 6, char::from_u32(combined)?.to_string()));
        }
      }
      // Lone surrogates cannot be held in a Rust string.
      Some((
        consumed,
        char::from_u32(value).unwrap_or('\u{FFFD}').to_string(),
      ))
    }
    c => Some((c.len_utf8(), c.to_string())),
  }
}

/// Decodes string or template contents. On failure, returns the byte offset of the bad escape.
pub fn decode_literal(raw: &str) -> Result<String, usize> {
  let mut out = String::with_capacity(raw.len());
  let mut offset = 0;
  while let Some(rel) = raw[offset..].find('\\') {
    out.push_str(&raw[offset..offset + rel]);
    let escape = offset + rel;
    let (consumed, text) = decode_escape(&raw[escape + 1..]).ok_or(escape)?;
    out.push_str(&text);
    offset = escape + 1 + consumed;
  }
  out.push_str(&raw[offset..]);
  Ok(out)
}

/// Splits a template token into its text. The first part starts with a backtick; every part ends with `${` or a
/// backtick.
fn template_content(raw: &str, first: bool, is_end: bool) -> Option<(usize, &str)> {
  let start = if first { 1 } else { 0 };
  let end = raw.len().checked_sub(if is_end { 1 } else { 2 })?;
  if end < start {
    return None;
  };
  raw.get(start..end).map(|body| (start, body))
}

impl<'a> Parser<'a> {
  pub fn lit_arr(&mut self, ctx: ParseCtx) -> SyntaxResult<ArrayExpression> {
    let start = self.start();
    self.require(TT::BracketOpen)?;
    let mut elements = Vec::<Option<Expression>>::new();
    loop {
      if self.eat(TT::Comma) {
        elements.push(None);
        continue;
      };
      if self.peek().typ == TT::BracketClose {
        break;
      };
      let value = self.spread_or_expr(ctx, [TT::Comma, TT::BracketClose])?;
      elements.push(Some(value));
      if self.peek().typ == TT::BracketClose {
        break;
      };
      self.require(TT::Comma)?;
    }
    self.require(TT::BracketClose)?;
    Ok(ArrayExpression {
      elements,
      loc: self.loc_since(start),
    })
  }

  fn literal(&mut self, loc: Loc, value: LiteralValue) -> Literal {
    Literal {
      value,
      raw: self.string(loc),
      regex: None,
      bigint: None,
      loc: self.loc_of(loc),
    }
  }

  pub fn lit_bigint(&mut self) -> SyntaxResult<Literal> {
    let t = self.require(TT::LiteralBigInt)?;
    let digits = normalise_bigint_literal(self.str(t.loc))
      .ok_or_else(|| t.error(SyntaxErrorType::MalformedLiteralNumber))?;
    let mut lit = self.literal(t.loc, LiteralValue::Null);
    lit.bigint = Some(digits);
    Ok(lit)
  }

  pub fn lit_bool(&mut self) -> SyntaxResult<Literal> {
    let t = self.require_predicate(
      |t| matches!(t, TT::LiteralTrue | TT::LiteralFalse),
      "boolean literal",
    )?;
    Ok(self.literal(t.loc, LiteralValue::Boolean(t.typ == TT::LiteralTrue)))
  }

  pub fn lit_null(&mut self) -> SyntaxResult<Literal> {
    let t = self.require(TT::LiteralNull)?;
    Ok(self.literal(t.loc, LiteralValue::Null))
  }

  pub fn lit_num(&mut self) -> SyntaxResult<Literal> {
    let t = self.require(TT::LiteralNumber)?;
    let value = parse_number_literal(self.str(t.loc))
      .ok_or_else(|| t.error(SyntaxErrorType::MalformedLiteralNumber))?;
    Ok(self.literal(t.loc, LiteralValue::Number(value)))
  }

  pub fn lit_regex(&mut self) -> SyntaxResult<Literal> {
    let t = self.require_with_mode(TT::LiteralRegex, LexMode::SlashIsRegex)?;
    let raw = self.str(t.loc);
    // Flags follow the last slash; the lexer guarantees both slashes exist.
    let close = raw.rfind('/').unwrap_or(0);
    let regex = RegexLiteral {
      pattern: raw.get(1..close).unwrap_or_default().to_string(),
      flags: raw[close + 1..].to_string(),
    };
    let mut lit = self.literal(t.loc, LiteralValue::Null);
    lit.regex = Some(regex);
    Ok(lit)
  }

  pub fn lit_str(&mut self) -> SyntaxResult<Literal> {
    let t = self.require(TT::LiteralString)?;
    let value = self.lit_str_val_of(t.loc)?;
    Ok(self.literal(t.loc, LiteralValue::String(value)))
  }

  /// Decodes a quoted string token at `loc`.
  pub fn lit_str_val_of(&self, loc: Loc) -> SyntaxResult<String> {
    let raw = self.str(loc);
    let inner = raw
      .get(1..raw.len().saturating_sub(1))
      .ok_or_else(|| loc.error(SyntaxErrorType::UnexpectedEnd, Some(TT::LiteralString)))?;
    decode_literal(inner).map_err(|offset| {
      Loc(loc.0 + 1 + offset, loc.0 + 2 + offset).error(
        SyntaxErrorType::InvalidCharacterEscape,
        Some(TT::LiteralString),
      )
    })
  }

  /// Parses a property name in an object literal or class body. Returns the key and whether it is computed.
  pub fn property_key(&mut self, ctx: ParseCtx) -> SyntaxResult<(Expression, bool)> {
    let t = self.peek();
    Ok(match t.typ {
      TT::BracketOpen => {
        self.consume();
        let key = self.expr(ctx, [TT::BracketClose])?;
        self.require(TT::BracketClose)?;
        (key, true)
      }
      TT::LiteralString => (self.lit_str()?.into(), false),
      TT::LiteralNumber => (self.lit_num()?.into(), false),
      TT::LiteralBigInt => (self.lit_bigint()?.into(), false),
      TT::Identifier => {
        self.consume();
        (self.identifier_at(t.loc).into(), false)
      }
      typ if typ.is_keyword() => {
        self.consume();
        (self.identifier_at(t.loc).into(), false)
      }
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("property key"))),
    })
  }

  pub fn identifier_at(&self, loc: Loc) -> Identifier {
    Identifier {
      name: self.string(loc),
      loc: self.loc_of(loc),
    }
  }

  /// Whether the token after a `get`, `set`, `async` or `static` modifier starts a property key, meaning the
  /// modifier really is a modifier and not itself the key.
  pub fn is_modifier_followed_by_key(&mut self) -> bool {
    let (_, next) = self.peek_2();
    !matches!(
      next.typ,
      TT::Comma | TT::Colon | TT::ParenthesisOpen | TT::BraceClose | TT::Equals | TT::Semicolon | TT::EOF
    )
  }

  pub fn lit_obj(&mut self, ctx: ParseCtx) -> SyntaxResult<ObjectExpression> {
    let start = self.start();
    self.require(TT::BraceOpen)?;
    let properties = self.list_with_loc(TT::BraceClose, |p| p.obj_member(ctx))?;
    Ok(ObjectExpression {
      properties,
      loc: self.loc_since(start),
    })
  }

  fn obj_member(&mut self, ctx: ParseCtx) -> SyntaxResult<ObjectMember> {
    let start = self.start();
    if self.eat(TT::DotDotDot) {
      let argument = self.expr(ctx, [TT::Comma, TT::BraceClose])?;
      return Ok(
        SpreadElement {
          argument: Box::new(argument),
          loc: self.loc_since(start),
        }
        .into(),
      );
    };

    let mut kind = PropertyKind::Init;
    let mut is_async = false;
    let mut generator = false;
    let t = self.peek();
    match t.typ {
      TT::KeywordGet | TT::KeywordSet if self.is_modifier_followed_by_key() => {
        self.consume();
        kind = if t.typ == TT::KeywordGet {
          PropertyKind::Get
        } else {
          PropertyKind::Set
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
    let (key, computed) = self.property_key(ctx)?;
    let method = kind != PropertyKind::Init || is_async || generator;
    if method || self.peek().typ == TT::ParenthesisOpen {
      let func = self.func_params_and_body(ctx, None, is_async, generator, start)?;
      return Ok(
        Property {
          key,
          value: Expression::FunctionExpression(Rc::new(func)),
          kind,
          method: kind == PropertyKind::Init,
          shorthand: false,
          computed,
          loc: self.loc_since(start),
        }
        .into(),
      );
    };

    if self.eat(TT::Colon) {
      let value = self.expr(ctx, [TT::Comma, TT::BraceClose])?;
      return Ok(
        Property {
          key,
          value,
          kind,
          method: false,
          shorthand: false,
          computed,
          loc: self.loc_since(start),
        }
        .into(),
      );
    };

    // Shorthand, optionally with a default that only makes sense once this literal becomes a pattern.
    let Expression::Identifier(id) = &key else {
      return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("object property value")));
    };
    if computed || !self.is_binding_name(key_tok.typ, ctx) {
      return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("object property value")));
    };
    let value: Expression = if self.eat(TT::Equals) {
      let default = self.expr(ctx, [TT::Comma, TT::BraceClose])?;
      crate::ast::AssignmentExpression {
        operator: crate::ast::AssignmentOperator::Assign,
        left: Box::new(id.clone().into()),
        right: Box::new(default),
        loc: self.loc_since(start),
      }
      .into()
    } else {
      id.clone().into()
    };
    Ok(
      Property {
        key,
        value,
        kind,
        method: false,
        shorthand: true,
        computed: false,
        loc: self.loc_since(start),
      }
      .into(),
    )
  }

  /// Parses a template literal; the next token must be a template part.
  pub fn lit_template(&mut self, ctx: ParseCtx) -> SyntaxResult<TemplateLiteral> {
    let start = self.start();
    let t = self.consume();
    let mut is_end = match t.typ {
      TT::LiteralTemplatePartString => false,
      TT::LiteralTemplatePartStringEnd => true,
      TT::Invalid => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("template string part"))),
    };
    let mut quasis = vec![self.template_element(t.loc, true, is_end)?];
    let mut expressions = Vec::new();
    while !is_end {
      expressions.push(self.expr(ctx, [TT::BraceClose])?);
      self.require(TT::BraceClose)?;
      let part = self.consume_with_mode(LexMode::TemplateStrContinue);
      is_end = match part.typ {
        TT::LiteralTemplatePartString => false,
        TT::LiteralTemplatePartStringEnd => true,
        _ => {
          return Err(Loc(part.loc.1, part.loc.1).error(
            SyntaxErrorType::UnexpectedEnd,
            Some(TT::LiteralTemplatePartString),
          ))
        }
      };
      quasis.push(self.template_element(part.loc, false, is_end)?);
    }
    Ok(TemplateLiteral {
      quasis,
      expressions,
      loc: self.loc_since(start),
    })
  }

  fn template_element(&self, loc: Loc, first: bool, is_end: bool) -> SyntaxResult<TemplateElement> {
    let (offset, raw) = template_content(self.str(loc), first, is_end)
      .ok_or_else(|| loc.error(SyntaxErrorType::UnexpectedEnd, None))?;
    let content_loc = Loc(loc.0 + offset, loc.0 + offset + raw.len());
    Ok(TemplateElement {
      value: TemplateElementValue {
        raw: raw.to_string(),
        // Invalid escapes are permitted in tagged templates, so this is not an error here.
        cooked: decode_literal(raw).ok(),
      },
      tail: is_end,
      loc: self.loc_of(content_loc),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::decode_literal;

  #[test]
  fn test_decode_literal() {
    assert_eq!(decode_literal(r"a\nb").unwrap(), "a\nb");
    assert_eq!(decode_literal(r"\x41B\u{43}").unwrap(), "ABC");
    assert_eq!(decode_literal(r"😀").unwrap(), "\u{1F600}");
    assert_eq!(decode_literal(r"\101").unwrap(), "A");
    assert_eq!(decode_literal("a\\\nb").unwrap(), "ab");
    assert_eq!(decode_literal(r"\'").unwrap(), "'");
    assert_eq!(decode_literal(r"\u{zz}"), Err(0));
  }
}
