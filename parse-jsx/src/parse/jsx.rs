use super::ParseCtx;
use super::Parser;
use crate::ast::Expression;
use crate::ast::JsxAttribute;
use crate::ast::JsxAttributeItem;
use crate::ast::JsxAttributeName;
use crate::ast::JsxAttributeValue;
use crate::ast::JsxChild;
use crate::ast::JsxClosingElement;
use crate::ast::JsxClosingFragment;
use crate::ast::JsxElement;
use crate::ast::JsxElementName;
use crate::ast::JsxEmptyExpression;
use crate::ast::JsxExpressionContainer;
use crate::ast::JsxFragment;
use crate::ast::JsxIdentifier;
use crate::ast::JsxMemberExpression;
use crate::ast::JsxMemberObject;
use crate::ast::JsxNamespacedName;
use crate::ast::JsxOpeningElement;
use crate::ast::JsxOpeningFragment;
use crate::ast::JsxSpreadAttribute;
use crate::ast::JsxSpreadChild;
use crate::ast::JsxText;
use crate::ast::Literal;
use crate::ast::LiteralValue;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

fn named_entity(name: &str) -> Option<char> {
  Some(match name {
    "amp" => '&',
    "lt" => '<',
    "gt" => '>',
    "quot" => '"',
    "apos" => '\'',
    "nbsp" => '\u{A0}',
    "iexcl" => '¡',
    "cent" => '¢',
    "pound" => '£',
    "yen" => '¥',
    "sect" => '§',
    "copy" => '©',
    "laquo" => '«',
    "raquo" => '»',
    "reg" => '®',
    "deg" => '°',
    "plusmn" => '±',
    "para" => '¶',
    "middot" => '·',
    "iquest" => '¿',
    "times" => '×',
    "divide" => '÷',
    "shy" => '\u{AD}',
    "ensp" => '\u{2002}',
    "emsp" => '\u{2003}',
    "thinsp" => '\u{2009}',
    "zwnj" => '\u{200C}',
    "zwj" => '\u{200D}',
    "ndash" => '–',
    "mdash" => '—',
    "lsquo" => '‘',
    "rsquo" => '’',
    "ldquo" => '“',
    "rdquo" => '”',
    "bull" => '•',
    "hellip" => '…',
    "euro" => '€',
    "trade" => '™',
    "larr" => '←',
    "uarr" => '↑',
    "rarr" => '→',
    "darr" => '↓',
    "hearts" => '♥',
    _ => return None,
  })
}

/// Decodes HTML character references in JSX text and attribute strings. Unknown references are kept verbatim.
pub fn decode_entities(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut rest = raw;
  while let Some(amp) = rest.find('&') {
    out.push_str(&rest[..amp]);
    rest = &rest[amp..];
    let decoded = rest
      .find(';')
      .filter(|&semi| semi <= 10)
      .and_then(|semi| {
        let body = &rest[1..semi];
        let ch = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
          u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = body.strip_prefix('#') {
          dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
          named_entity(body)
        };
        ch.map(|ch| (ch, semi))
      });
    match decoded {
      Some((ch, semi)) => {
        out.push(ch);
        rest = &rest[semi + 1..];
      }
      None => {
        out.push('&');
        rest = &rest[1..];
      }
    };
  }
  out.push_str(rest);
  out
}

impl<'a> Parser<'a> {
  /// Any word inside a tag is a name, including keywords and hyphenated words like `data-id`.
  fn jsx_name_token(&mut self) -> SyntaxResult<Token> {
    let t = self.consume_with_mode(LexMode::JsxTag);
    if t.typ != TT::Identifier {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("JSX name")));
    };
    Ok(t)
  }

  fn jsx_identifier(&self, loc: Loc) -> JsxIdentifier {
    JsxIdentifier {
      name: self.string(loc),
      loc: self.loc_of(loc),
    }
  }

  /// Parses an element name like `div`, `data-x`, `a.b.C`, or `svg:rect`. Returns `None` for a fragment.
  fn jsx_elem_name(&mut self) -> SyntaxResult<Option<JsxElementName>> {
    if self.peek_with_mode(LexMode::JsxTag).typ == TT::ChevronRight {
      return Ok(None);
    };
    let first = self.jsx_name_token()?;
    let start = first.loc.0;
    let base = self.jsx_identifier(first.loc);

    if self.eat_with_mode(TT::Colon, LexMode::JsxTag) {
      let name = self.jsx_name_token()?;
      return Ok(Some(JsxElementName::NamespacedName(JsxNamespacedName {
        namespace: base,
        name: self.jsx_identifier(name.loc),
        loc: self.loc_since(start),
      })));
    };

    let mut object: Option<JsxMemberObject> = None;
    let mut current = base;
    while self.eat_with_mode(TT::Dot, LexMode::JsxTag) {
      let part = self.jsx_name_token()?;
      let prior = match object.take() {
        None => JsxMemberObject::Identifier(current),
        Some(obj) => JsxMemberObject::MemberExpression(JsxMemberExpression {
          object: Box::new(obj),
          property: current,
          loc: None,
        }),
      };
      object = Some(prior);
      current = self.jsx_identifier(part.loc);
    }
    Ok(Some(match object {
      None => JsxElementName::Identifier(current),
      Some(obj) => JsxElementName::MemberExpression(JsxMemberExpression {
        object: Box::new(obj),
        property: current,
        loc: self.loc_since(start),
      }),
    }))
  }

  fn jsx_attr_name(&mut self) -> SyntaxResult<JsxAttributeName> {
    let first = self.jsx_name_token()?;
    let base = self.jsx_identifier(first.loc);
    if self.eat_with_mode(TT::Colon, LexMode::JsxTag) {
      let name = self.jsx_name_token()?;
      return Ok(JsxAttributeName::NamespacedName(JsxNamespacedName {
        namespace: base,
        name: self.jsx_identifier(name.loc),
        loc: self.loc_since(first.loc.0),
      }));
    };
    Ok(JsxAttributeName::Identifier(base))
  }

  /// Parses an attribute value after `=`: a string, `{expr}`, or an element.
  fn jsx_attr_val(&mut self, ctx: ParseCtx) -> SyntaxResult<JsxAttributeValue> {
    let next = self.peek_with_mode(LexMode::JsxTag);
    Ok(match next.typ {
      TT::LiteralString => {
        self.consume_with_mode(LexMode::JsxTag);
        let raw = self.str(next.loc);
        let inner = raw.get(1..raw.len().saturating_sub(1)).unwrap_or_default();
        JsxAttributeValue::Literal(Literal {
          value: LiteralValue::String(decode_entities(inner)),
          raw: raw.to_string(),
          regex: None,
          bigint: None,
          loc: self.loc_of(next.loc),
        })
      }
      TT::ChevronLeft => match self.jsx_expr(ctx)? {
        Expression::JsxFragment(frag) => JsxAttributeValue::Fragment(frag),
        Expression::JsxElement(elem) => JsxAttributeValue::Element(elem),
        _ => return Err(next.error(SyntaxErrorType::ExpectedSyntax("JSX element"))),
      },
      TT::BraceOpen => {
        let start = next.loc.0;
        self.consume_with_mode(LexMode::JsxTag);
        let expression = self.expr(ctx, [TT::BraceClose])?;
        self.require(TT::BraceClose)?;
        JsxAttributeValue::ExpressionContainer(JsxExpressionContainer {
          expression,
          loc: self.loc_since(start),
        })
      }
      _ => return Err(next.error(SyntaxErrorType::ExpectedSyntax("JSX attribute value"))),
    })
  }

  fn jsx_elem_attrs(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<JsxAttributeItem>> {
    let mut attrs = Vec::new();
    loop {
      let next = self.peek_with_mode(LexMode::JsxTag);
      match next.typ {
        TT::ChevronRight | TT::Slash => break,
        TT::BraceOpen => {
          let start = next.loc.0;
          self.consume_with_mode(LexMode::JsxTag);
          self.require(TT::DotDotDot)?;
          let argument = self.expr(ctx, [TT::BraceClose])?;
          self.require(TT::BraceClose)?;
          attrs.push(JsxAttributeItem::SpreadAttribute(JsxSpreadAttribute {
            argument,
            loc: self.loc_since(start),
          }));
        }
        _ => {
          let start = next.loc.0;
          let name = self.jsx_attr_name()?;
          let value = if self.eat_with_mode(TT::Equals, LexMode::JsxTag) {
            Some(self.jsx_attr_val(ctx)?)
          } else {
            None
          };
          attrs.push(JsxAttributeItem::Attribute(JsxAttribute {
            name,
            value,
            loc: self.loc_since(start),
          }));
        }
      };
    }
    Ok(attrs)
  }

  /// Parses children up to, but not including, the closing tag.
  fn jsx_elem_children(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<JsxChild>> {
    let mut children = Vec::new();
    loop {
      // Text runs up to the next `{` or `<`, keeping all whitespace.
      let text = self.require_with_mode(TT::JsxTextContent, LexMode::JsxTextContent)?;
      if !text.loc.is_empty() {
        let raw = self.string(text.loc);
        children.push(JsxChild::Text(JsxText {
          value: decode_entities(&raw),
          raw,
          loc: self.loc_of(text.loc),
        }));
      };
      let next = self.peek();
      match next.typ {
        TT::ChevronLeftSlash => break,
        TT::EOF => return Err(next.error(SyntaxErrorType::UnexpectedEnd)),
        TT::ChevronLeft => children.push(match self.jsx_expr(ctx)? {
          Expression::JsxFragment(frag) => JsxChild::Fragment(frag),
          Expression::JsxElement(elem) => JsxChild::Element(elem),
          _ => return Err(next.error(SyntaxErrorType::ExpectedSyntax("JSX element"))),
        }),
        TT::BraceOpen => {
          let start = next.loc.0;
          self.consume();
          let t = self.peek();
          if t.typ == TT::BraceClose {
            // `{}` and `{/* comment */}` hold nothing.
            self.consume();
            children.push(JsxChild::ExpressionContainer(JsxExpressionContainer {
              expression: JsxEmptyExpression {
                loc: self.loc_of(Loc(next.loc.1, t.loc.0)),
              }
              .into(),
              loc: self.loc_since(start),
            }));
          } else if self.eat(TT::DotDotDot) {
            let expression = self.expr(ctx, [TT::BraceClose])?;
            self.require(TT::BraceClose)?;
            children.push(JsxChild::SpreadChild(JsxSpreadChild {
              expression,
              loc: self.loc_since(start),
            }));
          } else {
            let expression = self.expr(ctx, [TT::BraceClose])?;
            self.require(TT::BraceClose)?;
            children.push(JsxChild::ExpressionContainer(JsxExpressionContainer {
              expression,
              loc: self.loc_since(start),
            }));
          };
        }
        _ => return Err(next.error(SyntaxErrorType::ExpectedSyntax("JSX child"))),
      };
    }
    Ok(children)
  }

  /// Parses a JSX element or fragment. https://facebook.github.io/jsx/
  pub fn jsx_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expression> {
    let start = self.start();
    self.require_with_mode(TT::ChevronLeft, LexMode::JsxTag)?;
    let Some(name) = self.jsx_elem_name()? else {
      self.require_with_mode(TT::ChevronRight, LexMode::JsxTag)?;
      let opening_fragment = JsxOpeningFragment {
        loc: self.loc_since(start),
      };
      let children = self.jsx_elem_children(ctx)?;
      let close_start = self.start();
      self.require(TT::ChevronLeftSlash)?;
      let close = self.consume_with_mode(LexMode::JsxTag);
      if close.typ != TT::ChevronRight {
        return Err(close.error(SyntaxErrorType::JsxClosingTagMismatch));
      };
      return Ok(
        JsxFragment {
          opening_fragment,
          closing_fragment: JsxClosingFragment {
            loc: self.loc_since(close_start),
          },
          children,
          loc: self.loc_since(start),
        }
        .into(),
      );
    };

    let attributes = self.jsx_elem_attrs(ctx)?;
    let self_closing = self.eat_with_mode(TT::Slash, LexMode::JsxTag);
    self.require_with_mode(TT::ChevronRight, LexMode::JsxTag)?;
    let opening_element = JsxOpeningElement {
      name,
      attributes,
      self_closing,
      loc: self.loc_since(start),
    };
    if self_closing {
      return Ok(
        JsxElement {
          opening_element,
          closing_element: None,
          children: Vec::new(),
          loc: self.loc_since(start),
        }
        .into(),
      );
    };

    let children = self.jsx_elem_children(ctx)?;
    let close_start = self.start();
    let close_tok = self.require(TT::ChevronLeftSlash)?;
    let close_name = self.jsx_elem_name()?;
    let matches = close_name
      .as_ref()
      .is_some_and(|n| n.to_source() == opening_element.name.to_source());
    let Some(close_name) = close_name.filter(|_| matches) else {
      return Err(close_tok.error(SyntaxErrorType::JsxClosingTagMismatch));
    };
    self.require_with_mode(TT::ChevronRight, LexMode::JsxTag)?;
    Ok(
      JsxElement {
        opening_element,
        closing_element: Some(JsxClosingElement {
          name: close_name,
          loc: self.loc_since(close_start),
        }),
        children,
        loc: self.loc_since(start),
      }
      .into(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::decode_entities;

  #[test]
  fn test_decode_entities() {
    assert_eq!(decode_entities("a &amp; b"), "a & b");
    assert_eq!(decode_entities("&lt;div&gt;"), "<div>");
    assert_eq!(decode_entities("&#65;&#x42;"), "AB");
    assert_eq!(decode_entities("&copy; 2024"), "© 2024");
    assert_eq!(decode_entities("&unknown; & alone"), "&unknown; & alone");
  }
}
