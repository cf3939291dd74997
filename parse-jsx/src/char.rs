/// Character classes the scanner needs. Only ASCII is classified; the scanner treats every
/// non-ASCII code point outside whitespace and line terminators as an identifier character.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CharClass {
  Decimal,
  Binary,
  Octal,
  Hex,
  IdStart,
  IdContinue,
  /// Names in JSX tags may also contain `-`, as in `data-id` or `my-element`.
  JsxIdContinue,
}

impl CharClass {
  /// Digit classes include `_` for numeric separators.
  pub fn contains(self, c: char) -> bool {
    match self {
      CharClass::Decimal => c.is_ascii_digit() || c == '_',
      CharClass::Binary => matches!(c, '0' | '1' | '_'),
      CharClass::Octal => matches!(c, '0'..='7' | '_'),
      CharClass::Hex => c.is_ascii_hexdigit() || c == '_',
      CharClass::IdStart => c.is_ascii_alphabetic() || matches!(c, '$' | '_'),
      CharClass::IdContinue => c.is_ascii_alphanumeric() || matches!(c, '$' | '_'),
      CharClass::JsxIdContinue => c.is_ascii_alphanumeric() || matches!(c, '$' | '_' | '-'),
    }
  }
}

pub fn is_line_terminator(c: char) -> bool {
  matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// ECMAScript WhiteSpace, excluding line terminators.
pub fn is_whitespace(c: char) -> bool {
  matches!(
    c,
    '\t'
      | '\x0b'
      | '\x0c'
      | ' '
      | '\u{a0}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200a}'
      | '\u{202f}'
      | '\u{205f}'
      | '\u{3000}'
      | '\u{feff}'
  )
}

/// Non-ASCII code points that may appear in identifiers.
pub fn is_unicode_id_char(c: char) -> bool {
  !c.is_ascii() && !c.is_whitespace() && !is_whitespace(c) && !is_line_terminator(c)
}
