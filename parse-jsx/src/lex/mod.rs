use crate::char::is_line_terminator;
use crate::char::is_unicode_id_char;
use crate::char::is_whitespace;
use crate::char::CharClass;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use core::ops::Index;
use memchr::memchr;
use memchr::memchr2;
use memchr::memchr3;
use memchr::memmem;
use once_cell::sync::Lazy;

#[cfg(test)]
mod tests;

/// How to interpret the next token. The parser picks the mode because the same characters mean
/// different things in different positions, e.g. `/` starts a regex only where an operand is
/// expected.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  /// Inside `<...>`: keywords are plain names, names may contain `-` and strings have no escapes.
  JsxTag,
  /// Between JSX tags: everything up to the next `{` or `<`.
  JsxTextContent,
  SlashIsRegex,
  Standard,
  /// After the `}` closing a template substitution.
  TemplateStrContinue,
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer { source, next: 0 }
  }

  pub fn next(&self) -> usize {
    self.next
  }

  /// Rewinds or advances to a byte offset, which must be on a char boundary. The parser uses this
  /// to re-lex buffered tokens in a different mode.
  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.source.len())
  }

  fn rest(&self) -> &'a str {
    &self.source[self.next..]
  }

  fn at_end(&self) -> bool {
    self.next >= self.source.len()
  }

  fn peek(&self) -> Option<char> {
    self.rest().chars().next()
  }

  fn peek_nth(&self, n: usize) -> Option<char> {
    self.rest().chars().nth(n)
  }

  fn bump(&mut self, bytes: usize) {
    debug_assert!(self.next + bytes <= self.source.len());
    self.next += bytes;
  }

  fn bump_char(&mut self) -> Option<char> {
    let c = self.peek()?;
    self.next += c.len_utf8();
    Some(c)
  }

  fn bump_to_end(&mut self) {
    self.next = self.source.len();
  }

  fn eat(&mut self, c: char) -> bool {
    let matched = self.peek() == Some(c);
    if matched {
      self.next += c.len_utf8();
    };
    matched
  }

  /// Returns the number of bytes consumed.
  fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
    let len = self
      .rest()
      .char_indices()
      .find(|&(_, c)| !pred(c))
      .map(|(i, _)| i)
      .unwrap_or(self.rest().len());
    self.next += len;
    len
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, index: Loc) -> &Self::Output {
    &self.source[index.0..index.1]
  }
}

const PUNCTUATORS: &[(&str, TT)] = &[
  ("&", TT::Ampersand),
  ("&&", TT::AmpersandAmpersand),
  ("&&=", TT::AmpersandAmpersandEquals),
  ("&=", TT::AmpersandEquals),
  ("*", TT::Asterisk),
  ("**", TT::AsteriskAsterisk),
  ("**=", TT::AsteriskAsteriskEquals),
  ("*=", TT::AsteriskEquals),
  ("|", TT::Bar),
  ("||", TT::BarBar),
  ("||=", TT::BarBarEquals),
  ("|=", TT::BarEquals),
  ("}", TT::BraceClose),
  ("{", TT::BraceOpen),
  ("]", TT::BracketClose),
  ("[", TT::BracketOpen),
  ("^", TT::Caret),
  ("^=", TT::CaretEquals),
  ("<", TT::ChevronLeft),
  ("<<", TT::ChevronLeftChevronLeft),
  ("<<=", TT::ChevronLeftChevronLeftEquals),
  ("<=", TT::ChevronLeftEquals),
  ("</", TT::ChevronLeftSlash),
  (">", TT::ChevronRight),
  (">>", TT::ChevronRightChevronRight),
  (">>>", TT::ChevronRightChevronRightChevronRight),
  (">>>=", TT::ChevronRightChevronRightChevronRightEquals),
  (">>=", TT::ChevronRightChevronRightEquals),
  (">=", TT::ChevronRightEquals),
  (":", TT::Colon),
  (",", TT::Comma),
  (".", TT::Dot),
  ("...", TT::DotDotDot),
  ("=", TT::Equals),
  ("=>", TT::EqualsChevronRight),
  ("==", TT::EqualsEquals),
  ("===", TT::EqualsEqualsEquals),
  ("!", TT::Exclamation),
  ("!=", TT::ExclamationEquals),
  ("!==", TT::ExclamationEqualsEquals),
  ("-", TT::Hyphen),
  ("-=", TT::HyphenEquals),
  ("--", TT::HyphenHyphen),
  (")", TT::ParenthesisClose),
  ("(", TT::ParenthesisOpen),
  ("%", TT::Percent),
  ("%=", TT::PercentEquals),
  ("+", TT::Plus),
  ("+=", TT::PlusEquals),
  ("++", TT::PlusPlus),
  ("?", TT::Question),
  ("?.", TT::QuestionDot),
  ("?.[", TT::QuestionDotBracketOpen),
  ("?.(", TT::QuestionDotParenthesisOpen),
  ("??", TT::QuestionQuestion),
  ("??=", TT::QuestionQuestionEquals),
  (";", TT::Semicolon),
  ("/", TT::Slash),
  ("/=", TT::SlashEquals),
  ("~", TT::Tilde),
];

static PUNCTUATOR_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
  AhoCorasickBuilder::new()
    .start_kind(StartKind::Anchored)
    .kind(Some(AhoCorasickKind::DFA))
    .match_kind(MatchKind::LeftmostLongest)
    .build(PUNCTUATORS.iter().map(|&(pattern, _)| pattern))
    .expect("punctuator table is a valid pattern set")
});

fn lex_punctuator(lexer: &mut Lexer<'_>) -> Option<TT> {
  let m = PUNCTUATOR_MATCHER.find(Input::new(lexer.rest()).anchored(Anchored::Yes))?;
  lexer.bump(m.end());
  Some(PUNCTUATORS[m.pattern().as_usize()].1)
}

/// Skips whitespace and comments, returning whether a line terminator was crossed.
fn skip_trivia(lexer: &mut Lexer<'_>) -> bool {
  let mut crossed_line = false;
  loop {
    match lexer.peek() {
      Some(c) if is_line_terminator(c) => {
        crossed_line = true;
        lexer.bump(c.len_utf8());
      }
      Some(c) if is_whitespace(c) => lexer.bump(c.len_utf8()),
      Some('/') if lexer.peek_nth(1) == Some('*') => {
        lexer.bump(2);
        // An unterminated comment runs to the end of the source.
        let len = memmem::find(lexer.rest().as_bytes(), b"*/")
          .map(|pos| pos + 2)
          .unwrap_or(lexer.rest().len());
        crossed_line |= lexer.rest()[..len].chars().any(is_line_terminator);
        lexer.bump(len);
      }
      Some('/') if lexer.peek_nth(1) == Some('/') => {
        // The comment is consumed with its trailing newline.
        crossed_line = true;
        match memchr(b'\n', lexer.rest().as_bytes()) {
          Some(pos) => lexer.bump(pos + 1),
          None => lexer.bump_to_end(),
        };
      }
      _ => return crossed_line,
    };
  }
}

/// Consumes `\u` followed by four hex digits or a braced code point.
fn lex_unicode_escape(lexer: &mut Lexer<'_>) -> Option<()> {
  if !lexer.eat('\\') || !lexer.eat('u') {
    return None;
  };
  if lexer.eat('{') {
    if lexer.eat_while(|c| CharClass::Hex.contains(c)) == 0 || !lexer.eat('}') {
      return None;
    };
  } else {
    for _ in 0..4 {
      if !lexer.bump_char().is_some_and(|c| c.is_ascii_hexdigit()) {
        return None;
      };
    }
  };
  Some(())
}

fn lex_identifier(lexer: &mut Lexer<'_>, mode: LexMode) -> Option<TT> {
  let start = lexer.next;
  match lexer.peek()? {
    '\\' => lex_unicode_escape(lexer)?,
    c => lexer.bump(c.len_utf8()),
  };
  let continues = if mode == LexMode::JsxTag {
    CharClass::JsxIdContinue
  } else {
    CharClass::IdContinue
  };
  loop {
    lexer.eat_while(|c| continues.contains(c) || is_unicode_id_char(c));
    if lexer.peek() != Some('\\') {
      break;
    };
    let before = lexer.next;
    if lex_unicode_escape(lexer).is_none() {
      lexer.set_next(before);
      break;
    };
  }
  let word = &lexer.source[start..lexer.next];
  // Escaped words never act as keywords, and every word inside a JSX tag is a name.
  if mode == LexMode::JsxTag || word.contains('\\') {
    return Some(TT::Identifier);
  };
  Some(TT::keyword(word).unwrap_or(TT::Identifier))
}

fn lex_decimal(lexer: &mut Lexer<'_>) -> Option<TT> {
  let digits = |c| CharClass::Decimal.contains(c);
  lexer.eat_while(digits);
  if lexer.eat('n') {
    return Some(TT::LiteralBigInt);
  };
  if lexer.eat('.') {
    lexer.eat_while(digits);
  };
  if lexer.eat('e') || lexer.eat('E') {
    if !lexer.eat('+') {
      lexer.eat('-');
    };
    if lexer.eat_while(digits) == 0 {
      return Some(TT::Invalid);
    };
  };
  Some(TT::LiteralNumber)
}

fn lex_radix(lexer: &mut Lexer<'_>, digits: CharClass) -> Option<TT> {
  // Skip `0x`, `0b` or `0o`.
  lexer.bump(2);
  if lexer.eat_while(|c| digits.contains(c)) == 0 {
    return Some(TT::Invalid);
  };
  Some(if lexer.eat('n') {
    TT::LiteralBigInt
  } else {
    TT::LiteralNumber
  })
}

fn lex_private_member(lexer: &mut Lexer<'_>) -> Option<TT> {
  lexer.bump(1);
  let c = lexer.peek()?;
  if c.is_ascii() && !CharClass::IdStart.contains(c) {
    return Some(TT::Invalid);
  };
  lex_identifier(lexer, LexMode::Standard)?;
  Some(TT::PrivateMember)
}

fn lex_regex(lexer: &mut Lexer<'_>) -> Option<TT> {
  lexer.bump(1);
  let mut in_class = false;
  loop {
    match lexer.bump_char()? {
      '\\' => {
        if lexer.peek()? == '\n' {
          return Some(TT::Invalid);
        };
        lexer.bump_char();
      }
      '/' if !in_class => break,
      '[' => in_class = true,
      ']' => in_class = false,
      '\n' => return Some(TT::Invalid),
      _ => {}
    };
  }
  // Flags.
  lexer.eat_while(|c| CharClass::IdContinue.contains(c));
  Some(TT::LiteralRegex)
}

fn lex_string(lexer: &mut Lexer<'_>, mode: LexMode) -> Option<TT> {
  let quote = lexer.bump_char()?;
  if mode == LexMode::JsxTag {
    // Attribute strings have no escapes and may span lines.
    match memchr(quote as u8, lexer.rest().as_bytes()) {
      Some(pos) => {
        lexer.bump(pos + 1);
        return Some(TT::LiteralString);
      }
      None => {
        lexer.bump_to_end();
        return None;
      }
    };
  };
  loop {
    let Some(pos) = memchr3(b'\\', b'\n', quote as u8, lexer.rest().as_bytes()) else {
      lexer.bump_to_end();
      return None;
    };
    lexer.bump(pos);
    match lexer.peek()? {
      '\\' => {
        lexer.bump(1);
        // `\` followed by CRLF is a single line continuation.
        if lexer.bump_char()? == '\r' {
          lexer.eat('\n');
        };
      }
      '\n' => return Some(TT::Invalid),
      _ => {
        lexer.bump(1);
        return Some(TT::LiteralString);
      }
    };
  }
}

/// Lexes a template chunk ending with `${` (a part) or a backtick (the end).
fn lex_template_chunk(lexer: &mut Lexer<'_>) -> Option<TT> {
  loop {
    let Some(pos) = memchr3(b'\\', b'`', b'$', lexer.rest().as_bytes()) else {
      lexer.bump_to_end();
      return None;
    };
    lexer.bump(pos);
    match lexer.bump_char()? {
      '\\' => {
        lexer.bump_char()?;
      }
      '`' => return Some(TT::LiteralTemplatePartStringEnd),
      _ => {
        if lexer.eat('{') {
          return Some(TT::LiteralTemplatePartString);
        };
      }
    };
  }
}

fn lex_token(lexer: &mut Lexer<'_>, mode: LexMode) -> Option<TT> {
  let c = lexer.peek()?;
  match c {
    '\\' => lex_identifier(lexer, mode),
    c if CharClass::IdStart.contains(c) || is_unicode_id_char(c) => lex_identifier(lexer, mode),
    '0' => match lexer.peek_nth(1) {
      Some('x' | 'X') => lex_radix(lexer, CharClass::Hex),
      Some('b' | 'B') => lex_radix(lexer, CharClass::Binary),
      Some('o' | 'O') => lex_radix(lexer, CharClass::Octal),
      _ => lex_decimal(lexer),
    },
    '1'..='9' => lex_decimal(lexer),
    '.' if lexer.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => lex_decimal(lexer),
    '"' | '\'' => lex_string(lexer, mode),
    '`' => {
      lexer.bump(1);
      lex_template_chunk(lexer)
    }
    '#' => lex_private_member(lexer),
    '/' if mode == LexMode::SlashIsRegex => lex_regex(lexer),
    // `<a>=</a>` closes the tag before the text `=`.
    '>' if mode == LexMode::JsxTag => {
      lexer.bump(1);
      Some(TT::ChevronRight)
    }
    // `a?.5:1` is a conditional, not optional chaining.
    '?' if lexer.peek_nth(1) == Some('.') && lexer.peek_nth(2).is_some_and(|c| c.is_ascii_digit()) => {
      lexer.bump(1);
      Some(TT::Question)
    }
    c => lex_punctuator(lexer).or_else(|| {
      lexer.bump(c.len_utf8());
      Some(TT::Invalid)
    }),
  }
}

pub fn lex_next(lexer: &mut Lexer<'_>, mode: LexMode) -> Token {
  let preceded_by_line_terminator = match mode {
    LexMode::JsxTextContent | LexMode::TemplateStrContinue => false,
    _ => skip_trivia(lexer),
  };
  let start = lexer.next;
  let typ = match mode {
    LexMode::JsxTextContent => {
      match memchr2(b'{', b'<', lexer.rest().as_bytes()) {
        Some(pos) => lexer.bump(pos),
        None => lexer.bump_to_end(),
      };
      TT::JsxTextContent
    }
    LexMode::TemplateStrContinue => lex_template_chunk(lexer).unwrap_or(TT::Invalid),
    _ if lexer.at_end() => TT::EOF,
    _ => lex_token(lexer, mode).unwrap_or(TT::Invalid),
  };
  Token {
    loc: Loc(start, lexer.next),
    preceded_by_line_terminator,
    typ,
  }
}
