use super::lex_next;
use super::LexMode;
use super::Lexer;
use crate::token::TT;

fn check_with_mode(code: &str, mode: LexMode, expected: &[TT]) {
  let mut lexer = Lexer::new(code);
  for (i, e) in expected.iter().enumerate() {
    let t = lex_next(&mut lexer, mode);
    assert_eq!(t.typ, *e, "unexpected token {} ({:?})", i, &lexer[t.loc]);
  }
  assert_eq!(lex_next(&mut lexer, mode).typ, TT::EOF);
}

fn check(code: &str, expected: &[TT]) {
  check_with_mode(code, LexMode::Standard, expected);
}

#[test]
fn test_lex_keywords() {
  check("class", &[TT::KeywordClass]);
  check("instanceof", &[TT::KeywordInstanceof]);
  check("const let", &[TT::KeywordConst, TT::KeywordLet]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", &[TT::Identifier]);
  check("classes", &[TT::Identifier]);
  check("lett", &[TT::Identifier]);
  check("$_a ñ", &[TT::Identifier, TT::Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", &[TT::LiteralNumber]);
  check("1.5e-3", &[TT::LiteralNumber]);
  check(".5", &[TT::LiteralNumber]);
  check("0x1f 0b101 0o17", &[
    TT::LiteralNumber,
    TT::LiteralNumber,
    TT::LiteralNumber,
  ]);
  check("1_000", &[TT::LiteralNumber]);
  check("10n", &[TT::LiteralBigInt]);
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world\\n'", &[TT::LiteralString]);
  check("\"a\\\"b\"", &[TT::LiteralString]);
  check("'unterminated\n'", &[TT::Invalid, TT::Invalid]);
}

#[test]
fn test_lex_operators() {
  check("a?.b ?? c", &[
    TT::Identifier,
    TT::QuestionDot,
    TT::Identifier,
    TT::QuestionQuestion,
    TT::Identifier,
  ]);
  check("a?.5:1", &[
    TT::Identifier,
    TT::Question,
    TT::LiteralNumber,
    TT::Colon,
    TT::LiteralNumber,
  ]);
  check(">>>= **", &[
    TT::ChevronRightChevronRightChevronRightEquals,
    TT::AsteriskAsterisk,
  ]);
}

#[test]
fn test_lex_comments_and_line_terminators() {
  let mut lexer = Lexer::new("a /* x\n */ b // c\nd");
  let a = lex_next(&mut lexer, LexMode::Standard);
  assert!(!a.preceded_by_line_terminator);
  let b = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(b.typ, TT::Identifier);
  assert!(b.preceded_by_line_terminator);
  let d = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(&lexer[d.loc], "d");
  assert!(d.preceded_by_line_terminator);
}

#[test]
fn test_lex_regex_depends_on_mode() {
  check_with_mode("/a[/]b/g", LexMode::SlashIsRegex, &[TT::LiteralRegex]);
  check("/a", &[TT::Slash, TT::Identifier]);
}

#[test]
fn test_lex_template() {
  let mut lexer = Lexer::new("`a${b}c`");
  assert_eq!(
    lex_next(&mut lexer, LexMode::Standard).typ,
    TT::LiteralTemplatePartString
  );
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, TT::Identifier);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, TT::BraceClose);
  assert_eq!(
    lex_next(&mut lexer, LexMode::TemplateStrContinue).typ,
    TT::LiteralTemplatePartStringEnd
  );
}

#[test]
fn test_lex_jsx_tag_names() {
  check_with_mode("div class data-id for", LexMode::JsxTag, &[
    TT::Identifier,
    TT::Identifier,
    TT::Identifier,
    TT::Identifier,
  ]);
  check_with_mode(">=", LexMode::JsxTag, &[TT::ChevronRight, TT::Equals]);
  check_with_mode("xs:test", LexMode::JsxTag, &[
    TT::Identifier,
    TT::Colon,
    TT::Identifier,
  ]);
}

#[test]
fn test_lex_jsx_text() {
  let mut lexer = Lexer::new("hello {name}<");
  let t = lex_next(&mut lexer, LexMode::JsxTextContent);
  assert_eq!(t.typ, TT::JsxTextContent);
  assert_eq!(&lexer[t.loc], "hello ");
}

#[test]
fn test_lex_escaped_words_are_identifiers() {
  check("\\u0061 cl\\u0061ss", &[TT::Identifier, TT::Identifier]);
  check("#x", &[TT::PrivateMember]);
}

#[test]
fn test_lex_jsx_attribute_strings() {
  check_with_mode("'a\\'", LexMode::JsxTag, &[TT::LiteralString]);
  check_with_mode("\"line\nbreak\"", LexMode::JsxTag, &[TT::LiteralString]);
}
