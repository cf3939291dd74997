use ast::Program;
use error::SyntaxResult;
use lex::Lexer;
use loc::LineIndex;
use parse::Parser;
use std::borrow::Cow;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod num;
pub mod operator;
pub mod parse;
pub mod token;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
  /// Parse the text as the children of a `<>...</>` fragment. Positions still refer to the unwrapped text.
  pub wrap_in_fragment: bool,
  /// Attach `loc` to every node.
  pub locations: bool,
}

impl Default for ParseOptions {
  fn default() -> Self {
    ParseOptions {
      wrap_in_fragment: false,
      locations: true,
    }
  }
}

const FRAGMENT_OPEN: &str = "<>";
const FRAGMENT_CLOSE: &str = "</>";

pub fn parse(source: &str) -> SyntaxResult<Program> {
  parse_with_options(source, ParseOptions::default())
}

pub fn parse_with_options(source: &str, opts: ParseOptions) -> SyntaxResult<Program> {
  let (text, lines) = if opts.wrap_in_fragment {
    let wrapped = format!("{FRAGMENT_OPEN}{source}{FRAGMENT_CLOSE}");
    (
      Cow::Owned(wrapped),
      LineIndex::with_shift(source, FRAGMENT_OPEN.len()),
    )
  } else {
    (Cow::Borrowed(source), LineIndex::new(source))
  };
  let lexer = Lexer::new(&text);
  let mut parser = Parser::new(lexer, lines, opts.locations);
  parser.parse_top_level().map_err(|err| parser.locate(err))
}
