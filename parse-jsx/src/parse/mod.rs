use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::LineIndex;
use crate::loc::Loc;
use crate::loc::SourceLocation;
use crate::token::Token;
use crate::token::TT;
use pat::ParsePatternRules;

pub mod expr;
pub mod func;
pub mod jsx;
pub mod lit;
pub mod operator;
pub mod pat;
pub mod stmt;
#[cfg(test)]
mod tests;

/// Context threaded through every parse method by value. Nested constructs derive a modified copy.
#[derive(Clone, Copy)]
pub struct ParseCtx {
  pub rules: ParsePatternRules,
  /// Whether `return` is legal here. The top level permits it so that evaluation can report it.
  pub in_function: bool,
}

impl ParseCtx {
  pub fn top_level() -> ParseCtx {
    ParseCtx {
      rules: ParsePatternRules {
        await_allowed: true,
        yield_allowed: true,
      },
      in_function: false,
    }
  }

  pub fn with_rules(&self, rules: ParsePatternRules) -> ParseCtx {
    ParseCtx { rules, ..*self }
  }

  pub fn in_function(&self, is_async: bool, generator: bool) -> ParseCtx {
    ParseCtx {
      rules: ParsePatternRules {
        await_allowed: !is_async,
        yield_allowed: !generator,
      },
      in_function: true,
    }
  }
}

/// A position in the token buffer to return to after a speculative parse.
#[derive(Clone, Copy)]
pub struct Checkpoint(usize);

/// Tokens are lexed lazily and kept so that speculative parses can rewind. Each token remembers
/// the mode it was lexed in; asking for the same position in another mode drops it and everything
/// after it, then re-lexes.
struct Lexed {
  token: Token,
  mode: LexMode,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  tokens: Vec<Lexed>,
  cursor: usize,
  lines: LineIndex<'a>,
  locations: bool,
}

// Parsing is split across submodules as methods on `Parser`, so `<'a>` is declared once and calls read as `self.*`.
impl<'a> Parser<'a> {
  /// `lines` maps offsets of `lexer`'s text back to the user's text.
  pub fn new(lexer: Lexer<'a>, lines: LineIndex<'a>, locations: bool) -> Parser<'a> {
    Parser {
      lexer,
      tokens: Vec::new(),
      cursor: 0,
      lines,
      locations,
    }
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.lexer[loc]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn checkpoint(&self) -> Checkpoint {
    Checkpoint(self.cursor)
  }

  pub fn restore_checkpoint(&mut self, checkpoint: Checkpoint) {
    self.cursor = checkpoint.0;
  }

  /// Attaches a line/column position to an error raised by this parser.
  pub fn locate(&self, err: SyntaxError) -> SyntaxError {
    let position = self.lines.position(err.loc.0);
    err.with_position(position)
  }

  /// End offset of the most recently consumed token.
  fn prev_end(&self) -> usize {
    self
      .cursor
      .checked_sub(1)
      .map_or(0, |i| self.tokens[i].token.loc.1)
  }

  /// Start offset of the next significant token.
  pub fn start(&mut self) -> usize {
    self.peek().loc.0
  }

  /// ESTree location spanning from `start` to the end of the last consumed token.
  pub fn loc_since(&self, start: usize) -> Option<SourceLocation> {
    self.locations.then(|| {
      let end = self.prev_end().max(start);
      self.lines.source_location(Loc(start, end))
    })
  }

  /// Byte range from `start` to the end of the last consumed token.
  pub fn range_since(&self, start: usize) -> Loc {
    Loc(start, self.prev_end().max(start))
  }

  pub fn loc_of(&self, loc: Loc) -> Option<SourceLocation> {
    self.locations.then(|| self.lines.source_location(loc))
  }

  /// The token at the cursor, lexed in `mode`.
  fn current(&mut self, mode: LexMode) -> &Token {
    if self.tokens.get(self.cursor).is_some_and(|t| t.mode != mode) {
      self.tokens.truncate(self.cursor);
      let resume = self.tokens.last().map_or(0, |t| t.token.loc.1);
      self.lexer.set_next(resume);
    };
    if self.tokens.len() == self.cursor {
      let token = lex_next(&mut self.lexer, mode);
      self.tokens.push(Lexed { token, mode });
    };
    &self.tokens[self.cursor].token
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> Token {
    self.current(mode).clone()
  }

  pub fn peek(&mut self) -> Token {
    self.peek_with_mode(LexMode::Standard)
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> Token {
    let token = self.peek_with_mode(mode);
    self.cursor += 1;
    token
  }

  pub fn consume(&mut self) -> Token {
    self.consume_with_mode(LexMode::Standard)
  }

  pub fn consume_as_string(&mut self) -> String {
    let loc = self.consume().loc;
    self.string(loc)
  }

  pub fn peek_2(&mut self) -> (Token, Token) {
    let cp = self.checkpoint();
    let pair = (self.consume(), self.consume());
    self.restore_checkpoint(cp);
    pair
  }

  pub fn peek_3(&mut self) -> (Token, Token, Token) {
    let cp = self.checkpoint();
    let triple = (self.consume(), self.consume(), self.consume());
    self.restore_checkpoint(cp);
    triple
  }

  /// Consumes the next token if `pred` accepts it.
  pub fn eat_if(&mut self, pred: impl FnOnce(&Token) -> bool) -> Option<Token> {
    let token = self.peek();
    pred(&token).then(|| {
      self.cursor += 1;
      token
    })
  }

  pub fn eat_with_mode(&mut self, typ: TT, mode: LexMode) -> bool {
    let matched = self.current(mode).typ == typ;
    if matched {
      self.cursor += 1;
    };
    matched
  }

  /// Consumes the next token if it is `typ`.
  pub fn eat(&mut self, typ: TT) -> bool {
    self.eat_with_mode(typ, LexMode::Standard)
  }

  pub fn require_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<Token> {
    let t = self.consume_with_mode(mode);
    match t.typ == typ {
      true => Ok(t),
      false => Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ))),
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    self.require_with_mode(typ, LexMode::Standard)
  }

  pub fn require_predicate(
    &mut self,
    pred: impl FnOnce(TT) -> bool,
    expected: &'static str,
  ) -> SyntaxResult<Token> {
    let t = self.consume();
    match pred(t.typ) {
      true => Ok(t),
      false => Err(t.error(SyntaxErrorType::ExpectedSyntax(expected))),
    }
  }

  /// Parses items separated by commas until `close`, which is consumed. A trailing comma is allowed.
  pub fn list_with_loc<S>(
    &mut self,
    close: TT,
    mut item: impl FnMut(&mut Self) -> SyntaxResult<S>,
  ) -> SyntaxResult<Vec<S>> {
    let mut items = Vec::new();
    while !self.eat(close) {
      items.push(item(self)?);
      if !self.eat(TT::Comma) {
        self.require(close)?;
        break;
      };
    }
    Ok(items)
  }
}
