use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum TT {
  /// End of input.
  EOF,
  /// Unlexable input. Peeking never fails; the parser reports this when it consumes the token.
  Invalid,

  Ampersand,
  AmpersandAmpersand,
  AmpersandAmpersandEquals,
  AmpersandEquals,
  Asterisk,
  AsteriskAsterisk,
  AsteriskAsteriskEquals,
  AsteriskEquals,
  Bar,
  BarBar,
  BarBarEquals,
  BarEquals,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  Caret,
  CaretEquals,
  ChevronLeft,
  ChevronLeftChevronLeft,
  ChevronLeftChevronLeftEquals,
  ChevronLeftEquals,
  ChevronLeftSlash,
  ChevronRight,
  ChevronRightChevronRight,
  ChevronRightChevronRightChevronRight,
  ChevronRightChevronRightChevronRightEquals,
  ChevronRightChevronRightEquals,
  ChevronRightEquals,
  Colon,
  Comma,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  EqualsEquals,
  EqualsEqualsEquals,
  Exclamation,
  ExclamationEquals,
  ExclamationEqualsEquals,
  Hyphen,
  HyphenEquals,
  HyphenHyphen,
  Identifier,
  JsxTextContent,
  KeywordAs,
  KeywordAsync,
  KeywordAwait,
  KeywordBreak,
  KeywordCase,
  KeywordCatch,
  KeywordClass,
  KeywordConst,
  KeywordConstructor,
  KeywordContinue,
  KeywordDebugger,
  KeywordDefault,
  KeywordDelete,
  KeywordDo,
  KeywordElse,
  KeywordEnum,
  KeywordExport,
  KeywordExtends,
  KeywordFinally,
  KeywordFor,
  KeywordFrom,
  KeywordFunction,
  KeywordGet,
  KeywordIf,
  KeywordImport,
  KeywordIn,
  KeywordInstanceof,
  KeywordLet,
  KeywordNew,
  KeywordOf,
  KeywordReturn,
  KeywordSet,
  KeywordStatic,
  KeywordSuper,
  KeywordSwitch,
  KeywordThis,
  KeywordThrow,
  KeywordTry,
  KeywordTypeof,
  KeywordVar,
  KeywordVoid,
  KeywordWhile,
  KeywordWith,
  KeywordYield,
  LiteralBigInt,
  LiteralFalse,
  LiteralNull,
  LiteralNumber,
  LiteralRegex,
  LiteralString,
  LiteralTemplatePartString,
  LiteralTemplatePartStringEnd,
  LiteralTrue,
  ParenthesisClose,
  ParenthesisOpen,
  Percent,
  PercentEquals,
  Plus,
  PlusEquals,
  PlusPlus,
  PrivateMember,
  Question,
  QuestionDot,
  QuestionDotBracketOpen,
  QuestionDotParenthesisOpen,
  QuestionQuestion,
  QuestionQuestionEquals,
  Semicolon,
  Slash,
  SlashEquals,
  Tilde,
}

impl TT {
  /// Reserved words, contextual keywords and the `true`/`false`/`null` literals.
  pub fn keyword(word: &str) -> Option<TT> {
    Some(match word {
      "as" => TT::KeywordAs,
      "async" => TT::KeywordAsync,
      "await" => TT::KeywordAwait,
      "break" => TT::KeywordBreak,
      "case" => TT::KeywordCase,
      "catch" => TT::KeywordCatch,
      "class" => TT::KeywordClass,
      "const" => TT::KeywordConst,
      "constructor" => TT::KeywordConstructor,
      "continue" => TT::KeywordContinue,
      "debugger" => TT::KeywordDebugger,
      "default" => TT::KeywordDefault,
      "delete" => TT::KeywordDelete,
      "do" => TT::KeywordDo,
      "else" => TT::KeywordElse,
      "enum" => TT::KeywordEnum,
      "export" => TT::KeywordExport,
      "extends" => TT::KeywordExtends,
      "false" => TT::LiteralFalse,
      "finally" => TT::KeywordFinally,
      "for" => TT::KeywordFor,
      "from" => TT::KeywordFrom,
      "function" => TT::KeywordFunction,
      "get" => TT::KeywordGet,
      "if" => TT::KeywordIf,
      "import" => TT::KeywordImport,
      "in" => TT::KeywordIn,
      "instanceof" => TT::KeywordInstanceof,
      "let" => TT::KeywordLet,
      "new" => TT::KeywordNew,
      "null" => TT::LiteralNull,
      "of" => TT::KeywordOf,
      "return" => TT::KeywordReturn,
      "set" => TT::KeywordSet,
      "static" => TT::KeywordStatic,
      "super" => TT::KeywordSuper,
      "switch" => TT::KeywordSwitch,
      "this" => TT::KeywordThis,
      "throw" => TT::KeywordThrow,
      "true" => TT::LiteralTrue,
      "try" => TT::KeywordTry,
      "typeof" => TT::KeywordTypeof,
      "var" => TT::KeywordVar,
      "void" => TT::KeywordVoid,
      "while" => TT::KeywordWhile,
      "with" => TT::KeywordWith,
      "yield" => TT::KeywordYield,
      _ => return None,
    })
  }

  /// Whether the token is spelled as a word, so it may name a property or a JSX attribute.
  pub fn is_keyword(self) -> bool {
    // Keyword variants are declared contiguously.
    matches!(self, TT::LiteralFalse | TT::LiteralNull | TT::LiteralTrue)
      || (TT::KeywordAs..=TT::KeywordYield).contains(&self)
  }

  /// Keywords that may still be used as binding names.
  pub fn is_contextual_keyword(self) -> bool {
    matches!(
      self,
      TT::KeywordAs
        | TT::KeywordAsync
        | TT::KeywordConstructor
        | TT::KeywordFrom
        | TT::KeywordGet
        | TT::KeywordLet
        | TT::KeywordOf
        | TT::KeywordSet
        | TT::KeywordStatic
    )
  }
}

#[derive(Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  /// Whether a line terminator (possibly inside a comment) separates this token from the previous one.
  pub preceded_by_line_terminator: bool,
  pub typ: TT,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    let typ = match (typ, self.typ) {
      (_, TT::EOF) => SyntaxErrorType::UnexpectedEnd,
      (_, TT::Invalid) => SyntaxErrorType::InvalidToken,
      (typ, _) => typ,
    };
    self.loc.error(typ, Some(self.typ))
  }
}
