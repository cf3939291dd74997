use crate::operator::OperatorName;
use crate::token::TT;

/// The operator a token denotes when it follows an operand.
pub fn infix_operator(typ: TT) -> Option<OperatorName> {
  use OperatorName::*;
  Some(match typ {
    TT::Ampersand => BitwiseAnd,
    TT::AmpersandAmpersand => LogicalAnd,
    TT::AmpersandAmpersandEquals => AssignmentLogicalAnd,
    TT::AmpersandEquals => AssignmentBitwiseAnd,
    TT::Asterisk => Multiplication,
    TT::AsteriskAsterisk => Exponentiation,
    TT::AsteriskAsteriskEquals => AssignmentExponentiation,
    TT::AsteriskEquals => AssignmentMultiplication,
    TT::Bar => BitwiseOr,
    TT::BarBar => LogicalOr,
    TT::BarBarEquals => AssignmentLogicalOr,
    TT::BarEquals => AssignmentBitwiseOr,
    TT::BracketOpen => ComputedMemberAccess,
    TT::Caret => BitwiseXor,
    TT::CaretEquals => AssignmentBitwiseXor,
    TT::ChevronLeft => LessThan,
    TT::ChevronLeftChevronLeft => BitwiseLeftShift,
    TT::ChevronLeftChevronLeftEquals => AssignmentBitwiseLeftShift,
    TT::ChevronLeftEquals => LessThanOrEqual,
    TT::ChevronRight => GreaterThan,
    TT::ChevronRightChevronRight => BitwiseRightShift,
    TT::ChevronRightChevronRightChevronRight => BitwiseUnsignedRightShift,
    TT::ChevronRightChevronRightChevronRightEquals => AssignmentBitwiseUnsignedRightShift,
    TT::ChevronRightChevronRightEquals => AssignmentBitwiseRightShift,
    TT::ChevronRightEquals => GreaterThanOrEqual,
    TT::Comma => Comma,
    TT::Dot => MemberAccess,
    TT::Equals => Assignment,
    TT::EqualsEquals => Equality,
    TT::EqualsEqualsEquals => StrictEquality,
    TT::ExclamationEquals => Inequality,
    TT::ExclamationEqualsEquals => StrictInequality,
    TT::Hyphen => Subtraction,
    TT::HyphenEquals => AssignmentSubtraction,
    TT::KeywordIn => In,
    TT::KeywordInstanceof => Instanceof,
    TT::ParenthesisOpen => Call,
    TT::Percent => Remainder,
    TT::PercentEquals => AssignmentRemainder,
    TT::Plus => Addition,
    TT::PlusEquals => AssignmentAddition,
    TT::Question => Conditional,
    TT::QuestionDot => OptionalChainingMemberAccess,
    TT::QuestionDotBracketOpen => OptionalChainingComputedMemberAccess,
    TT::QuestionDotParenthesisOpen => OptionalChainingCall,
    TT::QuestionQuestion => NullishCoalescing,
    TT::QuestionQuestionEquals => AssignmentNullishCoalescing,
    TT::Slash => Division,
    TT::SlashEquals => AssignmentDivision,
    _ => return None,
  })
}

/// The operator a token denotes at the start of an operand. Postfix updates, `yield*` and `new`
/// are recognised by the expression parser itself.
pub fn prefix_operator(typ: TT) -> Option<OperatorName> {
  use OperatorName::*;
  Some(match typ {
    TT::Exclamation => LogicalNot,
    TT::Hyphen => UnaryNegation,
    TT::HyphenHyphen => PrefixDecrement,
    TT::KeywordAwait => Await,
    TT::KeywordDelete => Delete,
    TT::KeywordTypeof => Typeof,
    TT::KeywordVoid => Void,
    TT::KeywordYield => Yield,
    TT::Plus => UnaryPlus,
    TT::PlusPlus => PrefixIncrement,
    TT::Tilde => BitwiseNot,
    _ => return None,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_operator_lookup() {
    assert_eq!(infix_operator(TT::Hyphen), Some(OperatorName::Subtraction));
    assert_eq!(prefix_operator(TT::Hyphen), Some(OperatorName::UnaryNegation));
    assert_eq!(infix_operator(TT::Tilde), None);
    assert_eq!(prefix_operator(TT::Comma), None);
  }
}
