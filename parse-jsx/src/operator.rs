use crate::ast::AssignmentOperator;
use crate::ast::BinaryOperator;
use crate::ast::LogicalOperator;
use crate::ast::UnaryOperator;
use crate::ast::UpdateOperator;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  ConditionalAlternate,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  New,
  NullishCoalescing,
  OptionalChainingCall,
  OptionalChainingComputedMemberAccess,
  OptionalChainingMemberAccess,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
  Yield,
  YieldDelegated,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    self.assignment().is_some()
  }

  pub fn assignment(self) -> Option<AssignmentOperator> {
    Some(match self {
      OperatorName::Assignment => AssignmentOperator::Assign,
      OperatorName::AssignmentAddition => AssignmentOperator::Add,
      OperatorName::AssignmentBitwiseAnd => AssignmentOperator::BitAnd,
      OperatorName::AssignmentBitwiseLeftShift => AssignmentOperator::LeftShift,
      OperatorName::AssignmentBitwiseOr => AssignmentOperator::BitOr,
      OperatorName::AssignmentBitwiseRightShift => AssignmentOperator::RightShift,
      OperatorName::AssignmentBitwiseUnsignedRightShift => AssignmentOperator::UnsignedRightShift,
      OperatorName::AssignmentBitwiseXor => AssignmentOperator::BitXor,
      OperatorName::AssignmentDivision => AssignmentOperator::Divide,
      OperatorName::AssignmentExponentiation => AssignmentOperator::Exponent,
      OperatorName::AssignmentLogicalAnd => AssignmentOperator::LogicalAnd,
      OperatorName::AssignmentLogicalOr => AssignmentOperator::LogicalOr,
      OperatorName::AssignmentMultiplication => AssignmentOperator::Multiply,
      OperatorName::AssignmentNullishCoalescing => AssignmentOperator::Nullish,
      OperatorName::AssignmentRemainder => AssignmentOperator::Remainder,
      OperatorName::AssignmentSubtraction => AssignmentOperator::Subtract,
      _ => return None,
    })
  }

  pub fn binary(self) -> Option<BinaryOperator> {
    Some(match self {
      OperatorName::Addition => BinaryOperator::Add,
      OperatorName::BitwiseAnd => BinaryOperator::BitAnd,
      OperatorName::BitwiseLeftShift => BinaryOperator::LeftShift,
      OperatorName::BitwiseOr => BinaryOperator::BitOr,
      OperatorName::BitwiseRightShift => BinaryOperator::RightShift,
      OperatorName::BitwiseUnsignedRightShift => BinaryOperator::UnsignedRightShift,
      OperatorName::BitwiseXor => BinaryOperator::BitXor,
      OperatorName::Division => BinaryOperator::Divide,
      OperatorName::Equality => BinaryOperator::Equal,
      OperatorName::Exponentiation => BinaryOperator::Exponent,
      OperatorName::GreaterThan => BinaryOperator::GreaterThan,
      OperatorName::GreaterThanOrEqual => BinaryOperator::GreaterThanOrEqual,
      OperatorName::In => BinaryOperator::In,
      OperatorName::Inequality => BinaryOperator::NotEqual,
      OperatorName::Instanceof => BinaryOperator::Instanceof,
      OperatorName::LessThan => BinaryOperator::LessThan,
      OperatorName::LessThanOrEqual => BinaryOperator::LessThanOrEqual,
      OperatorName::Multiplication => BinaryOperator::Multiply,
      OperatorName::Remainder => BinaryOperator::Remainder,
      OperatorName::StrictEquality => BinaryOperator::StrictEqual,
      OperatorName::StrictInequality => BinaryOperator::StrictNotEqual,
      OperatorName::Subtraction => BinaryOperator::Subtract,
      _ => return None,
    })
  }

  pub fn logical(self) -> Option<LogicalOperator> {
    Some(match self {
      OperatorName::LogicalAnd => LogicalOperator::And,
      OperatorName::LogicalOr => LogicalOperator::Or,
      OperatorName::NullishCoalescing => LogicalOperator::Nullish,
      _ => return None,
    })
  }

  pub fn unary(self) -> Option<UnaryOperator> {
    Some(match self {
      OperatorName::BitwiseNot => UnaryOperator::BitNot,
      OperatorName::Delete => UnaryOperator::Delete,
      OperatorName::LogicalNot => UnaryOperator::Not,
      OperatorName::Typeof => UnaryOperator::Typeof,
      OperatorName::UnaryNegation => UnaryOperator::Minus,
      OperatorName::UnaryPlus => UnaryOperator::Plus,
      OperatorName::Void => UnaryOperator::Void,
      _ => return None,
    })
  }

  pub fn update(self) -> Option<UpdateOperator> {
    Some(match self {
      OperatorName::PostfixDecrement | OperatorName::PrefixDecrement => UpdateOperator::Decrement,
      OperatorName::PostfixIncrement | OperatorName::PrefixIncrement => UpdateOperator::Increment,
      _ => return None,
    })
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

impl OperatorName {
  /// Binding strength. The comma operator binds loosest at 1, so `expr_with_min_prec(1, ...)`
  /// parses a full expression.
  pub fn precedence(self) -> u8 {
    use OperatorName::*;
    match self {
      Call
      | ComputedMemberAccess
      | MemberAccess
      | OptionalChainingCall
      | OptionalChainingComputedMemberAccess
      | OptionalChainingMemberAccess => 18,
      New => 17,
      PostfixDecrement | PostfixIncrement => 16,
      Await | BitwiseNot | Delete | LogicalNot | PrefixDecrement | PrefixIncrement | Typeof
      | UnaryNegation | UnaryPlus | Void => 15,
      Exponentiation => 14,
      Division | Multiplication | Remainder => 13,
      Addition | Subtraction => 12,
      BitwiseLeftShift | BitwiseRightShift | BitwiseUnsignedRightShift => 11,
      GreaterThan | GreaterThanOrEqual | In | Instanceof | LessThan | LessThanOrEqual => 10,
      Equality | Inequality | StrictEquality | StrictInequality => 9,
      BitwiseAnd => 8,
      BitwiseXor => 7,
      BitwiseOr => 6,
      LogicalAnd => 5,
      LogicalOr | NullishCoalescing => 4,
      Conditional => 3,
      // The alternate of a conditional is parsed at assignment precedence.
      Assignment
      | AssignmentAddition
      | AssignmentBitwiseAnd
      | AssignmentBitwiseLeftShift
      | AssignmentBitwiseOr
      | AssignmentBitwiseRightShift
      | AssignmentBitwiseUnsignedRightShift
      | AssignmentBitwiseXor
      | AssignmentDivision
      | AssignmentExponentiation
      | AssignmentLogicalAnd
      | AssignmentLogicalOr
      | AssignmentMultiplication
      | AssignmentNullishCoalescing
      | AssignmentRemainder
      | AssignmentSubtraction
      | ConditionalAlternate
      | Yield
      | YieldDelegated => 2,
      Comma => 1,
    }
  }

  pub fn associativity(self) -> Associativity {
    use OperatorName::*;
    match self {
      New | Await | BitwiseNot | Delete | LogicalNot | PrefixDecrement | PrefixIncrement
      | Typeof | UnaryNegation | UnaryPlus | Void | Exponentiation | Conditional
      | ConditionalAlternate | Yield | YieldDelegated => Associativity::Right,
      _ if self.is_assignment() => Associativity::Right,
      _ => Associativity::Left,
    }
  }

  /// Minimum precedence for the right operand.
  pub fn right_min_precedence(self) -> u8 {
    self.precedence() + (self.associativity() == Associativity::Left) as u8
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_precedence_ordering() {
    let p = OperatorName::precedence;
    assert_eq!(p(OperatorName::Comma), 1);
    assert!(p(OperatorName::Multiplication) > p(OperatorName::Addition));
    assert!(p(OperatorName::Exponentiation) > p(OperatorName::Multiplication));
    assert!(p(OperatorName::LogicalAnd) > p(OperatorName::LogicalOr));
    assert_eq!(p(OperatorName::LogicalOr), p(OperatorName::NullishCoalescing));
    assert_eq!(p(OperatorName::ConditionalAlternate), p(OperatorName::Assignment));
    assert!(p(OperatorName::Call) > p(OperatorName::PostfixIncrement));
  }

  #[test]
  fn test_operator_name_conversions() {
    assert_eq!(OperatorName::Addition.binary(), Some(BinaryOperator::Add));
    assert_eq!(OperatorName::Addition.logical(), None);
    assert!(OperatorName::AssignmentNullishCoalescing.is_assignment());
    assert!(!OperatorName::Equality.is_assignment());
    assert_eq!(OperatorName::Exponentiation.associativity(), Associativity::Right);
    assert_eq!(OperatorName::Subtraction.right_min_precedence(), 13);
  }
}
