use crate::operator::Operator;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::token::TT;

/// The operator a token introduces when it follows a complete operand: binary operators,
/// assignments, member access, calls, and the conditional.
pub fn multary_operator(tt: TT) -> Option<&'static Operator> {
  use OperatorName as O;
  let name = match tt {
    TT::Equals => O::Assignment,
    TT::PlusEquals => O::AssignmentAddition,
    TT::HyphenEquals => O::AssignmentSubtraction,
    TT::AsteriskEquals => O::AssignmentMultiplication,
    TT::SlashEquals => O::AssignmentDivision,
    TT::PercentEquals => O::AssignmentRemainder,
    TT::AsteriskAsteriskEquals => O::AssignmentExponentiation,
    TT::AmpersandEquals => O::AssignmentBitwiseAnd,
    TT::BarEquals => O::AssignmentBitwiseOr,
    TT::CaretEquals => O::AssignmentBitwiseXor,
    TT::ChevronLeftChevronLeftEquals => O::AssignmentBitwiseLeftShift,
    TT::ChevronRightChevronRightEquals => O::AssignmentBitwiseRightShift,
    TT::ChevronRightChevronRightChevronRightEquals => O::AssignmentBitwiseUnsignedRightShift,
    TT::AmpersandAmpersandEquals => O::AssignmentLogicalAnd,
    TT::BarBarEquals => O::AssignmentLogicalOr,
    TT::QuestionQuestionEquals => O::AssignmentNullishCoalescing,

    TT::Plus => O::Addition,
    TT::Hyphen => O::Subtraction,
    TT::Asterisk => O::Multiplication,
    TT::Slash => O::Division,
    TT::Percent => O::Remainder,
    TT::AsteriskAsterisk => O::Exponentiation,
    TT::Ampersand => O::BitwiseAnd,
    TT::Bar => O::BitwiseOr,
    TT::Caret => O::BitwiseXor,
    TT::ChevronLeftChevronLeft => O::BitwiseLeftShift,
    TT::ChevronRightChevronRight => O::BitwiseRightShift,
    TT::ChevronRightChevronRightChevronRight => O::BitwiseUnsignedRightShift,
    TT::AmpersandAmpersand => O::LogicalAnd,
    TT::BarBar => O::LogicalOr,
    TT::QuestionQuestion => O::NullishCoalescing,

    TT::EqualsEquals => O::Equality,
    TT::ExclamationEquals => O::Inequality,
    TT::EqualsEqualsEquals => O::StrictEquality,
    TT::ExclamationEqualsEquals => O::StrictInequality,
    TT::ChevronLeft => O::LessThan,
    TT::ChevronLeftEquals => O::LessThanOrEqual,
    TT::ChevronRight => O::GreaterThan,
    TT::ChevronRightEquals => O::GreaterThanOrEqual,
    TT::KeywordIn => O::In,
    TT::KeywordInstanceof => O::Instanceof,

    TT::Dot => O::MemberAccess,
    TT::BracketOpen => O::ComputedMemberAccess,
    TT::ParenthesisOpen => O::Call,
    TT::QuestionDot => O::OptionalChainingMemberAccess,
    TT::QuestionDotBracketOpen => O::OptionalChainingComputedMemberAccess,
    TT::QuestionDotParenthesisOpen => O::OptionalChainingCall,
    TT::Question => O::Conditional,
    TT::Comma => O::Comma,
    _ => return None,
  };
  Some(&OPERATORS[&name])
}

/// The operator a token introduces before an operand. Postfix updates and `yield*` need more
/// than one token and are recognised by the expression parser itself.
pub fn unary_operator(tt: TT) -> Option<&'static Operator> {
  use OperatorName as O;
  let name = match tt {
    TT::KeywordAwait => O::Await,
    TT::KeywordDelete => O::Delete,
    TT::KeywordNew => O::New,
    TT::KeywordTypeof => O::Typeof,
    TT::KeywordVoid => O::Void,
    TT::KeywordYield => O::Yield,
    TT::Exclamation => O::LogicalNot,
    TT::Tilde => O::BitwiseNot,
    TT::Plus => O::UnaryPlus,
    TT::Hyphen => O::UnaryNegation,
    TT::PlusPlus => O::PrefixIncrement,
    TT::HyphenHyphen => O::PrefixDecrement,
    _ => return None,
  };
  Some(&OPERATORS[&name])
}
