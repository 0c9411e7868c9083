use heirshare_types::Fraction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of an exact arithmetic operation.
///
/// None of these should reach an end user in normal operation; they indicate
/// malformed input or an internal invariant violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("invalid fraction {fraction}: denominator must be positive")]
    InvalidDenominator { fraction: Fraction },

    #[error("cannot divide {fraction} by zero")]
    DivisionByZero { fraction: Fraction },

    #[error("{operation} overflowed the 64-bit range")]
    Overflow { operation: &'static str },

    #[error("cannot apportion a negative amount ({amount})")]
    NegativeAmount { amount: Decimal },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidFieldValue,
    DivisionByZero,
    CalculationOverflow,
    BusinessRuleViolation,
}

impl CalculatorError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CalculatorError::InvalidDenominator { .. } => ErrorCode::InvalidFieldValue,
            CalculatorError::DivisionByZero { .. } => ErrorCode::DivisionByZero,
            CalculatorError::Overflow { .. } => ErrorCode::CalculationOverflow,
            CalculatorError::NegativeAmount { .. } => ErrorCode::BusinessRuleViolation,
        }
    }

    pub(crate) fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }
}

pub type CalculatorResult<T> = Result<T, CalculatorError>;
