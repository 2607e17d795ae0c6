use std::fmt;

use thiserror::Error;

/// Largest operand drawn for addition and subtraction.
pub const ADD_SUB_MAX: u32 = 100;

/// Largest operand drawn for multiplication.
pub const MUL_MAX: u32 = 9;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("operand {value} exceeds {max} for {operator}")]
    OperandOutOfRange {
        operator: Operator,
        value: u32,
        max: u32,
    },

    #[error("subtraction {a} - {b} would be negative")]
    NegativeDifference { a: u32, b: u32 },
}

//
// ─── OPERATOR ─────────────────────────────────────────────────────────────────
//

/// Arithmetic operation of a drill problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    /// Plain-text symbol used when rendering a problem.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
        }
    }

    /// Largest operand value allowed for this operator.
    #[must_use]
    pub fn max_operand(self) -> u32 {
        match self {
            Operator::Add | Operator::Subtract => ADD_SUB_MAX,
            Operator::Multiply => MUL_MAX,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Add => "addition",
            Operator::Subtract => "subtraction",
            Operator::Multiply => "multiplication",
        };
        f.write_str(name)
    }
}

//
// ─── PROBLEM ──────────────────────────────────────────────────────────────────
//

/// One arithmetic question.
///
/// Equality and hashing cover the full `(a, b, operator)` triple, which is also
/// the identity used by the mistake ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Problem {
    a: u32,
    b: u32,
    operator: Operator,
}

impl Problem {
    /// Build a problem, checking operand ranges and the non-negative subtraction rule.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::OperandOutOfRange` if an operand exceeds the operator's range.
    /// Returns `ProblemError::NegativeDifference` if `operator` is subtract and `a < b`.
    pub fn new(a: u32, b: u32, operator: Operator) -> Result<Self, ProblemError> {
        let max = operator.max_operand();
        for value in [a, b] {
            if value > max {
                return Err(ProblemError::OperandOutOfRange {
                    operator,
                    value,
                    max,
                });
            }
        }
        if operator == Operator::Subtract && a < b {
            return Err(ProblemError::NegativeDifference { a, b });
        }

        Ok(Self { a, b, operator })
    }

    /// Build from generator draws that satisfy the invariants by construction.
    pub(crate) fn from_draws(a: u32, b: u32, operator: Operator) -> Self {
        debug_assert!(Self::new(a, b, operator).is_ok());
        Self { a, b, operator }
    }

    #[must_use]
    pub fn a(&self) -> u32 {
        self.a
    }

    #[must_use]
    pub fn b(&self) -> u32 {
        self.b
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The correct answer.
    #[must_use]
    pub fn expected(&self) -> i64 {
        let a = i64::from(self.a);
        let b = i64::from(self.b);
        match self.operator {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.a, self.operator.symbol(), self.b)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
