//! Выражение калькулятора и встроенные арифметические операции.
//!
//! Выражение всегда плоское: один оператор и один или два операнда `f64`.
//!
//! # Примеры
//!
//! ```
//! use registry_calc::expression::{BinaryOp, EvalError, UnaryOp};
//!
//! assert_eq!(BinaryOp::Add.apply(2.0, 3.0), Ok(5.0));
//! assert_eq!(BinaryOp::Div.apply(1.0, 0.0), Ok(f64::INFINITY));
//! assert!(matches!(UnaryOp::Sqrt.apply(-4.0), Err(EvalError::Domain(_))));
//! ```

use std::fmt::Display;

use thiserror::Error;

/// Ошибки при вызове операции.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Аргумент вне области определения операции.
    #[error("{0}")]
    Domain(String),
    /// Операция вызвана с неподходящим числом операндов.
    #[error("expects {expected} operand(s), got {got}")]
    InvocationMismatch {
        /// Сколько операндов принимает операция.
        expected: usize,
        /// Сколько операндов передано.
        got: usize,
    },
}

impl EvalError {
    /// Создаёт ошибку области определения.
    #[must_use]
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::Domain(reason.into())
    }
}

/// Операнды одного вызова.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operands {
    /// Унарная форма: `op x`.
    One(f64),
    /// Бинарная форма: `x op y`.
    Two(f64, f64),
}

impl Operands {
    /// Число операндов.
    #[must_use]
    pub const fn count(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }
}

/// Какой по счёту операнд выражения.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSlot {
    /// Первый операнд (`x` в `x op y` или в `op x`).
    First,
    /// Второй операнд (`y` в `x op y`).
    Second,
}

impl Display for OperandSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
        }
    }
}

/// Разобранная строка ввода: символ операции и её операнды.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    /// Символ операции.
    pub symbol: String,
    /// Операнды в порядке записи.
    pub operands: Operands,
}

impl Expression {
    /// Унарное выражение `symbol x`.
    #[must_use]
    pub fn unary(symbol: impl Into<String>, x: f64) -> Self {
        Self {
            symbol: symbol.into(),
            operands: Operands::One(x),
        }
    }

    /// Бинарное выражение `x symbol y`.
    #[must_use]
    pub fn binary(x: f64, symbol: impl Into<String>, y: f64) -> Self {
        Self {
            symbol: symbol.into(),
            operands: Operands::Two(x, y),
        }
    }
}

/// Встроенные бинарные операции.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Сложение.
    Add,
    /// Вычитание.
    Sub,
    /// Умножение.
    Mul,
    /// Деление; деление на ноль даёт `+inf`.
    Div,
    /// Возведение в степень.
    Pow,
}

impl BinaryOp {
    /// Применить бинарную операцию к операндам.
    ///
    /// Встроенные бинарные операции не отказывают: `x / 0` для любого `x`
    /// возвращает положительную бесконечность.
    pub fn apply(self, left: f64, right: f64) -> Result<f64, EvalError> {
        let value = match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => {
                if right == 0.0 {
                    f64::INFINITY
                } else {
                    left / right
                }
            }
            Self::Pow => left.powf(right),
        };
        Ok(value)
    }
}

/// Встроенные унарные операции.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Квадратный корень.
    Sqrt,
    /// Натуральный логарифм.
    Ln,
}

impl UnaryOp {
    /// Применить унарную операцию к значению.
    ///
    /// # Ошибки
    ///
    /// - [`EvalError::Domain`] для `sqrt` от отрицательного числа.
    /// - [`EvalError::Domain`] для `log` от нуля или отрицательного числа.
    pub fn apply(self, value: f64) -> Result<f64, EvalError> {
        match self {
            Self::Sqrt if value < 0.0 => Err(EvalError::domain(
                "cannot compute square root of a negative number",
            )),
            Self::Sqrt => Ok(value.sqrt()),
            Self::Ln if value <= 0.0 => Err(EvalError::domain(
                "logarithm undefined for zero or negative values",
            )),
            Self::Ln => Ok(value.ln()),
        }
    }
}
