//! Разбор строки ввода в команду калькулятора.
//!
//! # Грамматика
//!
//! ```text
//! line   = "exit" | unary | binary
//! unary  = SYMBOL NUMBER
//! binary = NUMBER SYMBOL NUMBER
//! ```
//!
//! Слова разделяются пробельными символами. `exit` распознаётся без учёта
//! регистра и окружающих пробелов. Числа разбираются как `f64`, так что
//! `inf` и `nan` тоже допустимы; `_` между цифрами (`1_000`) пропускается.
//!
//! # Примеры
//!
//! ```
//! use registry_calc::expression::Expression;
//! use registry_calc::parser::{parse, Command};
//!
//! assert_eq!(parse("5 + 2").unwrap(), Command::Evaluate(Expression::binary(5.0, "+", 2.0)));
//! assert_eq!(parse("sqrt 9").unwrap(), Command::Evaluate(Expression::unary("sqrt", 9.0)));
//! assert_eq!(parse("  EXIT ").unwrap(), Command::Exit);
//! ```

use std::num::ParseFloatError;

use thiserror::Error;

use crate::expression::{Expression, OperandSlot};
use crate::token::{SpannedToken, Tokenizer};

/// Ключевое слово завершения работы.
pub const EXIT_KEYWORD: &str = "exit";

/// Ошибки разбора строки ввода.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Строка не из двух и не из трёх слов.
    #[error("invalid input format: expected 2 or 3 tokens, got {tokens}")]
    InvalidFormat {
        /// Сколько слов в строке.
        tokens: usize,
    },

    /// Операнд не является числом.
    #[error("{slot} operand '{token}' is not a number: {source}")]
    InvalidNumber {
        /// Какой операнд.
        slot: OperandSlot,
        /// Исходный текст операнда.
        token: String,
        /// Позиция операнда.
        pos: usize,
        /// Причина от `str::parse`.
        source: ParseFloatError,
    },
}

impl ParseError {
    /// Возвращает позицию ошибки, если она известна.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::InvalidFormat { .. } => None,
            Self::InvalidNumber { pos, .. } => Some(*pos),
        }
    }
}

/// Что нужно сделать со строкой ввода.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Завершить цикл.
    Exit,
    /// Вычислить выражение.
    Evaluate(Expression),
}

/// Проверяет, является ли строка командой выхода.
#[must_use]
pub fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_KEYWORD)
}

/// Убирает разделители `_` между цифрами (`1_000` -> `1000`).
///
/// `None`, если разделителей нет или хотя бы один стоит не между двумя
/// цифрами: такой текст разбирается как есть и отвергается `str::parse`.
fn strip_digit_separators(text: &str) -> Option<String> {
    if !text.contains('_') {
        return None;
    }

    let bytes = text.as_bytes();
    let well_placed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });

    well_placed.then(|| text.replace('_', ""))
}

fn number(token: SpannedToken<'_>, slot: OperandSlot) -> Result<f64, ParseError> {
    let parsed = match strip_digit_separators(token.text) {
        Some(plain) => plain.parse(),
        None => token.text.parse(),
    };

    parsed.map_err(|source| ParseError::InvalidNumber {
        slot,
        token: token.text.to_owned(),
        pos: token.pos,
        source,
    })
}

/// Разбирает строку в команду.
///
/// # Ошибки
///
/// - [`ParseError::InvalidFormat`], если слов не два и не три.
/// - [`ParseError::InvalidNumber`], если операнд не разбирается как `f64`.
pub fn parse(input: &str) -> Result<Command, ParseError> {
    if is_exit(input) {
        return Ok(Command::Exit);
    }

    let tokens: Vec<SpannedToken<'_>> = Tokenizer::new(input).collect();

    let expr = match tokens[..] {
        [op, x] => Expression::unary(op.text, number(x, OperandSlot::First)?),
        [x, op, y] => {
            let x = number(x, OperandSlot::First)?;
            let y = number(y, OperandSlot::Second)?;
            Expression::binary(x, op.text, y)
        }
        _ => {
            return Err(ParseError::InvalidFormat {
                tokens: tokens.len(),
            });
        }
    };

    Ok(Command::Evaluate(expr))
}
