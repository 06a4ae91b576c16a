//! Реестр операций: отображение символа в поведение.
//!
//! Реестр ничего не знает об арности: он хранит операцию под символом и
//! отдаёт её по запросу. Сколько операндов передать, решает вызывающая
//! сторона, а сама операция отказывает, если их число не подходит.
//!
//! # Пример
//!
//! ```
//! use registry_calc::expression::Operands;
//! use registry_calc::registry::{Operation, Registry};
//!
//! let mut registry = Registry::new();
//! registry.register("avg", Operation::binary(|a, b| Ok((a + b) / 2.0)));
//!
//! let avg = registry.lookup("avg").unwrap();
//! assert_eq!(avg.invoke(Operands::Two(2.0, 4.0)), Ok(3.0));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::expression::{BinaryOp, EvalError, Operands, UnaryOp};

type UnaryFn = dyn Fn(f64) -> Result<f64, EvalError>;
type BinaryFn = dyn Fn(f64, f64) -> Result<f64, EvalError>;

/// Операция, хранимая в реестре.
pub enum Operation {
    /// Операция от одного операнда.
    Unary(Box<UnaryFn>),
    /// Операция от двух операндов.
    Binary(Box<BinaryFn>),
}

impl Operation {
    /// Оборачивает функцию одного аргумента.
    pub fn unary(f: impl Fn(f64) -> Result<f64, EvalError> + 'static) -> Self {
        Self::Unary(Box::new(f))
    }

    /// Оборачивает функцию двух аргументов.
    pub fn binary(f: impl Fn(f64, f64) -> Result<f64, EvalError> + 'static) -> Self {
        Self::Binary(Box::new(f))
    }

    /// Сколько операндов принимает операция.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }

    /// Вызывает операцию с переданными операндами.
    ///
    /// # Ошибки
    ///
    /// - [`EvalError::InvocationMismatch`], если число операндов не совпадает
    ///   с арностью операции.
    /// - Любая ошибка, которую вернула сама функция.
    pub fn invoke(&self, operands: Operands) -> Result<f64, EvalError> {
        match (self, operands) {
            (Self::Unary(f), Operands::One(x)) => f(x),
            (Self::Binary(f), Operands::Two(x, y)) => f(x, y),
            _ => Err(EvalError::InvocationMismatch {
                expected: self.arity(),
                got: operands.count(),
            }),
        }
    }
}

impl From<BinaryOp> for Operation {
    fn from(op: BinaryOp) -> Self {
        Self::binary(move |x, y| op.apply(x, y))
    }
}

impl From<UnaryOp> for Operation {
    fn from(op: UnaryOp) -> Self {
        Self::unary(move |x| op.apply(x))
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unary(_) => f.write_str("Operation::Unary(..)"),
            Self::Binary(_) => f.write_str("Operation::Binary(..)"),
        }
    }
}

/// Отображение символа операции в операцию.
#[derive(Debug, Default)]
pub struct Registry {
    operations: HashMap<String, Operation>,
}

impl Registry {
    /// Пустой реестр без единой операции.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Реестр с базовыми операциями `+`, `-`, `*`, `/`.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("+", BinaryOp::Add);
        registry.register("-", BinaryOp::Sub);
        registry.register("*", BinaryOp::Mul);
        registry.register("/", BinaryOp::Div);
        registry
    }

    /// Регистрирует операцию под символом, заменяя прежнюю, если она была.
    ///
    /// Символ не должен быть пустым: из строки ввода пустой символ получить
    /// нельзя, так что такая операция была бы недостижима.
    pub fn register(&mut self, symbol: impl Into<String>, operation: impl Into<Operation>) {
        let symbol = symbol.into();
        debug_assert!(!symbol.is_empty(), "symbol must not be empty");
        self.operations.insert(symbol, operation.into());
    }

    /// Ищет операцию по символу.
    #[must_use]
    pub fn lookup(&self, symbol: &str) -> Option<&Operation> {
        self.operations.get(symbol)
    }

    /// Зарегистрирован ли символ.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.operations.contains_key(symbol)
    }

    /// Число зарегистрированных операций.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Пуст ли реестр.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Символы всех операций в лексикографическом порядке.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}
