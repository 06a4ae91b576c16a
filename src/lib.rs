//! # registry_calc
//!
//! Консольный калькулятор с расширяемым реестром операций.
//!
//! Каждая строка ввода содержит ровно одну операцию:
//! - бинарную форму `x op y`, например `5 + 2`;
//! - унарную форму `op x`, например `sqrt 9`.
//!
//! Операции хранятся в [`Registry`] под своими символами. Встроены `+`,
//! `-`, `*`, `/`; [`Calculator::standard`] дополнительно регистрирует `^`,
//! `sqrt` и `log`. Новые операции регистрируются той же функцией
//! [`Registry::register`].
//!
//! # Пример использования
//!
//! ```
//! use registry_calc::Calculator;
//!
//! let calc = Calculator::standard();
//! assert_eq!(calc.evaluate("5 + 2").unwrap(), 7.0);
//! assert_eq!(calc.evaluate("sqrt 9").unwrap(), 3.0);
//! assert_eq!(calc.evaluate("10 / 0").unwrap(), f64::INFINITY);
//! ```

pub mod expression;
pub mod parser;
pub mod registry;
pub mod token;

use std::io::{self, BufRead, Write};

use expression::{BinaryOp, EvalError, Expression, Operands, UnaryOp};
use parser::{Command, ParseError};
pub use registry::{Operation, Registry};

/// Приглашение к вводу.
pub const PROMPT: &str = "Enter calculation (e.g., 5 + 2) or 'exit': ";

/// Общий тип ошибки калькулятора.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    /// Ошибка разбора строки.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Символ не зарегистрирован.
    #[error("invalid operation '{symbol}'")]
    UnknownOperation {
        /// Запрошенный символ.
        symbol: String,
    },

    /// Ошибка при вызове операции.
    #[error("'{symbol}': {source}")]
    Eval {
        /// Символ вызванной операции.
        symbol: String,
        /// Что вернула операция.
        source: EvalError,
    },
}

/// Вид ошибки без подробностей.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Неверный формат строки или операнд не число.
    InvalidInput,
    /// Неизвестный символ операции.
    UnknownOperation,
    /// Аргумент вне области определения.
    DomainError,
    /// Число операндов не подходит операции.
    InvocationMismatch,
}

impl CalcError {
    /// Возвращает позицию ошибки в исходной строке, если она известна.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Parse(pe) => pe.position(),
            Self::UnknownOperation { .. } | Self::Eval { .. } => None,
        }
    }

    /// Вид ошибки.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::InvalidInput,
            Self::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            Self::Eval {
                source: EvalError::Domain(_),
                ..
            } => ErrorKind::DomainError,
            Self::Eval {
                source: EvalError::InvocationMismatch { .. },
                ..
            } => ErrorKind::InvocationMismatch,
        }
    }
}

/// Вычислитель поверх реестра операций.
#[derive(Debug, Default)]
pub struct Calculator {
    registry: Registry,
}

impl Calculator {
    /// Создаёт вычислитель над заданным реестром.
    #[must_use]
    pub const fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Базовые операции плюс `^`, `sqrt` и `log`.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Registry::new();
        registry.register("^", BinaryOp::Pow);
        registry.register("sqrt", UnaryOp::Sqrt);
        registry.register("log", UnaryOp::Ln);
        Self::new(registry)
    }

    /// Реестр операций.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Реестр операций для регистрации новых.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Вычисляет `num1 op num2` или `op num1`, если `num2` отсутствует.
    ///
    /// Число операндов определяется только наличием `num2`; объявленная
    /// арность операции не проверяется заранее.
    ///
    /// Сам метод ничего не печатает: диагностическую строку `Error: ...`
    /// пишет [`Session`], получив ошибку. Библиотечный вызывающий код
    /// получает ту же ошибку и сам решает, как её показать.
    ///
    /// # Ошибки
    ///
    /// - [`CalcError::UnknownOperation`], если символ не зарегистрирован.
    /// - [`CalcError::Eval`], если операция отказала.
    pub fn calculate(&self, num1: f64, op: &str, num2: Option<f64>) -> Result<f64, CalcError> {
        let operands = match num2 {
            Some(num2) => Operands::Two(num1, num2),
            None => Operands::One(num1),
        };
        self.apply(&Expression {
            symbol: op.to_owned(),
            operands,
        })
    }

    /// Вычисляет разобранное выражение.
    ///
    /// # Ошибки
    ///
    /// То же, что у [`Calculator::calculate`].
    pub fn apply(&self, expr: &Expression) -> Result<f64, CalcError> {
        let operation =
            self.registry
                .lookup(&expr.symbol)
                .ok_or_else(|| CalcError::UnknownOperation {
                    symbol: expr.symbol.clone(),
                })?;

        operation
            .invoke(expr.operands)
            .map_err(|source| CalcError::Eval {
                symbol: expr.symbol.clone(),
                source,
            })
    }

    /// Разбирает и вычисляет одну строку.
    ///
    /// Команда `exit` здесь не имеет смысла и считается неверным вводом.
    ///
    /// # Ошибки
    ///
    /// Возвращает [`CalcError`] при ошибках разбора или вычисления.
    ///
    /// # Примеры
    ///
    /// ```
    /// use registry_calc::{Calculator, ErrorKind};
    ///
    /// let calc = Calculator::standard();
    /// assert_eq!(calc.evaluate("2 ^ 10").unwrap(), 1024.0);
    /// assert_eq!(calc.evaluate("log -1").unwrap_err().kind(), ErrorKind::DomainError);
    /// assert_eq!(calc.evaluate("1 % 2").unwrap_err().kind(), ErrorKind::UnknownOperation);
    /// ```
    pub fn evaluate(&self, input: &str) -> Result<f64, CalcError> {
        match parser::parse(input)? {
            Command::Evaluate(expr) => self.apply(&expr),
            Command::Exit => Err(ParseError::InvalidFormat { tokens: 1 }.into()),
        }
    }
}

/// Форматирует результат: целые значения с `.0`, `inf`, `-inf`, `nan`.
///
/// Вне диапазона `1e-4 <= |x| < 1e16` используется экспоненциальная запись
/// со знаком порядка и минимум двумя его цифрами.
///
/// ```
/// use registry_calc::format_number;
///
/// assert_eq!(format_number(7.0), "7.0");
/// assert_eq!(format_number(0.5), "0.5");
/// assert_eq!(format_number(f64::INFINITY), "inf");
/// assert_eq!(format_number(f64::NAN), "nan");
/// assert_eq!(format_number(1e16), "1e+16");
/// assert_eq!(format_number(1e-5), "1e-05");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }

    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

/// Состояние цикла.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Ожидает следующую строку.
    Running,
    /// Завершён командой `exit` или концом ввода.
    Terminated,
}

/// Сеанс работы: вычислитель, приёмник вывода и состояние цикла.
pub struct Session<'c, W: Write> {
    calc: &'c Calculator,
    out: W,
    state: State,
}

impl<'c, W: Write> Session<'c, W> {
    /// Создаёт сеанс в состоянии [`State::Running`].
    pub const fn new(calc: &'c Calculator, out: W) -> Self {
        Self {
            calc,
            out,
            state: State::Running,
        }
    }

    /// Текущее состояние.
    pub const fn state(&self) -> State {
        self.state
    }

    /// Возвращает приёмник вывода.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Печатает приветствие и список доступных операций.
    ///
    /// # Ошибки
    ///
    /// Возвращает [`io::Error`] при ошибке записи.
    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "🔹 Welcome to the Calculator 🔹")?;
        writeln!(
            self.out,
            "Available operations: {}",
            self.calc.registry().symbols().join(", ")
        )?;
        writeln!(self.out, "Type 'exit' anytime to quit.")?;
        writeln!(self.out)
    }

    /// Обрабатывает одну строку и возвращает новое состояние.
    ///
    /// Ошибки разбора и вычисления печатаются как предупреждения и не
    /// прерывают сеанс.
    ///
    /// # Ошибки
    ///
    /// Возвращает [`io::Error`] только при ошибке записи.
    pub fn handle_line(&mut self, line: &str) -> io::Result<State> {
        if self.state == State::Terminated {
            return Ok(self.state);
        }

        match parser::parse(line) {
            Ok(Command::Exit) => self.finish()?,
            Ok(Command::Evaluate(expr)) => match self.calc.apply(&expr) {
                Ok(result) => writeln!(self.out, "Result: {}", format_number(result))?,
                Err(e) => {
                    // Диагностика в точке обнаружения, затем предупреждение
                    writeln!(self.out, "Error: {e}")?;
                    self.warn(line, &e)?;
                }
            },
            Err(ParseError::InvalidFormat { .. }) => {
                writeln!(self.out, "❌ Invalid input format. Try again.")?;
            }
            Err(e) => self.warn(line, &CalcError::from(e))?,
        }

        Ok(self.state)
    }

    /// Завершает сеанс с прощанием.
    ///
    /// # Ошибки
    ///
    /// Возвращает [`io::Error`] при ошибке записи.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.state == State::Running {
            self.state = State::Terminated;
            writeln!(self.out, "👋 Exiting calculator. Goodbye!")?;
        }
        Ok(())
    }

    /// Читает строки до `exit` или конца ввода.
    ///
    /// Ошибка чтения считается концом ввода.
    ///
    /// # Ошибки
    ///
    /// Возвращает [`io::Error`] при ошибке записи.
    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        self.prompt()?;

        for line in input.lines() {
            let Ok(line) = line else { break };

            if self.handle_line(&line)? == State::Terminated {
                return Ok(());
            }

            self.prompt()?;
        }

        writeln!(self.out)?;
        self.finish()
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }

    /// Выводит предупреждение с указанием позиции в исходной строке.
    fn warn(&mut self, input: &str, error: &CalcError) -> io::Result<()> {
        if let Some(pos) = error.position() {
            // Показываем исходную строку и указатель на ошибку
            // Позиция в байтах, а столбец считается в символах
            let column = input.get(..pos).map_or(pos, |head| head.chars().count());
            writeln!(self.out, "  {input}")?;
            writeln!(self.out, "  {}^", " ".repeat(column))?;
        }
        writeln!(self.out, "⚠️ Error: {error}")
    }
}

/// Запускает интерактивный калькулятор над заданным вводом и выводом.
///
/// # Ошибки
///
/// Возвращает [`io::Error`] при ошибках записи.
///
/// # Примеры
///
/// ```
/// use registry_calc::{Calculator, run_with};
///
/// let mut out = Vec::new();
/// run_with(&Calculator::standard(), "5 + 2\nexit\n".as_bytes(), &mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().contains("Result: 7.0"));
/// ```
pub fn run_with(calc: &Calculator, input: impl BufRead, out: impl Write) -> io::Result<()> {
    let mut session = Session::new(calc, out);
    session.banner()?;
    session.run(input)
}

/// Запускает интерактивный калькулятор на stdin/stdout.
///
/// Для выхода введите `exit` или нажмите Ctrl+D.
///
/// # Ошибки
///
/// Возвращает [`io::Error`] при ошибках записи.
pub fn run() -> io::Result<()> {
    let calc = Calculator::standard();
    run_with(&calc, io::stdin().lock(), io::stdout().lock())
}
