//! Разбиение строки ввода на слова с позициями.
//!
//! Грамматика калькулятора плоская: строка состоит из двух или трёх слов,
//! разделённых пробельными символами. Токенизатор не интерпретирует слова,
//! он только запоминает, где каждое из них начинается, чтобы сообщения об
//! ошибках могли указать на проблемное место.
//!
//! # Пример
//!
//! ```
//! use registry_calc::token::Tokenizer;
//!
//! let words: Vec<&str> = Tokenizer::new("  5 +\t2").map(|t| t.text).collect();
//! assert_eq!(words, ["5", "+", "2"]);
//! ```

/// Слово исходной строки с позицией начала.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SpannedToken<'a> {
    /// Текст слова.
    pub text: &'a str,
    /// Позиция начала слова (в байтах от начала строки).
    pub pos: usize,
}

impl<'a> SpannedToken<'a> {
    /// Создаёт новый токен с позицией.
    pub const fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }
}

/// Итератор по словам входной строки.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Создаёт новый токенизатор для входной строки.
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let byte_len: usize = self
            .input
            .chars()
            .take_while(|&c| predicate(c))
            .map(char::len_utf8)
            .sum();

        let (consumed, rest) = self.input.split_at(byte_len);
        self.pos += byte_len;
        self.input = rest;
        consumed
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = SpannedToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();

        if self.input.is_empty() {
            return None;
        }

        let start_pos = self.pos;
        let text = self.advance_while(|c| !c.is_whitespace());
        Some(SpannedToken::new(text, start_pos))
    }
}
