//! Интеграционные тесты калькулятора.
//!
//! Прогоняют цикл `run_with` на заранее заданных строках ввода и
//! проверяют то, что попало в приёмник вывода.

use registry_calc::{Calculator, Operation, PROMPT, run_with};

fn run_lines(calc: &Calculator, input: &str) -> String {
    let mut out = Vec::new();
    run_with(calc, input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn run_standard(input: &str) -> String {
    run_lines(&Calculator::standard(), input)
}

/// Вывод без баннера и приглашений: только строки-ответы.
fn replies(output: &str) -> Vec<String> {
    output
        .lines()
        .skip_while(|l| !l.is_empty())
        .skip(1)
        .map(|l| l.replace(PROMPT, ""))
        .filter(|l| !l.is_empty())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Сценарии из жизни
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn addition_scenario() {
    assert_eq!(replies(&run_standard("5 + 2\nexit\n"))[0], "Result: 7.0");
}

#[test]
fn sqrt_scenario() {
    assert_eq!(replies(&run_standard("sqrt 9\nexit\n"))[0], "Result: 3.0");
}

#[test]
fn division_by_zero_scenario() {
    assert_eq!(replies(&run_standard("10 / 0\nexit\n"))[0], "Result: inf");
}

#[test]
fn log_domain_error_scenario() {
    let out = replies(&run_standard("log -1\n5 * 2\nexit\n"));
    assert!(out[0].starts_with("Error: 'log'"), "{out:?}");
    assert!(out[1].starts_with("⚠️ Error: 'log'"), "{out:?}");
    // Цикл продолжает работу
    assert_eq!(out[2], "Result: 10.0");
}

#[test]
fn invalid_format_scenario() {
    let out = replies(&run_standard("foo bar baz qux\n1 - 3\nexit\n"));
    assert_eq!(out[0], "❌ Invalid input format. Try again.");
    assert_eq!(out[1], "Result: -2.0");
}

#[test]
fn exit_scenario() {
    let out = replies(&run_standard("exit\n5 + 2\n"));
    assert_eq!(out, ["👋 Exiting calculator. Goodbye!"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Завершение
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn exit_is_case_insensitive_and_trimmed() {
    for exit in ["EXIT", "  Exit  ", "eXiT\t"] {
        let out = replies(&run_standard(&format!("{exit}\n7 * 6\n")));
        assert_eq!(out, ["👋 Exiting calculator. Goodbye!"], "ввод: {exit:?}");
    }
}

#[test]
fn end_of_input_behaves_like_exit() {
    let out = replies(&run_standard("2 ^ 3\n"));
    assert_eq!(out, ["Result: 8.0", "👋 Exiting calculator. Goodbye!"]);
}

#[test]
fn empty_input_terminates() {
    let out = run_standard("");
    assert!(out.ends_with("👋 Exiting calculator. Goodbye!\n"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Восстановление после ошибок
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_failure_kind_is_recovered() {
    let input = "\
        abc + 1\n\
        1 % 2\n\
        sqrt -4\n\
        - 5\n\
        \n\
        3 + 4\n\
        exit\n";
    let out = replies(&run_standard(input));

    // Каждая строка ввода оставляет свой след, ни одна не пропущена
    let expected = [
        "  abc + 1",
        "  ^",
        "⚠️ Error: first operand 'abc' is not a number",
        "Error: invalid operation '%'",
        "⚠️ Error: invalid operation '%'",
        "Error: 'sqrt': cannot compute square root of a negative number",
        "⚠️ Error: 'sqrt': cannot compute square root of a negative number",
        "Error: '-': expects 2 operand(s), got 1",
        "⚠️ Error: '-': expects 2 operand(s), got 1",
        "❌ Invalid input format. Try again.",
        "Result: 7.0",
        "👋 Exiting calculator. Goodbye!",
    ];
    assert_eq!(out.len(), expected.len(), "{out:#?}");
    for (line, prefix) in out.iter().zip(expected) {
        assert!(line.starts_with(prefix), "'{line}' не начинается с '{prefix}'");
    }
}

#[test]
fn non_numeric_operand_shows_caret() {
    let out = replies(&run_standard("12 * x1\nexit\n"));
    assert_eq!(out[0], "  12 * x1");
    assert_eq!(out[1], "       ^");
    assert!(out[2].starts_with("⚠️ Error: second operand 'x1'"));
}

#[test]
fn unknown_operation_is_reported() {
    let out = replies(&run_standard("1 % 2\nexit\n"));
    assert_eq!(out[0], "Error: invalid operation '%'");
    assert_eq!(out[1], "⚠️ Error: invalid operation '%'");
}

#[test]
fn wrong_operand_count_is_reported() {
    let out = replies(&run_standard("- 5\nexit\n"));
    assert_eq!(out[0], "Error: '-': expects 2 operand(s), got 1");
}

#[test]
fn blank_line_is_invalid_format() {
    let out = replies(&run_standard("   \nexit\n"));
    assert_eq!(out[0], "❌ Invalid input format. Try again.");
}

// ─────────────────────────────────────────────────────────────────────────────
// Реестр
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn banner_lists_registered_operations() {
    let out = run_standard("exit\n");
    assert!(out.contains("Available operations: *, +, -, /, ^, log, sqrt"));
}

#[test]
fn custom_operation_through_the_loop() {
    let mut calc = Calculator::standard();
    calc.registry_mut()
        .register("max", Operation::binary(|x, y| Ok(x.max(y))));

    let out = run_lines(&calc, "3 max 9\nexit\n");
    assert!(out.contains("Available operations: *, +, -, /, ^, log, max, sqrt"));
    assert_eq!(replies(&out)[0], "Result: 9.0");
}

#[test]
fn overridden_division_through_the_loop() {
    let mut calc = Calculator::standard();
    calc.registry_mut().register(
        "/",
        Operation::binary(|x, y| {
            if y == 0.0 {
                Err(registry_calc::expression::EvalError::domain("division by zero"))
            } else {
                Ok(x / y)
            }
        }),
    );

    let out = replies(&run_lines(&calc, "1 / 0\nexit\n"));
    assert_eq!(out[0], "Error: '/': division by zero");
}

// ─────────────────────────────────────────────────────────────────────────────
// Числа
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn float_formatting() {
    let out = replies(&run_standard("7 / 2\n-1 * 0.25\n1e3 + 0\n0 - inf\nexit\n"));
    assert_eq!(
        &out[..4],
        ["Result: 3.5", "Result: -0.25", "Result: 1000.0", "Result: -inf"]
    );
}

#[test]
fn exponent_formatting() {
    let out = replies(&run_standard("1e8 * 1e8\n1 / 100000\n1.5e10 * 1e10\nexit\n"));
    assert_eq!(
        &out[..3],
        ["Result: 1e+16", "Result: 1e-05", "Result: 1.5e+20"]
    );
}

#[test]
fn digit_separators_in_operands() {
    assert_eq!(replies(&run_standard("1_000 * 2\nexit\n"))[0], "Result: 2000.0");
}

#[test]
fn caret_under_token_after_non_ascii() {
    let out = replies(&run_standard("√ x\nexit\n"));
    assert_eq!(out[0], "  √ x");
    assert_eq!(out[1], "    ^");
}

#[test]
fn pow_and_log() {
    let calc = Calculator::standard();
    assert_eq!(calc.evaluate("2 ^ -1").unwrap(), 0.5);
    assert!((calc.evaluate("log 10").unwrap() - std::f64::consts::LN_10).abs() < 1e-12);
}
