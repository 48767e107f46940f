// Integration tests for the SanskritLang execution pipeline

use sanskritlang::console::{OutputKind, OutputLine};
use sanskritlang::execute::SUCCESS_MESSAGE;
use sanskritlang::parser::{parse, tokenize};
use sanskritlang::{codegen, execute, execute_with_limits, transpile, ExecutionLimits};
use std::time::Duration;

/// Texts of the output lines of a run that must succeed
fn run_ok(source: &str) -> Vec<String> {
    let lines = execute(source);
    let (last, outputs) = lines.split_last().expect("a run always yields a line");
    assert_eq!(
        *last,
        OutputLine::success(SUCCESS_MESSAGE),
        "run failed: {:?}",
        lines
    );
    assert!(outputs.iter().all(|l| l.kind == OutputKind::Output));
    outputs.iter().map(|l| l.text.clone()).collect()
}

#[test]
fn test_empty_source() {
    let program = parse(tokenize("").unwrap()).unwrap();
    assert!(program.body.is_empty());
    assert_eq!(codegen::generate(&program), "");

    assert_eq!(execute(""), vec![OutputLine::success(SUCCESS_MESSAGE)]);
}

#[test]
fn test_hello_world() {
    assert_eq!(
        execute("likh \"Namaste Jagat\""),
        vec![
            OutputLine::output("Namaste Jagat"),
            OutputLine::success(SUCCESS_MESSAGE)
        ]
    );
}

#[test]
fn test_numeric_addition_of_variables() {
    assert_eq!(run_ok("sthapan x = 10\nsthapan y = 20\nlikh x + y"), vec!["30"]);
}

#[test]
fn test_if_else() {
    let source = r#"
sthapan age = 25
yadi (age >= 18) { likh "Adult" } anyatha { likh "Minor" }
"#;
    assert_eq!(run_ok(source), vec!["Adult"]);

    let source = "sthapan age = 12\nyadi (age >= 18) { likh \"Adult\" } anyatha { likh \"Minor\" }";
    assert_eq!(run_ok(source), vec!["Minor"]);
}

#[test]
fn test_while_loop() {
    let source = "sthapan i = 1\nyavat (i <= 3) { likh i; i = i + 1 }";
    assert_eq!(run_ok(source), vec!["1", "2", "3"]);
}

#[test]
fn test_recursive_factorial() {
    let source = r#"
karya factorial(n) {
    yadi (n <= 1) { wapas 1 }
    wapas n * factorial(n - 1)
}
likh factorial(5)
"#;
    assert_eq!(run_ok(source), vec!["120"]);
}

#[test]
fn test_recursive_fibonacci() {
    let source = r#"
karya fib(n) {
    yadi (n < 2) { wapas n }
    wapas fib(n - 1) + fib(n - 2)
}
likh fib(15)
"#;
    assert_eq!(run_ok(source), vec!["610"]);
}

#[test]
fn test_invalid_assignment_target() {
    assert_eq!(
        execute("5 = 3"),
        vec![OutputLine::error(
            "त्रुटि (Error): Invalid assignment target at line 1, column 1"
        )]
    );
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        execute("likh \"oops"),
        vec![OutputLine::error(
            "त्रुटि (Error): Unterminated string at line 1, column 6"
        )]
    );
}

#[test]
fn test_unexpected_character() {
    assert_eq!(
        execute("likh 1\nlikh @"),
        vec![OutputLine::error(
            "अप्रत्याशित चिह्न (Unexpected Token): Unexpected character '@' at line 2, column 6"
        )]
    );
}

#[test]
fn test_syntax_error_runs_nothing() {
    let lines = execute("likh \"first\"\nsthapan = 1");
    assert_eq!(
        lines,
        vec![OutputLine::error(
            "वाक्यविन्यास त्रुटि (Syntax Error): Expected variable name, found '=' at line 2, column 9"
        )]
    );
}

#[test]
fn test_runtime_error_keeps_partial_output() {
    let lines = execute("likh \"before\"\nlikh missing\nlikh \"after\"");
    assert_eq!(
        lines,
        vec![
            OutputLine::output("before"),
            OutputLine::error("त्रुटि (Runtime Error): missing is not defined"),
        ]
    );
}

#[test]
fn test_execution_is_deterministic() {
    let source = "sthapan i = 0\nyavat (i < 5) { likh i * 1.5; i = i + 1 }\nlikh nope";
    assert_eq!(execute(source), execute(source));
}

#[test]
fn test_infinite_loop_hits_step_budget() {
    let lines = execute("yavat (1) { }");
    assert_eq!(
        lines,
        vec![OutputLine::error(
            "त्रुटि (Runtime Error): step limit of 1000000 exceeded (possible infinite loop)"
        )]
    );
}

#[test]
fn test_custom_step_budget_keeps_output() {
    let limits = ExecutionLimits {
        max_steps: 100,
        ..ExecutionLimits::default()
    };
    let lines = execute_with_limits("sthapan i = 0\nyavat (1) { likh i; i = i + 1 }", &limits);

    let (last, outputs) = lines.split_last().unwrap();
    assert_eq!(
        last.text,
        "त्रुटि (Runtime Error): step limit of 100 exceeded (possible infinite loop)"
    );
    assert!(!outputs.is_empty());
    assert_eq!(outputs[0], OutputLine::output("0"));
}

#[test]
fn test_call_depth_budget() {
    let limits = ExecutionLimits {
        max_call_depth: 50,
        ..ExecutionLimits::default()
    };
    let lines = execute_with_limits("karya down(n) { wapas down(n + 1) }\ndown(0)", &limits);
    assert_eq!(
        lines,
        vec![OutputLine::error(
            "त्रुटि (Runtime Error): maximum call depth of 50 exceeded"
        )]
    );
}

#[test]
fn test_time_budget() {
    let limits = ExecutionLimits {
        max_steps: u64::MAX,
        time_limit: Some(Duration::ZERO),
        ..ExecutionLimits::default()
    };
    let lines = execute_with_limits("yavat (1) { }", &limits);
    assert_eq!(
        lines,
        vec![OutputLine::error(
            "त्रुटि (Runtime Error): time limit of 0 ms exceeded"
        )]
    );
}

#[test]
fn test_recursion_up_to_default_call_depth() {
    let source = "karya f(n) { yadi (n <= 0) { wapas 0 } wapas 1 + f(n - 1) }\nlikh f(250)";
    assert_eq!(run_ok(source), vec!["250"]);

    let source = "karya f(n) { yadi (n <= 0) { wapas 0 } wapas 1 + f(n - 1) }\nlikh f(300)";
    assert_eq!(
        execute(source),
        vec![OutputLine::error(
            "त्रुटि (Runtime Error): maximum call depth of 256 exceeded"
        )]
    );
}

#[test]
fn test_deep_nesting_is_a_compile_error() {
    let parens = format!("likh {}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(
        execute(&parens),
        vec![OutputLine::error(
            "त्रुटि (Error): Expression nested too deeply at line 1, column 134"
        )]
    );
    assert!(transpile(&parens).is_err());

    let negations = format!("likh {}1", "nahi ".repeat(10_000));
    let sum = format!("likh 1{}", " + 1".repeat(10_000));
    let calls = format!("karya f() {{ wapas f }}\nf{}", "()".repeat(10_000));
    let blocks = format!("{}likh 1", "yadi (1) { ".repeat(10_000));
    for source in [negations, sum, calls, blocks] {
        let lines = execute(&source);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, OutputKind::Error);
        assert!(lines[0].text.contains("nested too deeply"), "{}", lines[0].text);
    }
}

#[test]
fn test_moderate_nesting_still_runs() {
    let source = format!("likh {}2{} * 3", "(".repeat(100), ")".repeat(100));
    assert_eq!(run_ok(&source), vec!["6"]);

    let source = format!("likh 0{}", " + 1".repeat(100));
    assert_eq!(run_ok(&source), vec!["100"]);
}

#[test]
fn test_transpile_factorial() {
    let source = "karya factorial(n) {\n  yadi (n <= 1) {\n    wapas 1\n  }\n  wapas n * factorial(n - 1)\n}\nlikh factorial(5)";
    let expected = "function factorial(n) {\nif ((n <= 1)) {\nreturn 1;\n}\nreturn (n * factorial((n - 1)));\n}\nconsole.log(factorial(5));";
    assert_eq!(transpile(source).unwrap(), expected);
}

#[test]
fn test_codegen_idempotent() {
    let source = "sthapan x = 'a\"b'\nyadi (nahi x ya x == 1) { likh -x } anyatha { x = 2 }";
    let program = parse(tokenize(source).unwrap()).unwrap();
    let first = codegen::generate(&program);
    let second = codegen::generate(&program);
    assert_eq!(first, second);
    assert_eq!(transpile(source).unwrap(), first);
}

#[test]
fn test_transpile_reports_compile_errors() {
    let err = transpile("likh (1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected ')' after expression, found end of file at line 1, column 8"
    );
}
