//! JavaScript export
//!
//! [`generate`] turns a parsed [`Program`] into equivalent JavaScript text.
//! Execution never goes through this output; it exists so a program can be
//! inspected or run elsewhere.
//!
//! Every binary expression is fully parenthesized, so the emitted text keeps
//! the parse tree's grouping regardless of JavaScript's own precedence.
//! The walk is pure: the same AST always yields byte-identical text.

use crate::interpreter::value::format_number;
use crate::parser::ast::*;

/// Generate JavaScript for a whole program
pub fn generate(program: &Program) -> String {
    program
        .body
        .iter()
        .map(generate_statement)
        .collect::<Vec<_>>()
        .join("\n")
}

fn generate_block(block: &Block) -> String {
    let statements: Vec<String> = block.statements.iter().map(generate_statement).collect();
    format!("{{\n{}\n}}", statements.join("\n"))
}

fn generate_statement(stmt: &Statement) -> String {
    match stmt {
        Statement::Print { value, .. } => format!("console.log({});", generate_expression(value)),

        Statement::VariableDeclaration { name, value, .. } => {
            format!("let {} = {};", name, generate_expression(value))
        }

        Statement::Assignment { name, value, .. } => {
            format!("{} = {};", name, generate_expression(value))
        }

        Statement::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            let mut out = format!(
                "if ({}) {}",
                generate_expression(condition),
                generate_block(then_branch)
            );
            if let Some(else_block) = else_branch {
                out.push_str(" else ");
                out.push_str(&generate_block(else_block));
            }
            out
        }

        Statement::While {
            condition, body, ..
        } => format!(
            "while ({}) {}",
            generate_expression(condition),
            generate_block(body)
        ),

        Statement::FunctionDeclaration(decl) => format!(
            "function {}({}) {}",
            decl.name,
            decl.params.join(", "),
            generate_block(&decl.body)
        ),

        Statement::Return { value, .. } => match value {
            Some(expr) => format!("return {};", generate_expression(expr)),
            None => "return;".to_string(),
        },

        Statement::Expression { expr, .. } => format!("{};", generate_expression(expr)),
    }
}

fn generate_expression(expr: &Expression) -> String {
    match expr {
        Expression::Number(n, _) => format_number(*n),

        Expression::Str(s, _) => quote_string(s),

        Expression::Identifier(name, _) => name.clone(),

        Expression::Binary {
            op, left, right, ..
        } => format!(
            "({} {} {})",
            generate_expression(left),
            op.symbol(),
            generate_expression(right)
        ),

        Expression::Unary { op, operand, .. } => {
            let operand = generate_expression(operand);
            // `- -x` must not collapse into the decrement operator
            if *op == UnOp::Neg && operand.starts_with('-') {
                format!("{} {}", op.symbol(), operand)
            } else {
                format!("{}{}", op.symbol(), operand)
            }
        }

        Expression::Call {
            callee, arguments, ..
        } => {
            let args: Vec<String> = arguments.iter().map(generate_expression).collect();
            format!("{}({})", generate_expression(callee), args.join(", "))
        }
    }
}

/// Double-quoted JavaScript string literal
fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, tokenize};

    fn js(source: &str) -> String {
        generate(&parse(tokenize(source).unwrap()).unwrap())
    }

    #[test]
    fn test_simple_statements() {
        assert_eq!(js("likh \"Namaste\""), "console.log(\"Namaste\");");
        assert_eq!(js("sthapan x = 10\nx = x + 1"), "let x = 10;\nx = (x + 1);");
        assert_eq!(js("f(1, 2)"), "f(1, 2);");
        assert_eq!(js(""), "");
    }

    #[test]
    fn test_logical_operators_substituted() {
        assert_eq!(
            js("likh a aur nahi b ya c"),
            "console.log(((a && !b) || c));"
        );
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(
            js("yadi (x > 1) { likh 1 } anyatha { likh 2 }"),
            "if ((x > 1)) {\nconsole.log(1);\n} else {\nconsole.log(2);\n}"
        );
        assert_eq!(
            js("yavat (i < 3) { i = i + 1 }"),
            "while ((i < 3)) {\ni = (i + 1);\n}"
        );
    }

    #[test]
    fn test_functions() {
        assert_eq!(
            js("karya add(a, b) { wapas a + b }"),
            "function add(a, b) {\nreturn (a + b);\n}"
        );
        assert_eq!(js("karya f() { wapas }"), "function f() {\nreturn;\n}");
    }

    #[test]
    fn test_double_negation_keeps_space() {
        assert_eq!(js("likh - -x"), "console.log(- -x);");
        assert_eq!(js("likh -(-x)"), "console.log(- -x);");
        assert_eq!(js("likh -x"), "console.log(-x);");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(
            js(r#"likh 'say "hi"\n\\'"#),
            r#"console.log("say \"hi\"\n\\");"#
        );
    }

    #[test]
    fn test_generation_is_idempotent() {
        let program = parse(tokenize("karya f(n) { yadi (n) { wapas n } }\nlikh f(3)").unwrap()).unwrap();
        assert_eq!(generate(&program), generate(&program));
    }
}
