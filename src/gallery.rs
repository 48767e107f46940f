// Built-in example programs shown by the IDE and the `examples` command

/// A sample program with display metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleProgram {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub code: &'static str,
}

/// Look up an example by its id
pub fn find(id: &str) -> Option<&'static ExampleProgram> {
    EXAMPLES.iter().find(|example| example.id == id)
}

pub const EXAMPLES: &[ExampleProgram] = &[
    ExampleProgram {
        id: "hello-world",
        title: "Hello World",
        description: "Your first SanskritLang program",
        code: r#"likh "Namaste Jagat""#,
    },
    ExampleProgram {
        id: "variables",
        title: "Variables & Arithmetic",
        description: "Working with variables and math",
        code: r#"// Variable declaration and arithmetic
sthapan x = 10
sthapan y = 20
sthapan sum = x + y

likh "x = "
likh x
likh "y = "
likh y
likh "Sum = "
likh sum"#,
    },
    ExampleProgram {
        id: "conditionals",
        title: "If-Else Statements",
        description: "Conditional logic with yadi and anyatha",
        code: r#"sthapan age = 25

yadi (age >= 18) {
  likh "You are an adult"
}
anyatha {
  likh "You are a minor"
}"#,
    },
    ExampleProgram {
        id: "loops",
        title: "While Loops",
        description: "Iterate with yavat (while)",
        code: r#"sthapan i = 1

likh "Counting to 5:"
yavat (i <= 5) {
  likh i
  i = i + 1
}"#,
    },
    ExampleProgram {
        id: "functions",
        title: "Functions",
        description: "Define and call functions with karya",
        code: r#"karya greet(name) {
  likh "Namaste, "
  likh name
}

karya add(a, b) {
  wapas a + b
}

greet("Sanskrit Coder")
sthapan result = add(10, 20)
likh "Result: "
likh result"#,
    },
    ExampleProgram {
        id: "fibonacci",
        title: "Fibonacci Sequence",
        description: "Generate Fibonacci numbers",
        code: r#"sthapan a = 0
sthapan b = 1
sthapan count = 0

likh "Fibonacci sequence:"
likh a
likh b

yavat (count < 8) {
  sthapan next = a + b
  likh next
  a = b
  b = next
  count = count + 1
}"#,
    },
    ExampleProgram {
        id: "factorial",
        title: "Factorial Calculator",
        description: "Calculate factorial using recursion",
        code: r#"karya factorial(n) {
  yadi (n <= 1) {
    wapas 1
  }
  wapas n * factorial(n - 1)
}

sthapan num = 5
sthapan result = factorial(num)
likh "Factorial of 5 = "
likh result"#,
    },
    ExampleProgram {
        id: "comparison",
        title: "Comparison Operators",
        description: "Using comparison and logical operators",
        code: r#"sthapan x = 15
sthapan y = 20

yadi (x < y) {
  likh "x is less than y"
}

yadi (x == 15 aur y == 20) {
  likh "Both conditions are true"
}

yadi (x > 100 ya y > 10) {
  likh "At least one condition is true"
}"#,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        for (i, example) in EXAMPLES.iter().enumerate() {
            assert!(
                EXAMPLES[i + 1..].iter().all(|other| other.id != example.id),
                "duplicate id {}",
                example.id
            );
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("factorial").map(|e| e.title), Some("Factorial Calculator"));
        assert!(find("missing").is_none());
    }
}
