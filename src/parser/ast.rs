// AST (Abstract Syntax Tree) definitions for SanskritLang

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical (`aur` / `&&`, `ya` / `||`)
    And,
    Or,
}

impl BinOp {
    /// Operator spelling in the generated JavaScript and in error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // nahi x, !x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

/// A braced statement list: `{ ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

/// `karya name(params) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub location: SourceLocation,
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `likh expr`
    Print {
        value: Expression,
        location: SourceLocation,
    },
    /// `sthapan name = expr`
    VariableDeclaration {
        name: String,
        value: Expression,
        location: SourceLocation,
    },
    /// `name = expr`
    Assignment {
        name: String,
        value: Expression,
        location: SourceLocation,
    },
    /// `yadi (cond) { .. } anyatha { .. }`
    If {
        condition: Expression,
        then_branch: Block,
        else_branch: Option<Block>,
        location: SourceLocation,
    },
    /// `yavat (cond) { .. }`
    While {
        condition: Expression,
        body: Block,
        location: SourceLocation,
    },
    FunctionDeclaration(FunctionDecl),
    /// `wapas [expr]`
    Return {
        value: Option<Expression>,
        location: SourceLocation,
    },
    /// Bare expression evaluated for its side effects
    Expression {
        expr: Expression,
        location: SourceLocation,
    },
}

impl Statement {
    /// Get the source location of this statement
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Print { location, .. }
            | Statement::VariableDeclaration { location, .. }
            | Statement::Assignment { location, .. }
            | Statement::If { location, .. }
            | Statement::While { location, .. }
            | Statement::Return { location, .. }
            | Statement::Expression { location, .. } => *location,
            Statement::FunctionDeclaration(decl) => decl.location,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64, SourceLocation),
    Str(String, SourceLocation),
    Identifier(String, SourceLocation),
    Binary {
        op: BinOp,
        left: Box<Expression>,
        right: Box<Expression>,
        location: SourceLocation,
    },
    Unary {
        op: UnOp,
        operand: Box<Expression>,
        location: SourceLocation,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
        location: SourceLocation,
    },
}

impl Expression {
    /// Get the source location of this expression
    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::Number(_, loc)
            | Expression::Str(_, loc)
            | Expression::Identifier(_, loc) => *loc,
            Expression::Binary { location, .. }
            | Expression::Unary { location, .. }
            | Expression::Call { location, .. } => *location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
