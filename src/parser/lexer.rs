//! Lexer (tokenizer) for SanskritLang source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Newlines are emitted as [`TokenKind::Newline`] tokens; the parser filters
//! them out because statements are separated by optional `;` and braces only.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Likh,    // print
    Sthapan, // declare
    Yadi,    // if
    Anyatha, // else
    Yavat,   // while
    Karya,   // function
    Wapas,   // return

    // Literals
    Number,
    Str,
    Identifier,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %
    Assign,  // =

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Gt,    // >
    Lt,    // <
    Ge,    // >=
    Le,    // <=

    // Logical
    And, // aur, &&
    Or,  // ya, ||
    Not, // nahi, !

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Semicolon, // ;

    Newline,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Likh => "'likh'",
            TokenKind::Sthapan => "'sthapan'",
            TokenKind::Yadi => "'yadi'",
            TokenKind::Anyatha => "'anyatha'",
            TokenKind::Yavat => "'yavat'",
            TokenKind::Karya => "'karya'",
            TokenKind::Wapas => "'wapas'",
            TokenKind::Number => "number",
            TokenKind::Str => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Assign => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Gt => "'>'",
            TokenKind::Lt => "'<'",
            TokenKind::Ge => "'>='",
            TokenKind::Le => "'<='",
            TokenKind::And => "'aur'",
            TokenKind::Or => "'ya'",
            TokenKind::Not => "'nahi'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
        };
        f.write_str(name)
    }
}

/// A classified lexical unit with its source position.
///
/// For string tokens `text` holds the unescaped contents; for every other
/// kind it is the lexeme exactly as written.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// Numeric value of a number token.
    ///
    /// Takes the longest prefix of the lexeme that reads as a decimal float,
    /// so `1.2.3` is `1.2` and `7.` is `7`.
    pub fn number_value(&self) -> f64 {
        let mut end = 0;
        let mut seen_dot = false;
        for (i, ch) in self.text.char_indices() {
            if ch.is_ascii_digit() {
                end = i + 1;
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
            } else {
                break;
            }
        }
        self.text[..end].parse::<f64>().unwrap_or(0.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number => write!(f, "number {}", self.text),
            TokenKind::Str => write!(f, "string \"{}\"", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::And | TokenKind::Or | TokenKind::Not => write!(f, "'{}'", self.text),
            kind => write!(f, "{}", kind),
        }
    }
}

/// What went wrong while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedCharacter(ch) => write!(f, "Unexpected character '{}'", ch),
            LexErrorKind::UnterminatedString => write!(f, "Unterminated string"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at line {}, column {}", .location.line, .location.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

/// Tokenize `source` in one pass.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Lexer for SanskritLang source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eof, "", loc)),
        };

        let single =
            move |kind: TokenKind| -> Result<Token, LexError> { Ok(Token::new(kind, ch.to_string(), loc)) };

        match ch {
            '\n' => single(TokenKind::Newline),

            // String literals
            '"' | '\'' => self.string_literal(ch, loc),

            // Numeric literals
            '0'..='9' => Ok(self.number_literal(ch, loc)),

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            // Operators that may be two characters long
            '=' => Ok(self.one_or_two(loc, '=', TokenKind::Assign, TokenKind::EqEq)),
            '!' => Ok(self.one_or_two(loc, '!', TokenKind::Not, TokenKind::NotEq)),
            '>' => Ok(self.one_or_two(loc, '>', TokenKind::Gt, TokenKind::Ge)),
            '<' => Ok(self.one_or_two(loc, '<', TokenKind::Lt, TokenKind::Le)),
            '&' if self.peek() == Some('&') => {
                self.advance();
                Ok(Token::new(TokenKind::And, "&&", loc))
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                Ok(Token::new(TokenKind::Or, "||", loc))
            }

            '+' => single(TokenKind::Plus),
            '-' => single(TokenKind::Minus),
            '*' => single(TokenKind::Star),
            '/' => single(TokenKind::Slash),
            '%' => single(TokenKind::Percent),
            '(' => single(TokenKind::LParen),
            ')' => single(TokenKind::RParen),
            '{' => single(TokenKind::LBrace),
            '}' => single(TokenKind::RBrace),
            ',' => single(TokenKind::Comma),
            ';' => single(TokenKind::Semicolon),

            _ => Err(LexError {
                kind: LexErrorKind::UnexpectedCharacter(ch),
                location: loc,
            }),
        }
    }

    /// `first` alone, or `first=` when followed by `=`
    fn one_or_two(
        &mut self,
        loc: SourceLocation,
        first: char,
        single: TokenKind,
        with_eq: TokenKind,
    ) -> Token {
        if self.peek() == Some('=') {
            self.advance();
            Token::new(with_eq, format!("{first}="), loc)
        } else {
            Token::new(single, first.to_string(), loc)
        }
    }

    /// Parse string literal; the opening quote is already consumed
    fn string_literal(&mut self, quote: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            if ch == quote {
                return Ok(Token::new(TokenKind::Str, string, loc));
            }

            if ch == '\\' {
                let Some(escaped) = self.advance() else {
                    break;
                };
                let unescaped = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    // `\\`, the matching quote, and anything else stand for themselves
                    other => other,
                };
                string.push(unescaped);
            } else {
                string.push(ch);
            }
        }

        Err(LexError {
            kind: LexErrorKind::UnterminatedString,
            location: loc,
        })
    }

    /// Parse numeric literal: a run of digits and decimal points
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, num_str, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match ident.as_str() {
            "likh" => TokenKind::Likh,
            "sthapan" => TokenKind::Sthapan,
            "yadi" => TokenKind::Yadi,
            "anyatha" => TokenKind::Anyatha,
            "yavat" => TokenKind::Yavat,
            "karya" => TokenKind::Karya,
            "wapas" => TokenKind::Wapas,
            "aur" => TokenKind::And,
            "ya" => TokenKind::Or,
            "nahi" => TokenKind::Not,
            _ => TokenKind::Identifier,
        };

        Token::new(kind, ident, loc)
    }

    /// Skip blanks and `//` comments; newlines are tokens and stay
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
