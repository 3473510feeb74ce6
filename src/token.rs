use strum_macros::Display;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenType {
    // Single-character tokens.
    LeftParen, RightParen, Comma, Dot, Semicolon, NewLine,

    // Literals.
    Variable, String, Integer, Float,

    // Keywords.
    True, False,

    EOF
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub tokentype: TokenType,
    pub lexeme: String,
    pub line: i32,
}

impl Token {
    pub fn new(tokentype: TokenType, lexeme: &str, line: i32) -> Token {
        Token {
            tokentype,
            lexeme: lexeme.to_string(),
            line,
        }
    }
}
