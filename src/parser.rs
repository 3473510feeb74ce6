use crate::ast::{Node, Number};
use crate::interpolation::{segments, Segment};
use crate::scanner::{scan_tokens, ScanError};
use crate::token::{Token, TokenType};
use crate::Error;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("[line {line}] Parse Error: Unexpected token {tokentype} '{lexeme}'.")]
    UnexpectedToken {
        tokentype: TokenType,
        lexeme: String,
        line: i32,
    },
    #[error("[line {line}] Parse Error: Expected ',' after a function argument.")]
    MissingComma { line: i32 },
    #[error("[line {line}] Parse Error: Expected ')' after the arguments.")]
    MissingClosingParen { line: i32 },
    #[error("[line {line}] Parse Error: Expected a field name after '.', found '{lexeme}'.")]
    InvalidFieldName { lexeme: String, line: i32 },
}

static EOF_TOKEN: Token = Token {
    tokentype: TokenType::EOF,
    lexeme: String::new(),
    line: 0,
};

/// Lexes and parses `source` into a `Program` node.
pub fn create_ast(source: &str) -> Result<Node, Error> {
    let tokens = scan_tokens(source)?;
    Parser::new(&tokens).parse()
}

/// Splits text around its `${...}` spans, parsing each span as a program of its own.
pub fn string_expression(text: &str) -> Result<Node, Error> {
    let mut parts = Vec::new();
    for segment in segments(text) {
        match segment {
            Segment::Text(literal) => parts.push(Node::string(literal)),
            Segment::Expression(source) => match create_ast(source)? {
                Node::Program(body) => parts.push(*body),
                other => parts.push(other),
            },
        }
    }
    Ok(Node::StringExpression(parts))
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser { tokens, current: 0 }
    }
    /// Parses a single expression. Anything after it is ignored.
    pub fn parse(&mut self) -> Result<Node, Error> {
        let body = self.primary()?;
        Ok(Node::Program(Box::new(body)))
    }
    fn primary(&mut self) -> Result<Node, Error> {
        let token = self.current();
        match token.tokentype {
            TokenType::Integer => {
                self.advance();
                let value = token
                    .lexeme
                    .parse::<i64>()
                    .map_err(|_| Self::malformed(token))?;
                Ok(Node::number(Number::Integer(value)))
            }
            TokenType::Float => {
                self.advance();
                let value = token
                    .lexeme
                    .parse::<f64>()
                    .map_err(|_| Self::malformed(token))?;
                Ok(Node::number(Number::Float(value)))
            }
            TokenType::True | TokenType::False => {
                self.advance();
                Ok(Node::BooleanLiteral(token.clone()))
            }
            TokenType::String => {
                self.advance();
                if crate::interpolation::has_interpolation_spans(&token.lexeme) {
                    string_expression(&token.lexeme)
                } else {
                    Ok(Node::string(&token.lexeme))
                }
            }
            TokenType::Semicolon | TokenType::EOF => {
                self.advance();
                Ok(Node::string(&token.lexeme))
            }
            TokenType::Variable => self.chain(token),
            _ => Err(self.error(token).into()),
        }
    }
    // a, a.b, a(), a.b().c(1)
    fn chain(&mut self, head: &'a Token) -> Result<Node, Error> {
        let mut expr = Node::Variable(head.clone());
        loop {
            match self.peek().tokentype {
                TokenType::LeftParen => {
                    self.advance();
                    self.advance();
                    let arguments = self.arguments()?;
                    expr = Node::Call {
                        callee: Box::new(expr),
                        arguments,
                    };
                }
                TokenType::Dot => {
                    self.advance();
                    self.advance();
                    let name = self.current();
                    if name.tokentype != TokenType::Variable {
                        return Err(ParseError::InvalidFieldName {
                            lexeme: name.lexeme.clone(),
                            line: name.line,
                        }
                        .into());
                    }
                    expr = Node::Get {
                        target: Box::new(expr),
                        name: name.clone(),
                    };
                }
                _ => break,
            }
        }
        self.advance();
        Ok(expr)
    }
    // Leaves the cursor on the closing paren; `chain` steps over it.
    fn arguments(&mut self) -> Result<Vec<Node>, Error> {
        let mut arguments = Vec::new();
        loop {
            let token = self.current();
            match token.tokentype {
                TokenType::RightParen => break,
                TokenType::EOF => {
                    return Err(ParseError::MissingClosingParen { line: token.line }.into())
                }
                _ => {}
            }
            arguments.push(self.primary()?);
            let token = self.current();
            match token.tokentype {
                TokenType::RightParen => break,
                TokenType::Comma => self.advance(),
                TokenType::EOF => {
                    return Err(ParseError::MissingClosingParen { line: token.line }.into())
                }
                _ => return Err(ParseError::MissingComma { line: token.line }.into()),
            }
        }
        Ok(arguments)
    }
    fn current(&self) -> &'a Token {
        self.tokens
            .get(self.current)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }
    fn peek(&self) -> &'a Token {
        self.tokens.get(self.current + 1).unwrap_or(&EOF_TOKEN)
    }
    fn advance(&mut self) {
        self.current += 1;
    }
    fn error(&self, token: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            tokentype: token.tokentype,
            lexeme: token.lexeme.clone(),
            line: token.line,
        }
    }
    fn malformed(token: &Token) -> ScanError {
        ScanError::MalformedNumber {
            lexeme: token.lexeme.clone(),
            line: token.line,
        }
    }
}

#[cfg(test)]
mod parser_tests {
    use crate::ast::AstPrinter;
    use crate::parser::{create_ast, ParseError};
    use crate::scanner::ScanError;
    use crate::token::TokenType;
    use crate::Error;
    use pretty_assertions::assert_eq;

    fn print(source: &str) -> String {
        AstPrinter {}.print(&create_ast(source).unwrap())
    }

    #[test]
    fn literals() {
        assert_eq!(print("12"), "(program 12)");
        assert_eq!(print("2.5"), "(program 2.5)");
        assert_eq!(print("True"), "(program true)");
        assert_eq!(print("'abc'"), "(program \"abc\")");
    }

    #[test]
    fn empty_source_is_an_empty_string() {
        assert_eq!(print(""), "(program \"\")");
    }

    #[test]
    fn chains_are_left_associative() {
        assert_eq!(print("a"), "(program a)");
        assert_eq!(print("a.b().c"), "(program (get (call (get a b)) c))");
        assert_eq!(
            print("sum(a.b.c.d(), a.e)"),
            "(program (call sum (call (get (get (get a b) c) d)) (get a e)))"
        );
        assert_eq!(print("f(1)(2)"), "(program (call (call f 1) 2))");
    }

    #[test]
    fn nested_calls_and_trailing_comma() {
        assert_eq!(
            print("sum(mul(x, 4), y,)"),
            "(program (call sum (call mul x 4) y))"
        );
        assert_eq!(print("now()"), "(program (call now))");
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        assert_eq!(print("1 2"), "(program 1)");
    }

    #[test]
    fn interpolated_strings_become_string_expressions() {
        assert_eq!(
            print("'Hello ${name}!'"),
            "(program (str \"Hello \" name \"!\"))"
        );
        assert_eq!(
            print("concat('${a}', 'x')"),
            "(program (call concat (str \"\" a) \"x\"))"
        );
    }

    #[test]
    fn missing_comma() {
        assert_eq!(
            create_ast("f(1 2)").unwrap_err(),
            Error::Parse(ParseError::MissingComma { line: 1 })
        );
    }

    #[test]
    fn missing_closing_paren() {
        assert_eq!(
            create_ast("f(1").unwrap_err(),
            Error::Parse(ParseError::MissingClosingParen { line: 1 })
        );
        assert_eq!(
            create_ast("f(").unwrap_err(),
            Error::Parse(ParseError::MissingClosingParen { line: 1 })
        );
    }

    #[test]
    fn field_names_must_be_identifiers() {
        assert_eq!(
            create_ast("a.1").unwrap_err(),
            Error::Parse(ParseError::InvalidFieldName {
                lexeme: "1".to_string(),
                line: 1
            })
        );
    }

    #[test]
    fn unexpected_token() {
        assert_eq!(
            create_ast(")").unwrap_err(),
            Error::Parse(ParseError::UnexpectedToken {
                tokentype: TokenType::RightParen,
                lexeme: ")".to_string(),
                line: 1
            })
        );
    }

    #[test]
    fn span_errors_surface_unchanged() {
        assert_eq!(
            create_ast("'${a ~ b}'").unwrap_err(),
            Error::Scan(ScanError::UnrecognizedCharacter {
                character: '~',
                line: 1
            })
        );
    }
}
