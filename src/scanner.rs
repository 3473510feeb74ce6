use crate::token::{Token, TokenType};
use phf::phf_map;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    #[error("[line {line}] Error: Unexpected character '{character}'.")]
    UnrecognizedCharacter { character: char, line: i32 },
    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: i32 },
    #[error("[line {line}] Error: Malformed number '{lexeme}'.")]
    MalformedNumber { lexeme: String, line: i32 },
}

// Note: `current` always indexes the character under the cursor, not the next one.
struct Scanner {
    source: Vec<char>,
    current: usize,
    start: usize,
    line: i32,
}

pub fn scan_tokens(source: &str) -> Result<Vec<Token>, ScanError> {
    let mut scanner = Scanner {
        source: source.chars().collect(),
        current: 0,
        start: 0,
        line: 1,
    };
    let mut tokens: Vec<Token> = Vec::new();

    while !scanner.is_at_end() {
        scanner.start = scanner.current;
        if let Some(token) = scanner.scan_token()? {
            tokens.push(token);
        }
    }
    tokens.push(Token::new(TokenType::EOF, "", scanner.line));
    tracing::trace!(count = tokens.len(), "scanned tokens");
    Ok(tokens)
}

impl Scanner {
    fn scan_token(&mut self) -> Result<Option<Token>, ScanError> {
        let c = match self.char_at(self.current) {
            Some(c) => c,
            None => return Ok(None),
        };
        match c {
            '(' => Ok(Some(self.single(TokenType::LeftParen))),
            ')' => Ok(Some(self.single(TokenType::RightParen))),
            ',' => Ok(Some(self.single(TokenType::Comma))),
            '.' => Ok(Some(self.single(TokenType::Dot))),
            ';' => Ok(Some(self.single(TokenType::Semicolon))),
            '\n' => {
                self.line += 1;
                Ok(Some(self.single(TokenType::NewLine)))
            }
            c if c.is_whitespace() => {
                self.advance();
                Ok(None)
            }
            '"' | '\'' => Ok(Some(self.string()?)),
            '0'..='9' => Ok(Some(self.number()?)),
            'a'..='z' | 'A'..='Z' => Ok(Some(self.identifier())),
            _ => Err(ScanError::UnrecognizedCharacter {
                character: c,
                line: self.line,
            }),
        }
    }
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
    fn char_at(&self, idx: usize) -> Option<char> {
        self.source.get(idx).copied()
    }
    fn advance(&mut self) {
        self.current += 1;
    }
    fn next(&mut self) -> Option<char> {
        self.advance();
        self.char_at(self.current)
    }
    fn text(&self, from: usize, to: usize) -> String {
        let to = to.min(self.source.len());
        if from >= to {
            return String::new();
        }
        self.source[from..to].iter().collect()
    }
    fn single(&mut self, token_type: TokenType) -> Token {
        let token = Token::new(token_type, &self.text(self.current, self.current + 1), self.line);
        self.advance();
        token
    }
    // A backslash stops the scan one character early; the character after it is swallowed
    // together with the closing position.
    fn string(&mut self) -> Result<Token, ScanError> {
        let quote = self.source[self.start];
        let mut previous = quote;
        let mut current = self.next();
        let mut end = self.start;

        loop {
            let c = match current {
                Some(c) if c != quote && previous != '\\' => c,
                _ => break,
            };
            previous = c;
            current = self.next();
            end = self.current;
            if self.is_at_end() {
                return Err(ScanError::UnterminatedString { line: self.line });
            }
        }
        if end == self.start {
            end = self.current;
        }

        self.advance();
        Ok(Token::new(
            TokenType::String,
            &self.text(self.start + 1, end),
            self.line,
        ))
    }
    fn number(&mut self) -> Result<Token, ScanError> {
        let mut token_type = TokenType::Integer;
        let mut current = self.char_at(self.current);

        while let Some(c) = current {
            if !c.is_ascii_digit() {
                break;
            }
            if self.char_at(self.current + 1) == Some('.') {
                match self.char_at(self.current + 2) {
                    Some(d) if d.is_ascii_digit() => {
                        token_type = TokenType::Float;
                        self.current += 2;
                    }
                    _ => {
                        return Err(ScanError::MalformedNumber {
                            lexeme: self.text(self.start, self.current + 2),
                            line: self.line,
                        })
                    }
                }
            }
            current = self.next();
        }

        let lexeme = self.text(self.start, self.current);
        let valid = match token_type {
            TokenType::Float => lexeme.parse::<f64>().is_ok(),
            _ => lexeme.parse::<i64>().is_ok(),
        };
        if !valid {
            return Err(ScanError::MalformedNumber {
                lexeme,
                line: self.line,
            });
        }
        Ok(Token::new(token_type, &lexeme, self.line))
    }
    fn identifier(&mut self) -> Token {
        while let Some(c) = self.char_at(self.current) {
            match c {
                '0'..='9' | 'a'..='z' | 'A'..='Z' | '_' => self.advance(),
                _ => break,
            }
        }
        let name = self.text(self.start, self.current);
        match KEYWORDS.get(name.as_str()) {
            Some(TokenType::True) => Token::new(TokenType::True, "true", self.line),
            Some(TokenType::False) => Token::new(TokenType::False, "false", self.line),
            _ => Token::new(TokenType::Variable, &name, self.line),
        }
    }
}

static KEYWORDS: phf::Map<&'static str, TokenType> = phf_map! {
    "true" => TokenType::True,
    "True" => TokenType::True,
    "false" => TokenType::False,
    "False" => TokenType::False,
};
