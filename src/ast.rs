use crate::token::{Token, TokenType};
use std::fmt;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

/// A literal payload: either known at parse time or produced on demand by a host supplier.
pub enum Literal<T> {
    Value(T),
    Supplier(Box<dyn Fn() -> T>),
}

impl<T: Clone> Literal<T> {
    pub fn get(&self) -> T {
        match self {
            Literal::Value(x) => x.clone(),
            Literal::Supplier(f) => f(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Literal<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Value(x) => write!(f, "{:?}", x),
            Literal::Supplier(_) => write!(f, "<supplier>"),
        }
    }
}

#[derive(Debug)]
pub enum Node {
    Program(Box<Node>),
    NumberLiteral(Literal<Number>),
    StringLiteral(Literal<String>),
    BooleanLiteral(Token),
    Variable(Token),
    Call {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    Get {
        target: Box<Node>,
        name: Token,
    },
    StringExpression(Vec<Node>),
}

impl Node {
    pub fn number(value: Number) -> Node {
        Node::NumberLiteral(Literal::Value(value))
    }
    pub fn string(value: &str) -> Node {
        Node::StringLiteral(Literal::Value(value.to_string()))
    }
    pub fn is_float(&self) -> bool {
        match self {
            Node::NumberLiteral(n) => n.get().is_float(),
            _ => false,
        }
    }
    pub fn boolean_value(&self) -> Option<bool> {
        match self {
            Node::BooleanLiteral(token) => match token.tokentype {
                TokenType::True => Some(true),
                TokenType::False => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Renders a node as an s-expression; used by the CLI's `--ast` flag and in tests.
pub struct AstPrinter {}

impl AstPrinter {
    fn parenthesize(&self, name: &str, args: &[&Node]) -> String {
        let mut x = String::from("(");
        x.push_str(name);
        for arg in args {
            x.push(' ');
            x.push_str(self.print(arg).as_str());
        }
        x.push(')');
        x
    }
    pub fn print(&self, n: &Node) -> String {
        match n {
            Node::Program(body) => self.parenthesize("program", &[body.as_ref()]),
            Node::NumberLiteral(x) => match x.get() {
                Number::Integer(i) => i.to_string(),
                Number::Float(f) => format!("{:?}", f),
            },
            Node::StringLiteral(x) => format!("{:?}", x.get()),
            Node::BooleanLiteral(token) => token.lexeme.clone(),
            Node::Variable(token) => token.lexeme.clone(),
            Node::Call { callee, arguments } => {
                let mut args: Vec<&Node> = vec![callee.as_ref()];
                args.extend(arguments.iter());
                self.parenthesize("call", &args)
            }
            Node::Get { target, name } => {
                format!("(get {} {})", self.print(target), name.lexeme)
            }
            Node::StringExpression(parts) => {
                let args: Vec<&Node> = parts.iter().collect();
                self.parenthesize("str", &args)
            }
        }
    }
}

#[cfg(test)]
mod ast_tests {
    use crate::ast::{AstPrinter, Literal, Node, Number};
    use crate::token::{Token, TokenType};
    use pretty_assertions::assert_eq;

    #[test]
    fn basic_ast_test() {
        let expression = Node::Get {
            target: Box::new(Node::Call {
                callee: Box::new(Node::Get {
                    target: Box::new(Node::Variable(Token::new(TokenType::Variable, "a", 1))),
                    name: Token::new(TokenType::Variable, "b", 1),
                }),
                arguments: vec![Node::number(Number::Integer(1)), Node::string("x")],
            }),
            name: Token::new(TokenType::Variable, "c", 1),
        };
        let printer = AstPrinter {};
        assert_eq!(printer.print(&expression), "(get (call (get a b) 1 \"x\") c)");
    }

    #[test]
    fn number_literal_reports_float_kind() {
        assert!(Node::number(Number::Float(1.5)).is_float());
        assert!(!Node::number(Number::Integer(1)).is_float());
        let deferred = Node::NumberLiteral(Literal::Supplier(Box::new(|| Number::Float(2.0))));
        assert!(deferred.is_float());
    }

    #[test]
    fn boolean_literal_is_backed_by_its_token() {
        let yes = Node::BooleanLiteral(Token::new(TokenType::True, "true", 1));
        let no = Node::BooleanLiteral(Token::new(TokenType::False, "false", 1));
        assert_eq!(yes.boolean_value(), Some(true));
        assert_eq!(no.boolean_value(), Some(false));
    }

    #[test]
    fn suppliers_run_on_every_read() {
        let literal = Literal::Supplier(Box::new(|| String::from("late")));
        assert_eq!(literal.get(), "late");
        assert_eq!(format!("{:?}", literal), "<supplier>");
    }
}
