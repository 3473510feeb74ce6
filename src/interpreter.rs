use crate::ast::{AstPrinter, Node};
use crate::class::Object;
use crate::context::Context;
use crate::stdlib;
use crate::value::Value;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("[line {line}] Error: Undefined variable '{name}'.")]
    UndefinedVariable { name: String, line: i32 },
    #[error("Invalid function: {callee} is a {type_name}.")]
    InvalidCallee {
        callee: String,
        type_name: &'static str,
    },
    #[error("Only class instances and maps have properties; cannot read '{name}' from a {type_name}.")]
    NotAccessible {
        name: String,
        type_name: &'static str,
    },
    #[error("Undefined property '{name}'.")]
    UndefinedProperty { name: String },
    #[error("Division by zero.")]
    DivisionByZero,
    #[error("{function}: expected {expected} arguments, found {found}.")]
    ArgumentCount {
        function: String,
        expected: String,
        found: usize,
    },
    #[error("{function}: {message}")]
    InvalidArgument { function: String, message: String },
    /// Raised by host-supplied callables.
    #[error("{0}")]
    Host(String),
}

/// Tree-walking evaluator over a scope chain whose last scope holds the builtins.
pub struct Interpreter {
    context: Rc<Context>,
}

impl Interpreter {
    pub fn new(context: Option<&Context>) -> Interpreter {
        let builtins = stdlib::scope();
        let context = match context {
            Some(host) => Rc::new(host.with_tail(builtins)),
            None => builtins,
        };
        Interpreter { context }
    }
    pub fn context(&self) -> &Context {
        &self.context
    }
    pub fn eval(&self, node: &Node) -> Result<Value, RuntimeError> {
        match node {
            Node::Program(body) => self.eval(body),
            Node::NumberLiteral(x) => Ok(Value::from(x.get())),
            Node::StringLiteral(x) => Ok(Value::String(x.get())),
            Node::BooleanLiteral(_) => Ok(node.boolean_value().map_or(Value::Null, Value::Boolean)),
            Node::StringExpression(parts) => {
                let mut joined = String::new();
                for part in parts {
                    joined.push_str(self.eval(part)?.to_string().as_str());
                }
                Ok(Value::String(joined))
            }
            Node::Variable(token) => match self.context.get_value(&token.lexeme) {
                None => Err(RuntimeError::UndefinedVariable {
                    name: token.lexeme.clone(),
                    line: token.line,
                }),
                Some(Value::Deferred(expression)) => {
                    tracing::trace!(name = %token.lexeme, "evaluating deferred binding");
                    self.eval(expression)
                }
                Some(value) => Ok(value.clone()),
            },
            Node::Get { target, name } => match self.eval(target)? {
                Value::Null => Ok(Value::Null),
                Value::Map(entries) => stdlib::json::field(&entries, &name.lexeme),
                Value::Object(Object::Instance(instance)) => instance.get_field(&name.lexeme),
                other => Err(RuntimeError::NotAccessible {
                    name: name.lexeme.clone(),
                    type_name: other.type_name(),
                }),
            },
            Node::Call { callee, arguments } => {
                let value = self.eval(callee)?;
                let function = value
                    .as_callable()
                    .ok_or_else(|| RuntimeError::InvalidCallee {
                        callee: AstPrinter {}.print(callee),
                        type_name: value.type_name(),
                    })?;
                tracing::trace!(
                    function = function.name(),
                    arguments = arguments.len(),
                    "call"
                );
                function.call(self, arguments)
            }
        }
    }
    /// Evaluates a deferred value; anything else passes through unchanged.
    pub fn force(&self, value: &Value) -> Result<Value, RuntimeError> {
        match value {
            Value::Deferred(node) => self.eval(node),
            other => Ok(other.clone()),
        }
    }
    /// Forces the argument at `index`, or yields null when it was not supplied.
    pub fn argument(&self, arguments: &[Node], index: usize) -> Result<Value, RuntimeError> {
        match arguments.get(index) {
            Some(node) => self.eval(node),
            None => Ok(Value::Null),
        }
    }
}
