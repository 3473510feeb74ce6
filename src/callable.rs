use crate::ast::Node;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::Value;
use std::fmt;
use std::fmt::Debug;
use std::rc::Rc;

/// Conventional arity for functions that take any number of arguments.
pub const VARIADIC: usize = 255;

/// The capability every function-like value provides.
///
/// Arguments arrive unevaluated. Each implementation decides which ones to force,
/// and in which order, through [`Interpreter::eval`] or [`Interpreter::argument`].
/// `arity` is advisory; implementations validate their own argument counts.
pub trait Callable {
    fn name(&self) -> &str;
    fn arity(&self) -> usize;
    fn call(&self, interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError>;
}

pub type NativeFn = dyn Fn(&Interpreter, &[Node]) -> Result<Value, RuntimeError>;

/// A callable backed by a Rust function or closure.
#[derive(Clone)]
pub struct NativeFunction {
    name: String,
    arity: usize,
    function: Rc<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(name: &str, arity: usize, function: F) -> NativeFunction
    where
        F: Fn(&Interpreter, &[Node]) -> Result<Value, RuntimeError> + 'static,
    {
        NativeFunction {
            name: name.to_string(),
            arity,
            function: Rc::new(function),
        }
    }
    pub fn into_value(self) -> Value {
        Value::Callable(Rc::new(self))
    }
}

impl Callable for NativeFunction {
    fn name(&self) -> &str {
        &self.name
    }
    fn arity(&self) -> usize {
        self.arity
    }
    fn call(&self, interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
        (self.function)(interpreter, arguments)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl fmt::Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

/// Fails unless exactly `expected` arguments were supplied.
pub fn expect_exactly(name: &str, arguments: &[Node], expected: usize) -> Result<(), RuntimeError> {
    if arguments.len() != expected {
        return Err(RuntimeError::ArgumentCount {
            function: name.to_string(),
            expected: format!("{}", expected),
            found: arguments.len(),
        });
    }
    Ok(())
}

/// Fails when fewer than `minimum` arguments were supplied.
pub fn expect_at_least(name: &str, arguments: &[Node], minimum: usize) -> Result<(), RuntimeError> {
    if arguments.len() < minimum {
        return Err(RuntimeError::ArgumentCount {
            function: name.to_string(),
            expected: format!("at least {}", minimum),
            found: arguments.len(),
        });
    }
    Ok(())
}

/// Fails when more than `maximum` arguments were supplied.
pub fn expect_at_most(name: &str, arguments: &[Node], maximum: usize) -> Result<(), RuntimeError> {
    if arguments.len() > maximum {
        return Err(RuntimeError::ArgumentCount {
            function: name.to_string(),
            expected: format!("at most {}", maximum),
            found: arguments.len(),
        });
    }
    Ok(())
}
