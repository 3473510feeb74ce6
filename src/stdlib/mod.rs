//! The builtin function catalogue, installed as the last scope of every evaluation.

pub mod datetime;
pub mod format;
pub mod iterable;
pub mod json;
pub mod logical;
pub mod math;
pub mod qs;
pub mod string;
pub mod util;

use crate::ast::Node;
use crate::callable::{Callable, NativeFunction};
use crate::context::Context;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::Value;
use std::rc::Rc;

pub const SCOPE_NAME: &str = "builtins";

thread_local! {
    static BUILTINS: Rc<Context> = Rc::new(builtins());
}

/// The shared builtin scope. Built once per thread and never mutated afterwards.
pub fn scope() -> Rc<Context> {
    BUILTINS.with(Rc::clone)
}

fn builtins() -> Context {
    let mut scope = Context::new(SCOPE_NAME);
    logical::register(&mut scope);
    math::register(&mut scope);
    string::register(&mut scope);
    json::register(&mut scope);
    datetime::register(&mut scope);
    iterable::register(&mut scope);
    format::register(&mut scope);
    util::register(&mut scope);
    qs::register(&mut scope);
    scope
}

/// Binds one native function under `name` and every alias.
pub(crate) fn define<F>(scope: &mut Context, name: &str, aliases: &[&str], arity: usize, function: F)
where
    F: Fn(&Interpreter, &[Node]) -> Result<Value, RuntimeError> + 'static,
{
    let callable: Rc<dyn Callable> = Rc::new(NativeFunction::new(name, arity, function));
    scope.define(name, Value::Callable(Rc::clone(&callable)));
    for alias in aliases {
        scope.define(alias, Value::Callable(Rc::clone(&callable)));
    }
}

// Typed argument access: a missing argument or one of the wrong type reads as `None`.

pub(crate) fn number_arg(
    interpreter: &Interpreter,
    arguments: &[Node],
    index: usize,
) -> Result<Option<f64>, RuntimeError> {
    Ok(interpreter.argument(arguments, index)?.as_f64())
}

pub(crate) fn int_arg(
    interpreter: &Interpreter,
    arguments: &[Node],
    index: usize,
) -> Result<Option<i64>, RuntimeError> {
    Ok(interpreter.argument(arguments, index)?.as_i64())
}

pub(crate) fn string_arg(
    interpreter: &Interpreter,
    arguments: &[Node],
    index: usize,
) -> Result<Option<String>, RuntimeError> {
    match interpreter.argument(arguments, index)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

pub(crate) fn list_arg(
    interpreter: &Interpreter,
    arguments: &[Node],
    index: usize,
) -> Result<Option<Vec<Value>>, RuntimeError> {
    match interpreter.argument(arguments, index)? {
        Value::List(items) => Ok(Some(items)),
        _ => Ok(None),
    }
}

#[cfg(test)]
pub(crate) fn run(source: &str) -> Result<Value, RuntimeError> {
    run_with(source, &Context::new("test"))
}

#[cfg(test)]
pub(crate) fn run_with(source: &str, context: &Context) -> Result<Value, RuntimeError> {
    let ast = crate::parser::create_ast(source).expect("test source parses");
    Interpreter::new(Some(context)).eval(&ast)
}
