use super::{define, int_arg, list_arg};
use crate::ast::Node;
use crate::callable::expect_exactly;
use crate::context::Context;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::Value;

pub fn register(scope: &mut Context) {
    define(scope, "contains", &[], 2, contains);
    define(scope, "elementAt", &[], 2, element_at);
    define(scope, "firstElement", &[], 1, first_element);
    define(scope, "lastElement", &[], 1, last_element);
    define(scope, "skip", &[], 2, |i, a| slice("skip", i, a));
    define(scope, "take", &[], 2, |i, a| slice("take", i, a));
    define(scope, "reversed", &[], 1, reversed);
}

fn contains(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("contains", arguments, 2)?;
    let items = list_arg(interpreter, arguments, 0)?;
    let needle = interpreter.argument(arguments, 1)?;
    Ok(Value::Boolean(
        items.map_or(false, |items| items.contains(&needle)),
    ))
}

fn element_at(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("elementAt", arguments, 2)?;
    let items = list_arg(interpreter, arguments, 0)?;
    let index = int_arg(interpreter, arguments, 1)?.and_then(|i| usize::try_from(i).ok());
    match (items, index) {
        (Some(items), Some(index)) => Ok(Value::from(items.into_iter().nth(index))),
        _ => Ok(Value::Null),
    }
}

fn first_element(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("firstElement", arguments, 1)?;
    let items = list_arg(interpreter, arguments, 0)?;
    Ok(Value::from(items.and_then(|items| items.into_iter().next())))
}

fn last_element(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("lastElement", arguments, 1)?;
    let items = list_arg(interpreter, arguments, 0)?;
    Ok(Value::from(items.and_then(|items| items.into_iter().last())))
}

// `skip` and `take`; a missing count reads as zero.
fn slice(name: &str, interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly(name, arguments, 2)?;
    let items = match list_arg(interpreter, arguments, 0)? {
        Some(items) => items,
        None => return Ok(Value::Null),
    };
    let count = int_arg(interpreter, arguments, 1)?.unwrap_or(0);
    let count = usize::try_from(count).map_err(|_| RuntimeError::InvalidArgument {
        function: name.to_string(),
        message: format!("count must not be negative, found {}", count),
    })?;
    let items: Vec<Value> = match name {
        "skip" => items.into_iter().skip(count).collect(),
        _ => items.into_iter().take(count).collect(),
    };
    Ok(Value::List(items))
}

fn reversed(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("reversed", arguments, 1)?;
    let items = list_arg(interpreter, arguments, 0)?;
    Ok(items.map_or(Value::Null, |items| {
        Value::List(items.into_iter().rev().collect())
    }))
}
