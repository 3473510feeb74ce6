use super::{define, number_arg};
use crate::ast::Node;
use crate::callable::{expect_at_least, expect_at_most, expect_exactly, VARIADIC};
use crate::context::Context;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::Value;

pub fn register(scope: &mut Context) {
    define(scope, "isEqual", &["eq"], 2, is_equal);
    define(scope, "isNotEqual", &["neq"], 2, is_not_equal);
    define(scope, "isNull", &[], 1, is_null);
    define(scope, "isNotNull", &[], 1, is_not_null);
    define(scope, "if", &["condition"], VARIADIC, condition);
    define(scope, "gt", &[], 2, |i, a| compare("gt", i, a, |l, r| l > r));
    define(scope, "gte", &[], 2, |i, a| compare("gte", i, a, |l, r| l >= r));
    define(scope, "lt", &[], 2, |i, a| compare("lt", i, a, |l, r| l < r));
    define(scope, "lte", &[], 2, |i, a| compare("lte", i, a, |l, r| l <= r));
    define(scope, "not", &[], 1, not);
    define(scope, "or", &[], 2, or);
    define(scope, "and", &[], 2, and);
}

fn is_equal(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_at_least("isEqual", arguments, 2)?;
    let left = interpreter.eval(&arguments[0])?;
    let right = interpreter.eval(&arguments[1])?;
    Ok(Value::Boolean(left == right))
}

fn is_not_equal(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_at_least("isNotEqual", arguments, 2)?;
    let left = interpreter.eval(&arguments[0])?;
    let right = interpreter.eval(&arguments[1])?;
    Ok(Value::Boolean(left != right))
}

fn is_null(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_at_most("isNull", arguments, 1)?;
    Ok(Value::Boolean(interpreter.argument(arguments, 0)?.is_null()))
}

fn is_not_null(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_at_most("isNotNull", arguments, 1)?;
    Ok(Value::Boolean(!interpreter.argument(arguments, 0)?.is_null()))
}

/// `if(c1, r1, c2, r2, ..., default?)`: conditions are forced in order until one is `true`;
/// only the chosen result is evaluated.
fn condition(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_at_least("if", arguments, 2)?;
    let mut pairs = arguments.chunks_exact(2);
    for pair in &mut pairs {
        if interpreter.eval(&pair[0])?.as_bool() == Some(true) {
            return interpreter.eval(&pair[1]);
        }
    }
    match pairs.remainder().first() {
        Some(default) => interpreter.eval(default),
        None => Ok(Value::Null),
    }
}

fn compare<F>(
    name: &str,
    interpreter: &Interpreter,
    arguments: &[Node],
    op: F,
) -> Result<Value, RuntimeError>
where
    F: Fn(f64, f64) -> bool,
{
    expect_exactly(name, arguments, 2)?;
    let left = number_arg(interpreter, arguments, 0)?;
    let right = number_arg(interpreter, arguments, 1)?;
    match (left, right) {
        (Some(l), Some(r)) => Ok(Value::Boolean(op(l, r))),
        _ => Ok(Value::Boolean(false)),
    }
}

fn not(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("not", arguments, 1)?;
    Ok(interpreter
        .argument(arguments, 0)?
        .as_bool()
        .map_or(Value::Null, |b| Value::Boolean(!b)))
}

// Boolean `or` for two booleans; otherwise the first non-null operand.
fn or(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("or", arguments, 2)?;
    let left = interpreter.eval(&arguments[0])?;
    let right = interpreter.eval(&arguments[1])?;
    match (&left, &right) {
        (Value::Boolean(l), Value::Boolean(r)) => Ok(Value::Boolean(*l || *r)),
        _ if left.is_null() => Ok(right),
        _ => Ok(left),
    }
}

fn and(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("and", arguments, 2)?;
    let left = interpreter.eval(&arguments[0])?;
    let right = interpreter.eval(&arguments[1])?;
    match (left, right) {
        (Value::Boolean(l), Value::Boolean(r)) => Ok(Value::Boolean(l && r)),
        _ => Ok(Value::Null),
    }
}
