use super::{define, number_arg};
use crate::ast::Node;
use crate::callable::{expect_at_least, expect_exactly, VARIADIC};
use crate::context::Context;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::Value;

pub fn register(scope: &mut Context) {
    define(scope, "sum", &[], VARIADIC, sum);
    define(scope, "multiply", &["mul"], VARIADIC, multiply);
    define(scope, "diff", &["difference"], 2, difference);
    define(scope, "divide", &[], 2, divide);
    define(scope, "modulo", &[], 2, modulo);
    define(scope, "ceil", &[], 1, |i, a| round("ceil", i, a, f64::ceil));
    define(scope, "floor", &[], 1, |i, a| round("floor", i, a, f64::floor));
    define(scope, "abs", &[], 1, abs);
    define(scope, "clamp", &[], 3, clamp);
}

// Non-numeric arguments count as 0.
fn sum(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    let mut total = 0.0;
    for index in 0..arguments.len() {
        total += number_arg(interpreter, arguments, index)?.unwrap_or(0.0);
    }
    Ok(Value::Float(total))
}

// Non-numeric arguments count as 1.
fn multiply(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    let mut product = 1.0;
    for index in 0..arguments.len() {
        product *= number_arg(interpreter, arguments, index)?.unwrap_or(1.0);
    }
    Ok(Value::Float(product))
}

fn operands(
    name: &str,
    interpreter: &Interpreter,
    arguments: &[Node],
) -> Result<(f64, f64), RuntimeError> {
    expect_at_least(name, arguments, 2)?;
    let left = interpreter.eval(&arguments[0])?;
    let right = interpreter.eval(&arguments[1])?;
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(RuntimeError::InvalidArgument {
            function: name.to_string(),
            message: format!("operands must be numbers, found {} and {}", left, right),
        }),
    }
}

fn difference(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    let (left, right) = operands("diff", interpreter, arguments)?;
    Ok(Value::Float(left - right))
}

fn divide(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    let (left, right) = operands("divide", interpreter, arguments)?;
    if right == 0.0 {
        return Err(RuntimeError::DivisionByZero);
    }
    Ok(Value::Float(left / right))
}

fn modulo(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("modulo", arguments, 2)?;
    let left = number_arg(interpreter, arguments, 0)?;
    let right = number_arg(interpreter, arguments, 1)?;
    match (left, right) {
        (Some(l), Some(r)) => Ok(Value::Float(l % r)),
        _ => Ok(Value::Null),
    }
}

fn round<F>(
    name: &str,
    interpreter: &Interpreter,
    arguments: &[Node],
    op: F,
) -> Result<Value, RuntimeError>
where
    F: Fn(f64) -> f64,
{
    expect_exactly(name, arguments, 1)?;
    Ok(number_arg(interpreter, arguments, 0)?
        .map_or(Value::Null, |x| Value::Integer(op(x) as i64)))
}

fn abs(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("abs", arguments, 1)?;
    Ok(number_arg(interpreter, arguments, 0)?.map_or(Value::Null, |x| Value::Float(x.abs())))
}

fn clamp(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("clamp", arguments, 3)?;
    let value = number_arg(interpreter, arguments, 0)?;
    let min = number_arg(interpreter, arguments, 1)?;
    let max = number_arg(interpreter, arguments, 2)?;
    let (value, min, max) = match (value, min, max) {
        (Some(value), Some(min), Some(max)) => (value, min, max),
        _ => return Ok(Value::Null),
    };
    // f64::clamp panics on an inverted or NaN range.
    if !(min <= max) {
        return Err(RuntimeError::InvalidArgument {
            function: "clamp".to_string(),
            message: format!("empty range {}..{}", min, max),
        });
    }
    Ok(Value::Float(value.clamp(min, max)))
}
