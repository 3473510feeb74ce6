use super::{define, int_arg, string_arg};
use crate::ast::Node;
use crate::callable::{expect_at_least, VARIADIC};
use crate::context::Context;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::Value;

pub fn register(scope: &mut Context) {
    define(scope, "concat", &["concatenate"], VARIADIC, concat);
    define(scope, "substring", &[], 2, substring);
}

fn concat(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    let mut joined = String::new();
    for argument in arguments {
        joined.push_str(interpreter.eval(argument)?.to_string().as_str());
    }
    Ok(Value::String(joined))
}

/// `substring(text, start[, end])` over characters, not bytes.
fn substring(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_at_least("substring", arguments, 2)?;
    let text = string_arg(interpreter, arguments, 0)?;
    let start = int_arg(interpreter, arguments, 1)?;
    let end = int_arg(interpreter, arguments, 2)?;

    let (text, start) = match (text, start) {
        (text, None) => return Ok(Value::from(text)),
        (None, Some(_)) => return Ok(Value::Null),
        (Some(text), Some(start)) => (text, start),
    };
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len() as i64;
    let end = end.unwrap_or(len);
    if start < 0 || end > len || start > end {
        return Err(RuntimeError::InvalidArgument {
            function: "substring".to_string(),
            message: format!("range {}..{} out of bounds for length {}", start, end, len),
        });
    }
    Ok(Value::String(
        chars[start as usize..end as usize].iter().collect(),
    ))
}
