use super::define;
use crate::ast::Node;
use crate::callable::expect_exactly;
use crate::context::Context;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::Value;

pub fn register(scope: &mut Context) {
    define(scope, "toInt", &[], 1, to_int);
    define(scope, "isEmpty", &[], 1, is_empty);
    define(scope, "length", &["strLength"], 1, length);
}

/// `0x`-prefixed text is hexadecimal; other text and numbers truncate toward zero.
fn to_int(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("toInt", arguments, 1)?;
    let value = interpreter.argument(arguments, 0)?;
    let result = match &value {
        Value::String(text) => match text.strip_prefix("0x") {
            Some(hex) => i64::from_str_radix(hex, 16).ok(),
            None => text.parse::<f64>().ok().and_then(truncate),
        },
        Value::Integer(i) => Some(*i),
        Value::Float(f) => truncate(*f),
        _ => None,
    };
    Ok(Value::from(result))
}

fn truncate(x: f64) -> Option<i64> {
    if x.is_finite() {
        Some(x.trunc() as i64)
    } else {
        None
    }
}

fn is_empty(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("isEmpty", arguments, 1)?;
    let empty = match interpreter.argument(arguments, 0)? {
        Value::Null => true,
        Value::Integer(i) => i == 0,
        Value::Float(f) => f == 0.0,
        Value::Boolean(b) => b,
        Value::String(s) => s.is_empty(),
        Value::List(items) => items.is_empty(),
        Value::Map(entries) => entries.is_empty(),
        _ => false,
    };
    Ok(Value::Boolean(empty))
}

fn length(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("length", arguments, 1)?;
    Ok(match interpreter.argument(arguments, 0)? {
        Value::String(s) => Value::from(s.chars().count()),
        Value::List(items) => Value::from(items.len()),
        Value::Map(entries) => Value::from(entries.len()),
        _ => Value::Null,
    })
}

#[cfg(test)]
mod util_tests {
    use crate::context::Context;
    use crate::stdlib::{run, run_with};
    use crate::value::{Map, Value};
    use pretty_assertions::assert_eq;

    #[test]
    fn to_int_conversions() {
        assert_eq!(run("toInt(100)").unwrap(), Value::Integer(100));
        assert_eq!(run("toInt(100.9)").unwrap(), Value::Integer(100));
        assert_eq!(run("toInt('100.1')").unwrap(), Value::Integer(100));
        assert_eq!(run("toInt('0x64')").unwrap(), Value::Integer(100));
        assert_eq!(run("toInt('0xZZ')").unwrap(), Value::Null);
        assert_eq!(run("toInt('abc')").unwrap(), Value::Null);
        assert_eq!(run("toInt(true)").unwrap(), Value::Null);
        assert!(run("toInt()").is_err());
    }

    #[test]
    fn emptiness() {
        let context = Context::new("test")
            .with("nothing", Value::Null)
            .with("list", Vec::<Value>::new())
            .with("map", Map::new());
        for (source, expected) in [
            ("isEmpty(0)", true),
            ("isEmpty(0.0)", true),
            ("isEmpty(1)", false),
            ("isEmpty(true)", true),
            ("isEmpty(false)", false),
            ("isEmpty('')", true),
            ("isEmpty(' ')", false),
            ("isEmpty(nothing)", true),
            ("isEmpty(list)", true),
            ("isEmpty(map)", true),
        ] {
            assert_eq!(
                run_with(source, &context).unwrap(),
                Value::Boolean(expected),
                "{}",
                source
            );
        }
    }

    #[test]
    fn lengths() {
        let context = Context::new("test")
            .with("x", "hello-world")
            .with("list", vec![Value::from(1), Value::from(2)]);
        assert_eq!(run_with("strLength(x)", &context).unwrap(), Value::Integer(11));
        assert_eq!(run_with("length(list)", &context).unwrap(), Value::Integer(2));
        assert_eq!(run("strLength('   ')").unwrap(), Value::Integer(3));
        assert_eq!(run("strLength('₹1')").unwrap(), Value::Integer(2));
        assert_eq!(run("length(5)").unwrap(), Value::Null);
    }
}
