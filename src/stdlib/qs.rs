//! `qsEncode`: query-string encoding of a map in bracket notation.

use super::define;
use crate::ast::Node;
use crate::callable::expect_exactly;
use crate::context::Context;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::{Map, Value};

pub fn register(scope: &mut Context) {
    define(scope, "qsEncode", &[], 1, qs_encode);
}

fn qs_encode(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_exactly("qsEncode", arguments, 1)?;
    Ok(match interpreter.argument(arguments, 0)? {
        Value::Map(entries) => Value::String(encode(&entries)),
        _ => Value::Null,
    })
}

/// Pairs follow the map's insertion order. Nested maps become `key[child]=v`, lists
/// repeat their key, null is `key=`. Values are written as-is, without percent-encoding.
pub fn encode(entries: &Map) -> String {
    let mut pairs = Vec::new();
    for (key, value) in entries {
        push_pairs(&mut pairs, key, value);
    }
    pairs.join("&")
}

fn push_pairs(pairs: &mut Vec<String>, key: &str, value: &Value) {
    match value {
        Value::Map(children) => {
            for (child, v) in children {
                push_pairs(pairs, &format!("{}[{}]", key, child), v);
            }
        }
        Value::List(items) => {
            for item in items {
                push_pairs(pairs, key, item);
            }
        }
        Value::Null => pairs.push(format!("{}=", key)),
        other => pairs.push(format!("{}={}", key, other)),
    }
}

#[cfg(test)]
mod qs_tests {
    use crate::context::Context;
    use crate::stdlib::qs::encode;
    use crate::stdlib::{run, run_with};
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn flat_nested_and_repeated_keys() {
        let payload = Value::from(serde_json::json!({
            "key1": 11,
            "key2": "str",
            "key3": false,
            "key4": 0,
            "key5": {"cKey1": true},
            "key6": [0, 1],
            "key7": [{"cKey1": 233}, {"cKey2": false}]
        }));
        assert_eq!(
            encode(payload.as_map().unwrap()),
            "key1=11&key2=str&key3=false&key4=0&key5[cKey1]=true&key6=0&key6=1&key7[cKey1]=233&key7[cKey2]=false"
        );
    }

    #[test]
    fn keys_keep_their_insertion_order() {
        let payload = Value::from(serde_json::json!({"page": 1, "limit": 10, "filter": {"z": 1, "a": 2}}));
        assert_eq!(
            encode(payload.as_map().unwrap()),
            "page=1&limit=10&filter[z]=1&filter[a]=2"
        );
    }

    #[test]
    fn null_values_keep_their_key() {
        let payload = Value::from(serde_json::json!({"a": null, "b": {"c": null}}));
        assert_eq!(encode(payload.as_map().unwrap()), "a=&b[c]=");
    }

    #[test]
    fn builtin_requires_a_map() {
        let context = Context::new("test")
            .with("data", Value::from(serde_json::json!({"user": {"name": "John Doe"}})));
        assert_eq!(
            run_with("qsEncode(data)", &context).unwrap(),
            Value::from("user[name]=John Doe")
        );
        assert_eq!(run("qsEncode('a=b')").unwrap(), Value::Null);
        assert!(run("qsEncode()").is_err());
    }
}
