//! Structured field access into map values.

use super::{define, string_arg};
use crate::ast::Node;
use crate::callable::expect_at_least;
use crate::context::Context;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::{Map, Value};

pub fn register(scope: &mut Context) {
    define(scope, "jsonGet", &["get"], 2, json_get);
}

/// Single-level key fetch used by `target.name` on a map.
pub fn field(entries: &Map, name: &str) -> Result<Value, RuntimeError> {
    entries
        .get(name)
        .cloned()
        .ok_or_else(|| RuntimeError::UndefinedProperty {
            name: name.to_string(),
        })
}

/// Resolves a path such as `data.users[0].name` against `root`.
///
/// A leading `$` or `$.` is accepted. Any step that does not resolve yields `None`.
pub fn lookup(root: &Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);
    let mut current = root;
    for segment in path.split('.') {
        let (key, indices) = split_indices(segment)?;
        if key.is_empty() && indices.is_empty() {
            return None;
        }
        if !key.is_empty() {
            current = current.as_map()?.get(key)?;
        }
        for index in indices {
            current = current.as_list()?.get(index)?;
        }
    }
    Some(current.clone())
}

// "users[0][1]" -> ("users", [0, 1])
fn split_indices(segment: &str) -> Option<(&str, Vec<usize>)> {
    let (key, mut rest) = match segment.find('[') {
        Some(at) => segment.split_at(at),
        None => return Some((segment, Vec::new())),
    };
    let mut indices = Vec::new();
    while let Some(tail) = rest.strip_prefix('[') {
        let close = tail.find(']')?;
        indices.push(tail[..close].trim().parse::<usize>().ok()?);
        rest = &tail[close + 1..];
    }
    if rest.is_empty() {
        Some((key, indices))
    } else {
        None
    }
}

fn json_get(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_at_least("jsonGet", arguments, 2)?;
    let json = interpreter.argument(arguments, 0)?;
    let path = match string_arg(interpreter, arguments, 1)? {
        Some(path) => path,
        None => return Ok(Value::Null),
    };
    let root = match json {
        Value::Null => return Ok(Value::Null),
        Value::String(text) => match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(parsed) => Value::from(parsed),
            Err(_) => return Ok(Value::Null),
        },
        other => other,
    };
    Ok(Value::from(lookup(&root, &path)))
}

#[cfg(test)]
mod json_tests {
    use crate::context::Context;
    use crate::interpreter::RuntimeError;
    use crate::stdlib::json::{field, lookup};
    use crate::stdlib::run_with;
    use crate::value::{Map, Value};
    use pretty_assertions::assert_eq;

    fn data() -> Value {
        Value::from(serde_json::json!({
            "data": {
                "users": [
                    {"id": 1, "name": "Alice", "role": "admin"},
                    {"id": 2, "name": "Bob", "role": "user"}
                ],
                "settings": {"theme": "dark", "notifications": {"email": true, "push": false}},
                "grid": [[1, 2], [3, 4]]
            }
        }))
    }

    #[test]
    fn dotted_paths() {
        assert_eq!(
            lookup(&data(), "data.settings.notifications.email"),
            Some(Value::Boolean(true))
        );
        assert_eq!(lookup(&data(), "$.data.settings.theme"), Some(Value::from("dark")));
    }

    #[test]
    fn list_indices() {
        assert_eq!(lookup(&data(), "data.users[1].name"), Some(Value::from("Bob")));
        assert_eq!(lookup(&data(), "data.grid[1][0]"), Some(Value::from(3)));
    }

    #[test]
    fn misses_are_none() {
        assert_eq!(lookup(&data(), "data.users[5].name"), None);
        assert_eq!(lookup(&data(), "data.missing"), None);
        assert_eq!(lookup(&data(), "data.users[x]"), None);
        assert_eq!(lookup(&data(), "data..theme"), None);
        assert_eq!(lookup(&data(), "data.settings.theme.deeper"), None);
    }

    #[test]
    fn single_field() {
        let mut entries = Map::new();
        entries.insert("a".to_string(), Value::from(1));
        assert_eq!(field(&entries, "a"), Ok(Value::from(1)));
        assert_eq!(
            field(&entries, "b"),
            Err(RuntimeError::UndefinedProperty {
                name: "b".to_string()
            })
        );
    }

    #[test]
    fn json_get_builtin() {
        let context = Context::new("test")
            .with("dataSource", data())
            .with("text", "{\"a\": {\"b\": [10, 20]}}");
        assert_eq!(
            run_with("get(dataSource, 'data.users[0].role')", &context).unwrap(),
            Value::from("admin")
        );
        assert_eq!(run_with("jsonGet(text, 'a.b[1]')", &context).unwrap(), Value::from(20));
        assert_eq!(run_with("get(dataSource, 'nope')", &context).unwrap(), Value::Null);
        assert_eq!(run_with("get('not json', 'a')", &context).unwrap(), Value::Null);
        assert!(run_with("get(dataSource)", &context).is_err());
    }
}
