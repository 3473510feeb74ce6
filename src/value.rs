use crate::ast::{Node, Number};
use crate::callable::Callable;
use crate::class::{Class, Object};
use crate::instance::Instance;
use indexmap::IndexMap;
use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;

/// Keys keep their insertion order.
pub type Map = IndexMap<String, Value>;

#[derive(Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
    Callable(Rc<dyn Callable>),
    Object(Object),
    /// A binding whose value is computed by evaluating the node on lookup.
    Deferred(Rc<Node>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Callable(_) => "function",
            Value::Object(Object::Class(_)) => "class",
            Value::Object(Object::Instance(_)) => "instance",
            Value::Deferred(_) => "expression",
        }
    }
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
    /// Integers, and floats without a fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
    /// Functions and classes both satisfy the callable capability.
    pub fn as_callable(&self) -> Option<Rc<dyn Callable>> {
        match self {
            Value::Callable(f) => Some(Rc::clone(f)),
            Value::Object(Object::Class(class)) => Some(Rc::clone(class) as Rc<dyn Callable>),
            _ => None,
        }
    }
    pub fn deferred(node: Node) -> Value {
        Value::Deferred(Rc::new(node))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(l), Value::Boolean(r)) => l == r,
            (Value::Integer(l), Value::Integer(r)) => l == r,
            (Value::Integer(_), Value::Float(_)) | (Value::Float(_), Value::Integer(_)) => {
                self.as_f64() == other.as_f64()
            }
            (Value::Float(l), Value::Float(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            (Value::List(l), Value::List(r)) => l == r,
            (Value::Map(l), Value::Map(r)) => l == r,
            (Value::Callable(l), Value::Callable(r)) => Rc::ptr_eq(l, r),
            (Value::Object(l), Value::Object(r)) => l.equals(r),
            (Value::Deferred(l), Value::Deferred(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

/// Plain decimals between 10^-3 and 10^7, scientific `1.0E-5` style outside that range.
fn write_float(f: &mut Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return write!(f, "NaN");
    }
    if x.is_infinite() {
        return write!(f, "{}Infinity", if x < 0.0 { "-" } else { "" });
    }
    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-3..1e7).contains(&magnitude) {
        let scientific = format!("{:e}", x);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if mantissa.contains('.') => {
                write!(f, "{}E{}", mantissa, exponent)
            }
            Some((mantissa, exponent)) => write!(f, "{}.0E{}", mantissa, exponent),
            None => write!(f, "{}", scientific),
        };
    }
    if x.fract() == 0.0 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(x) => write!(f, "{}", x),
            Value::Integer(x) => write!(f, "{}", x),
            Value::Float(x) => write_float(f, *x),
            Value::String(x) => write!(f, "{}", x),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Callable(c) => write!(f, "<fn {}>", c.name()),
            Value::Object(o) => write!(f, "{}", o),
            Value::Deferred(_) => write!(f, "<expression>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(x) => write!(f, "{:?}", x),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Map(entries) => f.debug_map().entries(entries).finish(),
            Value::Deferred(node) => write!(f, "Deferred({:?})", node),
            _ => write!(f, "{}", self),
        }
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Value {
        Value::Boolean(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Value {
        Value::Integer(i64::from(x))
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Value {
        Value::Integer(x)
    }
}

impl From<usize> for Value {
    fn from(x: usize) -> Value {
        i64::try_from(x).map_or(Value::Float(x as f64), Value::Integer)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Value {
        Value::Float(x)
    }
}

impl From<Number> for Value {
    fn from(x: Number) -> Value {
        match x {
            Number::Integer(i) => Value::Integer(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

impl From<&str> for Value {
    fn from(x: &str) -> Value {
        Value::String(x.to_string())
    }
}

impl From<String> for Value {
    fn from(x: String) -> Value {
        Value::String(x)
    }
}

impl From<Vec<Value>> for Value {
    fn from(x: Vec<Value>) -> Value {
        Value::List(x)
    }
}

impl From<Map> for Value {
    fn from(x: Map) -> Value {
        Value::Map(x)
    }
}

impl From<Class> for Value {
    fn from(x: Class) -> Value {
        Value::Object(Object::Class(Rc::new(x)))
    }
}

impl From<Instance> for Value {
    fn from(x: Instance) -> Value {
        Value::Object(Object::Instance(Rc::new(x)))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(x: Option<T>) -> Value {
        x.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod value_tests {
    use crate::value::{Map, Value};
    use pretty_assertions::assert_eq;

    #[test]
    fn floats_always_show_a_fraction() {
        assert_eq!(Value::Float(42.0).to_string(), "42.0");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Integer(42).to_string(), "42");
    }

    #[test]
    fn large_and_small_floats_use_exponents() {
        assert_eq!(Value::Float(1e-5).to_string(), "1.0E-5");
        assert_eq!(Value::Float(1e16).to_string(), "1.0E16");
        assert_eq!(Value::Float(12345678.0).to_string(), "1.2345678E7");
        assert_eq!(Value::Float(-2.5e-4).to_string(), "-2.5E-4");
        assert_eq!(Value::Float(9999999.0).to_string(), "9999999.0");
        assert_eq!(Value::Float(0.001).to_string(), "0.001");
        assert_eq!(Value::Float(0.0).to_string(), "0.0");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    fn collections_render_like_their_contents() {
        let list = Value::from(vec![Value::from(1), Value::from("a"), Value::Null]);
        assert_eq!(list.to_string(), "[1, a, null]");
        let mut map = Map::new();
        map.insert("b".to_string(), Value::from(true));
        map.insert("a".to_string(), Value::from(1.5));
        assert_eq!(Value::from(map).to_string(), "{b=true, a=1.5}");
    }

    #[test]
    fn numbers_compare_across_kinds() {
        assert_eq!(Value::Integer(10), Value::Float(10.0));
        assert!(Value::Integer(10) != Value::Float(10.5));
        assert!(Value::from("10") != Value::Integer(10));
        assert!(Value::Null != Value::from(false));
    }

    #[test]
    fn json_conversion() {
        let json = serde_json::json!({"a": {"b": 10, "c": 2.5}, "l": [true, null]});
        let value = Value::from(json);
        let a = value.as_map().unwrap()["a"].as_map().unwrap();
        assert_eq!(a["b"], Value::Integer(10));
        assert_eq!(a["c"], Value::Float(2.5));
        assert_eq!(
            value.as_map().unwrap()["l"],
            Value::List(vec![Value::Boolean(true), Value::Null])
        );
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
