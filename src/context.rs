use crate::value::{Map, Value};
use std::fmt;
use std::rc::Rc;

/// One named scope in a lookup chain.
///
/// The enclosing scope is fixed when the scope is built. Variables live behind an `Rc`
/// so extending a chain shares the maps instead of copying them; `define` copies on write.
#[derive(Clone)]
pub struct Context {
    name: String,
    variables: Rc<Map>,
    enclosing: Option<Rc<Context>>,
}

impl Context {
    pub fn new(name: &str) -> Context {
        Context::from_variables(name, Map::new())
    }
    pub fn from_variables(name: &str, variables: Map) -> Context {
        Context {
            name: name.to_string(),
            variables: Rc::new(variables),
            enclosing: None,
        }
    }
    /// Builds a scope from a JSON object; `None` for any other JSON value.
    pub fn from_json(name: &str, json: serde_json::Value) -> Option<Context> {
        match Value::from(json) {
            Value::Map(variables) => Some(Context::from_variables(name, variables)),
            _ => None,
        }
    }
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Context {
        self.define(key, value);
        self
    }
    pub fn enclosed_by(mut self, enclosing: Rc<Context>) -> Context {
        self.enclosing = Some(enclosing);
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn enclosing(&self) -> Option<&Rc<Context>> {
        self.enclosing.as_ref()
    }
    pub fn define(&mut self, key: &str, value: impl Into<Value>) {
        Rc::make_mut(&mut self.variables).insert(key.to_string(), value.into());
    }
    /// `None` when no scope in the chain binds `key`; `Some(Value::Null)` when one binds it to null.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        match self.variables.get(key) {
            Some(value) => Some(value),
            None => self.enclosing.as_ref().and_then(|e| e.get_value(key)),
        }
    }
    /// A copy of this chain with `tail` attached after its last scope.
    ///
    /// The receiver is left untouched, so a host can reuse its context across evaluations.
    pub fn with_tail(&self, tail: Rc<Context>) -> Context {
        Context {
            name: self.name.clone(),
            variables: Rc::clone(&self.variables),
            enclosing: Some(match &self.enclosing {
                None => tail,
                Some(e) => Rc::new(e.with_tail(tail)),
            }),
        }
    }
    pub fn depth(&self) -> usize {
        1 + self.enclosing.as_ref().map_or(0, |e| e.depth())
    }
    pub fn scope_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        if let Some(e) = &self.enclosing {
            names.extend(e.scope_names());
        }
        names
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("name", &self.name)
            .field("variables", &self.variables.keys().collect::<Vec<_>>())
            .field("enclosing", &self.enclosing)
            .finish()
    }
}
