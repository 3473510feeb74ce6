use crate::class::{Class, MethodTable};
use crate::interpreter::RuntimeError;
use crate::value::{Map, Value};
use std::fmt;
use std::rc::Rc;

pub struct Instance {
    class_name: String,
    fields: Map,
    methods: Rc<MethodTable>,
}

impl Instance {
    pub fn new(class: &Class) -> Instance {
        Instance {
            class_name: class.name().to_string(),
            fields: class.fields().clone(),
            methods: class.methods(),
        }
    }
    pub fn class_name(&self) -> &str {
        &self.class_name
    }
    pub fn methods(&self) -> Rc<MethodTable> {
        Rc::clone(&self.methods)
    }
    /// Fields shadow methods of the same name.
    pub fn get_field(&self, name: &str) -> Result<Value, RuntimeError> {
        if let Some(x) = self.fields.get(name) {
            return Ok(x.clone());
        }
        self.methods
            .get(name)
            .map(|method| Value::Callable(Rc::clone(method)))
            .ok_or_else(|| RuntimeError::UndefinedProperty {
                name: name.to_string(),
            })
    }
    pub fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class_name)
    }
}
