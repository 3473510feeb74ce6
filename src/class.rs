use crate::ast::Node;
use crate::callable::Callable;
use crate::instance::Instance;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub type MethodTable = BTreeMap<String, Rc<dyn Callable>>;

/// A host-defined type: field defaults plus a method table shared by every instance.
pub struct Class {
    name: String,
    fields: Map,
    methods: Rc<MethodTable>,
}

impl Class {
    pub fn new(name: &str, fields: Map, methods: MethodTable) -> Class {
        Class {
            name: name.to_string(),
            fields,
            methods: Rc::new(methods),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn fields(&self) -> &Map {
        &self.fields
    }
    pub fn methods(&self) -> Rc<MethodTable> {
        Rc::clone(&self.methods)
    }
    pub fn find_method(&self, name: &str) -> Option<Rc<dyn Callable>> {
        self.methods.get(name).cloned()
    }
    pub fn instantiate(&self) -> Instance {
        Instance::new(self)
    }
}

impl Callable for Class {
    fn name(&self) -> &str {
        &self.name
    }
    fn arity(&self) -> usize {
        0
    }
    fn call(&self, _: &Interpreter, _: &[Node]) -> Result<Value, RuntimeError> {
        Ok(Value::from(self.instantiate()))
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The two shapes of host object a value can hold.
#[derive(Clone)]
pub enum Object {
    Class(Rc<Class>),
    Instance(Rc<Instance>),
}

impl Object {
    pub fn equals(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Class(l), Object::Class(r)) => Rc::ptr_eq(l, r),
            (Object::Instance(l), Object::Instance(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Class(class) => write!(f, "{}", class),
            Object::Instance(instance) => write!(f, "{}", instance),
        }
    }
}
