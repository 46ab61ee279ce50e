// ABOUTME: Runtime value universe produced by the evaluator

use crate::ast::{BlockStatement, Identifier};
use crate::env::Environment;
use std::fmt;
use std::rc::Rc;

/// A runtime value. `ReturnValue` and `Error` are control values: they
/// steer evaluation but unwrap before user-visible output.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    ReturnValue(Box<Object>),
    Function {
        parameters: Vec<Identifier>,
        body: BlockStatement,
        env: Rc<Environment>,
    },
    Error(String),
}

impl Object {
    /// The type-tag string used verbatim in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::ReturnValue(inner) => inner.type_name(),
            Object::Function { .. } => "FUNCTION",
            Object::Error(_) => "ERROR",
        }
    }

    /// `false` and `Null` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(inner) => write!(f, "{}", inner),
            Object::Function { parameters, body, .. } => {
                let params: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "fn({}) {{ {} }}", params.join(", "), body)
            }
            Object::Error(msg) => write!(f, "ERROR: {}", msg),
        }
    }
}
