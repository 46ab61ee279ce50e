// ABOUTME: Environment module for managing variable bindings and lexical scopes

use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Object>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no outer scope.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            outer: None,
        })
    }

    /// Creates a new child environment enclosing `outer`. A function value
    /// captures its defining environment; calling it creates a frame whose
    /// outer is that captured environment, not the caller's.
    pub fn new_enclosed(outer: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            outer: Some(outer),
        })
    }

    /// Looks up a name in this scope and, recursively, in outer scopes.
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Binds a name to a value in the innermost (this) frame, shadowing any
    /// outer binding of the same name without mutating it. Returns the
    /// stored value.
    pub fn set(&self, name: String, value: Object) -> Object {
        self.bindings.borrow_mut().insert(name, value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let env = Environment::new();
        env.set("x".to_string(), Object::Integer(42));

        match env.get("x") {
            Some(Object::Integer(n)) => assert_eq!(n, 42),
            _ => panic!("expected Integer(42)"),
        }
    }

    #[test]
    fn test_undefined_symbol() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
    }

    #[test]
    fn test_shadowing_does_not_mutate_outer() {
        let outer = Environment::new();
        outer.set("x".to_string(), Object::Integer(42));

        let inner = Environment::new_enclosed(outer.clone());
        inner.set("x".to_string(), Object::Integer(100));

        match inner.get("x") {
            Some(Object::Integer(n)) => assert_eq!(n, 100),
            _ => panic!("expected Integer(100)"),
        }
        match outer.get("x") {
            Some(Object::Integer(n)) => assert_eq!(n, 42),
            _ => panic!("outer binding should be unchanged"),
        }
    }

    #[test]
    fn test_outer_lookup_through_chain() {
        let grandparent = Environment::new();
        grandparent.set("a".to_string(), Object::Integer(1));

        let parent = Environment::new_enclosed(grandparent);
        parent.set("b".to_string(), Object::Integer(2));

        let child = Environment::new_enclosed(parent);
        child.set("c".to_string(), Object::Integer(3));

        assert!(matches!(child.get("a"), Some(Object::Integer(1))));
        assert!(matches!(child.get("b"), Some(Object::Integer(2))));
        assert!(matches!(child.get("c"), Some(Object::Integer(3))));
    }
}
