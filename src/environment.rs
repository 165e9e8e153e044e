use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

/// Shared handle to a scope frame.
///
/// A frame stays alive while any closure or active call still refers to it,
/// independent of when its lexical block finished executing.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One frame of variable bindings plus a link to the enclosing frame.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    /// A fresh global frame.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap `self` in a shareable handle.
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Bind `name` in this frame, overwriting any previous binding here.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Look `name` up here, then outward through the enclosing frames.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Overwrite an existing binding, searching outward like [`get`](Self::get).
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// Read `name` from exactly `distance` frames out from `env`.
    ///
    /// Only ever called with distances computed by the resolver, so a miss
    /// here is an interpreter bug rather than a user error.
    pub fn get_at(env: &EnvRef, distance: usize, name: &str) -> Value {
        debug!("get_at distance={} name={}", distance, name);

        ancestor(env, distance)
            .borrow()
            .values
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("resolved variable '{}' missing at depth {}", name, distance))
    }

    /// Write `name` exactly `distance` frames out from `env`.
    pub fn assign_at(env: &EnvRef, distance: usize, name: &Token, value: Value) {
        debug!("assign_at distance={} name={}", distance, name.lexeme);

        ancestor(env, distance)
            .borrow_mut()
            .values
            .insert(name.lexeme.clone(), value);
    }
}

/// Walk `distance` enclosing links outward from `env`.
fn ancestor(env: &EnvRef, distance: usize) -> EnvRef {
    let mut current: EnvRef = Rc::clone(env);

    for _ in 0..distance {
        let next: EnvRef = current
            .borrow()
            .enclosing
            .clone()
            .expect("resolver distance exceeds environment depth");
        current = next;
    }

    current
}

fn undefined(name: &Token) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Token {
        Token::synthetic(name, 1)
    }

    #[test]
    fn get_walks_outward_and_define_shadows() {
        let globals: EnvRef = Environment::new().into_ref();
        globals.borrow_mut().define("a", Value::Number(1.0));

        let inner: EnvRef = Environment::with_enclosing(Rc::clone(&globals)).into_ref();
        assert!(matches!(inner.borrow().get(&ident("a")), Ok(Value::Number(n)) if n == 1.0));

        inner.borrow_mut().define("a", Value::Number(2.0));
        assert!(matches!(inner.borrow().get(&ident("a")), Ok(Value::Number(n)) if n == 2.0));
        assert!(matches!(globals.borrow().get(&ident("a")), Ok(Value::Number(n)) if n == 1.0));
    }

    #[test]
    fn assign_updates_the_declaring_frame() {
        let globals: EnvRef = Environment::new().into_ref();
        globals.borrow_mut().define("a", Value::Nil);

        let inner: EnvRef = Environment::with_enclosing(Rc::clone(&globals)).into_ref();
        inner
            .borrow_mut()
            .assign(&ident("a"), Value::Bool(true))
            .expect("assign");

        assert!(matches!(globals.borrow().get(&ident("a")), Ok(Value::Bool(true))));
    }

    #[test]
    fn undefined_names_are_runtime_errors() {
        let env: EnvRef = Environment::new().into_ref();

        let err = env.borrow().get(&ident("missing")).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'missing'.\n[line 1]");

        let err = env
            .borrow_mut()
            .assign(&ident("missing"), Value::Nil)
            .unwrap_err();
        assert_eq!(err.message(), "Undefined variable 'missing'.");
    }

    #[test]
    fn distance_access_skips_shadowing_frames() {
        let outer: EnvRef = Environment::new().into_ref();
        outer.borrow_mut().define("x", Value::Number(1.0));

        let middle: EnvRef = Environment::with_enclosing(Rc::clone(&outer)).into_ref();
        middle.borrow_mut().define("x", Value::Number(2.0));

        let inner: EnvRef = Environment::with_enclosing(Rc::clone(&middle)).into_ref();

        assert!(matches!(Environment::get_at(&inner, 2, "x"), Value::Number(n) if n == 1.0));

        Environment::assign_at(&inner, 1, &ident("x"), Value::Number(5.0));
        assert!(matches!(Environment::get_at(&inner, 1, "x"), Value::Number(n) if n == 5.0));
        assert!(matches!(Environment::get_at(&inner, 2, "x"), Value::Number(n) if n == 1.0));
    }
}
