use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use super::Sexpr;

/// A chain of name-to-value frames. Lookup walks parent links until found or
/// exhausted. Frames are created, never destroyed in place: `let` bodies and
/// function applications get fresh child frames, and a closure keeps its
/// captured frame alive. Frame maps are locked because server sessions share
/// the root environment across threads.
#[derive(Debug)]
pub struct Environment {
    frame: RwLock<HashMap<Arc<str>, Sexpr>>,
    parent: Option<Arc<Environment>>,
}

impl Environment {
    /// A fresh root frame with no bindings.
    pub fn new() -> Arc<Environment> {
        Arc::new(Environment {
            frame: RwLock::new(HashMap::new()),
            parent: None,
        })
    }

    /// A fresh child frame masking `parent`.
    pub fn child(parent: &Arc<Environment>) -> Arc<Environment> {
        Arc::new(Environment {
            frame: RwLock::new(HashMap::new()),
            parent: Some(Arc::clone(parent)),
        })
    }

    pub fn lookup(&self, name: &str) -> Option<Sexpr> {
        if let Some(value) = self.frame.read().unwrap().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.lookup(name)
    }

    /// Creates or overwrites a binding in this frame only.
    pub fn bind(&self, name: &Arc<str>, value: Sexpr) {
        self.frame
            .write()
            .unwrap()
            .insert(Arc::clone(name), value);
    }

    /// The top of the chain. `define` always binds there, whatever the
    /// current depth.
    pub fn root(self: &Arc<Environment>) -> Arc<Environment> {
        let mut current = Arc::clone(self);
        loop {
            let Some(parent) = current.parent.clone() else {
                return current;
            };
            current = parent;
        }
    }
}
