use std::{
    collections::HashMap,
    fmt::Display,
    sync::{Arc, RwLock},
};

use once_cell::sync::Lazy;

/// An indivisible value. `Number` and `Symbol` carry their source text;
/// payloads come from the process-wide interning pools, so two atoms with
/// identical text share one allocation and identity comparison is
/// meaningful.
#[derive(Debug, Clone)]
pub enum Atom {
    Nil,
    Bool(bool),
    Number(Arc<str>),
    Symbol(Arc<str>),
}

// Symbols and numbers intern separately: the symbol `1` and the number `1`
// are different atoms.
static SYMBOLS: Lazy<RwLock<HashMap<Box<str>, Arc<str>>>> = Lazy::new(Default::default);
static NUMBERS: Lazy<RwLock<HashMap<Box<str>, Arc<str>>>> = Lazy::new(Default::default);

fn intern(pool: &RwLock<HashMap<Box<str>, Arc<str>>>, text: &str) -> Arc<str> {
    if let Some(found) = pool.read().unwrap().get(text) {
        return Arc::clone(found);
    }

    let mut pool = pool.write().unwrap();
    if let Some(found) = pool.get(text) {
        return Arc::clone(found);
    }

    let entry: Arc<str> = Arc::from(text);
    pool.insert(Box::from(text), Arc::clone(&entry));
    entry
}

/// The canonical symbol atom for `name`.
pub fn symbol(name: &str) -> Atom {
    Atom::Symbol(symbol_text(name))
}

/// The canonical number atom for `text`, kept verbatim. Numeric coercion is
/// deferred until an arithmetic primitive parses it.
pub fn number(text: &str) -> Atom {
    Atom::Number(intern(&NUMBERS, text))
}

/// The interned text of the symbol `name`, for use as a binding key.
pub fn symbol_text(name: &str) -> Arc<str> {
    intern(&SYMBOLS, name)
}

impl Atom {
    /// Identity: both sides are the same interned atom.
    pub fn is(&self, other: &Atom) -> bool {
        match (self, other) {
            (Atom::Nil, Atom::Nil) => true,
            (Atom::Bool(a), Atom::Bool(b)) => a == b,
            (Atom::Number(a), Atom::Number(b)) => Arc::ptr_eq(a, b),
            (Atom::Symbol(a), Atom::Symbol(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Atom::Nil, Atom::Nil) => true,
            (Atom::Bool(a), Atom::Bool(b)) => a == b,
            (Atom::Number(a), Atom::Number(b)) => Arc::ptr_eq(a, b) || a == b,
            (Atom::Symbol(a), Atom::Symbol(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl Eq for Atom {}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Atom::Nil => f.write_str("()"),
            Atom::Bool(true) => f.write_str("#t"),
            Atom::Bool(false) => f.write_str("#f"),
            Atom::Number(text) => f.write_str(text),
            Atom::Symbol(text) => f.write_str(text),
        }
    }
}
