//! # Sexpr
//!
//! The runtime value model. Every entity the interpreter touches is a
//! [`Sexpr`]: an interned atom, a pair, a callable, or a first-class error.

mod atom;
mod environment;
mod number;

pub use atom::*;
pub use environment::*;
pub use number::*;

use std::{error::Error, fmt::Display, sync::Arc};

/// An S-expression: an atom, or the cons of two S-expressions. Callables and
/// errors are values in their own right so they can flow through `cons`,
/// bindings, and results like anything else.
#[derive(Debug, Clone)]
pub enum Sexpr {
    Atom(Atom),
    Pair(Arc<Pair>),
    Function(Arc<Function>),
    Primitive(Arc<PrimitiveFunction>),
    Macro(Arc<PrimitiveMacro>),
    Error(Arc<Exception>),
}

/// An ordered pair. Pairs are never interned; separately built pairs are
/// distinct even with equal contents, and `Arc::ptr_eq` is the identity tag.
#[derive(Debug)]
pub struct Pair {
    pub car: Sexpr,
    pub cdr: Sexpr,
}

/// A user-defined function closing over the environment in which its
/// `lambda` form was evaluated.
pub struct Function {
    pub parameters: Vec<Arc<str>>,
    pub body: Sexpr,
    pub env: Arc<Environment>,
    pub display: String,
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The captured environment may reference this function back; print
        // the display form only.
        f.debug_tuple("Function").field(&self.display).finish()
    }
}

/// A built-in that receives its arguments already evaluated. `arity` of
/// `None` means variadic.
pub struct PrimitiveFunction {
    pub name: &'static str,
    pub arity: Option<usize>,
    pub apply: fn(&[Sexpr]) -> Result<Sexpr, Exception>,
}

impl std::fmt::Debug for PrimitiveFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrimitiveFunction").field(&self.name).finish()
    }
}

/// A built-in that receives the raw, unevaluated argument list and the
/// caller's environment.
pub struct PrimitiveMacro {
    pub name: &'static str,
    pub expand: fn(&Sexpr, &Arc<Environment>) -> Result<Sexpr, Exception>,
}

impl std::fmt::Debug for PrimitiveMacro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrimitiveMacro").field(&self.name).finish()
    }
}

/// An evaluation diagnostic. Exceptions halt the surrounding call and bubble
/// to the top-level result, where they print rather than crash the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    pub context: String,
    pub message: String,
}

impl Exception {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
        }
    }
}

impl Display for Exception {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Exception in {}: {}", self.context, self.message)
    }
}

impl Error for Exception {}

impl Sexpr {
    pub fn nil() -> Sexpr {
        Sexpr::Atom(Atom::Nil)
    }

    pub fn bool(value: bool) -> Sexpr {
        Sexpr::Atom(Atom::Bool(value))
    }

    pub fn cons(car: Sexpr, cdr: Sexpr) -> Sexpr {
        Sexpr::Pair(Arc::new(Pair { car, cdr }))
    }

    pub fn error(context: impl Into<String>, message: impl Into<String>) -> Sexpr {
        Sexpr::Error(Arc::new(Exception::new(context, message)))
    }

    /// Exactly `#f` and `()` are falsey; every other value is truthy.
    pub fn is_falsey(&self) -> bool {
        matches!(
            self,
            Sexpr::Atom(Atom::Bool(false)) | Sexpr::Atom(Atom::Nil)
        )
    }
}

/// Structural equality: atoms by tag and text, pairs recursively by car and
/// cdr, callables by identity, exceptions by content.
impl PartialEq for Sexpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Sexpr::Atom(a), Sexpr::Atom(b)) => a == b,
            (Sexpr::Pair(a), Sexpr::Pair(b)) => {
                Arc::ptr_eq(a, b) || (a.car == b.car && a.cdr == b.cdr)
            }
            (Sexpr::Function(a), Sexpr::Function(b)) => Arc::ptr_eq(a, b),
            (Sexpr::Primitive(a), Sexpr::Primitive(b)) => Arc::ptr_eq(a, b),
            (Sexpr::Macro(a), Sexpr::Macro(b)) => Arc::ptr_eq(a, b),
            (Sexpr::Error(a), Sexpr::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Sexpr {}

impl Display for Sexpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sexpr::Atom(atom) => atom.fmt(f),
            Sexpr::Pair(pair) => {
                write!(f, "({}", pair.car)?;
                let mut rest = &pair.cdr;
                loop {
                    match rest {
                        Sexpr::Pair(next) => {
                            write!(f, " {}", next.car)?;
                            rest = &next.cdr;
                        }
                        Sexpr::Atom(Atom::Nil) => return f.write_str(")"),
                        other => return write!(f, " . {other})"),
                    }
                }
            }
            Sexpr::Function(function) => write!(f, "fn:{}", function.display),
            Sexpr::Primitive(primitive) => write!(f, "fn:{}", primitive.name),
            Sexpr::Macro(primitive) => write!(f, "ma:{}", primitive.name),
            Sexpr::Error(exception) => exception.fmt(f),
        }
    }
}

/// Rolls a sequence of S-expressions up into the proper list they represent.
pub fn consify(items: Vec<Sexpr>) -> Sexpr {
    let mut list = Sexpr::nil();
    for item in items.into_iter().rev() {
        list = Sexpr::cons(item, list);
    }
    list
}

/// Unrolls a proper list into its elements. Fails on a dotted tail.
pub fn unconsify(list: &Sexpr) -> Result<Vec<Sexpr>, String> {
    let mut items = vec![];
    let mut rest = list;
    loop {
        match rest {
            Sexpr::Atom(Atom::Nil) => return Ok(items),
            Sexpr::Pair(pair) => {
                items.push(pair.car.clone());
                rest = &pair.cdr;
            }
            _ => {
                return Err(format!(
                    "Unexpected atom in position {} of {list}",
                    items.len()
                ))
            }
        }
    }
}
