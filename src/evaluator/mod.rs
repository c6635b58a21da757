//! # Evaluator
//!
//! The recursive reduce of a form under an environment. Evaluation is strict
//! and leftmost; recursion rides the host call stack. Failures travel as
//! `Exception` results internally and surface as first-class `Error` values
//! at the public boundary.

use std::sync::Arc;

use crate::sexpr::{Atom, Environment, Exception, Pair, Sexpr};

/// Reduces `form` under `env`. Any failure comes back as an `Error` value
/// rather than unwinding the host.
pub fn evaluate(form: &Sexpr, env: &Arc<Environment>) -> Sexpr {
    match eval(form, env) {
        Ok(value) => value,
        Err(exception) => Sexpr::Error(Arc::new(exception)),
    }
}

pub(crate) fn eval(form: &Sexpr, env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    match form {
        Sexpr::Atom(Atom::Symbol(name)) => env
            .lookup(name)
            .ok_or_else(|| Exception::new("lookup", format!("Variable {name} is not bound"))),
        Sexpr::Pair(pair) => apply(pair, env),
        // Everything else, errors included, evaluates to itself.
        _ => Ok(form.clone()),
    }
}

/// Evaluates a sub-expression whose result feeds further work: an `Error`
/// value halts the enclosing step and propagates unchanged.
pub(crate) fn eval_subexpr(form: &Sexpr, env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    match eval(form, env)? {
        Sexpr::Error(exception) => Err((*exception).clone()),
        value => Ok(value),
    }
}

/// The applicative form: evaluate the head, then dispatch on what kind of
/// callable it is.
fn apply(pair: &Pair, env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    let callee = eval_subexpr(&pair.car, env)?;
    match callee {
        Sexpr::Macro(primitive) => (primitive.expand)(&pair.cdr, env),
        Sexpr::Primitive(primitive) => {
            let args = eval_args(&pair.cdr, primitive.name, env)?;
            if let Some(arity) = primitive.arity {
                if args.len() != arity {
                    return Err(Exception::new(
                        primitive.name,
                        format!("Expected {arity} arguments, got {}", args.len()),
                    ));
                }
            }
            (primitive.apply)(&args)
        }
        Sexpr::Function(function) => {
            let args = eval_args(&pair.cdr, &function.display, env)?;
            if args.len() != function.parameters.len() {
                return Err(Exception::new(
                    &function.display,
                    format!(
                        "Evaluation with {} arguments, expected {}",
                        args.len(),
                        function.parameters.len()
                    ),
                ));
            }
            let frame = Environment::child(&function.env);
            for (parameter, arg) in function.parameters.iter().zip(args) {
                frame.bind(parameter, arg);
            }
            eval(&function.body, &frame)
        }
        other => Err(Exception::new(
            "(eval)",
            format!("Attempt to apply non-procedure {other}"),
        )),
    }
}

/// Evaluates an argument list left to right, failing fast on the first
/// error. The tail must be a proper list.
fn eval_args(
    tail: &Sexpr,
    context: &str,
    env: &Arc<Environment>,
) -> Result<Vec<Sexpr>, Exception> {
    let forms = crate::sexpr::unconsify(tail).map_err(|message| Exception::new(context, message))?;
    let mut args = Vec::with_capacity(forms.len());
    for form in &forms {
        args.push(eval_subexpr(form, env)?);
    }
    Ok(args)
}
