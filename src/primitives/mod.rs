//! # Primitives
//!
//! The built-in macros and functions of the language. They cannot be written
//! in the language itself, so they are installed here, into the root frame
//! of a fresh environment.

mod functions;
mod macros;

use std::sync::Arc;

use crate::sexpr::{
    symbol_text, unconsify, Environment, Exception, PrimitiveFunction, PrimitiveMacro, Sexpr,
};

/// A root environment with every primitive installed.
pub fn root_environment() -> Arc<Environment> {
    let root = Environment::new();
    install(&root);
    root
}

/// Binds the primitive macros and functions into `env`'s own frame.
pub fn install(env: &Arc<Environment>) {
    let primitive_macros = [
        PrimitiveMacro {
            name: "quote",
            expand: macros::quote,
        },
        PrimitiveMacro {
            name: "define",
            expand: macros::define,
        },
        PrimitiveMacro {
            name: "let",
            expand: macros::let_form,
        },
        PrimitiveMacro {
            name: "lambda",
            expand: macros::lambda,
        },
        PrimitiveMacro {
            name: "if",
            expand: macros::if_form,
        },
        PrimitiveMacro {
            name: "and",
            expand: macros::and,
        },
        PrimitiveMacro {
            name: "or",
            expand: macros::or,
        },
        PrimitiveMacro {
            name: "cond",
            expand: macros::cond,
        },
    ];
    for primitive in primitive_macros {
        env.bind(
            &symbol_text(primitive.name),
            Sexpr::Macro(Arc::new(primitive)),
        );
    }

    let primitive_functions = [
        PrimitiveFunction {
            name: "+",
            arity: None,
            apply: functions::add,
        },
        PrimitiveFunction {
            name: "*",
            arity: None,
            apply: functions::multiply,
        },
        PrimitiveFunction {
            name: "-",
            arity: Some(2),
            apply: functions::subtract,
        },
        PrimitiveFunction {
            name: "/",
            arity: Some(2),
            apply: functions::divide,
        },
        PrimitiveFunction {
            name: "expt",
            arity: Some(2),
            apply: functions::expt,
        },
        PrimitiveFunction {
            name: "cons",
            arity: Some(2),
            apply: functions::cons,
        },
        PrimitiveFunction {
            name: "car",
            arity: Some(1),
            apply: functions::car,
        },
        PrimitiveFunction {
            name: "cdr",
            arity: Some(1),
            apply: functions::cdr,
        },
        PrimitiveFunction {
            name: "=",
            arity: Some(2),
            apply: functions::numeric_equal,
        },
        PrimitiveFunction {
            name: "eq?",
            arity: Some(2),
            apply: functions::identical,
        },
        PrimitiveFunction {
            name: "null?",
            arity: Some(1),
            apply: functions::is_null,
        },
        PrimitiveFunction {
            name: "pair?",
            arity: Some(1),
            apply: functions::is_pair,
        },
        PrimitiveFunction {
            name: "not",
            arity: Some(1),
            apply: functions::not,
        },
        PrimitiveFunction {
            name: "zero?",
            arity: Some(1),
            apply: functions::is_zero,
        },
        PrimitiveFunction {
            name: "number?",
            arity: Some(1),
            apply: functions::is_number,
        },
    ];
    for primitive in primitive_functions {
        env.bind(
            &symbol_text(primitive.name),
            Sexpr::Primitive(Arc::new(primitive)),
        );
    }
}

/// Unrolls a raw argument list and checks the count. Used by the macros,
/// which see their arguments unevaluated.
pub(crate) fn require_args(
    tail: &Sexpr,
    context: &str,
    required: usize,
) -> Result<Vec<Sexpr>, Exception> {
    let args = unconsify(tail).map_err(|message| Exception::new(context, message))?;
    if args.len() != required {
        return Err(Exception::new(
            context,
            format!("Expected {required} arguments, got {}", args.len()),
        ));
    }
    Ok(args)
}
