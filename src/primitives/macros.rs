//! The primitive macros. Each receives the raw argument list and the
//! caller's environment; nothing is evaluated until the macro asks for it.

use std::sync::Arc;

use super::require_args;
use crate::evaluator::{eval, eval_subexpr};
use crate::sexpr::{symbol, unconsify, Atom, Environment, Exception, Function, Sexpr};

/// `(quote v)`: returns `v` unevaluated.
pub(super) fn quote(tail: &Sexpr, _env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    let mut args = require_args(tail, "quote", 1)?;
    Ok(args.remove(0))
}

/// `(define sym expr)`: evaluates `expr` here, binds `sym` in the root
/// frame, whatever the current depth. Yields `()`.
pub(super) fn define(tail: &Sexpr, env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    let args = require_args(tail, "define", 2)?;
    let Sexpr::Atom(Atom::Symbol(name)) = &args[0] else {
        return Err(Exception::new(
            "define",
            format!("Cannot bind non-symbol {}", args[0]),
        ));
    };
    let value = eval_subexpr(&args[1], env)?;
    env.root().bind(name, value);
    Ok(Sexpr::nil())
}

/// `(let ((sym expr) ...) body)`: parallel binding semantics. Every value
/// expression is evaluated in the caller's environment, then the body runs
/// in a fresh child frame holding the new bindings.
pub(super) fn let_form(tail: &Sexpr, env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    let args = require_args(tail, "let", 2)?;
    let bindings = unconsify(&args[0]).map_err(|message| Exception::new("let", message))?;

    let child = Environment::child(env);
    for binding in &bindings {
        let pair = require_args(binding, "let(binding)", 2)?;
        let Sexpr::Atom(Atom::Symbol(name)) = &pair[0] else {
            return Err(Exception::new(
                "let",
                format!("Cannot bind non-symbol {}", pair[0]),
            ));
        };
        let value = eval_subexpr(&pair[1], env)?;
        child.bind(name, value);
    }

    eval(&args[1], &child)
}

/// `(lambda (sym ...) body)`: captures the current environment and returns
/// a function whose arity is the parameter count.
pub(super) fn lambda(tail: &Sexpr, env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    let mut args = require_args(tail, "lambda", 2)?;
    let declared = unconsify(&args[0])
        .map_err(|message| Exception::new("lambda", format!("Strange parameter list: {message}")))?;

    let mut parameters: Vec<Arc<str>> = Vec::with_capacity(declared.len());
    for parameter in &declared {
        let Sexpr::Atom(Atom::Symbol(name)) = parameter else {
            return Err(Exception::new(
                "lambda",
                format!("Invalid parameter-name {parameter}"),
            ));
        };
        if parameters.iter().any(|seen| Arc::ptr_eq(seen, name)) {
            return Err(Exception::new(
                "lambda",
                format!("Duplicate parameter-name {parameter}"),
            ));
        }
        parameters.push(Arc::clone(name));
    }

    let body = args.remove(1);
    let display = format!("(λ ({}) {body})", parameters.join(" "));
    Ok(Sexpr::Function(Arc::new(Function {
        parameters,
        body,
        env: Arc::clone(env),
        display,
    })))
}

/// `(if test then)` or `(if test then else)`. A missing alternative yields
/// `()`.
pub(super) fn if_form(tail: &Sexpr, env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    let args = unconsify(tail).map_err(|message| Exception::new("if", message))?;
    if args.len() < 2 || args.len() > 3 {
        return Err(Exception::new(
            "if",
            format!("Expected 2 or 3 arguments, got {}", args.len()),
        ));
    }
    let test = eval_subexpr(&args[0], env)?;
    if !test.is_falsey() {
        eval(&args[1], env)
    } else if let Some(alternative) = args.get(2) {
        eval(alternative, env)
    } else {
        Ok(Sexpr::nil())
    }
}

/// Left-to-right evaluation that stops as soon as the reducer decides the
/// answer; remaining terms are never evaluated.
fn lazy_reduce(
    name: &str,
    tail: &Sexpr,
    env: &Arc<Environment>,
    otherwise: Sexpr,
    decide: fn(&Sexpr) -> Option<Sexpr>,
) -> Result<Sexpr, Exception> {
    let terms = unconsify(tail).map_err(|message| Exception::new(name, message))?;
    for term in &terms {
        let value = eval_subexpr(term, env)?;
        if let Some(answer) = decide(&value) {
            return Ok(answer);
        }
    }
    Ok(otherwise)
}

/// `(and ...)`: `#f` at the first falsey term, else `#t`. Empty is `#t`.
pub(super) fn and(tail: &Sexpr, env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    lazy_reduce("and", tail, env, Sexpr::bool(true), |value| {
        value.is_falsey().then(|| Sexpr::bool(false))
    })
}

/// `(or ...)`: `#t` at the first truthy term, else `#f`. Empty is `#f`.
pub(super) fn or(tail: &Sexpr, env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    lazy_reduce("or", tail, env, Sexpr::bool(false), |value| {
        (!value.is_falsey()).then(|| Sexpr::bool(true))
    })
}

/// `(cond (test expr) ...)`: the first truthy test fires its expression;
/// `else` in test position fires unconditionally; no clause firing yields
/// `()`.
pub(super) fn cond(tail: &Sexpr, env: &Arc<Environment>) -> Result<Sexpr, Exception> {
    let clauses = unconsify(tail).map_err(|message| Exception::new("cond", message))?;
    for clause in &clauses {
        let pair = unconsify(clause)
            .ok()
            .filter(|pair| pair.len() == 2)
            .ok_or_else(|| {
                Exception::new("cond", format!("Unrecognizable test {clause}"))
            })?;

        if pair[0] == Sexpr::Atom(symbol("else")) {
            return eval(&pair[1], env);
        }
        let predicate = eval_subexpr(&pair[0], env)?;
        if !predicate.is_falsey() {
            return eval(&pair[1], env);
        }
    }
    Ok(Sexpr::nil())
}

#[cfg(test)]
mod tests {
    use crate::evaluator::evaluate;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::primitives;

    fn run(input: &str) -> Vec<String> {
        let root = primitives::root_environment();
        Parser::new(Lexer::new(input.chars()))
            .map(|form| evaluate(&form, &root).to_string())
            .collect()
    }

    #[test]
    fn test_quote_returns_argument_unevaluated() {
        assert_eq!(vec!["(a b c)"], run("'(a b c)"));
        assert_eq!(vec!["x"], run("(quote x)"));
        assert_eq!(vec!["(quote x)"], run("''x"));
    }

    #[test]
    fn test_quote_wrong_arity() {
        assert_eq!(
            vec!["Exception in quote: Expected 1 arguments, got 2"],
            run("(quote a b)")
        );
    }

    #[test]
    fn test_define_binds_and_returns_nil() {
        assert_eq!(vec!["()", "42"], run("(define answer 42) answer"));
    }

    #[test]
    fn test_define_rejects_non_symbol() {
        assert_eq!(
            vec!["Exception in define: Cannot bind non-symbol 1"],
            run("(define 1 2)")
        );
    }

    #[test]
    fn test_define_at_depth_writes_root() {
        assert_eq!(
            vec!["()", "()", "9"],
            run("(define go (lambda (x) (define deep x))) (go 9) deep")
        );
    }

    #[test]
    fn test_define_propagates_evaluation_errors() {
        assert_eq!(
            vec!["Exception in car: 2 is not a pair"],
            run("(define x (car 2))")
        );
    }

    #[test]
    fn test_let_binds_in_parallel() {
        // `b` sees the outer `a`, not the one bound next to it.
        assert_eq!(vec!["()", "1"], run("(define a 1) (let ((a 2) (b a)) b)"));
    }

    #[test]
    fn test_let_evaluates_body_in_child_frame() {
        assert_eq!(vec!["#t"], run("(let ((a 3) (b 4)) (= 7 (+ a b)))"));
    }

    #[test]
    fn test_let_bindings_do_not_leak() {
        assert_eq!(
            vec![
                "7".to_owned(),
                "Exception in lookup: Variable a is not bound".to_owned()
            ],
            run("(let ((a 7)) a) a")
        );
    }

    #[test]
    fn test_lambda_rejects_duplicate_parameters() {
        assert_eq!(
            vec!["Exception in lambda: Duplicate parameter-name x"],
            run("(lambda (x x) x)")
        );
    }

    #[test]
    fn test_lambda_rejects_non_symbol_parameters() {
        assert_eq!(
            vec!["Exception in lambda: Invalid parameter-name 1"],
            run("(lambda (1) 1)")
        );
    }

    #[test]
    fn test_lambda_prints_opaquely() {
        assert_eq!(vec!["fn:(λ (x) x)"], run("(lambda (x) x)"));
    }

    #[test]
    fn test_if_picks_a_branch() {
        assert_eq!(vec!["1"], run("(if #t 1 2)"));
        assert_eq!(vec!["2"], run("(if #f 1 2)"));
        assert_eq!(vec!["()"], run("(if #f 1)"));
    }

    #[test]
    fn test_if_leaves_untaken_branch_unevaluated() {
        assert_eq!(vec!["1"], run("(if #t 1 undefined-symbol)"));
    }

    #[test]
    fn test_and_short_circuits() {
        assert_eq!(vec!["#f"], run("(and #f undefined-symbol)"));
        assert_eq!(vec!["#t"], run("(and #t #t)"));
        assert_eq!(vec!["#t"], run("(and)"));
        assert_eq!(vec!["#f"], run("(and #t ())"));
    }

    #[test]
    fn test_or_short_circuits() {
        assert_eq!(vec!["#t"], run("(or #t undefined-symbol)"));
        assert_eq!(vec!["#f"], run("(or #f #f)"));
        assert_eq!(vec!["#f"], run("(or)"));
        assert_eq!(vec!["#t"], run("(or () 1)"));
    }

    #[test]
    fn test_cond_fires_first_truthy_clause() {
        assert_eq!(vec!["3"], run("(cond (#f 1) (#f 2) (else 3))"));
        assert_eq!(vec!["2"], run("(cond (#f 1) (#t 2) (else 3))"));
    }

    #[test]
    fn test_cond_without_firing_clause_is_nil() {
        assert_eq!(vec!["()"], run("(cond (#f 1))"));
    }

    #[test]
    fn test_cond_rejects_malformed_clause() {
        assert_eq!(
            vec!["Exception in cond: Unrecognizable test (1 2 3)"],
            run("(cond (1 2 3))")
        );
    }
}
