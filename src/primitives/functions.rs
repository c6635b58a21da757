//! The strict primitive functions. Arity is checked by the evaluator before
//! dispatch, so fixed-arity bodies may index their arguments directly.

use std::sync::Arc;

use crate::sexpr::{number, Atom, Exception, IntOrFloat, Sexpr};

/// Parses a value as a number, in the context of the named primitive.
fn numeric(value: &Sexpr, context: &str) -> Result<IntOrFloat, Exception> {
    match value {
        Sexpr::Atom(Atom::Number(text)) => IntOrFloat::parse(text)
            .ok_or_else(|| Exception::new(context, format!("Cannot parse number {text}"))),
        other => Err(Exception::new(context, format!("{other} is not a number"))),
    }
}

fn number_value(value: IntOrFloat) -> Sexpr {
    Sexpr::Atom(number(&value.to_string()))
}

/// Folds a variadic numeric primitive over its arguments.
fn arithmetic_fold(
    name: &str,
    args: &[Sexpr],
    identity: IntOrFloat,
    fold: fn(IntOrFloat, IntOrFloat) -> IntOrFloat,
) -> Result<Sexpr, Exception> {
    let mut acc = identity;
    for arg in args {
        acc = fold(acc, numeric(arg, name)?);
    }
    Ok(number_value(acc))
}

pub(super) fn add(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    arithmetic_fold("+", args, IntOrFloat::Int(0), |acc, value| acc + value)
}

pub(super) fn multiply(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    arithmetic_fold("*", args, IntOrFloat::Int(1), |acc, value| acc * value)
}

pub(super) fn subtract(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    let minuend = numeric(&args[0], "-")?;
    let subtrahend = numeric(&args[1], "-")?;
    Ok(number_value(minuend - subtrahend))
}

pub(super) fn divide(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    let dividend = numeric(&args[0], "/")?;
    let divisor = numeric(&args[1], "/")?;
    dividend
        .checked_div(divisor)
        .map(number_value)
        .ok_or_else(|| Exception::new("/", "Divide by zero"))
}

pub(super) fn expt(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    let base = numeric(&args[0], "expt")?;
    let exponent = numeric(&args[1], "expt")?;
    Ok(number_value(base.pow(exponent)))
}

pub(super) fn cons(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    Ok(Sexpr::cons(args[0].clone(), args[1].clone()))
}

pub(super) fn car(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    match &args[0] {
        Sexpr::Pair(pair) => Ok(pair.car.clone()),
        other => Err(Exception::new("car", format!("{other} is not a pair"))),
    }
}

pub(super) fn cdr(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    match &args[0] {
        Sexpr::Pair(pair) => Ok(pair.cdr.clone()),
        other => Err(Exception::new("cdr", format!("{other} is not a pair"))),
    }
}

/// `=`: numeric equality. Both sides must parse as numbers; `2` and `2.0`
/// compare equal here even though they are distinct atoms.
pub(super) fn numeric_equal(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    let left = numeric(&args[0], "=")?;
    let right = numeric(&args[1], "=")?;
    Ok(Sexpr::bool(left.equals(right)))
}

/// `eq?`: true only for two `()`s or the same interned symbol. Numbers stay
/// conservative; `3`, `3.0`, and `3.00` are all different atoms.
pub(super) fn identical(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    let answer = match (&args[0], &args[1]) {
        (Sexpr::Atom(Atom::Nil), Sexpr::Atom(Atom::Nil)) => true,
        (Sexpr::Atom(Atom::Symbol(a)), Sexpr::Atom(Atom::Symbol(b))) => Arc::ptr_eq(a, b),
        _ => false,
    };
    Ok(Sexpr::bool(answer))
}

pub(super) fn is_null(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    Ok(Sexpr::bool(matches!(&args[0], Sexpr::Atom(Atom::Nil))))
}

pub(super) fn is_pair(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    Ok(Sexpr::bool(matches!(&args[0], Sexpr::Pair(_))))
}

pub(super) fn not(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    Ok(Sexpr::bool(args[0].is_falsey()))
}

/// `zero?`: identity with the interned number atom `0`; `0.0` is a
/// different atom and does not count.
pub(super) fn is_zero(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    let zero = number("0");
    let answer = matches!(&args[0], Sexpr::Atom(atom) if atom.is(&zero));
    Ok(Sexpr::bool(answer))
}

pub(super) fn is_number(args: &[Sexpr]) -> Result<Sexpr, Exception> {
    Ok(Sexpr::bool(matches!(
        &args[0],
        Sexpr::Atom(Atom::Number(_))
    )))
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
    fn test_addition() {
        assert_eq!(vec!["3"], run("(+ 1 2)"));
        assert_eq!(vec!["0"], run("(+)"));
        assert_eq!(vec!["10"], run("(+ 1 2 3 4)"));
    }

    #[test]
    fn test_addition_widens_to_float() {
        assert_eq!(vec!["5.859874"], run("(+ 2.718281 3.141593)"));
        assert_eq!(vec!["3.500000"], run("(+ 1 2.5)"));
    }

    #[test]
    fn test_multiplication() {
        assert_eq!(vec!["24"], run("(* 2 3 4)"));
        assert_eq!(vec!["1"], run("(*)"));
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(vec!["1"], run("(- 3 2)"));
        assert_eq!(vec!["-1"], run("(- 2 3)"));
    }

    #[test]
    fn test_division() {
        assert_eq!(vec!["2"], run("(/ 4 2)"));
        assert_eq!(vec!["1.333333"], run("(/ 4 3)"));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(vec!["Exception in /: Divide by zero"], run("(/ 1 0)"));
    }

    #[test]
    fn test_expt() {
        assert_eq!(vec!["1024"], run("(expt 2 10)"));
        assert_eq!(vec!["0.500000"], run("(expt 2 -1)"));
        assert_eq!(vec!["8.000000"], run("(expt 2.0 3)"));
    }

    #[test]
    fn test_arithmetic_rejects_non_numbers() {
        assert_eq!(
            vec!["Exception in +: (1 . 2) is not a number"],
            run("(+ 1 (cons 1 2))")
        );
    }

    #[test]
    fn test_arithmetic_arity() {
        assert_eq!(
            vec!["Exception in -: Expected 2 arguments, got 1"],
            run("(- 1)")
        );
    }

    #[test]
    fn test_cons_car_cdr() {
        assert_eq!(vec!["(1 . 2)"], run("(cons 1 2)"));
        assert_eq!(vec!["1"], run("(car (cons 1 2))"));
        assert_eq!(vec!["2"], run("(cdr (cons 1 2))"));
    }

    #[test]
    fn test_car_of_non_pair() {
        assert_eq!(vec!["Exception in car: 2 is not a pair"], run("(car 2)"));
        assert_eq!(vec!["Exception in cdr: () is not a pair"], run("(cdr ())"));
    }

    #[test]
    fn test_numeric_equal() {
        assert_eq!(vec!["#t"], run("(= 2 2.0)"));
        assert_eq!(vec!["#t"], run("(= 2 (+ 1 1))"));
        assert_eq!(vec!["#f"], run("(= 2 3)"));
    }

    #[test]
    fn test_numeric_equal_rejects_non_numbers() {
        assert_eq!(
            vec!["Exception in =: x is not a number"],
            run("(= 'x 'x)")
        );
    }

    #[test]
    fn test_eq_on_symbols_and_nil() {
        assert_eq!(vec!["#t"], run("(eq? 'x 'x)"));
        assert_eq!(vec!["#f"], run("(eq? 'x 'y)"));
        assert_eq!(vec!["#t"], run("(eq? () ())"));
    }

    #[test]
    fn test_eq_is_conservative_elsewhere() {
        assert_eq!(vec!["#f"], run("(eq? 2 2)"));
        assert_eq!(vec!["#f"], run("(eq? (cons 1 2) (cons 1 2))"));
        assert_eq!(vec!["#f"], run("(eq? #t #t)"));
    }

    #[test]
    fn test_null_and_pair_predicates() {
        assert_eq!(vec!["#t"], run("(null? ())"));
        assert_eq!(vec!["#f"], run("(null? (cons 1 2))"));
        assert_eq!(vec!["#t"], run("(pair? (cons 1 2))"));
        assert_eq!(vec!["#f"], run("(pair? 1)"));
    }

    #[test]
    fn test_not_uses_falseyness() {
        assert_eq!(vec!["#t"], run("(not #f)"));
        assert_eq!(vec!["#t"], run("(not ())"));
        assert_eq!(vec!["#f"], run("(not #t)"));
        assert_eq!(vec!["#f"], run("(not 0)"));
    }

    #[test]
    fn test_zero_predicate_is_identity_with_the_zero_atom() {
        assert_eq!(vec!["#t"], run("(zero? 0)"));
        assert_eq!(vec!["#f"], run("(zero? 0.0)"));
        assert_eq!(vec!["#f"], run("(zero? 1)"));
        assert_eq!(vec!["#f"], run("(zero? 'x)"));
    }

    #[test]
    fn test_number_predicate() {
        assert_eq!(vec!["#t"], run("(number? 3)"));
        assert_eq!(vec!["#t"], run("(number? 3.5)"));
        assert_eq!(vec!["#f"], run("(number? 'x)"));
        assert_eq!(vec!["#f"], run("(number? ())"));
    }
}
