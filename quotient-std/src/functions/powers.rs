//! Powers, roots, exponentials and logarithms

use quotient_plugin::prelude::*;

const CATEGORY: &str = "powers";

pub const FUNCTIONS: &[Builtin] = &[
    builtin!(
        "pow",
        Arity::Between(2, 3),
        CATEGORY,
        "a^b; with a third integer argument, modular exponentiation a^b mod n",
        "pow(a, b) or pow(a, b, n)",
        ["2^10", "pow(2, 1/2)", "pow(4, 13, 497)"],
        pow,
    ),
    builtin!(
        "tetr" | "tetration",
        Arity::Exact(2),
        CATEGORY,
        "Tetration a↑↑n: a tower of n copies of a",
        "tetr(a, n)",
        ["tetr(2, 4)"],
        tetration,
    ),
    builtin!("sqrt", Arity::Exact(1), CATEGORY, "Square root", "sqrt(x)", ["sqrt(2)", "√16"], sqrt),
    builtin!("cuberoot", Arity::Exact(1), CATEGORY, "Real cube root", "cuberoot(x)", ["cuberoot(-27)"], cuberoot),
    builtin!(
        "nthroot",
        Arity::Exact(2),
        CATEGORY,
        "Real n-th root of x",
        "nthroot(n, x)",
        ["nthroot(5, 32)"],
        nthroot,
    ),
    builtin!(
        "log" | "lg",
        Arity::Between(1, 2),
        CATEGORY,
        "Logarithm to base 10, or to an integer base b",
        "log(x) or log(b, x)",
        ["log(1000)", "log(2, 1024)"],
        log,
    ),
    builtin!("ln", Arity::Exact(1), CATEGORY, "Natural logarithm", "ln(x)", ["ln(e)", "ln(2)"], ln),
    builtin!("log2" | "lb", Arity::Exact(1), CATEGORY, "Binary logarithm", "log2(x)", ["log2(1024)"], log2),
    builtin!("exp", Arity::Exact(1), CATEGORY, "e^x", "exp(x)", ["exp(1)"], exp),
];

fn pow(state: &EvaluationState) -> Result<Value, EvalError> {
    let computation = state.computation();
    if state.argument_count() == 3 {
        let mut integers = Vec::with_capacity(3);
        for index in 0..3 {
            let n = state.number(index)?.to_integer();
            integers.push(n.ok_or_else(|| state.error(ErrorKind::InvalidArguments))?);
        }
        return Ok(computation.mod_pow(&integers[0], &integers[1], &integers[2]).into());
    }
    let base = state.number(0)?;
    let exponent = state.number(1)?;
    Ok(computation.pow(&base, &exponent).into())
}

fn tetration(state: &EvaluationState) -> Result<Value, EvalError> {
    let a = state.number(0)?;
    let height = state
        .number(1)?
        .to_integer()
        .filter(|n| *n >= IBig::ZERO);
    match height {
        Some(n) if a.is_positive() => Ok(state.computation().tetration(&a, &n).into()),
        _ => Err(state.error(ErrorKind::InvalidArguments)),
    }
}

fn sqrt(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = state.number(0)?;
    if x.is_negative() {
        return Err(state.error(ErrorKind::ArgumentNotPositive));
    }
    Ok(state.computation().sqrt(&x).into())
}

fn cuberoot(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = state.number(0)?;
    Ok(state.computation().cbrt(&x).into())
}

fn nthroot(state: &EvaluationState) -> Result<Value, EvalError> {
    let n = state.positive_integer(0)?;
    let x = state.number(1)?;
    let n = u32::try_from(n).map_err(|_| state.error(ErrorKind::InvalidArguments))?;
    Ok(state.computation().root(&x, n).into())
}

fn log(state: &EvaluationState) -> Result<Value, EvalError> {
    let (base, x) = if state.argument_count() == 2 {
        (Number::from_integer(state.integer(0)?), state.number(1)?)
    } else {
        (Number::from_i64(10), state.number(0)?)
    };
    Ok(state.computation().log(&base, &x).into())
}

/// Logarithms of negative numbers are NaN.
fn ln(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = state.number(0)?;
    Ok(state.computation().ln(&x).into())
}

fn log2(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = state.number(0)?;
    Ok(state.computation().log(&Number::from_i64(2), &x).into())
}

fn exp(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = state.number(0)?;
    Ok(state.computation().exp(&x).into())
}
