//! Bitwise operations on two's complement integers

use quotient_plugin::prelude::*;

const CATEGORY: &str = "bitwise";

/// Shifts producing more bits than this are NaN.
const MAX_SHIFT: usize = 1 << 24;

pub const FUNCTIONS: &[Builtin] = &[
    builtin!("and", Arity::Exact(2), CATEGORY, "Bitwise and", "and(a, b)", ["12 & 10"], and),
    builtin!("or", Arity::Exact(2), CATEGORY, "Bitwise or", "or(a, b)", ["12 | 10"], or),
    builtin!("xor", Arity::Exact(2), CATEGORY, "Bitwise exclusive or", "xor(a, b)", ["xor(12, 10)"], xor),
    builtin!("not", Arity::Exact(1), CATEGORY, "Bitwise complement, -n - 1", "not(n)", ["~5"], not),
    builtin!("lshift", Arity::Exact(2), CATEGORY, "Shift left by k bits", "lshift(n, k)", ["1 << 10"], lshift),
    builtin!("rshift", Arity::Exact(2), CATEGORY, "Shift right by k bits, rounding down", "rshift(n, k)", ["1024 >> 3"], rshift),
];

fn operands(state: &EvaluationState) -> Result<(IBig, IBig), EvalError> {
    Ok((state.integer(0)?, state.integer(1)?))
}

fn and(state: &EvaluationState) -> Result<Value, EvalError> {
    let (a, b) = operands(state)?;
    Ok(Number::from_integer(a & b).into())
}

fn or(state: &EvaluationState) -> Result<Value, EvalError> {
    let (a, b) = operands(state)?;
    Ok(Number::from_integer(a | b).into())
}

fn xor(state: &EvaluationState) -> Result<Value, EvalError> {
    let (a, b) = operands(state)?;
    Ok(Number::from_integer(a ^ b).into())
}

fn not(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(Number::from_integer(!state.integer(0)?).into())
}

fn lshift(state: &EvaluationState) -> Result<Value, EvalError> {
    let (n, k) = operands(state)?;
    Ok(shift(n, k).into())
}

fn rshift(state: &EvaluationState) -> Result<Value, EvalError> {
    let (n, k) = operands(state)?;
    Ok(shift(n, -k).into())
}

/// `n·2^k`, flooring for negative `k`.
fn shift(n: IBig, k: IBig) -> Number {
    let left = k >= IBig::ZERO;
    let amount = usize::try_from(if left { k } else { -k }).ok();
    match amount {
        Some(bits) if left && bits <= MAX_SHIFT => Number::from_integer(n << bits),
        Some(bits) if !left => Number::from_integer(n >> bits),
        // everything is shifted out
        None if !left => Number::from_integer(if n < IBig::ZERO { -IBig::ONE } else { IBig::ZERO }),
        _ => {
            tracing::debug!("shift too large");
            Number::nan()
        }
    }
}
