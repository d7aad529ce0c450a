//! Basic arithmetic and rounding

use quotient_plugin::prelude::*;

const CATEGORY: &str = "arithmetic";

pub const FUNCTIONS: &[Builtin] = &[
    builtin!("add", Arity::Exact(2), CATEGORY, "Sum of two numbers", "add(a, b)", ["1/3 + 1/6"], add),
    builtin!(
        "subtract",
        Arity::Exact(2),
        CATEGORY,
        "Difference of two numbers",
        "subtract(a, b)",
        ["5 - 7"],
        subtract,
    ),
    builtin!(
        "multiply" | "implicitMultiply",
        Arity::Exact(2),
        CATEGORY,
        "Product of two numbers",
        "multiply(a, b)",
        ["2 * 3", "2pi"],
        multiply,
    ),
    builtin!(
        "divide",
        Arity::Exact(2),
        CATEGORY,
        "Exact quotient; division by zero is NaN",
        "divide(a, b)",
        ["1 / 3", "1 / 0"],
        divide,
    ),
    builtin!(
        "mod" | "modulo",
        Arity::Exact(2),
        CATEGORY,
        "Floored remainder a - n·floor(a/n), with the sign of n",
        "mod(a, n)",
        ["mod(7, 3)", "mod(-7, 3)"],
        modulo,
    ),
    builtin!("negate", Arity::Exact(1), CATEGORY, "Additive inverse", "negate(x)", ["-5"], negate),
    builtin!("abs", Arity::Exact(1), CATEGORY, "Absolute value", "abs(x)", ["abs(-3/4)"], abs),
    builtin!(
        "percent",
        Arity::Exact(1),
        CATEGORY,
        "n/100, or n percent of X in X + n% and X - n%",
        "percent(n)",
        ["50%", "200 + 10%"],
        percent,
    ),
    builtin!(
        "gcd",
        Arity::Exact(2),
        CATEGORY,
        "Greatest common divisor of two positive integers",
        "gcd(a, b)",
        ["gcd(84, 36)"],
        gcd,
    ),
    builtin!("ceil", Arity::Exact(1), CATEGORY, "Round toward +∞", "ceil(x)", ["ceil(7/2)", "ceil(-7/2)"], ceil),
    builtin!("floor", Arity::Exact(1), CATEGORY, "Round toward -∞", "floor(x)", ["floor(7/2)", "floor(-7/2)"], floor),
    builtin!("trunc", Arity::Exact(1), CATEGORY, "Round toward zero", "trunc(x)", ["trunc(-7/2)"], trunc),
];

fn add(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.number(0)?.add(&state.number(1)?).into())
}

fn subtract(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.number(0)?.sub(&state.number(1)?).into())
}

fn multiply(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.number(0)?.mul(&state.number(1)?).into())
}

/// Floor division in the discrete domain.
fn divide(state: &EvaluationState) -> Result<Value, EvalError> {
    let quotient = state.number(0)?.div(&state.number(1)?);
    Ok(if state.is_discrete() { quotient.floor() } else { quotient }.into())
}

fn modulo(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.number(0)?.modulo(&state.number(1)?).into())
}

fn negate(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.number(0)?.neg().into())
}

fn abs(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.number(0)?.abs().into())
}

/// `X + n%` and `X - n%` scale by X; the percent call must be the right
/// operand for that.
fn percent(state: &EvaluationState) -> Result<Value, EvalError> {
    let fraction = state.number(0)?.div(&Number::from_i64(100));
    let Some(parent) = state.parent().filter(|p| p.is_call_to(&["add", "subtract"])) else {
        return Ok(fraction.into());
    };
    match parent.arguments() {
        [base, operand] if std::ptr::eq(operand, state.expression()) => {
            let base = EvaluationState::numeric(state.evaluate_node(base, Some(parent))?);
            Ok(base.mul(&fraction).into())
        }
        _ => Ok(fraction.into()),
    }
}

fn gcd(state: &EvaluationState) -> Result<Value, EvalError> {
    let a = state.positive_integer(0)?;
    let b = state.positive_integer(1)?;
    Ok(state.computation().gcd(&a, &b).into())
}

fn ceil(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.number(0)?.ceil().into())
}

fn floor(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.number(0)?.floor().into())
}

fn trunc(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.number(0)?.trunc().into())
}
