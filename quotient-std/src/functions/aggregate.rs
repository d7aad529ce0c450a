//! Variadic aggregates and decimal formatting

use quotient_core::DEFAULT_DISPLAY_DECIMALS;
use quotient_plugin::prelude::*;
use std::cmp::Ordering;

const CATEGORY: &str = "aggregate";

pub const FUNCTIONS: &[Builtin] = &[
    builtin!("sum" | "∑", Arity::AtLeast(1), CATEGORY, "Sum of all arguments", "sum(a, b, ...)", ["sum(1, 2, 3)"], sum),
    builtin!(
        "product" | "∏",
        Arity::AtLeast(1),
        CATEGORY,
        "Product of all arguments",
        "product(a, b, ...)",
        ["product(1, 2, 3, 4)"],
        product,
    ),
    builtin!("count", Arity::AtLeast(0), CATEGORY, "Number of arguments", "count(a, b, ...)", ["count(1, 1, 1)"], count),
    builtin!("min", Arity::AtLeast(1), CATEGORY, "Smallest argument", "min(a, b, ...)", ["min(3, 1/2, 2)"], min),
    builtin!("max", Arity::AtLeast(1), CATEGORY, "Largest argument", "max(a, b, ...)", ["max(3, 1/2, 2)"], max),
    builtin!(
        "average" | "avg" | "mean",
        Arity::AtLeast(1),
        CATEGORY,
        "Arithmetic mean",
        "average(a, b, ...)",
        ["average(1, 2, 4)"],
        average,
    ),
    builtin!(
        "median",
        Arity::AtLeast(2),
        CATEGORY,
        "Middle value; mean of the two middle values for an even count",
        "median(a, b, ...)",
        ["median(5, 1, 3)", "median(4, 1, 3, 2)"],
        median,
    ),
    builtin!(
        "stddev",
        Arity::AtLeast(2),
        CATEGORY,
        "Population standard deviation",
        "stddev(a, b, ...)",
        ["stddev(2, 4, 4, 4, 5, 5, 7, 9)"],
        stddev,
    ),
    builtin!(
        "digits",
        Arity::Exact(1),
        CATEGORY,
        "Number of digits in the decimal expansion",
        "digits(x)",
        ["digits(12345)", "digits(1/3)"],
        digits,
    ),
    builtin!(
        "decimal",
        Arity::Exact(2),
        CATEGORY,
        "x truncated to n decimal places",
        "decimal(x, n)",
        ["decimal(1/3, 5)", "decimal(pi, 30)"],
        decimal,
    ),
];

fn total(numbers: &[Number]) -> Number {
    numbers.iter().fold(Number::zero(), |sum, n| sum.add(n))
}

fn mean(numbers: &[Number]) -> Number {
    total(numbers).div(&Number::from_i64(numbers.len() as i64))
}

fn sum(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(total(&state.numbers()?).into())
}

fn product(state: &EvaluationState) -> Result<Value, EvalError> {
    let numbers = state.numbers()?;
    Ok(numbers.iter().fold(Number::one(), |product, n| product.mul(n)).into())
}

fn count(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(Value::from(state.argument_count() as i64))
}

/// The argument that wins every comparison against `preferred`; NaN if any
/// argument is NaN.
fn extreme(state: &EvaluationState, preferred: Ordering) -> Result<Value, EvalError> {
    let numbers = state.numbers()?;
    if numbers.iter().any(Number::is_nan) {
        return Ok(Number::nan().into());
    }
    let best = numbers
        .into_iter()
        .reduce(|best, n| if n.partial_cmp(&best) == Some(preferred) { n } else { best });
    best.map(Value::from)
        .ok_or_else(|| state.error(ErrorKind::InvalidArguments))
}

fn min(state: &EvaluationState) -> Result<Value, EvalError> {
    extreme(state, Ordering::Less)
}

fn max(state: &EvaluationState) -> Result<Value, EvalError> {
    extreme(state, Ordering::Greater)
}

fn average(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(mean(&state.numbers()?).into())
}

fn median(state: &EvaluationState) -> Result<Value, EvalError> {
    let mut numbers = state.numbers()?;
    if numbers.iter().any(Number::is_nan) {
        return Ok(Number::nan().into());
    }
    numbers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let middle = numbers.len() / 2;
    let value = if numbers.len() % 2 == 1 {
        numbers[middle].clone()
    } else {
        mean(&numbers[middle - 1..=middle])
    };
    Ok(value.into())
}

fn stddev(state: &EvaluationState) -> Result<Value, EvalError> {
    let numbers = state.numbers()?;
    let average = mean(&numbers);
    let squares: Vec<Number> = numbers
        .iter()
        .map(|n| {
            let deviation = average.sub(n);
            deviation.mul(&deviation)
        })
        .collect();
    Ok(state.computation().sqrt(&mean(&squares)).into())
}

/// Characters of the decimal expansion at display precision, signs and
/// separators excluded.
fn digits(state: &EvaluationState) -> Result<Value, EvalError> {
    let (expansion, _) = state.number(0)?.decimal_expansion(DEFAULT_DISPLAY_DECIMALS);
    let count = expansion.chars().filter(|c| !matches!(c, '.' | '-' | '/')).count();
    Ok(Value::from(count as i64))
}

/// Truncated to `n` decimals; approximate unless the expansion ends there.
fn decimal(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = state.number(0)?;
    let places = state.positive_integer(1)?;
    let places = usize::try_from(places).map_err(|_| state.error(ErrorKind::InvalidArguments))?;
    let (expansion, exact) = x.decimal_expansion(places);
    let value: Number = expansion
        .parse()
        .map_err(|_| state.error(ErrorKind::InvalidArguments))?;
    Ok(value.with_approximation(x.is_approximation() || !exact).into())
}
