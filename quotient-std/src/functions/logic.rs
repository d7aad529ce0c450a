//! Logical connectives, comparisons and the conditional

use quotient_plugin::prelude::*;

const CATEGORY: &str = "logic";

pub const FUNCTIONS: &[Builtin] = &[
    builtin!("l_and", Arity::Exact(2), CATEGORY, "Logical and", "l_and(p, q)", ["true && false"], and),
    builtin!("l_or", Arity::Exact(2), CATEGORY, "Logical or", "l_or(p, q)", ["true || false"], or),
    builtin!("l_not", Arity::Exact(1), CATEGORY, "Logical negation", "l_not(p)", ["!true"], not),
    builtin!("l_impl", Arity::Exact(2), CATEGORY, "Implication p → q", "l_impl(p, q)", ["l_impl(true, false)"], implication),
    builtin!("l_eqv", Arity::Exact(2), CATEGORY, "Equivalence p ↔ q", "l_eqv(p, q)", ["l_eqv(false, false)"], equivalence),
    builtin!("l_eq", Arity::Exact(2), CATEGORY, "Equality; NaN equals nothing", "l_eq(a, b)", ["1/2 == 0.5"], equal),
    builtin!("l_neq", Arity::Exact(2), CATEGORY, "Inequality", "l_neq(a, b)", ["1 != 2"], not_equal),
    builtin!("l_lt", Arity::Exact(2), CATEGORY, "Less than", "l_lt(a, b)", ["1/3 < 1/2"], less),
    builtin!("l_gt", Arity::Exact(2), CATEGORY, "Greater than", "l_gt(a, b)", ["2 > 1"], greater),
    builtin!("l_ltoe", Arity::Exact(2), CATEGORY, "Less than or equal", "l_ltoe(a, b)", ["2 <= 2"], less_or_equal),
    builtin!("l_gtoe", Arity::Exact(2), CATEGORY, "Greater than or equal", "l_gtoe(a, b)", ["3 >= 2"], greater_or_equal),
    builtin!(
        "l_if" | "if",
        Arity::Exact(3),
        CATEGORY,
        "Evaluates only the branch the condition selects",
        "if(condition, then, else)",
        ["if(1 < 2, 10, 1/0)"],
        conditional,
    ),
];

fn logical_pair(state: &EvaluationState) -> Result<(bool, bool), EvalError> {
    Ok((state.logical(0)?, state.logical(1)?))
}

fn and(state: &EvaluationState) -> Result<Value, EvalError> {
    let (p, q) = logical_pair(state)?;
    Ok(Value::from(p && q))
}

fn or(state: &EvaluationState) -> Result<Value, EvalError> {
    let (p, q) = logical_pair(state)?;
    Ok(Value::from(p || q))
}

fn not(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(Value::from(!state.logical(0)?))
}

fn implication(state: &EvaluationState) -> Result<Value, EvalError> {
    let (p, q) = logical_pair(state)?;
    Ok(Value::from(!p || q))
}

fn equivalence(state: &EvaluationState) -> Result<Value, EvalError> {
    let (p, q) = logical_pair(state)?;
    Ok(Value::from(p == q))
}

fn compare(state: &EvaluationState, test: fn(&Number, &Number) -> bool) -> Result<Value, EvalError> {
    let a = state.number(0)?;
    let b = state.number(1)?;
    Ok(Value::from(test(&a, &b)))
}

fn equal(state: &EvaluationState) -> Result<Value, EvalError> {
    compare(state, |a, b| a == b)
}

fn not_equal(state: &EvaluationState) -> Result<Value, EvalError> {
    compare(state, |a, b| a != b)
}

fn less(state: &EvaluationState) -> Result<Value, EvalError> {
    compare(state, |a, b| a < b)
}

fn greater(state: &EvaluationState) -> Result<Value, EvalError> {
    compare(state, |a, b| a > b)
}

fn less_or_equal(state: &EvaluationState) -> Result<Value, EvalError> {
    compare(state, |a, b| a <= b)
}

fn greater_or_equal(state: &EvaluationState) -> Result<Value, EvalError> {
    compare(state, |a, b| a >= b)
}

fn conditional(state: &EvaluationState) -> Result<Value, EvalError> {
    let branch = if state.logical(0)? { 1 } else { 2 };
    state.evaluate(branch)
}
