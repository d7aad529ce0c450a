//! Named constants, written as zero-argument calls

use quotient_plugin::prelude::*;

const CATEGORY: &str = "constants";

pub const FUNCTIONS: &[Builtin] = &[
    builtin!("true" | "yes", Arity::Exact(0), CATEGORY, "Logical true", "true", ["true && false"], truth),
    builtin!("false" | "no", Arity::Exact(0), CATEGORY, "Logical false", "false", ["!false"], falsity),
    builtin!("phi" | "ϕ", Arity::Exact(0), CATEGORY, "Golden ratio (1 + √5)/2", "phi", ["phi^2 - phi"], phi),
    builtin!("pi" | "π" | "tau_2", Arity::Exact(0), CATEGORY, "π", "pi", ["2pi"], pi),
    builtin!("pi_2" | "tau_4", Arity::Exact(0), CATEGORY, "π/2", "pi_2", ["sin(pi_2)"], half_pi),
    builtin!("pi_4" | "tau_8", Arity::Exact(0), CATEGORY, "π/4", "pi_4", ["tan(pi_4)"], quarter_pi),
    builtin!("tau" | "τ", Arity::Exact(0), CATEGORY, "τ = 2π", "tau", ["tau/2"], tau),
    builtin!("sqrt2", Arity::Exact(0), CATEGORY, "√2", "sqrt2", ["sqrt2^2"], sqrt2),
    builtin!("e", Arity::Exact(0), CATEGORY, "Euler's number", "e", ["ln(e)"], e),
    builtin!("log2e", Arity::Exact(0), CATEGORY, "log2(e)", "log2e", ["log2e"], log2e),
    builtin!("log10e", Arity::Exact(0), CATEGORY, "log10(e)", "log10e", ["log10e"], log10e),
    builtin!("ln2", Arity::Exact(0), CATEGORY, "ln(2)", "ln2", ["ln2"], ln2),
    builtin!("ln10", Arity::Exact(0), CATEGORY, "ln(10)", "ln10", ["ln10"], ln10),
];

fn truth(_state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(Value::from(true))
}

fn falsity(_state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(Value::from(false))
}

fn phi(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().phi().into())
}

fn pi(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().pi().into())
}

fn half_pi(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().pi().div(&Number::from_i64(2)).into())
}

fn quarter_pi(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().pi().div(&Number::from_i64(4)).into())
}

fn tau(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().tau().into())
}

fn sqrt2(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().sqrt2().into())
}

fn e(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().e().into())
}

fn log2e(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().log2e().into())
}

fn log10e(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().log10e().into())
}

fn ln2(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().ln2().into())
}

fn ln10(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().ln10().into())
}
