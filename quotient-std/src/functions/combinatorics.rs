//! Counting functions, integer sequences and number theory

use quotient_plugin::prelude::*;

const CATEGORY: &str = "combinatorics";

pub const FUNCTIONS: &[Builtin] = &[
    builtin!(
        "factorial",
        Arity::Exact(1),
        CATEGORY,
        "n! for integers, Γ(x+1) otherwise",
        "factorial(x)",
        ["5!", "0.5!"],
        factorial,
    ),
    builtin!(
        "factorial2",
        Arity::Exact(1),
        CATEGORY,
        "Double factorial n·(n-2)·(n-4)··· of an integer n ≥ 1",
        "factorial2(n)",
        ["7!!", "factorial2(8)"],
        factorial2,
    ),
    builtin!(
        "C" | "choose",
        Arity::Exact(2),
        CATEGORY,
        "Binomial coefficient: k-element subsets of n elements",
        "C(n, k)",
        ["C(5, 2)"],
        choose,
    ),
    builtin!(
        "P" | "variations",
        Arity::Exact(2),
        CATEGORY,
        "Variations n!/(n-k)!: ordered k-element selections",
        "P(n, k)",
        ["P(5, 2)"],
        variations,
    ),
    builtin!(
        "p" | "prime",
        Arity::Exact(1),
        CATEGORY,
        "Primality test",
        "p(n)",
        ["p(97)", "prime(91)"],
        prime,
    ),
    builtin!(
        "s" | "StirlingS1",
        Arity::Exact(2),
        CATEGORY,
        "Unsigned Stirling numbers of the first kind: permutations with k cycles",
        "s(n, k)",
        ["s(5, 2)"],
        stirling_cycles,
    ),
    builtin!(
        "S" | "StirlingS2",
        Arity::Exact(2),
        CATEGORY,
        "Stirling numbers of the second kind: partitions into k sets",
        "S(n, k)",
        ["S(5, 2)"],
        stirling_partitions,
    ),
    builtin!(
        "lah",
        Arity::Exact(2),
        CATEGORY,
        "Lah numbers: partitions into k nonempty ordered lists",
        "lah(n, k)",
        ["lah(5, 2)"],
        lah,
    ),
    builtin!(
        "derivative",
        Arity::Exact(1),
        CATEGORY,
        "Arithmetic derivative, p' = 1 for primes with the Leibniz rule",
        "derivative(x)",
        ["derivative(360)", "derivative(1/2)"],
        derivative,
    ),
    builtin!(
        "factor",
        Arity::Exact(1),
        CATEGORY,
        "Prime factorization of an integer",
        "factor(n)",
        ["factor(360)", "factor(-12)"],
        factor,
    ),
    builtin!(
        "fibonacci" | "F",
        Arity::Exact(1),
        CATEGORY,
        "Fibonacci numbers, negative indices included",
        "fibonacci(n)",
        ["F(100)", "F(-8)"],
        fibonacci,
    ),
    builtin!(
        "lucas" | "L",
        Arity::Exact(1),
        CATEGORY,
        "Lucas numbers L(n) = F(n-1) + F(n+1)",
        "lucas(n)",
        ["L(10)"],
        lucas,
    ),
    builtin!(
        "catalan",
        Arity::Exact(1),
        CATEGORY,
        "Catalan numbers C(2n, n)/(n+1)",
        "catalan(n)",
        ["catalan(10)"],
        catalan,
    ),
    builtin!(
        "B" | "bell",
        Arity::Exact(1),
        CATEGORY,
        "Bell numbers: partitions of an n-element set",
        "B(n)",
        ["B(10)"],
        bell,
    ),
];

fn factorial(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = state.number(0)?;
    Ok(state.computation().factorial(&x).into())
}

fn factorial2(state: &EvaluationState) -> Result<Value, EvalError> {
    let n = state
        .number(0)?
        .to_integer()
        .filter(|n| *n >= IBig::ONE)
        .ok_or_else(|| state.error(ErrorKind::InvalidArguments))?;
    Ok(state.computation().factorial2(&n).into())
}

/// Both arguments as nonnegative integers.
fn pair(state: &EvaluationState) -> Result<(IBig, IBig), EvalError> {
    Ok((state.natural(0)?, state.natural(1)?))
}

fn choose(state: &EvaluationState) -> Result<Value, EvalError> {
    let (n, k) = pair(state)?;
    Ok(state.computation().binomial(&n, &k).into())
}

fn variations(state: &EvaluationState) -> Result<Value, EvalError> {
    let (n, k) = pair(state)?;
    Ok(state.computation().variations(&n, &k).into())
}

/// Non-integers are not prime.
fn prime(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(match state.number(0)?.to_integer() {
        Some(n) => state.computation().is_prime(&n).into(),
        None => Value::from(false),
    })
}

fn stirling_cycles(state: &EvaluationState) -> Result<Value, EvalError> {
    let (n, k) = pair(state)?;
    Ok(state.computation().stirling_cycles(&n, &k).into())
}

fn stirling_partitions(state: &EvaluationState) -> Result<Value, EvalError> {
    let (n, k) = pair(state)?;
    Ok(state.computation().stirling_partitions(&n, &k).into())
}

fn lah(state: &EvaluationState) -> Result<Value, EvalError> {
    let (n, k) = pair(state)?;
    Ok(state.computation().lah(&n, &k).into())
}

fn derivative(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = state.number(0)?;
    Ok(state.computation().derivative(&x).into())
}

fn factor(state: &EvaluationState) -> Result<Value, EvalError> {
    let n = state.integer(0)?;
    let factorization = state.computation().factor(&n);
    if !factorization.is_complete() {
        tracing::debug!(%n, "factorization interrupted");
    }
    Ok(factorization.into())
}

fn fibonacci(state: &EvaluationState) -> Result<Value, EvalError> {
    let n = state.integer(0)?;
    Ok(state.computation().fibonacci(&n).into())
}

fn lucas(state: &EvaluationState) -> Result<Value, EvalError> {
    let n = state.integer(0)?;
    Ok(state.computation().lucas(&n).into())
}

fn catalan(state: &EvaluationState) -> Result<Value, EvalError> {
    let n = state.natural(0)?;
    Ok(state.computation().catalan(&n).into())
}

fn bell(state: &EvaluationState) -> Result<Value, EvalError> {
    let n = state.natural(0)?;
    Ok(state.computation().bell(&n).into())
}
