//! Circular, hyperbolic and geometric functions
//!
//! Circular functions read their argument in the evaluation's angle mode.
//! Reciprocal functions raise `DivideByZero` where the underlying function
//! vanishes exactly.

use quotient_plugin::prelude::*;

const CATEGORY: &str = "trigonometry";

pub const FUNCTIONS: &[Builtin] = &[
    builtin!("sin", Arity::Exact(1), CATEGORY, "Sine", "sin(x)", ["sin(pi/6)", "sin(1)"], sin),
    builtin!("cos", Arity::Exact(1), CATEGORY, "Cosine", "cos(x)", ["cos(pi/3)"], cos),
    builtin!("tan", Arity::Exact(1), CATEGORY, "Tangent; NaN where the cosine is zero", "tan(x)", ["tan(pi/4)"], tan),
    builtin!("csc", Arity::Exact(1), CATEGORY, "Cosecant 1/sin x", "csc(x)", ["csc(pi/6)"], csc),
    builtin!("sec", Arity::Exact(1), CATEGORY, "Secant 1/cos x", "sec(x)", ["sec(pi/3)"], sec),
    builtin!("cotan", Arity::Exact(1), CATEGORY, "Cotangent cos x / sin x", "cotan(x)", ["cotan(pi/4)"], cotan),
    builtin!("sinh", Arity::Exact(1), CATEGORY, "Hyperbolic sine", "sinh(x)", ["sinh(1)"], sinh),
    builtin!("cosh", Arity::Exact(1), CATEGORY, "Hyperbolic cosine", "cosh(x)", ["cosh(1)"], cosh),
    builtin!("tanh", Arity::Exact(1), CATEGORY, "Hyperbolic tangent", "tanh(x)", ["tanh(1)"], tanh),
    builtin!("csch", Arity::Exact(1), CATEGORY, "Hyperbolic cosecant", "csch(x)", ["csch(1)"], csch),
    builtin!("sech", Arity::Exact(1), CATEGORY, "Hyperbolic secant", "sech(x)", ["sech(1)"], sech),
    builtin!("cotanh", Arity::Exact(1), CATEGORY, "Hyperbolic cotangent", "cotanh(x)", ["cotanh(1)"], cotanh),
    builtin!(
        "asinh" | "arsinh" | "sinh⁻¹",
        Arity::Exact(1),
        CATEGORY,
        "Inverse hyperbolic sine",
        "asinh(x)",
        ["asinh(1)"],
        asinh,
    ),
    builtin!(
        "acosh" | "arcosh" | "cosh⁻¹",
        Arity::Exact(1),
        CATEGORY,
        "Inverse hyperbolic cosine, x ≥ 1",
        "acosh(x)",
        ["acosh(2)"],
        acosh,
    ),
    builtin!(
        "atanh" | "artanh" | "tanh⁻¹",
        Arity::Exact(1),
        CATEGORY,
        "Inverse hyperbolic tangent, |x| < 1",
        "atanh(x)",
        ["atanh(1/2)"],
        atanh,
    ),
    builtin!(
        "acsch" | "arcsch" | "csch⁻¹",
        Arity::Exact(1),
        CATEGORY,
        "Inverse hyperbolic cosecant",
        "acsch(x)",
        ["acsch(2)"],
        acsch,
    ),
    builtin!(
        "asech" | "arsech" | "sech⁻¹",
        Arity::Exact(1),
        CATEGORY,
        "Inverse hyperbolic secant, 0 < x ≤ 1",
        "asech(x)",
        ["asech(1/2)"],
        asech,
    ),
    builtin!(
        "acotanh" | "arcotanh" | "cotanh⁻¹",
        Arity::Exact(1),
        CATEGORY,
        "Inverse hyperbolic cotangent, |x| > 1",
        "acotanh(x)",
        ["acotanh(2)"],
        acotanh,
    ),
    builtin!("versin" | "vers" | "ver", Arity::Exact(1), CATEGORY, "Versine 1 - cos x", "versin(x)", ["versin(pi/3)"], versin),
    builtin!("vercosin" | "vercos", Arity::Exact(1), CATEGORY, "Vercosine 1 + cos x", "vercosin(x)", ["vercosin(pi/3)"], vercosin),
    builtin!("coversin" | "cvs", Arity::Exact(1), CATEGORY, "Coversine 1 - sin x", "coversin(x)", ["coversin(pi/6)"], coversin),
    builtin!(
        "covercosin" | "covercos",
        Arity::Exact(1),
        CATEGORY,
        "Covercosine 1 + sin x",
        "covercosin(x)",
        ["covercosin(pi/6)"],
        covercosin,
    ),
    builtin!("haversin", Arity::Exact(1), CATEGORY, "Haversine (1 - cos x)/2", "haversin(x)", ["haversin(pi/3)"], haversin),
    builtin!(
        "havercosin" | "havercos",
        Arity::Exact(1),
        CATEGORY,
        "Havercosine (1 + cos x)/2",
        "havercosin(x)",
        ["havercosin(pi/3)"],
        havercosin,
    ),
    builtin!("hacoversin", Arity::Exact(1), CATEGORY, "Hacoversine (1 - sin x)/2", "hacoversin(x)", ["hacoversin(pi/6)"], hacoversin),
    builtin!(
        "hacovercosin" | "hacovercos",
        Arity::Exact(1),
        CATEGORY,
        "Hacovercosine (1 + sin x)/2",
        "hacovercosin(x)",
        ["hacovercosin(pi/6)"],
        hacovercosin,
    ),
    builtin!("exsec", Arity::Exact(1), CATEGORY, "Exsecant sec x - 1", "exsec(x)", ["exsec(pi/3)"], exsec),
    builtin!("excsc", Arity::Exact(1), CATEGORY, "Excosecant csc x - 1", "excsc(x)", ["excsc(pi/6)"], excsc),
    builtin!("crd" | "chord", Arity::Exact(1), CATEGORY, "Chord 2·sin(x/2)", "crd(x)", ["crd(pi/3)"], crd),
    builtin!("dtor", Arity::Exact(1), CATEGORY, "Degrees to radians", "dtor(x)", ["dtor(180)"], dtor),
    builtin!("rtod", Arity::Exact(1), CATEGORY, "Radians to degrees", "rtod(x)", ["rtod(pi)"], rtod),
];

fn two() -> Number {
    Number::from_i64(2)
}

/// `1/value`, or `DivideByZero` at this call.
fn reciprocal(state: &EvaluationState, value: Number) -> Result<Number, EvalError> {
    if value.is_zero() {
        return Err(state.error(ErrorKind::DivideByZero));
    }
    Ok(value.recip())
}

/// Argument of the inverse reciprocal functions; zero is `DivideByZero`.
fn nonzero(state: &EvaluationState) -> Result<Number, EvalError> {
    let x = state.number(0)?;
    if x.is_zero() {
        return Err(state.error(ErrorKind::DivideByZero));
    }
    Ok(x)
}

// ========== Circular ==========

fn sin(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().sin(&state.number(0)?).into())
}

fn cos(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().cos(&state.number(0)?).into())
}

fn tan(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().tan(&state.number(0)?).into())
}

fn csc(state: &EvaluationState) -> Result<Value, EvalError> {
    let sine = state.computation().sin(&state.number(0)?);
    Ok(reciprocal(state, sine)?.into())
}

fn sec(state: &EvaluationState) -> Result<Value, EvalError> {
    let cosine = state.computation().cos(&state.number(0)?);
    Ok(reciprocal(state, cosine)?.into())
}

fn cotan(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = state.number(0)?;
    let computation = state.computation();
    let inverse_sine = reciprocal(state, computation.sin(&x))?;
    Ok(computation.cos(&x).mul(&inverse_sine).into())
}

// ========== Hyperbolic ==========

fn sinh(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().sinh(&state.number(0)?).into())
}

fn cosh(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().cosh(&state.number(0)?).into())
}

fn tanh(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().tanh(&state.number(0)?).into())
}

fn csch(state: &EvaluationState) -> Result<Value, EvalError> {
    let value = state.computation().sinh(&state.number(0)?);
    Ok(reciprocal(state, value)?.into())
}

fn sech(state: &EvaluationState) -> Result<Value, EvalError> {
    let value = state.computation().cosh(&state.number(0)?);
    Ok(reciprocal(state, value)?.into())
}

fn cotanh(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = state.number(0)?;
    let computation = state.computation();
    let inverse_sinh = reciprocal(state, computation.sinh(&x))?;
    Ok(computation.cosh(&x).mul(&inverse_sinh).into())
}

fn asinh(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().asinh(&state.number(0)?).into())
}

fn acosh(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().acosh(&state.number(0)?).into())
}

fn atanh(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().atanh(&state.number(0)?).into())
}

fn acsch(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = nonzero(state)?;
    Ok(state.computation().acsch(&x).into())
}

fn asech(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = nonzero(state)?;
    Ok(state.computation().asech(&x).into())
}

fn acotanh(state: &EvaluationState) -> Result<Value, EvalError> {
    let x = nonzero(state)?;
    Ok(state.computation().acotanh(&x).into())
}

// ========== Geometric ==========

fn versin(state: &EvaluationState) -> Result<Value, EvalError> {
    let cosine = state.computation().cos(&state.number(0)?);
    Ok(Number::one().sub(&cosine).into())
}

fn vercosin(state: &EvaluationState) -> Result<Value, EvalError> {
    let cosine = state.computation().cos(&state.number(0)?);
    Ok(Number::one().add(&cosine).into())
}

fn coversin(state: &EvaluationState) -> Result<Value, EvalError> {
    let sine = state.computation().sin(&state.number(0)?);
    Ok(Number::one().sub(&sine).into())
}

fn covercosin(state: &EvaluationState) -> Result<Value, EvalError> {
    let sine = state.computation().sin(&state.number(0)?);
    Ok(Number::one().add(&sine).into())
}

/// Half of a versine-family value.
fn halved(value: Result<Value, EvalError>) -> Result<Value, EvalError> {
    Ok(EvaluationState::numeric(value?).div(&two()).into())
}

fn haversin(state: &EvaluationState) -> Result<Value, EvalError> {
    halved(versin(state))
}

fn havercosin(state: &EvaluationState) -> Result<Value, EvalError> {
    halved(vercosin(state))
}

fn hacoversin(state: &EvaluationState) -> Result<Value, EvalError> {
    halved(coversin(state))
}

fn hacovercosin(state: &EvaluationState) -> Result<Value, EvalError> {
    halved(covercosin(state))
}

fn exsec(state: &EvaluationState) -> Result<Value, EvalError> {
    let cosine = state.computation().cos(&state.number(0)?);
    Ok(reciprocal(state, cosine)?.sub(&Number::one()).into())
}

fn excsc(state: &EvaluationState) -> Result<Value, EvalError> {
    let sine = state.computation().sin(&state.number(0)?);
    Ok(reciprocal(state, sine)?.sub(&Number::one()).into())
}

fn crd(state: &EvaluationState) -> Result<Value, EvalError> {
    let half = state.number(0)?.div(&two());
    Ok(state.computation().sin(&half).mul(&two()).into())
}

// ========== Conversions ==========

fn dtor(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().to_radians(&state.number(0)?).into())
}

fn rtod(state: &EvaluationState) -> Result<Value, EvalError> {
    Ok(state.computation().from_radians(&state.number(0)?).into())
}
