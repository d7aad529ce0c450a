//! Lookup tables

/// `F(0)` through `F(20)`
pub const FIBONACCI: [u64; 21] = [
    0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987, 1597, 2584, 4181, 6765,
];

/// `B(0)` through `B(15)`
pub const BELL: [u64; 16] = [
    1,
    1,
    2,
    5,
    15,
    52,
    203,
    877,
    4140,
    21147,
    115975,
    678570,
    4213597,
    27644437,
    190899322,
    1382958545,
];

/// Bernoulli numbers `B(2k)` for `k = 1..=10`, as `(numerator, denominator)`.
pub const BERNOULLI: [(i64, i64); 10] = [
    (1, 6),
    (-1, 30),
    (1, 42),
    (-1, 30),
    (5, 66),
    (-691, 2730),
    (7, 6),
    (-3617, 510),
    (43867, 798),
    (-174611, 330),
];

/// Magnitude of the first Stirling-series term not summed, times `z^21`.
pub const STIRLING_TAIL: f64 = 13.5;

/// Largest power result, in decimal digits, computed exactly.
pub const MAX_POWER_DIGITS: usize = 1_000_000;

/// Arguments of `exp` beyond this magnitude saturate.
pub const MAX_EXP_ARGUMENT: i64 = 1_000_000;

/// Root degrees above this use `exp(ln(x)/n)` instead of Halley's method.
pub const MAX_HALLEY_DEGREE: u32 = 10_000;

pub const MAX_ROOT_ITERATIONS: usize = 200;

/// Largest `n` for the quadratic recurrences (Stirling, Bell).
pub const MAX_RECURRENCE_ORDER: usize = 100_000;

/// Smallest argument the Stirling series for `ln Γ` is summed at.
pub const STIRLING_MIN_ARGUMENT: f64 = 30.0;
