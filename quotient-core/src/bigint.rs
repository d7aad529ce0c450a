//! Big integer helpers
//!
//! dashu supplies exact integer arithmetic and modular rings. Euclid's gcd,
//! the Miller-Rabin rounds and exact roots are built on top of those here.

use dashu_base::{Abs, Signed, UnsignedAbs};
use dashu_int::{fast_div::ConstDivisor, IBig, UBig};

/// Bases for Miller-Rabin. Deterministic below 3.3 * 10^24.
const WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

pub fn abs(value: &IBig) -> IBig {
    value.clone().abs()
}

pub fn is_negative(value: &IBig) -> bool {
    Signed::is_negative(value)
}

pub fn is_even(value: &IBig) -> bool {
    (value % IBig::from(2u8)).is_zero()
}

/// Greatest common divisor by Euclid's algorithm. Always nonnegative.
pub fn gcd(a: &IBig, b: &IBig) -> IBig {
    let mut a = abs(a);
    let mut b = abs(b);
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Remainder in `[0, |modulus|)`.
pub fn floor_mod(value: &IBig, modulus: &IBig) -> IBig {
    let m = abs(modulus);
    let r = value % &m;
    if is_negative(&r) {
        r + m
    } else {
        r
    }
}

/// `base^exponent mod modulus`, in dashu's modular ring.
///
/// Returns `None` for a zero modulus or a negative exponent.
pub fn mod_pow(base: &IBig, exponent: &IBig, modulus: &IBig) -> Option<IBig> {
    if modulus.is_zero() || is_negative(exponent) {
        return None;
    }
    let m = modulus.clone().unsigned_abs();
    if m.is_one() {
        return Some(IBig::ZERO);
    }
    let ring = ConstDivisor::new(m);
    let exponent: UBig = exponent.clone().unsigned_abs();
    Some(IBig::from(ring.reduce(base.clone()).pow(&exponent).residue()))
}

/// Miller-Rabin primality test.
pub fn is_probable_prime(n: &IBig) -> bool {
    let two = IBig::from(2u8);
    if *n < two {
        return false;
    }
    for w in WITNESSES {
        let p = IBig::from(w);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - IBig::ONE;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while is_even(&d) {
        d = d / &two;
        s += 1;
    }
    let d: UBig = d.unsigned_abs();

    let ring = ConstDivisor::new(n.clone().unsigned_abs());
    let one = ring.reduce(1u8);
    let minus_one = ring.reduce(n_minus_one);
    'witness: for w in WITNESSES {
        let mut x = ring.reduce(w).pow(&d);
        if x == one || x == minus_one {
            continue;
        }
        for _ in 1..s {
            x = &x * &x;
            if x == minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Number of decimal digits of `|value|` (zero has one digit).
pub fn decimal_digits(value: &IBig) -> usize {
    abs(value).to_string().len()
}

/// `floor(value^(1/k))` for nonnegative `value` by integer Newton iteration.
pub fn nth_root_floor(value: &IBig, k: u32) -> IBig {
    if k <= 1 || *value <= IBig::ONE {
        return value.clone();
    }
    let k_big = IBig::from(k);
    let k_minus_one = IBig::from(k - 1);
    // 10^ceil(digits/k) is never below the root
    let exponent = decimal_digits(value).div_ceil(k as usize);
    let mut x = IBig::from(10u8).pow(exponent);
    loop {
        let y = (&k_minus_one * &x + value / x.pow(k as usize - 1)) / &k_big;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// The exact `k`-th root of `value` when it is a perfect power.
pub fn exact_root(value: &IBig, k: u32) -> Option<IBig> {
    if is_negative(value) {
        if k % 2 == 0 {
            return None;
        }
        return exact_root(&abs(value), k).map(|r| -r);
    }
    let root = nth_root_floor(value, k);
    if root.pow(k as usize) == *value {
        Some(root)
    } else {
        None
    }
}

/// Count of trailing decimal zeros, zero for zero.
pub fn trailing_decimal_zeros(value: &IBig) -> usize {
    if value.is_zero() {
        return 0;
    }
    value
        .to_string()
        .bytes()
        .rev()
        .take_while(|b| *b == b'0')
        .count()
}

pub fn pow10(exponent: usize) -> IBig {
    IBig::from(10u8).pow(exponent)
}
