use num_rational::Rational64;

/// Relative tolerance for comparing magnitudes and factors
pub const REL_TOLERANCE: f64 = 1e-9;

pub fn approx_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= REL_TOLERANCE * a.abs().max(b.abs())
}

pub fn is_unity(factor: f64) -> bool {
    approx_eq(factor, 1.0)
}

pub fn rational_to_f64(r: Rational64) -> f64 {
    *r.numer() as f64 / *r.denom() as f64
}

/// Largest denominator accepted when a float exponent is made rational
pub const MAX_EXPONENT_DENOMINATOR: i64 = 1_000_000;

/// Best rational approximation of `x` with denominator at most
/// `max_denominator`, by continued fractions
pub fn nearest_rational(x: f64, max_denominator: i64) -> Option<Rational64> {
    if !x.is_finite() || x.abs() >= 1e15 {
        return None;
    }
    let (mut p0, mut q0, mut p1, mut q1) = (0i64, 1i64, 1i64, 0i64);
    let mut rest = x;
    loop {
        let whole = rest.floor();
        let a = whole as i64;
        let next = a
            .checked_mul(p1)
            .and_then(|v| v.checked_add(p0))
            .zip(a.checked_mul(q1).and_then(|v| v.checked_add(q0)));
        let (p2, q2) = match next {
            Some((p2, q2)) if q2 <= max_denominator => (p2, q2),
            _ => break,
        };
        p0 = p1;
        q0 = q1;
        p1 = p2;
        q1 = q2;
        let frac = rest - whole;
        if frac < 1e-12 {
            break;
        }
        rest = 1.0 / frac;
    }
    Some(Rational64::new(p1, q1))
}

/// `base^p`, using integer powers when `p` is whole so (1e3)² stays exact
pub fn pow_rational(base: f64, p: Rational64) -> f64 {
    if p.is_integer() {
        if let Ok(n) = i32::try_from(p.to_integer()) {
            return base.powi(n);
        }
    }
    base.powf(rational_to_f64(p))
}
