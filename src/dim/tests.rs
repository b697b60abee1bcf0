use super::*;
use crate::catalog::Registry;
use approx::assert_relative_eq;
use num_rational::Rational64;
use std::cmp::Ordering;

fn force() -> Dimensions {
    Dimensions::new(1, 1, -2, 0, 0, 0, 0)
}

fn newtons(n: f64) -> Quantity {
    Quantity::new(n, force()).unwrap()
}

fn metres(n: f64) -> Quantity {
    n * Quantity::meter()
}

#[test]
fn test_new_rejects_dimensionless() {
    assert!(matches!(
        Quantity::new(1.0, Dimensions::dimensionless()),
        Err(UnitError::InvalidOperand(_))
    ));
}

#[test]
fn test_add_sub() {
    let a = newtons(3.0);
    let b = newtons(4.5);
    let sum = (a + b).unwrap();
    assert_relative_eq!(sum.magnitude(), 7.5);
    assert_eq!((sum - b).unwrap(), a);

    match a + metres(1.0) {
        Err(UnitError::DimensionMismatch {
            operation,
            left,
            right,
        }) => {
            assert_eq!(operation, "add");
            assert_eq!(left, force());
            assert_eq!(right, Dimensions::basis(Dimensions::LENGTH));
        }
        other => panic!("expected DimensionMismatch, got {:?}", other),
    }
    assert!(matches!(
        a - metres(1.0),
        Err(UnitError::DimensionMismatch { operation: "subtract", .. })
    ));
}

#[test]
fn test_add_keeps_left_representation() {
    let ft = metres(0.3048).with_factor(1.0 / 0.3048).unwrap().with_precision(1);
    let sum = ft.try_add(&metres(1.0)).unwrap();
    assert_eq!(sum.factor(), ft.factor());
    assert_eq!(sum.precision(), 1);
}

#[test]
fn test_bare_number_operands() {
    let a = newtons(10.0).with_precision(5);
    assert_relative_eq!((a + 2.0).magnitude(), 12.0);
    assert_relative_eq!((2.0 + a).magnitude(), 12.0);
    assert_relative_eq!((a - 2.0).magnitude(), 8.0);
    assert_relative_eq!((2.0 - a).magnitude(), -8.0);
    assert_eq!((2.0 - a).precision(), 5);
    assert_relative_eq!((a * 3.0).magnitude(), 30.0);
    assert_relative_eq!((a / 4.0).magnitude(), 2.5);
}

#[test]
fn test_multiply_and_divide() {
    let area = (metres(2.0) * metres(3.0)).into_quantity().unwrap();
    assert_eq!(area.dimensions(), Dimensions::new(0, 2, 0, 0, 0, 0, 0));
    assert_relative_eq!(area.magnitude(), 6.0);

    let ratio = newtons(10.0) / newtons(4.0);
    assert_eq!(ratio, Value::Number(2.5));

    let a = newtons(7.0);
    let b = metres(3.0);
    let back = ((a / b).into_quantity().unwrap() * b).into_quantity().unwrap();
    assert_eq!(back, a);
}

#[test]
fn test_cancellation_collapses_to_number() {
    let a = metres(4.0);
    let inverse = 1.0 / a;
    assert_eq!(inverse.dimensions(), Dimensions::new(0, -1, 0, 0, 0, 0, 0));
    assert_relative_eq!(inverse.magnitude(), 0.25);
    assert_eq!(a * inverse, Value::Number(1.0));
}

#[test]
fn test_reciprocal_factor() {
    let ft = metres(0.3048).with_factor(1.0 / 0.3048).unwrap();
    let per_ft = 2.0 / ft;
    assert_relative_eq!(per_ft.factor().to_f64(), 0.3048, max_relative = 1e-12);
    assert_relative_eq!(per_ft.magnitude(), 2.0 / 0.3048);
}

#[test]
fn test_powers() {
    let a = metres(3.0);
    assert_eq!(a.powi(0).unwrap(), Value::Number(1.0));

    let cube = a.powi(3).unwrap().into_quantity().unwrap();
    assert_eq!(cube.dimensions(), Dimensions::new(0, 3, 0, 0, 0, 0, 0));
    assert_relative_eq!(cube.magnitude(), 27.0, max_relative = 1e-12);

    let root = cube.root(3).unwrap().into_quantity().unwrap();
    assert_eq!(root, a);

    let half = metres(9.0).sqrt().unwrap().into_quantity().unwrap();
    assert_eq!(half.dimensions().exponent(Dimensions::LENGTH), Rational64::new(1, 2));
    assert_relative_eq!(half.magnitude(), 3.0, max_relative = 1e-12);

    let float = a.powf(2.5).unwrap().into_quantity().unwrap();
    assert_eq!(float.dimensions().exponent(Dimensions::LENGTH), Rational64::new(5, 2));

    assert!(matches!(a.root(0), Err(UnitError::InvalidOperand(_))));
    assert!(matches!(a.powf(f64::NAN), Err(UnitError::InvalidOperand(_))));
}

#[test]
fn test_power_scales_factor() {
    let ft = metres(0.3048).with_factor(1.0 / 0.3048).unwrap();
    let sq = ft.powi(2).unwrap().into_quantity().unwrap();
    assert_relative_eq!(sq.factor().to_f64(), 1.0 / (0.3048 * 0.3048), max_relative = 1e-12);

    let exact = metres(0.3048).with_exact_factor(Rational64::new(1250, 381)).unwrap();
    let cube = exact.powi(3).unwrap().into_quantity().unwrap();
    assert_eq!(
        cube.factor().exact(),
        Some(Rational64::new(1250 * 1250 * 1250, 381 * 381 * 381))
    );
    let per_area = (1.0 / exact).powi(2).unwrap().into_quantity().unwrap();
    assert_eq!(per_area.factor().exact(), Some(Rational64::new(381 * 381, 1250 * 1250)));
    let root = exact.sqrt().unwrap().into_quantity().unwrap();
    assert!(root.factor().exact().is_none());
}

#[test]
fn test_exponent_overflow_is_an_error() {
    // Each root multiplies the exponent denominator by a prime near 1e6
    let mut q = Quantity::meter();
    for n in [999_983, 999_979, 999_961] {
        q = q.root(n).unwrap().into_quantity().unwrap();
    }
    assert!(matches!(q.root(999_953), Err(UnitError::InvalidOperand(_))));

    let a = Quantity::meter().root(4_000_000_000).unwrap().into_quantity().unwrap();
    let b = Quantity::meter().root(4_000_000_001).unwrap().into_quantity().unwrap();
    assert!(matches!(a.try_mul(&b), Err(UnitError::InvalidOperand(_))));
    assert!(matches!(a.try_div(&b), Err(UnitError::InvalidOperand(_))));
    assert!(a.try_mul(&a).is_ok());

    assert!(matches!(
        Quantity::meter().root(i64::MIN),
        Err(UnitError::InvalidOperand(_))
    ));
    assert!(Quantity::meter().root(i64::MAX).is_ok());
}

#[test]
fn test_float_exponents_are_bounded() {
    let q = metres(2.0).powf(0.123456789).unwrap().into_quantity().unwrap();
    let exponent = q.dimensions().exponent(Dimensions::LENGTH);
    assert!(*exponent.denom() <= 1_000_000);
    assert_relative_eq!(q.magnitude(), 2f64.powf(0.123456789), max_relative = 1e-6);

    // Repeated float powers either fit or report the overflow
    let chained = q
        .powf(0.987654321)
        .and_then(Value::into_quantity)
        .and_then(|q| q.powf(0.55555557));
    assert!(matches!(chained, Ok(_) | Err(UnitError::InvalidOperand(_))));
}

#[test]
#[should_panic(expected = "overflows")]
fn test_product_operator_panics_on_overflow() {
    let a = Quantity::meter().root(4_000_000_000).unwrap().into_quantity().unwrap();
    let b = Quantity::meter().root(4_000_000_001).unwrap().into_quantity().unwrap();
    let _ = a * b;
}

#[test]
fn test_value_pow_rejects_quantity_exponent() {
    let base = Value::Quantity(metres(2.0));
    assert!(matches!(
        base.pow(&Value::Quantity(metres(1.0))),
        Err(UnitError::InvalidOperand(_))
    ));
    let squared = base.pow(&Value::Number(2.0)).unwrap();
    assert_relative_eq!(squared.as_quantity().unwrap().magnitude(), 4.0);
    assert_eq!(Value::Number(2.0).pow(&Value::Number(3.0)).unwrap(), Value::Number(8.0));
}

#[test]
fn test_value_arithmetic() {
    let a = Value::Quantity(newtons(6.0));
    let b = Value::Quantity(metres(2.0));
    let moment = a * b;
    assert_eq!(
        moment.as_quantity().unwrap().dimensions(),
        Dimensions::new(1, 2, -2, 0, 0, 0, 0)
    );
    assert_eq!((a / a), Value::Number(1.0));
    assert!(a.checked_add(&b).is_err());
    assert_eq!(
        a.checked_sub(&a).unwrap().as_quantity().unwrap().magnitude(),
        0.0
    );
    assert!((-a).as_quantity().unwrap().magnitude() < 0.0);
    assert!(Value::Number(3.0).into_quantity().is_err());
}

#[test]
fn test_negate_and_abs_keep_dimensions() {
    let a = newtons(-5.0);
    assert_eq!((-a).dimensions(), force());
    assert_relative_eq!((-a).magnitude(), 5.0);
    assert_relative_eq!(a.abs().magnitude(), 5.0);
}

#[test]
fn test_comparisons() {
    let a = newtons(1.0);
    let b = newtons(2.0);
    assert!(a < b);
    assert_eq!(a.partial_cmp(&newtons(1.0 + 1e-12)), Some(Ordering::Equal));
    assert_eq!(a.partial_cmp(&metres(1.0)), None);
    assert!(a != metres(1.0));
    assert!(a == 1.0);
}

#[test]
fn test_split_reconstructs() {
    let ft = metres(3.048).with_factor(1.0 / 0.3048).unwrap();
    let (value, unit) = ft.split();
    assert_relative_eq!(value, 10.0, max_relative = 1e-12);
    assert_relative_eq!(unit.magnitude(), 0.3048, max_relative = 1e-12);
    assert_eq!(value * unit, ft);
}

#[test]
fn test_split_display_includes_prefix() {
    let catalog = Registry::default().locate("default").unwrap();
    let (value, unit) = newtons(2500.0).split_display(&catalog);
    assert_relative_eq!(value, 2.5, max_relative = 1e-12);
    assert_relative_eq!(unit.magnitude(), 1000.0, max_relative = 1e-12);
    assert_eq!(unit.prefix().unwrap().symbol, "k");
    assert_eq!(value * unit, newtons(2500.0));

    let structural = Registry::default().locate("structural").unwrap();
    let kip = structural.get("kip").unwrap().quantity();
    let (value, unit) = (3.0 * kip).split_display(&structural);
    assert_relative_eq!(value, 3.0, max_relative = 1e-9);
    assert_eq!(unit, kip);
    assert!(unit.prefix().is_none());
}

#[test]
fn test_prefixed_and_si() {
    let a = newtons(2500.0);
    assert_eq!(a.prefixed("k").unwrap().prefix().unwrap().exponent, 3);
    assert!(matches!(a.prefixed("q"), Err(UnitError::UnknownPrefix(_))));

    let lb = a.with_factor(0.224809).unwrap();
    assert!(matches!(lb.prefixed("k"), Err(UnitError::InvalidOperand(_))));
    let back = lb.si();
    assert!(back.factor().is_unity());
    assert!(back.prefix().is_none());
    assert!(a.with_factor(0.0).is_err());
}

#[test]
fn test_repr_and_json() {
    let a = Quantity::new(1e6, Dimensions::new(1, -1, -2, 0, 0, 0, 0)).unwrap();
    assert_eq!(
        a.repr(),
        "Quantity(magnitude=1000000.0, dimensions=Dimensions(kg=1, m=-1, s=-2, A=0, cd=0, K=0, mol=0), factor=1.0, precision=3, prefix=None)"
    );

    let json: serde_json::Value = serde_json::to_value(a.prefixed("M").unwrap()).unwrap();
    assert_eq!(json["magnitude"], 1e6);
    assert_eq!(json["dimensions"], serde_json::json!([1, -1, -2, 0, 0, 0, 0]));
    assert_eq!(json["prefix"]["symbol"], "M");
}

fn round_trip_cases() -> Vec<(Quantity, Quantity)> {
    let pressure = Dimensions::new(1, -1, -2, 0, 0, 0, 0);
    let half_length = |n: f64| metres(n).sqrt().unwrap().into_quantity().unwrap();
    let two_thirds = |n: f64| {
        metres(n)
            .pow(Rational64::new(2, 3))
            .unwrap()
            .into_quantity()
            .unwrap()
    };
    vec![
        (newtons(3.0), newtons(-4.5)),
        (newtons(0.0), newtons(2.0)),
        (
            metres(-2.0).with_exact_factor(Rational64::new(1250, 381)).unwrap(),
            metres(0.7),
        ),
        (
            Quantity::new(-1.25e5, pressure).unwrap().with_factor(1e-3).unwrap(),
            Quantity::new(7.5e3, pressure).unwrap(),
        ),
        (half_length(9.0), half_length(4.0).with_factor(2.0).unwrap()),
        (two_thirds(8.0), two_thirds(27.0)),
    ]
}

#[test]
fn test_arithmetic_round_trips() {
    let per = Quantity::second() * 2.5;
    for (a, b) in round_trip_cases() {
        let sum = Value::from(a).checked_add(&Value::from(b)).unwrap();
        let back = sum.checked_sub(&Value::from(b)).unwrap();
        assert_eq!(back, Value::Quantity(a), "{} + {} - {}", a.repr(), b.repr(), b.repr());
        assert!(back.as_quantity().unwrap().factor().matches(&a.factor()));

        let ratio = a / b;
        assert!(ratio.is_number(), "{} / {}", a.repr(), b.repr());
        assert_relative_eq!(ratio.as_number().unwrap(), a.magnitude() / b.magnitude());
        assert_eq!(ratio * Value::from(b), Value::Quantity(a));

        let rate = (a / per) * Value::from(per);
        assert_eq!(rate, Value::Quantity(a));
        assert!(rate.as_quantity().unwrap().factor().matches(&a.factor()));
        assert!(!Value::from(a).is_number());
        assert_eq!(Value::from(a).as_number(), None);
    }
}
