// Scenario tests against the built-in environments

use super::*;
use crate::dim::{Dimensions, Quantity, UnitError, Value};
use crate::format::{Formatter, Template};
use approx::assert_relative_eq;

fn structural() -> Catalog {
    Registry::default().locate("structural").unwrap()
}

fn unit(catalog: &Catalog, name: &str) -> Quantity {
    catalog.get(name).unwrap().quantity()
}

fn q(value: Value) -> Quantity {
    value.into_quantity().unwrap()
}

#[test]
fn test_inverse_square_kip() {
    let catalog = structural();
    let f = Formatter::new(&catalog);
    let kip = unit(&catalog, "kip");

    let a = q((0.2 * kip).powi(2).unwrap());
    let b = 1.0 / a;
    assert_eq!(f.format(&b), "25.000 kip⁻²");
}

#[test]
fn test_pressure_times_area_is_force() {
    let catalog = structural();
    let f = Formatter::new(&catalog);
    let ksf = unit(&catalog, "ksf");
    let ft = unit(&catalog, "ft");
    let kip = unit(&catalog, "kip");

    let load = q(q((10.0 * ksf) * (5.0 * ft)) * (2.0 * ft));
    assert_eq!(load, 100.0 * kip);
    assert_eq!(f.format(&load), "100.000 kip");

    let bearing = q((1.5 * kip) / q((5.0 * ft) * (4.0 * ft)));
    assert_eq!(f.format(&bearing), "0.075 ksf");
}

#[test]
fn test_ksi_from_kip_per_square_inch() {
    let catalog = structural();
    let f = Formatter::new(&catalog);
    let kip = unit(&catalog, "kip");
    let inch = unit(&catalog, "inch");

    let stress = q(kip / q(inch * inch));
    assert_eq!(f.format(&stress), "1.000 ksi");
    assert_eq!(f.format(&q(inch * inch)), "1.000 inch²");
}

#[test]
fn test_default_unit_after_perturbation() {
    let catalog = structural();
    let f = Formatter::new(&catalog);
    let lb = unit(&catalog, "lb");
    let ft = unit(&catalog, "ft");

    assert_eq!(f.format(&q((10.0 * lb) * (2.0 * ft))), "20.000 lb·ft");

    // Mixing in an SI length leaves a factor no unit matches exactly
    let mixed = q((10.0 * lb) * (3.0 * Quantity::meter()));
    assert_eq!(f.format(&mixed), "98.425 lb·ft");
    assert_relative_eq!(mixed.magnitude(), 133.446648457815, max_relative = 1e-12);
}

#[test]
fn test_si_factor_uses_derived_unit() {
    let catalog = structural();
    let f = Formatter::new(&catalog);
    let lb = unit(&catalog, "lb");
    let kip = unit(&catalog, "kip");

    assert_eq!(f.format(&lb), "1.000 lb");
    assert_eq!(f.format(&kip.si()), "4.448 kN");
    assert_eq!(f.format(&(1000.0 * lb).si()), "4.448 kN");
}

#[test]
fn test_conversion() {
    let catalog = structural();
    let f = Formatter::new(&catalog);
    let force = Quantity::new(7500.0, Dimensions::new(1, 1, -2, 0, 0, 0, 0)).unwrap();

    let pounds = force.convert_to(&catalog, "lb").unwrap();
    assert_eq!(f.format(&pounds), "1686.067 lb");
    assert_eq!(pounds, force);

    // By symbol
    let moment = q(force * Quantity::meter()).convert_to(&catalog, "kip·ft").unwrap();
    assert_eq!(catalog.find("kip·ft").unwrap().name(), "kip_ft");
    assert_relative_eq!(
        moment.display_value(&catalog),
        7500.0 / 4448.2216152605 / 0.3048,
        max_relative = 1e-9
    );

    // Powers of the target unit
    let squared = q((10.0 * unit(&catalog, "lb")).powi(2).unwrap())
        .convert_to(&catalog, "kip")
        .unwrap()
        .with_precision(6);
    assert_eq!(f.format(&squared), "0.000100 kip²");
}

#[test]
fn test_conversion_errors() {
    let catalog = structural();
    let ft = unit(&catalog, "ft");
    assert!(matches!(
        ft.convert_to(&catalog, "furlong"),
        Err(UnitError::UnknownUnit(name)) if name == "furlong"
    ));
    assert!(matches!(
        ft.convert_to(&catalog, "lb"),
        Err(UnitError::DimensionMismatch { operation: "convert", .. })
    ));
}

#[test]
fn test_conversion_targets() {
    let catalog = structural();
    let ft = unit(&catalog, "ft");
    let names: Vec<&str> = ft
        .conversion_targets(&catalog)
        .into_iter()
        .map(|e| e.name())
        .collect();
    assert_eq!(names, vec!["ft", "inch", "mm"]);

    // Aliases carry no display factor
    let metres = (5.0 * ft).convert_to(&catalog, "mm").unwrap();
    assert_eq!(Formatter::new(&catalog).format(&metres), "1.524 m");
}

#[test]
fn test_units_mapping() {
    let catalog = structural();
    let units = catalog.units();
    let (name, kn) = units.iter().find(|(n, _)| *n == "kN").unwrap();
    assert_eq!(*name, "kN");
    assert_eq!(kn.magnitude(), 1000.0);
    assert_eq!(Formatter::new(&catalog).format(kn), "1.000 kN");
    assert_eq!(catalog.get("kN").unwrap().kind(), UnitKind::Alias);
    assert_eq!(catalog.get("ft").unwrap().kind(), UnitKind::Defined);
    assert_eq!(catalog.get("N").unwrap().kind(), UnitKind::Derived);
}

#[test]
fn test_ohm_markup() {
    let catalog = Registry::default().locate("default").unwrap();
    let volts = Quantity::new(1000.0, Dimensions::new(1, 2, -3, -1, 0, 0, 0)).unwrap();
    let resistance = q(volts / Quantity::ampere());

    assert_eq!(Formatter::new(&catalog).format(&resistance), "1.000 kΩ");
    assert_eq!(
        Formatter::new(&catalog)
            .template(Template::Html)
            .format(&resistance),
        "1.000 k&#0937;"
    );
    assert_eq!(
        Formatter::new(&catalog)
            .template(Template::Latex)
            .format(&resistance),
        r"$1.000\ \mathrm{k\Omega}$"
    );
}

#[test]
fn test_conflicting_default_file() {
    let source = r#"{
        "psf": { "Dimension": [1, -1, -2, 0, 0, 0, 0], "Factor": "0.3048*0.3048/0.45359237/9.80665", "Default": true },
        "psi": { "Dimension": [1, -1, -2, 0, 0, 0, 0], "Factor": "0.0254*0.0254/0.45359237/9.80665", "Default": true }
    }"#;
    assert!(matches!(
        load_from_str("bad", source, SourceFormat::Json),
        Err(UnitError::ConflictingDefault { .. })
    ));
}

#[test]
fn test_display_uses_active_catalog() {
    let _guard = active::serial();
    let force = Quantity::new(2500.0, Dimensions::new(1, 1, -2, 0, 0, 0, 0)).unwrap();

    reset();
    assert_eq!(force.to_string(), "2500.000 kg·m·s⁻²");

    load("default").unwrap();
    assert_eq!(force.to_string(), "2.500 kN");
    assert_eq!(format!("{:.1}", force), "2.5 kN");
    assert_eq!(format!("{:.2e}", q(force * 1e3 * Quantity::meter())), "2.50e0 MJ");
    assert_eq!(force.to_html(), "2.500 kN");
    assert_eq!(force.to_latex(), r"$2.500\ \mathrm{kN}$");
    assert_relative_eq!(f64::from(&force), 2.5);

    load("structural").unwrap();
    let pounds = force.to("lb").unwrap();
    assert_eq!(pounds.to_string(), "562.022 lb");
    assert_eq!(Value::Quantity(pounds).to_string(), "562.022 lb");
    reset();
}

#[test]
fn test_concurrent_reads_see_whole_snapshots() {
    let _guard = active::serial();
    let force = Quantity::new(2500.0, Dimensions::new(1, 1, -2, 0, 0, 0, 0)).unwrap();
    let default = Registry::default().locate("default").unwrap();

    let reader = std::thread::spawn(move || {
        for _ in 0..500 {
            let text = force.to_string();
            assert!(
                text == "2.500 kN" || text == "2500.000 kg·m·s⁻²",
                "mixed output {:?}",
                text
            );
        }
    });
    for i in 0..200 {
        if i % 2 == 0 {
            install(default.clone());
        } else {
            reset();
        }
    }
    reader.join().unwrap();
    reset();
}
