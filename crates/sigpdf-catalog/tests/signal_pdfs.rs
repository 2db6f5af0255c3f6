//! End-to-end tests over the registered catalog.
//!
//! These go through the public surface only: qualified-name parsing, registry
//! lookup with option layering, and evaluation against live kinematics.

use insta::assert_snapshot;
use sigpdf_catalog::models::{PARAMETER_A_FB, PARAMETER_C, PARAMETER_TAU};
use sigpdf_catalog::{build, catalog_listing, catalog_listing_json, global, render_listing};
use sigpdf_kernel::{Kinematics, Options, Parameters, QualifiedName, SignalPdfError};
use std::sync::{Arc, Barrier};
use std::thread;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

fn qn(raw: &str) -> QualifiedName {
    QualifiedName::parse(raw).unwrap_or_else(|e| panic!("failed to parse {raw}: {e}"))
}

#[test]
fn legendre_density_at_origin() {
    let kinematics = Kinematics::from_pairs([("z", 0.0), ("z_min", -1.0), ("z_max", 1.0)]);
    let pdf = global()
        .make(
            &qn("Test::Legendre1D"),
            &Parameters::new(),
            &kinematics,
            &Options::new(),
        )
        .unwrap()
        .expect("Test::Legendre1D should be registered");

    let differential = pdf.evaluate().unwrap();
    let normalization = pdf.normalization().unwrap();
    assert_close(differential, 9.0);
    assert_close(normalization, 24.0);
    assert_close(differential / normalization, 0.375);
}

#[test]
fn legendre_density_integrates_to_one() {
    let kinematics = Kinematics::from_pairs([("z", 0.0), ("z_min", -1.0), ("z_max", 1.0)]);
    let pdf = global()
        .make(
            &qn("Test::Legendre1D"),
            &Parameters::new(),
            &kinematics,
            &Options::new(),
        )
        .unwrap()
        .expect("Test::Legendre1D should be registered");
    let normalization = pdf.normalization().unwrap();

    let n = 4000;
    let h = 2.0 / n as f64;
    let integral: f64 = (0..n)
        .map(|i| {
            kinematics.set("z", -1.0 + (i as f64 + 0.5) * h);
            pdf.evaluate().unwrap() / normalization * h
        })
        .sum();
    assert!((integral - 1.0).abs() < 1e-6, "integral was {integral}");
}

#[test]
fn unregistered_name_is_absent() {
    let pdf = global()
        .make(
            &qn("Test::Legendre3D"),
            &Parameters::new(),
            &Kinematics::new(),
            &Options::new(),
        )
        .unwrap();
    assert!(pdf.is_none());
}

#[test]
fn malformed_name_fails_at_parse() {
    let err = QualifiedName::parse("Test:Legendre1D").unwrap_err();
    assert!(matches!(err, SignalPdfError::NameFormat { .. }));

    let err = global()
        .make_str(
            "Test::Legendre1D;l",
            &Parameters::new(),
            &Kinematics::new(),
            &Options::new(),
        )
        .unwrap_err();
    assert!(matches!(err, SignalPdfError::NameFormat { .. }));
}

#[test]
fn every_entry_evaluates_when_all_declared_names_are_present() {
    let registry = global();
    for (name, entry) in registry {
        let kinematics = Kinematics::new();
        for range in entry.kinematic_ranges() {
            kinematics.set(range.name.clone(), 0.5 * (range.min + range.max));
        }
        for (idx, bound) in entry.normalization_bounds().iter().enumerate() {
            let range = &entry.kinematic_ranges()[idx / 2];
            let value = if idx % 2 == 0 { range.min } else { range.max };
            kinematics.set(bound.clone(), value);
        }

        let pdf = registry
            .make(name, &Parameters::new(), &kinematics, &Options::new())
            .unwrap()
            .unwrap_or_else(|| panic!("{name} vanished from the registry"));
        assert_eq!(pdf.kinematic_ranges().len(), entry.kinematic_ranges().len());
        let differential = pdf.evaluate().unwrap();
        let normalization = pdf.normalization().unwrap();
        assert!(differential.is_finite(), "{name}: differential {differential}");
        assert!(
            normalization.is_finite() && normalization > 0.0,
            "{name}: normalization {normalization}"
        );
    }
}

#[test]
fn removing_a_declared_variable_always_fails() {
    let registry = global();
    for (name, entry) in registry {
        for missing in entry.kinematic_ranges() {
            let kinematics = Kinematics::new();
            for range in entry.kinematic_ranges() {
                kinematics.set(range.name.clone(), range.min);
            }
            let pdf = registry
                .make(name, &Parameters::new(), &kinematics, &Options::new())
                .unwrap()
                .unwrap();
            assert!(pdf.evaluate().is_ok());

            kinematics.remove(&missing.name);
            match pdf.evaluate() {
                Err(SignalPdfError::UnknownKinematicVariable(var)) => assert_eq!(var, missing.name),
                other => panic!("{name}: expected missing {}, got {other:?}", missing.name),
            }
        }
    }
}

#[test]
fn evaluation_is_a_function_of_current_kinematics() {
    let parameters = Parameters::from_pairs([(PARAMETER_TAU, 1.5), (PARAMETER_C, 0.4)]);
    let kinematics = Kinematics::from_pairs([("t", 0.3), ("cos(theta_l)", -0.2)]);
    let pdf = global()
        .make(
            &qn("Test::Exponential2D@Factorized"),
            &parameters,
            &kinematics,
            &Options::new(),
        )
        .unwrap()
        .unwrap();
    let other = global()
        .make(
            &qn("Test::Exponential2D@Factorized"),
            &parameters,
            &Kinematics::from_pairs([("t", 4.0), ("cos(theta_l)", 0.9)]),
            &Options::new(),
        )
        .unwrap()
        .unwrap();

    let first = pdf.evaluate().unwrap();
    let unrelated = other.evaluate().unwrap();

    kinematics.set("t", 2.0);
    kinematics.set("cos(theta_l)", 0.7);
    let moved = pdf.evaluate().unwrap();
    assert!((moved - first).abs() > 1e-6);

    kinematics.set("t", 0.3);
    kinematics.set("cos(theta_l)", -0.2);
    assert_close(pdf.evaluate().unwrap(), first);
    assert_close(other.evaluate().unwrap(), unrelated);
    assert_close(first, (-0.3f64 / 1.5).exp() * (1.0 - 0.4 * 0.2));
}

#[test]
fn options_layer_through_the_catalog() {
    let parameters = Parameters::from_pairs([(PARAMETER_A_FB, 0.2)]);
    let kinematics = Kinematics::from_pairs([("cos(theta_l)", 1.0)]);
    let registry = global();
    let eval = |name: &str, options: Options| {
        registry
            .make(&qn(name), &parameters, &kinematics, &options)
            .unwrap()
            .unwrap()
            .evaluate()
            .unwrap()
    };

    assert_close(eval("Test::ForwardBackward1D", Options::new()), 0.75 + 0.2);
    assert_close(
        eval("Test::ForwardBackward1D;cp-conjugate=true", Options::new()),
        0.75 - 0.2,
    );
    assert_close(
        eval(
            "Test::ForwardBackward1D;cp-conjugate=true",
            Options::new().with("cp-conjugate", "false"),
        ),
        0.75 + 0.2,
    );

    let err = registry
        .make(
            &qn("Test::ForwardBackward1D;cp-conjugate=sometimes"),
            &parameters,
            &kinematics,
            &Options::new(),
        )
        .unwrap_err();
    assert!(matches!(err, SignalPdfError::InvalidOption { .. }));
}

#[test]
fn suffixes_carry_their_own_defaults() {
    let parameters = Parameters::from_pairs([(PARAMETER_C, 0.5)]);
    let kinematics = Kinematics::from_pairs([("t", 0.0), ("cos(theta_l)", 1.0)]);
    let registry = global();

    let factorized = registry
        .make(
            &qn("Test::Exponential2D@Factorized"),
            &parameters,
            &kinematics,
            &Options::new(),
        )
        .unwrap()
        .unwrap();
    let flat = registry
        .make(
            &qn("Test::Exponential2D@Flat"),
            &parameters,
            &kinematics,
            &Options::new(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(factorized.options().get("model"), Some("SM"));
    assert_eq!(flat.options().get("model"), Some("Flat"));
    assert_close(factorized.evaluate().unwrap(), 1.5);
    assert_close(flat.evaluate().unwrap(), 1.0);
}

#[test]
fn enumeration_is_stable_and_restartable() {
    let registry = global();
    let first: Vec<String> = registry.names().map(ToString::to_string).collect();
    let second: Vec<String> = registry.iter().map(|(name, _)| name.to_string()).collect();
    assert_eq!(first, second);

    let rebuilt = build().unwrap();
    let third: Vec<String> = rebuilt.names().map(ToString::to_string).collect();
    assert_eq!(first, third);
    assert_eq!(registry.summaries(), rebuilt.summaries());
}

#[test]
fn global_registry_is_built_once_under_contention() {
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                global() as *const _ as usize
            })
        })
        .collect();
    let addresses: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread should not panic"))
        .collect();
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(addresses[0], global() as *const _ as usize);
}

#[test]
fn listing_json_is_deterministic() {
    let json = catalog_listing_json(global());
    assert_eq!(json, catalog_listing_json(&build().unwrap()));
    assert_eq!(json["rows"][3]["qualifiedName"], "Test::Legendre1D");
    assert_eq!(json["rows"][3]["linkKey"], "testcocolegendre1d");
}

#[test]
fn listing_renders_every_entry() {
    let rendered = render_listing(&catalog_listing(global()));
    assert_snapshot!(rendered, @r"
    Test::Exponential2D@Factorized [testcocoexponential2datfactorized]
        Exponential decay time times 1 + c z in one angle; used for unit tests only.
        kinematics: ``t``, ``cos(theta_l)``
    Test::Exponential2D@Flat [testcocoexponential2datflat]
        Exponential decay time times 1 + c z in one angle; used for unit tests only.
        kinematics: ``t``, ``cos(theta_l)``
    Test::ForwardBackward1D [testcocoforwardbackward1d]
        Angular distribution 3/8 (1 + z^2) + A_FB z; used for unit tests only.
        kinematics: ``cos(theta_l)``
    Test::Legendre1D [testcocolegendre1d]
        1D PDF up to 2nd order in z; used for unit tests only.
        kinematics: ``z``
    ");
}
