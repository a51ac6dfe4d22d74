//! Integration tests for arthro-material.

use arthro_mesh::generators::quad_grid;
use arthro_mesh::{ContactMesh, MaterialFields};
use arthro_material::{
    ContactParameters, FoundationFormulation, FoundationLaw, LayerProperties, LinearFoundation,
    MaterialDatabase, NonlinearFoundation, PressureSolver, SolveStatus,
};
use arthro_types::{ArthroError, MeshSide, TriangleId};

fn layer() -> LayerProperties {
    LayerProperties::new(1.0e6, 0.4, 0.1)
}

fn rel_close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1e-300)
}

// ─── LayerProperties Tests ───────────────────────────────────

#[test]
fn stiffness_formula() {
    // 1e6·0.6 / (1.4·0.2·0.1)
    let k = layer().stiffness();
    assert!(rel_close(k, 2.142857142857143e7, 1e-12), "k = {k}");
}

#[test]
fn lumped_layer_sums_thickness_and_averages_moduli() {
    let a = LayerProperties::new(1.0e6, 0.4, 0.1);
    let b = LayerProperties::new(3.0e6, 0.2, 0.05);
    let l = LayerProperties::lumped(&a, &b);
    assert!(rel_close(l.elastic_modulus, 2.0e6, 1e-12));
    assert!(rel_close(l.poissons_ratio, 0.3, 1e-12));
    assert!(rel_close(l.thickness, 0.15, 1e-12));
}

#[test]
fn layer_validation_rejects_bad_values() {
    assert!(layer().validate().is_ok());
    assert!(LayerProperties::new(0.0, 0.4, 0.1).validate().is_err());
    assert!(LayerProperties::new(1.0e6, 0.5, 0.1).validate().is_err());
    assert!(LayerProperties::new(1.0e6, -0.1, 0.1).validate().is_err());
    assert!(LayerProperties::new(1.0e6, 0.4, 0.0).validate().is_err());
    assert!(LayerProperties::new(f64::NAN, 0.4, 0.1).validate().is_err());
}

// ─── Foundation Law Tests ────────────────────────────────────

#[test]
fn zero_depth_gives_zero_pressure() {
    for law in [FoundationFormulation::Linear, FoundationFormulation::Nonlinear] {
        assert_eq!(law.law().pressure(&layer(), 0.0), 0.0);
        assert_eq!(law.law().pressure(&layer(), -0.01), 0.0);
        assert_eq!(law.law().energy_density(&layer(), 0.0), 0.0);
    }
}

#[test]
fn pressure_is_monotonic_in_depth() {
    for law in [FoundationFormulation::Linear, FoundationFormulation::Nonlinear] {
        let mut prev = 0.0;
        for i in 1..=99 {
            let p = law.law().pressure(&layer(), i as f64 * 0.001);
            assert!(p > prev, "{} law not increasing at step {i}", law);
            prev = p;
        }
    }
}

#[test]
fn linear_pressure_is_k_times_depth() {
    let p = LinearFoundation.pressure(&layer(), 0.02);
    assert!(rel_close(p, layer().stiffness() * 0.02, 1e-12));
}

#[test]
fn nonlinear_exceeds_linear() {
    for d in [0.001, 0.01, 0.05, 0.09] {
        assert!(NonlinearFoundation.pressure(&layer(), d) > LinearFoundation.pressure(&layer(), d));
    }
}

#[test]
fn nonlinear_matches_linear_for_small_depth() {
    let d = 1e-6;
    let lin = LinearFoundation.pressure(&layer(), d);
    let non = NonlinearFoundation.pressure(&layer(), d);
    assert!(rel_close(lin, non, 1e-4));
}

#[test]
fn nonlinear_at_or_beyond_thickness_is_finite() {
    let at = NonlinearFoundation.pressure(&layer(), 0.1);
    let beyond = NonlinearFoundation.pressure(&layer(), 0.5);
    assert!(at.is_finite() && at > 0.0);
    assert_eq!(at, beyond);
    assert!(NonlinearFoundation.energy_density(&layer(), 0.5).is_finite());
}

#[test]
fn linear_energy_is_half_k_d_squared() {
    let e = LinearFoundation.energy_density(&layer(), 0.02);
    assert!(rel_close(e, 0.5 * layer().stiffness() * 0.0004, 1e-12));
}

#[test]
fn nonlinear_energy_integrates_pressure() {
    let d = 0.05;
    let steps = 20_000;
    let dx = d / steps as f64;
    let mut integral = 0.0;
    for i in 0..steps {
        let a = NonlinearFoundation.pressure(&layer(), i as f64 * dx);
        let b = NonlinearFoundation.pressure(&layer(), (i + 1) as f64 * dx);
        integral += 0.5 * (a + b) * dx;
    }
    let closed = NonlinearFoundation.energy_density(&layer(), d);
    assert!(rel_close(integral, closed, 1e-6), "{integral} vs {closed}");
}

#[test]
fn formulation_parses_from_string() {
    assert_eq!("linear".parse::<FoundationFormulation>().unwrap(), FoundationFormulation::Linear);
    assert_eq!(
        "Nonlinear".parse::<FoundationFormulation>().unwrap(),
        FoundationFormulation::Nonlinear
    );
    assert!(matches!(
        "quadratic".parse::<FoundationFormulation>(),
        Err(ArthroError::InvalidConfig(_))
    ));
}

#[test]
fn formulation_serializes_lowercase() {
    let json = serde_json::to_string(&FoundationFormulation::Nonlinear).unwrap();
    assert_eq!(json, "\"nonlinear\"");
}

// ─── PressureSolver Tests ────────────────────────────────────

#[test]
fn lumped_linear_uses_combined_layer() {
    let solver = PressureSolver::new(FoundationFormulation::Linear, true, 1e-10, 50);
    let sol = solver.solve(&layer(), &layer(), 0.02);
    let combined = LayerProperties::new(1.0e6, 0.4, 0.2);
    assert!(rel_close(sol.pressure, combined.stiffness() * 0.02, 1e-12));
    assert!(sol.sub_depths.is_none());
    assert_eq!(sol.status, SolveStatus::ClosedForm);
}

#[test]
fn split_and_lumped_agree_for_identical_layers() {
    for formulation in [FoundationFormulation::Linear, FoundationFormulation::Nonlinear] {
        let lumped = PressureSolver::new(formulation, true, 1e-10, 50);
        let split = PressureSolver::new(formulation, false, 1e-10, 50);
        for d in [0.001, 0.02, 0.08, 0.15] {
            let a = lumped.solve(&layer(), &layer(), d).pressure;
            let b = split.solve(&layer(), &layer(), d).pressure;
            assert!(rel_close(a, b, 1e-8), "{formulation} d={d}: {a} vs {b}");
        }
    }
}

#[test]
fn linear_split_is_series_springs() {
    let a = LayerProperties::new(1.0e6, 0.4, 0.1);
    let b = LayerProperties::new(4.0e6, 0.3, 0.05);
    let solver = PressureSolver::new(FoundationFormulation::Linear, false, 1e-10, 50);
    let d = 0.01;
    let sol = solver.solve(&a, &b, d);
    let (d1, d2) = sol.sub_depths.unwrap();
    assert!(rel_close(d1 + d2, d, 1e-12));
    assert!(rel_close(sol.pressure, a.stiffness() * d1, 1e-12));
    assert!(rel_close(sol.pressure, b.stiffness() * d2, 1e-12));
}

#[test]
fn nonlinear_split_balances_both_layers() {
    let a = LayerProperties::new(1.0e6, 0.4, 0.1);
    let b = LayerProperties::new(4.0e6, 0.3, 0.05);
    let solver = PressureSolver::new(FoundationFormulation::Nonlinear, false, 1e-10, 50);
    let d = 0.08;
    let sol = solver.solve(&a, &b, d);
    assert!(matches!(sol.status, SolveStatus::Converged { .. }), "{:?}", sol.status);

    let (d1, d2) = sol.sub_depths.unwrap();
    assert!(d1 > 0.0 && d1 < a.thickness);
    assert!(d2 > 0.0 && d2 < b.thickness);
    assert!(rel_close(d1 + d2, d, 1e-8));
    assert!(rel_close(sol.pressure, NonlinearFoundation.pressure(&a, d1), 1e-6));
    assert!(rel_close(sol.pressure, NonlinearFoundation.pressure(&b, d2), 1e-6));
}

#[test]
fn nonlinear_split_is_symmetric_in_layer_order() {
    let a = LayerProperties::new(1.0e6, 0.4, 0.1);
    let b = LayerProperties::new(2.0e6, 0.35, 0.08);
    let solver = PressureSolver::new(FoundationFormulation::Nonlinear, false, 1e-10, 50);
    let ab = solver.solve(&a, &b, 0.05);
    let ba = solver.solve(&b, &a, 0.05);
    assert!(rel_close(ab.pressure, ba.pressure, 1e-8));
    let (a1, a2) = ab.sub_depths.unwrap();
    let (b1, b2) = ba.sub_depths.unwrap();
    assert!(rel_close(a1, b2, 1e-6));
    assert!(rel_close(a2, b1, 1e-6));
}

#[test]
fn nonlinear_split_falls_back_to_linear() {
    let a = LayerProperties::new(1.0e6, 0.4, 0.1);
    let b = LayerProperties::new(4.0e6, 0.3, 0.05);
    let starved = PressureSolver::new(FoundationFormulation::Nonlinear, false, 1e-10, 0);
    let linear = PressureSolver::new(FoundationFormulation::Linear, false, 1e-10, 50);
    let sol = starved.solve(&a, &b, 0.05);
    assert!(sol.status.is_fallback());
    assert!(rel_close(sol.pressure, linear.solve(&a, &b, 0.05).pressure, 1e-12));
}

#[test]
fn nonlinear_split_near_combined_thickness_is_finite() {
    let solver = PressureSolver::new(FoundationFormulation::Nonlinear, false, 1e-10, 50);
    let sol = solver.solve(&layer(), &layer(), 0.25);
    assert!(sol.pressure.is_finite());
    assert!(sol.pressure > 0.0);
}

#[test]
fn solver_split_energy_sums_both_layers() {
    let a = LayerProperties::new(1.0e6, 0.4, 0.1);
    let b = LayerProperties::new(4.0e6, 0.3, 0.05);
    let solver = PressureSolver::new(FoundationFormulation::Linear, false, 1e-10, 50);
    let sol = solver.solve(&a, &b, 0.01);
    let (d1, d2) = sol.sub_depths.unwrap();
    let e = solver.energy_density(&a, &b, 0.01, &sol);
    let expected = 0.5 * a.stiffness() * d1 * d1 + 0.5 * b.stiffness() * d2 * d2;
    assert!(rel_close(e, expected, 1e-12));

    // Series springs: W = ½·k_eff·d².
    let k_eff = 1.0 / (1.0 / a.stiffness() + 1.0 / b.stiffness());
    assert!(rel_close(e, 0.5 * k_eff * 0.01 * 0.01, 1e-12));
}

#[test]
fn split_energy_matches_lumped_for_identical_layers() {
    let a = LayerProperties::new(1.0e6, 0.4, 0.1);
    for formulation in [FoundationFormulation::Linear, FoundationFormulation::Nonlinear] {
        let lumped = PressureSolver::new(formulation, true, 1e-12, 50);
        let split = PressureSolver::new(formulation, false, 1e-12, 50);
        let sl = lumped.solve(&a, &a, 0.02);
        let ss = split.solve(&a, &a, 0.02);
        let el = lumped.energy_density(&a, &a, 0.02, &sl);
        let es = split.energy_density(&a, &a, 0.02, &ss);
        assert!(rel_close(el, es, 1e-8), "{formulation}: {el} vs {es}");
    }
}

#[test]
fn non_positive_depth_is_no_contact() {
    let solver = PressureSolver::default();
    let sol = solver.solve(&layer(), &layer(), 0.0);
    assert_eq!(sol.pressure, 0.0);
    assert_eq!(solver.energy_density(&layer(), &layer(), 0.0, &sol), 0.0);
}

// ─── ContactParameters Tests ─────────────────────────────────

fn grid_mesh(material: MaterialFields) -> ContactMesh {
    ContactMesh::new("grid", quad_grid(2, 2, 1.0, 1.0), material).unwrap()
}

#[test]
fn uniform_parameters_resolve_everywhere() {
    let params = ContactParameters::new(1.0e6, 0.4, 0.1);
    let mesh = grid_mesh(MaterialFields::uniform());
    assert!(params.validate_for_mesh(MeshSide::Casting, &mesh).is_ok());
    assert_eq!(params.layer_at(&mesh, TriangleId(3)), layer());
}

#[test]
fn variable_thickness_reads_mesh_field() {
    let mut params = ContactParameters::new(1.0e6, 0.4, 0.1);
    params.use_variable_thickness = true;
    let thickness: Vec<f64> = (0..8).map(|t| 0.01 * (t + 1) as f64).collect();
    let mesh = grid_mesh(MaterialFields {
        thickness: Some(thickness),
        ..MaterialFields::uniform()
    });
    assert!(params.validate_for_mesh(MeshSide::Target, &mesh).is_ok());
    let l = params.layer_at(&mesh, TriangleId(4));
    assert!(rel_close(l.thickness, 0.05, 1e-12));
    assert_eq!(l.elastic_modulus, 1.0e6);
}

#[test]
fn missing_variable_field_is_fatal() {
    let mut params = ContactParameters::new(1.0e6, 0.4, 0.1);
    params.use_variable_elastic_modulus = true;
    let mesh = grid_mesh(MaterialFields::uniform());
    match params.validate_for_mesh(MeshSide::Target, &mesh) {
        Err(ArthroError::MissingMaterialData { side, field }) => {
            assert_eq!(side, "target");
            assert_eq!(field, "elastic_modulus");
        }
        other => panic!("expected MissingMaterialData, got {other:?}"),
    }
}

#[test]
fn parameters_deserialize_with_default_flags() {
    let params: ContactParameters = toml::from_str(
        r#"
        elastic_modulus = 5.0e6
        poissons_ratio = 0.45
        thickness = 0.002
        "#,
    )
    .unwrap();
    assert!(!params.use_variable_thickness);
    assert_eq!(params, ContactParameters::new(5.0e6, 0.45, 0.002));
}

// ─── MaterialDatabase Tests ──────────────────────────────────

#[test]
fn default_database_has_five_presets() {
    let db = MaterialDatabase::with_defaults();
    assert_eq!(db.len(), 5);
    assert!(!db.is_empty());
}

#[test]
fn all_presets_are_valid() {
    let db = MaterialDatabase::with_defaults();
    for name in db.names() {
        assert!(db.get(name).unwrap().validate().is_ok(), "{name} invalid");
    }
}

#[test]
fn polyethylene_is_stiffer_than_cartilage() {
    let db = MaterialDatabase::default();
    let pe = db.get("uhmwpe").unwrap().uniform_layer();
    let cart = db.get("tibial_cartilage").unwrap().uniform_layer();
    assert!(pe.stiffness() > cart.stiffness());
}

#[test]
fn register_custom_preset() {
    let mut db = MaterialDatabase::empty();
    assert!(db.is_empty());
    db.register("test", ContactParameters::new(1.0e6, 0.4, 0.1));
    assert_eq!(db.names(), vec!["test"]);
    assert!(db.get("missing").is_none());
}
