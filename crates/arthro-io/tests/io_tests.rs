//! Integration tests for arthro-io.

use arthro_contact::ContactConfig;
use arthro_io::contract::{AxisSplit, ContactInput, FramePoses, MeshInput};
use arthro_io::{evaluate, validate_input};
use arthro_material::ContactParameters;
use arthro_math::{Pose, Quat, Vec3};
use arthro_mesh::generators::{opposing_quad_grid, quad_grid};
use arthro_mesh::{MaterialFields, Region};
use arthro_types::{ArthroError, TriangleId};

fn mesh_input(name: &str, mesh: arthro_mesh::TriangleMesh) -> MeshInput {
    MeshInput {
        name: name.into(),
        mesh,
        material: MaterialFields::uniform(),
        regions: Vec::new(),
        split: None,
    }
}

fn make_valid_input() -> ContactInput {
    ContactInput {
        casting: mesh_input("femur", quad_grid(2, 2, 1.0, 1.0)),
        target: mesh_input("tibia", opposing_quad_grid(2, 2, 1.0, 1.0, 0.0)),
        config: ContactConfig::default()
            .with_params(ContactParameters::new(1.0e6, 0.4, 0.1))
            .with_proximity_bounds(0.0, 0.05),
        frames: vec![
            FramePoses {
                time: 0.0,
                casting: Pose::IDENTITY,
                target: Pose::from_translation(Vec3::new(0.0, 0.0, -0.01)),
            },
            FramePoses {
                time: 0.1,
                casting: Pose::IDENTITY,
                target: Pose::from_translation(Vec3::new(0.0, 0.0, -0.02)),
            },
        ],
    }
}

// ─── Contract Tests ───────────────────────────────────────────

#[test]
fn contact_input_round_trip() {
    let input = make_valid_input();
    let json = input.to_json().unwrap();
    let recovered = ContactInput::from_json(&json).unwrap();
    assert_eq!(recovered.casting.mesh, input.casting.mesh);
    assert_eq!(recovered.frames, input.frames);
    assert_eq!(recovered.config, input.config);
}

#[test]
fn config_and_frames_are_optional() {
    let input = make_valid_input();
    let json = format!(
        r#"{{ "casting": {}, "target": {} }}"#,
        serde_json::to_string(&input.casting).unwrap(),
        serde_json::to_string(&input.target).unwrap()
    );
    let parsed = ContactInput::from_json(&json).unwrap();
    assert_eq!(parsed.config, ContactConfig::default());
    assert_eq!(parsed.frames(), vec![FramePoses::default()]);
}

#[test]
fn malformed_json_is_serialization_error() {
    assert!(matches!(
        ContactInput::from_json("{ not json"),
        Err(ArthroError::Serialization(_))
    ));
}

#[test]
fn load_reads_scene_file() {
    let path = std::env::temp_dir().join(format!("arthro_scene_{}.json", std::process::id()));
    std::fs::write(&path, make_valid_input().to_json().unwrap()).unwrap();
    let loaded = ContactInput::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded.casting.name, "femur");
    assert_eq!(loaded.frames.len(), 2);
}

#[test]
fn load_missing_file_is_io_error() {
    assert!(matches!(
        ContactInput::load("/nonexistent/arthro/scene.json"),
        Err(ArthroError::Io(_))
    ));
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn valid_input_passes() {
    assert!(validate_input(&make_valid_input()).is_ok());
}

#[test]
fn out_of_range_region_rejected() {
    let mut input = make_valid_input();
    input.casting.regions = vec![Region::new("bad", vec![TriangleId(99)])];
    assert!(matches!(validate_input(&input), Err(ArthroError::InvalidMesh(_))));
}

#[test]
fn wrong_material_length_rejected() {
    let mut input = make_valid_input();
    input.target.material.thickness = Some(vec![0.1; 3]);
    assert!(matches!(validate_input(&input), Err(ArthroError::InvalidMaterial(_))));
}

#[test]
fn missing_variable_field_rejected() {
    let mut input = make_valid_input();
    input.config.casting_mesh_contact_params.use_variable_elastic_modulus = true;
    assert!(matches!(
        validate_input(&input),
        Err(ArthroError::MissingMaterialData { .. })
    ));
}

#[test]
fn decreasing_frame_times_rejected() {
    let mut input = make_valid_input();
    input.frames[1].time = -1.0;
    assert!(validate_input(&input).is_err());
}

#[test]
fn degenerate_rotation_rejected() {
    let mut input = make_valid_input();
    input.frames[0].target.rotation = Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);
    assert!(validate_input(&input).is_err());
}

#[test]
fn bad_split_axis_rejected() {
    let mut input = make_valid_input();
    input.casting.split = Some(AxisSplit {
        axis: 3,
        negative: "medial".into(),
        positive: "lateral".into(),
    });
    assert!(validate_input(&input).is_err());
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn evaluate_reports_every_frame() {
    let mut input = make_valid_input();
    input.casting.split = Some(AxisSplit {
        axis: 0,
        negative: "medial".into(),
        positive: "lateral".into(),
    });
    let output = evaluate(&input).unwrap();

    assert_eq!(output.frames.len(), 2);
    assert!(output.labels.contains(&"casting_medial_contact_area".to_string()));
    for frame in &output.frames {
        assert_eq!(frame.values.len(), output.labels.len());
        assert_eq!(frame.casting.contacting_triangles, 8);
    }
    // Deeper overlap, more load.
    assert!(output.frames[1].loads.target.force.z > output.frames[0].loads.target.force.z);
    assert!(output.frames[1].potential_energy > output.frames[0].potential_energy);
}

#[test]
fn csv_has_header_and_rows() {
    let output = evaluate(&make_valid_input()).unwrap();
    let csv = output.to_csv();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("time,casting_total_contacting_triangles"));
    assert_eq!(
        lines[1].split(',').count(),
        lines[0].split(',').count()
    );
}
