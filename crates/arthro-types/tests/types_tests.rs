//! Integration tests for arthro-types.

use arthro_types::{ArthroError, MeshSide, RegionId, TriangleId, VertexId};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn vertex_id_index() {
    let id = VertexId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn triangle_id_index() {
    let id = TriangleId(7);
    assert_eq!(id.index(), 7);
    assert_eq!(TriangleId::from(7), id);
}

#[test]
fn region_id_index() {
    assert_eq!(RegionId(3).index(), 3);
}

#[test]
fn ids_are_serializable() {
    let id = TriangleId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: TriangleId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── MeshSide Tests ───────────────────────────────────────────

#[test]
fn mesh_side_opposite() {
    assert_eq!(MeshSide::Casting.opposite(), MeshSide::Target);
    assert_eq!(MeshSide::Target.opposite(), MeshSide::Casting);
}

#[test]
fn mesh_side_labels() {
    assert_eq!(MeshSide::Casting.to_string(), "casting");
    let json = serde_json::to_string(&MeshSide::Target).unwrap();
    assert_eq!(json, "\"target\"");
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = ArthroError::InvalidMesh("triangle 3 has zero area".into());
    assert!(err.to_string().contains("zero area"));
}

#[test]
fn missing_material_display() {
    let err = ArthroError::MissingMaterialData {
        side: "target".into(),
        field: "thickness".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("target"));
    assert!(msg.contains("thickness"));
}

#[test]
fn solver_divergence_display() {
    let err = ArthroError::SolverDivergence {
        iterations: 100,
        residual: 1.5e-2,
    };
    let msg = err.to_string();
    assert!(msg.contains("100"));
    assert!(msg.contains("1.50e-2") || msg.contains("1.5e-2"));
}
