//! Elastic layer properties.
//!
//! Each mesh side carries [`ContactParameters`]: uniform elastic
//! modulus, Poisson ratio and layer thickness, plus flags that switch
//! each quantity to the mesh's per-triangle material fields. Resolving
//! the parameters at a triangle gives [`LayerProperties`].

use arthro_mesh::{ContactMesh, MaterialField};
use arthro_types::{ArthroError, ArthroResult, MeshSide, TriangleId};
use serde::{Deserialize, Serialize};

/// Material description of one mesh side's elastic layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactParameters {
    /// Read thickness from the mesh's per-triangle thickness field.
    #[serde(default)]
    pub use_variable_thickness: bool,

    /// Read elastic modulus from the mesh's per-triangle field.
    #[serde(default)]
    pub use_variable_elastic_modulus: bool,

    /// Read Poisson ratio from the mesh's per-triangle field.
    #[serde(default)]
    pub use_variable_poissons_ratio: bool,

    /// Uniform elastic modulus (Pa).
    pub elastic_modulus: f64,

    /// Uniform Poisson ratio, in `[0, 0.5)`.
    pub poissons_ratio: f64,

    /// Uniform elastic layer thickness (m).
    pub thickness: f64,
}

impl ContactParameters {
    /// Uniform parameters with every variable-property flag off.
    pub fn new(elastic_modulus: f64, poissons_ratio: f64, thickness: f64) -> Self {
        Self {
            use_variable_thickness: false,
            use_variable_elastic_modulus: false,
            use_variable_poissons_ratio: false,
            elastic_modulus,
            poissons_ratio,
            thickness,
        }
    }

    /// Returns true if `field` is read per triangle.
    pub fn uses_variable(&self, field: MaterialField) -> bool {
        match field {
            MaterialField::Thickness => self.use_variable_thickness,
            MaterialField::ElasticModulus => self.use_variable_elastic_modulus,
            MaterialField::PoissonsRatio => self.use_variable_poissons_ratio,
        }
    }

    /// The uniform layer, ignoring variable-property flags.
    pub fn uniform_layer(&self) -> LayerProperties {
        LayerProperties {
            elastic_modulus: self.elastic_modulus,
            poissons_ratio: self.poissons_ratio,
            thickness: self.thickness,
        }
    }

    /// Checks the uniform values are physically meaningful.
    pub fn validate(&self) -> ArthroResult<()> {
        self.uniform_layer().validate()
    }

    /// Checks every enabled variable-property flag has a matching
    /// per-triangle field on `mesh`.
    ///
    /// A missing field is a fatal configuration error, surfaced before
    /// any evaluation.
    pub fn validate_for_mesh(&self, side: MeshSide, mesh: &ContactMesh) -> ArthroResult<()> {
        self.validate()?;
        for field in MaterialField::ALL {
            if !self.uses_variable(field) {
                continue;
            }
            match mesh.material().field(field) {
                Some(values) if values.len() == mesh.triangle_count() => {}
                _ => {
                    return Err(ArthroError::MissingMaterialData {
                        side: side.to_string(),
                        field: field.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Resolves the layer at triangle `t` of `mesh`.
    ///
    /// Expects [`validate_for_mesh`](Self::validate_for_mesh) to have
    /// passed; a missing value falls back to the uniform one.
    pub fn layer_at(&self, mesh: &ContactMesh, t: TriangleId) -> LayerProperties {
        let fields = mesh.material();
        let pick = |field: MaterialField, uniform: f64| {
            if self.uses_variable(field) {
                fields.value(field, t.index()).unwrap_or(uniform)
            } else {
                uniform
            }
        };
        LayerProperties {
            elastic_modulus: pick(MaterialField::ElasticModulus, self.elastic_modulus),
            poissons_ratio: pick(MaterialField::PoissonsRatio, self.poissons_ratio),
            thickness: pick(MaterialField::Thickness, self.thickness),
        }
    }
}

/// Resolved elastic layer at one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerProperties {
    /// Elastic modulus `E` (Pa).
    pub elastic_modulus: f64,
    /// Poisson ratio `ν`.
    pub poissons_ratio: f64,
    /// Layer thickness `h` (m).
    pub thickness: f64,
}

impl LayerProperties {
    pub fn new(elastic_modulus: f64, poissons_ratio: f64, thickness: f64) -> Self {
        Self {
            elastic_modulus,
            poissons_ratio,
            thickness,
        }
    }

    /// Confined-compression modulus `E(1−ν) / ((1+ν)(1−2ν))`.
    pub fn aggregate_modulus(&self) -> f64 {
        let nu = self.poissons_ratio;
        self.elastic_modulus * (1.0 - nu) / ((1.0 + nu) * (1.0 - 2.0 * nu))
    }

    /// Material stiffness factor `k = E(1−ν) / ((1+ν)(1−2ν)h)`.
    pub fn stiffness(&self) -> f64 {
        self.aggregate_modulus() / self.thickness
    }

    /// Combines two layers into one equivalent layer: thicknesses add,
    /// elastic modulus and Poisson ratio are averaged.
    pub fn lumped(a: &LayerProperties, b: &LayerProperties) -> LayerProperties {
        LayerProperties {
            elastic_modulus: 0.5 * (a.elastic_modulus + b.elastic_modulus),
            poissons_ratio: 0.5 * (a.poissons_ratio + b.poissons_ratio),
            thickness: a.thickness + b.thickness,
        }
    }

    /// Checks E > 0, 0 ≤ ν < 0.5, h > 0, all finite.
    pub fn validate(&self) -> ArthroResult<()> {
        if !(self.elastic_modulus.is_finite() && self.elastic_modulus > 0.0) {
            return Err(ArthroError::InvalidMaterial(format!(
                "elastic_modulus must be positive, got {}",
                self.elastic_modulus
            )));
        }
        if !(self.poissons_ratio.is_finite() && (0.0..0.5).contains(&self.poissons_ratio)) {
            return Err(ArthroError::InvalidMaterial(format!(
                "poissons_ratio must be in [0, 0.5), got {}",
                self.poissons_ratio
            )));
        }
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(ArthroError::InvalidMaterial(format!(
                "thickness must be positive, got {}",
                self.thickness
            )));
        }
        Ok(())
    }
}
