//! Per-triangle material fields.
//!
//! A mesh may carry spatially varying elastic-layer data: a thickness
//! map (typically measured between the articular surface and the bone
//! surface) and an elastic modulus / Poisson ratio per triangle. The
//! contact parameters decide whether these fields or uniform values
//! are used.

use std::fmt;

use arthro_types::{ArthroError, ArthroResult};
use serde::{Deserialize, Serialize};

/// Which per-triangle material quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialField {
    Thickness,
    ElasticModulus,
    PoissonsRatio,
}

impl MaterialField {
    pub const ALL: [MaterialField; 3] = [
        MaterialField::Thickness,
        MaterialField::ElasticModulus,
        MaterialField::PoissonsRatio,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MaterialField::Thickness => "thickness",
            MaterialField::ElasticModulus => "elastic_modulus",
            MaterialField::PoissonsRatio => "poissons_ratio",
        }
    }
}

impl fmt::Display for MaterialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Optional per-triangle material data, one value per triangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialFields {
    #[serde(default)]
    pub thickness: Option<Vec<f64>>,
    #[serde(default)]
    pub elastic_modulus: Option<Vec<f64>>,
    #[serde(default)]
    pub poissons_ratio: Option<Vec<f64>>,
}

impl MaterialFields {
    /// No spatially varying data.
    pub fn uniform() -> Self {
        Self::default()
    }

    /// Returns the per-triangle values of `field`, if present.
    pub fn field(&self, field: MaterialField) -> Option<&[f64]> {
        match field {
            MaterialField::Thickness => self.thickness.as_deref(),
            MaterialField::ElasticModulus => self.elastic_modulus.as_deref(),
            MaterialField::PoissonsRatio => self.poissons_ratio.as_deref(),
        }
    }

    /// Returns the value of `field` at triangle `t`, if present.
    #[inline]
    pub fn value(&self, field: MaterialField, t: usize) -> Option<f64> {
        self.field(field).and_then(|values| values.get(t).copied())
    }

    /// Checks every present field has one finite, positive-range value per triangle.
    pub fn validate(&self, triangle_count: usize) -> ArthroResult<()> {
        for field in MaterialField::ALL {
            let Some(values) = self.field(field) else {
                continue;
            };
            if values.len() != triangle_count {
                return Err(ArthroError::InvalidMaterial(format!(
                    "{} field has {} values for {} triangles",
                    field,
                    values.len(),
                    triangle_count
                )));
            }
            for (t, &v) in values.iter().enumerate() {
                let ok = match field {
                    MaterialField::Thickness | MaterialField::ElasticModulus => {
                        v.is_finite() && v > 0.0
                    }
                    MaterialField::PoissonsRatio => v.is_finite() && (0.0..0.5).contains(&v),
                };
                if !ok {
                    return Err(ArthroError::InvalidMaterial(format!(
                        "{} = {} at triangle {} is out of range",
                        field, v, t
                    )));
                }
            }
        }
        Ok(())
    }
}
