//! Material database with articular-tissue and implant presets.
//!
//! Values are representative of those used in musculoskeletal contact
//! models: cartilage treated as a linear elastic layer of a few
//! millimetres, meniscus somewhat stiffer, and UHMWPE as the polymer
//! bearing of joint replacements.

use std::collections::HashMap;

use crate::properties::ContactParameters;

/// A named collection of contact-parameter presets.
///
/// Parameters are looked up by name (e.g., "femoral_cartilage", "uhmwpe").
/// Custom entries can be registered at runtime.
#[derive(Debug, Clone)]
pub struct MaterialDatabase {
    materials: HashMap<String, ContactParameters>,
}

impl MaterialDatabase {
    /// Creates a new database with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();

        db.register("femoral_cartilage", femoral_cartilage());
        db.register("tibial_cartilage", tibial_cartilage());
        db.register("patellar_cartilage", patellar_cartilage());
        db.register("meniscus", meniscus());
        db.register("uhmwpe", uhmwpe());

        db
    }

    /// Creates an empty database.
    pub fn empty() -> Self {
        Self {
            materials: HashMap::new(),
        }
    }

    /// Registers parameters under `name`. Overwrites if the name already exists.
    pub fn register(&mut self, name: impl Into<String>, params: ContactParameters) {
        self.materials.insert(name.into(), params);
    }

    /// Looks up parameters by name. Returns `None` if not found.
    pub fn get(&self, name: &str) -> Option<&ContactParameters> {
        self.materials.get(name)
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialDatabase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Presets ─────────────────────────────────────────────────

/// Femoral condyle cartilage, ~2.5 mm.
fn femoral_cartilage() -> ContactParameters {
    ContactParameters::new(10.0e6, 0.45, 0.0025)
}

/// Tibial plateau cartilage, ~3 mm.
fn tibial_cartilage() -> ContactParameters {
    ContactParameters::new(10.0e6, 0.45, 0.003)
}

/// Retropatellar cartilage, the thickest in the knee at ~4 mm.
fn patellar_cartilage() -> ContactParameters {
    ContactParameters::new(10.0e6, 0.45, 0.004)
}

/// Meniscus, treated as an isotropic layer in compression.
fn meniscus() -> ContactParameters {
    ContactParameters::new(20.0e6, 0.45, 0.005)
}

/// Ultra-high-molecular-weight polyethylene tibial insert.
fn uhmwpe() -> ContactParameters {
    ContactParameters::new(463.0e6, 0.46, 0.006)
}
