//! Typed output accessors and flat record export.
//!
//! Every output is addressed by mesh side, scope (whole mesh or a named
//! region) and [`Statistic`]. `record_labels` / `record_values` flatten
//! all of them into one stably-ordered list for reporting.

use arthro_math::Vec3;
use arthro_types::MeshSide;
use serde::{Deserialize, Serialize};

use crate::engine::ContactEngine;
use crate::force::ContactForce;
use crate::stats::ContactStats;

/// Scope name of whole-mesh statistics in record labels.
pub const TOTAL_SCOPE: &str = "total";

/// A reported statistic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    ContactingTriangles,
    ContactArea,
    MeanProximity,
    MaxProximity,
    CenterOfProximity,
    MeanPressure,
    MaxPressure,
    CenterOfPressure,
    ContactForce,
    ContactMoment,
    PotentialEnergy,
}

impl Statistic {
    pub const ALL: [Statistic; 11] = [
        Statistic::ContactingTriangles,
        Statistic::ContactArea,
        Statistic::MeanProximity,
        Statistic::MaxProximity,
        Statistic::CenterOfProximity,
        Statistic::MeanPressure,
        Statistic::MaxPressure,
        Statistic::CenterOfPressure,
        Statistic::ContactForce,
        Statistic::ContactMoment,
        Statistic::PotentialEnergy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Statistic::ContactingTriangles => "contacting_triangles",
            Statistic::ContactArea => "contact_area",
            Statistic::MeanProximity => "mean_proximity",
            Statistic::MaxProximity => "max_proximity",
            Statistic::CenterOfProximity => "center_of_proximity",
            Statistic::MeanPressure => "mean_pressure",
            Statistic::MaxPressure => "max_pressure",
            Statistic::CenterOfPressure => "center_of_pressure",
            Statistic::ContactForce => "contact_force",
            Statistic::ContactMoment => "contact_moment",
            Statistic::PotentialEnergy => "potential_energy",
        }
    }

    pub fn is_vector(self) -> bool {
        matches!(
            self,
            Statistic::CenterOfProximity
                | Statistic::CenterOfPressure
                | Statistic::ContactForce
                | Statistic::ContactMoment
        )
    }

    /// Reads this statistic from `stats`.
    pub fn value(self, stats: &ContactStats) -> StatValue {
        match self {
            Statistic::ContactingTriangles => StatValue::Scalar(stats.contacting_triangles as f64),
            Statistic::ContactArea => StatValue::Scalar(stats.contact_area),
            Statistic::MeanProximity => StatValue::Scalar(stats.mean_proximity),
            Statistic::MaxProximity => StatValue::Scalar(stats.max_proximity),
            Statistic::CenterOfProximity => StatValue::Vector(stats.center_of_proximity),
            Statistic::MeanPressure => StatValue::Scalar(stats.mean_pressure),
            Statistic::MaxPressure => StatValue::Scalar(stats.max_pressure),
            Statistic::CenterOfPressure => StatValue::Vector(stats.center_of_pressure),
            Statistic::ContactForce => StatValue::Vector(stats.force),
            Statistic::ContactMoment => StatValue::Vector(stats.moment),
            Statistic::PotentialEnergy => StatValue::Scalar(stats.potential_energy),
        }
    }
}

/// A scalar or vector statistic value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatValue {
    Scalar(f64),
    Vector(Vec3),
}

impl StatValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            StatValue::Scalar(v) => Some(*v),
            StatValue::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vec3> {
        match self {
            StatValue::Vector(v) => Some(*v),
            StatValue::Scalar(_) => None,
        }
    }

    fn push_into(&self, out: &mut Vec<f64>) {
        match self {
            StatValue::Scalar(v) => out.push(*v),
            StatValue::Vector(v) => out.extend_from_slice(&v.to_array()),
        }
    }
}

fn push_labels(out: &mut Vec<String>, prefix: &str, vector: bool) {
    if vector {
        for axis in ["x", "y", "z"] {
            out.push(format!("{prefix}_{axis}"));
        }
    } else {
        out.push(prefix.to_string());
    }
}

impl ContactEngine {
    /// Number of triangles of `side` with a valid proximity.
    pub fn contacting_triangle_count(&mut self, side: MeshSide) -> usize {
        self.proximity_records(side).iter().filter(|r| r.is_contact()).count()
    }

    /// Per-triangle overlap depth of `side` (0 out of contact).
    pub fn proximity(&mut self, side: MeshSide) -> Vec<f64> {
        self.proximity_records(side).iter().map(|r| r.depth).collect()
    }

    /// Per-triangle contact pressure of `side`.
    pub fn pressure(&mut self, side: MeshSide) -> Vec<f64> {
        self.pressure_records(side).iter().map(|r| r.pressure).collect()
    }

    /// Per-triangle elastic energy of `side`.
    pub fn triangle_potential_energy(&mut self, side: MeshSide) -> Vec<f64> {
        self.pressure_records(side)
            .iter()
            .map(|r| r.potential_energy)
            .collect()
    }

    /// One statistic of `side`, over the whole mesh (`region = None`) or
    /// a named region. `None` if the region does not exist.
    pub fn statistic(
        &mut self,
        side: MeshSide,
        region: Option<&str>,
        statistic: Statistic,
    ) -> Option<StatValue> {
        let stats = match region {
            None => self.stats(side),
            Some(name) => self.region_stats(side, name)?,
        };
        Some(statistic.value(stats))
    }

    /// Labels of [`record_values`](Self::record_values), in order.
    ///
    /// Per side, per scope (`total`, then each region): every statistic,
    /// vectors as `_x/_y/_z`. Then both bodies' force and moment, then
    /// the total potential energy.
    pub fn record_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        for side in MeshSide::BOTH {
            let mesh = self.mesh(side);
            let scopes = std::iter::once(TOTAL_SCOPE)
                .chain(mesh.regions().iter().map(|r| r.name.as_str()));
            for scope in scopes {
                for stat in Statistic::ALL {
                    let prefix = format!("{side}_{scope}_{}", stat.label());
                    push_labels(&mut labels, &prefix, stat.is_vector());
                }
            }
        }
        for side in MeshSide::BOTH {
            push_labels(&mut labels, &format!("{side}_body_force"), true);
            push_labels(&mut labels, &format!("{side}_body_moment"), true);
        }
        labels.push("potential_energy".to_string());
        labels
    }

    /// Every output at the current poses, ordered as
    /// [`record_labels`](Self::record_labels).
    pub fn record_values(&mut self) -> Vec<f64> {
        let mut values = Vec::new();
        for side in MeshSide::BOTH {
            let side_stats = self.side_stats(side);
            let scopes = std::iter::once(&side_stats.total)
                .chain(side_stats.regions.iter().map(|r| &r.stats));
            for stats in scopes {
                for stat in Statistic::ALL {
                    stat.value(stats).push_into(&mut values);
                }
            }
        }
        let loads = self.body_forces();
        for side in MeshSide::BOTH {
            let load = loads.side(side);
            values.extend_from_slice(&load.force.to_array());
            values.extend_from_slice(&load.moment.to_array());
        }
        values.push(self.potential_energy());
        values
    }
}
