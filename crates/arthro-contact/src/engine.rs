//! Staged contact engine.
//!
//! Sequences detection → pressure → statistics for one pair of meshes
//! and caches each stage's results, tagged with the pose versions they
//! were computed at.
//!
//! ```text
//! Uninitialized → PositionReady → DynamicsReady → ReportReady
//! ```
//!
//! Realizing a stage computes only the stages whose cache is stale.
//! Moving either mesh makes every cache stale; the proximity coherence
//! caches are kept and seed the next detection pass.

use arthro_math::Pose;
use arthro_material::{ContactParameters, PressureSolver, SolveStatus};
use arthro_mesh::ContactMesh;
use arthro_telemetry::{ContactEvent, EventBus, EventKind};
use arthro_types::{ArthroError, ArthroResult, MeshSide, TriangleId};
use serde::{Deserialize, Serialize};

use crate::config::ContactConfig;
use crate::force::{BodyForces, ContactForce};
use crate::proximity::{DepthBounds, ProximityDetector, ProximityPassSummary, ProximityRecord};
use crate::stats::{ContactStats, PressureRecord, SideStats};

/// Evaluation stage, in realization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Uninitialized,
    /// Proximity records valid.
    PositionReady,
    /// Pressure, body loads and energy valid.
    DynamicsReady,
    /// Statistics valid.
    ReportReady,
}

/// How many times each stage was actually computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationCounters {
    pub proximity: u64,
    pub pressure: u64,
    pub report: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PoseKey {
    casting: u64,
    target: u64,
}

#[derive(Debug, Default)]
struct PositionCache {
    key: Option<PoseKey>,
    records: [Vec<ProximityRecord>; 2],
    summaries: [ProximityPassSummary; 2],
}

#[derive(Debug, Default)]
struct DynamicsCache {
    key: Option<PoseKey>,
    records: [Vec<PressureRecord>; 2],
    fallbacks: [u32; 2],
    loads: BodyForces,
    potential_energy: f64,
}

#[derive(Debug, Default)]
struct ReportCache {
    key: Option<PoseKey>,
    sides: [SideStats; 2],
}

/// Elastic-foundation contact between two rigid meshes.
#[derive(Debug)]
pub struct ContactEngine {
    config: ContactConfig,
    /// Indexed by [`MeshSide::index`].
    meshes: [ContactMesh; 2],
    solver: PressureSolver,
    bounds: DepthBounds,
    detectors: [ProximityDetector; 2],
    position: PositionCache,
    dynamics: DynamicsCache,
    report: ReportCache,
    counters: ComputationCounters,
    /// Advances on every pose change.
    sequence: u64,
    bus: Option<EventBus>,
}

impl ContactEngine {
    /// Validates the configuration against both meshes.
    ///
    /// A variable-property flag without the matching per-triangle field
    /// fails here with [`ArthroError::MissingMaterialData`].
    pub fn new(
        config: ContactConfig,
        casting: ContactMesh,
        target: ContactMesh,
    ) -> ArthroResult<Self> {
        config.validate()?;
        config
            .params(MeshSide::Casting)
            .validate_for_mesh(MeshSide::Casting, &casting)?;
        config
            .params(MeshSide::Target)
            .validate_for_mesh(MeshSide::Target, &target)?;

        if config.verbose >= 1 {
            tracing::info!(
                casting = casting.name(),
                casting_triangles = casting.triangle_count(),
                target = target.name(),
                target_triangles = target.triangle_count(),
                formulation = %config.elastic_foundation_formulation,
                lumped = config.use_lumped_contact_model,
                "contact engine initialized"
            );
        }

        let detectors = [
            ProximityDetector::new(casting.triangle_count()),
            ProximityDetector::new(target.triangle_count()),
        ];
        Ok(Self {
            solver: config.pressure_solver(),
            bounds: config.depth_bounds(),
            config,
            meshes: [casting, target],
            detectors,
            position: PositionCache::default(),
            dynamics: DynamicsCache::default(),
            report: ReportCache::default(),
            counters: ComputationCounters::default(),
            sequence: 0,
            bus: None,
        })
    }

    /// Attaches an event bus; events are flushed after every realize.
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn event_bus_mut(&mut self) -> Option<&mut EventBus> {
        self.bus.as_mut()
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    pub fn mesh(&self, side: MeshSide) -> &ContactMesh {
        &self.meshes[side.index()]
    }

    pub fn counters(&self) -> ComputationCounters {
        self.counters
    }

    /// Evaluation sequence number; advances on every pose change.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Coherence cache of one detection direction.
    pub fn detector(&self, side: MeshSide) -> &ProximityDetector {
        &self.detectors[side.index()]
    }

    /// Moves one mesh. Returns `true` if its pose changed.
    pub fn set_pose(&mut self, side: MeshSide, pose: Pose) -> bool {
        let changed = self.meshes[side.index()].set_pose(pose);
        if changed {
            self.sequence += 1;
            if self.config.verbose >= 2 {
                tracing::debug!(side = %side, sequence = self.sequence, "pose changed");
            }
        }
        changed
    }

    /// Highest stage whose results are valid for the current poses.
    pub fn stage(&self) -> Stage {
        let key = Some(self.pose_key());
        if self.report.key == key {
            Stage::ReportReady
        } else if self.dynamics.key == key {
            Stage::DynamicsReady
        } else if self.position.key == key {
            Stage::PositionReady
        } else {
            Stage::Uninitialized
        }
    }

    /// Brings the engine up to `stage`, computing only stale stages.
    pub fn realize(&mut self, stage: Stage) {
        if stage >= Stage::PositionReady {
            self.realize_position();
        }
        if stage >= Stage::DynamicsReady {
            self.realize_dynamics();
        }
        if stage >= Stage::ReportReady {
            self.realize_report();
        }
        if let Some(bus) = self.bus.as_mut() {
            bus.flush();
        }
    }

    // ─── Stage outputs ───────────────────────────────────────

    /// Proximity of every triangle of `side` against the opposing mesh.
    pub fn proximity_records(&mut self, side: MeshSide) -> &[ProximityRecord] {
        self.realize(Stage::PositionReady);
        &self.position.records[side.index()]
    }

    pub fn pass_summary(&mut self, side: MeshSide) -> ProximityPassSummary {
        self.realize(Stage::PositionReady);
        self.position.summaries[side.index()]
    }

    pub fn pressure_records(&mut self, side: MeshSide) -> &[PressureRecord] {
        self.realize(Stage::DynamicsReady);
        &self.dynamics.records[side.index()]
    }

    /// Split solves on `side` that fell back to the linear estimate.
    pub fn fallback_count(&mut self, side: MeshSide) -> u32 {
        self.realize(Stage::DynamicsReady);
        self.dynamics.fallbacks[side.index()]
    }

    /// Whole-mesh and regional statistics for `side`.
    pub fn side_stats(&mut self, side: MeshSide) -> &SideStats {
        self.realize(Stage::ReportReady);
        &self.report.sides[side.index()]
    }

    /// Whole-mesh statistics for `side`.
    pub fn stats(&mut self, side: MeshSide) -> &ContactStats {
        &self.side_stats(side).total
    }

    pub fn region_stats(&mut self, side: MeshSide, region: &str) -> Option<&ContactStats> {
        self.side_stats(side).region(region)
    }

    // ─── Stage computation ───────────────────────────────────

    fn pose_key(&self) -> PoseKey {
        PoseKey {
            casting: self.meshes[0].pose_version(),
            target: self.meshes[1].pose_version(),
        }
    }

    fn realize_position(&mut self) {
        let key = self.pose_key();
        if self.position.key == Some(key) {
            return;
        }

        for side in MeshSide::BOTH {
            let source = &self.meshes[side.index()];
            let opposing = &self.meshes[side.opposite().index()];
            let (records, summary) =
                self.detectors[side.index()].detect(source, opposing, self.bounds);

            let max_depth = records
                .iter()
                .filter(|r| r.is_contact())
                .fold(0.0_f64, |m, r| m.max(r.depth));
            if self.config.verbose >= 1 {
                tracing::info!(
                    side = %side,
                    contacting = summary.contacting(),
                    max_proximity = max_depth,
                    "proximity pass"
                );
            }
            if self.config.verbose >= 2 {
                tracing::debug!(
                    side = %side,
                    cached = summary.cached,
                    neighbor = summary.neighbor,
                    hierarchy = summary.hierarchy,
                    missed = summary.missed,
                    "proximity methods"
                );
            }
            self.emit(EventKind::ProximityPass {
                side: side.to_string(),
                cached: summary.cached,
                neighbor: summary.neighbor,
                hierarchy: summary.hierarchy,
                contacting: summary.contacting(),
                max_proximity: max_depth,
            });

            self.position.records[side.index()] = records;
            self.position.summaries[side.index()] = summary;
        }

        self.position.key = Some(key);
        self.counters.proximity += 1;
    }

    fn realize_dynamics(&mut self) {
        self.realize_position();
        let key = self.pose_key();
        if self.dynamics.key == Some(key) {
            return;
        }

        for side in MeshSide::BOTH {
            let pass = PressurePass {
                solver: &self.solver,
                source: &self.meshes[side.index()],
                source_params: self.config.params(side),
                opposing: &self.meshes[side.opposite().index()],
                opposing_params: self.config.params(side.opposite()),
            };
            let (records, fallbacks) = pass.run(&self.position.records[side.index()]);

            for fallback in &fallbacks {
                if self.config.verbose >= 1 {
                    let reason = ArthroError::SolverDivergence {
                        iterations: fallback.iterations,
                        residual: fallback.residual,
                    };
                    tracing::warn!(
                        side = %side,
                        triangle = fallback.triangle.0,
                        "{reason}; using linear split estimate"
                    );
                }
                self.emit(EventKind::SolverFallback {
                    side: side.to_string(),
                    triangle: fallback.triangle.0,
                    iterations: fallback.iterations,
                    residual: fallback.residual,
                });
            }

            let contacting = self.position.records[side.index()]
                .iter()
                .filter(|r| r.is_contact())
                .count() as u32;
            let max_pressure = records.iter().fold(0.0_f64, |m, r| m.max(r.pressure));
            if self.config.verbose >= 1 {
                tracing::info!(
                    side = %side,
                    contacting,
                    max_pressure,
                    fallbacks = fallbacks.len(),
                    "pressure pass"
                );
            }
            self.emit(EventKind::PressurePass {
                side: side.to_string(),
                contacting,
                max_pressure,
                fallbacks: fallbacks.len() as u32,
            });

            self.dynamics.records[side.index()] = records;
            self.dynamics.fallbacks[side.index()] = fallbacks.len() as u32;
        }

        let casting = &self.dynamics.records[MeshSide::Casting.index()];
        self.dynamics.loads =
            BodyForces::from_casting_pressure(&self.meshes[0], &self.meshes[1], casting);
        self.dynamics.potential_energy = casting.iter().map(|r| r.potential_energy).sum();
        self.dynamics.key = Some(key);
        self.counters.pressure += 1;
    }

    fn realize_report(&mut self) {
        self.realize_dynamics();
        let key = self.pose_key();
        if self.report.key == Some(key) {
            return;
        }

        for side in MeshSide::BOTH {
            let i = side.index();
            self.report.sides[i] = SideStats::compute(
                &self.meshes[i],
                &self.position.records[i],
                &self.dynamics.records[i],
            );
        }

        let casting = &self.report.sides[MeshSide::Casting.index()].total;
        if self.config.verbose >= 1 {
            tracing::info!(
                contact_area = casting.contact_area,
                max_pressure = casting.max_pressure,
                potential_energy = self.dynamics.potential_energy,
                "contact report"
            );
        }
        let target_force = self.dynamics.loads.target.force;
        self.emit(EventKind::Report {
            contact_area: casting.contact_area,
            target_force: target_force.to_array(),
            potential_energy: self.dynamics.potential_energy,
        });

        self.report.key = Some(key);
        self.counters.report += 1;
    }

    fn emit(&self, kind: EventKind) {
        if let Some(bus) = &self.bus {
            bus.emit(ContactEvent::new(self.sequence, kind));
        }
    }
}

impl ContactForce for ContactEngine {
    fn set_poses(&mut self, casting: Pose, target: Pose) -> bool {
        let casting_changed = self.set_pose(MeshSide::Casting, casting);
        let target_changed = self.set_pose(MeshSide::Target, target);
        casting_changed || target_changed
    }

    fn body_forces(&mut self) -> BodyForces {
        self.realize(Stage::DynamicsReady);
        self.dynamics.loads
    }

    fn potential_energy(&mut self) -> f64 {
        self.realize(Stage::DynamicsReady);
        self.dynamics.potential_energy
    }
}

struct Fallback {
    triangle: TriangleId,
    iterations: u32,
    residual: f64,
}

/// Pressure evaluation of one mesh side against its opposing mesh.
struct PressurePass<'a> {
    solver: &'a PressureSolver,
    source: &'a ContactMesh,
    source_params: &'a ContactParameters,
    opposing: &'a ContactMesh,
    opposing_params: &'a ContactParameters,
}

impl PressurePass<'_> {
    fn run(&self, proximity: &[ProximityRecord]) -> (Vec<PressureRecord>, Vec<Fallback>) {
        let mut fallbacks = Vec::new();
        let records = proximity
            .iter()
            .enumerate()
            .map(|(i, prox)| {
                let Some(other) = prox.target else {
                    return PressureRecord::NONE;
                };
                let t = TriangleId(i as u32);
                let own = self.source_params.layer_at(self.source, t);
                let opposing = self.opposing_params.layer_at(self.opposing, other);

                let solution = self.solver.solve(&own, &opposing, prox.depth);
                let energy = self.solver.energy_density(&own, &opposing, prox.depth, &solution)
                    * self.source.triangle(t).area;

                let fallback = match solution.status {
                    SolveStatus::Fallback {
                        iterations,
                        residual,
                    } => {
                        fallbacks.push(Fallback {
                            triangle: t,
                            iterations,
                            residual,
                        });
                        true
                    }
                    _ => false,
                };

                PressureRecord {
                    pressure: solution.pressure,
                    potential_energy: energy,
                    sub_depths: solution.sub_depths,
                    fallback,
                }
            })
            .collect();
        (records, fallbacks)
    }
}
