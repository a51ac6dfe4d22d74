//! CLI command implementations.

use arthro_contact::{ContactConfig, ContactEngine, ContactForce, Stage};
use arthro_io::{evaluate as evaluate_scene, validate_input, ContactInput};
use arthro_material::{FoundationFormulation, MaterialDatabase};
use arthro_math::{Pose, Quat, Vec3};
use arthro_mesh::generators::{opposing_quad_grid, quad_grid, uv_sphere};
use arthro_mesh::{ContactMesh, MaterialFields};
use arthro_telemetry::{EventBus, TracingSink};
use arthro_types::MeshSide;
use tracing_subscriber::EnvFilter;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Installs the log formatter; `RUST_LOG` overrides the `-v` level.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Evaluate a scene file.
pub fn evaluate(
    input_path: &str,
    config_path: Option<&str>,
    output_path: Option<&str>,
    json: bool,
    verbose: u8,
) -> CliResult {
    let mut input = ContactInput::load(input_path)?;
    if let Some(path) = config_path {
        input.config = ContactConfig::from_toml(&std::fs::read_to_string(path)?)?;
    }
    input.config.verbose = input.config.verbose.max(verbose);

    tracing::info!(
        input = input_path,
        frames = input.frames().len(),
        formulation = %input.config.elastic_foundation_formulation,
        lumped = input.config.use_lumped_contact_model,
        "Evaluating scene"
    );
    let output = evaluate_scene(&input)?;
    let rendered = if json { output.to_json()? } else { output.to_csv() };

    if let Some(path) = output_path {
        std::fs::write(path, &rendered)?;
        eprintln!("{} frame(s) written to: {path}", output.frames.len());
    } else {
        print!("{rendered}");
    }
    Ok(())
}

/// Run a procedural scenario and print its report.
pub fn demo(
    scenario: &str,
    overlap: f64,
    formulation: &str,
    split: bool,
    material: &str,
    verbose: u8,
) -> CliResult {
    println!("Arthro Contact Demo");
    println!("═══════════════════");
    println!();

    let db = MaterialDatabase::with_defaults();
    let params = db.get(material).ok_or_else(|| {
        format!(
            "Unknown material: '{material}'. Available: {}",
            db.names().join(", ")
        )
    })?;
    let formulation: FoundationFormulation = formulation.parse()?;

    let config = ContactConfig {
        elastic_foundation_formulation: formulation,
        use_lumped_contact_model: !split,
        verbose,
        ..ContactConfig::default()
    }
    .with_params(params.clone())
    .with_proximity_bounds(0.0, (4.0 * overlap).max(params.thickness));

    let (casting, target, target_pose) = match scenario {
        "grids" => {
            let lower = quad_grid(16, 16, 0.04, 0.04);
            let mut casting = ContactMesh::new("lower", lower, MaterialFields::uniform())?;
            casting.split_regions_by_axis(0, "medial", "lateral")?;
            let target = ContactMesh::new(
                "upper",
                opposing_quad_grid(16, 16, 0.04, 0.04, 0.0),
                MaterialFields::uniform(),
            )?;
            (casting, target, Pose::from_translation(Vec3::new(0.0, 0.0, -overlap)))
        }
        "ball" => {
            let mut casting =
                ContactMesh::new("ball", uv_sphere(0.02, 24, 32), MaterialFields::uniform())?;
            casting.split_regions_by_axis(0, "medial", "lateral")?;
            let mut plane = quad_grid(24, 24, 0.03, 0.03);
            plane.flip_orientation();
            let target = ContactMesh::new("plateau", plane, MaterialFields::uniform())?;
            let pose = Pose::new(
                Quat::from_rotation_x(-std::f64::consts::FRAC_PI_2),
                Vec3::new(0.0, 0.02 - overlap, 0.0),
            );
            (casting, target, pose)
        }
        other => {
            return Err(format!("Unknown scenario: {other}. Available: grids, ball").into());
        }
    };

    println!("Scenario:     {scenario}");
    println!("Material:     {material}");
    println!("Formulation:  {formulation} ({})", if split { "split" } else { "lumped" });
    println!(
        "Triangles:    {} casting, {} target",
        casting.triangle_count(),
        target.triangle_count()
    );
    println!();

    let mut engine = ContactEngine::new(config, casting, target)?;
    if verbose >= 1 {
        engine = engine.with_event_bus(EventBus::new().with_sink(Box::new(TracingSink::new())));
    }
    engine.set_pose(MeshSide::Target, target_pose);
    engine.realize(Stage::ReportReady);

    for side in MeshSide::BOTH {
        let summary = engine.pass_summary(side);
        let stats = *engine.stats(side);
        println!("{side}:");
        println!("  Contacting:        {} triangles", stats.contacting_triangles);
        println!(
            "  Detection:         {} cached, {} neighbor, {} hierarchy",
            summary.cached, summary.neighbor, summary.hierarchy
        );
        println!("  Contact area:      {:.4e} m²", stats.contact_area);
        println!("  Max proximity:     {:.4e} m", stats.max_proximity);
        println!("  Mean pressure:     {:.4e} Pa", stats.mean_pressure);
        println!("  Max pressure:      {:.4e} Pa", stats.max_pressure);
        println!(
            "  Center of pressure: [{:.4e}, {:.4e}, {:.4e}]",
            stats.center_of_pressure.x, stats.center_of_pressure.y, stats.center_of_pressure.z
        );
        for region in &engine.side_stats(side).regions {
            println!(
                "  Region {:<10} {:.4e} m², {:.4e} N",
                region.name,
                region.stats.contact_area,
                region.stats.force.length()
            );
        }
        println!();
    }

    let loads = engine.body_forces();
    println!("Target force:       {:?}", loads.target.force.to_array());
    println!("Target moment:      {:?}", loads.target.moment.to_array());
    println!("Potential energy:   {:.4e} J", engine.potential_energy());
    if let Some(bus) = engine.event_bus_mut() {
        bus.finalize();
    }
    Ok(())
}

/// Validate a scene or config file.
pub fn validate(path: &str) -> CliResult {
    println!("Arthro Validator");
    println!("────────────────");
    println!();

    let content = std::fs::read_to_string(path)?;
    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        match ContactConfig::from_toml(&content) {
            Ok(_) => println!("✅ Config is valid."),
            Err(e) => println!("❌ Config validation failed: {e}"),
        }
    } else if path.ends_with(".json") {
        println!("Validating scene: {path}");
        let input = ContactInput::load(path)?;
        match validate_input(&input) {
            Ok(()) => println!(
                "✅ Scene is valid ({} + {} tris, {} frame(s)).",
                input.casting.mesh.triangle_count(),
                input.target.mesh.triangle_count(),
                input.frames().len()
            ),
            Err(e) => println!("❌ Scene validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (scene).");
    }
    Ok(())
}

/// List material presets.
pub fn materials(as_toml: bool) -> CliResult {
    let db = MaterialDatabase::with_defaults();
    if as_toml {
        for name in db.names() {
            if let Some(params) = db.get(name) {
                println!("[{name}]");
                println!("{}", toml::to_string(params)?);
            }
        }
        return Ok(());
    }

    println!("{:<20} {:>12} {:>8} {:>10} {:>14}", "name", "E (Pa)", "nu", "h (m)", "k (Pa/m)");
    for name in db.names() {
        if let Some(params) = db.get(name) {
            let layer = params.uniform_layer();
            println!(
                "{:<20} {:>12.3e} {:>8.3} {:>10.4} {:>14.4e}",
                name,
                params.elastic_modulus,
                params.poissons_ratio,
                params.thickness,
                layer.stiffness()
            );
        }
    }
    Ok(())
}
