//! Arthro CLI: contact evaluation, demos and validation.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "arthro")]
#[command(version, about = "Arthro: elastic-foundation articular contact engine")]
struct Cli {
    /// Diagnostics level (-v simple, -vv detailed).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a contact scene (JSON) frame by frame.
    Evaluate {
        /// Path to the scene file.
        #[arg(short, long)]
        input: String,

        /// Contact configuration (TOML) overriding the scene's.
        #[arg(short, long)]
        config: Option<String>,

        /// Output CSV file path (stdout if omitted).
        #[arg(short, long)]
        output: Option<String>,

        /// Write the full report as JSON instead of CSV.
        #[arg(long)]
        json: bool,
    },

    /// Run a procedural two-grid or ball-on-plane contact.
    Demo {
        /// Scenario (grids, ball).
        #[arg(short, long, default_value = "grids")]
        scenario: String,

        /// Overlap depth (m).
        #[arg(long, default_value_t = 0.002)]
        overlap: f64,

        /// Depth–pressure law (linear, nonlinear).
        #[arg(short, long, default_value = "linear")]
        formulation: String,

        /// Solve the two layers in series instead of lumping them.
        #[arg(long)]
        split: bool,

        /// Material preset for both meshes.
        #[arg(short, long, default_value = "tibial_cartilage")]
        material: String,
    },

    /// Validate a contact scene (.json) or configuration (.toml).
    Validate {
        path: String,
    },

    /// List material presets.
    Materials {
        /// Print presets as TOML parameter tables.
        #[arg(long)]
        toml: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Evaluate {
            input,
            config,
            output,
            json,
        } => commands::evaluate(&input, config.as_deref(), output.as_deref(), json, cli.verbose),
        Commands::Demo {
            scenario,
            overlap,
            formulation,
            split,
            material,
        } => commands::demo(&scenario, overlap, &formulation, split, &material, cli.verbose),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Materials { toml } => commands::materials(toml),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
