mod error;

use clap::{Args, Parser, Subcommand};
use error::{CliError, CliResult};
use rp_combustion::{
    CombustionPropertyProvider, PropellantRole, TabulatedCombustionModel, filter_catalog,
};
use rp_core::numeric::{ensure_finite, ensure_positive};
use rp_core::units::{Area, circle_area, m, m2, pa};
use rp_core::{RpError, RpResult};
use rp_engine::{DesignInputs, EngineDesign, PerformanceReport, run_sweep};
use rp_project::DesignFile;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rp-cli")]
#[command(about = "RocketPerf CLI - Liquid rocket engine performance calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the LOX / ethanol demo design point
    Demo,
    /// Evaluate a single design point given on the command line
    Evaluate(EvaluateArgs),
    /// Evaluate every design in a design file
    Run {
        /// Path to the design file (YAML or JSON)
        design_path: PathBuf,
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a parameter sweep from a design file
    Sweep {
        /// Path to the design file (YAML or JSON)
        design_path: PathBuf,
        /// Sweep ID to run
        sweep_id: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate design file syntax and values
    Validate {
        /// Path to the design file (YAML or JSON)
        design_path: PathBuf,
    },
    /// List known propellants and tabulated pairs
    Propellants {
        /// Optional search text (id, name or alias)
        query: Option<String>,
    },
}

#[derive(Args)]
struct EvaluateArgs {
    /// Oxidizer name (e.g. LOX, N2O4)
    #[arg(long)]
    ox: String,
    /// Fuel name (e.g. C2H5OH, RP1, CH4)
    #[arg(long)]
    fuel: String,
    /// Oxidizer-to-fuel mass ratio
    #[arg(long)]
    mr: f64,
    /// Chamber pressure in Pa
    #[arg(long)]
    pc_pa: f64,
    /// Throat radius in m
    #[arg(long, conflicts_with = "throat_area_m2")]
    throat_radius_m: Option<f64>,
    /// Throat area in m²
    #[arg(long)]
    throat_area_m2: Option<f64>,
    /// Nozzle expansion ratio Ae/At
    #[arg(long)]
    eps: f64,
    /// Ambient pressure in Pa
    #[arg(long, default_value_t = 0.0)]
    pa: f64,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl EvaluateArgs {
    /// Reject non-finite or non-physical numbers before anything is evaluated.
    fn check(&self) -> RpResult<()> {
        ensure_positive(self.mr, "--mr")?;
        ensure_positive(self.pc_pa, "--pc-pa")?;
        ensure_positive(self.eps, "--eps")?;
        if let Some(r) = self.throat_radius_m {
            ensure_positive(r, "--throat-radius-m")?;
        }
        if let Some(a) = self.throat_area_m2 {
            ensure_positive(a, "--throat-area-m2")?;
        }
        if ensure_finite(self.pa, "--pa")? < 0.0 {
            return Err(RpError::InvalidArg {
                what: format!("--pa must be non-negative (got {})", self.pa),
            });
        }
        Ok(())
    }

    fn throat_area(&self) -> CliResult<Area> {
        match (self.throat_radius_m, self.throat_area_m2) {
            (Some(r), None) => Ok(circle_area(m(r))),
            (None, Some(a)) => Ok(m2(a)),
            _ => Err(CliError::InvalidArgs(
                "give exactly one of --throat-radius-m or --throat-area-m2".to_string(),
            )),
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let provider = CombustionPropertyProvider::tabulated().with_cache();

    match cli.command {
        Commands::Demo => cmd_demo(&provider),
        Commands::Evaluate(args) => cmd_evaluate(&provider, &args),
        Commands::Run { design_path, json } => cmd_run(&provider, &design_path, json),
        Commands::Sweep {
            design_path,
            sweep_id,
            output,
        } => cmd_sweep(&provider, &design_path, &sweep_id, output.as_deref()),
        Commands::Validate { design_path } => cmd_validate(&design_path),
        Commands::Propellants { query } => cmd_propellants(&provider, query.as_deref()),
    }
}

type Provider = CombustionPropertyProvider<TabulatedCombustionModel>;

fn cmd_demo(provider: &Provider) -> CliResult<()> {
    let mut design = EngineDesign::new();
    design.run_design(
        provider,
        "LOX",
        "C2H5OH",
        1.45,
        pa(1.0e7),
        circle_area(m(0.01)),
        2.3,
    )?;

    let mdot = design.mass_flow_rate()?.value;
    let thrust = design.thrust(pa(0.0))?.value;
    println!("Mass flow rate: {:.4} kg/s", mdot);
    println!("Thrust: {:.3} kN", thrust / 1.0e3);
    Ok(())
}

fn cmd_evaluate(provider: &Provider, args: &EvaluateArgs) -> CliResult<()> {
    args.check()?;
    let inputs = DesignInputs {
        oxidizer: args.ox.clone(),
        fuel: args.fuel.clone(),
        mixture_ratio: args.mr,
        chamber_pressure: pa(args.pc_pa),
        throat_area: args.throat_area()?,
        expansion_ratio: args.eps,
    };
    let report = inputs.evaluate(provider)?.performance(pa(args.pa))?;
    print_reports(&[(String::from("cli"), report)], args.json)
}

fn load_design_file(path: &Path) -> CliResult<DesignFile> {
    Ok(rp_project::load(path)?)
}

fn cmd_run(provider: &Provider, design_path: &Path, json: bool) -> CliResult<()> {
    let file = load_design_file(design_path)?;
    let ambient = pa(file.ambient_pressure_pa);

    let mut reports = Vec::with_capacity(file.designs.len());
    for design in &file.designs {
        let report = design
            .to_inputs()
            .evaluate(provider)
            .and_then(|d| d.performance(ambient))?;
        reports.push((design.id.clone(), report));
    }

    if reports.is_empty() {
        println!("No designs found in {}", design_path.display());
        return Ok(());
    }
    print_reports(&reports, json)
}

fn print_reports(reports: &[(String, PerformanceReport)], json: bool) -> CliResult<()> {
    if json {
        let by_id: Vec<serde_json::Value> = reports
            .iter()
            .map(|(id, report)| serde_json::json!({ "id": id, "report": report }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&by_id)?);
    } else {
        for (id, report) in reports {
            println!("[{}]", id);
            println!("{}", report);
        }
    }
    Ok(())
}

fn cmd_sweep(
    provider: &Provider,
    design_path: &Path,
    sweep_id: &str,
    output: Option<&Path>,
) -> CliResult<()> {
    let file = load_design_file(design_path)?;
    let sweep = file
        .sweep(sweep_id)
        .ok_or_else(|| CliError::SweepNotFound(sweep_id.to_string()))?;
    let design = file
        .design(&sweep.design_id)
        .ok_or_else(|| CliError::DesignNotFound(sweep.design_id.clone()))?;

    let definition = sweep.to_definition()?;
    let result = run_sweep(
        provider,
        &design.to_inputs(),
        &definition,
        pa(file.ambient_pressure_pa),
    )?;
    let csv = result.to_csv();

    if let Some(path) = output {
        std::fs::write(path, csv).map_err(|source| CliError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        println!(
            "✓ Exported {} sweep points to {} ({} failed)",
            result.points.len(),
            path.display(),
            result.num_failed
        );
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_validate(design_path: &Path) -> CliResult<()> {
    println!("Validating design file: {}", design_path.display());
    let file = load_design_file(design_path)?;
    println!(
        "✓ Design file is valid ({} designs, {} sweeps)",
        file.designs.len(),
        file.sweeps.len()
    );
    Ok(())
}

fn cmd_propellants(provider: &Provider, query: Option<&str>) -> CliResult<()> {
    let entries = filter_catalog(query.unwrap_or(""));
    if entries.is_empty() {
        println!("No propellants match");
        return Ok(());
    }

    for role in [PropellantRole::Oxidizer, PropellantRole::Fuel] {
        println!("{}s:", capitalize(&role.to_string()));
        for entry in entries.iter().filter(|e| e.role() == role) {
            println!(
                "  {:<8} {} (aliases: {})",
                entry.canonical_id,
                entry.display_name,
                entry.aliases.join(", ")
            );
        }
    }

    let model = provider.model();
    println!("\nTabulated pairs (optimum MR at 10 MPa):");
    for (ox, fuel) in model.supported_pairs() {
        let Some((lo, hi)) = model.mixture_ratio_range(ox, fuel) else {
            continue;
        };
        match model.optimum_mixture_ratio(ox, fuel, 10.0) {
            Ok(best) => println!("  {} / {}: MR {lo}..{hi}, optimum {best}", ox, fuel),
            Err(e) => println!("  {} / {}: MR {lo}..{hi} ({e})", ox, fuel),
        }
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
