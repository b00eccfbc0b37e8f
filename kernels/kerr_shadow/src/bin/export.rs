// Kerr Shadow Curve Export CLI
//
// Computes shadow boundary curves over a (spin, inclination) grid and
// writes them as one combined CSV, with an optional JSON manifest of
// per-curve boundary metrics. An external figure tool does the plotting.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use kerr_shadow::*;

/// CLI arguments for the shadow curve export
#[derive(Parser, Debug)]
#[command(name = "export")]
#[command(about = "Export Kerr shadow boundary curves as CSV", long_about = None)]
struct Args {
    /// Comma-separated spin values, signed (a > 0 prograde)
    #[arg(long, default_value = "-0.9,-0.5,0.0,0.5,0.9", allow_hyphen_values = true)]
    a_list: String,

    /// Comma-separated observer inclinations in degrees from the spin axis
    #[arg(long, default_value = "0,30,60,90")]
    i_list: String,

    /// Points per curve (first point repeated at the end to close it)
    #[arg(short, long, default_value_t = 2048)]
    samples: usize,

    /// Output directory for CSV and manifest
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Also write manifest.json with per-curve boundary metrics
    #[arg(long, default_value_t = false)]
    manifest: bool,

    /// Bracket width at which the root solver stops
    #[arg(long, default_value_t = 1e-12)]
    tol: f64,

    /// Iteration cap for the root solver
    #[arg(long, default_value_t = 128)]
    max_iter: usize,
}

/// One curve's metadata for the manifest and the stdout summary
#[derive(Debug, Serialize)]
struct CurveRecord {
    spin: f64,
    inclination_deg: f64,
    samples: usize,
    metrics: BoundaryMetrics,
}

/// Top-level manifest.json payload
#[derive(Debug, Serialize)]
struct Manifest {
    curve_count: usize,
    samples_per_curve: usize,
    curves: Vec<CurveRecord>,
}

/// Parse a comma-separated list of floats
fn parse_list(raw: &str) -> Result<Vec<f64>, String> {
    raw.split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", item))
        })
        .collect()
}

/// Validate CLI arguments before they reach the physics core
///
/// Spin and inclination ranges are the library's own domain checks, so
/// only the solver knobs and list shapes are checked here.
fn validate(args: &Args) -> Result<(), String> {
    if args.tol <= 0.0 {
        return Err(format!("tol must be positive, got {}", args.tol));
    }
    if args.max_iter == 0 {
        return Err("max-iter must be at least 1".to_string());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();
    validate(&args).map_err(|e| format!("invalid arguments: {}", e))?;

    let spins = parse_list(&args.a_list).map_err(|e| format!("invalid --a-list: {}", e))?;
    let inclinations_deg =
        parse_list(&args.i_list).map_err(|e| format!("invalid --i-list: {}", e))?;
    if spins.is_empty() || inclinations_deg.is_empty() {
        return Err("spin and inclination lists must be non-empty".into());
    }

    let cfg = SolverConfig::new(args.tol, args.max_iter);

    // Print configuration
    println!("\nKerr Shadow Curve Export");
    println!("=======================================");
    println!("  Spins: {:?}", spins);
    println!("  Inclinations (deg): {:?}", inclinations_deg);
    println!("  Samples per curve: {}", args.samples);
    println!("  Manifest: {}", args.manifest);
    println!("=======================================\n");

    // Create progress bar over the (spin, inclination) grid
    let total_curves = (spins.len() * inclinations_deg.len()) as u64;
    let pb = ProgressBar::new(total_curves);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} curves ({percent}%)")?
            .progress_chars("█▓▒░ "),
    );

    println!("Computing shadow boundaries...");

    let mut csv = String::from("spin,inclination,alpha,beta\n");
    let mut records = Vec::with_capacity(total_curves as usize);
    for &a in &spins {
        for &i_deg in &inclinations_deg {
            // Degrees on the CLI, radians at the library boundary
            let curve = compute_shadow_with(a, i_deg.to_radians(), args.samples, &cfg)?;
            for p in curve.points() {
                writeln!(csv, "{:.6},{:.6},{:.9},{:.9}", a, i_deg, p.alpha, p.beta)?;
            }
            records.push(CurveRecord {
                spin: a,
                inclination_deg: i_deg,
                samples: curve.len(),
                metrics: curve.metrics(),
            });
            pb.inc(1);
        }
    }

    pb.finish_with_message("✓ All curves computed");

    let manifest = Manifest {
        curve_count: records.len(),
        samples_per_curve: args.samples,
        curves: records,
    };

    // Save all files
    println!("\n💾 Writing files...");
    fs::create_dir_all(&args.output)?;

    let csv_path = args.output.join("shadow_curves.csv");
    let csv_rows = manifest.curve_count * args.samples;
    fs::write(&csv_path, csv)?;
    println!("  ✓ Wrote curves: {} ({} rows)", csv_path.display(), csv_rows);

    if args.manifest {
        let manifest_path = args.output.join("manifest.json");
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
        println!("  ✓ Wrote manifest: {}", manifest_path.display());
    }

    // Print per-curve summary
    println!("\n📊 Curve summary:");
    println!("  a        i(deg)     D_h        D_v       R_eq");
    for record in &manifest.curves {
        println!(
            "  {:+.3}   {:7.1}   {:8.5}   {:8.5}   {:8.5}",
            record.spin,
            record.inclination_deg,
            record.metrics.horizontal_diameter,
            record.metrics.vertical_diameter,
            record.metrics.equivalent_radius
        );
    }

    println!("\n✨ Export complete!");
    println!("📁 Output: {}\n", args.output.display());

    Ok(())
}
