// Kerr ISCO Report CLI
//
// Tabulates the innermost stable circular orbit radius and radiative
// efficiency over a grid of spin magnitudes, prograde and retrograde
// senses side by side, and optionally writes the signed spin sweep as
// CSV for external plotting.

use clap::Parser;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use kerr_shadow::*;

/// CLI arguments for the ISCO report
#[derive(Parser, Debug)]
#[command(name = "report")]
#[command(about = "Tabulate Kerr ISCO radius and radiative efficiency over a spin grid", long_about = None)]
struct Args {
    /// Number of spin magnitudes between a-min and a-max
    #[arg(short, long, default_value_t = 9)]
    samples: usize,

    /// Smallest spin magnitude in the grid
    #[arg(long, default_value_t = 0.0)]
    a_min: f64,

    /// Largest spin magnitude in the grid (must stay below the extremal limit 1)
    #[arg(long, default_value_t = 0.99)]
    a_max: f64,

    /// Write the signed spin sweep as CSV (columns: spin, r_isco, efficiency)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Bracket width at which the root solver stops
    #[arg(long, default_value_t = 1e-12)]
    tol: f64,

    /// Iteration cap for the root solver
    #[arg(long, default_value_t = 128)]
    max_iter: usize,
}

/// Evenly spaced samples over [lo, hi], endpoints included
fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|k| lo + step * k as f64).collect()
}

/// Validate CLI arguments before they reach the physics core
fn validate(args: &Args) -> Result<(), String> {
    if args.samples == 0 {
        return Err("samples must be at least 1".to_string());
    }
    if !args.a_min.is_finite() || !args.a_max.is_finite() {
        return Err("spin bounds must be finite".to_string());
    }
    if args.a_min < 0.0 {
        return Err(format!(
            "a-min is a spin magnitude and must be >= 0, got {}",
            args.a_min
        ));
    }
    if args.a_max >= 1.0 {
        return Err(format!(
            "a-max must stay below the extremal limit |a| = 1, got {}",
            args.a_max
        ));
    }
    if args.a_min > args.a_max {
        return Err(format!(
            "a-min ({}) must not exceed a-max ({})",
            args.a_min, args.a_max
        ));
    }
    if args.tol <= 0.0 {
        return Err(format!("tol must be positive, got {}", args.tol));
    }
    if args.max_iter == 0 {
        return Err("max-iter must be at least 1".to_string());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse and sanity-check command-line arguments
    let args = Args::parse();
    validate(&args).map_err(|e| format!("invalid arguments: {}", e))?;

    let cfg = SolverConfig::new(args.tol, args.max_iter);
    let grid = linspace(args.a_min, args.a_max, args.samples);

    // Print configuration
    println!("\nKerr ISCO Report");
    println!("=======================================");
    println!("  Spin magnitudes: [{:.3}, {:.3}]", args.a_min, args.a_max);
    println!("  Samples: {}", args.samples);
    println!("  Tolerance: {:e}", args.tol);
    println!("=======================================\n");

    // Fixed-width table, one spin magnitude per row, both orbit senses
    println!("  a      r_ISCO(pro)   eta(pro)   r_ISCO(ret)   eta(ret)");
    for &a in &grid {
        let pro = compute_isco_with(a, &cfg)?;
        let ret = compute_isco_with(-a, &cfg)?;
        println!(
            "  {:.3}     {:8.5}   {:8.6}     {:8.5}   {:8.6}",
            a, pro.radius, pro.efficiency, ret.radius, ret.efficiency
        );
    }

    if let Some(path) = &args.csv {
        // Unfold the magnitude grid into one signed ascending sweep,
        // retrograde half first, the zero row emitted once
        let mut signed: Vec<f64> = grid
            .iter()
            .rev()
            .map(|&a| if a == 0.0 { 0.0 } else { -a })
            .collect();
        for &a in &grid {
            if a != 0.0 {
                signed.push(a);
            }
        }

        let mut csv = String::from("spin,r_isco,efficiency\n");
        for &a in &signed {
            let isco = compute_isco_with(a, &cfg)?;
            writeln!(csv, "{:.6},{:.9},{:.9}", a, isco.radius, isco.efficiency)?;
        }

        println!("\n💾 Writing CSV...");
        fs::write(path, csv)?;
        println!("  ✓ Wrote sweep: {} ({} rows)", path.display(), signed.len());
    }

    println!("\n✨ Report complete! ({} spin magnitudes)\n", grid.len());

    Ok(())
}
