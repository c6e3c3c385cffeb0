use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use paircorr::bins::BinEdges;
use paircorr::geom2::{Domain, GeomCfg};
use paircorr::sample::{rectangle, sample_uniform, ReplayToken};
use paircorr::{pair_correlation_2d_with, CorrectionMethod, OutsidePolicy, PcfCfg};
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "paircorr")]
#[command(about = "Edge-corrected 2D pair correlation function g(r)")]
struct Cmd {
    /// Log per-stage timings
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compute g(r) for a point table and write it as JSON
    Run(RunArgs),
    /// Draw uniform points in a rectangle and write them as CSV
    Sample {
        #[arg(long)]
        n: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 1.0)]
        width: f64,
        #[arg(long, default_value_t = 1.0)]
        height: f64,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(clap::Args, Clone, Debug)]
struct RunArgs {
    /// CSV or Parquet file with `x` and `y` columns
    #[arg(long)]
    input: String,
    /// Explicit bin edges, comma separated
    #[arg(long, value_delimiter = ',')]
    edges: Option<Vec<f64>>,
    /// Largest radius for equal-width bins (used when --edges is absent)
    #[arg(long)]
    r_max: Option<f64>,
    /// Number of equal-width bins
    #[arg(long, default_value_t = 50)]
    bins: usize,
    /// Domain shell polygon (`x`, `y` columns); convex hull of the points if absent
    #[arg(long)]
    domain: Option<String>,
    /// Exclusion zone polygon; may be repeated
    #[arg(long)]
    hole: Vec<String>,
    /// Drop points outside the domain instead of failing
    #[arg(long)]
    exclude_outside: bool,
    /// Only use points farther than the largest edge from the boundary
    #[arg(long)]
    guard: bool,
    #[arg(long)]
    out: String,
}

#[derive(Serialize)]
struct RunReport<'a> {
    g: &'a [f64],
    r_centers: &'a [f64],
    pdf: &'a [f64],
    counts: &'a [u64],
    density: f64,
    domain_area: f64,
    n_points: usize,
    n_reference: usize,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Run(args) => run(&args),
        Action::Sample {
            n,
            seed,
            width,
            height,
            out,
        } => sample(n, seed, width, height, &out),
        Action::Report => report(),
    }
}

fn bin_edges(args: &RunArgs) -> Result<BinEdges> {
    let edges = match (&args.edges, args.r_max) {
        (Some(edges), _) => BinEdges::new(edges.clone())?,
        (None, Some(r_max)) => BinEdges::uniform(r_max, args.bins)?,
        (None, None) => bail!("either --edges or --r-max is required"),
    };
    Ok(edges)
}

fn run(args: &RunArgs) -> Result<()> {
    tracing::info!(input = %args.input, out = %args.out, "run");
    let points = io::read_points(&args.input)?;
    let edges = bin_edges(args)?;
    let cfg = PcfCfg {
        domain_polygon: args.domain.as_deref().map(io::read_points).transpose()?,
        holes: args
            .hole
            .iter()
            .map(|h| io::read_points(h))
            .collect::<Result<Vec<_>>>()?,
        outside: if args.exclude_outside {
            OutsidePolicy::Exclude
        } else {
            OutsidePolicy::Reject
        },
        method: if args.guard {
            CorrectionMethod::Guard
        } else {
            CorrectionMethod::Exact
        },
        ..PcfCfg::default()
    };

    let result = pair_correlation_2d_with(&points, edges.edges(), &cfg)
        .with_context(|| format!("computing g(r) for {}", args.input))?;
    let report = RunReport {
        g: &result.g,
        r_centers: &result.r_centers,
        pdf: &result.pdf,
        counts: &result.counts,
        density: result.density,
        domain_area: result.domain_area,
        n_points: result.positions.len(),
        n_reference: result.n_reference(),
    };

    let out_path = Path::new(&args.out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", args.out))?;
    provenance::write_sidecar(
        out_path,
        Payload::new(
            "run",
            json!({
                "input": args.input,
                "edges": edges.edges(),
                "domain": args.domain,
                "holes": args.hole,
                "exclude_outside": args.exclude_outside,
                "guard": args.guard,
            }),
        ),
    )?;
    Ok(())
}

fn sample(n: usize, seed: u64, width: f64, height: f64, out: &str) -> Result<()> {
    tracing::info!(n, seed, width, height, out, "sample");
    let domain = Domain::new(rectangle(width, height), vec![], GeomCfg::default())?;
    let points = sample_uniform(&domain, n, ReplayToken::new(seed), n.saturating_mul(100).max(100))
        .context("rejection sampling ran out of attempts")?;
    let out_path = Path::new(out);
    io::write_points(out_path, &points)?;
    provenance::write_sidecar(
        out_path,
        Payload::new(
            "sample",
            json!({ "n": n, "seed": seed, "width": width, "height": height }),
        ),
    )?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::document(&Payload::new("report", json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
