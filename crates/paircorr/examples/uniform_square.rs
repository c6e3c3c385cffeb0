//! Print corrected and uncorrected g(r) for a uniform point cloud.
//!
//! Usage:
//!   cargo run -p paircorr --example uniform_square -- [n] [seed]
//!
//! For a uniform cloud the corrected curve stays near 1 at every radius; the
//! uncorrected one drops as the annuli reach past the square's edges.

use paircorr::histogram::normalize;
use paircorr::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let n: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(2000);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);

    let domain = Domain::new(rectangle(1.0, 1.0), vec![], GeomCfg::default()).unwrap();
    let pts = sample_uniform(&domain, n, ReplayToken::new(seed), 100 * n).unwrap();
    let edges = BinEdges::uniform(0.3, 10).unwrap();
    let cfg = PcfCfg {
        domain_polygon: Some(rectangle(1.0, 1.0)),
        ..PcfCfg::default()
    };
    let out = pair_correlation_2d_with(&pts, edges.edges(), &cfg).unwrap();
    let naive = normalize(
        &out.counts,
        &CorrectionTable::unclipped(n, edges.n_bins()),
        None,
        &edges,
        out.density,
    )
    .unwrap();

    println!("{:>8} {:>10} {:>10}", "r", "g", "naive");
    for k in 0..edges.n_bins() {
        println!(
            "{:>8.3} {:>10.4} {:>10.4}",
            out.r_centers[k], out.g[k], naive.g[k]
        );
    }
}
