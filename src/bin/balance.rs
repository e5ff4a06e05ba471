//! Balanced K-Means Binary
//!
//! Clusters a point set and prints the result as JSON.
//! Without `--input`, clusters the two-column five-point demo set.

use anyhow::Context;
use balanced_kmeans::*;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Size-balanced k-means clustering", long_about = None)]
struct Args {
    /// number of clusters
    #[arg(short, long, default_value_t = 2)]
    k: usize,
    /// seed for centroid initialization (falls back to BKMEANS_SEED)
    #[arg(short, long)]
    seed: Option<u64>,
    /// independent runs; the cheapest is kept
    #[arg(short, long, default_value_t = KMEANS_RESTARTS)]
    restarts: usize,
    /// iteration ceiling per run
    #[arg(short, long, default_value_t = KMEANS_MAX_ITERATIONS)]
    iterations: usize,
    /// largest centroid movement still considered converged
    #[arg(short, long, default_value_t = KMEANS_TOLERANCE)]
    tolerance: Energy,
    /// seed centroids with k-means++ instead of uniformly
    #[arg(long)]
    plusplus: bool,
    /// skip the post-convergence slot exchange
    #[arg(long)]
    no_exchange: bool,
    /// JSON file holding an array of points, e.g. [[1, 2], [1, 3]]
    #[arg(long)]
    input: Option<std::path::PathBuf>,
}

fn main() -> anyhow::Result<()> {
    log()?;
    let args = Args::parse();
    let dataset = match args.input {
        None => Fixture::scenario(),
        Some(ref path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let points = serde_json::from_str::<Vec<Vec<Coordinate>>>(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            Dataset::try_from(points)?
        }
    };
    let seeding = match args.plusplus {
        true => Seeding::PlusPlus,
        false => Seeding::Random,
    };
    let km = BalancedKMeans::new(args.k)
        .restarts(args.restarts)
        .iterations(args.iterations)
        .tolerance(args.tolerance)
        .exchange(!args.no_exchange)
        .seeding(seeding);
    let km = match args.seed {
        Some(seed) => km.seed(seed),
        None => km,
    };
    let clustering = km.fit(&dataset, &Hungarian)?;
    log::info!("{:<32}{:<32}", "kmeans sizes", format!("{:?}", clustering.sizes()));
    println!("{}", serde_json::to_string_pretty(&clustering)?);
    Ok(())
}
