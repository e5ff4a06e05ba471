//! Size-balanced k-means clustering.
//!
//! Partitions N points in d-dimensional space into k clusters whose sizes
//! differ by at most one. Balance is enforced by the assignment step itself:
//! every centroid is replicated into ⌈N/k⌉ or ⌊N/k⌋ slots, and points are
//! matched to slots by a minimum-cost perfect matching over squared
//! Euclidean distances.
//!
//! ## Pipeline
//!
//! 1. **Seeding** — Pick k distinct points as initial centroids
//! 2. **Costs** — Build the N × N point-to-slot cost matrix
//! 3. **Assignment** — Solve the perfect matching (pluggable)
//! 4. **Update** — Recompute centroids under the fixed target sizes
//! 5. **Trajectory** — Repeat until centroids stop moving
//!
//! ## Core Types
//!
//! - [`Dataset`] — Validated point set
//! - [`Point`] — A single d-dimensional vector
//! - [`Balance`] — Replicated slot arithmetic and target sizes
//! - [`BalancedKMeans`] — Run configuration and entry point
//! - [`Clustering`] — Final centroids and labels
//!
//! ## Algorithms
//!
//! - [`Hungarian`] — Exact O(N³) assignment solver
//! - [`Absorb`] — Incremental centroid accumulation
mod absorb;
mod assignment;
mod balance;
mod clustering;
mod costs;
mod dataset;
mod error;
mod hungarian;
mod kmeans;
mod point;
mod seeding;
mod step;
mod update;

pub use absorb::*;
pub use assignment::*;
pub use balance::*;
pub use clustering::*;
pub use costs::*;
pub use dataset::*;
pub use error::*;
pub use hungarian::*;
pub use kmeans::*;
pub use point::*;
pub use seeding::*;
pub use step::*;
pub use tests::*;
pub use update::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Coordinates of points and centroids.
pub type Coordinate = f64;
/// Squared distances, assignment costs, and convergence thresholds.
pub type Energy = f64;

// ============================================================================
// K-MEANS CLUSTERING
// Defaults for a single run. Every value can be overridden per run.
// ============================================================================
/// Largest component-wise centroid movement still considered converged.
pub const KMEANS_TOLERANCE: Energy = 1e-9;
/// Iteration ceiling guaranteeing termination.
pub const KMEANS_MAX_ITERATIONS: usize = 256;
/// Independent seeded runs; the lowest-cost run wins.
pub const KMEANS_RESTARTS: usize = 1;
/// Try handing the extra ⌈N/k⌉ slots to other clusters after convergence.
pub const KMEANS_EXCHANGE: bool = true;
/// Environment variable consulted for a seed when none is given.
pub const KMEANS_SEED_VAR: &str = "BKMEANS_SEED";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Dual logging: INFO to the terminal, DEBUG to `logs/<unix-time>.log`.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = std::fs::File::create(format!("logs/{}.log", time))?;
    let file = simplelog::WriteLogger::new(log::LevelFilter::Debug, config.clone(), file);
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}
