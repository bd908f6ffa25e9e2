use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use nalgebra::Vector2;
use rand::{rngs::StdRng, SeedableRng};

use sdfield::{occupancy_map, sample_workspace, Workspace};

/// Samples a random obstacle workspace and prints its occupancy map
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of circular obstacles
    #[clap(short, long, default_value_t = 5)]
    circles: usize,

    /// Maximum obstacle radius, as a fraction of the workspace diagonal
    #[clap(short, long, default_value_t = 0.15)]
    radius: f64,

    /// Occupancy grid resolution (cells per side)
    #[clap(short, long, default_value_t = 32)]
    size: usize,

    /// RNG seed
    #[clap(long, default_value_t = 0)]
    seed: u64,
}

fn print_occupancy(size: usize, workspace: &Workspace) -> Result<()> {
    let occ = occupancy_map(size, workspace)?;
    // Row 0 is printed last so that +y points up
    for j in (0..size).rev() {
        let mut line = String::with_capacity(2 * size);
        for i in 0..size {
            line.push_str(if occ[(i, j)] { "XX" } else { "  " });
        }
        println!("{line}");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let workspace = sample_workspace(&mut rng, args.circles, args.radius);
    info!(
        "sampled workspace with {} obstacles in {}",
        workspace.obstacles.len(),
        workspace.bounds
    );
    let (d, nearest) = workspace.min_dist(&Vector2::zeros());
    info!("distance at the center: {d:.3} (obstacle {nearest:?})");

    let start = Instant::now();
    print_occupancy(args.size, &workspace)?;
    info!(
        "rasterized {0}x{0} occupancy map in {1:?}",
        args.size,
        start.elapsed()
    );
    Ok(())
}
