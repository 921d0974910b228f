//! meshcluster - simplify an OFF mesh by vertex clustering
//!
//! Loads a mesh, clusters it on a uniform grid or in adaptive octree leaves,
//! recomputes normals and valences, prints a summary and optionally writes
//! the result back out.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use meshcluster_algorithms::WeightMode;
use meshcluster_core::TriangleMesh;
use meshcluster_simplification::{
    AdaptiveSimplifier, MeshSession, SimplificationMode, SimplificationOutcome,
    UniformGridSimplifier, DEFAULT_GRID_RESOLUTION, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_VERTICES_PER_LEAF,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "meshcluster", version, about = "Vertex clustering mesh simplification")]
struct Cli {
    /// Input mesh (.off)
    input: PathBuf,

    /// Clustering strategy
    #[arg(long, value_enum, default_value_t = Mode::Grid)]
    mode: Mode,

    /// Grid cells per axis
    #[arg(long, default_value_t = DEFAULT_GRID_RESOLUTION)]
    resolution: u32,

    /// Octree leaf capacity before a node splits
    #[arg(long, default_value_t = DEFAULT_MAX_VERTICES_PER_LEAF)]
    max_per_leaf: usize,

    /// Octree subdivision depth cap (at most 64)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Vertex normal weighting: uniform, area or angle
    #[arg(long, default_value_t = WeightMode::Uniform)]
    weight: WeightMode,

    /// Write the simplified mesh here (format from the extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Grid,
    Octree,
}

impl Cli {
    fn simplification_mode(&self) -> SimplificationMode {
        match self.mode {
            Mode::Grid => SimplificationMode::Grid(UniformGridSimplifier::new(self.resolution)),
            Mode::Octree => SimplificationMode::Octree(
                AdaptiveSimplifier::new(self.max_per_leaf).with_max_depth(self.max_depth),
            ),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mesh = meshcluster_io::read_mesh(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let mut session = MeshSession::new(mesh, cli.weight);
    let mode = cli.simplification_mode();
    log::debug!("simplifying with {:?}, {} normals", mode, cli.weight);

    let outcome = session
        .regenerate(&mode)
        .with_context(|| format!("simplification of {} failed", cli.input.display()))?;
    report(&outcome, session.working());

    if let Some(output) = &cli.output {
        meshcluster_io::write_mesh(session.working(), output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        log::info!("wrote {}", output.display());
    }

    Ok(())
}

fn report(outcome: &SimplificationOutcome, mesh: &TriangleMesh) {
    match outcome {
        SimplificationOutcome::Reduced {
            vertices_before,
            vertices_after,
            faces_before,
            faces_after,
        } => {
            println!(
                "vertices: {} -> {} ({:.1}%)",
                vertices_before,
                vertices_after,
                100.0 * *vertices_after as f64 / *vertices_before as f64
            );
            println!("faces:    {} -> {}", faces_before, faces_after);
        }
        SimplificationOutcome::Unchanged {
            vertex_count,
            candidate_vertex_count,
        } => {
            println!(
                "unchanged: {} vertices ({} clusters would not reduce it)",
                vertex_count, candidate_vertex_count
            );
        }
    }

    let max_valence = mesh.valences.iter().max().copied().unwrap_or(0);
    let center = mesh.center();
    println!("max valence: {}", max_valence);
    println!("center: ({:.4}, {:.4}, {:.4})", center.x, center.y, center.z);
}
