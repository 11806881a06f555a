// automesh — voxel-to-hex-mesh conversion and hierarchical smoothing CLI.

mod config;
mod exit_code;

use std::path::PathBuf;

use automesh_core::classify::{Level, NodeClassifier};
use automesh_core::mesh::MeshBuilder;
use automesh_core::neighbor::NeighborGraph;
use automesh_core::smooth::{Algorithm, Smoother};
use automesh_core::{Label, MeshError};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "automesh", version, about = "Voxel-to-hex-mesh conversion and smoothing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a voxel file (.npy/.spn) into a hex mesh (.inp).
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Required for .spn input, since the format has no header.
        #[arg(long)]
        nx: Option<u32>,
        #[arg(long)]
        ny: Option<u32>,
        #[arg(long)]
        nz: Option<u32>,
        /// Material labels to include. Defaults to every non-zero label
        /// present in the grid.
        #[arg(long, value_delimiter = ',')]
        include: Vec<Label>,
        /// Rename labels before inclusion filtering, `from:to,from:to,...`.
        #[arg(long, value_delimiter = ',')]
        remap: Vec<String>,
        #[arg(long, num_args = 3, value_names = ["SX", "SY", "SZ"])]
        scale: Option<Vec<f64>>,
        #[arg(long, num_args = 3, value_names = ["TX", "TY", "TZ"])]
        translate: Option<Vec<f64>>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Smooth an existing mesh in place.
    Smooth {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value = "taubin")]
        algorithm: AlgorithmArg,
        #[arg(long, default_value_t = 0.5)]
        lambda: f64,
        #[arg(long, default_value_t = -0.52)]
        mu: f64,
        #[arg(long, default_value_t = 10)]
        iterations: u32,
        /// Optional JSON classification override; each entry gives the
        /// level and, for prescribed nodes, the fixed coordinate.
        #[arg(long)]
        classification: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print shape, label histogram, and (for .inp) node/element counts.
    Info { input: PathBuf },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum AlgorithmArg {
    Laplace,
    Taubin,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
        ) => {
            err.print().ok();
            std::process::exit(exit_code::SUCCESS);
        }
        Err(err) => {
            // clap's own exit code for usage errors doesn't match this
            // binary's exit-code table, so print its message and map it in.
            err.print().ok();
            std::process::exit(exit_code::CLI_USAGE);
        }
    };
    let code = match run(cli.command) {
        Ok(()) => exit_code::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            err.downcast_ref::<MeshError>()
                .map(exit_code::for_mesh_error)
                .or_else(|| err.downcast_ref::<automesh_io::IoError>().map(exit_code::for_io_error))
                .unwrap_or(exit_code::BAD_PARAMETER)
        }
    };
    std::process::exit(code);
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Convert {
            input,
            output,
            nx,
            ny,
            nz,
            include,
            remap,
            scale,
            translate,
            config,
        } => convert(input, output, nx, ny, nz, include, remap, scale, translate, config),
        Command::Smooth {
            input,
            output,
            algorithm,
            lambda,
            mu,
            iterations,
            classification,
            config,
        } => smooth(
            input,
            output,
            algorithm,
            lambda,
            mu,
            iterations,
            classification,
            config,
        ),
        Command::Info { input } => info(input),
    }
}

#[allow(clippy::too_many_arguments)]
fn convert(
    input: PathBuf,
    output: PathBuf,
    nx: Option<u32>,
    ny: Option<u32>,
    nz: Option<u32>,
    include: Vec<Label>,
    remap: Vec<String>,
    scale: Option<Vec<f64>>,
    translate: Option<Vec<f64>>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let file_config: config::BuildConfig = match &config_path {
        Some(path) => config::load(path)?,
        None => config::BuildConfig::default(),
    };

    let shape = match (nx, ny, nz) {
        (Some(nx), Some(ny), Some(nz)) => Some((nx, ny, nz)),
        (None, None, None) => None,
        _ => anyhow::bail!("--nx, --ny, --nz must be given together"),
    };
    let mut grid = automesh_io::read_voxel_grid(&input, shape)?;
    tracing::info!(shape = ?grid.shape(), "loaded voxel grid");

    if !remap.is_empty() {
        let mapping = parse_remap(&remap)?;
        grid = apply_remap(grid, &mapping)?;
    }

    let included = if !include.is_empty() {
        include
    } else if let Some(included) = file_config.included {
        included
    } else {
        distinct_nonzero_labels(&grid)
    };

    let scale = scale
        .map(|v| [v[0], v[1], v[2]])
        .or(file_config.scale)
        .unwrap_or([1.0, 1.0, 1.0]);
    let translate = translate
        .map(|v| [v[0], v[1], v[2]])
        .or(file_config.translate)
        .unwrap_or([0.0, 0.0, 0.0]);

    let mesh = MeshBuilder::new()
        .with_scale(scale)
        .with_translate(translate)
        .build(&grid, &included)?;
    tracing::info!(nodes = mesh.node_count(), elements = mesh.element_count(), "built mesh");

    automesh_io::write_mesh(&output, &mesh)?;
    Ok(())
}

fn smooth(
    input: PathBuf,
    output: PathBuf,
    algorithm: AlgorithmArg,
    lambda: f64,
    mu: f64,
    iterations: u32,
    classification_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let file_config: config::SmoothingConfig = match &config_path {
        Some(path) => config::load(path)?,
        None => config::SmoothingConfig::default(),
    };

    let mut mesh = automesh_io::read_mesh(&input)?;
    let graph = NeighborGraph::from_mesh(&mesh);

    let classifier = match classification_path {
        Some(path) => load_classification(&path, mesh.node_count())?,
        None => {
            let degree = |node| graph.degree(node);
            NodeClassifier::from_mesh_topology(mesh.node_count(), degree)?
        }
    };

    let lambda = file_config.lambda.unwrap_or(lambda);
    let mu = file_config.mu.unwrap_or(mu);
    let iterations = file_config.iterations.unwrap_or(iterations);
    let algorithm = match file_config.algorithm.as_deref() {
        Some("laplace") => Algorithm::Laplace { lambda },
        Some("taubin") | None => match algorithm {
            AlgorithmArg::Laplace => Algorithm::Laplace { lambda },
            AlgorithmArg::Taubin => Algorithm::Taubin { lambda, mu },
        },
        Some(other) => anyhow::bail!("unknown algorithm {other:?} in config"),
    };

    let smoother = Smoother::new(&graph, &classifier);
    smoother.smooth(&mut mesh.coordinates, algorithm, iterations)?;
    tracing::info!(iterations, "smoothing complete");

    automesh_io::write_mesh(&output, &mesh)?;
    Ok(())
}

fn info(input: PathBuf) -> anyhow::Result<()> {
    match input.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("inp") => {
            let mesh = automesh_io::read_mesh(&input)?;
            println!("nodes: {}", mesh.node_count());
            println!("elements: {}", mesh.element_count());
            println!("blocks: {}", mesh.blocks.len());
            for block in &mesh.blocks {
                println!("  label {}: {} elements", block.label, block.elements.len());
            }
        }
        _ => {
            let grid = automesh_io::read_voxel_grid(&input, None)?;
            let (nx, ny, nz) = grid.shape();
            println!("shape: ({nx}, {ny}, {nz})");
            let mut histogram: std::collections::BTreeMap<Label, u64> = Default::default();
            for (_, label) in grid.iter_lex() {
                *histogram.entry(label).or_default() += 1;
            }
            for (label, count) in histogram {
                println!("  label {label}: {count} voxels");
            }
        }
    }
    Ok(())
}

fn distinct_nonzero_labels(grid: &automesh_core::voxel_grid::VoxelGrid) -> Vec<Label> {
    let mut labels: Vec<Label> = grid
        .iter_lex()
        .map(|(_, label)| label)
        .filter(|&l| l != 0)
        .collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}

fn parse_remap(entries: &[String]) -> anyhow::Result<std::collections::BTreeMap<Label, Label>> {
    let mut mapping = std::collections::BTreeMap::new();
    for entry in entries {
        let (from, to) = entry
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("--remap entry {entry:?} must be `from:to`"))?;
        let from: Label = from.parse()?;
        let to: Label = to.parse()?;
        mapping.insert(from, to);
    }
    Ok(mapping)
}

fn apply_remap(
    grid: automesh_core::voxel_grid::VoxelGrid,
    mapping: &std::collections::BTreeMap<Label, Label>,
) -> anyhow::Result<automesh_core::voxel_grid::VoxelGrid> {
    let (nx, ny, nz) = grid.shape();
    let labels: Vec<Label> = grid
        .iter_lex()
        .map(|(_, label)| *mapping.get(&label).unwrap_or(&label))
        .collect();
    automesh_core::voxel_grid::VoxelGrid::from_flat(labels, nx, ny, nz)
        .map_err(anyhow::Error::from)
}

#[derive(serde::Deserialize)]
struct ClassificationEntry {
    node: u32,
    level: String,
    #[serde(default)]
    coordinate: Option<[f64; 3]>,
}

fn load_classification(path: &PathBuf, node_count: usize) -> anyhow::Result<NodeClassifier> {
    let text = std::fs::read_to_string(path)?;
    let entries: Vec<ClassificationEntry> = serde_json::from_str(&text)?;

    let mut levels = vec![Level::Interior; node_count];
    let mut prescribed = std::collections::BTreeMap::new();
    for entry in entries {
        let level = match entry.level.as_str() {
            "interior" => Level::Interior,
            "boundary" => Level::Boundary,
            "prescribed" => Level::Prescribed,
            other => anyhow::bail!("unknown classification level {other:?}"),
        };
        let idx = entry.node as usize;
        anyhow::ensure!(idx >= 1 && idx <= node_count, "node {} out of range", entry.node);
        levels[idx - 1] = level;
        if level == Level::Prescribed {
            let coordinate = entry
                .coordinate
                .ok_or_else(|| anyhow::anyhow!("prescribed node {} missing coordinate", entry.node))?;
            prescribed.insert(entry.node, coordinate);
        }
    }
    NodeClassifier::new(levels, prescribed).map_err(anyhow::Error::from)
}
