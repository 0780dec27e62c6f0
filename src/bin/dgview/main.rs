//! dgview CLI - curvature and triangle quality for triangle meshes.
//!
//! Usage: dgview <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `dgview --help` for available commands. Set `RUST_LOG=debug` to see
//! each estimation pass.

use std::f64::consts::TAU;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};

use dgview::algo::quality::is_degenerate_shape;
use dgview::algo::{estimate_with_progress, EstimateOptions, Progress};
use dgview::error::MeshError;
use dgview::io;
use dgview::mesh::HalfEdgeMesh;
use dgview::visual::{
    save_reflection_texture, DrawMode, PresenterOptions, ScalarFieldPresenter,
    DEFAULT_TEXTURE_SIZE,
};

#[derive(Parser)]
#[command(name = "dgview")]
#[command(author, version, about = "Discrete differential geometry CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information and field statistics
    Info {
        /// Input mesh file
        input: PathBuf,

        /// Run estimation on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Color-code a field and write it as a colored PLY
    Color {
        /// Input mesh file
        input: PathBuf,

        /// Output PLY file
        output: PathBuf,

        /// Draw mode, by name or slug (e.g. "gaussian-curvature")
        #[arg(short, long, default_value = "mean-curvature")]
        mode: DrawMode,

        /// Lower bound of the fixed color range (triangle shape)
        #[arg(long, default_value = "0.6")]
        fixed_min: f64,

        /// Upper bound of the fixed color range (triangle shape)
        #[arg(long, default_value = "2.0")]
        fixed_max: f64,

        /// Run estimation on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Write the reflection-line stripe texture as a PNG
    Texture {
        /// Output PNG file
        output: PathBuf,

        /// Edge length in pixels
        #[arg(short, long, default_value_t = DEFAULT_TEXTURE_SIZE)]
        size: u32,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input, parallel } => {
            cmd_info(&input, parallel)?;
        }

        Commands::Color {
            input,
            output,
            mode,
            fixed_min,
            fixed_max,
            parallel,
        } => {
            let options = PresenterOptions::default()
                .with_fixed_range(fixed_min, fixed_max)
                .with_parallel(parallel);
            cmd_color(&input, &output, mode, options)?;
        }

        Commands::Texture { output, size } => {
            save_reflection_texture(&output, size)?;
            println!("Saved: {} ({}x{})", output.display(), size, size);
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |done, total, pass| {
        if total == 0 {
            return;
        }

        let percent = ((done * 100) + (total / 2)) / total;
        let percent = max_percent.fetch_max(percent, Ordering::Relaxed).max(percent);

        let bar_width = 30;
        let filled = (percent.min(100) * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {:<16}", bar, space, percent, pass);
        let _ = std::io::stderr().flush();

        if done >= total {
            eprintln!();
        }
    })
}

/// `(min, max, mean)` of the values, or `None` if there are none.
fn stats(values: impl Iterator<Item = f64>) -> Option<(f64, f64, f64)> {
    let (min, max, sum, n) = values.fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0usize),
        |(min, max, sum, n), v| (min.min(v), max.max(v), sum + v, n + 1),
    );
    (n > 0).then(|| (min, max, sum / n as f64))
}

fn print_stats(label: &str, values: impl Iterator<Item = f64>) {
    match stats(values) {
        Some((min, max, avg)) => {
            println!("  {:<24} min={:.4}, max={:.4}, avg={:.4}", label, min, max, avg)
        }
        None => println!("  {:<24} (no values)", label),
    }
}

fn cmd_info(input: &PathBuf, parallel: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mesh: HalfEdgeMesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Edges: {}", mesh.num_edges());
    println!("Faces: {}", mesh.num_faces());
    println!("Surface area: {:.6}", mesh.surface_area());

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    let boundary = mesh.vertex_ids().filter(|&v| mesh.is_boundary_vertex(v)).count();
    if boundary == 0 {
        println!("Topology: Closed (no boundary)");
    } else {
        println!("Topology: Open ({} boundary vertices)", boundary);
    }
    println!("Euler characteristic: {}", mesh.euler_characteristic());

    let options = EstimateOptions::default().with_parallel(parallel);
    let start = Instant::now();
    let fields = estimate_with_progress(&mesh, &options, &create_progress());
    let elapsed = start.elapsed();

    println!("\nFields ({:.2?}):", elapsed);
    print_stats("Uniform mean curvature:", fields.uniform_mean().values().iter().copied());
    print_stats("Mean curvature:", fields.mean().values().iter().copied());
    print_stats("Gaussian curvature:", fields.gaussian().values().iter().copied());
    print_stats(
        "Triangle shape:",
        fields.shape().values().iter().copied().filter(|&r| !is_degenerate_shape(r)),
    );
    println!("  Degenerate faces: {}", fields.degenerate_faces());

    let total = fields.total_gaussian_curvature();
    println!("  Total Gaussian curvature: {:.6}", total);
    println!("  Gauss-Bonnet Euler characteristic: {:.2}", total / TAU);

    Ok(())
}

fn cmd_color(
    input: &PathBuf,
    output: &PathBuf,
    mode: DrawMode,
    options: PresenterOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if !mode.is_field_backed() {
        return Err(MeshError::invalid_param("mode", mode, "has no scalar field to color").into());
    }

    let mesh: HalfEdgeMesh = io::load(input)?;
    println!("Loaded: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());

    let start = Instant::now();
    let mut presenter = ScalarFieldPresenter::load(mesh, options);
    let buffer = presenter
        .select(mode)
        .cloned()
        .ok_or_else(|| MeshError::invalid_param("mode", mode, "has no scalar field to color"))?;
    let elapsed = start.elapsed();

    println!(
        "{}: {} {:?} colors over [{:.4}, {:.4}] ({:.2?})",
        mode,
        buffer.len(),
        buffer.domain,
        buffer.range.0,
        buffer.range.1,
        elapsed
    );

    io::ply::save_colored(presenter.mesh(), output, &buffer)?;
    println!("Saved: {}", output.display());

    Ok(())
}
