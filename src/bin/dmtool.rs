use clap::{Args, Parser, Subcommand};
use dm_locator::detector::filters::FilterStage;
use dm_locator::pipeline::preprocess;
use dm_locator::tools::{
    bench_limit_from_env, binary_stats, dataset_iter, dataset_root_from_env, grayscale_stats,
    load_gray, render_overlay,
};
use dm_locator::{LocatorParams, Polarity, locate_batch, locate_with_report};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "dmtool", version, about = "Datamatrix finder-pattern locator tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone, Copy)]
struct TuningArgs {
    /// Adaptive threshold window side (odd, > 1)
    #[arg(long)]
    block_size: Option<u32>,
    /// Offset subtracted from the local mean
    #[arg(long, allow_hyphen_values = true)]
    c: Option<f32>,
    /// Side of the square closing element
    #[arg(long)]
    close_size: Option<u32>,
    /// Treat light pixels as foreground
    #[arg(long)]
    light: bool,
}

impl TuningArgs {
    /// Environment defaults overridden by explicit flags
    fn params(&self) -> LocatorParams {
        let mut params = LocatorParams::from_env();
        if let Some(v) = self.block_size {
            params.block_size = v;
        }
        if let Some(v) = self.c {
            params.c = v;
        }
        if let Some(v) = self.close_size {
            params.close_size = v;
        }
        if self.light {
            params.polarity = Polarity::LightForeground;
        }
        params
    }
}

#[derive(Subcommand)]
enum Command {
    /// Locate finder patterns in a single image
    Locate {
        #[arg(long)]
        image: PathBuf,
        /// Write an annotated copy of the image here
        #[arg(long)]
        overlay: Option<PathBuf>,
        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Print preprocessing stats and per-filter rejection counts
    Debug {
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Locate finder patterns in every image under a directory
    Batch {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        tuning: TuningArgs,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Locate {
            image,
            overlay,
            tuning,
        } => locate_cmd(&image, overlay.as_deref(), &tuning.params()),
        Command::Debug { image, tuning } => debug_cmd(&image, &tuning.params()),
        Command::Batch {
            root,
            limit,
            tuning,
        } => batch_cmd(root, limit, &tuning.params()),
    }
}

fn locate_cmd(image: &Path, overlay: Option<&Path>, params: &LocatorParams) {
    let gray = match load_gray(image) {
        Ok(gray) => gray,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return;
        }
    };
    let (width, height) = gray.dimensions();

    let start = Instant::now();
    let report = match locate_with_report(gray.as_raw(), width as usize, height as usize, params) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Locate failed: {}", err);
            return;
        }
    };
    let elapsed = start.elapsed();

    println!("Image: {} ({}x{})", image.display(), width, height);
    println!(
        "Found {} finder patterns in {:.2} ms",
        report.patterns.len(),
        elapsed.as_secs_f64() * 1000.0
    );
    for (i, fp) in report.patterns.iter().enumerate() {
        println!(
            "  Pattern {}: corner=({:.1}, {:.1}) base=({:.1}, {:.1}) side=({:.1}, {:.1})",
            i,
            fp.corner.x,
            fp.corner.y,
            fp.base_vector.x,
            fp.base_vector.y,
            fp.side_vector.x,
            fp.side_vector.y
        );
    }

    if let Some(path) = overlay {
        let annotated = render_overlay(&gray, &report.patterns);
        match annotated.save(path) {
            Ok(()) => println!("Overlay written to {}", path.display()),
            Err(err) => eprintln!("Failed to write overlay {}: {}", path.display(), err),
        }
    }
}

fn debug_cmd(image: &Path, params: &LocatorParams) {
    let gray = match load_gray(image) {
        Ok(gray) => gray,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return;
        }
    };
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    println!("Image: {} ({}x{})", image.display(), width, height);
    println!(
        "Params: block_size={} c={} close_size={} epsilon={} polarity={:?}",
        params.block_size, params.c, params.close_size, params.simplify_epsilon, params.polarity
    );

    if let Err(err) = params.validate() {
        eprintln!("Invalid parameters: {}", err);
        return;
    }

    let gray_stats = grayscale_stats(gray.as_raw());
    println!(
        "Grayscale range: {}-{}, average: {}",
        gray_stats.min, gray_stats.max, gray_stats.avg
    );

    let binary = preprocess(gray.as_raw(), width, height, params);
    let stats = binary_stats(&binary);
    println!(
        "Binary: foreground_pixels={} total={} foreground_ratio={:.2}%",
        stats.foreground_pixels,
        stats.total_pixels,
        stats.foreground_ratio * 100.0
    );

    match locate_with_report(gray.as_raw(), width, height, params) {
        Ok(report) => {
            println!("Contours: {}", report.contours);
            for stage in FilterStage::ALL {
                println!("  rejected by {}: {}", stage.name(), report.rejected_by(stage));
            }
            println!("  corner failures: {}", report.corner_failures);
            println!("Finder patterns: {}", report.patterns.len());
        }
        Err(err) => eprintln!("Locate failed: {}", err),
    }
}

fn batch_cmd(root: Option<PathBuf>, limit: Option<usize>, params: &LocatorParams) {
    let root = root.unwrap_or_else(dataset_root_from_env);
    let limit = limit.or_else(bench_limit_from_env);
    let paths: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    if paths.is_empty() {
        println!("No images found under {}", root.display());
        return;
    }

    let mut images = Vec::with_capacity(paths.len());
    let mut loaded = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_gray(path) {
            Ok(gray) => {
                images.push(gray);
                loaded.push(path);
            }
            Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
        }
    }

    let start = Instant::now();
    let results = locate_batch(&images, params);
    let elapsed = start.elapsed();

    let mut total = 0usize;
    for (path, result) in loaded.iter().zip(results) {
        match result {
            Ok(patterns) => {
                total += patterns.len();
                println!("{}: {} finder patterns", path.display(), patterns.len());
            }
            Err(err) => println!("{}: error: {}", path.display(), err),
        }
    }
    println!(
        "Processed {} images in {:.2} ms, {} finder patterns total",
        images.len(),
        elapsed.as_secs_f64() * 1000.0,
        total
    );
}
