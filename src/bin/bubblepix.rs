use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser, Debug)]
#[command(name = "bubblepix", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an image into bubble art and write it as a PNG.
    Convert(ConvertArgs),
    /// Build the grid only and print its statistics as JSON.
    Stats(StatsArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON settings file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of one sampled block, in source pixels.
    #[arg(long)]
    block_size: Option<u32>,

    /// The source is fitted into a square box of this size before sampling.
    #[arg(long)]
    max_dimension: Option<u32>,

    #[arg(long, value_enum)]
    tier: Option<TierChoice>,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output PNG path. A directory gets a timestamped file name.
    #[arg(long)]
    out: PathBuf,

    /// Also write the preview rendering to this PNG path.
    #[arg(long)]
    preview: Option<PathBuf>,

    #[arg(long, value_enum)]
    quality: Option<QualityChoice>,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QualityChoice {
    Medium,
    High,
    Ultra,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TierChoice {
    Constrained,
    Unconstrained,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &SourceArgs) -> anyhow::Result<bubblepix::BubbleConfig> {
    let mut cfg = match &args.config {
        Some(path) => bubblepix::BubbleConfig::from_path(path)?,
        None => bubblepix::BubbleConfig::default(),
    };
    if let Some(block_size) = args.block_size {
        cfg.block_size = block_size;
    }
    if let Some(max_dimension) = args.max_dimension {
        cfg.max_dimension = max_dimension;
    }
    if let Some(tier) = args.tier {
        cfg.tier = match tier {
            TierChoice::Constrained => bubblepix::CapabilityTier::Constrained,
            TierChoice::Unconstrained => bubblepix::CapabilityTier::Unconstrained,
        };
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_source(
    path: &Path,
    cfg: &bubblepix::BubbleConfig,
) -> anyhow::Result<bubblepix::SourceImage> {
    let raw = bubblepix::open_image(path)?;
    let prepared = bubblepix::prepare_source(&raw, &cfg.prepare_options(), cfg.tier)?;
    tracing::info!(
        source = %path.display(),
        width = prepared.width,
        height = prepared.height,
        "loaded source image"
    );
    Ok(prepared)
}

/// Steps on the conversion progress bar.
const PROGRESS_STEPS: u64 = 1000;

fn progress_bar() -> anyhow::Result<ProgressBar> {
    let bar = ProgressBar::new(PROGRESS_STEPS);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {percent:>3}%")
        .context("progress bar template")?
        .progress_chars("#>-");
    bar.set_style(style);
    Ok(bar)
}

fn progress_position(fraction: f64) -> u64 {
    (fraction.clamp(0.0, 1.0) * PROGRESS_STEPS as f64).round() as u64
}

fn resolve_out_path(out: &Path) -> anyhow::Result<PathBuf> {
    if !out.is_dir() {
        return Ok(out.to_path_buf());
    }
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("system clock is before the unix epoch")?
        .as_millis();
    Ok(out.join(bubblepix::default_export_file_name(millis)))
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.source)?;
    if let Some(quality) = args.quality {
        cfg.quality = match quality {
            QualityChoice::Medium => bubblepix::QualityLevel::Medium,
            QualityChoice::High => bubblepix::QualityLevel::High,
            QualityChoice::Ultra => bubblepix::QualityLevel::Ultra,
        };
    }

    let source = load_source(&args.source.in_path, &cfg)?;
    let mut session = bubblepix::ConversionSession::new();
    let bar = progress_bar()?;
    let mut host = bubblepix::CallbackHost::new(|fraction| {
        bar.set_position(progress_position(fraction));
    });

    let outcome = session.generate_and_export(
        &source.as_buffer(),
        cfg.block_size,
        cfg.quality,
        cfg.tier,
        &mut host,
    );
    let (stats, surface) = match outcome {
        Ok(bubblepix::PassOutcome::Completed(done)) => {
            bar.finish();
            done
        }
        Ok(bubblepix::PassOutcome::Cancelled) => {
            bar.abandon();
            anyhow::bail!("conversion was cancelled");
        }
        Err(e) => {
            bar.abandon();
            return Err(e.into());
        }
    };

    let out = resolve_out_path(&args.out)?;
    bubblepix::save_png(&surface, &out)?;
    tracing::info!(
        out = %out.display(),
        width = surface.width(),
        height = surface.height(),
        bubbles = stats.total_bubbles,
        distinct_colors = stats.distinct_colors,
        "wrote export"
    );

    if let Some(preview_path) = &args.preview {
        let preview = session.preview(&cfg.preview_options())?;
        bubblepix::save_png(&preview, preview_path)?;
        tracing::info!(out = %preview_path.display(), "wrote preview");
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.source)?;
    let source = load_source(&args.source.in_path, &cfg)?;

    let mut session = bubblepix::ConversionSession::new();
    let opts = cfg.grid_options(bubblepix::ProgressRange::FULL);
    let outcome = session.convert(&source.as_buffer(), &opts, &mut bubblepix::NullHost)?;
    let bubblepix::PassOutcome::Completed(stats) = outcome else {
        anyhow::bail!("grid pass was cancelled");
    };

    let json = serde_json::to_string_pretty(&stats).context("serialize stats")?;
    println!("{json}");
    Ok(())
}
