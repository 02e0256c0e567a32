use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "photostrip", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a four-shot session over image files and write the composed strip.
    Strip(StripArgs),
    /// Apply one color filter to an image.
    Filter(FilterArgs),
}

#[derive(Parser, Debug)]
struct StripArgs {
    /// Frame images replayed as the camera feed (cycled if fewer than four).
    #[arg(long = "frame", required = true, num_args = 1..)]
    frames: Vec<PathBuf>,

    /// Booth config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Filter override.
    #[arg(long, value_enum)]
    filter: Option<FilterChoice>,

    /// Theme override.
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Layout override.
    #[arg(long, value_enum)]
    layout: Option<LayoutChoice>,

    /// Skip character overlays.
    #[arg(long)]
    no_overlays: bool,

    /// Overlay asset directory (defaults to the config's `asset_dir`, then `./assets`).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Output directory for `photobooth-<millis>.png`.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FilterArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Filter to apply.
    #[arg(long, value_enum)]
    filter: FilterChoice,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterChoice {
    Normal,
    Bw,
    Sepia,
    Vintage,
}

impl From<FilterChoice> for photostrip::FilterMode {
    fn from(c: FilterChoice) -> Self {
        match c {
            FilterChoice::Normal => Self::Identity,
            FilterChoice::Bw => Self::Grayscale,
            FilterChoice::Sepia => Self::SepiaTone,
            FilterChoice::Vintage => Self::VintageBlend,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Lavender,
    Pink,
    White,
    Black,
}

impl From<ThemeChoice> for photostrip::ColorTheme {
    fn from(c: ThemeChoice) -> Self {
        match c {
            ThemeChoice::Lavender => Self::Lavender,
            ThemeChoice::Pink => Self::Pink,
            ThemeChoice::White => Self::White,
            ThemeChoice::Black => Self::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutChoice {
    Standard,
    Compact,
}

impl From<LayoutChoice> for photostrip::LayoutMode {
    fn from(c: LayoutChoice) -> Self {
        match c {
            LayoutChoice::Standard => Self::Standard,
            LayoutChoice::Compact => Self::Compact,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Strip(args) => cmd_strip(args),
        Command::Filter(args) => cmd_filter(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<photostrip::BoothConfig> {
    Ok(match path {
        Some(p) => photostrip::BoothConfig::from_path(p)?,
        None => photostrip::BoothConfig::default(),
    })
}

fn cmd_strip(args: StripArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(f) = args.filter {
        cfg.filter = f.into();
    }
    if let Some(t) = args.theme {
        cfg.strip.theme = t.into();
    }
    if let Some(l) = args.layout {
        cfg.strip.layout = l.into();
    }
    if args.no_overlays {
        cfg.strip.include_overlays = false;
    }
    let asset_dir = args
        .assets
        .clone()
        .or_else(|| cfg.asset_dir.clone())
        .unwrap_or_else(|| PathBuf::from("assets"));

    let mut booth = photostrip::PhotoBooth::new(cfg)?;
    let mut device = photostrip::ImageSequenceDevice::new(args.frames);
    booth.start_camera(&mut device)?;

    match booth.run_capture(&mut photostrip::InstantPacer)? {
        photostrip::RunOutcome::Complete => {}
        photostrip::RunOutcome::Cancelled => anyhow::bail!("capture run was cancelled"),
    }

    let store = photostrip::FsAssetStore::new(asset_dir);
    booth.compose(&store)?;
    let path = booth.download(&args.out, chrono::Utc::now())?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_filter(args: FilterArgs) -> anyhow::Result<()> {
    let img = image::open(&args.in_path)
        .with_context(|| format!("open image '{}'", args.in_path.display()))?
        .to_rgba8();
    let mut frame = photostrip::RawFrame::from_rgba_image(img);
    photostrip::apply_filter(&mut frame, args.filter.into());

    let png = photostrip::encode_png(&frame.into_rgba_image()?)?;
    photostrip::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
