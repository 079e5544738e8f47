//! bandread CLI — command-line interface for resistor color-band reading.

use bandread::color::{classify_with_distance, rgb_to_hsv, BandColor, PALETTE};
use bandread::value::{self, ReadDirection};
use bandread::{BandReader, ColumnAggregator, ReadConfig, SamplingConfig, VisionEstimate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "bandread")]
#[command(about = "Read resistance and tolerance from photographs of axial resistors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the color bands of a resistor photograph.
    Read(CliReadArgs),

    /// Decode a comma-separated band list, e.g. brown,black,red,gold.
    Decode {
        /// Band colors in reading order.
        #[arg(long)]
        bands: String,
    },

    /// Classify an RGB triple against the canonical palette.
    Classify {
        /// Color as r,g,b (0-255 each).
        #[arg(long)]
        rgb: String,
    },

    /// Print the canonical band palette.
    Palette,
}

#[derive(Debug, Clone, Args)]
struct CliReadArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write the reading (JSON). Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Reader configuration (JSON). Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Upstream vision estimate (JSON) to reconcile the reading with.
    #[arg(long)]
    estimate: Option<PathBuf>,

    /// Path to write a per-stage diagnostic trace (JSON).
    #[arg(long)]
    debug_json: Option<PathBuf>,

    /// Canonical sampling width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Column aggregation method.
    #[arg(long, value_enum)]
    aggregator: Option<AggregatorArg>,

    /// Scan lines for majority-vote aggregation. Requires a vote aggregator,
    /// from `--aggregator vote` or the config file.
    #[arg(long)]
    scan_lines: Option<usize>,

    /// Palette distance above which a pixel is labelled unknown.
    #[arg(long)]
    max_distance: Option<f32>,

    /// Rotate portrait images so the resistor axis is horizontal.
    #[arg(long)]
    landscape: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AggregatorArg {
    Center,
    Mean,
    Vote,
}

impl AggregatorArg {
    fn to_core(self, scan_lines: usize) -> ColumnAggregator {
        match self {
            Self::Center => ColumnAggregator::CenterPixel,
            Self::Mean => ColumnAggregator::VerticalMean,
            Self::Vote => ColumnAggregator::MajorityVote { scan_lines },
        }
    }
}

impl CliReadArgs {
    fn to_config(&self) -> CliResult<ReadConfig> {
        let mut config = match &self.config {
            Some(path) => ReadConfig::from_json_file(path).map_err(|e| -> CliError {
                format!("failed to load config {}: {}", path.display(), e).into()
            })?,
            None => ReadConfig::default(),
        };

        if let Some(width) = self.width {
            if width == 0 {
                return Err("--width must be positive".into());
            }
            config.preprocess.canonical_width = width;
        }
        if let Some(agg) = self.aggregator {
            config.sampling.aggregator = agg.to_core(SamplingConfig::DEFAULT_SCAN_LINES);
        }
        if let Some(n) = self.scan_lines {
            if n == 0 {
                return Err("--scan-lines must be positive".into());
            }
            match &mut config.sampling.aggregator {
                ColumnAggregator::MajorityVote { scan_lines } => *scan_lines = n,
                other => {
                    return Err(format!(
                        "--scan-lines needs the vote aggregator, got {:?}",
                        other
                    )
                    .into())
                }
            }
        }
        if self.max_distance.is_some() {
            config.sampling.max_distance = self.max_distance;
        }
        if self.landscape {
            config.preprocess.landscape = true;
        }
        Ok(config)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Read(args) => run_read(&args),
        Commands::Decode { bands } => run_decode(&bands),
        Commands::Classify { rgb } => run_classify(&rgb),
        Commands::Palette => run_palette(),
    }
}

fn parse_bands(list: &str) -> CliResult<Vec<BandColor>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<BandColor>().map_err(|e| -> CliError { e.into() }))
        .collect()
}

fn parse_rgb(s: &str) -> CliResult<[u8; 3]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected r,g,b, got {:?}", s).into());
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u8>()
            .map_err(|e| -> CliError { format!("invalid channel {:?}: {}", part, e).into() })?;
    }
    Ok(rgb)
}

// ── palette ────────────────────────────────────────────────────────────

fn run_palette() -> CliResult<()> {
    println!("bandread canonical palette (tie-break: top to bottom)");
    println!("  {:<8} {:>6} {:>5} {:>5}  digit  multiplier  tolerance", "color", "h", "s", "v");
    for c in PALETTE.iter() {
        let digit = value::digit_value(c.color)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".into());
        let mult = value::multiplier_value(c.color)
            .map(|m| format!("x{}", value::format_ohms(m)))
            .unwrap_or_else(|| "-".into());
        let tol = value::tolerance_percent(c.color)
            .map(|t| format!("±{}%", t))
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:<8} {:>6.1} {:>5.2} {:>5.2}  {:>5}  {:>10}  {:>9}",
            c.color.name(),
            c.hsv.h,
            c.hsv.s,
            c.hsv.v,
            digit,
            mult,
            tol
        );
    }
    Ok(())
}

// ── classify ───────────────────────────────────────────────────────────

fn run_classify(rgb_str: &str) -> CliResult<()> {
    let [r, g, b] = parse_rgb(rgb_str)?;
    let hsv = rgb_to_hsv(r, g, b);
    let (color, dist) = classify_with_distance(&hsv);

    println!("Input RGB:  ({}, {}, {})", r, g, b);
    println!("HSV:        h={:.1} s={:.3} v={:.3}", hsv.h, hsv.s, hsv.v);
    println!("Nearest:    {} (distance {:.4})", color, dist);
    Ok(())
}

// ── decode ─────────────────────────────────────────────────────────────

fn run_decode(list: &str) -> CliResult<()> {
    let bands = parse_bands(list)?;
    let result = value::decode(&bands);

    println!(
        "Bands:      {}",
        bands.iter().map(|b| b.name()).collect::<Vec<_>>().join("-")
    );
    if let Some(reason) = result.reject {
        println!("Skipped:    {}", reason);
    }
    for c in &result.candidates {
        let dir = match c.direction {
            ReadDirection::AsRead => "as read ",
            ReadDirection::Reversed => "reversed",
        };
        match c.ohms {
            Some(ohms) if c.valid => println!(
                "  {}  {}Ω  tolerance {}",
                dir,
                value::format_ohms(ohms),
                c.tolerance_percent
                    .map(|t| format!("±{}%", t))
                    .unwrap_or_else(|| "-".into())
            ),
            _ => println!(
                "  {}  invalid ({})",
                dir,
                c.reject.map(|r| r.code()).unwrap_or("unknown")
            ),
        }
    }
    match (result.ohms, result.selected) {
        (Some(ohms), Some(dir)) => println!(
            "Selected:   {:?} -> {} ohm ({}Ω)",
            dir,
            ohms,
            value::format_ohms(ohms)
        ),
        _ => println!("Selected:   none"),
    }
    Ok(())
}

// ── read ───────────────────────────────────────────────────────────────

fn run_read(args: &CliReadArgs) -> CliResult<()> {
    let config = args.to_config()?;
    let reader = BandReader::with_config(config);

    tracing::info!("Reading image: {}", args.image.display());
    let (reading, trace) = reader.read_path_with_trace(&args.image)?;

    if let Some([w, h]) = trace.image_size {
        tracing::info!("Sampled {}x{} px, min band width {} cols", w, h, trace.min_band_width);
    }
    match bandread::format_reading(&reading) {
        Some(label) => tracing::info!("Reading: {} [{}]", label, reading.band_names().join("-")),
        None => tracing::warn!(
            "No value decoded from {} bands [{}]",
            reading.bands.len(),
            reading.band_names().join("-")
        ),
    }

    let json = match &args.estimate {
        Some(path) => {
            let estimate: VisionEstimate =
                serde_json::from_str(&std::fs::read_to_string(path)?).map_err(|e| -> CliError {
                    format!("invalid estimate {}: {}", path.display(), e).into()
                })?;
            let merged = bandread::merge_reading(&reading, &estimate);
            if !merged.verified {
                tracing::warn!("Using unverified vision estimate");
            }
            serde_json::to_string_pretty(&merged)?
        }
        None => serde_json::to_string_pretty(&reading)?,
    };

    match &args.out {
        Some(out) => {
            std::fs::write(out, &json)?;
            tracing::info!("Results written to {}", out.display());
        }
        None => println!("{}", json),
    }

    if let Some(debug_path) = &args.debug_json {
        std::fs::write(debug_path, serde_json::to_string_pretty(&trace)?)?;
        tracing::info!("Debug trace written to {}", debug_path.display());
    }

    Ok(())
}
