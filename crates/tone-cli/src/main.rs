//! tone - HDR tonemapping CLI
//!
//! Reads a Radiance HDR image, applies a tone reproduction operator, and
//! writes an 8-bit sRGB PNG.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use tone_color::ResponseTable;
use tone_ops::{stats, LocalParams, Operator};

#[derive(Parser)]
#[command(name = "tone")]
#[command(author, version, about = "HDR to 8-bit tonemapping")]
#[command(long_about = "
Converts high-dynamic-range images to display-referred 8-bit PNG through
a catalog of global tone curves or a spatially adaptive local operator.

Examples:
  tone info memorial.hdr                          # Show image statistics
  tone map memorial.hdr -o out.png                # ACES fitted (default)
  tone map memorial.hdr -o out.png -t reinhard
  tone map memorial.hdr -o out.png -t local --max-scale 32
  tone map memorial.hdr -o out.png -t sensor --response camera.txt --iso 6
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image dimensions and global statistics
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Tonemap an HDR image to PNG
    #[command(visible_alias = "m")]
    Map(MapArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input HDR image
    input: PathBuf,
}

#[derive(Args)]
struct MapArgs {
    /// Input HDR image
    input: PathBuf,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Operator: clamp, reinhard, reinhard-extended,
    /// reinhard-extended-luminance, reinhard-jodie, reinhard-chroma,
    /// filmic, aces-fitted, aces-approx, sensor, local
    #[arg(short = 't', long = "operator", default_value = "aces-fitted")]
    operator: String,

    /// White point override for the extended Reinhard operators
    /// (defaults to the image maximum)
    #[arg(long)]
    max_white: Option<f32>,

    /// ISO level for the sensor operator
    #[arg(long, default_value = "6.0")]
    iso: f32,

    /// Sensor response table file (two columns: irradiance intensity);
    /// a linear table is used when omitted
    #[arg(long)]
    response: Option<PathBuf>,

    /// Local operator parameter file (YAML); flags below are ignored
    /// when given
    #[arg(long)]
    params: Option<PathBuf>,

    /// Local operator center radius factor (surround is 1.6x)
    #[arg(long, default_value = "0.354")]
    alpha: f64,

    /// Local operator scale acceptance threshold
    #[arg(long, default_value = "0.05")]
    threshold: f64,

    /// Local operator sharpening exponent
    #[arg(long, default_value = "8.0")]
    phi: f64,

    /// Local operator key value
    #[arg(long, default_value = "0.5")]
    middle_grey: f64,

    /// Local operator maximum scale
    #[arg(long, default_value = "64.0")]
    max_scale: f64,
}

/// Operator selection by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperatorKind {
    Clamp,
    Reinhard,
    ReinhardExtended,
    ReinhardExtendedLuminance,
    ReinhardJodie,
    ReinhardChroma,
    Filmic,
    AcesFitted,
    AcesApprox,
    Sensor,
    Local,
}

impl FromStr for OperatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "reinhard" => Ok(Self::Reinhard),
            "reinhard-extended" => Ok(Self::ReinhardExtended),
            "reinhard-extended-luminance" => Ok(Self::ReinhardExtendedLuminance),
            "reinhard-jodie" | "jodie" => Ok(Self::ReinhardJodie),
            "reinhard-chroma" | "chroma" => Ok(Self::ReinhardChroma),
            "filmic" | "uncharted2" => Ok(Self::Filmic),
            "aces-fitted" | "aces" => Ok(Self::AcesFitted),
            "aces-approx" => Ok(Self::AcesApprox),
            "sensor" | "camera" => Ok(Self::Sensor),
            "local" => Ok(Self::Local),
            _ => Err(format!("unknown operator: {}", s)),
        }
    }
}

/// Local operator parameters as loaded from a YAML file.
///
/// `alpha_2` may be omitted and defaults to the conventional
/// `1.6 * alpha_1`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocalParamsFile {
    alpha_1: f64,
    alpha_2: Option<f64>,
    threshold: f64,
    phi: f64,
    middle_grey: f64,
    max_scale: f64,
}

impl From<LocalParamsFile> for LocalParams {
    fn from(f: LocalParamsFile) -> Self {
        Self {
            alpha_1: f.alpha_1,
            alpha_2: f.alpha_2.unwrap_or(1.6 * f.alpha_1),
            threshold: f.threshold,
            phi: f.phi,
            middle_grey: f.middle_grey,
            max_scale: f.max_scale,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => run_info(args),
        Commands::Map(args) => run_map(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints dimensions and the three global statistics.
fn run_info(args: InfoArgs) -> Result<()> {
    let img = tone_io::hdr::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let s = stats::compute_par(&img);

    println!("{}", args.input.display());
    println!("  Resolution:            {}x{}", img.width(), img.height());
    println!("  Pixels:                {}", img.pixel_count());
    println!("  Max luminance:         {:.6}", s.max_luminance);
    println!("  Max component:         {:.6}", s.max_component);
    println!("  Log-average luminance: {:.6}", s.log_average_luminance);
    Ok(())
}

/// Loads, tonemaps, and writes the output PNG.
fn run_map(args: MapArgs) -> Result<()> {
    let kind: OperatorKind = args
        .operator
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let operator = build_operator(kind, &args)?;

    let img = tone_io::hdr::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let out = tone_ops::tonemap(&img, &operator)
        .with_context(|| format!("tonemapping with {} failed", operator.name()))?;

    tone_io::png::write(&args.output, &out)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "tonemapped {} pixels ({}) -> {}",
        img.pixel_count(),
        operator.name(),
        args.output.display()
    );
    Ok(())
}

fn build_operator(kind: OperatorKind, args: &MapArgs) -> Result<Operator> {
    Ok(match kind {
        OperatorKind::Clamp => Operator::Clamp,
        OperatorKind::Reinhard => Operator::Reinhard,
        OperatorKind::ReinhardExtended => Operator::ReinhardExtended {
            max_white: args.max_white,
        },
        OperatorKind::ReinhardExtendedLuminance => Operator::ReinhardExtendedLuminance {
            max_white: args.max_white,
        },
        OperatorKind::ReinhardJodie => Operator::ReinhardJodie,
        OperatorKind::ReinhardChroma => Operator::ReinhardChroma,
        OperatorKind::Filmic => Operator::Filmic(Default::default()),
        OperatorKind::AcesFitted => Operator::AcesFitted,
        OperatorKind::AcesApprox => Operator::AcesApprox,
        OperatorKind::Sensor => {
            let table = match &args.response {
                Some(path) => ResponseTable::load(path)
                    .with_context(|| format!("failed to load {}", path.display()))?,
                None => ResponseTable::linear(1024),
            };
            if args.iso <= 0.0 {
                bail!("iso must be positive, got {}", args.iso);
            }
            Operator::Sensor {
                table,
                iso: args.iso,
            }
        }
        OperatorKind::Local => {
            let params = match &args.params {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    let file: LocalParamsFile = serde_yaml::from_str(&text)
                        .with_context(|| format!("failed to parse {}", path.display()))?;
                    file.into()
                }
                None => LocalParams {
                    alpha_1: args.alpha,
                    alpha_2: 1.6 * args.alpha,
                    threshold: args.threshold,
                    phi: args.phi,
                    middle_grey: args.middle_grey,
                    max_scale: args.max_scale,
                },
            };
            Operator::Local(params)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_names_parse() {
        assert_eq!(
            "reinhard".parse::<OperatorKind>().unwrap(),
            OperatorKind::Reinhard
        );
        assert_eq!("ACES".parse::<OperatorKind>().unwrap(), OperatorKind::AcesFitted);
        assert_eq!(
            "uncharted2".parse::<OperatorKind>().unwrap(),
            OperatorKind::Filmic
        );
        assert!("nope".parse::<OperatorKind>().is_err());
    }

    #[test]
    fn test_params_file_defaults_surround() {
        let yaml = "alpha_1: 0.25\nthreshold: 0.05\nphi: 8.0\nmiddle_grey: 0.5\nmax_scale: 32.0\n";
        let file: LocalParamsFile = serde_yaml::from_str(yaml).unwrap();
        let params: LocalParams = file.into();
        assert!((params.alpha_2 - 0.4).abs() < 1e-12);
        assert_eq!(params.max_scale, 32.0);
    }
}
