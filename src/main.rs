use clap::{Parser, Subcommand};
use retouch::imaging::{EditSpec, FsStorage, histogram};
use retouch::{EditError, EditSession, config, output};
use std::path::{Path, PathBuf};

/// Shared flags for commands that edit before reporting.
#[derive(clap::Args, Clone)]
struct EditArgs {
    /// Input image (JPEG, PNG, TIFF, WebP, BMP)
    input: PathBuf,

    /// Adjustment as kind[=value], applied in order (repeatable)
    #[arg(short, long = "edit", value_name = "KIND[=VALUE]")]
    edits: Vec<EditSpec>,
}

#[derive(Parser)]
#[command(name = "retouch")]
#[command(about = "Non-destructive image adjustments from the command line")]
#[command(long_about = "\
Non-destructive image adjustments from the command line

Each --edit is issued to an editing session in order. Repeating a tone or
filter adjustment back-to-back keeps only the last value (like dragging a
slider); flips and rotations always stack.

Adjustments:
  brightness=N        add N to every sample            (-100..100)
  contrast=N          contrast around mid-gray         (-100..100)
  average_filter=N    box blur, N rounded up to odd    (0..)
  gaussian_blur=N     Gaussian blur, N rounded to odd  (0..)
  median_blur=N       median filter, N rounded to odd  (0..)
  sharpen=N           3x3 sharpen, center weight N     (0..)
  grayscale           replace color with luma
  flip_horizontally   mirror left-right
  flip_vertically     mirror top-bottom
  rotate=DEG          rotate counter-clockwise, canvas grows to fit

Blur and median kernels are capped at 255x255.

Run 'retouch gen-config' to generate a documented retouch.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = "retouch.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply adjustments and save the result
    Apply {
        #[command(flatten)]
        edit: EditArgs,

        /// Where to write the edited image (format from extension or config)
        #[arg(short, long)]
        output: PathBuf,

        /// Leave the adjustments pending instead of accepting them
        #[arg(long)]
        no_accept: bool,
    },
    /// Print the per-channel histogram of the (edited) image
    Histogram {
        #[command(flatten)]
        edit: EditArgs,

        /// Emit the full 256-bin counts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print image dimensions and channel count
    Info {
        /// Input image
        input: PathBuf,
    },
    /// Print a stock retouch.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Apply {
            edit,
            output: out_path,
            no_accept,
        } => {
            let cfg = config::load_config(&cli.config)?;
            let mut session = open_session(&cfg, &edit.input)?;
            issue_edits(&mut session, &edit.edits);
            if !no_accept {
                session.accept();
            }
            output::print_history(session.actions(), session.watermark());
            session.save_file(&out_path, cfg.output_format(), &cfg.codec(), &FsStorage)?;
            println!("==> Saved {}", out_path.display());
        }
        Command::Histogram { edit, json } => {
            let cfg = config::load_config(&cli.config)?;
            let mut session = open_session(&cfg, &edit.input)?;
            issue_edits(&mut session, &edit.edits);
            let image = session.effective_image().ok_or(EditError::NoImage)?;
            let hist = histogram::histogram(&image);
            if json {
                println!("{}", serde_json::to_string_pretty(&hist)?);
            } else {
                output::print_histogram(&hist, image.width(), image.height());
            }
        }
        Command::Info { input } => {
            let cfg = config::load_config(&cli.config)?;
            let session = open_session(&cfg, &input)?;
            let base = session.base().ok_or(EditError::NoImage)?;
            output::print_info(base);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Open `input` in a session configured from `cfg`.
fn open_session(cfg: &config::EditorConfig, input: &Path) -> Result<EditSession, EditError> {
    let mut session = EditSession::with_options(cfg.transform_options());
    session.open_file(input, &cfg.codec(), &FsStorage)?;
    Ok(session)
}

fn issue_edits(session: &mut EditSession, edits: &[EditSpec]) {
    for spec in edits {
        session.set_attribute(spec.kind.name(), spec.value);
    }
}
