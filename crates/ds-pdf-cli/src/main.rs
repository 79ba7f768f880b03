mod commands;
mod menu;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dspdf", about = "Collage, extract and merge PDF pages", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place pages two per sheet, rotated, onto Letter output pages
    Collage {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Layout config (JSON); flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Shift added to the x translation, in points
        #[arg(long, allow_negative_numbers = true)]
        horizontal_offset: Option<f64>,

        /// Shift added to the y translation, in points
        #[arg(long, allow_negative_numbers = true)]
        vertical_adjust: Option<f64>,

        /// Multiplier on the exact-fit scale
        #[arg(long)]
        overscan: Option<f64>,

        /// Output paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Copy a range of pages into a new PDF
    Extract {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// First page to keep (1-indexed)
        #[arg(long)]
        start: u32,

        /// Last page to keep (inclusive)
        #[arg(long)]
        end: u32,
    },

    /// Concatenate PDFs in the given order
    Merge {
        /// Input PDF files
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long, default_value = "merged.pdf")]
        output: PathBuf,
    },

    /// Interactive menu
    Menu,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum PaperArg {
    Letter,
    A4,
    Legal,
}

impl From<PaperArg> for ds_pdf::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::A4 => Self::A4,
            PaperArg::Legal => Self::Legal,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn print_statistics(stats: &ds_pdf::CollageStatistics) {
    println!("Collage Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Empty slots: {}", stats.empty_slots);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Collage {
            input,
            output,
            config,
            horizontal_offset,
            vertical_adjust,
            overscan,
            paper,
            stats_only,
        } => {
            let mut layout = match &config {
                Some(path) => ds_pdf::LayoutConfig::load(path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ds_pdf::LayoutConfig::default(),
            };
            if let Some(paper) = paper {
                layout.output = ds_pdf::PaperSize::from(paper).into();
            }
            if let Some(overscan) = overscan {
                layout.overscan = overscan;
            }
            if let Some(offset) = horizontal_offset {
                layout.offsets.horizontal_offset = offset;
            }
            if let Some(adjust) = vertical_adjust {
                layout.offsets.vertical_adjust = adjust;
            }
            layout.validate()?;
            log::debug!("Layout: {:?}", layout);

            if stats_only {
                let document = ds_pdf::load_pdf(&input).await?;
                print_statistics(&ds_pdf::calculate_statistics(&document)?);
                return Ok(());
            }

            let stats = commands::collage_file(&input, &output, &layout).await?;
            print_statistics(&stats);
            println!("Collaged → {}", output.display());
        }

        Commands::Extract {
            input,
            output,
            start,
            end,
        } => {
            let pages = commands::extract_file(&input, &output, start, end).await?;
            println!("Extracted {} pages → {}", pages, output.display());
        }

        Commands::Merge { input, output } => {
            let pages = commands::merge_files(&input, &output).await?;
            println!(
                "Merged {} files ({} pages) → {}",
                input.len(),
                pages,
                output.display()
            );
        }

        Commands::Menu => menu::run().await?,
    }

    Ok(())
}
