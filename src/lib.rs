//! Bboxtrim: drop or crop away small bounding boxes in VOC datasets.
//!
//! Bboxtrim works on a folder of images and a folder of Pascal VOC XML
//! annotations paired by file stem. It can list the images whose objects are
//! all tiny, or crop each image down to its large objects while keeping the
//! small objects that touch them, rewriting the annotation to match.
//!
//! # Modules
//!
//! - [`geometry`]: Integer pixel rectangles
//! - [`reconcile`]: The crop planning engine (pure geometry)
//! - [`annotation`]: VOC XML records, edited in memory and written back
//! - [`raster`]: Image load, crop and save
//! - [`dataset`]: Item identifiers and folder layout
//! - [`batch`]: Batch drivers and reports
//! - [`error`]: Error types for bboxtrim operations

pub mod annotation;
pub mod batch;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod reconcile;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use error::BboxtrimError;

use batch::{BatchReport, CropOptions, ListOptions};
use reconcile::ExpansionMode;

/// The bboxtrim CLI application.
#[derive(Parser)]
#[command(name = "bboxtrim")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Crop images to their large objects and rewrite the annotations.
    Crop(CropArgs),
    /// List images whose objects are all at or below the area threshold.
    List(ListArgs),
}

/// Report rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Arguments for the crop subcommand.
#[derive(clap::Args)]
struct CropArgs {
    /// Maximum area of a "small" bounding box, in square pixels.
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    area: i64,

    /// Folder of input images.
    #[arg(long)]
    imgpath: PathBuf,

    /// Folder of input VOC XML annotations.
    #[arg(long)]
    xmlpath: PathBuf,

    /// Folder to save cropped images into.
    #[arg(long = "n-imgpath", default_value = batch::DEFAULT_OUTPUT_IMAGE_DIR)]
    n_imgpath: PathBuf,

    /// Folder to save cropped annotations into.
    #[arg(long = "n-xmlpath", default_value = batch::DEFAULT_OUTPUT_ANNOTATION_DIR)]
    n_xmlpath: PathBuf,

    /// Extension of the input images.
    #[arg(long = "image-ext", default_value = batch::DEFAULT_IMAGE_EXTENSION)]
    image_ext: String,

    /// How the crop grows over kept small boxes.
    #[arg(long, value_enum, default_value = "first-match")]
    expansion: ExpansionMode,

    /// Process images in parallel.
    #[arg(long)]
    parallel: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Arguments for the list subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Maximum area of a "small" bounding box, in square pixels.
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    area: i64,

    /// Folder of VOC XML annotations.
    #[arg(long)]
    xmlpath: PathBuf,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Run the bboxtrim CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BboxtrimError> {
    let cli = Cli::parse();

    let (report, output) = match cli.command {
        Commands::Crop(args) => {
            let opts = CropOptions {
                threshold: args.area,
                image_dir: args.imgpath,
                annotation_dir: args.xmlpath,
                output_image_dir: args.n_imgpath,
                output_annotation_dir: args.n_xmlpath,
                image_extension: args.image_ext,
                expansion: args.expansion,
                parallel: args.parallel,
            };
            (batch::crop_dataset(&opts)?, args.output)
        }
        Commands::List(args) => {
            let opts = ListOptions {
                threshold: args.area,
                annotation_dir: args.xmlpath,
            };
            (batch::list_all_small(&opts)?, args.output)
        }
    };

    emit_report(&report, output)?;

    if report.is_ok() {
        Ok(())
    } else {
        Err(BboxtrimError::BatchFailed {
            failed: report.failed_count(),
            total: report.total(),
        })
    }
}

fn emit_report(report: &BatchReport, output: OutputFormat) -> Result<(), BboxtrimError> {
    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|source| BboxtrimError::Io(source.into()))?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", report),
    }
    Ok(())
}
