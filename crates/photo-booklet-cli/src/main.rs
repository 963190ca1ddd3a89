mod logger;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use photo_booklet::{
    AssembleRequest, BookletOptions, Ghostscript, LogDiagnostics, PostProcessor,
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::logger::ConsoleLogger;

#[derive(Parser)]
#[command(name = "photobook", about = "Photo booklet PDF tools", version)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place a folder of images into a PDF, two per A4 page
    Place {
        /// Folder scanned recursively for png/jpg/jpeg images
        folder: PathBuf,

        /// Output PDF file
        #[arg(short, long, default_value = "out.pdf")]
        out: PathBuf,

        /// Cache folder for resized images (default: .CACHE next to the executable)
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// JSON options file (see `init-config`)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip the Ghostscript size optimization
        #[arg(long)]
        no_optimize: bool,

        /// Ghostscript executable
        #[arg(long, default_value = "gs")]
        gs: PathBuf,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Write the default options to a JSON file
    InitConfig {
        /// Destination JSON file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    ConsoleLogger::new(level).init()?;

    match cli.command {
        Commands::Place {
            folder,
            out,
            cache_dir,
            config,
            no_optimize,
            gs,
            stats_only,
        } => {
            let options = match config {
                Some(path) => BookletOptions::load(&path)
                    .await
                    .with_context(|| format!("loading options from {}", path.display()))?,
                None => BookletOptions::default(),
            };

            if stats_only {
                let images = photo_booklet::discover_images(&folder, &options.extensions)?;
                let stats = photo_booklet::calculate_statistics(images.len());
                println!("Booklet Statistics:");
                println!("  Images: {}", stats.images);
                println!("  Pages: {}", stats.pages);
                println!("  Empty slots: {}", stats.empty_slots);
                return Ok(());
            }

            let post_processor: Option<Arc<dyn PostProcessor>> = if no_optimize {
                None
            } else {
                Some(Arc::new(Ghostscript::with_binary(gs)))
            };

            let request = AssembleRequest {
                input_folder: folder,
                output: out,
                cache_dir: cache_dir.unwrap_or_else(photo_booklet::default_cache_dir),
                options,
                post_processor,
                diagnostics: Arc::new(LogDiagnostics),
            };

            let report = photo_booklet::assemble(request).await?;
            log::debug!(
                "Cache: {} hits, {} misses",
                report.cache.hits,
                report.cache.misses
            );
            println!(
                "Placed {} images on {} pages → {}{}",
                report.statistics.images,
                report.statistics.pages,
                report.output.display(),
                if report.optimized { " (optimized)" } else { "" }
            );
        }

        Commands::InitConfig { path } => {
            BookletOptions::default().save(&path).await?;
            println!("Default options → {}", path.display());
        }
    }

    Ok(())
}
