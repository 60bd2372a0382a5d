use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};

use abbrscan::discovery::{self, DiscoveryConfig};
use abbrscan::{export, scan, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "abbrscan")]
#[command(about = "Finds abbreviations in a .tex file or a folder with .tex files and saves them to a JSON file")]
#[command(version)]
struct Args {
    /// Path to input file or input files directory
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output JSON file with abbreviations
    #[arg(short, long, default_value = "./output/abbr.json")]
    output: PathBuf,

    /// Input file extensions, repeatable or comma-separated; "" accepts every file
    #[arg(short = 'e', long = "extension", default_value = "tex", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Print details
    #[arg(long)]
    verbose: bool,

    /// Abort on the first unreadable file
    #[arg(long)]
    fail_fast: bool,

    /// Number of files read concurrently (default: number of CPUs)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Optional run statistics output path
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.verbose { Level::INFO } else { Level::WARN })
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");

    // Returned errors are printed once by the runtime, not logged here as well
    run(&args).await.context("Abbreviations search error")
}

async fn run(args: &Args) -> Result<()> {
    let discovery_config = DiscoveryConfig {
        extensions: discovery::normalize_extensions(&args.extensions),
        fail_fast: args.fail_fast,
    };
    let input_files = discovery::resolve_input_files(&args.input, discovery_config).await?;

    let mut scan_config = ScanConfig {
        fail_fast: args.fail_fast,
        show_progress: !args.no_progress,
        ..Default::default()
    };
    if let Some(jobs) = args.jobs {
        scan_config.max_concurrent_files = jobs.max(1);
    }

    let report = scan::scan_files(&input_files, &scan_config).await?;

    export::write_abbreviations_json(&report.registry, &args.output)
        .await
        .context("Failed to save abbreviations")?;

    if let Some(ref stats_path) = args.stats_out {
        export::write_run_stats(&report.stats, stats_path)
            .await
            .context("Failed to save run statistics")?;
    }

    println!("abbrscan v{} - scanned {} files", env!("CARGO_PKG_VERSION"), input_files.len());
    println!(
        "Found {} abbreviations ({} with long form), saved to {}",
        report.registry.len(),
        report.stats.abbreviations_resolved,
        args.output.display()
    );
    if report.stats.files_failed > 0 {
        println!("Files that could not be read: {}", report.stats.files_failed);
        for file in report.stats.file_stats.iter().filter(|f| f.error.is_some()) {
            println!("  {}", file.path);
        }
    }

    if args.verbose {
        println!("Total abbreviations found: {}", report.registry.len());
        let shorts: Vec<&str> = report.registry.iter().map(|a| a.short.as_str()).collect();
        println!("Short notices: {shorts:?}");
    }

    Ok(())
}
