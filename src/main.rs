use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lodex::extract::ExtractConfig;
use lodex::store::UnresolvedPolicy;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "lodex")]
#[command(about = "Extract the LOD dictionary dump into per-word JSON records")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the dump into one JSON file per word
    Extract(ExtractArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// Path to the LOD dump (.xml or .xml.bz2)
    #[arg(short, long)]
    input: String,

    /// Output directory for generated files
    #[arg(short, long)]
    output: String,

    /// Limit number of articles to process (for testing)
    #[arg(long)]
    limit: Option<u64>,

    /// Dry run - don't write output files
    #[arg(long)]
    dry_run: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// What to do with variant references whose target article was never seen
    #[arg(long, value_enum, default_value_t = UnresolvedPolicy::Warn)]
    unresolved: UnresolvedPolicy,

    /// Clear the output directory before starting
    #[arg(long)]
    clean: bool,
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    if args.clean {
        let output_path = Path::new(&args.output);
        if output_path.exists() {
            info!("Cleaning output directory: {}", args.output);
            fs::remove_dir_all(output_path)
                .with_context(|| format!("Failed to clean output directory: {}", args.output))?;
        }
    }

    let config = ExtractConfig {
        input: args.input,
        output: args.output,
        limit: args.limit,
        dry_run: args.dry_run,
        pretty: args.pretty,
        unresolved: args.unresolved,
    };

    let start = Instant::now();
    let report = lodex::extract::run_extraction(&config)?;
    let duration = start.elapsed();

    println!();
    println!("=== Summary ===");
    println!("Total time:            {:.2}s", duration.as_secs_f64());
    println!();
    println!("Articles processed:    {}", report.stats.articles());
    println!("Articles failed:       {}", report.stats.failed());
    println!("Fragments extracted:   {}", report.stats.fragments());
    println!("Structures skipped:    {}", report.stats.skipped());
    println!("Meaning merges:        {}", report.stats.merged());
    println!("Words:                 {}", report.words);
    println!("Unresolved variants:   {}", report.stats.unresolved());
    println!("Words written:         {}", report.stats.written());

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise the `-v` count picks the level for this crate only.
fn init_logging(verbose: u8) -> Result<()> {
    let fallback = match verbose {
        0 => "lodex=warn",
        1 => "lodex=info",
        2 => "lodex=debug",
        _ => "lodex=trace",
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 2)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    let outcome = match cli.command {
        Commands::Extract(args) => run_extract(args),
    };

    if let Err(e) = outcome {
        error!("Extraction aborted: {:#}", e);
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    info!("Completed successfully");
    ExitCode::SUCCESS
}
