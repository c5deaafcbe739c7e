use anyhow::{Context, Result};
use clap::Parser;
use sol::index::{BuildOptions, ErrorPolicy, Exclusions, build_index_with_options, find_files};
use sol::output::OutputFormat;
use sol::repl::Session;
use sol::utils::{Progress, SolConfig};
use std::io;
use std::path::PathBuf;
use termcolor::{ColorChoice, StandardStream};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SOL_LOG";

#[derive(Parser)]
#[command(name = "sol")]
#[command(about = "Index a directory in memory and search its words interactively")]
struct Cli {
    /// Directory to index
    path: PathBuf,

    /// Extra file extensions to skip, space separated
    #[arg(short = 'E', long = "exclude-ext", num_args = 1.., value_name = "EXT")]
    exclude_ext: Vec<String>,

    /// Read settings from this file instead of ~/.sol/.solconfig
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured minimum word length
    #[arg(long)]
    min_word_length: Option<usize>,

    /// Print one JSON object per result
    #[arg(long)]
    json: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Stop at the first unreadable file instead of skipping it
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = match &cli.config {
        Some(path) => SolConfig::load_from(path)?,
        None => SolConfig::load()?,
    };
    if let Some(min_word_length) = cli.min_word_length {
        config.min_word_length = min_word_length;
    }

    let mut exclusions = Exclusions::new();
    exclusions
        .exclude_extensions(&config.excluded_extensions)
        .exclude_extensions(&cli.exclude_ext)
        .exclude_directories(&config.excluded_directories);

    let spinner = Progress::spinner("Discovering files...");
    let files = find_files(&cli.path, &exclusions);
    spinner.clear();
    let files = files?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // Keep stdout clean for JSON consumers
    match format {
        OutputFormat::Text => println!("Found # files: {}", files.len()),
        OutputFormat::Json => eprintln!("Found # files: {}", files.len()),
    }

    let options = BuildOptions {
        min_word_length: config.min_word_length,
        on_error: if cli.strict {
            ErrorPolicy::Abort
        } else {
            ErrorPolicy::Skip
        },
        progress: true,
    };
    let (trie, stats) = build_index_with_options(&files, &options)
        .with_context(|| format!("Failed to index {}", cli.path.display()))?;

    if stats.files_skipped > 0 {
        warn!(skipped = stats.files_skipped, "some files could not be indexed");
    }
    info!(
        files = stats.files_indexed,
        occurrences = stats.occurrences,
        "ready"
    );

    let choice = if cli.no_color || cli.json {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let mut stdout = StandardStream::stdout(choice);

    Session::new(&trie, &config, format).run(io::stdin().lock(), &mut stdout)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
