use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pdfmod::config::{load_or_default, PdfModConfig};
use pdfmod::file::{eligible, FileHandler, FilePicker};
use pdfmod::pdf::{locate, FieldLocation, FieldSpec, FixedBackoff, MetadataPatcher};
use pdfmod::prompt::ConsolePrompter;
use pdfmod::{PdfManager, PdfModError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pdfmod")]
#[command(about = "Rename PDF files or patch their Title/Producer metadata", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding candidate files (default: ./pdf_files)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Configuration file (default: ./pdfmod.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a file, then rename it or edit its metadata (default)
    Run,

    /// List the selectable files
    List,

    /// Print the current Title and Producer of a file
    Show {
        /// File name inside the candidate directory
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir().context("could not get current directory")?;
    let (config, source) = load_or_default(cli.config.as_deref(), &cwd)?;
    info!(source = %source, "using configuration");
    let directory = resolve_directory(cli.dir, &config, &cwd);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(directory, &config),
        Commands::List => cmd_list(&directory, &config),
        Commands::Show { name } => cmd_show(&directory, &name),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("pdfmod=debug")
    } else if quiet {
        EnvFilter::new("pdfmod=warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pdfmod=info"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

/// Resolve the candidate directory.
///
/// Priority order:
/// 1. Explicit --dir flag
/// 2. PDFMOD_DIR environment variable
/// 3. `directory` from the config, relative to the working directory
fn resolve_directory(cli_dir: Option<PathBuf>, config: &PdfModConfig, cwd: &Path) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir;
    }

    if let Ok(env_dir) = env::var("PDFMOD_DIR") {
        if !env_dir.trim().is_empty() {
            return PathBuf::from(env_dir);
        }
    }

    cwd.join(&config.directory)
}

fn ensure_directory(directory: &Path) -> Result<(), PdfModError> {
    if directory.is_dir() {
        Ok(())
    } else {
        Err(PdfModError::DirectoryMissing {
            path: directory.to_path_buf(),
        })
    }
}

fn cmd_run(directory: PathBuf, config: &PdfModConfig) -> Result<()> {
    let mut manager = PdfManager::new(
        directory,
        FilePicker::new(config.extension.clone()),
        MetadataPatcher::new(config.max_attempts, FixedBackoff(config.retry_delay())),
        ConsolePrompter::stdio(),
    );

    let outcome = manager.execute()?;
    println!("{}", outcome.to_string().dimmed());
    Ok(())
}

fn cmd_list(directory: &Path, config: &PdfModConfig) -> Result<()> {
    ensure_directory(directory)?;

    let picker = FilePicker::new(config.extension.clone());
    let files = picker.list_files(directory)?;
    let candidates = eligible(&files, picker.extension());

    if candidates.is_empty() {
        return Err(PdfModError::NoEligibleFiles {
            extension: picker.extension().to_string(),
        }
        .into());
    }

    println!("{}", format!("Directory: {}", directory.display()).dimmed());
    for (i, file) in candidates.iter().enumerate() {
        println!("[{}] {}", i + 1, file.name);
    }

    Ok(())
}

fn cmd_show(directory: &Path, name: &str) -> Result<()> {
    ensure_directory(directory)?;

    let path = directory.join(name);
    let data = fs::read(&path).map_err(|source| PdfModError::ReadFailure {
        path: path.clone(),
        source,
    })?;

    println!("{}", path.display().to_string().bold());
    for field in [FieldSpec::TITLE, FieldSpec::PRODUCER] {
        let location = locate(&data, &field);
        let value = match &location {
            FieldLocation::Found { .. } => location
                .value(&data)
                .map(|v| String::from_utf8_lossy(v).into_owned())
                .unwrap_or_default()
                .normal(),
            FieldLocation::NotFound => "<not found>".yellow(),
            FieldLocation::Malformed => "<malformed>".red(),
        };
        println!("  {:<9} {}", format!("{}:", field), value);
    }

    Ok(())
}
