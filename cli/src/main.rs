//! pdfsift CLI - structure recovery for PDF extraction archives

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsift::info::{DocumentInfo, StructuredDocumentInfo};
use pdfsift::{
    detect_format_from_path, extract_many, render, ArchiveCache, ClassifyOptions, Error,
    ExtractOptions, InputFormat, JsonFormat, RecaptureMode, ServiceConfig,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pdfsift")]
#[command(version)]
#[command(about = "Recover sections, tables, and references from PDF extraction archives", long_about = None)]
struct Cli {
    #[command(flatten)]
    tuning: Tuning,

    #[command(subcommand)]
    command: Commands,
}

/// Classifier tunables shared by every subcommand.
#[derive(Args)]
struct Tuning {
    /// Minimum reference length in characters
    #[arg(long, global = true, value_name = "N")]
    min_ref_len: Option<usize>,

    /// Score a list must exceed to be taken as the reference list
    #[arg(long, global = true, value_name = "SCORE")]
    ref_threshold: Option<f64>,

    /// What a repeated reference heading does during capture
    #[arg(long, global = true, value_enum)]
    recapture: Option<Recapture>,

    /// Never fall back to scoring lists for references
    #[arg(long, global = true)]
    no_fallback: bool,
}

impl Tuning {
    fn classify_options(&self) -> ClassifyOptions {
        let mut options = ClassifyOptions::new().with_list_fallback(!self.no_fallback);
        if let Some(len) = self.min_ref_len {
            options = options.with_min_reference_len(len);
        }
        if let Some(threshold) = self.ref_threshold {
            options = options.with_reference_threshold(threshold);
        }
        if let Some(mode) = self.recapture {
            options = options.with_recapture(mode.into());
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract full documents to <stem>.json files
    Extract {
        /// Input PDFs or extraction archives
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Base directory holding the archive cache
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,

        /// Process inputs one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Write the sections as JSON
    Sections {
        /// Input PDF or extraction archive
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Base directory holding the archive cache
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,
    },

    /// Write the references as JSON
    #[command(alias = "refs")]
    References {
        /// Input PDF or extraction archive
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Base directory holding the archive cache
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,
    },

    /// Print tables as JSON records
    Tables {
        /// Input PDF or extraction archive
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print only the table at this index
        #[arg(long, value_name = "N")]
        index: Option<usize>,

        /// Base directory holding the archive cache
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input PDF or extraction archive
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Base directory holding the archive cache
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,
    },

    /// Show which extraction service credentials resolve
    Config {
        /// Base directory holding the credentials file
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Recapture {
    /// Keep capturing and keep collected references
    Continue,
    /// Drop collected references and capture afresh
    Restart,
    /// Only the first reference heading opens capture
    Once,
}

impl From<Recapture> for RecaptureMode {
    fn from(mode: Recapture) -> Self {
        match mode {
            Recapture::Continue => RecaptureMode::Continue,
            Recapture::Restart => RecaptureMode::Restart,
            Recapture::Once => RecaptureMode::Once,
        }
    }
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let options = cli.tuning.classify_options();

    let result = match cli.command {
        Commands::Extract {
            inputs,
            output,
            compact,
            base,
            sequential,
        } => cmd_extract(
            &inputs,
            output.as_deref(),
            compact,
            base.as_deref(),
            sequential,
            options,
        ),
        Commands::Sections {
            input,
            output,
            base,
        } => cmd_sections(&input, output.as_deref(), base.as_deref(), options),
        Commands::References {
            input,
            output,
            base,
        } => cmd_references(&input, output.as_deref(), base.as_deref(), options),
        Commands::Tables { input, index, base } => {
            cmd_tables(&input, index, base.as_deref(), options)
        }
        Commands::Info { input, base } => cmd_info(&input, base.as_deref(), options),
        Commands::Config { base } => cmd_config(base.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `LOGLEVEL` names the level, default info.
fn init_logging() {
    let level = std::env::var("LOGLEVEL")
        .map(|level| log_filter(&level))
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn log_filter(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "notset" => "trace".to_string(),
        other => other.to_string(),
    }
}

/// Map an input to its extraction archive: archives are used as they are,
/// PDFs are looked up in the cache under `base`.
fn resolve_archive(input: &Path, base: Option<&Path>) -> CliResult<PathBuf> {
    match detect_format_from_path(input)? {
        InputFormat::Archive => Ok(input.to_path_buf()),
        InputFormat::Pdf => {
            let base = match base {
                Some(base) => base.to_path_buf(),
                None => std::env::current_dir()?,
            };
            Ok(ArchiveCache::new(base).require(input)?)
        }
    }
}

fn open_info(
    input: &Path,
    base: Option<&Path>,
    options: ClassifyOptions,
) -> CliResult<StructuredDocumentInfo> {
    let archive = resolve_archive(input, base)?;
    Ok(StructuredDocumentInfo::open_with_options(archive, options)?)
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_extract(
    inputs: &[PathBuf],
    output: Option<&Path>,
    compact: bool,
    base: Option<&Path>,
    sequential: bool,
    options: ClassifyOptions,
) -> CliResult<()> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let mut failed = 0;
    let mut sources = Vec::new();
    let mut archives = Vec::new();
    for input in inputs {
        match resolve_archive(input, base) {
            Ok(archive) => {
                sources.push(input);
                archives.push(archive);
            }
            Err(e) => match e.downcast_ref::<Error>() {
                Some(Error::UnknownFormat) => {
                    log::warn!("Skipping {}: not a PDF or extraction archive", input.display());
                }
                _ => {
                    eprintln!("{} {}: {}", "Failed".red(), input.display(), e);
                    failed += 1;
                }
            },
        }
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Extracting {} archives...", archives.len()));

    let extract_options = ExtractOptions::new()
        .with_classify(options)
        .with_parallel(!sequential);
    let results = extract_many(&archives, &extract_options);
    pb.finish_and_clear();

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let mut written = 0;
    for (source, (_, result)) in sources.into_iter().zip(results) {
        let written_to = result
            .map_err(|e| -> Box<dyn std::error::Error> { Box::new(e) })
            .and_then(|doc| {
                let stem = source.file_stem().unwrap_or_default().to_string_lossy();
                let path = output_dir.join(format!("{}.json", stem));
                fs::write(&path, render::to_json(&doc, format)?)?;
                Ok(path)
            });
        match written_to {
            Ok(path) => {
                println!("{} {}", "Extracted".green(), path.display());
                written += 1;
            }
            Err(e) => {
                eprintln!("{} {}: {}", "Failed".red(), source.display(), e);
                failed += 1;
            }
        }
    }

    println!("\n{} {} documents extracted", "Done!".green().bold(), written);

    if failed > 0 {
        return Err(format!("{} inputs failed", failed).into());
    }
    Ok(())
}

fn cmd_sections(
    input: &Path,
    output: Option<&Path>,
    base: Option<&Path>,
    options: ClassifyOptions,
) -> CliResult<()> {
    let info = open_info(input, base, options)?;
    let json = render::sections_to_json(&info.sections(), JsonFormat::Pretty)?;
    write_or_print(output, &json)
}

fn cmd_references(
    input: &Path,
    output: Option<&Path>,
    base: Option<&Path>,
    options: ClassifyOptions,
) -> CliResult<()> {
    let info = open_info(input, base, options)?;
    let json = render::references_to_json(&info.references(), JsonFormat::Pretty)?;
    write_or_print(output, &json)
}

fn cmd_tables(
    input: &Path,
    index: Option<usize>,
    base: Option<&Path>,
    options: ClassifyOptions,
) -> CliResult<()> {
    let info = open_info(input, base, options)?;
    let tables = info.tables();

    let json = match index {
        Some(index) => {
            let table = tables.get(index).ok_or_else(|| {
                format!("Table index {} out of range ({} tables)", index, tables.len())
            })?;
            serde_json::to_string_pretty(table)?
        }
        None => render::tables_to_json(&tables, JsonFormat::Pretty)?,
    };

    println!("{}", json);
    Ok(())
}

fn cmd_info(input: &Path, base: Option<&Path>, options: ClassifyOptions) -> CliResult<()> {
    let format = detect_format_from_path(input)?;
    let info = open_info(input, base, options)?;
    let doc = info.to_document();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    if doc.title.is_empty() {
        println!("{}: {}", "Title".bold(), "(none)".dimmed());
    } else {
        println!("{}: {}", "Title".bold(), doc.title);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let words: usize = doc.plain_text().split_whitespace().count();

    println!("{}: {}", "Elements".bold(), info.elements().len());
    println!("{}: {}", "Sections".bold(), doc.sections.len());
    println!("{}: {}", "Tables".bold(), doc.tables.len());
    println!("{}: {}", "References".bold(), doc.references.len());
    println!("{}: {}", "Words".bold(), words);

    Ok(())
}

fn cmd_config(base: Option<&Path>) -> CliResult<()> {
    let mut builder = ServiceConfig::builder();
    if let Some(base) = base {
        builder = builder.with_base_path(base);
    }
    let config = builder.build()?;

    println!("{}", "Extraction Service".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Base".bold(), config.base_path.display());
    println!("{}: {}", "Source".bold(), config.source);
    println!("{}: {}", "Client ID".bold(), config.credentials.client_id);
    println!(
        "{}: {}",
        "Client Secret".bold(),
        config.credentials.masked_secret()
    );
    println!("{}: {}", "Archive Cache".bold(), config.cache().dir().display());

    Ok(())
}
