//! API Playground CLI
//!
//! Command-line interface for inspecting API documentation: detect its
//! format, extract the endpoint catalog, validate it, and render the prompt
//! context an assistant would receive.

use anyhow::{bail, Context, Result};
use api_playground_common::{ContextSource, NormalizedDocument, ParseOptions, PlaygroundConfig};
use api_playground_context::{endpoint_line, estimate_tokens, ApiContext, ContextFormatter};
use api_playground_parser::{detect_format, parse, validate, DocumentFormat, RawDocument};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "api-playground")]
#[command(version, about = "Normalize API documentation into an endpoint catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the documentation format of a file
    #[command(after_help = "EXAMPLES:\n  \
        api-playground detect petstore.json\n  \
        api-playground detect docs.html")]
    Detect {
        /// Documentation file (JSON, YAML, HTML or text)
        file: PathBuf,
    },

    /// Extract and display the endpoint catalog
    #[command(after_help = "EXAMPLES:\n  \
        # Human-readable summary\n  \
        api-playground parse petstore.yaml\n\n  \
        # Normalized document as JSON\n  \
        api-playground parse collection.json --json\n\n  \
        # Only endpoints tagged \"users\"\n  \
        api-playground parse openapi.json --include-tags users")]
    Parse {
        /// Documentation file (JSON, YAML, HTML or text)
        file: PathBuf,

        /// Print the normalized document as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Check that a document is usable as an API context
    Validate {
        /// Documentation file (JSON, YAML, HTML or text)
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Render the prompt context for a document
    #[command(after_help = "EXAMPLES:\n  \
        api-playground context openapi.json --name \"Billing API\"\n\n  \
        # Trim to 10 endpoints when over 500 estimated tokens\n  \
        api-playground context openapi.json --max-tokens 500 --trim 10")]
    Context {
        /// Documentation file (JSON, YAML, HTML or text)
        file: PathBuf,

        /// Context name (defaults to the document title, then the file name)
        #[arg(long)]
        name: Option<String>,

        /// URL to record as the document's source instead of the file path
        #[arg(long)]
        source_url: Option<String>,

        /// Estimated-token budget before endpoints are trimmed
        #[arg(long)]
        max_tokens: Option<usize>,

        /// Endpoints kept when the budget is exceeded
        #[arg(long)]
        trim: Option<usize>,

        /// Do not mask credentials in the output
        #[arg(long)]
        no_redact: bool,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Extraction filters; each flag overrides the configuration file
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Stop after this many endpoints
    #[arg(long)]
    max_endpoints: Option<usize>,

    /// Keep deprecated operations
    #[arg(long)]
    include_deprecated: bool,

    /// Comma-separated tags to keep
    #[arg(long, value_delimiter = ',')]
    include_tags: Vec<String>,

    /// Comma-separated tags to drop
    #[arg(long, value_delimiter = ',')]
    exclude_tags: Vec<String>,
}

impl FilterArgs {
    fn apply(&self, mut options: ParseOptions) -> ParseOptions {
        if let Some(max) = self.max_endpoints {
            options.max_endpoints = max;
        }
        if self.include_deprecated {
            options.include_deprecated = true;
        }
        if !self.include_tags.is_empty() {
            options.include_tags = self.include_tags.clone();
        }
        if !self.exclude_tags.is_empty() {
            options.exclude_tags = self.exclude_tags.clone();
        }
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Detect { file } => detect_command(&file)?,
        Commands::Parse {
            file,
            json,
            filters,
        } => parse_command(&file, json, &filters.apply(config.parse), cli.verbose)?,
        Commands::Validate { file, filters } => {
            validate_command(&file, &filters.apply(config.parse))?
        }
        Commands::Context {
            file,
            name,
            source_url,
            max_tokens,
            trim,
            no_redact,
            filters,
        } => {
            let mut settings = config.injection;
            if let Some(max_tokens) = max_tokens {
                settings.max_tokens = max_tokens;
            }
            if let Some(trim) = trim {
                settings.trim_to = trim;
            }
            if no_redact {
                settings.redact = false;
            }

            let formatter =
                ContextFormatter::new(settings).context("Failed to load context template")?;
            context_command(ContextRequest {
                file: &file,
                name,
                source_url,
                options: filters.apply(config.parse),
                formatter: &formatter,
            })?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<PlaygroundConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            PlaygroundConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(PlaygroundConfig::default()),
    }
}

fn read_documentation(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn detect_command(path: &Path) -> Result<()> {
    let content = read_documentation(path)?;
    let format = detect_format(RawDocument::Text(&content));

    match format {
        DocumentFormat::Unknown => println!(
            "{} {}: {}",
            "✗".red(),
            path.display(),
            "structured document with no known signature".yellow()
        ),
        format => println!("{} {}: {}", "✓".green(), path.display(), format.to_string().cyan()),
    }

    Ok(())
}

fn parse_command(path: &Path, json: bool, options: &ParseOptions, verbose: bool) -> Result<()> {
    let content = read_documentation(path)?;
    let document = parse(RawDocument::Text(&content), options)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&document).context("Failed to serialize document")?;
        println!("{}", rendered);
        return Ok(());
    }

    print_summary(&document, verbose);
    Ok(())
}

fn print_summary(document: &NormalizedDocument, verbose: bool) {
    let metadata = &document.metadata;
    println!("{}", "Document:".bold());
    println!("  Source: {}", metadata.source_type.to_string().yellow());
    if let Some(title) = &metadata.title {
        println!("  Title: {}", title.yellow());
    }
    if let Some(version) = &metadata.version {
        println!("  Version: {}", version);
    }
    let placeholder = if document.has_placeholder_base_url() {
        " (placeholder)".dimmed().to_string()
    } else {
        String::new()
    };
    println!("  Base URL: {}{}", document.base_url.cyan(), placeholder);
    println!("  Endpoints: {}", document.endpoints.len());

    if document.endpoints.is_empty() {
        return;
    }

    println!("\n{}", "Endpoints:".bold());
    for endpoint in &document.endpoints {
        let auth = if endpoint.requires_auth {
            " [auth]".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {}{}", endpoint_line(endpoint), auth);
        if verbose && !endpoint.tags.is_empty() {
            println!("      tags: {}", endpoint.tags.join(", ").dimmed());
        }
    }
}

fn validate_command(path: &Path, options: &ParseOptions) -> Result<()> {
    let content = read_documentation(path)?;
    let document = parse(RawDocument::Text(&content), options)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let report = validate(&document);
    if report.valid {
        println!(
            "{} {} is valid ({} endpoints)",
            "✓".green(),
            path.display(),
            document.endpoints.len()
        );
        return Ok(());
    }

    println!("{} {} is not a usable API context:", "✗".red(), path.display());
    for error in &report.errors {
        println!("  • {}", error);
    }
    bail!("validation failed with {} error(s)", report.errors.len())
}

struct ContextRequest<'a> {
    file: &'a Path,
    name: Option<String>,
    source_url: Option<String>,
    options: ParseOptions,
    formatter: &'a ContextFormatter,
}

fn context_command(request: ContextRequest<'_>) -> Result<()> {
    let content = read_documentation(request.file)?;
    let document = parse(RawDocument::Text(&content), &request.options)
        .with_context(|| format!("Failed to parse {}", request.file.display()))?;

    let name = request
        .name
        .or_else(|| document.metadata.title.clone())
        .or_else(|| {
            request
                .file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "API".to_string());

    let source = match request.source_url {
        Some(url) => ContextSource::Url(url),
        None => ContextSource::File(request.file.display().to_string()),
    };

    // Validation happens here, once
    let context = ApiContext::new(name, source, document)
        .with_context(|| format!("{} cannot become an API context", request.file.display()))?;
    let fragment = request
        .formatter
        .format_within_budget(&context)
        .context("Failed to render context")?;

    print!("{}", fragment);
    eprintln!(
        "{} ~{} tokens (budget {}, {} endpoints in document)",
        "→".cyan(),
        estimate_tokens(&fragment),
        request.formatter.settings().max_tokens,
        context.endpoint_count()
    );

    Ok(())
}
