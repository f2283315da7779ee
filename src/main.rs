use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use journal_analyzer::analyzer::{
    response_schema, AnalysisError, GeminiAnalyzer, JournalAnalyzer, PromptLanguage,
};
use journal_analyzer::config::{
    default_config_path, find_config_file, get_config, load_config, Config, ConfigFile,
    CONFIG_FILE_NAME,
};
use journal_analyzer::models::{AnalysisRequest, AnalysisResult, DocumentQuery};
use journal_analyzer::ui::{self, Spinner, Status};
use journal_analyzer::utils::{classify_identifier, validate_issn, IdentifierKind};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Journal Analyzer - Assess scientific journal quality from a name, ISSN, DOI, URL or PDF
#[derive(Parser, Debug)]
#[command(name = "journal-analyzer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Assess scientific journal quality (indexing, rank, metrics) with a generative AI service", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Model name (overrides the config file)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Prompt language (overrides the config file)
    #[arg(long, value_enum, global = true)]
    language: Option<Language>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Show all environment variables
    #[arg(long)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Language {
    #[value(name = "id")]
    Indonesian,
    #[value(name = "en")]
    English,
}

impl From<Language> for PromptLanguage {
    fn from(language: Language) -> Self {
        match language {
            Language::Indonesian => PromptLanguage::Indonesian,
            Language::English => PromptLanguage::English,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a journal by name, ISSN, DOI or URL, or from an article PDF
    #[command(alias = "a")]
    Analyze {
        /// Journal name, ISSN, DOI or URL
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        query: Option<String>,

        /// Article or journal document to analyze instead of a text query
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// Print the response schema sent to the service
    Schema,

    /// Write a default configuration file
    Init {
        /// Destination (default: user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn print_env_vars() {
    println!("Journal Analyzer - Environment Variables");
    println!();
    println!("API Keys:");
    println!("  GEMINI_API_KEY              API key for the Gemini generative service");
    println!("  API_KEY                     Fallback API key variable");
    println!();
    println!("Overrides (take precedence over the config file):");
    println!("  JOURNAL_ANALYZER_API__GEMINI_API_KEY          API key");
    println!("  JOURNAL_ANALYZER_API__BASE_URL                Service base URL");
    println!("  JOURNAL_ANALYZER_API__MODEL                   Model name (default: gemini-2.5-flash)");
    println!("  JOURNAL_ANALYZER_API__TIMEOUT_SECS            Request timeout (default: 120)");
    println!("  JOURNAL_ANALYZER_ANALYSIS__TEMPERATURE        Sampling temperature (default: 0.2)");
    println!("  JOURNAL_ANALYZER_ANALYSIS__LANGUAGE           indonesian or english (default: indonesian)");
    println!("  JOURNAL_ANALYZER_ANALYSIS__MAX_DOCUMENT_SIZE_MB  Largest accepted document (default: 20)");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                    Rust logging level (e.g., debug, info, warn, error)");
    println!();
    println!("Example:");
    println!("  export GEMINI_API_KEY=\"your-key-here\"");
    println!("  journal-analyzer analyze \"0317-8471\"");
}

fn init_tracing(cli: &Cli) {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let level = if cli.quiet { "error" } else { log_level };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("journal_analyzer={}", level)),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else {
        get_config().context("Failed to apply environment overrides")?
    };

    if let Some(timeout) = cli.timeout {
        config.api.timeout_secs = timeout;
    }
    if let Some(model) = &cli.model {
        config.api.model = model.clone();
    }
    if let Some(language) = cli.language {
        config.analysis.language = language.into();
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    init_tracing(&cli);

    match &cli.command {
        Some(Commands::Analyze { query, file }) => {
            let config = resolve_config(&cli)?;
            let request = match (query, file) {
                (_, Some(path)) => AnalysisRequest::Document(
                    DocumentQuery::from_path(path, config.analysis.max_document_bytes()).await?,
                ),
                (Some(query), None) => {
                    if classify_identifier(query) == IdentifierKind::Issn {
                        if let Err(e) = validate_issn(query) {
                            tracing::debug!(error = %e, "ISSN check failed");
                            if !cli.quiet {
                                let msg = format!(
                                    "{} has an invalid ISSN check digit; \
                                     the result may describe another journal",
                                    query.trim()
                                );
                                ui::print_status(Status::Warning, &msg);
                            }
                        }
                    }
                    AnalysisRequest::text(query.as_str())?
                }
                (None, None) => {
                    anyhow::bail!("Enter a journal name, ISSN, DOI or URL, or pass --file")
                }
            };

            let analyzer = GeminiAnalyzer::new(&config)?;
            tracing::info!(model = analyzer.model(), "Analyzer ready");
            let result = run_analysis(&cli, &analyzer, &request).await?;
            output_result(&result, cli.output)?;
        }
        Some(Commands::Schema) => {
            let config = resolve_config(&cli)?;
            let schema = response_schema(config.analysis.language);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Some(Commands::Init { path, force }) => {
            let path = match path {
                Some(p) => p.clone(),
                None => default_config_path().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
            };
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists; pass --force to overwrite",
                    path.display()
                );
            }
            ConfigFile::template().save(&path)?;
            if !cli.quiet {
                ui::print_status(Status::Success, &format!("Wrote {}", path.display()));
            }
        }
        None => {
            println!("Journal Analyzer v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Use --help for usage information");
            println!();
            println!("Quick start:");
            println!("  analyze <query>       - Analyze a journal by name, ISSN, DOI or URL");
            println!("  analyze --file <pdf>  - Analyze the journal of an article PDF");
            println!("  schema                - Print the response schema");
            println!("  init                  - Write a default config file");
        }
    }

    Ok(())
}

async fn run_analysis(
    cli: &Cli,
    analyzer: &dyn JournalAnalyzer,
    request: &AnalysisRequest,
) -> Result<AnalysisResult> {
    let spinner = if cli.quiet || !ui::is_terminal() {
        Spinner::hidden()
    } else {
        Spinner::new(&format!("Analyzing with {}...", analyzer.name()))
    };

    match analyzer.analyze(request).await {
        Ok(result) => {
            spinner.finish_with_success(&format!("Analyzed {}", result.journal_name));
            Ok(result)
        }
        Err(err) => {
            spinner.finish_with_error("Analysis failed");
            if let AnalysisError::Configuration(_) = err {
                ui::print_status(
                    Status::Warning,
                    "Run `journal-analyzer --env` to see how to provide an API key",
                );
            }
            Err(err.into())
        }
    }
}

fn output_result(result: &AnalysisResult, format: OutputFormat) -> Result<()> {
    let actual_format = if format == OutputFormat::Auto {
        if ui::is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Plain => print!("{}", ui::render_plain(result, ui::is_terminal())),
        OutputFormat::Table => println!("{}", ui::render_table(result, ui::terminal_width())),
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}
