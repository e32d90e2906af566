//! Disclosure CLI binary.
//!
//! Searches the company registry, retrieves the latest annual statement of a company and
//! runs generative analyses over it.

mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use disclosure::{
    AnalysisKind, Analyzer, CompanyRef, DEFAULT_GEMINI_MODEL, DartProvider, DirectoryProvider,
    DisclosureError, GeminiClient, RetrievalPolicy, Selection, StatementProvider,
    StatementService,
};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "disclosure")]
#[command(about = "Korean electronic disclosure: company search, statements and analyses", long_about = None)]
#[command(version)]
struct Cli {
    /// OpenDART API key
    #[arg(long, env = "DART_API_KEY", hide_env_values = true, global = true)]
    dart_api_key: Option<String>,

    /// OpenDART API root
    #[arg(long, env = "DART_BASE_URL", global = true)]
    dart_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the company registry by name
    Search {
        /// Name or part of a name, matched case-insensitively
        query: String,
    },

    /// Show the latest annual statement of a company
    Statement {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        window: Window,

        /// Print the raw statement as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate an analysis report for a company
    Analyze {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        window: Window,

        #[command(flatten)]
        model: ModelArgs,

        /// Report to generate
        #[arg(long, value_enum, default_value_t = KindArg::Financial)]
        kind: KindArg,
    },

    /// Ask a question about a company's latest statement
    Ask {
        #[command(flatten)]
        target: Target,

        /// The question
        question: String,

        #[command(flatten)]
        window: Window,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Check that the configured credentials are accepted
    Health {
        /// Gemini API key, reported as configured or not
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        gemini_api_key: Option<String>,
    },
}

#[derive(Args)]
struct Target {
    /// Company name, or registry code with --code
    company: String,

    /// Treat COMPANY as a registry code instead of a name
    #[arg(long)]
    code: bool,
}

#[derive(Args)]
struct Window {
    /// Fiscal years to try, most recent first (defaults to the last three completed years)
    #[arg(long, value_delimiter = ',')]
    years: Vec<String>,

    /// Stop trying older years after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,
}

#[derive(Args)]
struct ModelArgs {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Business,
    Financial,
    Audit,
}

impl From<KindArg> for AnalysisKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Business => Self::Business,
            KindArg::Financial => Self::Financial,
            KindArg::Audit => Self::Audit,
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let provider = Arc::new(dart_provider(&cli)?);

    match cli.command {
        Commands::Search { query } => {
            let companies = provider.search_companies(&query).await?;
            output::print_companies(&companies);
        }
        Commands::Statement {
            target,
            window,
            json,
        } => {
            let selection = select(&provider, &target, &window).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&selection.statement)?);
            } else {
                output::print_statement(&selection.company, &selection.statement);
            }
        }
        Commands::Analyze {
            target,
            window,
            model,
            kind,
        } => {
            let analyzer = analyzer(&model)?;
            let selection = select(&provider, &target, &window).await?;
            info!(company = selection.company.name(), kind = %AnalysisKind::from(kind), "Generating analysis");
            println!("{}", analyzer.analyze(kind.into(), &selection).await?);
        }
        Commands::Ask {
            target,
            question,
            window,
            model,
        } => {
            let analyzer = analyzer(&model)?;
            let selection = select(&provider, &target, &window).await?;
            println!("{}", analyzer.chat(&selection, &question).await?);
        }
        Commands::Health { gemini_api_key } => {
            let dart_ok = provider.check_credentials().await?;
            let gemini_configured = gemini_api_key.is_some_and(|k| !k.trim().is_empty());
            println!(
                "OpenDART: {}",
                if dart_ok { "connected" } else { "key rejected" }
            );
            println!(
                "Gemini:   {}",
                if gemini_configured { "configured" } else { "not configured" }
            );
            if !dart_ok {
                process::exit(2);
            }
        }
    }

    Ok(())
}

fn dart_provider(cli: &Cli) -> CliResult<DartProvider> {
    let key = cli.dart_api_key.as_deref().ok_or_else(|| {
        DisclosureError::Configuration(
            "DART_API_KEY is not set (use --dart-api-key or the environment)".to_string(),
        )
    })?;

    let mut provider = DartProvider::new(key)?;
    if let Some(base_url) = &cli.dart_base_url {
        provider = provider.with_base_url(base_url.as_str());
    }
    Ok(provider)
}

fn analyzer(model: &ModelArgs) -> CliResult<Analyzer<GeminiClient>> {
    let key = model.gemini_api_key.as_deref().ok_or_else(|| {
        DisclosureError::Configuration(
            "GEMINI_API_KEY is not set (use --gemini-api-key or the environment)".to_string(),
        )
    })?;
    Ok(Analyzer::new(GeminiClient::with_model(key, model.gemini_model.as_str())?))
}

fn policy(window: &Window) -> CliResult<RetrievalPolicy> {
    let mut policy = RetrievalPolicy::new();
    if !window.years.is_empty() {
        policy = policy.with_years(window.years.iter().map(|y| y.trim().to_string()))?;
    }
    if let Some(secs) = window.deadline_secs {
        policy = policy.with_deadline(Duration::from_secs(secs));
    }
    Ok(policy)
}

/// Resolves the target company. A name resolves to the first registry match.
async fn resolve(provider: &DartProvider, target: &Target) -> CliResult<CompanyRef> {
    if target.code {
        return Ok(CompanyRef::new(target.company.trim(), target.company.trim(), ""));
    }

    let mut companies = provider.search_companies(&target.company).await?;
    if companies.is_empty() {
        return Err(format!("No company matches {:?}", target.company).into());
    }
    if companies.len() > 1 {
        debug!(
            others = ?companies[1..].iter().map(CompanyRef::name).collect::<Vec<_>>(),
            "Several companies match, using the first"
        );
    }
    Ok(companies.swap_remove(0))
}

async fn select(
    provider: &Arc<DartProvider>,
    target: &Target,
    window: &Window,
) -> CliResult<Selection> {
    let company = resolve(provider, target).await?;
    load(provider.clone(), company, window).await
}

/// Fetches the latest statement of `company`. Each invocation is one-shot, so nothing
/// is kept between commands.
async fn load(
    provider: Arc<dyn StatementProvider>,
    company: CompanyRef,
    window: &Window,
) -> CliResult<Selection> {
    let service = StatementService::new(provider, policy(window)?);
    let statement = service.fetch_latest(company.code()).await?;
    Ok(Selection { company, statement })
}
