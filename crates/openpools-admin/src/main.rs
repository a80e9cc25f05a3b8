//! openpools-admin: operator tooling for the OpenPools matching core.
//!
//! Results are printed to stdout as JSON; logs go to stderr (or `LOG_FILE`).

mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use openpools_core::{MatchingConfig, Source};
use openpools_db::{log_pool_metrics, Database, PoolConfig};
use openpools_inference::OpenAIKeywordExtractor;
use openpools_matching::{recalculate_all, KeywordIngestor, MatchEngine};

#[derive(Parser, Debug)]
#[command(name = "openpools-admin")]
#[command(author, version, about = "Operator tooling for OpenPools matching")]
#[command(propagate_version = true)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Recompute every stored keyword weight under the current category table
    Recalculate,

    /// Compute, persist, and print ranked matches for one user
    Match {
        /// User to compute matches for
        #[arg(short, long)]
        user_id: Uuid,

        /// Maximum number of matches (default: OPENPOOLS_MATCH_LIMIT)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Extract keywords from a text file and merge them into a user's profile
    Ingest {
        /// User whose profile receives the keywords
        #[arg(short, long)]
        user_id: Uuid,

        /// Source tag: resume, pdf, linkedin, github, or any other label
        #[arg(short, long, default_value = "resume")]
        source: String,

        /// Plain-text document to extract from
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = logging::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(subsystem = "admin", error = %format!("{:#}", e), "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_url = cli
        .database_url
        .context("DATABASE_URL must be set or passed with --database-url")?;
    let config = MatchingConfig::from_env().context("Invalid matching configuration")?;
    let db = Database::connect_with_config(&database_url, PoolConfig::from_env())
        .await
        .context("Failed to connect to database")?;
    log_pool_metrics(db.pool());

    match cli.command {
        Commands::Migrate => {
            db.migrate().await.context("Migration failed")?;
            info!(subsystem = "admin", op = "migrate", "Migrations applied");
            print_json(&serde_json::json!({ "migrated": true }))
        }
        Commands::Recalculate => {
            let report = recalculate_all(&db.keyword_profiles, &config).await?;
            print_json(&report)
        }
        Commands::Match { user_id, limit } => {
            let engine = MatchEngine::new(
                Arc::new(db.profiles),
                Arc::new(db.keyword_profiles),
                Arc::new(db.matches),
                config,
            );
            let run = engine.compute_matches(user_id, limit).await?;
            print_json(&run)
        }
        Commands::Ingest {
            user_id,
            source,
            file,
        } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let extractor =
                OpenAIKeywordExtractor::from_env().context("Failed to create extractor")?;
            let ingestor = KeywordIngestor::new(Arc::new(db.keyword_profiles), config)
                .with_extractor(Arc::new(extractor));
            let outcome = ingestor
                .ingest_text(user_id, &text, &Source::parse(&source))
                .await?;
            print_json(&outcome)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
