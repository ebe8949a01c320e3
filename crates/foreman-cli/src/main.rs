mod config;
mod employee_routes;
mod plan_route;
mod project_routes;
mod serve_cmd;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use foreman_core::ollama::{OllamaClient, OllamaConfig};
use foreman_db::config::DbConfig;
use foreman_db::pool;

use config::ForemanConfig;

#[derive(Parser)]
#[command(
    name = "foreman",
    about = "Project/task/employee management backend with LLM-generated project plans"
)]
struct Cli {
    /// Database URL (overrides FOREMAN_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Ollama base URL (overrides FOREMAN_OLLAMA_URL env var)
    #[arg(long, global = true)]
    ollama_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a foreman config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = DbConfig::DEFAULT_URL)]
        db_url: String,
        /// Ollama base URL
        #[arg(long, default_value = OllamaConfig::DEFAULT_BASE_URL)]
        ollama_url: String,
        /// Default model for plan generation
        #[arg(long, default_value = OllamaConfig::DEFAULT_MODEL)]
        model: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create the foreman database if needed and run migrations
    DbInit,
    /// Run the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8888)]
        port: u16,
    },
}

/// Execute the `foreman init` command: write config file.
fn cmd_init(db_url: &str, ollama_url: &str, model: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        ollama: config::OllamaSection {
            url: ollama_url.to_string(),
            model: model.to_string(),
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!("  ollama.url = {ollama_url}");
    println!("  ollama.model = {model}");
    println!();
    println!("Next: run `foreman db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `foreman db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = ForemanConfig::resolve(cli_db_url, None)?;

    println!("Initializing foreman database...");

    pool::ensure_database_exists(&resolved.db_config).await?;
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    db_pool.close().await;

    println!("foreman db-init complete.");
    Ok(())
}

/// Execute the `foreman serve` command.
async fn cmd_serve(
    cli_db_url: Option<&str>,
    cli_ollama_url: Option<&str>,
    bind: &str,
    port: u16,
) -> anyhow::Result<()> {
    let resolved = ForemanConfig::resolve(cli_db_url, cli_ollama_url)?;

    let db_pool = pool::create_pool(&resolved.db_config).await?;
    let generator = OllamaClient::new(resolved.ollama_config)?;

    let state = serve_cmd::AppState {
        pool: db_pool.clone(),
        generator: Arc::new(generator),
    };
    let result = serve_cmd::run_serve(state, bind, port).await;

    db_pool.close().await;
    result
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            ref db_url,
            ref ollama_url,
            ref model,
            force,
        } => cmd_init(db_url, ollama_url, model, force),
        Commands::DbInit => cmd_db_init(cli.database_url.as_deref()).await,
        Commands::Serve { ref bind, port } => {
            cmd_serve(
                cli.database_url.as_deref(),
                cli.ollama_url.as_deref(),
                bind,
                port,
            )
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
    Ok(())
}
