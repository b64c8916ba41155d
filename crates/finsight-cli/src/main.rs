//! finsight CLI - financial document analysis from the command line
//!
//! Reads an uploaded PDF through the analyst's document tool and prints
//! either the extracted text or the full context an LLM runtime needs to
//! write the analysis report.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;

use finsight_core::agent::FinancialAnalyst;
use finsight_core::config::ConfigManager;
use finsight_core::task::{AnalysisTask, TaskInputs};
use finsight_core::tools::document::DocumentTextExtractor;
use finsight_core::tools::ToolRegistry;

#[derive(Parser)]
#[command(name = "finsight")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Financial document analyst: PDF extraction and analysis prompts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// LLM provider name from the config (defaults to config setting)
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Model to use (defaults to provider's model)
    #[arg(short, long, global = true)]
    model: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract cleaned, page-marked text from a PDF
    Extract {
        /// Path to the PDF file
        path: PathBuf,
    },

    /// Read a document and print the full analysis context for a query
    Prepare {
        /// Path to the uploaded financial document
        #[arg(short, long)]
        file: String,

        /// Question the analysis should answer
        #[arg(short, long, default_value = "Analyze this financial document for investment insights")]
        query: String,

        /// Emit the prepared context as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show available tools
    Tools,

    /// Show configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials usually live in a local .env next to the documents
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path.clone())?,
        None => ConfigManager::new()?,
    };

    // Logs go to stderr so extracted text on stdout stays pipeable
    let filter = if cli.verbose {
        "info,finsight_core=debug".to_string()
    } else {
        config_manager.config().general.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract { path } => {
            let extraction = DocumentTextExtractor::new().extract(&path);
            tracing::info!(status = extraction.status(), "extraction finished");
            print!("{}", extraction);
            if !extraction.is_success() {
                println!();
            }
        }
        Commands::Prepare { file, query, json } => {
            let config = config_manager.config();
            let provider = config.resolve_provider(cli.provider.as_deref(), cli.model.as_deref())?;
            let agent = FinancialAnalyst::new(provider, config.agent.clone());
            let task = AnalysisTask::financial_document_analysis();

            let prepared = task.prepare(&agent, &TaskInputs::new(file, query)).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&prepared)?);
            } else {
                println!("{}", style("System Prompt:").bold());
                println!("{}", prepared.system_prompt);
                println!();
                println!(
                    "{} {}",
                    style("Model:").bold(),
                    style(agent.provider().qualified_model()).cyan()
                );
                println!(
                    "{} {}",
                    style("Max iterations:").bold(),
                    agent.settings().max_iter
                );
                println!();
                println!("{}", style("User Message:").bold());
                println!("{}", prepared.user_message());
            }

            if !prepared.document.success {
                eprintln!(
                    "{}",
                    style(format!("Note: {}", prepared.document.text())).yellow()
                );
            }
        }
        Commands::Tools => show_tools(),
        Commands::Config => show_config(&config_manager, cli.provider.as_deref()),
    }

    Ok(())
}

fn show_tools() {
    println!("{}", style("Available Tools:").bold());
    println!();

    for def in ToolRegistry::standard().list() {
        println!("  {:<26} {}", style(&def.name).cyan(), def.description);
    }
}

fn show_config(manager: &ConfigManager, provider_override: Option<&str>) {
    let config = manager.config();

    println!("{}", style("Configuration:").bold());
    println!();
    println!(
        "  Config file: {}",
        style(manager.config_path().display()).dim()
    );
    println!("  Providers: {}", config.list_providers().join(", "));

    match config.resolve_provider(provider_override, None) {
        Ok(provider) => {
            let key_status = if provider.get_api_key().is_some() {
                style("configured").green()
            } else {
                style("missing").red()
            };
            println!("  Provider: {}", style(&provider.provider_type).green());
            println!("  Model: {}", provider.model);
            if let Some(env) = &provider.api_key_env {
                println!("  API key ({}): {}", env, key_status);
            } else {
                println!("  API key: {}", key_status);
            }
        }
        Err(e) => println!("  {}", style(e).red()),
    }

    println!(
        "  Agent: max_iter={} allow_delegation={} verbose={} memory={}",
        config.agent.max_iter,
        config.agent.allow_delegation,
        config.agent.verbose,
        config.agent.memory
    );
}
