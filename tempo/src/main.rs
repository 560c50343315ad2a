// tempo/src/main.rs

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tempo")]
#[command(about = "The Star-Schema Warehouse Loader for Streaming Play Events", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 🚀 Runs the full pipeline (drop → create → load → transform)
    Run {
        /// Project directory holding tempo.yaml
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🏗️ Resets the warehouse schema (drop all, then create all)
    CreateTables {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 📦 Bulk-loads the two staging tables from object storage
    Load {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🔄 Runs the five staging-to-target transforms
    Transform {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// ⚡ Executes a raw SQL query (Ad-hoc)
    Query {
        query: String,
        #[arg(long, default_value = "tempo_db.duckdb")]
        db_path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup Logging (Tracing)
    // RUST_LOG=debug tempo run ... to see per-statement details
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { project_dir } => commands::run::execute(project_dir).await?,
        Commands::CreateTables { project_dir } => {
            commands::create_tables::execute(project_dir).await?
        }
        Commands::Load { project_dir } => commands::load::execute(project_dir).await?,
        Commands::Transform { project_dir } => commands::transform::execute(project_dir).await?,
        Commands::Query { query, db_path } => commands::query::execute(query, db_path).await?,
    }

    Ok(())
}
