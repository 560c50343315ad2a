// tempo/src/commands/run.rs
//
// USE CASE: Run the full pipeline.

use std::path::PathBuf;

use tempo_core::application::run_pipeline;
use tempo_core::domain::schema::Dialect;

use crate::commands::bootstrap;

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let (config, warehouse) = bootstrap(&project_dir)?;

    let result = run_pipeline(&project_dir, &config, &warehouse, Dialect::DuckDb).await;

    match result {
        Ok(run_res) => {
            if run_res.success {
                println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
            } else {
                eprintln!("\n❌ FAILURE. {} errors.", run_res.errors.len());
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
