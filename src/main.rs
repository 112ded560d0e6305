// ==========================================
// Nominal Compounds - CLI Entry Point
// ==========================================
// Reads the run configuration, connects to the graph database, and
// executes one full import run.
// ==========================================

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context};

use nominal_compounds::config::DEFAULT_CONFIG_FILE;
use nominal_compounds::{logging, Neo4jStore, Pipeline, RunConfig};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("Nominal Compounds - graph importer");
    tracing::info!("version: {}", nominal_compounds::VERSION);
    tracing::info!("==================================================");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("import run failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(&args)?;

    let store = Neo4jStore::connect(
        &config.db_uri,
        &config.db_user,
        &config.db_password,
        &config.db_name,
    )
    .await
    .with_context(|| format!("cannot connect to graph database at {}", config.db_uri))?;
    tracing::info!(uri = config.db_uri.as_str(), db = config.db_name.as_str(), "connected");

    let started = Instant::now();
    let summary = Pipeline::new(&store, &config).run().await?;

    let elapsed = started.elapsed().as_secs_f64();
    let report =
        serde_json::to_string_pretty(&summary).context("cannot render run summary")?;
    tracing::info!("run summary:\n{report}");
    tracing::info!(seconds = format!("{elapsed:.1}").as_str(), "import finished");
    Ok(())
}

/// Zero arguments read config.properties from the working directory;
/// exactly six positional arguments override it.
fn load_config(args: &[String]) -> anyhow::Result<RunConfig> {
    match args.len() {
        0 => RunConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))
            .with_context(|| format!("cannot load {DEFAULT_CONFIG_FILE}")),
        6 => Ok(RunConfig::from_args(args)),
        n => {
            usage();
            bail!("expected 0 or 6 arguments, got {n}");
        }
    }
}

fn usage() {
    eprintln!("usage: nominal-compounds");
    eprintln!("           (reads {DEFAULT_CONFIG_FILE} from the working directory)");
    eprintln!("   or: nominal-compounds <master-file> <input-dir> <db-uri> <db-user> <db-password> <db-name>");
}
