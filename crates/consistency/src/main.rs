use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use shotline_consistency::{ConsistencyEngine, ConsistencyReport, EngineConfig};
use shotline_core::reference::ReferenceImage;
use shotline_db::store::PgReferenceStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Print the consistency report for one shot.
#[derive(Debug, Parser)]
#[command(name = "shotline-consistency", version, about)]
struct Args {
    /// Shot to check.
    #[arg(long)]
    shot: String,

    /// Include the references the shot would gain by inheriting its bible.
    #[arg(long)]
    materialize: bool,

    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[derive(Serialize)]
struct Output {
    #[serde(flatten)]
    report: ConsistencyReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    materialized_references: Option<Vec<ReferenceImage>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shotline_consistency=info,shotline_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // --- Configuration ---
    let config = EngineConfig::from_env().context("Invalid consistency configuration")?;
    tracing::info!(
        scoring = ?config.scoring,
        entity_fallback = ?config.entity_fallback,
        store_timeout_ms = config.store_timeout.as_millis() as u64,
        "Loaded engine configuration",
    );

    // --- Database ---
    let pool = shotline_db::create_pool(&args.database_url)
        .await
        .context("Failed to connect to database")?;
    shotline_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database connection pool created");

    // --- Engine ---
    let store = Arc::new(PgReferenceStore::new(pool));
    let engine = ConsistencyEngine::with_config(store, &config);

    let report = engine.recompute(&args.shot).await;
    let materialized_references = args
        .materialize
        .then(|| engine.materialize_inherited_references(&report.inherited.from_master));

    tracing::info!(
        shot_id = %report.shot_id,
        issues = report.issues.len(),
        overall_score = report.score.overall_score,
        "Consistency check complete",
    );

    let output = Output {
        report,
        materialized_references,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
