use std::path::PathBuf;

use resume_analysis::domain::KeywordSchema;
use resume_analysis::infrastructure::{build_pipeline, Config};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analyzer=debug,resume_analysis=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::load()?;
    let folder: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_folder.clone());
    let schema = match std::env::var("KEYWORD_SCHEMA") {
        Ok(text) => KeywordSchema::from_json(&text)?,
        Err(_) => KeywordSchema::resume_default(),
    };

    info!(folder = %folder.display(), "Starting resume analysis");
    let pipeline = build_pipeline(&config);

    match pipeline.run(&folder, &schema).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            error!(stage = e.stage().as_str(), error = %e, "Pipeline run failed");
            Err(e.into())
        }
    }
}
