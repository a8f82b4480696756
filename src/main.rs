use std::error::Error;

use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file; a missing file is fine.
    let dotenv = dotenvy::dotenv();

    ai_llm_service::telemetry::init("info");

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => info!("no .env file, using process environment"),
        Err(e) => warn!(error = %e, "failed to read .env"),
    }

    api::start().await?;

    Ok(())
}
