mod app;
mod config;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::external::google_translate::GoogleTranslateProvider;
use crate::external::openai_compatible::OpenAiCompatibleProvider;
use crate::logging::{init_logging, install_panic_hook, LoggingConfig};
use crate::services::dataset_service;
use crate::services::translation_service::FailOpenTranslator;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;
    install_panic_hook();

    let config = AppConfig::from_env()?;

    // Loaded once; shared read-only by every request
    let dataset = dataset_service::load_from_source(&config.data_source)?;
    tracing::info!("📈 Analytics dataset ready: {} rows", dataset.len());

    tracing::info!("🤖 LLM endpoint: {} (model: {})", config.llm.base_url, config.llm.model);
    let llm = OpenAiCompatibleProvider::new(&config.llm);
    let translator = FailOpenTranslator::new(Arc::new(GoogleTranslateProvider::new(
        &config.translate_base_url,
    )));

    let state = AppState {
        dataset: Arc::new(dataset),
        llm: Arc::new(llm),
        translator: Arc::new(translator),
    };
    let app = app::create_app(state, config.cors_origin_header()?);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 BI agent backend running at http://{}/ (CORS origin: {})", addr, config.cors_origin);
    axum::serve(listener, app)
        .await?;

    Ok(())
}
