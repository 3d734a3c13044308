use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::external::llm_provider::LlmProvider;
use crate::models::{Dataset, QueryRequest, QueryResponse};
use crate::services::chart_service;
use crate::services::prompt_service;
use crate::services::response_parser;
use crate::services::translation_service::FailOpenTranslator;

/// Answer one business question end to end.
///
/// Only the LLM call can fail the request; translation falls back to the
/// untranslated text and parsing always yields an answer.
#[instrument(
    name = "process_query",
    skip_all,
    fields(request_id = %Uuid::new_v4(), language = %request.language)
)]
pub async fn process_query(
    llm: &dyn LlmProvider,
    translator: &FailOpenTranslator,
    dataset: &Dataset,
    request: QueryRequest,
) -> Result<QueryResponse, AppError> {
    let QueryRequest { query, language } = request;

    // 1. Normalize the question to English
    let query_en = translator.to_english(&query, &language).await;

    // 2. Build the prompt and pick a chart from the English question
    let prompt = prompt_service::build_prompt(dataset, &query_en);
    let chart = chart_service::select_chart(&query_en, dataset);

    // 3. Single LLM call, errors are fatal for this request
    let raw = llm.complete(&prompt).await?;

    // 4. Best-effort extraction
    let parsed = response_parser::parse_llm_response(&raw);

    // 5. Localize answer and follow-up
    let (response, follow_up) = tokio::join!(
        translator.translate(&parsed.answer, &language),
        translator.translate(&parsed.follow_up, &language),
    );

    info!(
        "Query answered ({} chars, chart: {})",
        response.len(),
        chart.as_ref().map(|c| c.series_names().join(",")).unwrap_or_else(|| "none".to_string())
    );

    Ok(QueryResponse {
        response,
        chart,
        follow_up,
    })
}
