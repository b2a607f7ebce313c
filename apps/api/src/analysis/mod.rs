// CV analysis: uploaded PDF → extracted text → one LLM call → scraped JSON.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod response;

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{excerpt, DocumentExtractor};
use crate::llm_client::LanguageModel;

pub use response::{parse_ai_response, AiReply};

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub parsed: Value,
    pub excerpt: String,
}

/// Extracts text from the PDF at `path`, asks the model to structure it, and
/// returns whatever object could be recovered from the reply.
pub async fn analyze_document(
    extractor: &DocumentExtractor,
    llm: &dyn LanguageModel,
    path: &Path,
) -> Result<AnalyzeResponse, AppError> {
    let extraction = extractor.extract(path).await?;
    info!(
        "Extracted {} chars via {:?}",
        extraction.text.chars().count(),
        extraction.method
    );

    let prompt = prompts::build_analysis_prompt(&extraction.text);
    let reply = llm.generate(&prompt).await?;

    let parsed = parse_ai_response(&reply);
    if !parsed.is_parsed() {
        info!("LLM reply had no JSON object; returning it as summary");
    }

    Ok(AnalyzeResponse {
        parsed: parsed.into_json(),
        excerpt: excerpt(&extraction.text),
    })
}
