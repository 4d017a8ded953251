use casebrief_llm::{ChatClient, ChatRequest, ChatResponse, LlmError};
use std::time::Duration;

/// Runs one completion request, abandoning it once `limit` elapses
pub(crate) async fn bounded_chat(
    client: &dyn ChatClient,
    request: ChatRequest,
    limit: Duration,
) -> Result<ChatResponse, LlmError> {
    match tokio::time::timeout(limit, client.chat(request)).await {
        Ok(result) => result,
        Err(_) => Err(LlmError::Timeout),
    }
}
