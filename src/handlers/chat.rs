//! Chat API handler
//!
//! POST /api/chat: validates the inbound message history, obtains a model
//! handle and streams the completion back as server-sent events

use crate::handlers::AppState;
use crate::models::chat::{parse_chat_request, ChatStreamEvent};
use crate::providers::OpenRouterProvider;
use crate::utils::classify::classify_failure;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_chat_request_log_summary;
use axum::{
    body::Bytes,
    extract::State,
    response::sse::{Event, KeepAlive},
    response::{IntoResponse, Response, Sse},
};
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{debug, error, warn};

/// Handle a chat completion request
///
/// POST /api/chat
pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Response> {
    // A body that fails to decode is indistinguishable from a semantically
    // invalid one: both end in the rejected-request branch
    let payload: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        warn!("Request body is not valid JSON: {}", e);
        AppError::Validation("Request body must be valid JSON".to_string())
    })?;

    let request = parse_chat_request(&payload).ok_or_else(|| {
        warn!("Request validation failed: messages must be a non-empty array of valid chat messages");
        AppError::Validation(
            "messages must be a non-empty array of valid chat messages".to_string(),
        )
    })?;

    if let Ok(summary) = serde_json::to_string(&create_chat_request_log_summary(&request)) {
        debug!("Chat request: {}", summary);
    }

    // A missing credential is a server configuration fault, not a caller
    // authentication fault
    let provider = OpenRouterProvider::resolve(&state.settings.openrouter).map_err(|e| {
        error!("OpenRouter initialization error: {}", e);
        AppError::from(e)
    })?;

    let model = provider.model(None);
    debug!("Generating completion with model: {}", model.model());

    let stream = model.stream_text(&request.messages).await?;

    // Forward chunks as they arrive; the response is committed once the
    // first event is flushed, so later failures become stream events
    let (tx, rx) = tokio::sync::mpsc::channel::<Result<Event, axum::Error>>(64);

    tokio::spawn(async move {
        let mut stream = stream;

        while let Some(chunk_result) = stream.next().await {
            match chunk_result {
                Ok(text) => {
                    let event = ChatStreamEvent::TextDelta { text };
                    match serde_json::to_string(&event) {
                        Ok(json) => {
                            if tx.send(Ok(Event::default().data(json))).await.is_err() {
                                debug!("Client disconnected");
                                return;
                            }
                        }
                        Err(e) => {
                            error!("Event serialization failed: {}", e);
                            return;
                        }
                    }
                }
                Err(e) => {
                    error!("Streaming response error: {}", e);

                    let event = ChatStreamEvent::Error {
                        error: classify_failure(e.status(), &e.to_string()),
                    };
                    if let Ok(json) = serde_json::to_string(&event) {
                        let _ = tx.send(Ok(Event::default().event("error").data(json))).await;
                    }
                    return;
                }
            }
        }

        let _ = tx.send(Ok(Event::default().event("done").data("{}"))).await;
    });

    let sse = Sse::new(ReceiverStream::new(rx)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    );

    Ok(sse.into_response())
}
