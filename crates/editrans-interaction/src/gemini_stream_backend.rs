//! GeminiStreamBackend - streaming REST client for Gemini.
//!
//! Calls `{base_url}/{model}:streamGenerateContent?alt=sse` and turns the
//! server-sent event stream into text fragments, one per event.

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

use crate::sse::SseDecoder;
use editrans_core::TranslationFailure;
use editrans_core::config::ApiConfig;
use editrans_core::error::{EditransError, Result};
use editrans_core::translation::{FragmentStream, TranslationBackend, TranslationRequest};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Backend implementation that streams from the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiStreamBackend {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiStreamBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiStreamBackend")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiStreamBackend {
    /// Creates a backend for the given API key and endpoint settings.
    pub fn new(api_key: impl Into<String>, api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(api.connect_timeout_secs))
            .build()
            .map_err(|e| EditransError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: api.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{model}:streamGenerateContent?alt=sse", self.base_url)
    }
}

#[async_trait]
impl TranslationBackend for GeminiStreamBackend {
    async fn stream_translation(&self, request: TranslationRequest) -> Result<FragmentStream> {
        let url = self.endpoint(&request.profile.model);
        let body = GenerateContentRequest::from_request(&request);
        tracing::debug!(
            "Opening Gemini stream: model={}, instruction_chars={}, input_chars={}",
            request.profile.model,
            request.instruction.chars().count(),
            request.input.chars().count()
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                EditransError::translation(
                    TranslationFailure::Connection,
                    format!("Gemini API request failed: {err}"),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let body = response
            .bytes_stream()
            .map(|chunk| {
                chunk.map(|bytes| bytes.to_vec()).map_err(|err| {
                    EditransError::translation(
                        TranslationFailure::Connection,
                        format!("Gemini stream read failed: {err}"),
                    )
                })
            })
            .boxed();

        Ok(fragment_stream(body))
    }
}

struct StreamState {
    body: BoxStream<'static, Result<Vec<u8>>>,
    decoder: SseDecoder,
    pending: VecDeque<Result<String>>,
    finished: bool,
}

/// Decodes a raw SSE body into text fragments.
///
/// Events without text are skipped. Fragments decoded ahead of a failure are
/// delivered first; the first error then ends the stream.
pub fn fragment_stream(body: BoxStream<'static, Result<Vec<u8>>>) -> FragmentStream {
    let state = StreamState {
        body,
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(payload) = state.pending.pop_front() {
                match payload.and_then(|payload| parse_event(&payload)) {
                    Ok(Some(text)) => return Some((Ok(text), state)),
                    Ok(None) => continue,
                    Err(e) => return Some((Err(e), state.terminate())),
                }
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let payloads = state.decoder.push(&chunk);
                    state.pending.extend(payloads);
                }
                Some(Err(e)) => return Some((Err(e), state.terminate())),
                None => {
                    state.finished = true;
                    let payloads = state.decoder.finish();
                    state.pending.extend(payloads);
                }
            }
        }
    })
    .boxed()
}

impl StreamState {
    fn terminate(mut self) -> Self {
        self.pending.clear();
        self.finished = true;
        self
    }
}

/// Extracts the text carried by one streamed event.
fn parse_event(payload: &str) -> Result<Option<String>> {
    let response: GenerateContentResponse = serde_json::from_str(payload).map_err(|e| {
        EditransError::translation(
            TranslationFailure::MalformedResponse,
            format!("Failed to parse Gemini stream event: {e}"),
        )
    })?;

    if let Some(error) = response.error {
        return Err(EditransError::translation(
            TranslationFailure::Api,
            error.describe(payload),
        ));
    }

    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(EditransError::translation(
            TranslationFailure::Api,
            format!("Gemini blocked the prompt: {reason}"),
        ));
    }

    let text: String = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    Ok((!text.is_empty()).then_some(text))
}

fn map_http_error(status: StatusCode, body: &str) -> EditransError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| wrapper.error.describe(body))
        .unwrap_or_else(|_| body.to_string());

    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TranslationFailure::Authentication,
        _ => TranslationFailure::Api,
    };

    EditransError::translation(
        kind,
        format!("Gemini API returned {}: {message}", status.as_u16()),
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn from_request(request: &TranslationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: request.input.clone(),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: request.instruction.clone(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: request.profile.temperature,
                top_k: request.profile.top_k,
                top_p: request.profile.top_p,
            },
        }
    }
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

impl ErrorBody {
    /// `STATUS: message`, falling back to the raw body.
    fn describe(self, raw: &str) -> String {
        let status_text = self.status.unwrap_or_default();
        let msg = self.message.unwrap_or_else(|| raw.to_string());
        if status_text.is_empty() {
            msg
        } else {
            format!("{status_text}: {msg}")
        }
    }
}
