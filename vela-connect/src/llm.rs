use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vela_core::gateway::ReplyComposer;
use vela_shared::pii::Masked;

use crate::app_config::LlmConfig;

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("completion API error: {status}\n{body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Client for the chat-completion API that phrases customer replies.
///
/// One synchronous completion per request; only the first choice is
/// consumed. Failures never cross this boundary, the caller just gets no
/// reply.
pub struct CompletionClient {
    http: reqwest::Client,
    api_key: Masked<String>,
    base_url: String,
    model: String,
}

impl CompletionClient {
    pub fn new(http: reqwest::Client, config: LlmConfig) -> Self {
        Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
            model: config.model,
        }
    }

    fn build_messages(question: &str, order_details: &Value, requested_id: &str) -> Vec<ChatMessage> {
        let details_dump =
            serde_json::to_string_pretty(order_details).unwrap_or_else(|_| "null".to_string());

        vec![
            ChatMessage {
                role: "system",
                content: format!(
                    "You are a helpful customer service representative. \
                     The customer asked about order #{requested_id}. \
                     Respond naturally to their question using the order details provided. \
                     If the order number doesn't match what they asked about, make sure to mention this discrepancy. \
                     Keep the response concise but friendly."
                ),
            },
            ChatMessage {
                role: "user",
                content: format!(
                    "Customer Question: \"{question}\"\nRequested Order: #{requested_id}\nOrder Details: {details_dump}"
                ),
            },
        ]
    }

    async fn request_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose())
            .json(&ChatCompletionRequest {
                model: self.model.clone(),
                messages,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ReplyComposer for CompletionClient {
    async fn compose(
        &self,
        question: &str,
        order_details: &Value,
        requested_id: &str,
    ) -> Option<String> {
        let messages = Self::build_messages(question, order_details, requested_id);

        match self.request_completion(messages).await {
            Ok(completion) => {
                let reply = completion
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content);
                if reply.is_none() {
                    tracing::error!("completion response contained no choices");
                }
                reply
            }
            Err(err) => {
                tracing::error!(error = %err, "error generating natural response");
                None
            }
        }
    }
}
