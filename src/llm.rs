//! Text-in, text-out access to the hosted model for the pipeline stages.
//!
//! Stages never see a [`ProviderError`]: a failed call comes back as a
//! readable error string and flows downstream like any other reply.

use std::sync::Arc;

use crate::gateway::{Attribution, ChatGateway, ChatModel, ChatRequest, Message, ProviderError};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Prefix of the text returned in place of a reply when the call fails.
pub const ERROR_REPLY_PREFIX: &str = "Error connecting to LLM:";

#[derive(Clone)]
pub struct LanguageModel {
    gateway: Arc<dyn ChatGateway>,
    model: ChatModel,
}

impl LanguageModel {
    pub fn new(gateway: Arc<dyn ChatGateway>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: ChatModel::new(model),
        }
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// One system + user round trip; returns the first reply's text.
    pub async fn ask(&self, system: &str, user: &str, attribution: Attribution) -> String {
        let caller = attribution.caller;
        let req = ChatRequest::new(
            self.model.clone(),
            vec![Message::system(system), Message::user(user)],
            attribution,
        );

        match self.gateway.chat(req).await {
            Ok(resp) => resp.content,
            Err(err) => {
                tracing::warn!(
                    caller,
                    code = err.code(),
                    request_id = ?err.request_id(),
                    "model call failed: {err}"
                );
                error_reply(&err)
            }
        }
    }
}

fn error_reply(err: &ProviderError) -> String {
    format!("{ERROR_REPLY_PREFIX} {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{ChatResponse, FinishReason};
    use std::sync::Mutex;
    use std::time::Duration;

    struct Canned {
        reply: Result<&'static str, &'static str>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    #[async_trait::async_trait]
    impl ChatGateway for Canned {
        async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, ProviderError> {
            self.seen.lock().unwrap().push(req);
            match self.reply {
                Ok(text) => Ok(ChatResponse {
                    content: text.to_string(),
                    input_tokens: 1,
                    output_tokens: 1,
                    latency: Duration::ZERO,
                    finish_reason: FinishReason::Stop,
                }),
                Err(msg) => Err(ProviderError::provider("openai", msg)),
            }
        }
    }

    #[tokio::test]
    async fn ask_sends_system_then_user_and_returns_content() {
        let gateway = Arc::new(Canned {
            reply: Ok("0, 2"),
            seen: Mutex::new(Vec::new()),
        });
        let llm = LanguageModel::new(gateway.clone(), "gpt-4o-mini");

        let reply = llm.ask("sys", "user", Attribution::new("test")).await;
        assert_eq!(reply, "0, 2");

        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model.model_id(), "gpt-4o-mini");
        assert_eq!(seen[0].messages[0], Message::system("sys"));
        assert_eq!(seen[0].messages[1], Message::user("user"));
    }

    #[tokio::test]
    async fn ask_turns_provider_errors_into_text() {
        let llm = LanguageModel::new(
            Arc::new(Canned {
                reply: Err("upstream exploded"),
                seen: Mutex::new(Vec::new()),
            }),
            DEFAULT_MODEL,
        );

        let reply = llm.ask("sys", "user", Attribution::new("test")).await;
        assert!(reply.starts_with(ERROR_REPLY_PREFIX), "got {reply}");
        assert!(reply.contains("upstream exploded"));
    }
}
