//! Provider gateway for hosted chat completions.

pub mod error;
pub mod openai;
pub mod types;
pub mod usage;

use std::sync::Arc;

use openai::{ChatProvider, OpenAiAdapter};
use usage::ProviderCallRecord;

pub use error::{ErrorContext, ProviderError};
pub use types::*;
pub use usage::{NoopUsageSink, TracingUsageSink, UsageSink};

#[async_trait::async_trait]
pub trait ChatGateway: Send + Sync {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, ProviderError>;
}

/// One request per call, no retry. Every outcome is reported to the usage sink.
pub struct ProviderGateway<U: UsageSink> {
    provider: OpenAiAdapter,
    usage_sink: Arc<U>,
}

#[async_trait::async_trait]
impl<U: UsageSink> ChatGateway for ProviderGateway<U> {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, ProviderError> {
        ProviderGateway::chat(self, req).await
    }
}

impl<U: UsageSink> ProviderGateway<U> {
    pub fn new(provider: OpenAiAdapter, usage_sink: Arc<U>) -> Self {
        Self {
            provider,
            usage_sink,
        }
    }

    pub async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let result = self.provider.chat(&req).await;

        let record = ProviderCallRecord::new(
            "openai",
            "chat/completions",
            req.model.model_id(),
            req.attribution.caller,
        )
        .run(req.attribution.run_id);

        let record = match &result {
            Ok(resp) => record
                .tokens(resp.input_tokens, resp.output_tokens)
                .latency(resp.latency.as_millis() as u64),
            Err(err) => record.error(err.code()),
        };

        self.usage_sink.record(record).await;
        result
    }
}
