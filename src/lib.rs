#![forbid(unsafe_code)]

//! # paper-scout
//!
//! A four-stage research assistant: search arXiv for a topic, let a language
//! model keep the relevant hits, summarize each paper into methodology, key
//! result and limitation, and write one comparative synthesis.
//!
//! Stages run strictly in sequence and report their handoffs to a per-run log
//! that a terminal surface can stream as the run progresses.

pub mod config;
pub mod gateway;
pub mod llm;
pub mod paper;
pub mod pipeline;
pub mod present;
pub mod prompts;
pub mod run_log;
pub mod search;
pub mod stages;

pub use config::{ConfigError, Settings};
pub use gateway::{Attribution, ChatGateway, ProviderGateway, UsageSink};
pub use llm::LanguageModel;
pub use paper::{IndexEntry, PaperRecord, RunResult};
pub use pipeline::{Pipeline, PipelineError, Session, DEFAULT_TOPIC};
pub use run_log::{Agent, LogEntry, NoopObserver, RunContext, RunObserver, Stage};
pub use search::{ArxivClient, PaperIndex, SearchError, SearchQuery};
