//! Inter-agent message log and the per-run context that carries it.
//!
//! Each stage reports its handoffs here. Entries are forwarded to the
//! [`RunObserver`] the moment they are appended, so a terminal surface can
//! stream them while the run is still in flight.

use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Participants
// =============================================================================

/// Sender or receiver of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agent {
    System,
    Search,
    Filter,
    Summary,
    Comparison,
    Presentation,
    /// The sender talking to itself (work in progress, no handoff).
    Internal,
}

impl Agent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agent::System => "System",
            Agent::Search => "Search Agent",
            Agent::Filter => "Filter Agent",
            Agent::Summary => "Summary Agent",
            Agent::Comparison => "Comparison Agent",
            Agent::Presentation => "Presentation Agent",
            Agent::Internal => "Internal",
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline step reporting progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Search,
    Filter,
    Summarize,
    Compare,
}

// =============================================================================
// Entries
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
    pub sender: String,
    pub receiver: String,
    pub message: String,
}

impl LogEntry {
    pub fn now(sender: Agent, receiver: Agent, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} → {}: {}",
            self.timestamp, self.sender, self.receiver, self.message
        )
    }
}

// =============================================================================
// Observer
// =============================================================================

/// Render hooks invoked synchronously from inside a run.
pub trait RunObserver: Send + Sync {
    /// Called once per appended log entry, in append order.
    fn on_log(&self, _entry: &LogEntry) {}

    /// Fractional progress within a stage; `None` clears the indicator.
    fn on_progress(&self, _stage: Stage, _fraction: Option<f32>) {}
}

/// Observer that renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

// =============================================================================
// Run context
// =============================================================================

/// State owned by exactly one run: its id, its log and its render hooks.
pub struct RunContext<'a> {
    run_id: Uuid,
    entries: Vec<LogEntry>,
    observer: &'a dyn RunObserver,
}

impl<'a> RunContext<'a> {
    pub fn new(observer: &'a dyn RunObserver) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            entries: Vec::new(),
            observer,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Append one entry and render it immediately.
    pub fn log(&mut self, sender: Agent, receiver: Agent, message: impl Into<String>) {
        let entry = LogEntry::now(sender, receiver, message);
        tracing::debug!(run_id = %self.run_id, "{entry}");
        self.observer.on_log(&entry);
        self.entries.push(entry);
    }

    pub fn progress(&self, stage: Stage, fraction: Option<f32>) {
        self.observer.on_progress(stage, fraction);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}
