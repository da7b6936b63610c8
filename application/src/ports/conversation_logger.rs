//! Transcript port.
//!
//! A chat turn emits up to five records: `user_message`, `tool_call`,
//! `tool_result`, then either `assistant_response` or `fallback`. Where they
//! end up (a JSONL file, nowhere) is the adapter's business. Diagnostics go
//! through `tracing` instead.

use serde_json::Value;

/// One transcript record: a kind tag and its JSON body.
pub struct ConversationEvent {
    pub event_type: &'static str,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Sink for transcript records.
///
/// Called inline on the turn's task, so writes must not block for long.
/// Write failures are the sink's problem and never reach the turn.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every record.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
