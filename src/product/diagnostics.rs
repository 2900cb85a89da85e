use std::sync::Mutex;

/// Receives the human-readable confirmations produced by mutating operations.
pub trait Diagnostics: Send + Sync {
    fn report(&self, message: &str);
}

/// Writes confirmations to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, message: &str) {
        tracing::info!(target: "product::diagnostics", "{}", message);
    }
}

/// Keeps every confirmation in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, message: &str) {
        let mut messages = self
            .messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        messages.push(message.to_string());
    }
}
