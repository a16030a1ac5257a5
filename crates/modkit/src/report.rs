//! Result accumulation for module invocations

use serde_json::{Map, Value, json};

/// Accumulates the observable outcome of one module invocation
///
/// Mirrors the payload contract of the host framework: a `changed` flag,
/// an ordered action log, and any module-specific return values. Built
/// incrementally during a run and discarded once the payload is emitted.
#[derive(Debug, Default)]
pub struct Report {
    changed: bool,
    actions: Vec<String>,
    extra: Map<String, Value>,
}

impl Report {
    /// Create an empty report (`changed = false`, no actions)
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mutation that was performed and mark the run as changed
    pub fn record_action(&mut self, message: impl Into<String>) {
        self.actions.push(message.into());
        self.changed = true;
    }

    /// Attach a structured return value to the payload
    pub fn set_extra(&mut self, key: &str, value: Value) {
        self.extra.insert(key.to_string(), value);
    }

    /// Whether any mutation was recorded
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Actions recorded so far, in order
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Merge everything into the invocation's output payload
    pub fn into_payload(self) -> Value {
        let mut payload = Map::new();
        payload.insert("changed".to_string(), json!(self.changed));
        payload.insert("actions".to_string(), json!(self.actions));
        payload.extend(self.extra);
        Value::Object(payload)
    }
}
