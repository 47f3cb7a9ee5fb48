//! Result-bearing launches relayed from row bindings to the hosting screen.
//!
//! Rows often start another screen (a picker, a detail editor) and want the
//! answer back. The adapter forwards the request to an [`ActivityLauncher`]
//! supplied by the screen, and the screen hands the result back through
//! [`CommonAdapter::on_activity_result`](crate::CommonAdapter::on_activity_result).

use std::collections::BTreeMap;

/// A request to start another screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intent {
    action: String,
    data: Option<String>,
    extras: BTreeMap<String, String>,
}

impl Intent {
    /// A request for `action` with no data or extras.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Default::default()
        }
    }

    /// Set the address the action operates on.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Add a string extra.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// The requested action.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The address the action operates on.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// The extra stored under `key`.
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }

    /// All extras, sorted by key.
    pub fn extras(&self) -> &BTreeMap<String, String> {
        &self.extras
    }
}

/// Implemented by screens that can start another screen for a result.
pub trait ActivityLauncher: Send + Sync {
    fn start_activity_for_result(&self, intent: Intent, request_code: i32);
}
