//! template::mock
//!
//! Canned [`Parser`] for tests.

use std::sync::{Arc, Mutex};

use super::{Parser, TemplateError};

/// Returns fixed output (or a fixed error) and records the data it saw.
#[derive(Debug, Clone)]
pub struct MockParser {
    output: Result<String, String>,
    seen: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl MockParser {
    pub fn returning(output: &str) -> Self {
        Self {
            output: Ok(output.to_string()),
            seen: Arc::default(),
        }
    }

    /// Fail every render with a render error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            output: Err(message.to_string()),
            seen: Arc::default(),
        }
    }

    /// `(template id, data)` pairs rendered so far.
    pub fn seen(&self) -> Vec<(String, serde_json::Value)> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Parser for MockParser {
    fn parse(&self, id: &str, data: &serde_json::Value) -> Result<String, TemplateError> {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id.to_string(), data.clone()));
        self.output.clone().map_err(|message| TemplateError::Render {
            id: id.to_string(),
            message,
        })
    }
}
