use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The uniform `{ data, error }` shape returned for every resume generation.
///
/// Success carries `data` with `error` null; failure carries `error` with `data` null.
/// Both keys are always serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeResult {
    pub data: Option<Map<String, Value>>,
    pub error: Option<String>,
}

impl ResumeResult {
    pub fn success(data: Map<String, Value>) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }
}
