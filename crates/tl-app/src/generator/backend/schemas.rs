use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tl_core::{GenerationRequest, Job};

/// Body of `POST /predictions`. Sizes travel as strings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PredictionCreate<'a> {
    pub prompt: &'a str,
    pub width: String,
    pub height: String,
}

impl<'a> From<&'a GenerationRequest> for PredictionCreate<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            prompt: request.prompt(),
            width: request.width().to_string(),
            height: request.height().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Reads a job out of a response, or the failure detail when the status is
/// not the expected one.
pub fn read_job(status: StatusCode, expected: StatusCode, body: &str) -> Result<Job, String> {
    if status != expected {
        return Err(error_detail(body));
    }

    serde_json::from_str(body).map_err(|e| format!("malformed prediction response: {e}"))
}

fn error_detail(body: &str) -> String {
    if let Ok(ErrorBody { detail: Some(detail) }) = serde_json::from_str(body) {
        return detail;
    }

    let body = body.trim();
    if body.is_empty() {
        "unknown error".to_string()
    } else {
        body.to_string()
    }
}
