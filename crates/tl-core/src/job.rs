use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Starting,
    Processing,
    Succeeded,
    #[serde(alias = "canceled")]
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model output: either a bare URL or a list of URLs, depending on the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum JobOutput {
    Single(String),
    Many(Vec<String>),
}

impl JobOutput {
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(url) => Some(url.as_str()),
            Self::Many(urls) => urls.first().map(String::as_str),
        }
    }
}

/// Server-side view of a prediction. Only ever replaced wholesale by the
/// latest response; the client never edits one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<JobOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    pub fn new(id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            id: id.into(),
            status,
            logs: None,
            output: None,
            detail: None,
            error: None,
        }
    }

    pub fn with_logs(mut self, logs: impl Into<String>) -> Self {
        self.logs = Some(logs.into());
        self
    }

    pub fn with_output(mut self, url: impl Into<String>) -> Self {
        self.output = Some(JobOutput::Single(url.into()));
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The image produced by a succeeded job.
    pub fn wallpaper(&self) -> Option<WallpaperImage> {
        self.output
            .as_ref()
            .and_then(JobOutput::first)
            .map(WallpaperImage::new)
    }

    /// Human-readable failure reason, preferring the service's `detail`.
    pub fn failure_detail(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

/// URL of the image shown on every tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallpaperImage(String);

impl WallpaperImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WallpaperImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let status: JobStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(status, JobStatus::Processing);
        assert_eq!(serde_json::to_string(&JobStatus::Succeeded).unwrap(), "\"succeeded\"");

        let canceled: JobStatus = serde_json::from_str("\"canceled\"").unwrap();
        assert!(canceled.is_terminal());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!JobStatus::Starting.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_parses_minimal_job() {
        let job: Job = serde_json::from_str(r#"{"id":"abc","status":"starting"}"#).unwrap();
        assert_eq!(job, Job::new("abc", JobStatus::Starting));
        assert_eq!(job.wallpaper(), None);
    }

    #[test]
    fn test_wallpaper_from_list_output() {
        let job: Job = serde_json::from_str(
            r#"{"id":"abc","status":"succeeded",
                "output":["https://x/out-0.png","https://x/out-1.png"]}"#,
        )
        .unwrap();
        assert_eq!(job.wallpaper(), Some(WallpaperImage::new("https://x/out-0.png")));
    }

    #[test]
    fn test_wallpaper_from_string_output() {
        let job = Job::new("abc", JobStatus::Succeeded).with_output("https://x/out-0.png");
        assert_eq!(job.wallpaper().unwrap().as_str(), "https://x/out-0.png");
    }

    #[test]
    fn test_failure_detail_fallbacks() {
        let mut job = Job::new("abc", JobStatus::Failed);
        assert_eq!(job.failure_detail(), "unknown error");

        job.error = Some("CUDA out of memory".into());
        assert_eq!(job.failure_detail(), "CUDA out of memory");

        job.detail = Some("NSFW content detected".into());
        assert_eq!(job.failure_detail(), "NSFW content detected");
    }
}
