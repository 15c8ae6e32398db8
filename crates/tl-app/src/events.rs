use chrono::{DateTime, Utc};
use tl_core::{Job, WallpaperImage};

#[derive(Debug, Clone)]
pub enum GenEvent {
    Submitted {
        job: Job,
    },
    Progress {
        job_id: String,
        estimate: Option<f32>,
    },
    /// Completion cue; the new wallpaper is already published.
    Ready {
        job_id: String,
        image: WallpaperImage,
        completed_at: DateTime<Utc>,
    },
    Failed {
        job_id: Option<String>,
        detail: String,
    },
}

impl GenEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready { .. } | Self::Failed { .. })
    }
}
