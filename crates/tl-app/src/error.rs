use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The service refused to create a prediction.
    #[error("submission failed: {detail}")]
    Submission { detail: String },

    /// A status query failed, or the prediction itself failed.
    #[error("prediction failed: {detail}")]
    Poll { detail: String },

    #[error("could not decode wallpaper image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("could not encode export: {0}")]
    Encode(#[source] image::ImageError),

    /// A generated image could not be downloaded for stitching.
    #[error("could not load wallpaper image {url}: {source}")]
    ImageFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No HTTP response was obtained at all.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Request(#[from] tl_core::Error),

    #[error("image worker stopped: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("no wallpaper is displayed")]
    NoWallpaper,

    #[error("operation cancelled")]
    Cancelled,
}

impl AppError {
    /// Failures where the service never answered. These are the only ones
    /// eligible for a retry.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Text for the user-visible status line.
    pub fn detail(&self) -> String {
        match self {
            Self::Submission { detail } | Self::Poll { detail } => detail.clone(),
            other => other.to_string(),
        }
    }
}
