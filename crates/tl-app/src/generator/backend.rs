pub mod schemas;

use async_trait::async_trait;
use reqwest::StatusCode;
use tl_core::{GenerationRequest, Job};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::generator::backend::schemas::{PredictionCreate, read_job};

/// The remote inference service.
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    /// `POST /predictions`. Anything but 201 is a [`AppError::Submission`].
    async fn create(&self, request: &GenerationRequest) -> Result<Job, AppError>;

    /// `GET /predictions/{id}`. Anything but 200 is a [`AppError::Poll`].
    async fn get(&self, id: &str) -> Result<Job, AppError>;

    /// Raw bytes of a generated image.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, AppError>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    api_base: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("tiler/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn predictions_url(&self) -> String {
        format!("{}/predictions", self.api_base)
    }
}

#[async_trait]
impl PredictionBackend for HttpBackend {
    async fn create(&self, request: &GenerationRequest) -> Result<Job, AppError> {
        let response = self
            .client
            .post(self.predictions_url())
            .json(&PredictionCreate::from(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "prediction create response");

        read_job(status, StatusCode::CREATED, &body)
            .map_err(|detail| AppError::Submission { detail })
    }

    async fn get(&self, id: &str) -> Result<Job, AppError> {
        let url = format!("{}/{}", self.predictions_url(), id);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(job_id = id, %status, "prediction status response");

        read_job(status, StatusCode::OK, &body).map_err(|detail| AppError::Poll { detail })
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.download(url).await.map_err(|source| AppError::ImageFetch {
            url: url.to_string(),
            source,
        })
    }
}

impl HttpBackend {
    async fn download(&self, url: &str) -> reqwest::Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_image_is_a_load_failure() {
        let backend = HttpBackend::new(&ClientConfig::default()).unwrap();
        let err = backend.fetch_image("http://127.0.0.1:1/out.png").await.unwrap_err();

        assert!(matches!(&err, AppError::ImageFetch { url, .. } if url.ends_with("/out.png")));
        assert!(!err.is_transport());
        assert!(err.detail().starts_with("could not load wallpaper image"));
    }
}
