use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tl_app::AppError;
use tl_app::generator::backend::PredictionBackend;
use tl_core::{GenerationRequest, Job};

/// In-memory prediction service that replays a fixed script.
pub struct MockService {
    created: Job,
    polls: Mutex<VecDeque<Job>>,
    image: Vec<u8>,
    pub prompts: Mutex<Vec<String>>,
    pub fetched: Mutex<Vec<String>>,
}

impl MockService {
    pub fn new(created: Job, polls: Vec<Job>, image: Vec<u8>) -> Self {
        Self {
            created,
            polls: Mutex::new(polls.into()),
            image,
            prompts: Mutex::new(Vec::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn remaining_polls(&self) -> usize {
        self.polls.lock().unwrap().len()
    }
}

#[async_trait]
impl PredictionBackend for MockService {
    async fn create(&self, request: &GenerationRequest) -> Result<Job, AppError> {
        self.prompts.lock().unwrap().push(request.prompt().to_string());
        Ok(self.created.clone())
    }

    async fn get(&self, id: &str) -> Result<Job, AppError> {
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::Poll {
                detail: format!("no scripted response for {id}"),
            })
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.fetched.lock().unwrap().push(url.to_string());
        Ok(self.image.clone())
    }
}
