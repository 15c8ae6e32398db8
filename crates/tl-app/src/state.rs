use std::path::PathBuf;
use std::sync::Arc;

use rand::Rng;
use tl_core::catalog::{self, Example};
use tl_core::{GenerationRequest, Job, Preset, Tile, TileGrid, TileGridSpec, WallpaperImage};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::events::GenEvent;
use crate::export::Exporter;
use crate::generator::Generator;
use crate::generator::backend::PredictionBackend;

/// What the status line shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    /// Submitted, no usable progress yet.
    Starting,
    Generating { progress: f32 },
    Failed { detail: String },
}

impl Status {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Starting | Self::Generating { .. })
    }
}

struct InFlight {
    cancel: CancellationToken,
    handle: JoinHandle<Result<Job, AppError>>,
}

/// Everything a front end needs: the preview grid, the current wallpaper,
/// the job in flight and export.
pub struct Session {
    generator: Arc<Generator>,
    exporter: Exporter,
    grid: TileGrid,
    // Only handed to poll loops; the session itself never writes it.
    wallpaper_tx: Arc<watch::Sender<Option<WallpaperImage>>>,
    wallpaper_rx: watch::Receiver<Option<WallpaperImage>>,
    // Fresh per submission, so a cancelled job can't reach the session.
    events_rx: mpsc::Receiver<GenEvent>,
    prompt: String,
    status: Status,
    shutdown: CancellationToken,
    in_flight: Option<InFlight>,
}

impl Session {
    pub fn new(config: &ClientConfig, backend: Arc<dyn PredictionBackend>) -> Self {
        Self::with_rng(config, backend, &mut rand::rng())
    }

    /// Starts from a random catalog example, like a fresh page load.
    pub fn with_rng<R: Rng + ?Sized>(
        config: &ClientConfig,
        backend: Arc<dyn PredictionBackend>,
        rng: &mut R,
    ) -> Self {
        let example = catalog::random_example(rng);
        Self::with_example(config, backend, example)
    }

    pub fn with_example(
        config: &ClientConfig,
        backend: Arc<dyn PredictionBackend>,
        example: &Example,
    ) -> Self {
        let (viewport_w, viewport_h) = config.viewport;
        let mut grid = TileGrid::new(TileGridSpec::from_viewport(viewport_w, viewport_h));

        let initial = WallpaperImage::new(example.image);
        grid.show(initial.clone());
        let (wallpaper_tx, wallpaper_rx) = watch::channel(Some(initial));

        Self {
            generator: Arc::new(Generator::new(backend.clone(), config)),
            exporter: Exporter::new(backend, config.output_dir.clone()),
            grid,
            wallpaper_tx: Arc::new(wallpaper_tx),
            wallpaper_rx,
            events_rx: closed_events(),
            prompt: example.prompt.to_string(),
            status: Status::Idle,
            shutdown: CancellationToken::new(),
            in_flight: None,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile<'_>> + '_ {
        self.grid.tiles()
    }

    /// The image on screen; export reads exactly this value.
    pub fn wallpaper(&self) -> Option<WallpaperImage> {
        self.grid.wallpaper().cloned()
    }

    /// A random catalog prompt.
    pub fn inspire(&mut self) -> &str {
        self.prompt = catalog::random_example(&mut rand::rng()).prompt.to_string();
        &self.prompt
    }

    /// Starts a new generation in the background, abandoning any previous
    /// one. Must be called inside a tokio runtime.
    pub fn submit(&mut self, prompt: &str) -> Result<(), AppError> {
        let request = GenerationRequest::new(prompt)?;
        self.cancel();

        self.prompt = prompt.to_string();
        self.status = Status::Starting;

        let cancel = self.shutdown.child_token();
        let generator = self.generator.clone();
        let wallpaper = self.wallpaper_tx.clone();
        let (events, events_rx) = mpsc::channel(EVENT_BUFFER);
        self.events_rx = events_rx;
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            generator.generate(request, &wallpaper, &events, &token).await
        });

        info!(prompt, "generation started");
        self.in_flight = Some(InFlight { cancel, handle });
        Ok(())
    }

    /// Stops the in-flight poll loop, if any, and discards its pending
    /// events. [`Session::finish`] still waits for the loop to wind down.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = &self.in_flight {
            debug!("cancelling in-flight generation");
            in_flight.cancel.cancel();
        }
        self.events_rx = closed_events();
        if self.status.is_busy() {
            self.status = Status::Idle;
        }
    }

    /// Waits for the in-flight generation to end and returns its outcome.
    pub async fn finish(&mut self) -> Option<Result<Job, AppError>> {
        let in_flight = self.in_flight.take()?;
        Some(match in_flight.handle.await {
            Ok(res) => res,
            Err(e) => Err(AppError::Worker(e)),
        })
    }

    /// Next event from the poll loop, already applied to the session.
    pub async fn next_event(&mut self) -> Option<GenEvent> {
        let event = self.events_rx.recv().await?;
        self.handle_event(&event);
        Some(event)
    }

    pub fn handle_event(&mut self, event: &GenEvent) {
        match event {
            GenEvent::Submitted { .. } => self.status = Status::Starting,
            GenEvent::Progress { estimate, .. } => {
                self.status = match estimate {
                    Some(progress) if *progress > 0.0 => Status::Generating { progress: *progress },
                    _ => Status::Starting,
                };
            }
            GenEvent::Ready { .. } => {
                self.status = Status::Idle;
                if let Some(image) = self.wallpaper_rx.borrow_and_update().clone() {
                    self.grid.show(image);
                }
            }
            GenEvent::Failed { detail, .. } => {
                self.status = Status::Failed { detail: detail.clone() };
            }
        }
    }

    pub async fn export(&self, preset: Preset) -> Result<PathBuf, AppError> {
        let image = self.wallpaper().ok_or(AppError::NoWallpaper)?;
        self.exporter.export(&image, preset.target()).await
    }
}

const EVENT_BUFFER: usize = 64;

// A receiver whose sender is gone: `recv` yields `None` straight away.
fn closed_events() -> mpsc::Receiver<GenEvent> {
    let (_, rx) = mpsc::channel(1);
    rx
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
