use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use tl_app::config::{ClientConfig, parse_viewport};
use tl_app::events::GenEvent;
use tl_app::export::Exporter;
use tl_app::generator::backend::HttpBackend;
use tl_app::state::Session;
use tl_core::{Preset, WallpaperImage, catalog};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tiler", about = "Generate seamless textures and tile them into wallpapers")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a new texture from a prompt and preview it as a tile grid
    Generate {
        prompt: String,

        /// Also export the result: desktop, phone or tile
        #[arg(long)]
        preset: Option<Preset>,

        /// Directory the export is written to
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Viewport used to lay out the preview grid
        #[arg(long, value_name = "WxH", value_parser = parse_viewport)]
        viewport: Option<(u32, u32)>,
    },

    /// Stitch an existing tile image into a wallpaper
    Export {
        image: String,

        #[arg(long, default_value = "desktop")]
        preset: Preset,

        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Print a random example prompt
    Inspire,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("tiler={level}").parse()?)
        .add_directive(format!("tl_app={level}").parse()?)
        .add_directive("reqwest=warn".parse()?);
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut config = ClientConfig::load().context("loading configuration")?;

    match cli.command {
        Command::Generate { prompt, preset, out, viewport } => {
            if let Some(dir) = out {
                config.output_dir = dir;
            }
            if let Some(viewport) = viewport {
                config.viewport = viewport;
            }
            generate(&config, &prompt, preset).await
        }
        Command::Export { image, preset, out } => {
            if let Some(dir) = out {
                config.output_dir = dir;
            }
            let backend = Arc::new(HttpBackend::new(&config)?);
            let exporter = Exporter::new(backend, config.output_dir.clone());
            let path = exporter
                .export(&WallpaperImage::new(image), preset.target())
                .await
                .context("exporting wallpaper")?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Inspire => {
            println!("{}", catalog::random_example(&mut rand::rng()).prompt);
            Ok(())
        }
    }
}

async fn generate(config: &ClientConfig, prompt: &str, preset: Option<Preset>) -> Result<()> {
    let backend = Arc::new(HttpBackend::new(config)?);
    let mut session = Session::new(config, backend);
    session.submit(prompt)?;

    loop {
        let mut interrupted = false;
        let event = tokio::select! {
            event = session.next_event() => event,
            _ = tokio::signal::ctrl_c() => {
                interrupted = true;
                None
            }
        };

        if interrupted {
            warn!("interrupted, cancelling generation");
            session.cancel();
            let _ = session.finish().await;
            bail!("generation interrupted");
        }

        match event {
            Some(GenEvent::Submitted { job }) => info!(job_id = %job.id, "waiting for prediction"),
            Some(GenEvent::Progress { estimate: Some(progress), .. }) if progress > 0.0 => {
                info!(progress, "generating");
            }
            Some(GenEvent::Progress { .. }) => info!("starting up"),
            Some(GenEvent::Ready { image, completed_at, .. }) => {
                info!(%image, %completed_at, "wallpaper ready");
                break;
            }
            Some(GenEvent::Failed { detail, .. }) => bail!("generation failed: {detail}"),
            None => break,
        }
    }

    session.finish().await.transpose().context("generation")?;

    let spec = session.grid().spec();
    if let Some(image) = session.wallpaper() {
        println!(
            "{} x {} tiles ({} total) showing {image}",
            spec.columns,
            spec.rows,
            spec.tile_count()
        );
    }

    if let Some(preset) = preset {
        let path = session.export(preset).await.context("exporting wallpaper")?;
        println!("{}", path.display());
    }

    Ok(())
}
