//! Center Stage virtual camera binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use centerstage_cam::{AppConfig, AppResult, StreamReport};

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {e:#}");
        std::process::exit(2);
    }

    info!("Starting centerstage");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(e.exit_code());
        }
    };
    info!("Virtual camera config: {:?}", config);

    // Devices are released when `run` returns
    match run(&config) {
        Ok(report) => {
            info!(
                reason = %report.reason,
                frames_read = report.stats.frames_read,
                frames_sent = report.stats.frames_sent,
                degenerate_frames = report.stats.degenerate_frames,
                "Virtual camera shutdown complete"
            );
            if report.reason.is_failure() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to start stream: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Colored output for dev, JSON for production.
fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("centerstage=info".parse()?)
        .add_directive("centerstage_cam=info".parse()?)
        .add_directive("centerstage_media=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .try_init()?;
    }
    Ok(())
}

#[cfg(feature = "opencv")]
fn run(config: &AppConfig) -> AppResult<StreamReport> {
    use centerstage_cam::StreamDriver;
    use centerstage_media::{
        HaarCascadeDetector, HighGuiPreview, NoPreview, OpenCvCamera, Preview, VirtualCamera,
    };

    let camera = OpenCvCamera::open(config.camera_index)?;
    let detector = HaarCascadeDetector::new(&config.face_cascade, &config.eye_cascade)?;

    let driver = StreamDriver::start(camera, detector, config, || {
        VirtualCamera::open(&config.virtual_device, config.framing.output, config.fps)
    })?;

    let preview: Box<dyn Preview> = if config.preview {
        Box::new(HighGuiPreview::open(&config.window_name, config.quit_key)?)
    } else {
        Box::new(NoPreview)
    };

    let mut driver = driver.with_preview(preview);
    Ok(driver.run())
}

#[cfg(not(feature = "opencv"))]
fn run(_config: &AppConfig) -> AppResult<StreamReport> {
    use centerstage_cam::AppError;

    Err(AppError::config(
        "no capture backend compiled in; rebuild with `--features opencv`",
    ))
}
