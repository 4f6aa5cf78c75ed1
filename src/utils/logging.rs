use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};
use std::env;
use std::fs;
use std::sync::Mutex;

/// Environment variable naming an optional plain-text log file
pub const LOG_FILE_ENV: &str = "RIGID_SYNC_LOG_FILE";

const DEFAULT_FILTER: &str = "info,rigid_sync=debug";

/// Initialize logging: console output always, a file copy when
/// `RIGID_SYNC_LOG_FILE` is set. Calling this more than once is harmless.
pub fn init_logging() {
    let enable_backtrace = env::var("RUST_BACKTRACE").unwrap_or_else(|_| "0".to_string()) == "1";

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let log_path = env::var(LOG_FILE_ENV).ok();
    let file_layer = log_path.as_deref().and_then(|path| match fs::File::create(path) {
        Ok(file) => Some(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false) // No ANSI codes in file
                .boxed(),
        ),
        Err(e) => {
            eprintln!("Warning: Failed to create log file {}: {}", path, e);
            None
        }
    });

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
        )
        .with(file_layer);

    if subscriber.try_init().is_err() {
        // Already installed by an earlier call or by the embedding application
        return;
    }

    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!("Panic occurred: {}", panic_info);

        if let Some(location) = panic_info.location() {
            tracing::error!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }

        if enable_backtrace {
            tracing::error!("Backtrace:\n{:?}", std::backtrace::Backtrace::capture());
        }
    }));

    tracing::info!("Logging initialized");
    if let Some(path) = log_path {
        tracing::info!("File logging enabled: {}", path);
    }
    tracing::debug!("Backtrace enabled: {}", enable_backtrace);
}

/// Log the settings a simulation run starts with
pub fn log_simulation_info(settings: &crate::config::SimulationSettings) {
    tracing::info!("=== Simulation ===");
    tracing::info!("Gravity: {:?}", settings.world.gravity);
    tracing::info!("Timestep: {}s", settings.world.timestep);
    tracing::info!("Frames: {}", settings.frames);
    tracing::info!("Bodies: {}", settings.bodies.len());
    tracing::info!("==================");
}
