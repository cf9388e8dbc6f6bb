use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing to stderr.
///
/// Silent by default so launcher diagnostics never mix into application
/// output. `JLAUNCH_DEBUG=1` turns on full launcher debug traces (home
/// resolution, library probing, the final option vector); otherwise
/// `RUST_LOG` is respected as usual.
pub fn init_tracing() {
    let filter = if std::env::var("JLAUNCH_DEBUG").is_ok_and(|v| v != "0") {
        EnvFilter::new("jlaunch=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("error"))
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}
