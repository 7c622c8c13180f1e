use std::{backtrace::Backtrace, panic::PanicHookInfo};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber and routes panics through it.
///
/// `RUST_LOG` takes precedence over `default_filter` (the
/// `APP_LOGGING__RUST_LOG` setting).
pub fn init_tracing(default_filter: &str) {
    let filter = env_filter(default_filter);
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    std::panic::set_hook(Box::new(log_panic));
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn log_panic(info: &PanicHookInfo<'_>) {
    let payload = info.payload();
    let reason = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    let location = info
        .location()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown location".to_string());

    tracing::error!(
        panic = reason,
        %location,
        backtrace = %Backtrace::capture(),
        "thread panicked"
    );
}
