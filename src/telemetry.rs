use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Compose the tracing subscriber: pretty output while debugging, JSON
/// otherwise. `RUST_LOG` overrides the default filter either way.
pub fn get_subscriber(debug: bool) -> Box<dyn Subscriber + Send + Sync> {
    let default_filter = if debug { "trace" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if debug {
        Box::new(
            Registry::default()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty()),
        )
    } else {
        Box::new(
            Registry::default()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json()),
        )
    }
}

pub fn init_subscriber(subscriber: Box<dyn Subscriber + Send + Sync>) {
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}
