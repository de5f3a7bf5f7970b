use std::panic;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};
use vitrine_base::config::ServerConfig;
use vitrine_web::Server;

static LOGGER_INIT: Once = Once::new();

pub fn logger_init() {
    LOGGER_INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);

        tracing::subscriber::set_global_default(subscriber).unwrap();
    });

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        tracing::error!("panic occurred: {panic_info}");
        original_hook(panic_info);
    }));
}

/// Loads the configuration and serves the site until the process is
/// terminated. Blocks the calling thread.
pub fn run() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    Server::new(&config).serve()?;
    Ok(())
}
