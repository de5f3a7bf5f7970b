//! A simple HTTP server.
use crate::ServerResult;
use crate::route::{SiteState, build_route};
use crate::template::TemplateStore;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::runtime;
use tracing::info;
use vitrine_base::config::ServerConfig;

/// Holds everything needed to serve a site: the listening address and the
/// resolved content directories.
///
/// Use [Server::serve] to start the server.
pub struct Server {
    state: Arc<SiteState>,
    port: u16,
    host: String,
}

impl Server {
    /// Creates a server from a loaded configuration, resolving the static
    /// root and template directory against the working directory.
    pub fn new(config: &ServerConfig) -> Self {
        let state = SiteState {
            static_root: config.static_root(),
            templates: TemplateStore::new(config.template_dir()),
            index_template: config.templates.index.clone(),
            not_found_template: config.templates.not_found.clone(),
        };
        Server {
            state: Arc::new(state),
            port: config.port,
            host: config.host.clone(),
        }
    }

    /// Binds the listening socket and serves requests until the process
    /// terminates. This blocks the current thread.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The runtime cannot be built.
    /// - Binding to the specified address fails.
    /// - There is an error in serving the application.
    pub fn serve(&self) -> ServerResult<()> {
        let runtime = runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(async move {
            let addr = format!("{}:{}", self.host, self.port);
            let app = self.router();
            let listener = TcpListener::bind(&addr).await?;
            info!("listening on http://{}", addr);
            axum::serve(listener, app).await?;
            Ok(())
        })
    }

    /// Builds the axum router. Exposed so the server can be mounted on an
    /// externally managed listener, as the integration tests do.
    pub fn router(&self) -> Router {
        build_route(Arc::clone(&self.state))
    }
}
