//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the request pipeline around the supplied routes
//! - Bind the pipeline to a listener
//! - Stop accepting and drain in-flight requests on shutdown

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::lifecycle::shutdown;
use crate::pipeline::PipelineBuilder;

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a server mounting `routes` under the configured prefix.
    pub fn new(config: AppConfig, routes: Router) -> Self {
        let router = PipelineBuilder::new(&config).routes(routes).build();
        Self { router, config }
    }

    /// Run the server until `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.config.environment,
            prefix = %self.config.api.prefix,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
