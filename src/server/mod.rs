pub mod api;

use crate::agent::SalesAgent;
use crate::cli::Args;
use self::api::{ router, AppState };
use axum_server::Handle;
use log::{ error, info };
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub struct Server {
    addr: String,
    agent: SalesAgent,
    args: Args,
}

impl Server {
    pub fn new(addr: String, agent: SalesAgent, args: Args) -> Self {
        Self { addr, agent, args }
    }

    /// Serves until SIGINT/SIGTERM, drains in-flight requests, then closes the
    /// product store.
    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let app = router(AppState { agent: self.agent.clone() });

        let result = match tls_paths(&self.args)? {
            Some((cert_path, key_path)) => self.serve_tls(app, cert_path, key_path).await,
            None => self.serve_plain(app).await,
        };

        self.agent.shutdown().await;
        result
    }

    async fn serve_plain(&self, app: axum::Router) -> Result<(), Box<dyn Error + Send + Sync>> {
        let listener = tokio::net::TcpListener::bind(self.addr.as_str()).await.map_err(|e| {
            error!("Failed to bind HTTP server to {}: {}. Try a different port.", self.addr, e);
            e
        })?;
        info!("HTTP server listening on: http://{}", self.addr);

        axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
        Ok(())
    }

    async fn serve_tls(
        &self,
        app: axum::Router,
        cert_path: &str,
        key_path: &str
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        info!("TLS enabled. Loading certificate from '{}' and key from '{}'", cert_path, key_path);

        // Both ring (driver TLS) and aws-lc-rs (axum-server) are compiled in, so
        // rustls cannot pick a provider on its own.
        let _ = rustls::crypto::ring::default_provider().install_default();
        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
            cert_path,
            key_path
        ).await?;

        let handle = Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        info!("HTTPS server listening on: https://{}", addr);
        axum_server::bind_rustls(addr, tls_config).handle(handle).serve(app.into_make_service()).await?;
        Ok(())
    }
}

fn tls_paths(args: &Args) -> Result<Option<(&str, &str)>, Box<dyn Error + Send + Sync>> {
    if !args.enable_tls {
        info!("TLS not enabled. Running plain HTTP server.");
        return Ok(None);
    }
    match (&args.tls_cert_path, &args.tls_key_path) {
        (Some(cert_path), Some(key_path)) => Ok(Some((cert_path.as_str(), key_path.as_str()))),
        (Some(_), None) | (None, Some(_)) => {
            error!("Both --tls-cert-path and --tls-key-path must be provided to enable TLS.");
            Err("Missing TLS certificate or key path".into())
        }
        (None, None) => {
            error!("--enable-tls was set but no certificate/key paths provided.");
            Err("TLS enabled without cert/key".into())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
