//! HTTP server for the fixture table.
//!
//! Every request is routed to a single fallback handler that asks the
//! [`Responder`] for a fixture and turns the outcome into an HTTP response.
//! Responses always carry `Connection: close`. Unmapped paths are reported
//! as `No mapping for <path>` lines on a [`DiagnosticSink`], stdout unless
//! another writer is supplied.

use std::future::Future;
use std::io::{self, Write};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use fixture_protocol::{FixtureTable, Responder, ResponderError, DEFAULT_PORT};
use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{debug, info, warn};

const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Operator console the handler writes diagnostic lines to
pub type DiagnosticSink = Arc<Mutex<dyn Write + Send>>;

fn stdout_sink() -> DiagnosticSink {
    Arc::new(Mutex::new(io::stdout()))
}

/// HTTP server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    #[error("Server error: {source}")]
    Serve { source: io::Error },
}

/// Configuration for the fixture HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on; port 0 picks an ephemeral port
    pub bind_addr: SocketAddr,
    /// Listen backlog handed to the socket
    pub backlog: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            backlog: 1024,
        }
    }
}

/// HTTP server answering GET requests from a fixture table.
pub struct HttpServer {
    config: ServerConfig,
    table: Arc<FixtureTable>,
    diagnostics: DiagnosticSink,
}

impl HttpServer {
    /// Creates a new [`HttpServer`] serving `table`.
    pub fn new(config: ServerConfig, table: Arc<FixtureTable>) -> Self {
        Self {
            config,
            table,
            diagnostics: stdout_sink(),
        }
    }

    /// Send diagnostic lines to `sink` instead of stdout.
    pub fn with_diagnostics(mut self, sink: DiagnosticSink) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Bind the listening socket with address reuse enabled.
    ///
    /// A restarted server can reclaim the port while connections from the
    /// previous instance sit in TIME_WAIT.
    pub fn bind(&self) -> Result<BoundServer, ServerError> {
        let addr = self.config.bind_addr;
        let listener = bind_reusable(addr, self.config.backlog)
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        info!("Fixture server bound to {}", local_addr);

        Ok(BoundServer {
            listener,
            local_addr,
            router: router_with_diagnostics(
                Responder::new(self.table.clone()),
                self.diagnostics.clone(),
            ),
        })
    }
}

/// A server whose socket is bound and listening.
pub struct BoundServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
}

impl BoundServer {
    /// The address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until the process is killed.
    pub async fn serve(self) -> Result<(), ServerError> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serve until `signal` resolves, then finish in-flight requests and return.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Serving fixtures on {}", self.local_addr);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|source| ServerError::Serve { source })?;

        info!("Fixture server on {} stopped", self.local_addr);
        Ok(())
    }
}

fn bind_reusable(addr: SocketAddr, backlog: u32) -> io::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(backlog)
}

#[derive(Clone)]
struct AppState {
    responder: Responder,
    diagnostics: DiagnosticSink,
}

impl AppState {
    fn report(&self, line: &str) {
        match self.diagnostics.lock() {
            Ok(mut out) => {
                if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
                    warn!("Failed to write diagnostic: {}", e);
                }
            }
            Err(_) => warn!("Diagnostic sink poisoned, dropped: {}", line),
        }
    }
}

/// Build the axum router for a responder, reporting to stdout.
pub fn router(responder: Responder) -> Router {
    router_with_diagnostics(responder, stdout_sink())
}

/// Build the axum router for a responder, reporting to `diagnostics`.
pub fn router_with_diagnostics(responder: Responder, diagnostics: DiagnosticSink) -> Router {
    Router::new().fallback(respond).with_state(AppState {
        responder,
        diagnostics,
    })
}

async fn respond(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    match state.responder.respond(method.as_str(), target) {
        Ok(entry) => {
            debug!(%method, path = %target, "200");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, entry.content_type()),
                    (header::CONNECTION, "close"),
                ],
                entry.body.clone(),
            )
                .into_response()
        }
        Err(err @ ResponderError::UnmappedPath { .. }) => {
            state.report(&err.to_string());
            warn!(%method, path = %target, "no fixture mapped");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err)
        }
        Err(err @ ResponderError::UnsupportedMethod { .. }) => {
            warn!(%method, path = %target, "unsupported method");
            error_response(StatusCode::NOT_IMPLEMENTED, &err)
        }
    }
}

fn error_response(status: StatusCode, err: &ResponderError) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, PLAIN_TEXT),
            (header::CONNECTION, "close"),
        ],
        err.to_string(),
    )
        .into_response()
}

/// Startup banner: the listening URL followed by the route table.
pub fn banner(table: &FixtureTable, addr: SocketAddr) -> String {
    let mut out = format!("Starting HTTP server on http://localhost:{}\n", addr.port());
    out.push_str(&route_table(table));
    out
}

/// The "Supported request queries" table, one line per entry.
///
/// Paths are padded to 10 columns and descriptions to 50.
pub fn route_table(table: &FixtureTable) -> String {
    let mut out = String::from("Supported request queries:\n");
    for entry in table.iter() {
        out.push_str(&format!("    {:<10}  {:<50}\n", entry.path, entry.description));
    }
    out
}
