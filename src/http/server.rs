//! Connection dispatcher.
//!
//! # Responsibilities
//! - Accept connections until shutdown
//! - Spawn one detached task per connection
//! - Read once, parse the request line, look up the handler
//! - Write the response, close, then cue a sound
//!
//! # Design Decisions
//! - The route table is frozen in an `Arc` and read without locks
//! - Request-time failures only ever end their own connection
//! - Malformed request lines get no response at all
//! - No read or write deadlines; a stalled client holds only its own task
//! - A failed accept pauses the loop briefly instead of retrying at once

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::request::parse_request_line;
use crate::http::response::Response;
use crate::lifecycle::ShutdownSignal;
use crate::net::connection::ConnectionTracker;
use crate::net::listener::{Listener, ListenerError};
use crate::observability::metrics;
use crate::routing::RouteTable;
use crate::sound::{SoundCue, SoundSink};

/// Pause after a failed accept before trying again.
pub const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections and answers one request on each.
#[derive(Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    sounds: Arc<dyn SoundSink>,
    tracker: ConnectionTracker,
}

impl Dispatcher {
    /// Create a dispatcher over a fully registered route table.
    pub fn new(routes: RouteTable, sounds: Arc<dyn SoundSink>) -> Self {
        Self {
            routes: Arc::new(routes),
            sounds,
            tracker: ConnectionTracker::new(),
        }
    }

    /// Connection tracker shared by all connection tasks.
    pub fn tracker(&self) -> &ConnectionTracker {
        &self.tracker
    }

    /// Run the accept loop until `shutdown` fires.
    ///
    /// Connection tasks still in flight when shutdown fires are left to finish.
    pub async fn serve(self, listener: Listener, mut shutdown: ShutdownSignal) -> Result<(), ListenerError> {
        let addr = listener.local_addr().map_err(ListenerError::Accept)?;
        let read_buffer_bytes = listener.read_buffer_bytes();
        tracing::info!(address = %addr, routes = self.routes.len(), "Dispatcher starting");

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown requested, no longer accepting connections");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, _peer)) => {
                        let dispatcher = self.clone();
                        tokio::spawn(async move {
                            dispatcher.handle_connection(stream, read_buffer_bytes).await;
                        });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Accept failed");
                        accept_backoff(&mut shutdown).await;
                    }
                },
            }
        }

        tracing::info!("Dispatcher stopped");
        Ok(())
    }

    /// Answer a single request on `stream`, then close it.
    pub async fn handle_connection<S>(&self, mut stream: S, read_buffer_bytes: usize)
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let guard = self.tracker.track();
        let connection_id = guard.id();

        let mut buf = vec![0u8; read_buffer_bytes];
        let n = match stream.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(%connection_id, error = %e, "Failed to read request");
                return;
            }
        };

        let raw = String::from_utf8_lossy(&buf[..n]);
        tracing::debug!(%connection_id, bytes = n, "Request received");

        let Some(line) = parse_request_line(&raw) else {
            tracing::debug!(%connection_id, "Malformed request line, closing without response");
            return;
        };

        let (response, cue) = self.dispatch(line.method, line.path);
        tracing::info!(
            %connection_id,
            method = line.method,
            path = line.path,
            status = response.status.as_u16(),
            "Request handled"
        );
        metrics::record_request(line.method, response.status.as_u16());

        if let Err(e) = stream.write_all(&response.to_bytes()).await {
            tracing::warn!(%connection_id, error = %e, "Failed to write response");
        } else if let Err(e) = stream.shutdown().await {
            tracing::debug!(%connection_id, error = %e, "Failed to close connection");
        }

        self.sounds.play(cue);
    }

    /// Build the response and sound cue for a request line.
    pub fn dispatch(&self, method: &str, path: &str) -> (Response, SoundCue) {
        match self.routes.lookup(method, path) {
            Some(handler) => {
                let cue = match self.routes.sound_for(path) {
                    Some(asset) => SoundCue::Route(asset.to_string()),
                    None => SoundCue::MethodDefault(method.to_string()),
                };
                (Response::ok(handler()), cue)
            }
            None => (Response::not_found(), SoundCue::NotFound),
        }
    }
}

/// Sleep for [`ACCEPT_ERROR_BACKOFF`], returning early on shutdown.
///
/// Errors such as EMFILE persist until a descriptor frees up, and retrying
/// immediately would spin.
async fn accept_backoff(shutdown: &mut ShutdownSignal) {
    tokio::select! {
        _ = shutdown.recv() => {}
        _ = tokio::time::sleep(ACCEPT_ERROR_BACKOFF) => {}
    }
}
