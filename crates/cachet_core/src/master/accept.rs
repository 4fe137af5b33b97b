use std::io;
use std::{sync::Arc, time::Duration};

use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, instrument, warn, Instrument};

use crate::structs::AppState;
use crate::worker::handle_connection;

/// Pause after an accept failure that is not tied to a single peer
/// (descriptor or memory exhaustion), so the loop does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub(crate) async fn bind_listener(listen_addr: &str) -> anyhow::Result<TcpListener> {
    info!(target: "cachet::master", listen = %listen_addr, "Binding listener");

    TcpListener::bind(listen_addr).await.map_err(|e| {
        error!(
            target: "cachet::master",
            listen = %listen_addr,
            error = ?e,
            "Failed to bind listener"
        );
        e.into()
    })
}

/// `None` for errors that only concern the connection being accepted;
/// otherwise how long to wait before accepting again.
fn accept_backoff(e: &io::Error) -> Option<Duration> {
    match e.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::Interrupted
        | io::ErrorKind::WouldBlock => None,
        _ => Some(ACCEPT_BACKOFF),
    }
}

/// Accepts connections forever, one task each, bounded by `semaphore`.
///
/// A permit is taken before `accept()` so that a saturated proxy leaves new
/// clients in the kernel backlog. Accept failures are logged and skipped;
/// only a closed semaphore ends the loop.
#[instrument(skip(listener, semaphore, state), fields(listen = %listen_addr))]
pub(crate) async fn accept_loop(
    listener: TcpListener,
    listen_addr: String,
    semaphore: Arc<Semaphore>,
    state: Arc<AppState>,
) -> anyhow::Result<()> {
    info!(target: "cachet::master", listen = %listen_addr, "Accepting connections");

    loop {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;

        let (stream, client_addr) = match listener.accept().await {
            Ok(pair) => pair,
            Err(e) => {
                let backoff = accept_backoff(&e);
                warn!(
                    target: "cachet::master",
                    error = %e,
                    backoff_ms = backoff.map(|d| d.as_millis() as u64),
                    "accept() failed; continuing"
                );
                drop(permit);
                if let Some(pause) = backoff {
                    tokio::time::sleep(pause).await;
                }
                continue;
            }
        };

        debug!(
            target: "cachet::master",
            %client_addr,
            available_permits = semaphore.available_permits(),
            "Connection accepted"
        );

        let state = Arc::clone(&state);
        let span = tracing::info_span!("connection", %client_addr);

        tokio::spawn(
            async move {
                let _permit = permit;
                match handle_connection(stream, client_addr, state).await {
                    Ok(()) => debug!(target: "cachet::worker", "Connection closed"),
                    Err(e) => error!(target: "cachet::worker", error = ?e, "Connection ended with an error"),
                }
            }
            .instrument(span),
        );
    }
}
