//! Per-connection HTTP/1.1 service.
//!
//! hyper owns the framing and keep-alive; every request is routed to the
//! control endpoint or through the caching pipeline.

use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use anyhow::Context;
use bytes::Bytes;
use cachet_http::responses::{bad_request, method_not_allowed, payload_too_large};
use http::{Request, Response};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

use crate::control;
use crate::structs::AppState;

mod body;
pub mod routing;

use body::{collect_limited, BodyError};
use routing::{route, Route, ALLOWED_METHODS};

/// Serves one client connection until it closes.
#[instrument(skip(stream, state), fields(client_addr = %client_addr))]
pub async fn handle_connection(
    stream: TcpStream,
    client_addr: SocketAddr,
    state: Arc<AppState>,
) -> anyhow::Result<()> {
    let io = TokioIo::new(stream);
    let service = service_fn(move |req: Request<Incoming>| {
        let state = Arc::clone(&state);
        async move { Ok::<_, Infallible>(handle_request(req, client_addr, &state).await) }
    });

    http1::Builder::new()
        .keep_alive(true)
        .serve_connection(io, service)
        .await
        .context("HTTP/1 connection error")?;

    Ok(())
}

async fn handle_request(
    req: Request<Incoming>,
    client_addr: SocketAddr,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let resp = match route(&method, uri.path()) {
        Route::ClearCache => control::clear_cache(state.proxy.store()),
        Route::MethodNotAllowed => method_not_allowed(ALLOWED_METHODS),
        Route::Forward => {
            let (parts, body) = req.into_parts();
            match collect_limited(body, state.max_request_body_bytes).await {
                Ok(bytes) => state.proxy.handle(Request::from_parts(parts, bytes)).await,
                Err(BodyError::TooLarge) => {
                    warn!(
                        target: "cachet::worker",
                        %client_addr,
                        limit = state.max_request_body_bytes,
                        "Request body too large"
                    );
                    payload_too_large()
                }
                Err(BodyError::Read(e)) => {
                    warn!(target: "cachet::worker", %client_addr, error = %e, "Failed to read request body");
                    bad_request()
                }
            }
        }
    };

    info!(
        target: "cachet::worker",
        %client_addr,
        %method,
        %uri,
        status = resp.status().as_u16(),
        "Request served"
    );

    resp.map(Full::new)
}
