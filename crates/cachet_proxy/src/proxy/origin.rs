//! Outbound client towards the configured origin.

use bytes::{Bytes, BytesMut};
use cachet_config::OriginConfig;
use http::{HeaderMap, StatusCode};
use reqwest::redirect;
use tracing::{debug, instrument, warn};

use crate::error::OriginError;

/// A fully buffered, successful origin response.
#[derive(Debug)]
pub(crate) struct OriginResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
}

/// Shared outbound client. Cloning is cheap; the connection pool lives
/// inside `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct OriginClient {
    client: reqwest::Client,
    base_url: String,
    max_body: usize,
}

impl OriginClient {
    pub fn from_config(cfg: &OriginConfig) -> Result<Self, OriginError> {
        let redirects = if cfg.max_redirects() == 0 {
            redirect::Policy::none()
        } else {
            redirect::Policy::limited(cfg.max_redirects())
        };

        let client = reqwest::Client::builder()
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.timeout())
            .redirect(redirects)
            .build()
            .map_err(OriginError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: cfg.url().trim_end_matches('/').to_string(),
            max_body: usize::try_from(cfg.max_response_body_bytes()).unwrap_or(usize::MAX),
        })
    }

    /// Origin base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `req` and buffers the whole response.
    ///
    /// Only 2xx responses count as success. Anything else, including a 304
    /// to a conditional request or a redirect left unfollowed, becomes
    /// [`OriginError::Status`] so that it is never cached.
    #[instrument(skip(self, req), fields(origin_url = %req.url()))]
    pub(crate) async fn fetch(&self, req: reqwest::Request) -> Result<OriginResponse, OriginError> {
        let mut resp = self.client.execute(req).await?;
        let status = resp.status();

        if !status.is_success() {
            warn!(target: "cachet::proxy", %status, "Origin answered with a non-success status");
            return Err(OriginError::Status(status));
        }

        if self.max_body > 0 {
            if let Some(len) = resp.content_length() {
                if len > self.max_body as u64 {
                    return Err(OriginError::BodyTooLarge {
                        limit: self.max_body,
                    });
                }
            }
        }

        let headers = resp.headers().clone();
        let mut body = BytesMut::new();
        while let Some(chunk) = resp.chunk().await? {
            if self.max_body > 0 && body.len() + chunk.len() > self.max_body {
                return Err(OriginError::BodyTooLarge {
                    limit: self.max_body,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(
            target: "cachet::proxy",
            %status,
            body_len = body.len(),
            "Finished reading origin response"
        );

        Ok(OriginResponse {
            status,
            headers,
            body: body.freeze(),
        })
    }
}
