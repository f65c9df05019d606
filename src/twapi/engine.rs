//! The request engine: one entity in, one authenticated HTTP round trip out.

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use tracing::{debug, warn};

use crate::config::Config;

use super::Error;

/// A value that knows how to describe exactly one Teamwork API request.
///
/// `build` is mandatory; the other two capabilities have no-op defaults so
/// that write-only entities (creates, deletes) implement nothing extra.
pub trait Entity: Send {
    /// Short name used in error context, e.g. `"milestone"`.
    fn name(&self) -> &'static str;

    /// Builds the outgoing request against the configured server base URL.
    /// Query parameters follow the omit rules: unset fields take no wire slot.
    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error>;

    /// Decodes a successful response body in place, stripping the API's
    /// envelope. Only invoked for GET requests.
    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let _ = body;
        Ok(())
    }

    /// Populates human-facing web links once the entity carries its ID.
    /// Invoked after a successful decode.
    fn link(&mut self, server: &str) {
        let _ = server;
    }
}

/// Composable request-lifecycle hooks, applied in declaration order after a
/// successful round trip.
pub enum RequestOption<'a> {
    /// After a successful non-GET, re-parse the response body and hand the
    /// server-assigned ID under `key` to `sink`. The key is accepted at the
    /// top level or immediately under a single wrapping object, as a JSON
    /// number or a JSON string.
    IdCallback {
        key: &'a str,
        sink: &'a mut (dyn FnMut(i64) + Send),
    },
}

impl<'a> RequestOption<'a> {
    pub fn id_callback(key: &'a str, sink: &'a mut (dyn FnMut(i64) + Send)) -> Self {
        RequestOption::IdCallback { key, sink }
    }
}

/// Stateless dispatcher for the Teamwork API.
///
/// The engine holds the installation URL, the API token and a shared
/// [`reqwest::Client`]; all three are read-only after construction, so one
/// engine serves any number of concurrent dispatches. Cancellation follows
/// the usual tokio rule: dropping the dispatch future aborts the in-flight
/// request.
#[derive(Debug, Clone)]
pub struct Engine {
    server: String,
    api_token: String,
    http: Client,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Swaps the HTTP client, e.g. for one with test-specific timeouts.
    pub fn with_client(config: Config, http: Client) -> Self {
        Self {
            server: config.server,
            api_token: config.api_token,
            http,
        }
    }

    /// Base URL of the configured installation, without a trailing slash.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Dispatches `entity` in exactly one HTTP round trip.
    ///
    /// GET responses are decoded into the entity and the entity's web links
    /// are populated; non-GET responses only feed the [`RequestOption`]
    /// hooks. Any non-2xx status is an [`Error::UnexpectedStatus`] carrying
    /// the verbatim body.
    pub async fn dispatch<E: Entity + ?Sized>(
        &self,
        entity: &mut E,
        options: &mut [RequestOption<'_>],
    ) -> Result<(), Error> {
        let request = entity
            .build(&self.http, &self.server)?
            .basic_auth(&self.api_token, Some(""))
            .header(ACCEPT, "application/json")
            .build()
            .map_err(|e| Error::CreateRequest(e.to_string()))?;

        let method = request.method().clone();
        debug!(%method, url = %request.url(), entity = entity.name(), "dispatching request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), entity = entity.name(), "request failed");
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        if method == Method::GET {
            entity.decode(&body)?;
            entity.link(&self.server);
        } else {
            for option in options.iter_mut() {
                match option {
                    RequestOption::IdCallback { key, sink } => {
                        let id = extract_id(&body, key)?;
                        sink(id);
                    }
                }
            }
        }

        Ok(())
    }
}

/// Finds `key` at the top level of the body, or immediately under a single
/// wrapping object, and coerces it to int64.
fn extract_id(body: &[u8], key: &str) -> Result<i64, Error> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| Error::IdExtraction {
            key: key.to_string(),
        })?;

    let object = value.as_object().ok_or_else(|| Error::IdExtraction {
        key: key.to_string(),
    })?;

    let field = object.get(key).or_else(|| {
        // One level of envelope is allowed: {"milestone": {"id": 42}}.
        object
            .values()
            .filter_map(|v| v.as_object())
            .find_map(|inner| inner.get(key))
    });

    field
        .and_then(coerce_i64)
        .ok_or_else(|| Error::IdExtraction {
            key: key.to_string(),
        })
}

fn coerce_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
