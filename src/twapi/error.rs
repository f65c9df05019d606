use miette::Diagnostic;
use thiserror::Error;

/// Everything that can go wrong between accepting an entity and handing back
/// its decoded response.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Caller input rejected before any HTTP traffic.
    #[error("invalid parameters: {0}")]
    #[diagnostic(code(twmcp::twapi::invalid_parameters))]
    InvalidParameters(String),

    /// The entity could not be turned into an outgoing request.
    #[error("failed to create request: {0}")]
    #[diagnostic(code(twmcp::twapi::create_request))]
    CreateRequest(String),

    /// Network, TLS or cancellation while the request was in flight.
    #[error("failed to execute request: {0}")]
    #[diagnostic(
        code(twmcp::twapi::execute_request),
        help("Is the configured Teamwork server reachable?")
    )]
    ExecuteRequest(#[from] reqwest::Error),

    /// The server answered outside the 2xx range. The body is passed through
    /// verbatim.
    #[error("unexpected status code: {}{}", .status, if .body.is_empty() { String::new() } else { format!(", body: {}", .body) })]
    #[diagnostic(code(twmcp::twapi::unexpected_status))]
    UnexpectedStatus { status: u16, body: String },

    /// The response body did not match the entity's wire shape.
    #[error("failed to decode {entity} response: {source}")]
    #[diagnostic(code(twmcp::twapi::decode))]
    Decode {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An ID callback was requested but the key could not be extracted from
    /// the response body.
    #[error("failed to extract {key:?} from response body")]
    #[diagnostic(code(twmcp::twapi::id_extraction))]
    IdExtraction { key: String },
}

impl Error {
    pub(crate) fn decode(entity: &'static str, source: serde_json::Error) -> Self {
        Error::Decode { entity, source }
    }
}
