use crate::decode::decode_response;
use crate::error::FetchError;
use crate::record::Incident;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::Path;
use std::time::Duration;

/// Path of the incidents endpoint, relative to the API base URL.
pub const INCIDENTS_PATH: &str = "/api/crimes";

/// Where the feed gets its incidents from.
///
/// The feed calls [`fetch`](IncidentSource::fetch) exactly once. Sources
/// must be shareable across tasks because the call runs on the runtime's
/// worker pool.
pub trait IncidentSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Incident>, FetchError>>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// `GET {base_url}/api/crimes` over reqwest.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), INCIDENTS_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get(&self) -> Result<Vec<Incident>, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "requesting incidents");
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(
            status = status.as_u16(),
            bytes = body.len(),
            "incidents response received"
        );
        decode_response(status.as_u16(), &body)
    }
}

impl IncidentSource for HttpSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Incident>, FetchError>> {
        self.get().boxed()
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// A canned response, decoded exactly like a network one.
///
/// Backs the `--fixture` flag and the controller tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    origin: String,
    response: Canned,
}

#[derive(Debug, Clone)]
enum Canned {
    Body { status: u16, body: Vec<u8> },
    Failure(FetchError),
}

impl StaticSource {
    /// Serve `body` with `status`.
    pub fn from_body(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            origin: format!("static response (HTTP {status})"),
            response: Canned::Body {
                status,
                body: body.into(),
            },
        }
    }

    /// Serve the contents of a JSON file as a 200 response.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let body = std::fs::read(path)?;
        Ok(Self {
            origin: path.display().to_string(),
            response: Canned::Body { status: 200, body },
        })
    }

    /// Fail every fetch with `error` without decoding anything.
    pub fn failing(error: FetchError) -> Self {
        Self {
            origin: "failing source".to_string(),
            response: Canned::Failure(error),
        }
    }
}

impl IncidentSource for StaticSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Incident>, FetchError>> {
        let result = match &self.response {
            Canned::Body { status, body } => decode_response(*status, body),
            Canned::Failure(err) => Err(err.clone()),
        };
        futures::future::ready(result).boxed()
    }

    fn describe(&self) -> String {
        self.origin.clone()
    }
}
