use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::SessionStore;
use crate::client_logger::ClientLogger;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::FileUpload;

/// Whether a request carries the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Attach `Authorization: Bearer <token>` when a token is present.
    Authenticated,
    /// Never attach a token; used by the public widget endpoints.
    Public,
}

/// Client for the Minca API.
#[derive(Clone)]
pub struct MincaClient {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
    session: Option<Arc<SessionStore>>,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl MincaClient {
    /// Create a new client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let timeout = config.timeout();
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .default_headers(default_headers())
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            session: None,
            logger: None,
        })
    }

    /// Attach the session whose token authenticated requests carry.
    pub fn with_session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Attach a logger that sees every request.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The attached session, if any.
    pub fn session(&self) -> Option<&Arc<SessionStore>> {
        self.session.as_ref()
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/<segments..>`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::url("base URL cannot carry a path", None))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        access: Access,
        segments: &[&str],
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self.execute(Method::GET, url, access, |req| req).await?;
        parse_json(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        access: Access,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self
            .execute(Method::POST, url, access, |req| req.json(body))
            .await?;
        parse_json(response).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        access: Access,
        segments: &[&str],
        form: Form,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self
            .execute(Method::POST, url, access, |req| req.multipart(form))
            .await?;
        parse_json(response).await
    }

    /// POST a multipart body, discarding the response body.
    pub(crate) async fn post_multipart_unit(
        &self,
        access: Access,
        segments: &[&str],
        form: Form,
    ) -> Result<()> {
        let url = self.endpoint(segments)?;
        self.execute(Method::POST, url, access, |req| req.multipart(form))
            .await?;
        Ok(())
    }

    /// POST with no body and query parameters.
    pub(crate) async fn post_query<T: DeserializeOwned>(
        &self,
        access: Access,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut().extend_pairs(query);
        let response = self.execute(Method::POST, url, access, |req| req).await?;
        parse_json(response).await
    }

    pub(crate) async fn delete(&self, access: Access, segments: &[&str]) -> Result<()> {
        let url = self.endpoint(segments)?;
        self.execute(Method::DELETE, url, access, |req| req).await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        access: Access,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response> {
        let path = url.path().to_string();
        let method_name = method.as_str().to_string();
        if let Some(logger) = &self.logger {
            logger.log_request(&method_name, &path);
        }

        let mut request = self.client.request(method, url);
        if access == Access::Authenticated {
            if let Some(token) = self.session.as_ref().and_then(|s| s.token()) {
                request = request.bearer_auth(token);
            }
        }
        let request = build(request);

        let started = Instant::now();
        let outcome = match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                if let Some(logger) = &self.logger {
                    logger.log_response(&method_name, &path, status, started.elapsed());
                }
                if response.status().is_success() {
                    tracing::debug!(method = %method_name, path = %path, status, "request completed");
                    Ok(response)
                } else {
                    Err(Self::process_error_response(response, &path).await)
                }
            }
            Err(e) => Err(self.transport_error(e)),
        };

        if let Err(err) = &outcome {
            tracing::warn!(method = %method_name, path = %path, error = %err, "request failed");
            if let Some(logger) = &self.logger {
                logger.log_failure(&method_name, &path, err);
            }
        }
        outcome
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response, path: &str) -> Error {
        let status_code = response.status().as_u16();
        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };
        Error::from_status(status_code, error_message(&error_body), path)
    }
}

impl fmt::Debug for MincaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MincaClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("session", &self.session)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

/// Create and return default headers for API requests.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Extracts the `message` field of a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(String::from)
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json::<T>().await.map_err(|e| {
        Error::serialization(
            format!("Failed to parse response: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Builds a multipart form of text fields followed by `files` parts.
pub(crate) fn multipart_form(fields: &[(&str, &str)], files: &[FileUpload]) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name.to_string(), value.to_string());
    }
    for file in files {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| {
                Error::validation(
                    format!("invalid MIME type {:?}: {}", file.mime, e),
                    Some(file.name.clone()),
                )
            })?;
        form = form.part("files", part);
    }
    Ok(form)
}
