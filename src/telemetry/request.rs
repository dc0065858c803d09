use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Body, Method, Request, Url};
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::Config;
use crate::extension::InvocationEvent;
use crate::telemetry::compression::{DEFAULT_COMPRESSION_LEVEL, compress_with_level};
use crate::telemetry::context::InvocationContext;
use crate::telemetry::envelope::build_log_record;
use crate::telemetry::errors::RequestError;
use crate::telemetry::identity::{IdentifierSource, SystemIdentifierSource};
use crate::telemetry::serializer::serialize;

pub const LICENSE_KEY_HEADER: &str = "x-license-key";

/// Builds ingestion requests for single payloads.
///
/// Holds the transport inputs that do not change between invocations. Each
/// call to [`RequestBuilder::build`] is independent, so one builder can be
/// shared across tasks.
#[derive(Clone)]
pub struct RequestBuilder {
    url: String,
    license_key: String,
    user_agent: String,
    compression_level: u32,
    ids: Arc<dyn IdentifierSource>,
}

impl RequestBuilder {
    #[must_use]
    pub fn new(url: String, license_key: String, user_agent: String) -> Self {
        RequestBuilder {
            url,
            license_key,
            user_agent,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            ids: Arc::new(SystemIdentifierSource),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        RequestBuilder::new(
            config.telemetry_endpoint_url(),
            config.license_key.clone(),
            config.user_agent(),
        )
        .with_compression_level(config.compression_level)
    }

    #[must_use]
    pub fn with_identifier_source(mut self, ids: Arc<dyn IdentifierSource>) -> Self {
        self.ids = ids;
        self
    }

    #[must_use]
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Envelope, serialize, compress and assemble one payload.
    pub fn build(
        &self,
        payload: &[u8],
        function_name: &str,
        invoked_function_arn: &str,
    ) -> Result<Request, RequestError> {
        let record = build_log_record(payload, function_name, self.ids.as_ref());
        let context = InvocationContext::new(function_name, invoked_function_arn);

        let uncompressed = serialize(&record, context)?;
        let compressed = compress_with_level(&uncompressed, self.compression_level)?;
        debug!(
            "Compressed telemetry payload from {} to {} bytes",
            uncompressed.len(),
            compressed.len()
        );

        assemble_request(compressed, &self.url, &self.license_key, &self.user_agent)
    }

    /// Same as [`RequestBuilder::build`], taking the invoked ARN from an
    /// `INVOKE` event.
    pub fn build_for_invocation(
        &self,
        payload: &[u8],
        function_name: &str,
        event: &InvocationEvent,
    ) -> Result<Request, RequestError> {
        let invoked_function_arn = event
            .invoked_function_arn()
            .ok_or(RequestError::NotAnInvocation)?;
        self.build(payload, function_name, invoked_function_arn)
    }
}

/// One-shot build with the system identifier source and default compression.
pub fn build_request(
    payload: &[u8],
    function_name: &str,
    invoked_function_arn: &str,
    license_key: &str,
    url: &str,
    user_agent: &str,
) -> Result<Request, RequestError> {
    RequestBuilder::new(
        url.to_string(),
        license_key.to_string(),
        user_agent.to_string(),
    )
    .build(payload, function_name, invoked_function_arn)
}

/// POST with the compressed body and exactly the four ingest headers.
pub fn assemble_request(
    body: Vec<u8>,
    url: &str,
    license_key: &str,
    user_agent: &str,
) -> Result<Request, RequestError> {
    let url = Url::parse(url).map_err(|e| {
        error!("Invalid telemetry endpoint '{url}': {e}");
        RequestError::RequestConstruction(format!("invalid url '{url}': {e}"))
    })?;

    let user_agent = header_value("User-Agent", user_agent)?;
    let mut license_key = header_value("X-License-Key", license_key)?;
    license_key.set_sensitive(true);

    let mut request = Request::new(Method::POST, url);
    let headers = request.headers_mut();
    headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, user_agent);
    headers.insert(HeaderName::from_static(LICENSE_KEY_HEADER), license_key);
    *request.body_mut() = Some(Body::from(body));

    Ok(request)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, RequestError> {
    HeaderValue::from_str(value).map_err(|e| {
        // Never log the value itself, it may be a credential
        error!("Invalid value for header {name}: {e}");
        RequestError::RequestConstruction(format!("invalid value for header {name}: {e}"))
    })
}
