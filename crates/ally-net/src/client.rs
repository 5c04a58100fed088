//! Description Client
//!
//! Posts an image as multipart form data and interprets the JSON reply.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::upload::ImageUpload;
use crate::DescribeError;

/// Path of the analysis endpoint on the assistant server
pub const DEFAULT_ENDPOINT_PATH: &str = "/api/analyze-image";

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// Reply body from the analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DescriptionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Turn a status code and body into a description or an error.
///
/// Any non-2xx status is a server error regardless of the body.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<String, DescribeError> {
    if !(200..300).contains(&status) {
        return Err(DescribeError::Server(status));
    }

    let reply: DescriptionResponse =
        serde_json::from_slice(body).map_err(|e| DescribeError::InvalidResponse(e.to_string()))?;

    match reply {
        DescriptionResponse { success: true, description: Some(description), .. } => Ok(description),
        DescriptionResponse { success: true, description: None, .. } => {
            Err(DescribeError::InvalidResponse("missing description".to_string()))
        }
        DescriptionResponse { error, .. } => Err(DescribeError::Remote(
            error.unwrap_or_else(|| "Unknown error occurred".to_string()),
        )),
    }
}

/// Resolve the endpoint URL. A bare origin gets the default analysis path.
pub fn resolve_endpoint(base: &str) -> Result<Url, DescribeError> {
    let url = Url::parse(base).map_err(|e| DescribeError::InvalidUrl(format!("{base}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DescribeError::InvalidUrl(format!("{base}: unsupported scheme")));
    }
    if url.path() == "/" {
        return url.join(DEFAULT_ENDPOINT_PATH).map_err(|e| DescribeError::InvalidUrl(e.to_string()));
    }
    Ok(url)
}

/// Client for the image description endpoint
pub struct ImageDescriber {
    client: reqwest::blocking::Client,
    endpoint: Url,
}

impl ImageDescriber {
    /// Create a client for `endpoint` (a full URL or a bare origin)
    pub fn new(endpoint: &str) -> Result<Self, DescribeError> {
        Self::with_timeout(endpoint, Duration::from_secs(30))
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, DescribeError> {
        let endpoint = resolve_endpoint(endpoint)?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("ally/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| DescribeError::Network(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url { &self.endpoint }

    /// Upload an image and return its description. No retry.
    pub fn describe(&self, upload: &ImageUpload) -> Result<String, DescribeError> {
        tracing::info!(endpoint = %self.endpoint, file = %upload.file_name, size = upload.len(), "analyzing image");

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)
            .map_err(|e| DescribeError::NotAnImage(format!("{}: {}", upload.mime, e)))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .map_err(|e| DescribeError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| DescribeError::Network(e.to_string()))?;

        let result = interpret_response(status, &body);
        match &result {
            Ok(description) => tracing::info!(chars = description.len(), "image described"),
            Err(e) => tracing::error!("image analysis failed: {}", e),
        }
        result
    }
}
