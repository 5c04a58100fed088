//! Ally Networking
//!
//! Client for the remote image description service.

pub mod client;
pub mod upload;

pub use client::{interpret_response, resolve_endpoint, DescriptionResponse, ImageDescriber, DEFAULT_ENDPOINT_PATH};
pub use upload::{is_image_mime, mime_for_path, ImageUpload};
pub use url::Url;

/// Image description error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescribeError {
    #[error("Please upload an image file (jpg, png, etc.)")]
    NotAnImage(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(u16),

    #[error("{0}")]
    Remote(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Error reading file: {0}")]
    Io(String),
}

impl DescribeError {
    /// Message shown in place of the description
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAnImage(_) | Self::Io(_) => self.to_string(),
            _ => format!("Error analyzing image: {self}"),
        }
    }
}
