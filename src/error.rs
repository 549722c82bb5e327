use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Error fetching XML data: {0}")]
    Fetch(#[from] FetchError),

    #[error("Error parsing XML data: {0}")]
    Parse(#[from] ParseError),

    #[error("Error updating log file: {0}")]
    Write(#[from] WriteError),

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },
}

/// Network failures, timeouts, and non-2xx statuses, one terminal bucket
#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("GET {url} failed: {source}")]
    Request {
        url: String,
        source: Box<ureq::Error>,
    },

    #[error("reading response body from {url} failed: {source}")]
    Body {
        url: String,
        source: Box<ureq::Error>,
    },
}

#[derive(Debug, Error)]
pub(crate) enum ParseError {
    #[error("response is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

#[derive(Debug, Error)]
pub(crate) enum WriteError {
    #[error("failed to read header of {path}: {source}")]
    ReadHeader {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to append to {path}: {source}")]
    Append {
        path: PathBuf,
        source: std::io::Error,
    },
}
