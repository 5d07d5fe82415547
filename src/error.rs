// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Manifest(String),
    Fetch(String),
    Media(MediaError),
}

/// Why one asset could not be shown.
///
/// Used to pick a user-friendly, localized message for the placeholder or the
/// lightbox error panel. Never escapes the component that detected it.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The asset does not exist at its location.
    NotFound,

    /// Network transfer failed (connection, HTTP status, ...).
    Network(String),

    /// Bytes arrived but could not be decoded.
    Decode(String),

    /// Format or codec the viewer cannot play.
    UnsupportedFormat(String),

    /// Document the viewer cannot render inline.
    InlineUnsupported,

    /// Anything else, with the raw message.
    Other(String),
}

impl MediaError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            MediaError::NotFound => "error-media-not-found",
            MediaError::Network(_) => "error-media-network",
            MediaError::Decode(_) => "error-media-decode",
            MediaError::UnsupportedFormat(_) => "error-media-unsupported-format",
            MediaError::InlineUnsupported => "error-media-inline-unsupported",
            MediaError::Other(_) => "error-media-general",
        }
    }

    /// Whether trying again has a chance of succeeding.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, MediaError::Network(_) | MediaError::Other(_))
    }

    /// Categorizes a raw error message coming from I/O, HTTP or decoding.
    #[must_use]
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("no such file")
            || msg_lower.contains("not found")
            || msg_lower.contains("404")
        {
            return MediaError::NotFound;
        }

        if msg_lower.contains("unsupported") || msg_lower.contains("codec") {
            return MediaError::UnsupportedFormat(msg.to_string());
        }

        if msg_lower.contains("connection")
            || msg_lower.contains("timed out")
            || msg_lower.contains("dns")
            || msg_lower.contains("http")
        {
            return MediaError::Network(msg.to_string());
        }

        if msg_lower.contains("decode")
            || msg_lower.contains("corrupt")
            || msg_lower.contains("invalid")
            || msg_lower.contains("malformed")
        {
            return MediaError::Decode(msg.to_string());
        }

        MediaError::Other(msg.to_string())
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::NotFound => write!(f, "Media not found"),
            MediaError::Network(msg) => write!(f, "Network error: {}", msg),
            MediaError::Decode(msg) => write!(f, "Decoding failed: {}", msg),
            MediaError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            MediaError::InlineUnsupported => write!(f, "Cannot be displayed inline"),
            MediaError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Manifest(e) => write!(f, "Manifest Error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
            Error::Media(e) => write!(f, "Media Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}

impl From<&Error> for MediaError {
    fn from(err: &Error) -> Self {
        match err {
            Error::Media(media) => media.clone(),
            Error::Io(msg) | Error::Fetch(msg) => MediaError::from_message(msg),
            Error::Config(msg) | Error::Manifest(msg) => MediaError::Other(msg.clone()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
