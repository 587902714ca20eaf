use bytes::Bytes;
use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use reqwest::StatusCode;
use url::Url;

/// Character set a page body was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    /// Also covers pages labelled ISO-8859-1, which the WHATWG encoding
    /// standard maps to windows-1252.
    Windows1252,
    Other(&'static str),
}

impl Charset {
    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        if encoding == encoding_rs::UTF_8 {
            Self::Utf8
        } else if encoding == encoding_rs::WINDOWS_1252 {
            Self::Windows1252
        } else {
            Self::Other(encoding.name())
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Windows1252 => encoding_rs::WINDOWS_1252,
            Self::Other(name) => Encoding::for_label(name.as_bytes()).unwrap_or(encoding_rs::UTF_8),
        }
    }
}

/// A retrieved catalog page, already decoded to UTF-8.
#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub body_raw: Bytes,
    pub body_utf8: String,
    pub charset: Charset,
    pub fetched_at: DateTime<Utc>,
}

impl PageResponse {
    /// Build a response around an already-decoded HTML body.
    pub fn from_html(url_final: Url, html: impl Into<String>) -> Self {
        let body_utf8 = html.into();
        Self {
            url_final,
            status: StatusCode::OK,
            body_raw: Bytes::from(body_utf8.clone()),
            body_utf8,
            charset: Charset::Utf8,
            fetched_at: Utc::now(),
        }
    }
}
