//! Response content negotiation.
//!
//! The only coding offered besides identity is gzip, picked by a substring
//! match on `Accept-Encoding`.

use std::io::Write;

use anyhow::Context;
use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::http::headers::HeaderMap;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCoding {
    Identity,
    Gzip,
}

impl ContentCoding {
    /// Picks a coding from the request's `Accept-Encoding` value.
    ///
    /// ```
    /// # use courier::http::encoding::ContentCoding;
    /// assert_eq!(ContentCoding::negotiate(Some("deflate, gzip")), ContentCoding::Gzip);
    /// assert_eq!(ContentCoding::negotiate(Some("br")), ContentCoding::Identity);
    /// assert_eq!(ContentCoding::negotiate(None), ContentCoding::Identity);
    /// ```
    pub fn negotiate(accept_encoding: Option<&str>) -> Self {
        match accept_encoding {
            Some(v) if v.contains("gzip") => ContentCoding::Gzip,
            _ => ContentCoding::Identity,
        }
    }

    /// Value for the `Content-Encoding` header, if one is sent.
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            ContentCoding::Identity => None,
            ContentCoding::Gzip => Some("gzip"),
        }
    }

    /// Encodes `body` with this coding. Gzip runs on the blocking pool.
    pub async fn encode(self, body: Bytes) -> anyhow::Result<Bytes> {
        match self {
            ContentCoding::Identity => Ok(body),
            ContentCoding::Gzip => tokio::task::spawn_blocking(move || gzip(&body))
                .await
                .context("compression task failed")?,
        }
    }
}

pub fn gzip(raw: &[u8]) -> anyhow::Result<Bytes> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(raw.len() / 2 + 32), Compression::default());
    encoder.write_all(raw)?;
    let compressed = encoder.finish()?;
    Ok(Bytes::from(compressed))
}

/// Builds a `text/plain` 200 response for `body`, compressed when the client
/// accepts gzip.
pub async fn negotiate_text(
    accept_encoding: Option<&str>,
    body: Bytes,
    headers: HeaderMap,
) -> Response {
    let coding = ContentCoding::negotiate(accept_encoding);
    let encoded = coding.encode(body).await;
    text_response(coding, encoded, headers)
}

/// Wraps an encoded body in a `text/plain` response.
///
/// `Content-Length` is the length of the bytes actually sent. A codec failure
/// turns into an empty 500 carrying only `headers`.
pub fn text_response(
    coding: ContentCoding,
    encoded: anyhow::Result<Bytes>,
    headers: HeaderMap,
) -> Response {
    let encoded = match encoded {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to encode response body");
            return Response::internal_error(headers);
        }
    };

    let mut builder = ResponseBuilder::new(StatusCode::Ok).headers(headers);
    if let Some(value) = coding.header_value() {
        builder = builder.header("Content-Encoding", value);
    }

    builder
        .header("Content-Type", "text/plain")
        .header("Content-Length", encoded.len())
        .body(encoded)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn gzip_output_decodes_to_input() {
        let compressed = gzip(b"abc").unwrap();

        let mut decoded = String::new();
        GzDecoder::new(&compressed[..])
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "abc");
    }

    #[test]
    fn gzip_token_is_matched_anywhere() {
        assert_eq!(
            ContentCoding::negotiate(Some("invalid-encoding-1, gzip, invalid-encoding-2")),
            ContentCoding::Gzip
        );
        assert_eq!(ContentCoding::negotiate(Some("")), ContentCoding::Identity);
    }

    #[tokio::test]
    async fn identity_body_is_untouched() {
        let resp = negotiate_text(None, Bytes::from_static(b"hello"), HeaderMap::new()).await;

        assert_eq!(resp.status, StatusCode::Ok);
        assert_eq!(resp.body_bytes(), b"hello");
        assert_eq!(resp.headers.get("Content-Length"), Some("5"));
        assert_eq!(resp.headers.get("Content-Type"), Some("text/plain"));
        assert!(!resp.headers.contains_key("Content-Encoding"));
    }

    #[tokio::test]
    async fn gzip_sets_encoding_and_compressed_length() {
        let resp = negotiate_text(Some("gzip"), Bytes::from_static(b"hello"), HeaderMap::new()).await;

        let len = resp.body_bytes().len().to_string();
        assert_eq!(resp.headers.get("Content-Encoding"), Some("gzip"));
        assert_eq!(resp.headers.get("Content-Length"), Some(len.as_str()));
    }

    #[test]
    fn codec_failure_is_empty_internal_error() {
        let mut seed = HeaderMap::new();
        seed.insert("Connection", "close");

        let resp = text_response(
            ContentCoding::Gzip,
            Err(anyhow::anyhow!("deflate stream corrupted")),
            seed,
        );

        assert_eq!(resp.status, StatusCode::InternalServerError);
        assert!(resp.body.is_none());
        assert!(!resp.headers.contains_key("Content-Type"));
        assert!(!resp.headers.contains_key("Content-Length"));
        assert!(!resp.headers.contains_key("Content-Encoding"));
        assert_eq!(resp.headers.get("Connection"), Some("close"));
        assert_eq!(resp.headers.len(), 1);
    }
}
