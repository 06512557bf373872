use bytes::Bytes;

use crate::http::headers::HeaderMap;

/// HTTP status codes the server produces.
///
/// - `Ok` (200): Request successful
/// - `Created` (201): File written
/// - `NotFound` (404): No route, or a file operation failed
/// - `InternalServerError` (500): Body compression failed
///
/// Keeping the set closed means every status has a reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::response::StatusCode;
    /// assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers serialize in insertion order. A `None` body is written as zero
/// bytes.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in insertion order
    pub headers: HeaderMap,
    /// Response body
    pub body: Option<Bytes>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// Unlike many builders it never adds `Content-Length` on its own: handlers
/// set content headers explicitly, and bodiless responses carry none.
///
/// # Example
///
/// ```
/// # use courier::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body(b"hi".to_vec())
///     .build();
/// assert_eq!(response.body_bytes(), b"hi");
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Starts from an existing header list, keeping its order.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.headers.insert(key, value.to_string());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates an empty 200 OK response.
    pub fn ok(headers: HeaderMap) -> Self {
        ResponseBuilder::new(StatusCode::Ok).headers(headers).build()
    }

    /// Creates an empty 201 Created response.
    pub fn created(headers: HeaderMap) -> Self {
        ResponseBuilder::new(StatusCode::Created)
            .headers(headers)
            .build()
    }

    /// Creates an empty 404 Not Found response.
    pub fn not_found(headers: HeaderMap) -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .headers(headers)
            .build()
    }

    /// Creates an empty 500 Internal Server Error response.
    pub fn internal_error(headers: HeaderMap) -> Self {
        ResponseBuilder::new(StatusCode::InternalServerError)
            .headers(headers)
            .build()
    }

    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }

    /// True when the response tells the peer the connection ends after it.
    pub fn closes_connection(&self) -> bool {
        self.headers.get("Connection") == Some("close")
    }
}
