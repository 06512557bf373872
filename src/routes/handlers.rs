//! Built-in route handlers.
//!
//! Handlers never fail: filesystem errors become 404 and codec errors 500.

use bytes::Bytes;
use tokio::time::timeout;
use tracing::warn;

use crate::http::encoding;
use crate::http::headers::HeaderMap;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::routes::RouteContext;

/// `GET /` and `GET /index.html`: empty 200 with no content headers.
pub fn index(headers: HeaderMap) -> Response {
    Response::ok(headers)
}

pub async fn echo(value: &str, req: &Request, headers: HeaderMap) -> Response {
    let body = Bytes::copy_from_slice(value.as_bytes());
    encoding::negotiate_text(req.accept_encoding(), body, headers).await
}

/// Reflects the `User-Agent` header; a missing header reflects as empty.
pub fn user_agent(req: &Request, headers: HeaderMap) -> Response {
    let agent = req.user_agent();

    ResponseBuilder::new(StatusCode::Ok)
        .headers(headers)
        .header("Content-Type", "text/plain")
        .header("Content-Length", agent.len())
        .body(Bytes::copy_from_slice(agent.as_bytes()))
        .build()
}

pub async fn read_file(ctx: &RouteContext, name: &str, headers: HeaderMap) -> Response {
    let Some(path) = ctx.resolve(name) else {
        warn!(file = name, "Rejected file name");
        return Response::not_found(headers);
    };

    let contents = match timeout(ctx.io_timeout, tokio::fs::read(&path)).await {
        Ok(Ok(contents)) => contents,
        Ok(Err(e)) => {
            warn!(path = %path.display(), error = %e, "File read failed");
            return Response::not_found(headers);
        }
        Err(_) => {
            warn!(path = %path.display(), "File read timed out");
            return Response::not_found(headers);
        }
    };

    ResponseBuilder::new(StatusCode::Ok)
        .headers(headers)
        .header("Content-Type", "application/octet-stream")
        .header("Content-Length", contents.len())
        .body(contents)
        .build()
}

/// Creates or overwrites the file with the request body. Any failure,
/// including a rejected name, answers 404.
pub async fn write_file(
    ctx: &RouteContext,
    name: &str,
    body: &[u8],
    headers: HeaderMap,
) -> Response {
    let Some(path) = ctx.resolve(name) else {
        warn!(file = name, "Rejected file name");
        return Response::not_found(headers);
    };

    match timeout(ctx.io_timeout, tokio::fs::write(&path, body)).await {
        Ok(Ok(())) => Response::created(headers),
        Ok(Err(e)) => {
            warn!(path = %path.display(), error = %e, "File write failed");
            Response::not_found(headers)
        }
        Err(_) => {
            warn!(path = %path.display(), "File write timed out");
            Response::not_found(headers)
        }
    }
}

pub fn not_found(headers: HeaderMap) -> Response {
    Response::not_found(headers)
}
