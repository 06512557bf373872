//! Request routing.
//!
//! Routes are fixed. Matching runs in priority order and the first hit wins:
//!
//! | Target                      | Method     | Route       |
//! |-----------------------------|------------|-------------|
//! | `/` or `/index.html`        | any        | `Index`     |
//! | contains `/echo/`           | any        | `Echo`      |
//! | contains `/user-agent`      | any        | `UserAgent` |
//! | contains `/files/`          | GET        | `ReadFile`  |
//! | contains `/files/`          | POST       | `WriteFile` |
//! | anything else               | any        | `NotFound`  |

pub mod context;
pub mod handlers;

pub use context::RouteContext;

use crate::http::headers::HeaderMap;
use crate::http::request::{Method, Request};
use crate::http::response::Response;

const ECHO_PREFIX: &str = "/echo/";
const USER_AGENT_PREFIX: &str = "/user-agent";
const FILES_PREFIX: &str = "/files/";

/// The handler selected for a request, with the part of the target it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Index,
    Echo(&'a str),
    UserAgent,
    ReadFile(&'a str),
    WriteFile(&'a str),
    NotFound,
}

impl<'a> Route<'a> {
    /// Maps a method and target to a route.
    ///
    /// Echo and file arguments are the target with its first six or seven
    /// bytes removed, the length of the `/echo/` and `/files/` prefixes.
    pub fn resolve(method: &Method, path: &'a str) -> Self {
        if path == "/" || path == "/index.html" {
            return Route::Index;
        }

        if path.contains(ECHO_PREFIX) {
            return Route::Echo(path.get(ECHO_PREFIX.len()..).unwrap_or_default());
        }

        if path.contains(USER_AGENT_PREFIX) {
            return Route::UserAgent;
        }

        if path.contains(FILES_PREFIX) {
            let name = path.get(FILES_PREFIX.len()..).unwrap_or_default();
            return match method {
                Method::GET => Route::ReadFile(name),
                Method::POST => Route::WriteFile(name),
                Method::Other(_) => Route::NotFound,
            };
        }

        Route::NotFound
    }
}

/// Runs the handler for `req`.
///
/// Every response starts from the same header seed: `Connection: close` is
/// echoed back when the client asked for it.
pub async fn dispatch(ctx: &RouteContext, req: &Request) -> Response {
    let seed = response_seed(req);

    match Route::resolve(&req.method, &req.path) {
        Route::Index => handlers::index(seed),
        Route::Echo(value) => handlers::echo(value, req, seed).await,
        Route::UserAgent => handlers::user_agent(req, seed),
        Route::ReadFile(name) => handlers::read_file(ctx, name, seed).await,
        Route::WriteFile(name) => handlers::write_file(ctx, name, &req.body, seed).await,
        Route::NotFound => handlers::not_found(seed),
    }
}

/// Headers every response to `req` begins with.
pub fn response_seed(req: &Request) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if req.wants_close() {
        headers.insert("Connection", "close");
    }
    headers
}
