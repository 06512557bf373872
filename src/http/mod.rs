//! HTTP protocol implementation.
//!
//! A minimal HTTP/1.1 server side: one request per read, GET and POST only,
//! no chunked transfer coding.
//!
//! # Architecture
//!
//! - **`connection`**: Per-client state machine driving parse, route and write
//! - **`parser`**: Lenient request parsing and body framing
//! - **`request`**: HTTP request representation
//! - **`headers`**: Ordered header list with case-insensitive lookup
//! - **`response`**: HTTP response representation with builder
//! - **`encoding`**: gzip/identity content negotiation
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the next read event
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and run the handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Connection: close → Closed
//!               └─ otherwise → Reading (same connection)
//! ```
//!
//! Peer EOF or an idle timeout while Reading also leads to Closed.

pub mod connection;
pub mod encoding;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
