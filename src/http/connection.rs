use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::http::headers::HeaderMap;
use crate::http::parser::{Framing, framing, parse_http_request, requests_close};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routes::{self, RouteContext};

/// Largest request the connection will buffer while waiting for a body.
pub const MAX_REQUEST_BYTES: usize = 1024 * 1024;

const READ_CHUNK: usize = 4096;

/// One accepted client.
///
/// Each read is expected to carry one whole request. The only exception is
/// a body announced by `Content-Length` that has not fully arrived, which is
/// read to completion before the request is handled.
///
/// `idle_timeout` bounds both waiting for a request and writing a response,
/// so a peer that stops reading cannot hold the task forever.
pub struct Connection<S = TcpStream> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    ctx: Arc<RouteContext>,
    idle_timeout: Duration,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = close after write?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, ctx: Arc<RouteContext>, idle_timeout: Duration) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
            ctx,
            idle_timeout,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_frame().await? {
                    Some(frame) => match parse_http_request(&frame) {
                        Ok(req) => {
                            self.state = ConnectionState::Processing(req);
                        }
                        Err(e) => {
                            warn!(error = ?e, "Malformed request");
                            let mut headers = HeaderMap::new();
                            if requests_close(&frame) {
                                headers.insert("Connection", "close");
                            }
                            let response = Response::not_found(headers);
                            self.state = ConnectionState::Writing(
                                ResponseWriter::new(&response),
                                response.closes_connection(),
                            );
                        }
                    },
                    None => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = routes::dispatch(&self.ctx, req).await;

                    debug!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Handled request"
                    );

                    let close = response.closes_connection();
                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, close);
                }

                ConnectionState::Writing(writer, close) => {
                    let close = *close;
                    let stream = &mut self.stream;
                    let written = timeout(self.idle_timeout, async move {
                        writer.write_to_stream(&mut *stream).await?;
                        if close {
                            stream.shutdown().await?;
                        }
                        anyhow::Ok(())
                    })
                    .await;

                    match written {
                        Ok(res) => res?,
                        Err(_) => {
                            warn!("Write timed out, closing connection");
                            self.state = ConnectionState::Closed;
                            continue;
                        }
                    }

                    if close {
                        self.state = ConnectionState::Closed;
                    } else {
                        self.state = ConnectionState::Reading; // go back for next request
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads the bytes of the next request.
    ///
    /// Returns `None` when the peer closed the connection or stayed idle past
    /// the timeout with nothing buffered. If that happens while a declared
    /// body is still arriving, whatever was received is handed on as the
    /// request.
    pub async fn read_frame(&mut self) -> anyhow::Result<Option<BytesMut>> {
        if self.buffer.is_empty() && !self.fill().await? {
            return Ok(None);
        }

        loop {
            match framing(&self.buffer) {
                Framing::Complete(len) => {
                    return Ok(Some(self.buffer.split_to(len)));
                }

                Framing::NeedBody { expected } if expected <= MAX_REQUEST_BYTES => {
                    if !self.fill().await? {
                        warn!(
                            expected,
                            received = self.buffer.len(),
                            "Request body cut short"
                        );
                        return Ok(Some(self.buffer.split()));
                    }
                }

                // Unframed, or too large to wait for: take what arrived
                Framing::NeedBody { .. } | Framing::Unterminated => {
                    return Ok(Some(self.buffer.split()));
                }
            }
        }
    }

    /// Waits for one read event. Returns false on EOF or idle timeout.
    async fn fill(&mut self) -> anyhow::Result<bool> {
        self.buffer.reserve(READ_CHUNK);

        let n = match timeout(self.idle_timeout, self.stream.read_buf(&mut self.buffer)).await {
            Ok(read) => read?,
            Err(_) => {
                debug!("Idle timeout, closing connection");
                return Ok(false);
            }
        };

        // Client closed connection
        Ok(n != 0)
    }
}
