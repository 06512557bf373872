use crate::http::headers::HeaderMap;
use crate::http::request::{Method, Request};

const HEADERS_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was received
    Empty,
    /// The request line did not carry method, target and version
    InvalidRequestLine,
}

/// How much of a request a buffer holds.
#[derive(Debug, PartialEq, Eq)]
pub enum Framing {
    /// Header block and declared body are all present; the request spans
    /// the first `usize` bytes.
    Complete(usize),
    /// Header block is terminated but `Content-Length` promises more body.
    NeedBody { expected: usize },
    /// No blank line yet. The buffer is taken as the whole request.
    Unterminated,
}

/// Parses one request out of a single read.
///
/// Parsing is lenient: header lines without a colon are dropped, and a header
/// block with no terminating blank line simply runs to the end of the buffer
/// with an empty body. Only a request line missing one of its three tokens is
/// rejected.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::Empty);
    }

    let (head, body) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], &buf[end + HEADERS_END.len()..]),
        None => (buf, &buf[buf.len()..]),
    };

    let head = String::from_utf8_lossy(head);
    let mut lines = head.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequestLine)?;
    let mut parts = request_line.split(' ');

    let method = parts.next().filter(|s| !s.is_empty());
    let path = parts.next().filter(|s| !s.is_empty());
    let version = parts.next().filter(|s| !s.is_empty());

    let (Some(method), Some(path), Some(version)) = (method, path, version) else {
        return Err(ParseError::InvalidRequestLine);
    };

    // Headers, bounded by the number of lines
    let mut headers = HeaderMap::new();

    for line in lines {
        if line.trim().is_empty() {
            break;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        headers.insert(key, value.trim());
    }

    Ok(Request {
        method: Method::from(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body: body.to_vec(),
    })
}

/// Decides whether `buf` already holds a complete request.
///
/// Only a terminated header block with a `Content-Length` can ask for more
/// bytes; everything else is handled as one request per read.
pub fn framing(buf: &[u8]) -> Framing {
    let Some(end) = find_headers_end(buf) else {
        return Framing::Unterminated;
    };

    let body_start = end + HEADERS_END.len();
    let declared = declared_content_length(&buf[..end]);

    match declared {
        Some(len) if buf.len() - body_start < len => Framing::NeedBody { expected: len },
        Some(len) => Framing::Complete(body_start + len),
        None => Framing::Complete(buf.len()),
    }
}

fn declared_content_length(head: &[u8]) -> Option<usize> {
    header_values(head, b"content-length")
        .filter_map(|v| std::str::from_utf8(v).ok()?.parse().ok())
        .last()
}

/// True when the raw request asks for `Connection: close`.
///
/// Works on bytes that may not parse as a request, so a malformed request
/// can still be answered on its own terms.
pub fn requests_close(buf: &[u8]) -> bool {
    let head = match find_headers_end(buf) {
        Some(end) => &buf[..end],
        None => buf,
    };

    header_values(head, b"connection")
        .last()
        .is_some_and(|v| v.eq_ignore_ascii_case(b"close"))
}

/// Trimmed values of every header line in `head` named `name`, ignoring case.
fn header_values<'a>(head: &'a [u8], name: &'a [u8]) -> impl Iterator<Item = &'a [u8]> {
    head.split(|b| *b == b'\n')
        .skip(1)
        .filter_map(move |line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            let colon = line.iter().position(|b| *b == b':')?;
            let (key, value) = line.split_at(colon);
            if !key.trim_ascii().eq_ignore_ascii_case(name) {
                return None;
            }
            Some(value[1..].trim_ascii())
        })
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADERS_END.len())
        .position(|w| w == HEADERS_END)
}
