use courier::http::parser::{ParseError, parse_http_request};
use courier::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert!(parsed.body.is_empty());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /files/a.txt HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/files/a.txt");
    assert_eq!(parsed.body, b"hello".to_vec());
}

#[test]
fn test_parse_body_is_everything_after_blank_line() {
    let req = b"POST /files/a HTTP/1.1\r\n\r\nline one\r\nline two";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"line one\r\nline two".to_vec());
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert_eq!(parsed.header("User-Agent"), Some("test-client"));
    assert_eq!(parsed.header("Accept"), Some("*/*"));
}

#[test]
fn test_parse_header_value_split_on_first_colon() {
    let req = b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Host"), Some("localhost:4221"));
}

#[test]
fn test_parse_header_name_and_value_trimmed() {
    let req = b"GET / HTTP/1.1\r\n  X-Padded  :   spaced out   \r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("X-Padded"), Some("spaced out"));
}

#[test]
fn test_parse_repeated_header_last_wins() {
    let req = b"GET / HTTP/1.1\r\nUser-Agent: first\r\nuser-agent: second\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("User-Agent"), Some("second"));
    assert_eq!(parsed.headers.len(), 1);
}

#[test]
fn test_parse_malformed_header_is_dropped() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.header("Host"), Some("example.com"));
}

#[test]
fn test_parse_missing_blank_line_terminates() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\nAccept: */*";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Accept"), Some("*/*"));
    assert!(parsed.body.is_empty());
}

#[test]
fn test_parse_request_line_only() {
    let parsed = parse_http_request(b"GET /index.html HTTP/1.1").unwrap();

    assert_eq!(parsed.path, "/index.html");
    assert!(parsed.headers.is_empty());
}

#[test]
fn test_parse_short_request_line_is_rejected() {
    let result = parse_http_request(b"GET /\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::InvalidRequestLine);
}

#[test]
fn test_parse_empty_buffer_is_rejected() {
    assert_eq!(parse_http_request(b"").unwrap_err(), ParseError::Empty);
}

#[test]
fn test_parse_unknown_method_passes_through() {
    let parsed = parse_http_request(b"DELETE /files/x HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(parsed.method, Method::Other("DELETE".to_string()));
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /files/bin HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\xff\x02\x03";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 0xff, 2, 3]);
}

#[test]
fn test_parse_request_with_query_string() {
    let req = b"GET /echo/a?b=c HTTP/1.1\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/echo/a?b=c");
}
