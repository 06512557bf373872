use courier::http::headers::HeaderMap;
use courier::http::response::{Response, ResponseBuilder, StatusCode};
use courier::http::writer::{ResponseWriter, serialize_response};

#[test]
fn test_serialize_empty_ok() {
    let bytes = serialize_response(&Response::ok(HeaderMap::new()));
    assert_eq!(&bytes[..], b"HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn test_serialize_headers_in_insertion_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("Content-Length", 3)
        .body(b"abc".to_vec())
        .build();

    let bytes = serialize_response(&response);
    assert_eq!(
        &bytes[..],
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
    );
}

#[test]
fn test_serialize_error_status_lines() {
    let not_found = serialize_response(&Response::not_found(HeaderMap::new()));
    assert_eq!(&not_found[..], b"HTTP/1.1 404 Not Found\r\n\r\n");

    let error = serialize_response(&Response::internal_error(HeaderMap::new()));
    assert_eq!(&error[..], b"HTTP/1.1 500 Internal Server Error\r\n\r\n");

    let created = serialize_response(&Response::created(HeaderMap::new()));
    assert_eq!(&created[..], b"HTTP/1.1 201 Created\r\n\r\n");
}

#[test]
fn test_serialize_binary_body_verbatim() {
    let body = vec![0u8, 13, 10, 13, 10, 255];
    let response = ResponseBuilder::new(StatusCode::Ok).body(body.clone()).build();

    let bytes = serialize_response(&response);
    assert!(bytes.ends_with(&body));
}

#[tokio::test]
async fn test_writer_writes_everything() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", 5)
        .body(b"hello".to_vec())
        .build();

    let mut writer = ResponseWriter::new(&response);
    let mut out: Vec<u8> = Vec::new();
    writer.write_to_stream(&mut out).await.unwrap();

    assert_eq!(&out[..], b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello");
}
