use chlp::protocol::codec::{
    decode_request, decode_response, read_body, read_headers, write_message,
};
use chlp::protocol::{FrameError, Method};

const LIMIT: usize = 1024 * 1024;

#[tokio::test]
async fn test_encode_layout() {
    let mut out: Vec<u8> = Vec::new();
    write_message(&mut out, "ECHO /x CHLP/1.0", b"hello").await.unwrap();

    assert_eq!(out, b"ECHO /x CHLP/1.0\nBody-Size: 5\n\nhello");
}

#[tokio::test]
async fn test_encode_empty_body_has_zero_size() {
    let mut out: Vec<u8> = Vec::new();
    write_message(&mut out, "CHLP/1.0 404 Not Found", b"").await.unwrap();

    assert_eq!(out, b"CHLP/1.0 404 Not Found\nBody-Size: 0\n\n");
}

#[tokio::test]
async fn test_round_trip_preserves_body() {
    let bodies: Vec<Vec<u8>> = vec![
        Vec::new(),
        b"\n\n\r\n".to_vec(),
        (0..=255u8).collect(),
    ];

    for body in bodies {
        let mut wire: Vec<u8> = Vec::new();
        write_message(&mut wire, "POST /up CHLP/1.0", &body).await.unwrap();

        let mut input: &[u8] = &wire;
        let request = decode_request(&mut input, LIMIT).await.unwrap().unwrap();

        assert_eq!(request.body, body);
        assert_eq!(request.headers.body_size(), body.len());
        assert!(input.is_empty());
    }
}

#[tokio::test]
async fn test_round_trip_through_small_pipe() {
    let body: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    let (mut writer, mut reader) = tokio::io::duplex(64);

    let expected = body.clone();
    let send = tokio::spawn(async move {
        write_message(&mut writer, "CHLP/1.0 200 OK", &body).await.unwrap();
    });

    let response = decode_response(&mut reader, LIMIT).await.unwrap();
    send.await.unwrap();

    assert_eq!(response.body, expected);
    assert_eq!(response.status_line.unwrap().code, 200);
}

#[tokio::test]
async fn test_decode_request_fields() {
    let mut input: &[u8] = b"echo /path CHLP/1.0\nbody-size: 3\nX-Note: a: b\n\nabc";

    let request = decode_request(&mut input, LIMIT).await.unwrap().unwrap();

    assert_eq!(*request.method(), Method::ECHO);
    assert_eq!(request.resource(), "/path");
    assert_eq!(request.line.version, "CHLP/1.0");
    assert_eq!(request.headers.get("X-Note"), Some("a: b"));
    assert_eq!(request.body, b"abc");
}

#[tokio::test]
async fn test_decode_request_ignores_malformed_header_lines() {
    let mut input: &[u8] = b"POST / CHLP/1.0\nnot a header\nBody-Size: 2\n\nhi";

    let request = decode_request(&mut input, LIMIT).await.unwrap().unwrap();

    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.body, b"hi");
}

#[tokio::test]
async fn test_missing_or_invalid_body_size_means_no_body() {
    let mut missing: &[u8] = b"POST / CHLP/1.0\n\nleftover";
    let request = decode_request(&mut missing, LIMIT).await.unwrap().unwrap();
    assert!(request.body.is_empty());
    assert_eq!(missing, b"leftover");

    let mut invalid: &[u8] = b"POST / CHLP/1.0\nBody-Size: lots\n\nleftover";
    let request = decode_request(&mut invalid, LIMIT).await.unwrap().unwrap();
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_decode_request_on_closed_stream() {
    let mut input: &[u8] = b"";
    assert!(decode_request(&mut input, LIMIT).await.unwrap().is_none());
}

#[tokio::test]
async fn test_decode_request_malformed_start_line() {
    let mut input: &[u8] = b"GET /only-two\n\n";

    let err = decode_request(&mut input, LIMIT).await.unwrap_err();
    assert!(matches!(err, FrameError::MalformedStartLine(line) if line == "GET /only-two"));
}

#[tokio::test]
async fn test_decode_request_unterminated_headers() {
    let mut input: &[u8] = b"GET / CHLP/1.0\nBody-Size: 0\n";

    let err = decode_request(&mut input, LIMIT).await.unwrap_err();
    assert!(matches!(err, FrameError::UnterminatedHeaders));
}

#[tokio::test]
async fn test_short_body_is_an_error() {
    let mut input: &[u8] = b"ECHO / CHLP/1.0\nBody-Size: 10\n\nabc";

    let err = decode_request(&mut input, LIMIT).await.unwrap_err();
    assert!(matches!(
        err,
        FrameError::ShortBody {
            expected: 10,
            received: 3
        }
    ));
}

#[tokio::test]
async fn test_body_read_across_fragments() {
    let mut stream = tokio_test::io::Builder::new()
        .read(b"he")
        .read(b"llo w")
        .read(b"orld")
        .build();

    let body = read_body(&mut stream, 11, LIMIT).await.unwrap();
    assert_eq!(body, b"hello world");
}

#[tokio::test]
async fn test_headers_block_reports_termination() {
    let mut complete: &[u8] = b"A: 1\n\n";
    assert!(read_headers(&mut complete).await.unwrap().terminated);

    let mut cut: &[u8] = b"A: 1\n";
    let block = read_headers(&mut cut).await.unwrap();
    assert!(!block.terminated);
    assert_eq!(block.headers.get("a"), Some("1"));
}

#[tokio::test]
async fn test_decode_response_with_free_text_reason() {
    let mut input: &[u8] = b"CHLP/1.0 500 Internal Server Error\nBody-Size: 0\n\n";

    let response = decode_response(&mut input, LIMIT).await.unwrap();
    let status = response.status_line.unwrap();

    assert_eq!(status.version, "CHLP/1.0");
    assert_eq!(status.code, 500);
    assert_eq!(status.reason, "Internal Server Error");
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_decode_response_tolerates_cut_header_block() {
    let mut input: &[u8] = b"CHLP/1.0 200 OK\nServer: x\n";

    let response = decode_response(&mut input, LIMIT).await.unwrap();
    assert_eq!(response.raw_status_line, "CHLP/1.0 200 OK");
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_decode_response_without_any_bytes() {
    let mut input: &[u8] = b"";

    let err = decode_response(&mut input, LIMIT).await.unwrap_err();
    assert!(matches!(err, FrameError::NoResponse));
}
