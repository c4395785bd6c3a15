//! Integration tests for AI drafts.
//!
//! Most tests run against a one-shot HTTP stub on localhost, so they need
//! no network. `test_live_gemini_draft` hits the real API and skips when no
//! GEMINI_API_KEY is available (loaded from .env.local like the app).

use direct_chat_lib::composer::{self, Composer};
use direct_chat_lib::history::{MemoryStorage, RecencyStore};
use direct_chat_lib::llm::{DraftOutcome, DraftWriter, MessageTone, FALLBACK_MESSAGE};
use direct_chat_lib::ComposeError;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one HTTP response and hand back the raw request.
async fn stub_server(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (base_url, handle)
}

/// Read headers, then as many body bytes as content-length announces.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn composer_with_topic(topic: &str) -> Mutex<Composer> {
    let mut composer = Composer::new(RecencyStore::load(MemoryStorage::new()));
    composer.set_topic(topic);
    composer.set_message("draft typed by hand");
    Mutex::new(composer)
}

#[tokio::test]
async fn test_generated_text_is_returned_verbatim() {
    let (base_url, server) = stub_server(
        "200 OK",
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"صباح الخير يا صديقي ☀️\n"}]}}]}"#,
    )
    .await;

    let writer = DraftWriter::with_endpoint(base_url, "test-key");
    let outcome = writer.generate("تحية صباحية", MessageTone::Friendly).await;
    assert_eq!(
        outcome,
        DraftOutcome::Generated("صباح الخير يا صديقي ☀️\n".to_string())
    );

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("POST /v1beta/models/"));
    assert!(request_line.contains(":generateContent?key=test-key"));
    assert!(request.contains("\"temperature\":0.7"));
    assert!(request.contains("\"topP\":0.9"));
    assert!(request.contains("friendly"));
    assert!(request.contains("تحية صباحية"));
}

#[tokio::test]
async fn test_empty_response_falls_back() {
    let (base_url, server) = stub_server("200 OK", r#"{"candidates":[]}"#).await;
    let writer = DraftWriter::with_endpoint(base_url, "test-key");

    let outcome = writer.generate("موعد", MessageTone::Short).await;
    assert!(outcome.is_fallback());
    assert_eq!(outcome.into_text(), FALLBACK_MESSAGE);
    server.await.unwrap();
}

#[tokio::test]
async fn test_http_error_falls_back() {
    let (base_url, server) = stub_server(
        "429 Too Many Requests",
        r#"{"error":{"code":429,"message":"quota"}}"#,
    )
    .await;
    let writer = DraftWriter::with_endpoint(base_url, "test-key");

    let outcome = writer.generate("موعد", MessageTone::Funny).await;
    assert!(outcome.is_fallback());
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_host_falls_back() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let writer = DraftWriter::with_endpoint(format!("http://127.0.0.1:{}", port), "test-key");

    let outcome = writer.generate("موعد", MessageTone::Professional).await;
    assert_eq!(outcome, DraftOutcome::Fallback);
}

#[tokio::test]
async fn test_composer_overwrites_body_with_draft() {
    let (base_url, server) = stub_server(
        "200 OK",
        r#"{"candidates":[{"content":{"parts":[{"text":"نرجو تزويدنا بعرض سعر."}]}}]}"#,
    )
    .await;
    let writer = DraftWriter::with_endpoint(base_url, "test-key");
    let state = composer_with_topic("طلب عرض سعر");

    let text = composer::request_ai_draft(&state, &writer, MessageTone::Professional)
        .await
        .unwrap();
    assert_eq!(text, "نرجو تزويدنا بعرض سعر.");

    let composer = state.lock().unwrap();
    assert_eq!(composer.draft().message, "نرجو تزويدنا بعرض سعر.");
    assert!(!composer.is_generating());
    server.await.unwrap();
}

#[tokio::test]
async fn test_blank_topic_never_calls_the_service() {
    // Unroutable endpoint: reaching it would fall back, not error.
    let writer = DraftWriter::with_endpoint("http://127.0.0.1:9", "test-key");
    let state = composer_with_topic("  \n ");

    let err = composer::request_ai_draft(&state, &writer, MessageTone::Short)
        .await
        .unwrap_err();
    assert_eq!(err, ComposeError::EmptyTopic);
    assert_eq!(state.lock().unwrap().draft().message, "draft typed by hand");
}

#[tokio::test]
async fn test_aborted_request_releases_the_ai_slot() {
    // Accepts the connection and never answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        std::future::pending::<()>().await;
        drop(socket);
    });

    let writer = DraftWriter::with_endpoint(base_url, "test-key");
    let state = Arc::new(composer_with_topic("تذكير بموعد"));
    let request = tokio::spawn({
        let state = Arc::clone(&state);
        async move { composer::request_ai_draft(&state, &writer, MessageTone::Short).await }
    });

    while !state.lock().unwrap().is_generating() {
        tokio::task::yield_now().await;
    }
    // Let the request reach the stub before cancelling it.
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    request.abort();
    assert!(request.await.unwrap_err().is_cancelled());

    let composer = state.lock().unwrap();
    assert!(!composer.is_generating());
    assert_eq!(composer.draft().message, "draft typed by hand");
    drop(composer);

    assert!(
        state.lock().unwrap().begin_ai_draft().is_ok(),
        "slot should be free again"
    );
    server.abort();
}

#[tokio::test]
async fn test_live_gemini_draft() {
    direct_chat_lib::load_env();

    let key_present = std::env::var("GEMINI_API_KEY")
        .map(|k| !k.is_empty())
        .unwrap_or(false);
    if !key_present {
        eprintln!("SKIP: No GEMINI_API_KEY");
        return;
    }

    let writer = DraftWriter::new();
    let start = std::time::Instant::now();
    let outcome = writer.generate("تهنئة بمناسبة العيد", MessageTone::Friendly).await;
    eprintln!("[TEST] Draft returned in {}ms", start.elapsed().as_millis());

    assert!(
        !outcome.is_fallback(),
        "Draft returned FALLBACK: the API call failed!"
    );
    let text = outcome.into_text();
    eprintln!("[TEST] Draft: {}", text);
    assert!(!text.trim().is_empty());
}
