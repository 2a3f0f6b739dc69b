//! Throw-away HTTP responder for exercising the article client.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Answer `count` requests with the same canned response.
///
/// Returns the base URL to point a client at and a handle resolving to the
/// request line of every request received, in order.
pub async fn serve(
    count: usize,
    status_line: &'static str,
    body: &'static str,
) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut request_lines = Vec::new();
        for _ in 0..count {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            let request = String::from_utf8_lossy(&buf);
            request_lines.push(request.lines().next().unwrap_or_default().to_string());
        }
        request_lines
    });

    (format!("http://{addr}"), handle)
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
