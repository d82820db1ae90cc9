//! Tests for the HTTP server over a real socket

use std::sync::Arc;

use chirpdb::network::Server;
use chirpdb::{Config, DocumentStore};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

async fn raw_request(addr: std::net::SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8(response).unwrap()
}

#[tokio::test]
async fn test_server_serves_and_shuts_down() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .db_path(temp_dir.path().join("db.json"))
        .listen_addr("127.0.0.1:0")
        .build();
    let store = Arc::new(DocumentStore::open(config).unwrap());
    store.ensure_initialized().unwrap();

    let server = Server::bind(Arc::clone(&store)).await.unwrap();
    let addr = server.local_addr().unwrap();
    assert_ne!(addr.port(), 0);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.run_until(async move {
        let _ = shutdown_rx.await;
    }));

    let response = raw_request(
        addr,
        "GET /ping HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 200"), "got: {}", response);
    assert!(response.contains(r#"{"status":"ok"}"#));

    let body = r#"{"email":"a@x.com","password":"pw","name":"A","age":5}"#;
    let request = format!(
        "POST /users HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let response = raw_request(addr, &request).await;
    assert!(response.starts_with("HTTP/1.1 201"), "got: {}", response);
    assert_eq!(store.get_user("a@x.com").unwrap().age, 5);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
