use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

struct TestServer {
    process: Child,
}

impl TestServer {
    /// Start the compiled binary serving `root` on 127.0.0.1:`port`.
    fn spawn(root: &Path, port: u16) -> Self {
        let bin_path = env!("CARGO_BIN_EXE_spa-server");

        let process = Command::new(bin_path)
            .env("SERVER_LISTEN_HOST", "127.0.0.1")
            .env("SERVER_LISTEN_PORT", port.to_string())
            .env("SERVER_SITE_ROOT", root)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to start server");

        Self { process }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

async fn wait_for_server(url: &str) {
    let client = reqwest::Client::new();
    for _ in 0..50 {
        if client.get(url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("Timeout waiting for server at {url}");
}

/// A site root with an entry-point document and one asset.
fn spa_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>spa shell</html>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log(\"boot\");").unwrap();
    dir
}

#[tokio::test]
async fn test_existing_file_round_trip() {
    let root = spa_root();
    let _server = TestServer::spawn(root.path(), 18431);
    wait_for_server("http://127.0.0.1:18431/").await;

    let resp = reqwest::get("http://127.0.0.1:18431/app.js").await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"].to_str().unwrap(),
        "application/javascript"
    );
    let body = resp.bytes().await.unwrap();
    assert_eq!(&body[..], b"console.log(\"boot\");" as &[u8]);
}

#[tokio::test]
async fn test_unknown_route_falls_back_to_root_document() {
    let root = spa_root();
    let _server = TestServer::spawn(root.path(), 18432);
    wait_for_server("http://127.0.0.1:18432/").await;

    let index = reqwest::get("http://127.0.0.1:18432/")
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();

    let fallback = reqwest::get("http://127.0.0.1:18432/settings/profile/42")
        .await
        .unwrap();
    assert_eq!(fallback.status(), 200);
    assert_eq!(fallback.bytes().await.unwrap(), index);
}

#[tokio::test]
async fn test_root_serves_index_document() {
    let root = spa_root();
    let _server = TestServer::spawn(root.path(), 18433);
    wait_for_server("http://127.0.0.1:18433/").await;

    let resp = reqwest::get("http://127.0.0.1:18433/").await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(&resp.bytes().await.unwrap()[..], b"<html>spa shell</html>" as &[u8]);
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let root = spa_root();
    let _server = TestServer::spawn(root.path(), 18434);
    wait_for_server("http://127.0.0.1:18434/").await;

    let first = reqwest::get("http://127.0.0.1:18434/app.js").await.unwrap();
    let first_status = first.status();
    let first_body = first.bytes().await.unwrap();

    let second = reqwest::get("http://127.0.0.1:18434/app.js").await.unwrap();
    assert_eq!(second.status(), first_status);
    assert_eq!(second.bytes().await.unwrap(), first_body);
}

#[tokio::test]
async fn test_missing_root_document_is_404() {
    let root = tempfile::tempdir().unwrap();
    let _server = TestServer::spawn(root.path(), 18435);
    wait_for_server("http://127.0.0.1:18435/").await;

    let resp = reqwest::get("http://127.0.0.1:18435/anything").await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_head_omits_body() {
    let root = spa_root();
    let _server = TestServer::spawn(root.path(), 18436);
    wait_for_server("http://127.0.0.1:18436/").await;

    let client = reqwest::Client::new();
    let resp = client
        .head("http://127.0.0.1:18436/app.js")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-length"].to_str().unwrap(),
        b"console.log(\"boot\");".len().to_string()
    );
    assert!(resp.bytes().await.unwrap().is_empty());
}

/// URL clients normalize `..` away, so the traversal request goes over a raw
/// socket. The server must answer with the fallback document, never the file
/// outside the root.
#[tokio::test]
async fn test_traversal_cannot_escape_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("site");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("index.html"), "<html>spa shell</html>").unwrap();
    std::fs::write(dir.path().join("secret.txt"), "top secret").unwrap();

    let _server = TestServer::spawn(&root, 18437);
    wait_for_server("http://127.0.0.1:18437/").await;

    let mut stream = tokio::net::TcpStream::connect("127.0.0.1:18437")
        .await
        .unwrap();
    stream
        .write_all(b"GET /../secret.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let response = String::from_utf8_lossy(&raw);

    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.contains("spa shell"));
    assert!(!response.contains("top secret"));
}

#[tokio::test]
async fn test_bind_conflict_exits_nonzero() {
    let root = spa_root();
    let _first = TestServer::spawn(root.path(), 18438);
    wait_for_server("http://127.0.0.1:18438/").await;

    let mut second = TestServer::spawn(root.path(), 18438);
    for _ in 0..100 {
        if let Ok(Some(status)) = second.process.try_wait() {
            assert!(!status.success());
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("Second server did not exit on bind conflict");
}
