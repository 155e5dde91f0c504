//! Integration tests for the fetch driver against a local mock server.

use std::time::Duration;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sndl::download::ConnectionState;
use sndl::{Connection, FetchDriver, ReconnectPolicy, parse_target};

/// Builds a driver writing into `dir`, with a zero-second reconnect wait so
/// failure tests finish instantly.
fn driver_for(target: &sndl::ParsedTarget, dir: &TempDir) -> FetchDriver {
    let connection = Connection::open(target, 5, 5).unwrap();
    let policy = ReconnectPolicy::new(Duration::ZERO);
    FetchDriver::new(connection, policy, dir.path().to_path_buf())
}

async fn mount_file(server: &MockServer, remote_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(remote_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_sequence_downloads_every_file_in_order() {
    let server = MockServer::start().await;
    mount_file(&server, "/file1.bin", "first").await;
    mount_file(&server, "/file2.bin", "second").await;
    mount_file(&server, "/file3.bin", "third").await;

    let target = parse_target(&format!("{}/file[1-3].bin", server.uri())).unwrap();
    let dir = TempDir::new().unwrap();
    let mut driver = driver_for(&target, &dir);

    let stats = driver.run(&target).await.unwrap();

    assert_eq!(stats.completed(), 3);
    assert_eq!(stats.failed(), 0);
    assert_eq!(stats.reconnects(), 0);

    let second = std::fs::read_to_string(dir.path().join("file2.bin")).unwrap();
    assert_eq!(second, "second");
    assert!(dir.path().join("file1.bin").exists());
    assert!(dir.path().join("file3.bin").exists());
}

#[tokio::test]
async fn test_zero_padded_range_preserves_width_in_filenames() {
    let server = MockServer::start().await;
    mount_file(&server, "/img0001.png", "a").await;
    mount_file(&server, "/img0002.png", "b").await;
    mount_file(&server, "/img0003.png", "c").await;

    let target = parse_target(&format!("{}/img[0001-0003].png", server.uri())).unwrap();
    let dir = TempDir::new().unwrap();
    let mut driver = driver_for(&target, &dir);

    let stats = driver.run(&target).await.unwrap();

    assert_eq!(stats.completed(), 3);
    assert!(dir.path().join("img0001.png").exists());
    assert!(dir.path().join("img0003.png").exists());
}

#[tokio::test]
async fn test_missing_file_mid_sequence_continues_without_reconnect() {
    let server = MockServer::start().await;
    mount_file(&server, "/file1.bin", "first").await;
    // /file2.bin is not mounted; wiremock answers 404.
    mount_file(&server, "/file3.bin", "third").await;

    let target = parse_target(&format!("{}/file[1-3].bin", server.uri())).unwrap();
    let dir = TempDir::new().unwrap();
    let mut driver = driver_for(&target, &dir);

    let stats = driver.run(&target).await.unwrap();

    // A clean error status fails the item but does not implicate the
    // connection, so the sequence continues with no reconnect wait.
    assert_eq!(stats.completed(), 2);
    assert_eq!(stats.failed(), 1);
    assert_eq!(stats.reconnects(), 0);
    assert_eq!(driver.connection().state(), ConnectionState::Connected);

    assert!(dir.path().join("file1.bin").exists());
    assert!(!dir.path().join("file2.bin").exists());
    assert!(dir.path().join("file3.bin").exists());
}

#[tokio::test]
async fn test_mixed_tokens_download_only_listed_numbers() {
    let server = MockServer::start().await;
    mount_file(&server, "/c1.jpg", "one").await;
    mount_file(&server, "/c3.jpg", "three").await;
    mount_file(&server, "/c4.jpg", "four").await;

    let target = parse_target(&format!("{}/c[1,3-4].jpg", server.uri())).unwrap();
    let dir = TempDir::new().unwrap();
    let mut driver = driver_for(&target, &dir);

    let stats = driver.run(&target).await.unwrap();

    assert_eq!(stats.completed(), 3);
    assert!(dir.path().join("c1.jpg").exists());
    assert!(!dir.path().join("c2.jpg").exists());
    assert!(dir.path().join("c3.jpg").exists());
    assert!(dir.path().join("c4.jpg").exists());
}

#[tokio::test]
async fn test_reversed_range_downloads_ascending() {
    let server = MockServer::start().await;
    mount_file(&server, "/a1.jpg", "x").await;
    mount_file(&server, "/a2.jpg", "y").await;
    mount_file(&server, "/a3.jpg", "z").await;

    let target = parse_target(&format!("{}/a[3-1].jpg", server.uri())).unwrap();
    let dir = TempDir::new().unwrap();
    let mut driver = driver_for(&target, &dir);

    let stats = driver.run(&target).await.unwrap();

    assert_eq!(stats.completed(), 3);
    assert_eq!(stats.failed(), 0);
}

#[tokio::test]
async fn test_timeout_mid_sequence_reconnects_before_next_item() {
    let server = MockServer::start().await;
    mount_file(&server, "/f1.bin", "one").await;
    Mock::given(method("GET"))
        .and(path("/f2.bin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("slow")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    mount_file(&server, "/f3.bin", "three").await;

    let target = parse_target(&format!("{}/f[1-3].bin", server.uri())).unwrap();
    let dir = TempDir::new().unwrap();
    // One-second read timeout so the delayed item dies quickly.
    let connection = Connection::open(&target, 5, 1).unwrap();
    let mut driver = FetchDriver::new(
        connection,
        ReconnectPolicy::new(Duration::ZERO),
        dir.path().to_path_buf(),
    );

    let stats = driver.run(&target).await.unwrap();

    // The timed-out item fails, the reconnect wait runs before the next
    // item, and that item still downloads over the rebuilt connection.
    assert_eq!(stats.completed(), 2);
    assert_eq!(stats.failed(), 1);
    assert_eq!(stats.reconnects(), 1);
    assert_eq!(driver.connection().state(), ConnectionState::Connected);

    assert!(dir.path().join("f1.bin").exists());
    assert!(!dir.path().join("f2.bin").exists());
    assert!(dir.path().join("f3.bin").exists());
}

#[tokio::test]
async fn test_existing_file_is_overwritten_fresh() {
    let server = MockServer::start().await;
    mount_file(&server, "/a7.jpg", "new").await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a7.jpg"), "stale content from a past run").unwrap();

    let target = parse_target(&format!("{}/a[7].jpg", server.uri())).unwrap();
    let mut driver = driver_for(&target, &dir);

    let stats = driver.run(&target).await.unwrap();

    assert_eq!(stats.completed(), 1);
    let body = std::fs::read_to_string(dir.path().join("a7.jpg")).unwrap();
    assert_eq!(body, "new");
}
