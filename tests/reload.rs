//! Reload triggers against a running server.

use std::path::Path;
use std::time::Duration;

use static_server::admin::RELOAD_OK_BODY;
use static_server::config::{ConfigWatcher, Reloader};

mod common;

use common::{get, start_server, yaml_config, Fixture};

#[tokio::test]
async fn test_reload_endpoint_applies_new_mapping() {
    let fixture = Fixture::new();
    fixture.write("siteA/page.txt", "site A");
    fixture.write("siteB/page.txt", "site B");
    fixture.write_config(&yaml_config(&[("a.com", &fixture.path("siteA"))]));

    let server = start_server(&fixture, |s| s.reload_endpoint = true).await;
    assert_eq!(get(&server, "a.com", "/page.txt").await.1, "site A");

    fixture.write_config(&yaml_config(&[("a.com", &fixture.path("siteB"))]));
    assert_eq!(
        get(&server, "a.com", "/reload").await,
        (200, RELOAD_OK_BODY.into())
    );
    assert_eq!(get(&server, "a.com", "/page.txt").await.1, "site B");
}

#[tokio::test]
async fn test_reload_endpoint_failure_keeps_config() {
    let fixture = Fixture::new();
    fixture.write("siteA/page.txt", "site A");
    fixture.write_config(&yaml_config(&[("a.com", &fixture.path("siteA"))]));

    let server = start_server(&fixture, |s| s.reload_endpoint = true).await;
    let before = server.store.get();

    fixture.write_config("host: [not, a, map\n");
    let (status, body) = get(&server, "a.com", "/reload").await;
    assert_eq!(status, 500);
    assert!(body.starts_with("Error reloading config"), "body: {body}");

    assert_eq!(*server.store.get(), *before);
    assert_eq!(get(&server, "a.com", "/page.txt").await, (200, "site A".into()));

    std::fs::remove_file(&fixture.config_path).unwrap();
    assert_eq!(get(&server, "a.com", "/reload").await.0, 500);
    assert_eq!(get(&server, "a.com", "/page.txt").await.1, "site A");
}

#[tokio::test]
async fn test_reload_twice_is_idempotent() {
    let fixture = Fixture::new();
    fixture.write_config(&yaml_config(&[("a.com", &fixture.path("siteA"))]));

    let server = start_server(&fixture, |s| s.reload_endpoint = true).await;

    assert_eq!(get(&server, "x", "/reload").await.0, 200);
    let first = server.store.get();
    assert_eq!(get(&server, "x", "/reload").await.0, 200);
    assert_eq!(*server.store.get(), *first);
}

#[tokio::test]
async fn test_reload_endpoint_disabled_by_default() {
    let fixture = Fixture::new();
    fixture.write("public/reload", "just a file");

    let server = start_server(&fixture, |_| {}).await;

    assert_eq!(get(&server, "a.com", "/reload").await, (200, "just a file".into()));
}

#[tokio::test]
async fn test_watcher_reload_reaches_requests() {
    let fixture = Fixture::new();
    fixture.write("siteA/page.txt", "site A");
    fixture.write("siteB/page.txt", "site B");
    fixture.write_config(&yaml_config(&[("a.com", &fixture.path("siteA"))]));

    let server = start_server(&fixture, |_| {}).await;
    let _watcher =
        ConfigWatcher::spawn(Reloader::new(&fixture.config_path, server.store.clone())).unwrap();

    fixture.write_config(&yaml_config(&[("a.com", &fixture.path("siteB"))]));

    let target = fixture.path("siteB");
    let mut switched = false;
    for _ in 0..100 {
        if server.store.get().directory_for("a.com") == Some(Path::new(&target)) {
            switched = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(switched, "watcher did not publish the new mapping");
    assert_eq!(get(&server, "a.com", "/page.txt").await.1, "site B");
}
