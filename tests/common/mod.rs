//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::HOST;
use static_server::config::{load_config, ConfigStore, Reloader, ServerSettings};
use static_server::http::HttpServer;
use static_server::lifecycle::Shutdown;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// On-disk fixture: a config file plus a default root, all in one temp dir.
pub struct Fixture {
    pub dir: TempDir,
    pub config_path: PathBuf,
    pub default_root: PathBuf,
}

impl Fixture {
    /// Starts with an empty mapping; call [`Fixture::write_config`] to fill it.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.yml");
        let default_root = dir.path().join("public");
        fs::create_dir_all(&default_root).unwrap();
        fs::write(&config_path, "host: {}\n").unwrap();
        Self {
            dir,
            config_path,
            default_root,
        }
    }

    /// Absolute path of `relative` inside the fixture.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).unwrap();
    }
}

/// A running server bound to an ephemeral port; shuts down on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: ConfigStore,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_server<F>(fixture: &Fixture, customize: F) -> TestServer
where
    F: FnOnce(&mut ServerSettings),
{
    let mut settings = ServerSettings {
        config_path: fixture.config_path.clone(),
        default_root: fixture.default_root.clone(),
        watch: false,
        ..ServerSettings::default()
    };
    customize(&mut settings);

    let store = ConfigStore::new(load_config(&settings.config_path).unwrap());
    let reloader = Reloader::new(settings.config_path.clone(), store.clone());
    let server = HttpServer::new(&settings, reloader);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        store,
        shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

/// GET `path` with the given Host header; returns status and body.
pub async fn get(server: &TestServer, host: &str, path: &str) -> (u16, String) {
    let res = client()
        .get(server.url(path))
        .header(HOST, host)
        .send()
        .await
        .expect("server unreachable");
    let status = res.status().as_u16();
    (status, res.text().await.unwrap())
}

/// YAML document mapping each host to a directory.
pub fn yaml_config(entries: &[(&str, &Path)]) -> String {
    let mut doc = String::from("host:\n");
    for (host, dir) in entries {
        doc.push_str(&format!("  {}: {:?}\n", host, dir.display().to_string()));
    }
    doc
}
