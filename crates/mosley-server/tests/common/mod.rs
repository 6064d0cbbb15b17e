use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Value, json};

use mosley_server::build_app;
use mosley_server::config::{AuthFileConfig, ServerConfig};

pub struct TestServer {
    pub addr: SocketAddr,
    client: reqwest::Client,
    token: Option<String>,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a memory-only test server with no auth.
    pub async fn new() -> Self {
        Self::from_config(ServerConfig::default()).await
    }

    /// Start a test server that requires `token`.
    pub async fn with_auth(token: &str) -> Self {
        let config = ServerConfig {
            auth: AuthFileConfig {
                bearer_token: Some(token.to_string()),
            },
            ..ServerConfig::default()
        };
        let mut server = Self::from_config(config).await;
        server.token = Some(token.to_string());
        server
    }

    /// Start a test server persisting to `dir`.
    pub async fn with_data_dir(dir: &Path) -> Self {
        let config = ServerConfig {
            data_dir: Some(dir.to_string_lossy().into_owned()),
            ..ServerConfig::default()
        };
        Self::from_config(config).await
    }

    async fn from_config(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (app, _state) = build_app(config).unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            client: reqwest::Client::new(),
            token: None,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url())
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET `path`, returning the status and JSON body.
    pub async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self
            .authorize(self.client.get(self.url(path)))
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap_or(Value::Null))
    }

    /// POST `body` to `path`, returning the status and JSON body.
    pub async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .authorize(self.client.post(self.url(path)))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap_or(Value::Null))
    }

    pub async fn delete(&self, path: &str) -> u16 {
        self.authorize(self.client.delete(self.url(path)))
            .send()
            .await
            .unwrap()
            .status()
            .as_u16()
    }

    /// Register the all-par-4 test course.
    pub async fn add_flat_course(&self) {
        let (status, _) = self.post("/courses", flat_course_json()).await;
        assert_eq!(status, 201);
    }

    pub async fn enter(&self, name: &str, handicap: i64) {
        let (status, body) = self
            .post("/competitors", json!({ "name": name, "handicap": handicap }))
            .await;
        assert!(status == 201 || status == 200, "enter {name}: {body}");
    }

    /// Submit eighteen holes of `strokes` on the test course.
    pub async fn submit(&self, name: &str, day: u8, strokes: i32) -> (u16, Value) {
        self.post(
            "/rounds",
            json!({
                "competitor": name,
                "day": format!("Day {day}"),
                "course": FLAT_COURSE,
                "scores": vec![strokes; 18],
            }),
        )
        .await
    }
}

pub const FLAT_COURSE: &str = "Flat Meadows";

pub fn flat_course_json() -> Value {
    json!({
        "name": FLAT_COURSE,
        "par": vec![4; 18],
        "difficulty": (1..=18).collect::<Vec<u8>>(),
    })
}

/// A scratch directory removed on drop.
pub struct TempDir(pub PathBuf);

impl TempDir {
    pub fn new() -> Self {
        let name = format!("mosley-server-{}", uuid::Uuid::new_v4());
        Self(std::env::temp_dir().join(name))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
