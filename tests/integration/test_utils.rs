//! Shared helpers: a scripted generation client and a loopback HTTP stub.

use aplus::error::ApiError;
use aplus::provider::{CredentialSlot, GenerationClient};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serializes tests that change configuration environment variables
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Variables that feed the config loader, captured and restored around a test
fn config_env_keys() -> Vec<String> {
    let mut keys: Vec<String> = std::env::vars()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with("APLUS_"))
        .collect();
    keys.push("OLLAMA_API_URL".to_string());
    keys.push("XDG_CONFIG_HOME".to_string());
    keys
}

/// Run `f` with only `vars` set among the config loader's environment inputs.
///
/// `XDG_CONFIG_HOME` points at an empty temp dir so no global config file applies.
/// The original environment is restored afterwards.
pub fn with_config_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let config_home = TempDir::new().unwrap();

    let saved: Vec<(String, Option<String>)> = config_env_keys()
        .into_iter()
        .map(|key| {
            let value = std::env::var(&key).ok();
            (key, value)
        })
        .collect();
    for (key, _) in &saved {
        std::env::remove_var(key);
    }
    std::env::set_var("XDG_CONFIG_HOME", config_home.path());
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f();

    for key in config_env_keys() {
        std::env::remove_var(key);
    }
    for (key, value) in saved {
        if let Some(value) = value {
            std::env::set_var(key, value);
        }
    }
    result
}

/// Scripted reply for one prompt
#[derive(Clone)]
pub struct Reply {
    pub delay: Duration,
    pub outcome: Result<String, u16>,
}

impl Reply {
    pub fn ok(text: &str, delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            outcome: Ok(text.to_string()),
        }
    }

    pub fn status(status: u16, delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            outcome: Err(status),
        }
    }
}

/// Generation client answering from a script, with per-prompt delays. Tracks how
/// many calls were in flight at once.
#[derive(Default)]
pub struct ScriptedClient {
    credential: CredentialSlot,
    replies: HashMap<String, Reply>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<Vec<(String, u32)>>,
    completed: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, prompt: &str, reply: Reply) -> Self {
        self.replies.insert(prompt.to_string(), reply);
        self
    }

    pub fn with_credential(self) -> Self {
        self.credential.set("sk-integration-test").unwrap();
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().clone()
    }

    /// Prompts in the order their calls finished
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    fn set_credential(&self, raw: &str) -> Result<(), ApiError> {
        self.credential.set(raw)
    }

    fn has_credential(&self) -> bool {
        self.credential.is_set()
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ApiError> {
        self.calls.lock().push((prompt.to_string(), max_tokens));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let reply = self
            .replies
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| Reply::ok(&format!("generated: {}", prompt), 0));
        tokio::time::sleep(reply.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.lock().push(prompt.to_string());
        match reply.outcome {
            Ok(text) => Ok(text),
            Err(status) => Err(ApiError::ProviderStatus {
                status,
                message: "scripted failure".to_string(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// One-shot loopback HTTP server. Answers every request with the same response and
/// records raw requests.
pub struct StubServer {
    pub url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

pub async fn spawn_stub(status: u16, body: &'static str) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let request = read_request(&mut socket).await;
            recorded.lock().push(request);
            let reason = match status {
                200 => "OK",
                401 => "Unauthorized",
                500 => "Internal Server Error",
                _ => "Status",
            };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    StubServer {
        url: format!("http://{}/v1/llama", addr),
        requests,
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.trim()
                        .eq_ignore_ascii_case("content-length")
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
