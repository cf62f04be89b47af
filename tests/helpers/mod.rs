use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

type Handler = dyn Fn(&Value) -> (u16, Value) + Send + Sync;

/// Minimal stand-in for a running AnkiConnect add-on.
///
/// Every POST body is decoded as JSON, recorded, and answered by `handler`
/// with a status code and a JSON body. One request per connection.
#[allow(dead_code)]
pub struct StubAnki {
    pub url: String,
    requests: Arc<Mutex<Vec<Value>>>,
    _server: JoinHandle<()>,
}

#[allow(dead_code)]
impl StubAnki {
    pub async fn start<F>(handler: F) -> Result<Self>
    where
        F: Fn(&Value) -> (u16, Value) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind stub server")?;
        let url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let recorded = Arc::clone(&requests);
        let server = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let handler = Arc::clone(&handler);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let _ = serve(stream, handler, recorded).await;
                });
            }
        });

        Ok(Self {
            url,
            requests,
            _server: server,
        })
    }

    /// Decoded request bodies, in arrival order
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    /// Actions of all received requests, in arrival order
    pub fn actions(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r["action"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

async fn serve(
    mut stream: TcpStream,
    handler: Arc<Handler>,
    recorded: Arc<Mutex<Vec<Value>>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let body_start = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..body_start]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = buf.len().min(body_start + content_length);
    let body: Value = serde_json::from_slice(&buf[body_start..end]).unwrap_or(Value::Null);
    recorded.lock().unwrap().push(body.clone());

    let (status, reply) = handler(&body);
    let text = reply.to_string();
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        text.len(),
        text
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}

/// AnkiConnect success envelope
#[allow(dead_code)]
pub fn ok(result: Value) -> (u16, Value) {
    (200, json!({ "result": result, "error": null }))
}

/// AnkiConnect error envelope
#[allow(dead_code)]
pub fn api_error(message: &str) -> (u16, Value) {
    (200, json!({ "result": null, "error": message }))
}

/// `cardsInfo` entry shaped like AnkiConnect's reply
#[allow(dead_code)]
pub fn card_info(card_id: i64, deck: &str, fields: &[(&str, &str)]) -> Value {
    let mut field_map = serde_json::Map::new();
    for (order, (name, value)) in fields.iter().enumerate() {
        field_map.insert(name.to_string(), json!({ "value": value, "order": order }));
    }
    json!({
        "cardId": card_id,
        "note": card_id + 1000,
        "deckName": deck,
        "modelName": "Basic",
        "question": "",
        "answer": "",
        "fields": field_map,
    })
}

/// A local address nothing listens on
#[allow(dead_code)]
pub async fn unused_endpoint() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}
