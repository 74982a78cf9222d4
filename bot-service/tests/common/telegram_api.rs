//! A local stand-in for the Telegram Bot API. Records every method call in
//! arrival order and can be told to reject `sendMessage` for one chat.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{body::Bytes, extract::State, http::Uri, Json, Router};
use serde_json::{json, Value};
use teloxide::Bot;

#[derive(Debug, Clone)]
pub struct ApiCall {
    /// Lowercased method name, e.g. `sendmessage`.
    pub method: String,
    pub payload: Value,
}

impl ApiCall {
    pub fn chat_id(&self) -> Option<i64> {
        self.payload.get("chat_id").and_then(Value::as_i64)
    }

    pub fn text(&self) -> Option<&str> {
        self.payload.get("text").and_then(Value::as_str)
    }
}

#[derive(Clone, Default)]
struct ApiState {
    calls: Arc<Mutex<Vec<ApiCall>>>,
    unreachable_chat: Option<i64>,
}

pub struct MockTelegramApi {
    pub addr: SocketAddr,
    state: ApiState,
}

impl MockTelegramApi {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(None).await
    }

    /// `sendMessage` to `chat_id` answers with "chat not found".
    pub async fn with_unreachable_chat(chat_id: u64) -> anyhow::Result<Self> {
        Self::start_with(Some(chat_id as i64)).await
    }

    async fn start_with(unreachable_chat: Option<i64>) -> anyhow::Result<Self> {
        let state = ApiState {
            calls: Arc::default(),
            unreachable_chat,
        };

        let app = Router::new()
            .fallback(handle_method)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state })
    }

    pub fn bot(&self) -> anyhow::Result<Bot> {
        let url = reqwest::Url::parse(&format!("http://{}/", self.addr))?;
        Ok(Bot::new("123456:test-token").set_api_url(url))
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.method).collect()
    }

    /// `(chat_id, text)` of every `sendMessage`, in arrival order.
    pub fn sent_messages(&self) -> Vec<(i64, String)> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == "sendmessage")
            .filter_map(|call| Some((call.chat_id()?, call.text()?.to_string())))
            .collect()
    }
}

async fn handle_method(State(state): State<ApiState>, uri: Uri, body: Bytes) -> Json<Value> {
    let method = uri
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let call = ApiCall {
        method: method.clone(),
        payload,
    };
    let chat_id = call.chat_id();
    let text = call.text().unwrap_or_default().to_string();
    state.calls.lock().unwrap().push(call);

    if method != "sendmessage" {
        return Json(json!({ "ok": true, "result": true }));
    }

    if chat_id.is_some() && chat_id == state.unreachable_chat {
        return Json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        }));
    }

    Json(json!({
        "ok": true,
        "result": {
            "message_id": 1,
            "date": 1700000000,
            "chat": { "id": chat_id.unwrap_or_default(), "type": "private", "first_name": "Test" },
            "text": text
        }
    }))
}
