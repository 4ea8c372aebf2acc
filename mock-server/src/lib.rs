use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
pub struct CreateNote {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

pub type Db = Arc<RwLock<Vec<Note>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/greeting", get(greeting))
        .route("/echo", get(echo).post(echo))
        .route("/headers", get(headers))
        .route("/empty", get(empty).post(empty))
        .route("/text", get(text))
        .route("/notes", get(list_notes).post(create_note))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn greeting() -> Json<Greeting> {
    Json(Greeting {
        message: "hello".to_string(),
    })
}

async fn echo(Json(input): Json<serde_json::Value>) -> Json<serde_json::Value> {
    Json(input)
}

/// Reflect request headers back as a JSON object keyed by lowercase name.
async fn headers(headers: HeaderMap) -> Json<BTreeMap<String, String>> {
    Json(
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect(),
    )
}

async fn empty() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn text() -> &'static str {
    "this is not json"
}

async fn list_notes(State(db): State<Db>) -> Json<Vec<Note>> {
    Json(db.read().await.clone())
}

async fn create_note(
    State(db): State<Db>,
    Json(input): Json<CreateNote>,
) -> (StatusCode, Json<Note>) {
    let mut notes = db.write().await;
    let note = Note {
        id: notes.len() as u64 + 1,
        title: input.title,
        body: input.body,
    };
    notes.push(note.clone());
    (StatusCode::CREATED, Json(note))
}
