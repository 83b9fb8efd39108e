use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

mod seed;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

/// Seeded users. Writes are answered as if applied but never stored, so the
/// data is read-only.
pub type Db = Arc<BTreeMap<u32, User>>;

pub fn app() -> Router {
    let db: Db = Arc::new(seed::users().into_iter().map(|u| (u.id, u)).collect());
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/health", get(health))
        .route("/broken", get(broken))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.values().cloned().collect())
}

async fn get_user(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<User>, StatusCode> {
    db.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_user(
    State(db): State<Db>,
    Json(mut input): Json<Map<String, Value>>,
) -> (StatusCode, Json<Map<String, Value>>) {
    let id = db.len() + 1;
    input.insert("id".to_string(), Value::from(id));
    tracing::debug!(id, "faked user creation");
    (StatusCode::CREATED, Json(input))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(mut input): Json<Map<String, Value>>,
) -> Result<Json<Map<String, Value>>, StatusCode> {
    if !db.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    input.insert("id".to_string(), Value::from(id));
    Ok(Json(input))
}

async fn delete_user(Path(_id): Path<u32>) -> Json<Value> {
    Json(Value::Object(Map::new()))
}

async fn health() -> &'static str {
    "ok"
}

async fn broken() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "not json")
}
