#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const EMAIL: &str = "sam@example.com";
pub const PASSWORD: &str = "hunter22";
pub const TOKEN: &str = "tok-1";
pub const TAKEN_EMAIL: &str = "taken@example.com";

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// In-process stand-in for the REST backend, listening on an ephemeral port.
pub struct FakeBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();
        let log = requests.clone();
        let app = Router::new().fallback(move |method: Method, uri: Uri, headers: HeaderMap, body: String| {
            let log = log.clone();
            async move {
                let header = |name: &str| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string)
                };
                let recorded = Recorded {
                    method: method.to_string(),
                    path: uri.path().to_string(),
                    query: uri.query().map(str::to_string),
                    authorization: header("authorization"),
                    content_type: header("content-type"),
                    body,
                };
                let response = route(&recorded);
                log.lock().unwrap().push(recorded);
                response
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

pub fn temp_token_path() -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("ally-e2e-{}", uuid::Uuid::now_v7()))
        .join("token")
}

fn user() -> Value {
    json!({"id": "u1", "email": EMAIL, "full_name": "Sam Doe"})
}

fn journal(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "Felt calm after a walk",
        "user_id": "u1",
        "created_at": "2024-03-04T08:30:00Z",
        "tags": ["walk"],
        "image_urls": []
    })
}

fn mood(id: &str, score: i64) -> Value {
    json!({
        "id": id,
        "score": score,
        "notes": "ok",
        "user_id": "u1",
        "timestamp": "2024-03-04T08:30:00Z",
        "created_at": "2024-03-04T08:30:00Z"
    })
}

fn ok(value: Value) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

fn err(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

/// Decoded `application/x-www-form-urlencoded` body, empty when malformed.
fn form(body: &str) -> HashMap<String, String> {
    serde_urlencoded::from_str(body).unwrap_or_default()
}

fn route(req: &Recorded) -> Response {
    let expected = format!("Bearer {TOKEN}");
    let authorized = req.authorization.as_deref() == Some(expected.as_str());
    let segments: Vec<&str> = req.path.trim_matches('/').split('/').collect();

    match (req.method.as_str(), segments.as_slice()) {
        ("POST", ["auth", "token"]) => {
            let fields = form(&req.body);
            let username = fields.get("username").map(String::as_str);
            let password = fields.get("password").map(String::as_str);
            if username == Some(EMAIL) && password == Some(PASSWORD) {
                ok(json!({"access_token": TOKEN, "token_type": "bearer"}))
            } else {
                err(StatusCode::UNAUTHORIZED, "Incorrect username or password")
            }
        }
        ("POST", ["auth", "register"]) => {
            let body = req.json();
            if body["email"] == TAKEN_EMAIL {
                err(StatusCode::BAD_REQUEST, "Email already registered")
            } else {
                ok(json!({
                    "id": "u2",
                    "email": body["email"],
                    "full_name": body["full_name"]
                }))
            }
        }
        _ if !authorized => err(StatusCode::UNAUTHORIZED, "Could not validate credentials"),
        ("GET", ["auth", "me"]) => ok(user()),

        ("GET", ["journals"]) => ok(json!([journal("j1", "Morning"), journal("j2", "Evening")])),
        ("POST", ["journals"]) => {
            let body = req.json();
            let title = body["title"].as_str().unwrap_or("untitled");
            ok(journal("j3", title))
        }
        ("GET", ["journals", id]) => ok(journal(id, "Morning")),
        ("PUT", ["journals", id]) => {
            let body = req.json();
            let title = body["title"].as_str().unwrap_or("Morning");
            ok(journal(id, title))
        }
        ("DELETE", ["journals", _]) | ("DELETE", ["moods", _]) => {
            StatusCode::NO_CONTENT.into_response()
        }
        ("GET", ["journals", id, "analysis"]) => ok(json!({
            "entry_id": id,
            "sentiment_score": 0.82,
            "sentiment_label": "POSITIVE",
            "keywords": ["calm", "walk"],
            "suggestions": ["Keep walking"]
        })),

        ("GET", ["moods"]) => ok(json!([mood("m1", 6), mood("m2", 8)])),
        ("POST", ["moods"]) => {
            let score = req.json()["score"].as_i64().unwrap_or(5);
            ok(mood("m3", score))
        }
        ("GET", ["moods", "aggregate", period]) => {
            if !["day", "week", "month"].contains(period) {
                return err(
                    StatusCode::BAD_REQUEST,
                    "Period must be one of: day, week, month",
                );
            }
            ok(json!({
                "period": period,
                "data": [
                    {"period": "2024-03-04", "average_score": 6.5, "count": 2},
                    {"period": "2024-03-11", "average_score": 7.0, "count": 1}
                ],
                "average_score": 6.67
            }))
        }
        ("GET", ["moods", id]) => ok(mood(id, 6)),
        ("PUT", ["moods", id]) => {
            let score = req.json()["score"].as_i64().unwrap_or(6);
            ok(mood(id, score))
        }

        ("POST", ["ai", "chat"]) => {
            let body = req.json();
            let turns = body["history"].as_array().map(|h| h.len()).unwrap_or(0);
            ok(json!({
                "response": format!("heard {} after {turns} turns", body["message"].as_str().unwrap_or("")),
                "suggestions": ["Try box breathing"]
            }))
        }
        ("POST", ["ai", "sentiment"]) => ok(json!({
            "score": 0.2,
            "label": "NEGATIVE",
            "keywords": ["worried"],
            "suggestions": null
        })),
        ("GET", ["ai", "breathing-exercises"]) => ok(json!([
            {"name": "4-7-8 Breathing", "description": "Inhale 4, hold 7, exhale 8.",
             "inhale_duration": 4, "hold_duration": 7, "exhale_duration": 8, "cycles": 4},
            {"name": "Box Breathing", "description": "Four counts each.",
             "inhale_duration": 4, "hold_duration": 4, "exhale_duration": 4, "cycles": 5},
            {"name": "Deep Breathing", "description": "Slow and deep.",
             "inhale_duration": 5, "hold_duration": 0, "exhale_duration": 5, "cycles": 10}
        ])),

        _ => err(StatusCode::NOT_FOUND, "Not Found"),
    }
}
