//! In-process stand-in for the VeloX API, served on an ephemeral port.

use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct StubOptions {
    pub catalog_size: usize,
    pub cors: bool,
    pub validate_booking: bool,
    pub catalog_delay: Option<Duration>,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            catalog_size: 4,
            cors: true,
            validate_booking: true,
            catalog_delay: None,
        }
    }
}

#[derive(Clone)]
struct StubState {
    options: StubOptions,
    contacts: Arc<Mutex<Vec<Value>>>,
}

pub struct StubApi {
    addr: SocketAddr,
}

impl StubApi {
    pub async fn spawn(options: StubOptions) -> Self {
        let cors = options.cors;
        let state = StubState {
            options,
            contacts: Arc::new(Mutex::new(Vec::new())),
        };

        let mut app = Router::new()
            .route("/api", get(root))
            .route("/api/", get(root))
            .route("/api/bikes", get(list_bikes))
            .route("/api/bikes/:id", get(bike_by_id))
            .route("/api/contact", get(list_contacts).post(submit_contact))
            .route("/api/newsletter", post(subscribe))
            .route("/api/booking", post(book))
            .fallback(not_found)
            .with_state(state);

        if cors {
            app = app.layer(axum::middleware::map_response(add_cors_headers));
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }
}

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}

fn bike(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("VeloX Model {}", id),
        "type": "Road Bike",
        "price": 2899,
        "features": ["Carbon Frame", "22-Speed", "Disc Brakes"],
        "specifications": {"weight": "8.5 kg", "frame": "Carbon Fiber"},
        "inStock": true
    })
}

fn rejected(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({"error": error}))).into_response()
}

fn missing(body: &Value, fields: &[&str]) -> bool {
    fields.iter().any(|field| match body.get(*field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    })
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "VeloX Bike Agency API",
        "version": "1.0.0",
        "endpoints": [
            "GET /api/ - API info",
            "POST /api/contact - Contact form submission",
            "GET /api/bikes - Get all bikes",
            "POST /api/newsletter - Newsletter subscription"
        ]
    }))
}

async fn list_bikes(State(state): State<StubState>) -> Json<Value> {
    if let Some(delay) = state.options.catalog_delay {
        tokio::time::sleep(delay).await;
    }
    let bikes: Vec<Value> = (1..=state.options.catalog_size as u64).map(bike).collect();
    Json(Value::Array(bikes))
}

async fn bike_by_id(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    match id.parse::<u64>() {
        Ok(id) if (1..=state.options.catalog_size as u64).contains(&id) => {
            Json(bike(id)).into_response()
        }
        _ => rejected(StatusCode::NOT_FOUND, "Bike not found"),
    }
}

async fn submit_contact(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    if missing(&body, &["name", "email", "message"]) {
        return rejected(
            StatusCode::BAD_REQUEST,
            "Name, email, and message are required",
        );
    }

    let id = uuid::Uuid::new_v4().to_string();
    let entry = json!({
        "id": id,
        "name": body["name"],
        "email": body["email"],
        "message": body["message"],
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "status": "new"
    });
    state.contacts.lock().unwrap().insert(0, entry);

    Json(json!({"success": true, "message": "Thank you for your message!", "id": id}))
        .into_response()
}

async fn list_contacts(State(state): State<StubState>) -> Json<Value> {
    Json(Value::Array(state.contacts.lock().unwrap().clone()))
}

async fn subscribe(Json(body): Json<Value>) -> Response {
    if missing(&body, &["email"]) {
        return rejected(StatusCode::BAD_REQUEST, "Email is required");
    }
    Json(json!({"success": true, "id": uuid::Uuid::new_v4().to_string()})).into_response()
}

async fn book(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    if state.options.validate_booking
        && missing(&body, &["bikeId", "customerName", "customerEmail"])
    {
        return rejected(
            StatusCode::BAD_REQUEST,
            "Bike ID, customer name, and email are required",
        );
    }
    Json(json!({"success": true, "bookingId": uuid::Uuid::new_v4().to_string()}))
        .into_response()
}

async fn not_found() -> Response {
    rejected(StatusCode::NOT_FOUND, "Route not found")
}
