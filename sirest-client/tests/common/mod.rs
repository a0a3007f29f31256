//! In-process fake backend on 127.0.0.1:0

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{Value, json};
use shared::client::{LoginRequest, SignupRequest};
use shared::demo::{self, DemoSeedResult, ExistingData};
use shared::models::{Payment, PaymentCreate, Product, Role, UserProfile};
use shared::order::{Order, OrderCreate, OrderStatus};
use shared::response::Envelope;
use sirest_client::{ClientConfig, SirestClient};
use std::sync::Arc;

pub const ANON_TOKEN: &str = "anon-public";

/// Client logs go to the test harness output (`RUST_LOG` filters them)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sirest_client=debug")),
        )
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
pub struct BackendState {
    pub orders: Vec<Order>,
    pub payments: Vec<Payment>,
    pub products: Vec<Product>,
    pub existing: ExistingData,
    /// Answer `GET /orders` with `{"success":true}` and no `orders` field
    pub orders_field_missing: bool,
    /// `(method path, Authorization header)` for every request
    pub requests: Vec<(String, Option<String>)>,
    /// `(method path, Content-Type header)` for every request
    pub content_types: Vec<(String, Option<String>)>,
    next_id: u32,
}

impl BackendState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    pub fn count(&self, route: &str) -> usize {
        self.requests.iter().filter(|(r, _)| r == route).count()
    }

    pub fn auth_for(&self, route: &str) -> Vec<Option<String>> {
        self.requests
            .iter()
            .filter(|(r, _)| r == route)
            .map(|(_, a)| a.clone())
            .collect()
    }
}

pub type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub state: Shared,
    pub base_url: String,
}

impl FakeBackend {
    pub async fn start() -> Self {
        init_tracing();
        let state: Shared = Arc::default();
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            state,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url).with_anon_token(ANON_TOKEN)
    }

    pub fn client(&self) -> SirestClient {
        SirestClient::new(self.config()).unwrap()
    }
}

fn record(state: &Shared, route: &str, headers: &HeaderMap) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let mut st = state.lock();
    st.requests.push((route.to_string(), header("authorization")));
    st.content_types.push((route.to_string(), header("content-type")));
}

fn envelope(field: &str, value: impl serde::Serialize) -> Response {
    Json(Envelope::ok(field, value)).into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

fn user_for(email: &str) -> UserProfile {
    let role = demo::demo_accounts()
        .into_iter()
        .find(|a| a.email == email)
        .map(|a| a.role)
        .unwrap_or(Role::Client);
    UserProfile {
        id: format!("user-{email}"),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or_default().to_string(),
        role,
        active: true,
        phone: None,
        created_at: None,
    }
}

pub fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/signup", post(signup))
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/{id}", put(update_order))
        .route("/api/payments", get(list_payments).post(create_payment))
        .route("/api/products", get(list_products))
        .route("/api/tables", get(broken_tables))
        .route("/api/alerts", get(unavailable))
        .route("/api/staff-status", get(missing))
        .route("/api/init-demo-data", post(init_demo_data))
        .with_state(state)
}

async fn login(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Response {
    record(&state, "POST auth/login", &headers);
    if req.password != demo::DEMO_PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Credenciales inválidas");
    }
    Json(json!({
        "success": true,
        "token": format!("tok-{}", req.email),
        "user": user_for(&req.email),
    }))
    .into_response()
}

async fn signup(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<SignupRequest>,
) -> Response {
    record(&state, "POST auth/signup", &headers);
    let mut user = user_for(&req.email);
    user.name = req.name;
    user.role = Role::Client;
    Json(json!({
        "success": true,
        "token": format!("tok-{}", req.email),
        "user": user,
    }))
    .into_response()
}

async fn list_orders(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET orders", &headers);
    let st = state.lock();
    if st.orders_field_missing {
        return Json(json!({ "success": true })).into_response();
    }
    envelope("orders", st.orders.clone())
}

async fn create_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<OrderCreate>,
) -> Response {
    record(&state, "POST orders", &headers);
    let mut st = state.lock();
    let order = Order {
        id: st.next_id("ord"),
        table_number: req.table_number,
        items: req.items,
        subtotal: req.subtotal,
        note: req.note,
        status: OrderStatus::Pending,
        created_by: req.created_by,
        created_by_name: req.created_by_name,
        customer_name: req.customer_name,
        customer_phone: req.customer_phone,
        created_at: Utc::now(),
        updated_at: None,
        version: 1,
    };
    st.orders.push(order.clone());
    envelope("order", order)
}

async fn update_order(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, "PUT orders/:id", &headers);
    let mut st = state.lock();
    let Some(order) = st.orders.iter_mut().find(|o| o.id == id) else {
        return error(StatusCode::NOT_FOUND, "Pedido no encontrado");
    };
    if let Some(expected) = body.get("expected_version").and_then(Value::as_u64)
        && expected != order.version
    {
        return error(StatusCode::CONFLICT, "El pedido fue modificado");
    }
    if let Some(status) = body.get("status") {
        order.status = serde_json::from_value(status.clone()).unwrap();
    }
    if let Some(note) = body.get("note") {
        order.note = note.as_str().map(str::to_string);
    }
    order.version += 1;
    order.updated_at = Some(Utc::now());
    envelope("order", order.clone())
}

async fn list_payments(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET payments", &headers);
    let payments = state.lock().payments.clone();
    envelope("payments", payments)
}

async fn create_payment(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<PaymentCreate>,
) -> Response {
    record(&state, "POST payments", &headers);
    let mut st = state.lock();
    if let Some(existing) = st
        .payments
        .iter()
        .find(|p| p.idempotency_key == Some(req.idempotency_key))
    {
        return envelope("payment", existing.clone());
    }
    if let Some(order) = st.orders.iter().find(|o| o.id == req.order_id)
        && order.version != req.expected_order_version
    {
        return error(StatusCode::CONFLICT, "El pedido fue modificado");
    }
    if st.payments.iter().any(|p| p.order_id == req.order_id) {
        return error(StatusCode::CONFLICT, "El pedido ya tiene un pago");
    }
    let payment = Payment {
        id: st.next_id("pay"),
        order_id: req.order_id,
        breakdown: Some(req.breakdown),
        total: req.total,
        method: req.method,
        received: req.received,
        change: req.change,
        created_by: "cashier".into(),
        created_at: Utc::now(),
        idempotency_key: Some(req.idempotency_key),
    };
    st.payments.push(payment.clone());
    envelope("payment", payment)
}

async fn list_products(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET products", &headers);
    let products = state.lock().products.clone();
    envelope("products", products)
}

/// 200 with a payload of the wrong shape
async fn broken_tables(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET tables", &headers);
    Json(json!({ "success": true, "tables": 5 })).into_response()
}

/// Non-JSON error body
async fn unavailable(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET alerts", &headers);
    (StatusCode::SERVICE_UNAVAILABLE, "<html>upstream down</html>").into_response()
}

async fn missing(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET staff-status", &headers);
    (StatusCode::NOT_FOUND, Json(json!({ "message": "not here" }))).into_response()
}

async fn init_demo_data(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "POST init-demo-data", &headers);
    let mut st = state.lock();
    let plan = demo::plan_seed(&st.existing);
    for account in &plan.accounts {
        st.existing.user_emails.insert(account.email.to_lowercase());
    }
    for product in &plan.products {
        st.existing.product_names.insert(product.name.clone());
    }
    for table in &plan.tables {
        st.existing.table_numbers.insert(table.number);
    }
    let result = DemoSeedResult::from_plan(&plan);
    let mut body = serde_json::to_value(result).unwrap();
    body["success"] = json!(true);
    Json(body).into_response()
}
