use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Price {
    pub symbol: String,
    pub price: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub requests_served: u64,
    pub config_entries: usize,
    pub orders: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: Uuid,
    pub side: String,
    pub quantity: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct ConfigValue {
    pub value: String,
}

#[derive(Clone, Default)]
pub struct AppState {
    config: Arc<RwLock<HashMap<String, String>>>,
    orders: Arc<RwLock<Vec<Order>>>,
    requests: Arc<AtomicU64>,
}

impl AppState {
    fn hit(&self) -> u64 {
        self.requests.fetch_add(1, Ordering::SeqCst) + 1
    }
}

const DEFAULT_CONFIG: &[(&str, &str)] = &[
    ("sensitivity", "1"),
    ("verbose", "false"),
    ("trend_threshold", "0.5"),
    ("INTERVAL_SECONDS", "60"),
    ("order_enable", "false"),
    ("order_total", "0"),
    ("action_position", "buy"),
];

const PRICES: &[(&str, f64)] = &[("BTCUSDT", 67250.5), ("ETHUSDT", 3120.25), ("SOLUSDT", 145.8)];

pub fn app() -> Router {
    let config = DEFAULT_CONFIG
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let state = AppState {
        config: Arc::new(RwLock::new(config)),
        ..AppState::default()
    };
    Router::new()
        .route("/", get(api_info))
        .route("/prices", get(prices))
        .route("/stats", get(stats))
        .route("/orders", get(list_orders))
        .route("/config/{key}", get(get_config).post(set_config))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock crypto API listening");
    }
    axum::serve(listener, app()).await
}

async fn api_info(State(state): State<AppState>) -> Json<ApiInfo> {
    state.hit();
    Json(ApiInfo {
        name: "crypto-api".to_string(),
        version: "1.0".to_string(),
        endpoints: ["/prices", "/stats", "/orders", "/config/{key}"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })
}

async fn prices(State(state): State<AppState>) -> Json<Vec<Price>> {
    state.hit();
    Json(
        PRICES
            .iter()
            .map(|(symbol, price)| Price {
                symbol: symbol.to_string(),
                price: *price,
            })
            .collect(),
    )
}

async fn stats(State(state): State<AppState>) -> Json<Stats> {
    let requests_served = state.hit();
    Json(Stats {
        requests_served,
        config_entries: state.config.read().await.len(),
        orders: state.orders.read().await.len(),
    })
}

async fn list_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    state.hit();
    Json(state.orders.read().await.clone())
}

async fn get_config(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ConfigEntry>, (StatusCode, String)> {
    state.hit();
    let config = state.config.read().await;
    config
        .get(&key)
        .map(|value| {
            Json(ConfigEntry {
                key: key.clone(),
                value: value.clone(),
            })
        })
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown config key: {key}")))
}

/// Store a setting. Setting `order_execute_now` to a truthy value places an
/// order from the current `action_position` and `order_total`.
async fn set_config(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<ConfigValue>,
) -> Json<ConfigEntry> {
    state.hit();
    debug!(%key, value = %input.value, "config updated");
    let mut config = state.config.write().await;
    config.insert(key.clone(), input.value.clone());

    if key == "order_execute_now" && matches!(input.value.as_str(), "true" | "1") {
        let order = Order {
            id: Uuid::new_v4(),
            side: config.get("action_position").cloned().unwrap_or_else(|| "buy".to_string()),
            quantity: config.get("order_total").cloned().unwrap_or_else(|| "0".to_string()),
            status: "executed".to_string(),
        };
        state.orders.write().await.push(order);
    }

    Json(ConfigEntry {
        key,
        value: input.value,
    })
}
