// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All data endpoints live under `/api/`. There is no authentication: the
// service holds nothing but fabricated chart data and an in-memory strategy
// list.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::app_state::AppState;
use crate::catalog;
use crate::engine;
use crate::error::EngineError;
use crate::market_data;

/// Largest chart window a client may request — the dashboard's widest
/// timeframe is 5 years.
const MAX_CHART_DAYS: u32 = 365 * 5;

/// Error body for all rejected requests.
type ApiError = (StatusCode, Json<Value>);

fn bad_request(message: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
}

fn engine_error(err: EngineError) -> ApiError {
    debug!(class = ?err.class(), error = %err, "indicator request rejected");
    bad_request(err)
}

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/strategies", get(list_strategies))
        .route("/api/strategies", post(create_strategy))
        .route("/api/indicators", get(list_indicators))
        .route("/api/chart-data", get(chart_data))
        .route("/api/chart-data", post(chart_data_with_indicators))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Root & health
// =============================================================================

async fn root() -> &'static str {
    "Strategy Lab Backend is running"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    state_version: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        state_version: state.current_state_version(),
        server_time: chrono::Utc::now().timestamp_millis(),
    };
    Json(resp)
}

// =============================================================================
// Strategies
// =============================================================================

async fn list_strategies(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.strategy_store.list())
}

#[derive(Deserialize)]
struct CreateStrategyRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

async fn create_strategy(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStrategyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req.name.as_deref().unwrap_or("");
    let description = req.description.as_deref().unwrap_or("");
    if name.is_empty() || description.is_empty() {
        return Err(bad_request("Name and description are required"));
    }

    let created = state.strategy_store.append(name, description);
    state.increment_version();
    info!(id = created.id, name = %created.name, "strategy created");

    Ok((StatusCode::CREATED, Json(created)))
}

// =============================================================================
// Indicator catalog
// =============================================================================

async fn list_indicators() -> impl IntoResponse {
    Json(catalog::all())
}

// =============================================================================
// Chart data
// =============================================================================

#[derive(Deserialize)]
struct ChartDataQuery {
    symbol: Option<String>,
    days: Option<u32>,
    seed: Option<u64>,
}

/// Resolve the symbol/days/seed triple shared by both chart-data endpoints,
/// filling defaults from the runtime config.
fn resolve_chart_request(
    state: &AppState,
    symbol: Option<String>,
    days: Option<u32>,
    seed: Option<u64>,
) -> Result<(String, u32, u64), ApiError> {
    let config = &state.runtime_config;

    let symbol = match symbol {
        Some(s) => {
            if !config.symbols.iter().any(|known| known == &s) {
                return Err(bad_request(format!("unknown symbol: '{s}'")));
            }
            s
        }
        None => config
            .symbols
            .first()
            .cloned()
            .ok_or_else(|| bad_request("no symbols configured"))?,
    };

    let days = days.unwrap_or(config.default_chart_days);
    if days > MAX_CHART_DAYS {
        return Err(bad_request(format!(
            "days must be at most {MAX_CHART_DAYS}, got {days}"
        )));
    }

    Ok((symbol, days, seed.unwrap_or(config.base_seed)))
}

async fn chart_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartDataQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (symbol, days, seed) =
        resolve_chart_request(&state, query.symbol, query.days, query.seed)?;

    let series = market_data::generate_series(
        &state.runtime_config.synthetic,
        &symbol,
        seed,
        days,
        chrono::Utc::now().date_naive(),
    );

    Ok(Json(series))
}

#[derive(Deserialize)]
struct IndicatorRequest {
    id: String,
    #[serde(default)]
    params: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct ChartDataRequest {
    symbol: Option<String>,
    days: Option<u32>,
    seed: Option<u64>,
    #[serde(default)]
    indicators: Vec<IndicatorRequest>,
}

/// Chart data decorated with overlay columns: each row is the price point
/// plus one key per indicator column, `null` inside warm-up windows.
async fn chart_data_with_indicators(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChartDataRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (symbol, days, seed) = resolve_chart_request(&state, req.symbol, req.days, req.seed)?;

    let series = market_data::generate_series(
        &state.runtime_config.synthetic,
        &symbol,
        seed,
        days,
        chrono::Utc::now().date_naive(),
    );

    let mut rows: Vec<Value> = series
        .iter()
        .map(|p| serde_json::to_value(p).unwrap_or_default())
        .collect();

    for request in &req.indicators {
        let derived = engine::compute(&series, &request.id, &request.params)
            .map_err(engine_error)?;

        for (column, values) in &derived.columns {
            for (row, value) in rows.iter_mut().zip(values.iter()) {
                if let Some(obj) = row.as_object_mut() {
                    obj.insert(
                        column.clone(),
                        value.map_or(Value::Null, |v| serde_json::json!(v)),
                    );
                }
            }
        }
    }

    Ok(Json(rows))
}

// =============================================================================
// Router Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime_config::RuntimeConfig;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(Arc::new(AppState::new(RuntimeConfig::default())))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // ---- health & root ---------------------------------------------------

    #[tokio::test]
    async fn health_reports_ok() {
        let response = test_router().oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["state_version"], 1);
    }

    // ---- strategies ------------------------------------------------------

    #[tokio::test]
    async fn lists_seeded_strategies() {
        let response = test_router()
            .oneshot(get_request("/api/strategies"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["name"], "Momentum Breakout");
    }

    #[tokio::test]
    async fn creates_a_strategy() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/strategies",
                serde_json::json!({"name": "Pairs", "description": "Spread trading"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["id"], 3); // two seeded records before it
        assert_eq!(created["name"], "Pairs");

        let response = app.oneshot(get_request("/api/strategies")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn created_ids_strictly_increase() {
        let app = test_router();
        let mut last_id = 0;
        for i in 0..5 {
            let response = app
                .clone()
                .oneshot(post_json(
                    "/api/strategies",
                    serde_json::json!({"name": format!("S{i}"), "description": "d"}),
                ))
                .await
                .unwrap();
            let id = body_json(response).await["id"].as_u64().unwrap();
            assert!(id > last_id);
            last_id = id;
        }
    }

    #[tokio::test]
    async fn rejects_missing_description() {
        let response = test_router()
            .oneshot(post_json(
                "/api/strategies",
                serde_json::json!({"name": "X"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Name and description are required");
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let response = test_router()
            .oneshot(post_json(
                "/api/strategies",
                serde_json::json!({"name": "", "description": "d"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // ---- indicator catalog -----------------------------------------------

    #[tokio::test]
    async fn lists_indicator_catalog() {
        let response = test_router()
            .oneshot(get_request("/api/indicators"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let specs = json.as_array().unwrap();
        assert_eq!(specs.len(), 5);
        assert_eq!(specs[0]["id"], "sma");
        assert_eq!(specs[0]["defaultVisible"], true);
        assert_eq!(specs[0]["parameters"][0]["max"], 200);
    }

    // ---- chart data ------------------------------------------------------

    #[tokio::test]
    async fn chart_data_defaults_to_configured_window() {
        let response = test_router()
            .oneshot(get_request("/api/chart-data"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 91); // default 90 days + 1
    }

    #[tokio::test]
    async fn chart_data_is_deterministic_for_a_seed() {
        let app = test_router();
        let uri = "/api/chart-data?symbol=MSFT&days=30&seed=7";

        let first = body_json(app.clone().oneshot(get_request(uri)).await.unwrap()).await;
        let second = body_json(app.oneshot(get_request(uri)).await.unwrap()).await;

        assert_eq!(first.as_array().unwrap().len(), 31);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn chart_data_rejects_unknown_symbol() {
        let response = test_router()
            .oneshot(get_request("/api/chart-data?symbol=DOGE"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "unknown symbol: 'DOGE'");
    }

    #[tokio::test]
    async fn chart_data_rejects_oversized_window() {
        let response = test_router()
            .oneshot(get_request("/api/chart-data?days=2000"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn decorated_chart_data_includes_overlay_columns() {
        let response = test_router()
            .oneshot(post_json(
                "/api/chart-data",
                serde_json::json!({
                    "days": 10,
                    "indicators": [{"id": "sma", "params": {"period": 3}}],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let rows = body_json(response).await;
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 11);
        // Warm-up rows carry explicit nulls, later rows carry values.
        assert!(rows[0]["sma"].is_null());
        assert!(rows[1]["sma"].is_null());
        assert!(rows[2]["sma"].is_number());
        assert!(rows[0]["close"].is_number());
    }

    #[tokio::test]
    async fn decorated_chart_data_supports_multiple_indicators() {
        let response = test_router()
            .oneshot(post_json(
                "/api/chart-data",
                serde_json::json!({
                    "days": 40,
                    "indicators": [
                        {"id": "bb", "params": {"period": 4, "stdDev": 2.5}},
                        {"id": "ema"},
                    ],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let rows = body_json(response).await;
        let last = rows.as_array().unwrap().last().unwrap().clone();
        assert!(last["upperBB"].is_number());
        assert!(last["middleBB"].is_number());
        assert!(last["lowerBB"].is_number());
        assert!(last["ema"].is_number());
    }

    #[tokio::test]
    async fn decorated_chart_data_rejects_bad_parameters() {
        let response = test_router()
            .oneshot(post_json(
                "/api/chart-data",
                serde_json::json!({
                    "indicators": [{"id": "sma", "params": {"period": 500}}],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["error"],
            "parameter 'period' must be between 2 and 200, got 500"
        );
    }

    #[tokio::test]
    async fn decorated_chart_data_rejects_unknown_indicator() {
        let response = test_router()
            .oneshot(post_json(
                "/api/chart-data",
                serde_json::json!({"indicators": [{"id": "vwap"}]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "unknown indicator: 'vwap'");
    }
}
