//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::config::{validate_equity_share, validate_pool, validate_threshold, DashboardConfig};
use crate::core::cache::DataCache;
use crate::core::session::SessionState;
use crate::error::DashboardError;
use crate::metrics::Metrics;
use crate::models::series::Observation;
use crate::models::snapshot::DashboardSnapshot;
use crate::services::{FredProvider, MacroDataProvider, YahooChartProvider};
use crate::signals::engine::{DashboardEngine, EngineParams};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub config: Arc<DashboardConfig>,
    pub engine: Arc<DashboardEngine>,
    pub cache: Arc<DataCache>,
    pub session: Arc<RwLock<SessionState>>,
}

impl AppState {
    /// Wire the engine, an empty session and the given cache together.
    pub fn new(config: DashboardConfig, cache: DataCache, metrics: Arc<Metrics>) -> Self {
        let engine = DashboardEngine::new(
            config.instruments.clone(),
            config.timeframes.clone(),
            config.macro_series.clone(),
        );
        let session = SessionState::new(
            config.instrument_names(),
            config.default_chart_window.clone(),
        );
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            config: Arc::new(config),
            engine: Arc::new(engine),
            cache: Arc::new(cache),
            session: Arc::new(RwLock::new(session)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

fn status_for(error: &DashboardError) -> StatusCode {
    match error {
        DashboardError::UnknownInstrument(_) => StatusCode::NOT_FOUND,
        DashboardError::UnknownTimeframe(_)
        | DashboardError::InvalidThreshold { .. }
        | DashboardError::InvalidPool(_)
        | DashboardError::InvalidEquityShare(_) => StatusCode::BAD_REQUEST,
    }
}

fn reject(error: DashboardError) -> StatusCode {
    warn!(error = %error, "Rejected request");
    status_for(&error)
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "dca-dashboard",
        "data_loaded": state.cache.is_loaded().await,
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Default, Deserialize)]
struct DashboardQuery {
    threshold_pct: Option<f64>,
    pool_pct: Option<f64>,
    equity_share_pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WeightRequest {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct ChartWindowRequest {
    window: String,
}

#[derive(Debug, Serialize)]
struct WeightsResponse {
    weights: BTreeMap<String, f64>,
    sums_to_100: bool,
}

#[derive(Debug, Serialize)]
struct ChartResponse {
    instrument: String,
    window: String,
    points: Vec<Observation>,
}

/// Full dashboard recomputed from the cached data
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSnapshot>, StatusCode> {
    let config = &state.config;
    let params = EngineParams {
        threshold_pct: validate_threshold(query.threshold_pct.unwrap_or(config.threshold_pct))
            .map_err(reject)?,
        pool_pct: validate_pool(query.pool_pct.unwrap_or(config.pool_pct)).map_err(reject)?,
        equity_share_pct: validate_equity_share(
            query.equity_share_pct.unwrap_or(config.equity_share_pct),
        )
        .map_err(reject)?,
    };

    let data = state.cache.get().await;
    let mut session = state.session.write().await;
    let snapshot = state.engine.snapshot(&data, &mut session, params);
    Ok(Json(snapshot))
}

/// Chart points for the window selected for this instrument
async fn get_chart(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ChartResponse>, StatusCode> {
    if state.config.instrument(&name).is_none() {
        return Err(reject(DashboardError::UnknownInstrument(name)));
    }

    let data = state.cache.get().await;
    let session = state.session.read().await;
    let points = match data.series(&name) {
        Some(series) => {
            let (window, points) = state.engine.chart(series, &session, &name);
            ChartResponse {
                instrument: name.clone(),
                window,
                points: points.to_vec(),
            }
        }
        None => ChartResponse {
            instrument: name.clone(),
            window: session.chart_window(&name).to_string(),
            points: Vec::new(),
        },
    };
    Ok(Json(points))
}

async fn put_chart_window(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<ChartWindowRequest>,
) -> Result<Json<Value>, StatusCode> {
    let mut session = state.session.write().await;
    session
        .select_chart_window(&name, &request.window, state.engine.timeframes())
        .map_err(reject)?;
    Ok(Json(json!({
        "instrument": name,
        "window": request.window,
    })))
}

async fn put_origin_weight(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<WeightRequest>,
) -> Result<Json<WeightsResponse>, StatusCode> {
    let mut session = state.session.write().await;
    session
        .set_origin_weight(&name, request.value)
        .map_err(reject)?;
    if session.origin_drift() {
        warn!(instrument = %name, "Origin weights no longer sum to 100%");
    }
    Ok(Json(WeightsResponse {
        weights: session.origin_weights().clone(),
        sums_to_100: !session.origin_drift(),
    }))
}

async fn reset_origin_weights(State(state): State<AppState>) -> Json<WeightsResponse> {
    let mut session = state.session.write().await;
    session.reset_origin_weights();
    Json(WeightsResponse {
        weights: session.origin_weights().clone(),
        sums_to_100: !session.origin_drift(),
    })
}

async fn put_recommendation(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<WeightRequest>,
) -> Result<Json<WeightsResponse>, StatusCode> {
    let data = state.cache.get().await;
    let mut session = state.session.write().await;
    if !session.recommendations_edited() {
        // Edit the current score-driven split, not a stale one
        let threshold_pct = session.threshold_pct().unwrap_or(state.config.threshold_pct);
        state.engine.recommend(&data, &mut session, threshold_pct);
    }
    let weights = session
        .edit_recommendation(&name, request.value)
        .map_err(reject)?
        .clone();
    Ok(Json(WeightsResponse {
        sums_to_100: !crate::signals::allocation::drifts_from_full_pool(&weights),
        weights,
    }))
}

async fn reset_recommendations(State(state): State<AppState>) -> StatusCode {
    state.session.write().await.clear_recommendation_edits();
    StatusCode::NO_CONTENT
}

/// Reload prices and macro data from the providers
async fn refresh_data(State(state): State<AppState>) -> Json<Value> {
    let data = state.cache.refresh().await;
    state.session.write().await.clear_recommendation_edits();
    let with_data = data.prices.values().filter(|s| !s.is_empty()).count();
    info!(with_data = with_data, "Data refreshed on request");
    Json(json!({
        "loaded_at": data.loaded_at,
        "instruments": data.prices.len(),
        "instruments_with_data": with_data,
        "macro_enabled": data.macro_enabled,
    }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/instruments/{name}/chart", get(get_chart))
        .route("/api/instruments/{name}/chart-window", put(put_chart_window))
        .route("/api/origin-weights/reset", post(reset_origin_weights))
        .route("/api/origin-weights/{name}", put(put_origin_weight))
        .route("/api/recommendations/reset", post(reset_recommendations))
        .route("/api/recommendations/{name}", put(put_recommendation))
        .route("/api/refresh", post(refresh_data))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Build the production state: Yahoo prices and, when a key is configured, FRED macro data.
pub fn build_state(config: DashboardConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let market = Arc::new(YahooChartProvider::new(config.yahoo_base_url.clone())?);
    let macro_provider =
        FredProvider::from_key(config.fred_base_url.clone(), config.fred_api_key.clone())?
            .map(|p| Arc::new(p) as Arc<dyn MacroDataProvider>);
    if macro_provider.is_none() {
        warn!("FRED_API_KEY missing, macro indicators disabled");
    }

    let cache = DataCache::new(
        market,
        macro_provider,
        config.instruments.clone(),
        config.macro_series.clone(),
        config.timeframes.fetch_range_days(),
    )
    .with_metrics(metrics.clone());

    Ok(AppState::new(config, cache, metrics))
}

pub async fn start_server(config: DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.port;
    let state = build_state(config)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Dashboard available at http://0.0.0.0:{}/api/dashboard",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
