// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use aba_directory::{DEFAULT_HISTORY_WEEKS, ProgressSettings, QuotaTracker};
use aba_directory_api::{
    ApiError, CreateAgentRequest, CreateAgentResponse, GetAgentHistoryRequest,
    GetAgentHistoryResponse, GetAgentProgressRequest, GetAgentProgressResponse,
    ListAgentsResponse, RegisterBusinessRequest, RegisterBusinessResponse,
    UpdateAgentStatusRequest, UpdateAgentStatusResponse, UpdateWeeklyTargetRequest,
    UpdateWeeklyTargetResponse, create_agent, get_agent_history, get_agent_progress, list_agents,
    register_business, update_agent_status, update_weekly_target,
};
use aba_directory_domain::{
    DEFAULT_AGGREGATE_WINDOW, DEFAULT_WEEKLY_TARGET, MAX_WEEKS_BACK, WeeklyTarget,
    parse_timezone,
};
use aba_directory_persistence::{Persistence, SharedPersistence};
use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{error, info, warn};

/// Aba Directory Server - agent quota tracking over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "ABA_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "ABA_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "ABA_PORT", default_value_t = 3000)]
    port: u16,

    /// IANA time zone in which weeks start at Monday midnight
    #[arg(long, env = "ABA_TIMEZONE", default_value = "Africa/Lagos")]
    timezone: String,

    /// Weekly target for agents without their own
    #[arg(long, env = "ABA_DEFAULT_WEEKLY_TARGET", default_value_t = DEFAULT_WEEKLY_TARGET)]
    default_weekly_target: u32,

    /// Number of weekly periods computed for an agent's history
    #[arg(long, env = "ABA_HISTORY_WEEKS", default_value_t = DEFAULT_HISTORY_WEEKS)]
    history_weeks: u32,

    /// Number of most recent weeks in the monthly aggregate
    #[arg(long, env = "ABA_AGGREGATE_WINDOW", default_value_t = DEFAULT_AGGREGATE_WINDOW)]
    aggregate_window: usize,

    /// Deadline in milliseconds for all registration counts of one request (0 disables)
    #[arg(long, env = "ABA_FETCH_TIMEOUT_MS", default_value_t = 5_000)]
    fetch_timeout_ms: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Agents and registrations, also the tracker's records repository.
    store: SharedPersistence,
    /// Week calculation and count fan-out.
    tracker: QuotaTracker,
    /// History length, aggregate window and default target.
    settings: ProgressSettings,
}

/// API request for creating an agent.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateAgentApiRequest {
    /// The agent identifier.
    agent_id: String,
    /// The agent's display name.
    name: String,
    /// Optional weekly target for this agent.
    #[serde(default)]
    weekly_target: Option<i64>,
}

/// API request for setting or clearing a weekly target.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateWeeklyTargetApiRequest {
    /// The new target, or `null` to use the default.
    #[serde(default)]
    weekly_target: Option<i64>,
}

/// API request for changing an agent's status.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateAgentStatusApiRequest {
    /// The requested status.
    status: String,
}

/// API request for registering a business.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterBusinessApiRequest {
    /// The business name.
    business_name: String,
    /// Optional market the business trades in.
    #[serde(default)]
    market: Option<String>,
}

/// Query parameters for the progress endpoint.
#[derive(Debug, Clone, Deserialize)]
struct ProgressQuery {
    /// Reference instant (RFC 3339). Defaults to now.
    reference: Option<DateTime<Utc>>,
}

/// Query parameters for the history endpoint.
#[derive(Debug, Clone, Deserialize)]
struct HistoryQuery {
    /// Number of weekly periods. Defaults to the configured history length.
    weeks_back: Option<i64>,
    /// Reference instant (RFC 3339). Defaults to now.
    reference: Option<DateTime<Utc>>,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok`.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { .. } | ApiError::InsufficientData { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(%status, error = %err, "Request failed");
        } else {
            warn!(%status, error = %err, "Request rejected");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for GET `/agents` endpoint.
async fn handle_list_agents(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListAgentsResponse>, HttpError> {
    let mut persistence = app_state.store.lock().await;
    let response: ListAgentsResponse =
        list_agents(&mut persistence, app_state.settings.default_target)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/agents` endpoint.
async fn handle_create_agent(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateAgentApiRequest>,
) -> Result<(StatusCode, Json<CreateAgentResponse>), HttpError> {
    info!(agent_id = %req.agent_id, "Handling create_agent request");

    let request: CreateAgentRequest = CreateAgentRequest {
        agent_id: req.agent_id,
        name: req.name,
        weekly_target: req.weekly_target,
    };

    let mut persistence = app_state.store.lock().await;
    let response: CreateAgentResponse = create_agent(
        &mut persistence,
        &request,
        app_state.settings.default_target,
        Utc::now(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/agents/{agent_id}/progress` endpoint.
///
/// Serves the dashboard: current week and rolling monthly aggregate.
async fn handle_get_progress(
    AxumState(app_state): AxumState<AppState>,
    Path(agent_id): Path<String>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<GetAgentProgressResponse>, HttpError> {
    let request: GetAgentProgressRequest = GetAgentProgressRequest {
        agent_id,
        reference: query.reference.unwrap_or_else(Utc::now),
    };
    info!(agent_id = %request.agent_id, reference = %request.reference, "Handling progress request");

    let response: GetAgentProgressResponse = get_agent_progress(
        &app_state.store,
        &app_state.tracker,
        &app_state.settings,
        &request,
    )
    .await?;

    Ok(Json(response))
}

/// Handler for GET `/agents/{agent_id}/history` endpoint.
async fn handle_get_history(
    AxumState(app_state): AxumState<AppState>,
    Path(agent_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<GetAgentHistoryResponse>, HttpError> {
    let request: GetAgentHistoryRequest = GetAgentHistoryRequest {
        agent_id,
        weeks_back: query.weeks_back,
        reference: query.reference.unwrap_or_else(Utc::now),
    };
    info!(
        agent_id = %request.agent_id,
        weeks_back = ?request.weeks_back,
        reference = %request.reference,
        "Handling history request"
    );

    let response: GetAgentHistoryResponse = get_agent_history(
        &app_state.store,
        &app_state.tracker,
        &app_state.settings,
        &request,
    )
    .await?;

    Ok(Json(response))
}

/// Handler for PUT `/agents/{agent_id}/weekly_target` endpoint.
async fn handle_update_weekly_target(
    AxumState(app_state): AxumState<AppState>,
    Path(agent_id): Path<String>,
    Json(req): Json<UpdateWeeklyTargetApiRequest>,
) -> Result<Json<UpdateWeeklyTargetResponse>, HttpError> {
    info!(%agent_id, weekly_target = ?req.weekly_target, "Handling update_weekly_target request");

    let request: UpdateWeeklyTargetRequest = UpdateWeeklyTargetRequest {
        agent_id,
        weekly_target: req.weekly_target,
    };

    let mut persistence = app_state.store.lock().await;
    let response: UpdateWeeklyTargetResponse = update_weekly_target(
        &mut persistence,
        &request,
        app_state.settings.default_target,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/agents/{agent_id}/status` endpoint.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    Path(agent_id): Path<String>,
    Json(req): Json<UpdateAgentStatusApiRequest>,
) -> Result<Json<UpdateAgentStatusResponse>, HttpError> {
    info!(%agent_id, status = %req.status, "Handling update_agent_status request");

    let request: UpdateAgentStatusRequest = UpdateAgentStatusRequest {
        agent_id,
        status: req.status,
    };

    let mut persistence = app_state.store.lock().await;
    let response: UpdateAgentStatusResponse = update_agent_status(
        &mut persistence,
        &request,
        app_state.settings.default_target,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/agents/{agent_id}/businesses` endpoint.
///
/// The registration is timestamped with the server clock.
async fn handle_register_business(
    AxumState(app_state): AxumState<AppState>,
    Path(agent_id): Path<String>,
    Json(req): Json<RegisterBusinessApiRequest>,
) -> Result<(StatusCode, Json<RegisterBusinessResponse>), HttpError> {
    info!(%agent_id, "Handling register_business request");

    let request: RegisterBusinessRequest = RegisterBusinessRequest {
        agent_id,
        business_name: req.business_name,
        market: req.market,
    };

    let mut persistence = app_state.store.lock().await;
    let response: RegisterBusinessResponse =
        register_business(&mut persistence, &request, Utc::now())?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/agents", get(handle_list_agents).post(handle_create_agent))
        .route("/agents/{agent_id}/progress", get(handle_get_progress))
        .route("/agents/{agent_id}/history", get(handle_get_history))
        .route(
            "/agents/{agent_id}/weekly_target",
            put(handle_update_weekly_target),
        )
        .route("/agents/{agent_id}/status", put(handle_update_status))
        .route("/agents/{agent_id}/businesses", post(handle_register_business))
        .with_state(app_state)
}

/// Builds the quota configuration from command-line arguments.
fn progress_config(args: &Args) -> Result<(QuotaTracker, ProgressSettings), Box<dyn std::error::Error>> {
    let timezone: Tz = parse_timezone(&args.timezone)?;
    let default_target: WeeklyTarget = WeeklyTarget::new(i64::from(args.default_weekly_target))?;

    if args.aggregate_window == 0 {
        return Err("aggregate window must be at least 1 week".into());
    }
    if args.history_weeks > MAX_WEEKS_BACK {
        return Err(format!(
            "history weeks ({}) must not exceed {MAX_WEEKS_BACK}",
            args.history_weeks
        )
        .into());
    }
    if usize::try_from(args.history_weeks)? < args.aggregate_window {
        return Err(format!(
            "history weeks ({}) must cover the aggregate window ({})",
            args.history_weeks, args.aggregate_window
        )
        .into());
    }

    let mut tracker: QuotaTracker = QuotaTracker::new(timezone);
    if args.fetch_timeout_ms > 0 {
        tracker = tracker.with_fetch_timeout(Duration::from_millis(args.fetch_timeout_ms));
    }

    let settings: ProgressSettings = ProgressSettings {
        history_weeks: args.history_weeks,
        aggregate_window: args.aggregate_window,
        default_target,
    };

    Ok((tracker, settings))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Aba Directory Server");

    let (tracker, settings) = progress_config(&args)?;
    info!(
        timezone = %tracker.timezone(),
        default_weekly_target = settings.default_target.value(),
        history_weeks = settings.history_weeks,
        aggregate_window = settings.aggregate_window,
        fetch_timeout = ?tracker.fetch_timeout(),
        "Quota configuration loaded"
    );

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        store: SharedPersistence::new(persistence),
        tracker,
        settings,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
