use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{self, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use platform_db::{DbPool, SeaOrmCompensationStore, SeaOrmEmployeeStore};
use products_hr::{
    Compensation, CompensationService, CompensationStore, Employee, EmployeeService,
    EmployeeStore, HrError, NewCompensation, ReportingEngine, ReportingStructure,
};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<AppConfig>,
    pub employees: EmployeeService,
    pub reporting: ReportingEngine,
    pub compensation: CompensationService,
}

impl AppState {
    /// Wire the services over the database-backed stores.
    pub fn new(pool: DbPool, config: Arc<AppConfig>) -> Self {
        let employee_store: Arc<dyn EmployeeStore> =
            Arc::new(SeaOrmEmployeeStore::new(pool.clone()));
        let compensation_store: Arc<dyn CompensationStore> =
            Arc::new(SeaOrmCompensationStore::new(pool.clone()));
        let employees = EmployeeService::new(employee_store.clone());
        let reporting = ReportingEngine::new(employee_store);
        let compensation = CompensationService::new(employees.clone(), compensation_store);
        Self {
            pool,
            config,
            employees,
            reporting,
            compensation,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "directory server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route("/employee", post(create_employee))
        .route("/employee/{id}", get(read_employee).put(update_employee))
        .route("/employee/{id}/reportingstructure", get(reporting_structure))
        .route(
            "/employee/{id}/compensation",
            get(current_compensation).post(add_compensation),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> HttpResult<Json<Employee>> {
    debug!("received employee create request");
    let Json(employee) = payload?;
    Ok(Json(state.employees.create(employee).await?))
}

async fn read_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<Employee>> {
    debug!(employee_id = %id, "received employee read request");
    Ok(Json(state.employees.read(&id).await?))
}

/// The id in the path wins over any id in the body.
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> HttpResult<Json<Employee>> {
    debug!(employee_id = %id, "received employee update request");
    let Json(mut employee) = payload?;
    employee.employee_id = Some(id);
    Ok(Json(state.employees.update(employee).await?))
}

async fn reporting_structure(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<ReportingStructure>> {
    debug!(employee_id = %id, "received reporting structure request");
    let employee = state.employees.read(&id).await?;
    Ok(Json(state.reporting.reporting_structure(employee).await?))
}

async fn add_compensation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewCompensation>, JsonRejection>,
) -> HttpResult<Json<Compensation>> {
    debug!(employee_id = %id, "received compensation add request");
    let Json(input) = payload?;
    let employee = state.employees.read(&id).await?;
    let compensation = state
        .compensation
        .add_compensation(&employee, input.salary, input.effective_date)
        .await?;
    Ok(Json(compensation))
}

async fn current_compensation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<Compensation>> {
    debug!(employee_id = %id, "received compensation read request");
    let employee = state.employees.read(&id).await?;
    state
        .compensation
        .current_compensation(&employee)
        .await?
        .map(Json)
        .ok_or_else(|| {
            HttpError::new(
                StatusCode::NOT_FOUND,
                "NO_COMPENSATION",
                format!("no compensation found for employee {id}"),
            )
        })
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.pool.get_database_backend();
    let db_ok = state
        .pool
        .execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl HttpError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn internal(err: anyhow::Error) -> Self {
        error!(error = ?err, "request failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal server error",
        )
    }
}

impl From<HrError> for HttpError {
    fn from(err: HrError) -> Self {
        match err {
            HrError::EmployeeNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            HrError::InvalidInput(_) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_INPUT", err.to_string())
            }
            HrError::Store(source) => Self::internal(source),
        }
    }
}

/// Body rejections keep the extractor's status (400, 415 or 422).
impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "INVALID_INPUT", rejection.body_text())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
