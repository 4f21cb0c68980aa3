use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{from_fn, Next},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use database::models::Role;
use middleware::require_roles;

const ANY_ROLE: &[Role] = &[Role::Student, Role::Recruiter, Role::Admin];
const STUDENT_ONLY: &[Role] = &[Role::Student];
const RECRUITER_OR_ADMIN: &[Role] = &[Role::Recruiter, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Build the full application router over the given pool.
pub fn app(pool: PgPool) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/login", post(handlers::public::login))
        // Protected API
        .merge(application_routes())
        .merge(profile_routes())
        .merge(user_routes())
        .fallback(not_found)
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(pool)
}

fn application_routes() -> Router<PgPool> {
    use handlers::protected::applications;

    let student = Router::new()
        .route("/apply", post(applications::apply))
        .route("/application/accept", post(applications::accept))
        .route("/application/reject", post(applications::reject))
        .route_layer(from_fn(|req: Request, next: Next| {
            require_roles(STUDENT_ONLY, req, next)
        }));

    let recruiter_admin = Router::new()
        .route("/application/change_status", post(applications::change_status))
        .route_layer(from_fn(|req: Request, next: Next| {
            require_roles(RECRUITER_OR_ADMIN, req, next)
        }));

    let any = Router::new()
        .route("/applications", get(applications::list))
        .route_layer(from_fn(|req: Request, next: Next| {
            require_roles(ANY_ROLE, req, next)
        }));

    Router::new()
        .merge(student)
        .merge(recruiter_admin)
        .merge(any)
        .route_layer(from_fn(middleware::jwt_auth_middleware))
}

fn profile_routes() -> Router<PgPool> {
    use handlers::protected::profiles;

    let any = Router::new()
        .route("/profiles", get(profiles::list))
        .route_layer(from_fn(|req: Request, next: Next| {
            require_roles(ANY_ROLE, req, next)
        }));

    let recruiter_admin = Router::new()
        .route("/create_profile", post(profiles::create))
        .route_layer(from_fn(|req: Request, next: Next| {
            require_roles(RECRUITER_OR_ADMIN, req, next)
        }));

    Router::new()
        .merge(any)
        .merge(recruiter_admin)
        .route_layer(from_fn(middleware::jwt_auth_middleware))
}

fn user_routes() -> Router<PgPool> {
    use handlers::protected::users;

    let me = Router::new()
        .route("/users/me", get(users::me))
        .route_layer(from_fn(|req: Request, next: Next| {
            require_roles(ANY_ROLE, req, next)
        }));

    let admin = Router::new()
        .route("/users", get(users::list))
        .route_layer(from_fn(|req: Request, next: Next| {
            require_roles(ADMIN_ONLY, req, next)
        }));

    Router::new()
        .merge(me)
        .merge(admin)
        .route_layer(from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "OCS Recruitment API is running" }))
}

async fn health(State(pool): State<PgPool>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = config::config()
        .effective_cors_origins()
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Last-resort handler: a panic inside a route surfaces as the generic
/// 500 body instead of a dropped connection.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    tracing::error!("Request handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Something went wrong!", "message": detail })),
    )
        .into_response()
}
