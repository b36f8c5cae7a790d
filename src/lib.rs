use axum::http::header::{HeaderName, HeaderValue, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use sqlx::MySqlPool;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;

/// Shared per-request dependencies. The pool is the only process-wide state;
/// it is built once in `main` and handed to every handler through here.
#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(login_routes())
        .merge(water_report_routes())
        .merge(user_routes())
        .merge(rain_report_routes())
        .merge(dam_report_routes())
        // Global middleware: permissive CORS for the dashboard frontend plus
        // the hardening headers the old deployment set via helmet.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("0"),
        ))
        .with_state(state)
}

fn login_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::auth;

    Router::new().route("/api/login", post(auth::login))
}

fn water_report_routes() -> Router<AppState> {
    use axum::routing::put;
    use handlers::water_reports as water;

    Router::new()
        .route("/api/reports", get(water::list).post(water::create))
        .route("/api/reports/:id", put(water::update).delete(water::delete))
}

fn user_routes() -> Router<AppState> {
    use axum::routing::put;
    use handlers::users;

    Router::new()
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:id", put(users::update).delete(users::delete))
}

fn rain_report_routes() -> Router<AppState> {
    use axum::routing::put;
    use handlers::rain_reports as rain;

    Router::new()
        .route("/api/rain-reports", get(rain::list).post(rain::create))
        .route("/api/rain-reports/:id", put(rain::update).delete(rain::delete))
}

fn dam_report_routes() -> Router<AppState> {
    use axum::routing::put;
    use handlers::dam_reports as dam;

    Router::new()
        .route("/api/dam-reports", get(dam::list).post(dam::create))
        .route("/api/dam-reports/:id", put(dam::update).delete(dam::delete))
}

/// GET / - liveness banner, same text the dashboard has always probed for.
async fn root() -> Html<&'static str> {
    Html("<h1>HydroMonitor API Server is Running! 🚀</h1>")
}
