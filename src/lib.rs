//! Status service: greeting, health, readiness, build info and Prometheus
//! metrics over HTTP, plus Swagger docs and the frontend build.

use std::sync::Arc;

use axum::{
    handler::Handler,
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod assets;
pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod status_page;

use crate::assets::AssetSource;
use crate::config::BuildEnv;
use crate::docs::ApiDocs;
use crate::metrics::RequestCounter;

/// Shared application state — cheap to clone (all heap behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub counter: RequestCounter,
    pub build: Arc<BuildEnv>,
    pub docs: Arc<ApiDocs>,
    pub assets: Arc<dyn AssetSource>,
}

impl AppState {
    pub fn new(
        counter: RequestCounter,
        build: BuildEnv,
        docs: ApiDocs,
        assets: impl AssetSource + 'static,
    ) -> Self {
        Self {
            counter,
            build: Arc::new(build),
            docs: Arc::new(docs),
            assets: Arc::new(assets),
        }
    }
}

/// GET route that answers other methods with a plain 404 instead of 405.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(handlers::assets::not_found)
}

trait GetRoutes {
    /// Registers `path` and `path/` for the same GET handler.
    fn get_route<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static;
}

impl GetRoutes for Router<AppState> {
    fn get_route<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.route(path, get_only(handler.clone()))
            .route(&format!("{path}/"), get_only(handler))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::<AppState>::new()
        // ── Status ──────────────────────────────────────────────────────────
        .get_route("/api/greeting", handlers::greeting)
        .get_route("/health", handlers::health)
        .get_route("/readiness", handlers::readiness)
        .get_route("/devsecops-info", handlers::devsecops::devsecops_info)

        // ── Metrics ─────────────────────────────────────────────────────────
        .get_route("/metrics", handlers::metrics::metrics)

        // ── API docs: /swagger redirects to /swagger/ ──────────────────────
        .merge(state.docs.swagger_ui())

        // ── Frontend build / status page ────────────────────────────────────
        .fallback(handlers::assets::static_fallback)

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(middleware::from_fn_with_state(
            state.clone(),
            metrics::count_requests,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
