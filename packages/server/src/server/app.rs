//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::common::utils::PushClient;
use crate::kernel::ServerDeps;
use crate::server::middleware::admin_key_middleware;
use crate::server::routes::{
    admin_list_handler, admin_list_producers_handler, create_handler, create_producer_handler,
    delete_handler, delete_producer_handler, health_handler, notify_handler,
    payment_notice_handler, public_detail_handler, public_list_handler, public_producers_handler,
    reorder_handler, toggle_handler, upsert_handler, upsert_producer_handler, view_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, admin_api_key: String, push_server_key: Option<String>) -> Router {
    let deps = Arc::new(ServerDeps::new(
        pool.clone(),
        Arc::new(PushClient::new(push_server_key)),
    ));

    let app_state = AppState {
        db_pool: pool,
        deps,
    };

    // CORS configuration - the public site and the admin console are served
    // from other origins
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting: 10 requests per second with bursts of 20 per IP
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    // Admin routes sit behind the privileged key middleware
    let admin_routes = Router::new()
        .route("/payments/notice", post(payment_notice_handler))
        .route(
            "/producers",
            get(admin_list_producers_handler).post(create_producer_handler),
        )
        .route(
            "/producers/:id",
            put(upsert_producer_handler).delete(delete_producer_handler),
        )
        .route("/:collection/reorder", post(reorder_handler))
        .route("/:collection/toggle", post(toggle_handler))
        .route("/:collection/notify", post(notify_handler))
        .route("/:collection", get(admin_list_handler).post(create_handler))
        .route(
            "/:collection/:id",
            put(upsert_handler).delete(delete_handler),
        )
        .layer(middleware::from_fn({
            let admin_key = admin_api_key.clone();
            move |req, next| admin_key_middleware(admin_key.clone(), req, next)
        }));

    // Public routes
    let public_routes = Router::new()
        .route("/producers", get(public_producers_handler))
        .route("/news/:id/view", post(view_handler))
        .route("/:collection", get(public_list_handler))
        .route("/:collection/:id", get(public_detail_handler));

    Router::new()
        .nest("/admin", admin_routes)
        .nest("/api", public_routes)
        // Health check (no rate limit concern, still traced)
        .route("/health", get(health_handler))
        .layer(rate_limit_layer)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
