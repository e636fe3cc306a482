use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use shared::jwt::JwtConfig;

use crate::config::Config;
use crate::routes::{auth, campaigns, feedbacks, health, metrics, users};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: JwtConfig,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let jwt = JwtConfig::with_leeway(
        &config.jwt.secret,
        config.jwt.expiry_minutes,
        config.jwt.leeway_secs,
    );

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // The doubled /auth segment is part of the published client contract.
    let auth_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/login", post(auth::login));

    let campaign_routes = Router::new()
        .route("/", post(campaigns::create_campaign).get(campaigns::list_campaigns))
        .route(
            "/:campaign_id",
            get(campaigns::get_campaign)
                .put(campaigns::update_campaign)
                .delete(campaigns::delete_campaign),
        );

    // GET and PUT/DELETE read the same path parameter: a campaign id for the
    // listing, a metric id for the mutations.
    let metric_routes = Router::new()
        .route("/", post(metrics::create_metric).get(metrics::list_metrics))
        .route("/upload-metrics", post(metrics::upload_metrics))
        .route("/analyze/:campaign_id", post(metrics::analyze_campaign))
        .route(
            "/:id",
            get(metrics::list_campaign_metrics)
                .put(metrics::update_metric)
                .delete(metrics::delete_metric),
        );

    let feedback_routes = Router::new()
        .route("/send-to-n8n", post(feedbacks::send_to_n8n))
        .route("/receive-from-n8n", post(feedbacks::receive_from_n8n))
        .route("/campaign/:campaign_id", get(feedbacks::list_campaign_feedback))
        .route(
            "/:feedback_id",
            get(feedbacks::get_feedback).delete(feedbacks::delete_feedback),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route(
            "/:user_id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/auth", auth_routes)
        .nest("/campaigns", campaign_routes)
        .nest("/metrics", metric_routes)
        .nest("/feedbacks", feedback_routes)
        .nest("/users", user_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
