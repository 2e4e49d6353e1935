//! API Router with Swagger UI

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::error;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{PowerSupplyService, UserService};
use crate::config::AppConfig;
use crate::infrastructure::crypto::{JwtConfig, JwtManager, PasswordHasher};
use crate::infrastructure::database::repositories::{
    SeaOrmPowerSupplyRepository, SeaOrmUserRepository,
};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::shared::{AppError, ErrorKind};

use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, health, power_supplies, users};

/// Everything the HTTP layer needs, built once at startup.
#[derive(Clone)]
pub struct ApiContext {
    pub user_service: Arc<UserService<SeaOrmUserRepository>>,
    pub power_supply_service: Arc<PowerSupplyService<SeaOrmPowerSupplyRepository>>,
    pub jwt: JwtManager,
    pub db: DatabaseConnection,
    pub metrics: Option<PrometheusHandle>,
    pub request_timeout: Duration,
    pub started_at: Arc<Instant>,
}

impl ApiContext {
    /// Wires repositories and services over `db` using `config`.
    pub fn new(db: DatabaseConnection, config: &AppConfig, metrics: Option<PrometheusHandle>) -> Self {
        let query_timeout = config.database.query_timeout();
        let jwt = JwtManager::new(JwtConfig::from(&config.security));

        let user_repo = SeaOrmUserRepository::new(db.clone()).with_query_timeout(query_timeout);
        let power_repo =
            SeaOrmPowerSupplyRepository::new(db.clone()).with_query_timeout(query_timeout);

        Self {
            user_service: Arc::new(UserService::new(
                Arc::new(user_repo),
                PasswordHasher::new(config.security.bcrypt_cost),
                jwt.clone(),
            )),
            power_supply_service: Arc::new(PowerSupplyService::new(Arc::new(power_repo))),
            jwt,
            db,
            metrics,
            request_timeout: config.server.request_timeout(),
            started_at: Arc::new(Instant::now()),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        auth::refresh,
        auth::get_current_user,
        // Users
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Power supplies
        power_supplies::list_power_supplies,
        power_supplies::get_power_supply,
        power_supplies::create_power_supply,
        power_supplies::update_power_supply,
        power_supplies::delete_power_supply,
    ),
    components(
        schemas(
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::RefreshRequest,
            auth::TokenResponse,
            users::UserDto,
            users::UpdateUserRequest,
            power_supplies::PowerSupplyDto,
            power_supplies::CreatePowerSupplyRequest,
            power_supplies::UpdatePowerSupplyRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Registration, login (JWT), token refresh and profile"),
        (name = "Users", description = "User management"),
        (name = "Power Supplies", description = "Power supply catalog management"),
    ),
    info(
        title = "Power Supply Service API",
        version = "1.0.0",
        description = "REST API for users and the power supply catalog",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Renders a caught panic as a plain `InternalError`; the payload is logged only.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(panic = %detail, "Handler panicked");
    AppError::new(ErrorKind::InternalError, "").into_response()
}

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let middleware_state = AuthState {
        jwt: ctx.jwt.clone(),
    };

    let auth_state = auth::AuthHandlerState {
        user_service: Arc::clone(&ctx.user_service),
    };

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // User routes (protected)
    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(users::UserHandlerState {
            user_service: Arc::clone(&ctx.user_service),
        });

    // Power supply routes (protected)
    let power_routes = Router::new()
        .route(
            "/",
            get(power_supplies::list_power_supplies).post(power_supplies::create_power_supply),
        )
        .route(
            "/{id}",
            get(power_supplies::get_power_supply)
                .put(power_supplies::update_power_supply)
                .delete(power_supplies::delete_power_supply),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(power_supplies::PowerSupplyHandlerState {
            power_supply_service: Arc::clone(&ctx.power_supply_service),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: ctx.db.clone(),
            started_at: Arc::clone(&ctx.started_at),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: ctx.metrics.clone(),
        });

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    // Build router
    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1/auth", auth_routes.merge(auth_protected_routes))
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/powers", power_routes)
        // Middleware
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .layer(TimeoutLayer::new(ctx.request_timeout))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
