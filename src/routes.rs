use axum::{http::StatusCode, middleware, routing::get, Router};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::manager::DatabaseManager;
use crate::envelope::Envelope;
use crate::handlers::{locations, pets};
use crate::middleware::bearer_auth_middleware;

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected resources (bearer token required)
        .merge(location_routes())
        .merge(pet_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn location_routes() -> Router {
    Router::new()
        .route("/locations", get(locations::list).post(locations::create))
        .route(
            "/locations/:groomer_id",
            get(locations::get)
                .put(locations::update)
                .delete(locations::delete),
        )
        .route_layer(middleware::from_fn(bearer_auth_middleware))
}

fn pet_routes() -> Router {
    Router::new()
        .route("/profiles/:id/pets", get(pets::list).post(pets::create))
        .route(
            "/profiles/:id/pets/:pet_id",
            get(pets::get).put(pets::update).delete(pets::delete),
        )
        .route_layer(middleware::from_fn(bearer_auth_middleware))
}

async fn root() -> Envelope {
    let version = env!("CARGO_PKG_VERSION");

    Envelope::ok(
        "Groomer API",
        json!({
            "name": "Groomer API",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "locations": "/locations[/:groomerId] (protected)",
                "pets": "/profiles/:id/pets[/:petId] (protected, owner-scoped)",
            }
        }),
    )
}

async fn health() -> Envelope {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => Envelope::ok(
            "ok",
            json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            }),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Envelope::with_status(
                StatusCode::SERVICE_UNAVAILABLE,
                "degraded",
                Vec::new(),
                json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                }),
            )
        }
    }
}
