//! # ml-workflow server
//!
//! REST API server for the no-code ML workflow: upload a tabular dataset,
//! preprocess it, split it into train/test partitions and train a
//! classifier, all against one shared session.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use dataset::DataFrame;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod routes;
mod state;

use config::Config;
use state::AppState;

/// Root status endpoint
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "Backend is running"
    }))
}

/// Liveness probe - is the server running?
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Serialize)]
struct CheckReport {
    name: &'static str,
    status: &'static str,
    message: String,
}

fn run_check(name: &'static str, result: Result<(), String>) -> CheckReport {
    match result {
        Ok(()) => CheckReport {
            name,
            status: "healthy",
            message: "ok".to_string(),
        },
        Err(message) => CheckReport {
            name,
            status: "unhealthy",
            message,
        },
    }
}

fn dataset_check() -> Result<(), String> {
    DataFrame::from_csv_bytes(b"a,b\n1,2\n3,4\n")
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn pipeline_check() -> Result<(), String> {
    let mut frame =
        DataFrame::from_csv_bytes(b"x,y\n1,0\n2,1\n3,0\n").map_err(|e| e.to_string())?;
    let opts = pipeline::PreprocessOptions {
        standardize: true,
        normalize: true,
    };
    pipeline::preprocess(&mut frame, "y", &opts).map_err(|e| e.to_string())
}

fn trainer_check() -> Result<(), String> {
    let frame = DataFrame::from_csv_bytes(
        b"x1,x2,y\n1,1,0\n2,2,0\n3,1,0\n8,9,1\n9,8,1\n8,8,1\n2,1,0\n9,9,1\n",
    )
    .map_err(|e| e.to_string())?;
    let split =
        trainer::train_test_split(&frame, "y", 0.25, 42).map_err(|e| e.to_string())?;
    trainer::train_and_evaluate(&split, trainer::ModelKind::DecisionTree)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Readiness probe - exercises each workflow crate on a tiny dataset
async fn readiness() -> Json<serde_json::Value> {
    let checks = vec![
        run_check("dataset", dataset_check()),
        run_check("pipeline", pipeline_check()),
        run_check("trainer", trainer_check()),
    ];
    let status = if checks.iter().all(|c| c.status == "healthy") {
        "ready"
    } else {
        "unhealthy"
    };

    Json(serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "checks": checks
    }))
}

fn app(state: AppState) -> Router {
    // CORS configuration: the workflow UI may be served from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        // Workflow stages, in order
        .route("/upload", post(routes::upload))
        .route("/preprocess", post(routes::preprocess))
        .route("/split", post(routes::split))
        .route("/train", post(routes::train))
        // Middleware layers
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    let addr = config.addr();
    let state = AppState::new(config);

    tracing::info!(
        "ml-workflow server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app(state)).await.unwrap();
}
