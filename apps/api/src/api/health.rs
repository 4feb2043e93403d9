use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_helpers::{run_health_checks, HealthCheckFuture};

use crate::state::AppState;

/// Readiness probe: verifies both stores answer.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let mongo_client = state.db.client().clone();
    let mut redis = state.redis.clone();

    let checks: Vec<(&str, HealthCheckFuture)> = vec![
        (
            "database",
            Box::pin(async move {
                if database::mongodb::check_health(&mongo_client).await {
                    Ok(())
                } else {
                    Err("mongodb unreachable".to_string())
                }
            }),
        ),
        (
            "cache",
            Box::pin(async move {
                database::redis::check_health(&mut redis)
                    .await
                    .map_err(|e| e.to_string())
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok(ok) => ok.into_response(),
        Err(err) => err.into_response(),
    }
}
