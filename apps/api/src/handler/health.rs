//! # ヘルスチェックハンドラ
//!
//! API サーバーの稼働状態を確認するためのエンドポイント。
//!
//! - `GET /health` - Liveness（プロセスが応答できるか）
//! - `GET /health/ready` - Readiness（データベースに到達できるか）

use std::{collections::HashMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode};
use sqlx::PgPool;
use tripnote_infra::db;
use tripnote_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

/// Readiness チェックの共有状態
pub struct ReadinessState {
    pub pool: PgPool,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health/ready
///
/// データベースに `SELECT 1` を発行し、到達できない場合は 503 を返す。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(
    State(state): State<Arc<ReadinessState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database_status = match db::ping(&state.pool).await {
        Ok(()) => CheckStatus::Ok,
        Err(e) => {
            tracing::warn!(error = %e, "データベースに到達できません");
            CheckStatus::Error
        }
    };

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), database_status.clone());

    match database_status {
        CheckStatus::Ok => (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: ReadinessStatus::Ready,
                checks,
            }),
        ),
        CheckStatus::Error => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: ReadinessStatus::NotReady,
                checks,
            }),
        ),
    }
}
