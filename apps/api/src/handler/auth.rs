//! # 認証ハンドラ
//!
//! 登録・ログインのエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /register` - ユーザー登録（201 Created）
//! - `POST /login` - ログイン（200 OK）
//!
//! どちらも `{data: {userId, username, accessToken}}` を返す。
//! トークンは登録時に発行されたものがそのまま返り続ける。

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tripnote_domain::user::User;
use tripnote_shared::ApiResponse;
use uuid::Uuid;

use crate::{error::ApiError, usecase::AuthUseCase};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub usecase: Arc<dyn AuthUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// 登録・ログイン共通のリクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// 認証済みユーザーのレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserDto {
    pub user_id: Uuid,
    pub username: String,
    pub access_token: String,
}

impl From<&User> for AuthUserDto {
    fn from(user: &User) -> Self {
        Self {
            user_id: *user.id().as_uuid(),
            username: user.username().as_str().to_string(),
            access_token: user.access_token().as_str().to_string(),
        }
    }
}

// --- ハンドラ ---

/// POST /register
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.usecase.register(&req.username, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(AuthUserDto::from(&user))),
    ))
}

/// POST /login
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.usecase.login(&req.username, &req.password).await?;

    Ok(Json(ApiResponse::new(AuthUserDto::from(&user))))
}
