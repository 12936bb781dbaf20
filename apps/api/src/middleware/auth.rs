//! # 認証ミドルウェア
//!
//! `Authorization` ヘッダーのアクセストークンを検証し、
//! 認証済みユーザーをリクエスト拡張に注入する。
//!
//! ## プロトコル
//!
//! トークンは `Authorization` ヘッダーにスキームなしの生の値として
//! 送信される（`Bearer` プレフィックスなし）。ヘッダーがない、
//! 形式が不正、または一致するユーザーがいない場合は 401 を返し、
//! 保護されたハンドラは実行されない。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! Router::new()
//!     .route("/notes", get(list_notes))
//!     .route_layer(from_fn_with_state(auth_layer_state, require_auth))
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tripnote_domain::{
    auth::AccessToken,
    user::{UserId, Username},
};
use tripnote_infra::repository::UserRepository;

use crate::error::ApiError;

/// 認証ミドルウェアの状態
#[derive(Clone)]
pub struct AuthLayerState {
    pub user_repository: Arc<dyn UserRepository>,
}

/// 認証済みユーザー
///
/// トークン解決に成功した後、リクエスト拡張に挿入される。
/// ハンドラは `Extension<AuthenticatedUser>` で取り出す。
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: Username,
}

/// 認証ミドルウェア
///
/// トークンが解決できた場合のみ後続のハンドラを実行する。
pub async fn require_auth(
    State(state): State<AuthLayerState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    // ヘッダー値を取り出す（欠落・非 ASCII は 401）
    let Some(raw_token) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return ApiError::Unauthorized.into_response();
    };

    // 形式チェック（長さ・hex）に通らないトークンは照合するまでもなく 401
    let Ok(token) = AccessToken::new(raw_token) else {
        return ApiError::Unauthorized.into_response();
    };

    let user = match state.user_repository.find_by_access_token(&token).await {
        Ok(Some(user)) => user,
        Ok(None) => return ApiError::Unauthorized.into_response(),
        Err(e) => return ApiError::Infra(e).into_response(),
    };

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id().clone(),
        username: user.username().clone(),
    });

    next.run(request).await
}
