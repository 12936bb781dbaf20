//! # API エラー定義
//!
//! API サーバー固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス |
//! |-----------|----------------|
//! | `Validation` / `WeakPassword` / `DuplicateUsername` / `InvalidCredentials` | 400 Bad Request |
//! | `Unauthorized` | 401 Unauthorized |
//! | `NotFound` | 404 Not Found |
//! | `Infra`（接続不可） | 503 Service Unavailable |
//! | `Infra`（その他） | 500 Internal Server Error |
//!
//! 存在しないレコードと他人のレコードは同じ `NotFound` を返し、
//! レコードの存在を漏らさない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tripnote_domain::DomainError;
use tripnote_infra::InfraError;
use tripnote_shared::ErrorResponse;

/// API サーバーで発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力値のバリデーションエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// ユーザー名が既に使用されている
    #[error("ユーザー名は既に使用されています")]
    DuplicateUsername,

    /// パスワード強度不足
    #[error("パスワードが短すぎます")]
    WeakPassword,

    /// ユーザー名またはパスワードが正しくない
    ///
    /// ユーザー不在とパスワード不一致を区別しない。
    #[error("ユーザー名またはパスワードが正しくありません")]
    InvalidCredentials,

    /// 認証されていない（トークンなし・不明なトークン）
    #[error("認証されていません")]
    Unauthorized,

    /// リソースが見つからない（または所有者が異なる）
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// インフラ層エラー
    #[error("インフラエラー: {0}")]
    Infra(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::WeakPassword => Self::WeakPassword,
            DomainError::NotFound { entity_type, id } => {
                Self::NotFound(format!("{entity_type}: {id}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::Validation(msg) => ErrorResponse::validation_error(msg.clone()),
            ApiError::DuplicateUsername => ErrorResponse::new(
                "duplicate-username",
                "Duplicate Username",
                400,
                "ユーザー名は既に使用されています",
            ),
            ApiError::WeakPassword => ErrorResponse::new(
                "weak-password",
                "Weak Password",
                400,
                self.to_string(),
            ),
            ApiError::InvalidCredentials => ErrorResponse::new(
                "invalid-credentials",
                "Invalid Credentials",
                400,
                "ユーザー名またはパスワードが正しくありません",
            ),
            ApiError::Unauthorized => ErrorResponse::unauthorized("認証されていません"),
            ApiError::NotFound(_) => {
                ErrorResponse::not_found("リソースが見つかりません")
            }
            ApiError::Infra(e) if e.is_unavailable() => {
                tracing::error!(error = %e, "データベースに接続できません");
                ErrorResponse::service_unavailable("データベースに接続できません")
            }
            ApiError::Infra(e) => {
                tracing::error!(error = %e, span_trace = %e.span_trace(), "インフラエラー");
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::validation(
        ApiError::Validation("見出しは必須です".to_string()),
        StatusCode::BAD_REQUEST
    )]
    #[case::duplicate_username(ApiError::DuplicateUsername, StatusCode::BAD_REQUEST)]
    #[case::weak_password(ApiError::WeakPassword, StatusCode::BAD_REQUEST)]
    #[case::invalid_credentials(ApiError::InvalidCredentials, StatusCode::BAD_REQUEST)]
    #[case::unauthorized(ApiError::Unauthorized, StatusCode::UNAUTHORIZED)]
    fn test_エラー種別ごとのhttpステータス(
        #[case] error: ApiError,
        #[case] expected: StatusCode,
    ) {
        assert_eq!(error.into_response().status(), expected);
    }

    #[test]
    fn test_notfoundは404でdetailにidを含まない() {
        let response =
            ApiError::NotFound("Note: 0198c0de-0000-7000-8000-000000000000".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_domain_errorからの変換() {
        let err: ApiError = DomainError::WeakPassword.into();
        assert!(matches!(err, ApiError::WeakPassword));

        let err: ApiError = DomainError::Validation("xxx".to_string()).into();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
