//! # ノートハンドラ
//!
//! ノートの CRUD エンドポイントを提供する。すべて認証必須。
//!
//! ## エンドポイント
//!
//! - `GET /notes` - 一覧取得（作成日時の降順）
//! - `POST /notes` - 作成
//! - `PATCH /notes/{id}` - 部分更新
//! - `DELETE /notes/{id}` - 削除（削除したノートを返す）
//!
//! タグのワイヤ上のフィールド名は歴史的経緯で `tags`（値は常にひとつ）。

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripnote_domain::note::{Note, NoteId, NoteTag};
use tripnote_shared::ApiResponse;
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::AuthenticatedUser,
    usecase::{NoteUseCase, UpdateNoteInput},
};

/// ノートハンドラの共有状態
pub struct NoteState {
    pub usecase: Arc<dyn NoteUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ノート作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub heading: String,
    pub message: String,
    #[serde(rename = "tags")]
    pub tag: String,
}

/// ノート部分更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub heading: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "tags")]
    pub tag: Option<String>,
}

/// ノートレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDto {
    pub id: Uuid,
    pub heading: String,
    pub message: String,
    #[serde(rename = "tags")]
    pub tag: NoteTag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Note> for NoteDto {
    fn from(note: &Note) -> Self {
        Self {
            id: *note.id().as_uuid(),
            heading: note.heading().as_str().to_string(),
            message: note.message().as_str().to_string(),
            tag: note.tag(),
            created_at: note.created_at(),
            updated_at: note.updated_at(),
        }
    }
}

// --- ハンドラ ---

/// GET /notes
#[tracing::instrument(skip_all)]
pub async fn list_notes(
    State(state): State<Arc<NoteState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError> {
    let notes = state.usecase.list(&user.user_id).await?;
    let dtos: Vec<NoteDto> = notes.iter().map(NoteDto::from).collect();

    Ok(Json(ApiResponse::new(dtos)))
}

/// POST /notes
#[tracing::instrument(skip_all)]
pub async fn create_note(
    State(state): State<Arc<NoteState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state
        .usecase
        .create(user.user_id, &req.heading, &req.message, &req.tag)
        .await?;

    Ok(Json(ApiResponse::new(NoteDto::from(&note))))
}

/// PATCH /notes/{id}
#[tracing::instrument(skip_all)]
pub async fn update_note(
    State(state): State<Arc<NoteState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state
        .usecase
        .update(
            NoteId::from_uuid(id),
            &user.user_id,
            UpdateNoteInput {
                heading: req.heading,
                message: req.message,
                tag: req.tag,
            },
        )
        .await?;

    Ok(Json(ApiResponse::new(NoteDto::from(&note))))
}

/// DELETE /notes/{id}
#[tracing::instrument(skip_all)]
pub async fn delete_note(
    State(state): State<Arc<NoteState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state
        .usecase
        .delete(NoteId::from_uuid(id), &user.user_id)
        .await?;

    Ok(Json(ApiResponse::new(NoteDto::from(&note))))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
        middleware::from_fn_with_state,
        routing::{get, patch},
    };
    use tower::ServiceExt;
    use tripnote_domain::{
        auth::{ACCESS_TOKEN_HEX_LEN, AccessToken},
        clock::FixedClock,
        password::PasswordHash,
        user::{User, UserId, Username},
    };
    use tripnote_infra::mock::{MockNoteRepository, MockUserRepository};

    use super::*;
    use crate::{
        middleware::{AuthLayerState, require_auth},
        usecase::NoteUseCaseImpl,
    };

    // テストアプリ構築

    fn token_for(seed: &str) -> AccessToken {
        AccessToken::new(seed.repeat(ACCESS_TOKEN_HEX_LEN / seed.len())).unwrap()
    }

    fn test_user(name: &str, token: &AccessToken) -> User {
        User::new(
            UserId::new(),
            Username::new(name).unwrap(),
            PasswordHash::new("$argon2id$v=19$..."),
            token.clone(),
            chrono::Utc::now(),
        )
    }

    fn create_test_app(user_repo: MockUserRepository, note_repo: MockNoteRepository) -> Router {
        let clock = Arc::new(FixedClock::new(
            chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let note_state = Arc::new(NoteState {
            usecase: Arc::new(NoteUseCaseImpl::new(Arc::new(note_repo), clock)),
        });
        let auth_layer_state = AuthLayerState {
            user_repository: Arc::new(user_repo),
        };

        Router::new()
            .route("/notes", get(list_notes).post(create_note))
            .route("/notes/{id}", patch(update_note).delete(delete_note))
            .with_state(note_state)
            .route_layer(from_fn_with_state(auth_layer_state, require_auth))
    }

    fn request(method: Method, uri: &str, token: &AccessToken, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", token.as_str());

        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    // テスト

    #[tokio::test]
    async fn test_create_note_はtagsフィールドで作成しdtoを返す() {
        // Given
        let token = token_for("ab");
        let user_repo = MockUserRepository::new();
        user_repo.add_user(test_user("alice", &token));
        let sut = create_test_app(user_repo, MockNoteRepository::new());

        let body = serde_json::json!({
            "heading": "Trip",
            "message": "Remember passport",
            "tags": "travel"
        });

        // When
        let response = sut
            .oneshot(request(Method::POST, "/notes", &token, Some(body)))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["heading"], "Trip");
        assert_eq!(json["data"]["tags"], "travel");
    }

    #[tokio::test]
    async fn test_create_note_不正なタグは400() {
        // Given
        let token = token_for("ab");
        let user_repo = MockUserRepository::new();
        user_repo.add_user(test_user("alice", &token));
        let sut = create_test_app(user_repo, MockNoteRepository::new());

        let body = serde_json::json!({
            "heading": "Trip",
            "message": "Remember passport",
            "tags": "invalid"
        });

        // When
        let response = sut
            .oneshot(request(Method::POST, "/notes", &token, Some(body)))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_notes_トークンなしは401() {
        // Given
        let sut = create_test_app(MockUserRepository::new(), MockNoteRepository::new());

        let request = Request::builder()
            .method(Method::GET)
            .uri("/notes")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_notes_自分のノートだけが返る() {
        // Given: 二人のユーザーがそれぞれノートを持つ
        let alice_token = token_for("ab");
        let bob_token = token_for("cd");
        let user_repo = MockUserRepository::new();
        user_repo.add_user(test_user("alice", &alice_token));
        user_repo.add_user(test_user("bob", &bob_token));
        let sut = create_test_app(user_repo, MockNoteRepository::new());

        let alice_note = serde_json::json!({
            "heading": "Alice",
            "message": "alice's note",
            "tags": "work"
        });
        let bob_note = serde_json::json!({
            "heading": "Bob",
            "message": "bob's note",
            "tags": "personal"
        });
        sut.clone()
            .oneshot(request(Method::POST, "/notes", &alice_token, Some(alice_note)))
            .await
            .unwrap();
        sut.clone()
            .oneshot(request(Method::POST, "/notes", &bob_token, Some(bob_note)))
            .await
            .unwrap();

        // When: alice の一覧
        let response = sut
            .oneshot(request(Method::GET, "/notes", &alice_token, None))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let notes = json["data"].as_array().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0]["heading"], "Alice");
    }

    #[tokio::test]
    async fn test_delete_note_他ユーザーのノートは404() {
        // Given: alice がノートを作成
        let alice_token = token_for("ab");
        let bob_token = token_for("cd");
        let user_repo = MockUserRepository::new();
        user_repo.add_user(test_user("alice", &alice_token));
        user_repo.add_user(test_user("bob", &bob_token));
        let sut = create_test_app(user_repo, MockNoteRepository::new());

        let body = serde_json::json!({
            "heading": "Alice",
            "message": "alice's note",
            "tags": "work"
        });
        let created = sut
            .clone()
            .oneshot(request(Method::POST, "/notes", &alice_token, Some(body)))
            .await
            .unwrap();
        let note_id = json_body(created).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        // When: bob が削除を試みる
        let response = sut
            .oneshot(request(
                Method::DELETE,
                &format!("/notes/{note_id}"),
                &bob_token,
                None,
            ))
            .await
            .unwrap();

        // Then: 存在しない場合と同じ 404
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_note_部分更新でdtoを返す() {
        // Given
        let token = token_for("ab");
        let user_repo = MockUserRepository::new();
        user_repo.add_user(test_user("alice", &token));
        let sut = create_test_app(user_repo, MockNoteRepository::new());

        let body = serde_json::json!({
            "heading": "Trip",
            "message": "Remember passport",
            "tags": "travel"
        });
        let created = sut
            .clone()
            .oneshot(request(Method::POST, "/notes", &token, Some(body)))
            .await
            .unwrap();
        let note_id = json_body(created).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        // When: タグだけ更新
        let patch_body = serde_json::json!({"tags": "shopping"});
        let response = sut
            .oneshot(request(
                Method::PATCH,
                &format!("/notes/{note_id}"),
                &token,
                Some(patch_body),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["tags"], "shopping");
        assert_eq!(json["data"]["heading"], "Trip");
    }
}
