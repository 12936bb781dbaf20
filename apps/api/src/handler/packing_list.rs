//! # 持ち物リストハンドラ
//!
//! 持ち物リストアイテムの CRUD エンドポイントを提供する。すべて認証必須。
//!
//! ## エンドポイント
//!
//! - `GET /packinglist` - 一覧取得（作成日時の降順）
//! - `POST /packinglist` - 作成（未完了で作成される）
//! - `PATCH /packinglist/{id}` - 部分更新
//! - `PATCH /packinglist/{id}/completed` - 完了状態の変更
//! - `DELETE /packinglist/{id}` - 削除（削除したアイテムを返す）

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripnote_domain::packing_list::{PackingListItem, PackingListItemId};
use tripnote_shared::ApiResponse;
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::AuthenticatedUser,
    usecase::{PackingListUseCase, UpdatePackingListItemInput},
};

/// 持ち物リストハンドラの共有状態
pub struct PackingListState {
    pub usecase: Arc<dyn PackingListUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// アイテム作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreatePackingListItemRequest {
    pub heading: String,
    pub message: String,
}

/// アイテム部分更新リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackingListItemRequest {
    pub heading: Option<String>,
    pub message: Option<String>,
    pub is_completed: Option<bool>,
}

/// 完了状態変更リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCompletedRequest {
    pub is_completed: bool,
}

/// アイテムレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingListItemDto {
    pub id: Uuid,
    pub heading: String,
    pub message: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PackingListItem> for PackingListItemDto {
    fn from(item: &PackingListItem) -> Self {
        Self {
            id: *item.id().as_uuid(),
            heading: item.heading().as_str().to_string(),
            message: item.message().as_str().to_string(),
            is_completed: item.is_completed(),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        }
    }
}

// --- ハンドラ ---

/// GET /packinglist
#[tracing::instrument(skip_all)]
pub async fn list_packing_list_items(
    State(state): State<Arc<PackingListState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.usecase.list(&user.user_id).await?;
    let dtos: Vec<PackingListItemDto> = items.iter().map(PackingListItemDto::from).collect();

    Ok(Json(ApiResponse::new(dtos)))
}

/// POST /packinglist
#[tracing::instrument(skip_all)]
pub async fn create_packing_list_item(
    State(state): State<Arc<PackingListState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<CreatePackingListItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .usecase
        .create(user.user_id, &req.heading, &req.message)
        .await?;

    Ok(Json(ApiResponse::new(PackingListItemDto::from(&item))))
}

/// PATCH /packinglist/{id}
#[tracing::instrument(skip_all)]
pub async fn update_packing_list_item(
    State(state): State<Arc<PackingListState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePackingListItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .usecase
        .update(
            PackingListItemId::from_uuid(id),
            &user.user_id,
            UpdatePackingListItemInput {
                heading: req.heading,
                message: req.message,
                is_completed: req.is_completed,
            },
        )
        .await?;

    Ok(Json(ApiResponse::new(PackingListItemDto::from(&item))))
}

/// PATCH /packinglist/{id}/completed
#[tracing::instrument(skip_all)]
pub async fn set_packing_list_item_completed(
    State(state): State<Arc<PackingListState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetCompletedRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .usecase
        .set_completed(
            PackingListItemId::from_uuid(id),
            &user.user_id,
            req.is_completed,
        )
        .await?;

    Ok(Json(ApiResponse::new(PackingListItemDto::from(&item))))
}

/// DELETE /packinglist/{id}
#[tracing::instrument(skip_all)]
pub async fn delete_packing_list_item(
    State(state): State<Arc<PackingListState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .usecase
        .delete(PackingListItemId::from_uuid(id), &user.user_id)
        .await?;

    Ok(Json(ApiResponse::new(PackingListItemDto::from(&item))))
}
