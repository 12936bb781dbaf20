//! # PackingListRepository
//!
//! 持ち物リストアイテムの永続化を担当するリポジトリ。
//!
//! 所有者スコープの扱いは [`super::note_repository`] と同じ。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tripnote_domain::{
    packing_list::{PackingListItem, PackingListItemId},
    user::UserId,
    value_objects::{Heading, Message},
};
use uuid::Uuid;

use crate::error::InfraError;

/// 持ち物リストリポジトリトレイト
#[async_trait]
pub trait PackingListRepository: Send + Sync {
    /// アイテムを保存する
    async fn insert(&self, item: &PackingListItem) -> Result<(), InfraError>;

    /// 所有者のアイテム一覧を作成日時の降順で取得する
    async fn find_all_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<PackingListItem>, InfraError>;

    /// id と所有者の両方が一致するアイテムを取得する
    async fn find_owned(
        &self,
        id: &PackingListItemId,
        owner_id: &UserId,
    ) -> Result<Option<PackingListItem>, InfraError>;

    /// id と所有者の両方が一致するアイテムを原子的に削除し、削除した行を返す
    async fn delete_owned(
        &self,
        id: &PackingListItemId,
        owner_id: &UserId,
    ) -> Result<Option<PackingListItem>, InfraError>;

    /// 所有者スコープでアイテムを更新する
    ///
    /// # 戻り値
    ///
    /// - `Ok(true)`: 更新に成功
    /// - `Ok(false)`: 該当なし（存在しない、または所有者が異なる）
    async fn update_owned(&self, item: &PackingListItem) -> Result<bool, InfraError>;
}

/// packing_list_items テーブルの行
#[derive(sqlx::FromRow)]
struct PackingListItemRow {
    id: Uuid,
    owner_id: Uuid,
    heading: String,
    message: String,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PackingListItemRow {
    fn into_item(self) -> Result<PackingListItem, InfraError> {
        Ok(PackingListItem::from_db(
            PackingListItemId::from_uuid(self.id),
            UserId::from_uuid(self.owner_id),
            Heading::new(&self.heading).map_err(|e| InfraError::unexpected(e.to_string()))?,
            Message::new(&self.message).map_err(|e| InfraError::unexpected(e.to_string()))?,
            self.is_completed,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// PostgreSQL 実装の PackingListRepository
#[derive(Debug, Clone)]
pub struct PostgresPackingListRepository {
    pool: PgPool,
}

impl PostgresPackingListRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PackingListRepository for PostgresPackingListRepository {
    async fn insert(&self, item: &PackingListItem) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO packing_list_items
                (id, owner_id, heading, message, is_completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.owner_id().as_uuid())
        .bind(item.heading().as_str())
        .bind(item.message().as_str())
        .bind(item.is_completed())
        .bind(item.created_at())
        .bind(item.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_all_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<PackingListItem>, InfraError> {
        let rows = sqlx::query_as::<_, PackingListItemRow>(
            r#"
            SELECT id, owner_id, heading, message, is_completed, created_at, updated_at
            FROM packing_list_items
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PackingListItemRow::into_item).collect()
    }

    async fn find_owned(
        &self,
        id: &PackingListItemId,
        owner_id: &UserId,
    ) -> Result<Option<PackingListItem>, InfraError> {
        let row = sqlx::query_as::<_, PackingListItemRow>(
            r#"
            SELECT id, owner_id, heading, message, is_completed, created_at, updated_at
            FROM packing_list_items
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PackingListItemRow::into_item).transpose()
    }

    async fn delete_owned(
        &self,
        id: &PackingListItemId,
        owner_id: &UserId,
    ) -> Result<Option<PackingListItem>, InfraError> {
        let row = sqlx::query_as::<_, PackingListItemRow>(
            r#"
            DELETE FROM packing_list_items
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, heading, message, is_completed, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PackingListItemRow::into_item).transpose()
    }

    async fn update_owned(&self, item: &PackingListItem) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE packing_list_items
            SET heading = $3, message = $4, is_completed = $5, updated_at = $6
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.owner_id().as_uuid())
        .bind(item.heading().as_str())
        .bind(item.message().as_str())
        .bind(item.is_completed())
        .bind(item.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
