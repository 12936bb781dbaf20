//! # NoteRepository
//!
//! ノートの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **所有者スコープの変更**: 削除・更新は id と所有者の両方が一致する
//!   単一ステートメントで行い、「存在しない」と「他人の所有」を区別しない
//! - **原子的な find-and-remove**: 削除は `DELETE ... RETURNING` で
//!   検索と削除を一度に行う

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tripnote_domain::{
    note::{Note, NoteId, NoteTag},
    user::UserId,
    value_objects::{Heading, Message},
};
use uuid::Uuid;

use crate::error::InfraError;

/// ノートリポジトリトレイト
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// ノートを保存する
    async fn insert(&self, note: &Note) -> Result<(), InfraError>;

    /// 所有者のノート一覧を作成日時の降順で取得する
    ///
    /// 該当がなければ空の Vec を返す。エラーになるのはストア障害時のみ。
    async fn find_all_by_owner(&self, owner_id: &UserId) -> Result<Vec<Note>, InfraError>;

    /// id と所有者の両方が一致するノートを取得する
    async fn find_owned(
        &self,
        id: &NoteId,
        owner_id: &UserId,
    ) -> Result<Option<Note>, InfraError>;

    /// id と所有者の両方が一致するノートを原子的に削除し、削除した行を返す
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(note))`: 削除に成功
    /// - `Ok(None)`: 該当なし（存在しない、または所有者が異なる）
    async fn delete_owned(
        &self,
        id: &NoteId,
        owner_id: &UserId,
    ) -> Result<Option<Note>, InfraError>;

    /// 所有者スコープでノートを更新する
    ///
    /// # 戻り値
    ///
    /// - `Ok(true)`: 更新に成功
    /// - `Ok(false)`: 該当なし（存在しない、または所有者が異なる）
    async fn update_owned(&self, note: &Note) -> Result<bool, InfraError>;
}

/// notes テーブルの行
#[derive(sqlx::FromRow)]
struct NoteRow {
    id: Uuid,
    owner_id: Uuid,
    heading: String,
    message: String,
    tag: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NoteRow {
    fn into_note(self) -> Result<Note, InfraError> {
        Ok(Note::from_db(
            NoteId::from_uuid(self.id),
            UserId::from_uuid(self.owner_id),
            Heading::new(&self.heading).map_err(|e| InfraError::unexpected(e.to_string()))?,
            Message::new(&self.message).map_err(|e| InfraError::unexpected(e.to_string()))?,
            self.tag
                .parse::<NoteTag>()
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// PostgreSQL 実装の NoteRepository
#[derive(Debug, Clone)]
pub struct PostgresNoteRepository {
    pool: PgPool,
}

impl PostgresNoteRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn insert(&self, note: &Note) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, owner_id, heading, message, tag, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(note.id().as_uuid())
        .bind(note.owner_id().as_uuid())
        .bind(note.heading().as_str())
        .bind(note.message().as_str())
        .bind(note.tag().to_string())
        .bind(note.created_at())
        .bind(note.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_all_by_owner(&self, owner_id: &UserId) -> Result<Vec<Note>, InfraError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, owner_id, heading, message, tag, created_at, updated_at
            FROM notes
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(NoteRow::into_note).collect()
    }

    async fn find_owned(
        &self,
        id: &NoteId,
        owner_id: &UserId,
    ) -> Result<Option<Note>, InfraError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, owner_id, heading, message, tag, created_at, updated_at
            FROM notes
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(NoteRow::into_note).transpose()
    }

    async fn delete_owned(
        &self,
        id: &NoteId,
        owner_id: &UserId,
    ) -> Result<Option<Note>, InfraError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            DELETE FROM notes
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, heading, message, tag, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(NoteRow::into_note).transpose()
    }

    async fn update_owned(&self, note: &Note) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET heading = $3, message = $4, tag = $5, updated_at = $6
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(note.id().as_uuid())
        .bind(note.owner_id().as_uuid())
        .bind(note.heading().as_str())
        .bind(note.message().as_str())
        .bind(note.tag().to_string())
        .bind(note.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
