//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **一意性の最終防衛線**: `users.username` と `users.access_token` の
//!   一意インデックスで重複を DB レベルでも防ぐ
//! - **完全一致のトークン解決**: `find_by_access_token` は認証ゲートから
//!   リクエストごとに呼ばれる

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tripnote_domain::{
    auth::AccessToken,
    password::PasswordHash,
    user::{User, UserId, Username},
};
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
///
/// ユーザー情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを保存する
    ///
    /// # 戻り値
    ///
    /// - `Ok(())`: 保存成功
    /// - `Err(e)` where `e.is_unique_violation()`: ユーザー名の重複
    ///   （事前チェックとのレース時に発生）
    /// - `Err(_)`: その他のデータベースエラー
    async fn insert(&self, user: &User) -> Result<(), InfraError>;

    /// ユーザー名でユーザーを検索
    ///
    /// ユーザー名は値オブジェクト側で小文字に正規化済みのため、
    /// ここでは完全一致で検索する。
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError>;

    /// アクセストークンでユーザーを検索（完全一致）
    ///
    /// 認証ゲートがリクエストごとに呼び出す。
    async fn find_by_access_token(&self, token: &AccessToken) -> Result<Option<User>, InfraError>;
}

/// users テーブルの行
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    access_token: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// 行をドメインエンティティに復元する
    ///
    /// 永続化済みデータが値オブジェクトの検証を通らない場合は
    /// データ破損として `Unexpected` を返す。
    fn into_user(self) -> Result<User, InfraError> {
        Ok(User::from_db(
            UserId::from_uuid(self.id),
            Username::new(&self.username).map_err(|e| InfraError::unexpected(e.to_string()))?,
            PasswordHash::new(self.password_hash),
            AccessToken::new(self.access_token)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, access_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_str())
        .bind(user.password_hash().as_str())
        .bind(user.access_token().as_str())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, access_token, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_access_token(&self, token: &AccessToken) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, access_token, created_at, updated_at
            FROM users
            WHERE access_token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}
