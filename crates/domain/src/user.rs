//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`User`] | ユーザー | ユーザー名・パスワードで登録し、アクセストークンで認証する |
//! | [`Username`] | ユーザー名 | 小文字に正規化され、システム全体で一意 |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は UUID をラップし、型安全性を確保
//! - **不変性**: エンティティフィールドは不変。アクセストークンは
//!   登録時に発行され、以後ローテーションしない
//! - **正規化**: ユーザー名は生成時に小文字へ正規化し、
//!   大文字小文字を区別しない一意性を値レベルで保証する

use chrono::{DateTime, Utc};

use crate::{DomainError, auth::AccessToken, password::PasswordHash};

define_uuid_id! {
    /// ユーザー ID（一意識別子）
    ///
    /// UUID v7 を使用し、生成順にソート可能。
    pub struct UserId;
}

/// ユーザー名の最大文字数
const MAX_USERNAME_LENGTH: usize = 30;

/// ユーザー名（値オブジェクト）
///
/// 生成時に前後の空白を除去し、小文字へ正規化する。
/// `"Alice"` と `"alice"` は同じユーザー名として扱われる。
///
/// # バリデーション
///
/// - 空文字列ではない
/// - 最大 30 文字
/// - 空白文字を含まない
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Username(String);

impl Username {
    /// ユーザー名を作成する
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "ユーザー名は必須です".to_string(),
            ));
        }

        if value.chars().count() > MAX_USERNAME_LENGTH {
            return Err(DomainError::Validation(format!(
                "ユーザー名は {MAX_USERNAME_LENGTH} 文字以内である必要があります"
            )));
        }

        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation(
                "ユーザー名に空白文字は使用できません".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーエンティティ
///
/// アプリケーションのユーザーを表現する。ユーザー名とパスワードで登録し、
/// 登録時に発行されたアクセストークンでリクエストごとに認証される。
///
/// # 不変条件
///
/// - `username` はシステム全体で一意（大文字小文字を区別しない）
/// - `access_token` はユーザーレコードの生存期間中、ちょうど一人の
///   ユーザーを特定する（ローテーション・失効なし）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
    access_token: AccessToken,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// 新しいユーザーを作成する
    ///
    /// # 引数
    ///
    /// - `id`: ユーザー ID
    /// - `username`: 正規化済みユーザー名
    /// - `password_hash`: 計算済みパスワードハッシュ
    /// - `access_token`: 発行済みアクセストークン
    /// - `now`: 現在日時（呼び出し元から注入）
    pub fn new(
        id: UserId,
        username: Username,
        password_hash: PasswordHash,
        access_token: AccessToken,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            access_token,
            created_at: now,
            updated_at: now,
        }
    }

    /// 既存のデータからユーザーを復元する（データベースから取得時）
    pub fn from_db(
        id: UserId,
        username: Username,
        password_hash: PasswordHash,
        access_token: AccessToken,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            access_token,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
