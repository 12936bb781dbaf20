//! # 認証ユースケース
//!
//! ユーザー登録とログインのビジネスロジックを実装する。
//!
//! ## タイミング攻撃対策
//!
//! ログインでは、ユーザーが存在しない場合もダミーハッシュで
//! 検証を実行し、処理時間を均一化する。

use std::sync::Arc;

use async_trait::async_trait;
use tripnote_domain::{
    clock::Clock,
    password::{PasswordHash, PlainPassword},
    user::{User, UserId, Username},
};
use tripnote_infra::{AccessTokenGenerator, PasswordHasher, repository::UserRepository};

use crate::error::ApiError;

/// 認証ユースケーストレイト
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// ユーザーを登録する
    ///
    /// アクセストークンは登録時に一度だけ発行され、以後ローテーションしない。
    ///
    /// # エラー
    ///
    /// - `Validation`: ユーザー名の形式が不正
    /// - `DuplicateUsername`: ユーザー名が使用済み（大文字小文字を区別しない）。
    ///   パスワード強度より優先して判定される
    /// - `WeakPassword`: パスワードが 8 文字未満
    async fn register(&self, username: &str, password: &str) -> Result<User, ApiError>;

    /// ログインする
    ///
    /// 成功時は登録時に発行された同じトークンを持つユーザーを返す。
    ///
    /// # エラー
    ///
    /// - `InvalidCredentials`: ユーザー不在とパスワード不一致を区別しない
    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError>;
}

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_generator: Arc<dyn AccessTokenGenerator>,
    clock: Arc<dyn Clock>,
}

impl AuthUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_generator: Arc<dyn AccessTokenGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_generator,
            clock,
        }
    }

    /// ダミーハッシュで検証を実行する（タイミング攻撃対策）
    ///
    /// ユーザーが存在しない場合も実際のパスワード検証と同等の時間を
    /// 消費し、ユーザー存在確認攻撃を防ぐ。
    fn dummy_verification(&self, password: &PlainPassword) {
        // ダミーハッシュ（有効な Argon2id 形式）
        let dummy_hash = PasswordHash::new(
            "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        );
        // 結果は無視（エラーでも問題ない）
        let _ = self.password_hasher.verify(password, &dummy_hash);
    }
}

#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    async fn register(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let username = Username::new(username)?;

        // 重複チェックはパスワード強度より先。既存ユーザー名への再登録は
        // パスワードの内容によらず常に DuplicateUsername を返す。
        // 挿入時の一意制約違反もカバーするので、
        // ここで取りこぼしても競合は DuplicateUsername に落ちる。
        if self
            .user_repository
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(ApiError::DuplicateUsername);
        }

        let plain_password = PlainPassword::new(password);
        plain_password.validate_strength()?;

        let password_hash = self.password_hasher.hash(&plain_password)?;
        let access_token = self.token_generator.generate()?;

        let user = User::new(
            UserId::new(),
            username,
            password_hash,
            access_token,
            self.clock.now(),
        );

        self.user_repository.insert(&user).await.map_err(|e| {
            if e.is_unique_violation() {
                ApiError::DuplicateUsername
            } else {
                ApiError::Infra(e)
            }
        })?;

        Ok(user)
    }

    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let plain_password = PlainPassword::new(password);

        // 形式不正なユーザー名は存在しないユーザーと同じ扱い
        let Ok(username) = Username::new(username) else {
            self.dummy_verification(&plain_password);
            return Err(ApiError::InvalidCredentials);
        };

        let Some(user) = self.user_repository.find_by_username(&username).await? else {
            self.dummy_verification(&plain_password);
            return Err(ApiError::InvalidCredentials);
        };

        let result = self
            .password_hasher
            .verify(&plain_password, user.password_hash())?;

        if result.is_mismatch() {
            return Err(ApiError::InvalidCredentials);
        }

        Ok(user)
    }
}
