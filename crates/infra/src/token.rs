//! # アクセストークン生成
//!
//! CSPRNG によるアクセストークンの発行を提供する。
//!
//! トークンは 128 バイトの乱数を hex エンコードした 256 文字の
//! 不透明文字列であり、ユーザー登録時に一度だけ発行される。

use rand::RngCore;
use tripnote_domain::auth::{ACCESS_TOKEN_BYTES, AccessToken};

use crate::InfraError;

/// アクセストークン生成を担当するトレイト
///
/// テストでは固定トークンを返すスタブに差し替える。
pub trait AccessTokenGenerator: Send + Sync {
    /// 新しいアクセストークンを発行する
    fn generate(&self) -> Result<AccessToken, InfraError>;
}

/// CSPRNG によるアクセストークン生成の実装
///
/// `rand::rng()`（暗号論的に安全な ThreadRng）で 128 バイトを生成し、
/// hex エンコードする。
pub struct RandomTokenGenerator;

impl AccessTokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> Result<AccessToken, InfraError> {
        let mut bytes = [0u8; ACCESS_TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);

        AccessToken::new(hex::encode(bytes))
            .map_err(|e| InfraError::unexpected(format!("トークン生成に失敗: {e}")))
    }
}
