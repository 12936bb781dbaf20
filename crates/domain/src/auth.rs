//! # アクセストークン
//!
//! ベアラートークン認証に使用する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`AccessToken`] | アクセストークン | ユーザー登録時に発行される不透明トークン |
//!
//! ## トークンのライフサイクル
//!
//! アクセストークンはユーザー登録時に一度だけ生成され、
//! ローテーションも失効もしない。リクエストごとに `Authorization`
//! ヘッダーで送信され、完全一致でユーザーを特定する。

use crate::DomainError;

/// トークンの乱数バイト数
pub const ACCESS_TOKEN_BYTES: usize = 128;

/// hex エンコード後のトークン文字数（128 バイト × 2）
pub const ACCESS_TOKEN_HEX_LEN: usize = 256;

/// アクセストークン（値オブジェクト）
///
/// CSPRNG で生成した 128 バイトを hex エンコードした 256 文字の
/// 不透明文字列をラップする。
///
/// # 不変条件
///
/// - 長さは 256 文字
/// - 小文字の hex 文字（`0-9a-f`）のみ
///
/// # セキュリティ
///
/// トークンは資格情報そのものであるため、Debug 出力ではマスクする。
/// serde には直接載せない（レスポンスへは DTO が `as_str()` を写す）。
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

impl AccessToken {
    /// アクセストークンを作成する
    ///
    /// # バリデーション
    ///
    /// - 長さが [`ACCESS_TOKEN_HEX_LEN`] 文字
    /// - 小文字 hex 文字のみ
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.chars().count() != ACCESS_TOKEN_HEX_LEN {
            return Err(DomainError::Validation(format!(
                "アクセストークンは {ACCESS_TOKEN_HEX_LEN} 文字である必要があります"
            )));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        {
            return Err(DomainError::Validation(
                "アクセストークンは小文字の hex 文字列である必要があります".to_string(),
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

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn valid_token_string() -> String {
        "ab".repeat(ACCESS_TOKEN_HEX_LEN / 2)
    }

    #[rstest]
    fn test_正しい形式のトークンを作成できる() {
        let token = AccessToken::new(valid_token_string()).unwrap();
        assert_eq!(token.as_str().len(), ACCESS_TOKEN_HEX_LEN);
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case("abcdef", "短すぎる")]
    fn test_長さが不正なトークンを拒否する(#[case] input: &str, #[case] _reason: &str) {
        assert!(AccessToken::new(input).is_err());
    }

    #[rstest]
    fn test_hex以外の文字を含むトークンを拒否する() {
        let mut value = valid_token_string();
        value.replace_range(0..1, "g");
        assert!(AccessToken::new(value).is_err());
    }

    #[rstest]
    fn test_大文字hexのトークンを拒否する() {
        let value = "AB".repeat(ACCESS_TOKEN_HEX_LEN / 2);
        assert!(AccessToken::new(value).is_err());
    }

    #[rstest]
    fn test_debug出力はマスクされる() {
        let token = AccessToken::new(valid_token_string()).unwrap();
        let debug = format!("{:?}", token);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("abab"));
    }
}
