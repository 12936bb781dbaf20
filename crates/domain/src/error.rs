//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **HTTP ステータスへのマッピング**: API 層でステータスコードに変換可能
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `WeakPassword` | 400 Bad Request | パスワード強度不足 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//!
//! ## 使用例
//!
//! ```rust
//! use tripnote_domain::DomainError;
//!
//! fn validate_heading(heading: &str) -> Result<(), DomainError> {
//!     if heading.is_empty() {
//!         return Err(DomainError::Validation("見出しは必須です".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// 登録時に要求するパスワードの最小文字数
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// ドメイン層で発生するエラー
///
/// ビジネスロジックの実行中に発生する例外状態を表現する。
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の超過
    /// - 不正なタグ名
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// パスワード強度不足
    ///
    /// 登録時のパスワードが最小文字数（[`MIN_PASSWORD_LENGTH`]）に
    /// 満たない場合に使用する。ログイン時の検証では発生しない。
    #[error("パスワードは {MIN_PASSWORD_LENGTH} 文字以上である必要があります")]
    WeakPassword,

    /// エンティティが見つからない
    ///
    /// 指定された ID のエンティティが存在しない場合に使用する。
    /// 所有者が異なる場合も同じエラーを返し、レコードの存在を漏らさない。
    ///
    /// # フィールド
    ///
    /// - `entity_type`: エンティティの種類（コンパイル時に決定される `&'static str`）
    /// - `id`: 検索に使用した識別子
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Note", "PackingListItem" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id: String,
    },
}
