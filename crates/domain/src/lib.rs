//! # TripNote ドメイン層
//!
//! ビジネスロジックの中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは DDD（ドメイン駆動設計）の原則に従い、以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: User, Note）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: Username,
//!   Heading）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain → shared
//! ```
//!
//! ドメイン層は外部システム（DB、HTTP）には一切依存しない。
//! これにより、ビジネスロジックの純粋性が保たれる。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`user`] - ユーザーエンティティと認証情報の値オブジェクト
//! - [`note`] - ノートエンティティ
//! - [`packing_list`] - 持ち物リストエンティティ
//!
//! ## 使用例
//!
//! ```rust
//! use tripnote_domain::{DomainError, user::UserId};
//!
//! // ユーザー ID の生成
//! let user_id = UserId::new();
//!
//! // ドメインエラーの生成
//! let error = DomainError::NotFound {
//!     entity_type: "Note",
//!     id: "note-123".to_string(),
//! };
//! ```

#[macro_use]
mod macros;

pub mod auth;
pub mod clock;
pub mod error;
pub mod note;
pub mod packing_list;
pub mod password;
pub mod user;
pub mod value_objects;

pub use error::DomainError;
