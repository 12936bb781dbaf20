//! # TripNote インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトの具体的な実装を提供する。
//! 外部システムの詳細をカプセル化し、ドメイン層を
//! インフラの変更から保護する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **リポジトリ実装**: ユーザー / ノート / 持ち物リストの永続化
//! - **パスワードハッシュ**: Argon2id によるハッシュ化・検証
//! - **トークン生成**: CSPRNG によるアクセストークン発行
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain → shared
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワードハッシュ化・検証
//! - [`token`] - アクセストークン生成
//! - [`repository`] - リポジトリ実装

pub mod db;
pub mod error;
pub mod password;
pub mod repository;
pub mod token;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::InfraError;
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use token::{AccessTokenGenerator, RandomTokenGenerator};
