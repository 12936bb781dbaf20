//! # リポジトリ実装
//!
//! ドメインエンティティの永続化操作を定義するトレイトと、
//! その PostgreSQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイト経由でリポジトリを利用
//! - **所有者スコープ**: ノート / 持ち物リストの変更は必ず id と所有者の
//!   両方が一致する単一ステートメントで行う
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod note_repository;
pub mod packing_list_repository;
pub mod user_repository;

pub use note_repository::{NoteRepository, PostgresNoteRepository};
pub use packing_list_repository::{PackingListRepository, PostgresPackingListRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
