//! # ユースケース層
//!
//! API サーバーのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: テスト可能性のためトレイトを定義
//! - **依存性注入**: リポジトリ・ハッシャー・クロックを `Arc<dyn Trait>` で注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `auth`: 登録・ログイン
//! - `note`: ノートの CRUD
//! - `packing_list`: 持ち物リストの CRUD

pub mod auth;
pub mod note;
pub mod packing_list;

pub use auth::{AuthUseCase, AuthUseCaseImpl};
pub use note::{NoteUseCase, NoteUseCaseImpl, UpdateNoteInput};
pub use packing_list::{PackingListUseCase, PackingListUseCaseImpl, UpdatePackingListItemInput};
