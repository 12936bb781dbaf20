//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック・Readiness チェック
//! - `auth`: 登録・ログイン
//! - `note`: ノートの CRUD
//! - `packing_list`: 持ち物リストの CRUD

pub mod auth;
pub mod health;
pub mod note;
pub mod packing_list;

pub use auth::{AuthState, login, register};
pub use health::{ReadinessState, health_check, readiness_check};
pub use note::{NoteState, create_note, delete_note, list_notes, update_note};
pub use packing_list::{
    PackingListState,
    create_packing_list_item,
    delete_packing_list_item,
    list_packing_list_items,
    set_packing_list_item_completed,
    update_packing_list_item,
};
