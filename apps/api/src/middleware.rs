//! # ミドルウェア層
//!
//! リクエスト処理の前段で横断的な処理を行うミドルウェアを定義する。
//!
//! - `auth`: アクセストークンによる認証

pub mod auth;

pub use auth::{AuthLayerState, AuthenticatedUser, require_auth};
