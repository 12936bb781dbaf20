//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//! すべての変数にデフォルト値があり、未設定でも起動できる。

use std::env;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    ///
    /// | 変数名 | デフォルト |
    /// |--------|-----------|
    /// | `API_HOST` | `0.0.0.0` |
    /// | `API_PORT` | `3000` |
    /// | `DATABASE_URL` | `postgres://localhost/tripnote` |
    pub fn from_env() -> Self {
        Self {
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("API_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/tripnote".to_string()),
        }
    }
}
