//! # Tripnote API サーバー
//!
//! 旅行のメモと持ち物リストを管理する REST API サーバー。
//!
//! ## 役割
//!
//! - **ユーザー認証**: 登録・ログインとアクセストークンの発行
//! - **メモ管理**: タグ付きメモの CRUD
//! - **持ち物リスト管理**: 完了状態付きアイテムの CRUD
//!
//! 認証が必要なエンドポイントは `Authorization` ヘッダーのアクセストークンで
//! ユーザーを特定し、リソースは所有者のみが操作できる。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `DATABASE_URL` | No | PostgreSQL 接続 URL（デフォルト: `postgres://localhost/tripnote`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,tripnote=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p tripnote-api
//!
//! # 本番環境
//! API_PORT=3000 DATABASE_URL=postgres://... cargo run -p tripnote-api --release
//! ```

mod config;
mod error;
mod handler;
mod middleware;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use config::ApiConfig;
use handler::{
    AuthState,
    NoteState,
    PackingListState,
    ReadinessState,
    create_note,
    create_packing_list_item,
    delete_note,
    delete_packing_list_item,
    health_check,
    list_notes,
    list_packing_list_items,
    login,
    readiness_check,
    register,
    set_packing_list_item_completed,
    update_note,
    update_packing_list_item,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tripnote_domain::clock::{Clock, SystemClock};
use tripnote_infra::{
    AccessTokenGenerator,
    Argon2PasswordHasher,
    PasswordHasher,
    RandomTokenGenerator,
    db,
    repository::{
        NoteRepository,
        PackingListRepository,
        PostgresNoteRepository,
        PostgresPackingListRepository,
        PostgresUserRepository,
        UserRepository,
    },
};
use crate::{
    middleware::{AuthLayerState, require_auth},
    usecase::{AuthUseCaseImpl, NoteUseCaseImpl, PackingListUseCaseImpl},
};

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tripnote=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 設定読み込み
    let config = ApiConfig::from_env();

    tracing::info!(
        "Tripnote API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの実行に失敗しました");
    tracing::info!("マイグレーションを適用しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    // 依存コンポーネントを初期化
    let user_repo: Arc<dyn UserRepository> =
        Arc::new(PostgresUserRepository::new(pool.clone()));
    let note_repo: Arc<dyn NoteRepository> = Arc::new(PostgresNoteRepository::new(pool.clone()));
    let packing_list_repo: Arc<dyn PackingListRepository> =
        Arc::new(PostgresPackingListRepository::new(pool));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let token_generator: Arc<dyn AccessTokenGenerator> = Arc::new(RandomTokenGenerator);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let auth_state = Arc::new(AuthState {
        usecase: Arc::new(AuthUseCaseImpl::new(
            user_repo.clone(),
            password_hasher,
            token_generator,
            clock.clone(),
        )),
    });
    let note_state = Arc::new(NoteState {
        usecase: Arc::new(NoteUseCaseImpl::new(note_repo, clock.clone())),
    });
    let packing_list_state = Arc::new(PackingListState {
        usecase: Arc::new(PackingListUseCaseImpl::new(packing_list_repo, clock)),
    });
    let auth_layer_state = AuthLayerState {
        user_repository: user_repo,
    };

    // 認証必須のルート
    let protected = Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", patch(update_note).delete(delete_note))
        .with_state(note_state)
        .merge(
            Router::new()
                .route(
                    "/packinglist",
                    get(list_packing_list_items).post(create_packing_list_item),
                )
                .route(
                    "/packinglist/{id}",
                    patch(update_packing_list_item).delete(delete_packing_list_item),
                )
                .route(
                    "/packinglist/{id}/completed",
                    patch(set_packing_list_item_completed),
                )
                .with_state(packing_list_state),
        )
        .route_layer(from_fn_with_state(auth_layer_state, require_auth));

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/register", post(register))
                .route("/login", post(login))
                .with_state(auth_state),
        )
        .merge(protected)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Tripnote API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
