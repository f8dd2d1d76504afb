//! # Tasklist Web サーバー
//!
//! タスクの一覧・追加・完了・削除を提供する Web サーバー。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（人間向けログ）
//! cargo run -p tasklist-web
//!
//! # 本番環境（JSON ログ）
//! APP_ENV=production DATABASE_PATH=/var/lib/tasklist/tasks.db cargo run -p tasklist-web --release
//! ```
//!
//! 環境変数の一覧は [`tasklist_web::config`] を参照。

use std::{net::SocketAddr, sync::Arc};

use tasklist_infra::repository::{SqliteTaskRepository, TaskRepository};
use tasklist_shared::{event_log::action, log_event, observability::init_tracing};
use tasklist_web::{
    AppState,
    build_app,
    config::AppConfig,
    middleware::install_panic_hook,
    request_metrics,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_sink);
    install_panic_hook();

    let repository = SqliteTaskRepository::new(&config.database_path);
    repository.ensure_schema().await?;

    let metrics = request_metrics::install_recorder()
        .map_err(|e| anyhow::anyhow!("Prometheus レコーダーを登録できません: {e}"))?;
    let bind_address = config.bind_address();
    let environment = config.environment.as_str();

    let state = Arc::new(AppState::new(config, Arc::new(repository), metrics)?);
    let app = build_app(state);

    log_event!(
        INFO,
        action::APP_STARTUP,
        config = environment,
        "アプリケーションを起動しました"
    );

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Web サーバーを起動します: {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
