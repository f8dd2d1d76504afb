//! # アプリケーション構築
//!
//! ルーティングテーブルとミドルウェアを組み立てる。
//! `main.rs` は設定読み込み・インフラ初期化・サーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    handler::{
        add_task,
        complete_task,
        delete_task,
        health_check,
        list_tasks,
        not_found,
        render_metrics,
    },
    middleware::{log_internal_error, panic_response},
    request_metrics::track_metrics,
    state::AppState,
};

/// ルーターを構築する
///
/// | メソッド | パス | ハンドラ |
/// |----------|------|----------|
/// | GET | `/` | [`list_tasks`] |
/// | POST | `/add` | [`add_task`] |
/// | GET | `/complete/{id}` | [`complete_task`] |
/// | GET | `/delete/{id}` | [`delete_task`] |
/// | GET | `/health` | [`health_check`] |
/// | GET | `/metrics` | [`render_metrics`] |
/// | * | その他 | [`not_found`] |
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_tasks))
        .route("/add", post(add_task))
        .route("/complete/{id}", get(complete_task))
        .route("/delete/{id}", get(delete_task))
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .fallback(not_found)
        // レイヤー順序: 下に書いたものが外側
        // 1. TraceLayer（最外）: リクエスト単位のスパン
        // 2. track_metrics: 最終的なステータスでリクエストを計測
        // 3. log_internal_error: 漏れた障害の例外ログと internal_server_error
        // 4. CatchPanicLayer: パニックを目印付きの 500 に変換
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn(log_internal_error))
        .layer(from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
