//! # メトリクスハンドラ
//!
//! 登録済みレコーダーの内容を Prometheus テキスト形式で返す。

use std::sync::Arc;

use axum::extract::State;

use crate::state::AppState;

/// GET /metrics
pub async fn render_metrics(State(state): State<Arc<AppState>>) -> String {
    state.metrics.render()
}
