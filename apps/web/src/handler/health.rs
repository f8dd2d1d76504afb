//! # ヘルスチェックハンドラ
//!
//! ストアへの接続可否を確認するためのエンドポイント。
//! タスク操作とは独立しており、`SELECT 1` だけを実行する。
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {"status": "healthy", "database": "connected"}
//! ```
//!
//! 接続できない場合は 500 と `{"status": "unhealthy", "error": "..."}` を返す。

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use tasklist_shared::{HealthResponse, event_log::action, log_event};

use crate::{client_addr::ClientAddr, state::AppState};

/// ヘルスチェックエンドポイント
#[tracing::instrument(skip_all)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
    client: ClientAddr,
) -> (StatusCode, Json<HealthResponse>) {
    match state.repository.ping().await {
        Ok(()) => {
            log_event!(
                INFO,
                action::HEALTH_CHECK_SUCCESS,
                ip_address = %client,
                "ヘルスチェックに成功しました"
            );
            (StatusCode::OK, Json(HealthResponse::healthy()))
        }
        Err(e) => {
            log_event!(
                ERROR,
                action::HEALTH_CHECK_ERROR,
                error = %e,
                "ヘルスチェックに失敗しました"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse::unhealthy(e.to_string())),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use pretty_assertions::assert_eq;
    use tasklist_infra::mock::{MockTaskRepository, UNAVAILABLE_MESSAGE};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::{AppConfig, Environment},
        request_metrics,
    };

    fn create_test_app(repository: MockTaskRepository) -> Router {
        let state = AppState::new(
            AppConfig::for_environment(Environment::Testing),
            Arc::new(repository),
            request_metrics::install_recorder().unwrap(),
        )
        .unwrap();

        Router::new()
            .route("/health", get(health_check))
            .with_state(Arc::new(state))
    }

    async fn response_body(response: axum::response::Response) -> HealthResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn health_request() -> Request<Body> {
        Request::builder().uri("/health").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_接続できればhealthyを返す() {
        let sut = create_test_app(MockTaskRepository::new());

        let response = sut.oneshot(health_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_body(response).await, HealthResponse::healthy());
    }

    #[tokio::test]
    async fn test_接続できなければunhealthyと理由を返す() {
        let sut = create_test_app(MockTaskRepository::unavailable());

        let response = sut.oneshot(health_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response_body(response).await;
        assert_eq!(body.status, "unhealthy");
        assert_eq!(body.database, None);
        assert!(body.error.unwrap().contains(UNAVAILABLE_MESSAGE));
    }
}
