//! # 404 ハンドラ
//!
//! どのルートにもマッチしないリクエストと、ID が数字でない
//! `/complete/{id}`・`/delete/{id}` を処理する。

use axum::http::Uri;
use tasklist_shared::{event_log::action, log_event};

use crate::{client_addr::ClientAddr, error::WebError};

/// ルーターのフォールバック
#[tracing::instrument(skip_all)]
pub async fn not_found(uri: Uri, client: ClientAddr) -> WebError {
    page_not_found(uri.path(), client)
}

/// `page_not_found` イベントを出力し、404 エラーを返す
pub(crate) fn page_not_found(path: &str, client: ClientAddr) -> WebError {
    log_event!(
        WARN,
        action::PAGE_NOT_FOUND,
        path,
        ip_address = %client,
        "ページが見つかりません"
    );
    WebError::NotFound
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_未定義のパスは404になる() {
        let sut: Router = Router::new().fallback(not_found);

        let response = sut
            .oneshot(Request::builder().uri("/nonexistent").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
