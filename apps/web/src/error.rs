//! # Web エラー定義
//!
//! ハンドラが返すエラーと、HTTP レスポンスへの変換を定義する。
//!
//! レスポンス本文は汎用メッセージのみとし、失敗の詳細はログにだけ出力する。

use std::backtrace::{Backtrace, BacktraceStatus};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// 404 レスポンスの本文
pub const NOT_FOUND_MESSAGE: &str = "ページが見つかりません";

/// 500 レスポンスの本文（ハンドラ外へ漏れた障害）
pub const INTERNAL_ERROR_MESSAGE: &str = "内部サーバーエラーが発生しました";

/// ハンドラから漏れた障害の内容
///
/// 500 レスポンスの拡張として内部エラーミドルウェアへ渡され、
/// 例外ログとして出力される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledFailure(pub String);

/// Web 層で発生するエラー
#[derive(Debug, Error)]
pub enum WebError {
    /// ストア操作の失敗（ハンドラでログ出力済み）
    #[error("ストアを利用できません: {message}")]
    StorageUnavailable { message: &'static str },

    /// リソースが見つからない（ハンドラでログ出力済み）
    #[error("ページが見つかりません")]
    NotFound,

    /// ハンドラで扱えない障害
    #[error("内部エラー: {0}")]
    Internal(#[from] anyhow::Error),
}

impl WebError {
    pub fn storage_unavailable(message: &'static str) -> Self {
        Self::StorageUnavailable { message }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::StorageUnavailable { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            WebError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response(),
            WebError::Internal(e) => unhandled_failure_response(describe_internal(&e)),
        }
    }
}

/// 例外ログ用に障害内容とスタックトレースを整形する
///
/// `RUST_LIB_BACKTRACE` 未設定で anyhow がトレースを持たない場合は、
/// レスポンス変換時点のトレースを付ける。
fn describe_internal(error: &anyhow::Error) -> String {
    match error.backtrace().status() {
        BacktraceStatus::Captured => format!("{error:?}"),
        _ => format!(
            "{error:?}\n\nStack backtrace:\n{}",
            Backtrace::force_capture()
        ),
    }
}

/// 内部エラーミドルウェアが拾う 500 レスポンスを作成する
pub fn unhandled_failure_response(detail: String) -> Response {
    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response();
    response.extensions_mut().insert(UnhandledFailure(detail));
    response
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_ストア障害は汎用メッセージの500になる() {
        let sut = WebError::storage_unavailable("タスクの追加中にエラーが発生しました");

        let response = sut.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<UnhandledFailure>().is_none());
        assert_eq!(
            body_text(response).await,
            "タスクの追加中にエラーが発生しました"
        );
    }

    #[tokio::test]
    async fn test_not_foundは404になる() {
        let response = WebError::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_内部エラーは詳細を拡張に載せ本文には含めない() {
        let sut = WebError::from(anyhow::anyhow!("template exploded"));

        let response = sut.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let failure = response.extensions().get::<UnhandledFailure>().cloned().unwrap();
        assert!(failure.0.contains("template exploded"));
        assert!(failure.0.contains("Stack backtrace:"));
        assert_eq!(body_text(response).await, INTERNAL_ERROR_MESSAGE);
    }
}
