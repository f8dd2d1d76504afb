//! # 内部エラーミドルウェア
//!
//! ハンドラから漏れた障害（パニック、[`WebError::Internal`]）を 500 に変換し、
//! 例外ログと `internal_server_error` イベントを出力する。
//!
//! ```text
//! log_internal_error（from_fn）
//!     └─ CatchPanicLayer（パニック → UnhandledFailure 付き 500）
//!         └─ Router
//! ```
//!
//! どちらの経路でも、レスポンス拡張の [`UnhandledFailure`] を目印にして
//! このミドルウェアがログを出力する。
//!
//! パニック発生地点のスタックトレースは unwind 後には取得できないため、
//! [`install_panic_hook`] で登録したフックがスレッドローカルに退避し、
//! [`panic_response`] が取り出して例外ログの本文に含める。
//!
//! [`WebError::Internal`]: crate::error::WebError::Internal

use std::{any::Any, backtrace::Backtrace, cell::RefCell, sync::Once};

use axum::{extract::Request, middleware::Next, response::Response};
use tasklist_shared::{event_log::action, log_event};

use crate::{
    client_addr::ClientAddr,
    error::{UnhandledFailure, unhandled_failure_response},
};

thread_local! {
    /// 直前のパニックで記録したスタックトレース
    static PANIC_BACKTRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// パニック時にスタックトレースを記録するフックを登録する
///
/// 既存のフックも引き続き呼び出す。複数回呼んでも登録は一度だけ。
pub fn install_panic_hook() {
    static INSTALLED: Once = Once::new();

    INSTALLED.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let backtrace = Backtrace::force_capture().to_string();
            PANIC_BACKTRACE.with(|slot| *slot.borrow_mut() = Some(backtrace));
            default_hook(info);
        }));
    });
}

/// `CatchPanicLayer::custom` に渡すパニックハンドラ
///
/// `CatchPanicLayer` はパニックしたスレッド上でこのハンドラを呼ぶ。
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "不明なパニック".to_string()
    };

    let message = match PANIC_BACKTRACE.with(|slot| slot.borrow_mut().take()) {
        Some(backtrace) => format!("panicked: {detail}\n\nStack backtrace:\n{backtrace}"),
        None => format!("panicked: {detail}"),
    };
    unhandled_failure_response(message)
}

/// 漏れた障害をログに出力する
pub async fn log_internal_error(client: ClientAddr, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    if let Some(UnhandledFailure(detail)) = response.extensions().get::<UnhandledFailure>() {
        tracing::error!(exception = true, "{detail}");
        log_event!(
            ERROR,
            action::INTERNAL_SERVER_ERROR,
            path = %path,
            ip_address = %client,
            "内部サーバーエラーが発生しました"
        );
    }

    response
}
