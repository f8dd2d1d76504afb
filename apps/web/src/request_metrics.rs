//! # リクエストメトリクス
//!
//! Prometheus 形式のメトリクスレコーダーの登録と、リクエストごとの
//! 計測ミドルウェアを提供する。
//!
//! ## メトリクス
//!
//! | 名前 | 種別 | ラベル |
//! |------|------|--------|
//! | `http_requests_total` | counter | `method`, `path`, `status` |
//! | `http_request_duration_seconds` | histogram | `method`, `path`, `status` |
//!
//! `path` はマッチしたルートのパターン（`/complete/{id}` など）で、
//! どのルートにもマッチしなかったリクエストは `unmatched` にまとめる。
//!
//! レコーダーはプロセス全体で 1 つだけ登録できる。2 回目以降の呼び出しは
//! 登録済みのハンドルを返す。

use std::{sync::Mutex, time::Instant};

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

static INSTALLED: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

/// レコーダーを登録し、描画用のハンドルを返す
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let mut installed = INSTALLED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(handle) = installed.as_ref() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    *installed = Some(handle.clone());
    Ok(handle)
}

/// リクエスト数と処理時間を記録する
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |matched| matched.as_str().to_string());

    let response = next.run(request).await;

    let labels = [
        ("method", method),
        ("path", path),
        ("status", response.status().as_u16().to_string()),
    ];
    metrics::counter!(HTTP_REQUESTS_TOTAL, &labels).increment(1);
    metrics::histogram!(HTTP_REQUEST_DURATION_SECONDS, &labels)
        .record(started.elapsed().as_secs_f64());

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_recorderは何度呼んでも成功する() {
        let first = install_recorder().unwrap();
        let second = install_recorder().unwrap();

        metrics::counter!("tasklist_test_counter").increment(1);

        assert!(first.render().contains("tasklist_test_counter"));
        assert!(second.render().contains("tasklist_test_counter"));
    }
}
