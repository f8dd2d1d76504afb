//! # アプリケーション状態
//!
//! 起動時に一度だけ構築し、`State<Arc<AppState>>` として全ハンドラへ注入する。
//! 構築後は変更しない。

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tasklist_infra::repository::TaskRepository;

use crate::{config::AppConfig, render::TaskListRenderer};

/// ハンドラが共有する状態
pub struct AppState {
    pub repository: Arc<dyn TaskRepository>,
    pub config:     AppConfig,
    pub renderer:   TaskListRenderer,
    pub metrics:    PrometheusHandle,
}

impl AppState {
    /// 埋め込みテンプレートを読み込んで状態を構築する
    pub fn new(
        config: AppConfig,
        repository: Arc<dyn TaskRepository>,
        metrics: PrometheusHandle,
    ) -> Result<Self, tera::Error> {
        Ok(Self {
            repository,
            config,
            renderer: TaskListRenderer::new()?,
            metrics,
        })
    }
}
