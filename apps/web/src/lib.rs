//! # Tasklist Web サーバー
//!
//! 単一ユーザー向けのタスクリスト Web アプリケーション。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーティングテーブルとミドルウェアの組み立て
//! - [`config`] - 環境変数からの設定読み込み
//! - [`handler`] - ルートごとのハンドラ
//! - [`middleware`] - 内部エラーの捕捉とログ出力
//! - [`request_metrics`] - Prometheus メトリクス
//! - [`render`] - タスク一覧ページの HTML 生成

pub mod app_builder;
pub mod client_addr;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod render;
pub mod request_metrics;
pub mod state;

pub use app_builder::build_app;
pub use state::AppState;
