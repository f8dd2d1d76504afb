//! # Tasklist 共有ユーティリティ
//!
//! このクレートは、Tasklist プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, web）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - ログ出力の実装（tracing-subscriber）は `observability` feature でのみ有効にする

pub mod event_log;
pub mod health;
pub mod observability;

pub use health::HealthResponse;
pub use observability::LogSink;
