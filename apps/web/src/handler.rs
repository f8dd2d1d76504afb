//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは `State<Arc<AppState>>` から依存を受け取る

pub mod fallback;
pub mod health;
pub mod prometheus;
pub mod task;

pub use fallback::not_found;
pub use health::health_check;
pub use prometheus::render_metrics;
pub use task::{add_task, complete_task, delete_task, list_tasks};
