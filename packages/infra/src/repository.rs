//! # リポジトリ実装
//!
//! ## 設計方針
//!
//! - **トレイト経由の利用**: ハンドラは [`TaskRepository`] にのみ依存し、
//!   テストではスタブに差し替える
//! - **パラメータバインド**: ユーザー入力由来の値は必ず `bind` で渡す

pub mod task_repository;

pub use task_repository::{SqliteTaskRepository, TaskRepository};
