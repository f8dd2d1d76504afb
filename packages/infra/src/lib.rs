//! # Tasklist インフラ層
//!
//! 外部システム（SQLite）との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: SQLite ファイルへの接続とスキーマ準備
//! - **リポジトリ実装**: タスクテーブルへの CRUD
//!
//! ## 依存関係
//!
//! ```text
//! web → infra → domain
//!          ↘
//!            shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - SQLite 接続管理とスキーマ準備
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - `mock` - テスト用インメモリリポジトリ（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use tasklist_infra::repository::{SqliteTaskRepository, TaskRepository};
//!
//! let repository = SqliteTaskRepository::new("data/tasks.db");
//! repository.ensure_schema().await?;
//! let tasks = repository.list_tasks().await?;
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::InfraError;
