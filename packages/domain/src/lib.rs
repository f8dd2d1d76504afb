//! # Tasklist ドメイン層
//!
//! タスク管理のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - インフラ（SQLite）や HTTP への依存を持たない
//! - 不正な状態を型で表現できないようにする（Newtype + 検証付きコンストラクタ）
//!
//! ## モジュール構成
//!
//! - [`task`] - タスクエンティティと値オブジェクト
//! - [`error`] - ドメイン層エラー

pub mod error;
pub mod task;

pub use error::DomainError;
pub use task::{Task, TaskDescription, TaskId};
