//! # TaskRepository
//!
//! タスクの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **操作ごとの接続**: 各メソッドは接続を開き、返る前に閉じる
//! - **存在しない ID は何もしない**: 完了・削除で対象が 0 行でもエラーにしない
//! - **並び順**: `ORDER BY` を付けない。新しいテーブルでは挿入順（rowid 順）になる

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::{Connection, sqlite::SqliteConnectOptions};
use tasklist_domain::task::{Task, TaskDescription, TaskId};
use tasklist_shared::{event_log::action, log_event};

use crate::{db, error::InfraError};

/// タスクリポジトリトレイト
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// タスクテーブルが存在しなければ作成する
    async fn ensure_schema(&self) -> Result<(), InfraError>;

    /// 全タスクをストアの返す順で取得する
    async fn list_tasks(&self) -> Result<Vec<Task>, InfraError>;

    /// タスクを未完了状態で追加し、採番された ID を返す
    async fn add_task(&self, description: &TaskDescription) -> Result<TaskId, InfraError>;

    /// タスクを完了にする（存在しない ID の場合は何もしない）
    async fn mark_completed(&self, id: TaskId) -> Result<(), InfraError>;

    /// タスクを削除する（存在しない ID の場合は何もしない）
    async fn delete_task(&self, id: TaskId) -> Result<(), InfraError>;

    /// 接続確認のための軽量なクエリを実行する
    async fn ping(&self) -> Result<(), InfraError>;
}

/// tasks テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id:        i64,
    task:      String,
    completed: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task::from_db(
            TaskId::from_i64(row.id),
            TaskDescription::from_db(row.task),
            row.completed,
        )
    }
}

/// SQLite 実装の TaskRepository
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    database_path: PathBuf,
    options:       SqliteConnectOptions,
}

impl SqliteTaskRepository {
    /// 新しいリポジトリインスタンスを作成
    ///
    /// この時点では接続しない。
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        let database_path = database_path.into();
        let options = db::connect_options(&database_path);
        Self {
            database_path,
            options,
        }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn ensure_schema(&self) -> Result<(), InfraError> {
        db::ensure_schema(&self.database_path).await?;

        log_event!(
            INFO,
            action::DB_INIT,
            database_path = %self.database_path.display(),
            "データベースを初期化しました"
        );
        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn list_tasks(&self) -> Result<Vec<Task>, InfraError> {
        let mut conn = db::connect(&self.options).await?;
        let rows = sqlx::query_as::<_, TaskRow>("SELECT id, task, completed FROM tasks")
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn add_task(&self, description: &TaskDescription) -> Result<TaskId, InfraError> {
        let mut conn = db::connect(&self.options).await?;
        let mut tx = conn.begin().await?;
        let result = sqlx::query("INSERT INTO tasks (task) VALUES (?1)")
            .bind(description.as_str())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        conn.close().await?;

        Ok(TaskId::from_i64(result.last_insert_rowid()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn mark_completed(&self, id: TaskId) -> Result<(), InfraError> {
        let mut conn = db::connect(&self.options).await?;
        let mut tx = conn.begin().await?;
        sqlx::query("UPDATE tasks SET completed = TRUE WHERE id = ?1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        conn.close().await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete_task(&self, id: TaskId) -> Result<(), InfraError> {
        let mut conn = db::connect(&self.options).await?;
        let mut tx = conn.begin().await?;
        sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        conn.close().await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn ping(&self) -> Result<(), InfraError> {
        let mut conn = db::connect(&self.options).await?;
        sqlx::query("SELECT 1").fetch_one(&mut conn).await?;
        conn.close().await?;

        Ok(())
    }
}
