//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリのタスクリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! tasklist-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    io,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tasklist_domain::task::{Task, TaskDescription, TaskId};

use crate::{error::InfraError, repository::TaskRepository};

/// 障害時に返すエラーメッセージ
pub const UNAVAILABLE_MESSAGE: &str = "Database connection failed";

#[derive(Default)]
struct MockState {
    tasks:   Vec<Task>,
    last_id: i64,
}

/// インメモリのタスクリポジトリ
///
/// [`unavailable`](Self::unavailable) で作成すると、全操作がストア障害を返す。
/// クローンは同じ状態を共有する。
#[derive(Clone, Default)]
pub struct MockTaskRepository {
    state:       Arc<Mutex<MockState>>,
    unavailable: bool,
}

impl MockTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全操作が失敗するリポジトリを作成する
    pub fn unavailable() -> Self {
        Self {
            state:       Arc::default(),
            unavailable: true,
        }
    }

    /// 保持しているタスクのスナップショットを返す
    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    /// 保持しているタスクを直接追加する
    pub fn insert(&self, description: &str, completed: bool) -> TaskId {
        let mut state = self.state.lock().unwrap();
        state.last_id += 1;
        let id = TaskId::from_i64(state.last_id);
        state.tasks.push(Task::from_db(
            id,
            TaskDescription::from_db(description.to_string()),
            completed,
        ));
        id
    }

    fn check_available(&self) -> Result<(), InfraError> {
        if self.unavailable {
            return Err(InfraError::Io(io::Error::other(UNAVAILABLE_MESSAGE)));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn ensure_schema(&self) -> Result<(), InfraError> {
        self.check_available()
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, InfraError> {
        self.check_available()?;
        Ok(self.tasks())
    }

    async fn add_task(&self, description: &TaskDescription) -> Result<TaskId, InfraError> {
        self.check_available()?;
        Ok(self.insert(description.as_str(), false))
    }

    async fn mark_completed(&self, id: TaskId) -> Result<(), InfraError> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();
        if let Some(task) = state.tasks.iter_mut().find(|t| t.id() == id) {
            *task = Task::from_db(task.id(), task.description().clone(), true);
        }
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), InfraError> {
        self.check_available()?;
        self.state.lock().unwrap().tasks.retain(|t| t.id() != id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), InfraError> {
        self.check_available()
    }
}
