//! # タスク
//!
//! このアプリケーションが扱う唯一のエンティティ。
//!
//! ## ライフサイクル
//!
//! ```text
//! 追加（id 採番, completed = false）
//!     ↓
//! 完了（completed = true、何度実行しても同じ状態）
//!     ↓
//! 削除（物理削除、復元不可）
//! ```
//!
//! 完了を取り消す操作は存在しない。
//!
//! ## 使用例
//!
//! ```rust
//! use tasklist_domain::task::{Task, TaskDescription, TaskId};
//!
//! let description = TaskDescription::parse("  牛乳を買う  ").unwrap();
//! assert_eq!(description.as_str(), "牛乳を買う");
//!
//! let task = Task::from_db(TaskId::from_i64(1), description, false);
//! assert!(!task.completed());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// タスクの一意識別子
///
/// ストアが採番する整数 ID。採番後は変更されず、再利用もされない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// ストアから受け取った整数値から ID を作成する
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// URL のパスセグメントから ID を読み取る
    ///
    /// ASCII 数字のみで構成され、`i64` に収まる文字列だけを受け付ける。
    /// 符号付き・空文字列・桁あふれは `None` を返す。
    ///
    /// ```rust
    /// use tasklist_domain::task::TaskId;
    ///
    /// assert_eq!(TaskId::parse_path_segment("42"), Some(TaskId::from_i64(42)));
    /// assert_eq!(TaskId::parse_path_segment("-1"), None);
    /// assert_eq!(TaskId::parse_path_segment("abc"), None);
    /// ```
    pub fn parse_path_segment(segment: &str) -> Option<Self> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        segment.parse().ok().map(Self)
    }

    /// 内部の整数値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// タスクの内容
///
/// 前後の空白を除去した結果が空でない文字列。長さの上限やサニタイズはなく、
/// HTML や SQL のメタ文字もそのまま保持する（エスケープは表示側の責務）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// 入力値を検証してタスク内容を作成する
    ///
    /// 前後の空白を除去し、空になった場合は
    /// [`DomainError::ValidationRejected`] を返す。
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationRejected(
                "タスク内容が空です".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// ストアに保存済みの値から復元する
    ///
    /// 保存前に検証済みのため、再検証は行わない。
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// タスクエンティティ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id:          TaskId,
    description: TaskDescription,
    completed:   bool,
}

impl Task {
    /// ストアから読み出した行を復元する
    pub fn from_db(id: TaskId, description: TaskDescription, completed: bool) -> Self {
        Self {
            id,
            description,
            completed,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn description(&self) -> &TaskDescription {
        &self.description
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}
