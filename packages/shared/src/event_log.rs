//! # アクションタグ付きイベントログ
//!
//! 各操作の結果を、機械可読なアクションタグ（`action` フィールド）付きの
//! 構造化ログとして出力するためのマクロと定数を提供する。
//!
//! ## 使い方
//!
//! [`log_event!`] の第 1 引数にレベル、第 2 引数にアクションタグを渡す。
//! 以降は `tracing` と同じ書式でコンテキストフィールドとメッセージを続ける。
//!
//! ```rust
//! use tasklist_shared::{event_log::action, log_event};
//!
//! let task_id = 42;
//! log_event!(INFO, action::COMPLETE_TASK, task_id, ip_address = "127.0.0.1", "タスクを完了しました");
//! ```
//!
//! JSON 出力では `action` とコンテキストフィールドがトップレベルのキーになる。
//! `jq 'select(.action == "add_task_error")'` で特定の操作だけを抽出できる。
//!
//! ## フィールド命名規約
//!
//! | フィールド | 型 | 用途 |
//! |-----------|----|------|
//! | `task_id` | 整数 | 対象タスクの ID |
//! | `task_content` | 文字列 | 追加しようとしたタスク内容 |
//! | `task_count` | 整数 | 一覧表示したタスク数 |
//! | `ip_address` | 文字列 | リクエスト元アドレス |
//! | `path` | 文字列 | リクエストパス |
//! | `error` | 文字列 | 失敗理由（ログにのみ出力し、レスポンスには含めない） |
//! | `user_id` | 文字列 | 操作者（単一ユーザー運用のため現状は未使用） |
//!
//! `level` や `line` など JSON レコードの固定フィールドと同じ名前は使わないこと。
//! 使った場合は `field_level` のように前置付きのキーで出力される。

/// アクションタグ付きのイベントを出力する
///
/// アクションタグを必須引数にすることで、タグのないイベントログを書けないようにする。
#[macro_export]
macro_rules! log_event {
    ($level:ident, $action:expr, $($args:tt)+) => {
        ::tracing::event!(
            ::tracing::Level::$level,
            action = $action,
            $($args)+
        )
    };
}

/// アクションタグの定数
pub mod action {
    // 起動・初期化
    pub const APP_STARTUP: &str = "app_startup";
    pub const DB_INIT: &str = "db_init";

    // タスク一覧
    pub const VIEW_TASKS: &str = "view_tasks";
    pub const VIEW_TASKS_ERROR: &str = "view_tasks_error";

    // タスク追加
    pub const ADD_TASK_EMPTY: &str = "add_task_empty";
    pub const ADD_TASK_SUCCESS: &str = "add_task_success";
    pub const ADD_TASK_ERROR: &str = "add_task_error";

    // タスク完了
    pub const COMPLETE_TASK: &str = "complete_task";
    pub const COMPLETE_TASK_ERROR: &str = "complete_task_error";

    // タスク削除
    pub const DELETE_TASK: &str = "delete_task";
    pub const DELETE_TASK_ERROR: &str = "delete_task_error";

    // ヘルスチェック
    pub const HEALTH_CHECK_SUCCESS: &str = "health_check_success";
    pub const HEALTH_CHECK_ERROR: &str = "health_check_error";

    // エラーハンドラ
    pub const PAGE_NOT_FOUND: &str = "page_not_found";
    pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";
}
