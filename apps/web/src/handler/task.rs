//! # タスクハンドラ
//!
//! タスクの一覧・追加・完了・削除を担当する。
//!
//! 各ハンドラは「受信 → 検証 → 実行 → ログ → 応答」の順に処理する。
//! ストア障害は失敗理由をログに出力したうえで、詳細を含まない 500 を返す。

use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tasklist_domain::task::{TaskDescription, TaskId};
use tasklist_shared::{event_log::action, log_event};

use crate::{
    client_addr::ClientAddr,
    error::WebError,
    handler::fallback::page_not_found,
    state::AppState,
};

const LIST_ERROR_MESSAGE: &str = "タスクの読み込み中にエラーが発生しました";
const ADD_ERROR_MESSAGE: &str = "タスクの追加中にエラーが発生しました";
const COMPLETE_ERROR_MESSAGE: &str = "タスクの更新中にエラーが発生しました";
const DELETE_ERROR_MESSAGE: &str = "タスクの削除中にエラーが発生しました";

/// タスク追加フォーム
#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    /// 未送信の場合は空文字列として扱う
    #[serde(default)]
    pub task: String,
}

/// 一覧ページへの 302 リダイレクト
fn redirect_to_index() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// GET /
#[tracing::instrument(skip_all)]
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    let tasks = match state.repository.list_tasks().await {
        Ok(tasks) => tasks,
        Err(e) => {
            log_event!(
                ERROR,
                action::VIEW_TASKS_ERROR,
                error = %e,
                "タスク一覧の取得に失敗しました"
            );
            return Err(WebError::storage_unavailable(LIST_ERROR_MESSAGE));
        }
    };

    log_event!(
        INFO,
        action::VIEW_TASKS,
        task_count = tasks.len(),
        "タスク一覧を表示しました"
    );

    let html = state
        .renderer
        .render(&tasks)
        .context("タスク一覧の描画に失敗しました")?;
    Ok(Html(html))
}

/// POST /add
///
/// 前後の空白を除いて空になる入力は保存せず、一覧へ戻す。
/// フォームとして読めないリクエスト（本文や Content-Type がない場合など）も空の入力として扱う。
#[tracing::instrument(skip_all)]
pub async fn add_task(
    State(state): State<Arc<AppState>>,
    client: ClientAddr,
    form: Result<Form<AddTaskForm>, FormRejection>,
) -> Result<Response, WebError> {
    let input = match form {
        Ok(Form(form)) => form.task,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "フォームを読み取れませんでした");
            String::new()
        }
    };

    let Ok(description) = TaskDescription::parse(&input) else {
        log_event!(
            WARN,
            action::ADD_TASK_EMPTY,
            ip_address = %client,
            "空のタスクが送信されました"
        );
        return Ok(redirect_to_index());
    };

    match state.repository.add_task(&description).await {
        Ok(task_id) => {
            log_event!(
                INFO,
                action::ADD_TASK_SUCCESS,
                task_id = task_id.as_i64(),
                task_content = description.as_str(),
                ip_address = %client,
                "タスクを追加しました"
            );
            Ok(redirect_to_index())
        }
        Err(e) => {
            log_event!(
                ERROR,
                action::ADD_TASK_ERROR,
                task_content = description.as_str(),
                error = %e,
                "タスクの追加に失敗しました"
            );
            Err(WebError::storage_unavailable(ADD_ERROR_MESSAGE))
        }
    }
}

/// GET /complete/{id}
///
/// 存在しない ID でも成功と同じく一覧へ戻す。
#[tracing::instrument(skip_all)]
pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    client: ClientAddr,
    uri: Uri,
    Path(segment): Path<String>,
) -> Result<Response, WebError> {
    let Some(task_id) = TaskId::parse_path_segment(&segment) else {
        return Err(page_not_found(uri.path(), client));
    };

    match state.repository.mark_completed(task_id).await {
        Ok(()) => {
            log_event!(
                INFO,
                action::COMPLETE_TASK,
                task_id = task_id.as_i64(),
                ip_address = %client,
                "タスクを完了しました"
            );
            Ok(redirect_to_index())
        }
        Err(e) => {
            log_event!(
                ERROR,
                action::COMPLETE_TASK_ERROR,
                task_id = task_id.as_i64(),
                error = %e,
                "タスクの完了に失敗しました"
            );
            Err(WebError::storage_unavailable(COMPLETE_ERROR_MESSAGE))
        }
    }
}

/// GET /delete/{id}
///
/// 存在しない ID でも成功と同じく一覧へ戻す。
#[tracing::instrument(skip_all)]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    client: ClientAddr,
    uri: Uri,
    Path(segment): Path<String>,
) -> Result<Response, WebError> {
    let Some(task_id) = TaskId::parse_path_segment(&segment) else {
        return Err(page_not_found(uri.path(), client));
    };

    match state.repository.delete_task(task_id).await {
        Ok(()) => {
            log_event!(
                INFO,
                action::DELETE_TASK,
                task_id = task_id.as_i64(),
                ip_address = %client,
                "タスクを削除しました"
            );
            Ok(redirect_to_index())
        }
        Err(e) => {
            log_event!(
                ERROR,
                action::DELETE_TASK_ERROR,
                task_id = task_id.as_i64(),
                error = %e,
                "タスクの削除に失敗しました"
            );
            Err(WebError::storage_unavailable(DELETE_ERROR_MESSAGE))
        }
    }
}
