//! # SQLite データベース接続管理
//!
//! データベースファイルへの接続とスキーマの準備を行う。
//!
//! ## 設計方針
//!
//! - **操作ごとの接続**: リクエストをまたいで接続を保持しない。
//!   各操作は接続を開き、実行し、返る前に閉じる
//! - **書き込みは明示トランザクション**: 読み取りは単文の自動コミット
//! - **タイムアウト**: SQLite の busy timeout（sqlx の既定値 5 秒）のみ。
//!   独自のリトライや排他制御は行わない
//!
//! ## スキーマ
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS tasks (
//!     id        INTEGER PRIMARY KEY AUTOINCREMENT,
//!     task      TEXT NOT NULL,
//!     completed BOOLEAN DEFAULT FALSE
//! )
//! ```
//!
//! テーブルは起動時に存在しなければ作成する。削除やマイグレーションは行わない。

use std::path::Path;

use sqlx::{Connection, SqliteConnection, sqlite::SqliteConnectOptions};

use crate::error::InfraError;

/// タスクテーブルの DDL
const CREATE_TASKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    task      TEXT NOT NULL,
    completed BOOLEAN DEFAULT FALSE
)
"#;

/// データベースファイルへの接続設定を作成する
///
/// ファイルが存在しない場合は初回接続時に作成する。
pub fn connect_options(database_path: impl AsRef<Path>) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
}

/// 新しい接続を開く
///
/// 呼び出し側は操作の完了後に `close()` で接続を閉じる。
pub async fn connect(options: &SqliteConnectOptions) -> Result<SqliteConnection, InfraError> {
    Ok(SqliteConnection::connect_with(options).await?)
}

/// データベースファイルの親ディレクトリを作成する
///
/// パスにディレクトリ部分がない場合（`tasks.db` など）は何もしない。
pub async fn prepare_parent_dir(database_path: &Path) -> Result<(), InfraError> {
    match database_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(parent).await?;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// タスクテーブルが存在しなければ作成する
///
/// 何度呼び出しても結果は変わらない。
pub async fn ensure_schema(database_path: &Path) -> Result<(), InfraError> {
    prepare_parent_dir(database_path).await?;

    let mut conn = connect(&connect_options(database_path)).await?;
    sqlx::query(CREATE_TASKS_TABLE).execute(&mut conn).await?;
    conn.close().await?;

    Ok(())
}
