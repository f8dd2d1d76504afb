//! # ヘルスチェックレスポンス
//!
//! `GET /health` が返す JSON ボディを定義する。
//!
//! ```json
//! {"status": "healthy", "database": "connected"}
//! {"status": "unhealthy", "error": "<失敗理由>"}
//! ```

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// 正常時は `database`、異常時は `error` のどちらか一方だけを含む。
///
/// ## 使用例
///
/// ```
/// use tasklist_shared::HealthResponse;
///
/// let response = HealthResponse::healthy();
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` または `"unhealthy"`）
    pub status:   String,
    /// データベース接続状態（正常時のみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// 失敗理由（異常時のみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:    Option<String>,
}

impl HealthResponse {
    /// データベースに接続できた場合のレスポンス
    pub fn healthy() -> Self {
        Self {
            status:   "healthy".to_string(),
            database: Some("connected".to_string()),
            error:    None,
        }
    }

    /// データベースに接続できなかった場合のレスポンス
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status:   "unhealthy".to_string(),
            database: None,
            error:    Some(error.into()),
        }
    }
}
