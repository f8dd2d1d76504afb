//! # ドメイン層エラー定義

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 入力値が検証を通らなかった
    ///
    /// 空文字列・空白のみのタスク内容など。永続化層には到達させない。
    #[error("入力が拒否されました: {0}")]
    ValidationRejected(String),
}
