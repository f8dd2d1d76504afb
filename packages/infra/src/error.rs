//! # インフラ層エラー定義
//!
//! ストアの操作で発生するエラーを表現する。
//!
//! どのバリアントも呼び出し側からは「ストアを利用できない」障害として扱う。
//! 詳細はログにのみ出力し、HTTP レスポンスには含めない。

use thiserror::Error;

/// インフラ層で発生するエラー
#[derive(Debug, Error)]
pub enum InfraError {
    /// データベースエラー
    ///
    /// 接続失敗、ロック競合、ファイル破損、SQL 実行失敗など。
    #[error("データベースエラー: {0}")]
    Database(#[from] sqlx::Error),

    /// データベースファイルの配置先を準備できない
    ///
    /// 親ディレクトリの作成に失敗した場合（権限不足など）。
    #[error("データベースファイルを準備できません: {0}")]
    Io(#[from] std::io::Error),
}
