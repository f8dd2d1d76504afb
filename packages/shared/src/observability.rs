//! # Observability 基盤
//!
//! ログの出力先（シンク）の選択とトレーシング初期化を提供する。
//!
//! ## シンクの選択
//!
//! | 実行環境 | シンク |
//! |----------|--------|
//! | testing | [`Off`](LogSink::Off)（イベントは破棄され、バッファもされない） |
//! | development（デバッグモード） | [`Pretty`](LogSink::Pretty) |
//! | production | [`Json`](LogSink::Json) |
//!
//! testing 以外では環境変数 `LOG_FORMAT`（`json` / `pretty` / `off`）で上書きできる。

#[cfg(feature = "observability")]
pub mod json_format;

#[cfg(feature = "observability")]
pub use json_format::{ExceptionRecord, JsonEventFormat, LogRecord};

/// ログの出力先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// 1 行 1 JSON の構造化ログ（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    Pretty,
    /// 出力しない（テスト環境向け）
    Off,
}

impl LogSink {
    /// 文字列からシンクをパースする
    ///
    /// 不正な値の場合は `None` を返す。
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            "off" => Some(Self::Off),
            _ => None,
        }
    }

    /// 実行環境と明示指定からシンクを決定する
    ///
    /// testing では明示指定に関わらず [`Off`](LogSink::Off) になる。
    /// 明示指定が不正な場合は stderr に警告を出し、環境ごとの既定値を使う。
    pub fn resolve(testing: bool, debug: bool, requested: Option<&str>) -> Self {
        if testing {
            return Self::Off;
        }

        let default = if debug { Self::Pretty } else { Self::Json };
        match requested {
            Some(value) => Self::parse(value).unwrap_or_else(|| {
                eprintln!("WARNING: unknown LOG_FORMAT={value:?}, falling back to {default:?}");
                default
            }),
            None => default,
        }
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数でログレベルを制御可能。
/// 未設定の場合は `"info,tasklist=debug"` をデフォルトとする。
///
/// [`LogSink::Off`] の場合は subscriber を登録しない。
/// イベントはどこにも記録されずに破棄される。
#[cfg(feature = "observability")]
pub fn init_tracing(sink: LogSink) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    if sink == LogSink::Off {
        return;
    }

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tasklist=debug".into());

    let fmt_layer = match sink {
        LogSink::Json => tracing_subscriber::fmt::layer()
            .event_format(JsonEventFormat)
            .boxed(),
        LogSink::Pretty | LogSink::Off => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
