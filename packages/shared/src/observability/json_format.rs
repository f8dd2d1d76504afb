//! # JSON ログフォーマッタ
//!
//! tracing のイベントを固定スキーマの JSON（1 行 1 レコード）に整形する。
//!
//! ## スキーマ
//!
//! ```json
//! {
//!   "timestamp": "2026-01-01T00:00:00.000000Z",
//!   "level": "INFO",
//!   "message": "タスクを追加しました",
//!   "module": "tasklist_web::handler::task",
//!   "function": "add_task",
//!   "line": 42,
//!   "process": 1234,
//!   "thread": "tokio-runtime-worker",
//!   "action": "add_task_success",
//!   "task_id": 7
//! }
//! ```
//!
//! - `function` はイベント発生時点で最も内側のスパン名（ハンドラは
//!   `#[tracing::instrument]` で関数名のスパンを持つ）。スパン外では `null`
//! - `action` とその他のイベントフィールドはトップレベルに展開する。
//!   固定フィールドと同名のイベントフィールド（`level` など）は
//!   `field_` を前置したキー（`field_level`）で出力する
//! - `exception = true` を持つイベントは例外レコード
//!   （`timestamp`, `level`, `module`, `message`, `exception`）として出力する

use std::{fmt, thread};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{
    Event,
    Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{
    fmt::{FmtContext, FormatEvent, FormatFields, format::Writer},
    registry::LookupSpan,
};

/// 例外レコードを示すイベントフィールド名
const EXCEPTION_FIELD: &str = "exception";

/// [`LogRecord`] の固定フィールド名
const RESERVED_FIELDS: &[&str] = &[
    "timestamp",
    "level",
    "message",
    "module",
    "function",
    "line",
    "process",
    "thread",
    "action",
];

/// 通常のログレコード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub level:     String,
    pub message:   String,
    pub module:    Option<String>,
    pub function:  Option<String>,
    pub line:      Option<u32>,
    pub process:   u32,
    pub thread:    String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action:    Option<String>,
    /// コンテキストフィールド（`task_id`, `ip_address` など）
    #[serde(flatten)]
    pub fields:    Map<String, Value>,
}

/// 例外レコード
///
/// パニックなど、ハンドラから漏れた障害を出力する。
/// `message` には整形済みの障害内容（スタックトレースを含む）が入る。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptionRecord {
    pub timestamp: String,
    pub level:     &'static str,
    pub module:    Option<String>,
    pub message:   String,
    pub exception: bool,
}

/// tracing-subscriber 用の JSON イベントフォーマッタ
///
/// ```rust,ignore
/// tracing_subscriber::fmt::layer().event_format(JsonEventFormat)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEventFormat;

impl<S, N> FormatEvent<S, N> for JsonEventFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let module = metadata.module_path().map(str::to_string);

        let json = if visitor.exception {
            serde_json::to_string(&ExceptionRecord {
                timestamp,
                level: "ERROR",
                module,
                message: visitor.message.unwrap_or_default(),
                exception: true,
            })
        } else {
            serde_json::to_string(&LogRecord {
                timestamp,
                level: metadata.level().to_string(),
                message: visitor.message.unwrap_or_default(),
                module,
                function: ctx.lookup_current().map(|span| span.name().to_string()),
                line: metadata.line(),
                process: std::process::id(),
                thread: current_thread_label(),
                action: visitor.action,
                fields: visitor.fields,
            })
        }
        .map_err(|_| fmt::Error)?;

        writeln!(writer, "{json}")
    }
}

fn current_thread_label() -> String {
    let current = thread::current();
    match current.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", current.id()),
    }
}

/// イベントフィールドを JSON の値として収集する Visitor
#[derive(Default)]
struct RecordVisitor {
    message:   Option<String>,
    action:    Option<String>,
    exception: bool,
    fields:    Map<String, Value>,
}

impl RecordVisitor {
    fn record_text(&mut self, field: &Field, text: String) {
        match field.name() {
            "message" => self.message = Some(text),
            "action" => self.action = Some(text),
            _ => self.insert(field, Value::String(text)),
        }
    }

    /// 固定フィールドと衝突する名前は `field_` を前置して格納する
    fn insert(&mut self, field: &Field, value: Value) {
        let name = field.name();
        let key = if RESERVED_FIELDS.contains(&name) {
            format!("field_{name}")
        } else {
            name.to_string()
        };
        self.fields.insert(key, value);
    }
}

impl Visit for RecordVisitor {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == EXCEPTION_FIELD {
            self.exception = value;
        } else {
            self.insert(field, Value::Bool(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_text(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_text(field, format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use pretty_assertions::assert_eq;
    use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt};

    use super::*;

    /// 出力をメモリに溜めるテスト用 Writer
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn lines(&self) -> Vec<Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// JSON フォーマッタを通した出力をキャプチャする
    fn capture(emit: impl FnOnce()) -> Vec<Value> {
        let buffer = SharedBuffer::default();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(JsonEventFormat)
                .with_writer(buffer.clone()),
        );
        tracing::subscriber::with_default(subscriber, emit);
        buffer.lines()
    }

    #[test]
    fn test_基本フィールドが出力される() {
        let lines = capture(|| {
            tracing::info_span!("test_function").in_scope(|| {
                tracing::info!("Test message");
            });
        });

        assert_eq!(lines.len(), 1);
        let record = &lines[0];
        assert_eq!(record["message"], "Test message");
        assert_eq!(record["level"], "INFO");
        assert_eq!(
            record["module"],
            "tasklist_shared::observability::json_format::tests"
        );
        assert_eq!(record["function"], "test_function");
        assert!(record["line"].is_u64());
        assert_eq!(record["process"], u64::from(std::process::id()));
        assert!(record["thread"].is_string());
        assert!(record["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(record.get("action").is_none());
    }

    #[test]
    fn test_スパン外ではfunctionがnullになる() {
        let lines = capture(|| tracing::warn!("Warning message"));

        assert_eq!(lines[0]["level"], "WARN");
        assert!(lines[0]["function"].is_null());
    }

    #[test]
    fn test_コンテキストフィールドがトップレベルに展開される() {
        let lines = capture(|| {
            tracing::warn!(
                user_id = "user123",
                task_id = 456,
                action = "test_action",
                "Warning message"
            );
        });

        let record = &lines[0];
        assert_eq!(record["user_id"], "user123");
        assert_eq!(record["task_id"], 456);
        assert_eq!(record["action"], "test_action");
    }

    #[test]
    fn test_log_eventマクロでactionが付与される() {
        let lines = capture(|| {
            crate::log_event!(
                ERROR,
                crate::event_log::action::ADD_TASK_ERROR,
                task_content = "Buy milk",
                "タスクの追加に失敗しました"
            );
        });

        let record = &lines[0];
        assert_eq!(record["level"], "ERROR");
        assert_eq!(record["action"], "add_task_error");
        assert_eq!(record["task_content"], "Buy milk");
        assert_eq!(record["message"], "タスクの追加に失敗しました");
    }

    #[test]
    fn test_exceptionイベントは例外レコードとして出力される() {
        let lines = capture(|| {
            tracing::error!(exception = true, "panicked at 'Test exception'");
        });

        assert_eq!(
            lines[0],
            serde_json::json!({
                "timestamp": lines[0]["timestamp"],
                "level": "ERROR",
                "module": "tasklist_shared::observability::json_format::tests",
                "message": "panicked at 'Test exception'",
                "exception": true,
            })
        );
    }

    #[test]
    fn test_固定フィールドと同名のフィールドは前置付きで出力される() {
        let buffer = SharedBuffer::default();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(JsonEventFormat)
                .with_writer(buffer.clone()),
        );
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(level = "custom", line = 7_u64, thread = false, "collision");
        });

        let raw = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(raw.matches(r#""level":"#).count(), 1);
        let record: Value = serde_json::from_str(raw.trim_end()).unwrap();
        assert_eq!(record["level"], "INFO");
        assert_eq!(record["field_level"], "custom");
        assert_eq!(record["field_line"], 7);
        assert_eq!(record["field_thread"], false);
        assert!(record["line"].is_u64());
        assert!(record["thread"].is_string());
    }

    #[test]
    fn test_スカラー型が保持される() {
        let lines = capture(|| {
            tracing::info!(count = 3_u64, ratio = 0.5_f64, flag = false, label = %"x", "scalars");
        });

        let record = &lines[0];
        assert_eq!(record["count"], 3);
        assert_eq!(record["ratio"], 0.5);
        assert_eq!(record["flag"], false);
        assert_eq!(record["label"], "x");
    }
}
