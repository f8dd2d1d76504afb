//! 統合テスト共通ヘルパー

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{Method, Request, header},
    response::Response,
};
use tasklist_infra::repository::TaskRepository;
use tasklist_web::{
    AppState,
    build_app,
    config::{AppConfig, Environment},
    request_metrics,
};
use tracing_subscriber::layer::SubscriberExt;

/// テスト用のリクエスト元アドレス
pub const CLIENT_ADDR: &str = "192.168.1.1:54321";

/// testing 設定でアプリケーションを構築する
pub fn create_app(repository: Arc<dyn TaskRepository>) -> Router {
    let state = AppState::new(
        AppConfig::for_environment(Environment::Testing),
        repository,
        request_metrics::install_recorder().unwrap(),
    )
    .unwrap();
    build_app(Arc::new(state))
}

/// 接続情報付きの GET リクエスト
pub fn get(uri: &str) -> Request<Body> {
    with_client_addr(Request::builder().uri(uri).body(Body::empty()).unwrap())
}

/// 接続情報付きのフォーム送信リクエスト
pub fn post_form(uri: &str, body: &'static str) -> Request<Body> {
    with_client_addr(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap(),
    )
}

/// 接続情報付きの、本文も Content-Type もない POST リクエスト
pub fn post_empty(uri: &str) -> Request<Body> {
    with_client_addr(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
}

fn with_client_addr(mut request: Request<Body>) -> Request<Body> {
    let addr: SocketAddr = CLIENT_ADDR.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// ログキャプチャ
// =============================================================================

/// キャプチャしたイベント
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level:   tracing::Level,
    pub message: String,
    pub fields:  Vec<(String, String)>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn action(&self) -> Option<&str> {
        self.field("action")
    }
}

/// キャプチャしたイベントの一覧
#[derive(Clone, Default)]
pub struct CapturedEvents(Arc<Mutex<Vec<CapturedEvent>>>);

impl CapturedEvents {
    pub fn all(&self) -> Vec<CapturedEvent> {
        self.0.lock().unwrap().clone()
    }

    /// 指定したアクションタグを持つイベント
    pub fn with_action(&self, action: &str) -> Vec<CapturedEvent> {
        self.all()
            .into_iter()
            .filter(|event| event.action() == Some(action))
            .collect()
    }
}

struct CaptureLayer {
    events: CapturedEvents,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.events.0.lock().unwrap().push(CapturedEvent {
            level:   *event.metadata().level(),
            message: visitor.message.unwrap_or_default(),
            fields:  visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields:  Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }
}

/// 現在のスレッドのイベントをキャプチャする
///
/// 返り値のガードをドロップするまでキャプチャが続く。
pub fn capture_events() -> (tracing::subscriber::DefaultGuard, CapturedEvents) {
    let events = CapturedEvents::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer {
        events: events.clone(),
    });
    let guard = tracing::subscriber::set_default(subscriber);
    (guard, events)
}
