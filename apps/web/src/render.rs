//! # タスク一覧のレンダリング
//!
//! tera テンプレートエンジンでタスク一覧ページの HTML を生成する。
//!
//! - テンプレートは `include_str!` でバイナリに埋め込む
//! - `.html` テンプレートは自動エスケープされるため、タスク内容に含まれる
//!   HTML はマークアップとして解釈されない

use tasklist_domain::task::Task;
use tera::{Context, Tera};

const INDEX_TEMPLATE: &str = "index.html";

/// タスク一覧ページのレンダラー
#[derive(Debug)]
pub struct TaskListRenderer {
    engine: Tera,
}

impl TaskListRenderer {
    /// 埋め込みテンプレートを登録してレンダラーを作成する
    pub fn new() -> Result<Self, tera::Error> {
        let mut engine = Tera::default();
        engine.add_raw_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;

        Ok(Self { engine })
    }

    /// タスク一覧ページを生成する
    pub fn render(&self, tasks: &[Task]) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("tasks", tasks);
        self.engine.render(INDEX_TEMPLATE, &context)
    }
}
