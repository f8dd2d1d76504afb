//! # Web サーバー設定
//!
//! 環境変数から Web サーバーの設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `APP_ENV` | No | 実行環境（`development` / `production` / `testing`、デフォルト: `development`） |
//! | `DATABASE_PATH` | No | SQLite ファイルのパス（デフォルト: `tasks.db`、testing では `/tmp/test.db`） |
//! | `SECRET_KEY` | No | 署名用の秘密鍵（デフォルト: `dev-secret-key`） |
//! | `WEB_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `WEB_PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `LOG_FORMAT` | No | ログ出力先の上書き（`json` / `pretty` / `off`） |

use std::{env, fmt, path::PathBuf};

use tasklist_shared::LogSink;
use thiserror::Error;

const DEFAULT_DATABASE_PATH: &str = "tasks.db";
const TESTING_DATABASE_PATH: &str = "/tmp/test.db";
const DEFAULT_SECRET_KEY: &str = "dev-secret-key";

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("未知の実行環境です: {0}")]
    UnknownEnvironment(String),

    #[error("WEB_PORT は有効なポート番号である必要があります: {0}")]
    InvalidPort(String),
}

/// 実行環境
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Testing,
}

impl Environment {
    /// 環境名をパースする
    ///
    /// `default` は `development` の別名として扱う。
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name {
            "development" | "default" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "testing" => Ok(Self::Testing),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        }
    }

    /// デバッグモードかどうか（development のみ）
    pub fn is_debug(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_testing(&self) -> bool {
        matches!(self, Self::Testing)
    }

    fn default_database_path(&self) -> &'static str {
        match self {
            Self::Testing => TESTING_DATABASE_PATH,
            Self::Development | Self::Production => DEFAULT_DATABASE_PATH,
        }
    }
}

/// セッション Cookie の属性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookieConfig {
    /// HTTPS 接続でのみ送信する（production のみ）
    pub secure:    bool,
    pub http_only: bool,
    pub same_site: &'static str,
}

impl SessionCookieConfig {
    fn for_environment(environment: Environment) -> Self {
        Self {
            secure:    environment == Environment::Production,
            http_only: true,
            same_site: "Lax",
        }
    }
}

/// Web サーバーの設定
#[derive(Clone)]
pub struct AppConfig {
    /// 実行環境
    pub environment:    Environment,
    /// バインドアドレス
    pub host:           String,
    /// ポート番号
    pub port:           u16,
    /// SQLite ファイルのパス
    pub database_path:  PathBuf,
    /// 署名用の秘密鍵
    pub secret_key:     String,
    /// セッション Cookie の属性
    pub session_cookie: SessionCookieConfig,
    /// ログの出力先
    pub log_sink:       LogSink,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// `lookup` は変数名を受け取り、値があれば `Some` を返す。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("APP_ENV") {
            Some(name) => Environment::parse(&name)?,
            None => Environment::Development,
        };

        let port = match lookup("WEB_PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            None => 5000,
        };

        let log_sink = LogSink::resolve(
            environment.is_testing(),
            environment.is_debug(),
            lookup("LOG_FORMAT").as_deref(),
        );

        Ok(Self {
            environment,
            host: lookup("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(environment.default_database_path())),
            secret_key: lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            session_cookie: SessionCookieConfig::for_environment(environment),
            log_sink,
        })
    }

    /// 環境変数を参照せず、実行環境の既定値だけで設定を作成する
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_path: PathBuf::from(environment.default_database_path()),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            session_cookie: SessionCookieConfig::for_environment(environment),
            log_sink: LogSink::resolve(environment.is_testing(), environment.is_debug(), None),
        }
    }

    /// `host:port` 形式のバインドアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_path", &self.database_path)
            .field("secret_key", &"[REDACTED]")
            .field("session_cookie", &self.session_cookie)
            .field("log_sink", &self.log_sink)
            .finish()
    }
}
