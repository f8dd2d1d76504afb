//! # ミドルウェア
//!
//! Web サーバー用のミドルウェアを提供する。

mod internal_error;

pub use internal_error::{install_panic_hook, log_internal_error, panic_response};
