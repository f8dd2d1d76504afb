//! # リクエスト元アドレス
//!
//! ログの `ip_address` フィールドに出力するリクエスト元アドレスを取り出す。
//!
//! サーバーは `into_make_service_with_connect_info::<SocketAddr>()` で起動し、
//! 接続情報をリクエスト拡張に載せる。接続情報がない場合（`oneshot` による
//! テストなど）は `-` として扱う。

use std::{convert::Infallible, fmt, net::SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

/// リクエスト元アドレス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientAddr(pub Option<SocketAddr>);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(Self(addr))
    }
}

impl fmt::Display for ClientAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(addr) => write!(f, "{}", addr.ip()),
            None => f.write_str("-"),
        }
    }
}
