//! HTTP Outbound ポート
//!
//! LLM プロバイダは reqwest を直接呼ばず、この trait 経由で POST する。
//! テストでは固定レスポンスを返す実装を渡せる。

use crate::error::Error;

/// 送信する HTTP リクエスト（JSON ボディの POST のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// 受信した HTTP レスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// ステータスの説明（例: "Internal Server Error"）
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP クライアント抽象（Outbound ポート）
///
/// 非 2xx でも Ok(HttpResponse) を返す。Err は通信自体の失敗のみ。
pub trait HttpClient: Send + Sync {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let mut res = HttpResponse {
            status: 200,
            reason: "OK".to_string(),
            body: String::new(),
        };
        assert!(res.is_success());
        res.status = 204;
        assert!(res.is_success());
        res.status = 404;
        assert!(!res.is_success());
        res.status = 500;
        assert!(!res.is_success());
    }
}
