//! reqwest (blocking) による HttpClient 実装
//!
//! タイムアウトは設定しない。応答が来るまでトランスポートの既定に任せる。

use crate::error::Error;
use crate::ports::outbound::{HttpClient, HttpRequest, HttpResponse};

/// blocking reqwest で POST する HttpClient 実装
pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let mut builder = self.client.post(&request.url).body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let body = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}
