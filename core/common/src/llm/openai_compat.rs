//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! base_url で任意のエンドポイントを指定可能。送信は HttpClient ポート経由。

use crate::error::Error;
use crate::llm::config::ProviderProfile;
use crate::llm::provider::{LlmProvider, Message};
use crate::ports::outbound::{HttpClient, HttpRequest};
use serde_json::{json, Value};
use std::sync::Arc;

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    model: String,
    base_url: String,
    api_key: Option<String>,
    temperature: f64,
    http: Arc<dyn HttpClient>,
}

impl OpenAiCompatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `profile` - ベース URL・モデル・温度
    /// * `api_key` - Bearer トークン（None のとき Authorization を付けない）
    /// * `http` - 送信に使う HttpClient
    pub fn new(profile: &ProviderProfile, api_key: Option<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            model: profile.model.to_string(),
            base_url: profile.base_url.trim_end_matches('/').to_string(),
            api_key,
            temperature: profile.temperature,
            http,
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(key) = &self.api_key {
            headers.push(("Authorization".to_string(), format!("Bearer {}", key)));
        }
        headers
    }
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai_compat"
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<Value, Error> {
        let mut messages: Vec<Value> = Vec::new();

        if let Some(s) = system_instruction {
            messages.push(json!({ "role": "system", "content": s }));
        }
        for msg in history {
            messages.push(json!({ "role": msg.role, "content": msg.content }));
        }
        messages.push(json!({ "role": "user", "content": query }));

        Ok(json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature
        }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let response = self.http.post(&HttpRequest {
            url: self.url(),
            headers: self.headers(),
            body: request_json.to_string(),
        })?;

        if !response.is_success() {
            let description = format!("{} {}", response.status, response.reason)
                .trim_end()
                .to_string();
            let upstream = serde_json::from_str::<Value>(&response.body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()));
            let message = match upstream {
                Some(m) => format!("Chat completions error: {}: {}", description, m),
                None => format!("Chat completions error: {}", description),
            };
            return Err(Error::http_status(response.status, message));
        }

        Ok(response.body)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        // 2xx なのでエラー本文は形式不正として扱う。"error": null は成功応答に付くことがある
        if let Some(err) = v.get("error").filter(|e| e.is_object()) {
            let msg = err["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::json(format!("API error: {}", msg)));
        }

        let text = v["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string());
        Ok(text)
    }
}
