//! LLMプロバイダのトレイト定義

use crate::error::Error;
use serde_json::Value;

/// LLMプロバイダのトレイト
///
/// リクエスト組み立て・送信・応答テキスト抽出を分けておき、テストで個別に確かめられるようにする。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `query` - ユーザーメッセージ
    /// * `system_instruction` - システム指示（オプション）
    /// * `history` - 会話履歴（system と query の間に挟む）
    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンス本文を取得
    ///
    /// # Returns
    /// * `Ok(String)` - 2xx のレスポンス JSON 文字列
    /// * `Err(Error::Http)` - 通信失敗または非 2xx
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからテキストを抽出
    ///
    /// # Returns
    /// * `Ok(Option<String>)` - 抽出したテキスト（存在しない場合はNone）
    /// * `Err(Error::Json)` - レスポンスが JSON でない、または error オブジェクトを含む
    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error>;

    /// system + user の 1 往復で応答テキストを得る（リトライなし）
    fn complete(
        &self,
        query: &str,
        system_instruction: Option<&str>,
    ) -> Result<Option<String>, Error> {
        let payload = self.make_request_payload(query, system_instruction, &[])?;
        let request_json = serde_json::to_string(&payload)?;
        let response_json = self.make_http_request(&request_json)?;
        self.parse_response_text(&response_json)
    }
}

/// メッセージ構造体（role と本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("s").role, "system");
        assert_eq!(Message::user("u").role, "user");
        let msg = Message::assistant("Hi there");
        assert_eq!(msg.role, "assistant");
        assert_eq!(msg.content, "Hi there");
    }

    #[test]
    fn test_message_with_multiline_content() {
        let msg = Message::user("Line 1\nLine 2\nLine 3");
        assert_eq!(msg.content, "Line 1\nLine 2\nLine 3");
    }
}
