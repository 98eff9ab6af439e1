//! プロバイダ設定（config.json）
//!
//! ベース URL・モデル・API キーの環境変数名・温度を解決する。省略したキーは既定値。

use crate::domain::ModelName;
use crate::error::Error;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// 解決済みのプロバイダ設定
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    pub base_url: String,
    pub model: ModelName,
    /// API キーを読む環境変数名
    pub api_key_env: String,
    pub temperature: f64,
}

impl Default for ProviderProfile {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: ModelName::new(DEFAULT_MODEL),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// serde 用の内部構造（全キー省略可）
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProviderProfileRaw {
    base_url: Option<String>,
    #[serde(alias = "default_model")]
    model: Option<String>,
    api_key_env: Option<String>,
    temperature: Option<f64>,
}

impl ProviderProfile {
    /// JSON 文字列からパース（ファイル読みは wiring で行う）
    pub fn parse(json: &str) -> Result<Self, Error> {
        let raw: ProviderProfileRaw = serde_json::from_str(json)
            .map_err(|e| Error::json(format!("Failed to parse config.json: {}", e)))?;
        let defaults = Self::default();
        Ok(Self {
            base_url: raw.base_url.unwrap_or(defaults.base_url),
            model: raw.model.map(ModelName::new).unwrap_or(defaults.model),
            api_key_env: raw.api_key_env.unwrap_or(defaults.api_key_env),
            temperature: raw.temperature.unwrap_or(defaults.temperature),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = ProviderProfile::default();
        assert_eq!(p.base_url, "https://api.openai.com/v1");
        assert_eq!(&*p.model, "gpt-3.5-turbo");
        assert_eq!(p.api_key_env, "OPENAI_API_KEY");
        assert_eq!(p.temperature, 0.7);
    }

    #[test]
    fn test_parse_partial() {
        let p = ProviderProfile::parse(r#"{"model": "gpt-4o-mini", "temperature": 0.2}"#).unwrap();
        assert_eq!(&*p.model, "gpt-4o-mini");
        assert_eq!(p.temperature, 0.2);
        assert_eq!(p.base_url, DEFAULT_BASE_URL);
        assert_eq!(p.api_key_env, DEFAULT_API_KEY_ENV);
    }

    #[test]
    fn test_parse_empty_object() {
        assert_eq!(ProviderProfile::parse("{}").unwrap(), ProviderProfile::default());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = ProviderProfile::parse("not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        let err = ProviderProfile::parse(r#"{"modle": "typo"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
