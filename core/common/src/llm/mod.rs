//! LLM プロバイダの実装
//!
//! OpenAI Chat Completions 互換エンドポイントへの単発リクエストを扱う。

pub mod config;
pub mod openai_compat;
pub mod provider;

pub use config::ProviderProfile;
pub use openai_compat::OpenAiCompatProvider;
pub use provider::{LlmProvider, Message};
