//! レシピアシスタント共通ライブラリ
//!
//! `recipe` コマンドから使う、エラー型・ログ・外界アクセスのポートとアダプタ、
//! OpenAI Chat Completions 互換の LLM プロバイダを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Outbound ポート（trait）
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// LLM プロバイダ
pub mod llm;
