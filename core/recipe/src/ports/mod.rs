//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（ストレージ・生成サービス・ID 生成）を使うための trait

pub mod inbound;
pub mod outbound;
