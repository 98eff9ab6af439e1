//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。終了コードは sysexits に合わせる。

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// ファイル・ストレージ I/O の失敗
    #[error("{0}")]
    Io(String),
    /// JSON の解析・生成の失敗
    #[error("{0}")]
    Json(String),
    /// HTTP 通信の失敗。非 2xx のときは status を持つ（通信自体の失敗は None）
    #[error("{message}")]
    Http { status: Option<u16>, message: String },
    /// 引数不正
    #[error("{0}")]
    InvalidArgument(String),
    /// 環境変数の不足など
    #[error("{0}")]
    Env(String),
    /// その他のシステムエラー
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    /// 通信自体の失敗（ステータスなし）
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http {
            status: None,
            message: msg.into(),
        }
    }

    /// 非 2xx レスポンス
    pub fn http_status(status: u16, msg: impl Into<String>) -> Self {
        Self::Http {
            status: Some(status),
            message: msg.into(),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Json(_) => 65,
            Self::Io(_) => 74,
            Self::Http { .. } | Self::Env(_) | Self::System(_) => 70,
        }
    }

    /// 使い方の誤りか（main で usage を表示する）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());

        let err = Error::system("test");
        assert_eq!(err.exit_code(), 70);
        assert!(!err.is_usage());
    }

    #[test]
    fn test_http_status_is_kept() {
        let err = Error::http_status(500, "Internal Server Error");
        assert_eq!(
            err,
            Error::Http {
                status: Some(500),
                message: "Internal Server Error".to_string()
            }
        );
        assert_eq!(err.exit_code(), 70);

        let err = Error::http("connection refused");
        assert!(matches!(err, Error::Http { status: None, .. }));
    }

    #[test]
    fn test_from_serde_json() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = e.into();
        assert!(matches!(err, Error::Json(_)));
        assert_eq!(err.exit_code(), 65);
    }
}
