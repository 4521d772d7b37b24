pub mod code;
pub mod formatter;
pub mod rich;

pub use code::ErrorCode;
pub use formatter::ErrorFormatter;
pub use rich::{ErrorContext, RichError};

use std::path::Path;
use thiserror::Error;

/// stash-cli 統一エラー型
#[derive(Debug, Error)]
pub enum StashError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{host} API error: {message} (status: {status})")]
    Api {
        host: String,
        status: u16,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Missing configuration: {0}. Set it in config.toml or via environment")]
    MissingConfig(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, StashError>;

impl StashError {
    /// 対応するエラーコード
    pub fn code(&self) -> ErrorCode {
        match self {
            StashError::Network(e) if e.is_timeout() => ErrorCode::Net002,
            StashError::Network(_) => ErrorCode::Net001,
            StashError::Api { status, .. } => match *status {
                429 => ErrorCode::Api001,
                401 | 403 => ErrorCode::Api002,
                404 => ErrorCode::Api003,
                s if (500..600).contains(&s) => ErrorCode::Api004,
                _ => ErrorCode::Api005,
            },
            StashError::MalformedResponse(_) => ErrorCode::Api005,
            StashError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                ErrorCode::Io002
            }
            StashError::Io(_) => ErrorCode::Io001,
            StashError::Json(_) => ErrorCode::Io003,
            StashError::ConfigParse(_) => ErrorCode::Cfg001,
            StashError::MissingConfig(_) => ErrorCode::Cfg002,
            StashError::InvalidArgument(_) => ErrorCode::Val001,
        }
    }

    /// ファイルの読み書き・解析に由来するエラーか
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            StashError::Io(_) | StashError::Json(_) | StashError::ConfigParse(_)
        )
    }

    /// `path` を扱っていたときのエラーとして RichError に変換
    ///
    /// ファイル由来のエラーにのみパスを添える。
    pub fn into_rich_at(self, path: &Path) -> RichError {
        let from_file = self.is_file_error();
        let rich = self.into_rich();
        if from_file {
            rich.with_file_path(path)
        } else {
            rich
        }
    }

    /// CLI 表示用の RichError に変換
    pub fn into_rich(self) -> RichError {
        let code = self.code();
        let message = self.to_string();
        let context = match &self {
            StashError::Api { host, status, .. } => ErrorContext::new()
                .with_host(host.clone())
                .with_additional("status", status.to_string()),
            StashError::Network(e) => match e.url() {
                Some(url) => ErrorContext::new().with_url(url.as_str()),
                None => ErrorContext::new(),
            },
            _ => ErrorContext::new(),
        };

        RichError::new(code, message)
            .with_context(context)
            .with_source(self)
    }
}
