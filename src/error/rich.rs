use std::collections::BTreeMap;
use std::path::PathBuf;

use super::code::ErrorCode;

/// エラー表示に添える付加情報
///
/// 表示順は file_path -> url -> host -> additional。
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// 読み書きに失敗した設定ファイル（config.toml / settings.json）
    pub file_path: Option<PathBuf>,
    /// 失敗したリクエストのURL
    pub url: Option<String>,
    /// バックエンドのホスト名（"postgrest" など）
    pub host: Option<String>,
    /// その他（BTreeMap で表示順を固定）
    pub additional: BTreeMap<String, String>,
}

impl ErrorContext {
    /// 空のコンテキスト
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// 任意のキーと値を追加（同じキーは上書き）
    pub fn with_additional(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }

    /// 何も設定されていなければ true
    pub fn is_empty(&self) -> bool {
        self.file_path.is_none()
            && self.url.is_none()
            && self.host.is_none()
            && self.additional.is_empty()
    }
}

/// CLI に表示するエラー
///
/// `StashError::into_rich` で作り、`ErrorFormatter` で整形する。
/// 元の `StashError` は `source()` から辿れる。
pub struct RichError {
    code: ErrorCode,
    message: String,
    context: ErrorContext,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Debug for RichError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichError")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("context", &self.context)
            .field("source", &self.source.as_ref().map(|e| e.to_string()))
            .finish()
    }
}

impl RichError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// コンテキストを置き換える
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }

    /// 既存のコンテキストを保ったままファイルパスを設定する
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.context = std::mem::take(&mut self.context).with_file_path(path);
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }
}

impl std::fmt::Display for RichError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for RichError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
