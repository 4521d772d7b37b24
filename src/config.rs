//! 設定読み込みとHTTP設定
//!
//! `~/.stash/config.toml` を読み、環境変数で上書きする。

use crate::env::{self, EnvVar};
use crate::error::{Result, StashError};
use reqwest::Client;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const CONFIG_FILE: &str = "config.toml";

/// HTTP設定
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// タイムアウト
    pub timeout: Option<Duration>,
    /// User-Agent
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            user_agent: format!("stash-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// reqwest::Client を構築
    pub fn build_client(&self) -> Client {
        let mut builder = Client::builder().user_agent(&self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().unwrap_or_else(|_| Client::new())
    }
}

/// 接続先の解決済み情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// 末尾の `/` を除いたプロジェクトURL
    pub api_url: String,
    pub anon_key: String,
}

impl Endpoint {
    pub fn new(api_url: &str, anon_key: &str) -> Result<Self> {
        let api_url = api_url.trim().trim_end_matches('/');
        if !(api_url.starts_with("https://") || api_url.starts_with("http://")) {
            return Err(StashError::InvalidArgument(format!(
                "api_url must start with http:// or https:// (got '{}')",
                api_url
            )));
        }

        Ok(Self {
            api_url: api_url.to_string(),
            anon_key: anon_key.trim().to_string(),
        })
    }
}

/// バックエンド設定（未解決）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendConfig {
    pub api_url: Option<String>,
    pub anon_key: Option<String>,
}

impl BackendConfig {
    /// ネットワークを使うコマンド用に必須値を検証する
    pub fn endpoint(&self) -> Result<Endpoint> {
        let api_url = self
            .api_url
            .as_deref()
            .ok_or(StashError::MissingConfig("api_url"))?;
        let anon_key = self
            .anon_key
            .as_deref()
            .ok_or(StashError::MissingConfig("anon_key"))?;
        Endpoint::new(api_url, anon_key)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_url: Option<String>,
    anon_key: Option<String>,
    #[serde(default)]
    http: HttpSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HttpSection {
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

/// アプリケーション設定
#[derive(Debug, Clone)]
pub struct Config {
    pub home: PathBuf,
    pub backend: BackendConfig,
    pub http: HttpConfig,
}

impl Config {
    /// 指定ディレクトリの config.toml を読み込む（存在しなければデフォルト）
    pub fn load_from(home: &Path) -> Result<Self> {
        let path = config_path(home);
        let file: ConfigFile = if path.exists() {
            debug!(path = %path.display(), "loading config");
            toml::from_str(&std::fs::read_to_string(&path)?)?
        } else {
            ConfigFile::default()
        };

        let mut http = HttpConfig::default();
        if let Some(secs) = file.http.timeout_secs {
            // 0 はタイムアウト無効
            http.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(user_agent) = file.http.user_agent {
            http.user_agent = user_agent;
        }

        Ok(Self {
            home: home.to_path_buf(),
            backend: BackendConfig {
                api_url: file.api_url.filter(|s| !s.trim().is_empty()),
                anon_key: file.anon_key.filter(|s| !s.trim().is_empty()),
            },
            http,
        })
    }

    /// STASH_API_URL / STASH_ANON_KEY を優先する
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = EnvVar::get(env::API_URL) {
            self.backend.api_url = Some(url);
        }
        if let Some(key) = EnvVar::get(env::ANON_KEY) {
            self.backend.anon_key = Some(key);
        }
        self
    }
}

/// 設定ディレクトリ内の config.toml
pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

/// 設定ディレクトリ
///
/// 優先順位: 1. STASH_HOME, 2. $HOME/.stash
pub fn stash_home() -> Result<PathBuf> {
    if let Some(dir) = EnvVar::get(env::HOME) {
        return Ok(PathBuf::from(dir));
    }

    EnvVar::get("HOME")
        .map(|home| PathBuf::from(home).join(".stash"))
        .ok_or(StashError::MissingConfig("HOME"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
