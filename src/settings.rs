//! 認証トークンの保存
//!
//! `~/.stash/settings.json` にトークンを保存・読み込み・削除する。

#[cfg(test)]
pub mod mock;

use crate::env::{self, EnvVar};
use crate::error::{Result, StashError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use tracing::debug;

const SETTINGS_FILE: &str = "settings.json";

/// 認証トークン
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// 前後の空白を除去して作成する。空なら None。
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        (!value.is_empty()).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bearer認証ヘッダー値を生成
    pub fn to_bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// 先頭4文字以外を伏せた表示
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(4).collect();
        format!("{}…", prefix)
    }
}

impl std::fmt::Display for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthToken(***)")
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthToken(***)")
    }
}

/// 保存済み設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<AuthToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// トークン保存先
pub trait TokenStore: Send + Sync {
    /// 保存済み設定を読む（未保存なら空）
    fn load(&self) -> Result<Settings>;

    /// トークンを保存する
    fn save_token(&self, token: &str) -> Result<Settings>;

    /// トークンを削除する
    fn clear(&self) -> Result<()>;
}

/// JSONファイルによる保存先
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// 設定ディレクトリ配下の settings.json を使う
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(SETTINGS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_token(&self, token: &str) -> Result<Settings> {
        let settings = new_settings(token)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_private(&self.path, &serde_json::to_string_pretty(&settings)?)?;
        debug!(path = %self.path.display(), "token saved");

        Ok(settings)
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!(path = %self.path.display(), "token cleared");
        }
        Ok(())
    }
}

/// 所有者のみ読み書きできるファイルとして書き込む（unix では 0600）
fn write_private(path: &Path, content: &str) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path)?;
    // mode は新規作成時にしか効かない
    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// 保存用の設定を作成（空トークンは拒否）
pub(crate) fn new_settings(token: &str) -> Result<Settings> {
    let token = AuthToken::parse(token)
        .ok_or_else(|| StashError::InvalidArgument("token must not be empty".to_string()))?;

    Ok(Settings {
        auth_token: Some(token),
        saved_at: Some(Utc::now()),
    })
}

/// リクエストに使うトークン
///
/// 優先順位: 1. STASH_AUTH_TOKEN, 2. 保存済みトークン
pub fn resolve_token(store: &dyn TokenStore) -> Result<Option<AuthToken>> {
    if let Some(token) = EnvVar::get(env::AUTH_TOKEN).as_deref().and_then(AuthToken::parse) {
        return Ok(Some(token));
    }

    Ok(store.load()?.auth_token)
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
