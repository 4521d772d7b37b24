//! stash-cli
//!
//! Stash バックエンド（PostgREST）向けの薄いクライアント。
//! クリエイター一覧の取得、認証トークンの保存、疎通確認を提供する。

pub mod config;
pub mod directory;
pub mod env;
pub mod error;
pub mod http;
pub mod logging;
pub mod output;
pub mod profile;
pub mod rest;
pub mod settings;
