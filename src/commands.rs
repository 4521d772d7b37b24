use crate::cli::{Cli, Command};
use stash_cli::config::{config_path, stash_home, Config};
use stash_cli::error::{RichError, StashError};
use stash_cli::rest::RestClient;
use stash_cli::settings::{resolve_token, FileTokenStore};
use std::path::PathBuf;

pub async fn dispatch(cli: Cli) -> Result<(), RichError> {
    match cli.command {
        Command::Creators(args) => creators::run(args).await,
        Command::Token(args) => token::run(args).await,
        Command::Ping(args) => ping::run(args).await,
    }
}

pub mod creators;
pub mod ping;
pub mod token;

fn home_dir() -> Result<PathBuf, RichError> {
    stash_home().map_err(StashError::into_rich)
}

/// config.toml を読み、環境変数で上書きする
fn load_config() -> Result<Config, RichError> {
    let home = home_dir()?;
    Config::load_from(&home)
        .map(Config::with_env_overrides)
        .map_err(|e| e.into_rich_at(&config_path(&home)))
}

/// 設定と保存済みトークンから RestClient を組み立てる
fn rest_client(config: &Config) -> Result<RestClient, RichError> {
    let endpoint = config.backend.endpoint().map_err(StashError::into_rich)?;
    let store = FileTokenStore::in_dir(&config.home);
    let token = resolve_token(&store).map_err(|e| e.into_rich_at(store.path()))?;

    Ok(RestClient::new(endpoint, &config.http).with_token(token))
}
