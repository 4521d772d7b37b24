//! stash token コマンド
//!
//! 認証トークンの保存・表示・削除。

use super::home_dir;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use stash_cli::env::{self, EnvVar};
use stash_cli::error::{RichError, StashError};
use stash_cli::settings::{FileTokenStore, Settings, TokenStore};

#[derive(Debug, Parser)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save an auth token
    Set {
        /// The token value
        token: String,
    },

    /// Show the stored token (masked)
    Show {
        /// Print the full token
        #[arg(long)]
        reveal: bool,
    },

    /// Remove the stored token
    Clear,
}

/// config.toml は読まない（壊れていてもトークン操作はできる）
pub async fn run(args: Args) -> Result<(), RichError> {
    let store = FileTokenStore::in_dir(&home_dir()?);
    execute(&store, args.command)
        .map(|line| println!("{line}"))
        .map_err(|e| e.into_rich_at(store.path()))
}

fn execute(store: &dyn TokenStore, command: Command) -> Result<String, StashError> {
    match command {
        Command::Set { token } => {
            let settings = store.save_token(&token)?;
            Ok(format!("{} Token saved{}", "✓".green(), saved_at_suffix(&settings)))
        }
        Command::Show { reveal } => Ok(describe(&store.load()?, reveal)),
        Command::Clear => {
            store.clear()?;
            Ok(format!("{} Token cleared", "✓".green()))
        }
    }
}

fn describe(settings: &Settings, reveal: bool) -> String {
    let mut line = match &settings.auth_token {
        Some(token) if reveal => format!("{}{}", token.as_str(), saved_at_suffix(settings)),
        Some(token) => format!("{}{}", token.masked(), saved_at_suffix(settings)),
        None => "No token saved".to_string(),
    };

    if EnvVar::get(env::AUTH_TOKEN).is_some() {
        line.push_str(&format!("\nnote: {} is set and takes precedence", env::AUTH_TOKEN));
    }

    line
}

fn saved_at_suffix(settings: &Settings) -> String {
    settings
        .saved_at
        .map(|at| format!(" (saved {})", at.format("%Y-%m-%d %H:%M UTC")))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
