//! stash ping コマンド
//!
//! 保存済みトークンでバックエンドに1回問い合わせ、疎通を確認する。

use super::{load_config, rest_client};
use clap::Parser;
use stash_cli::error::{RichError, StashError};
use stash_cli::output::CommandSummary;
use tracing::info;

#[derive(Debug, Parser)]
pub struct Args {}

pub async fn run(_args: Args) -> Result<(), RichError> {
    let config = load_config()?;
    let client = rest_client(&config)?;

    let report = client.ping().await.map_err(StashError::into_rich)?;
    info!(status = report.status, elapsed_ms = report.elapsed.as_millis() as u64, "ping ok");

    println!("{}", CommandSummary::ping(&report).line());
    Ok(())
}
