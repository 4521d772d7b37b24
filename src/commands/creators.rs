//! stash creators コマンド
//!
//! 新しく参加したクリエイターの一覧を表示する。

use super::{load_config, rest_client};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use stash_cli::directory::{CreatorDirectory, CreatorQuery};
use stash_cli::error::{ErrorCode, RichError, StashError};
use stash_cli::output::{creators_json, creators_simple, creators_table, CommandSummary};
use stash_cli::profile::CreatorProfile;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(after_help = "LIMIT:\n  Clamped to 1-30. Missing, zero or non-numeric values fall back to 6.")]
pub struct Args {
    /// Maximum number of creators to show
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub limit: Option<String>,

    /// Exclude this user id from the list
    #[arg(long)]
    pub exclude: Option<String>,

    /// Filter by display name or handle (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output in JSON format
    #[arg(long, conflicts_with = "simple")]
    pub json: bool,

    /// Output only handles
    #[arg(long, conflicts_with = "json")]
    pub simple: bool,
}

impl Args {
    fn query(&self) -> CreatorQuery {
        CreatorQuery {
            limit: parse_limit(self.limit.as_deref()),
            exclude_user_id: self.exclude.clone(),
            search: self.search.clone(),
        }
    }
}

/// 数値として読めない値は未指定扱い
fn parse_limit(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

pub async fn run(args: Args) -> Result<(), RichError> {
    let config = load_config()?;
    let client = rest_client(&config)?;
    let query = args.query();

    let spinner = spinner();
    let listing = CreatorDirectory::new(client).fetch(&query).await;
    spinner.finish_and_clear();

    let creators = listing.into_result().map_err(StashError::into_rich)?;
    print(&creators, &args, query.safe_limit())
}

fn print(creators: &[CreatorProfile], args: &Args, limit: usize) -> Result<(), RichError> {
    if args.json {
        let json = creators_json(creators).map_err(|e| RichError::new(ErrorCode::Int001, e))?;
        println!("{json}");
    } else if args.simple {
        if !creators.is_empty() {
            println!("{}", creators_simple(creators));
        }
    } else {
        if !creators.is_empty() {
            println!("{}", creators_table(creators));
        }
        println!("{}", CommandSummary::listing(creators.len(), limit).line());
    }

    Ok(())
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Fetching creators...");
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
