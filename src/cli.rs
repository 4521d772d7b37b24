use clap::{Parser, Subcommand};

use crate::commands::{creators, ping, token};

#[derive(Debug, Parser)]
#[command(name = "stash")]
#[command(about = "Stash backend client CLI", long_about = None)]
pub struct Cli {
    /// Show debug logs and detailed errors
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List recently joined creators
    Creators(creators::Args),

    /// Manage the stored auth token
    Token(token::Args),

    /// Check connectivity to the backend
    Ping(ping::Args),
}
