//! ログ初期化

use tracing_subscriber::EnvFilter;

/// stderr 向けの tracing subscriber を初期化する
///
/// RUST_LOG があればそれを優先する。二重初期化は無視する。
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "stash=debug,stash_cli=debug"
    } else {
        "stash=warn,stash_cli=warn"
    }
}
