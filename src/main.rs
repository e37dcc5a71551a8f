mod builtins;
mod completion;
mod config;
mod error;
mod files;
mod history;
mod parser;
mod paths;
mod repl;
mod util;

use config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    tracing::debug!(?config, "starting prompt");
    let code = repl::start_repl(config)?;
    std::process::exit(code);
}
