//! dhammapada - A daily dose of the Dharma
//!
//! Usage:
//!   dhammapada                 Print a random verse
//!   dhammapada -v N            Print verse N (1-423)
//!   dhammapada TEXT            Print every verse containing TEXT
//!   dhammapada -c ...          Print in colour

use clap::Parser;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use dhammapada::cli::{self, Cli};

fn main() {
    // Initialize logging; stdout is reserved for verses
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = cli::parse_error_exit_code(&e);
            if let Err(print_err) = e.print() {
                error!("Failed to print usage: {}", print_err);
            }
            std::process::exit(code);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = cli::run(&cli, &mut out) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
