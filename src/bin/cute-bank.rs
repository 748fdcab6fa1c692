use std::fs::File;

use anyhow::{Context, Result};
use cute_bank::{
    bin_utils::{CommandProcessError, Service},
    config::Config,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cute_bank=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;
    let config = Config::from_env().context("Failed to load configuration")?;

    let service = Service {
        config,
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| match &err {
            CommandProcessError::LedgerErr(ledger_err) if ledger_err.account_error().is_some() => {
                // rejected by a business rule, already logged by the ledger
            }
            _ => eprintln!("Error at line {line}: {err}"),
        }),
    };
    service.run()
}
