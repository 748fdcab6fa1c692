//! Batch driver around [`crate::ledger`]: reads a CSV command script, runs
//! every row against an in-memory ledger and prints the requested statements
//! followed by the resulting accounts.

use std::io::{Read, Write};

use crate::{
    command::{CommandError, CommandOutcome, LedgerCommand},
    config::Config,
    ledger::{Ledger, LedgerError, SystemClock, in_memory_ledger::InMemoryLedger},
};
use anyhow::Result;
use csv_parser::CsvCommandParser;
use csv_printer::{Account, print_accounts, print_statement};
use thiserror::Error;
use tracing::info;
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum CommandProcessError {
    #[error("Malformed row: {0}")]
    ParseErr(#[from] csv::Error),
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
}

pub struct Service<'w, R, W: 'w> {
    pub config: Config,
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, CommandProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvCommandParser::new(self.input);

        let mut ledger = InMemoryLedger::new(self.config, SystemClock);

        let mut processed = 0usize;
        for (line, row) in parser {
            processed += 1;
            match process_row(&mut ledger, row) {
                Ok(CommandOutcome::Applied) => {}
                Ok(CommandOutcome::Statement(number)) => {
                    print_statement(&mut *self.output, number, ledger.statement(number)?)?;
                }
                Err(err) => (self.error_printer)(line, err),
            }
        }
        info!(rows = processed, "Command script processed");

        print_accounts(
            self.output,
            ledger.list_accounts().into_iter().map(Account::from),
        )
    }
}

fn process_row(
    ledger: &mut impl Ledger,
    row: Result<csv_parser::Command, csv::Error>,
) -> Result<CommandOutcome, CommandProcessError> {
    let (kind, fields) = row?.into_parts();
    Ok(LedgerCommand::parse_command(kind, fields)?.execute(ledger)?)
}
