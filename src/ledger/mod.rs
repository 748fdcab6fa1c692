use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountNumber},
    client::{Client, ClientError, ClientId, ClientRegistration},
    history::History,
};

pub mod in_memory_ledger;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Client {0} not found")]
    ClientNotFound(ClientId),
    #[error("Client {0} is already registered")]
    DuplicateClient(ClientId),
    #[error("Account {0} not found")]
    AccountNotFound(AccountNumber),
    #[error("Client {0} has no account yet")]
    ClientHasNoAccount(ClientId),
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl LedgerError {
    /// The business rule that rejected a deposit or withdrawal, if any.
    pub fn account_error(&self) -> Option<&AccountError> {
        match self {
            LedgerError::Client(ClientError::Account(err)) => Some(err),
            _ => None,
        }
    }
}

/// Source of the current time for history entries and daily limits.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Everything needed to print an account statement.
#[derive(Debug)]
pub struct Statement<'a> {
    pub history: &'a History,
    pub balance: Decimal,
}

/// One line of the account listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub branch: String,
    pub number: AccountNumber,
    pub client: ClientId,
    pub holder: String,
    pub balance: Decimal,
}

/// Operations the outside world may run against the bank.
///
/// Balances only change through [`Ledger::deposit`] and
/// [`Ledger::withdraw`], which go through the owning [`Client`].
pub trait Ledger {
    fn register_client(
        &mut self,
        registration: ClientRegistration,
    ) -> Result<&Client, LedgerError>;

    fn find_client(&self, id: &ClientId) -> Option<&Client>;

    fn find_account(&self, number: AccountNumber) -> Option<&Account>;

    /// First account opened by the client.
    fn primary_account(&self, id: &ClientId) -> Result<Option<&Account>, LedgerError> {
        let client = self
            .find_client(id)
            .ok_or_else(|| LedgerError::ClientNotFound(id.clone()))?;
        Ok(client
            .accounts()
            .first()
            .and_then(|number| self.find_account(*number)))
    }

    fn open_account(&mut self, id: &ClientId) -> Result<&Account, LedgerError>;

    fn deposit(&mut self, number: AccountNumber, amount: Decimal) -> Result<(), LedgerError>;

    fn withdraw(&mut self, number: AccountNumber, amount: Decimal) -> Result<(), LedgerError>;

    fn statement(&self, number: AccountNumber) -> Result<Statement<'_>, LedgerError> {
        let account = self
            .find_account(number)
            .ok_or(LedgerError::AccountNotFound(number))?;
        Ok(Statement {
            history: account.history(),
            balance: account.balance(),
        })
    }

    /// All accounts, in the order they were opened.
    fn list_accounts(&self) -> Vec<AccountSummary>;
}
