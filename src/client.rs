use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountNumber},
    transaction::Transaction,
};

const CLIENT_ID_DIGITS: usize = 11;

/// Taxpayer number (CPF) identifying a client, stored as 11 plain digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Client id must contain exactly {CLIENT_ID_DIGITS} digits, got `{0}`")]
pub struct InvalidClientId(pub String);

impl FromStr for ClientId {
    type Err = InvalidClientId;

    /// Accepts the usual `123.456.789-01` punctuation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.chars().filter(|c| !matches!(c, '.' | '-')).collect();
        if cleaned.len() == CLIENT_ID_DIGITS && cleaned.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(cleaned))
        } else {
            Err(InvalidClientId(s.to_string()))
        }
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Already validated data needed to register a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRegistration {
    pub id: ClientId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub address: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("Account {account} belongs to client {owner}")]
    ForeignAccount {
        account: AccountNumber,
        owner: ClientId,
    },
    #[error(transparent)]
    Account(#[from] AccountError),
}

#[derive(Debug)]
pub struct Client {
    id: ClientId,
    name: String,
    birth_date: NaiveDate,
    address: String,
    accounts: Vec<AccountNumber>,
}

impl Client {
    pub fn new(registration: ClientRegistration) -> Self {
        Self {
            id: registration.id,
            name: registration.name,
            birth_date: registration.birth_date,
            address: registration.address,
            accounts: Vec::new(),
        }
    }

    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Numbers of the owned accounts, in the order they were opened.
    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    pub fn register_account(&mut self, account: &Account) -> Result<(), ClientError> {
        self.ensure_owner(account)?;
        self.accounts.push(account.number());
        Ok(())
    }

    /// Applies `transaction` to `account` and records it in the account
    /// history when it succeeds. Rule violations are returned untouched.
    pub fn execute(
        &self,
        account: &mut Account,
        transaction: &Transaction,
        now: DateTime<Utc>,
    ) -> Result<(), ClientError> {
        self.ensure_owner(account)?;
        transaction.apply(account, now)?;
        account
            .history
            .record(transaction.kind(), transaction.amount(), now);
        debug_assert_eq!(Some(account.balance()), account.history().net_amount());
        Ok(())
    }

    fn ensure_owner(&self, account: &Account) -> Result<(), ClientError> {
        if account.owner() != &self.id {
            return Err(ClientError::ForeignAccount {
                account: account.number(),
                owner: account.owner().clone(),
            });
        }
        Ok(())
    }
}
