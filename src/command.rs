use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::{Account, AccountNumber},
    client::{ClientId, ClientRegistration, InvalidClientId},
    ledger::{Ledger, LedgerError},
};

const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Register,
    Open,
    Deposit,
    Withdraw,
    Statement,
}

/// Raw values as they come from the operator. Which of them are required
/// depends on the [`CommandKind`].
#[derive(Debug, Clone, Default)]
pub struct CommandFields {
    pub client: Option<String>,
    pub account: Option<AccountNumber>,
    pub amount: Option<Decimal>,
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub address: Option<String>,
}

/// Account a command targets. A row naming only the client acts on that
/// client's primary account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountRef {
    Number(AccountNumber),
    PrimaryOf(ClientId),
}

impl AccountRef {
    pub fn resolve(&self, ledger: &impl Ledger) -> Result<AccountNumber, LedgerError> {
        match self {
            AccountRef::Number(number) => Ok(*number),
            AccountRef::PrimaryOf(id) => ledger
                .primary_account(id)?
                .map(Account::number)
                .ok_or_else(|| LedgerError::ClientHasNoAccount(id.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    RegisterClient(ClientRegistration),
    OpenAccount {
        client: ClientId,
    },
    Deposit {
        account: AccountRef,
        amount: Decimal,
    },
    Withdraw {
        account: AccountRef,
        amount: Decimal,
    },
    Statement {
        account: AccountRef,
    },
}

/// What a successfully executed command asks the caller to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// Print the statement of this account.
    Statement(AccountNumber),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Field `{field}` is required for {kind:?}")]
    MissingField {
        kind: CommandKind,
        field: &'static str,
    },
    #[error(transparent)]
    InvalidClientId(#[from] InvalidClientId),
    #[error("Name `{0}` must contain at least a first name and a surname")]
    IncompleteName(String),
    #[error("Birth date `{0}` is not a valid DD/MM/YYYY date")]
    InvalidBirthDate(String),
}

impl LedgerCommand {
    pub fn parse_command(
        kind: CommandKind,
        fields: CommandFields,
    ) -> Result<Self, CommandError> {
        match kind {
            CommandKind::Register => Self::parse_registration(fields),
            CommandKind::Open => Ok(Self::OpenAccount {
                client: required(kind, "client", fields.client)?.parse()?,
            }),
            CommandKind::Deposit => Ok(Self::Deposit {
                account: account_ref(kind, &fields)?,
                amount: required(kind, "amount", fields.amount)?,
            }),
            CommandKind::Withdraw => Ok(Self::Withdraw {
                account: account_ref(kind, &fields)?,
                amount: required(kind, "amount", fields.amount)?,
            }),
            CommandKind::Statement => Ok(Self::Statement {
                account: account_ref(kind, &fields)?,
            }),
        }
    }

    fn parse_registration(fields: CommandFields) -> Result<Self, CommandError> {
        let kind = CommandKind::Register;
        let id: ClientId = required(kind, "client", fields.client)?.parse()?;

        let name = required(kind, "name", non_blank(fields.name))?;
        if name.split_whitespace().count() < 2 {
            return Err(CommandError::IncompleteName(name));
        }

        let raw_date = required(kind, "birth_date", non_blank(fields.birth_date))?;
        let birth_date = NaiveDate::parse_from_str(&raw_date, BIRTH_DATE_FORMAT)
            .map_err(|_| CommandError::InvalidBirthDate(raw_date))?;

        let address = required(kind, "address", non_blank(fields.address))?;

        Ok(Self::RegisterClient(ClientRegistration {
            id,
            name,
            birth_date,
            address,
        }))
    }

    pub fn execute(self, ledger: &mut impl Ledger) -> Result<CommandOutcome, LedgerError> {
        match self {
            LedgerCommand::RegisterClient(registration) => {
                ledger.register_client(registration)?;
            }
            LedgerCommand::OpenAccount { client } => {
                ledger.open_account(&client)?;
            }
            LedgerCommand::Deposit { account, amount } => {
                let number = account.resolve(ledger)?;
                ledger.deposit(number, amount)?;
            }
            LedgerCommand::Withdraw { account, amount } => {
                let number = account.resolve(ledger)?;
                ledger.withdraw(number, amount)?;
            }
            LedgerCommand::Statement { account } => {
                let number = account.resolve(ledger)?;
                ledger.statement(number)?;
                return Ok(CommandOutcome::Statement(number));
            }
        }
        Ok(CommandOutcome::Applied)
    }
}

/// An explicit account number wins over the client's primary account.
fn account_ref(kind: CommandKind, fields: &CommandFields) -> Result<AccountRef, CommandError> {
    match (fields.account, fields.client.as_deref()) {
        (Some(number), _) => Ok(AccountRef::Number(number)),
        (None, Some(client)) => Ok(AccountRef::PrimaryOf(client.parse()?)),
        (None, None) => Err(CommandError::MissingField {
            kind,
            field: "account",
        }),
    }
}

fn required<T>(
    kind: CommandKind,
    field: &'static str,
    value: Option<T>,
) -> Result<T, CommandError> {
    value.ok_or(CommandError::MissingField { kind, field })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
